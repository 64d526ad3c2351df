//! Command implementations for the atrpack CLI.

pub mod imgconv;
pub mod pack;
pub mod routine;
pub mod sapconv;
pub mod unpack;

pub use imgconv::{ImgconvArgs, cmd_imgconv};
pub use pack::cmd_pack;
pub use routine::cmd_routine;
pub use sapconv::{OutputType, SapconvArgs, cmd_sapconv};
pub use unpack::cmd_unpack;
