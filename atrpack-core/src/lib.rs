//! # atrpack core
//!
//! Core components shared by the atrpack packers and converters.
//!
//! - [`stepper`]: destination address stepping across a bank gap
//! - [`sink`]: destinations for decoded bytes, including a target memory image
//! - [`traits`]: the [`Codec`] trait and [`Variant`] selector
//! - [`routine`]: 6502 decode routine descriptors and zero-page layout
//! - [`config`]: producer/consumer layout agreement
//! - [`error`]: error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L4: CLI                                                 │
//! │     sapconv, imgconv, pack, unpack, routine             │
//! ├─────────────────────────────────────────────────────────┤
//! │ L3: Formats                                             │
//! │     codec facade, SAP music, GIF images, asm emission   │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     legacy run-length commands, LZ4 raw blocks          │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: Core (this crate)                                   │
//! │     AddressStepper, ByteSink, Codec trait, errors       │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use atrpack_core::{AddressStepper, StepperConfig};
//!
//! let mut stepper = AddressStepper::new(StepperConfig::DEFAULT);
//! for _ in 0..4080 {
//!     stepper.emit();
//! }
//! // the 16 bytes below the 4K boundary are skipped
//! assert_eq!(stepper.emit(), 4096);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod routine;
pub mod sink;
pub mod stepper;
pub mod traits;

// Re-exports for convenience
pub use config::TargetConfig;
pub use error::{AtrError, Result};
pub use routine::{DecodeRoutine, ZeroPage};
pub use sink::{ByteSink, SteppedMemory, TARGET_MEMORY_SIZE};
pub use stepper::{AddressStepper, StepperConfig};
pub use traits::{Codec, Variant};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{AtrError, Result};
    pub use crate::sink::{ByteSink, SteppedMemory};
    pub use crate::stepper::{AddressStepper, StepperConfig};
    pub use crate::traits::{Codec, Variant};
}
