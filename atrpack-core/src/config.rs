//! Producer/consumer agreement on target layout.

use crate::error::Result;
use crate::routine::ZeroPage;
use crate::stepper::StepperConfig;

/// Everything the packer and the target-side routine must agree on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TargetConfig {
    /// Destination geometry.
    pub stepper: StepperConfig,
    /// Zero-page pointer locations.
    pub zero_page: ZeroPage,
}

impl TargetConfig {
    /// Reject geometry the stepper cannot honour or overlapping pointers.
    pub fn validate(&self) -> Result<()> {
        self.stepper.validate()?;
        if self.zero_page.has_overlap() {
            return Err(crate::AtrError::invalid_config(
                "zero-page pointers overlap",
            ));
        }
        Ok(())
    }
}
