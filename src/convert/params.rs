//! Parameter types configuring the conversion pipeline.
//!
//! Defaults reproduce the historical behavior: grouping on, both
//! preprocessing stages off (a color tolerance of 0 is a no-op and
//! background removal is opt-in). Out-of-range values are rejected at the
//! orchestrator boundary before any processing starts.
use serde::Deserialize;

use crate::error::Error;

/// Pipeline-wide parameters.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ConvertParams {
    /// Group same-color shapes under one `<g>` element in the output.
    pub group_by_color: bool,
    /// Perceptual merge strength; 0 disables the color reduction stage.
    /// 1 is the smallest luminosity difference (1 on the blue channel).
    pub color_tolerance: u32,
    /// Enables the heuristic background removal stage.
    pub remove_background: bool,
    /// Blur amount driving background edge detection (>= 0, 0 = no blur).
    pub background_tolerance: f64,
    /// Blob size cap for the loose-mask rescue rule, in percent of total
    /// image pixels (0–100).
    pub max_artifact_size: f64,
}

impl Default for ConvertParams {
    fn default() -> Self {
        Self {
            group_by_color: true,
            color_tolerance: 0,
            remove_background: false,
            background_tolerance: 1.0,
            max_artifact_size: 2.0,
        }
    }
}

impl ConvertParams {
    /// Reject out-of-range parameters before any processing.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.background_tolerance.is_finite() || self.background_tolerance < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "background_tolerance must be >= 0, got {}",
                self.background_tolerance
            )));
        }
        if !self.max_artifact_size.is_finite() || !(0.0..=100.0).contains(&self.max_artifact_size)
        {
            return Err(Error::InvalidParameter(format!(
                "max_artifact_size must be within 0..=100 percent, got {}",
                self.max_artifact_size
            )));
        }
        Ok(())
    }
}
