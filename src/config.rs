use crate::error::{Result, ShapeError};
use crate::math::TOLERANCE;

/// Largest accepted tolerance. Above it, the edge and diagonal distance
/// classes of the solids start to fall inside one separation window.
pub const MAX_TOLERANCE: f64 = 1e-3;

/// Parameters shared by every pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    /// Relative tolerance ε used for every floating-point comparison.
    pub tolerance: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tolerance: TOLERANCE,
        }
    }
}

impl PipelineConfig {
    /// Creates a configuration with the given tolerance.
    #[must_use]
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Checks that the tolerance is finite, positive and at most
    /// [`MAX_TOLERANCE`].
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::InvalidConfig`] otherwise.
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 || self.tolerance > MAX_TOLERANCE {
            return Err(ShapeError::InvalidConfig(format!(
                "tolerance must lie in (0, {MAX_TOLERANCE}], got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}
