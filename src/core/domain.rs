use serde::Deserialize;

use crate::core::math::Axis;
use crate::error::{Error, Result};

/// Rectangular simulation box `[0, width] × [0, height]`.
///
/// Supplied once at construction and never changed by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Domain {
    pub width: f64,
    pub height: f64,
}

impl Domain {
    /// Create a domain after checking both sides are finite and > 0.
    pub fn new(width: f64, height: f64) -> Result<Self> {
        let d = Self { width, height };
        d.validate()?;
        Ok(d)
    }

    /// Check the invariants of a domain that may have come from deserialization.
    pub fn validate(&self) -> Result<()> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(Error::InvalidInput(
                "domain width must be finite and > 0".into(),
            ));
        }
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(Error::InvalidInput(
                "domain height must be finite and > 0".into(),
            ));
        }
        Ok(())
    }

    /// Extent of the box along `axis`.
    #[inline]
    pub fn extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }
}
