//! Shared trait abstractions
//!
//! Small traits used across sources, layers and paint expressions.

use crate::Result;

/// Anything that is handed to the rendering library as a style-spec object.
pub trait StyleSpec {
    /// Serialize into the JSON shape the rendering library consumes
    fn to_spec(&self) -> serde_json::Value;

    /// Check the object before it is registered anywhere
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Unified interpolation trait
pub trait Lerp {
    fn lerp(&self, other: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t
    }
}
