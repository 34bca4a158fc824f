use crate::{traits::Lerp, MapError, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// RGBA color as used by paint properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa`
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex
            .strip_prefix('#')
            .ok_or_else(|| MapError::InvalidPaint(format!("color '{}' must start with '#'", hex)))?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(MapError::InvalidPaint(format!("color '{}' is not hex", hex)));
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| MapError::InvalidPaint(hex.to_string()));

        match digits.len() {
            3 => {
                let expand = |i: usize| channel(&digits[i..i + 1].repeat(2));
                Ok(Self::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Ok(Self::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            8 => Ok(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
                channel(&digits[6..8])?,
            )),
            _ => Err(MapError::InvalidPaint(format!(
                "color '{}' must have 3, 6 or 8 hex digits",
                hex
            ))),
        }
    }

    /// Lowercase `#rrggbbaa`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

/// Piecewise-linear function of the zoom level.
///
/// Serializes to `["interpolate", ["linear"], ["zoom"], z0, v0, z1, v1, ...]`.
/// Below the first stop and above the last stop the value is clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoomInterpolation {
    stops: Vec<(f64, f64)>,
}

impl ZoomInterpolation {
    /// Stops must be non-empty with strictly increasing zoom levels
    pub fn linear(stops: Vec<(f64, f64)>) -> Result<Self> {
        if stops.is_empty() {
            return Err(MapError::InvalidPaint(
                "interpolation needs at least one stop".to_string(),
            ));
        }
        if stops.iter().any(|(z, v)| !z.is_finite() || !v.is_finite()) {
            return Err(MapError::InvalidPaint(
                "interpolation stops must be finite".to_string(),
            ));
        }
        if stops.windows(2).any(|w| w[0].0 >= w[1].0) {
            return Err(MapError::InvalidPaint(
                "interpolation stops must have strictly increasing zoom".to_string(),
            ));
        }
        Ok(Self { stops })
    }

    pub fn stops(&self) -> &[(f64, f64)] {
        &self.stops
    }

    /// Value at the given zoom level
    pub fn evaluate(&self, zoom: f64) -> f64 {
        let (first_zoom, first_value) = self.stops[0];
        if zoom <= first_zoom {
            return first_value;
        }

        for pair in self.stops.windows(2) {
            let (z0, v0) = pair[0];
            let (z1, v1) = pair[1];
            if zoom <= z1 {
                return v0.lerp(&v1, (zoom - z0) / (z1 - z0));
            }
        }

        self.stops[self.stops.len() - 1].1
    }

    pub fn to_expression(&self) -> serde_json::Value {
        let mut expression = vec![json!("interpolate"), json!(["linear"]), json!(["zoom"])];
        for (zoom, value) in &self.stops {
            expression.push(json!(zoom));
            expression.push(json!(value));
        }
        serde_json::Value::Array(expression)
    }
}

/// Paint rule of a circle layer
#[derive(Debug, Clone, PartialEq)]
pub struct CirclePaint {
    pub radius: ZoomInterpolation,
    pub color: Color,
    pub opacity: f64,
}

impl CirclePaint {
    pub fn new(radius: ZoomInterpolation, color: Color, opacity: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&opacity) {
            return Err(MapError::InvalidPaint(format!(
                "opacity {} is outside [0, 1]",
                opacity
            )));
        }
        Ok(Self {
            radius,
            color,
            opacity,
        })
    }

    pub fn to_spec(&self) -> serde_json::Value {
        json!({
            "circle-radius": self.radius.to_expression(),
            "circle-color": self.color.to_hex(),
            "circle-opacity": self.opacity,
        })
    }
}
