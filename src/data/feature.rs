use crate::core::{constants, geo::LatLng};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::prelude::HashMap;

/// A rendered point feature as reported by the rendering library.
///
/// Property values come straight from the tile server and are untrusted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub geometry: Option<LatLng>,
    #[serde(default)]
    pub properties: HashMap<String, Value>,
}

/// Outcome of reading the distance property
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Distance {
    Meters(f64),
    Missing,
    Invalid,
}

impl Feature {
    pub fn new(properties: HashMap<String, Value>) -> Self {
        Self {
            id: None,
            geometry: None,
            properties,
        }
    }

    pub fn with_property(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Identifier as text: the `id` property, else the feature id
    pub fn display_id(&self) -> Option<String> {
        self.property(constants::ID_PROPERTY)
            .or(self.id.as_ref())
            .and_then(value_as_text)
    }

    /// Distance in meters from `dist_m`. Accepts numbers and numeric
    /// strings; anything negative or non-finite is invalid.
    pub fn distance(&self) -> Distance {
        let meters = match self.property(constants::DISTANCE_PROPERTY) {
            None | Some(Value::Null) => return Distance::Missing,
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            Some(_) => None,
        };

        match meters {
            Some(m) if m.is_finite() && m >= 0.0 => Distance::Meters(m),
            _ => Distance::Invalid,
        }
    }
}

fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
