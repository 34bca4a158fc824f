//! Configuration for the point map client
//!
//! Every field has a default matching the stock deployment (local tile
//! server, MapLibre demo style), so a config file only needs to list what
//! differs. Configs are plain JSON.

use crate::core::{constants, geo::LatLng};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// DOM id of the element hosting the map
    pub container: String,
    /// Base style URL
    pub style_url: String,
    /// Initial center
    pub center: LatLng,
    /// Initial zoom
    pub zoom: f64,
    pub source: SourceConfig,
    pub layer: PointLayerConfig,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            container: constants::DEFAULT_CONTAINER.to_string(),
            style_url: constants::DEFAULT_STYLE_URL.to_string(),
            center: LatLng::default(),
            zoom: constants::DEFAULT_ZOOM,
            source: SourceConfig::default(),
            layer: PointLayerConfig::default(),
        }
    }
}

impl MapConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: MapConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        log::debug!("loading map config from {}", path.display());
        Self::from_json_str(&text)
    }

    /// Structural checks only; center and zoom are left to the rendering library
    pub fn validate(&self) -> Result<()> {
        if self.container.is_empty() {
            return Err(MapError::InvalidConfig("container is empty".to_string()));
        }
        if self.layer.id.is_empty() {
            return Err(MapError::InvalidConfig("layer id is empty".to_string()));
        }
        Ok(())
    }
}

/// Vector-tile source settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub id: String,
    pub tiles: Vec<String>,
    pub min_zoom: u8,
    pub max_zoom: u8,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            id: constants::POINTS_SOURCE_ID.to_string(),
            tiles: vec![constants::DEFAULT_TILE_URL.to_string()],
            min_zoom: constants::DEFAULT_MIN_ZOOM,
            max_zoom: constants::DEFAULT_MAX_ZOOM,
        }
    }
}

impl SourceConfig {
    /// Origin of the first template (`scheme://host[:port]`), where the
    /// tile server also answers `/health`
    pub fn server_origin(&self) -> Option<String> {
        let template = self.tiles.first()?;
        let (scheme, rest) = template.split_once("://")?;
        let host = rest.split('/').next()?;
        if host.is_empty() {
            return None;
        }
        Some(format!("{}://{}", scheme, host))
    }
}

/// Circle layer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointLayerConfig {
    pub id: String,
    pub source_layer: String,
    /// (zoom, radius) stops
    pub radius_stops: Vec<(f64, f64)>,
    pub color: String,
    pub opacity: f64,
}

impl Default for PointLayerConfig {
    fn default() -> Self {
        Self {
            id: constants::POINTS_LAYER_ID.to_string(),
            source_layer: constants::POINTS_SOURCE_LAYER.to_string(),
            radius_stops: constants::DEFAULT_RADIUS_STOPS.to_vec(),
            color: constants::DEFAULT_CIRCLE_COLOR.to_string(),
            opacity: constants::DEFAULT_CIRCLE_OPACITY,
        }
    }
}
