//! Map builder for fluent API configuration
//!
//! Starts from [`MapConfig::default`] (or a loaded config) and overrides
//! individual settings before creating the client.

use crate::{
    core::{config::MapConfig, geo::LatLng, map::MapClient},
    layers::paint::Color,
    rendering::surface::MapSurface,
    Result,
};

/// Builder for creating and configuring [`MapClient`] instances
#[derive(Debug, Clone, Default)]
pub struct MapBuilder {
    config: MapConfig,
}

impl MapBuilder {
    /// Create a new MapBuilder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn from_config(config: MapConfig) -> Self {
        Self { config }
    }

    /// Set the DOM element hosting the map
    pub fn with_container(mut self, container: impl Into<String>) -> Self {
        self.config.container = container.into();
        self
    }

    /// Set the base style URL
    pub fn with_style_url(mut self, url: impl Into<String>) -> Self {
        self.config.style_url = url.into();
        self
    }

    /// Set the initial center and zoom level
    pub fn with_center_and_zoom(mut self, center: LatLng, zoom: f64) -> Self {
        self.config.center = center;
        self.config.zoom = zoom;
        self
    }

    /// Replace the tile URL templates of the point source
    pub fn with_tile_urls<I, T>(mut self, templates: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.config.source.tiles = templates.into_iter().map(Into::into).collect();
        self
    }

    /// Set zoom limits of the point source
    pub fn with_zoom_limits(mut self, min_zoom: u8, max_zoom: u8) -> Self {
        self.config.source.min_zoom = min_zoom;
        self.config.source.max_zoom = max_zoom;
        self
    }

    /// Set the (zoom, radius) stops of the circle layer
    pub fn with_radius_stops(mut self, stops: Vec<(f64, f64)>) -> Self {
        self.config.layer.radius_stops = stops;
        self
    }

    /// Set circle fill color and opacity
    pub fn with_circle_style(mut self, color: Color, opacity: f64) -> Self {
        self.config.layer.color = color.to_hex();
        self.config.layer.opacity = opacity;
        self
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Build the client on `surface`
    pub fn build<S: MapSurface>(self, surface: S) -> Result<MapClient<S>> {
        MapClient::initialize(self.config, surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{rendering::surface::RecordingSurface, traits::StyleSpec, MapError};

    #[test]
    fn test_builder_defaults() {
        let builder = MapBuilder::new();
        assert_eq!(builder.config(), &MapConfig::default());
    }

    #[test]
    fn test_builder_overrides() {
        let client = MapBuilder::new()
            .with_container("viewer")
            .with_center_and_zoom(LatLng::new(48.85, 2.35), 9.0)
            .with_tile_urls(["https://tiles.example.com/{z}/{x}/{y}.pbf"])
            .with_circle_style(Color::rgb(255, 0, 0), 1.0)
            .build(RecordingSurface::new())
            .unwrap();

        assert_eq!(client.view().container, "viewer");
        assert_eq!(client.view().zoom, 9.0);
        assert_eq!(client.config().layer.color, "#ff0000ff");
        assert_eq!(client.view().to_spec()["center"], serde_json::json!([2.35, 48.85]));
    }

    #[test]
    fn test_invalid_settings_surface_on_load() {
        let mut client = MapBuilder::new()
            .with_tile_urls(["https://tiles.example.com/tiles.pbf"])
            .build(RecordingSurface::new())
            .unwrap();

        assert!(matches!(client.on_load(), Err(MapError::InvalidTemplate(_))));
        assert!(!client.is_loaded());
    }

    #[test]
    fn test_inverted_zoom_limits() {
        let mut client = MapBuilder::new()
            .with_zoom_limits(10, 2)
            .build(RecordingSurface::new())
            .unwrap();
        assert!(client.on_load().is_err());
        assert!(client.sources().is_empty());
    }
}
