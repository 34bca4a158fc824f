use crate::core::{config::MapConfig, geo::LatLng};
use crate::traits::StyleSpec;
use serde_json::json;

/// The map canvas as created at startup.
///
/// Pan and zoom after creation belong to the rendering library; this only
/// records what the view was created with.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub container: String,
    pub style_url: String,
    pub center: LatLng,
    pub zoom: f64,
}

impl MapView {
    pub fn new(container: String, style_url: String, center: LatLng, zoom: f64) -> Self {
        Self {
            container,
            style_url,
            center,
            zoom,
        }
    }

    pub fn from_config(config: &MapConfig) -> Self {
        Self::new(
            config.container.clone(),
            config.style_url.clone(),
            config.center,
            config.zoom,
        )
    }
}

impl StyleSpec for MapView {
    /// Map constructor options
    fn to_spec(&self) -> serde_json::Value {
        json!({
            "container": self.container,
            "style": self.style_url,
            "center": self.center.to_lng_lat_array(),
            "zoom": self.zoom,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_options() {
        let view = MapView::from_config(&MapConfig::default());
        assert_eq!(
            view.to_spec(),
            json!({
                "container": "map",
                "style": "https://demotiles.maplibre.org/style.json",
                "center": [0.0, 0.0],
                "zoom": 2.0,
            })
        );
    }

    #[test]
    fn test_center_is_lng_lat() {
        let view = MapView::new(
            "map".to_string(),
            "style.json".to_string(),
            LatLng::new(51.5, -0.13),
            9.0,
        );
        assert_eq!(view.to_spec()["center"], json!([-0.13, 51.5]));
    }
}
