use crate::{
    core::config::PointLayerConfig,
    layers::{
        base::{LayerProperties, LayerTrait, LayerType},
        paint::{CirclePaint, Color, ZoomInterpolation},
    },
    traits::StyleSpec,
    Result,
};

/// Circle layer drawing point features of a vector-tile source
#[derive(Debug, Clone, PartialEq)]
pub struct CircleLayer {
    properties: LayerProperties,
    paint: CirclePaint,
}

impl CircleLayer {
    pub fn new(id: String, source: String, source_layer: String, paint: CirclePaint) -> Self {
        let properties = LayerProperties::new(id, LayerType::Circle, source)
            .with_source_layer(source_layer);
        Self { properties, paint }
    }

    /// Build the layer from its configuration, validating the paint rule
    pub fn from_config(config: &PointLayerConfig, source: &str) -> Result<Self> {
        let radius = ZoomInterpolation::linear(config.radius_stops.clone())?;
        let color = Color::from_hex(&config.color)?;
        let paint = CirclePaint::new(radius, color, config.opacity)?;

        Ok(Self::new(
            config.id.clone(),
            source.to_string(),
            config.source_layer.clone(),
            paint,
        ))
    }

    pub fn paint(&self) -> &CirclePaint {
        &self.paint
    }

    /// Circle radius in pixels at the given zoom
    pub fn radius_at(&self, zoom: f64) -> f64 {
        self.paint.radius.evaluate(zoom)
    }
}

impl StyleSpec for CircleLayer {
    fn to_spec(&self) -> serde_json::Value {
        let mut spec = self.properties.base_spec();
        spec.insert("paint".to_string(), self.paint.to_spec());
        serde_json::Value::Object(spec)
    }
}

impl LayerTrait for CircleLayer {
    fn id(&self) -> &str {
        &self.properties.id
    }

    fn layer_type(&self) -> LayerType {
        self.properties.layer_type
    }

    fn source_id(&self) -> &str {
        &self.properties.source
    }

    fn source_layer(&self) -> Option<&str> {
        self.properties.source_layer.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_points_layer_spec() {
        let layer = CircleLayer::from_config(&PointLayerConfig::default(), "points").unwrap();

        assert_eq!(
            layer.to_spec(),
            json!({
                "id": "points-layer",
                "type": "circle",
                "source": "points",
                "source-layer": "points",
                "paint": {
                    "circle-radius": ["interpolate", ["linear"], ["zoom"], 0.0, 2.0, 6.0, 3.0, 10.0, 5.0],
                    "circle-color": "#5e63ffff",
                    "circle-opacity": 0.6,
                }
            })
        );
    }

    #[test]
    fn test_opacity_serializes_exactly() {
        let layer = CircleLayer::from_config(&PointLayerConfig::default(), "points").unwrap();
        assert_eq!(layer.to_spec()["paint"]["circle-opacity"].to_string(), "0.6");
    }

    #[test]
    fn test_radius_follows_zoom() {
        let layer = CircleLayer::from_config(&PointLayerConfig::default(), "points").unwrap();
        assert_eq!(layer.radius_at(0.0), 2.0);
        assert_eq!(layer.radius_at(6.0), 3.0);
        assert_eq!(layer.radius_at(14.0), 5.0);
    }

    #[test]
    fn test_bad_paint_config_is_rejected() {
        let config = PointLayerConfig {
            color: "blue".to_string(),
            ..Default::default()
        };
        assert!(CircleLayer::from_config(&config, "points").is_err());
    }

    #[test]
    fn test_layer_trait_accessors() {
        let layer = CircleLayer::from_config(&PointLayerConfig::default(), "points").unwrap();
        assert_eq!(layer.id(), "points-layer");
        assert_eq!(layer.source_id(), "points");
        assert_eq!(layer.source_layer(), Some("points"));
        assert_eq!(layer.layer_type(), LayerType::Circle);
    }
}
