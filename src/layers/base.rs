use crate::traits::StyleSpec;

/// Layers are style-spec objects bound to a source
pub trait LayerTrait: StyleSpec + Send + Sync {
    /// Get layer ID
    fn id(&self) -> &str;

    /// Get layer type
    fn layer_type(&self) -> LayerType;

    /// ID of the source the layer draws from
    fn source_id(&self) -> &str;

    /// Layer name inside the vector tiles, if any
    fn source_layer(&self) -> Option<&str>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerType {
    Circle,
}

impl std::fmt::Display for LayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerType::Circle => write!(f, "circle"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayerProperties {
    pub id: String,
    pub layer_type: LayerType,
    pub source: String,
    pub source_layer: Option<String>,
}

impl LayerProperties {
    pub fn new(id: String, layer_type: LayerType, source: String) -> Self {
        Self {
            id,
            layer_type,
            source,
            source_layer: None,
        }
    }

    pub fn with_source_layer(mut self, source_layer: String) -> Self {
        self.source_layer = Some(source_layer);
        self
    }

    /// Fields shared by every layer spec
    pub fn base_spec(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut spec = serde_json::Map::new();
        spec.insert("id".to_string(), self.id.clone().into());
        spec.insert("type".to_string(), self.layer_type.to_string().into());
        spec.insert("source".to_string(), self.source.clone().into());
        if let Some(source_layer) = &self.source_layer {
            spec.insert("source-layer".to_string(), source_layer.clone().into());
        }
        spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_properties() {
        let props = LayerProperties::new(
            "test".to_string(),
            LayerType::Circle,
            "points".to_string(),
        );

        assert_eq!(props.id, "test");
        assert_eq!(props.layer_type, LayerType::Circle);
        assert_eq!(props.source, "points");
        assert_eq!(props.source_layer, None);
    }

    #[test]
    fn test_base_spec() {
        let props = LayerProperties::new(
            "points-layer".to_string(),
            LayerType::Circle,
            "points".to_string(),
        )
        .with_source_layer("points".to_string());

        let spec = props.base_spec();
        assert_eq!(spec["id"], "points-layer");
        assert_eq!(spec["type"], "circle");
        assert_eq!(spec["source"], "points");
        assert_eq!(spec["source-layer"], "points");
        assert!(!spec.contains_key("layout"));
    }

    #[test]
    fn test_layer_type_display() {
        assert_eq!(LayerType::Circle.to_string(), "circle");
    }
}
