use crate::{layers::base::LayerTrait, prelude::HashMap, tiles::registry::SourceRegistry, MapError, Result};

/// Manages layers for the map, in the order they were added
pub struct LayerManager {
    /// All layers indexed by ID
    layers: HashMap<String, Box<dyn LayerTrait>>,
    /// Layer IDs in draw order
    render_order: Vec<String>,
}

impl LayerManager {
    pub fn new() -> Self {
        Self {
            layers: HashMap::default(),
            render_order: Vec::new(),
        }
    }

    /// Checks that `layer` could be added, without adding it
    pub fn check(&self, layer: &dyn LayerTrait, sources: &SourceRegistry) -> Result<()> {
        if !sources.contains(layer.source_id()) {
            return Err(MapError::UnknownSource {
                layer_id: layer.id().to_string(),
                source_id: layer.source_id().to_string(),
            });
        }
        if self.layers.contains_key(layer.id()) {
            return Err(MapError::DuplicateLayer(layer.id().to_string()));
        }
        layer.validate()
    }

    /// Adds a layer. Its source must already be in `sources`; nothing is
    /// stored when it is not.
    pub fn add_layer(&mut self, layer: Box<dyn LayerTrait>, sources: &SourceRegistry) -> Result<()> {
        self.check(layer.as_ref(), sources)?;
        let layer_id = layer.id().to_string();

        log::debug!(
            "registered {} layer '{}' on source '{}'",
            layer.layer_type(),
            layer_id,
            layer.source_id()
        );
        self.render_order.push(layer_id.clone());
        self.layers.insert(layer_id, layer);
        Ok(())
    }

    /// Gets a reference to a layer by ID
    pub fn get_layer(&self, layer_id: &str) -> Option<&dyn LayerTrait> {
        self.layers.get(layer_id).map(|l| l.as_ref())
    }

    pub fn contains(&self, layer_id: &str) -> bool {
        self.layers.contains_key(layer_id)
    }

    /// Lists all layer IDs in draw order
    pub fn list_layers(&self) -> Vec<String> {
        self.render_order.clone()
    }

    /// Gets all layers in draw order
    pub fn layers(&self) -> Vec<&dyn LayerTrait> {
        self.render_order
            .iter()
            .filter_map(|id| self.layers.get(id).map(|l| l.as_ref()))
            .collect()
    }

    /// Gets the number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Checks if the manager is empty
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Default for LayerManager {
    fn default() -> Self {
        Self::new()
    }
}
