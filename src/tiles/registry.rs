use crate::{prelude::HashMap, tiles::source::TileSource, MapError, Result};

/// Sources registered on a map, in registration order
#[derive(Default)]
pub struct SourceRegistry {
    sources: HashMap<String, Box<dyn TileSource>>,
    order: Vec<String>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks that `source` could be registered, without registering it
    pub fn check(&self, source: &dyn TileSource) -> Result<()> {
        if self.sources.contains_key(source.id()) {
            return Err(MapError::DuplicateSource(source.id().to_string()));
        }
        source.validate()
    }

    /// Registers a source; ids are unique per map
    pub fn register(&mut self, source: Box<dyn TileSource>) -> Result<()> {
        self.check(source.as_ref())?;
        let id = source.id().to_string();

        log::debug!("registered source '{}'", id);
        self.order.push(id.clone());
        self.sources.insert(id, source);
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&dyn TileSource> {
        self.sources.get(id).map(|s| s.as_ref())
    }

    /// Source ids in registration order
    pub fn ids(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
