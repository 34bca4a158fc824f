use crate::{
    core::{config::SourceConfig, geo::TileCoord},
    traits::StyleSpec,
    MapError, Result,
};
use serde_json::json;

/// Trait representing anything that can produce tile URLs for a given coordinate.
pub trait TileSource: StyleSpec + Send + Sync {
    /// Identifier layers use to reference this source
    fn id(&self) -> &str;

    /// Build a URL for the requested `coord`, or `None` if the source does not serve it.
    fn url(&self, coord: TileCoord) -> Option<String>;
}

/// Remote vector-tile source described by `{z}/{x}/{y}` URL templates
#[derive(Debug, Clone, PartialEq)]
pub struct VectorTileSource {
    id: String,
    tiles: Vec<String>,
    min_zoom: u8,
    max_zoom: u8,
}

impl VectorTileSource {
    /// Creates a source after checking templates and zoom bounds
    pub fn new(id: String, tiles: Vec<String>, min_zoom: u8, max_zoom: u8) -> Result<Self> {
        let source = Self {
            id,
            tiles,
            min_zoom,
            max_zoom,
        };
        source.validate()?;
        Ok(source)
    }

    pub fn from_config(config: &SourceConfig) -> Result<Self> {
        Self::new(
            config.id.clone(),
            config.tiles.clone(),
            config.min_zoom,
            config.max_zoom,
        )
    }

    pub fn tiles(&self) -> &[String] {
        &self.tiles
    }

    pub fn min_zoom(&self) -> u8 {
        self.min_zoom
    }

    pub fn max_zoom(&self) -> u8 {
        self.max_zoom
    }

    /// Whether the source advertises tiles at this zoom
    pub fn covers_zoom(&self, zoom: u8) -> bool {
        zoom >= self.min_zoom && zoom <= self.max_zoom
    }
}

/// A template must carry all three placeholders
pub fn is_valid_template(template: &str) -> bool {
    ["{z}", "{x}", "{y}"]
        .iter()
        .all(|placeholder| template.contains(placeholder))
}

impl StyleSpec for VectorTileSource {
    fn to_spec(&self) -> serde_json::Value {
        json!({
            "type": "vector",
            "tiles": self.tiles,
            "minzoom": self.min_zoom,
            "maxzoom": self.max_zoom,
        })
    }

    fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(MapError::InvalidConfig("source id is empty".to_string()));
        }
        if self.tiles.is_empty() {
            return Err(MapError::InvalidConfig(format!(
                "source '{}' has no tile templates",
                self.id
            )));
        }
        if let Some(bad) = self.tiles.iter().find(|t| !is_valid_template(t)) {
            return Err(MapError::InvalidTemplate(bad.clone()));
        }
        if self.min_zoom > self.max_zoom {
            return Err(MapError::InvalidConfig(format!(
                "source '{}' has minzoom {} above maxzoom {}",
                self.id, self.min_zoom, self.max_zoom
            )));
        }
        Ok(())
    }
}

impl TileSource for VectorTileSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn url(&self, coord: TileCoord) -> Option<String> {
        if !coord.is_valid() || !self.covers_zoom(coord.z) {
            return None;
        }

        let idx = ((coord.x as u64 + coord.y as u64) % self.tiles.len() as u64) as usize;
        let url = self.tiles[idx]
            .replace("{z}", &coord.z.to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{y}", &coord.y.to_string());
        Some(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points_source() -> VectorTileSource {
        VectorTileSource::from_config(&SourceConfig::default()).unwrap()
    }

    #[test]
    fn test_url_substitution() {
        let source = points_source();
        assert_eq!(
            source.url(TileCoord::new(3, 5, 4)).as_deref(),
            Some("http://localhost:8000/tiles/4/3/5.pbf")
        );
        assert_eq!(
            source.url(TileCoord::new(0, 0, 0)).as_deref(),
            Some("http://localhost:8000/tiles/0/0/0.pbf")
        );
    }

    #[test]
    fn test_url_outside_bounds() {
        let source = points_source();
        // Beyond maxzoom 14
        assert_eq!(source.url(TileCoord::new(0, 0, 15)), None);
        // Not on the grid at z=1
        assert_eq!(source.url(TileCoord::new(2, 0, 1)), None);
    }

    #[test]
    fn test_multiple_templates_rotate() {
        let source = VectorTileSource::new(
            "points".to_string(),
            vec![
                "http://a.example/{z}/{x}/{y}.pbf".to_string(),
                "http://b.example/{z}/{x}/{y}.pbf".to_string(),
            ],
            0,
            14,
        )
        .unwrap();

        assert!(source.url(TileCoord::new(0, 0, 1)).unwrap().starts_with("http://a."));
        assert!(source.url(TileCoord::new(1, 0, 1)).unwrap().starts_with("http://b."));
    }

    #[test]
    fn test_template_validation() {
        let missing_y = VectorTileSource::new(
            "points".to_string(),
            vec!["http://localhost:8000/tiles/{z}/{x}.pbf".to_string()],
            0,
            14,
        );
        assert!(matches!(missing_y, Err(MapError::InvalidTemplate(_))));

        let no_templates = VectorTileSource::new("points".to_string(), vec![], 0, 14);
        assert!(matches!(no_templates, Err(MapError::InvalidConfig(_))));

        let inverted = VectorTileSource::new(
            "points".to_string(),
            vec!["http://localhost/{z}/{x}/{y}".to_string()],
            10,
            2,
        );
        assert!(matches!(inverted, Err(MapError::InvalidConfig(_))));
    }

    #[test]
    fn test_source_spec() {
        let spec = points_source().to_spec();
        assert_eq!(
            spec,
            json!({
                "type": "vector",
                "tiles": ["http://localhost:8000/tiles/{z}/{x}/{y}.pbf"],
                "minzoom": 0,
                "maxzoom": 14,
            })
        );
    }
}
