//! # pointmap
//!
//! A small, Rust-native client for a vector-tile point dataset.
//!
//! The client owns the declarative side of a web map: one vector-tile
//! source, one circle layer bound to it, and the pointer interaction that
//! shows a popup with distance and coordinate metadata. The rendering
//! library itself sits behind the [`MapSurface`] trait, so the same client
//! drives MapLibre GL JS in the browser (feature `wasm`) or a headless
//! recording surface in tests and on the command line.

pub mod core;
pub mod data;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod rendering;
pub mod tiles;
pub mod traits;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    builder::MapBuilder,
    config::MapConfig,
    geo::{LatLng, Point, TileCoord},
    map::{LoadState, MapClient},
    view::MapView,
};

pub use layers::{base::LayerTrait, circle::CircleLayer, manager::LayerManager};

pub use input::{events::MapEvent, handler::EventManager};

#[cfg(not(target_arch = "wasm32"))]
pub use tiles::loader::TileLoader;
pub use tiles::{registry::SourceRegistry, source::VectorTileSource};

pub use ui::{cursor::Cursor, popup::Popup};

pub use rendering::surface::{MapSurface, RecordingSurface};

#[cfg(feature = "wasm")]
pub use rendering::maplibre::{start, MapLibreSurface};

pub use data::{feature::Feature, generator::PointGenerator};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(not(target_arch = "wasm32"))]
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    Http { status: u16, url: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Map is already loaded")]
    AlreadyLoaded,

    #[error("Map style has not finished loading")]
    NotLoaded,

    #[error("Layer '{layer_id}' references unknown source '{source_id}'")]
    UnknownSource { layer_id: String, source_id: String },

    #[error("Source '{0}' is already registered")]
    DuplicateSource(String),

    #[error("Layer '{0}' is already registered")]
    DuplicateLayer(String),

    #[error("Invalid tile URL template '{0}': expected {{z}}, {{x}} and {{y}} placeholders")]
    InvalidTemplate(String),

    #[error("Invalid paint property: {0}")]
    InvalidPaint(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Surface error: {0}")]
    Surface(String),
}

/// Error type alias for convenience
pub type Error = MapError;
