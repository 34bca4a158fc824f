//! Prelude module for common pointmap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use pointmap::prelude::*;`

pub use crate::core::{
    builder::MapBuilder,
    config::{MapConfig, PointLayerConfig, SourceConfig},
    geo::{LatLng, Point, TileCoord},
    map::{LoadState, MapClient},
    view::MapView,
};

pub use crate::layers::{
    base::LayerTrait, circle::CircleLayer, manager::LayerManager, paint::CirclePaint,
};

pub use crate::data::{feature::Feature, generator::PointGenerator};

pub use crate::input::{
    events::{ClickEvent, EventKind, MapEvent},
    handler::{Action, EventManager},
};

pub use crate::tiles::{
    registry::SourceRegistry,
    source::{TileSource, VectorTileSource},
};

#[cfg(not(target_arch = "wasm32"))]
pub use crate::tiles::loader::{TileLoader, TileLoaderConfig};

pub use crate::rendering::surface::{MapSurface, RecordingSurface};

pub use crate::ui::{cursor::Cursor, popup::Popup};

pub use crate::traits::{Lerp, StyleSpec};

pub use crate::{MapError, Result};

pub use std::{sync::Arc, time::Duration};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
