#[cfg(feature = "wasm")]
pub mod maplibre;
pub mod surface;

// Re-export main types
#[cfg(feature = "wasm")]
pub use maplibre::MapLibreSurface;
pub use surface::{MapSurface, RecordingSurface, SurfaceCall};
