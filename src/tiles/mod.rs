#[cfg(not(target_arch = "wasm32"))]
pub mod loader;
pub mod registry;
pub mod source;

// Re-exports for convenience
#[cfg(not(target_arch = "wasm32"))]
pub use loader::{check_health, HealthStatus, TileLoader, TileLoaderConfig, VectorTile};
pub use registry::SourceRegistry;
pub use source::{TileSource, VectorTileSource};
