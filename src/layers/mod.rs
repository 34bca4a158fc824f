pub mod base;
pub mod circle;
pub mod manager;
pub mod paint;

pub use base::{LayerProperties, LayerTrait, LayerType};
pub use circle::CircleLayer;
pub use manager::LayerManager;
pub use paint::{CirclePaint, Color, ZoomInterpolation};
