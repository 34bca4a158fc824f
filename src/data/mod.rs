pub mod feature;
pub mod generator;

pub use feature::{Distance, Feature};
pub use generator::{write_csv, GeneratedPoint, PointGenerator};
