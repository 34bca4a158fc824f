//! Defaults for the point map: where tiles come from and how points look.
//! Keeping them in a single place makes it easier to point the client at another deployment.

/// DOM id of the element hosting the map canvas.
pub const DEFAULT_CONTAINER: &str = "map";

/// Base style the point layer is drawn on top of.
pub const DEFAULT_STYLE_URL: &str = "https://demotiles.maplibre.org/style.json";

/// Initial zoom level of the view.
pub const DEFAULT_ZOOM: f64 = 2.0;

/// Identifier of the vector-tile source.
pub const POINTS_SOURCE_ID: &str = "points";

/// Layer name inside each vector tile.
pub const POINTS_SOURCE_LAYER: &str = "points";

/// Identifier of the circle layer drawing the points.
pub const POINTS_LAYER_ID: &str = "points-layer";

/// Tile endpoint of the local tile server.
pub const DEFAULT_TILE_URL: &str = "http://localhost:8000/tiles/{z}/{x}/{y}.pbf";

/// Zoom bounds advertised by the tile source.
pub const DEFAULT_MIN_ZOOM: u8 = 0;
pub const DEFAULT_MAX_ZOOM: u8 = 14;

/// Circle radius stops as (zoom, radius in pixels).
pub const DEFAULT_RADIUS_STOPS: [(f64, f64); 3] = [(0.0, 2.0), (6.0, 3.0), (10.0, 5.0)];

/// Circle fill color (RGBA hex).
pub const DEFAULT_CIRCLE_COLOR: &str = "#5e63ffff";

/// Circle opacity.
pub const DEFAULT_CIRCLE_OPACITY: f64 = 0.6;

/// Feature property carrying the distance in meters.
pub const DISTANCE_PROPERTY: &str = "dist_m";

/// Feature property carrying the identifier.
pub const ID_PROPERTY: &str = "id";

/// Meters per degree of latitude, used by the point generator.
pub const METERS_PER_DEGREE: f64 = 111_320.0;
