//! Random test points for the tile server's database
//!
//! Points are scattered around a center with a Gaussian spread given in
//! kilometers, using a flat meters-per-degree approximation.

use crate::core::{constants::METERS_PER_DEGREE, geo::LatLng};
use crate::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::io::Write;

/// One generated row
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeneratedPoint {
    pub lat: f64,
    pub lon: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dist_m: Option<f64>,
}

pub struct PointGenerator {
    center: LatLng,
    std_m: f64,
    with_distance: bool,
    rng: StdRng,
}

impl PointGenerator {
    /// A `seed` makes the sequence reproducible
    pub fn new(center: LatLng, std_km: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            center,
            std_m: std_km * 1000.0,
            with_distance: false,
            rng,
        }
    }

    /// Also emit the great-circle distance to the center as `dist_m`
    pub fn with_distance(mut self, enabled: bool) -> Self {
        self.with_distance = enabled;
        self
    }

    pub fn next_point(&mut self) -> GeneratedPoint {
        let m_lat = METERS_PER_DEGREE;
        let m_lon = m_lat * self.center.lat.to_radians().cos();

        let lat = self.gauss(self.center.lat * m_lat, self.std_m) / m_lat;
        let lon = self.gauss(self.center.lng * m_lon, self.std_m) / m_lon;

        let dist_m = self
            .with_distance
            .then(|| self.center.distance_to(&LatLng::new(lat, lon)));

        GeneratedPoint { lat, lon, dist_m }
    }

    /// Lazily draws `n` points, for writers that stream rows
    pub fn points(&mut self, n: usize) -> impl Iterator<Item = GeneratedPoint> + '_ {
        (0..n).map(move |_| self.next_point())
    }

    pub fn generate(&mut self, n: usize) -> Vec<GeneratedPoint> {
        self.points(n).collect()
    }

    /// Box-Muller transform
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        // gen::<f64>() is in [0, 1); shift to (0, 1] so ln() stays finite
        let u1: f64 = 1.0 - self.rng.gen::<f64>();
        let u2: f64 = self.rng.gen();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Write points as CSV with a `lat,lon[,dist_m]` header. Returns the row count.
pub fn write_csv<W: Write>(writer: W, points: impl IntoIterator<Item = GeneratedPoint>) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut rows = 0;
    for point in points {
        csv_writer.serialize(point)?;
        rows += 1;
    }
    csv_writer.flush()?;
    log::info!("wrote {} points", rows);
    Ok(rows)
}
