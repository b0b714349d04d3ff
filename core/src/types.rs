//! Typed payloads for the coordinate backend.
//!
//! # Design
//! The client itself is agnostic to payload shape: every operation takes any
//! `Serialize` input. These types describe the backend's known contract for
//! callers that want validation at the boundary. They are defined
//! independently from the mock-server crate; integration tests catch schema
//! drift between the two.

use serde::{Deserialize, Serialize};

/// Overlap threshold the backend applies when the caller omits one.
pub const DEFAULT_OVERLAP_RATIO: f64 = 0.8;

fn default_overlap_ratio() -> f64 {
    DEFAULT_OVERLAP_RATIO
}

/// Area query: a WKT polygon in EPSG:4326, e.g.
/// `POLYGON((120.1828 22.9961, 120.1811 22.9869, 120.1906 22.9926, 120.1828 22.9961))`.
///
/// `overlap_ratio` is the fraction of a population cell that must fall inside
/// the polygon for the cell to be counted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonRequest {
    pub wkt_polygon: String,
    #[serde(default = "default_overlap_ratio")]
    pub overlap_ratio: f64,
}

impl PolygonRequest {
    pub fn new(wkt_polygon: impl Into<String>) -> Self {
        Self {
            wkt_polygon: wkt_polygon.into(),
            overlap_ratio: DEFAULT_OVERLAP_RATIO,
        }
    }

    /// Build a closed WKT polygon from `(longitude, latitude)` vertices.
    /// The ring is closed if the last vertex differs from the first.
    pub fn from_ring(vertices: &[(f64, f64)]) -> Self {
        let mut ring: Vec<(f64, f64)> = vertices.to_vec();
        if let (Some(first), Some(last)) = (ring.first().copied(), ring.last().copied()) {
            if first != last {
                ring.push(first);
            }
        }
        let coords = ring
            .iter()
            .map(|(lon, lat)| format!("{lon} {lat}"))
            .collect::<Vec<_>>()
            .join(", ");
        Self::new(format!("POLYGON(({coords}))"))
    }

    pub fn with_overlap_ratio(mut self, overlap_ratio: f64) -> Self {
        self.overlap_ratio = overlap_ratio;
        self
    }
}

/// Radius query around a single point. `radius` is in metres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointRequest {
    pub longitude: f64,
    pub latitude: f64,
    pub radius: f64,
    #[serde(default = "default_overlap_ratio")]
    pub overlap_ratio: f64,
}

impl PointRequest {
    pub fn new(longitude: f64, latitude: f64, radius: f64) -> Self {
        Self {
            longitude,
            latitude,
            radius,
            overlap_ratio: DEFAULT_OVERLAP_RATIO,
        }
    }

    pub fn with_overlap_ratio(mut self, overlap_ratio: f64) -> Self {
        self.overlap_ratio = overlap_ratio;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdsResponse {
    pub households: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationResponse {
    pub population: u64,
}
