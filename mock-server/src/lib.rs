use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::debug;

/// Counts the stand-in backend answers with. `None` behaves like an empty
/// table: the route answers 404.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fixture {
    pub households: Option<u64>,
    pub population: Option<u64>,
}

impl Fixture {
    pub fn new(households: u64, population: u64) -> Self {
        Self {
            households: Some(households),
            population: Some(population),
        }
    }
}

fn default_overlap_ratio() -> f64 {
    0.8
}

#[derive(Debug, Deserialize)]
pub struct PolygonRequest {
    pub wkt_polygon: String,
    #[serde(default = "default_overlap_ratio")]
    pub overlap_ratio: f64,
}

#[derive(Debug, Deserialize)]
pub struct PointRequest {
    pub longitude: f64,
    pub latitude: f64,
    pub radius: f64,
    #[serde(default = "default_overlap_ratio")]
    pub overlap_ratio: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HouseholdsResponse {
    pub households: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PopulationResponse {
    pub population: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorDetail {
    pub detail: String,
}

type Rejection = (StatusCode, Json<ErrorDetail>);

const NO_DATA_IN_AREA: &str = "No data found within the specified area";
const NO_DATA_IN_RADIUS: &str = "No data found within the specified radius";

pub fn app(fixture: Fixture) -> Router {
    Router::new()
        .route("/households/area", post(households_in_area))
        .route("/population/area", post(population_in_area))
        .route("/households/point", post(households_near_point))
        .route("/population/point", post(population_near_point))
        .with_state(Arc::new(fixture))
}

pub async fn run(listener: TcpListener, fixture: Fixture) -> Result<(), std::io::Error> {
    axum::serve(listener, app(fixture)).await
}

fn reject(status: StatusCode, detail: impl Into<String>) -> Rejection {
    (status, Json(ErrorDetail { detail: detail.into() }))
}

fn check_overlap_ratio(overlap_ratio: f64) -> Result<(), Rejection> {
    if (0.0..=1.0).contains(&overlap_ratio) {
        return Ok(());
    }
    Err(reject(
        StatusCode::UNPROCESSABLE_ENTITY,
        format!("overlap_ratio must be between 0 and 1, got {overlap_ratio}"),
    ))
}

/// Only the geometry type is checked; the ring itself is not parsed.
fn check_polygon(wkt: &str) -> Result<(), Rejection> {
    let wkt = wkt.trim_start();
    let is_polygon = wkt
        .get(..7)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("POLYGON"));
    if is_polygon {
        return Ok(());
    }
    Err(reject(
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("parse error - invalid geometry: {wkt:?}"),
    ))
}

async fn households_in_area(
    State(fixture): State<Arc<Fixture>>,
    Json(input): Json<PolygonRequest>,
) -> Result<Json<HouseholdsResponse>, Rejection> {
    check_overlap_ratio(input.overlap_ratio)?;
    check_polygon(&input.wkt_polygon)?;
    let households = fixture
        .households
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, NO_DATA_IN_AREA))?;
    debug!(households, "households in area");
    Ok(Json(HouseholdsResponse { households }))
}

async fn population_in_area(
    State(fixture): State<Arc<Fixture>>,
    Json(input): Json<PolygonRequest>,
) -> Result<Json<PopulationResponse>, Rejection> {
    check_overlap_ratio(input.overlap_ratio)?;
    check_polygon(&input.wkt_polygon)?;
    let population = fixture
        .population
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, NO_DATA_IN_AREA))?;
    debug!(population, "population in area");
    Ok(Json(PopulationResponse { population }))
}

async fn households_near_point(
    State(fixture): State<Arc<Fixture>>,
    Json(input): Json<PointRequest>,
) -> Result<Json<HouseholdsResponse>, Rejection> {
    check_overlap_ratio(input.overlap_ratio)?;
    let households = fixture
        .households
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, NO_DATA_IN_RADIUS))?;
    debug!(
        households,
        longitude = input.longitude,
        latitude = input.latitude,
        radius = input.radius,
        "households near point"
    );
    Ok(Json(HouseholdsResponse { households }))
}

async fn population_near_point(
    State(fixture): State<Arc<Fixture>>,
    Json(input): Json<PointRequest>,
) -> Result<Json<PopulationResponse>, Rejection> {
    check_overlap_ratio(input.overlap_ratio)?;
    let population = fixture
        .population
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, NO_DATA_IN_RADIUS))?;
    debug!(
        population,
        longitude = input.longitude,
        latitude = input.latitude,
        radius = input.radius,
        "population near point"
    );
    Ok(Json(PopulationResponse { population }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polygon_request_defaults_overlap_ratio() {
        let input: PolygonRequest =
            serde_json::from_str(r#"{"wkt_polygon":"POLYGON((0 0, 1 0, 1 1, 0 0))"}"#).unwrap();
        assert_eq!(input.overlap_ratio, 0.8);
    }

    #[test]
    fn point_request_rejects_missing_radius() {
        let result: Result<PointRequest, _> =
            serde_json::from_str(r#"{"longitude":120.1854,"latitude":22.9921}"#);
        assert!(result.is_err());
    }

    #[test]
    fn overlap_ratio_bounds_are_inclusive() {
        assert!(check_overlap_ratio(0.0).is_ok());
        assert!(check_overlap_ratio(1.0).is_ok());
        assert!(check_overlap_ratio(-0.1).is_err());
        assert!(check_overlap_ratio(1.5).is_err());
        assert!(check_overlap_ratio(f64::NAN).is_err());
    }

    #[test]
    fn polygon_check_is_case_insensitive() {
        assert!(check_polygon("polygon((0 0, 1 0, 1 1, 0 0))").is_ok());
        assert!(check_polygon("  POLYGON((0 0, 1 0, 1 1, 0 0))").is_ok());
    }

    #[test]
    fn non_polygon_geometry_is_a_server_error() {
        let (status, Json(body)) = check_polygon("POINT(120.1 22.9)").unwrap_err();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.detail.contains("invalid geometry"));
    }

    #[test]
    fn fixture_default_has_no_data() {
        let fixture = Fixture::default();
        assert!(fixture.households.is_none());
        assert!(fixture.population.is_none());
    }
}
