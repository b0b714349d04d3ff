//! End-to-end queries against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every client
//! operation over real HTTP. Validates that request shaping and response
//! parsing agree with the server's schema.

use coordinate_core::{
    ApiError, ClientConfig, CoordinateClient, Endpoint, HouseholdsResponse, PointRequest,
    PolygonRequest, PopulationResponse,
};
use mock_server::Fixture;
use serde_json::json;

const TAINAN_RING: [(f64, f64); 3] = [(120.1828, 22.9961), (120.1811, 22.9869), (120.1906, 22.9926)];

async fn spawn_mock(fixture: Fixture) -> CoordinateClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener, fixture));
    CoordinateClient::new(&ClientConfig::new(format!("http://{addr}"))).unwrap()
}

#[tokio::test]
async fn area_and_point_queries() {
    let client = spawn_mock(Fixture::new(42, 128)).await;
    let area = PolygonRequest::from_ring(&TAINAN_RING);
    let point = PointRequest::new(120.1854, 22.9921, 500.0);

    // Named operations hand back the payload untouched.
    let households = client.get_households(&area).await.unwrap();
    assert_eq!(households, json!({"households": 42}));

    let population = client.get_population(&area).await.unwrap();
    assert_eq!(population, json!({"population": 128}));

    let raw = client.send_coordinate(&area).await.unwrap();
    assert_eq!(raw, households);

    let near = client.get_households_near(&point).await.unwrap();
    assert_eq!(near, json!({"households": 42}));

    let near = client.get_population_near(&point).await.unwrap();
    assert_eq!(near, json!({"population": 128}));

    // Typed decoding through the generic entry point.
    let typed: HouseholdsResponse = client.post(Endpoint::HouseholdsArea, &area).await.unwrap();
    assert_eq!(typed.households, 42);
    let typed: PopulationResponse = client.post(Endpoint::PopulationPoint, &point).await.unwrap();
    assert_eq!(typed.population, 128);
}

#[tokio::test]
async fn empty_dataset_is_remote_404() {
    let client = spawn_mock(Fixture::default()).await;
    let area = PolygonRequest::from_ring(&TAINAN_RING);

    let err = client.get_households(&area).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    match err {
        ApiError::Remote { body, .. } => {
            let detail: serde_json::Value = serde_json::from_str(&body).unwrap();
            assert_eq!(detail["detail"], "No data found within the specified area");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn schema_mismatch_is_remote_422() {
    let client = spawn_mock(Fixture::new(1, 1)).await;

    // The client does not validate shape; the backend does.
    let err = client
        .get_households(&json!({"bounds": [[24.1, 120.6], [24.2, 120.7]]}))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(422));

    let err = client
        .get_population(&PolygonRequest::from_ring(&TAINAN_RING).with_overlap_ratio(2.0))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(422));
}

#[tokio::test]
async fn invalid_geometry_is_remote_500() {
    let client = spawn_mock(Fixture::new(1, 1)).await;

    let err = client
        .get_households(&PolygonRequest::new("LINESTRING(0 0, 1 1)"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Remote { status: 500, .. }));
}

#[tokio::test]
async fn shared_client_serves_concurrent_callers() {
    let client = spawn_mock(Fixture::new(7, 9)).await;
    let area = PolygonRequest::from_ring(&TAINAN_RING);

    let tasks: Vec<_> = (0..8)
        .map(|i| {
            let client = client.clone();
            let area = area.clone();
            tokio::spawn(async move {
                if i % 2 == 0 {
                    client.get_households(&area).await
                } else {
                    client.get_population(&area).await
                }
            })
        })
        .collect();

    for (i, task) in tasks.into_iter().enumerate() {
        let value = task.await.unwrap().unwrap();
        if i % 2 == 0 {
            assert_eq!(value, json!({"households": 7}));
        } else {
            assert_eq!(value, json!({"population": 9}));
        }
    }
}
