//! Stateless request builder and response parser for the coordinate API.
//!
//! # Design
//! `CoordinateApi` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and `parse_response`, which consumes an
//! `HttpResponse`. The transport in between is somebody else's job, which
//! keeps this layer deterministic and free of I/O.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

pub const CONTENT_TYPE_JSON: (&str, &str) = ("content-type", "application/json");

/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinateApi {
    base_url: String,
}

impl CoordinateApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    /// Serialize `input` as-is into a JSON POST against `endpoint`.
    pub fn build_request<R>(&self, endpoint: Endpoint, input: &R) -> Result<HttpRequest, ApiError>
    where
        R: Serialize + ?Sized,
    {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            url: self.url(endpoint),
            headers: vec![(CONTENT_TYPE_JSON.0.to_string(), CONTENT_TYPE_JSON.1.to_string())],
            body,
        })
    }

    pub fn build_households<R: Serialize + ?Sized>(&self, input: &R) -> Result<HttpRequest, ApiError> {
        self.build_request(Endpoint::HouseholdsArea, input)
    }

    pub fn build_population<R: Serialize + ?Sized>(&self, input: &R) -> Result<HttpRequest, ApiError> {
        self.build_request(Endpoint::PopulationArea, input)
    }

    pub fn build_households_near<R: Serialize + ?Sized>(&self, input: &R) -> Result<HttpRequest, ApiError> {
        self.build_request(Endpoint::HouseholdsPoint, input)
    }

    pub fn build_population_near<R: Serialize + ?Sized>(&self, input: &R) -> Result<HttpRequest, ApiError> {
        self.build_request(Endpoint::PopulationPoint, input)
    }

    /// Decode a 2xx body into `T`. Any other status becomes `ApiError::Remote`
    /// carrying the raw body.
    pub fn parse_response<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Parse(e.to_string()))
    }
}

fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Remote {
        status: response.status,
        body: response.body.clone(),
    })
}
