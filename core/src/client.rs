//! Async client that executes `CoordinateApi` requests over reqwest.
//!
//! One `reqwest::Client` is built per `CoordinateClient` and reused for every
//! call so connections are pooled. Cloning a `CoordinateClient` shares that
//! pool; construct it once at startup and hand clones or references to
//! whatever needs to query the backend.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::api::CoordinateApi;
use crate::config::ClientConfig;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

#[derive(Debug, Clone)]
pub struct CoordinateClient {
    api: CoordinateApi,
    http: reqwest::Client,
}

impl CoordinateClient {
    /// Build the shared transport. The configured timeout bounds every call,
    /// so an unreachable backend surfaces as `ApiError::Transport` instead of
    /// hanging.
    ///
    /// The base URL is not re-validated here: a URL reqwest cannot use makes
    /// every call fail with `ApiError::Transport`. A zero timeout is rejected
    /// since it would fail every call, even against a healthy backend.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        if config.timeout.is_zero() {
            return Err(ApiError::Config("timeout must be greater than zero".to_string()));
        }
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .build()?;
        Ok(Self::with_http_client(config, http))
    }

    /// Use a caller-built `reqwest::Client`, e.g. one shared with other
    /// services. Its own timeout settings apply.
    pub fn with_http_client(config: &ClientConfig, http: reqwest::Client) -> Self {
        Self {
            api: CoordinateApi::new(&config.base_url),
            http,
        }
    }

    /// `ClientConfig::from_env` followed by `new`.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(&ClientConfig::from_env()?)
    }

    pub fn api(&self) -> &CoordinateApi {
        &self.api
    }

    /// Household data for an area descriptor, returned unmodified.
    pub async fn get_households<R: Serialize + ?Sized>(&self, request: &R) -> Result<Value, ApiError> {
        self.post(Endpoint::HouseholdsArea, request).await
    }

    /// Population data for an area descriptor, returned unmodified.
    pub async fn get_population<R: Serialize + ?Sized>(&self, request: &R) -> Result<Value, ApiError> {
        self.post(Endpoint::PopulationArea, request).await
    }

    /// Raw coordinate submission. The backend's generic entry point is the
    /// households-by-area route.
    pub async fn send_coordinate<R: Serialize + ?Sized>(&self, request: &R) -> Result<Value, ApiError> {
        self.post(Endpoint::HouseholdsArea, request).await
    }

    pub async fn get_households_near<R: Serialize + ?Sized>(&self, request: &R) -> Result<Value, ApiError> {
        self.post(Endpoint::HouseholdsPoint, request).await
    }

    pub async fn get_population_near<R: Serialize + ?Sized>(&self, request: &R) -> Result<Value, ApiError> {
        self.post(Endpoint::PopulationPoint, request).await
    }

    /// Issue exactly one POST to `endpoint` and decode the response into `T`.
    ///
    /// Failures are logged and returned as-is; nothing is retried.
    pub async fn post<R, T>(&self, endpoint: Endpoint, request: &R) -> Result<T, ApiError>
    where
        R: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let result = self.execute(endpoint, request).await;
        if let Err(ref e) = result {
            error!(endpoint = %endpoint, error = %e, "Coordinate API request failed");
        }
        result
    }

    async fn execute<R, T>(&self, endpoint: Endpoint, request: &R) -> Result<T, ApiError>
    where
        R: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.api.build_request(endpoint, request)?;
        let response = self.send(request).await?;
        debug!(endpoint = %endpoint, status = response.status, "Coordinate API response");
        self.api.parse_response(response)
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(url = %request.url, bytes = request.body.len(), "POST");

        let mut builder = self.http.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let response = builder.body(request.body).send().await?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.text().await?;

        Ok(HttpResponse { status, headers, body })
    }
}
