//! Client for the coordinate query backend.
//!
//! # Overview
//! Sends area and point descriptors to the households/population backend and
//! hands back the parsed JSON. Every operation is exactly one POST; there is
//! no retry, batching or caching.
//!
//! # Design
//! - `CoordinateApi` is the host-does-IO layer: it builds `HttpRequest`
//!   values and parses `HttpResponse` values without touching the network.
//! - `CoordinateClient` wraps one pooled `reqwest::Client` and executes those
//!   requests. Construct it once and share it; it holds no mutable state.
//! - Request payloads are any `Serialize` value and are sent as-is. The typed
//!   schemas in `types` are optional.
//! - `ApiError` keeps transport, remote-status and parse failures apart.

pub mod api;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod types;

pub use api::CoordinateApi;
pub use client::CoordinateClient;
pub use config::ClientConfig;
pub use endpoint::Endpoint;
pub use error::ApiError;
pub use http::{HttpRequest, HttpResponse};
pub use types::{HouseholdsResponse, PointRequest, PolygonRequest, PopulationResponse};
