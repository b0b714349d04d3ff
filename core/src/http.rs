//! HTTP transport types for the host-does-IO layer.
//!
//! # Design
//! These types describe a POST exchange as plain data. `CoordinateApi` builds
//! `HttpRequest` values and parses `HttpResponse` values without touching the
//! network; `CoordinateClient` (or any other transport the caller brings) is
//! responsible for the actual I/O.
//!
//! Every backend route is a JSON POST, so the method is implied.

/// A JSON POST request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// An HTTP response described as plain data.
///
/// Constructed by the transport after executing an `HttpRequest`, then passed
/// to `CoordinateApi::parse_response`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
