//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! The core renders `HttpRequest` values and consumes `HttpResponse` values
//! without touching the network. Executing the request, attaching API
//! credentials and deciding on timeouts all belong to the host.

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// An HTTP request described as plain data.
///
/// Produced by `SslClient::build_*` (always POST with a form body) or by
/// `ApiRequest::to_get_request` (GET with a query string, no body).
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Constructed by the caller after executing an `HttpRequest`, then passed
/// to `SslClient::parse_*`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
