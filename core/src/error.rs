//! Error types for the SSL command group.
//!
//! # Design
//! `InvalidReturnType` is the only error raised before a request exists; every
//! other variant describes what came back from the host's HTTP round-trip.
//! Faults reported inside a `Status="ERROR"` envelope get their own variant so
//! callers can match on the vendor error numbers without re-parsing the body.

use thiserror::Error;

/// A single `<Error>` entry from a failed API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFault {
    pub number: String,
    pub message: String,
}

/// Errors returned by `SslClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// `returntype` was not one of the values the API accepts. Raised locally,
    /// nothing was sent.
    #[error(
        "invalid return-type: {value}, parameter takes {} values",
        .allowed.join(" or ")
    )]
    InvalidReturnType {
        value: String,
        allowed: &'static [&'static str],
    },

    /// The endpoint answered with a non-200 status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The envelope decoded fine but reported `Status="ERROR"`.
    #[error("API error: {}", format_faults(.faults))]
    Api { faults: Vec<ApiFault> },

    /// The response body was not a well-formed `ApiResponse` document.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),
}

fn format_faults(faults: &[ApiFault]) -> String {
    if faults.is_empty() {
        return "no error details returned".to_string();
    }
    faults
        .iter()
        .map(|f| format!("[{}] {}", f.number, f.message))
        .collect::<Vec<_>>()
        .join("; ")
}
