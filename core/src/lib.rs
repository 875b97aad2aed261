//! Typed request/response core for the Namecheap `namecheap.ssl.*` commands.
//!
//! # Overview
//! Turns typed inputs into a command name plus flat form parameters, and
//! decodes the XML `ApiResponse` back into typed results (certificate lists,
//! purchase results, domain validation challenges, certificate bundles). The
//! host executes the HTTP round-trip and supplies credentials.
//!
//! # Design
//! - `request` builds `ApiRequest` values (command + `ParameterSet`) with no
//!   knowledge of endpoints; `SslClient` renders them as `HttpRequest`.
//! - `envelope` decodes the response document; projections onto the
//!   per-command result are infallible field moves.
//! - The only locally raised error is an invalid `getInfo` return type.

pub mod client;
pub mod envelope;
pub mod error;
pub mod http;
pub mod params;
pub mod request;
pub mod types;
mod wire;

pub use client::{SslClient, PRODUCTION_ENDPOINT, SANDBOX_ENDPOINT};
pub use envelope::{ResponseEnvelope, ResponseStatus};
pub use error::{ApiError, ApiFault};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use params::{ActivateParams, GetInfoParams, ReissueParams, ReturnType};
pub use request::{ApiRequest, Command, ParameterSet};
pub use types::{
    ActivateResult, CertificateBundle, CertificateDetails, CertificateRecord, CertificateSummary,
    ChainCertificate, CreateResult, DnsChallenge, DomainValidation, InfoResult, ProviderInfo,
    ReissueResult,
};
