//! Stateless HTTP request builder and response parser for the SSL commands.
//!
//! # Design
//! `SslClient` holds only the API endpoint. Each operation is split into a
//! `build_*` method that renders an `HttpRequest` and a `parse_*` method that
//! consumes the matching `HttpResponse`. The caller executes the round-trip
//! in between and adds its own credentials, so the core stays deterministic
//! and free of I/O.

use tracing::{debug, warn};

use crate::envelope::ResponseEnvelope;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::params::{ActivateParams, GetInfoParams, ReissueParams};
use crate::request::{self, ApiRequest, Command};
use crate::types::{ActivateResult, CertificateSummary, CreateResult, InfoResult, ReissueResult};

pub const PRODUCTION_ENDPOINT: &str = "https://api.namecheap.com/xml.response";
pub const SANDBOX_ENDPOINT: &str = "https://api.sandbox.namecheap.com/xml.response";

/// Synchronous, stateless client for the `namecheap.ssl.*` commands.
#[derive(Debug, Clone)]
pub struct SslClient {
    endpoint: String,
}

impl SslClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    pub fn production() -> Self {
        Self::new(PRODUCTION_ENDPOINT)
    }

    pub fn sandbox() -> Self {
        Self::new(SANDBOX_ENDPOINT)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn build_get_list(&self) -> HttpRequest {
        self.render(request::get_list())
    }

    pub fn build_create(&self, product_type: &str, years: u32) -> HttpRequest {
        self.render(request::create(product_type, years))
    }

    pub fn build_activate(&self, params: &ActivateParams) -> HttpRequest {
        self.render(request::activate(params))
    }

    pub fn build_reissue(&self, params: &ReissueParams) -> HttpRequest {
        self.render(request::reissue(params))
    }

    pub fn build_get_info(&self, params: &GetInfoParams) -> Result<HttpRequest, ApiError> {
        Ok(self.render(request::get_info(params)?))
    }

    pub fn parse_get_list(&self, response: HttpResponse) -> Result<Vec<CertificateSummary>, ApiError> {
        Ok(decode(Command::SslGetList, response)?.ssl_certificates())
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<Option<CreateResult>, ApiError> {
        Ok(decode(Command::SslCreate, response)?.ssl_create())
    }

    pub fn parse_activate(&self, response: HttpResponse) -> Result<Option<ActivateResult>, ApiError> {
        Ok(decode(Command::SslActivate, response)?.ssl_activate())
    }

    pub fn parse_reissue(&self, response: HttpResponse) -> Result<Option<ReissueResult>, ApiError> {
        Ok(decode(Command::SslReissue, response)?.ssl_reissue())
    }

    pub fn parse_get_info(&self, response: HttpResponse) -> Result<Option<InfoResult>, ApiError> {
        Ok(decode(Command::SslGetInfo, response)?.ssl_certificate_details())
    }

    fn render(&self, req: ApiRequest) -> HttpRequest {
        debug!(command = %req.command, params = req.params.len(), "built SSL request");
        req.to_post_request(&self.endpoint)
    }
}

/// Check the HTTP status, decode the envelope and surface API-level faults.
fn decode(command: Command, response: HttpResponse) -> Result<ResponseEnvelope, ApiError> {
    if response.status != 200 {
        return Err(ApiError::HttpError {
            status: response.status,
            body: response.body,
        });
    }
    let envelope = ResponseEnvelope::from_xml(&response.body)?;
    if !envelope.requested_command.is_empty()
        && Command::from_wire(&envelope.requested_command) != Some(command)
    {
        warn!(
            expected = %command,
            received = %envelope.requested_command,
            "response is for a different command"
        );
    }
    envelope.into_result().inspect_err(|err| {
        debug!(command = %command, error = %err, "API reported failure");
    })
}
