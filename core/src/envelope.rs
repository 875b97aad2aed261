//! The decoded `<ApiResponse>` document and per-command projections.
//!
//! # Design
//! `ResponseEnvelope` holds every SSL substructure the API can return, each
//! optional; a single call populates at most one. Projections are plain
//! field moves that never fail. Whether the envelope reports an error is a
//! separate check (`into_result`) so callers that decode envelopes
//! themselves can still project.

use serde::Deserialize;

use crate::error::{ApiError, ApiFault};
use crate::types::{ActivateResult, CertificateSummary, CreateResult, InfoResult, ReissueResult};

/// Value of the root `Status` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseStatus {
    #[default]
    Ok,
    Error,
}

/// A decoded API response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseEnvelope {
    pub status: ResponseStatus,
    pub errors: Vec<ApiFault>,
    pub warnings: Vec<ApiFault>,
    pub requested_command: String,
    pub ssl_certificates: Vec<CertificateSummary>,
    pub ssl_create: Option<CreateResult>,
    pub ssl_activate: Option<ActivateResult>,
    pub ssl_reissue: Option<ReissueResult>,
    pub ssl_certificate_details: Option<InfoResult>,
}

impl ResponseEnvelope {
    /// Decode an `<ApiResponse>` body.
    pub fn from_xml(body: &str) -> Result<Self, ApiError> {
        let raw: RawEnvelope = quick_xml::de::from_str(body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))?;
        Ok(raw.into())
    }

    /// Turn a `Status="ERROR"` envelope into `ApiError::Api`.
    pub fn into_result(self) -> Result<Self, ApiError> {
        match self.status {
            ResponseStatus::Ok => Ok(self),
            ResponseStatus::Error => Err(ApiError::Api {
                faults: self.errors,
            }),
        }
    }

    pub fn ssl_certificates(self) -> Vec<CertificateSummary> {
        self.ssl_certificates
    }

    pub fn ssl_create(self) -> Option<CreateResult> {
        self.ssl_create
    }

    pub fn ssl_activate(self) -> Option<ActivateResult> {
        self.ssl_activate
    }

    pub fn ssl_reissue(self) -> Option<ReissueResult> {
        self.ssl_reissue
    }

    pub fn ssl_certificate_details(self) -> Option<InfoResult> {
        self.ssl_certificate_details
    }
}

#[derive(Deserialize)]
struct RawEnvelope {
    #[serde(rename = "@Status", default)]
    status: String,
    #[serde(rename = "Errors", default)]
    errors: RawErrors,
    #[serde(rename = "Warnings", default)]
    warnings: RawWarnings,
    #[serde(rename = "RequestedCommand", default)]
    requested_command: String,
    #[serde(rename = "CommandResponse", default)]
    command_response: RawCommandResponse,
}

#[derive(Default, Deserialize)]
struct RawErrors {
    #[serde(rename = "Error", default)]
    items: Vec<RawFault>,
}

#[derive(Default, Deserialize)]
struct RawWarnings {
    #[serde(rename = "Warning", default)]
    items: Vec<RawFault>,
}

#[derive(Deserialize)]
struct RawFault {
    #[serde(rename = "@Number", default)]
    number: String,
    #[serde(rename = "$text", default)]
    message: String,
}

#[derive(Default, Deserialize)]
struct RawCommandResponse {
    #[serde(rename = "SSLListResult", default)]
    list: RawListResult,
    #[serde(rename = "SSLCreateResult")]
    create: Option<CreateResult>,
    #[serde(rename = "SSLActivateResult")]
    activate: Option<ActivateResult>,
    #[serde(rename = "SSLReissueResult")]
    reissue: Option<ReissueResult>,
    #[serde(rename = "SSLGetInfoResult")]
    info: Option<InfoResult>,
}

#[derive(Default, Deserialize)]
struct RawListResult {
    #[serde(rename = "SSL", default)]
    certificates: Vec<CertificateSummary>,
}

impl From<RawFault> for ApiFault {
    fn from(raw: RawFault) -> Self {
        Self {
            number: raw.number,
            message: raw.message.trim().to_string(),
        }
    }
}

impl From<RawEnvelope> for ResponseEnvelope {
    fn from(raw: RawEnvelope) -> Self {
        let status = if raw.status.eq_ignore_ascii_case("ERROR") {
            ResponseStatus::Error
        } else {
            ResponseStatus::Ok
        };
        let response = raw.command_response;
        Self {
            status,
            errors: raw.errors.items.into_iter().map(ApiFault::from).collect(),
            warnings: raw.warnings.items.into_iter().map(ApiFault::from).collect(),
            requested_command: raw.requested_command.trim().to_string(),
            ssl_certificates: response.list.certificates,
            ssl_create: response.create,
            ssl_activate: response.activate,
            ssl_reissue: response.reissue,
            ssl_certificate_details: response.info,
        }
    }
}
