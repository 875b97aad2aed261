//! Typed inputs for the SSL commands.
//!
//! # Design
//! `ActivateParams` serves both `activate` and `reissue`, which take the same
//! parameters on the wire. `GetInfoParams::return_type` stays a raw string so
//! an unused value never fails; it only goes through `ReturnType::from_str`
//! when a certificate body is actually requested.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Input for `namecheap.ssl.activate`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivateParams {
    pub certificate_id: u64,
    pub csr: String,
    pub admin_email: String,
    pub web_server_type: String,
    /// Sent only when non-empty.
    #[serde(default)]
    pub approver_email: String,
    #[serde(default)]
    pub http_validation: bool,
    #[serde(default)]
    pub dns_validation: bool,
}

/// Input for `namecheap.ssl.reissue`.
pub type ReissueParams = ActivateParams;

/// Input for `namecheap.ssl.getInfo`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetInfoParams {
    pub certificate_id: u64,
    #[serde(default)]
    pub return_certificate: bool,
    /// Ignored unless `return_certificate` is set.
    #[serde(default)]
    pub return_type: String,
}

/// Format of the certificate body returned by `getInfo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnType {
    /// X.509 leaf plus a separate CA chain.
    Individual,
    Pkcs7,
}

impl ReturnType {
    pub const ALLOWED: &'static [&'static str] = &["Individual", "PKCS7"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReturnType::Individual => "Individual",
            ReturnType::Pkcs7 => "PKCS7",
        }
    }
}

impl FromStr for ReturnType {
    type Err = ApiError;

    /// `Individual` matches in any case; `PKCS7` must match exactly.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("individual") {
            return Ok(ReturnType::Individual);
        }
        if s == "PKCS7" {
            return Ok(ReturnType::Pkcs7);
        }
        Err(ApiError::InvalidReturnType {
            value: s.to_string(),
            allowed: Self::ALLOWED,
        })
    }
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
