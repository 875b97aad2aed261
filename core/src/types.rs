//! Typed results of the SSL commands.
//!
//! # Design
//! Field renames follow the XML contract: `@Name` is an attribute, a bare
//! name is a child element. Dates, counts and identifiers the API leaves
//! untyped stay `String`. Sub-elements that may be missing are `Option`, so
//! an absent element never looks like an empty one.

use serde::Deserialize;

use crate::wire::{flag, number, optional_flag};

/// One `<SSL>` row of `namecheap.ssl.getList`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CertificateSummary {
    #[serde(rename = "@CertificateID", default, deserialize_with = "number")]
    pub certificate_id: u64,
    #[serde(rename = "@HostName", default)]
    pub host_name: String,
    #[serde(rename = "@SSLType", default)]
    pub ssl_type: String,
    #[serde(rename = "@PurchaseDate", default)]
    pub purchase_date: String,
    #[serde(rename = "@ExpireDate", default)]
    pub expire_date: String,
    #[serde(rename = "@ActivationExpireDate", default)]
    pub activation_expire_date: String,
    #[serde(rename = "@IsExpiredYN", default, deserialize_with = "flag")]
    pub is_expired: bool,
    #[serde(rename = "@Status", default)]
    pub status: String,
}

/// `<SSLCreateResult>`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CreateResult {
    #[serde(rename = "@IsSuccess", default, deserialize_with = "flag")]
    pub is_success: bool,
    #[serde(rename = "@OrderId", default, deserialize_with = "number")]
    pub order_id: u64,
    #[serde(rename = "@TransactionId", default, deserialize_with = "number")]
    pub transaction_id: u64,
    #[serde(rename = "@ChargedAmount", default, deserialize_with = "number")]
    pub charged_amount: f64,
    #[serde(rename = "SSLCertificate", default)]
    pub certificates: Vec<CertificateRecord>,
}

/// A certificate purchased by `namecheap.ssl.create`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CertificateRecord {
    #[serde(rename = "@CertificateID", default, deserialize_with = "number")]
    pub certificate_id: u64,
    #[serde(rename = "@SSLType", default)]
    pub ssl_type: String,
    #[serde(rename = "@Created", default)]
    pub created: String,
    #[serde(rename = "@Years", default, deserialize_with = "number")]
    pub years: u32,
    #[serde(rename = "@Status", default)]
    pub status: String,
}

/// `<SSLActivateResult>`; `<SSLReissueResult>` has the same shape.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ActivateResult {
    #[serde(rename = "@ID", default, deserialize_with = "number")]
    pub id: u64,
    #[serde(rename = "@IsSuccess", default, deserialize_with = "flag")]
    pub is_success: bool,
    #[serde(rename = "HttpDCValidation", default)]
    pub http_validation: DomainValidation,
    #[serde(rename = "DNSDCValidation", default)]
    pub dns_validation: DomainValidation,
}

pub type ReissueResult = ActivateResult;

/// Domain control validation data for one channel.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DomainValidation {
    #[serde(rename = "@ValueAvailable", default, deserialize_with = "flag")]
    pub value_available: bool,
    #[serde(rename = "DNS", default)]
    pub challenge: DnsChallenge,
}

/// The `<DNS>` element of a validation block.
///
/// HTTP validation fills `file_name`/`file_content`; DNS validation fills
/// `host_name`/`target` (a CNAME record). The API never populates both pairs.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DnsChallenge {
    #[serde(rename = "@domain", default)]
    pub domain: String,
    #[serde(rename = "FileName")]
    pub file_name: Option<String>,
    #[serde(rename = "FileContent")]
    pub file_content: Option<String>,
    #[serde(rename = "HostName")]
    pub host_name: Option<String>,
    #[serde(rename = "Target")]
    pub target: Option<String>,
}

/// `<SSLGetInfoResult>`.
///
/// `ssl_type` comes from the `Type` attribute; a `<Type>` child element is
/// used when the attribute is absent or empty.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RawInfoResult")]
pub struct InfoResult {
    pub status: String,
    pub status_description: String,
    pub ssl_type: String,
    pub issued_on: String,
    pub expires: String,
    pub activation_expire_date: String,
    pub order_id: String,
    pub replaced_by: String,
    pub sans_count: String,
    pub details: Option<CertificateDetails>,
    pub provider: Option<ProviderInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CertificateDetails {
    #[serde(rename = "CSR", default)]
    pub csr: String,
    #[serde(rename = "ApproverEmail", default)]
    pub approver_email: String,
    #[serde(rename = "CommonDomain", default)]
    pub common_domain: String,
    #[serde(rename = "AdministratorName", default)]
    pub administrator_name: String,
    #[serde(rename = "AdministratorEmail", default)]
    pub administrator_email: String,
    #[serde(rename = "Certificates")]
    pub certificates: Option<CertificateBundle>,
}

/// Certificate body returned when `getInfo` asks for it.
///
/// `certificate_returned` is `None` when the response carries no returned
/// flag. `certificate` is dropped only when the flag is an explicit `false`,
/// even if a chain came back alongside.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RawCertificateBundle")]
pub struct CertificateBundle {
    pub certificate_returned: Option<bool>,
    pub return_type: String,
    pub certificate: Option<String>,
    pub ca_certificates: Vec<ChainCertificate>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChainCertificate {
    #[serde(rename = "@Type", default)]
    pub cert_type: String,
    #[serde(rename = "Certificate", default)]
    pub certificate: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProviderInfo {
    #[serde(rename = "OrderID", default)]
    pub order_id: String,
    #[serde(rename = "Name", default)]
    pub name: String,
}

#[derive(Deserialize)]
struct RawInfoResult {
    #[serde(rename = "@Status", default)]
    status: String,
    #[serde(rename = "@StatusDescription", default)]
    status_description: String,
    #[serde(rename = "@Type", default)]
    type_attr: String,
    #[serde(rename = "Type", default)]
    type_element: String,
    #[serde(rename = "@IssuedOn", default)]
    issued_on: String,
    #[serde(rename = "@Expires", default)]
    expires: String,
    #[serde(rename = "@ActivationExpireDate", default)]
    activation_expire_date: String,
    #[serde(rename = "@OrderId", default)]
    order_id: String,
    #[serde(rename = "@ReplacedBy", default)]
    replaced_by: String,
    #[serde(rename = "@SANSCount", default)]
    sans_count: String,
    #[serde(rename = "CertificateDetails")]
    details: Option<CertificateDetails>,
    #[serde(rename = "Provider")]
    provider: Option<ProviderInfo>,
}

impl From<RawInfoResult> for InfoResult {
    fn from(raw: RawInfoResult) -> Self {
        let ssl_type = if raw.type_attr.trim().is_empty() {
            raw.type_element.trim().to_string()
        } else {
            raw.type_attr
        };
        Self {
            status: raw.status,
            status_description: raw.status_description,
            ssl_type,
            issued_on: raw.issued_on,
            expires: raw.expires,
            activation_expire_date: raw.activation_expire_date,
            order_id: raw.order_id,
            replaced_by: raw.replaced_by,
            sans_count: raw.sans_count,
            details: raw.details,
            provider: raw.provider,
        }
    }
}

#[derive(Deserialize)]
struct RawCertificateBundle {
    #[serde(rename = "@CertificateReturned", default, deserialize_with = "optional_flag")]
    certificate_returned: Option<bool>,
    // Older responses spell it `CertificatedReturned`; either may appear.
    #[serde(rename = "@CertificatedReturned", default, deserialize_with = "optional_flag")]
    certificated_returned: Option<bool>,
    #[serde(rename = "@ReturnType", default)]
    return_type: String,
    #[serde(rename = "Certificate")]
    certificate: Option<String>,
    #[serde(rename = "CaCertificates", default)]
    ca_certificates: RawChain,
}

#[derive(Default, Deserialize)]
struct RawChain {
    #[serde(rename = "Certificate", default)]
    certificates: Vec<ChainCertificate>,
}

impl From<RawCertificateBundle> for CertificateBundle {
    fn from(raw: RawCertificateBundle) -> Self {
        let certificate_returned = match (raw.certificate_returned, raw.certificated_returned) {
            (Some(a), Some(b)) => Some(a || b),
            (a, b) => a.or(b),
        };
        let certificate = match certificate_returned {
            Some(false) => None,
            _ => raw.certificate,
        };
        Self {
            certificate_returned,
            return_type: raw.return_type,
            certificate,
            ca_certificates: raw.ca_certificates.certificates,
        }
    }
}
