//! Command + parameter marshaling for the SSL command group.
//!
//! # Design
//! Each operation is a free function that turns typed input into an
//! `ApiRequest`: a `Command` plus a flat `ParameterSet`. Nothing here knows
//! about endpoints or HTTP; `ApiRequest` renders itself into an `HttpRequest`
//! once the caller supplies an endpoint.
//!
//! Boolean inputs follow an omit-when-false rule: a flag is either sent as
//! `"true"` or not sent at all. The vendor treats a missing parameter and an
//! empty one differently, so optional strings follow the same rule.

use std::collections::BTreeMap;
use std::fmt;

use url::form_urlencoded;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::params::{ActivateParams, GetInfoParams, ReissueParams, ReturnType};

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// One RPC operation of the SSL command group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    SslActivate,
    SslCreate,
    SslGetList,
    SslReissue,
    SslGetInfo,
}

impl Command {
    pub const ALL: [Command; 5] = [
        Command::SslActivate,
        Command::SslCreate,
        Command::SslGetList,
        Command::SslReissue,
        Command::SslGetInfo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::SslActivate => "namecheap.ssl.activate",
            Command::SslCreate => "namecheap.ssl.create",
            Command::SslGetList => "namecheap.ssl.getList",
            Command::SslReissue => "namecheap.ssl.reissue",
            Command::SslGetInfo => "namecheap.ssl.getInfo",
        }
    }

    /// Look up a command by its wire name. The API echoes names back in
    /// varying case, so the match ignores ASCII case.
    pub fn from_wire(name: &str) -> Option<Command> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named string parameters for one call. Setting a name twice keeps the last
/// value. Iteration is sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    values: BTreeMap<String, String>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_string(), value.into());
    }

    /// Set `name` to `"true"` when `flag` holds; leave it absent otherwise.
    pub fn set_flag(&mut self, name: &str, flag: bool) {
        if flag {
            self.set(name, "true");
        }
    }

    /// Set `name` only when `value` is non-empty.
    pub fn set_non_empty(&mut self, name: &str, value: &str) {
        if !value.is_empty() {
            self.set(name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A command and its parameters, ready to be rendered for transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub command: Command,
    pub params: ParameterSet,
}

impl ApiRequest {
    pub fn new(command: Command) -> Self {
        Self {
            command,
            params: ParameterSet::new(),
        }
    }

    /// Form-encode `Command` followed by every parameter.
    pub fn encode(&self) -> String {
        let mut form = form_urlencoded::Serializer::new(String::new());
        form.append_pair("Command", self.command.as_str());
        for (name, value) in self.params.iter() {
            form.append_pair(name, value);
        }
        form.finish()
    }

    /// Render as a form POST against `endpoint`.
    pub fn to_post_request(&self, endpoint: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url: endpoint.to_string(),
            headers: vec![("content-type".to_string(), FORM_CONTENT_TYPE.to_string())],
            body: Some(self.encode()),
        }
    }

    /// Render as a GET with the parameters in the query string.
    pub fn to_get_request(&self, endpoint: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{endpoint}?{}", self.encode()),
            headers: Vec::new(),
            body: None,
        }
    }
}

/// `namecheap.ssl.getList`: no parameters.
pub fn get_list() -> ApiRequest {
    ApiRequest::new(Command::SslGetList)
}

/// `namecheap.ssl.create`: purchase `years` of `product_type`.
pub fn create(product_type: &str, years: u32) -> ApiRequest {
    let mut req = ApiRequest::new(Command::SslCreate);
    req.params.set("Type", product_type);
    req.params.set("Years", years.to_string());
    req
}

/// `namecheap.ssl.activate`.
pub fn activate(params: &ActivateParams) -> ApiRequest {
    activation_request(Command::SslActivate, params)
}

/// `namecheap.ssl.reissue`.
pub fn reissue(params: &ReissueParams) -> ApiRequest {
    activation_request(Command::SslReissue, params)
}

/// Shared by activate and reissue. Required fields are not checked here; the
/// API reports missing ones itself.
fn activation_request(command: Command, params: &ActivateParams) -> ApiRequest {
    let mut req = ApiRequest::new(command);
    req.params.set("CertificateID", params.certificate_id.to_string());
    req.params.set("CSR", params.csr.as_str());
    req.params.set("AdminEmailAddress", params.admin_email.as_str());
    req.params.set("WebServerType", params.web_server_type.as_str());
    req.params.set_flag("HTTPDCValidation", params.http_validation);
    req.params.set_flag("DNSDCValidation", params.dns_validation);
    req.params.set_non_empty("ApproverEmail", &params.approver_email);
    req
}

/// `namecheap.ssl.getInfo`. Fails before building anything when a
/// certificate body is requested with an unsupported `return_type`.
pub fn get_info(params: &GetInfoParams) -> Result<ApiRequest, ApiError> {
    let mut req = ApiRequest::new(Command::SslGetInfo);
    req.params.set("CertificateID", params.certificate_id.to_string());
    if params.return_certificate {
        let return_type: ReturnType = params.return_type.parse()?;
        req.params.set("returncertificate", "true");
        req.params.set("returntype", return_type.as_str());
    }
    Ok(req)
}
