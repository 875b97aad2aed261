//! In-memory stand-in for the Namecheap XML API, limited to the SSL command
//! group. Serves a single form endpoint, dispatches on `Command` and answers
//! with `ApiResponse` documents. Certificates are issued the moment they are
//! activated.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::post,
    Form, Router,
};
use quick_xml::escape::escape;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

pub const API_PATH: &str = "/xml.response";

const TODAY: &str = "10/19/2026";
const PRICE_PER_YEAR: f64 = 8.99;
const LEAF_PEM: &str = "-----BEGIN CERTIFICATE-----\nMIIMOCKLEAF\n-----END CERTIFICATE-----";
const CA_PEM: &str = "-----BEGIN CERTIFICATE-----\nMIIMOCKCA\n-----END CERTIFICATE-----";

#[derive(Clone, Debug)]
pub struct Certificate {
    pub id: u64,
    pub ssl_type: String,
    pub years: u32,
    pub status: String,
    pub host_name: String,
    pub csr: String,
    pub admin_email: String,
    pub approver_email: String,
    pub replaced_by: Option<u64>,
}

#[derive(Debug)]
pub struct Store {
    next_id: u64,
    next_order: u64,
    certificates: BTreeMap<u64, Certificate>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            next_id: 1000,
            next_order: 500,
            certificates: BTreeMap::new(),
        }
    }
}

pub type Db = Arc<RwLock<Store>>;

type Params = HashMap<String, String>;

/// A failed command: vendor error number and message.
struct Fault(u32, String);

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new().route(API_PATH, post(dispatch)).with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn dispatch(State(db): State<Db>, Form(params): Form<Params>) -> Response {
    let command = params.get("Command").cloned().unwrap_or_default();
    info!(command = %command, "serving");

    let result = match command.to_ascii_lowercase().as_str() {
        "namecheap.ssl.getlist" => get_list(&db).await,
        "namecheap.ssl.create" => create(&db, &params).await,
        "namecheap.ssl.activate" => activate(&db, &params).await,
        "namecheap.ssl.reissue" => reissue(&db, &params).await,
        "namecheap.ssl.getinfo" => get_info(&db, &params).await,
        _ => Err(Fault(1010102, format!("Invalid command: {command}"))),
    };

    let body = match result {
        Ok(inner) => envelope("OK", "", &command, &inner),
        Err(Fault(number, message)) => {
            let errors = format!(r#"<Error Number="{number}">{}</Error>"#, escape(&message));
            envelope("ERROR", &errors, &command, "")
        }
    };
    ([(header::CONTENT_TYPE, "text/xml; charset=utf-8")], body).into_response()
}

fn envelope(status: &str, errors: &str, command: &str, inner: &str) -> String {
    let command = escape(command);
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<ApiResponse Status="{status}" xmlns="http://api.namecheap.com/xml.response">
  <Errors>{errors}</Errors>
  <Warnings />
  <RequestedCommand>{command}</RequestedCommand>
  <CommandResponse Type="{command}">{inner}</CommandResponse>
  <Server>MOCK</Server>
  <GMTTimeDifference>--0:00</GMTTimeDifference>
  <ExecutionTime>0.001</ExecutionTime>
</ApiResponse>"#
    )
}

fn required<'a>(params: &'a Params, name: &str) -> Result<&'a str, Fault> {
    match params.get(name) {
        Some(value) if !value.is_empty() => Ok(value.as_str()),
        _ => Err(Fault(2011166, format!("Parameter {name} is missing"))),
    }
}

fn certificate_id(params: &Params) -> Result<u64, Fault> {
    let raw = required(params, "CertificateID")?;
    raw.parse()
        .map_err(|_| Fault(2011166, format!("Parameter CertificateID is invalid: {raw}")))
}

fn flag(params: &Params, name: &str) -> bool {
    params
        .get(name)
        .is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

/// The mock has no CSR parser; the common name is taken from the admin
/// address domain.
fn host_from_email(email: &str) -> String {
    email.rsplit_once('@').map(|(_, d)| d).unwrap_or(email).to_string()
}

async fn get_list(db: &Db) -> Result<String, Fault> {
    let store = db.read().await;
    let rows: String = store
        .certificates
        .values()
        .map(|c| {
            format!(
                r#"<SSL CertificateID="{}" HostName="{}" SSLType="{}" PurchaseDate="{TODAY}" ExpireDate="" ActivationExpireDate="" IsExpiredYN="false" Status="{}" />"#,
                c.id,
                escape(&c.host_name),
                escape(&c.ssl_type),
                c.status
            )
        })
        .collect();
    Ok(format!("<SSLListResult>{rows}</SSLListResult>"))
}

async fn create(db: &Db, params: &Params) -> Result<String, Fault> {
    let ssl_type = required(params, "Type")?.to_string();
    let years: u32 = required(params, "Years")?
        .parse()
        .map_err(|_| Fault(2011166, "Parameter Years is invalid".to_string()))?;
    if !(1..=5).contains(&years) {
        return Err(Fault(2011166, format!("Years must be between 1 and 5, got {years}")));
    }

    let mut store = db.write().await;
    let id = store.next_id;
    store.next_id += 1;
    let order = store.next_order;
    store.next_order += 1;
    store.certificates.insert(
        id,
        Certificate {
            id,
            ssl_type: ssl_type.clone(),
            years,
            status: "newpurchase".to_string(),
            host_name: String::new(),
            csr: String::new(),
            admin_email: String::new(),
            approver_email: String::new(),
            replaced_by: None,
        },
    );

    Ok(format!(
        r#"<SSLCreateResult IsSuccess="true" OrderId="{order}" TransactionId="{}" ChargedAmount="{:.2}"><SSLCertificate CertificateID="{id}" Created="{TODAY}" SSLType="{}" Years="{years}" Status="NewPurchase" /></SSLCreateResult>"#,
        order + 10000,
        PRICE_PER_YEAR * f64::from(years),
        escape(&ssl_type)
    ))
}

async fn activate(db: &Db, params: &Params) -> Result<String, Fault> {
    let id = certificate_id(params)?;
    let csr = required(params, "CSR")?.to_string();
    let admin_email = required(params, "AdminEmailAddress")?.to_string();
    required(params, "WebServerType")?;

    let mut store = db.write().await;
    let cert = store
        .certificates
        .get_mut(&id)
        .ok_or_else(|| Fault(2011170, format!("Certificate {id} not found")))?;
    if cert.status != "newpurchase" {
        return Err(Fault(2011171, format!("Certificate {id} is already activated")));
    }
    cert.status = "active".to_string();
    cert.host_name = host_from_email(&admin_email);
    cert.csr = csr;
    cert.admin_email = admin_email;
    cert.approver_email = params.get("ApproverEmail").cloned().unwrap_or_default();
    let host = cert.host_name.clone();

    Ok(format!(
        r#"<SSLActivateResult ID="{id}" IsSuccess="true">{}</SSLActivateResult>"#,
        validation_blocks(params, &host)
    ))
}

async fn reissue(db: &Db, params: &Params) -> Result<String, Fault> {
    let id = certificate_id(params)?;
    let csr = required(params, "CSR")?.to_string();
    let admin_email = required(params, "AdminEmailAddress")?.to_string();
    required(params, "WebServerType")?;

    let mut store = db.write().await;
    let new_id = store.next_id;
    let old = store
        .certificates
        .get_mut(&id)
        .ok_or_else(|| Fault(2011170, format!("Certificate {id} not found")))?;
    if old.status != "active" {
        return Err(Fault(2011172, format!("Certificate {id} is not active")));
    }
    old.status = "replaced".to_string();
    old.replaced_by = Some(new_id);
    let replacement = Certificate {
        id: new_id,
        ssl_type: old.ssl_type.clone(),
        years: old.years,
        status: "active".to_string(),
        host_name: host_from_email(&admin_email),
        csr,
        admin_email,
        approver_email: params.get("ApproverEmail").cloned().unwrap_or_default(),
        replaced_by: None,
    };
    let host = replacement.host_name.clone();
    store.next_id += 1;
    store.certificates.insert(new_id, replacement);

    Ok(format!(
        r#"<SSLReissueResult ID="{new_id}" IsSuccess="true">{}</SSLReissueResult>"#,
        validation_blocks(params, &host)
    ))
}

fn validation_blocks(params: &Params, host: &str) -> String {
    let host = escape(host);
    let http = if flag(params, "HTTPDCValidation") {
        format!(
            r#"<HttpDCValidation ValueAvailable="true"><DNS domain="{host}"><FileName>MOCK0001.txt</FileName><FileContent>mocktoken comodoca.com</FileContent></DNS></HttpDCValidation>"#
        )
    } else {
        r#"<HttpDCValidation ValueAvailable="false" />"#.to_string()
    };
    let dns = if flag(params, "DNSDCValidation") {
        format!(
            r#"<DNSDCValidation ValueAvailable="true"><DNS domain="{host}"><HostName>_mock.{host}</HostName><Target>mock.comodoca.com</Target></DNS></DNSDCValidation>"#
        )
    } else {
        r#"<DNSDCValidation ValueAvailable="false" />"#.to_string()
    };
    format!("{http}{dns}")
}

async fn get_info(db: &Db, params: &Params) -> Result<String, Fault> {
    let id = certificate_id(params)?;
    let store = db.read().await;
    let cert = store
        .certificates
        .get(&id)
        .ok_or_else(|| Fault(2011170, format!("Certificate {id} not found")))?;

    let issued = cert.status != "newpurchase";
    let mut inner = String::new();
    if issued {
        let bundle = if flag(params, "returncertificate") {
            let return_type = escape(params.get("returntype").map(String::as_str).unwrap_or(""));
            if cert.status == "active" {
                format!(
                    r#"<Certificates CertificateReturned="true" ReturnType="{return_type}"><Certificate>{LEAF_PEM}</Certificate><CaCertificates><Certificate Type="INTERMEDIATE"><Certificate>{CA_PEM}</Certificate></Certificate></CaCertificates></Certificates>"#
                )
            } else {
                format!(r#"<Certificates CertificateReturned="false" ReturnType="{return_type}" />"#)
            }
        } else {
            String::new()
        };
        inner.push_str(&format!(
            "<CertificateDetails><CSR>{}</CSR><ApproverEmail>{}</ApproverEmail><CommonDomain>{}</CommonDomain><AdministratorName>Mock Admin</AdministratorName><AdministratorEmail>{}</AdministratorEmail>{bundle}</CertificateDetails>",
            escape(&cert.csr),
            escape(&cert.approver_email),
            escape(&cert.host_name),
            escape(&cert.admin_email),
        ));
        inner.push_str(&format!(
            "<Provider><OrderID>{}</OrderID><Name>COMODO</Name></Provider>",
            id + 900000
        ));
    }

    let (issued_on, expires) = if issued { (TODAY, TODAY) } else { ("", "") };
    Ok(format!(
        r#"<SSLGetInfoResult Status="{}" StatusDescription="{}" Type="{}" IssuedOn="{issued_on}" Expires="{expires}" ActivationExpireDate="" OrderId="{}" ReplacedBy="{}" SANSCount="0">{inner}</SSLGetInfoResult>"#,
        cert.status,
        status_description(&cert.status),
        escape(&cert.ssl_type),
        id + 800000,
        cert.replaced_by.map(|r| r.to_string()).unwrap_or_default(),
    ))
}

fn status_description(status: &str) -> &'static str {
    match status {
        "newpurchase" => "Awaiting activation",
        "active" => "Certificate issued",
        "replaced" => "Replaced by a reissued certificate",
        _ => "Unknown",
    }
}
