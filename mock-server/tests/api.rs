use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, API_PATH};
use tower::{Service, ServiceExt};

async fn body_text(response: axum::response::Response) -> String {
    let bytes: bytes::Bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn form_request(body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(API_PATH)
        .header(http::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(body.to_string())
        .unwrap()
}

/// Extract the value of `attr="..."` from the first element carrying it.
fn attr<'a>(xml: &'a str, attr: &str) -> &'a str {
    let needle = format!("{attr}=\"");
    let start = xml.find(&needle).unwrap() + needle.len();
    let end = start + xml[start..].find('"').unwrap();
    &xml[start..end]
}

// --- getList ---

#[tokio::test]
async fn get_list_empty() {
    let resp = app()
        .oneshot(form_request("Command=namecheap.ssl.getList"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains(r#"Status="OK""#));
    assert!(body.contains("<SSLListResult></SSLListResult>"));
}

// --- create ---

#[tokio::test]
async fn create_returns_purchased_certificate() {
    let resp = app()
        .oneshot(form_request("Command=namecheap.ssl.create&Type=PositiveSSL&Years=2"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains(r#"<SSLCreateResult IsSuccess="true""#));
    assert_eq!(attr(&body, "ChargedAmount"), "17.98");
    assert_eq!(attr(&body, "Years"), "2");
    assert_eq!(attr(&body, "CertificateID"), "1000");
}

#[tokio::test]
async fn create_rejects_out_of_range_years() {
    let resp = app()
        .oneshot(form_request("Command=namecheap.ssl.create&Type=PositiveSSL&Years=9"))
        .await
        .unwrap();

    let body = body_text(resp).await;
    assert!(body.contains(r#"Status="ERROR""#));
    assert_eq!(attr(&body, "Number"), "2011166");
}

// --- errors ---

#[tokio::test]
async fn unknown_command_is_api_error() {
    let resp = app()
        .oneshot(form_request("Command=namecheap.domains.getList"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains(r#"Status="ERROR""#));
    assert!(body.contains("Invalid command: namecheap.domains.getList"));
}

#[tokio::test]
async fn activate_unknown_certificate() {
    let resp = app()
        .oneshot(form_request(
            "Command=namecheap.ssl.activate&CertificateID=1&CSR=x&AdminEmailAddress=a%40b.com&WebServerType=nginx",
        ))
        .await
        .unwrap();

    let body = body_text(resp).await;
    assert_eq!(attr(&body, "Number"), "2011170");
}

#[tokio::test]
async fn activate_missing_csr() {
    let resp = app()
        .oneshot(form_request(
            "Command=namecheap.ssl.activate&CertificateID=1000&AdminEmailAddress=a%40b.com&WebServerType=nginx",
        ))
        .await
        .unwrap();

    let body = body_text(resp).await;
    assert!(body.contains("Parameter CSR is missing"));
}

#[tokio::test]
async fn get_without_form_body_is_rejected() {
    let resp = app()
        .oneshot(Request::builder().uri(API_PATH).body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// --- full lifecycle ---

#[tokio::test]
async fn certificate_lifecycle() {
    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(form_request("Command=namecheap.ssl.create&Type=PositiveSSL&Years=1"))
        .await
        .unwrap();
    let body = body_text(resp).await;
    let id = attr(&body, "CertificateID").to_string();

    // getInfo before activation: no details, no provider
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(form_request(&format!("Command=namecheap.ssl.getInfo&CertificateID={id}")))
        .await
        .unwrap();
    let body = body_text(resp).await;
    assert!(body.contains(r#"Status="newpurchase""#));
    assert!(!body.contains("<CertificateDetails>"));
    assert!(!body.contains("<Provider>"));

    // activate with HTTP validation
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(form_request(&format!(
            "Command=namecheap.ssl.activate&CertificateID={id}&CSR=CSRDATA\
             &AdminEmailAddress=admin%40example.com&WebServerType=nginx&HTTPDCValidation=true"
        )))
        .await
        .unwrap();
    let body = body_text(resp).await;
    assert!(body.contains(r#"<HttpDCValidation ValueAvailable="true">"#));
    assert!(body.contains(r#"<DNS domain="example.com">"#));
    assert!(body.contains(r#"<DNSDCValidation ValueAvailable="false" />"#));

    // activating twice fails
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(form_request(&format!(
            "Command=namecheap.ssl.activate&CertificateID={id}&CSR=CSRDATA\
             &AdminEmailAddress=admin%40example.com&WebServerType=nginx"
        )))
        .await
        .unwrap();
    let body = body_text(resp).await;
    assert_eq!(attr(&body, "Number"), "2011171");

    // getInfo with certificate body
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(form_request(&format!(
            "Command=namecheap.ssl.getInfo&CertificateID={id}&returncertificate=true&returntype=Individual"
        )))
        .await
        .unwrap();
    let body = body_text(resp).await;
    assert!(body.contains("<CSR>CSRDATA</CSR>"));
    assert!(body.contains(r#"CertificateReturned="true""#));
    assert!(body.contains("<Name>COMODO</Name>"));

    // list
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(form_request("Command=namecheap.ssl.getList"))
        .await
        .unwrap();
    let body = body_text(resp).await;
    assert!(body.contains(r#"HostName="example.com""#));
    assert!(body.contains(r#"Status="active""#));
}
