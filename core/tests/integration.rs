//! Full certificate lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives every SSL operation
//! over real HTTP using ureq. Validates that the core's form encoding and XML
//! decoding agree with what the server speaks.

use namecheap_ssl::{
    ActivateParams, ApiError, GetInfoParams, HttpMethod, HttpRequest, HttpResponse, SslClient,
};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so non-200
/// responses are returned as data and interpreted by the core.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.url).call(),
        (HttpMethod::Post, Some(body)) => agent
            .post(&req.url)
            .content_type("application/x-www-form-urlencoded")
            .send(body.as_bytes()),
        (HttpMethod::Post, None) => agent.post(&req.url).send_empty(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

fn start_server() -> SslClient {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    SslClient::new(&format!("http://{addr}{}", mock_server::API_PATH))
}

#[test]
fn certificate_lifecycle() {
    let client = start_server();

    // Step 1: list — should be empty.
    let certs = client.parse_get_list(execute(client.build_get_list())).unwrap();
    assert!(certs.is_empty(), "expected empty list");

    // Step 2: purchase a certificate.
    let created = client
        .parse_create(execute(client.build_create("PositiveSSL", 2)))
        .unwrap()
        .expect("create result");
    assert!(created.is_success);
    assert_eq!(created.charged_amount, 17.98);
    assert_eq!(created.certificates.len(), 1);
    let id = created.certificates[0].certificate_id;
    assert_eq!(created.certificates[0].years, 2);

    // Step 3: info before activation has no nested structures.
    let info_params = GetInfoParams {
        certificate_id: id,
        return_certificate: true,
        return_type: "individual".to_string(),
    };
    let info = client
        .parse_get_info(execute(client.build_get_info(&info_params).unwrap()))
        .unwrap()
        .expect("info result");
    assert_eq!(info.status, "newpurchase");
    assert!(info.details.is_none());
    assert!(info.provider.is_none());

    // Step 4: activate with HTTP validation.
    let activate = ActivateParams {
        certificate_id: id,
        csr: "-----BEGIN CERTIFICATE REQUEST-----\nMIIC\n-----END CERTIFICATE REQUEST-----"
            .to_string(),
        admin_email: "admin@example.com".to_string(),
        web_server_type: "nginx".to_string(),
        http_validation: true,
        ..Default::default()
    };
    let activated = client
        .parse_activate(execute(client.build_activate(&activate)))
        .unwrap()
        .expect("activate result");
    assert_eq!(activated.id, id);
    assert!(activated.http_validation.value_available);
    assert_eq!(activated.http_validation.challenge.domain, "example.com");
    assert!(activated.http_validation.challenge.file_name.is_some());
    assert!(!activated.dns_validation.value_available);

    // Step 5: activating twice is an API error.
    let err = client
        .parse_activate(execute(client.build_activate(&activate)))
        .unwrap_err();
    assert!(matches!(err, ApiError::Api { ref faults } if faults[0].number == "2011171"));

    // Step 6: info now carries the certificate and its chain.
    let info = client
        .parse_get_info(execute(client.build_get_info(&info_params).unwrap()))
        .unwrap()
        .expect("info result");
    assert_eq!(info.status, "active");
    let details = info.details.expect("certificate details");
    assert_eq!(details.csr, activate.csr);
    assert_eq!(details.administrator_email, "admin@example.com");
    let bundle = details.certificates.expect("certificate bundle");
    assert_eq!(bundle.certificate_returned, Some(true));
    assert_eq!(bundle.return_type, "Individual");
    assert!(bundle.certificate.is_some());
    assert_eq!(bundle.ca_certificates.len(), 1);
    assert_eq!(info.provider.expect("provider").name, "COMODO");

    // Step 7: reissue with DNS validation yields a replacement.
    let reissue = ActivateParams {
        http_validation: false,
        dns_validation: true,
        approver_email: "webmaster@example.com".to_string(),
        ..activate.clone()
    };
    let reissued = client
        .parse_reissue(execute(client.build_reissue(&reissue)))
        .unwrap()
        .expect("reissue result");
    assert_ne!(reissued.id, id);
    assert!(reissued.dns_validation.value_available);
    assert!(reissued.dns_validation.challenge.host_name.is_some());
    assert!(reissued.dns_validation.challenge.target.is_some());
    assert!(!reissued.http_validation.value_available);

    // Step 8: the original points at its replacement.
    let old = client
        .parse_get_info(
            execute(
                client
                    .build_get_info(&GetInfoParams {
                        certificate_id: id,
                        ..Default::default()
                    })
                    .unwrap(),
            ),
        )
        .unwrap()
        .expect("info result");
    assert_eq!(old.status, "replaced");
    assert_eq!(old.replaced_by, reissued.id.to_string());

    // Step 9: list shows both certificates.
    let certs = client.parse_get_list(execute(client.build_get_list())).unwrap();
    assert_eq!(certs.len(), 2);
    assert!(certs.iter().all(|c| c.host_name == "example.com"));
    assert!(certs.iter().any(|c| c.status == "active"));

    // Step 10: unknown certificate.
    let err = client
        .parse_get_info(
            execute(
                client
                    .build_get_info(&GetInfoParams {
                        certificate_id: 1,
                        ..Default::default()
                    })
                    .unwrap(),
            ),
        )
        .unwrap_err();
    assert!(matches!(err, ApiError::Api { ref faults } if faults[0].number == "2011170"));
}

#[test]
fn invalid_return_type_never_reaches_the_server() {
    let client = SslClient::new("http://127.0.0.1:9/xml.response");
    let params = GetInfoParams {
        certificate_id: 1,
        return_certificate: true,
        return_type: "pkcs7".to_string(),
    };
    assert!(matches!(
        client.build_get_info(&params),
        Err(ApiError::InvalidReturnType { .. })
    ));
}

#[test]
fn get_request_is_rejected_by_post_only_server() {
    let client = start_server();
    let response = execute(namecheap_ssl::request::get_list().to_get_request(client.endpoint()));
    let err = client.parse_get_list(response).unwrap_err();
    assert!(matches!(err, ApiError::HttpError { status: 405, .. }));
}
