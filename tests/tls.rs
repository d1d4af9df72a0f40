//! Forwarding behind TLS termination.

use std::time::Duration;

use reqwest::StatusCode;
use vhost_proxy::config::TlsConfig;

mod common;

use common::{raw_response, start_proxy};

fn write_certificate(dir: &tempfile::TempDir) -> TlsConfig {
    let certified =
        rcgen::generate_simple_self_signed(vec!["*.example".to_string(), "a.example".to_string()])
            .unwrap();
    let cert_path = dir.path().join("cert.pem");
    let key_path = dir.path().join("key.pem");
    std::fs::write(&cert_path, certified.cert.pem()).unwrap();
    std::fs::write(&key_path, certified.key_pair.serialize_pem()).unwrap();

    TlsConfig {
        cert_path,
        key_path,
    }
}

#[tokio::test]
async fn terminates_tls_and_forwards_plaintext() {
    let dir = tempfile::tempdir().unwrap();
    let tls = write_certificate(&dir);

    let (backend, mut requests) =
        common::start_recording_backend(raw_response("200 OK", &[], "hello")).await;
    let proxy = start_proxy(&[format!("a.example={}", backend)], 5, Some(tls));

    let client = reqwest::Client::builder()
        .danger_accept_invalid_certs(true)
        .resolve("a.example", proxy.addr)
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap();

    let response = client
        .get(format!("https://a.example:{}/x?q=1", proxy.addr.port()))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "hello");

    let seen = requests.recv().await.unwrap();
    assert_eq!(seen.target, "/x?q=1");
    assert_eq!(seen.header("host"), Some(backend.to_string().as_str()));
    assert_eq!(seen.header_values("x-forwarded-for"), vec!["127.0.0.1"]);
}

#[tokio::test]
async fn unknown_host_over_tls_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let tls = write_certificate(&dir);

    let (backend, _requests) =
        common::start_recording_backend(raw_response("200 OK", &[], "")).await;
    let proxy = start_proxy(&[format!("a.example={}", backend)], 5, Some(tls));

    let client = reqwest::Client::builder()
        .danger_accept_invalid_certs(true)
        .resolve("b.example", proxy.addr)
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap();

    let response = client
        .get(format!("https://b.example:{}/", proxy.addr.port()))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
