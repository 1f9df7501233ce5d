//! End-to-end submissions through the reqwest transport against a mock server

mod common;

use common::fixtures::{form, make_file, nir_baseline};
use common::recording_hooks::{HookCall, RecordingHooks};
use diffpost::submit::{AutoConfirm, Destination, Endpoint, OutcomeKind, SubmitConfig, Submitter};
use diffpost::transport::{HttpTransport, Transport, TransportOptions};
use diffpost::types::FieldValue;
use mockito::Matcher;
use serde_json::json;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

fn submitter_for(endpoint: Endpoint, hooks: &Arc<RecordingHooks>) -> Submitter {
    let config = SubmitConfig::builder(Destination::Endpoint(endpoint))
        .baseline(nir_baseline())
        .build()
        .unwrap();
    Submitter::new(config)
        .with_transport(Arc::new(HttpTransport::new()))
        .with_confirmer(Arc::new(AutoConfirm(true)))
        .with_hooks(hooks.clone())
}

#[tokio::test]
async fn test_posts_multipart_diff() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/users/1")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".to_string()),
        )
        .match_body(Matcher::Regex(r#"name="age"\r\n\r\n31\r\n"#.to_string()))
        .with_status(200)
        .with_body(r#"{"id": 1}"#)
        .create_async()
        .await;

    let hooks = Arc::new(RecordingHooks::default());
    let endpoint = Endpoint::new(&format!("{}/users/1", server.url())).unwrap();
    let submitter = submitter_for(endpoint, &hooks);
    let data = form(&[("name", json!("Nir")), ("age", json!(31))]);

    let kind = submitter.submit(data.clone(), None).await;

    mock.assert_async().await;
    assert_eq!(kind, OutcomeKind::Success);
    assert_eq!(
        hooks.calls()[0],
        HookCall::Success {
            data,
            status: Some(200)
        }
    );
    assert!(!submitter.failed());
}

#[tokio::test]
async fn test_400_response_is_failure() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/users/1")
        .with_status(400)
        .with_body("age too high")
        .create_async()
        .await;

    let hooks = Arc::new(RecordingHooks::default());
    let endpoint = Endpoint::new(&format!("{}/users/1", server.url())).unwrap();
    let submitter = submitter_for(endpoint, &hooks);

    let kind = submitter.submit(form(&[("age", json!(300))]), None).await;

    mock.assert_async().await;
    assert_eq!(kind, OutcomeKind::Failure);
    assert_eq!(hooks.failures(), 1);
    assert_eq!(hooks.successes(), 0);
    assert!(submitter.failed());
}

#[tokio::test]
async fn test_method_headers_and_query_from_options() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PATCH", "/users/1")
        .match_query(Matcher::UrlEncoded("draft".to_string(), "1".to_string()))
        .match_header("x-api-key", "secret")
        .with_status(200)
        .create_async()
        .await;

    let options = TransportOptions {
        query: vec![("draft".to_string(), "1".to_string())],
        ..Default::default()
    }
    .header("x-api-key", "secret");
    let endpoint = Endpoint::new(&format!("{}/users/1", server.url()))
        .unwrap()
        .method("PATCH")
        .options(options);
    let hooks = Arc::new(RecordingHooks::default());
    let submitter = submitter_for(endpoint, &hooks);

    let kind = submitter.submit(form(&[("age", json!(31))]), None).await;

    mock.assert_async().await;
    assert_eq!(kind, OutcomeKind::Success);
}

#[tokio::test]
async fn test_file_part_carries_name_and_type() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/upload")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="cv"; filename="cv.txt""#.to_string()),
            Matcher::Regex("(?i)content-type: text/plain".to_string()),
            Matcher::Regex("resume body".to_string()),
        ]))
        .with_status(201)
        .create_async()
        .await;

    let endpoint = Endpoint::new(&format!("{}/upload", server.url())).unwrap();
    let config = SubmitConfig::builder(Destination::Endpoint(endpoint))
        .build()
        .unwrap();
    let submitter = Submitter::new(config);

    let mut data = form(&[]);
    data.insert(
        "cv".to_string(),
        FieldValue::File(make_file("cv.txt", "resume body")),
    );
    let kind = submitter.submit(data, None).await;

    mock.assert_async().await;
    assert_eq!(kind, OutcomeKind::Success);
}

#[tokio::test]
async fn test_connection_error_is_errored() {
    // Nothing listens on port 1
    let url = "http://127.0.0.1:1/gone";

    let hooks = Arc::new(RecordingHooks::default());
    let submitter = submitter_for(Endpoint::new(url).unwrap(), &hooks);

    let kind = submitter.submit(form(&[("age", json!(31))]), None).await;

    assert_eq!(kind, OutcomeKind::Errored);
    assert_eq!(hooks.errors(), 1);
    assert_eq!(hooks.failures(), 0);
    assert!(submitter.failed());
}

#[tokio::test]
async fn test_transport_reports_headers_and_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/echo")
        .with_status(202)
        .with_header("x-request-id", "abc")
        .with_body("queued")
        .create_async()
        .await;

    let endpoint = Endpoint::new(&format!("{}/echo", server.url())).unwrap();
    let response = HttpTransport::new()
        .send(endpoint.request(vec![]))
        .await
        .unwrap();

    assert_eq!(response.status, 202);
    assert!(response.ok);
    assert_eq!(response.headers["x-request-id"], "abc");
    assert_eq!(response.body, "queued");
}

/// Accept one request, answer 200, and return its raw head and body
async fn capture_one_request(listener: TcpListener) -> String {
    let (mut socket, _) = listener.accept().await.unwrap();
    let mut received = Vec::new();
    let mut chunk = [0u8; 4096];

    let head_end = loop {
        let n = socket.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before the request head ended");
        received.extend_from_slice(&chunk[..n]);
        if let Some(pos) = received.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&received[..head_end]).to_string();
    let body_len = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);
    while received.len() < head_end + body_len {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        received.extend_from_slice(&chunk[..n]);
    }

    socket
        .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 0\r\nconnection: close\r\n\r\n")
        .await
        .unwrap();

    String::from_utf8_lossy(&received).to_string()
}

#[tokio::test]
async fn test_caller_content_type_keeps_multipart_body() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(capture_one_request(listener));

    let options = TransportOptions::default().header("content-type", "application/json");
    let endpoint = Endpoint::new(&format!("http://{addr}/users/1"))
        .unwrap()
        .options(options);
    let hooks = Arc::new(RecordingHooks::default());
    let submitter = submitter_for(endpoint, &hooks);

    let kind = submitter.submit(form(&[("age", json!(31))]), None).await;
    let raw = server.await.unwrap();

    assert_eq!(kind, OutcomeKind::Success);
    let content_types: Vec<&str> = raw
        .lines()
        .filter(|line| line.to_ascii_lowercase().starts_with("content-type:"))
        .collect();
    assert_eq!(content_types.len(), 1, "request was:\n{raw}");
    assert!(content_types[0].contains("multipart/form-data; boundary="));
    assert!(raw.contains("name=\"age\"\r\n\r\n31\r\n"));
}
