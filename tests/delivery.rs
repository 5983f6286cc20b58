//! Batch delivery against a wiremock collection server.

mod common;

use client_metrics_exporter::{
    metrics::{
        Batch,
        ProcessData,
        ProcessKind,
        SystemData,
        ValidatorData,
    },
    sender::{
        DeliveryError,
        Sender,
    },
};
use common::stamp;
use reqwest::{
    Client as HttpClient,
    StatusCode,
};
use std::time::Duration;
use url::Url;
use wiremock::{
    matchers::{
        header,
        method,
        path,
    },
    Mock,
    MockServer,
    ResponseTemplate,
};

fn batch() -> Batch {
    let stamp = stamp(1_700_000_000_000);
    vec![
        SystemData::new(stamp.envelope(ProcessKind::System)).into(),
        ValidatorData {
            process: ProcessData::new(stamp.envelope(ProcessKind::Validator), "prysm"),
            validator_total: 4,
            validator_active: 3,
        }
        .into(),
    ]
}

async fn server_responding(template: ResponseTemplate) -> (MockServer, Sender) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/client/metrics"))
        .and(header("content-type", "application/json"))
        .respond_with(template)
        .mount(&server)
        .await;
    let address = Url::parse(&format!("{}/api/v1/client/metrics?apikey=abc", server.uri())).unwrap();
    let sender = Sender::new(HttpClient::new(), address, Duration::from_secs(2));
    (server, sender)
}

#[tokio::test]
async fn empty_ok_response_is_success() {
    let (server, sender) = server_responding(ResponseTemplate::new(200)).await;
    sender.send(&batch()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["process"], "system");
    assert_eq!(records[1]["process"], "validator");
    assert_eq!(records[1]["validator_active"], 3);
    assert_eq!(records[0]["timestamp"], records[1]["timestamp"]);
}

#[tokio::test]
async fn empty_batch_is_still_posted() {
    let (server, sender) = server_responding(ResponseTemplate::new(200)).await;
    sender.send(&[]).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].body, b"[]");
}

#[tokio::test]
async fn ok_response_with_body_is_rejected() {
    let (_server, sender) = server_responding(ResponseTemplate::new(200).set_body_string("invalid apikey")).await;
    match sender.send(&batch()).await {
        Err(DeliveryError::Rejected { status, body }) => {
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, "invalid apikey");
        }
        other => panic!("expected a rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn error_status_is_rejected_with_body() {
    let (_server, sender) = server_responding(ResponseTemplate::new(500).set_body_string("database down")).await;
    let err = sender.send(&batch()).await.unwrap_err();
    assert!(matches!(err, DeliveryError::Rejected { status, .. } if status == StatusCode::INTERNAL_SERVER_ERROR));
    assert!(err.to_string().contains("database down"));
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;
    let sender = Sender::new(HttpClient::new(), Url::parse(&server.uri()).unwrap(), Duration::from_millis(200));
    assert!(matches!(sender.send(&batch()).await, Err(DeliveryError::Request(_))));
}

#[tokio::test]
async fn unreachable_server_is_a_request_error() {
    let sender = Sender::new(
        HttpClient::new(),
        Url::parse("http://127.0.0.1:1/").unwrap(),
        Duration::from_secs(1),
    );
    assert!(matches!(sender.send(&batch()).await, Err(DeliveryError::Request(_))));
}
