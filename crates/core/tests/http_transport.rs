//! HTTP transport against a live reference analysis service on a loopback port.

use api_rest::{build_router, ServerConfig};
use axum::{routing::post, Router};
use medimind_core::{
    DiagnosticResult, DiagnosticWorkflow, HttpTransport, Severity, StagedFile, SubmissionRequest,
    SymptomTag, TransportAdapter, TransportError,
};
use reqwest::Url;
use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

async fn spawn(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

async fn spawn_reference() -> SocketAddr {
    spawn(build_router(&ServerConfig::default())).await
}

fn url(addr: SocketAddr, path: &str) -> Url {
    Url::parse(&format!("http://{addr}{path}")).unwrap()
}

fn transport(endpoint: Url) -> HttpTransport {
    HttpTransport::new(endpoint, Duration::from_secs(5)).unwrap()
}

fn request_with_symptoms(symptoms: &[&str]) -> SubmissionRequest {
    SubmissionRequest::new(
        vec![StagedFile::from_bytes("bloods.pdf", b"%PDF-1.4 test".to_vec()).unwrap()],
        symptoms
            .iter()
            .map(|s| SymptomTag::new(*s).unwrap())
            .collect(),
        "Type 2 diabetes".into(),
    )
}

#[tokio::test]
async fn test_reference_service_round_trip() {
    let addr = spawn_reference().await;
    let transport = transport(url(addr, "/api/analyze"));

    let result = transport
        .analyze(&request_with_symptoms(&["Headache", "Fever"]))
        .await
        .unwrap();

    assert_eq!(result, DiagnosticResult::reference());
    assert_eq!(result.severity(), Severity::Attention);
    assert_eq!(result.follow_up(), Some("2 weeks"));
}

#[tokio::test]
async fn test_diagnose_path_is_also_served() {
    let addr = spawn_reference().await;
    let transport = transport(url(addr, "/api/diagnose"));

    let result = transport.analyze(&request_with_symptoms(&[])).await.unwrap();
    assert_eq!(result.findings().len(), 4);
}

#[tokio::test]
async fn test_unknown_path_is_status_error() {
    let addr = spawn_reference().await;
    let transport = transport(url(addr, "/api/nope"));

    match transport.analyze(&request_with_symptoms(&["Cough"])).await {
        Err(TransportError::Status { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_keeps_body() {
    let router = Router::new().route(
        "/api/analyze",
        post(|| async {
            (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                "model unavailable",
            )
        }),
    );
    let addr = spawn(router).await;

    let err = transport(url(addr, "/api/analyze"))
        .analyze(&request_with_symptoms(&["Cough"]))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        TransportError::Status {
            status: 500,
            body: "model unavailable".into(),
        }
    );
}

#[tokio::test]
async fn test_unexpected_payload_is_malformed() {
    let router = Router::new().route(
        "/api/analyze",
        post(|| async {
            axum::Json(serde_json::json!({
                "severity": "unknown",
                "findings": [],
                "recommendations": []
            }))
        }),
    );
    let addr = spawn(router).await;

    let err = transport(url(addr, "/api/analyze"))
        .analyze(&request_with_symptoms(&["Cough"]))
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::MalformedPayload(_)), "{err:?}");
}

#[tokio::test]
async fn test_closed_port_is_network_error() {
    // Bind then drop to get a port nothing listens on.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };

    let err = transport(url(addr, "/api/analyze"))
        .analyze(&request_with_symptoms(&["Cough"]))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "network");
}

#[tokio::test]
async fn test_workflow_against_reference_service_with_file_from_disk() {
    let addr = spawn_reference().await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ecg.txt");
    std::fs::File::create(&path)
        .unwrap()
        .write_all(b"sinus rhythm")
        .unwrap();

    let mut workflow = DiagnosticWorkflow::new(
        Arc::new(transport(url(addr, "/api/analyze"))),
        Duration::from_secs(5),
    );
    workflow.add_file(StagedFile::from_path(&path).unwrap());
    workflow.add_symptom("Chest pain");

    let state = workflow.submit().await.unwrap();

    assert_eq!(state.name(), "resultReady");
    assert_eq!(workflow.result(), Some(&DiagnosticResult::reference()));
}
