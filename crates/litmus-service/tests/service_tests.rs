//! End-to-end tests: embedded service + client over real HTTP.

use std::io::Write;
use std::time::Duration;

use litmus_core::config::AnalyzerConfig;
use litmus_core::report::build_report;
use litmus_core::{LitmusError, ReportSection};
use litmus_service::{AnalysisClient, EmbeddedService};

async fn start() -> (EmbeddedService, AnalysisClient) {
    let service = EmbeddedService::start(AnalyzerConfig::default(), 0)
        .await
        .expect("embedded service starts");
    let client = AnalysisClient::new(service.base_url().to_string(), Duration::from_secs(10));
    (service, client)
}

#[tokio::test]
async fn health_answers_ok() {
    let (mut service, client) = start().await;
    let health = client.health().await.expect("health");
    assert_eq!(health.status, "ok");
    service.shutdown().await;
}

#[tokio::test]
async fn analyze_file_round_trip() {
    let (mut service, client) = start().await;

    let mut file = tempfile::Builder::new()
        .suffix(".py")
        .tempfile()
        .expect("tempfile");
    write!(
        file,
        "# Add two numbers.\n# Kept trivial on purpose.\ndef add(a, b):\n    return a + b\n"
    )
    .expect("write fixture");

    let report = client.analyze_file(file.path()).await.expect("analysis");
    assert!(["Basic", "Neutral", "Acidic"].contains(&report.verdict.as_str()));
    assert!(!report.feedback.is_empty());
    let detail = report.detailed_feedback.as_ref().expect("detail");
    assert!(detail.metrics_explanation.is_some());

    // The wire report feeds the view-model directly.
    let view = build_report(&report, 3);
    assert!(matches!(view.sections[0], ReportSection::Headline { .. }));
    assert!(matches!(
        view.sections.last(),
        Some(ReportSection::Summary(_))
    ));

    service.shutdown().await;
}

#[tokio::test]
async fn empty_upload_is_acidic() {
    let (mut service, client) = start().await;
    let report = client
        .analyze_bytes("empty.py".to_string(), Vec::new())
        .await
        .expect("analysis");
    assert_eq!(report.verdict, "Acidic");
    assert_eq!(report.score, -3);
    service.shutdown().await;
}

#[tokio::test]
async fn non_utf8_payload_is_a_service_error() {
    let (mut service, client) = start().await;
    let err = client
        .analyze_bytes("binary.bin".to_string(), vec![0xff, 0xfe, 0x00, 0x80])
        .await
        .expect_err("should be rejected");
    match err {
        LitmusError::Service(msg) => {
            assert_eq!(msg, "File must be a text file with valid UTF-8 encoding!")
        }
        other => panic!("expected service error, got {other:?}"),
    }
    service.shutdown().await;
}

#[tokio::test]
async fn upload_without_filename_is_rejected() {
    let (mut service, _) = start().await;

    // Hand-rolled multipart part with no filename, bypassing the client.
    let form = reqwest::multipart::Form::new()
        .part("file", reqwest::multipart::Part::bytes(b"x = 1".to_vec()));
    let resp = reqwest::Client::new()
        .post(format!("{}/analyze/", service.base_url()))
        .multipart(form)
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = resp.json().await.expect("json body");
    assert_eq!(body["error"], "No file selected or invalid filename!");

    service.shutdown().await;
}

#[tokio::test]
async fn missing_file_fails_validation_without_a_request() {
    // Deliberately no server: validation must short-circuit.
    let client = AnalysisClient::new("http://127.0.0.1:1".to_string(), Duration::from_secs(1));
    let err = client
        .analyze_file(std::path::Path::new(""))
        .await
        .expect_err("empty path");
    assert!(matches!(err, LitmusError::Validation(_)));

    let err = client
        .analyze_file(std::path::Path::new("/definitely/not/a/real/file.py"))
        .await
        .expect_err("unreadable path");
    assert!(matches!(err, LitmusError::Validation(_)));
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let client = AnalysisClient::new("http://127.0.0.1:1".to_string(), Duration::from_secs(1));
    let err = client
        .analyze_bytes("a.py".to_string(), b"x = 1".to_vec())
        .await
        .expect_err("nothing listening");
    assert!(matches!(err, LitmusError::Transport(_)));
}
