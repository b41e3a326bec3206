//! The analysis HTTP service.
//!
//! Routes:
//! - `POST /analyze/`: multipart upload, field "file"; answers with the
//!   analysis report, or `{ "error": ... }` on failure.
//! - `GET /api/health`: liveness probe.
//!
//! CORS is wide open; the service only ever runs on localhost.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{debug, warn};

use litmus_core::analysis::analyze_code;
use litmus_core::config::AnalyzerConfig;
use litmus_core::report::AnalysisReport;

use crate::protocol::{ErrorBody, HealthResponse, ANALYZE_PATH, FILE_FIELD, HEALTH_PATH};

const NO_FILE_MESSAGE: &str = "No file selected or invalid filename!";
const NOT_UTF8_MESSAGE: &str = "File must be a text file with valid UTF-8 encoding!";

#[derive(Clone)]
pub struct ServiceState {
    pub analyzer: AnalyzerConfig,
}

/// Build the service router.
pub fn router(state: ServiceState) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(health))
        .route(ANALYZE_PATH, post(analyze))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

type AnalyzeError = (StatusCode, Json<ErrorBody>);

fn bad_request(message: &str) -> AnalyzeError {
    (StatusCode::BAD_REQUEST, Json(ErrorBody::new(message)))
}

async fn analyze(
    State(state): State<Arc<ServiceState>>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisReport>, AnalyzeError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        warn!("Rejected malformed multipart body: {e}");
        bad_request(NO_FILE_MESSAGE)
    })? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        if file_name.is_empty() {
            return Err(bad_request(NO_FILE_MESSAGE));
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|_| bad_request(NO_FILE_MESSAGE))?;
        upload = Some((file_name, bytes.to_vec()));
        break;
    }

    let Some((file_name, bytes)) = upload else {
        return Err(bad_request(NO_FILE_MESSAGE));
    };

    let code = String::from_utf8(bytes).map_err(|_| bad_request(NOT_UTF8_MESSAGE))?;

    let report = analyze_code(&code, &state.analyzer);
    debug!(
        file = %file_name,
        verdict = %report.verdict,
        score = report.score,
        "Analyzed upload"
    );
    Ok(Json(report))
}
