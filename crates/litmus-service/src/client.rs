//! HTTP client for the analysis service.

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};

use litmus_core::report::AnalysisReport;
use litmus_core::{LitmusError, Result};

use crate::protocol::{ErrorBody, HealthResponse, ANALYZE_PATH, FILE_FIELD, HEALTH_PATH};

/// Client for the analysis API. One submission in flight per call;
/// no retries, no state between calls.
pub struct AnalysisClient {
    client: Client,
    base_url: String,
}

impl AnalysisClient {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check service health.
    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<HealthResponse> {
        let url = format!("{}{}", self.base_url, HEALTH_PATH);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LitmusError::Transport(e.to_string()))?;
        resp.json()
            .await
            .map_err(|e| LitmusError::Transport(e.to_string()))
    }

    /// Submit a file for analysis.
    ///
    /// An empty path or unreadable file fails validation before any
    /// request is made.
    #[instrument(skip(self))]
    pub async fn analyze_file(&self, path: &Path) -> Result<AnalysisReport> {
        if path.as_os_str().is_empty() {
            return Err(LitmusError::Validation(
                "Please select a file first.".to_string(),
            ));
        }
        let bytes = std::fs::read(path).map_err(|e| {
            LitmusError::Validation(format!("Cannot read {}: {e}", path.display()))
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());

        self.analyze_bytes(file_name, bytes).await
    }

    /// Submit raw bytes as a named file.
    ///
    /// 2xx parses as a report; non-2xx surfaces the server's `error`
    /// message; anything else (network, bad JSON) is a transport error.
    #[instrument(skip(self, bytes))]
    pub async fn analyze_bytes(&self, file_name: String, bytes: Vec<u8>) -> Result<AnalysisReport> {
        let url = format!("{}{}", self.base_url, ANALYZE_PATH);
        let form = Form::new().part(FILE_FIELD, Part::bytes(bytes).file_name(file_name));

        let resp = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| LitmusError::Transport(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            let report: AnalysisReport = resp
                .json()
                .await
                .map_err(|e| LitmusError::Transport(e.to_string()))?;
            debug!(verdict = %report.verdict, score = report.score, "Analysis complete");
            Ok(report)
        } else {
            // Non-2xx bodies carry `{ "error": ... }`; fall back to the
            // status line when even that fails to parse.
            match resp.json::<ErrorBody>().await {
                Ok(body) => Err(LitmusError::Service(body.error)),
                Err(_) => Err(LitmusError::Service(status.to_string())),
            }
        }
    }
}
