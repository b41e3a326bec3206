//! Wire types shared by the client and server.
//! The analysis response itself is `litmus_core::report::AnalysisReport`,
//! (de)serialized directly on both sides.

use serde::{Deserialize, Serialize};

// ── Health ──────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

// ── Errors ──────────────────────────────────────────────────────

/// Body returned on any non-success status: `{ "error": "..." }`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

// Upload requests carry no JSON body: the file travels as a
// multipart/form-data part named "file".

/// Multipart field name for the uploaded file.
pub const FILE_FIELD: &str = "file";

/// Route the file is posted to (trailing slash included).
pub const ANALYZE_PATH: &str = "/analyze/";

/// Health check route.
pub const HEALTH_PATH: &str = "/api/health";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_round_trips() {
        let body: ErrorBody = serde_json::from_str(r#"{"error":"unsupported file type"}"#).unwrap();
        assert_eq!(body.error, "unsupported file type");

        let json = serde_json::to_string(&ErrorBody::new("nope")).unwrap();
        assert_eq!(json, r#"{"error":"nope"}"#);
    }
}
