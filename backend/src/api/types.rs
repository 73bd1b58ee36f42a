//! REST API types for frontend integration.
//!
//! The gateway relays the prediction service's bodies untouched; these
//! types describe them for validation and for the `predict` command.
//!
//! The browser reads the same bodies in `frontend/src/types.rs` and
//! `frontend/src/services/predict.rs` (default message in
//! `frontend/src/config.rs`). Keep the two readings in step.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{ServerError, ServerResult};

/// File extensions accepted by `POST /predict`.
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Rejection text for other file types.
pub const INVALID_FILE_TYPE: &str = "Invalid file type. Please upload a JPG or PNG image.";

/// Shown when the prediction service rejects an image without saying why.
/// Same text as the frontend's `config::DEFAULT_INVALID_IMAGE`.
pub const DEFAULT_INVALID_IMAGE: &str = "Invalid image. Please upload a valid MRI scan.";

/// Label the prediction service reports for a positive scan.
/// Same label as the frontend's `types::TUMOR_LABEL`.
pub const TUMOR_LABEL: &str = "Brain Tumor Detected";

/// Check whether a filename has an allowed image extension.
pub fn has_allowed_extension(name: &str) -> bool {
    name.rsplit_once('.').is_some_and(|(_, ext)| {
        ALLOWED_EXTENSIONS
            .iter()
            .any(|a| a.eq_ignore_ascii_case(ext))
    })
}

/// MIME type for an allowed file name.
pub fn mime_for(name: &str) -> &'static str {
    match name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()) {
        Some(ext) if ext == "png" => "image/png",
        Some(ext) if ext == "jpg" || ext == "jpeg" => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// `confidence` arrives either as a JSON number or a numeric string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Confidence {
    Number(f64),
    Text(String),
}

impl Confidence {
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Confidence::Number(n) => *n,
            Confidence::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

/// Success body of `POST /predict`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    /// Original file name, when the service echoes it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    pub prediction: String,
    pub confidence: Confidence,
}

/// Error body of `POST /predict`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// How a prediction request ended, from the user's point of view.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictOutcome {
    Classified { tumor: bool, confidence: f64 },
    Rejected(String),
}

impl PredictOutcome {
    /// The line shown in place of the result label; matches the
    /// frontend's `Diagnosis::message` and error rendering.
    pub fn headline(&self) -> String {
        match self {
            PredictOutcome::Classified { tumor: true, .. } => {
                "🧠 Brain Tumor Detected (High Confidence)".to_string()
            }
            PredictOutcome::Classified { tumor: false, .. } => {
                "✅ No Tumor Detected (Low Confidence)".to_string()
            }
            PredictOutcome::Rejected(message) => format!("⚠️ {}", message),
        }
    }
}

/// Interpret a prediction response.
///
/// Non-200 JSON answers are rejections carrying the body's `error`, or the
/// default message when it is missing or empty. A body that is not JSON
/// (a proxy error page) is an error, as is a 200 without a readable
/// prediction.
pub fn interpret_response(status: u16, body: &str) -> ServerResult<PredictOutcome> {
    if status != 200 {
        let body: ErrorBody = serde_json::from_str(body).map_err(|e| {
            ServerError::Upstream(format!("Unreadable error response ({}): {}", status, e))
        })?;
        let message = body
            .error
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_INVALID_IMAGE.to_string());
        return Ok(PredictOutcome::Rejected(message));
    }

    let response: PredictResponse = serde_json::from_str(body)
        .map_err(|e| ServerError::Upstream(format!("Invalid response: {}", e)))?;
    let confidence = response.confidence.as_f64().ok_or_else(|| {
        ServerError::Upstream(format!("Confidence is not a number: {:?}", response.confidence))
    })?;

    Ok(PredictOutcome::Classified {
        tumor: response.prediction == TUMOR_LABEL,
        confidence: confidence.clamp(0.0, 100.0),
    })
}

/// Create an error response
pub fn error_response(error: &str) -> Value {
    json!({ "error": error })
}
