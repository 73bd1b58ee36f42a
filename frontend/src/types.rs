//! Common types used across the frontend application.
//!
//! # Categories
//!
//! - **Upload Types** - the selected image
//! - **Prediction Types** - classification outcome and its wire format
//! - **UI State** - the analyze lifecycle as a tagged enum
//! - **Error Types** - frontend error handling
//!
//! The `neuroscan predict` command reads the same wire format in
//! `backend/src/api/types.rs`; keep the two in step.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Upload Types
// =============================================================================

/// The image currently chosen by the user.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedFile {
    /// Original file name (sent as the multipart file name)
    pub name: String,
    /// MIME type reported by the browser, e.g. `image/png`
    pub mime_type: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Inline `data:` URL usable as an `<img src>`.
    ///
    /// Browsers leave `File.type` empty for unknown extensions; those fall
    /// back to `application/octet-stream`.
    pub fn data_url(&self) -> String {
        let mime = if self.mime_type.is_empty() {
            "application/octet-stream"
        } else {
            self.mime_type.as_str()
        };
        format!("data:{};base64,{}", mime, STANDARD.encode(&self.bytes))
    }
}

// =============================================================================
// Prediction Types
// =============================================================================

/// Label the prediction endpoint reports for a positive scan.
/// Mirrored by `TUMOR_LABEL` in `backend/src/api/types.rs`.
pub const TUMOR_LABEL: &str = "Brain Tumor Detected";

/// Categorical outcome of a classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Diagnosis {
    TumorDetected,
    NoTumor,
}

impl Diagnosis {
    /// Map the endpoint's label. Anything but the tumor label reads as
    /// no tumor.
    pub fn from_label(label: &str) -> Self {
        if label == TUMOR_LABEL {
            Diagnosis::TumorDetected
        } else {
            Diagnosis::NoTumor
        }
    }

    /// Display message for the result panel.
    pub fn message(&self) -> &'static str {
        match self {
            Diagnosis::TumorDetected => "🧠 Brain Tumor Detected (High Confidence)",
            Diagnosis::NoTumor => "✅ No Tumor Detected (Low Confidence)",
        }
    }

    /// Get CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            Diagnosis::TumorDetected => "result-positive",
            Diagnosis::NoTumor => "result-negative",
        }
    }
}

/// A parsed classification.
#[derive(Clone, Debug, PartialEq)]
pub struct PredictionResult {
    pub label: Diagnosis,
    /// Percentage in `[0, 100]`
    pub confidence: f64,
}

impl PredictionResult {
    /// Build a result, clamping the confidence into `[0, 100]`.
    pub fn new(label: Diagnosis, confidence: f64) -> Self {
        Self {
            label,
            confidence: confidence.clamp(0.0, 100.0),
        }
    }
}

/// `confidence` arrives either as a JSON number or a numeric string.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfidenceValue {
    Number(f64),
    Text(String),
}

impl ConfidenceValue {
    /// Numeric value, `None` when the text is not a finite number.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            ConfidenceValue::Number(n) => *n,
            ConfidenceValue::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

/// Success body of `POST /predict`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub prediction: String,
    pub confidence: ConfidenceValue,
}

/// Error body of `POST /predict`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
}

// =============================================================================
// UI State
// =============================================================================

/// Lifecycle of the analyze workflow.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum UiState {
    #[default]
    Idle,
    FileReady,
    Analyzing,
    ResultShown(PredictionResult),
    ErrorShown(AppError),
}

impl UiState {
    pub fn is_analyzing(&self) -> bool {
        matches!(self, UiState::Analyzing)
    }
}

/// Visibility of the result panel.
///
/// `Shown` drops the `hidden` class; `Visible` adds `visible` so the CSS
/// transition runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PanelVisibility {
    #[default]
    Hidden,
    Shown,
    Visible,
}

impl PanelVisibility {
    pub fn css_class(&self) -> &'static str {
        match self {
            PanelVisibility::Hidden => "result-panel hidden",
            PanelVisibility::Shown => "result-panel",
            PanelVisibility::Visible => "result-panel visible",
        }
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Frontend application errors.
#[derive(Clone, Debug, PartialEq)]
pub enum AppError {
    /// The server rejected the image.
    Validation(String),
    /// The request could not complete or the answer was unreadable.
    Transport(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::Transport(msg) => write!(f, "Network error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_accepts_number_and_string() {
        let response: PredictResponse =
            serde_json::from_str(r#"{"prediction": "No Tumor", "confidence": "13.2"}"#).unwrap();
        assert_eq!(response.confidence.as_f64(), Some(13.2));

        let response: PredictResponse = serde_json::from_str(
            r#"{"filename": "scan.png", "prediction": "Brain Tumor Detected", "confidence": 92.5}"#,
        )
        .unwrap();
        assert_eq!(response.confidence.as_f64(), Some(92.5));
    }

    #[test]
    fn test_confidence_rejects_garbage() {
        assert_eq!(ConfidenceValue::Text("high".into()).as_f64(), None);
        assert_eq!(ConfidenceValue::Text("NaN".into()).as_f64(), None);
    }

    #[test]
    fn test_diagnosis_mapping() {
        assert_eq!(Diagnosis::from_label("Brain Tumor Detected"), Diagnosis::TumorDetected);
        assert_eq!(Diagnosis::from_label("No Tumor"), Diagnosis::NoTumor);
        assert_eq!(Diagnosis::from_label("No Tumor Detected"), Diagnosis::NoTumor);
    }

    #[test]
    fn test_prediction_confidence_is_clamped() {
        assert_eq!(PredictionResult::new(Diagnosis::NoTumor, 140.0).confidence, 100.0);
        assert_eq!(PredictionResult::new(Diagnosis::NoTumor, -3.0).confidence, 0.0);
    }

    #[test]
    fn test_data_url() {
        let file = SelectedFile::new("scan.png", "image/png", b"abc".to_vec());
        assert_eq!(file.data_url(), "data:image/png;base64,YWJj");

        let untyped = SelectedFile::new("scan", "", Vec::new());
        assert_eq!(untyped.data_url(), "data:application/octet-stream;base64,");
    }
}
