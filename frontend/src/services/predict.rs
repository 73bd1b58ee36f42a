//! HTTP service submitting an image to the prediction endpoint.

use gloo_net::http::Request;
use js_sys::{Array, Uint8Array};
use web_sys::{Blob, BlobPropertyBag, FormData};

use crate::types::{
    AppError, AppResult, Diagnosis, ErrorResponse, PredictResponse, PredictionResult, SelectedFile,
};
use crate::{DEFAULT_INVALID_IMAGE, PREDICT_ENDPOINT, UPLOAD_FIELD};

/// Status and body of a completed HTTP exchange.
#[derive(Clone, Debug, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Something able to deliver an image to the prediction endpoint.
///
/// Implementations return `Err(AppError::Transport)` only when no response
/// was received; any status code is a completed exchange.
#[allow(async_fn_in_trait)]
pub trait PredictClient {
    async fn post_image(&self, file: &SelectedFile) -> AppResult<RawResponse>;
}

/// Browser client built on `fetch` via gloo-net.
#[derive(Clone, Debug)]
pub struct GlooPredictClient {
    endpoint: String,
}

impl GlooPredictClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl Default for GlooPredictClient {
    fn default() -> Self {
        Self::new(PREDICT_ENDPOINT)
    }
}

impl PredictClient for GlooPredictClient {
    async fn post_image(&self, file: &SelectedFile) -> AppResult<RawResponse> {
        let form_data = build_form_data(file)?;

        let request = Request::post(&self.endpoint)
            .body(form_data)
            .map_err(|e| AppError::Transport(format!("Failed to build request: {}", e)))?;

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Transport(format!("Failed to read response: {}", e)))?;

        Ok(RawResponse { status, body })
    }
}

/// Single-part form with the image under [`UPLOAD_FIELD`].
fn build_form_data(file: &SelectedFile) -> AppResult<FormData> {
    let form_data = FormData::new()
        .map_err(|e| AppError::Transport(format!("Failed to create FormData: {:?}", e)))?;

    let parts = Array::new();
    parts.push(&Uint8Array::from(file.bytes.as_slice()));
    let options = BlobPropertyBag::new();
    options.set_type(&file.mime_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| AppError::Transport(format!("Failed to create Blob: {:?}", e)))?;

    form_data
        .append_with_blob_and_filename(UPLOAD_FIELD, &blob, &file.name)
        .map_err(|e| AppError::Transport(format!("Failed to append file: {:?}", e)))?;

    Ok(form_data)
}

/// Interpret a completed exchange.
///
/// - `200` must carry `prediction` and a numeric `confidence`; anything
///   else is a transport failure.
/// - Any other status with a JSON body is a rejection; its `error` text is
///   used when non-empty, [`DEFAULT_INVALID_IMAGE`] otherwise.
/// - Any other status with a body that is not JSON (a proxy error page)
///   is a transport failure.
///
/// The CLI reads the same bodies in `backend/src/api/types.rs`.
pub fn parse_predict_response(response: &RawResponse) -> AppResult<PredictionResult> {
    if response.status != 200 {
        let body: ErrorResponse = serde_json::from_str(&response.body).map_err(|e| {
            AppError::Transport(format!(
                "Unreadable error response ({}): {}",
                response.status, e
            ))
        })?;
        let message = body
            .error
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_INVALID_IMAGE.to_string());
        return Err(AppError::Validation(message));
    }

    let body: PredictResponse = serde_json::from_str(&response.body)
        .map_err(|e| AppError::Transport(format!("Failed to parse response: {}", e)))?;

    let confidence = body.confidence.as_f64().ok_or_else(|| {
        AppError::Transport(format!("Confidence is not a number: {:?}", body.confidence))
    })?;

    Ok(PredictionResult::new(
        Diagnosis::from_label(&body.prediction),
        confidence,
    ))
}

/// Post the file and interpret the answer.
pub async fn request_prediction<C: PredictClient>(
    client: &C,
    file: &SelectedFile,
) -> AppResult<PredictionResult> {
    log::info!("📤 Submitting {} ({} bytes)", file.name, file.bytes.len());
    let response = client.post_image(file).await?;
    log::debug!("Prediction endpoint answered {}", response.status);
    parse_predict_response(&response)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_success_response() {
        let result = parse_predict_response(&raw(
            200,
            r#"{"filename": "scan.png", "prediction": "Brain Tumor Detected", "confidence": 92.5}"#,
        ))
        .unwrap();
        assert_eq!(result.label, Diagnosis::TumorDetected);
        assert_eq!(result.confidence, 92.5);
    }

    #[test]
    fn test_string_confidence() {
        let result =
            parse_predict_response(&raw(200, r#"{"prediction": "No Tumor", "confidence": "13.2"}"#))
                .unwrap();
        assert_eq!(result.label, Diagnosis::NoTumor);
        assert_eq!(result.confidence, 13.2);
    }

    #[test]
    fn test_error_message_from_server() {
        let err = parse_predict_response(&raw(400, r#"{"error": "bad file"}"#)).unwrap_err();
        assert_eq!(err, AppError::Validation("bad file".into()));
    }

    #[test]
    fn test_error_without_message_uses_default() {
        for body in [r#"{}"#, r#"{"detail": "nope"}"#, r#"{"error": null}"#] {
            let err = parse_predict_response(&raw(500, body)).unwrap_err();
            assert_eq!(err, AppError::Validation(DEFAULT_INVALID_IMAGE.into()));
        }
    }

    #[test]
    fn test_empty_error_message_uses_default() {
        let err = parse_predict_response(&raw(400, r#"{"error": ""}"#)).unwrap_err();
        assert_eq!(err, AppError::Validation(DEFAULT_INVALID_IMAGE.into()));
    }

    #[test]
    fn test_non_json_error_page_is_transport_error() {
        for body in ["<html>Bad Gateway</html>", ""] {
            let err = parse_predict_response(&raw(502, body)).unwrap_err();
            assert!(matches!(err, AppError::Transport(_)), "{:?}", err);
        }
    }

    #[test]
    fn test_unreadable_success_is_transport_error() {
        let err = parse_predict_response(&raw(200, "not json")).unwrap_err();
        assert!(matches!(err, AppError::Transport(_)));

        let err = parse_predict_response(&raw(200, r#"{"prediction": "No Tumor", "confidence": "n/a"}"#))
            .unwrap_err();
        assert!(matches!(err, AppError::Transport(_)));
    }
}
