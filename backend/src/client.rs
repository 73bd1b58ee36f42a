//! Command-line prediction client.
//!
//! Posts one image to a `/predict` endpoint, the same way the browser does.

use std::path::Path;

use crate::api::types::{interpret_response, PredictOutcome};
use crate::api::upstream::ImageUpload;
use crate::error::{ServerError, ServerResult};

/// Default endpoint: a gateway running locally.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/predict";

/// Read `path` from disk into an upload.
pub async fn load_image(path: &Path) -> ServerResult<ImageUpload> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ServerError::BadRequest(format!("Not a file: {}", path.display())))?
        .to_string();

    Ok(ImageUpload {
        file_name,
        content_type: None,
        bytes,
    })
}

/// Submit an image and interpret the answer.
pub async fn predict_file(path: &Path, endpoint: &str) -> ServerResult<PredictOutcome> {
    let upload = load_image(path).await?;
    tracing::debug!(file = %upload.file_name, bytes = upload.bytes.len(), "uploading");

    let response = reqwest::Client::new()
        .post(endpoint)
        .multipart(upload.into_form()?)
        .send()
        .await?;

    let status = response.status().as_u16();
    let body = response.text().await?;
    interpret_response(status, &body)
}
