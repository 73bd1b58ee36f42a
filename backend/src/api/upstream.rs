//! Client for the external prediction service.

use axum::http::StatusCode;
use reqwest::multipart::{Form, Part};
use serde_json::Value;

use super::types::mime_for;
use crate::error::ServerResult;

/// An uploaded image, as received from the browser.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Declared content type, or one guessed from the file name.
    pub fn mime(&self) -> String {
        self.content_type
            .clone()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| mime_for(&self.file_name).to_string())
    }

    /// Single-part form with the image under `file`.
    pub fn into_form(self) -> ServerResult<Form> {
        let mime = self.mime();
        let part = Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&mime)?;
        Ok(Form::new().part("file", part))
    }
}

/// Forwards uploads to `{upstream}/predict`.
#[derive(Debug, Clone)]
pub struct PredictionUpstream {
    client: reqwest::Client,
    predict_url: String,
}

impl PredictionUpstream {
    pub fn new(predict_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            predict_url: predict_url.into(),
        }
    }

    pub fn predict_url(&self) -> &str {
        &self.predict_url
    }

    /// Send the image and return the service's status and JSON body.
    pub async fn forward(&self, upload: ImageUpload) -> ServerResult<(StatusCode, Value)> {
        let form = upload.into_form()?;
        let response = self
            .client
            .post(&self.predict_url)
            .multipart(form)
            .send()
            .await?;

        let status = StatusCode::from_u16(response.status().as_u16())
            .unwrap_or(StatusCode::BAD_GATEWAY);
        let body = response.json::<Value>().await?;
        Ok((status, body))
    }
}
