//! HTTP Server for the NeuroScan gateway.
//!
//! Serves the built frontend and forwards scans to the prediction service.
//! Inference happens upstream; this server only screens the upload.
//!
//! # API Endpoints
//!
//! | Method | Path       | Description                                 |
//! |--------|------------|---------------------------------------------|
//! | GET    | `/health`  | Health check                                |
//! | POST   | `/predict` | Classify an MRI scan (multipart, `file`)    |
//! | GET    | `/*`       | Static frontend, `index.html` as fallback   |

use std::net::SocketAddr;
use std::path::Path;

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, Method, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

use super::types::{error_response, has_allowed_extension, INVALID_FILE_TYPE};
use super::upstream::{ImageUpload, PredictionUpstream};
use crate::config::{ServerConfig, MAX_UPLOAD_BYTES};
use crate::error::ServerResult;

type ApiError = (StatusCode, Json<Value>);

/// Build the application router.
pub fn router(upstream: PredictionUpstream, static_dir: &Path) -> Router {
    // Permissive CORS for development
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    let static_files = ServeDir::new(static_dir)
        .fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/health", get(health))
        .route("/predict", post(predict))
        .fallback_service(static_files)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .with_state(upstream)
}

/// Start the HTTP server
pub async fn start_server(config: ServerConfig) -> ServerResult<()> {
    let upstream = PredictionUpstream::new(config.predict_url());
    let app = router(upstream, &config.static_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("🚀 NeuroScan gateway running on http://localhost:{}", config.port);
    tracing::info!("   POST /predict -> {}", config.predict_url());
    tracing::info!("   GET  /health");
    tracing::info!("   GET  /*       -> {}", config.static_dir.display());

    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health(State(upstream): State<PredictionUpstream>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "neuroscan",
        "version": env!("CARGO_PKG_VERSION"),
        "upstream": upstream.predict_url(),
    }))
}

/// Prediction endpoint
async fn predict(
    State(upstream): State<PredictionUpstream>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let mut upload: Option<ImageUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        bad_request(&format!("Multipart error: {}", e))
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("").to_string();
        let content_type = field.content_type().map(|s| s.to_string());
        let bytes = field
            .bytes()
            .await
            .map_err(|e| bad_request(&format!("Read error: {}", e)))?
            .to_vec();

        upload = Some(ImageUpload {
            file_name,
            content_type,
            bytes,
        });
    }

    let upload = upload.ok_or_else(|| bad_request("No file provided"))?;

    if !has_allowed_extension(&upload.file_name) {
        tracing::warn!(file = %upload.file_name, "rejected file type");
        return Err(bad_request(INVALID_FILE_TYPE));
    }

    tracing::info!(file = %upload.file_name, bytes = upload.bytes.len(), "📄 forwarding scan");

    let (status, body) = upstream.forward(upload).await.map_err(|e| {
        tracing::error!("❌ {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, Json(error_response(&e.to_string())))
    })?;

    tracing::info!(status = status.as_u16(), "prediction service answered");
    Ok((status, Json(body)))
}

fn bad_request(message: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(error_response(message)))
}
