//! # NeuroScan - gateway for brain MRI classification
//!
//! Serves the NeuroScan web UI and forwards uploaded scans to an external
//! prediction service.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐  POST /predict  ┌─────────────┐  POST /predict  ┌─────────────┐
//! │   Browser   │────────────────▶│   Gateway   │────────────────▶│  Inference  │
//! │  (Leptos)   │◀────────────────│  (screen)   │◀────────────────│   service   │
//! └─────────────┘   JSON relayed  └─────────────┘                 └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`config`] - Server settings
//! - [`api`] - HTTP gateway
//! - [`client`] - Command-line prediction client

// Core modules
pub mod error;
pub mod config;

// HTTP API
pub mod api;

// CLI client
pub mod client;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ConfigError, ServerError, ServerResult};
pub use config::ServerConfig;

pub use api::types::{
    PredictResponse,
    PredictOutcome,
    ErrorBody,
    interpret_response,
    error_response,
};
pub use api::upstream::{ImageUpload, PredictionUpstream};

// Server
pub mod server {
    pub use crate::api::server::{router, start_server};
}
