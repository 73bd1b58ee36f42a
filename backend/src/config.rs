//! Server configuration.
//!
//! Values come from CLI flags, with `NEUROSCAN_*` environment variables
//! (optionally from a `.env` file) as fallback.

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8000;

/// Where trunk puts the built frontend.
pub const DEFAULT_STATIC_DIR: &str = "frontend/dist";

/// Largest accepted upload, in bytes.
///
/// 20 MB limit.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Gateway settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Base URL of the prediction service, without trailing slash
    pub upstream: String,
    pub static_dir: PathBuf,
}

impl ServerConfig {
    /// Validate and normalise raw settings.
    pub fn new(
        port: u16,
        upstream: Option<String>,
        static_dir: impl Into<PathBuf>,
    ) -> ConfigResult<Self> {
        let upstream = upstream
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
            .ok_or(ConfigError::MissingUpstream)?;

        if !(upstream.starts_with("http://") || upstream.starts_with("https://")) {
            return Err(ConfigError::InvalidUpstream(upstream));
        }

        let static_dir = static_dir.into();
        if !static_dir.is_dir() {
            return Err(ConfigError::StaticDirMissing(static_dir));
        }

        Ok(Self {
            port,
            upstream,
            static_dir,
        })
    }

    /// Full URL of the upstream prediction endpoint.
    pub fn predict_url(&self) -> String {
        format!("{}/predict", self.upstream)
    }

    pub fn index_file(&self) -> PathBuf {
        Path::new(&self.static_dir).join("index.html")
    }
}
