//! HTTP API module.
//!
//! This module provides the HTTP gateway and API types for the NeuroScan
//! backend.

pub mod server;
pub mod types;
pub mod upstream;

pub use server::{router, start_server};
pub use types::*;
pub use upstream::*;
