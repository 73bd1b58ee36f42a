//! Backend services.
//!
//! # Services
//!
//! - [`predict`] - image submission to the prediction endpoint
//! - [`file`] - reading a browser `File` into a [`crate::SelectedFile`]

pub mod predict;
pub mod file;

pub use predict::*;
pub use file::*;
