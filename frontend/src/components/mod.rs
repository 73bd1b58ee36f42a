//! UI Components for the NeuroScan application.
//!
//! # Layout Components
//! - [`Hero`] - Main title and description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`UploadBox`] - Image selection with drag & drop
//! - [`ScanPreview`] - Local preview of the selected scan
//! - [`LoaderContainer`] - Host for the lottie loader ([`LottieLoader`])
//! - [`ResultPanel`] - Diagnosis or rejection message with confidence
//! - [`AnalyzeSection`] - Wires the above to the controller

mod hero;
mod upload;
mod loader;
mod result;
mod analyze;
mod footer;

pub use hero::*;
pub use upload::*;
pub use loader::*;
pub use result::*;
pub use analyze::*;
pub use footer::*;
