//! NeuroScan - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend for uploading a brain MRI scan, sending it to
//! the prediction endpoint and showing the classification.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Hero (title, description)                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  AnalyzeSection ── AnalyzeController ── PredictClient        │
//! │  ├── UploadBox (click / drag & drop)                         │
//! │  ├── ScanPreview                                             │
//! │  ├── status line + analyze button                            │
//! │  ├── LoaderContainer (lottie)                                │
//! │  └── ResultPanel (label + animated confidence)               │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - Common types (SelectedFile, PredictionResult, UiState, ...)
//! - [`controller`] - The upload → request → render lifecycle
//! - [`components`] - UI components
//! - [`services`] - Prediction endpoint and file reading

use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use wasm_bindgen::prelude::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod controller;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Upload
    SelectedFile,
    // Prediction
    Diagnosis, PredictionResult,
    // UI
    UiState, PanelVisibility,
    // Errors
    AppError, AppResult,
};

// Controller
pub use controller::{AnalyzeController, Completion, ControllerView, Loader};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// WASM entry point - called automatically by trunk.
#[wasm_bindgen(start)]
pub fn main() {
    // Setup panic hook for better error messages
    console_error_panic_hook::set_once();

    // Setup console logging
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🧠 NeuroScan - Starting Leptos App");

    // Mount the application
    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="NeuroScan - Brain MRI Classifier"/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    view! {
        <div class="container">
            <Hero/>
            <AnalyzeSection/>
        </div>

        <Footer/>
    }
}
