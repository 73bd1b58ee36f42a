//! Application configuration.
//!
//! Centralized configuration for the NeuroScan frontend. The UI is served
//! by the same origin as the prediction endpoint, so the endpoint is a
//! relative path.

/// Prediction endpoint (multipart `POST`).
pub const PREDICT_ENDPOINT: &str = "/predict";

/// Multipart field name carrying the image.
pub const UPLOAD_FIELD: &str = "file";

/// File types offered by the picker.
pub const ACCEPTED_TYPES: &str = ".jpg,.jpeg,.png";

/// Shown when the server rejects an image without saying why.
/// Mirrored by `DEFAULT_INVALID_IMAGE` in `backend/src/api/types.rs`.
pub const DEFAULT_INVALID_IMAGE: &str = "Invalid image. Please upload a valid MRI scan.";

/// Total duration of the confidence count-up, in milliseconds.
pub const CONFIDENCE_ANIMATION_MS: u32 = 1500;

/// Tick interval of the confidence count-up, in milliseconds.
pub const CONFIDENCE_TICK_MS: u32 = 16;

/// Delay before the result panel gets its `visible` class, so the CSS
/// transition has a starting frame.
pub const PANEL_REVEAL_DELAY_MS: u32 = 50;

/// Lottie animation played while a request is in flight.
pub const LOADER_ANIMATION_URL: &str = "https://assets4.lottiefiles.com/packages/lf20_vf3krn3j.json";

/// DOM id of the loader container.
pub const LOADER_CONTAINER_ID: &str = "loaderContainer";

/// DOM id of the hidden file input.
pub const FILE_INPUT_ID: &str = "fileInput";

/// Status line texts.
pub mod status {
    pub const IDLE: &str = "Upload an MRI scan to begin.";
    pub const READY: &str = "Ready to analyze.";
    pub const ANALYZING: &str = "Analyzing image...";
    pub const COMPLETE: &str = "Analysis complete.";
    pub const REJECTED: &str = "Upload a valid MRI scan.";
    pub const TRANSPORT_FAILED: &str = "Error during analysis.";
    pub const SELECTION_REFUSED: &str =
        "That file arrived during an analysis and was not used. Select it again.";
}
