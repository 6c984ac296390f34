/// Application-level constants
pub const APP_NAME: &str = "Aftercare";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Only discharge summaries in PDF form are accepted for upload.
pub const ACCEPTED_MEDIA_TYPE: &str = "application/pdf";

/// Upload size ceiling: 10 MB.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Readmission window the predictive service is trained on.
pub const READMISSION_WINDOW_DAYS: u32 = 30;

/// Request timeout for the remote predictive service, in seconds.
pub const PREDICTION_TIMEOUT_SECS: u64 = 30;

/// Base URL of the remote predictive service.
/// `AFTERCARE_PREDICTION_URL` overrides the local default.
pub fn prediction_service_url() -> String {
    std::env::var("AFTERCARE_PREDICTION_URL")
        .unwrap_or_else(|_| "http://localhost:5000".to_string())
}

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    format!("{}=info", env!("CARGO_PKG_NAME"))
}
