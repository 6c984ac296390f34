pub mod config;
pub mod models;
pub mod pipeline;
pub mod intelligence;
pub mod store;
pub mod chat;
pub mod session;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the embedding application.
///
/// Respects `RUST_LOG` when set, otherwise falls back to the crate-scoped
/// default filter. Safe to call once at startup.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("Aftercare starting v{}", config::APP_VERSION);
}
