pub mod cli;
pub mod client; // Planner service HTTP client
pub mod config;
pub mod interactions; // Rule table, pair classifier, pairwise scan
pub mod label_hints;
pub mod models;
pub mod planner; // Local dosing plan
pub mod schedule; // Frequency → time slots
pub mod session;

use tracing_subscriber::EnvFilter;

/// Initialize tracing. `RUST_LOG` wins over the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();
}
