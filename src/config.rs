use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "Medplan";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the planner service base URL.
pub const API_BASE_ENV: &str = "MEDPLAN_API_BASE";
/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_ENV: &str = "MEDPLAN_TIMEOUT_SECS";

const DEFAULT_API_BASE: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "medplan=info,medplan_lib=info,warn"
}

/// Connection settings for the external planner service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl ClientConfig {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
        }
    }

    /// Read `MEDPLAN_API_BASE` / `MEDPLAN_TIMEOUT_SECS`, falling back to a
    /// local service on port 8000 with a 20s timeout.
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var(API_BASE_ENV).ok(),
            std::env::var(TIMEOUT_ENV).ok(),
        )
    }

    fn from_values(base: Option<String>, timeout: Option<String>) -> Self {
        let base = base
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let timeout_secs = match timeout.as_deref().map(str::trim) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    tracing::warn!(value = raw, "Ignoring invalid {TIMEOUT_ENV}");
                    DEFAULT_TIMEOUT_SECS
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        Self::new(&base, timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECS)
    }
}
