//! Configuration
//!
//! # Environment variables
//!
//! All keys can be overridden through the environment:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | VERIFICATION_CODE | (unset) | Shared secret gating bill edit/delete |
//! | STORE_TIMEOUT_MS | 5000 | Per-call timeout for the persistence collaborator |
//! | LOG_LEVEL | info | Tracing level |
//! | LOG_DIR | (unset) | Daily-rolling log file directory |
//!
//! The verification code is operational configuration, never a literal
//! in service logic. Leaving it unset disables the gated operations
//! entirely rather than falling back to a built-in value.

#[derive(Debug, Clone)]
pub struct Config {
    /// Shared secret for the bill edit/delete gate; `None` denies all
    pub verification_code: Option<String>,
    /// Timeout applied to every store call (milliseconds)
    pub store_timeout_ms: u64,
    /// Tracing level: trace | debug | info | warn | error
    pub log_level: String,
    /// Log file directory; stdout only when unset
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from the environment, with defaults.
    pub fn from_env() -> Self {
        Self {
            verification_code: std::env::var("VERIFICATION_CODE")
                .ok()
                .filter(|v| !v.is_empty()),
            store_timeout_ms: std::env::var("STORE_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    /// Load a `.env` file if present, then read the environment.
    pub fn load() -> Self {
        dotenv::dotenv().ok();
        Self::from_env()
    }

    /// Fixed configuration for tests: supplied code, short timeouts.
    pub fn for_tests(verification_code: impl Into<String>) -> Self {
        Self {
            verification_code: Some(verification_code.into()),
            store_timeout_ms: 1000,
            log_level: "debug".into(),
            log_dir: None,
        }
    }
}
