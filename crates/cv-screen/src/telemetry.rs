//! Structured logging for the screening pipeline.
//!
//! Pipeline stages log through `tracing`; this module only decides where those events go.
//! Logs are written to stderr so JSON and CSV output on stdout stays clean.

use std::fmt;

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

use crate::config::TelemetryConfig;

#[derive(Debug)]
pub enum TelemetryError {
    InvalidFilter { directive: String, source: ParseError },
    AlreadyInstalled(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::InvalidFilter { directive, .. } => {
                write!(f, "log filter '{directive}' is not a valid directive")
            }
            TelemetryError::AlreadyInstalled(err) => {
                write!(f, "a log subscriber is already installed: {err}")
            }
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::InvalidFilter { source, .. } => Some(source),
            TelemetryError::AlreadyInstalled(err) => Some(&**err),
        }
    }
}

/// Filter directives in effect: `RUST_LOG` when set and valid, else `APP_LOG_LEVEL`.
fn log_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.log_level).map_err(|source| TelemetryError::InvalidFilter {
        directive: config.log_level.clone(),
        source,
    })
}

/// Installs the process-wide subscriber. Fails if one is already installed.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = log_filter(config)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::AlreadyInstalled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn config(level: &str) -> TelemetryConfig {
        TelemetryConfig {
            log_level: level.to_string(),
        }
    }

    #[test]
    fn configured_level_applies_without_rust_log() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        env::remove_var("RUST_LOG");

        let filter = log_filter(&config("cv_screen=debug")).expect("directive parses");
        assert_eq!(filter.to_string(), "cv_screen=debug");
    }

    #[test]
    fn rust_log_overrides_configured_level() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        env::set_var("RUST_LOG", "warn");

        let filter = log_filter(&config("cv_screen=notalevel"));
        env::remove_var("RUST_LOG");

        assert_eq!(filter.expect("RUST_LOG wins").to_string(), "warn");
    }

    #[test]
    fn rejects_unparseable_level() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        env::remove_var("RUST_LOG");

        match init(&config("cv_screen=notalevel")) {
            Err(TelemetryError::InvalidFilter { directive, .. }) => {
                assert_eq!(directive, "cv_screen=notalevel")
            }
            other => panic!("expected invalid filter, got {other:?}"),
        }
    }

    #[test]
    fn second_install_is_reported() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        env::remove_var("RUST_LOG");

        let _ = init(&config("info"));
        let err = init(&config("info")).expect_err("subscriber already installed");
        assert!(matches!(err, TelemetryError::AlreadyInstalled(_)));
        assert!(err.to_string().starts_with("a log subscriber is already installed"));
    }
}
