//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Level comes from config; `RUST_LOG` overrides it when set
//! - An unknown level is an error even when `RUST_LOG` is set

use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log level: {0:?}")]
    Level(String),

    #[error("Invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("Failed to install subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Filter for this crate at `level`, ignoring the environment.
pub fn level_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    let level: LevelFilter = level
        .parse()
        .map_err(|_| LoggingError::Level(level.to_string()))?;
    Ok(EnvFilter::try_new(format!("http_front={level}"))?)
}

/// Build the filter: `RUST_LOG` if present, else `http_front=<level>`.
pub fn env_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    let fallback = level_filter(level)?;
    Ok(EnvFilter::try_from_default_env().unwrap_or(fallback))
}

/// Install the global subscriber.
///
/// Fails on an unknown level or if a subscriber is already installed.
pub fn init(level: &str) -> Result<(), LoggingError> {
    tracing_subscriber::registry()
        .with(env_filter(level)?)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_filter() {
        let filter = level_filter("debug").unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));

        assert!(level_filter("OFF").is_ok());
    }

    #[test]
    fn test_unknown_level_fails() {
        let err = level_filter("verbose").unwrap_err();
        assert!(matches!(err, LoggingError::Level(ref level) if level == "verbose"));
        assert_eq!(err.to_string(), "Invalid log level: \"verbose\"");

        assert!(matches!(env_filter("verbose"), Err(LoggingError::Level(_))));
        assert!(matches!(init("verbose"), Err(LoggingError::Level(_))));
    }
}
