//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (limits > 0, address parses, level parses)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::config::schema::ServerConfig;

/// Shortest request line that can ever be valid: `GET / HTTP/1.1`.
pub const MIN_LINE_LENGTH: usize = 14;

/// Each live connection holds one thread of tokio's blocking pool, which
/// defaults to 512 threads.
pub const MAX_CONNECTIONS: usize = 512;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    BindAddress(String),

    #[error("listener.max_connections must be between 1 and 512, got {0}")]
    MaxConnections(usize),

    #[error("parser.max_line_length must be at least 14, got {0}")]
    MaxLineLength(usize),

    #[error("parser.max_headers must be greater than 0")]
    MaxHeaders,

    #[error("timeouts.read_secs must be greater than 0")]
    ReadTimeout,

    #[error("webroot must not be empty")]
    EmptyWebRoot,

    #[error("observability.log_level {0:?} is not a log level")]
    LogLevel(String),
}

/// Check every semantic constraint, collecting all violations.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }
    if !(1..=MAX_CONNECTIONS).contains(&config.listener.max_connections) {
        errors.push(ValidationError::MaxConnections(config.listener.max_connections));
    }
    if config.parser.max_line_length < MIN_LINE_LENGTH {
        errors.push(ValidationError::MaxLineLength(config.parser.max_line_length));
    }
    if config.parser.max_headers == 0 {
        errors.push(ValidationError::MaxHeaders);
    }
    if config.timeouts.read_secs == 0 {
        errors.push(ValidationError::ReadTimeout);
    }
    if config.webroot.0.trim().is_empty() {
        errors.push(ValidationError::EmptyWebRoot);
    }
    if config.observability.log_level.parse::<LevelFilter>().is_err() {
        errors.push(ValidationError::LogLevel(config.observability.log_level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
