//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files, and
//! every section has defaults so a minimal (even empty) file is valid.

use serde::{Deserialize, Serialize};

/// Root server configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address, connection cap).
    pub listener: ListenerConfig,

    /// Request parser limits.
    pub parser: ParserConfig,

    /// Socket timeouts.
    pub timeouts: TimeoutConfig,

    /// Directory the response layer serves from.
    pub webroot: WebRoot,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,

    /// Maximum concurrent connections (backpressure).
    ///
    /// Each connection parses on tokio's blocking pool, so this is capped at
    /// that pool's default size of 512 threads.
    pub max_connections: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            max_connections: 512,
        }
    }
}

/// Limits applied while reading a request head.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ParserConfig {
    /// Longest accepted line, terminator excluded.
    pub max_line_length: usize,

    /// Most header fields accepted per request.
    pub max_headers: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_line_length: 8192,
            max_headers: 100,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Socket read timeout in seconds while a request head is being read.
    pub read_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { read_secs: 30 }
    }
}

/// Path of the served directory.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(transparent)]
pub struct WebRoot(pub String);

impl Default for WebRoot {
    fn default() -> Self {
        Self(".".to_string())
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
