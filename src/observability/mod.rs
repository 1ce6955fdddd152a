//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (structured fields: connection_id, peer_addr, status)
//!
//! Consumers:
//!     → logging.rs subscriber (stdout)
//! ```

pub mod logging;
