//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! byte stream
//!     → parser.rs (line reading, orchestration)
//!     → request_line.rs (method.rs → target → version.rs)
//!     → header.rs (name: value fields)
//!     → request.rs (validated Request) | error.rs (ParseError → status.rs)
//!     → response.rs (status-only reply)
//! ```

pub mod error;
pub mod header;
pub mod method;
pub mod parser;
pub mod request;
pub mod request_line;
pub mod response;
pub mod server;
pub mod status;
pub mod version;

pub use error::ParseError;
pub use header::HeaderField;
pub use method::Method;
pub use parser::RequestParser;
pub use request::Request;
pub use request_line::RequestLine;
pub use server::HttpServer;
pub use status::{StatusCategory, StatusCode};
pub use version::HttpVersion;
