//! HTTP/1.x request front end: request-line and header parsing with a
//! minimal connection server around it.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;

pub use config::{ConfigStore, ServerConfig};
pub use http::{HttpServer, HttpVersion, Method, ParseError, Request, RequestParser, StatusCode};
pub use lifecycle::Shutdown;
