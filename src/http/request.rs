//! Parsed request representation.
//!
//! # Design Decisions
//! - Only the parser constructs a `Request`; callers get it fully populated
//! - The version text is kept verbatim next to the resolved version
//! - Header order is preserved; lookups are case-insensitive

use crate::http::header::HeaderField;
use crate::http::request_line::RequestLine;
use crate::http::{HttpVersion, Method};

/// A validated request head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    target: String,
    original_version: String,
    version: HttpVersion,
    headers: Vec<HeaderField>,
}

impl Request {
    pub(crate) fn from_line(line: RequestLine<'_>) -> Self {
        Self {
            method: line.method,
            target: line.target.to_string(),
            original_version: line.original_version.to_string(),
            version: line.version,
            headers: Vec::new(),
        }
    }

    pub(crate) fn push_header(&mut self, field: HeaderField) {
        self.headers.push(field);
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// The request target exactly as sent.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The version token exactly as sent, e.g. `HTTP/1.2`.
    pub fn original_version(&self) -> &str {
        &self.original_version
    }

    /// The best supported version for this request.
    pub fn version(&self) -> HttpVersion {
        self.version
    }

    pub fn headers(&self) -> &[HeaderField] {
        &self.headers
    }

    /// Value of the first header with the given name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|h| h.is(name)).map(HeaderField::value)
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.header(name).is_some()
    }
}
