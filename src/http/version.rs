//! HTTP version resolution.
//!
//! # Responsibilities
//! - Validate the literal `HTTP/<digit>.<digit>` form of a version token
//! - Pick the best supported version for what the client asked for
//!
//! # Design Decisions
//! - Downgrade within a major family: `HTTP/1.2` is served as `HTTP/1.1`
//! - An unknown major version, or one older than anything supported, is
//!   rejected rather than guessed at
//! - Comparison is on `(major, minor)` integers, never on strings

use crate::http::error::ParseError;

/// A protocol version the server can speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HttpVersion {
    Http10,
    Http11,
}

impl HttpVersion {
    /// Supported versions, oldest first.
    pub const SUPPORTED: [HttpVersion; 2] = [HttpVersion::Http10, HttpVersion::Http11];

    /// The version's literal form, e.g. `HTTP/1.1`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            HttpVersion::Http10 => "HTTP/1.0",
            HttpVersion::Http11 => "HTTP/1.1",
        }
    }

    pub const fn major(&self) -> u8 {
        match self {
            HttpVersion::Http10 | HttpVersion::Http11 => 1,
        }
    }

    pub const fn minor(&self) -> u8 {
        match self {
            HttpVersion::Http10 => 0,
            HttpVersion::Http11 => 1,
        }
    }

    /// Resolve a raw version token to the highest supported version of the
    /// same major number that does not exceed the requested one.
    pub fn resolve(token: &str) -> Result<Self, ParseError> {
        let (major, minor) = parse_literal(token)
            .ok_or_else(|| ParseError::MalformedVersion(token.to_string()))?;

        Self::SUPPORTED
            .iter()
            .rev()
            .find(|v| v.major() == major && v.minor() <= minor)
            .copied()
            .ok_or_else(|| ParseError::UnsupportedVersion(token.to_string()))
    }
}

/// Split `HTTP/<d>.<d>` into its two digits.
fn parse_literal(token: &str) -> Option<(u8, u8)> {
    match token.as_bytes() {
        [b'H', b'T', b'T', b'P', b'/', major, b'.', minor]
            if major.is_ascii_digit() && minor.is_ascii_digit() =>
        {
            Some((major - b'0', minor - b'0'))
        }
        _ => None,
    }
}

impl std::fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
