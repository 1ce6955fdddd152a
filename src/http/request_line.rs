//! Request line grammar: `METHOD SP TARGET SP VERSION`.
//!
//! # Design Decisions
//! - Input is one line with its CRLF already verified and stripped
//! - Checks run in a fixed order: shape, method, target, version
//! - Exactly three fields; a target containing a space is rejected

use crate::http::error::ParseError;
use crate::http::{HttpVersion, Method};

/// A validated request line, borrowing the target and version text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine<'a> {
    pub method: Method,
    pub target: &'a str,
    pub original_version: &'a str,
    pub version: HttpVersion,
}

impl<'a> RequestLine<'a> {
    pub fn parse(line: &'a str) -> Result<Self, ParseError> {
        if line.is_empty() {
            return Err(ParseError::EmptyRequestLine);
        }

        let fields: Vec<&str> = line.split(' ').collect();
        let &[method, target, version] = fields.as_slice() else {
            return Err(ParseError::InvalidItemCount { found: fields.len() });
        };

        let method = Method::from_token(method)?;
        if target.is_empty() {
            return Err(ParseError::EmptyTarget);
        }
        let resolved = HttpVersion::resolve(version)?;

        Ok(Self {
            method,
            target,
            original_version: version,
            version: resolved,
        })
    }
}
