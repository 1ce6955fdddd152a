//! Header field lines.
//!
//! Values are opaque: no folding, no continuation lines, no interpretation.

use crate::http::error::ParseError;

/// One `name: value` header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderField {
    name: String,
    value: String,
}

impl HeaderField {
    /// Parse a single header line (CRLF already stripped).
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let Some((name, value)) = line.split_once(':') else {
            return Err(ParseError::MalformedHeader(line.to_string()));
        };

        if name.is_empty() || name.bytes().any(|b| b.is_ascii_whitespace()) {
            return Err(ParseError::MalformedHeader(line.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            value: value.trim_matches(|c| c == ' ' || c == '\t').to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Case-insensitive name comparison.
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}
