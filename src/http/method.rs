//! Request method registry.
//!
//! # Design Decisions
//! - Closed set: only methods the server can answer without a body
//! - Matching is exact and case-sensitive (`GeT` is not `GET`)
//! - `MAX_LENGTH` is derived from the variant table at compile time

use crate::http::error::ParseError;

/// A recognized request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Head,
}

impl Method {
    /// Every recognized method, in lookup order.
    pub const ALL: [Method; 2] = [Method::Get, Method::Head];

    /// Length of the longest method name.
    pub const MAX_LENGTH: usize = max_name_length(&Self::ALL);

    /// Resolve a request-line token to a method.
    pub fn from_token(token: &str) -> Result<Self, ParseError> {
        if token.len() <= Self::MAX_LENGTH {
            if let Some(method) = Self::ALL.iter().find(|m| m.as_str() == token) {
                return Ok(*method);
            }
        }
        Err(ParseError::UnknownMethod(token.to_string()))
    }

    /// The method's wire name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
        }
    }
}

const fn max_name_length(methods: &[Method]) -> usize {
    let mut max = 0;
    let mut i = 0;
    while i < methods.len() {
        let len = methods[i].as_str().len();
        if len > max {
            max = len;
        }
        i += 1;
    }
    max
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::StatusCode;

    #[test]
    fn test_from_token_exact() {
        assert_eq!(Method::from_token("GET").unwrap(), Method::Get);
        assert_eq!(Method::from_token("HEAD").unwrap(), Method::Head);
    }

    #[test]
    fn test_from_token_case_sensitive() {
        for token in ["GeT", "get", "head", "Head"] {
            let err = Method::from_token(token).unwrap_err();
            assert_eq!(err.status(), StatusCode::NotImplemented, "token {token:?}");
        }
    }

    #[test]
    fn test_from_token_rejects_prefixes_and_extensions() {
        for token in ["", "G", "GE", "GETTTTTT", "HEADER", " GET", "GET ", "POST", "DELETE"] {
            let err = Method::from_token(token).unwrap_err();
            assert_eq!(err.status(), StatusCode::NotImplemented, "token {token:?}");
        }
    }

    #[test]
    fn test_max_length() {
        assert_eq!(Method::MAX_LENGTH, 4);
        assert!(Method::ALL.iter().all(|m| m.as_str().len() <= Method::MAX_LENGTH));
    }

    #[test]
    fn test_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Head.to_string(), "HEAD");
    }
}
