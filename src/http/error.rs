//! Parse failures.
//!
//! Every variant maps to exactly one [`StatusCode`]; the mapping is total and
//! lives in [`ParseError::status`].

use thiserror::Error;

use crate::http::StatusCode;

/// Why a request could not be parsed.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("empty request line")]
    EmptyRequestLine,

    #[error("request line has {found} fields, expected 3")]
    InvalidItemCount { found: usize },

    #[error("carriage return not followed by line feed")]
    BareCarriageReturn,

    #[error("line feed not preceded by carriage return")]
    BareLineFeed,

    #[error("line exceeds {limit} bytes")]
    LineTooLong { limit: usize },

    #[error("line is not valid ASCII text")]
    InvalidEncoding,

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("unknown method: {0:?}")]
    UnknownMethod(String),

    #[error("empty request target")]
    EmptyTarget,

    #[error("malformed HTTP version: {0:?}")]
    MalformedVersion(String),

    #[error("unsupported HTTP version: {0:?}")]
    UnsupportedVersion(String),

    #[error("malformed header line: {0:?}")]
    MalformedHeader(String),

    #[error("more than {limit} header fields")]
    TooManyHeaders { limit: usize },

    #[error("read error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// The status a response to this failure carries.
    pub fn status(&self) -> StatusCode {
        match self {
            ParseError::EmptyRequestLine
            | ParseError::InvalidItemCount { .. }
            | ParseError::BareCarriageReturn
            | ParseError::BareLineFeed
            | ParseError::LineTooLong { .. }
            | ParseError::InvalidEncoding
            | ParseError::UnexpectedEof
            | ParseError::MalformedVersion(_)
            | ParseError::MalformedHeader(_)
            | ParseError::TooManyHeaders { .. } => StatusCode::BadRequest,
            ParseError::EmptyTarget | ParseError::Io(_) => StatusCode::InternalServerError,
            ParseError::UnknownMethod(_) => StatusCode::NotImplemented,
            ParseError::UnsupportedVersion(_) => StatusCode::HttpVersionNotSupported,
        }
    }
}
