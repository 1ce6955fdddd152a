//! Status taxonomy.

/// Broad class of a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    Success,
    ClientError,
    ServerError,
}

/// Every outcome a request can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    Ok,
    BadRequest,
    InternalServerError,
    NotImplemented,
    HttpVersionNotSupported,
}

impl StatusCode {
    pub const ALL: [StatusCode; 5] = [
        StatusCode::Ok,
        StatusCode::BadRequest,
        StatusCode::InternalServerError,
        StatusCode::NotImplemented,
        StatusCode::HttpVersionNotSupported,
    ];

    /// Numeric status code.
    pub const fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::InternalServerError => 500,
            StatusCode::NotImplemented => 501,
            StatusCode::HttpVersionNotSupported => 505,
        }
    }

    /// Canonical reason phrase.
    pub const fn reason(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::NotImplemented => "Not Implemented",
            StatusCode::HttpVersionNotSupported => "HTTP Version Not Supported",
        }
    }

    pub const fn category(&self) -> StatusCategory {
        match self.as_u16() {
            400..=499 => StatusCategory::ClientError,
            500..=599 => StatusCategory::ServerError,
            _ => StatusCategory::Success,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.category() == StatusCategory::ClientError
    }

    pub fn is_server_error(&self) -> bool {
        self.category() == StatusCategory::ServerError
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason())
    }
}
