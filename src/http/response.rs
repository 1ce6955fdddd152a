//! Status-only replies.
//!
//! # Responsibilities
//! - Turn a `StatusCode` into a complete, body-less HTTP/1.1 reply
//!
//! # Design Decisions
//! - Every reply closes the connection (no keep-alive)
//! - Always answers as HTTP/1.1, the highest version supported

use std::io::{self, Write};

use crate::http::{HttpVersion, StatusCode};

/// Render the reply head for `status`.
pub fn status_head(status: StatusCode) -> String {
    format!(
        "{} {} {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        HttpVersion::Http11,
        status.as_u16(),
        status.reason()
    )
}

/// Write a status-only reply and flush it.
pub fn write_status<W: Write>(writer: &mut W, status: StatusCode) -> io::Result<()> {
    writer.write_all(status_head(status).as_bytes())?;
    writer.flush()
}
