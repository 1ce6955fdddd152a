//! Request parser.
//!
//! # Data Flow
//! ```text
//! START
//!     → READ_REQUEST_LINE (CRLF-terminated, bounded)
//!     → request_line.rs (shape → method → target → version)
//!     → READ_HEADERS (until empty line or end of input)
//!     → DONE(Request)
//!
//! Any step may end in FAILED(ParseError); nothing after it is read.
//! ```
//!
//! # Design Decisions
//! - Single pass over a `BufRead`, consuming one byte at a time so bytes
//!   past the failure point (or past the header block) stay unread
//! - Lines must end in CRLF; a lone CR or lone LF is rejected
//! - Limits come from `ParserConfig`, passed in at construction

use std::io::{self, BufRead};

use crate::config::ParserConfig;
use crate::http::error::ParseError;
use crate::http::header::HeaderField;
use crate::http::request::Request;
use crate::http::request_line::RequestLine;

/// Parses request heads off a byte stream.
///
/// Holds only immutable limits, so one parser can be shared by every
/// connection.
#[derive(Debug, Clone)]
pub struct RequestParser {
    max_line_length: usize,
    max_headers: usize,
}

impl RequestParser {
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            max_line_length: config.max_line_length,
            max_headers: config.max_headers,
        }
    }

    /// Parse one request head from `reader`.
    pub fn parse<R: BufRead>(&self, reader: &mut R) -> Result<Request, ParseError> {
        match self.parse_head(reader) {
            Ok(request) => {
                tracing::trace!(
                    method = %request.method(),
                    target = %request.target(),
                    version = %request.version(),
                    headers = request.headers().len(),
                    "Request parsed"
                );
                Ok(request)
            }
            Err(e) => {
                tracing::debug!(error = %e, status = e.status().as_u16(), "Request rejected");
                Err(e)
            }
        }
    }

    fn parse_head<R: BufRead>(&self, reader: &mut R) -> Result<Request, ParseError> {
        let mut lines = LineReader::new(reader, self.max_line_length);

        let line = lines.next_line()?.ok_or(ParseError::UnexpectedEof)?;
        let mut request = Request::from_line(RequestLine::parse(line)?);

        while let Some(line) = lines.next_line()? {
            if line.is_empty() {
                break;
            }
            if request.headers().len() >= self.max_headers {
                return Err(ParseError::TooManyHeaders { limit: self.max_headers });
            }
            request.push_header(HeaderField::parse(line)?);
        }

        Ok(request)
    }
}

impl Default for RequestParser {
    fn default() -> Self {
        Self::new(&ParserConfig::default())
    }
}

/// Strict CRLF line reader.
struct LineReader<'r, R> {
    reader: &'r mut R,
    limit: usize,
    buf: Vec<u8>,
}

impl<'r, R: BufRead> LineReader<'r, R> {
    fn new(reader: &'r mut R, limit: usize) -> Self {
        Self {
            reader,
            limit,
            buf: Vec::new(),
        }
    }

    /// Next line without its terminator, or `None` at a clean end of input.
    fn next_line(&mut self) -> Result<Option<&str>, ParseError> {
        self.buf.clear();
        loop {
            match self.next_byte()? {
                None if self.buf.is_empty() => return Ok(None),
                None => return Err(ParseError::UnexpectedEof),
                Some(b'\r') => match self.next_byte()? {
                    Some(b'\n') => break,
                    _ => return Err(ParseError::BareCarriageReturn),
                },
                Some(b'\n') => return Err(ParseError::BareLineFeed),
                Some(byte) => {
                    if self.buf.len() >= self.limit {
                        return Err(ParseError::LineTooLong { limit: self.limit });
                    }
                    self.buf.push(byte);
                }
            }
        }

        let line = std::str::from_utf8(&self.buf).map_err(|_| ParseError::InvalidEncoding)?;
        if !line.is_ascii() {
            return Err(ParseError::InvalidEncoding);
        }
        Ok(Some(line))
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            let byte = match self.reader.fill_buf() {
                Ok(available) => available.first().copied(),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if byte.is_some() {
                self.reader.consume(1);
            }
            return Ok(byte);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpVersion, Method, StatusCode};
    use std::io::{BufReader, Cursor, Read};

    fn parse(raw: &str) -> Result<Request, ParseError> {
        RequestParser::default().parse(&mut Cursor::new(raw.as_bytes()))
    }

    fn status_of(raw: &str) -> StatusCode {
        parse(raw).unwrap_err().status()
    }

    #[test]
    fn test_parse_get() {
        let request = parse("GET / HTTP/1.1\r\nHost: localhost\r\n\r\n").unwrap();
        assert_eq!(request.method(), Method::Get);
        assert_eq!(request.target(), "/");
        assert_eq!(request.original_version(), "HTTP/1.1");
        assert_eq!(request.version(), HttpVersion::Http11);
        assert_eq!(request.header("host"), Some("localhost"));
    }

    #[test]
    fn test_headers_without_terminator() {
        let request = parse("HEAD /x HTTP/1.0\r\nHost: a\r\nAccept: */*\r\n").unwrap();
        assert_eq!(request.method(), Method::Head);
        assert_eq!(request.version(), HttpVersion::Http10);
        assert_eq!(request.headers().len(), 2);
    }

    #[test]
    fn test_no_headers() {
        let request = parse("GET /a HTTP/1.1\r\n\r\n").unwrap();
        assert!(request.headers().is_empty());
    }

    #[test]
    fn test_stops_after_header_block() {
        let mut input = Cursor::new(b"GET / HTTP/1.1\r\nHost: a\r\n\r\nBODY".to_vec());
        RequestParser::default().parse(&mut input).unwrap();
        let mut rest = String::new();
        input.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "BODY");
    }

    #[test]
    fn test_failure_leaves_rest_unread() {
        let mut input = Cursor::new(b"GET / HTTP/1.1\rXYZ".to_vec());
        let err = RequestParser::default().parse(&mut input).unwrap_err();
        assert!(matches!(err, ParseError::BareCarriageReturn));
        let mut rest = String::new();
        input.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "YZ");
    }

    #[test]
    fn test_bare_carriage_return() {
        assert_eq!(status_of("GET / HTTP/1.1\rHost: localhost\r\n"), StatusCode::BadRequest);
        assert_eq!(status_of("GET / HTTP/1.1\r"), StatusCode::BadRequest);
    }

    #[test]
    fn test_bare_line_feed() {
        assert!(matches!(parse("GET / HTTP/1.1\nHost: a\r\n"), Err(ParseError::BareLineFeed)));
        assert!(matches!(parse("GET / HTTP/1.1\r\nHost: a\n"), Err(ParseError::BareLineFeed)));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(parse(""), Err(ParseError::UnexpectedEof)));
        assert!(matches!(parse("GET / HTTP/1.1"), Err(ParseError::UnexpectedEof)));
        assert!(matches!(parse("GET / HTTP/1.1\r\nHost: a"), Err(ParseError::UnexpectedEof)));
    }

    #[test]
    fn test_empty_request_line() {
        assert!(matches!(parse("\r\nHost: a\r\n"), Err(ParseError::EmptyRequestLine)));
    }

    #[test]
    fn test_line_too_long() {
        let parser = RequestParser::new(&ParserConfig {
            max_line_length: 16,
            max_headers: 4,
        });
        let mut input = Cursor::new(b"GET /this/is/too/long HTTP/1.1\r\n\r\n".to_vec());
        let err = parser.parse(&mut input).unwrap_err();
        assert!(matches!(err, ParseError::LineTooLong { limit: 16 }));
        assert_eq!(err.status(), StatusCode::BadRequest);
    }

    #[test]
    fn test_too_many_headers() {
        let parser = RequestParser::new(&ParserConfig {
            max_line_length: 64,
            max_headers: 2,
        });
        let raw = b"GET / HTTP/1.1\r\nA: 1\r\nB: 2\r\nC: 3\r\n\r\n";
        let err = parser.parse(&mut Cursor::new(raw.to_vec())).unwrap_err();
        assert!(matches!(err, ParseError::TooManyHeaders { limit: 2 }));
    }

    #[test]
    fn test_non_ascii() {
        let raw = "GET /caf\u{e9} HTTP/1.1\r\n\r\n";
        assert!(matches!(parse(raw), Err(ParseError::InvalidEncoding)));
    }

    #[test]
    fn test_invalid_utf8() {
        let inputs: [&[u8]; 2] = [b"GET /\xff HTTP/1.1\r\n\r\n", b"GET / HTTP/1.1\r\nX-Name: \xc3\r\n\r\n"];
        for raw in inputs {
            let result = RequestParser::default().parse(&mut Cursor::new(raw));
            assert!(matches!(result, Err(ParseError::InvalidEncoding)), "input {raw:?}");
        }
    }

    #[test]
    fn test_malformed_header() {
        assert_eq!(status_of("GET / HTTP/1.1\r\nnot a header\r\n\r\n"), StatusCode::BadRequest);
    }

    #[test]
    fn test_small_buffer_reader() {
        let raw: &[u8] = b"GET /path HTTP/1.1\r\nHost: localhost\r\n\r\n";
        let mut reader = BufReader::with_capacity(1, raw);
        let request = RequestParser::default().parse(&mut reader).unwrap();
        assert_eq!(request.target(), "/path");
        assert_eq!(request.header("Host"), Some("localhost"));
    }

    #[test]
    fn test_read_error_propagates() {
        struct Failing;
        impl Read for Failing {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
            }
        }
        let err = RequestParser::default().parse(&mut BufReader::new(Failing)).unwrap_err();
        assert!(matches!(err, ParseError::Io(_)));
        assert_eq!(err.status(), StatusCode::InternalServerError);
    }
}
