//! Minimal HTTP/1.1 responses.

use std::fmt;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Response status the server can send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    BadRequest,
    InternalServerError,
}

impl Status {
    /// Numeric status code.
    pub fn code(&self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::BadRequest => 400,
            Status::InternalServerError => 500,
        }
    }

    /// Reason phrase.
    pub fn reason(&self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::BadRequest => "Bad Request",
            Status::InternalServerError => "Internal Server Error",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.reason())
    }
}

/// A plain-text response that always closes the connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: Status,
    pub body: String,
}

impl Response {
    /// Create a response with an explicit body.
    pub fn new(status: Status, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// `200 OK` with `body`.
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(Status::Ok, body)
    }

    /// `400 Bad Request`.
    pub fn bad_request() -> Self {
        Self::new(Status::BadRequest, Status::BadRequest.reason())
    }

    /// `500 Internal Server Error`. Error details never go in the body.
    pub fn internal_error() -> Self {
        Self::new(
            Status::InternalServerError,
            Status::InternalServerError.reason(),
        )
    }

    /// Serialize status line, the fixed headers and the body.
    pub fn to_bytes(&self) -> Vec<u8> {
        let head = format!(
            "HTTP/1.1 {}\r\n\
             Connection: close\r\n\
             Content-Length: {}\r\n\
             Access-Control-Allow-Origin: *\r\n\
             Content-Type: text/plain\r\n\
             \r\n",
            self.status,
            self.body.len()
        );

        let mut bytes = Vec::with_capacity(head.len() + self.body.len());
        bytes.extend_from_slice(head.as_bytes());
        bytes.extend_from_slice(self.body.as_bytes());
        bytes
    }

    /// Write the whole response. A short write surfaces as an error.
    pub async fn write_to<W>(&self, writer: &mut W) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        writer.write_all(&self.to_bytes()).await?;
        writer.flush().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_wire_format() {
        let bytes = Response::ok("merlin").to_bytes();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "HTTP/1.1 200 OK\r\n\
             Connection: close\r\n\
             Content-Length: 6\r\n\
             Access-Control-Allow-Origin: *\r\n\
             Content-Type: text/plain\r\n\
             \r\n\
             merlin"
        );
    }

    #[test]
    fn test_content_length_counts_bytes() {
        let response = Response::ok("Ryzen™ 7");
        let text = String::from_utf8(response.to_bytes()).unwrap();
        assert!(text.contains(&format!("Content-Length: {}\r\n", "Ryzen™ 7".len())));
        assert_ne!("Ryzen™ 7".len(), "Ryzen™ 7".chars().count());
    }

    #[test]
    fn test_error_bodies() {
        assert_eq!(Response::bad_request().body, "Bad Request");
        assert_eq!(Response::internal_error().body, "Internal Server Error");
        assert_eq!(
            Response::internal_error().status.to_string(),
            "500 Internal Server Error"
        );
    }

    #[test]
    fn test_empty_body() {
        let text = String::from_utf8(Response::ok("").to_bytes()).unwrap();
        assert!(text.ends_with("Content-Length: 0\r\nAccess-Control-Allow-Origin: *\r\nContent-Type: text/plain\r\n\r\n"));
    }

    #[tokio::test]
    async fn test_write_to_buffer() {
        let mut out: Vec<u8> = Vec::new();
        Response::bad_request().write_to(&mut out).await.unwrap();
        assert!(out.starts_with(b"HTTP/1.1 400 Bad Request\r\n"));
        assert!(out.ends_with(b"\r\n\r\nBad Request"));
    }
}
