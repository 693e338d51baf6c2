//! HTTP request and response types.
//!
//! # Design
//! `HttpRequest` is plain data: the `build_*` methods on the clients produce
//! it without touching the network, which keeps URL construction and
//! validation deterministic and testable. `ResponseStream` is the other side:
//! the still-open response body handed to the caller unparsed. Dropping it
//! closes the connection.

use std::fmt;
use std::io::{self, BufRead, BufReader, Read};

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
        }
    }
}

/// An HTTP request described as plain data.
///
/// `url` is absolute and already carries the encoded query string for GET
/// requests. POST requests carry their form-encoded parameters in `body`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn get(url: String) -> Self {
        Self {
            method: HttpMethod::Get,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post_form(url: String, body: String) -> Self {
        Self {
            method: HttpMethod::Post,
            url,
            headers: vec![(
                "content-type".to_string(),
                "application/x-www-form-urlencoded".to_string(),
            )],
            body: Some(body),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// The open body of a successful response.
///
/// Reads straight from the connection; nothing is buffered up front, so large
/// result sets can be consumed incrementally with `Read` or line by line with
/// `BufRead`.
pub struct ResponseStream {
    status: u16,
    content_type: Option<String>,
    reader: BufReader<Box<dyn Read + Send>>,
}

impl ResponseStream {
    pub fn new(status: u16, content_type: Option<String>, reader: Box<dyn Read + Send>) -> Self {
        Self {
            status,
            content_type,
            reader: BufReader::new(reader),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Drain the remaining body into a string.
    pub fn into_string(mut self) -> io::Result<String> {
        let mut body = String::new();
        self.reader.read_to_string(&mut body)?;
        Ok(body)
    }
}

impl fmt::Debug for ResponseStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseStream")
            .field("status", &self.status)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

impl Read for ResponseStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl BufRead for ResponseStream {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.reader.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.reader.consume(amt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(body: &'static str) -> ResponseStream {
        ResponseStream::new(200, Some("text/plain".to_string()), Box::new(body.as_bytes()))
    }

    #[test]
    fn post_form_sets_content_type() {
        let req = HttpRequest::post_form("http://host/mapping/".to_string(), "a=b".to_string());
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.header("Content-Type"), Some("application/x-www-form-urlencoded"));
        assert_eq!(req.body.as_deref(), Some("a=b"));
    }

    #[test]
    fn get_has_no_body_or_headers() {
        let req = HttpRequest::get("http://host/".to_string());
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
        assert_eq!(req.method.to_string(), "GET");
    }

    #[test]
    fn stream_reads_lines() {
        let lines: Vec<String> = stream(">sp|P13368\nMKT\n").lines().map(Result::unwrap).collect();
        assert_eq!(lines, vec![">sp|P13368", "MKT"]);
    }

    #[test]
    fn stream_can_move_to_another_thread() {
        fn assert_send<T: Send>() {}
        assert_send::<ResponseStream>();

        let s = stream("moved");
        let body = std::thread::spawn(move || s.into_string().unwrap()).join().unwrap();
        assert_eq!(body, "moved");
    }

    #[test]
    fn stream_into_string_drains_body() {
        let s = stream("<entry/>");
        assert_eq!(s.status(), 200);
        assert_eq!(s.content_type(), Some("text/plain"));
        assert_eq!(s.into_string().unwrap(), "<entry/>");
    }
}
