//! Requests and responses as plain data.
//!
//! # Design
//! The client builds an `HttpRequest` and classifies an `HttpResponse` without
//! doing any I/O itself; `Transport` performs the round-trip in between. Callers
//! that bring their own HTTP stack can use the build and parse halves
//! directly. Every request is a GET, so no method is carried.

use std::fmt;

use url::Url;

/// A fully built GET request.
///
/// `Debug` output redacts the `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: Url,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Value of the first header named `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(key, value)| {
                if key.eq_ignore_ascii_case("authorization") {
                    (key.as_str(), "Bearer <redacted>")
                } else {
                    (key.as_str(), value.as_str())
                }
            })
            .collect();
        f.debug_struct("HttpRequest")
            .field("url", &self.url.as_str())
            .field("headers", &headers)
            .finish()
    }
}

/// Status and fully read body of a completed round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_authorization() {
        let req = HttpRequest {
            url: Url::parse("https://host.io/api/web/example.com").unwrap(),
            headers: vec![
                ("accept".to_string(), "application/json".to_string()),
                ("authorization".to_string(), "Bearer s3cr3t".to_string()),
            ],
        };
        let debug = format!("{req:?}");
        assert!(!debug.contains("s3cr3t"));
        assert!(debug.contains("application/json"));
        assert_eq!(req.header("Authorization"), Some("Bearer s3cr3t"));
        assert_eq!(req.header("x-missing"), None);
    }
}
