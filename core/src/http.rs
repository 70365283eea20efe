//! Wire-level request types and the transport seam.
//!
//! # Design
//! `HttpRequest` describes a single hop as plain data: the URL already has its
//! query string, the body is already encoded and the header list is final.
//! The executor builds these and hands them to a `Transport`, which performs
//! exactly one exchange and never follows redirects on its own. Keeping the
//! redirect loop out of the transport lets it be tested without a network.

use std::fmt;

use crate::error::Result;
use crate::response::Response;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One hop of a request, described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// First value of header `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Performs a single HTTP exchange.
///
/// Implementations must return 3xx responses as-is instead of following them,
/// must return every status code as a `Response` rather than an error, and
/// must have released the underlying connection by the time they return.
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> Result<Response>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &HttpRequest) -> Result<Response> {
        (**self).send(request)
    }
}
