//! Fluent request builder.
//!
//! # Design
//! Every configuration call takes the request by value and hands it back, so
//! chains read left to right and a half-configured request can be `clone`d
//! to branch. Terminal operations consume the request and run it through a
//! `Client`.

use std::fmt;

use crate::client::Client;
use crate::error::Result;
use crate::http::{HttpMethod, Transport};
use crate::mapper::ResponseMapper;
use crate::pair::Pair;
use crate::response::Response;

pub fn get(url: impl Into<String>) -> Request {
    Request::new(HttpMethod::Get, url)
}

pub fn post(url: impl Into<String>) -> Request {
    Request::new(HttpMethod::Post, url)
}

pub fn delete(url: impl Into<String>) -> Request {
    Request::new(HttpMethod::Delete, url)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Body {
    content: Vec<u8>,
    content_type: String,
}

/// A configurable HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    url: String,
    method: HttpMethod,
    query: Vec<Pair>,
    headers: Vec<Pair>,
    body: Option<Body>,
    follow_redirects: bool,
    verbose: bool,
}

impl Request {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
            follow_redirects: true,
            verbose: false,
        }
    }

    /// Add a query parameter. A blank `key` is ignored.
    pub fn query(self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.queries([Pair::of(key, value)])
    }

    /// Add several query parameters, skipping `None` entries.
    pub fn queries<I, P>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Option<Pair>>,
    {
        self.query.extend(pairs.into_iter().filter_map(Into::into));
        self
    }

    /// Add a request header. A blank `key` is ignored.
    pub fn header(self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.headers([Pair::of(key, value)])
    }

    /// Add several request headers, skipping `None` entries.
    pub fn headers<I, P>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Option<Pair>>,
    {
        self.headers.extend(pairs.into_iter().filter_map(Into::into));
        self
    }

    /// Set the `User-Agent` header. It is also sent on every redirect hop.
    pub fn user_agent(self, user_agent: impl fmt::Display) -> Self {
        self.header("User-Agent", user_agent)
    }

    /// Send `content` as the request body instead of the form-encoded query.
    /// Only POST and DELETE carry a body.
    pub fn body(mut self, content: impl Into<Vec<u8>>, content_type: impl Into<String>) -> Self {
        self.body = Some(Body {
            content: content.into(),
            content_type: content_type.into(),
        });
        self
    }

    /// Return 3xx responses instead of following them.
    pub fn no_redirect(mut self) -> Self {
        self.follow_redirects = false;
        self
    }

    /// Print the request, every response and each redirect to stdout.
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn query_pairs(&self) -> &[Pair] {
        &self.query
    }

    pub fn header_pairs(&self) -> &[Pair] {
        &self.headers
    }

    pub fn follows_redirects(&self) -> bool {
        self.follow_redirects
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub(crate) fn raw_body(&self) -> Option<(&[u8], &str)> {
        self.body
            .as_ref()
            .map(|b| (b.content.as_slice(), b.content_type.as_str()))
    }

    /// The last explicitly set `User-Agent` header, if any.
    pub(crate) fn propagated_user_agent(&self) -> Option<&str> {
        self.headers
            .iter()
            .rev()
            .find(|p| p.key().trim().eq_ignore_ascii_case("user-agent"))
            .map(|p| p.value().trim())
    }

    /// Execute and return the final response.
    pub fn execute_raw<T: Transport>(self, client: &Client<T>) -> Result<Response> {
        client.execute(&self)
    }

    /// Execute and return the final response body.
    pub fn execute_bytes<T: Transport>(self, client: &Client<T>) -> Result<Vec<u8>> {
        Ok(self.execute_raw(client)?.into_body())
    }

    /// Execute and return the final response body as UTF-8 text, replacing
    /// invalid sequences.
    pub fn execute_text<T: Transport>(self, client: &Client<T>) -> Result<String> {
        let bytes = self.execute_bytes(client)?;
        Ok(match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })
    }

    /// Execute and decode the final response with `mapper`.
    pub fn execute_mapped<T, M>(self, client: &Client<T>, mapper: &M) -> Result<M::Output>
    where
        T: Transport,
        M: ResponseMapper + ?Sized,
    {
        let response = self.execute_raw(client)?;
        mapper.map(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let request = get("http://localhost/");
        assert_eq!(request.method(), HttpMethod::Get);
        assert_eq!(request.url(), "http://localhost/");
        assert!(request.follows_redirects());
        assert!(!request.is_verbose());
        assert!(request.query_pairs().is_empty());
        assert!(request.header_pairs().is_empty());
        assert!(request.raw_body().is_none());
    }

    #[test]
    fn factories_set_method() {
        assert_eq!(post("u").method(), HttpMethod::Post);
        assert_eq!(delete("u").method(), HttpMethod::Delete);
    }

    #[test]
    fn blank_keys_are_dropped() {
        let request = get("http://localhost/")
            .query("", "nope")
            .query("  ", "nope")
            .header("", "nope")
            .query("kept", 1)
            .header("X-Kept", "yes");
        assert_eq!(request.query_pairs().len(), 1);
        assert_eq!(request.query_pairs()[0].key(), "kept");
        assert_eq!(request.header_pairs().len(), 1);
        assert_eq!(request.header_pairs()[0].key(), "X-Kept");
    }

    #[test]
    fn batch_applies_valid_pairs_in_order() {
        let request = get("http://localhost/").queries([
            Pair::of("a", 1),
            Pair::of("", 2),
            None,
            Pair::of("b", 3),
        ]);
        let keys: Vec<_> = request.query_pairs().iter().map(Pair::key).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn batch_accepts_plain_pairs() {
        let pairs = vec![Pair::of("a", 1).unwrap(), Pair::of("b", 2).unwrap()];
        let request = post("http://localhost/").headers(pairs);
        assert_eq!(request.header_pairs().len(), 2);
    }

    #[test]
    fn flags_and_body() {
        let request = post("http://localhost/")
            .no_redirect()
            .verbose()
            .body("{}", "application/json");
        assert!(!request.follows_redirects());
        assert!(request.is_verbose());
        assert_eq!(request.raw_body(), Some((&b"{}"[..], "application/json")));
    }

    #[test]
    fn configuration_returns_new_values() {
        let base = get("http://localhost/").header("Accept", "text/plain");
        let branched = base.clone().no_redirect();
        assert!(base.follows_redirects());
        assert!(!branched.follows_redirects());
    }

    #[test]
    fn last_user_agent_wins() {
        let request = get("http://localhost/")
            .user_agent("first")
            .header("user-agent", " second ");
        assert_eq!(request.propagated_user_agent(), Some("second"));
        assert_eq!(get("http://localhost/").propagated_user_agent(), None);
    }
}
