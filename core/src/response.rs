//! Immutable snapshot of one HTTP response.
//!
//! # Design
//! A `Response` is built once per hop by the transport and never mutated.
//! Header names are normalised to lowercase so lookups do not depend on how
//! the server spelled them.

use std::collections::BTreeMap;
use std::fmt;

/// Status, headers and raw body of a single hop.
///
/// Header names are stored lowercased; each name maps to its values in the
/// order the server sent them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status_code: u16,
    status_message: String,
    headers: BTreeMap<String, Vec<String>>,
    body: Vec<u8>,
}

impl Response {
    pub fn new<I, K, V>(status_code: u16, status_message: impl Into<String>, headers: I, body: Vec<u8>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, value) in headers {
            map.entry(name.as_ref().to_ascii_lowercase())
                .or_default()
                .push(value.into());
        }
        Self {
            status_code,
            status_message: status_message.into(),
            headers: map,
            body,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn headers(&self) -> &BTreeMap<String, Vec<String>> {
        &self.headers
    }

    /// First value of header `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn is_success(&self) -> bool {
        self.status_code / 100 == 2
    }

    pub fn is_redirect(&self) -> bool {
        self.status_code / 100 == 3
    }
}

/// One `name: v1, v2` line per header.
impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, values) in &self.headers {
            writeln!(f, "{name}: {}", values.join(", "))?;
        }
        Ok(())
    }
}
