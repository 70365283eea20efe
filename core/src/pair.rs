//! Key/value pairs for headers and query parameters, plus query-string assembly.
//!
//! # Design
//! A `Pair` can only be built through `Pair::of`, which returns `None` for a
//! blank key. Batch setters on `Request` accept `Option<Pair>` and skip the
//! `None`s, so a batch with some invalid entries still applies the valid ones.

use std::fmt;

use url::form_urlencoded;

/// An ordered key/value association. The key is never empty or blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    key: String,
    value: String,
}

impl Pair {
    /// Build a pair, or `None` when `key` is empty or only whitespace.
    pub fn of(key: impl Into<String>, value: impl fmt::Display) -> Option<Pair> {
        let key = key.into();
        if key.trim().is_empty() {
            log::trace!("dropping pair with blank key");
            return None;
        }
        Some(Pair {
            key,
            value: value.to_string(),
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// `key=value`, both sides form-urlencoded.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair(&self.key, &self.value)
            .finish()
    }
}

/// Join `pairs` into an `application/x-www-form-urlencoded` string.
///
/// Returns an empty string for an empty slice.
pub fn query_string(pairs: &[Pair]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for pair in pairs {
        serializer.append_pair(&pair.key, &pair.value);
    }
    serializer.finish()
}

/// Append `query` to `url`, joining with `&` if the URL already carries a
/// query component and `?` otherwise. An empty `query` leaves the URL as is.
pub fn append_query(url: &str, query: &str) -> String {
    if query.is_empty() {
        return url.to_string();
    }
    let join = if url.contains('?') { '&' } else { '?' };
    format!("{url}{join}{query}")
}
