//! Error type for request execution and response mapping.
//!
//! # Design
//! Every failure of a terminal operation lands in the single `Error` enum and
//! is fatal to that call. Lower-level causes (transport, stream, JSON) are
//! carried as sources so callers can still inspect them.

use thiserror::Error;

/// Errors returned by terminal request operations and response mappers.
#[derive(Debug, Error)]
pub enum Error {
    /// A caller-supplied argument was unusable, e.g. a blank URL.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The redirect chain was longer than the client is willing to follow.
    #[error("too many redirections (more than {max})")]
    TooManyRedirects { max: usize },

    /// Connecting, writing the request or reading the response head failed.
    #[error("transport error: {0}")]
    Transport(#[from] ureq::Error),

    /// Reading the response body failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The response body could not be decoded into the requested type.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
