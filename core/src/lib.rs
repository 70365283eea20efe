//! Small fluent HTTP request builder over a blocking client.
//!
//! # Overview
//! Build a request with `get`, `post` or `delete`, chain query parameters,
//! headers and an optional body, then run it through a `Client` with one of
//! the terminal operations (`execute_raw`, `execute_bytes`, `execute_text`,
//! `execute_mapped`). Redirects are followed manually, up to
//! `MAX_REDIRECTIONS`, with every hop on a fresh connection.
//!
//! ```no_run
//! use simplehttp_core::{get, Client, ClientConfig, JsonMapper};
//!
//! #[derive(serde::Deserialize)]
//! struct Repo {
//!     name: String,
//! }
//!
//! let client = Client::new(ClientConfig::from_env());
//! let _repo = get("https://example.com/repo")
//!     .query("expand", "owner")
//!     .user_agent("simplehttp")
//!     .execute_mapped(&client, &JsonMapper::<Repo>::new())?;
//! # Ok::<(), simplehttp_core::Error>(())
//! ```
//!
//! # Design
//! - `Request` is plain data; `executor::prepare` turns it into the first
//!   `HttpRequest` hop without I/O.
//! - `Transport` performs one exchange; the redirect loop lives above it.
//! - The cookie jar belongs to the `Client`, never to the process.

pub mod client;
pub mod config;
pub mod error;
pub mod executor;
pub mod http;
pub mod io;
pub mod mapper;
pub mod pair;
pub mod request;
pub mod response;
pub mod transport;

pub use client::Client;
pub use config::{ClientConfig, MAX_REDIRECTIONS};
pub use error::{Error, Result};
pub use http::{HttpMethod, HttpRequest, Transport};
pub use mapper::{JsonMapper, ResponseMapper};
pub use pair::Pair;
pub use request::{delete, get, post, Request};
pub use response::Response;
pub use transport::UreqTransport;
