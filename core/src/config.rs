//! Client configuration.
//!
//! # Design
//! A `ClientConfig` is handed to `Client::new` and lives inside that client,
//! so cookie policy and verbosity never come from process-wide state.
//! `from_env` starts from the defaults and only lets `SIMPLEHTTP_VERBOSE`
//! switch verbose output on.

/// Maximum number of redirects followed before a request fails.
pub const MAX_REDIRECTIONS: usize = 5;

/// Environment variable that forces verbose output for every request.
pub const VERBOSE_ENV: &str = "SIMPLEHTTP_VERBOSE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Keep a cookie jar for the client's lifetime, accepting every cookie.
    pub accept_cookies: bool,
    /// Print diagnostics for every request, as if `Request::verbose` was set.
    pub verbose: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            accept_cookies: true,
            verbose: false,
        }
    }
}

impl ClientConfig {
    /// Defaults, with `verbose` switched on when `SIMPLEHTTP_VERBOSE` is `1`
    /// or `true`.
    pub fn from_env() -> Self {
        let verbose = std::env::var(VERBOSE_ENV)
            .map(|v| parse_flag(&v))
            .unwrap_or(false);
        Self {
            verbose,
            ..Self::default()
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true")
}
