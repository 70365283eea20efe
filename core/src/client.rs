//! The client a request runs through.
//!
//! # Design
//! `Client` owns the configuration and the transport, including the cookie
//! jar, so nothing is process-wide: two clients never share cookies, and
//! tests can swap in their own `Transport`.

use crate::config::ClientConfig;
use crate::error::Result;
use crate::executor;
use crate::http::Transport;
use crate::request::Request;
use crate::response::Response;
use crate::transport::UreqTransport;

#[derive(Debug, Clone)]
pub struct Client<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl Client<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(&config);
        Self { config, transport }
    }
}

impl Default for Client<UreqTransport> {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run `request`, following redirects unless it opted out.
    pub fn execute(&self, request: &Request) -> Result<Response> {
        let verbose = self.config.verbose || request.is_verbose();
        executor::execute(&self.transport, request, verbose)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::error::Error;
    use crate::http::HttpRequest;
    use crate::mapper::JsonMapper;
    use crate::request::{get, post};

    /// Answers every hop with the same JSON body and counts calls.
    struct Fixed {
        calls: Cell<usize>,
    }

    impl Transport for Fixed {
        fn send(&self, _request: &HttpRequest) -> Result<Response> {
            self.calls.set(self.calls.get() + 1);
            Ok(Response::new(200, "OK", Vec::<(&str, &str)>::new(), br#"{"a":1}"#.to_vec()))
        }
    }

    fn client() -> Client<Fixed> {
        Client::with_transport(ClientConfig::default(), Fixed { calls: Cell::new(0) })
    }

    #[test]
    fn terminal_operations_share_one_path() {
        let client = client();
        assert_eq!(get("http://h/").execute_raw(&client).unwrap().status_code(), 200);
        assert_eq!(get("http://h/").execute_bytes(&client).unwrap(), br#"{"a":1}"#.to_vec());
        assert_eq!(post("http://h/").execute_text(&client).unwrap(), r#"{"a":1}"#);

        #[derive(serde::Deserialize)]
        struct Shape {
            a: i32,
        }
        let shape = get("http://h/")
            .execute_mapped(&client, &JsonMapper::<Shape>::new())
            .unwrap()
            .unwrap();
        assert_eq!(shape.a, 1);
        assert_eq!(client.transport().calls.get(), 4);
    }

    #[test]
    fn blank_url_never_reaches_transport() {
        let client = client();
        let err = get("").execute_bytes(&client).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(client.transport().calls.get(), 0);
    }

    #[test]
    fn default_client_uses_default_config() {
        let client: Client = Client::default();
        assert_eq!(client.config(), &ClientConfig::default());
    }
}
