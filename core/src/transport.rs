//! `Transport` backed by a `ureq::Agent`.
//!
//! # Design
//! The agent is configured so ureq does as little as possible on its own:
//! redirects are not followed, 4xx/5xx come back as responses rather than
//! errors, and no idle connections are kept, so every hop opens a fresh
//! connection and closes it once the body has been read. When cookies are
//! enabled the agent's jar lives as long as the transport.

use ureq::{Agent, RequestBuilder};

use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{HttpMethod, HttpRequest, Transport};
use crate::io::copy;
use crate::response::Response;

#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
    accept_cookies: bool,
}

impl UreqTransport {
    pub fn new(config: &ClientConfig) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .max_redirects(0)
            .max_idle_connections(0)
            .max_idle_connections_per_host(0)
            .build()
            .new_agent();
        Self {
            agent,
            accept_cookies: config.accept_cookies,
        }
    }

    fn capture(&self, mut response: ureq::http::Response<ureq::Body>) -> Result<Response> {
        let status = response.status();
        let mut headers = Vec::new();
        for name in response.headers().keys() {
            for value in response.headers().get_all(name) {
                headers.push((name.as_str().to_string(), String::from_utf8_lossy(value.as_bytes()).into_owned()));
            }
        }

        let mut body = Vec::new();
        let mut reader = response.body_mut().as_reader();
        copy(&mut reader, &mut body)?;

        if !self.accept_cookies {
            self.agent.cookie_jar_lock().clear();
        }

        Ok(Response::new(
            status.as_u16(),
            status.canonical_reason().unwrap_or(""),
            headers,
            body,
        ))
    }
}

fn with_headers<B>(mut builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
    for (key, value) in headers {
        builder = builder.header(key.as_str(), value.as_str());
    }
    builder
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<Response> {
        let url = request.url.as_str();
        let headers = request.headers.as_slice();
        let response = match (request.method, request.body.as_deref()) {
            (HttpMethod::Get, _) => with_headers(self.agent.get(url), headers).call(),
            (HttpMethod::Post, Some(body)) => with_headers(self.agent.post(url), headers).send(body),
            (HttpMethod::Post, None) => with_headers(self.agent.post(url), headers).send_empty(),
            (HttpMethod::Delete, Some(body)) => {
                with_headers(self.agent.delete(url).force_send_body(), headers).send(body)
            }
            (HttpMethod::Delete, None) => with_headers(self.agent.delete(url), headers).call(),
        }?;
        self.capture(response)
    }
}
