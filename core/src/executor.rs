//! Turns a `Request` into hops and runs the redirect loop.
//!
//! # Design
//! `prepare` is pure: it resolves the query string, body and header list of
//! the first hop. `execute` sends that hop and then follows `Location`
//! headers in an explicit bounded loop. Redirect hops are always plain GETs
//! that carry only the caller's User-Agent; cookies ride along in the
//! transport's jar.

use std::fmt;
use std::io::Write;

use url::Url;

use crate::config::MAX_REDIRECTIONS;
use crate::error::{Error, Result};
use crate::http::{HttpMethod, HttpRequest, Transport};
use crate::pair::{append_query, query_string};
use crate::request::Request;
use crate::response::Response;

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// Resolve the first hop of `request`.
pub fn prepare(request: &Request) -> HttpRequest {
    let query = query_string(request.query_pairs());
    let mut headers: Vec<(String, String)> = request
        .header_pairs()
        .iter()
        .map(|p| (p.key().trim().to_string(), p.value().trim().to_string()))
        .collect();

    match request.method() {
        HttpMethod::Get => HttpRequest {
            method: HttpMethod::Get,
            url: append_query(request.url(), &query),
            headers,
            body: None,
        },
        method @ (HttpMethod::Post | HttpMethod::Delete) => {
            let (body, content_type) = match request.raw_body() {
                Some((content, content_type)) => (content.to_vec(), content_type.to_string()),
                None => (query.into_bytes(), FORM_CONTENT_TYPE.to_string()),
            };
            let body = if body.is_empty() {
                None
            } else {
                set_header(&mut headers, "Content-Type", content_type.trim());
                set_header(&mut headers, "Content-Length", &body.len().to_string());
                Some(body)
            };
            HttpRequest {
                method,
                url: request.url().to_string(),
                headers,
                body,
            }
        }
    }
}

/// Replace every header named `name` with a single `name: value`.
fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: &str) {
    headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
    headers.push((name.to_string(), value.to_string()));
}

/// Send `request`, following up to `MAX_REDIRECTIONS` redirects unless the
/// request opted out. With `verbose` set, diagnostics go to stdout.
pub fn execute<T>(transport: &T, request: &Request, verbose: bool) -> Result<Response>
where
    T: Transport + ?Sized,
{
    if verbose {
        let mut stdout = std::io::stdout();
        execute_traced(transport, request, Some(&mut stdout))
    } else {
        execute_traced(transport, request, None)
    }
}

/// Same as `execute`, writing diagnostics to `out` when it is present.
pub fn execute_traced<T>(transport: &T, request: &Request, out: Option<&mut dyn Write>) -> Result<Response>
where
    T: Transport + ?Sized,
{
    if request.url().trim().is_empty() {
        return Err(Error::InvalidArgument("invalid URL"));
    }
    let mut trace = Trace { out };

    let first = prepare(request);
    trace.request(&first);
    log::debug!("{} {}", first.method, first.url);
    let mut response = transport.send(&first)?;
    let mut current_url = first.url;

    let user_agent = request.propagated_user_agent().map(str::to_string);
    let mut redirects = 0usize;
    while request.follows_redirects() {
        let Some(location) = redirect_location(&response) else {
            break;
        };
        redirects += 1;
        if redirects > MAX_REDIRECTIONS {
            log::warn!("giving up on {} after {MAX_REDIRECTIONS} redirects", request.url());
            return Err(Error::TooManyRedirects {
                max: MAX_REDIRECTIONS,
            });
        }
        trace.line(&response);
        trace.line(format_args!("\nRedirect #{redirects} ({location})"));

        let hop = HttpRequest {
            method: HttpMethod::Get,
            url: resolve_location(&current_url, location),
            headers: user_agent
                .iter()
                .map(|ua| ("User-Agent".to_string(), ua.clone()))
                .collect(),
            body: None,
        };
        trace.line(format_args!("HTTP {} {}", hop.method, hop.url));
        log::debug!("redirect #{redirects}: {} -> {}", response.status_code(), hop.url);
        response = transport.send(&hop)?;
        current_url = hop.url;
    }

    trace.line(&response);
    log::debug!("{} {} after {redirects} redirect(s)", response.status_code(), current_url);
    Ok(response)
}

fn redirect_location(response: &Response) -> Option<&str> {
    if response.is_redirect() {
        response.header("location")
    } else {
        None
    }
}

/// `location` joined onto the URL of the hop that returned it. Absolute
/// locations come back unchanged apart from normalisation.
fn resolve_location(base: &str, location: &str) -> String {
    match Url::parse(base).and_then(|base| base.join(location)) {
        Ok(url) => url.into(),
        Err(_) => location.to_string(),
    }
}

struct Trace<'a> {
    out: Option<&'a mut dyn Write>,
}

impl Trace<'_> {
    fn line(&mut self, line: impl fmt::Display) {
        if let Some(out) = self.out.as_deref_mut() {
            if let Err(e) = writeln!(out, "{line}") {
                log::warn!("dropping verbose output: {e}");
            }
        }
    }

    fn request(&mut self, request: &HttpRequest) {
        if self.out.is_none() {
            return;
        }
        self.line(format_args!("HTTP {} {}", request.method, request.url));
        for (key, value) in &request.headers {
            self.line(format_args!("{key}: {value}"));
        }
        if let Some(body) = &request.body {
            self.line(String::from_utf8_lossy(body));
        }
    }
}
