use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// What the server saw of a request sent to `/echo`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Echo {
    pub method: String,
    pub uri: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sample {
    pub a: i64,
}

#[derive(Deserialize)]
pub struct ChainParams {
    #[serde(default)]
    pub absolute: bool,
}

pub fn app() -> Router {
    Router::new()
        .route("/echo", any(echo))
        .route("/json", get(json))
        .route("/empty", get(empty))
        .route("/status/{code}", any(status))
        .route("/redirect/{hops}", any(redirect))
        .route("/chain/start", get(chain_start))
        .route("/chain/middle", get(chain_middle))
        .route("/cookie/set", get(cookie_set))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: String) -> Json<Echo> {
    let headers = headers
        .iter()
        .map(|(k, v)| {
            (
                k.as_str().to_string(),
                String::from_utf8_lossy(v.as_bytes()).into_owned(),
            )
        })
        .collect();
    Json(Echo {
        method: method.to_string(),
        uri: uri.to_string(),
        headers,
        body,
    })
}

async fn json() -> Json<Sample> {
    Json(Sample { a: 1 })
}

async fn empty() -> StatusCode {
    StatusCode::OK
}

/// Responds with `code` and a short plain-text body naming it.
async fn status(Path(code): Path<u16>) -> Result<(StatusCode, String), StatusCode> {
    let status = StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)?;
    Ok((status, format!("status {code}")))
}

fn moved(status: StatusCode, location: &str) -> Response {
    (status, [(header::LOCATION, location.to_string())]).into_response()
}

/// Redirects `/redirect/{n}` to `/redirect/{n-1}` until `n` reaches zero.
async fn redirect(
    Path(hops): Path<u32>,
    Query(params): Query<ChainParams>,
    headers: HeaderMap,
) -> Response {
    if hops == 0 {
        return (StatusCode::OK, "arrived").into_response();
    }
    let next = format!("/redirect/{}", hops - 1);
    let location = match (params.absolute, headers.get(header::HOST)) {
        (true, Some(host)) => format!(
            "http://{}{next}?absolute=true",
            String::from_utf8_lossy(host.as_bytes())
        ),
        _ => next,
    };
    moved(StatusCode::FOUND, &location)
}

async fn chain_start() -> Response {
    moved(StatusCode::MOVED_PERMANENTLY, "/chain/middle")
}

async fn chain_middle() -> Response {
    moved(StatusCode::FOUND, "/echo")
}

/// Sets a cookie and sends the client on to `/echo`, where it shows up in
/// the echoed headers if the client kept it.
async fn cookie_set() -> Response {
    (
        StatusCode::FOUND,
        [
            (header::SET_COOKIE, "session=abc123; Path=/".to_string()),
            (header::LOCATION, "/echo".to_string()),
        ],
    )
        .into_response()
}
