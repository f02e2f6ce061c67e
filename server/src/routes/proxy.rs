//! Reverse proxy for the retrieval backend.
//!
//! DESIGN
//! ======
//! The request path and query are appended unchanged to `BACKEND_URL`, so
//! `/api/chat` on this host becomes `{BACKEND_URL}/api/chat`. Hop-by-hop
//! headers are dropped in both directions; everything else, including
//! `Authorization` and `x-admin-upload-key`, passes through. Bodies are
//! buffered, which bounds uploads at `ServerConfig::max_body_bytes`; a larger
//! body is answered with 413 before the backend is contacted.

#[cfg(test)]
#[path = "proxy_test.rs"]
mod proxy_test;

use axum::Json;
use axum::body::{Body, to_bytes};
use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderName, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::state::AppState;

static HOP_BY_HOP: [HeaderName; 9] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
    header::CONTENT_LENGTH,
];

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("request body unreadable: {0}")]
    RequestBody(String),

    #[error("backend unreachable: {0}")]
    Upstream(String),

    #[error("backend response unreadable: {0}")]
    ResponseBody(String),
}

impl ProxyError {
    fn status(&self) -> StatusCode {
        match self {
            Self::RequestBody(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Upstream(_) | Self::ResponseBody(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// `{backend}{path}?{query}` for an incoming request path.
pub fn target_url(backend: &str, path_and_query: &str) -> String {
    let path = if path_and_query.starts_with('/') { path_and_query.to_owned() } else { format!("/{path_and_query}") };
    format!("{}{path}", backend.trim_end_matches('/'))
}

/// Copy of `headers` without hop-by-hop entries and `Host`.
pub fn forwardable_headers(headers: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if *name == header::HOST || HOP_BY_HOP.contains(name) {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    out
}

/// Forward one request to the backend and relay its response.
pub async fn forward(State(state): State<AppState>, req: Request) -> Result<Response, ProxyError> {
    let (parts, body) = req.into_parts();
    let path_and_query = parts.uri.path_and_query().map_or("/", |pq| pq.as_str());
    let url = target_url(&state.config.backend_url, path_and_query);

    let body = to_bytes(body, state.config.max_body_bytes)
        .await
        .map_err(|e| {
            tracing::warn!(method = %parts.method, %url, error = %e, "request body rejected");
            ProxyError::RequestBody(e.to_string())
        })?;

    tracing::debug!(method = %parts.method, %url, bytes = body.len(), "proxying request");

    let upstream = state
        .client
        .request(parts.method.clone(), &url)
        .headers(forwardable_headers(&parts.headers))
        .body(body)
        .send()
        .await
        .map_err(|e| {
            tracing::warn!(method = %parts.method, %url, error = %e, "backend request failed");
            ProxyError::Upstream(e.to_string())
        })?;

    let status = upstream.status();
    let headers = forwardable_headers(upstream.headers());
    let bytes = upstream.bytes().await.map_err(|e| ProxyError::ResponseBody(e.to_string()))?;

    if status.is_server_error() {
        tracing::warn!(%url, %status, "backend returned server error");
    }

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}
