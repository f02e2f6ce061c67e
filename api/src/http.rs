//! Transport-neutral HTTP request/response model.
//!
//! DESIGN
//! ======
//! The clients in this crate build [`HttpRequest`] values and hand them to a
//! [`Transport`]. The browser implements it with `gloo-net`, tests implement it
//! with in-memory fakes. Responses are always read as text first so that
//! non-JSON bodies (HTML error pages) can be reported instead of failing to
//! parse.

use std::future::Future;

use serde_json::Value;

use crate::error::{ApiError, TransportError};

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    Text(String),
    File { file_name: String, mime: String, bytes: Vec<u8> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormPart {
    pub name: String,
    pub value: FormValue,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(Vec<FormPart>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    fn new(method: Method, url: impl Into<String>) -> Self {
        Self { method, url: url.into(), headers: Vec::new(), body: RequestBody::Empty }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::Delete, url)
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attach `Authorization: Bearer <token>` when a token is present.
    #[must_use]
    pub fn bearer(self, token: Option<&str>) -> Self {
        match token {
            Some(token) if !token.is_empty() => self.header("Authorization", format!("Bearer {token}")),
            _ => self,
        }
    }

    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    #[must_use]
    pub fn multipart(mut self, parts: Vec<FormPart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    /// Case-insensitive header lookup.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    #[must_use]
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"))
    }

    /// Parse the body as JSON; an empty body reads as `{}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Malformed`] when the body is not valid JSON.
    pub fn json_value(&self) -> Result<Value, ApiError> {
        if self.body.trim().is_empty() {
            return Ok(Value::Object(serde_json::Map::new()));
        }
        serde_json::from_str(&self.body).map_err(|e| ApiError::Malformed(e.to_string()))
    }

    /// Parse the body as JSON, returning `Null` for anything unparsable.
    #[must_use]
    pub fn json_lenient(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

/// Issues one HTTP request and yields the raw response.
///
/// Implementations must not interpret status codes; that is left to the
/// calling client.
pub trait Transport {
    fn send(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse, TransportError>>;
}

impl<T: Transport> Transport for &T {
    fn send(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse, TransportError>> {
        (**self).send(request)
    }
}

impl<T: Transport> Transport for std::sync::Arc<T> {
    fn send(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse, TransportError>> {
        (**self).send(request)
    }
}

/// Best human-readable message for a failed response: the JSON `message`
/// field, else `error`, else `HTTP {status}`.
#[must_use]
pub fn server_error_message(response: &HttpResponse) -> String {
    let body = response.json_lenient();
    ["message", "error"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str).filter(|s| !s.is_empty()))
        .map_or_else(|| format!("HTTP {}", response.status), str::to_owned)
}

/// Convert a non-2xx response into [`ApiError::Status`].
///
/// # Errors
///
/// Returns the status error when `response` is not successful.
pub fn ensure_success(response: HttpResponse) -> Result<HttpResponse, ApiError> {
    if response.is_success() {
        Ok(response)
    } else {
        let message = server_error_message(&response);
        Err(ApiError::Status { status: response.status, message })
    }
}
