//! Admin document transport (`/api/admin/documents/*`).
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend stores uploaded PDFs and runs chunking + embedding on demand.
//! Admin pages list documents, upload new ones, delete them, trigger
//! processing and inspect the resulting chunks. Processing is asynchronous on
//! the backend, so the client polls the document until it reaches a terminal
//! status.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses become [`ApiError::Status`] carrying the server's
//! `message`/`error` field. Upload validation failures are returned before any
//! request is made. Response bodies that are OK but oddly shaped degrade to
//! empty results rather than errors.

use std::cell::RefCell;
use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, UploadError};
use crate::http::{FormPart, FormValue, HttpRequest, Transport, ensure_success, server_error_message};
use crate::poll::{PollOutcome, PollPolicy, Probe, poll_bounded};
use crate::types::{Document, DocumentChunk};
use crate::url::{document_action_path, document_path, join_api_url};

#[cfg(test)]
#[path = "documents_test.rs"]
mod documents_test;

pub const DOCUMENTS_PATH: &str = "/api/admin/documents";
pub const PDF_MIME: &str = "application/pdf";
pub const DEFAULT_MAX_UPLOAD_MB: u64 = 50;
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = DEFAULT_MAX_UPLOAD_MB * 1024 * 1024;
pub const ADMIN_UPLOAD_KEY_HEADER: &str = "x-admin-upload-key";

/// What the browser knows about a picked file before reading it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadMeta {
    pub file_name: String,
    pub mime: String,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub meta: UploadMeta,
    pub bytes: Vec<u8>,
}

/// Check an upload before touching the network: token, file, type, size.
///
/// # Errors
///
/// [`ApiError::MissingToken`] without a bearer token, otherwise
/// [`ApiError::InvalidUpload`] describing the first failed check.
pub fn validate_upload(bearer: Option<&str>, file: Option<&UploadMeta>, max_bytes: u64) -> Result<(), ApiError> {
    if bearer.is_none_or(str::is_empty) {
        return Err(ApiError::MissingToken);
    }
    let file = file.ok_or(UploadError::MissingFile)?;
    if file.mime != PDF_MIME {
        return Err(UploadError::NotPdf { mime: file.mime.clone() }.into());
    }
    if file.size > max_bytes {
        return Err(UploadError::TooLarge { size: file.size, max_mb: max_bytes / (1024 * 1024) }.into());
    }
    Ok(())
}

fn require_token(bearer: Option<&str>) -> Result<&str, ApiError> {
    bearer.filter(|t| !t.is_empty()).ok_or(ApiError::MissingToken)
}

fn lenient_items<T: DeserializeOwned>(items: &[Value]) -> Vec<T> {
    items
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed item");
                None
            }
        })
        .collect()
}

/// Accepts a bare array, `{data: [...]}` or `{items: [...]}`.
#[must_use]
pub fn parse_document_list(body: &Value) -> Vec<Document> {
    let items = body
        .as_array()
        .or_else(|| body.get("data").and_then(Value::as_array))
        .or_else(|| body.get("items").and_then(Value::as_array));
    items.map(|items| lenient_items(items)).unwrap_or_default()
}

pub struct DocumentsClient<T> {
    transport: T,
    base_url: String,
    admin_upload_key: Option<String>,
    max_upload_bytes: u64,
}

impl<T: Transport> DocumentsClient<T> {
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        Self { transport, base_url: base_url.into(), admin_upload_key: None, max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES }
    }

    /// Send `x-admin-upload-key` on uploads. Empty keys are ignored.
    #[must_use]
    pub fn with_admin_upload_key(mut self, key: Option<String>) -> Self {
        self.admin_upload_key = key.filter(|k| !k.is_empty());
        self
    }

    #[must_use]
    pub fn with_max_upload_bytes(mut self, max: u64) -> Self {
        self.max_upload_bytes = max;
        self
    }

    #[must_use]
    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_bytes
    }

    fn url(&self, path: &str) -> String {
        join_api_url(&self.base_url, path)
    }

    /// # Errors
    ///
    /// Transport failures and non-2xx responses.
    pub async fn list(&self, bearer: Option<&str>) -> Result<Vec<Document>, ApiError> {
        let request = HttpRequest::get(self.url(DOCUMENTS_PATH)).bearer(bearer);
        let response = ensure_success(self.transport.send(request).await?)?;
        Ok(parse_document_list(&response.json_lenient()))
    }

    /// Fetch one document; `Ok(None)` when the body holds no document.
    ///
    /// # Errors
    ///
    /// Transport failures and non-2xx responses (including 404).
    pub async fn get(&self, bearer: Option<&str>, id: &str) -> Result<Option<Document>, ApiError> {
        let request = HttpRequest::get(self.url(&document_path(id))).bearer(bearer);
        let response = ensure_success(self.transport.send(request).await?)?;
        let body = response.json_lenient();
        let doc = match body.get("data") {
            Some(data) if !data.is_null() => data.clone(),
            _ => body,
        };
        if !doc.is_object() {
            return Ok(None);
        }
        Ok(serde_json::from_value(doc).ok())
    }

    /// Upload a PDF with a title (the file name when blank).
    ///
    /// # Errors
    ///
    /// Validation errors before any request, then transport/status errors.
    pub async fn upload(&self, bearer: Option<&str>, title: &str, file: UploadFile) -> Result<(), ApiError> {
        validate_upload(bearer, Some(&file.meta), self.max_upload_bytes)?;
        let title = if title.trim().is_empty() { file.meta.file_name.clone() } else { title.to_owned() };
        let parts = vec![
            FormPart {
                name: "file".into(),
                value: FormValue::File { file_name: file.meta.file_name, mime: file.meta.mime, bytes: file.bytes },
            },
            FormPart { name: "title".into(), value: FormValue::Text(title) },
        ];
        let mut request = HttpRequest::post(self.url(DOCUMENTS_PATH)).bearer(bearer).multipart(parts);
        if let Some(key) = &self.admin_upload_key {
            request = request.header(ADMIN_UPLOAD_KEY_HEADER, key.clone());
        }
        ensure_success(self.transport.send(request).await?)?;
        tracing::info!("document uploaded");
        Ok(())
    }

    /// # Errors
    ///
    /// [`ApiError::MissingToken`], transport and status errors.
    pub async fn delete(&self, bearer: Option<&str>, id: &str) -> Result<(), ApiError> {
        let token = require_token(bearer)?;
        let request = HttpRequest::delete(self.url(&document_path(id))).bearer(Some(token));
        ensure_success(self.transport.send(request).await?)?;
        Ok(())
    }

    /// Ask the backend to chunk and embed a document.
    ///
    /// # Errors
    ///
    /// [`ApiError::MissingToken`], transport and status errors.
    pub async fn trigger_process(&self, bearer: Option<&str>, id: &str) -> Result<(), ApiError> {
        let token = require_token(bearer)?;
        let request = HttpRequest::post(self.url(&document_action_path(id, "process"))).bearer(Some(token));
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(ApiError::Status { status: response.status, message: server_error_message(&response) });
        }
        Ok(())
    }

    /// Trigger processing, then poll the document until it is terminal.
    ///
    /// `refresh` runs after every successful status fetch so the caller can
    /// reload its list. A 404 stops polling; other fetch errors are logged and
    /// polling continues.
    ///
    /// # Errors
    ///
    /// Only the trigger request's errors; polling never fails.
    pub async fn process_and_wait<S, SF, R, RF>(
        &self,
        bearer: Option<&str>,
        id: &str,
        policy: PollPolicy,
        sleep: S,
        refresh: R,
    ) -> Result<PollOutcome<Document>, ApiError>
    where
        S: FnMut(Duration) -> SF,
        SF: Future<Output = ()>,
        R: FnMut() -> RF,
        RF: Future<Output = ()>,
    {
        self.trigger_process(bearer, id).await?;

        let refresh = RefCell::new(refresh);
        let refresh = &refresh;
        let outcome = poll_bounded(policy, sleep, move |attempt| async move {
            match self.get(bearer, id).await {
                Ok(latest) => {
                    let reload = (refresh.borrow_mut())();
                    reload.await;
                    match latest {
                        Some(doc) if doc.status.is_terminal() => Probe::Ready(doc),
                        _ => Probe::Continue,
                    }
                }
                Err(e) if e.status() == Some(404) => Probe::Stop,
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "document status poll failed");
                    Probe::Continue
                }
            }
        })
        .await;
        tracing::debug!(id, attempts = outcome.attempts(), "document status poll finished");
        Ok(outcome)
    }

    /// # Errors
    ///
    /// Transport failures and non-2xx responses.
    pub async fn chunks(&self, bearer: Option<&str>, id: &str) -> Result<Vec<DocumentChunk>, ApiError> {
        let request = HttpRequest::get(self.url(&document_action_path(id, "chunks"))).bearer(bearer);
        let response = ensure_success(self.transport.send(request).await?)?;
        let body = response.json_value()?;
        Ok(body.get("data").and_then(Value::as_array).map(|items| lenient_items(items)).unwrap_or_default())
    }

    /// Absolute public `path` when available, else the backend view redirect.
    #[must_use]
    pub fn view_url(&self, doc: &Document) -> String {
        match doc.path.as_deref() {
            Some(path) if path.starts_with("http") => path.to_owned(),
            _ => self.url(&document_action_path(&doc.id, "view")),
        }
    }
}
