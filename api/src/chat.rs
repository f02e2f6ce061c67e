//! Chat transport: question in, normalized assistant turn out.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend answers `POST /api/chat {question, k?}` with a loosely shaped
//! JSON object (`reply`, `top_chunks` or `chunks`, `has_context` or
//! `out_of_context`, `saved`). This module normalizes that shape into a
//! [`ChatOutcome`] the UI can render directly.
//!
//! DESIGN
//! ======
//! [`ChatClient`] performs one request. [`ChatSession`] wraps it with
//! latest-request-wins semantics: starting a send aborts whatever the same
//! session still has in flight, and only the most recent request produces a
//! [`SendOutcome::Finished`].

use std::sync::Mutex;

use futures::future::{AbortHandle, Abortable};
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::http::{HttpRequest, Transport, server_error_message};
use crate::types::{ChatMessage, TopChunk};
use crate::url::join_api_url;

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

pub const CHAT_PATH: &str = "/api/chat";

/// Upper bound on context chunks forwarded per turn.
pub const MAX_TOP_CHUNKS: usize = 3;

pub const NO_REPLY_MESSAGE: &str = "Gagal mendapatkan jawaban dari server.";
pub const MISSING_CHUNK_TEXT: &str = "(tidak ada teks chunk)";

const PREFACE_KEYWORDS: [&str; 3] = ["catatan", "note", "disclaimer"];
const PREFACE_MARKERS: [&str; 2] = ["generatif", "luar cakupan"];

// =============================================================================
// NORMALIZATION
// =============================================================================

/// Loose JS-style truthiness for backend flags.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn non_empty_array<'a>(data: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    data.get(key).and_then(Value::as_array).filter(|items| !items.is_empty())
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn normalize_chunk(raw: &Value) -> TopChunk {
    let document_title = ["document_title", "document_id"]
        .iter()
        .filter_map(|key| raw.get(*key))
        .find(|v| truthy(v))
        .and_then(value_text)
        .unwrap_or_else(|| "unknown".to_owned());

    let chunk_index = raw.get("chunk_index").and_then(Value::as_i64);

    let similarity = raw.get("similarity").and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    });

    let text = raw
        .get("text")
        .and_then(value_text)
        .unwrap_or_else(|| MISSING_CHUNK_TEXT.to_owned());

    TopChunk { document_title, chunk_index, similarity, text }
}

/// Pick the chunk list from a chat response and cap it at [`MAX_TOP_CHUNKS`].
///
/// A non-empty `top_chunks` (or its camel-case alias `topChunks`) wins over
/// a non-empty `chunks`; anything else yields no chunks.
#[must_use]
pub fn normalize_chunks(data: &Value) -> Vec<TopChunk> {
    non_empty_array(data, "top_chunks")
        .or_else(|| non_empty_array(data, "topChunks"))
        .or_else(|| non_empty_array(data, "chunks"))
        .map(|items| items.iter().take(MAX_TOP_CHUNKS).map(normalize_chunk).collect())
        .unwrap_or_default()
}

/// Whether the answer was grounded in retrieved context.
///
/// Precedence: any chunks, then an explicit `has_context` (present even when
/// null), then the negation of `out_of_context`.
#[must_use]
pub fn derive_has_context(data: &Value, chunks: &[TopChunk]) -> bool {
    if !chunks.is_empty() {
        return true;
    }
    if let Some(flag) = data.get("has_context") {
        return truthy(flag);
    }
    !data.get("out_of_context").is_some_and(truthy)
}

fn starts_with_keyword(text: &str) -> Option<&str> {
    PREFACE_KEYWORDS.iter().find_map(|keyword| {
        text.get(..keyword.len())
            .filter(|head| head.eq_ignore_ascii_case(keyword))
            .map(|_| &text[keyword.len()..])
    })
}

/// Remove a "this answer is generative" preface the model sometimes emits.
///
/// A leading `Catatan`/`Note`/`Disclaimer` paragraph separated by a blank
/// line is removed outright. A one-line preface is dropped only when the
/// text mentions `generatif` or `luar cakupan`.
#[must_use]
pub fn strip_generative_preface(text: &str) -> String {
    let lead = text.trim_start();
    let Some(rest) = starts_with_keyword(lead) else {
        return text.to_owned();
    };

    if let Some(pos) = rest.find("\n\n") {
        return rest[pos..].trim().to_owned();
    }

    let separated = rest.chars().next().is_some_and(|c| c == ':' || c.is_whitespace());
    let lower = text.to_lowercase();
    if separated && PREFACE_MARKERS.iter().any(|marker| lower.contains(marker)) {
        if let Some(idx) = text.find('\n').filter(|idx| *idx > 0) {
            return text[idx..].trim().to_owned();
        }
    }
    text.to_owned()
}

/// One normalized assistant turn.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChatOutcome {
    /// Reply text after preface stripping; `None` when the backend gave none.
    pub reply: Option<String>,
    pub chunks: Vec<TopChunk>,
    pub has_context: bool,
    pub saved: bool,
}

impl ChatOutcome {
    #[must_use]
    pub fn from_value(data: &Value) -> Self {
        let chunks = normalize_chunks(data);
        let has_context = derive_has_context(data, &chunks);
        let reply = data
            .get("reply")
            .and_then(Value::as_str)
            .filter(|r| !r.is_empty())
            .map(|r| if has_context { strip_generative_preface(r) } else { r.to_owned() })
            .filter(|r| !r.is_empty());
        let saved = data.get("saved").is_some_and(truthy);
        Self { reply, chunks, has_context, saved }
    }

    /// The message appended to the transcript for this turn.
    #[must_use]
    pub fn assistant_message(&self) -> ChatMessage {
        match &self.reply {
            Some(reply) => ChatMessage::assistant(reply.clone()).with_saved(self.saved),
            None => ChatMessage::assistant(NO_REPLY_MESSAGE),
        }
    }
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct ChatClient<T> {
    transport: T,
    base_url: String,
}

impl<T: Transport> ChatClient<T> {
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        Self { transport, base_url: base_url.into() }
    }

    /// Send one question.
    ///
    /// # Errors
    ///
    /// [`ApiError::Status`] for non-2xx, [`ApiError::NonJson`] for a 2xx
    /// that is not JSON, [`ApiError::Malformed`] for unparsable JSON, and
    /// [`ApiError::Network`] when no response arrived.
    pub async fn ask(&self, question: &str, bearer: Option<&str>, k: Option<u32>) -> Result<ChatOutcome, ApiError> {
        let mut body = json!({ "question": question });
        if let Some(k) = k {
            body["k"] = json!(k);
        }
        let request = HttpRequest::post(join_api_url(&self.base_url, CHAT_PATH))
            .bearer(bearer)
            .json(body);

        let response = self.transport.send(request).await?;

        if !response.is_success() {
            tracing::error!(status = response.status, body = %response.body, "chat endpoint returned non-OK status");
            return Err(ApiError::Status { status: response.status, message: server_error_message(&response) });
        }
        if !response.is_json() {
            let content_type = response.content_type.clone().unwrap_or_default();
            tracing::error!(%content_type, body = %response.body, "chat endpoint returned non-JSON body");
            return Err(ApiError::NonJson { content_type });
        }

        let data = response.json_value()?;
        Ok(ChatOutcome::from_value(&data))
    }
}

// =============================================================================
// LATEST-REQUEST-WINS SESSION
// =============================================================================

#[derive(Debug, Default)]
struct LatestInner {
    generation: u64,
    handle: Option<AbortHandle>,
}

/// Tracks the single in-flight request of one chat box.
#[derive(Debug, Default)]
pub struct LatestRequest {
    inner: Mutex<LatestInner>,
}

impl LatestRequest {
    /// Abort the current request (if any) and register `handle` as the new
    /// one. Returns the new generation.
    pub fn begin(&self, handle: AbortHandle) -> u64 {
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(previous) = inner.handle.take() {
            previous.abort();
        }
        inner.generation += 1;
        inner.handle = Some(handle);
        inner.generation
    }

    /// Clear the registration if `generation` is still current. Returns
    /// whether it was.
    pub fn finish(&self, generation: u64) -> bool {
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        if inner.generation == generation {
            inner.handle = None;
            true
        } else {
            false
        }
    }

    /// Abort whatever is in flight and invalidate its generation.
    pub fn cancel(&self) {
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(previous) = inner.handle.take() {
            previous.abort();
        }
        inner.generation += 1;
    }

    #[must_use]
    pub fn in_flight(&self) -> bool {
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner).handle.is_some()
    }
}

/// Result of [`ChatSession::send`].
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// The question was blank; nothing was sent.
    Skipped,
    /// A newer send or a cancel replaced this request; apply nothing.
    Superseded,
    Finished(Result<ChatOutcome, ApiError>),
}

pub struct ChatSession<T> {
    client: ChatClient<T>,
    latest: LatestRequest,
    top_k: Option<u32>,
}

impl<T: Transport> ChatSession<T> {
    pub fn new(client: ChatClient<T>) -> Self {
        Self { client, latest: LatestRequest::default(), top_k: None }
    }

    /// Request `k` context chunks with every question.
    #[must_use]
    pub fn with_top_k(mut self, k: u32) -> Self {
        self.top_k = Some(k);
        self
    }

    /// Send `question` (trimmed), aborting any request still in flight.
    pub async fn send(&self, question: &str, bearer: Option<&str>) -> SendOutcome {
        let question = question.trim();
        if question.is_empty() {
            return SendOutcome::Skipped;
        }

        let (handle, registration) = AbortHandle::new_pair();
        let generation = self.latest.begin(handle);
        let result = Abortable::new(self.client.ask(question, bearer, self.top_k), registration).await;
        let current = self.latest.finish(generation);

        match result {
            Ok(result) if current => SendOutcome::Finished(result),
            Ok(_) | Err(_) => {
                tracing::debug!(generation, "chat request aborted");
                SendOutcome::Superseded
            }
        }
    }

    /// Abort the in-flight request, e.g. on session change or unmount.
    pub fn cancel(&self) {
        self.latest.cancel();
    }

    #[must_use]
    pub fn in_flight(&self) -> bool {
        self.latest.in_flight()
    }
}
