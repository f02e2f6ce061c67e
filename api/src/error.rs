//! Error taxonomy for backend and identity calls.
//!
//! ERROR HANDLING
//! ==============
//! Every variant renders as a message that can be shown to the user as-is
//! (alert text or inline notice). Call sites never let these escape as
//! unhandled faults; aborted chat requests are not errors at all and are
//! reported through `chat::SendOutcome::Superseded` instead.

/// Failure below HTTP semantics: no response was received.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request could not be built: {0}")]
    Request(String),
}

/// Client-side rejection of an upload before any request is issued.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("Pilih file terlebih dahulu")]
    MissingFile,
    #[error("Hanya PDF")]
    NotPdf { mime: String },
    #[error("Maks {max_mb}MB")]
    TooLarge { size: u64, max_mb: u64 },
}

/// Error returned by every backend/identity operation in this crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// No response (DNS, CORS, connection reset, ...).
    #[error(transparent)]
    Network(#[from] TransportError),
    /// Non-2xx response. `message` is the server's `message`/`error` field
    /// or an `HTTP {status}` fallback.
    #[error("{message}")]
    Status { status: u16, message: String },
    /// 2xx response whose content type is not JSON (typically an HTML page).
    #[error("expected JSON response but got `{content_type}`")]
    NonJson { content_type: String },
    /// JSON content type but an unparsable body.
    #[error("malformed response body: {0}")]
    Malformed(String),
    /// A mutation was attempted without a bearer token.
    #[error("Login sebagai admin dulu.")]
    MissingToken,
    #[error(transparent)]
    InvalidUpload(#[from] UploadError),
    /// Identity service rejected the request (bad credentials, duplicate
    /// account, ...).
    #[error("{0}")]
    Identity(String),
}

impl ApiError {
    /// HTTP status carried by the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Inline assistant notice shown in the chat box for a failed turn.
    #[must_use]
    pub fn chat_notice(&self) -> String {
        match self {
            Self::Status { status, .. } => {
                format!("Server error: {status}. Lihat console untuk detail.")
            }
            Self::NonJson { .. } => "Response server bukan JSON (cek server logs).".to_owned(),
            _ => "Terjadi error jaringan.".to_owned(),
        }
    }
}
