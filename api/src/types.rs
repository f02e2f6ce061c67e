//! Wire DTOs shared by the identity service, the backend, and the UI.
//!
//! Deserialization is deliberately lenient: backend fields are optional and
//! document ids arrive as either strings or numbers.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

// =============================================================================
// SESSION / PROFILE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Identity-service session. The client only ever reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub token_type: Option<String>,
    pub user: SessionUser,
}

/// Seconds before `expires_at` at which a session already counts as expired.
pub const EXPIRY_MARGIN_SECS: i64 = 30;

impl Session {
    /// True when the access token is past (or within the margin of) its
    /// expiry. A session without `expires_at` never expires client-side.
    #[must_use]
    pub fn is_expired(&self, now_secs: i64) -> bool {
        self.expires_at.is_some_and(|at| at - EXPIRY_MARGIN_SECS <= now_secs)
    }

    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user.id
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.user.email.as_deref().filter(|e| !e.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("admin") { Self::Admin } else { Self::User }
    }
}

/// Row of the `profiles` table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.trim().is_empty())
}

impl Profile {
    /// Role with the `user` default applied.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role.as_deref().map(Role::parse).unwrap_or_default()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role() == Role::Admin
    }

    /// Greeting name on the user page.
    #[must_use]
    pub fn greeting_name(&self) -> &str {
        non_empty(self.full_name.as_ref())
            .or_else(|| non_empty(self.name.as_ref()))
            .or_else(|| non_empty(self.username.as_ref()))
            .unwrap_or("Mahasiswa")
    }
}

/// Header display name: `full_name`, then `name`, then the session email.
#[must_use]
pub fn display_name(profile: Option<&Profile>, session: Option<&Session>) -> String {
    profile
        .and_then(|p| non_empty(p.full_name.as_ref()).or_else(|| non_empty(p.name.as_ref())))
        .or_else(|| session.and_then(Session::email))
        .unwrap_or_default()
        .to_owned()
}

// =============================================================================
// CHAT
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MessageMetadata {
    #[serde(default)]
    pub saved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    #[serde(default)]
    pub metadata: Option<MessageMetadata>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: ChatRole::User, content: content.into(), metadata: None }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: ChatRole::Assistant, content: content.into(), metadata: None }
    }

    #[must_use]
    pub fn with_saved(mut self, saved: bool) -> Self {
        self.metadata = Some(MessageMetadata { saved });
        self
    }
}

/// Retrieved context chunk attached to a chat turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopChunk {
    pub document_title: String,
    #[serde(default)]
    pub chunk_index: Option<i64>,
    #[serde(default)]
    pub similarity: Option<f64>,
    pub text: String,
}

// =============================================================================
// DOCUMENTS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DocumentStatus {
    #[default]
    Uploaded,
    Processing,
    Embedded,
    Error,
    Other(String),
}

impl DocumentStatus {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "uploaded" => Self::Uploaded,
            "processing" => Self::Processing,
            "embedded" => Self::Embedded,
            "error" => Self::Error,
            other => Self::Other(other.to_owned()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Uploaded => "uploaded",
            Self::Processing => "processing",
            Self::Embedded => "embedded",
            Self::Error => "error",
            Self::Other(raw) => raw,
        }
    }

    /// `embedded` and `error` end a processing poll.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Embedded | Self::Error)
    }
}

impl Serialize for DocumentStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DocumentStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Self::parse).unwrap_or_default())
    }
}

fn id_from_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn opt_id_from_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(deserialize_with = "id_from_value")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub chunk_count: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, rename = "uploadedBy", alias = "uploaded_by", deserialize_with = "opt_id_from_value")]
    pub uploaded_by: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub supabase_error: Option<Value>,
}

impl Document {
    /// Title shown in the list; falls back to the id.
    #[must_use]
    pub fn display_title(&self) -> &str {
        non_empty(self.title.as_ref()).unwrap_or(&self.id)
    }

    /// `supabase_error` rendered as text, if present.
    #[must_use]
    pub fn supabase_error_text(&self) -> Option<String> {
        match self.supabase_error.as_ref()? {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// One chunk in the admin chunk viewer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentChunk {
    #[serde(default, deserialize_with = "opt_id_from_value")]
    pub id: Option<String>,
    #[serde(default)]
    pub chunk_index: Option<i64>,
    #[serde(default)]
    pub tokens: Option<i64>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub text_preview: Option<String>,
}

impl DocumentChunk {
    #[must_use]
    pub fn display_text(&self) -> &str {
        non_empty(self.content.as_ref())
            .or_else(|| non_empty(self.text.as_ref()))
            .or_else(|| non_empty(self.text_preview.as_ref()))
            .unwrap_or("-")
    }
}

// =============================================================================
// HISTORY
// =============================================================================

/// Row of the `chats` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSummary {
    #[serde(deserialize_with = "id_from_value")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Row of the `messages` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryMessage {
    pub role: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl HistoryMessage {
    #[must_use]
    pub fn is_user(&self) -> bool {
        self.role == "user"
    }
}
