//! Transcript state for one chat box.
//!
//! DESIGN
//! ======
//! The chat box owns a `ChatSession` (latest request wins) and this struct.
//! `begin_send` records the question; `finish` folds the session's
//! [`SendOutcome`] back in and yields the context the parent should show.
//! A superseded outcome changes nothing, since the newer request owns the
//! loading flag.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use api::chat::SendOutcome;
use api::types::{ChatMessage, ChatRole, TopChunk};

/// A transcript entry with a stable key for keyed rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatEntry {
    pub id: String,
    pub message: ChatMessage,
}

impl ChatEntry {
    fn new(message: ChatMessage) -> Self {
        Self { id: uuid::Uuid::new_v4().to_string(), message }
    }

    pub fn is_user(&self) -> bool {
        self.message.role == ChatRole::User
    }
}

/// Retrieved context emitted to the parent after each turn.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatContext {
    pub chunks: Vec<TopChunk>,
    pub has_context: bool,
}

#[derive(Clone, Debug, Default)]
pub struct ChatState {
    pub entries: Vec<ChatEntry>,
    pub loading: bool,
}

impl ChatState {
    /// Record a question. Returns the trimmed text, or `None` for a blank
    /// question (nothing is recorded).
    pub fn begin_send(&mut self, question: &str) -> Option<String> {
        let question = question.trim();
        if question.is_empty() {
            return None;
        }
        self.entries.push(ChatEntry::new(ChatMessage::user(question)));
        self.loading = true;
        Some(question.to_owned())
    }

    /// Apply a finished send. Returns the context to forward, if any.
    pub fn finish(&mut self, outcome: SendOutcome) -> Option<ChatContext> {
        match outcome {
            SendOutcome::Skipped | SendOutcome::Superseded => None,
            SendOutcome::Finished(Ok(outcome)) => {
                self.entries.push(ChatEntry::new(outcome.assistant_message()));
                self.loading = false;
                Some(ChatContext { chunks: outcome.chunks, has_context: outcome.has_context })
            }
            SendOutcome::Finished(Err(err)) => {
                self.entries.push(ChatEntry::new(ChatMessage::assistant(err.chat_notice())));
                self.loading = false;
                Some(ChatContext::default())
            }
        }
    }
}
