//! Voice page state: recognition, chat round-trip, and playback flags.
//!
//! DESIGN
//! ======
//! The browser callbacks only flip flags here; the transcript to send is
//! carried by the recognition closure itself, never read back from this
//! struct, so a late `end` event cannot send a stale transcript.

#[cfg(test)]
#[path = "speech_test.rs"]
mod speech_test;

use api::ApiError;
use api::chat::SendOutcome;
use api::types::TopChunk;

use crate::util::avatar::{AvatarMode, Expression};
use crate::util::format::{chunk_index, similarity};

/// `idx:<n> sim:<0.000>` line under a voice-page chunk; a missing score reads as zero.
pub fn chunk_meta(chunk: &TopChunk) -> String {
    let score = similarity(Some(chunk.similarity.unwrap_or(0.0)), 3, "0.000");
    format!("idx:{} sim:{score}", chunk_index(chunk.chunk_index))
}

pub const RECOGNITION_UNSUPPORTED: &str = "SpeechRecognition tidak didukung di browser ini.";
pub const SYNTHESIS_UNSUPPORTED: &str = "TTS tidak didukung di browser ini.";
pub const PLAYBACK_FAILED: &str = "Kesalahan saat memutar suara.";
pub const RENDER_CONTEXT_LOST: &str = "Rendering terhenti (context lost). Mencoba memuat ulang scene...";

#[derive(Clone, Debug, Default)]
pub struct SpeechState {
    pub listening: bool,
    pub sending: bool,
    pub playing: bool,
    pub transcript: String,
    pub reply: String,
    pub chunks: Vec<TopChunk>,
    pub error: Option<String>,
    pub expression: Expression,
}

impl SpeechState {
    pub fn avatar_mode(&self) -> AvatarMode {
        AvatarMode::from_flags(self.listening, self.playing)
    }

    pub fn begin_listening(&mut self) {
        self.error = None;
        self.transcript.clear();
        self.listening = true;
    }

    pub fn recording_failed(&mut self, reason: &str) {
        self.error = Some(format!("Kesalahan saat merekam: {reason}"));
        self.listening = false;
    }

    pub fn begin_send(&mut self) {
        self.sending = true;
        self.error = None;
        self.reply.clear();
        self.chunks.clear();
    }

    /// Fold a finished send in. Returns the reply to speak, if any.
    pub fn finish_send(&mut self, question: &str, outcome: SendOutcome) -> Option<String> {
        match outcome {
            SendOutcome::Superseded => None,
            SendOutcome::Skipped => {
                self.sending = false;
                None
            }
            SendOutcome::Finished(Ok(outcome)) => {
                self.sending = false;
                self.reply = outcome.reply.unwrap_or_default();
                self.chunks = outcome.chunks;
                let basis = if self.reply.is_empty() { question } else { self.reply.as_str() };
                self.expression = Expression::detect(basis);
                Some(self.reply.clone()).filter(|r| !r.trim().is_empty())
            }
            SendOutcome::Finished(Err(err)) => {
                self.sending = false;
                self.error = Some(format!("Gagal mengirim pertanyaan: {}", send_error_text(&err)));
                None
            }
        }
    }

    /// The avatar canvas lost its drawing context; shown until it resumes.
    pub fn rendering_lost(&mut self) {
        self.error = Some(RENDER_CONTEXT_LOST.to_owned());
    }

    /// Drawing resumed. Only clears the error if it is still the render notice.
    pub fn rendering_restored(&mut self) {
        if self.error.as_deref() == Some(RENDER_CONTEXT_LOST) {
            self.error = None;
        }
    }

    /// Stop pressed or page left: nothing is listening or playing.
    pub fn halt(&mut self) {
        self.listening = false;
        self.playing = false;
    }
}

fn send_error_text(err: &ApiError) -> String {
    match err {
        ApiError::Status { status, message } => format!("Server {status}: {message}"),
        other => other.to_string(),
    }
}
