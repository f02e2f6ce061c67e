use super::*;
use api::chat::ChatOutcome;
use serde_json::json;

#[test]
fn begin_listening_clears_previous_attempt() {
    let mut state = SpeechState { transcript: "lama".into(), error: Some("x".into()), ..SpeechState::default() };
    state.begin_listening();
    assert!(state.listening);
    assert!(state.transcript.is_empty());
    assert!(state.error.is_none());
    assert_eq!(state.avatar_mode(), AvatarMode::Listening);
}

#[test]
fn recording_error_is_reported() {
    let mut state = SpeechState::default();
    state.begin_listening();
    state.recording_failed("no-speech");
    assert!(!state.listening);
    assert_eq!(state.error.as_deref(), Some("Kesalahan saat merekam: no-speech"));
}

#[test]
fn reply_is_returned_for_playback() {
    let mut state = SpeechState::default();
    state.begin_send();
    let outcome = ChatOutcome::from_value(&json!({
        "reply": "Saya senang membantu",
        "top_chunks": [{ "document_title": "Modul", "text": "isi" }],
    }));
    let speak = state.finish_send("halo", SendOutcome::Finished(Ok(outcome)));
    assert_eq!(speak.as_deref(), Some("Saya senang membantu"));
    assert!(!state.sending);
    assert_eq!(state.chunks.len(), 1);
    assert_eq!(state.expression, Expression::Happy);
}

#[test]
fn empty_reply_uses_question_for_expression() {
    let mut state = SpeechState::default();
    state.begin_send();
    let outcome = ChatOutcome::from_value(&json!({ "reply": "" }));
    let speak = state.finish_send("aku sedih", SendOutcome::Finished(Ok(outcome)));
    assert_eq!(speak, None);
    assert_eq!(state.expression, Expression::Sad);
}

#[test]
fn failed_send_shows_inline_error() {
    let mut state = SpeechState::default();
    state.begin_send();
    let err = ApiError::Status { status: 502, message: "HTTP 502".into() };
    assert_eq!(state.finish_send("halo", SendOutcome::Finished(Err(err))), None);
    assert_eq!(state.error.as_deref(), Some("Gagal mengirim pertanyaan: Server 502: HTTP 502"));
    assert!(!state.sending);
}

#[test]
fn halt_stops_everything() {
    let mut state = SpeechState { listening: true, playing: true, ..SpeechState::default() };
    assert_eq!(state.avatar_mode(), AvatarMode::Speaking);
    state.halt();
    assert_eq!(state.avatar_mode(), AvatarMode::Idle);
}

fn chunk(index: Option<i64>, score: Option<f64>) -> TopChunk {
    TopChunk { document_title: "Modul".into(), chunk_index: index, similarity: score, text: "isi".into() }
}

#[test]
fn chunk_meta_reads_missing_similarity_as_zero() {
    assert_eq!(chunk_meta(&chunk(Some(4), Some(0.81234))), "idx:4 sim:0.812");
    assert_eq!(chunk_meta(&chunk(None, None)), "idx:- sim:0.000");
}

#[test]
fn lost_render_context_is_shown_until_restored() {
    let mut state = SpeechState::default();
    state.rendering_lost();
    assert_eq!(state.error.as_deref(), Some(RENDER_CONTEXT_LOST));
    state.rendering_restored();
    assert!(state.error.is_none());
}

#[test]
fn restored_render_keeps_other_errors() {
    let mut state = SpeechState::default();
    state.rendering_lost();
    state.recording_failed("no-speech");
    state.rendering_restored();
    assert_eq!(state.error.as_deref(), Some("Kesalahan saat merekam: no-speech"));
}
