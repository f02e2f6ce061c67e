use super::*;
use crate::error::TransportError;
use crate::http::RequestBody;
use crate::testing::{FakeTransport, html_response, json_response};
use futures::channel::oneshot;
use futures::executor::block_on;
use serde_json::json;

fn chunk(title: &str) -> Value {
    json!({ "document_title": title, "chunk_index": 1, "similarity": 0.5, "text": "isi" })
}

// =============================================================================
// normalize_chunks / derive_has_context
// =============================================================================

#[test]
fn top_chunks_are_capped_at_three() {
    let data = json!({ "top_chunks": [chunk("a"), chunk("b"), chunk("c"), chunk("d"), chunk("e")] });
    let chunks = normalize_chunks(&data);
    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[2].document_title, "c");
}

#[test]
fn empty_top_chunks_fall_back_to_chunks() {
    let data = json!({ "top_chunks": [], "chunks": [chunk("x"), chunk("y"), chunk("z"), chunk("w")] });
    let chunks = normalize_chunks(&data);
    assert_eq!(chunks.iter().map(|c| c.document_title.as_str()).collect::<Vec<_>>(), ["x", "y", "z"]);
}

#[test]
fn camel_case_top_chunks_alias_is_read() {
    let data = json!({ "topChunks": [chunk("alias")], "chunks": [chunk("other")] });
    assert_eq!(normalize_chunks(&data)[0].document_title, "alias");
}

#[test]
fn chunk_fields_get_defaults() {
    let data = json!({ "chunks": [
        { "document_id": 9, "similarity": "0.25" },
        { "document_title": "", "text": null, "similarity": "n/a" },
    ]});
    let chunks = normalize_chunks(&data);
    assert_eq!(chunks[0].document_title, "9");
    assert_eq!(chunks[0].similarity, Some(0.25));
    assert_eq!(chunks[0].chunk_index, None);
    assert_eq!(chunks[0].text, MISSING_CHUNK_TEXT);
    assert_eq!(chunks[1].document_title, "unknown");
    assert_eq!(chunks[1].similarity, None);
    assert_eq!(chunks[1].text, MISSING_CHUNK_TEXT);
}

#[test]
fn has_context_precedence() {
    let some = normalize_chunks(&json!({ "chunks": [chunk("a")] }));
    assert!(derive_has_context(&json!({ "has_context": false }), &some));
    assert!(!derive_has_context(&json!({ "has_context": false, "out_of_context": false }), &[]));
    assert!(!derive_has_context(&json!({ "has_context": null }), &[]));
    assert!(derive_has_context(&json!({ "has_context": 1 }), &[]));
    assert!(!derive_has_context(&json!({ "out_of_context": true }), &[]));
    assert!(derive_has_context(&json!({ "out_of_context": 0 }), &[]));
    assert!(derive_has_context(&json!({}), &[]));
}

// =============================================================================
// strip_generative_preface
// =============================================================================

#[test]
fn preface_paragraph_is_removed() {
    let text = "  Catatan: jawaban ini bersifat umum.\nMohon dicek.\n\n\nJawaban utama.  ";
    assert_eq!(strip_generative_preface(text), "Jawaban utama.");
}

#[test]
fn preface_match_is_case_insensitive() {
    assert_eq!(strip_generative_preface("DISCLAIMER something\n\nBody"), "Body");
    assert_eq!(strip_generative_preface("note:\n\nBody"), "Body");
}

#[test]
fn one_line_preface_needs_generative_marker() {
    let text = "Note: ini jawaban generatif\nIsi jawaban";
    assert_eq!(strip_generative_preface(text), "Isi jawaban");

    let text = "Catatan: pertanyaan di luar cakupan dokumen\nIsi";
    assert_eq!(strip_generative_preface(text), "Isi");

    let text = "Catatan: harap dibaca\nIsi";
    assert_eq!(strip_generative_preface(text), text);
}

#[test]
fn one_line_preface_without_newline_is_kept() {
    let text = "Note: jawaban generatif tanpa baris baru";
    assert_eq!(strip_generative_preface(text), text);
}

#[test]
fn non_preface_text_is_unchanged() {
    let text = "Fotosintesis adalah proses...\n\nCatatan: generatif";
    assert_eq!(strip_generative_preface(text), text);
}

// =============================================================================
// ChatOutcome
// =============================================================================

#[test]
fn outcome_keeps_preface_without_context() {
    let data = json!({ "reply": "Catatan: ini generatif\nJawaban", "has_context": false });
    let outcome = ChatOutcome::from_value(&data);
    assert!(!outcome.has_context);
    assert!(outcome.chunks.is_empty());
    assert_eq!(outcome.reply.as_deref(), Some("Catatan: ini generatif\nJawaban"));
}

#[test]
fn outcome_strips_preface_with_context() {
    let data = json!({ "reply": "Catatan: ini generatif\nJawaban", "top_chunks": [chunk("a")], "saved": true });
    let outcome = ChatOutcome::from_value(&data);
    assert!(outcome.has_context);
    assert_eq!(outcome.reply.as_deref(), Some("Jawaban"));
    assert_eq!(outcome.assistant_message(), ChatMessage::assistant("Jawaban").with_saved(true));
}

#[test]
fn outcome_without_reply_uses_failure_message() {
    let outcome = ChatOutcome::from_value(&json!({ "reply": "" }));
    assert_eq!(outcome.reply, None);
    assert_eq!(outcome.assistant_message(), ChatMessage::assistant(NO_REPLY_MESSAGE));
}

// =============================================================================
// ChatClient / ChatSession
// =============================================================================

#[test]
fn ask_posts_question_with_bearer() {
    let fake = FakeTransport::new().respond(json_response(200, &json!({ "reply": "hai" })));
    let client = ChatClient::new(&fake, "http://backend/");
    let outcome = block_on(client.ask("halo", Some("tok"), Some(3))).unwrap();
    assert_eq!(outcome.reply.as_deref(), Some("hai"));

    let requests = fake.requests();
    assert_eq!(requests[0].url, "http://backend/api/chat");
    assert_eq!(requests[0].header_value("Authorization"), Some("Bearer tok"));
    assert_eq!(requests[0].body, RequestBody::Json(json!({ "question": "halo", "k": 3 })));
}

#[test]
fn html_404_is_a_status_error() {
    let fake = FakeTransport::new().respond(html_response(404, "<html>Not Found</html>"));
    let client = ChatClient::new(&fake, "");
    let err = block_on(client.ask("halo", None, None)).unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.chat_notice(), "Server error: 404. Lihat console untuk detail.");
}

#[test]
fn non_json_200_is_reported() {
    let fake = FakeTransport::new().respond(html_response(200, "<html></html>"));
    let client = ChatClient::new(&fake, "");
    let err = block_on(client.ask("halo", None, None)).unwrap_err();
    assert!(matches!(err, ApiError::NonJson { .. }));
    assert_eq!(err.chat_notice(), "Response server bukan JSON (cek server logs).");
}

#[test]
fn network_failure_maps_to_network_notice() {
    let fake = FakeTransport::new().fail(TransportError::Network("connection refused".into()));
    let client = ChatClient::new(&fake, "");
    let err = block_on(client.ask("halo", None, None)).unwrap_err();
    assert_eq!(err.chat_notice(), "Terjadi error jaringan.");
}

#[test]
fn blank_question_sends_nothing() {
    let fake = FakeTransport::new();
    let session = ChatSession::new(ChatClient::new(&fake, ""));
    assert_eq!(block_on(session.send("   \n", None)), SendOutcome::Skipped);
    assert_eq!(fake.calls(), 0);
}

#[test]
fn send_makes_exactly_one_call() {
    let fake = FakeTransport::new().respond(json_response(200, &json!({ "reply": "ok" })));
    let session = ChatSession::new(ChatClient::new(&fake, ""));
    let outcome = block_on(session.send("  halo  ", None));
    assert_eq!(fake.calls(), 1);
    assert!(matches!(outcome, SendOutcome::Finished(Ok(ref o)) if o.reply.as_deref() == Some("ok")));
    assert!(!session.in_flight());
    assert_eq!(fake.requests()[0].body, RequestBody::Json(json!({ "question": "halo" })));
}

#[test]
fn second_send_aborts_first() {
    let (_release, gate) = oneshot::channel::<()>();
    let fake = FakeTransport::new()
        .gate_first(gate)
        .respond(json_response(200, &json!({ "reply": "pertama" })))
        .respond(json_response(200, &json!({ "reply": "kedua" })));
    let session = ChatSession::new(ChatClient::new(&fake, ""));

    let (first, second) = block_on(async { futures::join!(session.send("satu", None), session.send("dua", None)) });

    assert_eq!(fake.calls(), 2);
    assert_eq!(first, SendOutcome::Superseded);
    assert!(matches!(second, SendOutcome::Finished(Ok(ref o)) if o.reply.as_deref() == Some("kedua")));
}

#[test]
fn cancel_supersedes_in_flight_send() {
    let (_release, gate) = oneshot::channel::<()>();
    let fake = FakeTransport::new().gate_first(gate);
    let session = ChatSession::new(ChatClient::new(&fake, ""));

    let (outcome, ()) = block_on(async {
        futures::join!(session.send("satu", None), async {
            session.cancel();
        })
    });
    assert_eq!(outcome, SendOutcome::Superseded);
}

#[test]
fn with_top_k_sends_k() {
    let fake = FakeTransport::new();
    let session = ChatSession::new(ChatClient::new(&fake, "")).with_top_k(3);
    let _ = block_on(session.send("halo", Some("tok")));
    assert_eq!(fake.requests()[0].body, RequestBody::Json(json!({ "question": "halo", "k": 3 })));
}
