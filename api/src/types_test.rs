use super::*;
use serde_json::json;

fn profile(full_name: Option<&str>, name: Option<&str>, username: Option<&str>) -> Profile {
    Profile {
        id: "u1".into(),
        full_name: full_name.map(str::to_owned),
        name: name.map(str::to_owned),
        username: username.map(str::to_owned),
        role: None,
    }
}

fn session(email: Option<&str>) -> Session {
    Session {
        access_token: "tok".into(),
        refresh_token: None,
        expires_in: None,
        expires_at: None,
        token_type: None,
        user: SessionUser { id: "u1".into(), email: email.map(str::to_owned) },
    }
}

#[test]
fn profile_role_defaults_to_user() {
    let mut p = profile(None, None, None);
    assert_eq!(p.role(), Role::User);
    p.role = Some("ADMIN".into());
    assert!(p.is_admin());
    p.role = Some("dosen".into());
    assert_eq!(p.role(), Role::User);
}

#[test]
fn greeting_name_falls_back_in_order() {
    assert_eq!(profile(Some("Ani"), Some("A"), Some("a")).greeting_name(), "Ani");
    assert_eq!(profile(Some(" "), Some("Budi"), None).greeting_name(), "Budi");
    assert_eq!(profile(None, None, Some("cici")).greeting_name(), "cici");
    assert_eq!(profile(None, None, None).greeting_name(), "Mahasiswa");
}

#[test]
fn display_name_uses_session_email_last() {
    let s = session(Some("a@b.c"));
    assert_eq!(display_name(Some(&profile(Some("Ani"), None, None)), Some(&s)), "Ani");
    assert_eq!(display_name(Some(&profile(None, Some("Budi"), None)), Some(&s)), "Budi");
    assert_eq!(display_name(None, Some(&s)), "a@b.c");
    assert_eq!(display_name(None, None), "");
}

#[test]
fn document_accepts_numeric_id_and_missing_status() {
    let doc: Document = serde_json::from_value(json!({ "id": 42, "title": "Bab 1" })).unwrap();
    assert_eq!(doc.id, "42");
    assert_eq!(doc.status, DocumentStatus::Uploaded);
    assert_eq!(doc.display_title(), "Bab 1");
}

#[test]
fn document_status_null_reads_as_uploaded() {
    let doc: Document = serde_json::from_value(json!({ "id": "d1", "status": null, "uploadedBy": 7 })).unwrap();
    assert_eq!(doc.status, DocumentStatus::Uploaded);
    assert_eq!(doc.uploaded_by.as_deref(), Some("7"));
    assert_eq!(doc.display_title(), "d1");
}

#[test]
fn document_status_terminal_states() {
    assert!(DocumentStatus::parse("embedded").is_terminal());
    assert!(DocumentStatus::parse("Error").is_terminal());
    assert!(!DocumentStatus::parse("processing").is_terminal());
    assert_eq!(DocumentStatus::parse("queued"), DocumentStatus::Other("queued".into()));
}

#[test]
fn supabase_error_text_renders_objects() {
    let doc: Document =
        serde_json::from_value(json!({ "id": "d1", "supabase_error": { "code": "42501" } })).unwrap();
    assert_eq!(doc.supabase_error_text().as_deref(), Some(r#"{"code":"42501"}"#));

    let doc: Document = serde_json::from_value(json!({ "id": "d1", "supabase_error": "" })).unwrap();
    assert_eq!(doc.supabase_error_text(), None);
}

#[test]
fn chunk_display_text_fallbacks() {
    let chunk: DocumentChunk = serde_json::from_value(json!({ "text_preview": "pv" })).unwrap();
    assert_eq!(chunk.display_text(), "pv");
    let chunk: DocumentChunk = serde_json::from_value(json!({ "content": "c", "text": "t" })).unwrap();
    assert_eq!(chunk.display_text(), "c");
    assert_eq!(DocumentChunk::default().display_text(), "-");
}

#[test]
fn chat_message_serializes_lowercase_role() {
    let msg = ChatMessage::assistant("hi").with_saved(true);
    let value = serde_json::to_value(&msg).unwrap();
    assert_eq!(value["role"], "assistant");
    assert_eq!(value["metadata"]["saved"], true);
}

#[test]
fn session_expiry_applies_margin() {
    let mut s = session(None);
    assert!(!s.is_expired(i64::MAX - 1));

    s.expires_at = Some(1_000);
    assert!(s.is_expired(2_000));
    assert!(s.is_expired(1_000 - EXPIRY_MARGIN_SECS));
    assert!(!s.is_expired(1_000 - EXPIRY_MARGIN_SECS - 1));
}
