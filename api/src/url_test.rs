use super::*;

#[test]
fn join_api_url_empty_base_is_relative() {
    assert_eq!(join_api_url("", "/api/chat"), "/api/chat");
    assert_eq!(join_api_url("   ", "api/chat"), "/api/chat");
}

#[test]
fn join_api_url_avoids_double_slash() {
    assert_eq!(join_api_url("http://localhost:8787/", "/api/chat"), "http://localhost:8787/api/chat");
    assert_eq!(join_api_url("http://localhost:8787//", "api/chat"), "http://localhost:8787/api/chat");
    assert_eq!(join_api_url("http://localhost:8787", "/api/chat"), "http://localhost:8787/api/chat");
}

#[test]
fn join_api_url_keeps_base_prefix() {
    assert_eq!(
        join_api_url("https://tutor.example.com/backend/", "/api/admin/documents"),
        "https://tutor.example.com/backend/api/admin/documents"
    );
}

#[test]
fn document_paths_format_ids() {
    assert_eq!(document_path("d1"), "/api/admin/documents/d1");
    assert_eq!(document_action_path("d1", "process"), "/api/admin/documents/d1/process");
    assert_eq!(document_action_path("d1", "chunks"), "/api/admin/documents/d1/chunks");
}
