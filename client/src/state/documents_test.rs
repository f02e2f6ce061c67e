use super::*;

fn doc(id: &str) -> Document {
    Document { id: id.to_owned(), title: Some(format!("Modul {id}")), ..Document::default() }
}

#[test]
fn failed_load_keeps_rows_and_reports() {
    let mut state = DocumentsState::default();
    state.begin_load();
    state.finish_load(Ok(vec![doc("1"), doc("2")]));
    state.begin_load();
    assert!(state.error.is_none());
    state.finish_load(Err("HTTP 500".into()));
    assert_eq!(state.docs.len(), 2);
    assert_eq!(state.error.as_deref(), Some("HTTP 500"));
    assert!(!state.loading_docs);
}

#[test]
fn busy_flags_are_per_document() {
    let mut state = DocumentsState::default();
    state.update_busy("1", |b| b.deleting = true);
    assert!(state.busy("1").deleting);
    assert_eq!(state.busy("2"), ItemBusy::default());
}

#[test]
fn processing_id_marks_only_that_row() {
    let state = DocumentsState { processing_id: Some("7".into()), ..DocumentsState::default() };
    assert!(state.is_processing("7"));
    assert!(!state.is_processing("8"));
}

#[test]
fn chunks_modal_lifecycle() {
    let mut state = DocumentsState::default();
    state.open_chunks(doc("3"));
    assert!(state.busy("3").chunks_loading);
    assert!(state.chunks_modal.as_ref().is_some_and(|m| m.loading));

    state.finish_chunks("3", vec![DocumentChunk { chunk_index: Some(0), ..DocumentChunk::default() }]);
    let modal = state.chunks_modal.as_ref().unwrap();
    assert!(!modal.loading);
    assert_eq!(modal.chunks.len(), 1);
    assert!(!state.busy("3").chunks_loading);

    state.close_chunks();
    assert!(state.chunks_modal.is_none());
}

#[test]
fn chunks_for_closed_modal_are_dropped() {
    let mut state = DocumentsState::default();
    state.open_chunks(doc("3"));
    state.close_chunks();
    state.finish_chunks("3", vec![DocumentChunk::default()]);
    assert!(state.chunks_modal.is_none());
    assert!(!state.busy("3").chunks_loading);
}

#[test]
fn labels() {
    assert_eq!(chunk_count_label(Some(1)), "1 chunk");
    assert_eq!(chunk_count_label(Some(0)), "0 chunks");
    assert_eq!(chunk_count_label(None), "— chunks");
    assert_eq!(status_class(&DocumentStatus::parse("weird")), "dm-status-other");
    assert_eq!(status_class(&DocumentStatus::Embedded), "dm-status-embedded");
    assert_eq!(file_size_label("a.pdf", 1024 * 1024 * 3 / 2), "a.pdf — 1.50 MB");
}

#[test]
fn chunk_heading_falls_back_to_position() {
    let chunk = DocumentChunk { tokens: Some(120), ..DocumentChunk::default() };
    assert_eq!(chunk_heading(&chunk, 4), "#4 — tokens: 120");
    let chunk = DocumentChunk { chunk_index: Some(9), ..DocumentChunk::default() };
    assert_eq!(chunk_heading(&chunk, 0), "#9 — tokens: -");
}
