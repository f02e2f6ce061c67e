use super::*;

fn chunk(title: &str) -> TopChunk {
    TopChunk { document_title: title.to_owned(), chunk_index: Some(0), similarity: Some(0.9), text: "isi".into() }
}

#[test]
fn toggle_flips_expansion() {
    let mut state = SourcesState::default();
    state.set(ChatContext { chunks: vec![chunk("a"), chunk("b")], has_context: true });
    state.toggle(1);
    assert!(state.is_expanded(1));
    assert!(!state.is_expanded(0));
    state.toggle(1);
    assert!(!state.is_expanded(1));
}

#[test]
fn new_context_resets_expansion() {
    let mut state = SourcesState::default();
    state.set(ChatContext { chunks: vec![chunk("a")], has_context: true });
    state.toggle(0);
    state.set(ChatContext { chunks: vec![chunk("b")], has_context: false });
    assert!(state.expanded.is_empty());
    assert!(!state.has_context);
}

#[test]
fn clear_empties_panel() {
    let mut state = SourcesState::default();
    state.set(ChatContext { chunks: vec![chunk("a")], has_context: true });
    state.clear();
    assert!(state.chunks.is_empty());
    assert!(!state.has_context);
}
