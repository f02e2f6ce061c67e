use super::*;

fn chat(id: &str, title: Option<&str>) -> ChatSummary {
    ChatSummary { id: id.to_owned(), title: title.map(str::to_owned), created_at: None }
}

fn message(role: &str, content: &str) -> HistoryMessage {
    HistoryMessage { role: role.to_owned(), content: content.to_owned(), created_at: None }
}

#[test]
fn show_chat_switches_view_and_loads() {
    let mut state = HistoryState::default();
    state.open_list();
    state.show_chat(chat("c1", Some("Aljabar")));
    assert!(state.loading_messages);
    assert_eq!(state.heading(), "Aljabar");

    assert!(state.set_messages("c1", Some(vec![message("user", "hai"), message("assistant", "halo")])));
    assert!(!state.loading_messages);
    assert_eq!(state.messages.len(), 2);
}

#[test]
fn messages_for_another_chat_are_ignored() {
    let mut state = HistoryState::default();
    state.show_chat(chat("c1", None));
    state.show_chat(chat("c2", None));
    assert!(!state.set_messages("c1", Some(vec![message("user", "lama")])));
    assert!(state.messages.is_empty());
    assert!(state.loading_messages);
}

#[test]
fn close_resets_to_list() {
    let mut state = HistoryState::default();
    state.open_list();
    state.show_chat(chat("c1", None));
    state.set_messages("c1", Some(vec![message("user", "hai")]));
    state.close();
    assert!(!state.open);
    assert_eq!(state.view, HistoryView::List);
    assert!(state.messages.is_empty());
    assert_eq!(state.heading(), "Daftar Riwayat Chat");
}

#[test]
fn failed_chat_list_reads_as_empty() {
    let mut state = HistoryState { loading_chats: true, ..HistoryState::default() };
    state.set_chats(Some(vec![chat("c1", None)]));
    state.set_chats(None);
    assert!(state.chats.is_empty());
    assert!(!state.loading_chats);
}

#[test]
fn untitled_chats_get_placeholders() {
    let untitled = chat("c1", Some("  "));
    assert_eq!(chat_title(&untitled), "Chat tanpa judul");

    let mut state = HistoryState::default();
    state.show_chat(untitled);
    assert_eq!(state.heading(), "Chat");
}
