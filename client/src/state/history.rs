//! Chat-history modal state.
//!
//! The modal shows either the list of saved chats (newest first, as the
//! identity service orders them) or the messages of one chat. Failed reads
//! show as empty lists; the cause is only logged.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use api::types::{ChatSummary, HistoryMessage};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum HistoryView {
    #[default]
    List,
    Messages(ChatSummary),
}

#[derive(Clone, Debug, Default)]
pub struct HistoryState {
    pub open: bool,
    pub view: HistoryView,
    pub chats: Vec<ChatSummary>,
    pub messages: Vec<HistoryMessage>,
    pub loading_chats: bool,
    pub loading_messages: bool,
}

impl HistoryState {
    pub fn open_list(&mut self) {
        self.open = true;
        self.back_to_list();
    }

    pub fn close(&mut self) {
        self.open = false;
        self.back_to_list();
    }

    pub fn set_chats(&mut self, chats: Option<Vec<ChatSummary>>) {
        self.loading_chats = false;
        self.chats = chats.unwrap_or_default();
    }

    /// Switch to one chat's messages; they load separately.
    pub fn show_chat(&mut self, chat: ChatSummary) {
        self.view = HistoryView::Messages(chat);
        self.messages.clear();
        self.loading_messages = true;
    }

    /// Store messages if `chat_id` is still the one being viewed.
    pub fn set_messages(&mut self, chat_id: &str, messages: Option<Vec<HistoryMessage>>) -> bool {
        if self.viewing_chat_id() != Some(chat_id) {
            return false;
        }
        self.loading_messages = false;
        self.messages = messages.unwrap_or_default();
        true
    }

    pub fn back_to_list(&mut self) {
        self.view = HistoryView::List;
        self.messages.clear();
        self.loading_messages = false;
    }

    pub fn viewing_chat_id(&self) -> Option<&str> {
        match &self.view {
            HistoryView::Messages(chat) => Some(chat.id.as_str()),
            HistoryView::List => None,
        }
    }

    /// Modal heading for the current view.
    pub fn heading(&self) -> String {
        match &self.view {
            HistoryView::List => "Daftar Riwayat Chat".to_owned(),
            HistoryView::Messages(chat) => title_or(chat, "Chat"),
        }
    }
}

/// Title shown in the chat list.
pub fn chat_title(chat: &ChatSummary) -> String {
    title_or(chat, "Chat tanpa judul")
}

fn title_or(chat: &ChatSummary, fallback: &str) -> String {
    chat.title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(fallback)
        .to_owned()
}
