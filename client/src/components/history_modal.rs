//! Saved chat history modal: chat list, then one chat's messages.
//!
//! The page owns the loading; this component only renders `HistoryState`
//! and reports which chat the user opened.

use api::types::ChatSummary;
use leptos::prelude::*;

use crate::state::history::{HistoryState, HistoryView, chat_title};
use crate::util::format::timestamp;

#[component]
pub fn HistoryModal(history: RwSignal<HistoryState>, on_open_chat: Callback<ChatSummary>) -> impl IntoView {
    let in_list = move || history.with(|h| h.view == HistoryView::List);

    let subtitle = move || {
        history.with(|h| match &h.view {
            HistoryView::List => format!("{} chat ditemukan.", h.chats.len()),
            HistoryView::Messages(chat) => timestamp(chat.created_at.as_deref()),
        })
    };

    let list_body = move || {
        let state = history.get();
        if state.loading_chats {
            return view! { <div class="history-note">"Memuat riwayat..."</div> }.into_any();
        }
        if state.chats.is_empty() {
            return view! { <div class="history-note">"Belum ada riwayat chat tersimpan."</div> }.into_any();
        }
        state
            .chats
            .into_iter()
            .map(|chat| {
                let title = chat_title(&chat);
                let created = timestamp(chat.created_at.as_deref());
                view! {
                    <div class="history-row">
                        <div>
                            <div class="history-row-title">{title}</div>
                            <div class="history-row-date">{created}</div>
                        </div>
                        <button class="btn-soft" on:click=move |_| on_open_chat.run(chat.clone())>
                            "Buka"
                        </button>
                    </div>
                }
            })
            .collect::<Vec<_>>()
            .into_any()
    };

    let messages_body = move || {
        let state = history.get();
        if state.loading_messages {
            return view! { <div class="history-note">"Memuat pesan..."</div> }.into_any();
        }
        if state.messages.is_empty() {
            return view! { <div class="history-note">"Tidak ada pesan untuk chat ini."</div> }.into_any();
        }
        state
            .messages
            .into_iter()
            .map(|msg| {
                let is_user = msg.is_user();
                let created = timestamp(msg.created_at.as_deref());
                view! {
                    <div class="history-message" class:history-message--user=is_user>
                        <div class="history-message-content">{msg.content}</div>
                        <div class="history-message-date">{created}</div>
                    </div>
                }
            })
            .collect::<Vec<_>>()
            .into_any()
    };

    view! {
        <div class="history-modal-backdrop">
            <div class="history-modal-body fade-in-up">
                <div class="history-modal-header">
                    <div>
                        <h3>{move || history.with(HistoryState::heading)}</h3>
                        <div class="history-modal-sub">{subtitle}</div>
                    </div>
                    <div class="history-modal-actions">
                        <Show when=move || !in_list()>
                            <button class="btn-soft" on:click=move |_| history.update(HistoryState::back_to_list)>
                                "Kembali ke daftar"
                            </button>
                        </Show>
                        <button class="btn-soft" on:click=move |_| history.update(HistoryState::close)>
                            "Tutup"
                        </button>
                    </div>
                </div>
                <div class="history-modal-content">
                    {move || if in_list() { list_body().into_any() } else { messages_body().into_any() }}
                </div>
            </div>
        </div>
    }
}
