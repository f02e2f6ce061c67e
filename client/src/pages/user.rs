//! Student page: chat, saved history, speech entry point, and sources.

use std::sync::Arc;

use api::types::ChatSummary;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::chat_box::ChatBox;
use crate::components::history_modal::HistoryModal;
use crate::components::top_k_panel::TopKPanel;
use crate::config::ClientConfig;
use crate::state::auth::AuthState;
use crate::state::chat::ChatContext;
use crate::state::history::HistoryState;
use crate::state::sources::SourcesState;

#[component]
pub fn UserPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let config = expect_context::<ClientConfig>();
    let navigate = use_navigate();

    let sources = RwSignal::new(SourcesState::default());
    let history = RwSignal::new(HistoryState::default());
    let identity = Arc::new(crate::net::api::identity(&config));

    let fetch_chats = {
        let identity = Arc::clone(&identity);
        move || {
            let Some(session) = auth.with_untracked(|a| a.session.clone()) else {
                history.update(|h| h.set_chats(None));
                return;
            };
            history.update(|h| h.loading_chats = true);
            let identity = Arc::clone(&identity);
            leptos::task::spawn_local(async move {
                let chats = match identity.list_chats(&session).await {
                    Ok(chats) => Some(chats),
                    Err(e) => {
                        leptos::logging::warn!("chat history fetch failed: {e}");
                        None
                    }
                };
                history.try_update(|h| h.set_chats(chats));
            });
        }
    };

    {
        let fetch_chats = fetch_chats.clone();
        Effect::new(move |previous: Option<Option<String>>| {
            let token = auth.with(AuthState::access_token);
            if previous.as_ref() != Some(&token) {
                fetch_chats();
            }
            token
        });
    }

    let on_open_chat = {
        let identity = Arc::clone(&identity);
        Callback::new(move |chat: ChatSummary| {
            let chat_id = chat.id.clone();
            history.update(|h| h.show_chat(chat));
            let Some(session) = auth.with_untracked(|a| a.session.clone()) else {
                history.update(|h| {
                    h.set_messages(&chat_id, None);
                });
                return;
            };
            let identity = Arc::clone(&identity);
            leptos::task::spawn_local(async move {
                let messages = match identity.list_messages(&session, &chat_id).await {
                    Ok(messages) => Some(messages),
                    Err(e) => {
                        leptos::logging::warn!("chat messages fetch failed: {e}");
                        None
                    }
                };
                history.try_update(|h| h.set_messages(&chat_id, messages));
            });
        })
    };

    let on_context = Callback::new(move |context: ChatContext| sources.update(|s| s.set(context)));

    let open_history = {
        let fetch_chats = fetch_chats.clone();
        move |_| {
            history.update(HistoryState::open_list);
            fetch_chats();
        }
    };

    let greeting = move || auth.with(|a| format!("Halo, {} 👋", a.profile.as_ref().map_or("Mahasiswa", |p| p.greeting_name())));
    let role = move || auth.with(|a| a.profile.as_ref().and_then(|p| p.role.clone()));

    view! {
        <div class="user-page">
            <header class="user-header">
                <div>
                    <p class="user-header-kicker">"Tutor Cerdas"</p>
                    <h1 class="user-header-title">{greeting}</h1>
                    <p class="user-header-sub">
                        "Ajukan pertanyaan tentang materi kuliahmu. Riwayat dan sumber jawaban dicatat rapi di samping."
                    </p>
                </div>
                <div class="user-header-pills">
                    <span class="user-pill">"Student Mode"</span>
                    {move || role().map(|r| view! { <span class="user-pill user-pill--role">{format!("Role: {r}")}</span> })}
                </div>
            </header>

            <div class="user-grid">
                <div>
                    <div class="user-card">
                        <div>
                            <h2 class="user-card-title">"Chat dengan Tutor Cerdas"</h2>
                            <p class="user-card-sub">
                                "Tanyakan konsep, tugas, atau soal sulit. Sistem akan mencari referensi dari dokumen yang sudah dimasukkan."
                            </p>
                        </div>
                        <ChatBox on_context=on_context/>
                    </div>
                </div>

                <div class="user-side">
                    <div class="user-card">
                        <div>
                            <h3 class="user-card-title">"Riwayat Chat"</h3>
                            <p class="user-card-sub">
                                "Lihat, buka kembali, dan pelajari ulang percakapan sebelumnya."
                            </p>
                        </div>
                        <div class="user-card-actions">
                            <button class="btn-primary" on:click=open_history>"Buka Riwayat"</button>
                            <button class="btn-soft" on:click=move |_| fetch_chats()>"Refresh"</button>
                        </div>
                        {move || {
                            let (loading, count) = history.with(|h| (h.loading_chats, h.chats.len()));
                            if loading {
                                Some(view! { <p class="user-card-note">"Memuat riwayat..."</p> }.into_any())
                            } else if count > 0 {
                                Some(view! { <p class="user-card-note">{format!("{count} chat tersimpan.")}</p> }.into_any())
                            } else {
                                None
                            }
                        }}
                    </div>

                    <div class="user-card">
                        <div>
                            <h3 class="user-card-title">"Speech-to-Speech"</h3>
                            <p class="user-card-sub">
                                "Gunakan mode suara untuk berbicara langsung dengan Tutor Cerdas. Cocok untuk latihan lisan & penjelasan cepat."
                            </p>
                        </div>
                        <button class="btn-primary" on:click=move |_| navigate("/speech", NavigateOptions::default())>
                            "Buka Speech-to-Speech"
                        </button>
                    </div>

                    <TopKPanel sources=sources/>
                </div>
            </div>

            <Show when=move || history.with(|h| h.open)>
                <HistoryModal history=history on_open_chat=on_open_chat/>
            </Show>
        </div>
    }
}
