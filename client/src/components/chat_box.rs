//! Question/answer chat box backed by the retrieval chat endpoint.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used on the user page. Each send posts one question through a
//! [`ChatSession`](api::chat::ChatSession); the retrieved context of the
//! latest answer is handed to the parent through `on_context` so the
//! sources panel can show it.
//!
//! DESIGN
//! ======
//! The session lives as long as the component. It aborts the previous
//! request whenever a new one starts, and is cancelled when the signed-in
//! session changes or the component unmounts. Superseded results never
//! reach `ChatState`.

use std::sync::Arc;

use leptos::prelude::*;

use crate::config::ClientConfig;
use crate::state::auth::AuthState;
use crate::state::chat::{ChatContext, ChatState};
use crate::util::browser::copy_with_alert;
use crate::util::markdown::render_markdown_html;

#[component]
pub fn ChatBox(on_context: Callback<ChatContext>) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let config = expect_context::<ClientConfig>();
    let chat = RwSignal::new(ChatState::default());
    let input = RwSignal::new(String::new());
    let bottom_ref = NodeRef::<leptos::html::Div>::new();

    let session = Arc::new(crate::net::api::chat_session(&config));

    // New login or logout: drop the conversation and any pending answer.
    {
        let session = Arc::clone(&session);
        Effect::new(move |previous: Option<Option<String>>| {
            let token = auth.with(AuthState::access_token);
            if previous.as_ref() != Some(&token) {
                session.cancel();
                chat.set(ChatState::default());
                input.set(String::new());
                on_context.run(ChatContext::default());
            }
            token
        });
    }

    {
        let session = Arc::clone(&session);
        on_cleanup(move || session.cancel());
    }

    Effect::new(move || {
        let _ = chat.with(|c| c.entries.len());
        #[cfg(feature = "hydrate")]
        {
            if let Some(el) = bottom_ref.get() {
                let options = web_sys::ScrollIntoViewOptions::new();
                options.set_behavior(web_sys::ScrollBehavior::Smooth);
                el.scroll_into_view_with_scroll_into_view_options(&options);
            }
        }
    });

    let do_send = move || {
        let text = input.get_untracked();
        let Some(question) = chat.try_update(|c| c.begin_send(&text)).flatten() else {
            return;
        };
        input.set(String::new());
        on_context.run(ChatContext::default());

        let bearer = auth.with_untracked(AuthState::access_token);
        let session = Arc::clone(&session);
        leptos::task::spawn_local(async move {
            let outcome = session.send(&question, bearer.as_deref()).await;
            if let Some(Some(context)) = chat.try_update(|c| c.finish(outcome)) {
                on_context.run(context);
            }
        });
    };

    let on_submit = {
        let do_send = do_send.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            do_send();
        }
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            do_send();
        }
    };

    let signed_in = move || auth.with(AuthState::signed_in);
    let loading = move || chat.with(|c| c.loading);

    let user_label = move || {
        auth.with(|a| {
            a.session.as_ref().map_or_else(
                || "Belum login (silakan login untuk mengirim pertanyaan).".to_owned(),
                |s| format!("Login sebagai {}", s.email().unwrap_or_else(|| s.user_id())),
            )
        })
    };

    view! {
        <div class="cb-root">
            <div class="cb-header">
                <div class="cb-header-left">{user_label}</div>
                <div class="cb-header-pill">"Chat Mode"</div>
            </div>

            <div class="cb-messages">
                <Show when=move || chat.with(|c| c.entries.is_empty())>
                    <div class="cb-empty">"Mulai dengan mengetik pertanyaan tentang materi kuliahmu di bawah."</div>
                </Show>
                <For each=move || chat.get().entries key=|entry| entry.id.clone() let:entry>
                    {
                        let is_user = entry.is_user();
                        let content = entry.message.content;
                        if is_user {
                            view! { <div class="cb-bubble cb-bubble-user">{content}</div> }.into_any()
                        } else {
                            let rendered = render_markdown_html(&content);
                            view! {
                                <div class="cb-bubble cb-bubble-assistant">
                                    <div class="cb-markdown" inner_html=rendered></div>
                                    <div class="cb-meta-row">
                                        <button
                                            type="button"
                                            class="cb-copy-btn"
                                            on:click=move |_| copy_with_alert(content.clone())
                                        >
                                            "Salin"
                                        </button>
                                    </div>
                                </div>
                            }
                                .into_any()
                        }
                    }
                </For>
                <div node_ref=bottom_ref></div>
            </div>

            <form class="cb-input-wrapper" on:submit=on_submit>
                <div class="cb-input-row">
                    <input
                        class="cb-input"
                        type="text"
                        placeholder=move || {
                            if signed_in() {
                                "Tanya sesuatu... (Enter untuk kirim)"
                            } else {
                                "Silakan login untuk mengirim pertanyaan"
                            }
                        }
                        disabled=move || !signed_in() || loading()
                        prop:value=move || input.get()
                        on:input=move |ev| input.set(event_target_value(&ev))
                        on:keydown=on_keydown
                    />
                    <button type="submit" class="cb-send-btn" disabled=move || loading() || !signed_in()>
                        <span>{move || if loading() { "Memproses..." } else { "Kirim" }}</span>
                    </button>
                </div>
                <Show when=loading>
                    <div class="cb-loading-row">
                        <div class="cb-spinner-small"></div>
                        <span>"Tutor Cerdas sedang menyusun jawaban..."</span>
                    </div>
                </Show>
            </form>
        </div>
    }
}
