//! Speech-to-speech page: ask by voice, hear the answer, watch the avatar.
//!
//! SYSTEM CONTEXT
//! ==============
//! Recognition ends with the last final transcript, which is posted through
//! a chat session asking for three context chunks. The reply is spoken with
//! speech synthesis while the avatar mirrors listening and speaking.
//!
//! Recognition and synthesis handles are owned by `speech_api`; this page
//! only passes handlers that write into `SpeechState`, and every write uses
//! `try_update` because browser events may arrive after the page is gone.

use std::sync::Arc;

use api::types::TopChunk;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::avatar_stage::AvatarStage;
use crate::config::ClientConfig;
use crate::net::api::BrowserChatSession;
use crate::state::auth::AuthState;
use crate::state::speech::{PLAYBACK_FAILED, chunk_meta, RECOGNITION_UNSUPPORTED, SYNTHESIS_UNSUPPORTED, SpeechState};
use crate::util::browser::history_back;
use crate::util::format::{SPEECH_CHUNK_CHARS, truncate_chars};
use crate::util::speech_api::{self, PlaybackHandlers, RecognitionHandlers};

fn set_error(speech: RwSignal<SpeechState>, message: String) {
    speech.try_update(|s| s.error = Some(message));
}

fn play_reply(speech: RwSignal<SpeechState>, reply: &str) {
    if !speech_api::supports_synthesis() {
        set_error(speech, SYNTHESIS_UNSUPPORTED.to_owned());
        return;
    }
    let handlers = PlaybackHandlers {
        on_start: Box::new(move || {
            speech.try_update(|s| s.playing = true);
        }),
        on_end: Box::new(move || {
            speech.try_update(|s| s.playing = false);
        }),
        on_error: Box::new(move || {
            speech.try_update(|s| {
                s.playing = false;
                s.error = Some(PLAYBACK_FAILED.to_owned());
            });
        }),
    };
    if let Err(e) = speech_api::speak(reply, handlers) {
        leptos::logging::warn!("speech synthesis failed: {e}");
        set_error(speech, format!("Gagal menjalankan TTS: {e}"));
    }
}

fn send_question(
    speech: RwSignal<SpeechState>,
    session: Arc<BrowserChatSession>,
    bearer: Option<String>,
    question: String,
) {
    speech.update(SpeechState::begin_send);
    leptos::task::spawn_local(async move {
        leptos::logging::log!("sending spoken question ({} chars)", question.chars().count());
        let outcome = session.send(&question, bearer.as_deref()).await;
        let reply = speech.try_update(|s| s.finish_send(&question, outcome)).flatten();
        if let Some(reply) = reply {
            play_reply(speech, &reply);
        }
    });
}

#[component]
fn SpeechChunkCard(chunk: TopChunk) -> impl IntoView {
    let meta = chunk_meta(&chunk);
    view! {
        <div class="sp-chunk">
            <div class="sp-chunk-head">
                <strong>{chunk.document_title}</strong>
                <span class="sp-chunk-meta">{meta}</span>
            </div>
            <p class="sp-chunk-text">{truncate_chars(&chunk.text, SPEECH_CHUNK_CHARS)}</p>
        </div>
    }
}

#[component]
pub fn SpeechPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let config = expect_context::<ClientConfig>();
    let navigate = use_navigate();

    let speech = RwSignal::new(SpeechState::default());
    let session = Arc::new(crate::net::api::speech_chat_session(&config));

    {
        let session = Arc::clone(&session);
        on_cleanup(move || {
            speech_api::shutdown();
            session.cancel();
        });
    }

    let on_mic = {
        let session = Arc::clone(&session);
        move |_| {
            if speech.with_untracked(|s| s.listening) {
                speech_api::stop_recognition();
                return;
            }
            if !speech_api::supports_recognition() {
                set_error(speech, RECOGNITION_UNSUPPORTED.to_owned());
                return;
            }
            speech.update(SpeechState::begin_listening);

            let session = Arc::clone(&session);
            let handlers = RecognitionHandlers {
                on_result: Box::new(move |transcript| {
                    speech.try_update(|s| s.transcript = transcript);
                }),
                on_error: Box::new(move |reason| {
                    leptos::logging::warn!("speech recognition error: {reason}");
                    speech.try_update(|s| s.recording_failed(&reason));
                }),
                on_end: Box::new(move |last| {
                    if speech.try_update(|s| s.listening = false).is_none() {
                        return;
                    }
                    if last.trim().is_empty() {
                        leptos::logging::log!("recognition ended without a transcript");
                        return;
                    }
                    let bearer = auth.with_untracked(AuthState::access_token);
                    send_question(speech, Arc::clone(&session), bearer, last);
                }),
            };
            if let Err(e) = speech_api::start_recognition(handlers) {
                leptos::logging::warn!("speech recognition failed to start: {e}");
                speech.update(|s| {
                    s.listening = false;
                    s.error = Some(format!("Gagal memulai perekaman: {e}"));
                });
            }
        }
    };

    let on_stop = move |_| {
        speech_api::shutdown();
        speech.update(SpeechState::halt);
    };

    let on_close = move |_| {
        speech_api::shutdown();
        speech.update(SpeechState::halt);
        if !history_back() {
            navigate("/", Default::default());
        }
    };

    let listening = move || speech.with(|s| s.listening);
    let sending = move || speech.with(|s| s.sending);
    let who = move || {
        auth.with(|a| a.session.as_ref().and_then(|s| s.email().map(str::to_owned)).unwrap_or_else(|| "guest".to_owned()))
    };

    view! {
        <div class="sp-page">
            <header class="sp-header">
                <div>
                    <h1 class="sp-title">"Speech → Speech (Voice + Avatar)"</h1>
                    <p class="sp-sub">{who}</p>
                </div>
                <button type="button" class="sp-close" title="Tutup" on:click=on_close>
                    "✕"
                </button>
            </header>

            <div class="sp-grid">
                <div class="sp-stage-card">
                    <AvatarStage speech=speech/>
                    <div class="sp-controls">
                        <button
                            type="button"
                            class="sp-mic"
                            class:sp-mic--active=listening
                            disabled=sending
                            on:click=on_mic
                        >
                            {move || if listening() { "🎙️ Merekam..." } else { "🎤 Tekan untuk Bicara" }}
                        </button>
                        <button type="button" class="sp-stop" on:click=on_stop>
                            "🛑 Stop"
                        </button>
                        <Show when=sending>
                            <span class="sp-pill">"Mengirim…"</span>
                        </Show>
                        <Show when=move || speech.with(|s| s.playing)>
                            <span class="sp-pill">"Memutar suara…"</span>
                        </Show>
                    </div>
                    {move || speech.with(|s| s.error.clone()).map(|e| view! { <p class="sp-error">{e}</p> })}
                </div>

                <div class="sp-text-card">
                    <section>
                        <h2 class="sp-section-title">"Transkripsi"</h2>
                        <p class="sp-transcript">
                            {move || {
                                speech.with(|s| if s.transcript.is_empty() { "Belum ada".to_owned() } else { s.transcript.clone() })
                            }}
                        </p>
                    </section>
                    <section>
                        <h2 class="sp-section-title">"Balasan"</h2>
                        <p class="sp-reply">
                            {move || {
                                speech.with(|s| if s.reply.is_empty() { "Belum ada balasan".to_owned() } else { s.reply.clone() })
                            }}
                        </p>
                    </section>
                </div>
            </div>

            <div class="sp-chunks-card">
                <div class="sp-chunks-head">
                    <h2 class="sp-section-title">"Top 3"</h2>
                    <span class="sp-chunks-sub">"Potongan konteks (top_chunks)"</span>
                </div>
                <Show
                    when=move || speech.with(|s| !s.chunks.is_empty())
                    fallback=|| view! { <p class="sp-empty">"Top chunks akan muncul setelah kamu bertanya."</p> }
                >
                    {move || {
                        speech
                            .with(|s| s.chunks.clone())
                            .into_iter()
                            .map(|chunk| view! { <SpeechChunkCard chunk=chunk/> })
                            .collect_view()
                    }}
                </Show>
            </div>
        </div>
    }
}
