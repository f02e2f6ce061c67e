//! Retrieved-context panel for the latest chat answer.

use leptos::prelude::*;

use crate::state::sources::SourcesState;
use crate::util::browser::copy_silently;
use crate::util::format::{PREVIEW_CHARS, chunk_index, exceeds, similarity, truncate_chars};

/// Cards for the top chunks behind the last answer, with a context badge.
#[component]
pub fn TopKPanel(sources: RwSignal<SourcesState>) -> impl IntoView {
    let has_context = move || sources.with(|s| s.has_context);

    view! {
        <div class="user-card">
            <div class="user-card-header">
                <div>
                    <h3 class="user-card-title">"Top-k Sumber Jawaban"</h3>
                    <p class="user-card-sub">
                        "Lihat potongan dokumen yang paling relevan untuk jawaban terakhir (maksimal 3 chunk)."
                    </p>
                </div>
                <button class="btn-ghost" on:click=move |_| sources.update(SourcesState::clear)>
                    "Clear"
                </button>
            </div>
            <div class="topk-badge" class:topk-badge--yes=has_context>
                <span>"●"</span>
                {move || if has_context() { " Konteks: YA" } else { " Konteks: TIDAK" }}
            </div>

            <div class="topk-list">
                {move || {
                    let state = sources.get();
                    if state.chunks.is_empty() {
                        return view! {
                            <div class="topk-empty">
                                "Belum ada sumber relevan untuk jawaban terakhir. Kirim pertanyaan dulu di kotak chat."
                            </div>
                        }
                            .into_any();
                    }

                    state
                        .chunks
                        .iter()
                        .enumerate()
                        .map(|(idx, chunk)| {
                            let expanded = state.is_expanded(idx);
                            let text = chunk.text.clone();
                            let long = exceeds(&text, PREVIEW_CHARS);
                            let shown = if expanded { text.clone() } else { truncate_chars(&text, PREVIEW_CHARS) };
                            let meta = format!(
                                "{} (sim:{})",
                                chunk.document_title,
                                chunk.similarity.map_or_else(|| "n/a".to_owned(), |s| s.to_string()),
                            );
                            view! {
                                <div class="chunk-card">
                                    <div class="chunk-card-head">
                                        <div class="chunk-card-title">{format!("{}. {}", idx + 1, chunk.document_title)}</div>
                                        <div class="chunk-card-meta">
                                            {format!(
                                                "idx: {} · sim: {}",
                                                chunk_index(chunk.chunk_index),
                                                similarity(chunk.similarity, 4, "n/a"),
                                            )}
                                        </div>
                                    </div>
                                    <div class="chunk-card-text">{shown}</div>
                                    <div class="chunk-card-actions">
                                        {long
                                            .then(|| {
                                                view! {
                                                    <button class="btn-ghost" on:click=move |_| sources.update(|s| s.toggle(idx))>
                                                        {if expanded { "View less" } else { "View more" }}
                                                    </button>
                                                }
                                            })}
                                        <button class="btn-ghost" on:click=move |_| copy_silently(text.clone())>
                                            "Salin isi chunk"
                                        </button>
                                        <button class="btn-ghost" on:click=move |_| copy_silently(meta.clone())>
                                            "Salin meta"
                                        </button>
                                    </div>
                                </div>
                            }
                        })
                        .collect::<Vec<_>>()
                        .into_any()
                }}
            </div>
        </div>
    }
}
