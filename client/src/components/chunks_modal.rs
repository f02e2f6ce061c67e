//! Read-only viewer for one document's stored chunks.

use leptos::prelude::*;

use crate::state::documents::{ChunksModal, chunk_heading};

#[component]
pub fn ChunksModalView(modal: ChunksModal, on_close: Callback<()>) -> impl IntoView {
    let ChunksModal { doc, chunks, loading } = modal;

    let body = if loading {
        view! {
            <div class="dm-modal-note">
                <span class="dm-spinner"></span>
                <span>"Loading chunks…"</span>
            </div>
        }
        .into_any()
    } else if chunks.is_empty() {
        view! { <div class="dm-modal-note">"No chunks found"</div> }.into_any()
    } else {
        chunks
            .iter()
            .enumerate()
            .map(|(pos, chunk)| {
                view! {
                    <div class="dm-chunk">
                        <div class="dm-chunk-head">{chunk_heading(chunk, pos)}</div>
                        <div class="dm-chunk-text">{chunk.display_text().to_owned()}</div>
                    </div>
                }
            })
            .collect::<Vec<_>>()
            .into_any()
    };

    view! {
        <div class="dm-modal-backdrop">
            <div class="dm-modal-body">
                <div class="dm-modal-header">
                    <div>
                        <h4>{format!("Chunks · {}", doc.display_title())}</h4>
                        <div class="dm-modal-sub">{format!("ID: {}", doc.id)}</div>
                    </div>
                    <button type="button" class="dm-btn-soft" on:click=move |_| on_close.run(())>
                        "Close"
                    </button>
                </div>
                {body}
            </div>
        </div>
    }
}
