//! Admin document manager: upload, list, process, inspect, delete.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered by the admin page. Every backend call goes through
//! [`DocumentsClient`](api::documents::DocumentsClient); this component only
//! sequences the calls, keeps `DocumentsState` current, and reports results
//! with browser alerts the way the rest of the admin UI does.
//!
//! DESIGN
//! ======
//! The picked file itself is a browser object and stays in the file input;
//! only its metadata is mirrored into a signal for the size line and for
//! pre-flight validation. Bytes are read when the form is submitted.
//!
//! Processing triggers the backend job, then polls the document until it
//! reaches a terminal status, reloading the list after every probe.

use std::sync::Arc;
use std::time::Duration;

use api::documents::{UploadMeta, validate_upload};
use api::poll::PollPolicy;
use api::types::Document;
use leptos::prelude::*;

use crate::components::chunks_modal::ChunksModalView;
use crate::config::ClientConfig;
use crate::net::api::BrowserDocuments;
use crate::state::auth::AuthState;
use crate::state::documents::{DocumentsState, chunk_count_label, file_size_label, status_class};
use crate::util::browser::{alert, confirm, open_in_new_tab};
use crate::util::format::timestamp;

async fn pause(duration: Duration) {
    #[cfg(feature = "hydrate")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(feature = "hydrate"))]
    let _ = duration;
}

/// Reload the list into `state`, keeping rows on failure.
async fn reload(client: &BrowserDocuments, bearer: Option<&str>, state: RwSignal<DocumentsState>) {
    if state.try_update(DocumentsState::begin_load).is_none() {
        return;
    }
    let result = client.list(bearer).await.map_err(|e| {
        leptos::logging::warn!("document list failed: {e}");
        e.to_string()
    });
    state.try_update(|s| s.finish_load(result));
}

#[cfg(feature = "hydrate")]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn file_meta(file: &web_sys::File) -> UploadMeta {
    UploadMeta { file_name: file.name(), mime: file.type_(), size: file.size().max(0.0) as u64 }
}

#[cfg(feature = "hydrate")]
fn picked_file(input: Option<web_sys::HtmlInputElement>) -> Option<web_sys::File> {
    input?.files()?.get(0)
}

#[component]
pub fn DocumentManager() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let config = expect_context::<ClientConfig>();
    let client = Arc::new(crate::net::api::documents(&config));

    let state = RwSignal::new(DocumentsState::default());
    let title = RwSignal::new(String::new());
    let picked = RwSignal::new(None::<UploadMeta>);
    let file_ref = NodeRef::<leptos::html::Input>::new();

    // =========================================================================
    // LIST
    // =========================================================================

    let load_docs = {
        let client = Arc::clone(&client);
        move || {
            let client = Arc::clone(&client);
            let bearer = auth.with_untracked(AuthState::access_token);
            leptos::task::spawn_local(async move {
                reload(&client, bearer.as_deref(), state).await;
            });
        }
    };

    Effect::new(move |previous: Option<Option<String>>| {
        let token = auth.with(AuthState::access_token);
        if previous.as_ref() != Some(&token) {
            if token.is_some() {
                load_docs();
            } else {
                state.update(DocumentsState::reset);
            }
        }
        token
    });

    // =========================================================================
    // UPLOAD
    // =========================================================================

    let reset_form = move || {
        title.set(String::new());
        picked.set(None);
        #[cfg(feature = "hydrate")]
        {
            if let Some(input) = file_ref.get() {
                input.set_value("");
            }
        }
    };

    let on_file_change = move |_ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        picked.set(picked_file(file_ref.get()).as_ref().map(file_meta));
    };

    let on_upload = {
        let client = Arc::clone(&client);
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            state.update(|s| s.error = None);
            let bearer = auth.with_untracked(AuthState::access_token);
            let meta = picked.get_untracked();
            if let Err(e) = validate_upload(bearer.as_deref(), meta.as_ref(), client.max_upload_bytes()) {
                alert(&e.to_string());
                return;
            }

            #[cfg(feature = "hydrate")]
            {
                let (Some(file), Some(meta)) = (picked_file(file_ref.get()), meta) else {
                    alert(&api::error::UploadError::MissingFile.to_string());
                    return;
                };
                let client = Arc::clone(&client);
                let doc_title = title.get_untracked();
                state.update(|s| s.uploading = true);
                leptos::task::spawn_local(async move {
                    let result = match crate::net::http::read_file_bytes(&file).await {
                        Ok(bytes) => {
                            let upload = api::documents::UploadFile { meta, bytes };
                            client.upload(bearer.as_deref(), &doc_title, upload).await.map_err(|e| e.to_string())
                        }
                        Err(e) => Err(e),
                    };
                    match result {
                        Ok(()) => {
                            alert("Upload berhasil");
                            reset_form();
                            reload(&client, bearer.as_deref(), state).await;
                        }
                        Err(e) => {
                            leptos::logging::error!("document upload failed: {e}");
                            alert(&format!("Upload gagal: {e}"));
                        }
                    }
                    state.try_update(|s| s.uploading = false);
                });
            }
            #[cfg(not(feature = "hydrate"))]
            let _ = (bearer, meta);
        }
    };

    // =========================================================================
    // ROW ACTIONS
    // =========================================================================

    let on_view = {
        let client = Arc::clone(&client);
        Callback::new(move |doc: Document| open_in_new_tab(&client.view_url(&doc)))
    };

    let on_chunks = {
        let client = Arc::clone(&client);
        Callback::new(move |doc: Document| {
            let id = doc.id.clone();
            state.update(|s| s.open_chunks(doc));
            let client = Arc::clone(&client);
            let bearer = auth.with_untracked(AuthState::access_token);
            leptos::task::spawn_local(async move {
                let chunks = match client.chunks(bearer.as_deref(), &id).await {
                    Ok(chunks) => chunks,
                    Err(e) => {
                        leptos::logging::error!("chunk fetch failed: {e}");
                        alert(&format!("Gagal memuat chunks: {e}"));
                        Vec::new()
                    }
                };
                state.try_update(|s| s.finish_chunks(&id, chunks));
            });
        })
    };

    let on_process = {
        let client = Arc::clone(&client);
        Callback::new(move |doc: Document| {
            if !confirm("Proses chunking & embedding dokumen ini?") {
                return;
            }
            let id = doc.id;
            state.update(|s| s.processing_id = Some(id.clone()));
            let client = Arc::clone(&client);
            let bearer = auth.with_untracked(AuthState::access_token);
            leptos::task::spawn_local(async move {
                let docs: &BrowserDocuments = &client;
                let token = bearer.as_deref();
                let result = docs
                    .process_and_wait(token, &id, PollPolicy::DOCUMENT_PROCESSING, pause, move || {
                        reload(docs, token, state)
                    })
                    .await;
                match result {
                    Ok(outcome) => {
                        leptos::logging::log!("document {id} polled {} times", outcome.attempts());
                        alert("Proses dimulai. Jika belum selesai, cek kembali halaman Admin beberapa saat lagi.");
                        reload(docs, token, state).await;
                    }
                    Err(e) => {
                        leptos::logging::error!("process trigger failed: {e}");
                        alert(&format!("Gagal trigger proses: {e}"));
                    }
                }
                state.try_update(|s| s.processing_id = None);
            });
        })
    };

    let on_delete = {
        let client = Arc::clone(&client);
        Callback::new(move |doc: Document| {
            if !confirm("Hapus dokumen ini?") {
                return;
            }
            let id = doc.id;
            state.update(|s| s.update_busy(&id, |b| b.deleting = true));
            let client = Arc::clone(&client);
            let bearer = auth.with_untracked(AuthState::access_token);
            leptos::task::spawn_local(async move {
                match client.delete(bearer.as_deref(), &id).await {
                    Ok(()) => {
                        alert("Dokumen dihapus");
                        reload(&client, bearer.as_deref(), state).await;
                    }
                    Err(e) => {
                        leptos::logging::error!("document delete failed: {e}");
                        alert(&format!("Gagal hapus: {e}"));
                    }
                }
                state.try_update(|s| s.update_busy(&id, |b| b.deleting = false));
            });
        })
    };

    let uploading = move || state.with(|s| s.uploading);

    view! {
        <div class="dm-root">
            <form class="dm-card" on:submit=on_upload>
                <div>
                    <h3 class="dm-title">"Upload PDF (Admin)"</h3>
                    <p class="dm-sub">
                        "Tambahkan dokumen materi (PDF) yang akan dijadikan basis pengetahuan Tutor Cerdas."
                    </p>
                </div>
                <label class="dm-label">"Judul dokumen"</label>
                <input
                    class="dm-input"
                    placeholder="Judul (opsional, default: nama file)"
                    prop:value=move || title.get()
                    on:input=move |ev| title.set(event_target_value(&ev))
                />
                <label class="dm-label">"File PDF"</label>
                <input type="file" accept="application/pdf" node_ref=file_ref on:change=on_file_change/>
                {move || {
                    picked
                        .get()
                        .map(|meta| view! { <div class="dm-file-info">{file_size_label(&meta.file_name, meta.size)}</div> })
                }}
                <div class="dm-btn-row">
                    <button type="submit" class="dm-btn-primary" disabled=uploading>
                        <span>{move || if uploading() { "Uploading..." } else { "Upload" }}</span>
                    </button>
                    <button type="button" class="dm-btn-soft" disabled=uploading on:click=move |_| reset_form()>
                        "Reset"
                    </button>
                </div>
            </form>

            <div class="dm-card">
                <div>
                    <h3 class="dm-title">"Daftar Dokumen"</h3>
                    <p class="dm-sub">
                        "Kelola dokumen yang sudah diupload: lihat, proses chunk & embedding, cek chunks, dan hapus."
                    </p>
                </div>
                {move || state.with(|s| s.error.clone()).map(|err| view! { <div class="dm-small-error">{err}</div> })}
                {move || {
                    let current = state.get();
                    if current.loading_docs && current.docs.is_empty() {
                        return view! { <div class="dm-empty"><span class="dm-spinner"></span>" Memuat dokumen…"</div> }
                            .into_any();
                    }
                    if current.docs.is_empty() {
                        return view! { <div class="dm-empty">"Tidak ada dokumen. Upload PDF terlebih dahulu."</div> }
                            .into_any();
                    }
                    current
                        .docs
                        .iter()
                        .map(|doc| {
                            let busy = current.busy(&doc.id);
                            let processing = current.is_processing(&doc.id);
                            view! {
                                <DocumentRow
                                    doc=doc.clone()
                                    chunks_loading=busy.chunks_loading
                                    deleting=busy.deleting
                                    processing=processing
                                    on_view=on_view
                                    on_chunks=on_chunks
                                    on_process=on_process
                                    on_delete=on_delete
                                />
                            }
                        })
                        .collect::<Vec<_>>()
                        .into_any()
                }}
            </div>

            {move || {
                state
                    .with(|s| s.chunks_modal.clone())
                    .map(|modal| {
                        view! {
                            <ChunksModalView modal=modal on_close=Callback::new(move |()| state.update(DocumentsState::close_chunks))/>
                        }
                    })
            }}
        </div>
    }
}

#[component]
#[allow(clippy::too_many_arguments)]
fn DocumentRow(
    doc: Document,
    chunks_loading: bool,
    deleting: bool,
    processing: bool,
    on_view: Callback<Document>,
    on_chunks: Callback<Document>,
    on_process: Callback<Document>,
    on_delete: Callback<Document>,
) -> impl IntoView {
    let badge = format!("dm-status-badge {}", status_class(&doc.status));
    let status = doc.status.as_str().to_owned();
    let title = doc.display_title().to_owned();
    let uploaded = format!(
        "Uploaded: {} · {}",
        doc.uploaded_by.as_deref().filter(|u| !u.is_empty()).unwrap_or("—"),
        timestamp(doc.created_at.as_deref()),
    );
    let supabase_error = doc.supabase_error_text();
    let count_label = if chunks_loading { "Loading chunks…".to_owned() } else { chunk_count_label(doc.chunk_count) };

    let (d1, d2, d3, d4, d5) = (doc.clone(), doc.clone(), doc.clone(), doc.clone(), doc);

    view! {
        <div class="dm-doc-row">
            <div class="dm-doc-main">
                <div class="dm-doc-head">
                    <div class="dm-doc-title">{title}</div>
                    <span class=badge>{status}</span>
                    <button
                        type="button"
                        class="dm-chunk-link-btn"
                        disabled=chunks_loading
                        on:click=move |_| on_chunks.run(d1.clone())
                    >
                        {count_label}
                    </button>
                </div>
                <div class="dm-doc-meta">{uploaded}</div>
                {supabase_error.map(|err| view! { <div class="dm-doc-meta dm-doc-meta--error">{format!("Supabase: {err}")}</div> })}
            </div>
            <div class="dm-doc-actions">
                <button type="button" class="dm-btn-soft" on:click=move |_| on_view.run(d2.clone())>
                    "View"
                </button>
                <button type="button" class="dm-btn-soft" disabled=chunks_loading on:click=move |_| on_chunks.run(d3.clone())>
                    {if chunks_loading { "Chunks…" } else { "View Chunks" }}
                </button>
                <button type="button" class="dm-btn-soft" disabled=processing on:click=move |_| on_process.run(d4.clone())>
                    {if processing { "Processing…" } else { "Chunk & Embed" }}
                </button>
                <button type="button" class="dm-btn-soft" disabled=deleting on:click=move |_| on_delete.run(d5.clone())>
                    {if deleting { "Deleting…" } else { "Delete" }}
                </button>
            </div>
        </div>
    }
}
