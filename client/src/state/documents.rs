//! Admin document manager state.
//!
//! DESIGN
//! ======
//! Per-document busy flags live in a map keyed by document id so that one
//! slow delete or chunk fetch never disables the buttons of other rows.
//! Processing is tracked separately by `processing_id` because only one
//! trigger-and-poll runs at a time.

#[cfg(test)]
#[path = "documents_test.rs"]
mod documents_test;

use std::collections::HashMap;

use api::types::{Document, DocumentChunk, DocumentStatus};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ItemBusy {
    pub deleting: bool,
    pub chunks_loading: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChunksModal {
    pub doc: Document,
    pub chunks: Vec<DocumentChunk>,
    pub loading: bool,
}

#[derive(Clone, Debug, Default)]
pub struct DocumentsState {
    pub docs: Vec<Document>,
    pub loading_docs: bool,
    pub error: Option<String>,
    pub busy: HashMap<String, ItemBusy>,
    pub processing_id: Option<String>,
    pub chunks_modal: Option<ChunksModal>,
    pub uploading: bool,
}

impl DocumentsState {
    pub fn begin_load(&mut self) {
        self.loading_docs = true;
        self.error = None;
    }

    /// A failed load keeps the previous rows and shows the error above them.
    pub fn finish_load(&mut self, result: Result<Vec<Document>, String>) {
        self.loading_docs = false;
        match result {
            Ok(docs) => self.docs = docs,
            Err(err) => self.error = Some(err),
        }
    }

    /// Signed out: nothing may stay on screen.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn busy(&self, id: &str) -> ItemBusy {
        self.busy.get(id).copied().unwrap_or_default()
    }

    pub fn update_busy(&mut self, id: &str, change: impl FnOnce(&mut ItemBusy)) {
        change(self.busy.entry(id.to_owned()).or_default());
    }

    pub fn is_processing(&self, id: &str) -> bool {
        self.processing_id.as_deref() == Some(id)
    }

    pub fn open_chunks(&mut self, doc: Document) {
        self.update_busy(&doc.id, |b| b.chunks_loading = true);
        self.chunks_modal = Some(ChunksModal { doc, chunks: Vec::new(), loading: true });
    }

    /// Fill the chunks modal if it still shows document `id`.
    pub fn finish_chunks(&mut self, id: &str, chunks: Vec<DocumentChunk>) {
        self.update_busy(id, |b| b.chunks_loading = false);
        if let Some(modal) = self.chunks_modal.as_mut().filter(|m| m.doc.id == id) {
            modal.chunks = chunks;
            modal.loading = false;
        }
    }

    pub fn close_chunks(&mut self) {
        self.chunks_modal = None;
    }
}

/// CSS modifier for a status badge.
pub fn status_class(status: &DocumentStatus) -> &'static str {
    match status {
        DocumentStatus::Embedded => "dm-status-embedded",
        DocumentStatus::Processing => "dm-status-processing",
        DocumentStatus::Error => "dm-status-error",
        DocumentStatus::Uploaded | DocumentStatus::Other(_) => "dm-status-other",
    }
}

/// `n chunk` / `n chunks`, or a dash when the count is unknown.
pub fn chunk_count_label(count: Option<i64>) -> String {
    match count {
        Some(1) => "1 chunk".to_owned(),
        Some(n) => format!("{n} chunks"),
        None => "— chunks".to_owned(),
    }
}

/// Header line of one chunk in the chunks modal.
pub fn chunk_heading(chunk: &DocumentChunk, position: usize) -> String {
    let index = chunk.chunk_index.map_or_else(|| position.to_string(), |i| i.to_string());
    let tokens = chunk.tokens.map_or_else(|| "-".to_owned(), |t| t.to_string());
    format!("#{index} — tokens: {tokens}")
}

/// `name — 1.23 MB` line under the file picker.
#[allow(clippy::cast_precision_loss)]
pub fn file_size_label(name: &str, size: u64) -> String {
    format!("{name} — {:.2} MB", size as f64 / 1024.0 / 1024.0)
}
