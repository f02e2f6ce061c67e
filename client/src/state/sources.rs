//! Top-k context panel state on the user page.

#[cfg(test)]
#[path = "sources_test.rs"]
mod sources_test;

use std::collections::BTreeSet;

use api::types::TopChunk;

use super::chat::ChatContext;

#[derive(Clone, Debug, Default)]
pub struct SourcesState {
    pub chunks: Vec<TopChunk>,
    pub has_context: bool,
    /// Indices of chunks showing their full text.
    pub expanded: BTreeSet<usize>,
}

impl SourcesState {
    /// Replace the panel contents; expansion is reset.
    pub fn set(&mut self, context: ChatContext) {
        self.chunks = context.chunks;
        self.has_context = context.has_context;
        self.expanded.clear();
    }

    pub fn clear(&mut self) {
        self.set(ChatContext::default());
    }

    pub fn toggle(&mut self, index: usize) {
        if !self.expanded.remove(&index) {
            self.expanded.insert(index);
        }
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.contains(&index)
    }
}
