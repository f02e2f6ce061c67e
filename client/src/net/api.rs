//! Typed backend and identity clients wired to the browser transport.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages and components never build URLs themselves; they ask for a client
//! here, configured from the [`ClientConfig`] in context.

use api::chat::{ChatClient, ChatSession};
use api::documents::DocumentsClient;
use api::identity::IdentityClient;

use super::http::BrowserTransport;
use crate::config::ClientConfig;

/// Context chunks requested by the voice page.
pub const SPEECH_TOP_K: u32 = 3;

pub type BrowserChatSession = ChatSession<BrowserTransport>;
pub type BrowserDocuments = DocumentsClient<BrowserTransport>;
pub type BrowserIdentity = IdentityClient<BrowserTransport>;

pub fn chat_session(config: &ClientConfig) -> BrowserChatSession {
    ChatSession::new(ChatClient::new(BrowserTransport, config.backend_url.clone()))
}

pub fn speech_chat_session(config: &ClientConfig) -> BrowserChatSession {
    chat_session(config).with_top_k(SPEECH_TOP_K)
}

pub fn documents(config: &ClientConfig) -> BrowserDocuments {
    DocumentsClient::new(BrowserTransport, config.backend_url.clone())
        .with_admin_upload_key(config.admin_upload_key.clone())
        .with_max_upload_bytes(config.max_upload_bytes())
}

pub fn identity(config: &ClientConfig) -> BrowserIdentity {
    IdentityClient::new(BrowserTransport, config.supabase_url.clone(), config.supabase_anon_key.clone())
}
