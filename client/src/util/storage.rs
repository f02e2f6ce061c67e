//! Browser localStorage helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The identity session is persisted here so a reload restores the signed-in
//! user. These helpers centralize hydrate-only read/write behavior; on the
//! server every read misses and every write is a no-op.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Storage key of the persisted identity session.
pub const SESSION_KEY: &str = "tutor-cerdas.session";

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Load a JSON value from `localStorage` for `key`.
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    #[cfg(feature = "hydrate")]
    {
        let raw = local_storage()?.get_item(key).ok().flatten()?;
        serde_json::from_str(&raw).ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
        None
    }
}

/// Save a JSON value to `localStorage` for `key`; `None` removes the key.
pub fn save_json<T: Serialize>(key: &str, value: Option<&T>) {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = local_storage() else {
            return;
        };
        let Some(value) = value else {
            let _ = storage.remove_item(key);
            return;
        };
        let Ok(raw) = serde_json::to_string(value) else {
            return;
        };
        let _ = storage.set_item(key, &raw);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (key, value);
    }
}
