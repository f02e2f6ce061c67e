//! Small browser affordances: dialogs, clipboard, navigation helpers.
//!
//! Every helper degrades to a no-op (or a negative answer) outside the
//! browser so components can call them unconditionally.

/// `window.alert`.
pub fn alert(message: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = message;
    }
}

/// `window.confirm`; `false` when unavailable.
pub fn confirm(message: &str) -> bool {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = message;
        false
    }
}

/// Copy `text` to the clipboard.
///
/// # Errors
///
/// Returns an error string when the clipboard is unavailable or the write is
/// rejected.
pub async fn copy_text(text: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast;

        // Looked up dynamically: `navigator.clipboard` is absent on insecure origins.
        let navigator = web_sys::window().ok_or_else(|| "no window".to_owned())?.navigator();
        let clipboard = js_sys::Reflect::get(&navigator, &"clipboard".into())
            .ok()
            .filter(|c| !c.is_undefined() && !c.is_null())
            .ok_or_else(|| "clipboard unavailable".to_owned())?;
        let write_text = js_sys::Reflect::get(&clipboard, &"writeText".into())
            .ok()
            .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
            .ok_or_else(|| "clipboard unavailable".to_owned())?;
        let promise = write_text
            .call1(&clipboard, &text.into())
            .map_err(|e| format!("{e:?}"))?
            .dyn_into::<js_sys::Promise>()
            .map_err(|e| format!("{e:?}"))?;
        wasm_bindgen_futures::JsFuture::from(promise)
            .await
            .map(|_| ())
            .map_err(|e| format!("{e:?}"))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = text;
        Err("not available on server".to_owned())
    }
}

/// Copy and report the result with an alert.
pub fn copy_with_alert(text: String) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match copy_text(&text).await {
            Ok(()) => alert("Teks disalin"),
            Err(e) => {
                leptos::logging::warn!("clipboard write failed: {e}");
                alert("Gagal menyalin teks");
            }
        }
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = text;
    }
}

/// Copy without feedback.
pub fn copy_silently(text: String) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        if let Err(e) = copy_text(&text).await {
            leptos::logging::warn!("clipboard write failed: {e}");
        }
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = text;
    }
}

/// Open `url` in a new tab.
pub fn open_in_new_tab(url: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.open_with_url_and_target_and_features(url, "_blank", "noopener");
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = url;
    }
}

/// Go back in history; returns `false` when there is nothing to go back to.
pub fn history_back() -> bool {
    #[cfg(feature = "hydrate")]
    {
        let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
            return false;
        };
        if history.length().unwrap_or(0) > 1 {
            return history.back().is_ok();
        }
        false
    }
    #[cfg(not(feature = "hydrate"))]
    {
        false
    }
}
