//! Display formatting for chunk cards and timestamps.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

/// Characters of chunk text shown before "View more" on the user page.
pub const PREVIEW_CHARS: usize = 300;
/// Characters of chunk text shown on the voice page.
pub const SPEECH_CHUNK_CHARS: usize = 450;

/// Similarity with `decimals` places, or `fallback` when absent.
pub fn similarity(value: Option<f64>, decimals: usize, fallback: &str) -> String {
    value.map_or_else(|| fallback.to_owned(), |v| format!("{v:.decimals$}"))
}

/// Whether `text` is longer than `max` characters.
pub fn exceeds(text: &str, max: usize) -> bool {
    text.chars().nth(max).is_some()
}

/// First `max` characters of `text`, with `…` appended when cut.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_owned(),
    }
}

/// Chunk index label; `-` when the backend sent none.
pub fn chunk_index(index: Option<i64>) -> String {
    index.map_or_else(|| "-".to_owned(), |i| i.to_string())
}

/// Render an ISO timestamp in the browser locale; `-` when absent.
pub fn timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|r| !r.is_empty()) else {
        return "-".to_owned();
    };
    #[cfg(feature = "hydrate")]
    {
        let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_str(raw));
        if !date.get_time().is_nan() {
            return String::from(date.to_locale_string("id-ID", &wasm_bindgen::JsValue::UNDEFINED));
        }
    }
    raw.to_owned()
}
