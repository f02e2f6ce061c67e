//! Browser speech recognition and synthesis glue.
//!
//! SYSTEM CONTEXT
//! ==============
//! The voice page records one utterance with `SpeechRecognition`, sends the
//! transcript to the chat endpoint, and reads the reply aloud with
//! `speechSynthesis`. Neither API is modeled by stable `web-sys` bindings in
//! the same way across browsers (recognition is still `webkit`-prefixed in
//! Chromium), so recognition is driven through `js_sys::Reflect`.
//!
//! DESIGN
//! ======
//! At most one recognition and one utterance exist at a time. Their JS
//! objects and the closures they call back into are parked in thread-local
//! slots (the browser is single-threaded), so components only hold `Copy`
//! signals. Replacing or shutting down a slot detaches the JS handlers first,
//! so a late browser event never reaches a dropped closure.
//!
//! The last recognized transcript is kept inside the recognition closures,
//! not in reactive state, and handed to `on_end`.

#[cfg(test)]
#[path = "speech_api_test.rs"]
mod speech_api_test;

pub const SPEECH_LANG: &str = "id-ID";
pub const SPEECH_RATE: f32 = 0.95;
pub const SPEECH_PITCH: f32 = 1.05;

/// Callbacks for one recognition session.
pub struct RecognitionHandlers {
    pub on_result: Box<dyn FnMut(String)>,
    pub on_error: Box<dyn FnMut(String)>,
    /// Receives the last final transcript (possibly empty).
    pub on_end: Box<dyn FnMut(String)>,
}

/// Callbacks for one utterance.
pub struct PlaybackHandlers {
    pub on_start: Box<dyn FnMut()>,
    pub on_end: Box<dyn FnMut()>,
    pub on_error: Box<dyn FnMut()>,
}

/// Index of the preferred voice: the first whose language tag contains
/// `id`, else the first voice.
pub fn preferred_voice_index<S: AsRef<str>>(langs: &[S]) -> Option<usize> {
    langs
        .iter()
        .position(|lang| lang.as_ref().to_lowercase().contains("id"))
        .or(if langs.is_empty() { None } else { Some(0) })
}

// =============================================================================
// BROWSER IMPLEMENTATION
// =============================================================================

#[cfg(feature = "hydrate")]
mod browser {
    use std::cell::RefCell;
    use std::rc::Rc;

    use js_sys::{Array, Function, Reflect};
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{SpeechSynthesis, SpeechSynthesisUtterance, SpeechSynthesisVoice};

    use super::{PlaybackHandlers, RecognitionHandlers, SPEECH_LANG, SPEECH_PITCH, SPEECH_RATE, preferred_voice_index};

    type JsCallback = Closure<dyn FnMut(JsValue)>;

    struct ActiveRecognition {
        handle: JsValue,
        _callbacks: [JsCallback; 3],
    }

    struct ActiveUtterance {
        utterance: SpeechSynthesisUtterance,
        _callbacks: [JsCallback; 3],
    }

    thread_local! {
        static RECOGNITION: RefCell<Option<ActiveRecognition>> = const { RefCell::new(None) };
        static UTTERANCE: RefCell<Option<ActiveUtterance>> = const { RefCell::new(None) };
    }

    fn js_err(err: &JsValue) -> String {
        err.as_string().unwrap_or_else(|| format!("{err:?}"))
    }

    fn recognition_ctor() -> Option<Function> {
        let window = web_sys::window()?;
        ["SpeechRecognition", "webkitSpeechRecognition"].iter().find_map(|name| {
            Reflect::get(&window, &JsValue::from_str(name))
                .ok()
                .and_then(|v| v.dyn_into::<Function>().ok())
        })
    }

    fn call_method(target: &JsValue, name: &str) {
        if let Ok(method) = Reflect::get(target, &JsValue::from_str(name)).and_then(|m| m.dyn_into::<Function>().map_err(JsValue::from)) {
            let _ = method.call0(target);
        }
    }

    fn set_prop(target: &JsValue, name: &str, value: &JsValue) -> Result<(), String> {
        Reflect::set(target, &JsValue::from_str(name), value).map(|_| ()).map_err(|e| js_err(&e))
    }

    /// `event.results[0][0].transcript`
    fn first_transcript(event: &JsValue) -> Option<String> {
        let results = Reflect::get(event, &JsValue::from_str("results")).ok()?;
        let result = Reflect::get_u32(&results, 0).ok()?;
        let alternative = Reflect::get_u32(&result, 0).ok()?;
        Reflect::get(&alternative, &JsValue::from_str("transcript")).ok()?.as_string()
    }

    fn error_reason(event: &JsValue) -> String {
        ["error", "message"]
            .iter()
            .find_map(|key| Reflect::get(event, &JsValue::from_str(key)).ok().and_then(|v| v.as_string()))
            .unwrap_or_default()
    }

    fn detach_recognition(active: &ActiveRecognition, method: &str) {
        for handler in ["onresult", "onerror", "onend"] {
            let _ = Reflect::set(&active.handle, &JsValue::from_str(handler), &JsValue::NULL);
        }
        call_method(&active.handle, method);
    }

    pub fn supports_recognition() -> bool {
        recognition_ctor().is_some()
    }

    pub fn start_recognition(handlers: RecognitionHandlers) -> Result<(), String> {
        let ctor = recognition_ctor().ok_or_else(|| "SpeechRecognition unavailable".to_owned())?;
        abort_recognition();

        let handle = Reflect::construct(&ctor, &Array::new()).map_err(|e| js_err(&e))?;
        set_prop(&handle, "lang", &JsValue::from_str(SPEECH_LANG))?;
        set_prop(&handle, "interimResults", &JsValue::FALSE)?;
        set_prop(&handle, "maxAlternatives", &JsValue::from_f64(1.0))?;

        let RecognitionHandlers { mut on_result, mut on_error, mut on_end } = handlers;
        let last_transcript = Rc::new(RefCell::new(String::new()));

        let last_for_result = Rc::clone(&last_transcript);
        let result_cb = Closure::wrap(Box::new(move |event: JsValue| {
            let transcript = first_transcript(&event).unwrap_or_default();
            log::debug!("speech recognition result: {transcript}");
            last_for_result.borrow_mut().clone_from(&transcript);
            on_result(transcript);
        }) as Box<dyn FnMut(JsValue)>);

        let error_cb = Closure::wrap(Box::new(move |event: JsValue| {
            let reason = error_reason(&event);
            log::warn!("speech recognition error: {reason}");
            on_error(reason);
        }) as Box<dyn FnMut(JsValue)>);

        let end_cb = Closure::wrap(Box::new(move |_event: JsValue| {
            let transcript = std::mem::take(&mut *last_transcript.borrow_mut());
            on_end(transcript);
        }) as Box<dyn FnMut(JsValue)>);

        set_prop(&handle, "onresult", result_cb.as_ref())?;
        set_prop(&handle, "onerror", error_cb.as_ref())?;
        set_prop(&handle, "onend", end_cb.as_ref())?;

        let start = Reflect::get(&handle, &JsValue::from_str("start"))
            .and_then(|m| m.dyn_into::<Function>().map_err(JsValue::from))
            .map_err(|e| js_err(&e))?;
        start.call0(&handle).map_err(|e| js_err(&e))?;

        RECOGNITION.with(|slot| {
            *slot.borrow_mut() = Some(ActiveRecognition { handle, _callbacks: [result_cb, error_cb, end_cb] });
        });
        Ok(())
    }

    /// Ask the recognizer to finish; pending results and `on_end` still fire.
    pub fn stop_recognition() {
        RECOGNITION.with(|slot| {
            if let Some(active) = slot.borrow().as_ref() {
                call_method(&active.handle, "stop");
            }
        });
    }

    /// Abort without any further callbacks.
    pub fn abort_recognition() {
        if let Some(active) = RECOGNITION.with(|slot| slot.borrow_mut().take()) {
            detach_recognition(&active, "abort");
        }
    }

    pub fn supports_synthesis() -> bool {
        web_sys::window().is_some_and(|w| w.speech_synthesis().is_ok())
    }

    fn synthesis() -> Option<SpeechSynthesis> {
        web_sys::window().and_then(|w| w.speech_synthesis().ok())
    }

    fn preferred_voice(synth: &SpeechSynthesis) -> Option<SpeechSynthesisVoice> {
        let voices: Vec<SpeechSynthesisVoice> =
            synth.get_voices().iter().filter_map(|v| v.dyn_into::<SpeechSynthesisVoice>().ok()).collect();
        let langs: Vec<String> = voices.iter().map(SpeechSynthesisVoice::lang).collect();
        preferred_voice_index(&langs).and_then(|idx| voices.get(idx).cloned())
    }

    fn detach_utterance(active: &ActiveUtterance) {
        active.utterance.set_onstart(None);
        active.utterance.set_onend(None);
        active.utterance.set_onerror(None);
    }

    pub fn speak(text: &str, handlers: PlaybackHandlers) -> Result<(), String> {
        let synth = synthesis().ok_or_else(|| "speechSynthesis unavailable".to_owned())?;
        cancel_speech();

        let utterance = SpeechSynthesisUtterance::new_with_text(text).map_err(|e| js_err(&e))?;
        utterance.set_lang(SPEECH_LANG);
        if let Some(voice) = preferred_voice(&synth) {
            utterance.set_voice(Some(&voice));
        }
        utterance.set_rate(SPEECH_RATE);
        utterance.set_pitch(SPEECH_PITCH);

        let PlaybackHandlers { mut on_start, mut on_end, mut on_error } = handlers;
        let start_cb = Closure::wrap(Box::new(move |_event: JsValue| on_start()) as Box<dyn FnMut(JsValue)>);
        let end_cb = Closure::wrap(Box::new(move |_event: JsValue| on_end()) as Box<dyn FnMut(JsValue)>);
        let error_cb = Closure::wrap(Box::new(move |event: JsValue| {
            log::warn!("speech synthesis error: {}", error_reason(&event));
            on_error();
        }) as Box<dyn FnMut(JsValue)>);
        utterance.set_onstart(Some(start_cb.as_ref().unchecked_ref()));
        utterance.set_onend(Some(end_cb.as_ref().unchecked_ref()));
        utterance.set_onerror(Some(error_cb.as_ref().unchecked_ref()));

        synth.cancel();
        synth.speak(&utterance);

        UTTERANCE.with(|slot| {
            *slot.borrow_mut() = Some(ActiveUtterance { utterance, _callbacks: [start_cb, end_cb, error_cb] });
        });
        Ok(())
    }

    /// Silence playback without firing the utterance callbacks.
    pub fn cancel_speech() {
        if let Some(active) = UTTERANCE.with(|slot| slot.borrow_mut().take()) {
            detach_utterance(&active);
        }
        if let Some(synth) = synthesis() {
            if synth.speaking() || synth.pending() {
                synth.cancel();
            }
        }
    }
}

// =============================================================================
// PUBLIC SURFACE
// =============================================================================

pub fn supports_recognition() -> bool {
    #[cfg(feature = "hydrate")]
    {
        browser::supports_recognition()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        false
    }
}

pub fn supports_synthesis() -> bool {
    #[cfg(feature = "hydrate")]
    {
        browser::supports_synthesis()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        false
    }
}

/// Start recording one utterance (`id-ID`, final results only).
///
/// # Errors
///
/// Returns an error string when recognition is unsupported or refuses to
/// start.
pub fn start_recognition(handlers: RecognitionHandlers) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        browser::start_recognition(handlers)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = handlers;
        Err("not available on server".to_owned())
    }
}

pub fn stop_recognition() {
    #[cfg(feature = "hydrate")]
    browser::stop_recognition();
}

pub fn abort_recognition() {
    #[cfg(feature = "hydrate")]
    browser::abort_recognition();
}

/// Speak `text`, cancelling whatever is playing.
///
/// # Errors
///
/// Returns an error string when synthesis is unsupported.
pub fn speak(text: &str, handlers: PlaybackHandlers) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        browser::speak(text, handlers)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (text, handlers);
        Err("not available on server".to_owned())
    }
}

pub fn cancel_speech() {
    #[cfg(feature = "hydrate")]
    browser::cancel_speech();
}

/// Stop everything; used on Stop, Close, and page unmount.
pub fn shutdown() {
    abort_recognition();
    cancel_speech();
}
