//! Canvas host for the animated voice-page avatar.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;

use crate::state::speech::SpeechState;
#[cfg(feature = "hydrate")]
use crate::util::avatar_canvas::ContextEvent;

/// Mounts the avatar renderer on its canvas and stops it on unmount.
#[component]
pub fn AvatarStage(speech: RwSignal<SpeechState>) -> impl IntoView {
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
    let alive = Arc::new(AtomicBool::new(true));

    {
        let alive = Arc::clone(&alive);
        on_cleanup(move || alive.store(false, Ordering::Relaxed));
    }

    Effect::new(move |started: Option<bool>| {
        if started == Some(true) {
            return true;
        }
        let Some(canvas) = canvas_ref.get() else {
            return false;
        };
        #[cfg(feature = "hydrate")]
        {
            let current = move || {
                speech
                    .try_with_untracked(|s| (s.avatar_mode(), s.expression))
                    .unwrap_or_default()
            };
            let on_context = move |event: ContextEvent| {
                speech.try_update(|s| match event {
                    ContextEvent::Lost => s.rendering_lost(),
                    ContextEvent::Resumed => s.rendering_restored(),
                });
            };
            crate::util::avatar_canvas::start(canvas, current, on_context, Arc::clone(&alive));
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (canvas, &alive);
        true
    });

    let label = move || speech.with(|s| s.avatar_mode().label());

    view! {
        <div class="speech-avatar">
            <canvas class="speech-avatar-canvas" node_ref=canvas_ref></canvas>
            <div class="speech-avatar-label">{label}</div>
        </div>
    }
}
