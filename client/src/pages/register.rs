//! Account registration page.

use std::sync::Arc;

use api::session::{AuthEvent, SessionHub};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::config::ClientConfig;
use crate::util::browser::alert;
use crate::util::route_guard::LOGIN_PATH;

const CONFIRMATION_NOTICE: &str = "Check your email for confirmation (if enabled).";

#[component]
pub fn RegisterPage() -> impl IntoView {
    let hub = expect_context::<SessionHub>();
    let config = expect_context::<ClientConfig>();
    let navigate = use_navigate();

    let full_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let identity = Arc::new(crate::net::api::identity(&config));

    let on_submit = {
        let navigate = navigate.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            if busy.get_untracked() {
                return;
            }
            busy.set(true);
            let name_value = full_name.get_untracked().trim().to_owned();
            let email_value = email.get_untracked().trim().to_owned();
            let password_value = password.get_untracked();
            let identity = Arc::clone(&identity);
            let hub = hub.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match identity.sign_up(&email_value, &password_value, &name_value).await {
                    Ok(session) => {
                        if let Some(session) = session {
                            hub.set(AuthEvent::SignedIn, Some(session));
                        }
                        alert(CONFIRMATION_NOTICE);
                        navigate(LOGIN_PATH, Default::default());
                    }
                    Err(e) => {
                        leptos::logging::warn!("sign-up failed: {e}");
                        alert(&e.to_string());
                    }
                }
                busy.try_set(false);
            });
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1 class="auth-title">"Register"</h1>
                <form class="auth-form" on:submit=on_submit>
                    <label class="auth-label">"Full name"</label>
                    <input
                        class="auth-input"
                        type="text"
                        prop:value=move || full_name.get()
                        on:input=move |ev| full_name.set(event_target_value(&ev))
                    />
                    <label class="auth-label">"Email"</label>
                    <input
                        class="auth-input"
                        type="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <label class="auth-label">"Password"</label>
                    <input
                        class="auth-input"
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <div class="auth-actions">
                        <button class="auth-button" type="submit" disabled=move || busy.get()>
                            "Register"
                        </button>
                        <button
                            class="auth-button auth-button--ghost"
                            type="button"
                            on:click=move |_| navigate(LOGIN_PATH, Default::default())
                        >
                            "Back"
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
