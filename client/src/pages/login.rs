//! Email + password sign-in page.
//!
//! A successful sign-in only publishes the session to the `SessionHub`; the
//! redirect to the role's home page happens in an effect once the profile
//! has loaded, so it also covers visitors who arrive already signed in.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use std::sync::Arc;

use api::session::{AuthEvent, SessionHub};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::config::ClientConfig;
use crate::state::auth::AuthState;
use crate::util::browser::alert;
use crate::util::route_guard::landing_path;

pub(crate) const MISSING_CREDENTIALS: &str = "Isi email dan password terlebih dahulu.";
const LOGIN_FAILED: &str = "Gagal login.";
pub(crate) const IDENTITY_NOT_CONFIGURED: &str =
    "Layanan login belum dikonfigurasi (TUTOR_SUPABASE_URL / TUTOR_SUPABASE_ANON_KEY kosong).";

/// Warning shown above the form when this build cannot reach the identity service.
pub(crate) fn config_warning(config: &ClientConfig) -> Option<&'static str> {
    (!config.identity_configured()).then_some(IDENTITY_NOT_CONFIGURED)
}

/// Trim the email and require both fields.
pub(crate) fn validate_credentials(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(MISSING_CREDENTIALS);
    }
    Ok((email.to_owned(), password.to_owned()))
}

/// Message shown when sign-in is rejected.
pub(crate) fn failure_message(detail: &str) -> String {
    let detail = detail.trim();
    if detail.is_empty() { LOGIN_FAILED.to_owned() } else { detail.to_owned() }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let hub = expect_context::<SessionHub>();
    let config = expect_context::<ClientConfig>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let show_password = RwSignal::new(false);
    let busy = RwSignal::new(false);
    let warning = config_warning(&config);
    let identity = Arc::new(crate::net::api::identity(&config));

    Effect::new(move || {
        let target = auth.with(|a| if a.signed_in() { landing_path(a) } else { None });
        if let Some(path) = target {
            navigate(path, NavigateOptions { replace: true, ..Default::default() });
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let (email_value, password_value) =
            match validate_credentials(&email.get_untracked(), &password.get_untracked()) {
                Ok(values) => values,
                Err(message) => {
                    alert(message);
                    return;
                }
            };
        busy.set(true);
        let identity = Arc::clone(&identity);
        let hub = hub.clone();
        leptos::task::spawn_local(async move {
            match identity.sign_in_with_password(&email_value, &password_value).await {
                Ok(session) => {
                    leptos::logging::log!("signed in as {email_value}");
                    hub.set(AuthEvent::SignedIn, Some(session));
                }
                Err(e) => {
                    leptos::logging::warn!("sign-in failed: {e}");
                    alert(&failure_message(&e.to_string()));
                }
            }
            busy.try_set(false);
        });
    };

    view! {
        <div class="auth-page">
            <Show when=move || busy.get()>
                <div class="auth-overlay">
                    <div class="auth-overlay-card">
                        <div class="auth-spinner"></div>
                        <span>"Sedang memproses, mohon tunggu..."</span>
                    </div>
                </div>
            </Show>
            <div class="auth-card">
                <p class="auth-kicker">"Tutor Cerdas"</p>
                <h1 class="auth-title">"Masuk"</h1>
                <p class="auth-sub">"Gunakan email dan password akunmu untuk melanjutkan."</p>
                {warning.map(|text| view! { <p class="auth-warning">{text}</p> })}
                <form class="auth-form" on:submit=on_submit>
                    <label class="auth-label">"Email"</label>
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="nama@kampus.ac.id"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <label class="auth-label">"Password"</label>
                    <div class="auth-password-row">
                        <input
                            class="auth-input"
                            type=move || if show_password.get() { "text" } else { "password" }
                            placeholder="••••••••"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                        <button
                            type="button"
                            class="auth-toggle"
                            on:click=move |_| show_password.update(|v| *v = !*v)
                        >
                            {move || if show_password.get() { "Sembunyikan" } else { "Lihat" }}
                        </button>
                    </div>
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Memproses..." } else { "Login" }}
                    </button>
                </form>
                <p class="auth-footer">
                    "Belum punya akun? "
                    <a href="/register">"Daftar"</a>
                </p>
            </div>
        </div>
    }
}
