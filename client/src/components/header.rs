//! Application header with branding, signed-in identity, and navigation.

use api::session::{AuthEvent, SessionHub};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::config::ClientConfig;
use crate::state::auth::AuthState;
use crate::util::route_guard::LOGIN_PATH;

#[component]
pub fn Header() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let hub = expect_context::<SessionHub>();
    let config = expect_context::<ClientConfig>();
    let navigate = use_navigate();

    // The identity call is fire-and-forget; local state is cleared at once.
    let on_logout = move |_| {
        let session = auth.get_untracked().session;
        #[cfg(feature = "hydrate")]
        {
            if let Some(session) = session {
                let identity = crate::net::api::identity(&config);
                leptos::task::spawn_local(async move {
                    if let Err(e) = identity.sign_out(&session).await {
                        leptos::logging::warn!("sign-out request failed: {e}");
                    }
                });
            }
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (session, &config);
        hub.set(AuthEvent::SignedOut, None);
        navigate(LOGIN_PATH, NavigateOptions { replace: true, ..NavigateOptions::default() });
    };

    view! {
        <header class="app-header">
            <div class="app-header-inner">
                <div class="app-brand">
                    <div class="app-logo-circle">"T"</div>
                    <div>
                        <div class="app-brand-text-main">"Tutor Cerdas"</div>
                        <div class="app-brand-text-sub">"Personalized AI tutor untuk mata kuliah teknik"</div>
                    </div>
                </div>

                <nav class="app-nav">
                    <Show
                        when=move || auth.get().signed_in()
                        fallback=|| {
                            view! {
                                <a href="/login" class="app-nav-link">"Login"</a>
                                <a href="/register" class="app-nav-link app-nav-link--primary">"Register"</a>
                            }
                        }
                    >
                        <div class="app-user-label">
                            <div>
                                <strong>{move || auth.get().display_name()}</strong>
                            </div>
                            <div>{move || format!("Role: {}", auth.get().role().as_str())}</div>
                        </div>
                        <a href="/speech" class="app-nav-link">"Speech"</a>
                        <Show when=move || auth.get().is_admin()>
                            <a href="/admin" class="app-nav-link">"Admin"</a>
                        </Show>
                        <a href="/user" class="app-nav-link">"User"</a>
                        <button class="app-nav-btn" on:click=on_logout.clone()>"Logout"</button>
                    </Show>
                </nav>
            </div>
        </header>
    }
}
