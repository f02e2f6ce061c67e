//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` owns the one `SessionHub` of the page and mirrors it into the
//! reactive `AuthState` every component reads. The hub listener persists the
//! session to `localStorage` and starts a profile fetch tagged with the auth
//! generation, so a slow fetch for an old session is dropped.
//!
//! The stored session is restored in an effect, which only runs in the
//! browser; the server renders every gated route in its "checking auth"
//! state and the client takes over after hydration. An expired session is
//! refreshed before it is published, so guards stay pending until then.

use api::session::{AuthEvent, SessionHub};
use api::types::{Role, Session};
use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::header::Header;
use crate::components::protected_route::ProtectedRoute;
use crate::config::ClientConfig;
use crate::pages::{
    admin::AdminPage, home::HomePage, login::LoginPage, not_found::NotFoundPage, register::RegisterPage,
    speech::SpeechPage, user::UserPage,
};
use crate::state::auth::{AuthState, Restore, restore_plan};
use crate::util::storage::{SESSION_KEY, load_json, save_json};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="id">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Mirror one hub event into `auth` and kick off the matching profile fetch.
fn on_auth_event(auth: RwSignal<AuthState>, config: &ClientConfig, event: AuthEvent, session: Option<Session>) {
    save_json(SESSION_KEY, session.as_ref());
    let Some(generation) = auth.try_update(|a| a.apply_session(session.clone())) else {
        return;
    };
    leptos::logging::log!("auth event {event:?}, signed in: {}", session.is_some());

    let Some(session) = session else {
        return;
    };

    #[cfg(feature = "hydrate")]
    {
        let identity = crate::net::api::identity(config);
        leptos::task::spawn_local(async move {
            let profile = match identity.fetch_profile(&session).await {
                Ok(profile) => profile,
                Err(e) => {
                    leptos::logging::warn!("profile fetch failed: {e}");
                    None
                }
            };
            if auth.try_update(|a| a.apply_profile(generation, profile)) != Some(true) {
                leptos::logging::log!("discarded profile for stale session generation {generation}");
            }
        });
    }

    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, generation, session);
    }
}

/// Publish the stored session, refreshing it first when it has expired.
fn restore_session(hub: &SessionHub, config: &ClientConfig) {
    let stored = load_json::<Session>(SESSION_KEY);

    #[cfg(feature = "hydrate")]
    let now_secs = (js_sys::Date::now() / 1000.0) as i64;
    #[cfg(not(feature = "hydrate"))]
    let now_secs = 0;

    match restore_plan(stored, now_secs) {
        Restore::Publish(session) => hub.set(AuthEvent::InitialSession, session),
        Restore::Refresh(token) => {
            #[cfg(feature = "hydrate")]
            {
                let identity = crate::net::api::identity(config);
                let hub = hub.clone();
                leptos::task::spawn_local(async move {
                    let session = match identity.refresh(&token).await {
                        Ok(session) => Some(session),
                        Err(e) => {
                            leptos::logging::warn!("session refresh failed: {e}");
                            None
                        }
                    };
                    hub.set(AuthEvent::InitialSession, session);
                });
            }

            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (config, token);
                hub.set(AuthEvent::InitialSession, None);
            }
        }
    }
}

/// Root application component.
///
/// Provides the configuration, session hub, and auth state contexts and sets
/// up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_build_env();
    let hub = SessionHub::new();
    let auth = RwSignal::new(AuthState::default());

    provide_context(config.clone());
    provide_context(hub.clone());
    provide_context(auth);

    let subscription = hub.subscribe({
        let config = config.clone();
        move |event, session| on_auth_event(auth, &config, event, session.cloned())
    });
    on_cleanup(move || drop(subscription));

    Effect::new({
        let config = config.clone();
        let hub = hub.clone();
        move || restore_session(&hub, &config)
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/tutor-cerdas.css"/>
        <Title text="Tutor Cerdas"/>

        <Router>
            <div class="app-root">
                <Header/>
                <main class="app-main">
                    <div class="app-main-inner">
                        <Routes fallback=NotFoundPage>
                            <Route path=StaticSegment("") view=HomePage/>
                            <Route path=StaticSegment("login") view=LoginPage/>
                            <Route path=StaticSegment("register") view=RegisterPage/>
                            <Route
                                path=StaticSegment("user")
                                view=|| view! { <ProtectedRoute><UserPage/></ProtectedRoute> }
                            />
                            <Route
                                path=StaticSegment("admin")
                                view=|| view! { <ProtectedRoute role=Role::Admin><AdminPage/></ProtectedRoute> }
                            />
                            <Route
                                path=StaticSegment("speech")
                                view=|| view! { <ProtectedRoute><SpeechPage/></ProtectedRoute> }
                            />
                        </Routes>
                    </div>
                </main>
            </div>
        </Router>
    }
}
