//! Root route: forwards to the page that fits the visitor.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::loading_screen::LoadingScreen;
use crate::state::auth::AuthState;
use crate::util::route_guard::landing_path;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    Effect::new(move || {
        if let Some(path) = auth.with(landing_path) {
            navigate(path, NavigateOptions { replace: true, ..Default::default() });
        }
    });

    view! { <LoadingScreen title="Memuat…" subtitle="Menyiapkan halaman untukmu."/> }
}
