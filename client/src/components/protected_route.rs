//! Gate for routes that need a session and optionally a role.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps page components in `App`'s route table. The decision itself is the
//! pure `route_guard::decide_route`; this component only maps each verdict
//! to a placeholder, a redirect, or the children.

use api::types::Role;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::loading_screen::LoadingScreen;
use crate::state::auth::AuthState;
use crate::util::route_guard::{LOGIN_PATH, RouteDecision, decide_route};

#[component]
pub fn ProtectedRoute(#[prop(optional)] role: Option<Role>, children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    let decision = Memo::new(move |_| auth.with(|a| decide_route(a, role)));

    Effect::new(move || {
        if decision.get() == RouteDecision::RedirectToLogin {
            navigate(LOGIN_PATH, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    move || match decision.get() {
        RouteDecision::AuthPending | RouteDecision::RedirectToLogin => view! {
            <LoadingScreen title="Memeriksa otentikasi…" subtitle="Menyambungkan ke sesi pengguna."/>
        }
        .into_any(),
        RouteDecision::ProfileLoading => view! {
            <LoadingScreen title="Memuat profil…" subtitle="Mengambil data role dan informasi akun."/>
        }
        .into_any(),
        RouteDecision::Unauthorized => view! {
            <div class="app-unauthorized">
                <strong>"Unauthorized"</strong>
                ": Anda tidak memiliki akses ke halaman ini."
            </div>
        }
        .into_any(),
        RouteDecision::Render => children().into_any(),
    }
}
