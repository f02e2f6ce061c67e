//! Admin dashboard: document upload and processing.

use leptos::prelude::*;

use crate::components::document_manager::DocumentManager;
use crate::state::auth::AuthState;

#[component]
pub fn AdminPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let signed_in_as = move || auth.with(|a| a.session.as_ref().and_then(|s| s.email().map(str::to_owned)));

    view! {
        <div class="admin-page">
            <header class="admin-header">
                <div>
                    <h1 class="admin-title">"Admin Dashboard"</h1>
                    <p class="admin-sub">"Kelola dokumen materi yang menjadi sumber jawaban Tutor Cerdas."</p>
                </div>
                {move || signed_in_as().map(|email| view! { <span class="admin-pill">{email}</span> })}
            </header>
            <DocumentManager/>
        </div>
    }
}
