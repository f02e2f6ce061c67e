//! Full-width spinner card shown while auth or profile state resolves.

use leptos::prelude::*;

#[component]
pub fn LoadingScreen(#[prop(into)] title: String, #[prop(optional, into)] subtitle: Option<String>) -> impl IntoView {
    view! {
        <div class="app-loading-root">
            <div class="app-loading-card">
                <div class="app-spinner"></div>
                <div>
                    <div class="app-loading-title">{title}</div>
                    {subtitle.map(|sub| view! { <div class="app-loading-sub">{sub}</div> })}
                </div>
            </div>
        </div>
    }
}
