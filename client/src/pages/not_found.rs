//! Fallback for unknown routes.

use leptos::prelude::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="not-found">
            <h1>"404 · Halaman tidak ditemukan"</h1>
            <p>"Gunakan menu di atas untuk kembali ke halaman utama."</p>
        </div>
    }
}
