use leptos::*;
use leptos_meta::*;

use crate::session_gate::SessionGate;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Justin Short" />
        <Meta
            name="description"
            content="A macOS-style personal desktop that lives in the browser."
        />

        <main class="site-root">
            <SessionGate />
        </main>
    }
}
