use super::*;
use crate::focus::CHROME_LAYER_Z;

#[component]
pub(super) fn Dock() -> impl IntoView {
    let session = use_session();
    let snapshot = session.snapshot;
    let visible = move || session.chrome.get().show_launcher();

    view! {
        <Show when=visible fallback=|| ()>
            <nav
                class="dock"
                style=format!("z-index:{CHROME_LAYER_Z};")
                aria-label="Application launcher"
            >
                <For each=|| apps::dock_roster() key=|entry| entry.id.as_str() let:entry>
                    {
                        let id = entry.id;
                        let running = move || snapshot.get().is_open(id);
                        let minimized = move || snapshot.get().is_minimized(id);
                        view! {
                            <button
                                class="dock-item"
                                class:minimized=minimized
                                aria-label=entry.label
                                on:click=move |_| session.toggle_from_launcher(id)
                            >
                                <span class="dock-icon">{entry.label}</span>
                                <Show when=move || running() || minimized() fallback=|| ()>
                                    <span class="dock-indicator" aria-hidden="true" />
                                </Show>
                            </button>
                        }
                    }
                </For>
            </nav>
        </Show>
    }
}
