//! Desktop shell UI composition and interaction surfaces.

mod dock;
mod status_bar;
mod window;

use std::rc::Rc;
use std::time::Duration;

use desk_contract::{AppId, DesktopSignal};
use desk_host::KeyValueStore;
use leptos::*;

use self::{dock::Dock, status_bar::StatusBar, window::DesktopWindow};

use crate::{
    apps,
    chrome::ChromeVisibility,
    model::{PointerPosition, RegistrySnapshot, ResizeEdge, ViewportSize},
    session::{SessionCoordinator, Subscription},
};

#[derive(Clone, Copy)]
/// Leptos context for reading session state and driving the coordinator.
pub struct SessionContext {
    /// Reactive view of the shared registry.
    pub snapshot: RwSignal<RegistrySnapshot>,
    /// Which window currently covers the viewport, if any.
    pub maximized: RwSignal<Option<AppId>>,
    /// Chrome visibility state machine.
    pub chrome: RwSignal<ChromeVisibility>,
    coordinator: StoredValue<SessionCoordinator>,
}

impl SessionContext {
    fn new(coordinator: SessionCoordinator) -> Self {
        let snapshot = coordinator.snapshot;
        let maximized = coordinator.maximized;
        let chrome = coordinator.chrome;
        Self {
            snapshot,
            maximized,
            chrome,
            coordinator: store_value(coordinator),
        }
    }

    /// Opens or refocuses a window.
    pub fn open(&self, id: AppId) {
        self.coordinator.with_value(|c| c.open(id));
    }

    /// Resolves a launcher click.
    pub fn toggle_from_launcher(&self, id: AppId) {
        self.coordinator.with_value(|c| c.toggle_from_launcher(id));
    }

    /// Asks a window to play its closing animation.
    pub fn request_close(&self, id: AppId) {
        self.coordinator.with_value(|c| c.request_close(id));
    }

    /// Asks a window to play its minimizing animation.
    pub fn request_minimize(&self, id: AppId) {
        self.coordinator.with_value(|c| c.request_minimize(id));
    }

    /// Removes a window after its closing animation finished.
    pub fn close_committed(&self, id: AppId) {
        self.coordinator.with_value(|c| c.close_committed(id));
    }

    /// Parks a window in the minimized set after its animation finished.
    pub fn minimize_committed(&self, id: AppId) {
        self.coordinator.with_value(|c| c.minimize_committed(id));
    }

    /// Records that `id` started or stopped covering the viewport.
    pub fn set_maximized(&self, id: AppId, maximized: bool) {
        self.coordinator.with_value(|c| c.set_maximized(id, maximized));
    }

    /// Feeds one pointer sample through the chrome reveal hysteresis.
    pub fn sample_pointer(&self, pointer: PointerPosition, viewport: ViewportSize) {
        self.coordinator
            .with_value(|c| c.sample_pointer(pointer, viewport));
    }

    /// Ends the session from the status strip menu.
    pub fn logout(&self) {
        self.coordinator.with_value(|c| c.logout());
    }

    /// Powers the desktop down into the shutdown screen.
    pub fn shutdown(&self) {
        self.coordinator.with_value(|c| c.shutdown());
    }

    /// Subscribes to the in-process signal channel.
    pub fn subscribe(&self, handler: Rc<dyn Fn(&DesktopSignal)>) -> Subscription {
        self.coordinator.with_value(|c| c.hub().subscribe(handler))
    }
}

#[component]
/// Provides [`SessionContext`] to descendant components and wires the
/// page-level broadcast channel into the coordinator.
pub fn SessionProvider(
    /// Durable store backing the shared registry.
    store: Rc<dyn KeyValueStore>,
    children: Children,
) -> impl IntoView {
    let coordinator = SessionCoordinator::new(store);
    let ingest = store_value(Some(coordinator.install_dom_ingest()));
    on_cleanup(move || ingest.set_value(None));

    provide_context(SessionContext::new(coordinator));
    children().into_view()
}

/// Returns the current [`SessionContext`].
///
/// # Panics
///
/// Panics if called outside [`SessionProvider`].
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext not provided")
}

#[component]
/// Renders the full desktop: window stack, launcher, and status strip.
pub fn DesktopShell() -> impl IntoView {
    let session = use_session();
    let snapshot = session.snapshot;

    let on_pointer_move = move |ev: web_sys::PointerEvent| {
        session.sample_pointer(pointer_from_pointer_event(&ev), current_viewport());
    };

    view! {
        <div class="desktop" on:pointermove=on_pointer_move>
            <div class="desktop-backdrop" aria-hidden="true" />
            <StatusBar />
            <main class="desktop-surface">
                <For
                    each=move || snapshot.get().open_stack
                    key=|id| id.as_str()
                    let:id
                >
                    <DesktopWindow app_id=id />
                </For>
            </main>
            <Dock />
        </div>
    }
}

fn current_viewport() -> ViewportSize {
    let (width, height) = desk_host_web::viewport_size();
    ViewportSize { width, height }
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: f64::from(ev.client_x()),
        y: f64::from(ev.client_y()),
    }
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn resize_edge_class(edge: ResizeEdge) -> &'static str {
    match edge {
        ResizeEdge::Top => "edge-n",
        ResizeEdge::Bottom => "edge-s",
        ResizeEdge::Right => "edge-e",
        ResizeEdge::Left => "edge-w",
        ResizeEdge::TopRight => "edge-ne",
        ResizeEdge::TopLeft => "edge-nw",
        ResizeEdge::BottomRight => "edge-se",
        ResizeEdge::BottomLeft => "edge-sw",
    }
}
