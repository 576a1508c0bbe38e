//! Session coordinator: the single mutation path for the shared registry
//! and the in-process fan-out of desktop signals.
//!
//! Surfaces never touch the durable store directly. They call the
//! coordinator, which persists through the registry, refreshes the reactive
//! snapshot, and broadcasts the change both in-process (the hub) and across
//! the page (the DOM bridge). Signals arriving from the DOM feed back through
//! [`SessionCoordinator::install_dom_ingest`], with an echo guard so our own
//! broadcasts are not delivered twice.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use desk_contract::{AppId, DesktopSignal};
use desk_host::{keys, KeyValueStore};
use desk_host_web::{install_signal_listener, publish_signal, SignalListenerGuard};
use leptos::{create_rw_signal, RwSignal, SignalGetUntracked, SignalSet};

use crate::chrome::ChromeVisibility;
use crate::model::{PointerPosition, RegistrySnapshot, ViewportSize};
use crate::registry::{Registry, ToggleOutcome};

type HubHandler = Rc<dyn Fn(&DesktopSignal)>;

#[derive(Clone, Default)]
/// In-process broadcast channel for desktop signals.
///
/// Delivery is synchronous and in subscription order. Handlers may
/// subscribe or drop subscriptions while a dispatch is in flight; the
/// in-flight dispatch keeps working from its own copy of the list.
pub struct SignalHub {
    handlers: Rc<RefCell<Vec<(u64, HubHandler)>>>,
    next_id: Rc<Cell<u64>>,
}

/// Keeps one hub subscription alive; dropping it unsubscribes.
pub struct Subscription {
    handlers: Rc<RefCell<Vec<(u64, HubHandler)>>>,
    id: u64,
}

impl SignalHub {
    /// Creates an empty hub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for every published signal.
    pub fn subscribe(&self, handler: Rc<dyn Fn(&DesktopSignal)>) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.handlers.borrow_mut().push((id, handler));
        Subscription {
            handlers: Rc::clone(&self.handlers),
            id,
        }
    }

    /// Delivers one signal to every current subscriber.
    pub fn publish(&self, signal: &DesktopSignal) {
        let current: Vec<HubHandler> = self
            .handlers
            .borrow()
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        for handler in current {
            handler(signal);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.handlers
            .borrow_mut()
            .retain(|(id, _)| *id != self.id);
    }
}

#[derive(Clone)]
/// Shared state and mutation entry points for one desktop session.
pub struct SessionCoordinator {
    store: Rc<dyn KeyValueStore>,
    registry: Registry,
    hub: SignalHub,
    /// Reactive view of the shared registry.
    pub snapshot: RwSignal<RegistrySnapshot>,
    /// Which window currently covers the viewport, if any.
    pub maximized: RwSignal<Option<AppId>>,
    /// Chrome visibility state machine.
    pub chrome: RwSignal<ChromeVisibility>,
    echo_guard: Rc<Cell<bool>>,
}

impl SessionCoordinator {
    /// Builds a coordinator over a durable store.
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        let registry = Registry::new(Rc::clone(&store));
        let snapshot = create_rw_signal(registry.snapshot());
        Self {
            store,
            registry,
            hub: SignalHub::new(),
            snapshot,
            maximized: create_rw_signal(None),
            chrome: create_rw_signal(ChromeVisibility::new()),
            echo_guard: Rc::new(Cell::new(false)),
        }
    }

    /// The in-process signal channel, for surfaces that need raw delivery.
    pub fn hub(&self) -> &SignalHub {
        &self.hub
    }

    /// Re-reads the registry and updates the snapshot signal if it changed.
    pub fn refresh(&self) {
        let fresh = self.registry.snapshot();
        if self.snapshot.get_untracked() != fresh {
            self.snapshot.set(fresh);
        }
    }

    /// Broadcasts a signal in-process and across the page.
    pub fn publish(&self, signal: DesktopSignal) {
        self.hub.publish(&signal);
        // DOM dispatch is synchronous, so the guard brackets the re-entrant
        // delivery into our own ingest listener.
        self.echo_guard.set(true);
        publish_signal(&signal);
        self.echo_guard.set(false);
    }

    /// Opens or refocuses a window.
    pub fn open(&self, id: AppId) {
        match self.registry.open(id) {
            Ok(true) => {
                self.refresh();
                self.publish(DesktopSignal::ApplicationChange);
            }
            Ok(false) => {}
            Err(err) => leptos::logging::warn!("registry open failed: {err}"),
        }
    }

    /// Resolves a launcher click; minimize goes through the animation
    /// request path, the other outcomes mutate immediately.
    pub fn toggle_from_launcher(&self, id: AppId) {
        match self.registry.toggle_from_launcher(id) {
            Ok(ToggleOutcome::MinimizeRequested) => {
                self.publish(DesktopSignal::MinimizeWithAnimation { id });
            }
            Ok(ToggleOutcome::Restored) | Ok(ToggleOutcome::Opened) => {
                self.refresh();
                self.publish(DesktopSignal::ApplicationChange);
            }
            Err(err) => leptos::logging::warn!("registry toggle failed: {err}"),
        }
    }

    /// Asks a window to play its closing animation.
    pub fn request_close(&self, id: AppId) {
        self.publish(DesktopSignal::CloseWithAnimation { id });
    }

    /// Asks a window to play its minimizing animation.
    pub fn request_minimize(&self, id: AppId) {
        self.publish(DesktopSignal::MinimizeWithAnimation { id });
    }

    /// Removes a window after its closing animation finished.
    pub fn close_committed(&self, id: AppId) {
        if let Err(err) = self.registry.close_committed(id) {
            leptos::logging::warn!("registry close failed: {err}");
            return;
        }
        self.refresh();
        self.publish(DesktopSignal::ApplicationChange);
    }

    /// Parks a window in the minimized set after its animation finished.
    pub fn minimize_committed(&self, id: AppId) {
        if let Err(err) = self.registry.minimize_committed(id) {
            leptos::logging::warn!("registry minimize failed: {err}");
            return;
        }
        self.refresh();
        self.publish(DesktopSignal::ApplicationChange);
    }

    /// Records that `id` started or stopped covering the viewport.
    pub fn set_maximized(&self, id: AppId, maximized: bool) {
        let current = self.maximized.get_untracked();
        let next = if maximized {
            Some(id)
        } else if current == Some(id) {
            None
        } else {
            current
        };
        if next != current {
            self.maximized.set(next);
            let mut chrome = self.chrome.get_untracked();
            chrome.set_any_maximized(next.is_some());
            self.chrome.set(chrome);
        }
    }

    /// Feeds one pointer sample through the chrome reveal hysteresis.
    pub fn sample_pointer(&self, pointer: PointerPosition, viewport: ViewportSize) {
        let current = self.chrome.get_untracked();
        let mut next = current;
        next.sample_pointer(pointer, viewport);
        if next != current {
            self.chrome.set(next);
        }
    }

    /// Ends the session from the status strip menu (sleep/restart).
    pub fn logout(&self) {
        if let Err(err) = self.store.save(keys::LOGGED_IN, "false") {
            leptos::logging::warn!("session flag write failed: {err}");
        }
        self.publish(DesktopSignal::SessionLogout);
    }

    /// Powers the desktop down into the shutdown screen.
    pub fn shutdown(&self) {
        if let Err(err) = self.store.save(keys::LOGGED_IN, "false") {
            leptos::logging::warn!("session flag write failed: {err}");
        }
        self.publish(DesktopSignal::ShutdownSequenceStart);
    }

    /// Subscribes to the page-level broadcast channel, forwarding foreign
    /// signals into the hub and re-reading the registry on change
    /// notifications. Our own broadcasts are filtered by the echo guard.
    pub fn install_dom_ingest(&self) -> SignalListenerGuard {
        let coordinator = self.clone();
        install_signal_listener(Rc::new(move |signal: DesktopSignal| {
            if coordinator.echo_guard.get() {
                return;
            }
            if signal == DesktopSignal::ApplicationChange {
                coordinator.refresh();
            }
            coordinator.hub.publish(&signal);
        }))
    }
}
