//! Broadcast notification channel over DOM custom events.
//!
//! Signals travel as `CustomEvent`s dispatched on `window`, one event name per
//! signal kind. The detail carries the JSON-encoded envelope; events without a
//! detail (the session screens broadcast bare events) decode through the
//! payload-free fallback.

use desk_contract::DesktopSignal;

#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

/// Publishes one signal to every listener in the page, including other
/// surfaces that subscribed directly to the DOM event name.
///
/// Dispatch is synchronous: every installed listener runs before this
/// function returns.
pub fn publish_signal(signal: &DesktopSignal) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        let init = web_sys::CustomEventInit::new();
        if let Ok(encoded) = serde_json::to_string(signal) {
            init.set_detail(&JsValue::from_str(&encoded));
        }
        if let Ok(event) =
            web_sys::CustomEvent::new_with_event_init_dict(signal.wire_name(), &init)
        {
            let _ = window.dispatch_event(&event);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = signal;
    }
}

/// Decodes a received DOM event back into a signal.
///
/// Prefers the JSON envelope in the detail; falls back to reconstructing a
/// payload-free signal from the event name alone.
pub fn decode_dom_event(event: &web_sys::Event) -> Option<DesktopSignal> {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(custom) = event.dyn_ref::<web_sys::CustomEvent>() {
            if let Some(encoded) = custom.detail().as_string() {
                if let Ok(signal) = serde_json::from_str(&encoded) {
                    return Some(signal);
                }
            }
        }
        DesktopSignal::from_bare_kind(&event.type_())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        DesktopSignal::from_bare_kind(&event.type_())
    }
}

/// Keeps DOM listeners installed; dropping the guard removes them.
pub struct SignalListenerGuard {
    #[cfg(target_arch = "wasm32")]
    listeners: Vec<(&'static str, Closure<dyn Fn(web_sys::Event)>)>,
}

/// Subscribes `on_signal` to every recognized signal kind.
///
/// The returned guard owns the underlying closures; keep it alive for as long
/// as delivery should continue.
pub fn install_signal_listener(
    on_signal: std::rc::Rc<dyn Fn(DesktopSignal)>,
) -> SignalListenerGuard {
    #[cfg(target_arch = "wasm32")]
    {
        let mut listeners = Vec::with_capacity(DesktopSignal::WIRE_KINDS.len());
        if let Some(window) = web_sys::window() {
            for kind in DesktopSignal::WIRE_KINDS {
                let on_signal = Rc::clone(&on_signal);
                let closure = Closure::<dyn Fn(web_sys::Event)>::new(move |event| {
                    if let Some(signal) = decode_dom_event(&event) {
                        on_signal(signal);
                    }
                });
                if window
                    .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
                    .is_ok()
                {
                    listeners.push((kind, closure));
                }
            }
        }
        SignalListenerGuard { listeners }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = on_signal;
        SignalListenerGuard {}
    }
}

impl Drop for SignalListenerGuard {
    fn drop(&mut self) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                for (kind, closure) in self.listeners.drain(..) {
                    let _ = window
                        .remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
                }
            }
        }
    }
}
