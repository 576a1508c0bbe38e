//! Browser adapters for the desktop host contracts.
//!
//! Implements the durable store against `window.localStorage` and the
//! broadcast notification channel against DOM custom events. Every entry
//! point compiles on non-WASM targets with an inert fallback so the runtime
//! crates keep their native test suites.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod battery;
pub mod bridge;
pub mod store;
pub mod viewport;

pub use battery::{watch_battery, BatteryReading, BatteryWatchGuard};
pub use bridge::{decode_dom_event, install_signal_listener, publish_signal, SignalListenerGuard};
pub use store::WebStore;
pub use viewport::viewport_size;
