//! Host-side storage contracts shared by the runtime and browser adapters.
//!
//! This crate is the API-first boundary for the durable key/value store that
//! backs the shared registry. Concrete browser adapters live in
//! `desk_host_web`; the in-memory implementations here back tests and
//! non-WASM targets.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod keys;
pub mod store;

pub use store::{load_typed_with, save_typed_with, KeyValueStore, MemoryStore, NoopStore};
