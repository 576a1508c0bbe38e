//! Canonical durable-store entry names.
//!
//! These names are part of the persisted-data contract; existing stores
//! keep working across releases as long as they stay fixed.

/// Ordered open stack; index 0 is the frontmost window.
pub const OPEN_STACK: &str = "currentApplication";

/// Minimized set, insertion-order front-biased.
pub const MINIMIZED_SET: &str = "minimizedApplication";

/// Session flag consumed by the login/boot screens. Raw `"true"`/`"false"`.
pub const LOGGED_IN: &str = "loggedin";
