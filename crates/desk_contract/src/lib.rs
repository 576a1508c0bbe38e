//! Shared contract types for the desktop session layer.
//!
//! This crate is the leaf dependency of every other workspace member. It pins the
//! closed application roster and the typed signal envelope whose wire names must
//! stay interoperable with the surrounding login/boot/shutdown screens.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Identifier of one registered application kind.
///
/// The roster is closed at compile time: every surface that resolves an
/// identifier to window content does so through an exhaustive match, so an
/// unknown application can only appear inside persisted data, where it is
/// skipped on read.
pub enum AppId {
    /// File browser mock-up.
    Finder,
    /// Browser mock-up.
    Safari,
    /// Mail mock-up.
    Gmail,
    /// Profile viewer backed by GitHub data.
    GitHub,
    /// Profile viewer backed by LinkedIn data.
    LinkedIn,
}

impl AppId {
    /// Every registered application, in launcher order.
    pub const ALL: [AppId; 5] = [
        AppId::Finder,
        AppId::GitHub,
        AppId::LinkedIn,
        AppId::Gmail,
        AppId::Safari,
    ];

    /// Stable name used in persisted arrays and signal payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Finder => "Finder",
            Self::Safari => "Safari",
            Self::Gmail => "Gmail",
            Self::GitHub => "GitHub",
            Self::LinkedIn => "LinkedIn",
        }
    }

    /// Human-readable window/launcher title.
    pub fn title(self) -> &'static str {
        self.as_str()
    }

    /// Resolves a stored name back to an identifier.
    ///
    /// Returns `None` for names outside the roster; callers skip such entries
    /// rather than treating them as errors.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
/// Typed envelope for the process-wide notification channel.
///
/// Serialized form is `{"kind": "<wire name>", ...payload}`; the wire names and
/// payload shapes are part of the interop contract with the session screens and
/// must not change.
pub enum DesktopSignal {
    /// The shared registry was mutated; every surface must re-read it.
    ApplicationChange,
    /// Ask one window controller to play its closing animation, then commit.
    CloseWithAnimation {
        /// Target window.
        id: AppId,
    },
    /// Ask one window controller to play its minimizing animation, then commit.
    MinimizeWithAnimation {
        /// Target window.
        id: AppId,
    },
    /// A user completed login on the session screen.
    SessionLogin,
    /// The session ended (sleep/restart from the status strip menu).
    SessionLogout,
    /// The boot screen should start playing.
    BootSequenceStart,
    /// The shutdown screen should take over.
    ShutdownSequenceStart,
}

impl DesktopSignal {
    /// Every recognized wire kind, used to install broadcast listeners.
    pub const WIRE_KINDS: [&'static str; 7] = [
        "applicationChange",
        "closeWithAnimation",
        "minimizeWithAnimation",
        "sessionLogin",
        "sessionLogout",
        "bootSequenceStart",
        "shutdownSequenceStart",
    ];

    /// Stable broadcast event name for this signal.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::ApplicationChange => "applicationChange",
            Self::CloseWithAnimation { .. } => "closeWithAnimation",
            Self::MinimizeWithAnimation { .. } => "minimizeWithAnimation",
            Self::SessionLogin => "sessionLogin",
            Self::SessionLogout => "sessionLogout",
            Self::BootSequenceStart => "bootSequenceStart",
            Self::ShutdownSequenceStart => "shutdownSequenceStart",
        }
    }

    /// Reconstructs a payload-free signal from a bare event name.
    ///
    /// Collaborating screens may broadcast plain events without a payload;
    /// kinds that carry an `id` cannot be built this way and return `None`.
    pub fn from_bare_kind(kind: &str) -> Option<Self> {
        match kind {
            "applicationChange" => Some(Self::ApplicationChange),
            "sessionLogin" => Some(Self::SessionLogin),
            "sessionLogout" => Some(Self::SessionLogout),
            "bootSequenceStart" => Some(Self::BootSequenceStart),
            "shutdownSequenceStart" => Some(Self::ShutdownSequenceStart),
            _ => None,
        }
    }
}
