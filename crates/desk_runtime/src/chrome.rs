//! Visibility coordination for the status strip and launcher.
//!
//! The launcher auto-hides: the pointer summons it by parking at the bottom
//! screen edge, and it stays out while the pointer works elsewhere. The
//! status strip is pinned while no window is maximized. While a window
//! covers the viewport both surfaces retract, become mutually exclusive,
//! and each answers only its own screen edge. Reveal and release use two
//! different bands so a strip does not flicker while the pointer works
//! inside it.

use crate::model::{PointerPosition, ViewportSize};

/// Distance from the screen edge, in pixels, that reveals a hidden strip.
pub const REVEAL_BAND_PX: f64 = 24.0;

/// Distance from the screen edge a revealed strip tolerates before it
/// retracts again. Wider than the reveal band on purpose.
pub const HOLD_BAND_PX: f64 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Chrome visibility state machine.
pub struct ChromeVisibility {
    any_maximized: bool,
    status_revealed: bool,
    launcher_revealed: bool,
}

impl ChromeVisibility {
    /// State at desktop start: nothing maximized, strip pinned, launcher
    /// parked off-screen until the pointer asks for it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the status strip should render.
    pub fn show_status_strip(&self) -> bool {
        !self.any_maximized || self.status_revealed
    }

    /// Whether the launcher should render.
    pub fn show_launcher(&self) -> bool {
        self.launcher_revealed
    }

    /// Records whether any window currently covers the viewport.
    ///
    /// Entering the maximized regime retracts both strips. Leaving it pins
    /// the status strip again and pulses the launcher visible once, so the
    /// chrome cannot stay stuck hidden; the next pointer sample away from
    /// the bottom edge parks the launcher normally.
    pub fn set_any_maximized(&mut self, maximized: bool) {
        if self.any_maximized != maximized {
            self.any_maximized = maximized;
            self.status_revealed = false;
            self.launcher_revealed = !maximized;
        }
    }

    /// Feeds one pointer sample through the edge-reveal hysteresis.
    ///
    /// In the maximized regime only one strip can be revealed at a time;
    /// the top edge wins when a degenerate viewport puts both bands under
    /// the pointer.
    pub fn sample_pointer(&mut self, pointer: PointerPosition, viewport: ViewportSize) {
        let top_distance = pointer.y;
        let bottom_distance = viewport.height - pointer.y;

        if self.any_maximized {
            if self.status_revealed {
                self.status_revealed = top_distance <= HOLD_BAND_PX;
            } else if top_distance <= REVEAL_BAND_PX {
                self.status_revealed = true;
                self.launcher_revealed = false;
                return;
            }
            if self.status_revealed {
                self.launcher_revealed = false;
                return;
            }
        }

        if self.launcher_revealed {
            self.launcher_revealed = bottom_distance <= HOLD_BAND_PX;
        } else if bottom_distance <= REVEAL_BAND_PX {
            self.launcher_revealed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: ViewportSize = ViewportSize {
        width: 1440.0,
        height: 900.0,
    };

    fn at(y: f64) -> PointerPosition {
        PointerPosition { x: 700.0, y }
    }

    #[test]
    fn status_strip_is_pinned_while_nothing_is_maximized() {
        let mut chrome = ChromeVisibility::new();
        assert!(chrome.show_status_strip());

        chrome.sample_pointer(at(450.0), VIEWPORT);
        assert!(chrome.show_status_strip());
    }

    #[test]
    fn launcher_hides_until_the_pointer_reaches_the_bottom_edge() {
        let mut chrome = ChromeVisibility::new();
        assert!(!chrome.show_launcher());

        chrome.sample_pointer(at(VIEWPORT.height - REVEAL_BAND_PX - 1.0), VIEWPORT);
        assert!(!chrome.show_launcher());

        chrome.sample_pointer(at(VIEWPORT.height - 5.0), VIEWPORT);
        assert!(chrome.show_launcher());

        // Working inside the dock stays within the hold band.
        chrome.sample_pointer(at(VIEWPORT.height - HOLD_BAND_PX), VIEWPORT);
        assert!(chrome.show_launcher());

        chrome.sample_pointer(at(VIEWPORT.height - HOLD_BAND_PX - 1.0), VIEWPORT);
        assert!(!chrome.show_launcher());
    }

    #[test]
    fn maximizing_retracts_both_strips() {
        let mut chrome = ChromeVisibility::new();
        chrome.sample_pointer(at(VIEWPORT.height - 5.0), VIEWPORT);
        assert!(chrome.show_launcher());

        chrome.set_any_maximized(true);
        assert!(!chrome.show_status_strip());
        assert!(!chrome.show_launcher());
    }

    #[test]
    fn top_edge_reveals_and_holds_the_status_strip_while_maximized() {
        let mut chrome = ChromeVisibility::new();
        chrome.set_any_maximized(true);

        chrome.sample_pointer(at(REVEAL_BAND_PX + 1.0), VIEWPORT);
        assert!(!chrome.show_status_strip());

        chrome.sample_pointer(at(10.0), VIEWPORT);
        assert!(chrome.show_status_strip());

        // Moving into the strip's menus stays inside the hold band.
        chrome.sample_pointer(at(HOLD_BAND_PX), VIEWPORT);
        assert!(chrome.show_status_strip());

        chrome.sample_pointer(at(HOLD_BAND_PX + 1.0), VIEWPORT);
        assert!(!chrome.show_status_strip());
    }

    #[test]
    fn only_one_strip_reveals_while_maximized() {
        let mut chrome = ChromeVisibility::new();
        chrome.set_any_maximized(true);

        chrome.sample_pointer(at(VIEWPORT.height - 5.0), VIEWPORT);
        assert!(chrome.show_launcher());
        assert!(!chrome.show_status_strip());

        chrome.sample_pointer(at(5.0), VIEWPORT);
        assert!(chrome.show_status_strip());
        assert!(!chrome.show_launcher());
    }

    #[test]
    fn leaving_the_maximized_regime_pulses_the_launcher_visible() {
        let mut chrome = ChromeVisibility::new();
        chrome.set_any_maximized(true);
        chrome.sample_pointer(at(450.0), VIEWPORT);
        assert!(!chrome.show_status_strip());
        assert!(!chrome.show_launcher());

        chrome.set_any_maximized(false);
        assert!(chrome.show_status_strip());
        assert!(chrome.show_launcher());

        // The pulse ends on the next sample away from the bottom edge.
        chrome.sample_pointer(at(450.0), VIEWPORT);
        assert!(chrome.show_status_strip());
        assert!(!chrome.show_launcher());
    }

    #[test]
    fn maximized_regime_resets_any_previous_reveal() {
        let mut chrome = ChromeVisibility::new();
        chrome.set_any_maximized(true);
        chrome.sample_pointer(at(5.0), VIEWPORT);
        assert!(chrome.show_status_strip());

        chrome.set_any_maximized(false);
        chrome.set_any_maximized(true);
        assert!(!chrome.show_status_strip());
    }
}
