//! Core state types for the desktop session layer.

use desk_contract::AppId;

/// Fraction of the viewport a freshly opened window covers, per axis.
pub const DEFAULT_SIZE_PCT: f64 = 80.0;

/// Smallest size a resize gesture can reach, per axis.
pub const MIN_SIZE_PCT: f64 = 55.0;

/// Size of a maximized window, per axis.
pub const MAXIMIZED_SIZE_PCT: f64 = 100.0;

/// Delay between mount and the settle into the steady open state, in
/// milliseconds. Gives the entrance transition one frame to start from the
/// pre-open style.
pub const OPEN_SETTLE_MS: u64 = 30;

/// Duration of the closing/minimizing animation, in milliseconds. The commit
/// that removes the window from the shared registry fires when this elapses.
pub const EXIT_ANIMATION_MS: u64 = 220;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
/// Pointer location in viewport CSS pixels.
pub struct PointerPosition {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Viewport dimensions in CSS pixels.
pub struct ViewportSize {
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
/// Offset of a window's center from the viewport center, in pixels.
pub struct WindowOffset {
    /// Horizontal displacement.
    pub dx: f64,
    /// Vertical displacement.
    pub dy: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Window size as a percentage of the viewport, per axis.
pub struct WindowSize {
    /// Width in viewport-width percent.
    pub width_pct: f64,
    /// Height in viewport-height percent.
    pub height_pct: f64,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width_pct: DEFAULT_SIZE_PCT,
            height_pct: DEFAULT_SIZE_PCT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
/// A window's full placement: center offset plus size.
pub struct WindowGeometry {
    /// Center offset from the viewport center.
    pub offset: WindowOffset,
    /// Size in viewport percent.
    pub size: WindowSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Edge or corner a resize gesture grips.
pub enum ResizeEdge {
    /// Top edge.
    Top,
    /// Bottom edge.
    Bottom,
    /// Left edge.
    Left,
    /// Right edge.
    Right,
    /// Top-left corner.
    TopLeft,
    /// Top-right corner.
    TopRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom-right corner.
    BottomRight,
}

impl ResizeEdge {
    /// Sign applied to horizontal pointer deltas: +1 grows the window when
    /// the pointer moves right, -1 when it moves left, 0 for edges that do
    /// not affect width.
    pub fn horizontal_sign(self) -> f64 {
        match self {
            Self::Right | Self::TopRight | Self::BottomRight => 1.0,
            Self::Left | Self::TopLeft | Self::BottomLeft => -1.0,
            Self::Top | Self::Bottom => 0.0,
        }
    }

    /// Sign applied to vertical pointer deltas; see [`Self::horizontal_sign`].
    pub fn vertical_sign(self) -> f64 {
        match self {
            Self::Bottom | Self::BottomLeft | Self::BottomRight => 1.0,
            Self::Top | Self::TopLeft | Self::TopRight => -1.0,
            Self::Left | Self::Right => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Lifecycle phase of one window controller.
///
/// The exit phases exist so the closing/minimizing animation can play before
/// the registry commit; once entered they absorb all further input.
pub enum WindowPhase {
    /// Mounted but not yet settled; the entrance transition is playing.
    #[default]
    Opening,
    /// Steady interactive state.
    Open,
    /// Closing animation is playing; commit pending.
    Closing,
    /// Minimizing animation is playing; commit pending.
    Minimizing,
}

impl WindowPhase {
    /// Whether this phase still accepts user input.
    pub fn accepts_input(self) -> bool {
        matches!(self, Self::Opening | Self::Open)
    }

    /// Whether this phase is one of the exit animations.
    pub fn is_exiting(self) -> bool {
        matches!(self, Self::Closing | Self::Minimizing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// An in-flight drag gesture.
///
/// Movement is relative: each frame applies the delta from `pointer_start` to
/// `offset_start`, so the grab point stays under the pointer no matter where
/// on the titlebar the drag began.
pub struct DragSession {
    /// Pointer position when the gesture began.
    pub pointer_start: PointerPosition,
    /// Window offset when the gesture began.
    pub offset_start: WindowOffset,
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// An in-flight resize gesture.
pub struct ResizeSession {
    /// Edge or corner being dragged.
    pub edge: ResizeEdge,
    /// Pointer position when the gesture began.
    pub pointer_start: PointerPosition,
    /// Geometry when the gesture began; each frame recomputes from here.
    pub geometry_start: WindowGeometry,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
/// Full local state of one window controller.
pub struct WindowState {
    /// Lifecycle phase.
    pub phase: WindowPhase,
    /// Whether the window currently fills the viewport.
    pub maximized: bool,
    /// Center offset from the viewport center.
    pub offset: WindowOffset,
    /// Size in viewport percent.
    pub size: WindowSize,
    /// Geometry saved when maximizing, restored on un-maximize.
    pub restore_geometry: Option<WindowGeometry>,
    /// Active drag gesture, if any.
    pub dragging: Option<DragSession>,
    /// Active resize gesture, if any.
    pub resizing: Option<ResizeSession>,
}

impl WindowState {
    /// State of a freshly mounted window: centered, default size, opening.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the window reacts to pointer input at all.
    pub fn is_interactive(&self) -> bool {
        self.phase.accepts_input()
    }

    /// Whether a drag or resize gesture is in flight.
    pub fn gesture_active(&self) -> bool {
        self.dragging.is_some() || self.resizing.is_some()
    }

    /// Current placement as one value.
    pub fn geometry(&self) -> WindowGeometry {
        WindowGeometry {
            offset: self.offset,
            size: self.size,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Decoded view of the shared registry.
///
/// `open_stack` is ordered front to back; `minimized` preserves minimize
/// order with the most recent first. The two lists are disjoint.
pub struct RegistrySnapshot {
    /// Open windows, index 0 frontmost.
    pub open_stack: Vec<AppId>,
    /// Minimized windows, most recently minimized first.
    pub minimized: Vec<AppId>,
}

impl RegistrySnapshot {
    /// The frontmost open window, if any.
    pub fn frontmost(&self) -> Option<AppId> {
        self.open_stack.first().copied()
    }

    /// Stack depth of an open window; 0 is frontmost.
    pub fn rank_of(&self, id: AppId) -> Option<usize> {
        self.open_stack.iter().position(|entry| *entry == id)
    }

    /// Whether `id` is in the open stack.
    pub fn is_open(&self, id: AppId) -> bool {
        self.open_stack.contains(&id)
    }

    /// Whether `id` is minimized.
    pub fn is_minimized(&self, id: AppId) -> bool {
        self.minimized.contains(&id)
    }
}
