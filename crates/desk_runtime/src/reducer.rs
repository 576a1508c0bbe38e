//! Pure state machine for one window controller.
//!
//! All window behavior funnels through [`reduce_window`]: the view layer
//! translates DOM events into [`WindowAction`]s, applies the reduction to its
//! local [`WindowState`], and performs the returned [`WindowEffect`]s (timers,
//! registry commits, focus promotion). Keeping the transition pure lets the
//! whole gesture and lifecycle logic run under native tests.

use crate::model::{
    DragSession, PointerPosition, ResizeEdge, ResizeSession, ViewportSize, WindowGeometry,
    WindowOffset, WindowPhase, WindowState, MAXIMIZED_SIZE_PCT, MIN_SIZE_PCT,
};

#[derive(Debug, Clone, Copy, PartialEq)]
/// Input to one window's state machine.
pub enum WindowAction {
    /// The entrance transition had its starting frame; settle into the
    /// steady open state.
    Settle,
    /// Pointer pressed anywhere on the window chrome or content.
    PointerDown,
    /// Titlebar grabbed; start a drag gesture.
    BeginDrag {
        /// Pointer position at the grab.
        pointer: PointerPosition,
    },
    /// Pointer moved during a drag.
    DragMove {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// Resize handle grabbed; start a resize gesture.
    BeginResize {
        /// Handle that was grabbed.
        edge: ResizeEdge,
        /// Pointer position at the grab.
        pointer: PointerPosition,
    },
    /// Pointer moved during a resize.
    ResizeMove {
        /// Current pointer position.
        pointer: PointerPosition,
        /// Viewport size, needed to convert pixel deltas to percent.
        viewport: ViewportSize,
    },
    /// Pointer released or capture lost; end any gesture.
    EndGesture,
    /// Maximize button pressed.
    ToggleMaximize,
    /// Close requested; play the closing animation.
    RequestClose,
    /// Minimize requested; play the minimizing animation.
    RequestMinimize,
    /// The exit animation timer elapsed.
    ExitAnimationDone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Side effect the view layer must perform after a reduction.
pub enum WindowEffect {
    /// Start the exit timer; dispatch [`WindowAction::ExitAnimationDone`]
    /// when it elapses.
    ScheduleExit,
    /// Remove this window from the shared registry.
    CommitClose,
    /// Move this window to the minimized set in the shared registry.
    CommitMinimize,
    /// Tell the session coordinator whether this window covers the viewport.
    SetMaximized(bool),
    /// Bring this window to the front of the shared open stack.
    PromoteToFront,
}

/// Applies one action to a window's state, returning the effects to perform.
pub fn reduce_window(state: &mut WindowState, action: WindowAction) -> Vec<WindowEffect> {
    if state.phase.is_exiting() {
        // Exit animations absorb everything except their own completion.
        return match action {
            WindowAction::ExitAnimationDone => finish_exit(state),
            _ => Vec::new(),
        };
    }

    match action {
        WindowAction::Settle => {
            if state.phase == WindowPhase::Opening {
                state.phase = WindowPhase::Open;
            }
            Vec::new()
        }
        WindowAction::PointerDown => {
            if state.gesture_active() {
                Vec::new()
            } else {
                vec![WindowEffect::PromoteToFront]
            }
        }
        WindowAction::BeginDrag { pointer } => {
            if !state.maximized && !state.gesture_active() {
                state.dragging = Some(DragSession {
                    pointer_start: pointer,
                    offset_start: state.offset,
                });
            }
            Vec::new()
        }
        WindowAction::DragMove { pointer } => {
            if let Some(drag) = state.dragging {
                state.offset = WindowOffset {
                    dx: drag.offset_start.dx + (pointer.x - drag.pointer_start.x),
                    dy: drag.offset_start.dy + (pointer.y - drag.pointer_start.y),
                };
            }
            Vec::new()
        }
        WindowAction::BeginResize { edge, pointer } => {
            if !state.maximized && !state.gesture_active() {
                state.resizing = Some(ResizeSession {
                    edge,
                    pointer_start: pointer,
                    geometry_start: state.geometry(),
                });
            }
            Vec::new()
        }
        WindowAction::ResizeMove { pointer, viewport } => {
            if let Some(resize) = state.resizing {
                apply_resize(state, resize, pointer, viewport);
            }
            Vec::new()
        }
        WindowAction::EndGesture => {
            state.dragging = None;
            state.resizing = None;
            Vec::new()
        }
        WindowAction::ToggleMaximize => {
            state.dragging = None;
            state.resizing = None;
            if state.maximized {
                let restored = state.restore_geometry.take().unwrap_or_default();
                state.offset = restored.offset;
                state.size = restored.size;
                state.maximized = false;
                vec![WindowEffect::SetMaximized(false)]
            } else {
                state.restore_geometry = Some(state.geometry());
                state.offset = WindowOffset::default();
                state.size.width_pct = MAXIMIZED_SIZE_PCT;
                state.size.height_pct = MAXIMIZED_SIZE_PCT;
                state.maximized = true;
                vec![WindowEffect::SetMaximized(true)]
            }
        }
        WindowAction::RequestClose => enter_exit_phase(state, WindowPhase::Closing),
        WindowAction::RequestMinimize => enter_exit_phase(state, WindowPhase::Minimizing),
        WindowAction::ExitAnimationDone => Vec::new(),
    }
}

fn enter_exit_phase(state: &mut WindowState, phase: WindowPhase) -> Vec<WindowEffect> {
    state.dragging = None;
    state.resizing = None;
    state.phase = phase;
    let mut effects = Vec::new();
    if state.maximized {
        // Chrome must come back before the window disappears.
        state.maximized = false;
        effects.push(WindowEffect::SetMaximized(false));
    }
    effects.push(WindowEffect::ScheduleExit);
    effects
}

fn finish_exit(state: &mut WindowState) -> Vec<WindowEffect> {
    match state.phase {
        WindowPhase::Closing => vec![WindowEffect::CommitClose],
        WindowPhase::Minimizing => vec![WindowEffect::CommitMinimize],
        _ => Vec::new(),
    }
}

fn apply_resize(
    state: &mut WindowState,
    resize: ResizeSession,
    pointer: PointerPosition,
    viewport: ViewportSize,
) {
    let start = resize.geometry_start;
    let (width_pct, center_x) = resize_axis(
        start.size.width_pct,
        start.offset.dx,
        pointer.x - resize.pointer_start.x,
        resize.edge.horizontal_sign(),
        viewport.width,
    );
    let (height_pct, center_y) = resize_axis(
        start.size.height_pct,
        start.offset.dy,
        pointer.y - resize.pointer_start.y,
        resize.edge.vertical_sign(),
        viewport.height,
    );
    state.size.width_pct = width_pct;
    state.size.height_pct = height_pct;
    state.offset = WindowOffset {
        dx: center_x,
        dy: center_y,
    };
}

/// Resizes one axis from the gesture's starting geometry.
///
/// The center shifts by half the growth that actually happened after
/// clamping, which keeps the opposite edge pinned in place even when the
/// pointer overshoots the minimum size.
fn resize_axis(
    start_pct: f64,
    start_center: f64,
    delta_px: f64,
    sign: f64,
    viewport_px: f64,
) -> (f64, f64) {
    if sign == 0.0 || viewport_px <= 0.0 {
        return (start_pct, start_center);
    }
    let desired_pct = start_pct + sign * delta_px / viewport_px * 100.0;
    let clamped_pct = desired_pct.clamp(MIN_SIZE_PCT, MAXIMIZED_SIZE_PCT);
    let effective_px = (clamped_pct - start_pct) / 100.0 * viewport_px;
    (clamped_pct, start_center + sign * effective_px / 2.0)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{WindowSize, DEFAULT_SIZE_PCT};

    const VIEWPORT: ViewportSize = ViewportSize {
        width: 1000.0,
        height: 800.0,
    };

    fn open_window() -> WindowState {
        let mut state = WindowState::new();
        assert_eq!(reduce_window(&mut state, WindowAction::Settle), vec![]);
        assert_eq!(state.phase, WindowPhase::Open);
        state
    }

    fn at(x: f64, y: f64) -> PointerPosition {
        PointerPosition { x, y }
    }

    #[test]
    fn settle_only_advances_the_opening_phase() {
        let mut state = open_window();
        reduce_window(&mut state, WindowAction::Settle);
        assert_eq!(state.phase, WindowPhase::Open);
    }

    #[test]
    fn pointer_down_promotes_unless_a_gesture_is_active() {
        let mut state = open_window();
        assert_eq!(
            reduce_window(&mut state, WindowAction::PointerDown),
            vec![WindowEffect::PromoteToFront]
        );

        reduce_window(&mut state, WindowAction::BeginDrag { pointer: at(10.0, 10.0) });
        assert_eq!(reduce_window(&mut state, WindowAction::PointerDown), vec![]);
    }

    #[test]
    fn drag_applies_relative_deltas_from_the_grab_point() {
        let mut state = open_window();
        state.offset = WindowOffset { dx: 5.0, dy: -5.0 };

        reduce_window(&mut state, WindowAction::BeginDrag { pointer: at(100.0, 200.0) });
        reduce_window(&mut state, WindowAction::DragMove { pointer: at(130.0, 180.0) });
        assert_eq!(state.offset, WindowOffset { dx: 35.0, dy: -25.0 });

        // Each frame is computed from the gesture start, not the last frame.
        reduce_window(&mut state, WindowAction::DragMove { pointer: at(100.0, 200.0) });
        assert_eq!(state.offset, WindowOffset { dx: 5.0, dy: -5.0 });

        reduce_window(&mut state, WindowAction::EndGesture);
        assert_eq!(state.dragging, None);
    }

    #[test]
    fn drag_is_refused_while_maximized() {
        let mut state = open_window();
        reduce_window(&mut state, WindowAction::ToggleMaximize);
        reduce_window(&mut state, WindowAction::BeginDrag { pointer: at(0.0, 0.0) });
        assert_eq!(state.dragging, None);
    }

    #[test]
    fn resize_from_the_right_edge_pins_the_left_edge() {
        let mut state = open_window();
        reduce_window(
            &mut state,
            WindowAction::BeginResize {
                edge: ResizeEdge::Right,
                pointer: at(900.0, 400.0),
            },
        );
        reduce_window(
            &mut state,
            WindowAction::ResizeMove {
                pointer: at(1000.0, 400.0),
                viewport: VIEWPORT,
            },
        );

        // +100px on a 1000px viewport is +10pct; center shifts right by 50px.
        assert_eq!(state.size.width_pct, 90.0);
        assert_eq!(state.offset.dx, 50.0);
        // Left edge: center - width/2 = 50 - 450 = -400px, same as before.
        let left = state.offset.dx - state.size.width_pct / 100.0 * VIEWPORT.width / 2.0;
        assert_eq!(left, -400.0);
        assert_eq!(state.size.height_pct, DEFAULT_SIZE_PCT);
    }

    #[test]
    fn resize_from_the_left_edge_grows_leftward() {
        let mut state = open_window();
        reduce_window(
            &mut state,
            WindowAction::BeginResize {
                edge: ResizeEdge::Left,
                pointer: at(100.0, 400.0),
            },
        );
        reduce_window(
            &mut state,
            WindowAction::ResizeMove {
                pointer: at(50.0, 400.0),
                viewport: VIEWPORT,
            },
        );

        assert_eq!(state.size.width_pct, 85.0);
        assert_eq!(state.offset.dx, -25.0);
    }

    #[test]
    fn corner_resize_moves_both_axes() {
        let mut state = open_window();
        reduce_window(
            &mut state,
            WindowAction::BeginResize {
                edge: ResizeEdge::BottomRight,
                pointer: at(0.0, 0.0),
            },
        );
        reduce_window(
            &mut state,
            WindowAction::ResizeMove {
                pointer: at(100.0, 80.0),
                viewport: VIEWPORT,
            },
        );

        assert_eq!(state.size.width_pct, 90.0);
        assert_eq!(state.size.height_pct, 90.0);
        assert_eq!(state.offset, WindowOffset { dx: 50.0, dy: 40.0 });
    }

    #[test]
    fn resize_clamps_at_the_minimum_size() {
        let mut state = open_window();
        reduce_window(
            &mut state,
            WindowAction::BeginResize {
                edge: ResizeEdge::Right,
                pointer: at(900.0, 0.0),
            },
        );
        reduce_window(
            &mut state,
            WindowAction::ResizeMove {
                pointer: at(-5000.0, 0.0),
                viewport: VIEWPORT,
            },
        );

        assert_eq!(state.size.width_pct, MIN_SIZE_PCT);
        // The center only moved by the clamped shrink, keeping the left
        // edge pinned: (55 - 80)/100 * 1000 / 2 = -125.
        assert_eq!(state.offset.dx, -125.0);

        // Dragging back out within the same gesture recovers smoothly.
        reduce_window(
            &mut state,
            WindowAction::ResizeMove {
                pointer: at(950.0, 0.0),
                viewport: VIEWPORT,
            },
        );
        assert_eq!(state.size.width_pct, 85.0);
        assert_eq!(state.offset.dx, 25.0);
    }

    #[test]
    fn resize_clamps_at_the_viewport_size() {
        let mut state = open_window();
        reduce_window(
            &mut state,
            WindowAction::BeginResize {
                edge: ResizeEdge::Bottom,
                pointer: at(0.0, 700.0),
            },
        );
        reduce_window(
            &mut state,
            WindowAction::ResizeMove {
                pointer: at(0.0, 5000.0),
                viewport: VIEWPORT,
            },
        );

        assert_eq!(state.size.height_pct, MAXIMIZED_SIZE_PCT);
        assert_eq!(state.size.width_pct, DEFAULT_SIZE_PCT);
    }

    #[test]
    fn maximize_saves_geometry_and_restore_brings_it_back() {
        let mut state = open_window();
        state.offset = WindowOffset { dx: 40.0, dy: -30.0 };
        state.size = WindowSize {
            width_pct: 70.0,
            height_pct: 60.0,
        };

        assert_eq!(
            reduce_window(&mut state, WindowAction::ToggleMaximize),
            vec![WindowEffect::SetMaximized(true)]
        );
        assert!(state.maximized);
        assert_eq!(state.offset, WindowOffset::default());
        assert_eq!(state.size.width_pct, MAXIMIZED_SIZE_PCT);

        assert_eq!(
            reduce_window(&mut state, WindowAction::ToggleMaximize),
            vec![WindowEffect::SetMaximized(false)]
        );
        assert!(!state.maximized);
        assert_eq!(state.offset, WindowOffset { dx: 40.0, dy: -30.0 });
        assert_eq!(state.size.width_pct, 70.0);
        assert_eq!(state.size.height_pct, 60.0);
        assert_eq!(state.restore_geometry, None);
    }

    #[test]
    fn maximize_cancels_an_active_gesture() {
        let mut state = open_window();
        reduce_window(&mut state, WindowAction::BeginDrag { pointer: at(0.0, 0.0) });
        reduce_window(&mut state, WindowAction::ToggleMaximize);
        assert_eq!(state.dragging, None);
    }

    #[test]
    fn close_request_schedules_the_exit_and_is_idempotent() {
        let mut state = open_window();
        assert_eq!(
            reduce_window(&mut state, WindowAction::RequestClose),
            vec![WindowEffect::ScheduleExit]
        );
        assert_eq!(state.phase, WindowPhase::Closing);

        // Re-requesting while the animation plays must not re-arm the timer.
        assert_eq!(reduce_window(&mut state, WindowAction::RequestClose), vec![]);
        assert_eq!(reduce_window(&mut state, WindowAction::RequestMinimize), vec![]);
    }

    #[test]
    fn closing_a_maximized_window_releases_the_chrome_first() {
        let mut state = open_window();
        reduce_window(&mut state, WindowAction::ToggleMaximize);
        assert_eq!(
            reduce_window(&mut state, WindowAction::RequestClose),
            vec![WindowEffect::SetMaximized(false), WindowEffect::ScheduleExit]
        );
        assert!(!state.maximized);
    }

    #[test]
    fn exit_phases_ignore_pointer_input() {
        let mut state = open_window();
        reduce_window(&mut state, WindowAction::RequestMinimize);

        assert_eq!(reduce_window(&mut state, WindowAction::PointerDown), vec![]);
        reduce_window(&mut state, WindowAction::BeginDrag { pointer: at(0.0, 0.0) });
        assert_eq!(state.dragging, None);
        assert_eq!(reduce_window(&mut state, WindowAction::ToggleMaximize), vec![]);
    }

    #[test]
    fn exit_timer_commits_the_matching_operation() {
        let mut state = open_window();
        reduce_window(&mut state, WindowAction::RequestClose);
        assert_eq!(
            reduce_window(&mut state, WindowAction::ExitAnimationDone),
            vec![WindowEffect::CommitClose]
        );

        let mut state = open_window();
        reduce_window(&mut state, WindowAction::RequestMinimize);
        assert_eq!(
            reduce_window(&mut state, WindowAction::ExitAnimationDone),
            vec![WindowEffect::CommitMinimize]
        );
    }

    #[test]
    fn late_exit_timer_in_a_steady_phase_is_absorbed() {
        let mut state = open_window();
        assert_eq!(
            reduce_window(&mut state, WindowAction::ExitAnimationDone),
            vec![]
        );
        assert_eq!(state.phase, WindowPhase::Open);
    }

    #[test]
    fn full_lifecycle_from_mount_to_close() {
        let mut state = WindowState::new();
        assert_eq!(state.phase, WindowPhase::Opening);
        assert_eq!(
            reduce_window(&mut state, WindowAction::PointerDown),
            vec![WindowEffect::PromoteToFront]
        );

        reduce_window(&mut state, WindowAction::Settle);
        reduce_window(&mut state, WindowAction::BeginDrag { pointer: at(0.0, 0.0) });
        reduce_window(&mut state, WindowAction::DragMove { pointer: at(12.0, 7.0) });
        reduce_window(&mut state, WindowAction::EndGesture);
        assert_eq!(state.offset, WindowOffset { dx: 12.0, dy: 7.0 });

        reduce_window(&mut state, WindowAction::RequestClose);
        assert_eq!(
            reduce_window(&mut state, WindowAction::ExitAnimationDone),
            vec![WindowEffect::CommitClose]
        );
    }
}
