use super::*;
use leptos::leptos_dom::helpers::{TimeoutHandle, WindowListenerHandle};

use crate::focus::z_index_for;
use crate::model::{WindowPhase, WindowState, EXIT_ANIMATION_MS, OPEN_SETTLE_MS};
use crate::reducer::{reduce_window, WindowAction, WindowEffect};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

fn accepts_pointer(ev: &web_sys::PointerEvent) -> bool {
    if ev.pointer_type() == "mouse" && ev.button() != 0 {
        return false;
    }
    if ev.pointer_type() != "mouse" && !ev.is_primary() {
        return false;
    }
    true
}

#[component]
pub(super) fn DesktopWindow(app_id: AppId) -> impl IntoView {
    let session = use_session();
    let state = create_rw_signal(WindowState::new());
    let exit_timer = store_value(None::<TimeoutHandle>);
    let gesture_listeners = store_value(Vec::<WindowListenerHandle>::new());

    let release_gesture_listeners = move || {
        let handles = gesture_listeners
            .try_update_value(std::mem::take)
            .unwrap_or_default();
        for handle in handles {
            handle.remove();
        }
    };

    let apply = move |effects: Vec<WindowEffect>| {
        for effect in effects {
            match effect {
                WindowEffect::PromoteToFront => session.open(app_id),
                WindowEffect::SetMaximized(flag) => session.set_maximized(app_id, flag),
                WindowEffect::CommitClose => session.close_committed(app_id),
                WindowEffect::CommitMinimize => session.minimize_committed(app_id),
                WindowEffect::ScheduleExit => {
                    // The completion path is unrolled by hand so the timer
                    // closure does not need to capture this `apply` itself;
                    // finishing an exit can only commit.
                    let done = move || {
                        let mut commits = Vec::new();
                        state.update(|s| {
                            commits = reduce_window(s, WindowAction::ExitAnimationDone);
                        });
                        for commit in commits {
                            match commit {
                                WindowEffect::CommitClose => session.close_committed(app_id),
                                WindowEffect::CommitMinimize => {
                                    session.minimize_committed(app_id)
                                }
                                _ => {}
                            }
                        }
                    };
                    if let Ok(handle) =
                        set_timeout_with_handle(done, Duration::from_millis(EXIT_ANIMATION_MS))
                    {
                        exit_timer.set_value(Some(handle));
                    }
                }
            }
        }
    };

    let dispatch = move |action: WindowAction| {
        let mut effects = Vec::new();
        state.update(|s| effects = reduce_window(s, action));
        apply(effects);
    };

    let begin_gesture_tracking = move || {
        let move_handle = window_event_listener(ev::pointermove, move |ev| {
            let pointer = pointer_from_pointer_event(&ev);
            let active = state.get_untracked();
            if active.dragging.is_some() {
                dispatch(WindowAction::DragMove { pointer });
            } else if active.resizing.is_some() {
                dispatch(WindowAction::ResizeMove {
                    pointer,
                    viewport: current_viewport(),
                });
            }
        });
        let up_handle = window_event_listener(ev::pointerup, move |_| {
            dispatch(WindowAction::EndGesture);
            release_gesture_listeners();
        });
        let cancel_handle = window_event_listener(ev::pointercancel, move |_| {
            dispatch(WindowAction::EndGesture);
            release_gesture_listeners();
        });
        gesture_listeners.update_value(|listeners| {
            listeners.extend([move_handle, up_handle, cancel_handle]);
        });
    };

    if let Ok(handle) = set_timeout_with_handle(
        move || dispatch(WindowAction::Settle),
        Duration::from_millis(OPEN_SETTLE_MS),
    ) {
        on_cleanup(move || handle.clear());
    }

    // Animation requests for this window arrive over the signal channel, no
    // matter which surface asked.
    let subscription = session.subscribe(Rc::new(move |signal: &DesktopSignal| match *signal {
        DesktopSignal::CloseWithAnimation { id } if id == app_id => {
            dispatch(WindowAction::RequestClose);
        }
        DesktopSignal::MinimizeWithAnimation { id } if id == app_id => {
            dispatch(WindowAction::RequestMinimize);
        }
        _ => {}
    }));
    let subscription = store_value(Some(subscription));

    on_cleanup(move || {
        subscription.set_value(None);
        release_gesture_listeners();
        if let Some(handle) = exit_timer.try_update_value(Option::take).flatten() {
            handle.clear();
        }
    });

    let begin_move = move |ev: web_sys::PointerEvent| {
        if !accepts_pointer(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        if ev.button() != 0 {
            return;
        }
        ev.prevent_default();
        ev.stop_propagation();
        dispatch(WindowAction::PointerDown);
        dispatch(WindowAction::BeginDrag {
            pointer: pointer_from_pointer_event(&ev),
        });
        if state.get_untracked().dragging.is_some() {
            begin_gesture_tracking();
        }
    };

    let titlebar_double_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        dispatch(WindowAction::ToggleMaximize);
    };

    let resize_handle = move |edge: ResizeEdge| {
        let on_pointerdown = move |ev: web_sys::PointerEvent| {
            if !accepts_pointer(&ev) {
                return;
            }
            try_set_pointer_capture(&ev);
            ev.prevent_default();
            ev.stop_propagation();
            dispatch(WindowAction::PointerDown);
            dispatch(WindowAction::BeginResize {
                edge,
                pointer: pointer_from_pointer_event(&ev),
            });
            if state.get_untracked().resizing.is_some() {
                begin_gesture_tracking();
            }
        };
        view! {
            <div
                class=format!("window-resize-handle {}", resize_edge_class(edge))
                aria-hidden="true"
                on:pointerdown=on_pointerdown
            />
        }
    };

    let window_style = move || {
        let win = state.get();
        let rank = session.snapshot.get().rank_of(app_id).unwrap_or(0);
        format!(
            "left:50%;top:50%;width:{width}dvw;height:{height}dvh;z-index:{z};\
             transform:translate(calc(-50% + {dx}px), calc(-50% + {dy}px));",
            width = win.size.width_pct,
            height = win.size.height_pct,
            z = z_index_for(rank, win.maximized),
            dx = win.offset.dx,
            dy = win.offset.dy,
        )
    };

    let window_class = move || {
        let win = state.get();
        let phase = match win.phase {
            WindowPhase::Opening => " opening",
            WindowPhase::Open => "",
            WindowPhase::Closing => " closing",
            WindowPhase::Minimizing => " minimizing",
        };
        let maximized = if win.maximized { " maximized" } else { "" };
        format!("desktop-window{phase}{maximized}")
    };

    view! {
        <section
            class=window_class
            style=window_style
            role="dialog"
            aria-label=app_id.title()
            on:pointerdown=move |_| dispatch(WindowAction::PointerDown)
        >
            <header
                class="titlebar"
                on:pointerdown=begin_move
                on:dblclick=titlebar_double_click
            >
                <div class="titlebar-controls">
                    <button
                        class="traffic-control close"
                        aria-label="Close window"
                        on:pointerdown=move |ev: web_sys::PointerEvent| {
                            ev.prevent_default();
                            ev.stop_propagation();
                        }
                        on:mousedown=move |ev| stop_mouse_event(&ev)
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            session.request_close(app_id);
                        }
                    />
                    <button
                        class="traffic-control minimize"
                        aria-label="Minimize window"
                        on:pointerdown=move |ev: web_sys::PointerEvent| {
                            ev.prevent_default();
                            ev.stop_propagation();
                        }
                        on:mousedown=move |ev| stop_mouse_event(&ev)
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            session.request_minimize(app_id);
                        }
                    />
                    <button
                        class="traffic-control maximize"
                        aria-label=move || {
                            if state.get().maximized {
                                "Restore window"
                            } else {
                                "Maximize window"
                            }
                        }
                        on:pointerdown=move |ev: web_sys::PointerEvent| {
                            ev.prevent_default();
                            ev.stop_propagation();
                        }
                        on:mousedown=move |ev| stop_mouse_event(&ev)
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            dispatch(WindowAction::ToggleMaximize);
                        }
                    />
                </div>
                <span class="titlebar-title">{app_id.title()}</span>
            </header>
            <div class="window-body">{apps::app_content(app_id)}</div>
            <Show
                when=move || {
                    let win = state.get();
                    win.is_interactive() && !win.maximized
                }
                fallback=|| ()
            >
                {resize_handle(ResizeEdge::Top)}
                {resize_handle(ResizeEdge::Bottom)}
                {resize_handle(ResizeEdge::Left)}
                {resize_handle(ResizeEdge::Right)}
                {resize_handle(ResizeEdge::TopLeft)}
                {resize_handle(ResizeEdge::TopRight)}
                {resize_handle(ResizeEdge::BottomLeft)}
                {resize_handle(ResizeEdge::BottomRight)}
            </Show>
        </section>
    }
}
