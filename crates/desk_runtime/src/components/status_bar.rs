use desk_host_web::{watch_battery, BatteryReading, BatteryWatchGuard};

use super::*;
use crate::clock::ClockSnapshot;
use crate::focus::CHROME_LAYER_Z;

#[component]
pub(super) fn StatusBar() -> impl IntoView {
    let session = use_session();
    let snapshot = session.snapshot;
    let visible = move || session.chrome.get().show_status_strip();
    let clock_now = create_rw_signal(ClockSnapshot::now());
    let menu_open = create_rw_signal(false);

    // Stays hidden until the Battery Status API delivers a first reading.
    let battery = create_rw_signal(None::<BatteryReading>);
    let battery_watch = store_value(None::<BatteryWatchGuard>);
    battery_watch.set_value(Some(watch_battery(Rc::new(move |reading| {
        battery.set(Some(reading));
    }))));
    on_cleanup(move || battery_watch.set_value(None));

    if let Ok(interval) = set_interval_with_handle(
        move || clock_now.set(ClockSnapshot::now()),
        Duration::from_secs(1),
    ) {
        on_cleanup(move || interval.clear());
    }

    let outside_click_listener = window_event_listener(ev::mousedown, move |_| {
        if menu_open.get_untracked() {
            menu_open.set(false);
        }
    });
    on_cleanup(move || outside_click_listener.remove());

    let active_title = move || {
        snapshot
            .get()
            .frontmost()
            .map(|id| id.title())
            .unwrap_or("Finder")
    };

    view! {
        <Show when=visible fallback=|| ()>
            <header class="status-strip" style=format!("z-index:{CHROME_LAYER_Z};")>
                <div class="status-strip-left">
                    <button
                        class="status-strip-menu-trigger"
                        aria-label="System menu"
                        aria-haspopup="menu"
                        aria-expanded=move || menu_open.get().to_string()
                        on:mousedown=move |ev| {
                            stop_mouse_event(&ev);
                            menu_open.update(|open| *open = !*open);
                        }
                    >
                        ""
                    </button>
                    <span class="status-strip-active-app">{active_title}</span>
                    <Show when=move || menu_open.get() fallback=|| ()>
                        <ul class="status-strip-menu" role="menu">
                            <li role="menuitem">
                                <button
                                    on:mousedown=move |ev| stop_mouse_event(&ev)
                                    on:click=move |_| {
                                        menu_open.set(false);
                                        session.logout();
                                    }
                                >
                                    "Sleep"
                                </button>
                            </li>
                            <li role="menuitem">
                                <button
                                    on:mousedown=move |ev| stop_mouse_event(&ev)
                                    on:click=move |_| {
                                        menu_open.set(false);
                                        session.logout();
                                    }
                                >
                                    "Restart"
                                </button>
                            </li>
                            <li role="menuitem">
                                <button
                                    on:mousedown=move |ev| stop_mouse_event(&ev)
                                    on:click=move |_| {
                                        menu_open.set(false);
                                        session.shutdown();
                                    }
                                >
                                    "Shut Down"
                                </button>
                            </li>
                        </ul>
                    </Show>
                </div>
                <div class="status-strip-right">
                    <Show when=move || battery.get().is_some() fallback=|| ()>
                        <span
                            class="status-strip-battery"
                            class:charging=move || battery.get().is_some_and(|b| b.charging)
                        >
                            <span class="status-strip-battery-body" aria-hidden="true">
                                <span
                                    class="status-strip-battery-fill"
                                    style=move || {
                                        let pct = battery.get().map(|b| b.percent()).unwrap_or(0);
                                        format!("width:{pct}%;")
                                    }
                                />
                            </span>
                            {move || {
                                battery
                                    .get()
                                    .map(|b| format!("{}%", b.percent()))
                                    .unwrap_or_default()
                            }}
                        </span>
                    </Show>
                    <span class="status-strip-clock">
                        {move || clock_now.get().format_status_strip()}
                    </span>
                </div>
            </header>
        </Show>
    }
}
