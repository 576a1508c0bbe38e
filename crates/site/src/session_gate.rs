//! Session gate: boot, login, desktop, and shutdown phases.
//!
//! The gate owns which full-screen surface is mounted. Phase changes ride the
//! same broadcast channel the desktop uses, so a logout triggered deep inside
//! the status strip reaches here without any direct coupling.

use std::rc::Rc;
use std::time::Duration;

use desk_contract::DesktopSignal;
use desk_host::{keys, KeyValueStore};
use desk_host_web::{install_signal_listener, publish_signal, WebStore};
use desk_runtime::clock::ClockSnapshot;
use desk_runtime::{DesktopShell, SessionProvider};
use leptos::leptos_dom::helpers::IntervalHandle;
use leptos::*;

const PASSCODE: &str = "0941";
const BOOT_DURATION_MS: f64 = 3000.0;
const BOOT_TICK_MS: u64 = 16;
const BOOT_SETTLE_MS: u64 = 200;

/// Progress added per boot tick, in percent.
fn boot_tick_pct() -> f64 {
    100.0 * BOOT_TICK_MS as f64 / BOOT_DURATION_MS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionPhase {
    Booting,
    Login,
    Desktop,
    Shutdown,
}

#[component]
pub fn SessionGate() -> impl IntoView {
    let store: Rc<dyn KeyValueStore> = Rc::new(WebStore::new());

    // A surviving session flag skips the boot sequence entirely.
    let initial = if store.load(keys::LOGGED_IN).as_deref() == Some("true") {
        SessionPhase::Desktop
    } else {
        SessionPhase::Booting
    };
    let phase = create_rw_signal(initial);

    let set_phase = move |next: SessionPhase| {
        if phase.get_untracked() != next {
            phase.set(next);
        }
    };

    let listener = install_signal_listener(Rc::new(move |signal: DesktopSignal| match signal {
        DesktopSignal::SessionLogin => set_phase(SessionPhase::Desktop),
        DesktopSignal::SessionLogout => set_phase(SessionPhase::Login),
        DesktopSignal::BootSequenceStart => set_phase(SessionPhase::Booting),
        DesktopSignal::ShutdownSequenceStart => set_phase(SessionPhase::Shutdown),
        _ => {}
    }));
    let listener = store_value(Some(listener));
    on_cleanup(move || listener.set_value(None));

    let desktop_store = Rc::clone(&store);
    move || match phase.get() {
        SessionPhase::Booting => {
            let on_ready = Callback::new(move |_| set_phase(SessionPhase::Login));
            view! { <BootScreen on_ready=on_ready /> }.into_view()
        }
        SessionPhase::Login => {
            let login_store = Rc::clone(&store);
            let on_login = Callback::new(move |_| set_phase(SessionPhase::Desktop));
            view! { <LoginScreen store=login_store on_login=on_login /> }.into_view()
        }
        SessionPhase::Desktop => {
            let store = Rc::clone(&desktop_store);
            view! {
                <SessionProvider store=store>
                    <DesktopShell />
                </SessionProvider>
            }
            .into_view()
        }
        SessionPhase::Shutdown => view! { <ShutdownScreen /> }.into_view(),
    }
}

#[component]
fn BootScreen(on_ready: Callback<()>) -> impl IntoView {
    let progress = create_rw_signal(0.0_f64);
    let interval = store_value(None::<IntervalHandle>);

    let stop = move || {
        if let Some(handle) = interval.try_update_value(Option::take).flatten() {
            handle.clear();
        }
    };

    if let Ok(handle) = set_interval_with_handle(
        move || {
            let next = (progress.get_untracked() + boot_tick_pct()).min(100.0);
            progress.set(next);
            if next >= 100.0 {
                stop();
                // Let the full bar render before the login screen swaps in.
                let _ = set_timeout_with_handle(
                    move || on_ready.call(()),
                    Duration::from_millis(BOOT_SETTLE_MS),
                );
            }
        },
        Duration::from_millis(BOOT_TICK_MS),
    ) {
        interval.set_value(Some(handle));
        on_cleanup(stop);
    }

    view! {
        <div class="boot-screen">
            <div class="boot-logo" aria-hidden="true" />
            <div
                class="boot-progress"
                role="progressbar"
                aria-valuemin="0"
                aria-valuemax="100"
                aria-valuenow=move || format!("{:.0}", progress.get())
            >
                <div
                    class="boot-progress-fill"
                    style=move || format!("width:{}%;", progress.get())
                />
            </div>
        </div>
    }
}

#[component]
fn LoginScreen(store: Rc<dyn KeyValueStore>, on_login: Callback<()>) -> impl IntoView {
    let clock_now = create_rw_signal(ClockSnapshot::now());
    let passcode = create_rw_signal(String::new());
    let rejected = create_rw_signal(false);

    if let Ok(interval) = set_interval_with_handle(
        move || clock_now.set(ClockSnapshot::now()),
        Duration::from_secs(1),
    ) {
        on_cleanup(move || interval.clear());
    }

    let submit = move || {
        if passcode.get_untracked() == PASSCODE {
            if let Err(err) = store.save(keys::LOGGED_IN, "true") {
                logging::warn!("session flag write failed: {err}");
            }
            publish_signal(&DesktopSignal::SessionLogin);
            on_login.call(());
        } else {
            rejected.set(true);
            passcode.set(String::new());
        }
    };

    view! {
        <div class="login-screen">
            <p class="login-time">{move || clock_now.get().format_login_time()}</p>
            <p class="login-date">{move || clock_now.get().format_login_date()}</p>
            <div class="login-card" class:rejected=move || rejected.get()>
                <p class="login-name">"Justin Short"</p>
                <input
                    type="password"
                    inputmode="numeric"
                    placeholder="Enter Passcode"
                    prop:value=move || passcode.get()
                    on:input=move |ev| {
                        rejected.set(false);
                        passcode.set(event_target_value(&ev));
                    }
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            submit();
                        }
                    }
                />
                <Show when=move || rejected.get() fallback=|| ()>
                    <p class="login-hint">"Hint: 0941"</p>
                </Show>
            </div>
        </div>
    }
}

#[component]
fn ShutdownScreen() -> impl IntoView {
    let keydown_listener = window_event_listener(ev::keydown, move |_| {
        publish_signal(&DesktopSignal::BootSequenceStart);
    });
    on_cleanup(move || keydown_listener.remove());

    view! {
        <div class="shutdown-screen">
            <p>"Press any key to start up."</p>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn boot_ticks_fill_the_bar_over_the_full_duration() {
        let ticks = (BOOT_DURATION_MS / BOOT_TICK_MS as f64).ceil() as u32;
        let mut progress = 0.0_f64;
        for _ in 0..ticks {
            progress = (progress + boot_tick_pct()).min(100.0);
        }
        assert_eq!(progress, 100.0);
    }
}
