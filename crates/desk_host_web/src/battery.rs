//! Battery status adapter over the Battery Status API.
//!
//! `navigator.getBattery()` resolves asynchronously; the watch delivers one
//! reading when the promise settles and another on every `levelchange` or
//! `chargingchange`. Browsers without the API never deliver a reading.

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

#[derive(Debug, Clone, Copy, PartialEq)]
/// One sample of the device battery state.
pub struct BatteryReading {
    /// Charge level in `0.0..=1.0`.
    pub level: f64,
    /// Whether the device is on external power.
    pub charging: bool,
}

impl BatteryReading {
    /// Charge level as a whole percentage, clamped to `0..=100`.
    pub fn percent(self) -> u8 {
        (self.level.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}

#[cfg(target_arch = "wasm32")]
struct Installed {
    manager: web_sys::BatteryManager,
    _on_level: Closure<dyn Fn()>,
    _on_charging: Closure<dyn Fn()>,
}

/// Keeps the battery listeners installed; dropping the guard detaches them.
pub struct BatteryWatchGuard {
    #[cfg(target_arch = "wasm32")]
    installed: Rc<RefCell<Option<Installed>>>,
    #[cfg(target_arch = "wasm32")]
    _resolved: Closure<dyn FnMut(JsValue)>,
}

/// Subscribes `on_reading` to the device battery state.
///
/// The returned guard owns the underlying closures; keep it alive for as
/// long as delivery should continue.
pub fn watch_battery(on_reading: std::rc::Rc<dyn Fn(BatteryReading)>) -> BatteryWatchGuard {
    #[cfg(target_arch = "wasm32")]
    {
        let installed = Rc::new(RefCell::new(None));
        let slot = Rc::clone(&installed);
        let resolved = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
            let Ok(manager) = value.dyn_into::<web_sys::BatteryManager>() else {
                return;
            };
            let read = |manager: &web_sys::BatteryManager| BatteryReading {
                level: manager.level(),
                charging: manager.charging(),
            };
            on_reading(read(&manager));

            let level_manager = manager.clone();
            let level_sink = Rc::clone(&on_reading);
            let on_level = Closure::<dyn Fn()>::new(move || level_sink(read(&level_manager)));
            let charging_manager = manager.clone();
            let charging_sink = Rc::clone(&on_reading);
            let on_charging =
                Closure::<dyn Fn()>::new(move || charging_sink(read(&charging_manager)));
            manager.set_onlevelchange(Some(on_level.as_ref().unchecked_ref()));
            manager.set_onchargingchange(Some(on_charging.as_ref().unchecked_ref()));
            *slot.borrow_mut() = Some(Installed {
                manager,
                _on_level: on_level,
                _on_charging: on_charging,
            });
        });
        if let Some(window) = web_sys::window() {
            if let Ok(promise) = window.navigator().get_battery() {
                let _ = promise.then(&resolved);
            }
        }
        BatteryWatchGuard {
            installed,
            _resolved: resolved,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = on_reading;
        BatteryWatchGuard {}
    }
}

impl Drop for BatteryWatchGuard {
    fn drop(&mut self) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(installed) = self.installed.borrow_mut().take() {
                installed.manager.set_onlevelchange(None);
                installed.manager.set_onchargingchange(None);
            }
        }
    }
}
