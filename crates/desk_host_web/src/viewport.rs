//! Viewport measurement.

/// Current viewport size in CSS pixels.
///
/// Resize math divides by these values, so a missing window (non-browser
/// target or detached test) reports a conventional desktop size instead of
/// zero.
pub fn viewport_size() -> (f64, f64) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let width = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0);
            let height = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0);
            if width > 0.0 && height > 0.0 {
                return (width, height);
            }
        }
    }

    (1440.0, 900.0)
}
