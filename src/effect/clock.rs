#[cfg(any(target_arch = "wasm32", test))]
use std::sync::atomic::{AtomicBool, Ordering};

/// Monotonic milliseconds since an arbitrary epoch.
pub struct Clock {
    #[cfg(not(target_arch = "wasm32"))]
    origin: std::time::Instant,
    #[cfg(target_arch = "wasm32")]
    fallback_reported: AtomicBool,
}

impl Clock {
    pub fn new() -> Self {
        cfg_if::cfg_if! {
            if #[cfg(target_arch="wasm32")] {
                Self {
                    fallback_reported: AtomicBool::new(false),
                }
            } else {
                Self {
                    origin: std::time::Instant::now(),
                }
            }
        }
    }

    pub fn now_ms(&self) -> f64 {
        cfg_if::cfg_if! {
            if #[cfg(target_arch="wasm32")] {
                let now = web_sys::window()
                    .and_then(|window| window.performance())
                    .map(|performance| performance.now());
                now_or_frozen(now, &self.fallback_reported)
            } else {
                self.origin.elapsed().as_secs_f64() * 1000.0
            }
        }
    }
}

/// Falls back to a constant time, warning the first time it does.
#[cfg(any(target_arch = "wasm32", test))]
fn now_or_frozen(now: Option<f64>, fallback_reported: &AtomicBool) -> f64 {
    now.unwrap_or_else(|| {
        if !fallback_reported.swap(true, Ordering::Relaxed) {
            log::warn!("`performance.now()` is unavailable, the animation is frozen");
        }
        0.0
    })
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
