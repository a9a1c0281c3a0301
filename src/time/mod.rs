//! Time-based gates shared by the web and native hosts.
//!
//! All timestamps are milliseconds from a monotonic clock supplied by the
//! caller (`performance.now()` on the web, `Instant` on native), which keeps
//! these types free of platform code and deterministic under test.

pub mod debounce;
pub mod frame_limiter;
pub mod throttle;

pub use debounce::Debouncer;
pub use frame_limiter::FrameLimiter;
pub use throttle::Throttle;

/// Wall-clock milliseconds since the Unix epoch, drives the camera bob
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub fn wall_clock_ms() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64
}

/// Wall-clock milliseconds since the Unix epoch, drives the camera bob
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub fn wall_clock_ms() -> f64 {
    js_sys::Date::now()
}
