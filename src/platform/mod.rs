//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Monotonic time (performance.now / Instant)
//! - Wall-clock time (Date.now / chrono)
//! - RNG seeding

/// Monotonic milliseconds (performance.now on web)
#[cfg(target_arch = "wasm32")]
pub fn monotonic_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Wall-clock milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn wall_clock_ms() -> f64 {
    js_sys::Date::now()
}

/// Monotonic milliseconds since the first call
#[cfg(not(target_arch = "wasm32"))]
pub fn monotonic_ms() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static ORIGIN: OnceLock<Instant> = OnceLock::new();
    ORIGIN.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}

/// Wall-clock milliseconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn wall_clock_ms() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64
}

/// Seed for target placement
pub fn seed() -> u64 {
    wall_clock_ms() as u64
}
