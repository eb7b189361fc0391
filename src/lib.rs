//! Aim Trainer - click the target before it expires
//!
//! Core modules:
//! - `sim`: Round state machine (targets, expiry timer, scoring)
//! - `results`: Capped history of finished rounds
//! - `feedback`: Hit/miss cues and explosion markers (no gameplay impact)
//! - `game`: The mountable component tying the pieces together
//! - `platform`: Browser/native clock abstraction

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod feedback;
pub mod game;
pub mod platform;
pub mod results;
pub mod settings;
pub mod sim;

pub use feedback::{Cue, CueSink, Feedback, SilentSink};
pub use game::{AimGame, AimView};
pub use results::{ResultsLog, RoundResult};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Upper bound (exclusive) of target coordinates, percent of play area
    pub const TARGET_AREA_PERCENT: f32 = 90.0;

    /// Default time a target stays up before it expires
    pub const DEFAULT_TARGET_TIME_LIMIT_MS: f64 = 3000.0;
    /// Hits needed to finish a round
    pub const DEFAULT_SCORE_THRESHOLD: u32 = 10;

    /// Number of recent hit timestamps kept for the speed readout
    pub const HIT_WINDOW: usize = 2;
    /// Finished rounds kept in the results log
    pub const MAX_RESULTS: usize = 10;

    /// How long an explosion marker stays on screen
    pub const DEFAULT_EXPLOSION_DURATION_MS: f64 = 800.0;
    /// Maximum explosion markers alive at once
    pub const MAX_EXPLOSIONS: usize = 32;
}

/// Round to two decimal places (display precision for results)
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
