//! Round tunables and audio preferences
//!
//! Lives for the page session only. The host may hand in a JSON override.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Shortest target lifetime accepted (keeps the expiry loop finite)
const MIN_TARGET_TIME_LIMIT_MS: f64 = 100.0;

/// Trainer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Round ===
    /// Time a target stays visible before it expires (ms)
    pub target_time_limit_ms: f64,
    /// Score that ends the round
    pub score_threshold: u32,

    // === Feedback ===
    /// Explosion marker lifetime (ms)
    pub explosion_duration_ms: f64,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute all cues
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_time_limit_ms: DEFAULT_TARGET_TIME_LIMIT_MS,
            score_threshold: DEFAULT_SCORE_THRESHOLD,

            explosion_duration_ms: DEFAULT_EXPLOSION_DURATION_MS,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON, falling back to defaults on bad input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => {
                log::info!("Loaded settings override");
                settings.sanitized()
            }
            Err(e) => {
                log::warn!("Ignoring invalid settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Clamp every field into its usable range
    pub fn sanitized(mut self) -> Self {
        if !self.target_time_limit_ms.is_finite() {
            self.target_time_limit_ms = DEFAULT_TARGET_TIME_LIMIT_MS;
        }
        self.target_time_limit_ms = self.target_time_limit_ms.max(MIN_TARGET_TIME_LIMIT_MS);
        self.score_threshold = self.score_threshold.max(1);
        if !self.explosion_duration_ms.is_finite() || self.explosion_duration_ms < 0.0 {
            self.explosion_duration_ms = DEFAULT_EXPLOSION_DURATION_MS;
        }
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self
    }

    /// Flip mute, returning the new state
    pub fn toggle_muted(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Effective cue volume (respects mute)
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}
