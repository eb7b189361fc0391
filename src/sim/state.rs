//! Round state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::HIT_WINDOW;
use crate::results::RoundResult;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Nothing started yet
    #[default]
    Idle,
    /// Targets are spawning
    Active,
    /// Score threshold reached (or round ended early)
    Ended,
}

/// A clickable target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// Spawn sequence number within the controller
    pub id: u32,
    /// Position in percent of the play area, each axis in [0, 90)
    pub pos: Vec2,
}

/// The one outstanding expiry timer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingExpiry {
    pub id: u64,
    /// Monotonic time (ms) at which the current target expires
    pub deadline_ms: f64,
}

/// Timestamps of the most recent hits, oldest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HitWindow {
    stamps: Vec<f64>,
}

impl HitWindow {
    pub fn push(&mut self, at_ms: f64) {
        self.stamps.push(at_ms);
        if self.stamps.len() > HIT_WINDOW {
            self.stamps.remove(0);
        }
    }

    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }

    /// Interval between the two most recent hits (ms), once both exist
    pub fn last_interval_ms(&self) -> Option<f64> {
        match self.stamps.as_slice() {
            [first, second] => Some(second - first),
            _ => None,
        }
    }
}

/// Events emitted by the round controller for the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum RoundEvent {
    RoundStarted,
    TargetSpawned(Target),
    /// Target clicked at its position
    Hit { pos: Vec2, at_ms: f64 },
    /// Click inside the play area but off the target
    Miss { at_ms: f64 },
    /// Target expired unclicked
    Timeout { pos: Vec2 },
    RoundEnded(RoundResult),
}

/// Mutable state of the live round
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundState {
    pub phase: RoundPhase,
    /// Hits minus timeout penalties, floored at 0
    pub score: u32,
    /// Hits + misses + timeouts
    pub total_attempts: u32,
    /// Monotonic round start (ms)
    pub start_ms: f64,
    /// Monotonic round end (ms), set once the round ends
    pub end_ms: Option<f64>,
    /// Visible target, `None` when hidden
    pub target: Option<Target>,
    pub recent_hits: HitWindow,
    /// Lifetime of each target (ms)
    pub target_time_limit_ms: f64,
    pub pending_expiry: Option<PendingExpiry>,
}

impl RoundState {
    /// Fresh active round starting at `now_ms`
    pub fn begin(now_ms: f64, target_time_limit_ms: f64) -> Self {
        Self {
            phase: RoundPhase::Active,
            start_ms: now_ms,
            target_time_limit_ms,
            ..Default::default()
        }
    }

    pub fn target_visible(&self) -> bool {
        self.target.is_some()
    }

    pub fn is_active(&self) -> bool {
        self.phase == RoundPhase::Active
    }
}
