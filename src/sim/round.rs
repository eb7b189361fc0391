//! Round controller
//!
//! Drives one round at a time: spawns targets, owns the single expiry timer,
//! scores hits, misses and timeouts, and records the summary when the score
//! threshold is reached. All time is passed in explicitly (monotonic ms), so
//! the controller is deterministic for a given seed and input sequence.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{PendingExpiry, RoundEvent, RoundPhase, RoundState, Target};
use crate::consts::TARGET_AREA_PERCENT;
use crate::results::{ResultsLog, RoundResult, format_date};
use crate::settings::Settings;
use crate::{platform, round2};

/// Owns the live round, the results log and the event queue
#[derive(Debug, Clone)]
pub struct RoundController {
    settings: Settings,
    state: RoundState,
    results: ResultsLog,
    rng: Pcg32,
    events: Vec<RoundEvent>,
    next_target_id: u32,
    next_timer_id: u64,
}

impl RoundController {
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self {
            settings: settings.sanitized(),
            state: RoundState::default(),
            results: ResultsLog::new(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_target_id: 1,
            next_timer_id: 1,
        }
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn phase(&self) -> RoundPhase {
        self.state.phase
    }

    pub fn results(&self) -> &ResultsLog {
        &self.results
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<RoundEvent> {
        std::mem::take(&mut self.events)
    }

    /// Start (or restart) a round
    pub fn start_round(&mut self, now_ms: f64) {
        if self.state.is_active() {
            log::info!("Restarting round in progress");
        }
        self.cancel_expiry();
        self.state = RoundState::begin(now_ms, self.settings.target_time_limit_ms);
        self.events.push(RoundEvent::RoundStarted);
        log::info!(
            "Round started (limit {} ms, threshold {})",
            self.settings.target_time_limit_ms,
            self.settings.score_threshold
        );
        self.spawn_target(now_ms);
    }

    /// Place a new target and arm its expiry
    pub fn spawn_target(&mut self, now_ms: f64) {
        if !self.state.is_active() {
            return;
        }
        self.cancel_expiry();

        let x = self.rng.random_range(0.0..TARGET_AREA_PERCENT);
        let y = self.rng.random_range(0.0..TARGET_AREA_PERCENT);
        let target = Target {
            id: self.next_target_id,
            pos: Vec2::new(x, y),
        };
        self.next_target_id += 1;
        self.state.target = Some(target);

        self.state.pending_expiry = Some(PendingExpiry {
            id: self.next_timer_id,
            deadline_ms: now_ms + self.state.target_time_limit_ms,
        });
        self.next_timer_id += 1;

        self.events.push(RoundEvent::TargetSpawned(target));
    }

    /// Fire every expiry whose deadline has passed, in deadline order
    pub fn advance(&mut self, now_ms: f64) {
        if !now_ms.is_finite() {
            log::warn!("Ignoring non-finite clock sample");
            return;
        }
        while let Some(expiry) = self.state.pending_expiry {
            if expiry.deadline_ms > now_ms {
                break;
            }
            self.expire(expiry.deadline_ms);
        }
    }

    /// Score a click on the visible target. Returns false if ignored.
    pub fn hit_target(&mut self, now_ms: f64) -> bool {
        // A click after the deadline lands on the respawned target
        self.advance(now_ms);
        let Some(target) = self.live_target() else {
            log::debug!("Hit ignored: no live target");
            return false;
        };

        self.cancel_expiry();
        self.state.total_attempts += 1;
        self.state.score += 1;
        self.state.recent_hits.push(now_ms);
        self.events.push(RoundEvent::Hit {
            pos: target.pos,
            at_ms: now_ms,
        });

        if self.state.score >= self.settings.score_threshold {
            self.end_round(now_ms);
        } else {
            self.spawn_target(now_ms);
        }
        true
    }

    /// Count a click that missed the visible target. Returns false if ignored.
    ///
    /// The target and its expiry are left untouched.
    pub fn miss_target(&mut self, now_ms: f64) -> bool {
        self.advance(now_ms);
        if self.live_target().is_none() {
            log::debug!("Miss ignored: no live target");
            return false;
        }
        self.state.total_attempts += 1;
        self.events.push(RoundEvent::Miss { at_ms: now_ms });
        true
    }

    /// Finish the active round and record its summary
    pub fn end_round(&mut self, now_ms: f64) -> Option<RoundResult> {
        if !self.state.is_active() {
            return None;
        }
        self.cancel_expiry();
        self.state.target = None;
        self.state.end_ms = Some(now_ms);
        self.state.phase = RoundPhase::Ended;

        let result = self.summarize(now_ms, platform::wall_clock_ms());
        log::info!(
            "Round ended: score={} accuracy={:.2}% speed={:.2}s time={:.2}s",
            result.score,
            result.accuracy,
            result.speed,
            result.time
        );
        self.results.record(result.clone());
        self.events.push(RoundEvent::RoundEnded(result.clone()));
        Some(result)
    }

    fn summarize(&self, end_ms: f64, wall_ms: f64) -> RoundResult {
        let state = &self.state;
        let time = round2((end_ms - state.start_ms) / 1000.0);
        let accuracy = if state.total_attempts == 0 {
            0.0
        } else {
            round2(state.score as f64 / state.total_attempts as f64 * 100.0)
        };
        let speed = state
            .recent_hits
            .last_interval_ms()
            .map(|ms| round2(ms / 1000.0))
            .unwrap_or(0.0);

        RoundResult {
            score: state.score,
            accuracy,
            speed,
            time,
            date: format_date(wall_ms),
            timestamp_ms: wall_ms,
        }
    }

    /// Target expired unclicked: penalize and respawn
    fn expire(&mut self, at_ms: f64) {
        self.state.pending_expiry = None;
        let Some(target) = self.state.target.take() else {
            return;
        };
        self.state.score = self.state.score.saturating_sub(1);
        self.state.total_attempts += 1;
        self.events.push(RoundEvent::Timeout { pos: target.pos });
        log::debug!("Target {} expired (score {})", target.id, self.state.score);
        self.spawn_target(at_ms);
    }

    fn cancel_expiry(&mut self) {
        self.state.pending_expiry = None;
    }

    fn live_target(&self) -> Option<Target> {
        if self.state.is_active() {
            self.state.target
        } else {
            None
        }
    }
}
