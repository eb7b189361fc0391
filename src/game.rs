//! The mountable aim trainer component
//!
//! Wraps the round controller with feedback and the results toggle, and
//! exposes a flat view for the page to render.

use serde::Serialize;

use crate::feedback::{CueSink, Explosion, Feedback};
use crate::results::RoundResult;
use crate::settings::Settings;
use crate::sim::{RoundController, RoundPhase};

/// Snapshot of everything the page renders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AimView {
    pub score: u32,
    pub total_clicks: u32,
    pub show_target: bool,
    pub target_x: f32,
    pub target_y: f32,
    pub show_results: bool,
    pub results_sorted: Vec<RoundResult>,
    pub explosions: Vec<Explosion>,
    pub round_over: bool,
}

/// Aim trainer instance
#[derive(Debug)]
pub struct AimGame<S: CueSink> {
    controller: RoundController,
    feedback: Feedback<S>,
    show_results: bool,
}

impl<S: CueSink> AimGame<S> {
    /// Mount the component; `sink` should already have its audio prepared
    pub fn new(settings: Settings, seed: u64, sink: S) -> Self {
        let controller = RoundController::new(settings, seed);
        let display_ms = controller.settings().explosion_duration_ms;
        Self {
            controller,
            feedback: Feedback::new(sink, display_ms),
            show_results: false,
        }
    }

    pub fn controller(&self) -> &RoundController {
        &self.controller
    }

    pub fn feedback(&self) -> &Feedback<S> {
        &self.feedback
    }

    pub fn feedback_mut(&mut self) -> &mut Feedback<S> {
        &mut self.feedback
    }

    pub fn start_game(&mut self, now_ms: f64) {
        self.controller.start_round(now_ms);
        self.dispatch();
    }

    pub fn hit_target(&mut self, now_ms: f64) -> bool {
        let hit = self.controller.hit_target(now_ms);
        self.dispatch();
        hit
    }

    pub fn miss_target(&mut self, now_ms: f64) -> bool {
        let missed = self.controller.miss_target(now_ms);
        self.dispatch();
        missed
    }

    pub fn toggle_results(&mut self) {
        self.show_results = !self.show_results;
    }

    /// Per-frame step: fire due expiries and age explosion markers
    pub fn update(&mut self, now_ms: f64) {
        self.controller.advance(now_ms);
        self.dispatch();
        self.feedback.prune(now_ms);
    }

    pub fn view(&self) -> AimView {
        let state = self.controller.state();
        let (target_x, target_y) = state
            .target
            .map(|t| (t.pos.x, t.pos.y))
            .unwrap_or((0.0, 0.0));

        AimView {
            score: state.score,
            total_clicks: state.total_attempts,
            show_target: state.target_visible(),
            target_x,
            target_y,
            show_results: self.show_results,
            results_sorted: self.controller.results().sorted_by_time(),
            explosions: self.feedback.explosions().copied().collect(),
            round_over: state.phase == RoundPhase::Ended,
        }
    }

    fn dispatch(&mut self) {
        for event in self.controller.drain_events() {
            self.feedback.handle(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::SilentSink;

    #[test]
    fn test_view_before_start() {
        let game = AimGame::new(Settings::default(), 1, SilentSink);
        let view = game.view();
        assert_eq!(view.score, 0);
        assert!(!view.show_target);
        assert!(!view.show_results);
        assert!(view.results_sorted.is_empty());
        assert!(!view.round_over);
    }

    #[test]
    fn test_toggle_results() {
        let mut game = AimGame::new(Settings::default(), 1, SilentSink);
        game.toggle_results();
        assert!(game.view().show_results);
        game.toggle_results();
        assert!(!game.view().show_results);
    }

    #[test]
    fn test_view_tracks_target() {
        let mut game = AimGame::new(Settings::default(), 1, SilentSink);
        game.start_game(0.0);
        let view = game.view();
        let target = game.controller().state().target.expect("visible");
        assert!(view.show_target);
        assert_eq!(view.target_x, target.pos.x);
        assert_eq!(view.target_y, target.pos.y);
    }

    #[test]
    fn test_update_prunes_explosions() {
        let mut game = AimGame::new(Settings::default(), 1, SilentSink);
        game.start_game(0.0);
        game.hit_target(100.0);
        assert_eq!(game.view().explosions.len(), 1);
        game.update(900.0);
        assert!(game.view().explosions.is_empty());
    }
}
