//! Presentation feedback
//!
//! Turns round events into sound cues and short-lived explosion markers.
//! Nothing here feeds back into scoring; sink failures are logged and dropped.

use std::collections::VecDeque;

use glam::Vec2;
use serde::Serialize;

use crate::consts::MAX_EXPLOSIONS;
use crate::sim::RoundEvent;

/// Sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Target hit
    Hit,
    /// Click missed the target
    Miss,
    /// Score threshold reached
    RoundComplete,
}

/// Something that can play cues
///
/// Each call must start the cue from the beginning, even if the previous
/// one is still sounding.
pub trait CueSink {
    fn play(&mut self, cue: Cue) -> anyhow::Result<()>;
}

/// Sink that plays nothing (native builds, tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl CueSink for SilentSink {
    fn play(&mut self, _cue: Cue) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Explosion marker left where a target was hit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Explosion {
    pub id: u32,
    /// Position in percent of the play area
    pub pos: Vec2,
    /// Monotonic time (ms) the marker appeared
    pub spawned_ms: f64,
}

/// Feedback state: cue sink plus live explosion markers (oldest first)
#[derive(Debug)]
pub struct Feedback<S: CueSink> {
    sink: S,
    explosions: VecDeque<Explosion>,
    display_ms: f64,
    next_id: u32,
}

impl<S: CueSink> Feedback<S> {
    pub fn new(sink: S, display_ms: f64) -> Self {
        Self {
            sink,
            explosions: VecDeque::with_capacity(MAX_EXPLOSIONS),
            display_ms,
            next_id: 1,
        }
    }

    /// React to one round event
    pub fn handle(&mut self, event: &RoundEvent) {
        match event {
            RoundEvent::Hit { pos, at_ms } => {
                self.cue(Cue::Hit);
                self.spawn_explosion(*pos, *at_ms);
            }
            RoundEvent::Miss { .. } => self.cue(Cue::Miss),
            RoundEvent::RoundEnded(_) => self.cue(Cue::RoundComplete),
            _ => {}
        }
    }

    /// Drop explosions older than the display duration
    pub fn prune(&mut self, now_ms: f64) {
        while let Some(front) = self.explosions.front() {
            if now_ms - front.spawned_ms < self.display_ms {
                break;
            }
            self.explosions.pop_front();
        }
    }

    /// Live explosions, oldest first
    pub fn explosions(&self) -> impl Iterator<Item = &Explosion> {
        self.explosions.iter()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    fn cue(&mut self, cue: Cue) {
        if let Err(e) = self.sink.play(cue) {
            log::warn!("Cue {:?} failed: {}", cue, e);
        }
    }

    fn spawn_explosion(&mut self, pos: Vec2, at_ms: f64) {
        if self.explosions.len() >= MAX_EXPLOSIONS {
            self.explosions.pop_front();
        }
        self.explosions.push_back(Explosion {
            id: self.next_id,
            pos,
            spawned_ms: at_ms,
        });
        self.next_id = self.next_id.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[derive(Default)]
    struct Recorder {
        played: Vec<Cue>,
    }

    impl CueSink for Recorder {
        fn play(&mut self, cue: Cue) -> anyhow::Result<()> {
            self.played.push(cue);
            Ok(())
        }
    }

    struct Broken;

    impl CueSink for Broken {
        fn play(&mut self, _cue: Cue) -> anyhow::Result<()> {
            Err(anyhow!("audio not ready"))
        }
    }

    fn hit(x: f32, at_ms: f64) -> RoundEvent {
        RoundEvent::Hit {
            pos: Vec2::new(x, 10.0),
            at_ms,
        }
    }

    #[test]
    fn test_hit_plays_cue_and_spawns_explosion() {
        let mut fb = Feedback::new(Recorder::default(), 800.0);
        fb.handle(&hit(20.0, 100.0));
        fb.handle(&hit(30.0, 120.0));
        fb.handle(&RoundEvent::Miss { at_ms: 130.0 });

        assert_eq!(fb.sink().played, vec![Cue::Hit, Cue::Hit, Cue::Miss]);
        let xs: Vec<f32> = fb.explosions().map(|e| e.pos.x).collect();
        assert_eq!(xs, vec![20.0, 30.0]);
    }

    #[test]
    fn test_explosions_expire_fifo() {
        let mut fb = Feedback::new(SilentSink, 800.0);
        fb.handle(&hit(1.0, 0.0));
        fb.handle(&hit(2.0, 500.0));

        fb.prune(799.0);
        assert_eq!(fb.explosions().count(), 2);

        fb.prune(800.0);
        let left: Vec<f32> = fb.explosions().map(|e| e.pos.x).collect();
        assert_eq!(left, vec![2.0]);

        fb.prune(1300.0);
        assert_eq!(fb.explosions().count(), 0);
    }

    #[test]
    fn test_explosions_capped() {
        let mut fb = Feedback::new(SilentSink, 800.0);
        for i in 0..(MAX_EXPLOSIONS + 5) {
            fb.handle(&hit(i as f32, 0.0));
        }
        assert_eq!(fb.explosions().count(), MAX_EXPLOSIONS);
        assert_eq!(fb.explosions().next().map(|e| e.pos.x), Some(5.0));
    }

    #[test]
    fn test_broken_sink_still_tracks_explosions() {
        let mut fb = Feedback::new(Broken, 800.0);
        fb.handle(&hit(5.0, 0.0));
        fb.handle(&RoundEvent::Miss { at_ms: 1.0 });
        assert_eq!(fb.explosions().count(), 1);
    }

    #[test]
    fn test_other_events_are_silent() {
        let mut fb = Feedback::new(Recorder::default(), 800.0);
        fb.handle(&RoundEvent::RoundStarted);
        fb.handle(&RoundEvent::Timeout {
            pos: Vec2::ZERO,
        });
        assert!(fb.sink().played.is_empty());
        assert_eq!(fb.explosions().count(), 0);
    }
}
