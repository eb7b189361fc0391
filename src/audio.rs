//! Audio system using Web Audio API
//!
//! Procedurally generated cues - no external files needed! Every cue builds
//! fresh oscillator nodes, so rapid hits overlap instead of queuing.

use anyhow::anyhow;
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::feedback::{Cue, CueSink};
use crate::settings::Settings;

/// Audio manager for the trainer
pub struct AudioManager {
    ctx: Option<AudioContext>,
    /// Volume and mute preferences
    settings: Settings,
}

impl AudioManager {
    /// Create the audio context up front (at mount)
    pub fn new(settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            settings: settings.clone(),
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Mute/unmute all audio, returning the new state
    pub fn toggle_muted(&mut self) -> bool {
        self.settings.toggle_muted()
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Hit - short bright pop with a low thump
    fn play_hit(ctx: &AudioContext, vol: f32) -> Option<()> {
        let t = ctx.current_time();

        let (osc, gain) = Self::create_osc(ctx, 880.0, OscillatorType::Triangle)?;
        gain.gain().set_value_at_time(vol * 0.4, t).ok()?;
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.12)
            .ok()?;
        osc.frequency()
            .exponential_ramp_to_value_at_time(1320.0, t + 0.05)
            .ok()?;
        osc.start().ok()?;
        osc.stop_with_when(t + 0.15).ok()?;

        let (thump, thump_gain) = Self::create_osc(ctx, 120.0, OscillatorType::Sine)?;
        thump_gain.gain().set_value_at_time(vol * 0.3, t).ok()?;
        thump_gain
            .gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.1)
            .ok()?;
        thump.start().ok()?;
        thump.stop_with_when(t + 0.12).ok()?;
        Some(())
    }

    /// Miss - dull downward buzz
    fn play_miss(ctx: &AudioContext, vol: f32) -> Option<()> {
        let (osc, gain) = Self::create_osc(ctx, 220.0, OscillatorType::Sawtooth)?;
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.2, t).ok()?;
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.18)
            .ok()?;
        osc.frequency()
            .exponential_ramp_to_value_at_time(90.0, t + 0.18)
            .ok()?;
        osc.start().ok()?;
        osc.stop_with_when(t + 0.2).ok()?;
        Some(())
    }

    /// Round complete - rising arpeggio
    fn play_round_complete(ctx: &AudioContext, vol: f32) -> Option<()> {
        for (i, freq) in [500.0, 600.0, 800.0, 1000.0].iter().enumerate() {
            let delay = i as f64 * 0.08;
            let (osc, gain) = Self::create_osc(ctx, *freq, OscillatorType::Triangle)?;
            let t = ctx.current_time() + delay;
            gain.gain().set_value_at_time(vol * 0.25, t).ok()?;
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                .ok()?;
            osc.start_with_when(t).ok()?;
            osc.stop_with_when(t + 0.3).ok()?;
        }
        Some(())
    }
}

impl CueSink for AudioManager {
    fn play(&mut self, cue: Cue) -> anyhow::Result<()> {
        let vol = self.settings.effective_volume();
        if vol <= 0.0 {
            return Ok(());
        }

        let ctx = self
            .ctx
            .as_ref()
            .ok_or_else(|| anyhow!("no audio context"))?;

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let played = match cue {
            Cue::Hit => Self::play_hit(ctx, vol),
            Cue::Miss => Self::play_miss(ctx, vol),
            Cue::RoundComplete => Self::play_round_complete(ctx, vol),
        };
        played.ok_or_else(|| anyhow!("failed to schedule {:?} cue", cue))
    }
}
