//! Sound effects using the Web Audio API
//!
//! Procedurally generated, no audio files. If no `AudioContext` can be
//! created the game runs silently.

use crate::sim::{GameEvent, ObstacleKind};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Jump,
    LaneSwitch,
    GoldCoin,
    RedCoin,
    ExtraLife,
    /// Hit a barrier or hole and survived
    Crash,
    /// Dropping into a hole on the last life
    Fall,
    GameOver,
}

impl SoundEffect {
    /// The cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match *event {
            GameEvent::Jumped => Some(SoundEffect::Jump),
            GameEvent::LaneChanged => Some(SoundEffect::LaneSwitch),
            GameEvent::PickedUp(ObstacleKind::GoldCoin) => Some(SoundEffect::GoldCoin),
            GameEvent::PickedUp(ObstacleKind::RedCoin) => Some(SoundEffect::RedCoin),
            GameEvent::PickedUp(ObstacleKind::Life) => Some(SoundEffect::ExtraLife),
            GameEvent::PickedUp(_) => None,
            GameEvent::Crashed { lives_left, .. } if lives_left > 0 => Some(SoundEffect::Crash),
            GameEvent::Crashed { .. } => None,
            GameEvent::FellIntoHole => Some(SoundEffect::Fall),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
        }
    }
}

/// Output gain for a cue
pub fn cue_volume(volume: f32, muted: bool) -> f32 {
    if muted { 0.0 } else { volume.clamp(0.0, 1.0) }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundEffect, cue_volume};
    use crate::sim::GameEvent;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
        muted: bool,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: 0.8,
                muted: false,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Flip mute; returns the new state
        pub fn toggle_muted(&mut self) -> bool {
            self.muted = !self.muted;
            log::info!("Audio {}", if self.muted { "muted" } else { "unmuted" });
            self.muted
        }

        /// Play the cue for every event that has one
        pub fn play_events(&self, events: &[GameEvent]) {
            for sound in events.iter().filter_map(SoundEffect::for_event) {
                self.play(sound);
            }
        }

        pub fn play(&self, effect: SoundEffect) {
            let vol = cue_volume(self.volume, self.muted);
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Jump => {
                    self.sweep(ctx, vol * 0.4, OscillatorType::Sine, 300.0, 600.0, 0.15)
                }
                SoundEffect::LaneSwitch => {
                    self.sweep(ctx, vol * 0.2, OscillatorType::Triangle, 500.0, 450.0, 0.06)
                }
                SoundEffect::GoldCoin => {
                    self.tone(ctx, vol * 0.35, OscillatorType::Square, 988.0, 0.0, 0.08);
                    self.tone(ctx, vol * 0.35, OscillatorType::Square, 1319.0, 0.08, 0.2);
                }
                SoundEffect::RedCoin => {
                    self.sweep(ctx, vol * 0.35, OscillatorType::Sawtooth, 400.0, 150.0, 0.25)
                }
                SoundEffect::ExtraLife => {
                    for (i, freq) in [523.0, 659.0, 784.0, 1047.0].into_iter().enumerate() {
                        let delay = i as f64 * 0.07;
                        self.tone(ctx, vol * 0.3, OscillatorType::Triangle, freq, delay, 0.12);
                    }
                }
                SoundEffect::Crash => {
                    self.sweep(ctx, vol * 0.6, OscillatorType::Square, 120.0, 40.0, 0.3)
                }
                SoundEffect::Fall => {
                    self.sweep(ctx, vol * 0.5, OscillatorType::Sine, 800.0, 80.0, 1.0)
                }
                SoundEffect::GameOver => {
                    for (i, freq) in [392.0, 330.0, 262.0].into_iter().enumerate() {
                        let delay = i as f64 * 0.2;
                        self.tone(ctx, vol * 0.4, OscillatorType::Triangle, freq, delay, 0.3);
                    }
                }
            }
        }

        // === Sound generators ===

        /// Oscillator routed through a gain node to the speakers
        fn create_osc(
            &self,
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

        /// Fixed pitch note starting `delay` seconds from now
        fn tone(
            &self,
            ctx: &AudioContext,
            vol: f32,
            osc_type: OscillatorType,
            freq: f32,
            delay: f64,
            duration: f64,
        ) {
            let Some((osc, gain)) = self.create_osc(ctx, freq, osc_type) else {
                return;
            };
            let t = ctx.current_time() + delay;

            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + duration)
                .ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + duration + 0.02).ok();
        }

        /// Pitch glide from `from` to `to` Hz
        fn sweep(
            &self,
            ctx: &AudioContext,
            vol: f32,
            osc_type: OscillatorType,
            from: f32,
            to: f32,
            duration: f64,
        ) {
            let Some((osc, gain)) = self.create_osc(ctx, from, osc_type) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + duration)
                .ok();
            osc.frequency().set_value_at_time(from, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(to, t + duration)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + duration + 0.05).ok();
        }
    }
}
