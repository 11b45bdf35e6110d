//! Arcade sound cues, synthesised with Web Audio oscillators
//!
//! Each cue is a short list of oscillator tones. Games only push cues; the
//! host plays them after the tick, so audio never feeds back into a simulation.

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Discrete events a game can make audible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    // Snake
    Eat,
    SnakeDie,
    // Galaxy Raid
    Explode,
    ShipLost,
    // Pong
    PongHit,
    PongScore,
    PongOver,
    // Slide
    Slide,
    LevelWin,
    Solve,
    // Stack
    StackPlace,
    /// Perfect placement, pitched up by combo count
    StackPerfect(u32),
    StackOver,
    // Breaker
    PaddleHit,
    BrickHit,
    BallLost,
    // Racer
    Turbo,
    Pass,
    Crash,
    // Type
    TypeKey,
    WordDestroyed,
    WordMissed,
    /// New high score
    HighScore,
}

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// How the frequency moves from `freq` to `end_freq`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sweep {
    Hold,
    Linear,
    Exponential,
}

/// One oscillator voice
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub wave: Wave,
    pub freq: f32,
    pub end_freq: f32,
    pub sweep: Sweep,
    /// Peak gain before master/sfx volume
    pub gain: f32,
    /// Start offset in seconds
    pub delay: f32,
    pub duration: f32,
}

impl Tone {
    const fn new(wave: Wave, freq: f32, duration: f32, gain: f32) -> Self {
        Self {
            wave,
            freq,
            end_freq: freq,
            sweep: Sweep::Hold,
            gain,
            delay: 0.0,
            duration,
        }
    }

    const fn exp(self, end_freq: f32) -> Self {
        Self {
            end_freq,
            sweep: Sweep::Exponential,
            ..self
        }
    }

    const fn lin(self, end_freq: f32) -> Self {
        Self {
            end_freq,
            sweep: Sweep::Linear,
            ..self
        }
    }

    const fn after(self, delay: f32) -> Self {
        Self { delay, ..self }
    }
}

impl SoundEffect {
    /// Voices making up this cue
    pub fn tones(&self) -> Vec<Tone> {
        use Wave::*;
        match *self {
            SoundEffect::Eat => vec![Tone::new(Sine, 600.0, 0.1, 0.1).exp(1000.0)],
            SoundEffect::SnakeDie => vec![Tone::new(Sawtooth, 120.0, 0.4, 0.2).lin(40.0)],
            SoundEffect::Explode => vec![Tone::new(Sawtooth, 200.0, 0.1, 0.1).exp(50.0)],
            SoundEffect::ShipLost => vec![Tone::new(Triangle, 100.0, 1.0, 0.3).exp(10.0)],
            SoundEffect::PongHit => vec![Tone::new(Sine, 400.0, 0.1, 0.2).exp(600.0)],
            SoundEffect::PongScore => vec![Tone::new(Square, 600.0, 0.2, 0.1).lin(1000.0)],
            SoundEffect::PongOver => vec![Tone::new(Sawtooth, 100.0, 0.5, 0.4).exp(20.0)],
            SoundEffect::Slide => vec![Tone::new(Sine, 320.0, 0.08, 0.06).exp(450.0)],
            SoundEffect::LevelWin => [523.25, 659.25, 783.99, 1046.5]
                .iter()
                .enumerate()
                .map(|(i, &f)| Tone::new(Sine, f, 0.4, 0.1).after(i as f32 * 0.1))
                .collect(),
            SoundEffect::Solve => [261.63, 329.63, 392.0]
                .iter()
                .map(|&f| Tone::new(Sine, f, 0.8, 0.08))
                .collect(),
            SoundEffect::StackPlace => vec![Tone::new(Triangle, 350.0, 0.1, 0.15)],
            SoundEffect::StackPerfect(combo) => {
                let start = 500.0 + combo.min(15) as f32 * 40.0;
                vec![Tone::new(Sine, start, 0.2, 0.2).exp(1200.0)]
            }
            SoundEffect::StackOver => vec![Tone::new(Sawtooth, 100.0, 0.6, 0.3).exp(30.0)],
            SoundEffect::PaddleHit => vec![Tone::new(Square, 400.0, 0.1, 0.1).exp(800.0)],
            SoundEffect::BrickHit => vec![Tone::new(Sine, 300.0, 0.1, 0.1)],
            SoundEffect::BallLost => vec![Tone::new(Sawtooth, 100.0, 0.5, 0.3).exp(20.0)],
            SoundEffect::Turbo => vec![Tone::new(Sawtooth, 80.0, 0.5, 0.08).lin(350.0)],
            SoundEffect::Pass => vec![Tone::new(Sine, 500.0, 0.2, 0.03).exp(200.0)],
            SoundEffect::Crash => vec![Tone::new(Square, 60.0, 0.6, 0.3).exp(1.0)],
            SoundEffect::TypeKey => vec![Tone::new(Sine, 800.0, 0.05, 0.05).exp(1200.0)],
            SoundEffect::WordDestroyed => vec![Tone::new(Square, 400.0, 0.2, 0.1).exp(100.0)],
            SoundEffect::WordMissed => vec![Tone::new(Sawtooth, 150.0, 0.5, 0.3).lin(50.0)],
            SoundEffect::HighScore => [523.0, 659.0, 784.0, 1047.0, 1319.0]
                .iter()
                .enumerate()
                .map(|(i, &f)| Tone::new(Triangle, f, 0.25, 0.3).after(i as f32 * 0.1))
                .collect(),
        }
    }
}

/// Audio manager for the arcade
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Self {
        // No context outside a secure origin; cues are then skipped
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Copy volume and mute preferences
    pub fn apply_settings(&mut self, settings: &crate::Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Called on the first key or pointer press
    pub fn resume(&self) {
        #[cfg(target_arch = "wasm32")]
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = if vol.is_finite() { vol.clamp(0.0, 1.0) } else { 0.0 };
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = if vol.is_finite() { vol.clamp(0.0, 1.0) } else { 0.0 };
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Gain multiplier applied to every tone
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play every cue in order
    pub fn play_all(&self, effects: &[SoundEffect]) {
        for effect in effects {
            self.play(*effect);
        }
    }

    /// Schedule every tone of `effect` from now
    #[cfg(target_arch = "wasm32")]
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Autoplay policy leaves the context suspended until a gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        for tone in effect.tones() {
            self.play_tone(ctx, &tone, vol);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn play(&self, effect: SoundEffect) {
        if self.effective_volume() > 0.0 {
            log::debug!("sfx {:?}", effect);
        }
    }

    /// Oscillator wired through its own gain node to the destination
    #[cfg(target_arch = "wasm32")]
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

    #[cfg(target_arch = "wasm32")]
    fn play_tone(&self, ctx: &AudioContext, tone: &Tone, vol: f32) {
        let osc_type = match tone.wave {
            Wave::Sine => OscillatorType::Sine,
            Wave::Square => OscillatorType::Square,
            Wave::Sawtooth => OscillatorType::Sawtooth,
            Wave::Triangle => OscillatorType::Triangle,
        };
        let Some((osc, gain)) = self.create_osc(ctx, tone.freq, osc_type) else {
            return;
        };
        let t = ctx.current_time() + tone.delay as f64;
        let end = t + tone.duration as f64;

        gain.gain().set_value_at_time(tone.gain * vol, t).ok();
        gain.gain().exponential_ramp_to_value_at_time(0.001, end).ok();

        osc.frequency().set_value_at_time(tone.freq, t).ok();
        match tone.sweep {
            Sweep::Hold => {}
            Sweep::Linear => {
                osc.frequency()
                    .linear_ramp_to_value_at_time(tone.end_freq, end)
                    .ok();
            }
            Sweep::Exponential => {
                osc.frequency()
                    .exponential_ramp_to_value_at_time(tone.end_freq.max(0.01), end)
                    .ok();
            }
        }

        osc.start_with_when(t).ok();
        osc.stop_with_when(end).ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_cue_has_audible_tones() {
        let cues = [
            SoundEffect::Eat,
            SoundEffect::LevelWin,
            SoundEffect::StackPerfect(3),
            SoundEffect::Crash,
            SoundEffect::HighScore,
        ];
        for cue in cues {
            let tones = cue.tones();
            assert!(!tones.is_empty());
            assert!(tones.iter().all(|t| t.duration > 0.0 && t.gain > 0.0));
        }
    }

    #[test]
    fn test_stack_perfect_pitch_rises_with_combo() {
        let low = SoundEffect::StackPerfect(0).tones()[0].freq;
        let high = SoundEffect::StackPerfect(5).tones()[0].freq;
        assert!(high > low);
    }

    #[test]
    fn test_muted_volume_is_zero() {
        let mut audio = AudioManager::new();
        assert!(audio.effective_volume() > 0.0);
        audio.set_muted(true);
        assert_eq!(audio.effective_volume(), 0.0);
        audio.set_muted(false);
        audio.set_master_volume(f32::NAN);
        assert_eq!(audio.effective_volume(), 0.0);
    }
}
