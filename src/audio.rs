//! Sound notification channel
//!
//! The simulation never plays audio itself. It reports cues to a [`SoundSink`]
//! owned by the world, and the platform layer decides what to do with them.

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Menu button pressed (emitted by the UI layer)
    Button,
    /// Ball hits top or bottom wall
    WallHit,
    /// Ball hits a paddle
    PaddleHit,
    /// A paddle scored
    Point,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 4] = [
        SoundEffect::Button,
        SoundEffect::WallHit,
        SoundEffect::PaddleHit,
        SoundEffect::Point,
    ];

    /// Sine tone for this cue as (frequency in Hz, duration in seconds)
    pub fn tone(self) -> (f32, f32) {
        match self {
            SoundEffect::Button => (600.0, 0.1),
            SoundEffect::WallHit => (226.0, 0.016),
            SoundEffect::PaddleHit => (459.0, 0.096),
            SoundEffect::Point => (490.0, 0.257),
        }
    }
}

/// Receiver of sound cues, called synchronously from inside a world update
pub trait SoundSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Discards every cue
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl SoundSink for Silent {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Records cues in order
#[derive(Debug, Clone, Default)]
pub struct EffectLog {
    effects: Vec<SoundEffect>,
}

impl EffectLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn effects(&self) -> &[SoundEffect] {
        &self.effects
    }

    /// Number of times `effect` was played
    pub fn count(&self, effect: SoundEffect) -> usize {
        self.effects.iter().filter(|e| **e == effect).count()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }
}

impl SoundSink for EffectLog {
    fn play(&mut self, effect: SoundEffect) {
        self.effects.push(effect);
    }
}

/// Writes each cue to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl SoundSink for LogSink {
    fn play(&mut self, effect: SoundEffect) {
        let (freq, duration) = effect.tone();
        log::debug!("sound {:?} ({} Hz, {} s)", effect, freq, duration);
    }
}

impl<S: SoundSink + ?Sized> SoundSink for &mut S {
    fn play(&mut self, effect: SoundEffect) {
        (**self).play(effect);
    }
}

impl<S: SoundSink + ?Sized> SoundSink for Box<S> {
    fn play(&mut self, effect: SoundEffect) {
        (**self).play(effect);
    }
}
