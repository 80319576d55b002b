//! Retro Pong - a classic two-paddle arcade simulation
//!
//! Core modules:
//! - `sim`: Simulation core (motion, collisions, CPU opponent, world state machine)
//! - `settings`: Startup configuration with JSON load/save
//! - `audio`: Notification channel to the sound collaborator
//!
//! Rendering, asset generation and input routing live outside this crate. They
//! talk to the core through [`sim::World`] and [`sim::Session`].

pub mod audio;
pub mod error;
pub mod settings;
pub mod sim;

pub use audio::{EffectLog, LogSink, Silent, SoundEffect, SoundSink};
pub use error::SettingsError;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep for the frame driver (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Logical play-area width; height follows the screen aspect ratio
    pub const PLAY_WIDTH: f32 = 400.0;
    /// Play height for a 5:3 landscape screen
    pub const DEFAULT_PLAY_HEIGHT: f32 = 240.0;
    /// Size of one block (ball, paddle width, border and wall thickness)
    pub const BLOCK: f32 = 8.0;

    /// Points needed to end a round
    pub const MAX_POINTS: u32 = 10;

    /// Ball acceleration magnitude on both axes
    pub const BALL_ACCELERATION: f32 = 100.0;
    /// Speed-up per second of rally time
    pub const BALL_VELOCITY_RATIO: f32 = 0.1;

    /// Bounds (inclusive) of the CPU paddle speed multiplier
    pub const CPU_MIN_RANDOM_VALUE: u32 = 3;
    pub const CPU_MAX_RANDOM_VALUE: u32 = 5;

    /// Countdown before play starts in the Ready state
    pub const READY_WAIT_SECS: f32 = 3.0;

    /// Paddle height in blocks
    pub const PADDLE_BLOCKS: f32 = 4.0;
}

/// Play-area height for a screen of the given pixel size
///
/// The logical width is fixed, so the height scales with the aspect ratio.
#[inline]
pub fn play_height_for_screen(play_width: f32, screen_width: f32, screen_height: f32) -> f32 {
    play_width * (screen_height / screen_width)
}
