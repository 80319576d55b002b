//! Startup configuration
//!
//! Supplied once when the world is built and immutable afterwards. Stored as
//! JSON so a driver can ship tuned values next to the binary.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;
use crate::play_height_for_screen;

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Play area ===
    /// Logical width of the play area
    pub play_width: f32,
    /// Logical height of the play area (derived from the screen aspect ratio)
    pub play_height: f32,
    /// Size of one block
    pub block: f32,

    // === Rules ===
    /// Points needed to end the round
    pub max_points: u32,
    /// Seconds the Ready state waits before play starts
    pub ready_wait_secs: f32,

    // === Ball ===
    /// Ball acceleration magnitude
    pub ball_acceleration: f32,
    /// Speed-up per second of rally time
    pub ball_velocity_ratio: f32,

    // === CPU ===
    /// Lowest CPU speed multiplier (inclusive)
    pub cpu_min_random: u32,
    /// Highest CPU speed multiplier (inclusive)
    pub cpu_max_random: u32,
    /// Seed for the CPU random source
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Play area
            play_width: PLAY_WIDTH,
            play_height: DEFAULT_PLAY_HEIGHT,
            block: BLOCK,

            // Rules
            max_points: MAX_POINTS,
            ready_wait_secs: READY_WAIT_SECS,

            // Ball
            ball_acceleration: BALL_ACCELERATION,
            ball_velocity_ratio: BALL_VELOCITY_RATIO,

            // CPU
            cpu_min_random: CPU_MIN_RANDOM_VALUE,
            cpu_max_random: CPU_MAX_RANDOM_VALUE,
            seed: 12345,
        }
    }
}

impl Settings {
    /// Default settings with the play height fitted to a screen
    pub fn for_screen(screen_width: f32, screen_height: f32) -> Self {
        let mut settings = Self::default();
        settings.play_height = play_height_for_screen(settings.play_width, screen_width, screen_height);
        settings
    }

    /// Height of a paddle
    pub fn paddle_height(&self) -> f32 {
        self.block * PADDLE_BLOCKS
    }

    /// Number of dashes in the center line
    pub fn border_block_count(&self) -> usize {
        (self.play_height / (self.block * 2.0)) as usize
    }

    /// Check every field; the world trusts validated settings
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), SettingsError> {
            Err(SettingsError::Invalid { field, reason })
        }

        if !(self.block.is_finite() && self.block > 0.0) {
            return invalid("block", "must be positive");
        }
        if !(self.play_width.is_finite() && self.play_width >= self.block * 8.0) {
            return invalid("play_width", "must fit at least 8 blocks");
        }
        if !(self.play_height.is_finite() && self.play_height >= self.block * 6.0) {
            return invalid("play_height", "must fit at least 6 blocks");
        }
        if self.max_points == 0 {
            return invalid("max_points", "must be at least 1");
        }
        if !(self.ready_wait_secs.is_finite() && self.ready_wait_secs >= 0.0) {
            return invalid("ready_wait_secs", "must not be negative");
        }
        if !(self.ball_acceleration.is_finite() && self.ball_acceleration > 0.0) {
            return invalid("ball_acceleration", "must be positive");
        }
        if !(self.ball_velocity_ratio.is_finite() && self.ball_velocity_ratio >= 0.0) {
            return invalid("ball_velocity_ratio", "must not be negative");
        }
        if self.cpu_min_random == 0 {
            return invalid("cpu_min_random", "must be at least 1");
        }
        if self.cpu_min_random > self.cpu_max_random {
            return invalid("cpu_max_random", "must not be below cpu_min_random");
        }
        Ok(())
    }

    /// Parse and validate settings from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.paddle_height(), 32.0);
        assert_eq!(settings.border_block_count(), 15);
    }

    #[test]
    fn test_for_screen_derives_height() {
        let settings = Settings::for_screen(1280.0, 720.0);
        assert_eq!(settings.play_height, 225.0);
        assert_eq!(settings.play_width, PLAY_WIDTH);
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let settings = Settings::from_json(r#"{ "max_points": 3, "seed": 7 }"#).unwrap();
        assert_eq!(settings.max_points, 3);
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.ball_acceleration, BALL_ACCELERATION);
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = Settings::for_screen(800.0, 600.0);
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_rejects_inverted_cpu_bounds() {
        let err = Settings::from_json(r#"{ "cpu_min_random": 6, "cpu_max_random": 2 }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid {
                field: "cpu_max_random",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_zero_max_points() {
        let settings = Settings {
            max_points: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
        assert!(err.to_string().starts_with("settings are not valid JSON"));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Settings::load("/nonexistent/retro-pong/settings.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("retro-pong-settings-{}.json", std::process::id()));
        let settings = Settings {
            seed: 99,
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }
}
