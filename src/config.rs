//! System configuration parameters
//!
//! All tunable parameters for the Shower Saver controller.
//! Values can be overridden from a JSON file; any field left out of the
//! file keeps its default.

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;
use crate::pins;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowerConfig {
    // --- Session thresholds ---
    /// Seconds from session start until the warning phase
    pub warn_duration_secs: u32,
    /// Seconds from session start until the punishment phase
    pub goal_duration_secs: u32,

    // --- Timing ---
    /// Minimum time between two accepted button presses (milliseconds)
    pub debounce_ms: u32,
    /// Periodic driver tick interval (milliseconds)
    pub tick_interval_ms: u32,
    /// How long the final duration stays on the display (milliseconds)
    pub grace_period_ms: u32,

    // --- Input ---
    /// GPIO number of the session button
    pub button_gpio: u32,
    /// True if the button pulls the line low when pressed
    pub button_active_low: bool,

    // --- Collaborators ---
    pub audio: AudioConfig,
    pub telemetry: TelemetryConfig,
}

/// Remote audio playback over ssh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// `user@host` running the player
    pub ssh_target: String,
    /// Player invocation, track path appended
    pub player_command: String,
    /// Process name passed to `pkill` before playing and on stop
    pub kill_pattern: String,
    /// Track played when a session starts
    pub default_track: String,
    /// Track played on punishment
    pub alternate_track: String,
}

/// Duration upload through the IoT agent CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub program: String,
    pub metric: String,
}

impl Default for ShowerConfig {
    fn default() -> Self {
        Self {
            // Thresholds
            warn_duration_secs: 15,
            goal_duration_secs: 30,

            // Timing
            debounce_ms: 1000,
            tick_interval_ms: 100, // 10 Hz
            grace_period_ms: 3000,

            // Input
            button_gpio: pins::BUTTON_GPIO,
            button_active_low: false,

            audio: AudioConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            ssh_target: "chris@192.168.5.26".into(),
            player_command: "/Applications/VLC.app/Contents/MacOS/VLC -I dummy".into(),
            kill_pattern: "VLC".into(),
            default_track: "~/songs/random.mp3".into(),
            alternate_track: "~/songs/nickel.mp3".into(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            program: "iotkit-admin".into(),
            metric: "ShowerDuration".into(),
        }
    }
}

impl ShowerConfig {
    /// Range-check every field.  Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds()?;
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "tick_interval_ms must be positive",
            ));
        }
        if self.audio.ssh_target.trim().is_empty() {
            return Err(ConfigError::ValidationFailed("audio.ssh_target is empty"));
        }
        if self.audio.player_command.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "audio.player_command is empty",
            ));
        }
        if self.telemetry.program.trim().is_empty() {
            return Err(ConfigError::ValidationFailed("telemetry.program is empty"));
        }
        Ok(())
    }

    /// Session thresholds derived from this config.
    pub fn thresholds(&self) -> Result<DurationThresholds, ConfigError> {
        DurationThresholds::new(self.warn_duration_secs, self.goal_duration_secs)
    }
}

/// Immutable warn/goal pair.  `goal > warn` is guaranteed by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationThresholds {
    warn_secs: u32,
    goal_secs: u32,
}

impl DurationThresholds {
    pub fn new(warn_secs: u32, goal_secs: u32) -> Result<Self, ConfigError> {
        if goal_secs <= warn_secs {
            return Err(ConfigError::ValidationFailed(
                "goal_duration_secs must exceed warn_duration_secs",
            ));
        }
        Ok(Self {
            warn_secs,
            goal_secs,
        })
    }

    pub fn warn_secs(&self) -> u32 {
        self.warn_secs
    }

    pub fn goal_secs(&self) -> u32 {
        self.goal_secs
    }

    /// Time spent in the warned phase before punishment.
    pub fn punish_secs(&self) -> u32 {
        self.goal_secs - self.warn_secs
    }

    pub fn warn_ms(&self) -> u64 {
        u64::from(self.warn_secs) * 1000
    }

    pub fn punish_ms(&self) -> u64 {
        u64::from(self.punish_secs()) * 1000
    }
}
