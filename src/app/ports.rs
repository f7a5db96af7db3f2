//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (display, audio, telemetry, event sinks, config) implement
//! these traits.  The [`AppService`](super::service::AppService) consumes them
//! via generics, so the domain core never touches hardware or processes
//! directly.  The button input is not a port of its own: it is any
//! [`embedded_hal::digital::InputPin`], wrapped by
//! [`ButtonDriver`](crate::drivers::button::ButtonDriver).
//!
//! ## Failure model
//!
//! Output ports return nothing.  They are fire-and-forget: an adapter that
//! fails logs the failure and returns, and the session timer carries on.

use crate::config::ShowerConfig;
use crate::drivers::colour::Colour;

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → LCD)
// ───────────────────────────────────────────────────────────────

/// Two-row character LCD with an RGB backlight.
pub trait DisplayPort {
    /// Solid backlight colour.
    fn set_colour(&mut self, colour: Colour);

    /// Backlight blended between two colours, `fraction` in `[0, 1]`.
    fn set_colour_blend(&mut self, from: Colour, to: Colour, fraction: f32);

    /// Replace the message on the top row.
    fn write_text(&mut self, text: &str);

    /// Replace the status line (bottom row, used for the timer).
    fn write_status(&mut self, text: &str);

    /// Backlight off.
    fn clear_colour(&mut self);

    /// Blank both rows.
    fn clear_text(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Audio port (driven adapter: domain → remote player)
// ───────────────────────────────────────────────────────────────

/// Which track to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioTrack {
    /// Played when a session starts.
    Default,
    /// Played when the goal is exceeded.
    Alternate,
}

pub trait AudioPort {
    /// Stop whatever is playing and start `track`.
    fn play(&mut self, track: AudioTrack);

    /// Stop playback.
    fn stop(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Telemetry port (driven adapter: domain → cloud)
// ───────────────────────────────────────────────────────────────

pub trait TelemetryPort {
    /// Upload a finished session's duration in whole seconds.
    fn upload_duration(&mut self, duration_secs: u32);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Time port (driven adapter: domain ← monotonic clock)
// ───────────────────────────────────────────────────────────────

pub trait TimePort {
    /// Milliseconds since an arbitrary fixed point.  Never goes backwards.
    fn now_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ← config file)
// ───────────────────────────────────────────────────────────────

/// Loads system configuration.
///
/// Implementations MUST validate before returning: invalid ranges are
/// reported as [`ConfigError::ValidationFailed`], not silently clamped.
pub trait ConfigPort {
    fn load(&self) -> Result<ShowerConfig, ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No config found (first run).
    NotFound,
    /// Stored config failed deserialization.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the backing store.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}
