//! Peripheral adapter: bridges the concrete collaborators to the domain
//! port traits.
//!
//! Owns the display, the remote audio player and the telemetry uploader,
//! exposing them together so the service can borrow every output port
//! through one `&mut`.

use crate::app::ports::{AudioPort, AudioTrack, DisplayPort, TelemetryPort};
use crate::config::ShowerConfig;
use crate::drivers::colour::Colour;

use super::display::LogDisplay;
use super::remote_audio::RemoteAudio;
use super::telemetry::IotkitTelemetry;

/// Concrete adapter that combines all output collaborators behind port
/// traits.
pub struct Peripherals {
    display: LogDisplay,
    audio: RemoteAudio,
    telemetry: IotkitTelemetry,
}

impl Peripherals {
    pub fn new(display: LogDisplay, audio: RemoteAudio, telemetry: IotkitTelemetry) -> Self {
        Self {
            display,
            audio,
            telemetry,
        }
    }

    /// Build every collaborator from configuration.
    pub fn from_config(config: &ShowerConfig) -> Self {
        Self::new(
            LogDisplay::new(),
            RemoteAudio::new(config.audio.clone()),
            IotkitTelemetry::new(config.telemetry.clone()),
        )
    }

    pub fn display(&self) -> &LogDisplay {
        &self.display
    }
}

// ── DisplayPort implementation ────────────────────────────────

impl DisplayPort for Peripherals {
    fn set_colour(&mut self, colour: Colour) {
        self.display.set_colour(colour);
    }

    fn set_colour_blend(&mut self, from: Colour, to: Colour, fraction: f32) {
        self.display.set_colour_blend(from, to, fraction);
    }

    fn write_text(&mut self, text: &str) {
        self.display.write_text(text);
    }

    fn write_status(&mut self, text: &str) {
        self.display.write_status(text);
    }

    fn clear_colour(&mut self) {
        self.display.clear_colour();
    }

    fn clear_text(&mut self) {
        self.display.clear_text();
    }
}

// ── AudioPort implementation ──────────────────────────────────

impl AudioPort for Peripherals {
    fn play(&mut self, track: AudioTrack) {
        self.audio.play(track);
    }

    fn stop(&mut self) {
        self.audio.stop();
    }
}

// ── TelemetryPort implementation ──────────────────────────────

impl TelemetryPort for Peripherals {
    fn upload_duration(&mut self, duration_secs: u32) {
        self.telemetry.upload_duration(duration_secs);
    }
}
