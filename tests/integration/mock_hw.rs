//! Mock adapters for integration tests.
//!
//! Records every port call so tests can assert on the full output history
//! without a display, a remote player or an IoT agent.  The button pin and
//! clock share their state through `Rc` handles so a test can keep driving
//! them after they have been moved into the service or driver.

use std::cell::Cell;
use std::rc::Rc;

use embedded_hal::digital::{ErrorKind, ErrorType, InputPin};
use showersaver::app::events::AppEvent;
use showersaver::app::ports::{AudioPort, AudioTrack, DisplayPort, EventSink, TelemetryPort, TimePort};
use showersaver::drivers::colour::Colour;

// ── Port call record ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum PortCall {
    SetColour(Colour),
    Blend { from: Colour, to: Colour, fraction: f32 },
    WriteText(String),
    WriteStatus(String),
    ClearColour,
    ClearText,
    Play(AudioTrack),
    StopAudio,
    Upload(u32),
}

// ── MockPeripherals ───────────────────────────────────────────

pub struct MockPeripherals {
    pub calls: Vec<PortCall>,
}

#[allow(dead_code)]
impl MockPeripherals {
    pub fn new() -> Self {
        Self { calls: Vec::new() }
    }

    pub fn last_text(&self) -> Option<&str> {
        self.calls.iter().rev().find_map(|c| match c {
            PortCall::WriteText(t) => Some(t.as_str()),
            _ => None,
        })
    }

    pub fn last_status(&self) -> Option<&str> {
        self.calls.iter().rev().find_map(|c| match c {
            PortCall::WriteStatus(t) => Some(t.as_str()),
            _ => None,
        })
    }

    pub fn uploads(&self) -> Vec<u32> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PortCall::Upload(s) => Some(*s),
                _ => None,
            })
            .collect()
    }

    pub fn plays(&self) -> Vec<AudioTrack> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PortCall::Play(t) => Some(*t),
                _ => None,
            })
            .collect()
    }

    pub fn position(&self, call: &PortCall) -> Option<usize> {
        self.calls.iter().position(|c| c == call)
    }

    pub fn contains(&self, call: &PortCall) -> bool {
        self.position(call).is_some()
    }
}

impl Default for MockPeripherals {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayPort for MockPeripherals {
    fn set_colour(&mut self, colour: Colour) {
        self.calls.push(PortCall::SetColour(colour));
    }

    fn set_colour_blend(&mut self, from: Colour, to: Colour, fraction: f32) {
        self.calls.push(PortCall::Blend { from, to, fraction });
    }

    fn write_text(&mut self, text: &str) {
        self.calls.push(PortCall::WriteText(text.to_string()));
    }

    fn write_status(&mut self, text: &str) {
        self.calls.push(PortCall::WriteStatus(text.to_string()));
    }

    fn clear_colour(&mut self) {
        self.calls.push(PortCall::ClearColour);
    }

    fn clear_text(&mut self) {
        self.calls.push(PortCall::ClearText);
    }
}

impl AudioPort for MockPeripherals {
    fn play(&mut self, track: AudioTrack) {
        self.calls.push(PortCall::Play(track));
    }

    fn stop(&mut self) {
        self.calls.push(PortCall::StopAudio);
    }
}

impl TelemetryPort for MockPeripherals {
    fn upload_duration(&mut self, duration_secs: u32) {
        self.calls.push(PortCall::Upload(duration_secs));
    }
}

// ── MockPin ───────────────────────────────────────────────────

/// Scriptable button input.  Clones share the same level and counters.
#[derive(Clone, Default)]
pub struct MockPin {
    level: Rc<Cell<bool>>,
    failing: Rc<Cell<bool>>,
    reads: Rc<Cell<u32>>,
}

#[allow(dead_code)]
impl MockPin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_pressed(&self, pressed: bool) {
        self.level.set(pressed);
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    /// Number of raw reads so far.
    pub fn reads(&self) -> u32 {
        self.reads.get()
    }

    fn read(&self) -> Result<bool, ErrorKind> {
        self.reads.set(self.reads.get() + 1);
        if self.failing.get() {
            Err(ErrorKind::Other)
        } else {
            Ok(self.level.get())
        }
    }
}

impl ErrorType for MockPin {
    type Error = ErrorKind;
}

impl InputPin for MockPin {
    fn is_high(&mut self) -> Result<bool, ErrorKind> {
        self.read()
    }

    fn is_low(&mut self) -> Result<bool, ErrorKind> {
        self.read().map(|high| !high)
    }
}

// ── FakeClock ─────────────────────────────────────────────────

/// Clock that advances by `step_ms` every time it is read.
#[derive(Clone)]
pub struct FakeClock {
    now: Rc<Cell<u64>>,
    step_ms: u64,
}

#[allow(dead_code)]
impl FakeClock {
    pub fn stepping(step_ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(0)),
            step_ms,
        }
    }

    pub fn peek(&self) -> u64 {
        self.now.get()
    }
}

impl TimePort for FakeClock {
    fn now_ms(&self) -> u64 {
        let now = self.now.get();
        self.now.set(now + self.step_ms);
        now
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn ended(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::SessionEnded { duration_secs } => Some(*duration_secs),
                _ => None,
            })
            .collect()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
