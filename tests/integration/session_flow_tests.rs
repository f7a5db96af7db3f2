//! Integration tests for the button → AppService → FSM → ports pipeline.
//!
//! Time is driven explicitly: every test ticks the service on a 100 ms grid
//! starting from boot at t = 0, the same cadence the periodic driver uses.

use super::mock_hw::{MockPeripherals, MockPin, PortCall, RecordingSink};

use showersaver::app::events::AppEvent;
use showersaver::app::ports::AudioTrack;
use showersaver::app::service::AppService;
use showersaver::config::ShowerConfig;
use showersaver::drivers::button::ButtonDriver;
use showersaver::drivers::colour::Colour;
use showersaver::fsm::SessionState;

const TICK: u64 = 100;
/// First press, clear of the boot debounce window.
const T0: u64 = 2_000;

struct Rig {
    app: AppService,
    button: ButtonDriver<MockPin>,
    pin: MockPin,
    hw: MockPeripherals,
    sink: RecordingSink,
    now: u64,
}

impl Rig {
    fn new(config: ShowerConfig) -> Self {
        let pin = MockPin::new();
        let button = ButtonDriver::new(pin.clone(), config.debounce_ms, config.button_active_low);
        let mut app = AppService::new(&config, 0).unwrap();
        let mut hw = MockPeripherals::new();
        let mut sink = RecordingSink::new();
        app.start(0, &mut hw, &mut sink);
        Self {
            app,
            button,
            pin,
            hw,
            sink,
            now: 0,
        }
    }

    fn tick_at(&mut self, t: u64) {
        self.now = t;
        self.app
            .tick(t, &mut self.button, &mut self.hw, &mut self.sink);
    }

    /// Tick every 100 ms up to and including `t`.
    fn run_until(&mut self, t: u64) {
        while self.now + TICK <= t {
            let next = self.now + TICK;
            self.tick_at(next);
        }
    }

    /// Hold the button for exactly the tick at `t`.
    fn press_at(&mut self, t: u64) {
        self.run_until(t - TICK);
        self.pin.set_pressed(true);
        self.tick_at(t);
        self.pin.set_pressed(false);
    }

    fn transitions(&self) -> Vec<(SessionState, SessionState)> {
        self.sink
            .events
            .iter()
            .filter_map(|e| match e {
                AppEvent::StateChanged { from, to } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }
}

fn rig() -> Rig {
    Rig::new(ShowerConfig::default())
}

// ── Boot ──────────────────────────────────────────────────────

#[test]
fn boot_clears_display_and_stays_off() {
    let r = rig();
    assert_eq!(r.app.state(), SessionState::Off);
    assert_eq!(r.hw.calls, [PortCall::ClearColour, PortCall::ClearText]);
    assert_eq!(r.sink.events, [AppEvent::Started(SessionState::Off)]);
}

#[test]
fn no_reads_inside_boot_window() {
    let mut r = rig();
    r.run_until(1_000);
    assert_eq!(r.pin.reads(), 0);
    r.run_until(1_100);
    assert_eq!(r.pin.reads(), 1);
}

// ── Full session ──────────────────────────────────────────────

#[test]
fn full_session_walks_every_phase() {
    let mut r = rig();

    r.press_at(T0);
    assert_eq!(r.app.state(), SessionState::Started);
    assert_eq!(r.app.session_start_ms(), Some(T0));
    assert_eq!(r.hw.last_text(), Some("SHOWERING!"));
    assert_eq!(r.hw.plays(), [AudioTrack::Default]);

    r.run_until(T0 + 14_900);
    assert_eq!(r.app.state(), SessionState::Started);
    assert_eq!(r.hw.last_status(), Some("00:15"));

    r.run_until(T0 + 15_000);
    assert_eq!(r.app.state(), SessionState::Warned);
    assert_eq!(r.hw.last_text(), Some("WARNING!"));

    r.run_until(T0 + 29_900);
    assert_eq!(r.app.state(), SessionState::Warned);

    r.run_until(T0 + 30_000);
    assert_eq!(r.app.state(), SessionState::Punished);
    assert_eq!(r.hw.last_text(), Some("NICKELBACK!"));
    assert!(r.hw.contains(&PortCall::SetColour(Colour::Red)));
    assert_eq!(r.hw.plays(), [AudioTrack::Default, AudioTrack::Alternate]);

    r.press_at(T0 + 42_400);
    assert_eq!(r.app.state(), SessionState::Off);
    assert!(!r.app.is_active());
    assert_eq!(r.app.session_start_ms(), None);
    assert_eq!(r.hw.uploads(), [42]);
    assert_eq!(r.app.last_duration_secs(), Some(42));
    assert_eq!(r.hw.last_text(), Some("DURATION:"));
    assert_eq!(r.hw.last_status(), Some("00:42"));
    assert!(r.hw.contains(&PortCall::StopAudio));
    assert_eq!(r.sink.ended(), [42]);

    let before_grace = r.hw.calls.len();
    r.run_until(T0 + 42_400 + 2_900);
    assert!(!r.hw.calls[before_grace..].contains(&PortCall::ClearText));

    r.run_until(T0 + 42_400 + 3_000);
    let after = &r.hw.calls[before_grace..];
    assert!(after.contains(&PortCall::ClearColour));
    assert!(after.contains(&PortCall::ClearText));
    assert_eq!(r.app.state(), SessionState::Off);
    assert_eq!(r.app.pending_delays(), 0);

    assert_eq!(
        r.transitions(),
        [
            (SessionState::Off, SessionState::Started),
            (SessionState::Started, SessionState::Warned),
            (SessionState::Warned, SessionState::Punished),
            (SessionState::Punished, SessionState::Off),
        ]
    );
}

#[test]
fn progress_precedes_stop_sequence_within_a_tick() {
    let mut r = rig();
    r.press_at(T0);
    r.run_until(T0 + 5_000);

    let mark = r.hw.calls.len();
    r.press_at(T0 + 5_100);
    let tick = &r.hw.calls[mark..];

    assert!(matches!(
        tick[0],
        PortCall::Blend {
            from: Colour::Green,
            to: Colour::Yellow,
            ..
        }
    ));
    assert_eq!(tick[1], PortCall::WriteStatus("00:05".into()));
    assert_eq!(
        &tick[2..],
        [
            PortCall::StopAudio,
            PortCall::SetColour(Colour::Green),
            PortCall::WriteText("DURATION:".into()),
            PortCall::WriteStatus("00:05".into()),
            PortCall::Upload(5),
        ]
    );
}

#[test]
fn stopping_before_warn_never_warns() {
    let mut r = rig();
    r.press_at(T0);
    r.press_at(T0 + 10_000);
    r.run_until(T0 + 60_000);

    assert_eq!(r.app.state(), SessionState::Off);
    assert!(!r.hw.contains(&PortCall::WriteText("WARNING!".into())));
    assert_eq!(r.hw.uploads(), [10]);
}

#[test]
fn restart_during_grace_cancels_the_clear() {
    let mut r = rig();
    r.press_at(T0);
    r.press_at(T0 + 5_000);
    assert_eq!(r.app.state(), SessionState::Off);

    r.press_at(T0 + 6_500);
    assert_eq!(r.app.state(), SessionState::Started);
    let restarted = r.hw.calls.len();

    r.run_until(T0 + 9_000);
    assert!(!r.hw.calls[restarted..].contains(&PortCall::ClearText));
    assert_eq!(r.app.pending_delays(), 1);

    r.run_until(T0 + 6_500 + 15_000);
    assert_eq!(r.app.state(), SessionState::Warned);
}

// ── Debounce ──────────────────────────────────────────────────

#[test]
fn held_button_is_not_read_inside_window() {
    let mut r = rig();
    r.run_until(T0 - TICK);
    r.pin.set_pressed(true);
    r.tick_at(T0);
    assert_eq!(r.app.state(), SessionState::Started);

    let reads = r.pin.reads();
    r.run_until(T0 + 1_000);
    assert_eq!(r.pin.reads(), reads);
    assert_eq!(r.app.state(), SessionState::Started);

    // Still held once the window has passed: that is a second press.
    r.run_until(T0 + 1_100);
    assert_eq!(r.pin.reads(), reads + 1);
    assert_eq!(r.app.state(), SessionState::Off);
}

#[test]
fn failed_reads_are_no_press() {
    let mut r = rig();
    r.pin.set_failing(true);
    r.pin.set_pressed(true);
    r.run_until(5_000);
    assert_eq!(r.app.state(), SessionState::Off);
    assert!(r.pin.reads() > 0);

    r.pin.set_failing(false);
    r.run_until(5_100);
    assert_eq!(r.app.state(), SessionState::Started);
}

#[test]
fn active_low_button() {
    let config = ShowerConfig {
        button_active_low: true,
        ..ShowerConfig::default()
    };
    let mut r = Rig::new(config);
    // Line high = released on an active-low board.
    r.pin.set_pressed(true);
    r.run_until(3_000);
    assert_eq!(r.app.state(), SessionState::Off);

    r.pin.set_pressed(false);
    r.run_until(3_100);
    assert_eq!(r.app.state(), SessionState::Started);
}

// ── Thresholds ────────────────────────────────────────────────

#[test]
fn zero_warn_warns_on_next_tick() {
    let config = ShowerConfig {
        warn_duration_secs: 0,
        goal_duration_secs: 5,
        ..ShowerConfig::default()
    };
    let mut r = Rig::new(config);
    r.press_at(T0);
    assert_eq!(r.app.state(), SessionState::Started);

    r.run_until(T0 + TICK);
    assert_eq!(r.app.state(), SessionState::Warned);

    // Punish counts from when Warn was due, not from the tick that saw it.
    r.run_until(T0 + 4_900);
    assert_eq!(r.app.state(), SessionState::Warned);
    r.run_until(T0 + 5_000);
    assert_eq!(r.app.state(), SessionState::Punished);
}

#[test]
fn fraction_clamps_past_goal() {
    let mut r = rig();
    r.press_at(T0);
    r.run_until(T0 + 90_000);

    let last_blend = r.hw.calls.iter().rev().find_map(|c| match c {
        PortCall::Blend { from, to, fraction } => Some((*from, *to, *fraction)),
        _ => None,
    });
    assert_eq!(last_blend, Some((Colour::Yellow, Colour::Red, 1.0)));
    assert_eq!(r.hw.last_status(), Some("01:30"));
}
