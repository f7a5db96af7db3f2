//! Application service, the hexagonal core.
//!
//! [`AppService`] owns the session FSM, the delay scheduler and the shared
//! context.  It exposes a clean, hardware-agnostic API.  All I/O flows
//! through port traits injected at call sites, making the entire service
//! testable with mock adapters.
//!
//! ```text
//!  ButtonDriver ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                   │        AppService         │
//!   DisplayPort ◀── │  FSM · Delays · Progress  │ ──▶ AudioPort
//!                   └──────────────────────────┘ ──▶ TelemetryPort
//! ```

use embedded_hal::digital::InputPin;
use log::{debug, info};

use crate::config::ShowerConfig;
use crate::drivers::button::ButtonDriver;
use crate::fsm::context::{Effect, SessionContext};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, SessionEvent, SessionState};
use crate::progress;
use crate::scheduler::DelayScheduler;

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{AudioPort, ConfigError, DisplayPort, EventSink, TelemetryPort};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    fsm: Fsm,
    ctx: SessionContext,
    delays: DelayScheduler,
    tick_count: u64,
}

impl AppService {
    /// Construct the service from configuration.
    ///
    /// Fails if the thresholds are invalid.  Does **not** start the FSM;
    /// call [`start`](Self::start) next.
    pub fn new(config: &ShowerConfig, boot_ms: u64) -> Result<Self, ConfigError> {
        let thresholds = config.thresholds()?;
        let ctx = SessionContext::new(thresholds, config.grace_period_ms, boot_ms);
        let fsm = Fsm::new(build_state_table(), SessionState::Off);

        Ok(Self {
            fsm,
            ctx,
            delays: DelayScheduler::new(),
            tick_count: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Enter `Off` and blank the display.
    pub fn start(
        &mut self,
        now_ms: u64,
        hw: &mut (impl DisplayPort + AudioPort + TelemetryPort),
        sink: &mut impl EventSink,
    ) {
        self.ctx.now_ms = now_ms;
        self.fsm.start(&mut self.ctx);
        self.apply_effects(hw);
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!("AppService started in {:?}", self.fsm.current_state());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one cycle: due delays → progress display → button → transition.
    ///
    /// The `hw` parameter satisfies every output port at once, so one
    /// mutable borrow covers the whole port boundary.
    pub fn tick<P: InputPin>(
        &mut self,
        now_ms: u64,
        button: &mut ButtonDriver<P>,
        hw: &mut (impl DisplayPort + AudioPort + TelemetryPort),
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;
        self.ctx.now_ms = now_ms;

        // 1. Delayed transitions that came due since the last tick, each
        //    handled at its due time so follow-up delays do not drift
        while let Some(fired) = self.delays.pop_due(now_ms) {
            self.ctx.pending.fired(fired.handle);
            self.ctx.now_ms = fired.due_ms;
            self.dispatch(SessionEvent::DelayFired(fired.purpose), hw, sink);
        }
        self.ctx.now_ms = now_ms;

        // 2. Progress display, before any press can change the state
        if self.fsm.current_state().is_active() {
            if let Some(start_ms) = self.ctx.clock.start_ms() {
                let p = progress::update(now_ms, start_ms, &self.ctx.thresholds);
                debug!(
                    "Progress: {} {:?} {:.2} ({} -> {})",
                    p.text,
                    p.phase,
                    p.fraction,
                    p.from.name(),
                    p.to.name()
                );
                hw.set_colour_blend(p.from, p.to, p.fraction);
                hw.write_status(&p.text);
            }
        }

        // 3. Debounced button
        if button.sample(now_ms, &mut self.ctx.debounce) {
            debug!("Button press accepted at {} ms", now_ms);
            // 4. Toggle the session
            self.handle_command(AppCommand::TogglePress, hw, sink);
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command.
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        hw: &mut (impl DisplayPort + AudioPort + TelemetryPort),
        sink: &mut impl EventSink,
    ) {
        match cmd {
            AppCommand::TogglePress => self.dispatch(SessionEvent::Press, hw, sink),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.fsm.current_state()
    }

    /// A session is running.
    pub fn is_active(&self) -> bool {
        self.fsm.current_state().is_active()
    }

    /// Total ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Duration of the most recently stopped session.
    pub fn last_duration_secs(&self) -> Option<u32> {
        self.ctx.last_duration_secs
    }

    /// Start time of the running session.
    pub fn session_start_ms(&self) -> Option<u64> {
        self.ctx.clock.start_ms()
    }

    /// Number of live scheduled delays (0 or 1 in steady state).
    pub fn pending_delays(&self) -> usize {
        self.delays.pending_count()
    }

    // ── Internal ──────────────────────────────────────────────

    fn dispatch(
        &mut self,
        event: SessionEvent,
        hw: &mut (impl DisplayPort + AudioPort + TelemetryPort),
        sink: &mut impl EventSink,
    ) {
        let transition = self.fsm.dispatch(event, &mut self.ctx);
        self.apply_effects(hw);
        if let Some((from, to)) = transition {
            self.emit_transition(from, to, sink);
        }
    }

    fn emit_transition(&self, from: SessionState, to: SessionState, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::StateChanged { from, to });
        if to == SessionState::Off {
            if let Some(duration_secs) = self.ctx.last_duration_secs {
                sink.emit(&AppEvent::SessionEnded { duration_secs });
            }
        }
    }

    /// Translate queued FSM effects into port and scheduler calls, in
    /// the order the handler queued them.
    fn apply_effects(&mut self, hw: &mut (impl DisplayPort + AudioPort + TelemetryPort)) {
        for effect in self.ctx.take_effects() {
            match effect {
                Effect::SetColour(colour) => hw.set_colour(colour),
                Effect::ClearColour => hw.clear_colour(),
                Effect::WriteText(text) => hw.write_text(text),
                Effect::WriteDuration(secs) => {
                    hw.write_status(&progress::format_mm_ss(u64::from(secs)));
                }
                Effect::ClearText => hw.clear_text(),
                Effect::PlayAudio(track) => hw.play(track),
                Effect::StopAudio => hw.stop(),
                Effect::UploadDuration(secs) => hw.upload_duration(secs),
                Effect::CancelPending => self.ctx.pending.cancel(&mut self.delays),
                Effect::Schedule { purpose, after_ms } => {
                    let now_ms = self.ctx.now_ms;
                    self.ctx
                        .pending
                        .replace(&mut self.delays, now_ms, after_ms, purpose);
                }
            }
        }
    }
}
