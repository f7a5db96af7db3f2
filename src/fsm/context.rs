//! Shared mutable context threaded through every FSM handler.
//!
//! `SessionContext` is the single struct that state handlers read from and
//! write to: the current time, the session clock, the thresholds, the
//! debounce state and the outstanding delayed transition.  Handlers never
//! call collaborators directly.  They queue [`Effect`]s, and the
//! application service applies them in order once the handler returns.

use heapless::Vec;
use log::warn;

use crate::app::ports::AudioTrack;
use crate::config::DurationThresholds;
use crate::drivers::button::DebounceState;
use crate::drivers::colour::Colour;
use crate::progress;
use crate::scheduler::{DelayPurpose, PendingTransition};

/// Maximum effects a single transition may queue.
pub const MAX_EFFECTS: usize = 8;

// ---------------------------------------------------------------------------
// Effects (written by state handlers; applied by the service)
// ---------------------------------------------------------------------------

/// One side effect requested by a state handler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    SetColour(Colour),
    ClearColour,
    WriteText(&'static str),
    /// Write the final `MM:SS` of a stopped session to the status line.
    WriteDuration(u32),
    ClearText,
    PlayAudio(AudioTrack),
    StopAudio,
    UploadDuration(u32),
    /// Cancel the outstanding delayed transition.
    CancelPending,
    /// Replace the outstanding delayed transition.
    Schedule {
        purpose: DelayPurpose,
        after_ms: u64,
    },
}

// ---------------------------------------------------------------------------
// Session clock
// ---------------------------------------------------------------------------

/// Start time of the running session; `None` exactly while the state is
/// `Off`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionClock {
    start_ms: Option<u64>,
}

impl SessionClock {
    pub fn start(&mut self, now_ms: u64) {
        self.start_ms = Some(now_ms);
    }

    /// Clear the clock, returning the rounded elapsed seconds if a session
    /// was running.
    pub fn stop(&mut self, now_ms: u64) -> Option<u64> {
        self.start_ms
            .take()
            .map(|start| progress::elapsed_secs(now_ms, start))
    }

    pub fn start_ms(&self) -> Option<u64> {
        self.start_ms
    }
}

// ---------------------------------------------------------------------------
// SessionContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct SessionContext {
    // -- Timing --
    /// Time of the event being handled (milliseconds, monotonic).
    pub now_ms: u64,
    /// Session start time.
    pub clock: SessionClock,

    // -- Configuration --
    pub thresholds: DurationThresholds,
    pub grace_period_ms: u64,

    // -- Input --
    /// Last accepted button press.  Mutated only by the sampler.
    pub debounce: DebounceState,

    // -- Delayed transition --
    pub pending: PendingTransition,

    // -- Outputs --
    /// Effects queued by the current handler.
    pub effects: Vec<Effect, MAX_EFFECTS>,
    /// Duration of the most recently stopped session.
    pub last_duration_secs: Option<u32>,
}

impl SessionContext {
    pub fn new(thresholds: DurationThresholds, grace_period_ms: u32, boot_ms: u64) -> Self {
        Self {
            now_ms: boot_ms,
            clock: SessionClock::default(),
            thresholds,
            grace_period_ms: u64::from(grace_period_ms),
            debounce: DebounceState::new(boot_ms),
            pending: PendingTransition::new(),
            effects: Vec::new(),
            last_duration_secs: None,
        }
    }

    /// Queue a side effect.
    pub fn emit(&mut self, effect: Effect) {
        if self.effects.push(effect).is_err() {
            warn!("FSM: effect queue full, dropping {:?}", effect);
        }
    }

    /// Take every queued effect, leaving the queue empty.
    pub fn take_effects(&mut self) -> Vec<Effect, MAX_EFFECTS> {
        core::mem::take(&mut self.effects)
    }

    /// Rounded seconds since the session started, if one is running.
    pub fn elapsed_secs(&self) -> Option<u64> {
        self.clock
            .start_ms()
            .map(|start| progress::elapsed_secs(self.now_ms, start))
    }
}
