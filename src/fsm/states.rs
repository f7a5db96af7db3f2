//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers, with no closures and no
//! heap.  Handlers only touch the [`SessionContext`]; anything
//! that reaches the outside world is queued as an [`Effect`].
//!
//! ```text
//!   OFF ──[press]──▶ STARTED ──[warn delay]──▶ WARNED ──[punish delay]──▶ PUNISHED
//!    ▲                  │                        │                           │
//!    └─────[press]──────┴────────────────────────┴───────────────────────────┘
//!
//!   OFF ──[grace delay]──▶ OFF (display cleared)
//! ```

use super::context::{Effect, SessionContext};
use super::{SessionEvent, SessionState, StateDescriptor};
use crate::app::ports::AudioTrack;
use crate::drivers::colour::Colour;
use crate::scheduler::DelayPurpose;
use log::info;

pub const TEXT_SHOWERING: &str = "SHOWERING!";
pub const TEXT_WARNING: &str = "WARNING!";
pub const TEXT_PUNISHED: &str = "NICKELBACK!";
pub const TEXT_DURATION: &str = "DURATION:";

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; SessionState::COUNT] {
    [
        // Index 0: Off
        StateDescriptor {
            id: SessionState::Off,
            name: "Off",
            on_enter: Some(off_enter),
            on_event: off_event,
        },
        // Index 1: Started
        StateDescriptor {
            id: SessionState::Started,
            name: "Started",
            on_enter: Some(started_enter),
            on_event: started_event,
        },
        // Index 2: Warned
        StateDescriptor {
            id: SessionState::Warned,
            name: "Warned",
            on_enter: Some(warned_enter),
            on_event: warned_event,
        },
        // Index 3: Punished
        StateDescriptor {
            id: SessionState::Punished,
            name: "Punished",
            on_enter: Some(punished_enter),
            on_event: punished_event,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  OFF state
// ═══════════════════════════════════════════════════════════════════════════

fn off_enter(ctx: &mut SessionContext) {
    let Some(elapsed) = ctx.clock.stop(ctx.now_ms) else {
        // Boot: nothing to report, blank display.
        ctx.emit(Effect::ClearColour);
        ctx.emit(Effect::ClearText);
        return;
    };

    let secs = u32::try_from(elapsed).unwrap_or(u32::MAX);
    info!("Session stopped");

    ctx.emit(Effect::CancelPending);
    ctx.emit(Effect::StopAudio);
    ctx.emit(Effect::SetColour(Colour::Green));
    ctx.emit(Effect::WriteText(TEXT_DURATION));
    ctx.emit(Effect::WriteDuration(secs));
    ctx.emit(Effect::Schedule {
        purpose: DelayPurpose::GraceClear,
        after_ms: ctx.grace_period_ms,
    });
    ctx.emit(Effect::UploadDuration(secs));

    ctx.last_duration_secs = Some(secs);
    info!("Total shower duration: {} seconds", secs);
}

fn off_event(ctx: &mut SessionContext, event: SessionEvent) -> Option<SessionState> {
    match event {
        SessionEvent::Press => Some(SessionState::Started),
        SessionEvent::DelayFired(DelayPurpose::GraceClear) => {
            ctx.emit(Effect::ClearColour);
            ctx.emit(Effect::ClearText);
            None
        }
        SessionEvent::DelayFired(_) => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  STARTED state
// ═══════════════════════════════════════════════════════════════════════════

fn started_enter(ctx: &mut SessionContext) {
    info!("Session starting");
    ctx.clock.start(ctx.now_ms);

    // Drops a grace clear left over from the previous session.
    ctx.emit(Effect::CancelPending);
    ctx.emit(Effect::WriteText(TEXT_SHOWERING));
    ctx.emit(Effect::PlayAudio(AudioTrack::Default));
    ctx.emit(Effect::Schedule {
        purpose: DelayPurpose::Warn,
        after_ms: ctx.thresholds.warn_ms(),
    });
}

fn started_event(_ctx: &mut SessionContext, event: SessionEvent) -> Option<SessionState> {
    match event {
        SessionEvent::Press => Some(SessionState::Off),
        SessionEvent::DelayFired(DelayPurpose::Warn) => Some(SessionState::Warned),
        SessionEvent::DelayFired(_) => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  WARNED state
// ═══════════════════════════════════════════════════════════════════════════

fn warned_enter(ctx: &mut SessionContext) {
    info!("Session warning ({} s left)", ctx.thresholds.punish_secs());
    ctx.emit(Effect::WriteText(TEXT_WARNING));
    ctx.emit(Effect::CancelPending);
    ctx.emit(Effect::Schedule {
        purpose: DelayPurpose::Punish,
        after_ms: ctx.thresholds.punish_ms(),
    });
}

fn warned_event(_ctx: &mut SessionContext, event: SessionEvent) -> Option<SessionState> {
    match event {
        SessionEvent::Press => Some(SessionState::Off),
        SessionEvent::DelayFired(DelayPurpose::Punish) => Some(SessionState::Punished),
        SessionEvent::DelayFired(_) => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  PUNISHED state
// ═══════════════════════════════════════════════════════════════════════════

fn punished_enter(ctx: &mut SessionContext) {
    info!("Session punishment: goal of {} s exceeded", ctx.thresholds.goal_secs());
    ctx.emit(Effect::CancelPending);
    ctx.emit(Effect::SetColour(Colour::Red));
    ctx.emit(Effect::WriteText(TEXT_PUNISHED));
    ctx.emit(Effect::PlayAudio(AudioTrack::Alternate));
}

fn punished_event(_ctx: &mut SessionContext, event: SessionEvent) -> Option<SessionState> {
    match event {
        SessionEvent::Press => Some(SessionState::Off),
        SessionEvent::DelayFired(_) => None,
    }
}
