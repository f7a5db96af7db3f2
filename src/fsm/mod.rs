//! Function-pointer finite state machine engine for the shower session.
//!
//! Classic embedded FSM pattern:
//!
//! ```text
//! ┌────────────────────────────────────────────────────┐
//! │  StateTable                                        │
//! │  ┌──────────┬───────────┬────────────────────────┐ │
//! │  │ State    │ on_enter  │ on_event               │ │
//! │  ├──────────┼───────────┼────────────────────────┤ │
//! │  │ Off      │ fn(ctx)   │ fn(ctx, ev)->Option<>  │ │
//! │  │ Started  │ fn(ctx)   │ fn(ctx, ev)->Option<>  │ │
//! │  │ Warned   │ fn(ctx)   │ fn(ctx, ev)->Option<>  │ │
//! │  │ Punished │ fn(ctx)   │ fn(ctx, ev)->Option<>  │ │
//! │  └──────────┴───────────┴────────────────────────┘ │
//! └────────────────────────────────────────────────────┘
//! ```
//!
//! The session is event-driven rather than polled: a debounced press or a
//! fired delay is dispatched to the **current** state's `on_event`.  If it
//! returns `Some(next)`, the engine updates the current pointer and runs
//! `on_enter` for the next state.  All functions receive
//! `&mut SessionContext`.

pub mod context;
pub mod states;

use context::SessionContext;
use log::info;

use crate::scheduler::DelayPurpose;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Session lifecycle.  Exactly one is active at any time.
/// Must stay in sync with the table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SessionState {
    Off = 0,
    Started = 1,
    Warned = 2,
    Punished = 3,
}

impl SessionState {
    /// Total number of states.  Sizes the table array.
    pub const COUNT: usize = 4;

    /// Convert an index back to `SessionState`.  Panics on out-of-range in
    /// debug builds; returns `Off` in release.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Off,
            1 => Self::Started,
            2 => Self::Warned,
            3 => Self::Punished,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::Off
            }
        }
    }

    /// A session is running.  This is the only "active" flag in the
    /// system; nothing stores it separately.
    pub fn is_active(self) -> bool {
        self != Self::Off
    }
}

/// Stimulus dispatched to the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Debounced button press.
    Press,
    /// A scheduled delay came due.
    DelayFired(DelayPurpose),
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` actions.  Runs exactly once per entry.
pub type StateActionFn = fn(&mut SessionContext);

/// Signature for the event handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateEventFn = fn(&mut SessionContext, SessionEvent) -> Option<SessionState>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single session state.
pub struct StateDescriptor {
    pub id: SessionState,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_event: StateEventFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

pub struct Fsm {
    /// Fixed-size table indexed by `SessionState as usize`.
    table: [StateDescriptor; SessionState::COUNT],
    /// Index of the currently active state.
    current: usize,
    /// Transitions taken since start.
    transitions: u64,
}

impl Fsm {
    pub fn new(table: [StateDescriptor; SessionState::COUNT], initial: SessionState) -> Self {
        Self {
            table,
            current: initial as usize,
            transitions: 0,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `dispatch()`.
    pub fn start(&mut self, ctx: &mut SessionContext) {
        info!("FSM starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Deliver `event` to the current state.
    ///
    /// Returns the `(from, to)` pair if a transition happened.
    pub fn dispatch(
        &mut self,
        event: SessionEvent,
        ctx: &mut SessionContext,
    ) -> Option<(SessionState, SessionState)> {
        let from = self.current_state();
        let next = (self.table[self.current].on_event)(ctx, event)?;
        self.transition(next, ctx);
        Some((from, next))
    }

    pub fn current_state(&self) -> SessionState {
        SessionState::from_index(self.current)
    }

    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next: SessionState, ctx: &mut SessionContext) {
        let next_idx = next as usize;

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        self.current = next_idx;
        self.transitions += 1;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
