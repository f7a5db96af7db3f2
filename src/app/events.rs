//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use crate::fsm::SessionState;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The application service has started (carries initial state).
    Started(SessionState),

    /// The session moved between states.
    StateChanged { from: SessionState, to: SessionState },

    /// A session was stopped by the button.
    SessionEnded { duration_secs: u32 },
}
