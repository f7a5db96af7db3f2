//! Inbound commands to the application service.
//!
//! These represent stimuli from the outside world that the
//! [`AppService`](super::service::AppService) interprets and acts upon.

/// Commands that the control loop or a test harness can send into the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// A debounced button press: start or stop the session.
    TogglePress,
}
