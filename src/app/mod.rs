//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the business rules for the Shower Saver: session
//! FSM orchestration, delayed transitions and the progress display.
//! All interaction with the display, audio, telemetry and configuration
//! happens through **port traits** defined in [`ports`], keeping this
//! layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
