//! Shower Saver controller library.
//!
//! Exposes the session logic and its adapters for the binary and for
//! integration testing.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod driver;
pub mod drivers;
pub mod error;
pub mod fsm;
pub mod pins;
pub mod progress;
pub mod scheduler;
