//! Unified error types for the Shower Saver controller.
//!
//! A single `Error` enum that the startup path converts into, keeping its
//! error handling uniform.  Once the control loop is running
//! nothing here propagates upward: adapters log their failures and the
//! session timer keeps going.

use core::fmt;

pub use crate::app::ports::ConfigError;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible startup operation funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
    /// The button input pin could not be opened or read.
    Gpio(GpioError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Gpio(e) => write!(f, "gpio: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// GPIO errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioError {
    /// Exporting the pin or setting its direction failed.
    ExportFailed,
    /// Reading the value file failed.
    ReadFailed,
    /// The value file held something other than `0` or `1`.
    InvalidLevel,
}

impl fmt::Display for GpioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExportFailed => write!(f, "GPIO export failed"),
            Self::ReadFailed => write!(f, "GPIO read failed"),
            Self::InvalidLevel => write!(f, "GPIO level not 0/1"),
        }
    }
}

impl std::error::Error for GpioError {}

impl embedded_hal::digital::Error for GpioError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

impl From<GpioError> for Error {
    fn from(e: GpioError) -> Self {
        Self::Gpio(e)
    }
}

// ---------------------------------------------------------------------------
// External command errors
// ---------------------------------------------------------------------------

/// Failure of one shelled-out command.  Logged by the command worker and
/// never propagated into the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// The command worker is not running, so the command was not queued.
    WorkerGone,
    /// The program could not be executed at all.
    ExecFailed,
    /// The program ran but exited unsuccessfully (`None` = killed by signal).
    NonZeroExit(Option<i32>),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WorkerGone => write!(f, "command worker not running"),
            Self::ExecFailed => write!(f, "exec failed"),
            Self::NonZeroExit(Some(code)) => write!(f, "exited with status {code}"),
            Self::NonZeroExit(None) => write!(f, "terminated by signal"),
        }
    }
}

impl std::error::Error for CommandError {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
