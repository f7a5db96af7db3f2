//! Linux sysfs GPIO input adapter.
//!
//! Implements [`embedded_hal::digital::InputPin`] over
//! `/sys/class/gpio/gpioN/value`.  Opening the pin exports it (if the
//! kernel has not already) and sets its direction to `in`.  Each read
//! re-reads the value file.

use std::fs;
use std::path::{Path, PathBuf};

use embedded_hal::digital::{ErrorType, InputPin};
use log::{debug, info, warn};

use crate::error::GpioError;
use crate::pins::SYSFS_GPIO_ROOT;

pub struct SysfsInputPin {
    gpio: u32,
    value_path: PathBuf,
}

impl SysfsInputPin {
    /// Export `gpio` under the system sysfs root and configure it as input.
    pub fn open(gpio: u32) -> Result<Self, GpioError> {
        Self::open_at(Path::new(SYSFS_GPIO_ROOT), gpio)
    }

    /// Same as [`open`](Self::open) with an explicit sysfs root.
    pub fn open_at(root: &Path, gpio: u32) -> Result<Self, GpioError> {
        let pin_dir = root.join(format!("gpio{gpio}"));

        if !pin_dir.exists() {
            debug!("GPIO{}: exporting", gpio);
            fs::write(root.join("export"), gpio.to_string()).map_err(|e| {
                warn!("GPIO{}: export failed: {}", gpio, e);
                GpioError::ExportFailed
            })?;
        }

        fs::write(pin_dir.join("direction"), "in").map_err(|e| {
            warn!("GPIO{}: set direction failed: {}", gpio, e);
            GpioError::ExportFailed
        })?;

        info!("GPIO{}: input ready ({})", gpio, pin_dir.display());
        Ok(Self {
            gpio,
            value_path: pin_dir.join("value"),
        })
    }

    pub fn gpio(&self) -> u32 {
        self.gpio
    }

    fn read_level(&self) -> Result<bool, GpioError> {
        let raw = fs::read_to_string(&self.value_path).map_err(|_| GpioError::ReadFailed)?;
        match raw.trim() {
            "1" => Ok(true),
            "0" => Ok(false),
            _ => Err(GpioError::InvalidLevel),
        }
    }
}

impl ErrorType for SysfsInputPin {
    type Error = GpioError;
}

impl InputPin for SysfsInputPin {
    fn is_high(&mut self) -> Result<bool, GpioError> {
        self.read_level()
    }

    fn is_low(&mut self) -> Result<bool, GpioError> {
        self.read_level().map(|high| !high)
    }
}
