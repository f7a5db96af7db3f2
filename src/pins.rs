//! GPIO / peripheral assignments for the Shower Saver board.
//!
//! Single source of truth for the defaults; the config file can override
//! the button pin at runtime.

// ---------------------------------------------------------------------------
// Session button
// ---------------------------------------------------------------------------

/// Momentary push button on digital header D6.
pub const BUTTON_GPIO: u32 = 6;

/// Root of the Linux sysfs GPIO interface.
pub const SYSFS_GPIO_ROOT: &str = "/sys/class/gpio";

// ---------------------------------------------------------------------------
// RGB backlight LCD (I2C character display)
// ---------------------------------------------------------------------------

/// Character rows on the LCD.
pub const LCD_ROWS: usize = 2;
/// Character columns on the LCD.
pub const LCD_COLS: usize = 16;
