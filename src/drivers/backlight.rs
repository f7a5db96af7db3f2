//! RGB backlight state.
//!
//! Tracks what the LCD backlight is currently showing.  The I2C write
//! itself belongs to the display backend; this type keeps the last
//! commanded colour so adapters can skip redundant writes and tests can
//! inspect the result.

use super::colour::{self, Colour, Rgb};

pub struct Backlight {
    current: Option<Rgb>,
}

impl Backlight {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Set a solid named colour.  Returns `true` if the output changed.
    pub fn set(&mut self, colour: Colour) -> bool {
        self.set_rgb(colour.rgb())
    }

    /// Set a blend between two named colours.  Returns `true` if the
    /// output changed.
    pub fn set_blend(&mut self, from: Colour, to: Colour, fraction: f32) -> bool {
        self.set_rgb(colour::blend(from, to, fraction))
    }

    /// Backlight off.
    pub fn clear(&mut self) -> bool {
        let changed = self.current.is_some();
        self.current = None;
        changed
    }

    /// Current RGB output; `None` while cleared.
    pub fn current(&self) -> Option<Rgb> {
        self.current
    }

    fn set_rgb(&mut self, rgb: Rgb) -> bool {
        let changed = self.current != Some(rgb);
        self.current = Some(rgb);
        changed
    }
}

impl Default for Backlight {
    fn default() -> Self {
        Self::new()
    }
}
