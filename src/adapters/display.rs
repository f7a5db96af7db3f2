//! Character LCD adapter.
//!
//! Implements [`DisplayPort`] for a 16x2 RGB-backlit LCD.  Row 0 carries
//! the state message, row 1 the `MM:SS` timer.  Text longer than the
//! panel is cut at the last column.
//!
//! No panel driver is bundled: the adapter keeps the frame it would send
//! and logs every change, which is what the host build shows on the
//! console.

use heapless::String;
use log::{debug, info};

use crate::app::ports::DisplayPort;
use crate::drivers::backlight::Backlight;
use crate::drivers::colour::{Colour, Rgb};
use crate::pins::{LCD_COLS, LCD_ROWS};

const MESSAGE_ROW: usize = 0;
const STATUS_ROW: usize = 1;

type Row = String<LCD_COLS>;

pub struct LogDisplay {
    backlight: Backlight,
    rows: [Row; LCD_ROWS],
}

impl LogDisplay {
    pub fn new() -> Self {
        Self {
            backlight: Backlight::new(),
            rows: core::array::from_fn(|_| Row::new()),
        }
    }

    /// Text currently on `row`, empty if out of range.
    pub fn row(&self, row: usize) -> &str {
        self.rows.get(row).map(|r| r.as_str()).unwrap_or("")
    }

    pub fn backlight(&self) -> Option<Rgb> {
        self.backlight.current()
    }

    fn write_row(&mut self, row: usize, text: &str) -> bool {
        let mut next = Row::new();
        for c in text.chars() {
            if next.push(c).is_err() {
                break;
            }
        }
        let changed = self.rows[row] != next;
        self.rows[row] = next;
        changed
    }
}

impl Default for LogDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayPort for LogDisplay {
    fn set_colour(&mut self, colour: Colour) {
        if self.backlight.set(colour) {
            info!("LCD: backlight {}", colour.name());
        }
    }

    fn set_colour_blend(&mut self, from: Colour, to: Colour, fraction: f32) {
        if self.backlight.set_blend(from, to, fraction) {
            debug!("LCD: backlight {:?}", self.backlight.current());
        }
    }

    fn write_text(&mut self, text: &str) {
        if self.write_row(MESSAGE_ROW, text) {
            info!("LCD: [{}]", self.row(MESSAGE_ROW));
        }
    }

    fn write_status(&mut self, text: &str) {
        if self.write_row(STATUS_ROW, text) {
            debug!("LCD: status [{}]", self.row(STATUS_ROW));
        }
    }

    fn clear_colour(&mut self) {
        if self.backlight.clear() {
            info!("LCD: backlight off");
        }
    }

    fn clear_text(&mut self) {
        for row in &mut self.rows {
            row.clear();
        }
        debug!("LCD: cleared");
    }
}
