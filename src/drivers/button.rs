//! Debounced session button.
//!
//! ## Hardware
//!
//! Momentary switch on a digital input.  Polarity is configurable: the
//! stock wiring reads HIGH while pressed, active-low boards set
//! `button_active_low`.
//!
//! ## Debounce
//!
//! The button is sampled once per control tick.  After a press is
//! accepted the pin is not read at all until strictly more than the
//! debounce window has passed, so contact bounce and a finger still
//! resting on the button cannot toggle the session twice.
//!
//! ```text
//!   press accepted          window elapsed
//!        │◀──── no reads ────▶│
//!   ─────┴────────────────────┴── read ── read ── press accepted ──▶
//! ```

use embedded_hal::digital::InputPin;
use log::warn;

/// Timestamp of the last accepted press (milliseconds, monotonic).
///
/// Only [`sample`] mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceState {
    last_press_ms: u64,
}

impl DebounceState {
    /// Start the window at `boot_ms` so a button held during power-up
    /// is not taken as a press.
    pub fn new(boot_ms: u64) -> Self {
        Self {
            last_press_ms: boot_ms,
        }
    }

    pub fn last_press_ms(&self) -> u64 {
        self.last_press_ms
    }
}

/// Check the input for a new press.
///
/// Returns `false` without calling `read` while `now_ms` is within
/// `window_ms` of the last accepted press.  Otherwise calls `read` once;
/// a `true` reading is accepted and restarts the window.
pub fn sample(
    now_ms: u64,
    read: impl FnOnce() -> bool,
    window_ms: u64,
    state: &mut DebounceState,
) -> bool {
    if now_ms.saturating_sub(state.last_press_ms) <= window_ms {
        return false;
    }
    if read() {
        state.last_press_ms = now_ms;
        true
    } else {
        false
    }
}

/// Button on a GPIO input pin.
pub struct ButtonDriver<P> {
    pin: P,
    active_low: bool,
    debounce_ms: u64,
}

impl<P: InputPin> ButtonDriver<P> {
    pub fn new(pin: P, debounce_ms: u32, active_low: bool) -> Self {
        Self {
            pin,
            active_low,
            debounce_ms: u64::from(debounce_ms),
        }
    }

    /// Call from the control loop once per tick.
    /// Returns `true` when a new press has been accepted.
    pub fn sample(&mut self, now_ms: u64, state: &mut DebounceState) -> bool {
        let window = self.debounce_ms;
        sample(now_ms, || self.is_pressed(), window, state)
    }

    /// Raw pressed level.  A failed read counts as "not pressed".
    fn is_pressed(&mut self) -> bool {
        let level = if self.active_low {
            self.pin.is_low()
        } else {
            self.pin.is_high()
        };
        match level {
            Ok(pressed) => pressed,
            Err(e) => {
                warn!("Button: input read failed ({:?}), treating as released", e);
                false
            }
        }
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }

    pub fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }
}
