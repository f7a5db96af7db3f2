//! Session progress interpolation.
//!
//! Pure function of elapsed time: given when the session started and the
//! current time, produce the backlight blend and the `MM:SS` timer text.
//! Recomputed every tick while a session is active and never itself
//! changes the session state.
//!
//! ```text
//!  elapsed:  0 ────────── warn ─────────── goal ──────────▶
//!  colour:   green ──▶ yellow   yellow ──▶ red   red (clamped)
//!  fraction: 0.0 ───▶ 1.0       0.0 ────▶ 1.0   1.0
//! ```

use crate::config::DurationThresholds;
use crate::drivers::colour::Colour;

/// Which half of the session the elapsed time falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// `elapsed <= warn`: green → yellow.
    PreWarn,
    /// `elapsed > warn`: yellow → red, clamped at the goal.
    PostWarn,
}

/// One tick's worth of display output.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub elapsed_secs: u64,
    pub phase: Phase,
    pub from: Colour,
    pub to: Colour,
    /// Blend position in `[0, 1]`.
    pub fraction: f32,
    /// Zero-padded `MM:SS`.
    pub text: String,
}

/// Compute the progress display for a session started at `start_ms`.
pub fn update(now_ms: u64, start_ms: u64, thresholds: &DurationThresholds) -> Progress {
    let elapsed = elapsed_secs(now_ms, start_ms);
    let warn = u64::from(thresholds.warn_secs());

    let (phase, from, to, fraction) = if elapsed <= warn {
        // warn == 0 only reaches here at elapsed == 0; show the warn colour.
        let t = if warn == 0 {
            1.0
        } else {
            elapsed as f32 / warn as f32
        };
        (Phase::PreWarn, Colour::Green, Colour::Yellow, t)
    } else {
        let over = (elapsed - warn) as f32;
        let span = thresholds.punish_secs() as f32;
        let t = (over / span).min(1.0);
        (Phase::PostWarn, Colour::Yellow, Colour::Red, t)
    };

    Progress {
        elapsed_secs: elapsed,
        phase,
        from,
        to,
        fraction,
        text: format_mm_ss(elapsed),
    }
}

/// Whole seconds between `start_ms` and `now_ms`, rounded half-up.
pub fn elapsed_secs(now_ms: u64, start_ms: u64) -> u64 {
    (now_ms.saturating_sub(start_ms) + 500) / 1000
}

/// `MM:SS`, each field zero-padded to two digits.  Minutes keep counting
/// past 99.
pub fn format_mm_ss(secs: u64) -> String {
    let mut s = pad(secs / 60, 2);
    s.push(':');
    s.push_str(&pad(secs % 60, 2));
    s
}

/// Left-pad `n` with zeros to at least `width` characters.
pub fn pad(n: u64, width: usize) -> String {
    pad_with(n, width, '0')
}

/// Left-pad `n` with `fill` to at least `width` characters.
pub fn pad_with(n: u64, width: usize, fill: char) -> String {
    let digits = n.to_string();
    let missing = width.saturating_sub(digits.len());
    let mut out: String = core::iter::repeat_n(fill, missing).collect();
    out.push_str(&digits);
    out
}
