//! Named backlight colours and blend math.
//!
//! The LCD backlight is driven with an RGB triple.  State handlers and the
//! progress interpolator only ever speak in named colours; conversion to
//! RGB and the linear blend between two names live here.
//!
//! | Colour | RGB           | Used for                         |
//! |--------|---------------|----------------------------------|
//! | Green  | (0, 255, 0)   | session start, final duration    |
//! | Yellow | (255, 255, 0) | warning threshold                |
//! | Red    | (255, 0, 0)   | goal reached / punishment        |

use serde::{Deserialize, Serialize};

/// Colour as (R, G, B) tuple, each 0–255.
pub type Rgb = (u8, u8, u8);

/// Named backlight colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colour {
    Green,
    Yellow,
    Red,
}

impl Colour {
    pub const fn rgb(self) -> Rgb {
        match self {
            Self::Green => COLOUR_GREEN,
            Self::Yellow => COLOUR_YELLOW,
            Self::Red => COLOUR_RED,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }
}

/// Linear per-channel blend from `from` to `to`.
///
/// `fraction` is clamped to `[0, 1]`; NaN is treated as 0.
pub fn blend(from: Colour, to: Colour, fraction: f32) -> Rgb {
    let t = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    let (r0, g0, b0) = from.rgb();
    let (r1, g1, b1) = to.rgb();
    (
        lerp_channel(r0, r1, t),
        lerp_channel(g0, g1, t),
        lerp_channel(b0, b1, t),
    )
}

fn lerp_channel(a: u8, b: u8, t: f32) -> u8 {
    let a = f32::from(a);
    let b = f32::from(b);
    (a + (b - a) * t).round() as u8
}

pub const COLOUR_GREEN: Rgb = (0, 255, 0);
pub const COLOUR_YELLOW: Rgb = (255, 255, 0);
pub const COLOUR_RED: Rgb = (255, 0, 0);
