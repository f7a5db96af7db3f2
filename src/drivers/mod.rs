//! Input and display drivers.

pub mod backlight;
pub mod button;
pub mod colour;
