//! Pattern generators with compile-time known variants
//!
//! All patterns are stored in an enum to avoid dynamic dispatch.
//! Each pattern implements the `Pattern` trait.

mod colors;
mod comet;
mod fire;

pub use colors::ColorsPattern;
pub use comet::CometPattern;
pub use fire::FirePattern;

use crate::{color::Rgb, error::Result};

pub trait Pattern {
    /// Write the colors of `frame`, shifted by `phase`, into the owned LEDs
    fn apply(&mut self, frame: u64, phase: i64, leds: &mut [Rgb]) -> Result<()>;
}

/// Index into a cyclic table of `len` entries
///
/// Negative phases wrap around like any other out-of-range position.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn cycle(frame: u64, phase: i64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let position = i128::from(frame) + i128::from(phase);
    position.rem_euclid(len as i128) as usize
}

/// Pattern slot - enum containing all possible patterns
#[derive(Debug, Clone)]
pub enum PatternSlot {
    /// Leaves its LEDs untouched
    Noop,
    /// Precomputed keyframe table
    Colors(ColorsPattern),
    /// Moving head with a fading trail
    Comet(CometPattern),
    /// Random warm flicker
    Fire(FirePattern),
}

impl PatternSlot {
    /// Apply the current pattern
    pub fn apply(&mut self, frame: u64, phase: i64, leds: &mut [Rgb]) -> Result<()> {
        match self {
            Self::Noop => Ok(()),
            Self::Colors(pattern) => pattern.apply(frame, phase, leds),
            Self::Comet(pattern) => pattern.apply(frame, phase, leds),
            Self::Fire(pattern) => pattern.apply(frame, phase, leds),
        }
    }
}
