//! Fire flicker
//!
//! Every frame draws a fresh warm hue and brightness for each LED. No state
//! is carried between frames besides the random generator.

use rand::{Rng, SeedableRng, rngs::SmallRng};

use super::Pattern;
use crate::{
    color::{Hsv, Rgb, hsl_to_rgb, hsv_to_hsl},
    error::Result,
};

/// Upper bound of the flame hue, in degrees
const MAX_HUE_DEGREES: f32 = 50.0;

#[derive(Debug, Clone)]
pub struct FirePattern {
    rng: SmallRng,
}

impl FirePattern {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Pattern for FirePattern {
    fn apply(&mut self, _frame: u64, _phase: i64, leds: &mut [Rgb]) -> Result<()> {
        for led in leds {
            let hue = self.rng.random_range(0.0..MAX_HUE_DEGREES) / 360.0;
            let val = self.rng.random::<f32>();
            *led = hsl_to_rgb(hsv_to_hsl(Hsv::new(hue, 1.0, val)));
        }

        Ok(())
    }
}
