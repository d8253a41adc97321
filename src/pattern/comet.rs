//! Traveling comet
//!
//! A ring of `trail + spacing` colors: the head, a trail fading to black and a
//! dark gap. Each LED reads the ring one position apart from its neighbor, so
//! advancing the frame moves the head along the strip.

use alloc::{format, vec::Vec};

use super::{Pattern, cycle};
use crate::{
    color::{BLACK, Blend, Rgb},
    error::{Error, Result},
    spec::CometSpec,
};

#[derive(Debug, Clone)]
pub struct CometPattern {
    ring: Vec<Rgb>,
    reverse: bool,
}

impl CometPattern {
    pub fn new(spec: &CometSpec) -> Result<Self> {
        Ok(Self::with_ring(spec.color, spec.trail, spec.spacing, spec.mix)?
            .with_reverse(spec.reverse))
    }

    /// Build the ring for a comet of `color`
    ///
    /// Fails when `trail + spacing` overflows or the ring cannot be allocated.
    #[allow(clippy::cast_precision_loss)]
    pub fn with_ring(color: Rgb, trail: usize, spacing: usize, blend: Blend) -> Result<Self> {
        let len = trail
            .checked_add(spacing)
            .ok_or_else(|| Error::generator("'comet' ring length overflows"))?;
        let mut ring = Vec::new();
        ring.try_reserve_exact(len).map_err(|_| {
            Error::generator(format!("cannot allocate a {len}-LED 'comet' ring"))
        })?;

        ring.extend((0..len).map(|i| {
            if i < trail {
                blend.mix(color, BLACK, i as f32 / trail as f32)
            } else {
                BLACK
            }
        }));

        Ok(Self {
            ring,
            reverse: false,
        })
    }

    /// Run the comet towards the start of the strip
    #[must_use]
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    pub fn ring(&self) -> &[Rgb] {
        &self.ring
    }
}

impl Pattern for CometPattern {
    fn apply(&mut self, frame: u64, phase: i64, leds: &mut [Rgb]) -> Result<()> {
        let len = self.ring.len();
        if len == 0 {
            return Ok(());
        }

        // Forward comets read the ring backwards so the head leads the trail.
        let step = if self.reverse { 1 } else { len - 1 };
        let mut position = cycle(frame, phase, len);
        for led in leds {
            *led = self.ring[position];
            position = (position + step) % len;
        }

        Ok(())
    }
}
