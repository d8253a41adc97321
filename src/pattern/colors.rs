//! Keyframe color sequence
//!
//! Expands cyclic `(color, duration, fade)` keyframes into a flat frame table
//! once, then every frame is a single lookup.

use alloc::{format, vec::Vec};
use core::iter;

use super::{Pattern, cycle};
use crate::{
    color::{Blend, Rgb},
    error::{Error, Result},
    spec::{ColorsSpec, Keyframe, frame_count},
};

/// Colors pattern - fills all owned LEDs with the table entry for the frame
#[derive(Debug, Clone)]
pub struct ColorsPattern {
    table: Vec<Rgb>,
}

impl ColorsPattern {
    pub fn new(spec: &ColorsSpec) -> Result<Self> {
        Self::from_keyframes(&spec.colors, spec.duration, spec.fade, spec.mix)
    }

    /// Expand keyframes into the frame table
    ///
    /// Each keyframe holds its color for `duration` frames, then fades into the
    /// next keyframe (wrapping to the first) over `fade` frames. Fails when the
    /// table cannot be allocated.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_keyframes(
        keyframes: &[Keyframe],
        default_duration: u32,
        default_fade: u32,
        blend: Blend,
    ) -> Result<Self> {
        let len = frame_count(keyframes, default_duration, default_fade)
            .ok_or_else(|| Error::generator("'colors' frame table length overflows"))?;
        let mut table = Vec::new();
        table.try_reserve_exact(len).map_err(|_| {
            Error::generator(format!("cannot allocate a {len}-frame 'colors' table"))
        })?;

        for (n, keyframe) in keyframes.iter().enumerate() {
            let next = keyframes[(n + 1) % keyframes.len()];
            let duration = keyframe.duration.unwrap_or(default_duration);
            let fade = keyframe.fade.unwrap_or(default_fade);

            table.extend(iter::repeat_n(keyframe.color, duration as usize));
            for i in 0..fade {
                let t = i as f32 / fade as f32;
                table.push(blend.mix(keyframe.color, next.color, t));
            }
        }

        Ok(Self { table })
    }

    /// Precomputed frame table
    pub fn table(&self) -> &[Rgb] {
        &self.table
    }
}

impl Pattern for ColorsPattern {
    fn apply(&mut self, frame: u64, phase: i64, leds: &mut [Rgb]) -> Result<()> {
        if self.table.is_empty() {
            return Err(Error::generator(
                "'colors' controller expands to an empty frame table",
            ));
        }

        let color = self.table[cycle(frame, phase, self.table.len())];
        leds.fill(color);

        Ok(())
    }
}
