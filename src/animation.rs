//! Built animations
//!
//! An [`Animation`] is an [`AnimationSpec`] resolved against a strip: its
//! patterns are precomputed and every controller placement owns a fixed LED
//! range. Building happens once per incoming spec; applying happens every
//! frame.

use alloc::{format, vec::Vec};

use embassy_time::Duration;

use crate::{
    bounds::{LedRange, bounded},
    color::Rgb,
    error::{Error, Result},
    layout::{self, Layout, LayoutStats},
    pattern::PatternSlot,
    spec::AnimationSpec,
};

#[derive(Debug, Clone)]
pub struct Animation {
    refresh: Duration,
    duration: u32,
    patterns: Vec<PatternSlot>,
    layout: Layout,
}

impl Animation {
    /// Build `spec` for a strip of `led_count` LEDs
    ///
    /// Fails when a pattern table cannot be allocated.
    pub fn build(spec: &AnimationSpec, led_count: usize, seed: u64) -> Result<Self> {
        let compiled = layout::compile(&spec.root, seed)?;
        let layout = layout::assign(&compiled.root, LedRange::strip(led_count));

        let stats = layout.stats();
        log::debug!(
            "Layout: {} containers, {} placements, {} passes, {} unassigned LEDs",
            stats.containers,
            stats.placements,
            stats.passes,
            stats.unassigned
        );

        Ok(Self {
            refresh: spec.refresh,
            duration: spec.duration,
            patterns: compiled.patterns,
            layout,
        })
    }

    /// Target interval between frames
    pub const fn refresh(&self) -> Duration {
        self.refresh
    }

    /// Frames per playthrough
    pub const fn duration(&self) -> u32 {
        self.duration
    }

    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    pub const fn stats(&self) -> LayoutStats {
        self.layout.stats()
    }

    pub fn patterns(&self) -> &[PatternSlot] {
        &self.patterns
    }

    /// Write `frame` into the buffer
    ///
    /// LEDs not owned by any pattern keep their previous contents.
    pub fn apply(&mut self, frame: u64, leds: &mut [Rgb]) -> Result<()> {
        let strip = leds.len();
        for (node, pattern) in self.layout.placements() {
            let Some(owned) = bounded(leds, node.leds) else {
                return Err(Error::generator(format!(
                    "LEDs {}..{} are outside the {strip}-LED strip",
                    node.leds.start, node.leds.end
                )));
            };
            self.patterns[pattern].apply(frame, node.phase, owned)?;
        }

        Ok(())
    }
}
