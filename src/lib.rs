#![no_std]

extern crate alloc;

pub mod animation;
pub mod bounds;
pub mod color;
pub mod error;
pub mod frame_scheduler;
pub mod handoff;
pub mod layout;
pub mod pattern;
pub mod player;
pub mod spec;
pub mod timed;

pub use animation::Animation;
pub use bounds::LedRange;
pub use error::{Error, Result};
pub use frame_scheduler::{FramePacer, FrameTiming};
pub use handoff::{AnimationSlot, Slot};
pub use layout::{Layout, LayoutStats};
pub use pattern::{Pattern, PatternSlot};
pub use player::{PlaybackStats, Player, PlayerConfig, PlayerState, play};
pub use spec::{AnimationSet, AnimationSpec, ControllerKind, ControllerSpec, parse_animation_set};
pub use timed::{Guard, timed};

pub use color::{Blend, Hsl, Hsv, Rgb};
pub use embassy_time::{Duration, Instant};

/// Abstract machine the player renders on
///
/// Implement this trait to support different hardware platforms.
/// The player is generic over this trait and owns it exclusively.
pub trait Machine {
    /// Frame buffer, one color per LED
    fn leds(&mut self) -> &mut [Rgb];

    /// Flush the frame buffer to the LED strip
    fn write(&mut self);

    /// Monotonic clock
    fn now(&self) -> Instant;

    /// Block for `duration`
    fn sleep(&mut self, duration: Duration);

    /// Polled after every frame; once `true`, playback stops and the strip
    /// is blanked
    fn shutdown_requested(&self) -> bool {
        false
    }
}
