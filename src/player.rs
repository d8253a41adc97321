//! Playback
//!
//! The player owns the render side of the system. Once per outer iteration it
//! takes any new animation set from the hand-off slot, then plays one
//! animation of the active set, round-robin, pacing frames with
//! [`FramePacer`].

use alloc::{format, vec::Vec};

use embassy_time::Duration;

use crate::{
    Machine,
    animation::Animation,
    color::BLACK,
    error::{Error, Result},
    frame_scheduler::{FramePacer, FrameTiming},
    handoff::AnimationSlot,
    timed::{Guard, timed},
};

/// Default sleep while no animation set has arrived yet
pub const DEFAULT_IDLE: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    /// No animation set yet
    Idle,
    /// Cycling through the active animation set
    Running,
    /// Shut down; the strip is blank
    Terminal,
}

/// Configuration for the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerConfig {
    /// Sleep between slot checks while idle
    pub idle: Duration,
    /// Seed for random patterns, derived from the clock when unset
    pub seed: Option<u64>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            idle: DEFAULT_IDLE,
            seed: None,
        }
    }
}

/// Counters for one playthrough
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackStats {
    pub frames: u32,
    pub overruns: u32,
}

/// Play `animation` once, from frame 0 to its duration
///
/// Each frame is applied at `frame + offset`, so playthroughs started with a
/// growing offset keep advancing phase. The buffer is blanked first.
pub fn play<M: Machine>(
    machine: &mut M,
    animation: &mut Animation,
    offset: u64,
) -> Result<PlaybackStats> {
    machine.leds().fill(BLACK);

    let mut pacer = FramePacer::new(animation.refresh());
    let mut stats = PlaybackStats::default();

    for frame in 0..animation.duration() {
        animation.apply(u64::from(frame).wrapping_add(offset), machine.leds())?;
        machine.write();
        stats.frames += 1;

        match pacer.measure(machine.now()) {
            FrameTiming::Baseline => {}
            FrameTiming::Sleep(duration) => {
                machine.sleep(duration);
                pacer.resync(machine.now());
            }
            FrameTiming::Overrun(excess) => {
                stats.overruns += 1;
                log::warn!("Frame {frame} overran by {}ms", excess.as_millis());
            }
        }

        if machine.shutdown_requested() {
            return Err(Error::Interrupted);
        }
    }

    Ok(stats)
}

/// Player - the render loop orchestrator
pub struct Player<'a, M: Machine> {
    // External dependencies and configuration
    machine: M,
    slot: &'a AnimationSlot,
    config: PlayerConfig,

    // Internal state
    animations: Vec<Animation>,
    selection: usize,
    running_offset: u64,
    state: PlayerState,
}

impl<'a, M: Machine> Player<'a, M> {
    pub fn new(machine: M, slot: &'a AnimationSlot, config: PlayerConfig) -> Self {
        Self {
            machine,
            slot,
            config,
            animations: Vec::new(),
            selection: 0,
            running_offset: 0,
            state: PlayerState::Idle,
        }
    }

    pub const fn state(&self) -> PlayerState {
        self.state
    }

    pub const fn machine(&self) -> &M {
        &self.machine
    }

    /// The active animation set
    pub fn animations(&self) -> &[Animation] {
        &self.animations
    }

    /// Index of the animation the next step plays
    pub const fn selection(&self) -> usize {
        self.selection
    }

    /// Frame offset applied to the next playthrough
    pub const fn running_offset(&self) -> u64 {
        self.running_offset
    }

    /// Run outer iterations until `loops` is reached or shutdown is requested
    ///
    /// `None` runs forever. On shutdown, or when a failure escapes a step, the
    /// strip is blanked and the player becomes terminal.
    pub fn run(&mut self, loops: Option<usize>) -> Result<()> {
        let mut count = 0;
        while loops.is_none_or(|limit| count < limit) {
            if let Err(err) = self.step() {
                self.shutdown();
                return if err.is_interrupt() { Ok(()) } else { Err(err) };
            }
            if self.machine.shutdown_requested() {
                self.shutdown();
                return Ok(());
            }
            count += 1;
        }

        Ok(())
    }

    /// One outer iteration: pick up a new set, then play one animation
    ///
    /// Returns the playthrough counters, or `None` when idle or when the
    /// playthrough failed and the failure was suppressed.
    pub fn step(&mut self) -> Result<Option<PlaybackStats>> {
        if self.state == PlayerState::Terminal {
            return Ok(None);
        }

        self.update()?;

        if self.animations.is_empty() {
            self.state = PlayerState::Idle;
            log::trace!("No animations, idling for {}ms", self.config.idle.as_millis());
            self.machine.sleep(self.config.idle);
            return Ok(None);
        }
        self.state = PlayerState::Running;

        let index = self.selection % self.animations.len();
        let offset = self.running_offset;
        let animation = &mut self.animations[index];
        let stats = timed(
            &mut self.machine,
            &format!("Running animation {index}"),
            Guard::Safe,
            |machine| play(machine, animation, offset),
        )?;

        self.selection = (index + 1) % self.animations.len();
        self.running_offset = self.running_offset.wrapping_add(1);

        Ok(stats)
    }

    /// Blank and flush the strip, then stop for good
    pub fn shutdown(&mut self) {
        log::info!("Shutting down");
        self.machine.leds().fill(BLACK);
        self.machine.write();
        self.state = PlayerState::Terminal;
    }

    /// Swap in a newly deposited animation set, if any
    fn update(&mut self) -> Result<()> {
        let slot = self.slot;
        let seed = self.config.seed;
        let animations = &mut self.animations;
        let selection = &mut self.selection;

        timed(&mut self.machine, "Updating animations", Guard::Safe, |machine| {
            let Some(set) = slot.take() else {
                return Ok(());
            };

            let seed = seed.unwrap_or_else(|| machine.now().as_ticks());
            let led_count = machine.leds().len();
            *animations = set
                .iter()
                .map(|spec| Animation::build(spec, led_count, seed))
                .collect::<Result<_>>()?;
            *selection = 0;

            log::info!("Loaded {} animations for {led_count} LEDs", animations.len());
            Ok(())
        })?;

        Ok(())
    }
}
