//! Frame pacing with drift correction.
//!
//! Portable frame pacing without async/await or platform-specific timers.
//! The pacer only does the arithmetic; the caller renders, flushes, sleeps
//! and reports the clock back.

use embassy_time::{Duration, Instant};

/// Timing decision for the frame that was just flushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameTiming {
    /// First frame of a playthrough: the baseline was captured, no sleep.
    Baseline,
    /// Frame finished early: sleep this long, then call [`FramePacer::resync`].
    Sleep(Duration),
    /// Frame took longer than the refresh interval by this much. The baseline
    /// was already moved to the measurement time; do not sleep.
    Overrun(Duration),
}

/// Drift-corrected pacer for one playthrough.
///
/// This pacer:
/// - Measures the time since the previous frame's baseline
/// - Tells the caller how long to sleep to hit the refresh interval
/// - Skips the sleep and resynchronizes when a frame overruns
///
/// # Usage
///
/// ```ignore
/// let mut pacer = FramePacer::new(refresh);
///
/// for frame in 0..duration {
///     render_and_flush(frame);
///     match pacer.measure(clock.now()) {
///         FrameTiming::Sleep(duration) => {
///             sleep(duration);
///             pacer.resync(clock.now());
///         }
///         FrameTiming::Overrun(excess) => warn(excess),
///         FrameTiming::Baseline => {}
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FramePacer {
    refresh: Duration,
    baseline: Option<Instant>,
}

impl FramePacer {
    /// Create a pacer targeting one frame per `refresh`.
    pub const fn new(refresh: Duration) -> Self {
        Self {
            refresh,
            baseline: None,
        }
    }

    pub const fn refresh(&self) -> Duration {
        self.refresh
    }

    /// Measure the frame that just completed at `now`.
    pub fn measure(&mut self, now: Instant) -> FrameTiming {
        let Some(baseline) = self.baseline else {
            self.baseline = Some(now);
            return FrameTiming::Baseline;
        };

        let elapsed = now.saturating_duration_since(baseline);
        if elapsed > self.refresh {
            self.baseline = Some(now);
            FrameTiming::Overrun(elapsed - self.refresh)
        } else {
            FrameTiming::Sleep(self.refresh - elapsed)
        }
    }

    /// Move the baseline to `now`, after the caller slept.
    pub fn resync(&mut self, now: Instant) {
        self.baseline = Some(now);
    }
}
