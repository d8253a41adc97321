use core::ops::Range;

use crate::Rgb;

/// Contiguous range of LED indices owned by a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedRange {
    pub start: usize,
    pub end: usize,
}

impl LedRange {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Range covering a whole strip of `count` LEDs
    pub const fn strip(count: usize) -> Self {
        Self::new(0, count)
    }

    /// Get the number of LEDs in the range
    pub const fn count(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub const fn is_empty(self) -> bool {
        self.count() == 0
    }

    /// Split off the first `len` LEDs
    ///
    /// The prefix is truncated when fewer than `len` LEDs remain.
    pub const fn split_prefix(self, len: usize) -> (Self, Self) {
        let len = if len < self.count() { len } else { self.count() };
        let mid = self.start + len;
        (Self::new(self.start, mid), Self::new(mid, self.end))
    }

    pub const fn as_range(self) -> Range<usize> {
        self.start..self.end
    }
}

/// Get a slice of the LEDs within the range
///
/// Returns `None` when the range reaches past the end of the buffer.
pub(crate) fn bounded(leds: &mut [Rgb], range: LedRange) -> Option<&mut [Rgb]> {
    leds.get_mut(range.as_range())
}
