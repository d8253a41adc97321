//! Single-value hand-off slot for `no_std` environments.
//!
//! The producer (a config poller) deposits freshly parsed animation sets, the
//! render loop takes them. Last write wins and there is no backpressure: a set
//! that is superseded before the render loop looks is dropped. Thread/interrupt
//! safe via critical sections.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::error::Result;
use crate::spec::{AnimationSet, parse_animation_set};

/// A slot holding at most one value.
pub struct Slot<T> {
    inner: Mutex<RefCell<Option<T>>>,
}

/// Slot used to hand animation sets to the player
pub type AnimationSlot = Slot<AnimationSet>;

impl<T> Slot<T> {
    /// Create a new empty slot.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Replace the slot contents with `value`.
    ///
    /// Returns the value that was superseded, if the reader never took it.
    pub fn deposit(&self, value: T) -> Option<T> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().replace(value))
    }

    /// Take the value out, leaving the slot empty.
    pub fn take(&self) -> Option<T> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().take())
    }

    pub fn is_empty(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().is_none())
    }
}

impl AnimationSlot {
    /// Parse an animation document and deposit it.
    ///
    /// Nothing is deposited when the document is invalid, so the animation
    /// set currently playing stays untouched.
    pub fn publish(&self, document: &str) -> Result<()> {
        let set = parse_animation_set(document)?;
        self.deposit(set);
        Ok(())
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self::new()
    }
}
