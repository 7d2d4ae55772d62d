//! # Bounded Counter
//!
//! A quantity value clamped to a closed integer range. Both the amount
//! picker on a product being configured and the per-line quantity in the
//! cart are instances of this one type.
//!
//! ## Clamping Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  set_value("25")  with bounds [0, 10]                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  parse ──ok──► clamp to 10 ──► store ──► announce(10)                   │
//! │       │                                                                 │
//! │       └─fail (e.g. "abc")──► keep prior value, announce nothing         │
//! │                                                                         │
//! │  Out-of-range input is NOT an error: it pins to the nearest bound.      │
//! │  Only an inverted range (min > max) at construction is an error.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Change Notification
//! Watchers subscribe through an mpsc channel and receive the stored value
//! after every accepted mutation, including mutations that clamp back to
//! the value already stored. Consumers that recompute derived state on
//! change stay correct without having to diff values themselves.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Quantity Bounds
// =============================================================================

/// A validated `[min, max]` range for counters.
///
/// Validating the range once up front lets the cart mint per-line counters
/// infallibly; `min > max` is rejected here and nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityBounds {
    min: i64,
    max: i64,
}

impl QuantityBounds {
    /// Creates a validated range. Fails with [`CoreError::InvalidRange`]
    /// if `min > max`.
    pub fn new(min: i64, max: i64) -> CoreResult<Self> {
        if min > max {
            return Err(CoreError::InvalidRange { min, max });
        }
        Ok(QuantityBounds { min, max })
    }

    /// Lower bound (inclusive).
    #[inline]
    pub const fn min(&self) -> i64 {
        self.min
    }

    /// Upper bound (inclusive).
    #[inline]
    pub const fn max(&self) -> i64 {
        self.max
    }

    /// Builds a counter for this range, silently clamping `initial`.
    pub fn counter(&self, initial: i64) -> BoundedCounter {
        BoundedCounter {
            value: initial.clamp(self.min, self.max),
            bounds: *self,
            watchers: Vec::new(),
        }
    }
}

// =============================================================================
// Bounded Counter
// =============================================================================

/// An integer quantity that can never leave its `[min, max]` range.
///
/// ## Invariant
/// `min <= value <= max` holds after construction and after every
/// mutation; out-of-range writes pin to the nearest bound.
#[derive(Debug)]
pub struct BoundedCounter {
    value: i64,
    bounds: QuantityBounds,
    watchers: Vec<Sender<i64>>,
}

impl BoundedCounter {
    /// Creates a counter with the given range and initial value.
    ///
    /// `initial` is clamped silently; an inverted range fails with
    /// [`CoreError::InvalidRange`].
    ///
    /// ## Example
    /// ```rust
    /// use trattoria_core::counter::BoundedCounter;
    ///
    /// let counter = BoundedCounter::new(1, 0, 10).unwrap();
    /// assert_eq!(counter.value(), 1);
    ///
    /// // initial outside the range pins to the bound, no error
    /// let pinned = BoundedCounter::new(99, 0, 10).unwrap();
    /// assert_eq!(pinned.value(), 10);
    /// ```
    pub fn new(initial: i64, min: i64, max: i64) -> CoreResult<Self> {
        Ok(QuantityBounds::new(min, max)?.counter(initial))
    }

    /// Current value.
    #[inline]
    pub const fn value(&self) -> i64 {
        self.value
    }

    /// Lower bound (inclusive).
    #[inline]
    pub const fn min(&self) -> i64 {
        self.bounds.min()
    }

    /// Upper bound (inclusive).
    #[inline]
    pub const fn max(&self) -> i64 {
        self.bounds.max()
    }

    /// Sets the value from raw text input.
    ///
    /// The quantity field in the widget is free text, so anything can
    /// arrive here. Whitespace is trimmed, then the input must parse as an
    /// integer: fractional or non-numeric input keeps the prior value and
    /// announces nothing. A parsed value is clamped and stored, and the
    /// watchers are notified even when clamping lands on the value already
    /// stored.
    pub fn set_value(&mut self, raw: &str) {
        if let Ok(parsed) = raw.trim().parse::<i64>() {
            self.set(parsed);
        }
    }

    /// Sets the value from an already-numeric input, clamping into range.
    pub fn set(&mut self, value: i64) {
        self.value = value.clamp(self.bounds.min(), self.bounds.max());
        self.announce();
    }

    /// Equivalent to `set(value + 1)`.
    pub fn increment(&mut self) {
        self.set(self.value + 1);
    }

    /// Equivalent to `set(value - 1)`.
    pub fn decrement(&mut self) {
        self.set(self.value - 1);
    }

    /// Registers a watcher and returns the receiving end of its channel.
    ///
    /// Each accepted mutation sends the stored value. Dropped receivers
    /// are pruned on the next announcement.
    pub fn subscribe(&mut self) -> Receiver<i64> {
        let (tx, rx) = mpsc::channel();
        self.watchers.push(tx);
        rx
    }

    /// Sends the current value to every live watcher.
    fn announce(&mut self) {
        let value = self.value;
        self.watchers.retain(|tx| tx.send(value).is_ok());
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverted_range_rejected() {
        let err = BoundedCounter::new(1, 10, 0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidRange { min: 10, max: 0 }));
    }

    #[test]
    fn test_initial_is_clamped_silently() {
        assert_eq!(BoundedCounter::new(-5, 0, 10).unwrap().value(), 0);
        assert_eq!(BoundedCounter::new(99, 0, 10).unwrap().value(), 10);
        assert_eq!(BoundedCounter::new(5, 0, 10).unwrap().value(), 5);
    }

    #[test]
    fn test_set_clamps_to_bounds() {
        let mut counter = BoundedCounter::new(1, 0, 10).unwrap();

        for raw in -3..15 {
            counter.set(raw);
            assert_eq!(counter.value(), raw.clamp(0, 10));
        }
    }

    #[test]
    fn test_set_value_parses_text() {
        let mut counter = BoundedCounter::new(1, 0, 10).unwrap();

        counter.set_value("7");
        assert_eq!(counter.value(), 7);

        counter.set_value(" 3 ");
        assert_eq!(counter.value(), 3);

        counter.set_value("25");
        assert_eq!(counter.value(), 10);

        counter.set_value("-2");
        assert_eq!(counter.value(), 0);
    }

    #[test]
    fn test_unparseable_input_is_a_no_op() {
        let mut counter = BoundedCounter::new(4, 0, 10).unwrap();

        counter.set_value("abc");
        assert_eq!(counter.value(), 4);

        counter.set_value("");
        assert_eq!(counter.value(), 4);

        counter.set_value("7.5");
        assert_eq!(counter.value(), 4);
    }

    #[test]
    fn test_increment_decrement_pin_at_bounds() {
        let mut counter = BoundedCounter::new(9, 0, 10).unwrap();

        counter.increment();
        assert_eq!(counter.value(), 10);
        counter.increment();
        assert_eq!(counter.value(), 10);

        let mut counter = BoundedCounter::new(1, 0, 10).unwrap();
        counter.decrement();
        assert_eq!(counter.value(), 0);
        counter.decrement();
        assert_eq!(counter.value(), 0);
    }

    #[test]
    fn test_watchers_hear_every_accepted_mutation() {
        let mut counter = BoundedCounter::new(1, 0, 10).unwrap();
        let rx = counter.subscribe();

        counter.set(5);
        counter.increment();
        assert_eq!(rx.try_recv().unwrap(), 5);
        assert_eq!(rx.try_recv().unwrap(), 6);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_clamp_to_same_value_still_announces() {
        let mut counter = BoundedCounter::new(10, 0, 10).unwrap();
        let rx = counter.subscribe();

        // pins back to 10, but downstream recomputation must still fire
        counter.set_value("25");
        assert_eq!(rx.try_recv().unwrap(), 10);
    }

    #[test]
    fn test_parse_failure_announces_nothing() {
        let mut counter = BoundedCounter::new(4, 0, 10).unwrap();
        let rx = counter.subscribe();

        counter.set_value("garbage");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_dropped_watchers_are_pruned() {
        let mut counter = BoundedCounter::new(1, 0, 10).unwrap();
        {
            let _rx = counter.subscribe();
        }
        counter.set(2);
        assert!(counter.watchers.is_empty());
    }

    #[test]
    fn test_degenerate_single_value_range() {
        let mut counter = BoundedCounter::new(5, 3, 3).unwrap();
        assert_eq!(counter.value(), 3);
        counter.increment();
        assert_eq!(counter.value(), 3);
    }
}
