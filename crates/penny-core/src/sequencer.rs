//! Timed reveal sequencer
//!
//! Drives non-interactive demos: a fixed, ordered schedule of
//! `(delay from start, element)` pairs is revealed as time advances. The
//! sequencer owns no timer; whoever mounts it advances it by elapsed time,
//! which keeps it deterministic under a virtual clock.
//!
//! A sequencer runs once. There is no restart, and once cancelled it never
//! reveals anything again.

use std::time::Duration;

use serde::Serialize;

use crate::error::{Error, Result};

/// Ordered reveal schedule with strictly increasing delays
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevealSchedule<T> {
    entries: Vec<(Duration, T)>,
}

impl<T> RevealSchedule<T> {
    pub fn new(entries: Vec<(Duration, T)>) -> Result<Self> {
        for (i, pair) in entries.windows(2).enumerate() {
            if pair[1].0 <= pair[0].0 {
                return Err(Error::InvalidSchedule(format!(
                    "entry {} at {}ms does not come after entry {} at {}ms",
                    i + 1,
                    pair[1].0.as_millis(),
                    i,
                    pair[0].0.as_millis()
                )));
            }
        }
        Ok(Self { entries })
    }

    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Delay of the final entry, i.e. the length of the sequence
    pub fn duration(&self) -> Duration {
        self.entries.last().map(|(at, _)| *at).unwrap_or_default()
    }

    pub fn entries(&self) -> &[(Duration, T)] {
        &self.entries
    }
}

impl<T> Default for RevealSchedule<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// A running reveal sequence
#[derive(Debug, Clone)]
pub struct Sequencer<T> {
    delays: Vec<Duration>,
    elements: Vec<T>,
    elapsed: Duration,
    revealed: usize,
    cancelled: bool,
}

impl<T> Sequencer<T> {
    /// Mount a schedule; time starts at zero
    pub fn start(schedule: RevealSchedule<T>) -> Self {
        let (delays, elements) = schedule.entries.into_iter().unzip();
        let mut sequencer = Self {
            delays,
            elements,
            elapsed: Duration::ZERO,
            revealed: 0,
            cancelled: false,
        };
        // Entries scheduled at zero are visible immediately on mount
        sequencer.reveal_due();
        sequencer
    }

    /// Advance the clock by `dt`, returning the elements revealed by this step
    pub fn advance(&mut self, dt: Duration) -> &[T] {
        if self.cancelled {
            return &[];
        }
        let before = self.revealed;
        self.elapsed += dt;
        self.reveal_due();
        &self.elements[before..self.revealed]
    }

    fn reveal_due(&mut self) {
        while self.revealed < self.delays.len() && self.delays[self.revealed] <= self.elapsed {
            tracing::debug!(
                index = self.revealed,
                at_ms = self.delays[self.revealed].as_millis() as u64,
                "Revealed element"
            );
            self.revealed += 1;
        }
    }

    /// Elements currently visible, in schedule order
    pub fn visible(&self) -> &[T] {
        &self.elements[..self.revealed]
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        index < self.revealed
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// True once every element is revealed or the sequence was cancelled
    pub fn is_finished(&self) -> bool {
        self.cancelled || self.revealed == self.elements.len()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Time remaining until the next reveal, `None` when nothing is pending
    pub fn next_due(&self) -> Option<Duration> {
        if self.cancelled {
            return None;
        }
        self.delays
            .get(self.revealed)
            .map(|at| at.saturating_sub(self.elapsed))
    }

    /// Cancel all pending reveals, returning how many were dropped.
    /// Already-visible elements stay visible; cancelling twice drops nothing.
    pub fn cancel(&mut self) -> usize {
        if self.cancelled {
            return 0;
        }
        self.cancelled = true;
        let pending = self.elements.len() - self.revealed;
        if pending > 0 {
            tracing::debug!(pending, "Cancelled pending reveals");
        }
        pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn abc() -> RevealSchedule<&'static str> {
        RevealSchedule::new(vec![(ms(1000), "A"), (ms(1500), "B"), (ms(3500), "C")]).unwrap()
    }

    #[test]
    fn test_reveals_in_order() {
        let mut seq = Sequencer::start(abc());
        assert!(seq.visible().is_empty());

        assert_eq!(seq.advance(ms(1200)), &["A"]);
        assert_eq!(seq.visible(), &["A"]);
        assert!(seq.is_revealed(0));
        assert!(!seq.is_revealed(1));

        assert_eq!(seq.advance(ms(2400)), &["B", "C"]);
        assert_eq!(seq.visible(), &["A", "B", "C"]);
        assert!(seq.is_finished());
        assert_eq!(seq.next_due(), None);
    }

    #[test]
    fn test_reveal_exactly_on_boundary() {
        let mut seq = Sequencer::start(abc());
        assert!(seq.advance(ms(999)).is_empty());
        assert_eq!(seq.advance(ms(1)), &["A"]);
        assert_eq!(seq.next_due(), Some(ms(500)));
    }

    #[test]
    fn test_zero_delay_visible_on_mount() {
        let schedule = RevealSchedule::new(vec![(Duration::ZERO, 1), (ms(10), 2)]).unwrap();
        let seq = Sequencer::start(schedule);
        assert_eq!(seq.visible(), &[1]);
    }

    #[test]
    fn test_cancel_stops_pending_reveals() {
        let mut seq = Sequencer::start(abc());
        seq.advance(ms(1200));

        assert_eq!(seq.cancel(), 2);
        assert_eq!(seq.cancel(), 0);
        assert!(seq.advance(ms(10_000)).is_empty());
        assert_eq!(seq.visible(), &["A"]);
        assert!(seq.is_finished());
        assert!(seq.is_cancelled());
        assert_eq!(seq.next_due(), None);
    }

    #[test]
    fn test_rejects_out_of_order_schedule() {
        let err = RevealSchedule::new(vec![(ms(1000), "A"), (ms(1000), "B")]).unwrap_err();
        assert!(matches!(err, Error::InvalidSchedule(_)));
        assert!(RevealSchedule::new(vec![(ms(2000), "A"), (ms(1000), "B")]).is_err());
    }

    #[test]
    fn test_empty_schedule() {
        let seq: Sequencer<()> = Sequencer::start(RevealSchedule::empty());
        assert!(seq.is_finished());
        assert_eq!(seq.next_due(), None);
        assert_eq!(abc().duration(), ms(3500));
    }
}
