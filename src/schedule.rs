//! Delay-then-run scheduling
//!
//! The driver never owns a timer. It asks a [`Scheduler`] to hand a
//! [`Wakeup`] back after a delay and the host delivers it to
//! [`Game::on_wakeup`](crate::Game::on_wakeup) on the same thread that
//! delivers input, so ticks and input never interleave.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What a wakeup asks the driver to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WakeupKind {
    /// Run the next simulation tick
    Tick,
    /// Life-lost pause is over, set up the next serve
    ResumeRound,
}

/// A one-shot callback token. The generation ties it to the arming that
/// produced it; the driver ignores any wakeup it is not waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Wakeup {
    pub kind: WakeupKind,
    pub generation: u64,
}

/// Fire-and-forget, one wakeup per call
pub trait Scheduler {
    fn schedule_once(&mut self, delay: Duration, wakeup: Wakeup);
}

/// Deterministic scheduler on simulated time.
///
/// Wakeups come out ordered by due time, then by the order they were scheduled.
#[derive(Debug, Default)]
pub struct VirtualClock {
    now: Duration,
    seq: u64,
    queue: BinaryHeap<Reverse<(Duration, u64, Wakeup)>>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulated time elapsed so far
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Due time of the earliest pending wakeup
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.peek().map(|Reverse((due, _, _))| *due)
    }

    /// Move time forward without firing anything
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    /// Pop the earliest wakeup that is already due
    pub fn pop_due(&mut self) -> Option<Wakeup> {
        match self.next_due() {
            Some(due) if due <= self.now => self.queue.pop().map(|Reverse((_, _, w))| w),
            _ => None,
        }
    }

    /// Jump to the earliest pending wakeup and pop it.
    /// Returns the delay that was skipped along with the wakeup.
    pub fn pop_next(&mut self) -> Option<(Duration, Wakeup)> {
        let Reverse((due, _, wakeup)) = self.queue.pop()?;
        let waited = due.saturating_sub(self.now);
        self.now = self.now.max(due);
        Some((waited, wakeup))
    }
}

impl Scheduler for VirtualClock {
    fn schedule_once(&mut self, delay: Duration, wakeup: Wakeup) {
        let due = self.now + delay;
        self.queue.push(Reverse((due, self.seq, wakeup)));
        self.seq += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wakeup(kind: WakeupKind, generation: u64) -> Wakeup {
        Wakeup { kind, generation }
    }

    #[test]
    fn test_orders_by_due_time() {
        let mut clock = VirtualClock::new();
        clock.schedule_once(Duration::from_millis(1000), wakeup(WakeupKind::ResumeRound, 1));
        clock.schedule_once(Duration::from_millis(50), wakeup(WakeupKind::Tick, 2));

        assert_eq!(clock.next_due(), Some(Duration::from_millis(50)));
        let (waited, w) = clock.pop_next().unwrap();
        assert_eq!(waited, Duration::from_millis(50));
        assert_eq!(w.generation, 2);

        let (waited, w) = clock.pop_next().unwrap();
        assert_eq!(waited, Duration::from_millis(950));
        assert_eq!(w.kind, WakeupKind::ResumeRound);
        assert_eq!(clock.now(), Duration::from_millis(1000));
        assert!(clock.pop_next().is_none());
    }

    #[test]
    fn test_ties_fire_in_schedule_order() {
        let mut clock = VirtualClock::new();
        for generation in [7, 3, 5] {
            clock.schedule_once(
                Duration::from_millis(50),
                wakeup(WakeupKind::Tick, generation),
            );
        }
        let order: Vec<u64> = std::iter::from_fn(|| clock.pop_next())
            .map(|(_, w)| w.generation)
            .collect();
        assert_eq!(order, vec![7, 3, 5]);
    }

    #[test]
    fn test_pop_due_respects_now() {
        let mut clock = VirtualClock::new();
        clock.schedule_once(Duration::from_millis(50), wakeup(WakeupKind::Tick, 1));

        assert!(clock.pop_due().is_none());
        clock.advance(Duration::from_millis(49));
        assert!(clock.pop_due().is_none());
        clock.advance(Duration::from_millis(1));
        assert_eq!(clock.pop_due(), Some(wakeup(WakeupKind::Tick, 1)));
        assert!(clock.is_idle());
    }
}
