//! Logical-clock bookkeeping for the two kinds of delayed callback.
//!
//! Time is a millisecond offset from an arbitrary origin chosen by the run
//! loop. The scheduler owns at most one repeating tick and any number of
//! one-shot bonus reveals; it never sleeps itself.

use std::collections::VecDeque;
use std::time::Duration;

use crate::bonus::SpinId;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// A callback whose deadline has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Due {
    Tick,
    Reveal(SpinId),
}

#[derive(Debug, Default)]
pub struct Scheduler {
    next_tick_ms: Option<u64>,
    /// Sorted by deadline; equal deadlines keep scheduling order.
    reveals: VecDeque<(u64, SpinId)>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ticking(&self) -> bool {
        self.next_tick_ms.is_some()
    }

    pub fn pending_reveals(&self) -> usize {
        self.reveals.len()
    }

    /// Arm the ticker one interval from `now_ms`, replacing any armed ticker.
    pub fn start_ticker(&mut self, now_ms: u64) {
        if self.next_tick_ms.is_some() {
            tracing::debug!("restarting ticker");
        }
        self.next_tick_ms = Some(now_ms + interval_ms(TICK_INTERVAL));
    }

    pub fn stop_ticker(&mut self) {
        self.next_tick_ms = None;
    }

    pub fn schedule_reveal(&mut self, spin: SpinId, now_ms: u64, delay: Duration) {
        let at = now_ms + interval_ms(delay);
        let pos = self.reveals.partition_point(|(t, _)| *t <= at);
        self.reveals.insert(pos, (at, spin));
    }

    /// Earliest pending deadline.
    pub fn next_due(&self) -> Option<u64> {
        let reveal = self.reveals.front().map(|(t, _)| *t);
        match (self.next_tick_ms, reveal) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Pop the earliest callback due at or before `now_ms`.
    ///
    /// A reveal wins a tie with the tick. Popping a tick re-arms it one
    /// interval after its own deadline, so ticks never drift.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(u64, Due)> {
        let reveal_at = self.reveals.front().map(|(t, _)| *t).filter(|t| *t <= now_ms);
        let tick_at = self.next_tick_ms.filter(|t| *t <= now_ms);
        match (reveal_at, tick_at) {
            (Some(r), Some(t)) if t < r => self.take_tick(t),
            (Some(_), _) => {
                let (at, spin) = self.reveals.pop_front()?;
                Some((at, Due::Reveal(spin)))
            }
            (None, Some(t)) => self.take_tick(t),
            (None, None) => None,
        }
    }

    /// Cancel everything. Nothing fires afterwards.
    pub fn shutdown(&mut self) {
        self.next_tick_ms = None;
        self.reveals.clear();
    }

    fn take_tick(&mut self, at: u64) -> Option<(u64, Due)> {
        self.next_tick_ms = Some(at + interval_ms(TICK_INTERVAL));
        Some((at, Due::Tick))
    }
}

fn interval_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
