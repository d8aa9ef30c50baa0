//! Countdown state machine.
//!
//! The engine has no internal clock or thread. The caller delivers one
//! `tick()` per elapsed second while the timer runs; the engine only counts.
//!
//! ## Phase Transitions
//!
//! ```text
//! Work --(complete | skip)--> ShortBreak | LongBreak
//! ShortBreak | LongBreak --(complete | skip)--> Work
//! ```
//!
//! Both paths pick the next phase with the same rule, evaluated against the
//! Pomodoro count before it is incremented. Only natural completion counts a
//! Pomodoro; rewards are layered on top by [`Game`](crate::Game).

use serde::{Deserialize, Serialize};

use super::mode::TimerMode;
use crate::config::TimerConfig;

/// Observable countdown state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub time_left_secs: u64,
    pub mode: TimerMode,
    pub is_running: bool,
}

/// A phase that ran down to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseCompletion {
    pub finished: TimerMode,
    pub next: TimerMode,
    /// Pomodoro count after this completion.
    pub pomodoros_completed: u32,
}

/// A phase abandoned via skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseSkip {
    pub from: TimerMode,
    pub to: TimerMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    config: TimerConfig,
    state: TimerState,
    completed_pomodoros: u32,
}

impl TimerEngine {
    /// Starts paused in `Work` with a full countdown.
    pub fn new(config: TimerConfig) -> Self {
        let time_left_secs = config.duration_secs(TimerMode::Work);
        Self {
            config,
            state: TimerState {
                time_left_secs,
                mode: TimerMode::Work,
                is_running: false,
            },
            completed_pomodoros: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn mode(&self) -> TimerMode {
        self.state.mode
    }

    pub fn time_left_secs(&self) -> u64 {
        self.state.time_left_secs
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    pub fn completed_pomodoros(&self) -> u32 {
        self.completed_pomodoros
    }

    pub fn duration_secs(&self, mode: TimerMode) -> u64 {
        self.config.duration_secs(mode)
    }

    /// The phase that follows the current one.
    pub fn next_mode(&self) -> TimerMode {
        match self.state.mode {
            TimerMode::Work => {
                let every = self.config.long_break_every.max(1);
                if self.completed_pomodoros % every == every - 1 {
                    TimerMode::LongBreak
                } else {
                    TimerMode::ShortBreak
                }
            }
            TimerMode::ShortBreak | TimerMode::LongBreak => TimerMode::Work,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Flip running/paused. Returns the new running flag.
    pub fn toggle(&mut self) -> bool {
        self.state.is_running = !self.state.is_running;
        self.state.is_running
    }

    /// Jump to the next phase without counting a Pomodoro.
    pub fn skip(&mut self) -> PhaseSkip {
        let from = self.state.mode;
        let to = self.next_mode();
        self.enter(to);
        PhaseSkip { from, to }
    }

    /// One elapsed second. Returns `Some` when the phase runs out.
    ///
    /// Ignored while paused.
    pub fn tick(&mut self) -> Option<PhaseCompletion> {
        if !self.state.is_running {
            return None;
        }
        self.state.time_left_secs = self.state.time_left_secs.saturating_sub(1);
        if self.state.time_left_secs > 0 {
            return None;
        }

        let finished = self.state.mode;
        let next = self.next_mode();
        if finished == TimerMode::Work {
            self.completed_pomodoros += 1;
        }
        self.enter(next);
        Some(PhaseCompletion {
            finished,
            next,
            pomodoros_completed: self.completed_pomodoros,
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn enter(&mut self, mode: TimerMode) {
        self.state = TimerState {
            time_left_secs: self.config.duration_secs(mode),
            mode,
            is_running: false,
        };
    }
}
