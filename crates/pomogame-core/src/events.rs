use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bonus::SpinId;
use crate::tasks::{SessionId, TaskId};
use crate::timer::TimerMode;

/// Why points were credited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointsReason {
    Pomodoro,
    BreakComplete,
    Task,
    Bonus,
}

/// Every observable state change produces an Event.
/// Rejected commands produce none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        mode: TimerMode,
        time_left_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: TimerMode,
        time_left_secs: u64,
        at: DateTime<Utc>,
    },
    TimerSkipped {
        from: TimerMode,
        to: TimerMode,
        at: DateTime<Utc>,
    },
    PhaseCompleted {
        finished: TimerMode,
        next: TimerMode,
        pomodoros_completed: u32,
        at: DateTime<Utc>,
    },
    PointsAwarded {
        amount: u64,
        reason: PointsReason,
        total: u64,
        at: DateTime<Utc>,
    },
    PointsSpent {
        amount: u64,
        character_id: String,
        total: u64,
        at: DateTime<Utc>,
    },
    SessionStarted {
        session_id: SessionId,
        at: DateTime<Utc>,
    },
    TaskAdded {
        task_id: TaskId,
        name: String,
        at: DateTime<Utc>,
    },
    TaskCompleted {
        task_id: TaskId,
        points_awarded: u64,
        at: DateTime<Utc>,
    },
    BonusSpinStarted {
        spin: SpinId,
        at: DateTime<Utc>,
    },
    BonusRevealed {
        spin: SpinId,
        points: u64,
        at: DateTime<Utc>,
    },
    CharacterUnlocked {
        character_id: String,
        at: DateTime<Utc>,
    },
    CharacterSelected {
        character_id: String,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Points credited by this event, if any.
    pub fn points_awarded(&self) -> Option<(u64, PointsReason)> {
        match self {
            Event::PointsAwarded { amount, reason, .. } => Some((*amount, *reason)),
            _ => None,
        }
    }
}
