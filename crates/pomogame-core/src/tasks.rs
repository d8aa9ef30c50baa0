//! Task ledger and session scoping.
//!
//! Tasks are append-only and complete at most once. Point-earning
//! completions are capped per session, where a session is the span between
//! two natural work-phase completions.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TaskId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Token identifying a session.
///
/// Minted from the wall clock, with a sequence number so that two sessions
/// started within the same instant never compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId {
    pub seq: u64,
    pub started_at: DateTime<Utc>,
}

impl SessionId {
    pub fn first(now: DateTime<Utc>) -> Self {
        Self {
            seq: 0,
            started_at: now,
        }
    }

    pub fn successor(&self, now: DateTime<Utc>) -> Self {
        Self {
            seq: self.seq + 1,
            started_at: now,
        }
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.started_at.timestamp_millis(), self.seq)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub completed: bool,
    pub points: u64,
    pub session_id: SessionId,
}

/// Result of completing a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskCompletion {
    pub task_id: TaskId,
    /// Zero when the session cap was already reached.
    pub awarded: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskLedger {
    tasks: Vec<Task>,
    task_points: u64,
    cap_per_session: usize,
}

impl TaskLedger {
    pub fn new(task_points: u64, cap_per_session: usize) -> Self {
        Self {
            tasks: Vec::new(),
            task_points,
            cap_per_session,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Completed tasks tagged with `session`.
    pub fn completed_in_session(&self, session: &SessionId) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.completed && &t.session_id == session)
            .count()
    }

    /// Append a task. Names that are blank after trimming are ignored.
    ///
    /// The stored name keeps the text exactly as entered.
    pub fn add(&mut self, name: &str, session: &SessionId) -> Option<&Task> {
        if name.trim().is_empty() {
            return None;
        }
        self.tasks.push(Task {
            id: TaskId::new(),
            name: name.to_string(),
            completed: false,
            points: self.task_points,
            session_id: session.clone(),
        });
        self.tasks.last()
    }

    /// Mark a task completed, awarding its points if `current` is under the cap.
    ///
    /// The cap counts completions in the live session, not the task's own
    /// session: a task created in an earlier session is still gated by how
    /// many tasks were completed in the current one.
    ///
    /// Returns `None` for unknown or already completed tasks.
    pub fn complete(&mut self, id: TaskId, current: &SessionId) -> Option<TaskCompletion> {
        let already = self.completed_in_session(current);
        let task = self.tasks.iter_mut().find(|t| t.id == id && !t.completed)?;
        let awarded = if already < self.cap_per_session {
            task.points
        } else {
            0
        };
        task.completed = true;
        Some(TaskCompletion {
            task_id: task.id,
            awarded,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn session() -> SessionId {
        SessionId::first(Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap())
    }

    #[test]
    fn blank_names_are_ignored() {
        let mut ledger = TaskLedger::new(50, 3);
        assert!(ledger.add("  ", &session()).is_none());
        assert!(ledger.add("", &session()).is_none());
        assert!(ledger.add("\t\n", &session()).is_none());
        assert!(ledger.is_empty());
    }

    #[test]
    fn add_appends_open_task() {
        let mut ledger = TaskLedger::new(50, 3);
        let s = session();
        let task = ledger.add("Write report", &s).unwrap().clone();
        assert_eq!(task.name, "Write report");
        assert_eq!(task.points, 50);
        assert!(!task.completed);
        assert_eq!(task.session_id, s);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn ids_are_unique() {
        let mut ledger = TaskLedger::new(50, 3);
        let s = session();
        let a = ledger.add("a", &s).unwrap().id;
        let b = ledger.add("b", &s).unwrap().id;
        assert_ne!(a, b);
    }

    #[test]
    fn cap_applies_after_three() {
        let mut ledger = TaskLedger::new(50, 3);
        let s = session();
        let ids: Vec<_> = (0..4).map(|i| ledger.add(&format!("t{i}"), &s).unwrap().id).collect();
        let awarded: Vec<_> = ids
            .iter()
            .map(|id| ledger.complete(*id, &s).unwrap().awarded)
            .collect();
        assert_eq!(awarded, vec![50, 50, 50, 0]);
        assert!(ledger.tasks().iter().all(|t| t.completed));
    }

    #[test]
    fn completing_twice_is_noop() {
        let mut ledger = TaskLedger::new(50, 3);
        let s = session();
        let id = ledger.add("once", &s).unwrap().id;
        assert!(ledger.complete(id, &s).is_some());
        assert!(ledger.complete(id, &s).is_none());
        assert_eq!(ledger.completed_in_session(&s), 1);
    }

    #[test]
    fn unknown_task_is_noop() {
        let mut ledger = TaskLedger::new(50, 3);
        let s = session();
        ledger.add("real", &s);
        assert!(ledger.complete(TaskId::new(), &s).is_none());
        assert!(!ledger.tasks()[0].completed);
    }

    #[test]
    fn session_ids_differ_within_same_instant() {
        let s = session();
        let next = s.successor(s.started_at);
        assert_ne!(s, next);
    }

    #[test]
    fn task_id_parses_from_display() {
        let id = TaskId::new();
        assert_eq!(id.to_string().parse::<TaskId>().unwrap(), id);
    }
}
