//! The game aggregate.
//!
//! [`Game`] owns every piece of state: timer, points, tasks, bonus wheel and
//! catalog. Each operation mutates the aggregate and returns an [`Outcome`]
//! listing what happened ([`Event`]s) and what must be scheduled
//! ([`Effect`]s). The game never sleeps or spawns; a
//! [`Driver`](crate::Driver) or any other run loop carries out the effects.
//!
//! All operations are total. Rejected attempts (blank task names, unknown
//! ids, locked or unaffordable characters) return an empty outcome and leave
//! state untouched.

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::bonus::{BonusResult, BonusWheel, RandomSource, SpinId};
use crate::catalog::{Catalog, Character, CharacterView};
use crate::command::Command;
use crate::config::GameConfig;
use crate::events::{Event, PointsReason};
use crate::tasks::{SessionId, Task, TaskId, TaskLedger};
use crate::timer::{format_clock, PhaseCompletion, TimerEngine, TimerMode, TimerState};

/// Scheduling requests emitted by state transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Begin a fresh one-second tick sequence, replacing any running one.
    StartTicker,
    StopTicker,
    ScheduleReveal { spin: SpinId, delay: Duration },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    pub events: Vec<Event>,
    pub effects: Vec<Effect>,
}

impl Outcome {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.effects.is_empty()
    }

    fn event(&mut self, event: Event) {
        self.events.push(event);
    }

    fn effect(&mut self, effect: Effect) {
        self.effects.push(effect);
    }
}

/// Full observable state, for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub clock: String,
    pub time_left_secs: u64,
    pub mode: TimerMode,
    pub mode_label: String,
    pub is_running: bool,
    pub points: u64,
    pub pomodoros_completed: u32,
    pub session_id: SessionId,
    pub tasks: Vec<Task>,
    pub bonus: BonusResult,
    pub selected_character: Character,
}

pub struct Game<R> {
    config: GameConfig,
    timer: TimerEngine,
    points: u64,
    ledger: TaskLedger,
    bonus: BonusWheel<R>,
    catalog: Catalog,
    session: SessionId,
}

impl<R: RandomSource> Game<R> {
    pub fn new(config: GameConfig, rng: R) -> Self {
        Self {
            timer: TimerEngine::new(config.timer.clone()),
            points: 0,
            ledger: TaskLedger::new(config.points.task, config.points.task_cap_per_session),
            bonus: BonusWheel::new(config.bonus.outcomes.clone(), rng),
            catalog: Catalog::standard(),
            session: SessionId::first(Utc::now()),
            config,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn timer(&self) -> TimerState {
        self.timer.state()
    }

    pub fn points(&self) -> u64 {
        self.points
    }

    pub fn pomodoros_completed(&self) -> u32 {
        self.timer.completed_pomodoros()
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session
    }

    pub fn tasks(&self) -> &[Task] {
        self.ledger.tasks()
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.ledger.get(id)
    }

    pub fn bonus(&self) -> BonusResult {
        self.bonus.result()
    }

    pub fn pending_spins(&self) -> usize {
        self.bonus.pending()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> Vec<CharacterView> {
        self.catalog.view(self.points)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let timer = self.timer.state();
        GameSnapshot {
            clock: format_clock(timer.time_left_secs),
            time_left_secs: timer.time_left_secs,
            mode: timer.mode,
            mode_label: timer.mode.label().to_string(),
            is_running: timer.is_running,
            points: self.points,
            pomodoros_completed: self.timer.completed_pomodoros(),
            session_id: self.session.clone(),
            tasks: self.ledger.tasks().to_vec(),
            bonus: self.bonus.result(),
            selected_character: self.catalog.selected().clone(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn apply(&mut self, command: Command) -> Outcome {
        match command {
            Command::ToggleTimer => self.toggle_timer(),
            Command::SkipTimer => self.skip_timer(),
            Command::AddTask(name) => self.add_task(&name),
            Command::CompleteTask(id) => self.complete_task(id),
            Command::Purchase(id) => self.purchase(&id),
            Command::Select(id) => self.select(&id),
        }
    }

    pub fn toggle_timer(&mut self) -> Outcome {
        let mut out = Outcome::default();
        let running = self.timer.toggle();
        let state = self.timer.state();
        if running {
            out.event(Event::TimerStarted {
                mode: state.mode,
                time_left_secs: state.time_left_secs,
                at: Utc::now(),
            });
            out.effect(Effect::StartTicker);
        } else {
            out.event(Event::TimerPaused {
                mode: state.mode,
                time_left_secs: state.time_left_secs,
                at: Utc::now(),
            });
            out.effect(Effect::StopTicker);
        }
        out
    }

    /// Advance to the next phase with no rewards of any kind.
    pub fn skip_timer(&mut self) -> Outcome {
        let skip = self.timer.skip();
        tracing::info!(from = %skip.from, to = %skip.to, "phase skipped");
        let mut out = Outcome::default();
        out.event(Event::TimerSkipped {
            from: skip.from,
            to: skip.to,
            at: Utc::now(),
        });
        out.effect(Effect::StopTicker);
        out
    }

    /// One elapsed second of the running timer.
    pub fn tick(&mut self) -> Outcome {
        match self.timer.tick() {
            Some(done) => self.complete_phase(done),
            None => Outcome::default(),
        }
    }

    pub fn add_task(&mut self, name: &str) -> Outcome {
        let mut out = Outcome::default();
        match self.ledger.add(name, &self.session) {
            Some(task) => out.event(Event::TaskAdded {
                task_id: task.id,
                name: task.name.clone(),
                at: Utc::now(),
            }),
            None => tracing::debug!("ignored blank task name"),
        }
        out
    }

    pub fn complete_task(&mut self, id: TaskId) -> Outcome {
        let mut out = Outcome::default();
        let Some(done) = self.ledger.complete(id, &self.session) else {
            tracing::debug!(task = %id, "ignored completion of unknown or finished task");
            return out;
        };
        out.event(Event::TaskCompleted {
            task_id: done.task_id,
            points_awarded: done.awarded,
            at: Utc::now(),
        });
        if done.awarded > 0 {
            self.award(&mut out, done.awarded, PointsReason::Task);
        } else {
            tracing::info!(task = %id, "session task cap reached, no points awarded");
        }
        out
    }

    pub fn purchase(&mut self, character_id: &str) -> Outcome {
        let mut out = Outcome::default();
        let Some(cost) = self.catalog.purchase(character_id, self.points) else {
            tracing::debug!(character = character_id, points = self.points, "purchase rejected");
            return out;
        };
        self.points -= cost;
        tracing::info!(character = character_id, cost, total = self.points, "character unlocked");
        out.event(Event::CharacterUnlocked {
            character_id: character_id.to_string(),
            at: Utc::now(),
        });
        out.event(Event::PointsSpent {
            amount: cost,
            character_id: character_id.to_string(),
            total: self.points,
            at: Utc::now(),
        });
        out
    }

    pub fn select(&mut self, character_id: &str) -> Outcome {
        let mut out = Outcome::default();
        if self.catalog.select(character_id) {
            out.event(Event::CharacterSelected {
                character_id: character_id.to_string(),
                at: Utc::now(),
            });
        } else {
            tracing::debug!(character = character_id, "selection rejected");
        }
        out
    }

    /// Settle a scheduled bonus reveal. Unknown or settled spins are ignored.
    pub fn reveal_bonus(&mut self, spin: SpinId) -> Outcome {
        let mut out = Outcome::default();
        let Some(amount) = self.bonus.reveal(spin) else {
            return out;
        };
        tracing::info!(%spin, amount, "bonus revealed");
        out.event(Event::BonusRevealed {
            spin,
            points: amount,
            at: Utc::now(),
        });
        self.award(&mut out, amount, PointsReason::Bonus);
        out
    }

    /// Drop every unrevealed spin; used when the run loop is torn down.
    pub fn cancel_pending_spins(&mut self) {
        self.bonus.cancel_pending();
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete_phase(&mut self, done: PhaseCompletion) -> Outcome {
        let mut out = Outcome::default();
        tracing::info!(
            finished = %done.finished,
            next = %done.next,
            pomodoros = done.pomodoros_completed,
            "phase completed"
        );
        out.event(Event::PhaseCompleted {
            finished: done.finished,
            next: done.next,
            pomodoros_completed: done.pomodoros_completed,
            at: Utc::now(),
        });
        out.effect(Effect::StopTicker);

        if done.finished == TimerMode::Work {
            self.award(&mut out, self.config.points.pomodoro, PointsReason::Pomodoro);

            let spin = self.bonus.spin();
            out.event(Event::BonusSpinStarted {
                spin,
                at: Utc::now(),
            });
            out.effect(Effect::ScheduleReveal {
                spin,
                delay: Duration::from_millis(self.config.bonus.reveal_delay_ms),
            });

            self.session = self.session.successor(Utc::now());
            out.event(Event::SessionStarted {
                session_id: self.session.clone(),
                at: Utc::now(),
            });
        } else {
            self.award(&mut out, self.config.points.break_complete, PointsReason::BreakComplete);
        }
        out
    }

    fn award(&mut self, out: &mut Outcome, amount: u64, reason: PointsReason) {
        self.points = self.points.saturating_add(amount);
        out.event(Event::PointsAwarded {
            amount,
            reason,
            total: self.points,
            at: Utc::now(),
        });
    }
}
