//! Couples a [`Game`] with a [`Scheduler`] under a logical clock.
//!
//! Tests and simulations call [`Driver::advance`] to move time forward
//! deterministically. A real-time loop maps its own clock onto the same
//! millisecond axis and calls [`Driver::advance_to`] when
//! [`Driver::next_due`] passes.

use std::time::Duration;

use crate::bonus::RandomSource;
use crate::command::Command;
use crate::events::Event;
use crate::game::{Effect, Game, Outcome};
use crate::scheduler::{Due, Scheduler};

pub struct Driver<R> {
    game: Game<R>,
    scheduler: Scheduler,
    now_ms: u64,
}

impl<R: RandomSource> Driver<R> {
    pub fn new(game: Game<R>) -> Self {
        Self {
            game,
            scheduler: Scheduler::new(),
            now_ms: 0,
        }
    }

    pub fn game(&self) -> &Game<R> {
        &self.game
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn next_due(&self) -> Option<u64> {
        self.scheduler.next_due()
    }

    /// Apply a user command at the current instant.
    pub fn dispatch(&mut self, command: Command) -> Vec<Event> {
        let outcome = self.game.apply(command);
        self.carry_out(outcome)
    }

    pub fn advance(&mut self, by: Duration) -> Vec<Event> {
        let target = self
            .now_ms
            .saturating_add(u64::try_from(by.as_millis()).unwrap_or(u64::MAX));
        self.advance_to(target)
    }

    /// Fire every callback due up to `target_ms`, in deadline order.
    ///
    /// Moving backwards is a no-op.
    pub fn advance_to(&mut self, target_ms: u64) -> Vec<Event> {
        let mut events = Vec::new();
        while let Some((at, due)) = self.scheduler.pop_due(target_ms) {
            self.now_ms = self.now_ms.max(at);
            let outcome = match due {
                Due::Tick => self.game.tick(),
                Due::Reveal(spin) => self.game.reveal_bonus(spin),
            };
            events.extend(self.carry_out(outcome));
        }
        self.now_ms = self.now_ms.max(target_ms);
        events
    }

    /// Cancel the ticker and every unrevealed spin.
    pub fn shutdown(&mut self) {
        let dropped = self.scheduler.pending_reveals();
        if dropped > 0 {
            tracing::info!(dropped, "discarding unrevealed bonus spins");
        }
        self.scheduler.shutdown();
        self.game.cancel_pending_spins();
    }

    pub fn into_game(self) -> Game<R> {
        self.game
    }

    fn carry_out(&mut self, outcome: Outcome) -> Vec<Event> {
        for effect in outcome.effects {
            match effect {
                Effect::StartTicker => self.scheduler.start_ticker(self.now_ms),
                Effect::StopTicker => self.scheduler.stop_ticker(),
                Effect::ScheduleReveal { spin, delay } => {
                    self.scheduler.schedule_reveal(spin, self.now_ms, delay)
                }
            }
        }
        outcome.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonus::ScriptedRandom;
    use crate::config::GameConfig;
    use crate::timer::TimerMode;

    fn driver(picks: &[usize]) -> Driver<ScriptedRandom> {
        Driver::new(Game::new(
            GameConfig::default(),
            ScriptedRandom::new(picks.iter().copied()),
        ))
    }

    #[test]
    fn running_timer_counts_down_in_real_seconds() {
        let mut d = driver(&[]);
        d.dispatch(Command::ToggleTimer);
        d.advance(Duration::from_millis(10_500));
        assert_eq!(d.game().timer().time_left_secs, 1490);
    }

    #[test]
    fn pause_cancels_ticks() {
        let mut d = driver(&[]);
        d.dispatch(Command::ToggleTimer);
        d.advance(Duration::from_secs(5));
        d.dispatch(Command::ToggleTimer);
        d.advance(Duration::from_secs(60));
        assert_eq!(d.game().timer().time_left_secs, 1495);
        assert!(!d.scheduler().is_ticking());
    }

    #[test]
    fn double_start_does_not_double_tick() {
        let mut d = driver(&[]);
        d.dispatch(Command::ToggleTimer);
        d.dispatch(Command::ToggleTimer);
        d.dispatch(Command::ToggleTimer);
        d.advance(Duration::from_secs(10));
        assert_eq!(d.game().timer().time_left_secs, 1490);
    }

    #[test]
    fn bonus_paid_two_seconds_after_pomodoro() {
        let mut d = driver(&[4]);
        d.dispatch(Command::ToggleTimer);
        d.advance(Duration::from_secs(1500));
        assert_eq!(d.game().timer().mode, TimerMode::ShortBreak);
        assert_eq!(d.game().points(), 200);
        assert!(d.game().bonus().is_spinning);

        d.advance(Duration::from_millis(1999));
        assert_eq!(d.game().points(), 200);
        d.advance(Duration::from_millis(1));
        assert_eq!(d.game().points(), 1200);
        assert!(!d.game().bonus().is_spinning);
    }

    #[test]
    fn timer_does_not_auto_continue() {
        let mut d = driver(&[]);
        d.dispatch(Command::ToggleTimer);
        d.advance(Duration::from_secs(1600));
        assert_eq!(d.game().timer().time_left_secs, 300);
        assert!(!d.game().timer().is_running);
    }

    #[test]
    fn shutdown_forfeits_unrevealed_bonus() {
        let mut d = driver(&[4]);
        d.dispatch(Command::ToggleTimer);
        d.advance(Duration::from_secs(1500));
        d.shutdown();
        d.advance(Duration::from_secs(10));
        assert_eq!(d.game().points(), 200);
        assert_eq!(d.game().pending_spins(), 0);
    }

    #[test]
    fn advance_backwards_is_noop() {
        let mut d = driver(&[]);
        d.advance(Duration::from_secs(3));
        assert!(d.advance_to(1000).is_empty());
        assert_eq!(d.now_ms(), 3000);
    }
}
