//! # PomoGame Core Library
//!
//! Business logic for PomoGame, a Pomodoro timer with a points economy and
//! unlockable characters. Everything lives in memory for the lifetime of the
//! process; nothing is persisted.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a countdown state machine advanced one `tick()` per
//!   elapsed second by the caller
//! - **Game**: the single owned aggregate; operations return an [`Outcome`]
//!   of events plus scheduling effects instead of touching a clock
//! - **Scheduler / Driver**: a logical clock that turns effects into ordered
//!   tick and bonus-reveal callbacks
//!
//! ## Key Components
//!
//! - [`Game`]: timer, points, tasks, bonus wheel and catalog
//! - [`Driver`]: deterministic run loop over [`Game`]
//! - [`GameConfig`]: TOML game rules
//! - [`RandomSource`]: injectable randomness for the bonus wheel

pub mod bonus;
pub mod catalog;
pub mod command;
pub mod config;
pub mod driver;
pub mod error;
pub mod events;
pub mod game;
pub mod scheduler;
pub mod tasks;
pub mod timer;

pub use bonus::{BonusResult, BonusWheel, RandomSource, ScriptedRandom, SeededRandom, SpinId, ThreadRandom};
pub use catalog::{Catalog, Character, CharacterView};
pub use command::Command;
pub use config::{BonusConfig, GameConfig, PointsConfig, TimerConfig};
pub use driver::Driver;
pub use error::{CommandError, ConfigError, CoreError, Result};
pub use events::{Event, PointsReason};
pub use game::{Effect, Game, GameSnapshot, Outcome};
pub use scheduler::{Due, Scheduler, TICK_INTERVAL};
pub use tasks::{SessionId, Task, TaskId, TaskLedger};
pub use timer::{format_clock, TimerEngine, TimerMode, TimerState};
