//! TOML-based game rules.
//!
//! Every value has a default matching the stock PomoGame rules:
//! - 25 minute focus, 5 minute short break, 10 minute long break
//! - a long break after every 4th Pomodoro
//! - 200 points per Pomodoro, 50 per break, 50 per task (3 tasks per session)
//! - bonus wheel of 0/50/100/500/1000 revealed after 2 seconds
//!
//! Rules are only ever read; nothing is written back to disk.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ConfigError, Result};
use crate::timer::TimerMode;

/// Phase durations and long-break cadence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_work_secs")]
    pub work_secs: u64,
    #[serde(default = "default_short_break_secs")]
    pub short_break_secs: u64,
    #[serde(default = "default_long_break_secs")]
    pub long_break_secs: u64,
    /// A long break follows every N-th completed Pomodoro.
    #[serde(default = "default_long_break_every")]
    pub long_break_every: u32,
}

/// Point values for each kind of reward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsConfig {
    #[serde(default = "default_pomodoro_points")]
    pub pomodoro: u64,
    #[serde(default = "default_break_points")]
    pub break_complete: u64,
    #[serde(default = "default_task_points")]
    pub task: u64,
    #[serde(default = "default_task_cap")]
    pub task_cap_per_session: usize,
}

/// Bonus wheel configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusConfig {
    #[serde(default = "default_outcomes")]
    pub outcomes: Vec<u64>,
    #[serde(default = "default_reveal_delay_ms")]
    pub reveal_delay_ms: u64,
}

/// Complete game rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub points: PointsConfig,
    #[serde(default)]
    pub bonus: BonusConfig,
}

fn default_work_secs() -> u64 {
    25 * 60
}
fn default_short_break_secs() -> u64 {
    5 * 60
}
fn default_long_break_secs() -> u64 {
    10 * 60
}
fn default_long_break_every() -> u32 {
    4
}
fn default_pomodoro_points() -> u64 {
    200
}
fn default_break_points() -> u64 {
    50
}
fn default_task_points() -> u64 {
    50
}
fn default_task_cap() -> usize {
    3
}
fn default_outcomes() -> Vec<u64> {
    vec![0, 50, 100, 500, 1000]
}
fn default_reveal_delay_ms() -> u64 {
    2000
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_secs: default_work_secs(),
            short_break_secs: default_short_break_secs(),
            long_break_secs: default_long_break_secs(),
            long_break_every: default_long_break_every(),
        }
    }
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            pomodoro: default_pomodoro_points(),
            break_complete: default_break_points(),
            task: default_task_points(),
            task_cap_per_session: default_task_cap(),
        }
    }
}

impl Default for BonusConfig {
    fn default() -> Self {
        Self {
            outcomes: default_outcomes(),
            reveal_delay_ms: default_reveal_delay_ms(),
        }
    }
}

impl TimerConfig {
    /// Fixed duration of a phase, in seconds.
    pub fn duration_secs(&self, mode: TimerMode) -> u64 {
        match mode {
            TimerMode::Work => self.work_secs,
            TimerMode::ShortBreak => self.short_break_secs,
            TimerMode::LongBreak => self.long_break_secs,
        }
    }
}

impl GameConfig {
    /// Parse rules from TOML text and validate them.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let cfg: GameConfig = toml::from_str(content).map_err(ConfigError::from)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load rules from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML,
    /// or contains unusable values.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cfg = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded game rules");
        Ok(cfg)
    }

    /// Load from `path` when given, otherwise the stock rules.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject rules the state machine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let durations = [
            ("timer.work_secs", self.timer.work_secs),
            ("timer.short_break_secs", self.timer.short_break_secs),
            ("timer.long_break_secs", self.timer.long_break_secs),
        ];
        for (key, value) in durations {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "duration must be at least one second".to_string(),
                });
            }
        }
        if self.timer.long_break_every == 0 {
            return Err(ConfigError::InvalidValue {
                key: "timer.long_break_every".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.bonus.outcomes.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "bonus.outcomes".to_string(),
                message: "at least one outcome is required".to_string(),
            });
        }
        Ok(())
    }
}
