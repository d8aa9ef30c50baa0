mod engine;
mod mode;

pub use engine::{PhaseCompletion, PhaseSkip, TimerEngine, TimerState};
pub use mode::{format_clock, TimerMode};
