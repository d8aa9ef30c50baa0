//! Deterministic play-through on the logical clock.
//!
//! Each round adds and completes `--tasks` tasks, runs a full work phase,
//! waits out the bonus reveal and then runs the following break.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use pomogame_core::{Command, Driver, Game, GameConfig, RandomSource, SeededRandom};

#[derive(Args)]
pub struct SimulateArgs {
    /// Rules file; stock rules when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Seed for the bonus wheel
    #[arg(long, default_value = "0")]
    pub seed: u64,
    /// Number of Pomodoros to complete
    #[arg(long, default_value = "4")]
    pub pomodoros: u32,
    /// Tasks added and completed before each Pomodoro
    #[arg(long, default_value = "0")]
    pub tasks: u32,
    /// Print every event as a JSON line before the final snapshot
    #[arg(long)]
    pub events: bool,
}

pub fn run(args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = GameConfig::load_or_default(args.config.as_deref())?;
    let mut driver = Driver::new(Game::new(config, SeededRandom::new(args.seed)));

    for round in 0..args.pomodoros {
        for n in 0..args.tasks {
            emit(&args, driver.dispatch(Command::AddTask(format!("Task {}.{}", round + 1, n + 1))))?;
        }
        let open: Vec<_> = driver
            .game()
            .tasks()
            .iter()
            .filter(|t| !t.completed)
            .map(|t| t.id)
            .collect();
        for id in open {
            emit(&args, driver.dispatch(Command::CompleteTask(id)))?;
        }

        run_phase(&mut driver, &args)?;
        run_phase(&mut driver, &args)?;
    }
    driver.shutdown();

    println!("{}", serde_json::to_string_pretty(&driver.game().snapshot())?);
    Ok(())
}

/// Start the timer, let the phase run out and settle any pending reveal.
fn run_phase<R: RandomSource>(
    driver: &mut Driver<R>,
    args: &SimulateArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let left = driver.game().timer().time_left_secs;
    emit(args, driver.dispatch(Command::ToggleTimer))?;
    emit(args, driver.advance(Duration::from_secs(left)))?;
    let reveal = Duration::from_millis(driver.game().config().bonus.reveal_delay_ms);
    emit(args, driver.advance(reveal))?;
    Ok(())
}

fn emit(
    args: &SimulateArgs,
    events: Vec<pomogame_core::Event>,
) -> Result<(), Box<dyn std::error::Error>> {
    if args.events {
        for event in events {
            println!("{}", serde_json::to_string(&event)?);
        }
    }
    Ok(())
}
