//! Interactive play on a single-threaded tokio run loop.
//!
//! stdin lines are commands. The loop sleeps until the driver's next
//! deadline or the next line, whichever comes first, so ticks and bonus
//! reveals are serialized with user input.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use pomogame_core::{
    format_clock, Command, CommandError, Driver, Event, Game, GameConfig, PointsReason,
    RandomSource, SeededRandom, ThreadRandom,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;

#[derive(Args)]
pub struct PlayArgs {
    /// Rules file; stock rules when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Seed the bonus wheel for a reproducible game
    #[arg(long)]
    pub seed: Option<u64>,
    /// Print events as JSON lines instead of text
    #[arg(long)]
    pub json: bool,
}

/// One line of user input.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Game(Command),
    Status,
    Tasks,
    Store,
    Help,
    Quit,
}

fn parse_input(line: &str) -> Result<Input, CommandError> {
    match line.trim().to_ascii_lowercase().as_str() {
        "status" | "s" => Ok(Input::Status),
        "tasks" | "t" => Ok(Input::Tasks),
        "store" => Ok(Input::Store),
        "help" | "?" => Ok(Input::Help),
        "quit" | "exit" | "q" => Ok(Input::Quit),
        _ => line.parse().map(Input::Game),
    }
}

const HELP: &str = "\
commands:
  start | pause | toggle   start or pause the timer
  skip                     move to the next phase (no rewards)
  add <name>               add a task
  done <task-id>           complete a task
  buy <character-id>       unlock a character
  select <character-id>    choose an unlocked character
  status | tasks | store   show state
  quit";

pub fn run(args: PlayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = GameConfig::load_or_default(args.config.as_deref())?;
    let rng: Box<dyn RandomSource> = match args.seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    };
    let driver = Driver::new(Game::new(config, rng));
    tracing::info!(seed = ?args.seed, "starting game");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(play_loop(driver, args.json))
}

async fn play_loop<R: RandomSource>(
    mut driver: Driver<R>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let origin = Instant::now();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut out = Output { json };

    if !json {
        println!("{HELP}");
        out.status(&driver);
    }

    loop {
        let deadline = driver
            .next_due()
            .map(|ms| origin + Duration::from_millis(ms));

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                // Deliver anything that fell due while waiting on input first.
                let events = driver.advance_to(elapsed_ms(origin));
                out.events(&events)?;

                match parse_input(&line) {
                    Ok(Input::Game(command)) => {
                        let events = driver.dispatch(command);
                        if events.is_empty() && !json {
                            println!("(nothing happened)");
                        }
                        out.events(&events)?;
                    }
                    Ok(Input::Status) => out.status(&driver),
                    Ok(Input::Tasks) => out.tasks(&driver)?,
                    Ok(Input::Store) => out.store(&driver)?,
                    Ok(Input::Help) => println!("{HELP}"),
                    Ok(Input::Quit) => break,
                    Err(CommandError::Empty) => {}
                    Err(e) => eprintln!("error: {e}"),
                }
            }
            _ = wait_until(deadline) => {
                let events = driver.advance_to(elapsed_ms(origin));
                out.events(&events)?;
                if !json && driver.game().timer().is_running {
                    out.countdown(&driver);
                }
            }
        }
    }

    driver.shutdown();
    tracing::info!(points = driver.game().points(), "game over");
    Ok(())
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}

fn elapsed_ms(origin: Instant) -> u64 {
    u64::try_from(origin.elapsed().as_millis()).unwrap_or(u64::MAX)
}

struct Output {
    json: bool,
}

impl Output {
    fn events(&mut self, events: &[Event]) -> Result<(), Box<dyn std::error::Error>> {
        for event in events {
            if self.json {
                println!("{}", serde_json::to_string(event)?);
            } else if let Some(text) = describe(event) {
                println!("{text}");
            }
        }
        Ok(())
    }

    fn countdown<R: RandomSource>(&mut self, driver: &Driver<R>) {
        let timer = driver.game().timer();
        print!("\r{} {}   ", format_clock(timer.time_left_secs), timer.mode);
        let _ = std::io::stdout().flush();
    }

    fn status<R: RandomSource>(&mut self, driver: &Driver<R>) {
        let snap = driver.game().snapshot();
        if self.json {
            if let Ok(text) = serde_json::to_string(&snap) {
                println!("{text}");
            }
            return;
        }
        let bonus = if snap.bonus.is_spinning {
            "spinning...".to_string()
        } else {
            format!("last bonus {}", snap.bonus.points)
        };
        println!(
            "{} {} [{}] | points {} | pomodoros {} | {} | {} {}",
            snap.clock,
            snap.mode_label,
            if snap.is_running { "running" } else { "paused" },
            snap.points,
            snap.pomodoros_completed,
            bonus,
            snap.selected_character.icon,
            snap.selected_character.name,
        );
    }

    fn tasks<R: RandomSource>(&mut self, driver: &Driver<R>) -> Result<(), Box<dyn std::error::Error>> {
        let tasks = driver.game().tasks();
        if self.json {
            println!("{}", serde_json::to_string(tasks)?);
            return Ok(());
        }
        if tasks.is_empty() {
            println!("no tasks");
        }
        for task in tasks {
            let mark = if task.completed { "x" } else { " " };
            println!("[{mark}] {} {} (+{})", task.id, task.name, task.points);
        }
        Ok(())
    }

    fn store<R: RandomSource>(&mut self, driver: &Driver<R>) -> Result<(), Box<dyn std::error::Error>> {
        let store = driver.game().store();
        if self.json {
            println!("{}", serde_json::to_string(&store)?);
            return Ok(());
        }
        for row in store {
            let c = &row.character;
            let state = if row.selected {
                "selected"
            } else if c.unlocked {
                "unlocked"
            } else if row.affordable {
                "affordable"
            } else {
                "locked"
            };
            println!("{} {:<10} {:<24} {:>6}  {state}", c.icon, c.id, c.name, c.cost);
        }
        Ok(())
    }
}

fn describe(event: &Event) -> Option<String> {
    let text = match event {
        Event::TimerStarted { mode, time_left_secs, .. } => {
            format!("{mode} started ({})", format_clock(*time_left_secs))
        }
        Event::TimerPaused { time_left_secs, .. } => {
            format!("paused at {}", format_clock(*time_left_secs))
        }
        Event::TimerSkipped { from, to, .. } => format!("skipped {from}, now {to}"),
        Event::PhaseCompleted { finished, next, .. } => {
            format!("\n{finished} complete! Up next: {next} (press start)")
        }
        Event::PointsAwarded { amount, reason, total, .. } => {
            let why = match reason {
                PointsReason::Pomodoro => "Pomodoro",
                PointsReason::BreakComplete => "break",
                PointsReason::Task => "task",
                PointsReason::Bonus => "bonus",
            };
            format!("+{amount} points ({why}), total {total}")
        }
        Event::PointsSpent { amount, total, .. } => format!("-{amount} points, total {total}"),
        Event::TaskAdded { task_id, name, .. } => format!("added {task_id} {name}"),
        Event::TaskCompleted { points_awarded: 0, .. } => {
            "task done (session limit reached, no points)".to_string()
        }
        Event::TaskCompleted { .. } => "task done".to_string(),
        Event::BonusSpinStarted { .. } => "bonus wheel spinning...".to_string(),
        Event::BonusRevealed { points, .. } => format!("bonus wheel landed on {points}"),
        Event::CharacterUnlocked { character_id, .. } => format!("unlocked {character_id}"),
        Event::CharacterSelected { character_id, .. } => format!("now playing as {character_id}"),
        Event::SessionStarted { .. } => return None,
    };
    Some(text)
}
