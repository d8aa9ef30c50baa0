//! User commands and their text form.
//!
//! ```text
//! toggle | start | pause
//! skip
//! add <task name...>
//! done <task-id>
//! buy <character-id>
//! select <character-id>
//! ```

use std::str::FromStr;

use crate::error::CommandError;
use crate::tasks::TaskId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ToggleTimer,
    SkipTimer,
    AddTask(String),
    CompleteTask(TaskId),
    Purchase(String),
    Select(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line.trim_end(), ""),
        };
        if word.is_empty() {
            return Err(CommandError::Empty);
        }

        let required = |expected: &'static str| {
            if rest.is_empty() {
                Err(CommandError::MissingArgument {
                    command: word.to_string(),
                    expected,
                })
            } else {
                Ok(rest)
            }
        };

        match word.to_ascii_lowercase().as_str() {
            "toggle" | "start" | "pause" => Ok(Command::ToggleTimer),
            "skip" => Ok(Command::SkipTimer),
            // Blank names are rejected by the ledger, not here.
            "add" => Ok(Command::AddTask(rest.to_string())),
            "done" | "complete" => {
                let raw = required("task id")?;
                raw.parse::<TaskId>()
                    .map(Command::CompleteTask)
                    .map_err(|_| CommandError::InvalidTaskId(raw.to_string()))
            }
            "buy" | "purchase" => Ok(Command::Purchase(required("character id")?.to_string())),
            "select" => Ok(Command::Select(required("character id")?.to_string())),
            _ => Err(CommandError::Unknown(word.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_timer_words() {
        assert_eq!("start".parse::<Command>(), Ok(Command::ToggleTimer));
        assert_eq!(" Pause ".parse::<Command>(), Ok(Command::ToggleTimer));
        assert_eq!("skip".parse::<Command>(), Ok(Command::SkipTimer));
    }

    #[test]
    fn add_keeps_rest_of_line() {
        assert_eq!(
            "add Write the report".parse::<Command>(),
            Ok(Command::AddTask("Write the report".into()))
        );
        assert_eq!("add".parse::<Command>(), Ok(Command::AddTask(String::new())));
    }

    #[test]
    fn done_needs_valid_id() {
        let id = TaskId::new();
        assert_eq!(
            format!("done {id}").parse::<Command>(),
            Ok(Command::CompleteTask(id))
        );
        assert_eq!(
            "done 42".parse::<Command>(),
            Err(CommandError::InvalidTaskId("42".into()))
        );
        assert!(matches!(
            "done".parse::<Command>(),
            Err(CommandError::MissingArgument { .. })
        ));
    }

    #[test]
    fn store_words() {
        assert_eq!("buy ninja".parse::<Command>(), Ok(Command::Purchase("ninja".into())));
        assert_eq!("select cat".parse::<Command>(), Ok(Command::Select("cat".into())));
    }

    #[test]
    fn rejects_unknown_and_empty() {
        assert_eq!("   ".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "dance".parse::<Command>(),
            Err(CommandError::Unknown("dance".into()))
        );
    }
}
