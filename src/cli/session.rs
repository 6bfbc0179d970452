use std::{io::Write, str::FromStr};

use anyhow::Result;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use crate::{
    storage::{entry_storage::EntryStorage, error::StorageError},
    tracker::{
        entities::{Activity, FitnessEntry},
        error::ParseError,
        goal::check_goal_reached,
        EntryStore,
    },
    utils::clock::Clock,
};

use super::output::Printer;

const ADD_USAGE: &str = "add <activity> <steps> <calories>";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Unknown command {0:?}, type `help` to see available commands")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    Usage(&'static str),
}

/// A single action the user can take. Both subcommands and lines typed into an interactive
/// session end up as one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Add {
        activity: Activity,
        steps: String,
        calories: String,
    },
    /// Empty value clears the goal.
    Goal(String),
    Total,
    List,
    Save,
    Help,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let Some(name) = words.next() else {
            return Err(SessionError::UnknownCommand(String::new()));
        };
        let args = words.collect::<Vec<_>>();

        match name.to_lowercase().as_str() {
            "add" => {
                let (activity, steps, calories) = match args.as_slice() {
                    [activity] => (activity, "", ""),
                    [activity, steps] => (activity, *steps, ""),
                    [activity, steps, calories] => (activity, *steps, *calories),
                    _ => return Err(SessionError::Usage(ADD_USAGE)),
                };
                Ok(SessionCommand::Add {
                    activity: activity.parse()?,
                    steps: steps.to_string(),
                    calories: calories.to_string(),
                })
            }
            "goal" => Ok(SessionCommand::Goal(args.join(" "))),
            "total" => Ok(SessionCommand::Total),
            "list" => Ok(SessionCommand::List),
            "save" => Ok(SessionCommand::Save),
            "help" => Ok(SessionCommand::Help),
            "quit" | "exit" => Ok(SessionCommand::Quit),
            _ => Err(SessionError::UnknownCommand(name.to_string())),
        }
    }
}

/// Result of comparing the running total against the daily goal.
#[derive(Debug, Clone, PartialEq)]
pub enum GoalStatus {
    Inactive,
    NotReached,
    Reached,
    Invalid(ParseError),
}

impl GoalStatus {
    pub fn evaluate(total_steps: u64, goal_text: &str) -> Self {
        if goal_text.trim().is_empty() {
            return GoalStatus::Inactive;
        }
        match check_goal_reached(total_steps, goal_text) {
            Ok(true) => GoalStatus::Reached,
            Ok(false) => GoalStatus::NotReached,
            Err(e) => GoalStatus::Invalid(e),
        }
    }
}

/// What the user should be shown after a command went through.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Added {
        entry: FitnessEntry,
        total_steps: u64,
        goal: GoalStatus,
    },
    GoalChanged {
        total_steps: u64,
        goal: GoalStatus,
    },
    Total {
        total_steps: u64,
        goal: GoalStatus,
    },
    Listing {
        entries: Vec<FitnessEntry>,
        total_steps: u64,
        goal: GoalStatus,
    },
    Saved {
        count: usize,
    },
    Help,
    Quit {
        unsaved: usize,
    },
}

/// Owns everything a running instance works with. Entries are loaded once when the session is
/// opened and only written back on [SessionCommand::Save].
pub struct Session<S: EntryStorage> {
    store: EntryStore,
    storage: S,
    goal: String,
    unsaved: usize,
}

impl<S: EntryStorage> Session<S> {
    pub async fn open(storage: S, clock: Box<dyn Clock>, goal: String) -> Self {
        let entries = storage.load().await.unwrap_or_else(|e| {
            warn!("Starting without previous entries, loading failed: {e}");
            vec![]
        });
        debug!("Session opened with {} entries", entries.len());

        Self {
            store: EntryStore::with_entries(entries, clock),
            storage,
            goal,
            unsaved: 0,
        }
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    pub fn unsaved(&self) -> usize {
        self.unsaved
    }

    fn goal_status(&self) -> GoalStatus {
        GoalStatus::evaluate(self.store.total_steps(), &self.goal)
    }

    pub async fn handle(&mut self, command: SessionCommand) -> Result<Reply, SessionError> {
        debug!("Handling {command:?}");
        let reply = match command {
            SessionCommand::Add {
                activity,
                steps,
                calories,
            } => {
                let entry = self.store.add_entry(activity, &steps, &calories)?;
                self.unsaved += 1;
                Reply::Added {
                    entry,
                    total_steps: self.store.total_steps(),
                    goal: self.goal_status(),
                }
            }
            SessionCommand::Goal(goal) => {
                self.goal = goal.trim().to_string();
                Reply::GoalChanged {
                    total_steps: self.store.total_steps(),
                    goal: self.goal_status(),
                }
            }
            SessionCommand::Total => Reply::Total {
                total_steps: self.store.total_steps(),
                goal: self.goal_status(),
            },
            SessionCommand::List => Reply::Listing {
                entries: self.store.entries().to_vec(),
                total_steps: self.store.total_steps(),
                goal: self.goal_status(),
            },
            SessionCommand::Save => {
                self.storage.save(self.store.entries()).await?;
                self.unsaved = 0;
                Reply::Saved {
                    count: self.store.len(),
                }
            }
            SessionCommand::Help => Reply::Help,
            SessionCommand::Quit => Reply::Quit {
                unsaved: self.unsaved,
            },
        };
        Ok(reply)
    }
}

/// Runs commands one after another, stopping at the first failure. Returns whether every
/// command succeeded.
pub async fn execute<S: EntryStorage>(
    session: &mut Session<S>,
    commands: impl IntoIterator<Item = SessionCommand>,
    out: &mut Printer<impl Write>,
    err: &mut Printer<impl Write>,
) -> Result<bool> {
    for command in commands {
        match session.handle(command).await {
            Ok(reply) => out.reply(&reply)?,
            Err(e) => {
                err.error(&e)?;
                return Ok(false);
            }
        }
    }
    Ok(true)
}

/// Interactive loop reading one command per line. The goal is checked against the loaded
/// entries before the first prompt. Errors are shown and the loop keeps going, it only stops
/// on `quit` or end of input.
pub async fn run_session<S: EntryStorage>(
    session: &mut Session<S>,
    input: impl AsyncBufRead + Unpin,
    out: &mut Printer<impl Write>,
) -> Result<()> {
    out.reply(&Reply::Help)?;
    out.reply(&session.handle(SessionCommand::Total).await?)?;

    let mut lines = input.lines();
    loop {
        out.prompt()?;

        let Some(line) = lines.next_line().await? else {
            out.newline()?;
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let result = match line.parse::<SessionCommand>() {
            Ok(command) => session.handle(command).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(reply) => {
                out.reply(&reply)?;
                if matches!(reply, Reply::Quit { .. }) {
                    return Ok(());
                }
            }
            Err(e) => out.error(&e)?,
        }
    }

    let reply = session.handle(SessionCommand::Quit).await?;
    out.reply(&reply)?;
    Ok(())
}
