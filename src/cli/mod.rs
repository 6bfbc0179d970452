pub mod output;
pub mod session;

use std::{io, path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::{Parser, Subcommand};
use output::Printer;
use session::{execute, run_session, Session, SessionCommand};
use tokio::io::BufReader;
use tracing::{info, level_filters::LevelFilter};

use crate::{
    storage::entry_storage::JsonEntryStorage,
    tracker::entities::Activity,
    utils::{
        clock::DefaultClock,
        dir::{create_application_default_path, ensure_dir},
        logging::{enable_logging, CLI_PREFIX},
    },
};

#[derive(Parser, Debug)]
#[command(name = "Fitlog", version, long_about = None)]
#[command(about = "Application for recording fitness activity", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, global = true, help = "Enable logging")]
    log: bool,
    #[arg(
        long,
        global = true,
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        help = "File holding the entries. By default fitness_entries.json inside the application directory"
    )]
    file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Record a new entry and save it")]
    Add {
        #[arg(value_enum, ignore_case = true)]
        activity: Activity,
        #[arg(allow_hyphen_values = true, help = "Number of steps")]
        steps: String,
        #[arg(allow_hyphen_values = true, help = "Calories burned")]
        calories: String,
        #[arg(short, long, help = "Daily goal in steps")]
        goal: Option<String>,
        #[arg(long, help = "Don't write the new entry to disk")]
        no_save: bool,
    },
    #[command(about = "Display all recorded entries and total steps")]
    List {
        #[arg(short, long, help = "Daily goal in steps")]
        goal: Option<String>,
    },
    #[command(about = "Start an interactive session. Entries are only written on `save`")]
    Session {
        #[arg(short, long, help = "Daily goal in steps")]
        goal: Option<String>,
    },
}

pub async fn run_cli() -> Result<ExitCode> {
    let args = Args::parse();

    let app_dir = args
        .dir
        .map_or_else(create_application_default_path, ensure_dir)?;

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(CLI_PREFIX, &app_dir, logging_level, args.log)?;

    let storage = match args.file {
        Some(file) => JsonEntryStorage::new(file),
        None => JsonEntryStorage::in_dir(app_dir),
    };
    info!("Using entries from {:?}", storage.path());

    let mut out = Printer::terminal(io::stdout());
    let mut err = Printer::terminal(io::stderr());

    let succeeded = match args.commands {
        Commands::Add {
            activity,
            steps,
            calories,
            goal,
            no_save,
        } => {
            let mut session =
                Session::open(storage, Box::new(DefaultClock), goal.unwrap_or_default()).await;
            let mut commands = vec![SessionCommand::Add {
                activity,
                steps,
                calories,
            }];
            if !no_save {
                commands.push(SessionCommand::Save);
            }
            execute(&mut session, commands, &mut out, &mut err).await?
        }
        Commands::List { goal } => {
            let mut session =
                Session::open(storage, Box::new(DefaultClock), goal.unwrap_or_default()).await;
            execute(&mut session, [SessionCommand::List], &mut out, &mut err).await?
        }
        Commands::Session { goal } => {
            let mut session =
                Session::open(storage, Box::new(DefaultClock), goal.unwrap_or_default()).await;
            run_session(
                &mut session,
                BufReader::new(tokio::io::stdin()),
                &mut out,
            )
            .await?;
            true
        }
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use crate::tracker::entities::Activity;

    use super::{Args, Commands};

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_add() {
        let args = Args::parse_from([
            "fitlog", "add", "Running", "2500", "180.5", "--goal", "3000", "--dir", "/tmp/fit",
        ]);
        match args.commands {
            Commands::Add {
                activity,
                steps,
                calories,
                goal,
                no_save,
            } => {
                assert_eq!(activity, Activity::Running);
                assert_eq!(steps, "2500");
                assert_eq!(calories, "180.5");
                assert_eq!(goal.as_deref(), Some("3000"));
                assert!(!no_save);
            }
            v => panic!("Unexpected command {v:?}"),
        }
        assert_eq!(args.dir.as_deref(), Some(std::path::Path::new("/tmp/fit")));
    }

    #[test]
    fn test_parse_add_passes_negative_numbers_through() {
        let args = Args::parse_from(["fitlog", "add", "walking", "-5", "10"]);
        assert!(matches!(
            args.commands,
            Commands::Add { steps, .. } if steps == "-5"
        ));
    }

    #[test]
    fn test_parse_unknown_activity_fails() {
        assert!(Args::try_parse_from(["fitlog", "add", "swimming", "1", "1"]).is_err());
    }
}
