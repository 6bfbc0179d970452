use std::io::{self, IsTerminal, Write};

use ansi_term::{Colour, Style};

use super::session::{GoalStatus, Reply, SessionError};

pub const PROMPT: &str = "fitlog> ";

const HELP: &str = "Commands:
  add <activity> <steps> <calories>  Record an entry. Activity is walking, running, cycling or other
  goal [steps]                       Set the daily goal, leave empty to clear it
  total                              Show total steps
  list                               Show every entry
  save                               Write entries to disk
  quit                               Leave the session";

/// Writes replies for the user. Colours are only used when `colored` is set, which is the case
/// for terminals.
pub struct Printer<W> {
    out: W,
    colored: bool,
}

impl<W: Write + IsTerminal> Printer<W> {
    pub fn terminal(out: W) -> Self {
        let colored = out.is_terminal();
        Self::new(out, colored)
    }
}

impl<W: Write> Printer<W> {
    pub fn new(out: W, colored: bool) -> Self {
        Self { out, colored }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, style: Style, message: &str) -> String {
        if self.colored {
            style.paint(message).to_string()
        } else {
            message.to_string()
        }
    }

    pub fn prompt(&mut self) -> io::Result<()> {
        write!(self.out, "{PROMPT}")?;
        self.out.flush()
    }

    pub fn newline(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    pub fn reply(&mut self, reply: &Reply) -> io::Result<()> {
        match reply {
            Reply::Added {
                entry,
                total_steps,
                goal,
            } => {
                writeln!(self.out, "Added {entry}")?;
                writeln!(self.out, "Total Steps: {total_steps}")?;
                self.goal(goal)
            }
            Reply::GoalChanged { total_steps, goal } => {
                match goal {
                    GoalStatus::Inactive => writeln!(self.out, "Daily goal cleared")?,
                    GoalStatus::NotReached => {
                        writeln!(self.out, "Daily goal set, {total_steps} steps so far")?
                    }
                    _ => {}
                }
                self.goal(goal)
            }
            Reply::Total { total_steps, goal } => {
                writeln!(self.out, "Total Steps: {total_steps}")?;
                self.goal(goal)
            }
            Reply::Listing {
                entries,
                total_steps,
                goal,
            } => {
                if entries.is_empty() {
                    writeln!(self.out, "No entries yet")?;
                }
                for entry in entries {
                    writeln!(self.out, "{entry}")?;
                }
                writeln!(self.out, "Total Steps: {total_steps}")?;
                self.goal(goal)
            }
            Reply::Saved { count } => writeln!(
                self.out,
                "Saved {count} {}",
                if *count == 1 { "entry" } else { "entries" }
            ),
            Reply::Help => writeln!(self.out, "{HELP}"),
            Reply::Quit { unsaved: 0 } => Ok(()),
            Reply::Quit { unsaved } => {
                let message = if *unsaved == 1 {
                    "1 entry was not saved".to_string()
                } else {
                    format!("{unsaved} entries were not saved")
                };
                let message = self.paint(Colour::Yellow.normal(), &message);
                writeln!(self.out, "{message}")
            }
        }
    }

    fn goal(&mut self, goal: &GoalStatus) -> io::Result<()> {
        let message = match goal {
            GoalStatus::Reached => self.paint(
                Colour::Green.bold(),
                "Congratulations! You reached your daily goal!",
            ),
            GoalStatus::Invalid(e) => {
                self.paint(Colour::Red.normal(), &format!("Invalid goal. {e}"))
            }
            GoalStatus::Inactive | GoalStatus::NotReached => return Ok(()),
        };
        writeln!(self.out, "{message}")
    }

    pub fn error(&mut self, error: &SessionError) -> io::Result<()> {
        let message = match error {
            SessionError::Parse(e) => format!("Invalid input. {e}"),
            SessionError::Storage(e) => format!("Entries were not saved. {e}"),
            e => e.to_string(),
        };
        let message = self.paint(Colour::Red.normal(), &message);
        writeln!(self.out, "{message}")
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{TimeZone, Utc};

    use crate::{
        cli::session::{GoalStatus, Reply, SessionError},
        tracker::{
            entities::{Activity, FitnessEntry},
            error::{Field, ParseError},
        },
    };

    use super::Printer;

    fn rendered(reply: &Reply) -> Result<String> {
        let mut printer = Printer::new(Vec::new(), false);
        printer.reply(reply)?;
        Ok(String::from_utf8(printer.into_inner())?)
    }

    #[test]
    fn test_render_listing() -> Result<()> {
        let time = Utc.with_ymd_and_hms(2018, 7, 4, 12, 0, 0).unwrap();
        let entries = vec![
            FitnessEntry::new_opt(time, Activity::Walking, 1000, 40.).unwrap(),
            FitnessEntry::new_opt(time, Activity::Cycling, 0, 220.5).unwrap(),
        ];

        let out = rendered(&Reply::Listing {
            entries,
            total_steps: 1000,
            goal: GoalStatus::NotReached,
        })?;

        let lines = out.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("[Walking]"));
        assert!(lines[1].ends_with("Steps: 0 - Calories Burned: 220.5"));
        assert_eq!(lines[2], "Total Steps: 1000");
        Ok(())
    }

    #[test]
    fn test_render_empty_listing() -> Result<()> {
        let out = rendered(&Reply::Listing {
            entries: vec![],
            total_steps: 0,
            goal: GoalStatus::Inactive,
        })?;
        assert_eq!(out, "No entries yet\nTotal Steps: 0\n");
        Ok(())
    }

    #[test]
    fn test_render_goal_messages() -> Result<()> {
        let out = rendered(&Reply::Total {
            total_steps: 3800,
            goal: GoalStatus::Reached,
        })?;
        assert!(out.contains("Congratulations! You reached your daily goal!"));

        let out = rendered(&Reply::Total {
            total_steps: 3800,
            goal: GoalStatus::Invalid(ParseError::InvalidInteger {
                field: Field::Goal,
                value: "x".into(),
            }),
        })?;
        assert!(out.contains("Invalid goal. Daily goal must be a whole number"));
        Ok(())
    }

    #[test]
    fn test_render_quit() -> Result<()> {
        assert_eq!(rendered(&Reply::Quit { unsaved: 0 })?, "");
        assert!(rendered(&Reply::Quit { unsaved: 3 })?.contains("3 entries were not saved"));
        Ok(())
    }

    #[test]
    fn test_render_error() -> Result<()> {
        let mut printer = Printer::new(Vec::new(), false);
        printer.error(&SessionError::Parse(ParseError::Missing {
            field: Field::Calories,
        }))?;
        assert_eq!(
            String::from_utf8(printer.into_inner())?,
            "Invalid input. Calories burned is required\n"
        );
        Ok(())
    }

    #[test]
    fn test_colours_only_when_enabled() -> Result<()> {
        let reply = Reply::Total {
            total_steps: 10,
            goal: GoalStatus::Reached,
        };

        let plain = rendered(&reply)?;
        assert!(!plain.contains('\x1b'));
        assert_eq!(
            plain,
            "Total Steps: 10\nCongratulations! You reached your daily goal!\n"
        );

        let mut printer = Printer::new(Vec::new(), true);
        printer.reply(&reply)?;
        let colored = String::from_utf8(printer.into_inner())?;
        assert!(colored.contains("\x1b["));
        assert!(colored.contains("Congratulations! You reached your daily goal!"));
        Ok(())
    }

    #[test]
    fn test_plain_error_has_no_escape_codes() -> Result<()> {
        let mut printer = Printer::new(Vec::new(), false);
        printer.error(&SessionError::UnknownCommand("dance".into()))?;
        assert!(!String::from_utf8(printer.into_inner())?.contains('\x1b'));
        Ok(())
    }
}
