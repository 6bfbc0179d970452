use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Local, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::error::ParseError;

/// Kind of activity an entry was recorded for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Activity {
    Walking,
    Running,
    Cycling,
    Other,
}

impl Activity {
    pub const ALL: [Activity; 4] = [
        Activity::Walking,
        Activity::Running,
        Activity::Cycling,
        Activity::Other,
    ];
}

impl Display for Activity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Activity::Walking => write!(f, "Walking"),
            Activity::Running => write!(f, "Running"),
            Activity::Cycling => write!(f, "Cycling"),
            Activity::Other => write!(f, "Other"),
        }
    }
}

impl FromStr for Activity {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Activity::ALL
            .into_iter()
            .find(|v| v.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::UnknownActivity(s.to_string()))
    }
}

/// A single recorded activity. Fields are only readable, an entry never changes after it was
/// created.
#[derive(Debug, Clone, PartialEq)]
pub struct FitnessEntry {
    timestamp: DateTime<Utc>,
    activity: Activity,
    steps: u32,
    calories_burned: f64,
}

impl FitnessEntry {
    /// Returns `None` when calories are negative or not a finite number.
    pub fn new_opt(
        timestamp: DateTime<Utc>,
        activity: Activity,
        steps: u32,
        calories_burned: f64,
    ) -> Option<FitnessEntry> {
        if !calories_burned.is_finite() || calories_burned < 0. {
            None
        } else {
            Some(FitnessEntry {
                timestamp,
                activity,
                steps,
                calories_burned,
            })
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn activity(&self) -> Activity {
        self.activity
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn calories_burned(&self) -> f64 {
        self.calories_burned
    }
}

impl Display for FitnessEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} - Steps: {} - Calories Burned: {}",
            self.activity,
            self.timestamp
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S"),
            self.steps,
            self.calories_burned
        )
    }
}
