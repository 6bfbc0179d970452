use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tracker::entities::{Activity, FitnessEntry};

/// Version written into every saved file. Bump when [EntryRecord] changes shape.
pub const SCHEMA_VERSION: u32 = 1;

/// Layout of the backing file.
#[derive(Debug, Serialize, Deserialize)]
pub struct EntryFile {
    pub version: u32,
    pub entries: Vec<EntryRecord>,
}

/// The struct used for storing a [FitnessEntry] on the disk.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub timestamp: DateTime<Utc>,
    pub activity: Activity,
    pub steps: u32,
    pub calories_burned: f64,
}

impl From<&FitnessEntry> for EntryRecord {
    fn from(entry: &FitnessEntry) -> Self {
        EntryRecord {
            timestamp: entry.timestamp(),
            activity: entry.activity(),
            steps: entry.steps(),
            calories_burned: entry.calories_burned(),
        }
    }
}

impl EntryRecord {
    /// Records on disk might have been edited by hand, so invariants are checked again.
    pub fn into_entry(self) -> Option<FitnessEntry> {
        FitnessEntry::new_opt(self.timestamp, self.activity, self.steps, self.calories_burned)
    }
}

impl EntryFile {
    pub fn from_entries(entries: &[FitnessEntry]) -> Self {
        EntryFile {
            version: SCHEMA_VERSION,
            entries: entries.iter().map(EntryRecord::from).collect(),
        }
    }
}
