//! In-memory side of the application. [EntryStore] owns the ordered entries of the running
//! instance:
//!  - Entries are only appended, insertion order is kept.
//!  - Input arrives as raw text and is parsed here, so every caller gets the same rules.
//!  - Callers only ever see read-only slices of the collection.

pub mod entities;
pub mod error;
pub mod goal;

use entities::{Activity, FitnessEntry};
use error::{Field, ParseError};
use tracing::debug;

use crate::utils::clock::Clock;

pub struct EntryStore {
    entries: Vec<FitnessEntry>,
    clock: Box<dyn Clock>,
}

impl EntryStore {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self::with_entries(vec![], clock)
    }

    /// Creates a store around entries that were loaded from storage.
    pub fn with_entries(entries: Vec<FitnessEntry>, clock: Box<dyn Clock>) -> Self {
        Self { entries, clock }
    }

    /// Parses the user's input and appends a new entry stamped with the current time. The
    /// collection is left untouched if either field fails to parse.
    pub fn add_entry(
        &mut self,
        activity: Activity,
        steps_text: &str,
        calories_text: &str,
    ) -> Result<FitnessEntry, ParseError> {
        let steps = parse_steps(steps_text)?;
        let calories_burned = parse_calories(calories_text)?;

        let entry = FitnessEntry::new_opt(self.clock.time(), activity, steps, calories_burned)
            .ok_or_else(|| ParseError::InvalidNumber {
                field: Field::Calories,
                value: calories_text.trim().to_string(),
            })?;

        debug!("Adding entry {entry:?}");
        self.entries.push(entry.clone());
        Ok(entry)
    }

    pub fn total_steps(&self) -> u64 {
        self.entries.iter().map(|v| u64::from(v.steps())).sum()
    }

    pub fn entries(&self) -> &[FitnessEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn required(field: Field, text: &str) -> Result<&str, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        Err(ParseError::Missing { field })
    } else {
        Ok(text)
    }
}

fn parse_steps(text: &str) -> Result<u32, ParseError> {
    let text = required(Field::Steps, text)?;
    text.parse::<u32>().map_err(|_| ParseError::InvalidInteger {
        field: Field::Steps,
        value: text.to_string(),
    })
}

fn parse_calories(text: &str) -> Result<f64, ParseError> {
    let text = required(Field::Calories, text)?;
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0. => Ok(v),
        _ => Err(ParseError::InvalidNumber {
            field: Field::Calories,
            value: text.to_string(),
        }),
    }
}
