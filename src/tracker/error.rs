use std::fmt::Display;

use thiserror::Error;

/// Input field a [ParseError] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Steps,
    Calories,
    Goal,
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Steps => write!(f, "Steps"),
            Field::Calories => write!(f, "Calories burned"),
            Field::Goal => write!(f, "Daily goal"),
        }
    }
}

impl Field {
    fn expected(&self) -> &'static str {
        match self {
            Field::Steps => "a whole non-negative number",
            Field::Calories => "a non-negative number",
            Field::Goal => "a whole number",
        }
    }
}

/// Malformed or missing user input. Nothing is committed when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{field} is required")]
    Missing { field: Field },

    #[error("{field} must be {}, got {value:?}", field.expected())]
    InvalidInteger { field: Field, value: String },

    #[error("{field} must be {}, got {value:?}", field.expected())]
    InvalidNumber { field: Field, value: String },

    #[error("Unknown activity {0:?}, expected one of walking, running, cycling, other")]
    UnknownActivity(String),
}
