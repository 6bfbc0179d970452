use super::error::{Field, ParseError};

/// Compares the running total against the daily goal. An empty goal means no goal is set, which
/// is never reached. Any integer is accepted as a goal, so a goal at or below zero is always
/// reached. The check is stateless, so it keeps reporting `true` on every call once the total
/// passed the goal.
pub fn check_goal_reached(total_steps: u64, goal_text: &str) -> Result<bool, ParseError> {
    let goal_text = goal_text.trim();
    if goal_text.is_empty() {
        return Ok(false);
    }
    let goal = goal_text
        .parse::<i64>()
        .map_err(|_| ParseError::InvalidInteger {
            field: Field::Goal,
            value: goal_text.to_string(),
        })?;
    Ok(i128::from(total_steps) >= i128::from(goal))
}
