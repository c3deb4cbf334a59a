use serde::Deserialize;

use crate::forms::FormError;

#[derive(Debug, Deserialize)]
/// Raw text entered in the edit-goal modal.
pub struct SalesGoalForm {
    pub goal: String,
}

impl SalesGoalForm {
    /// Parses the goal as a positive whole amount.
    pub fn parse(&self) -> Result<u32, FormError> {
        match self.goal.trim().parse::<u32>() {
            Ok(goal) if goal > 0 => Ok(goal),
            _ => Err(FormError::InvalidGoal),
        }
    }
}
