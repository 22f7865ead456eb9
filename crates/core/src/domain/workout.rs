use serde::{Deserialize, Serialize};

use crate::errors::ChatError;

/// Longest session the plan generator will program, in minutes.
pub const MAX_SESSION_MINUTES: i64 = 300;

/// Arguments the model supplies when it calls the workout capability.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRequest {
    pub fitness_level: String,
    pub fitness_goal: String,
    pub equipment: String,
    pub session_duration: i64,
    pub workout_focus: String,
    pub space_constraints: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injuries: Option<String>,
}

impl WorkoutRequest {
    /// Check the request before any model traffic happens on its behalf.
    pub fn validate(&self) -> Result<(), ChatError> {
        require_field("fitnessLevel", &self.fitness_level)?;
        require_field("fitnessGoal", &self.fitness_goal)?;
        require_field("equipment", &self.equipment)?;
        if self.session_duration < 1 || self.session_duration > MAX_SESSION_MINUTES {
            return Err(ChatError::validation(format!(
                "sessionDuration must be between 1 and {MAX_SESSION_MINUTES} minutes"
            )));
        }
        require_field("workoutFocus", &self.workout_focus)?;
        require_field("spaceConstraints", &self.space_constraints)?;
        Ok(())
    }
}

fn require_field(name: &str, value: &str) -> Result<(), ChatError> {
    if value.trim().is_empty() {
        return Err(ChatError::validation(format!("{name} is required")));
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetType {
    Warmup,
    Working,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseSet {
    pub reps: u32,
    pub set_type: SetType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub sets: Vec<ExerciseSet>,
}

/// The structured plan returned by the capability, passed through to the
/// caller unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    pub exercises: Vec<Exercise>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_focus: Option<String>,
}
