//! The one registered capability: `generateWorkout`.
//!
//! Validates the model-supplied arguments, then asks the model for a plan
//! constrained to the `WorkoutPlan` shape. The returned plan is passed
//! through unchanged; judging its quality is out of scope.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use liftlab_core::{ChatError, WorkoutPlan, WorkoutRequest};

use crate::llm::ModelClient;
use crate::prompts;
use crate::tools::Tool;

pub const WORKOUT_TOOL_NAME: &str = "generateWorkout";

pub struct WorkoutGenerator {
    client: Arc<dyn ModelClient>,
}

impl WorkoutGenerator {
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self { client }
    }

    pub async fn invoke(&self, request: &WorkoutRequest) -> Result<WorkoutPlan, ChatError> {
        request.validate()?;

        let profile = prompts::profile_summary(request);
        let system = prompts::workout_generation_prompt(&profile);
        let value = self.client.generate_data(&system, &profile, plan_schema()).await?;

        let plan: WorkoutPlan = serde_json::from_value(value).map_err(|err| {
            ChatError::generation(format!("workout plan did not match the declared shape: {err}"))
        })?;

        tracing::info!(exercises = plan.exercises.len(), "generated workout plan");
        Ok(plan)
    }
}

#[async_trait]
impl Tool for WorkoutGenerator {
    fn name(&self) -> &'static str {
        WORKOUT_TOOL_NAME
    }

    fn description(&self) -> &'static str {
        "Creates and displays a personalized workout plan. Call this when you have: \
         fitness level, goal, equipment, session duration, workout focus, space/location, \
         and injury status. This displays the workout to the user."
    }

    fn parameters(&self) -> Value {
        request_schema()
    }

    async fn execute(&self, input: Value) -> Result<Value, ChatError> {
        let request: WorkoutRequest = serde_json::from_value(input).map_err(|err| {
            ChatError::validation(format!("generateWorkout arguments were invalid: {err}"))
        })?;

        let plan = self.invoke(&request).await?;
        serde_json::to_value(&plan)
            .map_err(|err| ChatError::generation(format!("workout plan serialization failed: {err}")))
    }
}

fn request_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "fitnessLevel": {
                "type": "string",
                "description": "The fitness level (beginner, intermediate, advanced)"
            },
            "fitnessGoal": {
                "type": "string",
                "description": "Primary fitness goal (strength, hypertrophy, endurance, power, general fitness)"
            },
            "equipment": {
                "type": "string",
                "description": "Available equipment (bodyweight, dumbbells, barbell+rack, machines, cables, bands, etc.)"
            },
            "sessionDuration": {
                "type": "integer",
                "description": "Available workout time in minutes"
            },
            "workoutFocus": {
                "type": "string",
                "description": "Workout focus (push/pull/legs, full body, specific muscle groups, etc.)"
            },
            "spaceConstraints": {
                "type": "string",
                "description": "Space/location constraints (home, gym, hotel room, outdoor, etc.)"
            },
            "injuries": {
                "type": "string",
                "description": "Any current injuries or pain to work around"
            }
        },
        "required": [
            "fitnessLevel",
            "fitnessGoal",
            "equipment",
            "sessionDuration",
            "workoutFocus",
            "spaceConstraints"
        ]
    })
}

fn plan_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "exercises": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": {"type": "string"},
                        "sets": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "reps": {"type": "integer"},
                                    "setType": {"type": "string", "enum": ["warmup", "working"]},
                                    "weight": {"type": "number"}
                                },
                                "required": ["reps", "setType"]
                            }
                        }
                    },
                    "required": ["name", "sets"]
                }
            },
            "notes": {"type": "string"},
            "workoutFocus": {"type": "string"}
        },
        "required": ["exercises"]
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use serde_json::{json, Value};

    use liftlab_core::{ChatError, WorkoutRequest};

    use crate::llm::{GenerateOutcome, GenerateRequest, ModelClient};
    use crate::tools::Tool;

    use super::{WorkoutGenerator, WORKOUT_TOOL_NAME};

    struct CannedPlanClient {
        plan: Value,
        calls: AtomicUsize,
    }

    impl CannedPlanClient {
        fn new(plan: Value) -> Self {
            Self { plan, calls: AtomicUsize::new(0) }
        }
    }

    #[async_trait]
    impl ModelClient for CannedPlanClient {
        async fn generate(
            &self,
            _request: GenerateRequest<'_>,
        ) -> Result<GenerateOutcome, ChatError> {
            Err(ChatError::generation("chat generation is not used by this capability"))
        }

        async fn generate_data(
            &self,
            _system: &str,
            _prompt: &str,
            _schema: Value,
        ) -> Result<Value, ChatError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.plan.clone())
        }
    }

    fn plan_json() -> Value {
        json!({
            "exercises": [
                {"name": "Push-up", "sets": [{"reps": 12, "setType": "working"}]}
            ],
            "workoutFocus": "full body"
        })
    }

    fn valid_request() -> WorkoutRequest {
        WorkoutRequest {
            fitness_level: "beginner".to_string(),
            fitness_goal: "general fitness".to_string(),
            equipment: "bodyweight".to_string(),
            session_duration: 20,
            workout_focus: "full body".to_string(),
            space_constraints: "home".to_string(),
            injuries: None,
        }
    }

    #[tokio::test]
    async fn invalid_duration_never_reaches_the_provider() {
        let client = Arc::new(CannedPlanClient::new(plan_json()));
        let generator = WorkoutGenerator::new(client.clone());

        for duration in [0, -5, 301] {
            let request = WorkoutRequest { session_duration: duration, ..valid_request() };
            let error = generator.invoke(&request).await.expect_err("should be rejected");
            assert!(matches!(error, ChatError::Validation { .. }), "duration {duration}");
        }
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn boundary_durations_are_accepted() {
        let client = Arc::new(CannedPlanClient::new(plan_json()));
        let generator = WorkoutGenerator::new(client.clone());

        for duration in [1, 300] {
            let request = WorkoutRequest { session_duration: duration, ..valid_request() };
            let plan = generator.invoke(&request).await.expect("should be accepted");
            assert_eq!(plan.exercises.len(), 1);
        }
        assert_eq!(client.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn tool_execute_round_trips_camel_case_arguments() {
        let client = Arc::new(CannedPlanClient::new(plan_json()));
        let generator = WorkoutGenerator::new(client);

        assert_eq!(generator.name(), WORKOUT_TOOL_NAME);

        let output = generator
            .execute(json!({
                "fitnessLevel": "beginner",
                "fitnessGoal": "general fitness",
                "equipment": "bodyweight",
                "sessionDuration": 20,
                "workoutFocus": "full body",
                "spaceConstraints": "home"
            }))
            .await
            .expect("execution should succeed");

        assert_eq!(output["workoutFocus"], "full body");
        assert_eq!(output["exercises"][0]["name"], "Push-up");
    }

    #[tokio::test]
    async fn malformed_arguments_fail_validation() {
        let client = Arc::new(CannedPlanClient::new(plan_json()));
        let generator = WorkoutGenerator::new(client.clone());

        let error = generator
            .execute(json!({"fitnessLevel": "beginner"}))
            .await
            .expect_err("missing fields should fail");
        assert!(matches!(error, ChatError::Validation { .. }));
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn malformed_plan_from_provider_is_a_generation_error() {
        let client = Arc::new(CannedPlanClient::new(json!({"unexpected": true})));
        let generator = WorkoutGenerator::new(client);

        let error =
            generator.invoke(&valid_request()).await.expect_err("shape mismatch should fail");
        assert!(matches!(error, ChatError::Generation { .. }));
    }
}
