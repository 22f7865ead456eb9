//! Deterministic leaves of the LiftLab coach service: admission control,
//! configuration, the error taxonomy, and the chat/workout domain types.
//! Nothing in this crate performs I/O beyond reading config files.

pub mod admission;
pub mod config;
pub mod domain;
pub mod errors;

pub use admission::AdmissionController;
pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
pub use domain::chat::{ChatMessage, ChatOutcome, Role, ToolInvocationRecord};
pub use domain::workout::{Exercise, ExerciseSet, SetType, WorkoutPlan, WorkoutRequest};
pub use errors::ChatError;
