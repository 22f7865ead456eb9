//! Conversation runtime - model-facing orchestration for the coach service
//!
//! This crate drives one chat request end to end:
//! - Assembles the caller-supplied history into a canonical message sequence
//!   (`conversation`)
//! - Runs the bounded tool-calling generation loop against Gemini (`gemini`)
//! - Exposes the single registered capability, `generateWorkout` (`workout`)
//! - Reconciles the interleaved exchange into one flat response (`runtime`)
//!
//! # Key Types
//!
//! - `ChatRuntime` - Per-request orchestrator (see `runtime`)
//! - `ModelClient` - Pluggable provider trait; `GeminiClient` is the real one
//! - `ToolRegistry` - Capabilities the model may invoke mid-generation
//!
//! # Control-Flow Principle
//!
//! The provider drives the tool-calling loop; this crate only bounds it (10
//! turns) and reconciles the result. Streaming callbacks are telemetry, never
//! control flow.

pub mod conversation;
pub mod gemini;
pub mod llm;
pub mod prompts;
pub mod runtime;
pub mod tools;
pub mod workout;

pub use conversation::IncomingMessage;
pub use gemini::GeminiClient;
pub use llm::{GenerateOutcome, GenerateRequest, HistoryItem, ModelClient, StreamObserver};
pub use runtime::{ChatRuntime, MAX_GENERATION_TURNS};
pub use tools::{Tool, ToolRegistry};
pub use workout::{WorkoutGenerator, WORKOUT_TOOL_NAME};
