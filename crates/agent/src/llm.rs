use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use liftlab_core::{ChatError, ChatMessage, ToolInvocationRecord};

use crate::tools::ToolRegistry;

/// Observes incremental model text as it arrives. Telemetry only: the
/// observer runs synchronously on the requesting worker and must never
/// influence control flow or block for unbounded time.
pub type StreamObserver = Arc<dyn Fn(&str) + Send + Sync>;

/// One generation exchange: system instruction, canonical messages, the
/// callable capabilities, and the ceiling on capability-invocation rounds.
pub struct GenerateRequest<'a> {
    pub system: &'a str,
    pub messages: &'a [ChatMessage],
    pub tools: &'a ToolRegistry,
    pub max_turns: u32,
    pub observer: Option<StreamObserver>,
}

/// The full interleaved exchange as the provider saw it: model-authored
/// turns and capability invocations, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum HistoryItem {
    Message(ChatMessage),
    ToolInvocation(ToolInvocationRecord),
}

#[derive(Clone, Debug, PartialEq)]
pub struct GenerateOutcome {
    /// Final free-text answer (best current response when the ceiling hit).
    pub text: String,
    pub history: Vec<HistoryItem>,
    pub turn_limit_reached: bool,
}

/// Abstraction over the generative-model provider.
///
/// The provider drives the tool-calling loop internally; callers only see
/// the final text plus the reconciled-ready history. `generate_data`
/// requests output constrained to a declared JSON shape.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn generate(&self, request: GenerateRequest<'_>) -> Result<GenerateOutcome, ChatError>;

    async fn generate_data(
        &self,
        system: &str,
        prompt: &str,
        schema: Value,
    ) -> Result<Value, ChatError>;
}
