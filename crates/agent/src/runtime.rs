//! Conversation orchestration: assemble → generate → reconcile → embed.

use std::sync::Arc;

use serde_json::Value;

use liftlab_core::{ChatError, ChatOutcome, ToolInvocationRecord};

use crate::conversation::{self, IncomingMessage};
use crate::llm::{GenerateRequest, HistoryItem, ModelClient, StreamObserver};
use crate::prompts;
use crate::tools::ToolRegistry;

/// Ceiling on capability-invocation rounds within one generation call.
pub const MAX_GENERATION_TURNS: u32 = 10;

pub struct ChatRuntime {
    client: Arc<dyn ModelClient>,
    tools: Arc<ToolRegistry>,
}

impl ChatRuntime {
    pub fn new(client: Arc<dyn ModelClient>, tools: Arc<ToolRegistry>) -> Self {
        Self { client, tools }
    }

    /// Run one chat request to completion and flatten the exchange into a
    /// single response. Validation failures never reach the provider; any
    /// provider failure aborts the request with no partial response.
    pub async fn handle(
        &self,
        message: &str,
        history: &[IncomingMessage],
    ) -> Result<ChatOutcome, ChatError> {
        let messages = conversation::assemble(message, history)?;

        let observer: StreamObserver = Arc::new(|chunk: &str| {
            tracing::debug!(chunk = %chunk, "streaming chunk");
        });

        let outcome = self
            .client
            .generate(GenerateRequest {
                system: prompts::COACH_SYSTEM_PROMPT,
                messages: &messages,
                tools: &self.tools,
                max_turns: MAX_GENERATION_TURNS,
                observer: Some(observer),
            })
            .await?;

        if outcome.turn_limit_reached {
            tracing::warn!(
                max_turns = MAX_GENERATION_TURNS,
                "maximum tool-calling iterations reached for this request"
            );
        }

        let reconciled = reconcile(&outcome.history, &self.tools);
        let text = embed_tool_output(outcome.text, reconciled.tool_output.as_ref());

        tracing::info!(
            has_tool_output = reconciled.has_tool_output,
            tool_name = %reconciled.tool_name,
            "chat response generated"
        );

        Ok(ChatOutcome {
            text,
            has_tool_output: reconciled.has_tool_output,
            tool_name: reconciled.tool_name,
            tool_output: reconciled.tool_output,
        })
    }
}

struct Reconciled {
    has_tool_output: bool,
    tool_name: String,
    tool_output: Option<Value>,
}

/// Extract the single relevant structured result from the interleaved
/// exchange: the name of the first invocation seen, and the output of the
/// last invocation of a registered capability (latest wins).
fn reconcile(history: &[HistoryItem], tools: &ToolRegistry) -> Reconciled {
    let mut has_tool_output = false;
    let mut tool_name = String::new();
    let mut tool_output = None;

    for item in history {
        let HistoryItem::ToolInvocation(ToolInvocationRecord { name, output }) = item else {
            continue;
        };
        has_tool_output = true;
        if tool_name.is_empty() {
            tool_name = name.clone();
        }
        if tools.get(name).is_some() {
            tool_output = output.clone();
        }
    }

    Reconciled { has_tool_output, tool_name, tool_output }
}

/// Append the serialized structured payload after a blank line, so clients
/// that only parse plain text can still find it after the last blank line.
/// A serialization failure only costs the embedded copy.
fn embed_tool_output(text: String, tool_output: Option<&Value>) -> String {
    let Some(value) = tool_output else {
        return text;
    };

    match serde_json::to_string(value) {
        Ok(serialized) => format!("{text}\n\n{serialized}"),
        Err(error) => {
            tracing::warn!(error = %error, "failed to serialize tool output for embedding");
            text
        }
    }
}
