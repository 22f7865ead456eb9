use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Who authored a conversation turn. Only these two roles are canonical;
/// history entries with any other role are dropped before orchestration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self { role: Role::Model, content: content.into() }
    }
}

/// One capability invocation observed inside a generation exchange.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocationRecord {
    pub name: String,
    pub output: Option<Value>,
}

/// The flat per-request result handed back to the service boundary.
///
/// `tool_name` is the first capability seen in the exchange; `tool_output`
/// follows latest-wins semantics for repeated calls to the same capability.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatOutcome {
    pub text: String,
    pub has_tool_output: bool,
    pub tool_name: String,
    pub tool_output: Option<Value>,
}
