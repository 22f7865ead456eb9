use serde::Deserialize;

use liftlab_core::{ChatError, ChatMessage};

/// A caller-supplied history entry before role normalization. Roles outside
/// the canonical set are tolerated here and dropped during assembly.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct IncomingMessage {
    pub role: String,
    pub content: String,
}

/// Build the canonical message sequence for one generation call: mapped
/// prior history followed by the current message as the final user turn.
pub fn assemble(message: &str, history: &[IncomingMessage]) -> Result<Vec<ChatMessage>, ChatError> {
    if message.is_empty() {
        return Err(ChatError::validation("message cannot be empty"));
    }

    let mut messages = Vec::with_capacity(history.len() + 1);
    for entry in history {
        match entry.role.as_str() {
            "user" => messages.push(ChatMessage::user(&entry.content)),
            "model" => messages.push(ChatMessage::model(&entry.content)),
            other => {
                tracing::debug!(role = other, "dropping history entry with unrecognized role");
            }
        }
    }

    messages.push(ChatMessage::user(message));
    Ok(messages)
}
