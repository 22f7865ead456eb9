//! The `/chatFlow` endpoint.
//!
//! Request body `{message, conversationHistory?}`; response
//! `{text, hasToolOutput, toolName?, toolOutputData?}`. History entries with
//! roles outside `user`/`model` are tolerated on the wire and dropped during
//! assembly.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{middleware, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, info};
use uuid::Uuid;

use liftlab_agent::{ChatRuntime, IncomingMessage};
use liftlab_core::admission::AdmissionController;
use liftlab_core::{ChatError, ChatOutcome};

use crate::admission::require_admission;

#[derive(Clone)]
pub struct ChatState {
    runtime: Arc<ChatRuntime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub conversation_history: Vec<IncomingMessage>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub text: String,
    pub has_tool_output: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tool_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_output_data: Option<Value>,
}

impl From<ChatOutcome> for ChatResponse {
    fn from(outcome: ChatOutcome) -> Self {
        Self {
            text: outcome.text,
            has_tool_output: outcome.has_tool_output,
            tool_name: outcome.tool_name,
            tool_output_data: outcome.tool_output,
        }
    }
}

pub fn router(runtime: Arc<ChatRuntime>, admission: Arc<AdmissionController>) -> Router {
    Router::new()
        .route("/chatFlow", post(chat_flow))
        .layer(middleware::from_fn_with_state(admission, require_admission))
        .with_state(ChatState { runtime })
}

pub async fn chat_flow(
    State(state): State<ChatState>,
    Json(request): Json<ChatRequest>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        history_len = request.conversation_history.len(),
        "chat request received"
    );

    match state.runtime.handle(&request.message, &request.conversation_history).await {
        Ok(outcome) => (StatusCode::OK, Json(ChatResponse::from(outcome))).into_response(),
        Err(chat_error) => {
            error!(correlation_id = %correlation_id, error = %chat_error, "chat request failed");
            let status = match &chat_error {
                ChatError::Validation { .. } => StatusCode::BAD_REQUEST,
                ChatError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
                ChatError::Generation { .. } => StatusCode::BAD_GATEWAY,
            };
            (status, Json(json!({"error": chat_error.to_string()}))).into_response()
        }
    }
}
