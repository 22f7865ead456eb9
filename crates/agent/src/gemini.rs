//! Gemini `generateContent` client.
//!
//! Drives the tool-calling loop against the REST API: while the model keeps
//! requesting capability invocations and the turn ceiling is not hit, each
//! requested tool is executed and its result echoed back as a
//! `functionResponse` turn. The transport is a narrow trait so the loop can
//! be exercised against scripted responses.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use liftlab_core::config::LlmConfig;
use liftlab_core::{ChatError, ChatMessage, Role, ToolInvocationRecord};

use crate::llm::{GenerateOutcome, GenerateRequest, HistoryItem, ModelClient};
use crate::tools::ToolDeclaration;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct FunctionCall {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) args: Value,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct FunctionResponse {
    pub(crate) name: String,
    pub(crate) response: Value,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) function_call: Option<FunctionCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) function_response: Option<FunctionResponse>,
}

impl Part {
    pub(crate) fn text(value: impl Into<String>) -> Self {
        Self { text: Some(value.into()), ..Self::default() }
    }

    pub(crate) fn function_call(name: impl Into<String>, args: Value) -> Self {
        Self {
            function_call: Some(FunctionCall { name: name.into(), args }),
            ..Self::default()
        }
    }

    fn function_response(name: impl Into<String>, response: Value) -> Self {
        Self {
            function_response: Some(FunctionResponse { name: name.into(), response }),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct Content {
    pub(crate) role: String,
    #[serde(default)]
    pub(crate) parts: Vec<Part>,
}

#[derive(Clone, Debug, Serialize)]
pub(crate) struct SystemInstruction {
    pub(crate) parts: Vec<Part>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DeclaredTools {
    pub(crate) function_declarations: Vec<ToolDeclaration>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    pub(crate) response_mime_type: String,
    pub(crate) response_schema: Value,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) system_instruction: Option<SystemInstruction>,
    pub(crate) contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) tools: Option<Vec<DeclaredTools>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Transport seam: one `generateContent` round trip.
#[async_trait]
pub(crate) trait GenerateApi: Send + Sync {
    async fn generate_content(&self, body: GenerateContentRequest) -> Result<Content, ChatError>;
}

pub struct HttpApi {
    http: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

#[async_trait]
impl GenerateApi for HttpApi {
    async fn generate_content(&self, body: GenerateContentRequest) -> Result<Content, ChatError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|err| ChatError::generation(format!("gemini request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ChatError::generation(format!("gemini returned {status}: {detail}")));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| ChatError::generation(format!("gemini response could not be parsed: {err}")))?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .ok_or_else(|| ChatError::generation("gemini response contained no candidates"))
    }
}

pub struct GeminiClient<A = HttpApi> {
    api: A,
}

impl GeminiClient<HttpApi> {
    pub fn new(config: &LlmConfig) -> Result<Self, ChatError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| ChatError::generation(format!("could not build http client: {err}")))?;

        Ok(Self {
            api: HttpApi {
                http,
                api_key: config.api_key.clone(),
                base_url: config.base_url.clone(),
                model: config.model.clone(),
            },
        })
    }
}

impl<A> GeminiClient<A> {
    #[cfg(test)]
    fn with_api(api: A) -> Self {
        Self { api }
    }
}

#[async_trait]
impl<A> ModelClient for GeminiClient<A>
where
    A: GenerateApi,
{
    async fn generate(&self, request: GenerateRequest<'_>) -> Result<GenerateOutcome, ChatError> {
        let mut contents: Vec<Content> =
            request.messages.iter().map(content_from_message).collect();
        let mut history: Vec<HistoryItem> =
            request.messages.iter().cloned().map(HistoryItem::Message).collect();

        let declarations = request.tools.declarations();
        let tools = (!declarations.is_empty())
            .then(|| vec![DeclaredTools { function_declarations: declarations }]);

        let mut text = String::new();
        let mut turn_limit_reached = false;
        let mut turn: u32 = 0;

        loop {
            turn += 1;

            let body = GenerateContentRequest {
                system_instruction: Some(SystemInstruction {
                    parts: vec![Part::text(request.system)],
                }),
                contents: contents.clone(),
                tools: tools.clone(),
                generation_config: None,
            };
            let content = self.api.generate_content(body).await?;

            let turn_text = collect_text(&content);
            if let Some(observer) = request.observer.as_ref() {
                for part in &content.parts {
                    if let Some(chunk) = part.text.as_deref() {
                        observer(chunk);
                    }
                }
            }
            if !turn_text.is_empty() {
                text = turn_text.clone();
                history.push(HistoryItem::Message(ChatMessage::model(turn_text)));
            }

            let calls: Vec<FunctionCall> =
                content.parts.iter().filter_map(|part| part.function_call.clone()).collect();
            if calls.is_empty() {
                break;
            }
            if turn >= request.max_turns {
                tracing::warn!(
                    max_turns = request.max_turns,
                    "generation turn ceiling reached, returning best current response"
                );
                turn_limit_reached = true;
                break;
            }

            contents.push(content);
            let mut response_parts = Vec::with_capacity(calls.len());
            for call in calls {
                let response = invoke_tool(request.tools, &call, &mut history).await;
                response_parts.push(Part::function_response(call.name, response));
            }
            contents.push(Content { role: "user".to_string(), parts: response_parts });
        }

        Ok(GenerateOutcome { text, history, turn_limit_reached })
    }

    async fn generate_data(
        &self,
        system: &str,
        prompt: &str,
        schema: Value,
    ) -> Result<Value, ChatError> {
        let body = GenerateContentRequest {
            system_instruction: Some(SystemInstruction { parts: vec![Part::text(system)] }),
            contents: vec![Content { role: "user".to_string(), parts: vec![Part::text(prompt)] }],
            tools: None,
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: schema,
            }),
        };

        let content = self.api.generate_content(body).await?;
        let text = collect_text(&content);
        serde_json::from_str(&text)
            .map_err(|err| ChatError::generation(format!("structured output was not valid JSON: {err}")))
    }
}

/// Execute one requested capability and record the invocation. Failures are
/// reported back to the model instead of aborting the request.
async fn invoke_tool(
    tools: &crate::tools::ToolRegistry,
    call: &FunctionCall,
    history: &mut Vec<HistoryItem>,
) -> Value {
    let Some(tool) = tools.get(&call.name) else {
        tracing::warn!(tool = %call.name, "model requested an unregistered tool");
        history.push(HistoryItem::ToolInvocation(ToolInvocationRecord {
            name: call.name.clone(),
            output: None,
        }));
        return json!({"error": format!("unknown tool `{}`", call.name)});
    };

    match tool.execute(call.args.clone()).await {
        Ok(output) => {
            history.push(HistoryItem::ToolInvocation(ToolInvocationRecord {
                name: call.name.clone(),
                output: Some(output.clone()),
            }));
            output
        }
        Err(error) => {
            tracing::warn!(tool = %call.name, error = %error, "tool execution failed");
            history.push(HistoryItem::ToolInvocation(ToolInvocationRecord {
                name: call.name.clone(),
                output: None,
            }));
            json!({"error": error.to_string()})
        }
    }
}

fn content_from_message(message: &ChatMessage) -> Content {
    Content {
        role: match message.role {
            Role::User => "user".to_string(),
            Role::Model => "model".to_string(),
        },
        parts: vec![Part::text(&message.content)],
    }
}

fn collect_text(content: &Content) -> String {
    content.parts.iter().filter_map(|part| part.text.as_deref()).collect()
}
