//! Google Gemini `generateContent` client.
//!
//! Maps the conversation history and tool declarations onto the Gemini REST
//! wire format and turns candidates back into [`Choice`]s. Requests carry no
//! timeout and are never retried.

use futures::{FutureExt, future::BoxFuture};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use toolcall_core::{FunctionCall, FunctionDecl};
use tracing::debug;

use super::{ChatResponse, ChatService, Choice};
use crate::{
    config::Config,
    error::{Error, Result},
    message::{Message, Part, Role},
};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<GeminiTools<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    role: &'static str,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiTools<'a> {
    function_declarations: &'a [FunctionDecl],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
enum GeminiPart<'a> {
    Text(&'a str),
    FunctionCall { name: &'a str, args: Value },
    FunctionResponse { name: &'a str, response: Value },
}

#[derive(Debug, Default, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiResponseContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    function_call: Option<GeminiFunctionCall>,
}

#[derive(Debug, Deserialize)]
struct GeminiFunctionCall {
    name: String,
    #[serde(default)]
    args: Option<Value>,
}

fn role_name(role: Role) -> &'static str {
    match role {
        Role::Human => "user",
        Role::Assistant => "model",
        Role::Tool => "function",
    }
}

fn build_request<'a>(
    history: &'a [Message],
    tools: &'a [FunctionDecl],
) -> Result<GeminiRequest<'a>> {
    let mut contents: Vec<GeminiContent<'a>> = Vec::with_capacity(history.len());

    for message in history {
        let mut parts = Vec::with_capacity(message.parts.len());
        for part in &message.parts {
            match part {
                // Gemini rejects empty text parts
                Part::Text(text) if text.is_empty() => {}
                Part::Text(text) => parts.push(GeminiPart::Text(text)),
                Part::ToolCall(call) => parts.push(GeminiPart::FunctionCall {
                    name: &call.name,
                    args: serde_json::from_str(&call.arguments)?,
                }),
                Part::ToolResult(result) => parts.push(GeminiPart::FunctionResponse {
                    name: &result.name,
                    response: json!({ "name": result.name, "content": result.content }),
                }),
            }
        }
        // a turn left without parts is dropped too
        if parts.is_empty() {
            continue;
        }

        let role = role_name(message.role);
        // results of one parallel call turn share a single content
        match contents.last_mut() {
            Some(last) if message.role == Role::Tool && last.role == role => {
                last.parts.extend(parts);
            }
            _ => contents.push(GeminiContent { role, parts }),
        }
    }

    let tools = if tools.is_empty() {
        Vec::new()
    } else {
        vec![GeminiTools {
            function_declarations: tools,
        }]
    };

    Ok(GeminiRequest { contents, tools })
}

impl GeminiResponse {
    fn into_chat_response(self) -> ChatResponse {
        let choices = self
            .candidates
            .into_iter()
            .map(|candidate| {
                let mut choice = Choice {
                    stop_reason: candidate.finish_reason,
                    ..Choice::default()
                };
                for part in candidate.content.map(|c| c.parts).unwrap_or_default() {
                    if let Some(text) = part.text {
                        choice.content.push_str(&text);
                    }
                    if let Some(call) = part.function_call {
                        let args = call.args.unwrap_or_else(|| json!({}));
                        choice
                            .tool_calls
                            .push(FunctionCall::new(call.name, args.to_string()));
                    }
                }
                choice
            })
            .collect();

        ChatResponse { choices }
    }
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.api_key, &config.model, &config.chat_base_url)
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    async fn send(&self, history: &[Message], tools: &[FunctionDecl]) -> Result<ChatResponse> {
        let request = build_request(history, tools)?;
        debug!(
            model = %self.model,
            messages = history.len(),
            tools = tools.len(),
            "sending generateContent request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        // read the whole body so the connection is released before decoding
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(Error::Api {
                service: "gemini",
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let parsed: GeminiResponse = serde_json::from_slice(&body)?;
        debug!(candidates = parsed.candidates.len(), "received generateContent response");
        Ok(parsed.into_chat_response())
    }
}

impl ChatService for GeminiClient {
    fn generate<'a>(
        &'a self,
        history: &'a [Message],
        tools: &'a [FunctionDecl],
    ) -> BoxFuture<'a, Result<ChatResponse>> {
        self.send(history, tools).boxed()
    }
}
