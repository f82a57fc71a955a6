//! Chat completion service seam.

pub mod gemini;

use std::sync::Arc;

use futures::future::BoxFuture;
use serde::Serialize;
use toolcall_core::{FunctionCall, FunctionDecl};

use crate::{error::Result, message::Message};

pub use gemini::GeminiClient;

/// One candidate answer from the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Choice {
    pub content: String,
    pub tool_calls: Vec<FunctionCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
}

/// An LLM provider that accepts a history plus tool list and returns choices.
pub trait ChatService: Send + Sync {
    fn generate<'a>(
        &'a self,
        history: &'a [Message],
        tools: &'a [FunctionDecl],
    ) -> BoxFuture<'a, Result<ChatResponse>>;
}

impl<T: ChatService + ?Sized> ChatService for Arc<T> {
    fn generate<'a>(
        &'a self,
        history: &'a [Message],
        tools: &'a [FunctionDecl],
    ) -> BoxFuture<'a, Result<ChatResponse>> {
        (**self).generate(history, tools)
    }
}
