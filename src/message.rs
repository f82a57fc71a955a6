//! Conversation history.

use serde::Serialize;
use toolcall_core::{FunctionCall, FunctionResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Human,
    Assistant,
    Tool,
}

/// One content fragment of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Part {
    Text(String),
    ToolCall(FunctionCall),
    ToolResult(FunctionResponse),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl Message {
    pub fn human(text: impl Into<String>) -> Self {
        Self {
            role: Role::Human,
            parts: vec![Part::Text(text.into())],
        }
    }

    /// An assistant turn: its text followed by every requested tool call.
    pub fn assistant(text: impl Into<String>, tool_calls: &[FunctionCall]) -> Self {
        let mut parts = vec![Part::Text(text.into())];
        parts.extend(tool_calls.iter().cloned().map(Part::ToolCall));
        Self {
            role: Role::Assistant,
            parts,
        }
    }

    pub fn tool_result(response: FunctionResponse) -> Self {
        Self {
            role: Role::Tool,
            parts: vec![Part::ToolResult(response)],
        }
    }

    pub fn tool_calls(&self) -> impl Iterator<Item = &FunctionCall> + '_ {
        self.parts.iter().filter_map(|part| match part {
            Part::ToolCall(call) => Some(call),
            _ => None,
        })
    }
}
