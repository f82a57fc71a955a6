//! Call and response models exchanged between the model and the registry.

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::error::ToolError;

/// A model-issued request to run a named tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Name of the tool to run
    pub name: String,
    /// Arguments exactly as the model encoded them (JSON text)
    pub arguments: String,
}

impl FunctionCall {
    pub fn new(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: arguments.into(),
        }
    }
}

/// The outcome of a tool run, fed back to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionResponse {
    pub name: String,
    pub content: String,
}

/// Something that can serve a tool call.
///
/// Receives the raw argument JSON and is responsible for decoding it.
pub trait ToolHandler: Send + Sync {
    fn invoke<'a>(&'a self, arguments: &'a str) -> BoxFuture<'a, Result<String, ToolError>>;
}
