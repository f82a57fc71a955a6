//! Error types for the tool registry.

use std::borrow::Cow;

use thiserror::Error;

/// The model sent argument JSON that does not decode into the tool's input type.
///
/// Carries the full `serde_json::Error` so callers can inspect the
/// line/column of the offending token.
#[derive(Debug, Error)]
#[error("Failed to deserialize tool arguments: {source}")]
pub struct DeserializationError {
    #[source]
    pub source: serde_json::Error,
}

impl From<serde_json::Error> for DeserializationError {
    fn from(err: serde_json::Error) -> Self {
        DeserializationError { source: err }
    }
}

/// All the ways a call into a [`crate::ToolCollection`] can fail.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was never registered.
    #[error("Tool function '{name}' not found")]
    FunctionNotFound { name: Cow<'static, str> },

    /// A tool with this name already exists in the collection.
    #[error("Tool function '{name}' is already registered")]
    AlreadyRegistered { name: &'static str },

    #[error(transparent)]
    Deserialize(#[from] DeserializationError),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The handler failed with its own error type.
    #[error("{0}")]
    Handler(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl ToolError {
    /// Keeps the handler's error so callers can downcast it.
    pub fn handler(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        ToolError::Handler(err.into())
    }

    /// Wraps any displayable handler failure.
    pub fn runtime(err: impl std::fmt::Display) -> Self {
        ToolError::Runtime(err.to_string())
    }
}
