//! Top-level error type.
//!
//! Each stage of the conversation returns `Result<T, Error>`; only the
//! binary decides that an error ends the process.

use thiserror::Error;
use toolcall_core::ToolError;

pub type Result<T> = std::result::Result<T, Error>;

/// Broad class of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Transport,
    Decode,
    Protocol,
    Tool,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("please set {var}")]
    MissingCredential { var: &'static str },

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{service} returned {status}: {body}")]
    Api {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("quote response has no {currency} price for '{id}'")]
    MissingQuote { id: String, currency: String },

    #[error("invalid arguments for tool '{name}': {source}")]
    ToolArguments {
        name: String,
        #[source]
        source: ToolError,
    },

    #[error("got unexpected function call: {name}")]
    UnknownTool { name: String },

    #[error("chat service returned no choices")]
    NoChoices,

    #[error("cannot {action} while conversation is {state}")]
    State {
        action: &'static str,
        state: &'static str,
    },

    #[error("tool '{name}' failed: {source}")]
    Tool {
        name: String,
        #[source]
        source: ToolError,
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingCredential { .. } => ErrorKind::Configuration,
            Error::Transport(_) | Error::Api { .. } => ErrorKind::Transport,
            Error::Decode(_) | Error::MissingQuote { .. } | Error::ToolArguments { .. } => {
                ErrorKind::Decode
            }
            Error::UnknownTool { .. } | Error::NoChoices | Error::State { .. } => {
                ErrorKind::Protocol
            }
            Error::Tool { .. } => ErrorKind::Tool,
        }
    }

    /// Sorts a registry failure for the call named `name` into the taxonomy.
    pub fn from_tool(name: &str, err: ToolError) -> Self {
        match err {
            ToolError::FunctionNotFound { name } => Error::UnknownTool {
                name: name.into_owned(),
            },
            source @ ToolError::Deserialize(_) => Error::ToolArguments {
                name: name.to_string(),
                source,
            },
            ToolError::Handler(source) => match source.downcast::<Error>() {
                Ok(err) => *err,
                Err(source) => Error::Tool {
                    name: name.to_string(),
                    source: ToolError::Handler(source),
                },
            },
            source => Error::Tool {
                name: name.to_string(),
                source,
            },
        }
    }
}
