#![deny(unsafe_code)]

pub mod chat;
pub mod config;
pub mod error;
#[cfg(test)]
mod http_stub;
pub mod message;
pub mod orchestrator;
pub mod prelude;
pub mod price;
pub mod tools;

pub use chat::{ChatResponse, ChatService, Choice, GeminiClient};
pub use config::{Cli, Config};
pub use error::{Error, ErrorKind, Result};
pub use message::{Message, Part, Role};
pub use orchestrator::{Conversation, ConversationState};
pub use price::{PriceClient, PriceQuote};

pub use toolcall_core::{
    FunctionCall, FunctionDecl, FunctionResponse, ToolCollection, ToolError, ToolHandler,
    ToolSchema,
};
pub use toolcall_macros::ToolSchema;
