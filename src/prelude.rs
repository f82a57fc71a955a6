//! Convenient re-exports for common usage patterns.
//!
//! ```rust
//! use toolcall::prelude::*;
//! ```

pub use crate::{
    ChatService, Choice, Config, Conversation, Error, GeminiClient, Message, PriceClient, Result,
    ToolCollection, ToolError, ToolHandler, ToolSchema,
    tools::{default_tools, register_price_tool},
};
