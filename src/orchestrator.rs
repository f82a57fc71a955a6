//! Two-round tool-calling conversation.
//!
//! ```text
//! Initial ──request_tools──▶ AwaitingToolDispatch ──dispatch_tools──▶ Final
//! ```
//!
//! The first round sends the opening prompt with the tool list; every tool
//! call in the reply is run in the order received and its result appended;
//! the second round resends the whole history and yields the final choice.

use std::sync::Arc;

use toolcall_core::ToolCollection;
use tracing::{debug, info};

use crate::{
    chat::{ChatService, Choice},
    error::{Error, Result},
    message::Message,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationState {
    Initial,
    AwaitingToolDispatch,
    Final,
}

impl ConversationState {
    fn as_str(self) -> &'static str {
        match self {
            ConversationState::Initial => "initial",
            ConversationState::AwaitingToolDispatch => "awaiting tool dispatch",
            ConversationState::Final => "final",
        }
    }
}

pub struct Conversation<C> {
    chat: C,
    tools: Arc<ToolCollection>,
    history: Vec<Message>,
    state: ConversationState,
}

impl<C: ChatService> Conversation<C> {
    pub fn new(chat: C, tools: Arc<ToolCollection>, prompt: impl Into<String>) -> Self {
        Self {
            chat,
            tools,
            history: vec![Message::human(prompt)],
            state: ConversationState::Initial,
        }
    }

    pub fn state(&self) -> ConversationState {
        self.state
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    fn expect_state(&self, expected: ConversationState, action: &'static str) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(Error::State {
                action,
                state: self.state.as_str(),
            })
        }
    }

    async fn first_choice(&self) -> Result<Choice> {
        let response = self
            .chat
            .generate(&self.history, self.tools.declarations())
            .await?;
        response.choices.into_iter().next().ok_or(Error::NoChoices)
    }

    /// Sends the opening prompt and records the model's reply.
    ///
    /// Returns the number of tool calls the model asked for.
    pub async fn request_tools(&mut self) -> Result<usize> {
        self.expect_state(ConversationState::Initial, "request tools")?;

        let choice = self.first_choice().await?;
        debug!(
            tool_calls = choice.tool_calls.len(),
            "model replied to opening prompt"
        );
        self.history
            .push(Message::assistant(choice.content, &choice.tool_calls));
        self.state = ConversationState::AwaitingToolDispatch;

        Ok(choice.tool_calls.len())
    }

    /// Runs the requested tools, resends the history and returns the final choice.
    pub async fn dispatch_tools(&mut self) -> Result<Choice> {
        self.expect_state(ConversationState::AwaitingToolDispatch, "dispatch tools")?;

        let calls: Vec<_> = self
            .history
            .last()
            .map(|reply| reply.tool_calls().cloned().collect())
            .unwrap_or_default();

        for call in &calls {
            info!(tool = %call.name, "dispatching tool call");
            info!(arguments = %call.arguments, "tool arguments");

            let response = self
                .tools
                .call(call)
                .await
                .map_err(|err| Error::from_tool(&call.name, err))?;
            self.history.push(Message::tool_result(response));
        }

        let choice = self.first_choice().await?;
        self.history
            .push(Message::assistant(choice.content.clone(), &choice.tool_calls));
        self.state = ConversationState::Final;

        Ok(choice)
    }

    pub async fn run(&mut self) -> Result<Choice> {
        self.request_tools().await?;
        self.dispatch_tools().await
    }
}
