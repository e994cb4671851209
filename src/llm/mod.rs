//! Chat completion backend.
//!
//! [`ChatModel::chat`] is the single network round trip; the provided
//! methods layer the two call shapes the dispatcher needs on top of it.

pub mod openai;
pub mod types;

use async_trait::async_trait;
use tracing::debug;

pub use openai::OpenAIClient;

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("model request timed out")]
    Timeout,

    #[error("authentication failed")]
    Unauthorized,

    #[error("API error: {0}")]
    Api(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("no choices found")]
    NoChoices,

    #[error("No appropriate tool is found, {0}")]
    NoAppropriateTool(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A callable function the model may select.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    /// JSON schema of the arguments object.
    pub parameters: serde_json::Value,
}

/// A function selected by the model, with its raw JSON arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCall {
    pub name: String,
    pub arguments: String,
}

#[derive(Debug, Clone)]
pub struct ChatRequest<'a> {
    pub messages: Vec<Message>,
    pub tools: &'a [ToolDefinition],
}

/// First candidate completion of a chat response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatReply {
    pub content: Option<String>,
    pub tool_calls: Vec<ToolCall>,
}

#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn chat(&self, request: ChatRequest<'_>) -> Result<ChatReply, ModelError>;

    /// Plain text completion with an optional system prompt.
    async fn generate(
        &self,
        system_prompt: Option<&str>,
        input: &str,
    ) -> Result<String, ModelError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(prompt) = system_prompt {
            messages.push(Message::system(prompt));
        }
        messages.push(Message::user(input));

        let reply = self.chat(ChatRequest { messages, tools: &[] }).await?;
        Ok(reply.content.unwrap_or_default())
    }

    /// Ask the model to pick exactly one of `tools` for `input`.
    ///
    /// Zero or several tool calls are reported as
    /// [`ModelError::NoAppropriateTool`]; the model is never second-guessed.
    async fn select_tool(
        &self,
        input: &str,
        tools: &[ToolDefinition],
    ) -> Result<ToolCall, ModelError> {
        let request = ChatRequest {
            messages: vec![Message::user(input)],
            tools,
        };
        let mut reply = self.chat(request).await?;
        debug!(tool_calls = reply.tool_calls.len(), "Model replied");

        if reply.tool_calls.len() != 1 {
            return Err(ModelError::NoAppropriateTool(reply.tool_calls.len()));
        }
        Ok(reply.tool_calls.remove(0))
    }
}
