//! OpenAI-compatible wire types.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{ChatReply, ChatRequest, Message, ModelError, ToolCall, ToolDefinition};

#[derive(Debug, Serialize)]
pub struct OpenAIRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<OpenAIMessage<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<OpenAITool<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct OpenAIMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub struct OpenAITool<'a> {
    #[serde(rename = "type")]
    pub tool_type: &'static str,
    pub function: OpenAIFunction<'a>,
}

#[derive(Debug, Serialize)]
pub struct OpenAIFunction<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub parameters: &'a serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIChoice {
    pub message: OpenAIResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<OpenAIToolCall>>,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIToolCall {
    pub function: OpenAIFunctionCall,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIFunctionCall {
    pub name: String,
    #[serde(default)]
    pub arguments: String,
}

/// OpenAI API error envelope.
#[derive(Debug, Deserialize)]
pub struct OpenAIError {
    pub error: OpenAIErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIErrorDetail {
    pub message: String,
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub code: Option<serde_json::Value>,
}

impl<'a> From<&'a Message> for OpenAIMessage<'a> {
    fn from(msg: &'a Message) -> Self {
        Self {
            role: msg.role.as_str(),
            content: &msg.content,
        }
    }
}

impl<'a> From<&'a ToolDefinition> for OpenAITool<'a> {
    fn from(tool: &'a ToolDefinition) -> Self {
        Self {
            tool_type: "function",
            function: OpenAIFunction {
                name: tool.name,
                description: tool.description,
                parameters: &tool.parameters,
            },
        }
    }
}

impl<'a> OpenAIRequest<'a> {
    pub fn new(model: &'a str, request: &'a ChatRequest<'_>) -> Self {
        Self {
            model,
            messages: request.messages.iter().map(OpenAIMessage::from).collect(),
            tools: request.tools.iter().map(OpenAITool::from).collect(),
            tool_choice: if request.tools.is_empty() {
                None
            } else {
                Some("auto")
            },
        }
    }
}

impl TryFrom<OpenAIResponse> for ChatReply {
    type Error = ModelError;

    fn try_from(response: OpenAIResponse) -> Result<Self, Self::Error> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or(ModelError::NoChoices)?;
        trace!(
            id = ?response.id,
            finish_reason = ?choice.finish_reason,
            "Decoded completion"
        );

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|tc| ToolCall {
                name: tc.function.name,
                arguments: tc.function.arguments,
            })
            .collect();

        Ok(Self {
            content: choice.message.content,
            tool_calls,
        })
    }
}
