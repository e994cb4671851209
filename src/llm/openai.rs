//! Client for OpenAI-compatible `/chat/completions` endpoints.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, error, instrument, trace};

use super::types::{OpenAIError, OpenAIRequest, OpenAIResponse};
use super::{ChatModel, ChatReply, ChatRequest, ModelError};
use crate::config::Config;

pub struct OpenAIClient {
    http_client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAIClient {
    pub fn new(config: &Config) -> Result<Self, ModelError> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ModelError::Http(e.to_string()))?;

        debug!(
            model = %config.model,
            base_url = %config.base_url,
            "Initialized model client"
        );

        Ok(Self {
            http_client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    async fn handle_error_response(&self, response: reqwest::Response) -> ModelError {
        let status = response.status();
        debug!(status = %status, "Received error response");

        if status == StatusCode::UNAUTHORIZED {
            return ModelError::Unauthorized;
        }

        match response.json::<OpenAIError>().await {
            Ok(err) => {
                error!(
                    error_type = ?err.error.error_type,
                    code = ?err.error.code,
                    message = %err.error.message,
                    "Model API error"
                );
                ModelError::Api(err.error.message)
            }
            Err(e) => {
                error!(status = %status, parse_error = %e, "Failed to parse error response");
                ModelError::Api(format!("HTTP {status}"))
            }
        }
    }
}

#[async_trait]
impl ChatModel for OpenAIClient {
    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn chat(&self, request: ChatRequest<'_>) -> Result<ChatReply, ModelError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = OpenAIRequest::new(&self.model, &request);

        trace!(
            url = %url,
            message_count = request.messages.len(),
            tool_count = request.tools.len(),
            "Sending completion request"
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ModelError::Timeout
                } else {
                    ModelError::Http(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(self.handle_error_response(response).await);
        }

        let decoded: OpenAIResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ModelError::Timeout
            } else {
                ModelError::InvalidResponse(e.to_string())
            }
        })?;

        ChatReply::try_from(decoded)
    }
}
