use std::time::Duration;

use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::providers::{error_from_status, Provider};

/// OpenAI client for the chat-completions API
#[derive(Debug)]
pub struct OpenAI {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to the public API)
    endpoint: String,
}

/// OpenAI chat-completions request
#[derive(Debug, Serialize)]
pub struct OpenAIRequest {
    /// The model to use
    model: String,

    /// The messages for the conversation
    messages: Vec<OpenAIMessage>,

    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// OpenAI message format
#[derive(Debug, Serialize, Deserialize)]
pub struct OpenAIMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,

    /// Content of the message
    pub content: String,
}

/// Token usage information
#[derive(Debug, Deserialize)]
pub struct TokenUsage {
    /// Number of prompt tokens
    pub prompt_tokens: u32,
    /// Number of completion tokens
    pub completion_tokens: u32,
}

/// One choice in an OpenAI response
#[derive(Debug, Deserialize)]
pub struct OpenAIChoice {
    /// The generated message
    pub message: OpenAIMessage,
}

/// OpenAI chat-completions response
#[derive(Debug, Deserialize)]
pub struct OpenAIResponse {
    /// The generated choices
    pub choices: Vec<OpenAIChoice>,
    /// Token usage information
    pub usage: Option<TokenUsage>,
}

impl OpenAIRequest {
    /// Create a new request for a model
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            temperature: None,
        }
    }

    /// Add a message to the request
    pub fn add_message(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.messages.push(OpenAIMessage {
            role: role.into(),
            content: content.into(),
        });
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

impl OpenAI {
    /// Create a new OpenAI client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    fn api_url(&self) -> String {
        if self.endpoint.is_empty() {
            "https://api.openai.com/v1/chat/completions".to_string()
        } else {
            format!("{}/chat/completions", self.endpoint.trim_end_matches('/'))
        }
    }
}

#[async_trait]
impl Provider for OpenAI {
    type Request = OpenAIRequest;
    type Response = OpenAIResponse;

    async fn complete(&self, request: OpenAIRequest) -> Result<OpenAIResponse, ProviderError> {
        let response = self
            .client
            .post(self.api_url())
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    ProviderError::ConnectionError(e.to_string())
                } else {
                    ProviderError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("OpenAI API error ({}): {}", status, error_text);
            return Err(error_from_status(status.as_u16(), error_text));
        }

        response
            .json::<OpenAIResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let request = OpenAIRequest::new("gpt-3.5-turbo").add_message("user", "Hello");
        self.complete(request).await?;
        Ok(())
    }

    fn extract_text(response: &OpenAIResponse) -> String {
        response
            .choices
            .first()
            .map(|choice| choice.message.content.clone())
            .unwrap_or_default()
    }
}
