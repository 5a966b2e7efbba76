use std::time::Duration;

use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::providers::{error_from_status, Provider};

/// Gemini client for the generateContent API
#[derive(Debug)]
pub struct Gemini {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to the public API)
    endpoint: String,
}

/// Gemini generateContent request
#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    /// Model identifier, used to build the request URL
    #[serde(skip)]
    model: String,

    /// System instruction guiding the model
    #[serde(rename = "system_instruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,

    /// The conversation contents
    contents: Vec<GeminiContent>,

    /// Generation parameters
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

/// A content block: a list of text parts
#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiContent {
    /// The text parts of this content block
    pub parts: Vec<GeminiPart>,
}

/// One text part
#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiPart {
    /// The text content
    pub text: String,
}

/// Generation parameters
#[derive(Debug, Serialize)]
pub struct GenerationConfig {
    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// One candidate in a Gemini response
#[derive(Debug, Deserialize)]
pub struct GeminiCandidate {
    /// The generated content
    pub content: GeminiContent,
}

/// Gemini generateContent response
#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    /// The generated candidates
    pub candidates: Vec<GeminiCandidate>,
}

impl GeminiRequest {
    /// Create a new request for a model
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system_instruction: None,
            contents: Vec::new(),
            generation_config: None,
        }
    }

    /// Set the system instruction
    pub fn system_instruction(mut self, text: impl Into<String>) -> Self {
        self.system_instruction = Some(GeminiContent {
            parts: vec![GeminiPart { text: text.into() }],
        });
        self
    }

    /// Add a user content block
    pub fn add_content(mut self, text: impl Into<String>) -> Self {
        self.contents.push(GeminiContent {
            parts: vec![GeminiPart { text: text.into() }],
        });
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.generation_config = Some(GenerationConfig {
            temperature: Some(temperature),
        });
        self
    }
}

impl Gemini {
    /// Create a new Gemini client
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

    fn api_url(&self, model: &str) -> String {
        let base = if self.endpoint.is_empty() {
            "https://generativelanguage.googleapis.com"
        } else {
            self.endpoint.trim_end_matches('/')
        };
        format!("{}/v1beta/models/{}:generateContent", base, model)
    }
}

#[async_trait]
impl Provider for Gemini {
    type Request = GeminiRequest;
    type Response = GeminiResponse;

    async fn complete(&self, request: GeminiRequest) -> Result<GeminiResponse, ProviderError> {
        let response = self
            .client
            .post(self.api_url(&request.model))
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
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
            error!("Gemini API error ({}): {}", status, error_text);
            return Err(error_from_status(status.as_u16(), error_text));
        }

        response
            .json::<GeminiResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let request = GeminiRequest::new("gemini-2.5-flash").add_content("Hello");
        self.complete(request).await?;
        Ok(())
    }

    fn extract_text(response: &GeminiResponse) -> String {
        response
            .candidates
            .first()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .map(|part| part.text.as_str())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}
