use async_trait::async_trait;
use log::{info, warn};
use url::Url;

use crate::app_config::{Config, TranslationConfig, TranslationProvider};
use crate::errors::ProviderError;
use crate::language_utils;
use crate::providers::gemini::{Gemini, GeminiRequest};
use crate::providers::openai::{OpenAI, OpenAIRequest};
use crate::providers::Provider;

// @module: Translation service over the provider clients

/// The translator collaborator contract used by the pipeline.
///
/// Takes the full newline-joined text blob and returns the translated lines
/// in order, or a provider error. Exactly one provider is used per run.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate a text blob into an ordered list of lines
    async fn translate(&self, text: &str) -> Result<Vec<String>, ProviderError>;
}

// @struct: Provider selection, prompt construction and bounded retry
pub struct TranslationService {
    // @field: Translation configuration (provider, credentials, retry)
    config: TranslationConfig,

    // @field: Source language code
    source_language: String,

    // @field: Target language code
    target_language: String,
}

impl TranslationService {
    /// Create a service from the application config.
    ///
    /// Validates the configured endpoint eagerly so a typo fails at startup
    /// rather than on the first translation call.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let endpoint = config.translation.get_endpoint();
        if !endpoint.is_empty() {
            Url::parse(&endpoint)
                .map_err(|e| anyhow::anyhow!("Invalid endpoint URL '{}': {}", endpoint, e))?;
        }

        Ok(Self {
            config: config.translation.clone(),
            source_language: config.source_language.clone(),
            target_language: config.target_language.clone(),
        })
    }

    /// Human-readable language name for the prompt, falling back to the
    /// raw code when the code is unknown
    fn language_name(code: &str) -> String {
        language_utils::get_language_name(code).unwrap_or_else(|_| code.to_string())
    }

    /// Build the system instruction sent with every request.
    ///
    /// The instruction pins the line-by-line structure and the sequential
    /// prefixes; reconciliation downstream depends on both surviving the
    /// round trip.
    fn build_system_instruction(&self) -> String {
        let source = Self::language_name(&self.source_language);
        let target = Self::language_name(&self.target_language);
        let prompt = &self.config.prompt;

        format!(
            "You are a professional subtitle translator. Your task is to translate the provided subtitle lines \
             from {} to {}. Preserve the line-by-line structure EXACTLY. \
             Each line starts with a sequential prefix (e.g., '1-', '2-') which you MUST include in the output \
             at the start of the translated text. The tone of the translation should be {}. \
             {} \
             Do not add any extra text, explanations, or any formatting other than the translated lines with their original prefixes.",
            source,
            target,
            prompt.tone,
            prompt.extra_instruction.trim()
        )
    }

    /// One provider call, no retry
    async fn call_provider(&self, text: &str) -> Result<String, ProviderError> {
        let model = self.config.get_model();
        let api_key = self.config.get_api_key();
        let endpoint = self.config.get_endpoint();
        let timeout_secs = self.config.get_timeout_secs();
        let system_instruction = self.build_system_instruction();

        match self.config.provider {
            TranslationProvider::OpenAI => {
                let client = OpenAI::new(api_key, endpoint, timeout_secs);
                let request = OpenAIRequest::new(model)
                    .add_message("system", system_instruction)
                    .add_message("user", text)
                    .temperature(self.config.common.temperature);
                let response = client.complete(request).await?;
                Ok(OpenAI::extract_text(&response))
            }
            TranslationProvider::Gemini => {
                let client = Gemini::new(api_key, endpoint, timeout_secs);
                let request = GeminiRequest::new(model)
                    .system_instruction(system_instruction)
                    .add_content(text)
                    .temperature(self.config.common.temperature);
                let response = client.complete(request).await?;
                Ok(Gemini::extract_text(&response))
            }
        }
    }

    /// Split a provider response into cleaned lines, dropping blank filler
    fn response_to_lines(text: &str) -> Vec<String> {
        text.lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect()
    }
}

#[async_trait]
impl Translator for TranslationService {
    /// Translate a text blob, retrying transient provider failures a bounded
    /// number of times with a fixed inter-attempt delay. Authentication and
    /// malformed-request errors fail immediately.
    async fn translate(&self, text: &str) -> Result<Vec<String>, ProviderError> {
        let max_attempts = self.config.common.retry_count.max(1);
        let delay = std::time::Duration::from_secs(self.config.common.retry_delay_secs);

        let mut attempt = 0;
        loop {
            attempt += 1;
            info!(
                "Calling {} API (attempt {}/{})",
                self.config.provider.display_name(),
                attempt,
                max_attempts
            );

            match self.call_provider(text).await {
                Ok(response_text) => return Ok(Self::response_to_lines(&response_text)),
                Err(e) if e.is_transient() && attempt < max_attempts => {
                    warn!(
                        "Transient provider error (attempt {}/{}): {}. Retrying in {}s...",
                        attempt,
                        max_attempts,
                        e,
                        delay.as_secs()
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
