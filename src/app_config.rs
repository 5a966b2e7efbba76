use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO)
    pub source_language: String,

    /// Target language code (ISO)
    pub target_language: String,

    /// Translation config
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: OpenAI
    #[default]
    OpenAI,
    // @provider: Gemini
    Gemini,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::OpenAI => "OpenAI",
            Self::Gemini => "Gemini",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::OpenAI => "openai".to_string(),
            Self::Gemini => "gemini".to_string(),
        }
    }
}

// Implement Display trait for TranslationProvider
impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for TranslationProvider
impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "gemini" => Ok(Self::Gemini),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: TranslationProvider) -> Self {
        match provider_type {
            TranslationProvider::OpenAI => Self {
                provider_type: "openai".to_string(),
                model: default_openai_model(),
                api_key: String::new(),
                endpoint: default_openai_endpoint(),
                timeout_secs: default_timeout_secs(),
            },
            TranslationProvider::Gemini => Self {
                provider_type: "gemini".to_string(),
                model: default_gemini_model(),
                api_key: String::new(),
                endpoint: default_gemini_endpoint(),
                timeout_secs: default_timeout_secs(),
            },
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Available translation providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,

    /// Common translation settings
    #[serde(default)]
    pub common: TranslationCommonConfig,

    /// Prompt settings for the translation instruction
    #[serde(default)]
    pub prompt: PromptConfig,
}

/// Common translation settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationCommonConfig {
    /// Retry count for transient provider failures
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Fixed delay in seconds between retry attempts
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,

    /// Temperature parameter for text generation (0.0 to 1.0).
    /// Translation wants determinism, not creativity.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for TranslationCommonConfig {
    fn default() -> Self {
        Self {
            retry_count: default_retry_count(),
            retry_delay_secs: default_retry_delay_secs(),
            temperature: default_temperature(),
        }
    }
}

/// Instruction settings sent along with the dialogue text
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PromptConfig {
    /// Translation tone (e.g. "professional", "casual")
    #[serde(default = "default_tone")]
    pub tone: String,

    /// Free-form extra instruction appended to the system prompt
    #[serde(default = "String::new")]
    pub extra_instruction: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            tone: default_tone(),
            extra_instruction: String::new(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_retry_count() -> u32 {
    5
}

fn default_retry_delay_secs() -> u64 {
    10
}

fn default_temperature() -> f32 {
    0.0
}

fn default_tone() -> String {
    "professional".to_string()
}

fn default_openai_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_gemini_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_openai_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate languages
        let _source_name = crate::language_utils::get_language_name(&self.source_language)?;
        let _target_name = crate::language_utils::get_language_name(&self.target_language)?;

        // Both supported providers are hosted APIs and need a key
        if self.translation.get_api_key().is_empty() {
            return Err(anyhow!(
                "Translation API key is required for {} provider",
                self.translation.provider.display_name()
            ));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: "en".to_string(),
            target_language: "fa".to_string(),
            translation: TranslationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl TranslationConfig {
    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        let provider_str = self.provider.to_lowercase_string();
        self.available_providers
            .iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.model.is_empty() {
                return provider_config.model.clone();
            }
        }

        // Default fallback based on provider type
        match self.provider {
            TranslationProvider::OpenAI => default_openai_model(),
            TranslationProvider::Gemini => default_gemini_model(),
        }
    }

    /// Get the API key for the active provider
    pub fn get_api_key(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.api_key.is_empty() {
                return provider_config.api_key.clone();
            }
        }

        String::new()
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.endpoint.is_empty() {
                return provider_config.endpoint.clone();
            }
        }

        // Default fallback based on provider type
        match self.provider {
            TranslationProvider::OpenAI => default_openai_endpoint(),
            TranslationProvider::Gemini => default_gemini_endpoint(),
        }
    }

    /// Get the request timeout for the active provider
    pub fn get_timeout_secs(&self) -> u64 {
        if let Some(provider_config) = self.get_active_provider_config() {
            if provider_config.timeout_secs > 0 {
                return provider_config.timeout_secs;
            }
        }

        default_timeout_secs()
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        let mut config = Self {
            provider: TranslationProvider::default(),
            available_providers: Vec::new(),
            common: TranslationCommonConfig::default(),
            prompt: PromptConfig::default(),
        };

        // Add default providers
        config.available_providers.push(ProviderConfig::new(TranslationProvider::OpenAI));
        config.available_providers.push(ProviderConfig::new(TranslationProvider::Gemini));

        config
    }
}
