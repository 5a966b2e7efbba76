/*!
 * Tests for application configuration
 */

use std::str::FromStr;
use subloc::app_config::{Config, LogLevel, PromptConfig, TranslationProvider};

/// Test default configuration values
#[test]
fn test_config_default_shouldHaveSaneValues() {
    let config = Config::default();

    assert_eq!(config.source_language, "en");
    assert_eq!(config.target_language, "fa");
    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.translation.provider, TranslationProvider::OpenAI);
    assert_eq!(config.translation.available_providers.len(), 2);
    assert_eq!(config.translation.common.retry_count, 5);
    assert_eq!(config.translation.common.retry_delay_secs, 10);
    assert_eq!(config.translation.common.temperature, 0.0);
}

/// Test provider accessors fall back to defaults per provider
#[test]
fn test_translationConfig_accessors_shouldUseActiveProvider() {
    let mut config = Config::default();

    assert_eq!(config.translation.get_model(), "gpt-3.5-turbo");
    assert!(config.translation.get_endpoint().contains("api.openai.com"));

    config.translation.provider = TranslationProvider::Gemini;
    assert_eq!(config.translation.get_model(), "gemini-2.5-flash");
    assert!(config.translation.get_endpoint().contains("generativelanguage"));
}

/// Test provider enum string conversions
#[test]
fn test_translationProvider_fromStr_shouldParseKnownNames() {
    assert_eq!(TranslationProvider::from_str("openai").unwrap(), TranslationProvider::OpenAI);
    assert_eq!(TranslationProvider::from_str("GEMINI").unwrap(), TranslationProvider::Gemini);
    assert!(TranslationProvider::from_str("ollama").is_err());

    assert_eq!(TranslationProvider::OpenAI.to_string(), "openai");
    assert_eq!(TranslationProvider::Gemini.display_name(), "Gemini");
}

/// Test a config round trip through JSON
#[test]
fn test_config_jsonRoundTrip_shouldPreserveValues() {
    let mut config = Config::default();
    config.target_language = "ar".to_string();
    config.translation.prompt = PromptConfig {
        tone: "casual".to_string(),
        extra_instruction: "Keep names untranslated.".to_string(),
    };

    let json = serde_json::to_string_pretty(&config).unwrap();
    let parsed: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.target_language, "ar");
    assert_eq!(parsed.translation.prompt.tone, "casual");
    assert_eq!(parsed.translation.prompt.extra_instruction, "Keep names untranslated.");
}

/// Test missing optional fields fall back to serde defaults
#[test]
fn test_config_fromMinimalJson_shouldApplyDefaults() {
    let json = r#"{
        "source_language": "en",
        "target_language": "fa",
        "translation": {}
    }"#;
    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.translation.provider, TranslationProvider::OpenAI);
    assert_eq!(config.translation.prompt.tone, "professional");
    assert_eq!(config.translation.common.retry_count, 5);
}

/// Test validation rejects a missing API key
#[test]
fn test_config_validate_withoutApiKey_shouldFail() {
    let config = Config::default();
    let result = config.validate();

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("API key"));
}

/// Test validation rejects an unknown language code
#[test]
fn test_config_validate_withBadLanguage_shouldFail() {
    let mut config = Config::default();
    config.source_language = "zz".to_string();

    assert!(config.validate().is_err());
}

/// Test validation passes with a key and valid languages
#[test]
fn test_config_validate_withApiKey_shouldSucceed() {
    let mut config = Config::default();
    for provider in &mut config.translation.available_providers {
        provider.api_key = "sk-test".to_string();
    }

    assert!(config.validate().is_ok());
}
