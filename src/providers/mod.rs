/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations for the supported providers:
 * - OpenAI: chat-completions API
 * - Gemini: generateContent API
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all translation providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably in the translation service.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// The response type for this provider
    type Response: Send + Sync;

    /// Complete a request using this provider
    ///
    /// # Arguments
    /// * `request` - The request to complete
    ///
    /// # Returns
    /// * `Result<Self::Response, ProviderError>` - The response from the provider or an error
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Test the connection to the provider
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the connection is successful, or an error
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Extract text from the provider response
    ///
    /// # Arguments
    /// * `response` - The response from the provider
    ///
    /// # Returns
    /// * `String` - The extracted text
    fn extract_text(response: &Self::Response) -> String;
}

/// Map an unsuccessful HTTP status to the matching provider error.
///
/// The split drives the retry policy: 429 and 5xx are transient, the
/// 4xx family is not.
pub(crate) fn error_from_status(status_code: u16, message: String) -> ProviderError {
    match status_code {
        401 | 403 => ProviderError::AuthenticationError(message),
        429 => ProviderError::RateLimitExceeded(message),
        400 | 404 | 422 => ProviderError::InvalidRequest(message),
        _ => ProviderError::ApiError { status_code, message },
    }
}

pub mod gemini;
pub mod openai;
