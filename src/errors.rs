/*!
 * Error types for the subloc application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when calling a translation provider API
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// Request rejected as malformed by the provider
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ProviderError {
    /// Whether the error is worth retrying after a delay.
    ///
    /// Rate limits, server-side failures and connection drops are transient;
    /// authentication and malformed-request errors never resolve by retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RateLimitExceeded(_) | Self::ConnectionError(_) => true,
            Self::ApiError { status_code, .. } => *status_code >= 500,
            Self::RequestFailed(_) => true,
            Self::ParseError(_) | Self::AuthenticationError(_) | Self::InvalidRequest(_) => false,
        }
    }
}

/// Errors that can occur during caption file processing
#[derive(Error, Debug)]
pub enum CaptionError {
    /// Input file does not exist
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Error reading a caption or text file
    #[error("Failed to read {path}: {message}")]
    Read {
        /// Path of the file
        path: PathBuf,
        /// Underlying error message
        message: String,
    },

    /// Error writing an output file
    #[error("Failed to write {path}: {message}")]
    Write {
        /// Path of the file
        path: PathBuf,
        /// Underlying error message
        message: String,
    },

    /// No dialogue records were found in the input file
    #[error("No dialogue lines found in {0}")]
    NoDialogue(PathBuf),
}

/// Pipeline stages, used to tag failures with where they happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// Dialogue extraction from the caption file
    Extract,
    /// The external provider call
    Translate,
    /// Line-count reconciliation between source and translated batch
    Reconcile,
    /// Sequential prefix removal
    StripPrefix,
    /// Script-direction correction
    FixDirectionality,
    /// Reinsertion of translated payloads into the caption file
    Reinsert,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Extract => "extract",
            Self::Translate => "translate",
            Self::Reconcile => "reconcile",
            Self::StripPrefix => "strip-prefix",
            Self::FixDirectionality => "fix-directionality",
            Self::Reinsert => "reinsert",
        };
        write!(f, "{}", name)
    }
}

/// Errors that can occur while running the translation pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A stage failed and the remaining stages were skipped
    #[error("Pipeline stage '{stage}' failed: {message}")]
    Stage {
        /// The stage that failed
        stage: PipelineStage,
        /// What went wrong
        message: String,
    },

    /// The translated batch does not line up with the source dialogue
    #[error("Line count mismatch: expected {expected}, got {actual}")]
    CountMismatch {
        /// Number of dialogue lines sent out
        expected: usize,
        /// Number of lines the provider returned
        actual: usize,
    },

    /// The user chose to abort after a count mismatch; no file was written
    #[error("Translation aborted, no output file written")]
    Aborted,

    /// Error from the provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from caption processing
    #[error("Caption error: {0}")]
    Caption(#[from] CaptionError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from caption processing
    #[error("Caption error: {0}")]
    Caption(#[from] CaptionError),

    /// Error from the translation pipeline
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
