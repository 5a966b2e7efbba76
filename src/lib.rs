/*!
 * # subloc - Subtitle Localization Pipeline
 *
 * A Rust library for translating timed-caption files with AI providers
 * while preserving timing and styling metadata.
 *
 * ## Features
 *
 * - Extract dialogue text from ASS/SSA and SRT caption files
 * - Keep an externally-translated batch aligned 1:1 with the source
 *   dialogue through sequential line prefixes
 * - Fix right-to-left display issues: trailing-punctuation reordering
 *   and directional-embedding markers
 * - Reinsert translated lines with styling codes and timing untouched
 * - Translate through OpenAI or Gemini with bounded retry on transient
 *   provider errors
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `caption`: Caption file codecs:
 *   - `caption::ass`: cell-delimited scripts (ASS/SSA)
 *   - `caption::srt`: block captions (SRT)
 * - `prefixer`: Sequential line prefixes for the translation round trip
 * - `directionality`: Right-to-left display corrections
 * - `pipeline`: The extract-translate-reconcile-reinsert orchestrator
 * - `translation_service`: Provider selection, prompts and retry
 * - `providers`: Client implementations for the translation providers:
 *   - `providers::openai`: OpenAI API client
 *   - `providers::gemini`: Gemini API client
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod caption;
pub mod directionality;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod pipeline;
pub mod prefixer;
pub mod providers;
pub mod translation_service;

// Re-export main types for easier usage
pub use app_config::Config;
pub use caption::{CaptionFormat, DialogueRecord, ReplaceReport};
pub use errors::{AppError, CaptionError, PipelineError, PipelineStage, ProviderError};
pub use pipeline::{PipelineOutcome, ReconcileDecision, TranslationPipeline};
pub use translation_service::{TranslationService, Translator};
