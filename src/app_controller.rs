use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};

use crate::app_config::Config;
use crate::caption::{CaptionFormat, ReplaceReport};
use crate::directionality;
use crate::errors::CaptionError;
use crate::file_utils::FileManager;
use crate::pipeline::{PipelineOutcome, ReconcileDecision, TranslationPipeline};
use crate::prefixer;
use crate::translation_service::TranslationService;

// @module: Application controller between the CLI and the core modules

/// Suffix for extracted dialogue text files
const EXTRACTED_SUFFIX: &str = "_extracted";

/// Suffix for prefix-stripped text files
const NO_PREFIX_SUFFIX: &str = "_no_prefix";

/// Suffix for direction-fixed files
const RTL_SUFFIX: &str = "_rtl";

/// Suffix for caption files with reinserted translations
const TRANSLATED_SUFFIX: &str = "_translated";

/// Main application controller for the subtitle localization commands
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Check if the controller is properly initialized with configuration
    pub fn is_initialized(&self) -> bool {
        !self.config.source_language.is_empty() && !self.config.target_language.is_empty()
    }

    /// Extract dialogue texts from a caption file into a sibling text file.
    ///
    /// With `add_prefix`, each line is tagged with its sequential `<n>-`
    /// prefix for the external translation round trip.
    pub fn extract(&self, input: &Path, add_prefix: bool) -> Result<PathBuf> {
        let format = CaptionFormat::from_path(input)
            .ok_or_else(|| anyhow!("Unsupported caption format: {:?}", input))?;
        let content = Self::read_input(input)?;

        let mut texts = format.extract_dialogue_texts(&content);
        if texts.is_empty() {
            return Err(CaptionError::NoDialogue(input.to_path_buf()).into());
        }
        if add_prefix {
            texts = prefixer::add_prefixes(&texts);
        }

        let output_path = FileManager::derive_output_path_with_ext(input, EXTRACTED_SUFFIX, "txt");
        FileManager::write_to_file(&output_path, &texts.join("\n"))?;

        info!(
            "Extracted {} dialogue lines from {} file to {:?} (prefixes: {})",
            texts.len(),
            format,
            output_path,
            if add_prefix { "yes" } else { "no" }
        );
        Ok(output_path)
    }

    /// Reinsert translated lines into the original caption file.
    ///
    /// Reads one translation per non-empty line and substitutes them into
    /// the dialogue records in order; everything else is copied through.
    pub fn reinsert(&self, translations: &Path, caption: &Path) -> Result<(PathBuf, ReplaceReport)> {
        let format = CaptionFormat::from_path(caption)
            .ok_or_else(|| anyhow!("Unsupported caption format: {:?}", caption))?;

        let translation_content = Self::read_input(translations)?;
        let lines: Vec<String> = translation_content
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        let caption_content = Self::read_input(caption)?;
        let (output_content, report) = format.replace_dialogues(&caption_content, &lines);

        let output_path = FileManager::derive_output_path(caption, TRANSLATED_SUFFIX);
        FileManager::write_to_file(&output_path, &output_content)?;

        info!("Reinsertion finished ({}) -> {:?}", report, output_path);
        Ok((output_path, report))
    }

    /// Fix right-to-left display issues in a file.
    ///
    /// Punctuation-reorder mode moves trailing sentence marks to the line
    /// start; embed mode inserts directional-embedding markers, selecting
    /// the treatment from the file extension.
    pub fn fix_directionality(&self, input: &Path, embed: bool) -> Result<PathBuf> {
        let content = Self::read_input(input)?;

        let fixed = if embed {
            directionality::insert_embedding_markers(&content, CaptionFormat::from_path(input))
        } else {
            directionality::fix_punctuation_text(&content)
        };

        let output_path = FileManager::derive_output_path(input, RTL_SUFFIX);
        FileManager::write_to_file(&output_path, &fixed)?;

        info!("Directionality fix written to {:?}", output_path);
        Ok(output_path)
    }

    /// Remove sequential `<n>-` prefixes from every line of a text file
    pub fn strip_prefixes(&self, input: &Path) -> Result<PathBuf> {
        let ext = input
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if ext != "txt" {
            return Err(anyhow!("Input file must be a .txt file, got: {:?}", input));
        }

        let content = Self::read_input(input)?;
        let stripped: Vec<String> = content.lines().map(prefixer::strip_prefix).collect();

        let output_path = FileManager::derive_output_path(input, NO_PREFIX_SUFFIX);
        FileManager::write_to_file(&output_path, &stripped.join("\n"))?;

        info!("Prefixes removed, output saved to {:?}", output_path);
        Ok(output_path)
    }

    /// Run the full translation pipeline over one caption file
    pub async fn translate(&self, input: &Path) -> Result<PipelineOutcome> {
        self.config
            .validate()
            .context("Configuration validation failed")?;

        let service = TranslationService::new(&self.config)?;

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(format!(
            "Translating {} -> {}...",
            self.config.source_language, self.config.target_language
        ));
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));

        // Count mismatches suspend the spinner and ask on the terminal
        let prompt = |expected: usize, actual: usize| {
            spinner.suspend(|| Self::ask_retry_or_abort(expected, actual))
        };

        let pipeline = TranslationPipeline::new(&service, &prompt);
        let result = pipeline.run(input).await;
        spinner.finish_and_clear();

        let outcome = result?;
        if outcome.report.has_warnings() {
            warn!("Reinsertion completed with warnings: {}", outcome.report);
        }
        info!(
            "Translation pipeline completed: {} dialogue lines -> {:?}",
            outcome.dialogue_count, outcome.output_path
        );
        Ok(outcome)
    }

    /// Interactive retry-or-abort decision after a count mismatch
    fn ask_retry_or_abort(expected: usize, actual: usize) -> ReconcileDecision {
        eprintln!("Line count mismatch: expected {}, got {}.", expected, actual);
        eprint!("Do you want to retry the translation call? (Y/N): ");
        let _ = std::io::stderr().flush();

        let mut answer = String::new();
        if std::io::stdin().read_line(&mut answer).is_err() {
            return ReconcileDecision::Abort;
        }
        if answer.trim().eq_ignore_ascii_case("y") {
            ReconcileDecision::Retry
        } else {
            ReconcileDecision::Abort
        }
    }

    /// Read an input file, with an explicit not-found error up front
    fn read_input(path: &Path) -> Result<String> {
        if !FileManager::file_exists(path) {
            return Err(CaptionError::NotFound(path.to_path_buf()).into());
        }
        FileManager::read_to_string(path)
    }
}
