/*!
 * The end-to-end translation pipeline.
 *
 * Stages run strictly in order: extract (with prefixes) -> translate ->
 * reconcile -> strip prefixes -> fix directionality -> reinsert. The
 * external translation step is an untrusted black box; reconciliation
 * compares line counts and hands the retry-or-abort decision to the caller
 * through the [`ReconcilePrompt`] seam. Any stage failure short-circuits
 * the remaining stages.
 */

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::caption::{CaptionFormat, ReplaceReport};
use crate::directionality;
use crate::errors::{CaptionError, PipelineError, PipelineStage};
use crate::file_utils::FileManager;
use crate::prefixer;
use crate::translation_service::Translator;

/// Suffix of the final caption output file
const OUTPUT_SUFFIX: &str = "_translated";

/// Suffix of the raw provider output persisted before prefix stripping
const RAW_OUTPUT_SUFFIX: &str = "_raw_translation";

/// What the caller decided after a count mismatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileDecision {
    /// Re-enter the translate stage with the same input
    Retry,
    /// Terminate the pipeline; no file is written
    Abort,
}

/// Decision seam for count mismatches.
///
/// The CLI implements this with an interactive prompt; tests use closures.
pub trait ReconcilePrompt: Send + Sync {
    /// Decide whether to retry the provider call or abort the pipeline
    fn decide(&self, expected: usize, actual: usize) -> ReconcileDecision;
}

impl<F> ReconcilePrompt for F
where
    F: Fn(usize, usize) -> ReconcileDecision + Send + Sync,
{
    fn decide(&self, expected: usize, actual: usize) -> ReconcileDecision {
        self(expected, actual)
    }
}

/// Terminal artifact of a successful pipeline run
#[derive(Debug)]
pub struct PipelineOutcome {
    /// Path of the newly written caption file
    pub output_path: PathBuf,

    /// Number of dialogue lines that went through translation
    pub dialogue_count: usize,

    /// Reinsertion accounting
    pub report: ReplaceReport,
}

/// Sequences the pipeline stages over one caption file
pub struct TranslationPipeline<'a> {
    translator: &'a dyn Translator,
    reconcile_prompt: &'a dyn ReconcilePrompt,
}

impl<'a> TranslationPipeline<'a> {
    /// Create a pipeline around a translator and a reconcile decision seam
    pub fn new(translator: &'a dyn Translator, reconcile_prompt: &'a dyn ReconcilePrompt) -> Self {
        Self {
            translator,
            reconcile_prompt,
        }
    }

    /// Run all stages over one caption file.
    ///
    /// On success the translated caption file is written alongside the
    /// input with the `_translated` suffix; the source file is never
    /// touched. On mismatch-and-abort, nothing is written.
    pub async fn run(&self, input: &Path) -> Result<PipelineOutcome, PipelineError> {
        // EXTRACT
        let format = CaptionFormat::from_path(input).ok_or_else(|| PipelineError::Stage {
            stage: PipelineStage::Extract,
            message: format!("Unsupported caption format: {:?}", input),
        })?;

        if !FileManager::file_exists(input) {
            return Err(CaptionError::NotFound(input.to_path_buf()).into());
        }
        let content = FileManager::read_to_string(input).map_err(|e| CaptionError::Read {
            path: input.to_path_buf(),
            message: e.to_string(),
        })?;

        let texts = format.extract_dialogue_texts(&content);
        if texts.is_empty() {
            return Err(CaptionError::NoDialogue(input.to_path_buf()).into());
        }

        let prefixed = prefixer::add_prefixes(&texts);
        let expected = prefixed.len();
        let blob = prefixed.join("\n");
        info!("Extracted {} dialogue lines from {} file", expected, format);

        // TRANSLATE + RECONCILE
        let translated = loop {
            let batch = self
                .translator
                .translate(&blob)
                .await
                .map_err(|e| PipelineError::Stage {
                    stage: PipelineStage::Translate,
                    message: e.to_string(),
                })?;

            if batch.len() == expected {
                info!("Line count verified: {} lines match the source", expected);
                break batch;
            }

            let mismatch = PipelineError::CountMismatch {
                expected,
                actual: batch.len(),
            };
            warn!("{}", mismatch);

            match self.reconcile_prompt.decide(expected, batch.len()) {
                ReconcileDecision::Retry => {
                    info!("Retrying the translation call with the same input");
                }
                ReconcileDecision::Abort => return Err(PipelineError::Aborted),
            }
        };

        // Persist the raw prefixed output so a failure in a later stage
        // leaves something inspectable. Best effort.
        let raw_path = FileManager::derive_output_path_with_ext(input, RAW_OUTPUT_SUFFIX, "txt");
        if let Err(e) = FileManager::write_to_file(&raw_path, &translated.join("\n")) {
            warn!("Could not persist raw translation to {:?}: {}", raw_path, e);
        } else {
            debug!("Raw translation saved to {:?}", raw_path);
        }

        // STRIP_PREFIX
        let stripped = prefixer::strip_prefixes(&translated);

        // FIX_DIRECTIONALITY (punctuation-reorder mode)
        let fixed: Vec<String> = stripped
            .iter()
            .map(|line| directionality::fix_punctuation_line(line))
            .collect();

        // REINSERT
        let (output_content, report) = format.replace_dialogues(&content, &fixed);
        let output_path = FileManager::derive_output_path(input, OUTPUT_SUFFIX);
        FileManager::write_to_file(&output_path, &output_content).map_err(|e| {
            PipelineError::Stage {
                stage: PipelineStage::Reinsert,
                message: e.to_string(),
            }
        })?;

        info!("Translated caption file written to {:?}", output_path);
        Ok(PipelineOutcome {
            output_path,
            dialogue_count: expected,
            report,
        })
    }
}
