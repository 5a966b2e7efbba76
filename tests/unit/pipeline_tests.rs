/*!
 * Tests for the translation pipeline orchestrator
 */

use subloc::errors::PipelineError;
use subloc::pipeline::{ReconcileDecision, TranslationPipeline};

use crate::common;
use crate::common::mock_providers::MockTranslator;

/// A prompt that always aborts
fn abort_prompt(_expected: usize, _actual: usize) -> ReconcileDecision {
    ReconcileDecision::Abort
}

/// A prompt that always retries
fn retry_prompt(_expected: usize, _actual: usize) -> ReconcileDecision {
    ReconcileDecision::Retry
}

/// Test a clean run writes the output file with every payload substituted
#[tokio::test]
async fn test_pipeline_withMatchingCounts_shouldWriteTranslatedFile() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "movie.ass",
        common::sample_ass_content(),
    )
    .unwrap();

    let translator = MockTranslator::echo();
    let prompt = abort_prompt;
    let pipeline = TranslationPipeline::new(&translator, &prompt);

    let outcome = pipeline.run(&input).await.unwrap();

    assert_eq!(outcome.dialogue_count, 3);
    assert_eq!(outcome.report.replaced, 3);
    assert_eq!(outcome.report.missing, 0);
    assert!(outcome.output_path.exists());
    assert_eq!(
        outcome.output_path.file_name().unwrap().to_string_lossy(),
        "movie_translated.ass"
    );

    // The echo translation went through prefix-strip and the punctuation fix
    let output = std::fs::read_to_string(&outcome.output_path).unwrap();
    assert!(output.contains("{\\an8}!Hello there"));
    assert!(!output.contains("1-"));
}

/// Test a count mismatch plus abort writes nothing
#[tokio::test]
async fn test_pipeline_withMismatchAndAbort_shouldWriteNoFile() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "movie.ass",
        common::sample_ass_content(),
    )
    .unwrap();

    let translator = MockTranslator::drop_last();
    let prompt = abort_prompt;
    let pipeline = TranslationPipeline::new(&translator, &prompt);

    let result = pipeline.run(&input).await;

    assert!(matches!(result, Err(PipelineError::Aborted)));
    assert!(!temp_dir.path().join("movie_translated.ass").exists());
    assert!(!temp_dir.path().join("movie_raw_translation.txt").exists());
}

/// Test the mismatch prompt receives both counts
#[tokio::test]
async fn test_pipeline_withMismatch_shouldReportBothCounts() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "movie.ass",
        common::sample_ass_content(),
    )
    .unwrap();

    let translator = MockTranslator::drop_last();
    let seen = std::sync::Mutex::new(None);
    let prompt = |expected: usize, actual: usize| {
        *seen.lock().unwrap() = Some((expected, actual));
        ReconcileDecision::Abort
    };
    let pipeline = TranslationPipeline::new(&translator, &prompt);

    let _ = pipeline.run(&input).await;

    assert_eq!(*seen.lock().unwrap(), Some((3, 2)));
}

/// Test a retry decision re-enters the translate stage and can succeed
#[tokio::test]
async fn test_pipeline_withMismatchAndRetry_shouldSucceedOnSecondCall() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "movie.ass",
        common::sample_ass_content(),
    )
    .unwrap();

    let translator = MockTranslator::wrong_count_then_echo();
    let prompt = retry_prompt;
    let pipeline = TranslationPipeline::new(&translator, &prompt);

    let outcome = pipeline.run(&input).await.unwrap();

    assert_eq!(translator.calls(), 2);
    assert_eq!(outcome.report.replaced, 3);
    assert!(outcome.output_path.exists());
}

/// Test a fatal provider error is tagged with the translate stage
#[tokio::test]
async fn test_pipeline_withFatalProviderError_shouldFailAtTranslateStage() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "movie.ass",
        common::sample_ass_content(),
    )
    .unwrap();

    let translator = MockTranslator::auth_failing();
    let prompt = abort_prompt;
    let pipeline = TranslationPipeline::new(&translator, &prompt);

    let result = pipeline.run(&input).await;

    match result {
        Err(PipelineError::Stage { stage, message }) => {
            assert_eq!(stage.to_string(), "translate");
            assert!(message.contains("Authentication"));
        }
        other => panic!("expected stage error, got {:?}", other),
    }
    assert!(!temp_dir.path().join("movie_translated.ass").exists());
}

/// Test a missing input file fails before any provider call
#[tokio::test]
async fn test_pipeline_withMissingInput_shouldFailWithNotFound() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = temp_dir.path().join("missing.ass");

    let translator = MockTranslator::echo();
    let prompt = abort_prompt;
    let pipeline = TranslationPipeline::new(&translator, &prompt);

    let result = pipeline.run(&input).await;

    assert!(matches!(result, Err(PipelineError::Caption(_))));
    assert_eq!(translator.calls(), 0);
}

/// Test an unsupported extension fails at the extract stage
#[tokio::test]
async fn test_pipeline_withUnsupportedFormat_shouldFailAtExtractStage() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "notes.txt",
        "not a caption file",
    )
    .unwrap();

    let translator = MockTranslator::echo();
    let prompt = abort_prompt;
    let pipeline = TranslationPipeline::new(&translator, &prompt);

    let result = pipeline.run(&input).await;

    match result {
        Err(PipelineError::Stage { stage, .. }) => assert_eq!(stage.to_string(), "extract"),
        other => panic!("expected stage error, got {:?}", other),
    }
}

/// Test the SRT flavor of the pipeline end to end
#[tokio::test]
async fn test_pipeline_withSrtInput_shouldSubstituteTextLines() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "movie.srt",
        common::sample_srt_content(),
    )
    .unwrap();

    let translator = MockTranslator::echo();
    let prompt = abort_prompt;
    let pipeline = TranslationPipeline::new(&translator, &prompt);

    let outcome = pipeline.run(&input).await.unwrap();

    assert_eq!(outcome.dialogue_count, 4);
    let output = std::fs::read_to_string(&outcome.output_path).unwrap();
    assert!(output.contains("00:00:01,000 --> 00:00:03,000"));
    assert!(output.contains("!Hello there"));
    assert!(output.contains(".Fine"));
}
