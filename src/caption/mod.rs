/*!
 * Caption file handling for the two supported timed-text formats.
 *
 * This module contains the dialogue codecs used by the translation pipeline:
 * - `ass`: cell-delimited scripts (ASS/SSA) where one line is one record
 * - `srt`: block captions separated by blank lines
 *
 * Both codecs share the same contract: decoding produces an ordered list of
 * [`DialogueRecord`]s, and encoding re-serializes the original file with new
 * dialogue payloads substituted in place while every other byte is copied
 * through untouched.
 */

use std::fmt;
use std::path::Path;

pub mod ass;
pub mod srt;

/// One addressable unit of spoken or displayed text in a caption file.
///
/// Records are constructed during parse and never mutated; reinsertion builds
/// a new file from the original structure plus replacement payloads instead
/// of rewriting records in place.
#[derive(Debug, Clone)]
pub struct DialogueRecord {
    /// 1-based position among dialogue records in file order
    pub sequence_index: usize,

    /// Non-text fields preceding the payload (timing, style, actor...),
    /// kept verbatim for round-tripping
    pub metadata: Vec<String>,

    /// The raw displayable payload, including any inline style tags
    pub payload: String,

    /// The payload with style tags stripped, the only part a translator
    /// should alter
    pub plain_text: String,
}

impl fmt::Display for DialogueRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}: {}", self.sequence_index, self.plain_text)
    }
}

/// Caption format, selected by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionFormat {
    /// Cell-delimited ASS/SSA script
    Ass,
    /// Block-structured SRT captions
    Srt,
}

impl CaptionFormat {
    /// Detect the caption format from a file extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_string_lossy().to_lowercase();
        match ext.as_str() {
            "ass" | "ssa" => Some(Self::Ass),
            "srt" => Some(Self::Srt),
            _ => None,
        }
    }

    /// Extract the translatable dialogue texts from file content, in order
    pub fn extract_dialogue_texts(&self, content: &str) -> Vec<String> {
        match self {
            Self::Ass => ass::AssScript::parse(content).dialogue_texts(),
            Self::Srt => srt::SrtScript::parse(content).dialogue_texts(),
        }
    }

    /// Re-serialize file content with dialogue payloads replaced from the pool
    pub fn replace_dialogues(&self, content: &str, translations: &[String]) -> (String, ReplaceReport) {
        match self {
            Self::Ass => ass::AssScript::parse(content).replace_dialogues(translations),
            Self::Srt => srt::SrtScript::parse(content).replace_dialogues(translations),
        }
    }
}

impl fmt::Display for CaptionFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Ass => write!(f, "ASS"),
            Self::Srt => write!(f, "SRT"),
        }
    }
}

/// Accounting for one reinsertion pass.
///
/// Shortfalls and leftovers are warnings, not errors: the caption file is
/// still written with every untranslated record keeping its original payload.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReplaceReport {
    /// Dialogue records that received a translated payload
    pub replaced: usize,

    /// Dialogue lines that failed the field-count contract and were passed
    /// through unchanged
    pub malformed: usize,

    /// Dialogue records left untranslated because the pool ran dry
    pub missing: usize,

    /// Translated lines left over after all records were filled
    pub extra: usize,
}

impl ReplaceReport {
    /// Whether the pass was anything other than a clean 1:1 substitution
    pub fn has_warnings(&self) -> bool {
        self.missing > 0 || self.extra > 0 || self.malformed > 0
    }
}

impl fmt::Display for ReplaceReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} replaced, {} missing, {} extra, {} malformed",
            self.replaced, self.missing, self.extra, self.malformed
        )
    }
}
