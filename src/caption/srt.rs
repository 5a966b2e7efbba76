use log::warn;

use super::{DialogueRecord, ReplaceReport};

// @module: Block caption codec (SRT)

/// Separator token identifying a time-range line
pub const TIME_SEPARATOR: &str = "-->";

/// One physical line of a block caption file
#[derive(Debug, Clone)]
enum CaptionLine {
    /// A dialogue text line inside a block
    Text(String),

    /// Block index, time range, or blank separator. Never altered.
    Structural(String),
}

/// A parsed SRT file, line-structured so the original file can be
/// re-serialized with text lines substituted in place
#[derive(Debug)]
pub struct SrtScript {
    lines: Vec<CaptionLine>,
}

impl SrtScript {
    /// Parse block captions.
    ///
    /// Blocks are separated by blank lines; the time-range line is detected
    /// by its separator token and everything after it until the next blank
    /// line is dialogue text. Pure-digit lines are treated as block indices.
    /// Multi-line blocks yield one text line per physical line, and the
    /// encoder substitutes at the same granularity.
    pub fn parse(content: &str) -> Self {
        let mut lines = Vec::new();
        let mut in_dialogue = false;

        for raw in content.lines() {
            let line = raw.trim_end_matches('\r');
            let trimmed = line.trim();

            if trimmed.is_empty() {
                in_dialogue = false;
                lines.push(CaptionLine::Structural(line.to_string()));
                continue;
            }
            if trimmed.contains(TIME_SEPARATOR) {
                in_dialogue = true;
                lines.push(CaptionLine::Structural(line.to_string()));
                continue;
            }
            if trimmed.chars().all(|c| c.is_ascii_digit()) {
                lines.push(CaptionLine::Structural(line.to_string()));
                continue;
            }
            if in_dialogue {
                lines.push(CaptionLine::Text(trimmed.to_string()));
            } else {
                // Text before any time line is not part of a block
                warn!("Skipping text outside caption block: {}", trimmed);
                lines.push(CaptionLine::Structural(line.to_string()));
            }
        }

        SrtScript { lines }
    }

    /// Ordered dialogue records with a dense 1-based sequence index.
    ///
    /// Each record's metadata holds the structural lines of its block
    /// (index and time range), round-tripped verbatim.
    pub fn dialogue_records(&self) -> Vec<DialogueRecord> {
        let mut records = Vec::new();
        let mut block_meta: Vec<String> = Vec::new();

        for line in &self.lines {
            match line {
                CaptionLine::Structural(text) => {
                    if text.trim().is_empty() {
                        block_meta.clear();
                    } else {
                        block_meta.push(text.clone());
                    }
                }
                CaptionLine::Text(text) => {
                    records.push(DialogueRecord {
                        sequence_index: records.len() + 1,
                        metadata: block_meta.clone(),
                        payload: text.clone(),
                        plain_text: text.clone(),
                    });
                }
            }
        }
        records
    }

    /// The translatable texts, in record order
    pub fn dialogue_texts(&self) -> Vec<String> {
        self.lines
            .iter()
            .filter_map(|line| match line {
                CaptionLine::Text(text) => Some(text.clone()),
                CaptionLine::Structural(_) => None,
            })
            .collect()
    }

    /// Re-serialize the captions with text lines taken from the pool.
    ///
    /// Index and time lines are never altered. Shortfalls keep the original
    /// text; leftovers are discarded. Both are reported, not fatal.
    pub fn replace_dialogues(&self, translations: &[String]) -> (String, ReplaceReport) {
        let mut report = ReplaceReport::default();
        let mut pool = translations.iter();
        let mut output = Vec::with_capacity(self.lines.len());

        for line in &self.lines {
            match line {
                CaptionLine::Text(text) => match pool.next() {
                    Some(translation) => {
                        output.push(translation.clone());
                        report.replaced += 1;
                    }
                    None => {
                        report.missing += 1;
                        output.push(text.clone());
                    }
                },
                CaptionLine::Structural(text) => output.push(text.clone()),
            }
        }

        report.extra = translations.len().saturating_sub(report.replaced);
        if report.missing > 0 {
            warn!("Translation pool exhausted: {} caption line(s) kept their original text", report.missing);
        }
        if report.extra > 0 {
            warn!("{} extra translated line(s) were ignored", report.extra);
        }

        (output.join("\n"), report)
    }
}

/// Whether a line is structural for marker insertion purposes: blank,
/// a pure-digit block index, or a time-range line
pub fn is_structural_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.contains(TIME_SEPARATOR)
        || trimmed.chars().all(|c| c.is_ascii_digit())
}
