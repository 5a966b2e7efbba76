use log::warn;

use super::{DialogueRecord, ReplaceReport};

// @module: Cell-delimited caption codec (ASS/SSA)

/// Keyword opening every dialogue line
const DIALOGUE_PREFIX: &str = "Dialogue:";

/// Number of metadata cells before the payload. The payload itself may
/// contain the delimiter and is never re-split.
const METADATA_FIELDS: usize = 9;

/// One physical line of a script file
#[derive(Debug, Clone)]
enum ScriptLine {
    /// A well-formed dialogue line: fixed metadata cells plus the payload
    Dialogue { fields: Vec<String>, payload: String },

    /// Anything else: headers, styles, comments, malformed dialogue lines.
    /// Copied through verbatim on re-serialization.
    Passthrough(String),
}

/// A parsed ASS/SSA script, line-structured so the original file can be
/// re-serialized with payloads substituted in place
#[derive(Debug)]
pub struct AssScript {
    lines: Vec<ScriptLine>,
    malformed: usize,
}

impl AssScript {
    /// Parse script content into lines.
    ///
    /// A `Dialogue:` line that does not split into exactly the expected
    /// field count is malformed: it is kept as passthrough so the file
    /// structure survives, and it is not counted as a dialogue record.
    pub fn parse(content: &str) -> Self {
        let mut lines = Vec::new();
        let mut malformed = 0;

        for raw in content.lines() {
            let line = raw.trim_end_matches('\r');
            if line.trim_start().starts_with(DIALOGUE_PREFIX) {
                let parts: Vec<&str> = line.splitn(METADATA_FIELDS + 1, ',').collect();
                if parts.len() == METADATA_FIELDS + 1 {
                    lines.push(ScriptLine::Dialogue {
                        fields: parts[..METADATA_FIELDS].iter().map(|s| s.to_string()).collect(),
                        payload: parts[METADATA_FIELDS].to_string(),
                    });
                    continue;
                }
                malformed += 1;
                warn!("Malformed dialogue line (expected {} fields): {}", METADATA_FIELDS + 1, line);
            }
            lines.push(ScriptLine::Passthrough(line.to_string()));
        }

        AssScript { lines, malformed }
    }

    /// Ordered dialogue records with a dense 1-based sequence index.
    ///
    /// Lines whose payload is empty once style tags are stripped carry
    /// nothing to translate; they are skipped here and skipped again on
    /// reinsertion so the two passes stay aligned.
    pub fn dialogue_records(&self) -> Vec<DialogueRecord> {
        let mut records = Vec::new();
        for line in &self.lines {
            if let ScriptLine::Dialogue { fields, payload } = line {
                let plain = strip_style_tags(payload).trim().to_string();
                if plain.is_empty() {
                    continue;
                }
                records.push(DialogueRecord {
                    sequence_index: records.len() + 1,
                    metadata: fields.clone(),
                    payload: payload.clone(),
                    plain_text: plain,
                });
            }
        }
        records
    }

    /// The translatable texts, in record order
    pub fn dialogue_texts(&self) -> Vec<String> {
        self.dialogue_records()
            .into_iter()
            .map(|r| r.plain_text)
            .collect()
    }

    /// Re-serialize the script with dialogue payloads taken from the pool.
    ///
    /// Style tags are collected from the original payload and re-prepended
    /// verbatim to the new text. When the pool runs dry the remaining
    /// records keep their original payload; leftovers are discarded. Both
    /// cases are reported, not fatal.
    pub fn replace_dialogues(&self, translations: &[String]) -> (String, ReplaceReport) {
        let mut report = ReplaceReport {
            malformed: self.malformed,
            ..ReplaceReport::default()
        };
        let mut pool = translations.iter();
        let mut output = Vec::with_capacity(self.lines.len());

        for line in &self.lines {
            match line {
                ScriptLine::Dialogue { fields, payload } => {
                    let plain = strip_style_tags(payload).trim().to_string();
                    if plain.is_empty() {
                        output.push(rejoin(fields, payload));
                        continue;
                    }
                    match pool.next() {
                        Some(translation) => {
                            let new_payload = format!("{}{}", collect_style_tags(payload), translation);
                            output.push(rejoin(fields, &new_payload));
                            report.replaced += 1;
                        }
                        None => {
                            report.missing += 1;
                            output.push(rejoin(fields, payload));
                        }
                    }
                }
                ScriptLine::Passthrough(text) => output.push(text.clone()),
            }
        }

        report.extra = translations.len().saturating_sub(report.replaced);
        if report.missing > 0 {
            warn!("Translation pool exhausted: {} dialogue line(s) kept their original text", report.missing);
        }
        if report.extra > 0 {
            warn!("{} extra translated line(s) were ignored", report.extra);
        }

        (output.join("\n"), report)
    }
}

fn rejoin(fields: &[String], payload: &str) -> String {
    let mut line = fields.join(",");
    line.push(',');
    line.push_str(payload);
    line
}

/// Strip `{...}` style-tag runs from a payload.
///
/// Explicit bracket scanning: each `{` is matched with the next `}`.
/// An unterminated `{` is not a tag and stays in the text verbatim.
pub fn strip_style_tags(payload: &str) -> String {
    let mut out = String::with_capacity(payload.len());
    let mut rest = payload;

    while let Some(open) = rest.find('{') {
        match rest[open..].find('}') {
            Some(close) => {
                out.push_str(&rest[..open]);
                rest = &rest[open + close + 1..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

/// Collect every complete `{...}` run from a payload, concatenated in order
pub fn collect_style_tags(payload: &str) -> String {
    let mut tags = String::new();
    let mut rest = payload;

    while let Some(open) = rest.find('{') {
        match rest[open..].find('}') {
            Some(close) => {
                tags.push_str(&rest[open..open + close + 1]);
                rest = &rest[open + close + 1..];
            }
            None => break,
        }
    }
    tags
}

/// Byte length of the run of consecutive `{...}` tags anchored at the start
/// of a payload. Used to place directional markers after the tags they must
/// not reorder.
pub fn leading_tag_run_len(payload: &str) -> usize {
    let mut len = 0;
    let mut rest = payload;

    while rest.starts_with('{') {
        match rest.find('}') {
            Some(close) => {
                len += close + 1;
                rest = &rest[close + 1..];
            }
            None => break,
        }
    }
    len
}

/// The payload cell of a well-formed dialogue line, borrowed from the line
/// itself so callers can locate it by byte offset
pub fn dialogue_payload(line: &str) -> Option<&str> {
    if !line.trim_start().starts_with(DIALOGUE_PREFIX) {
        return None;
    }
    let parts: Vec<&str> = line.splitn(METADATA_FIELDS + 1, ',').collect();
    if parts.len() == METADATA_FIELDS + 1 {
        Some(parts[METADATA_FIELDS])
    } else {
        None
    }
}
