/*!
 * Script-direction corrections for right-to-left text.
 *
 * Two independent fixes, selectable per invocation:
 * - punctuation reorder: trailing sentence-final marks move to the line
 *   start so they render on the correct side of RTL text
 * - embedding markers: a directional-embedding control character is
 *   inserted at the start of each visually distinct text span, without
 *   disturbing style tags or line-break tokens
 */

use crate::caption::{ass, srt, CaptionFormat};

/// U+202B RIGHT-TO-LEFT EMBEDDING, the marker inserted before RTL spans
pub const RLE_MARKER: char = '\u{202B}';

/// Comma of the target script, substituted for the ASCII comma before
/// punctuation reordering
pub const TARGET_COMMA: char = '\u{060C}';

/// Sentence-final marks that may move: period, target-script comma,
/// exclamation. The three-period ellipsis is handled as one atomic unit.
fn is_movable_mark(c: char) -> bool {
    c == '.' || c == TARGET_COMMA || c == '!'
}

/// Move a maximal trailing run of sentence-final marks to the line start.
///
/// One explicit backward scan: at each step the three-character ellipsis
/// suffix is checked before single characters, so `...` is never split even
/// though `.` is itself in the allowed set. The collected run moves to the
/// front verbatim, followed by the remaining text with trailing whitespace
/// trimmed. Lines with no trailing run are returned unchanged. Applying the
/// fix twice yields the same result as once.
pub fn reorder_trailing_punctuation(line: &str) -> String {
    let stripped = line.trim_end();
    let mut run_start = stripped.len();

    loop {
        let head = &stripped[..run_start];
        if head.ends_with("...") {
            run_start -= 3;
        } else if let Some(c) = head.chars().last().filter(|c| is_movable_mark(*c)) {
            run_start -= c.len_utf8();
        } else {
            break;
        }
    }

    if run_start == stripped.len() {
        return line.to_string();
    }

    let run = &stripped[run_start..];
    let remaining = stripped[..run_start].trim_end();
    format!("{}{}", run, remaining)
}

/// Apply the full punctuation fix to one line: trim, convert ASCII commas
/// to the target-script comma, reorder the trailing run. Empty lines stay
/// empty.
pub fn fix_punctuation_line(line: &str) -> String {
    let clean = line.trim();
    if clean.is_empty() {
        String::new()
    } else {
        reorder_trailing_punctuation(&clean.replace(',', "\u{060C}"))
    }
}

/// Apply the punctuation reorder to a whole text file.
///
/// Lines are fixed independently and empty lines are preserved, so the
/// line count never changes.
pub fn fix_punctuation_text(content: &str) -> String {
    let fixed: Vec<String> = content.lines().map(fix_punctuation_line).collect();
    fixed.join("\n")
}

/// Insert directional-embedding markers across a file.
///
/// Format-aware: for cell-delimited scripts only dialogue payloads are
/// touched, for block captions structural lines are skipped, and for plain
/// text every non-empty line gets one marker. Insertion is idempotent and
/// never changes the file's line count.
pub fn insert_embedding_markers(content: &str, format: Option<CaptionFormat>) -> String {
    let marked: Vec<String> = content
        .lines()
        .map(|raw| {
            let line = raw.trim_end_matches('\r');
            match format {
                Some(CaptionFormat::Ass) => mark_script_line(line),
                Some(CaptionFormat::Srt) => {
                    if srt::is_structural_line(line) {
                        line.to_string()
                    } else {
                        mark_plain_line(line)
                    }
                }
                None => {
                    if line.trim().is_empty() {
                        line.to_string()
                    } else {
                        mark_plain_line(line)
                    }
                }
            }
        })
        .collect();
    marked.join("\n")
}

/// Prepend the marker to a line unless it is already there
fn mark_plain_line(line: &str) -> String {
    if line.starts_with(RLE_MARKER) {
        line.to_string()
    } else {
        format!("{}{}", RLE_MARKER, line)
    }
}

/// Mark the payload of a dialogue line, leaving other lines untouched
fn mark_script_line(line: &str) -> String {
    match ass::dialogue_payload(line) {
        Some(payload) if !ass::strip_style_tags(payload).trim().is_empty() => {
            let head = &line[..line.len() - payload.len()];
            format!("{}{}", head, mark_dialogue_payload(payload))
        }
        _ => line.to_string(),
    }
}

/// Insert one marker after the leading style-tag run and one after every
/// explicit line-break token, so each visually distinct sub-line gets its
/// own embedding start
fn mark_dialogue_payload(payload: &str) -> String {
    let lead = ass::leading_tag_run_len(payload);
    let rest = &payload[lead..];

    let mut out = String::with_capacity(payload.len() + 4);
    out.push_str(&payload[..lead]);
    if !rest.starts_with(RLE_MARKER) {
        out.push(RLE_MARKER);
    }

    let mut chars = rest.chars().peekable();
    while let Some(c) = chars.next() {
        out.push(c);
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if next == 'N' || next == 'n' {
                    chars.next();
                    out.push(next);
                    if chars.peek() != Some(&RLE_MARKER) {
                        out.push(RLE_MARKER);
                    }
                }
            }
        }
    }
    out
}
