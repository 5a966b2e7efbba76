use once_cell::sync::Lazy;
use regex::Regex;

// @module: Sequential line prefixes for the translation round trip

// @const: Prefix pattern - digits, a literal hyphen, any run of spaces
static PREFIX_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+- *").unwrap());

/// Prefix each non-empty line with a dense 1-based counter (`1-`, `2-`, ...).
///
/// The counter is an explicit value threaded through this function, not
/// module state, and increments only for non-empty lines: indices stay
/// contiguous even when empty lines were filtered out upstream. The prefix
/// is concatenated directly, with no separator, so the external translation
/// step can stay purely text-to-text yet remain order-verifiable.
pub fn add_prefixes(lines: &[String]) -> Vec<String> {
    let mut counter = 0usize;
    lines
        .iter()
        .map(|line| {
            if line.trim().is_empty() {
                line.clone()
            } else {
                counter += 1;
                format!("{}-{}", counter, line)
            }
        })
        .collect()
}

/// Strip a leading `<digits>-` prefix and any spaces that follow it.
///
/// Greedy-longest match anchored at line start; lines without a prefix pass
/// through unchanged, so stripping an already-stripped line is a no-op.
pub fn strip_prefix(line: &str) -> String {
    PREFIX_REGEX.replace(line, "").into_owned()
}

/// Strip prefixes from every line
pub fn strip_prefixes(lines: &[String]) -> Vec<String> {
    lines.iter().map(|line| strip_prefix(line)).collect()
}
