use anyhow::{anyhow, Result};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// The configuration accepts ISO 639-1 (2-letter) and ISO 639-2 (3-letter)
/// codes; provider prompts want English language names. This module maps
/// between the two.
/// ISO 639-2/B codes that differ from the 639-2/T codes isolang knows
const PART2B_TO_PART2T: &[(&str, &str)] = &[
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("ice", "isl"),
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("per", "fas"),
    ("geo", "kat"),
    ("may", "msa"),
    ("mac", "mkd"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

/// Resolve a language code to an isolang Language
fn resolve(code: &str) -> Result<Language> {
    let normalized = code.trim().to_lowercase();

    match normalized.len() {
        2 => Language::from_639_1(&normalized)
            .ok_or_else(|| anyhow!("Invalid language code: {}", code)),
        3 => {
            let part2t = PART2B_TO_PART2T
                .iter()
                .find(|(b, _)| *b == normalized)
                .map(|(_, t)| *t)
                .unwrap_or(&normalized);
            Language::from_639_3(part2t)
                .ok_or_else(|| anyhow!("Invalid language code: {}", code))
        }
        _ => Err(anyhow!("Invalid language code: {}", code)),
    }
}

/// Validate that a code is a known ISO 639-1 or ISO 639-2 code
pub fn validate_language_code(code: &str) -> Result<()> {
    resolve(code).map(|_| ())
}

/// Check if two language codes represent the same language
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (resolve(code1), resolve(code2)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// English language name for a code, for use in provider prompts
pub fn get_language_name(code: &str) -> Result<String> {
    Ok(resolve(code)?.to_name().to_string())
}
