/*!
 * Tests for sequential line prefixing
 */

use subloc::prefixer;

/// Test prefixes are dense, 1-based and separator-free
#[test]
fn test_add_prefixes_withPlainLines_shouldNumberFromOne() {
    let lines = vec!["Hello".to_string(), "World".to_string()];
    let prefixed = prefixer::add_prefixes(&lines);

    assert_eq!(prefixed, vec!["1-Hello".to_string(), "2-World".to_string()]);
}

/// Test empty lines do not consume a counter value
#[test]
fn test_add_prefixes_withEmptyLines_shouldKeepIndicesContiguous() {
    let lines = vec!["One".to_string(), "".to_string(), "Two".to_string()];
    let prefixed = prefixer::add_prefixes(&lines);

    assert_eq!(prefixed[0], "1-One");
    assert_eq!(prefixed[1], "");
    assert_eq!(prefixed[2], "2-Two");
}

/// Test the strip/add round-trip law
#[test]
fn test_strip_prefixes_afterAddPrefixes_shouldRoundTrip() {
    let lines: Vec<String> = (1..=12)
        .map(|i| format!("dialogue line number {}", i))
        .collect();
    let round_tripped = prefixer::strip_prefixes(&prefixer::add_prefixes(&lines));

    assert_eq!(round_tripped, lines);
}

/// Test multi-digit prefixes and trailing spaces are removed greedily
#[test]
fn test_strip_prefix_withSpacesAfterHyphen_shouldRemoveThemToo() {
    assert_eq!(prefixer::strip_prefix("1-text"), "text");
    assert_eq!(prefixer::strip_prefix("10- text"), "text");
    assert_eq!(prefixer::strip_prefix("100-   text"), "text");
}

/// Test stripping is idempotent on already-stripped lines
#[test]
fn test_strip_prefix_onUnprefixedLine_shouldBeNoOp() {
    assert_eq!(prefixer::strip_prefix("no prefix here"), "no prefix here");
    assert_eq!(prefixer::strip_prefix(""), "");

    let once = prefixer::strip_prefix("7- hello");
    assert_eq!(prefixer::strip_prefix(&once), once);
}

/// Test the prefix must be anchored at line start
#[test]
fn test_strip_prefix_withMidLineDigits_shouldNotStrip() {
    assert_eq!(prefixer::strip_prefix("say 1- again"), "say 1- again");
    assert_eq!(prefixer::strip_prefix(" 1-indented"), " 1-indented");
}
