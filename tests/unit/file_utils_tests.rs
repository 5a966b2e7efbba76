/*!
 * Tests for file utilities and derived output paths
 */

use std::path::PathBuf;
use subloc::file_utils::FileManager;
use crate::common;

/// Test the sibling output path keeps the extension
#[test]
fn test_deriveOutputPath_withExtension_shouldInsertSuffixBeforeExt() {
    let path = FileManager::derive_output_path("/films/movie.ass", "_translated");
    assert_eq!(path, PathBuf::from("/films/movie_translated.ass"));
}

/// Test the output path for an extensionless input
#[test]
fn test_deriveOutputPath_withoutExtension_shouldAppendSuffix() {
    let path = FileManager::derive_output_path("/films/movie", "_rtl");
    assert_eq!(path, PathBuf::from("/films/movie_rtl"));
}

/// Test the extension-swapping variant
#[test]
fn test_deriveOutputPathWithExt_shouldReplaceExtension() {
    let path = FileManager::derive_output_path_with_ext("/films/movie.ass", "_extracted", "txt");
    assert_eq!(path, PathBuf::from("/films/movie_extracted.txt"));
}

/// Test writing and reading a file back
#[test]
fn test_writeToFile_thenReadToString_shouldRoundTrip() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("sub").join("out.txt");

    FileManager::write_to_file(&path, "salam\ndonya").unwrap();
    assert!(FileManager::file_exists(&path));
    assert_eq!(FileManager::read_to_string(&path).unwrap(), "salam\ndonya");
}

/// Test reading a missing file yields an error with the path
#[test]
fn test_readToString_withMissingFile_shouldFailWithContext() {
    let result = FileManager::read_to_string("/definitely/not/here.txt");
    assert!(result.is_err());
    assert!(format!("{:#}", result.unwrap_err()).contains("here.txt"));
}

/// Test file_exists is false for directories
#[test]
fn test_fileExists_onDirectory_shouldBeFalse() {
    let temp_dir = common::create_temp_dir().unwrap();
    assert!(!FileManager::file_exists(temp_dir.path()));
}
