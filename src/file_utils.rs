use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

// @module: File utilities and derived output paths

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file, creating parent directories as needed
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    // @generates: Sibling output path as {stem}{suffix}{ext}
    // @params: input path, suffix inserted before the extension
    pub fn derive_output_path<P: AsRef<Path>>(input: P, suffix: &str) -> PathBuf {
        let input = input.as_ref();
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();

        let mut name = format!("{}{}", stem, suffix);
        if let Some(ext) = input.extension() {
            name.push('.');
            name.push_str(&ext.to_string_lossy());
        }

        input.with_file_name(name)
    }

    // @generates: Sibling output path as {stem}{suffix}.{new_ext}
    pub fn derive_output_path_with_ext<P: AsRef<Path>>(input: P, suffix: &str, new_ext: &str) -> PathBuf {
        let input = input.as_ref();
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();

        input.with_file_name(format!("{}{}.{}", stem, suffix, new_ext))
    }
}
