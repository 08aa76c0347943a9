//! # File I/O Module
//!
//! Whole-file reads and crash-safe whole-file replacement.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

/// File I/O operations for the processor.
pub struct FileIO;

impl FileIO {
  /// Read full file content.
  pub fn read_full_content(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
  }

  /// Replace a file's content atomically.
  ///
  /// The content is written to a temporary file in the same directory, which
  /// then takes over the original's permissions and is renamed over it.
  /// Readers see either the old or the new content, never a partial write.
  pub fn write_file_atomic(path: &Path, content: &str) -> Result<()> {
    let parent = match path.parent() {
      Some(parent) if !parent.as_os_str().is_empty() => parent,
      _ => Path::new("."),
    };

    let permissions = fs::metadata(path)
      .with_context(|| format!("Failed to stat file: {}", path.display()))?
      .permissions();

    let mut temp = NamedTempFile::new_in(parent)
      .with_context(|| format!("Failed to create temporary file in {}", parent.display()))?;
    temp
      .write_all(content.as_bytes())
      .with_context(|| format!("Failed to write temporary file for {}", path.display()))?;
    temp
      .as_file()
      .set_permissions(permissions)
      .with_context(|| format!("Failed to set permissions for {}", path.display()))?;

    temp
      .persist(path)
      .map_err(|e| e.error)
      .with_context(|| format!("Failed to write file: {}", path.display()))?;

    Ok(())
  }
}
