//! # Diff Module
//!
//! Line diffs between a file's current content and its rewritten content,
//! shown in dry-run mode so a rewrite can be reviewed before `--modify`.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};
use similar::{ChangeTag, TextDiff};

/// Manages diff creation and rendering for rewritten files.
///
/// This struct handles:
/// - Generating diffs between original and rewritten content
/// - Displaying diffs to stderr with colorization
/// - Appending diffs to a single consolidated diff file
pub struct DiffManager {
  /// Whether to print diffs to stderr
  pub show_diff: bool,

  /// File that collects the diffs of all files
  pub save_diff_path: Option<PathBuf>,
}

impl DiffManager {
  pub const fn new(show_diff: bool, save_diff_path: Option<PathBuf>) -> Self {
    Self {
      show_diff,
      save_diff_path,
    }
  }

  /// Whether any diff output was requested.
  pub const fn is_enabled(&self) -> bool {
    self.show_diff || self.save_diff_path.is_some()
  }

  /// Truncates the diff file so a run never appends to a previous run's diffs.
  pub fn init(&self) -> Result<()> {
    if let Some(ref path) = self.save_diff_path {
      fs::write(path, "").with_context(|| format!("Failed to create diff file: {}", path.display()))?;
    }
    Ok(())
  }

  /// Renders the diff between `original` and `new` as text.
  pub fn render_diff(path: &Path, original: &str, new: &str) -> String {
    let diff = TextDiff::from_lines(original, new);

    let mut diff_content = format!("Diff for {}:\n", path.display());
    for change in diff.iter_all_changes() {
      let sign = match change.tag() {
        ChangeTag::Delete => "-",
        ChangeTag::Insert => "+",
        ChangeTag::Equal => " ",
      };
      diff_content.push_str(sign);
      diff_content.push_str(change.value());
      if change.missing_newline() {
        diff_content.push('\n');
      }
    }
    diff_content.push('\n');

    diff_content
  }

  /// Displays and/or saves the diff for one file.
  ///
  /// Multiple diffs from different files are appended to the same file,
  /// creating a single consolidated diff file.
  pub fn display_diff(&self, path: &Path, original: &str, new: &str) -> Result<()> {
    let diff_content = Self::render_diff(path, original, new);

    if self.show_diff {
      for line in diff_content.lines() {
        let colored = if line.starts_with('+') {
          line.if_supports_color(Stream::Stderr, |l| l.green()).to_string()
        } else if line.starts_with('-') {
          line.if_supports_color(Stream::Stderr, |l| l.red()).to_string()
        } else {
          line.to_string()
        };
        eprintln!("{colored}");
      }
    }

    if let Some(ref diff_path) = self.save_diff_path {
      let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(diff_path)
        .with_context(|| format!("Failed to open diff file: {}", diff_path.display()))?;
      file
        .write_all(diff_content.as_bytes())
        .with_context(|| format!("Failed to write diff file: {}", diff_path.display()))?;
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use tempfile::tempdir;

  use super::*;

  #[test]
  fn test_render_diff_marks_changes() {
    let original = "// old\n#include \"a.h\"\n";
    let new = "/*\tLicense\n*/\n\n#include \"a.h\"\n";
    let diff = DiffManager::render_diff(Path::new("a.cpp"), original, new);

    assert!(diff.starts_with("Diff for a.cpp:\n"));
    assert!(diff.contains("-// old\n"));
    assert!(diff.contains("+/*\tLicense\n"));
    assert!(diff.contains(" #include \"a.h\"\n"));
  }

  #[test]
  fn test_render_diff_without_trailing_newline() {
    let diff = DiffManager::render_diff(Path::new("a.h"), "#endif", "#endif // AH\n");
    assert!(diff.contains("-#endif\n"));
    assert!(diff.contains("+#endif // AH\n"));
  }

  #[test]
  fn test_saved_diffs_are_consolidated() {
    let dir = tempdir().expect("tempdir");
    let diff_path = dir.path().join("changes.diff");
    fs::write(&diff_path, "stale content\n").expect("seed diff file");

    let manager = DiffManager::new(false, Some(diff_path.clone()));
    assert!(manager.is_enabled());
    manager.init().expect("init");
    manager.display_diff(Path::new("a.h"), "a\n", "b\n").expect("first diff");
    manager.display_diff(Path::new("b.h"), "c\n", "d\n").expect("second diff");

    let saved = fs::read_to_string(&diff_path).expect("read diff file");
    assert!(!saved.contains("stale content"));
    assert!(saved.contains("Diff for a.h:"));
    assert!(saved.contains("Diff for b.h:"));
  }

  #[test]
  fn test_disabled_manager() {
    let manager = DiffManager::new(false, None);
    assert!(!manager.is_enabled());
    manager.init().expect("init is a no-op");
  }
}
