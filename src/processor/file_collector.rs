//! # File Collector Module
//!
//! Turns the command-line path arguments into the list of files to rewrite,
//! each tagged with the rewrite strategy its extension selects.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use crate::config::ExtensionConfig;
use crate::rewriter::FileKind;

/// A file selected for rewriting.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CandidateFile {
  pub kind: FileKind,
  pub path: PathBuf,
}

/// File collector for directory scanning and glob expansion.
///
/// - Existing files are taken as given when their extension is known
/// - Directories are scanned for header and source extensions, one level deep
///   unless `recursive` is set
/// - Anything else is expanded as a glob pattern
///
/// Symlinks are never followed or returned.
pub struct FileCollector {
  header_extensions: Vec<String>,
  source_extensions: Vec<String>,
  recursive: bool,
}

impl FileCollector {
  pub fn new(extensions: &ExtensionConfig, recursive: bool) -> Self {
    Self {
      header_extensions: extensions.headers.clone(),
      source_extensions: extensions.sources.clone(),
      recursive,
    }
  }

  /// Decides the rewrite strategy from the file extension (case-insensitive).
  pub fn classify(&self, path: &Path) -> Option<FileKind> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    if self.header_extensions.contains(&ext) {
      Some(FileKind::Header)
    } else if self.source_extensions.contains(&ext) {
      Some(FileKind::Source)
    } else {
      None
    }
  }

  /// Collects candidate files for all patterns.
  ///
  /// The result is de-duplicated and sorted with all headers before all
  /// sources, so repeated runs process files in the same order.
  ///
  /// # Errors
  ///
  /// Returns an error if a glob pattern is invalid or a directory cannot be
  /// scanned.
  pub fn collect(&self, patterns: &[String]) -> Result<Vec<CandidateFile>> {
    let mut files = Vec::new();

    for pattern in patterns {
      let path = PathBuf::from(pattern);
      if is_symlink(&path) {
        trace!("Skipping: {} (symlink)", path.display());
        continue;
      }

      if path.is_file() {
        match self.classify(&path) {
          Some(kind) => files.push(CandidateFile { kind, path }),
          None => warn!("Skipping {}: extension is neither a header nor a source extension", path.display()),
        }
      } else if path.is_dir() {
        files.extend(self.scan_directory(&path)?);
      } else {
        let before = files.len();
        self.expand_glob(pattern, &mut files)?;
        if files.len() == before {
          warn!("No files matched: {}", pattern);
        }
      }
    }

    files.sort();
    files.dedup();

    debug!("Collected {} files", files.len());
    Ok(files)
  }

  /// Scans a directory for files with a known extension.
  pub fn scan_directory(&self, dir: &Path) -> Result<Vec<CandidateFile>> {
    debug!("Scanning directory: {}", dir.display());

    let max_depth = if self.recursive { usize::MAX } else { 1 };
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(max_depth) {
      let entry = entry.with_context(|| format!("Failed to scan directory: {}", dir.display()))?;
      if !entry.file_type().is_file() {
        continue;
      }

      let path = entry.into_path();
      if let Some(kind) = self.classify(&path) {
        files.push(CandidateFile { kind, path });
      } else {
        trace!("Skipping: {} (unknown extension)", path.display());
      }
    }

    Ok(files)
  }

  fn expand_glob(&self, pattern: &str, files: &mut Vec<CandidateFile>) -> Result<()> {
    let entries = glob::glob(pattern).with_context(|| format!("Invalid glob pattern: {}", pattern))?;

    for entry in entries {
      let path = match entry {
        Ok(path) => path,
        Err(e) => {
          warn!("Error with glob pattern {}: {}", pattern, e);
          continue;
        }
      };

      if is_symlink(&path) {
        continue;
      }
      if path.is_file() {
        if let Some(kind) = self.classify(&path) {
          files.push(CandidateFile { kind, path });
        }
      } else if path.is_dir() {
        files.extend(self.scan_directory(&path)?);
      }
    }

    Ok(())
  }
}

fn is_symlink(path: &Path) -> bool {
  std::fs::symlink_metadata(path)
    .map(|metadata| metadata.file_type().is_symlink())
    .unwrap_or(false)
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::TempDir;

  use super::*;

  fn collector(recursive: bool) -> FileCollector {
    FileCollector::new(&ExtensionConfig::default(), recursive)
  }

  fn setup_tree() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    let root = dir.path();
    fs::write(root.join("BM_Block.h"), "").expect("write");
    fs::write(root.join("BM_Block.cpp"), "").expect("write");
    fs::write(root.join("README.md"), "").expect("write");
    fs::create_dir(root.join("nested")).expect("mkdir");
    fs::write(root.join("nested").join("BM_Socket.h"), "").expect("write");
    dir
  }

  #[test]
  fn test_classify() {
    let collector = collector(false);
    assert_eq!(collector.classify(Path::new("a/BM_Block.h")), Some(FileKind::Header));
    assert_eq!(collector.classify(Path::new("a/BM_Block.H")), Some(FileKind::Header));
    assert_eq!(collector.classify(Path::new("main.cpp")), Some(FileKind::Source));
    assert_eq!(collector.classify(Path::new("notes.txt")), None);
    assert_eq!(collector.classify(Path::new("Makefile")), None);
  }

  #[test]
  fn test_directory_scan_is_shallow_by_default() {
    let dir = setup_tree();
    let files = collector(false)
      .collect(&[dir.path().to_string_lossy().to_string()])
      .expect("collect");

    assert_eq!(
      files,
      vec![
        CandidateFile {
          kind: FileKind::Header,
          path: dir.path().join("BM_Block.h"),
        },
        CandidateFile {
          kind: FileKind::Source,
          path: dir.path().join("BM_Block.cpp"),
        },
      ]
    );
  }

  #[test]
  fn test_recursive_scan() {
    let dir = setup_tree();
    let files = collector(true)
      .collect(&[dir.path().to_string_lossy().to_string()])
      .expect("collect");

    let headers: Vec<_> = files.iter().filter(|f| f.kind == FileKind::Header).collect();
    assert_eq!(headers.len(), 2);
    assert!(files.iter().any(|f| f.path.ends_with("nested/BM_Socket.h")));
  }

  #[test]
  fn test_overlapping_patterns_are_deduplicated() {
    let dir = setup_tree();
    let header = dir.path().join("BM_Block.h");
    let files = collector(false)
      .collect(&[
        dir.path().to_string_lossy().to_string(),
        header.to_string_lossy().to_string(),
      ])
      .expect("collect");

    assert_eq!(files.len(), 2);
  }

  #[test]
  fn test_glob_pattern() {
    let dir = setup_tree();
    let pattern = format!("{}/*.h", dir.path().to_string_lossy());
    let files = collector(false).collect(&[pattern]).expect("collect");

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].kind, FileKind::Header);
  }

  #[test]
  fn test_unknown_explicit_file_is_skipped() {
    let dir = setup_tree();
    let readme = dir.path().join("README.md");
    let files = collector(false)
      .collect(&[readme.to_string_lossy().to_string()])
      .expect("collect");
    assert!(files.is_empty());
  }

  #[test]
  fn test_invalid_glob() {
    assert!(collector(false).collect(&["src/[".to_string()]).is_err());
  }

  #[cfg(unix)]
  #[test]
  fn test_symlinks_are_skipped() {
    let dir = setup_tree();
    std::os::unix::fs::symlink(dir.path().join("BM_Block.h"), dir.path().join("BM_Link.h")).expect("symlink");

    let files = collector(false)
      .collect(&[dir.path().to_string_lossy().to_string()])
      .expect("collect");
    assert!(!files.iter().any(|f| f.path.ends_with("BM_Link.h")));
  }
}
