//! # Processor Module
//!
//! This module runs the rewriter over a batch of files.
//!
//! The module is organized into several submodules:
//! - [`file_io`] - Whole-file reads and atomic replacement
//! - [`file_collector`] - Turning path arguments into candidate files
//!
//! The [`Processor`] struct reads each file, rewrites it with
//! [`FileRewriter`](crate::rewriter::FileRewriter) and writes the result back.
//! Files are handled one at a time; a failure on one file is reported and the
//! batch moves on.

mod file_collector;
mod file_io;

use std::path::Path;

use anyhow::{Context, Result};
pub use file_collector::{CandidateFile, FileCollector};
pub use file_io::FileIO;
use tracing::{debug, trace};

use crate::diff::DiffManager;
use crate::license::LicenseBlock;
use crate::output::{print_file_error, print_warning};
use crate::report::{FileAction, FileReport};
use crate::rewriter::{FileKind, FileRewriter, RewriteOptions};
use crate::verbose_log;

/// Configuration for creating a Processor instance.
pub struct ProcessorConfig {
  pub license: LicenseBlock,
  pub options: RewriteOptions,

  /// Compute and report rewrites without writing them
  pub check_only: bool,

  pub diff_manager: Option<DiffManager>,
}

impl ProcessorConfig {
  /// Creates a new ProcessorConfig with required fields and sensible defaults.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// ProcessorConfig {
  ///     check_only: true,
  ///     ..ProcessorConfig::new(license, options)
  /// }
  /// ```
  pub const fn new(license: LicenseBlock, options: RewriteOptions) -> Self {
    Self {
      license,
      options,
      check_only: false,
      diff_manager: None,
    }
  }
}

/// Processor for rewriting a batch of header and source files.
pub struct Processor {
  license: LicenseBlock,
  options: RewriteOptions,
  check_only: bool,
  diff_manager: DiffManager,
}

impl Processor {
  pub fn new(config: ProcessorConfig) -> Self {
    Self {
      license: config.license,
      options: config.options,
      check_only: config.check_only,
      diff_manager: config.diff_manager.unwrap_or_else(|| DiffManager::new(false, None)),
    }
  }

  pub const fn is_check_only(&self) -> bool {
    self.check_only
  }

  /// Processes every candidate file in order.
  ///
  /// Never stops early: a file that cannot be read, spliced or written is
  /// reported on stderr, left untouched, and recorded as
  /// [`FileAction::Failed`].
  pub fn process(&self, files: &[CandidateFile]) -> Vec<FileReport> {
    debug!("Processing {} files", files.len());

    files
      .iter()
      .map(|file| match self.process_file(&file.path, file.kind) {
        Ok(report) => report,
        Err(e) => {
          print_file_error(&file.path, &e);
          FileReport::failed(&file.path, file.kind, format!("{e:#}"))
        }
      })
      .collect()
  }

  /// Rewrites a single file.
  ///
  /// Reads the file, reports a declaration mismatch warning if there is one,
  /// rewrites its content and (unless in check-only mode) replaces the file
  /// when its content changed.
  ///
  /// A file without its boundary marker, or one that cannot be written, is
  /// reported on stderr and returned as [`FileAction::Failed`] together with
  /// any mismatch warning found before the splice. The file is left as it was.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read.
  pub fn process_file(&self, path: &Path, kind: FileKind) -> Result<FileReport> {
    trace!("Processing {} as {}", path.display(), kind);

    let content = FileIO::read_full_content(path)?;
    let path_label = path.to_string_lossy();
    let rewriter = FileRewriter::new(&self.license, &self.options);

    let warning = match kind {
      FileKind::Header => rewriter.check_header(&path_label, &content).map(|m| m.to_string()),
      FileKind::Source => None,
    };
    if let Some(ref message) = warning {
      print_warning(message);
    }

    let rewrite = match rewriter
      .rewrite(kind, &path_label, &content)
      .with_context(|| format!("Cannot rewrite {} {}", kind, path.display()))
    {
      Ok(rewrite) => rewrite,
      Err(e) => {
        print_file_error(path, &e);
        return Ok(FileReport {
          warning,
          ..FileReport::failed(path, kind, format!("{e:#}"))
        });
      }
    };

    let action = if rewrite.content == content {
      trace!("{} already canonical", path.display());
      FileAction::Unchanged
    } else {
      if self.diff_manager.is_enabled()
        && let Err(e) = self.diff_manager.display_diff(path, &content, &rewrite.content)
      {
        print_warning(&format!("Failed to display diff for {}: {:#}", path.display(), e));
      }

      if self.check_only {
        FileAction::NeedsRewrite
      } else if let Err(e) = FileIO::write_file_atomic(path, &rewrite.content) {
        print_file_error(path, &e);
        return Ok(FileReport {
          warning,
          ..FileReport::failed(path, kind, format!("{e:#}"))
        });
      } else {
        verbose_log!("Rewrote: {}", path.display());
        FileAction::Rewritten
      }
    };

    Ok(FileReport {
      path: path.to_path_buf(),
      kind,
      action,
      warning,
      error: None,
    })
  }
}
