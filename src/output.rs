//! # Output Module
//!
//! This module centralizes all user-facing output for reheader.
//! It provides consistent formatting, colors, and symbols for terminal output.
//!
//! - Lists and summaries go to stdout; warnings and per-file errors go to
//!   stderr.
//! - `-q` keeps only the bare file lists (for scripting) and errors.
//! - `-v` lifts the truncation of long file lists and adds timing.

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::report::{FileAction, FileReport, ProcessingSummary};

/// Symbols used in output
pub mod symbols {
  /// Success
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Failure
  pub const FAILURE: &str = "\u{2717}"; // ✗
  /// Needs rewriting
  pub const PENDING: &str = "\u{21bb}"; // ↻
}

/// Maximum number of files to show in the default output before truncating
const DEFAULT_FILE_LIST_LIMIT: usize = 20;

/// Print the initial "Checking N files..." or "Rewriting N files..." message.
pub fn print_start_message(file_count: usize, modify_mode: bool) {
  if is_quiet() {
    return;
  }

  let verb = if modify_mode { "Rewriting" } else { "Checking" };
  let files_word = if file_count == 1 { "file" } else { "files" };

  println!("{} {} {}...", verb, file_count, files_word);
}

/// Print a blank line for visual separation (respects quiet mode).
pub fn print_blank_line() {
  if !is_quiet() {
    println!();
  }
}

/// Print a non-fatal warning to stderr (suppressed in quiet mode).
pub fn print_warning(message: &str) {
  if is_quiet() {
    return;
  }

  eprintln!(
    "{} {}",
    "WARNING:".if_supports_color(Stream::Stderr, |s| s.yellow()),
    message
  );
}

/// Print a per-file error to stderr.
pub fn print_file_error(path: &Path, error: &anyhow::Error) {
  eprintln!(
    "{} {}: {:#}",
    "ERROR:".if_supports_color(Stream::Stderr, |s| s.red()),
    path.display(),
    error
  );
}

/// Print the files whose content would change in dry-run mode.
pub fn print_pending_files(files: &[&FileReport], root: Option<&Path>) {
  print_file_list(
    files,
    root,
    &format!(
      "{} {} {} would be rewritten:",
      symbols::PENDING.if_supports_color(Stream::Stdout, |s| s.yellow()),
      files.len(),
      if files.len() == 1 { "file" } else { "files" }
    ),
    true,
  );
}

/// Print the files that were rewritten.
pub fn print_rewritten_files(files: &[&FileReport], root: Option<&Path>) {
  print_file_list(
    files,
    root,
    &format!(
      "{} Rewrote {} {}:",
      symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
      files.len(),
      if files.len() == 1 { "file" } else { "files" }
    ),
    false,
  );
}

/// Print the files that were left untouched because of an error.
pub fn print_failed_files(files: &[&FileReport], root: Option<&Path>) {
  print_file_list(
    files,
    root,
    &format!(
      "{} {} {} could not be rewritten:",
      symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
      files.len(),
      if files.len() == 1 { "file" } else { "files" }
    ),
    true,
  );
}

/// Shared list printer.
///
/// In quiet mode only lists marked `scriptable` are printed, as bare paths.
fn print_file_list(files: &[&FileReport], root: Option<&Path>, header: &str, scriptable: bool) {
  if files.is_empty() {
    return;
  }

  let mut sorted_files: Vec<_> = files.to_vec();
  sorted_files.sort_by(|a, b| a.path.cmp(&b.path));

  if is_quiet() {
    if scriptable {
      for file in &sorted_files {
        println!("{}", make_relative_path(&file.path, root));
      }
    }
    return;
  }

  println!("{}", header);

  let count = sorted_files.len();
  let limit = if is_verbose() { count } else { DEFAULT_FILE_LIST_LIMIT };

  for file in sorted_files.iter().take(limit) {
    println!("  {}", make_relative_path(&file.path, root));
  }

  if count > limit {
    println!(
      "  {} ... and {} more (use -v to see all)",
      "".if_supports_color(Stream::Stdout, |s| s.dimmed()),
      count - limit
    );
  }
}

/// Print the success message when nothing needs rewriting.
pub fn print_all_files_ok() {
  if is_quiet() {
    return;
  }

  println!(
    "{} All files already have the canonical header.",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green())
  );
}

/// Print the processing summary.
///
/// Format: "Summary: X unchanged, Y rewritten, Z failed, W warnings"
/// In verbose mode, also shows timing.
pub fn print_summary(summary: &ProcessingSummary, check_only: bool) {
  if is_quiet() {
    return;
  }

  let changed_label = if check_only { "to rewrite" } else { "rewritten" };
  let changed_count = if check_only {
    summary.needs_rewrite
  } else {
    summary.rewritten
  };

  let failed_str = if summary.failed > 0 {
    summary
      .failed
      .if_supports_color(Stream::Stdout, |s| s.red())
      .to_string()
  } else {
    summary
      .failed
      .if_supports_color(Stream::Stdout, |s| s.cyan())
      .to_string()
  };
  let warnings_str = if summary.warnings > 0 {
    summary
      .warnings
      .if_supports_color(Stream::Stdout, |s| s.yellow())
      .to_string()
  } else {
    summary
      .warnings
      .if_supports_color(Stream::Stdout, |s| s.dimmed())
      .to_string()
  };

  let mut summary_line = format!(
    "Summary: {} unchanged, {} {}, {} failed, {} {}",
    summary.unchanged.if_supports_color(Stream::Stdout, |s| s.cyan()),
    changed_count.if_supports_color(Stream::Stdout, |s| s.cyan()),
    changed_label,
    failed_str,
    warnings_str,
    if summary.warnings == 1 { "warning" } else { "warnings" }
  );

  if is_verbose() {
    summary_line.push_str(&format!(" ({:.2}s)", summary.processing_time.as_secs_f64()));
  }

  println!("{}", summary_line);
}

/// Print a hint for the user about what to do next.
pub fn print_hint(message: &str) {
  if is_quiet() {
    return;
  }

  println!("{}", message.if_supports_color(Stream::Stdout, |s| s.yellow()));
}

/// File reports grouped by outcome.
pub struct CategorizedReports<'a> {
  pub rewritten: Vec<&'a FileReport>,
  pub pending: Vec<&'a FileReport>,
  pub unchanged: Vec<&'a FileReport>,
  pub failed: Vec<&'a FileReport>,
}

impl<'a> CategorizedReports<'a> {
  pub fn from_reports(reports: &'a [FileReport]) -> Self {
    let mut categorized = Self {
      rewritten: Vec::new(),
      pending: Vec::new(),
      unchanged: Vec::new(),
      failed: Vec::new(),
    };

    for report in reports {
      match report.action {
        FileAction::Rewritten => categorized.rewritten.push(report),
        FileAction::NeedsRewrite => categorized.pending.push(report),
        FileAction::Unchanged => categorized.unchanged.push(report),
        FileAction::Failed => categorized.failed.push(report),
      }
    }

    categorized
  }
}

/// Make a path relative to `root` for display.
fn make_relative_path(path: &Path, root: Option<&Path>) -> String {
  if let Some(root) = root {
    path
      .strip_prefix(root)
      .map(|p| p.to_string_lossy().to_string())
      .unwrap_or_else(|_| path.to_string_lossy().to_string())
  } else {
    path.to_string_lossy().to_string()
  }
}
