//! Heuristic detection of the primary type declaration in a header.
//!
//! This is a single pass over the raw lines, not a tokenizer. A keyword inside
//! a comment or string literal is indistinguishable from a real declaration,
//! and a declaration whose opening brace sits on a later line is not found.

use std::fmt;

/// A declared type name that does not match the file's include guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardMismatch {
  /// Name extracted from the declaration line
  pub declared_name: String,
  /// Guard token the declaration implies (`prefix + name + suffix`)
  pub expected_guard: String,
  /// Guard token derived from the file name
  pub derived_guard: String,
  /// File the declaration was found in, as given by the caller
  pub path: String,
  /// Filename prefix used to build `expected_guard`
  prefix: String,
}

impl fmt::Display for GuardMismatch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "mismatch of class name \"{}\" ({}{}) and file name for file: {}",
      self.declared_name, self.prefix, self.declared_name, self.path
    )
  }
}

/// Finds the first type declaration and returns its name.
///
/// Blank lines are skipped. A line is a declaration when it contains
/// `keyword` and its last non-whitespace character is `{`. The name is the
/// text between the end of the keyword and the first `:` after it, or the
/// first `{` when there is no colon, trimmed of whitespace. Returns `None`
/// when no line qualifies or the extracted name is empty.
pub fn find_declared_name(lines: &[&str], keyword: &str) -> Option<String> {
  if keyword.is_empty() {
    return None;
  }

  for line in lines {
    let trimmed = line.trim();
    if trimmed.is_empty() {
      continue;
    }

    let Some(pos) = line.find(keyword) else {
      continue;
    };
    if !trimmed.ends_with('{') {
      continue;
    }

    let after_keyword = &line[pos + keyword.len()..];
    let end = after_keyword.find(':').or_else(|| after_keyword.find('{'));
    if let Some(end) = end {
      let name = after_keyword[..end].trim();
      // first match wins, even when it yields nothing usable
      return if name.is_empty() { None } else { Some(name.to_string()) };
    }
  }

  None
}

/// Compares a declared name against the guard derived from the file name.
///
/// Returns a [`GuardMismatch`] when `prefix + name + suffix` differs from
/// `derived_guard`. The caller reports it; it never stops a rewrite.
pub fn check_declared_name(
  declared_name: &str,
  derived_guard: &str,
  prefix: &str,
  suffix: &str,
  path: &str,
) -> Option<GuardMismatch> {
  let expected_guard = format!("{prefix}{declared_name}{suffix}");
  if expected_guard == derived_guard {
    return None;
  }

  Some(GuardMismatch {
    declared_name: declared_name.to_string(),
    expected_guard,
    derived_guard: derived_guard.to_string(),
    path: path.to_string(),
    prefix: prefix.to_string(),
  })
}
