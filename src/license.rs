//! # License Module
//!
//! This module turns the raw license text into the comment block that is
//! spliced at the top of every rewritten file.
//!
//! The block is built once per run and shared read-only by every rewrite:
//!
//! ```text
//! /*	BSD 3-Clause License
//!
//! 	Copyright (c) 2019, Andreas Nicolai
//! */
//! ```
//!
//! The first license line shares the line with the opening `/*`, every other
//! non-blank line is indented by one tab, blank lines stay blank and the block
//! ends with a lone `*/`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

const COMMENT_OPEN: &str = "/*";
const COMMENT_CLOSE: &str = "*/";

/// The canonical license comment block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseBlock {
  lines: Vec<String>,
}

impl LicenseBlock {
  /// Builds the block from raw license text.
  pub fn from_text(text: &str) -> Self {
    let mut lines = Vec::new();
    let mut license_lines = text.lines();

    let mut first = COMMENT_OPEN.to_string();
    if let Some(line) = license_lines.next() {
      first.push_str(&indent(line));
    }
    lines.push(first);

    lines.extend(license_lines.map(indent));
    lines.push(COMMENT_CLOSE.to_string());

    Self { lines }
  }

  /// Reads the license text from `path` and builds the block.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or is not valid UTF-8.
  pub fn load(path: &Path) -> Result<Self> {
    debug!("Loading license text from {}", path.display());

    let text =
      fs::read_to_string(path).with_context(|| format!("Failed to read license file: {}", path.display()))?;
    let block = Self::from_text(&text);

    debug!("License block has {} lines", block.lines.len());
    Ok(block)
  }

  /// The block's lines, from the `/*` line through the `*/` line.
  pub fn lines(&self) -> impl Iterator<Item = &str> {
    self.lines.iter().map(String::as_str)
  }

  pub fn line_count(&self) -> usize {
    self.lines.len()
  }
}

fn indent(line: &str) -> String {
  if line.trim().is_empty() {
    String::new()
  } else {
    format!("\t{line}")
  }
}
