//! # Rewriter Module
//!
//! The pure header-rewriting algorithm. Nothing in here touches the file
//! system: callers hand in the file's path and content and get back the new
//! content plus any diagnostics.
//!
//! - [`guard`] derives the canonical include-guard token from a file name
//! - [`scanner`] finds the primary type declaration and cross-checks its name
//! - [`splicer`] replaces the preamble with the license block and, for headers,
//!   the normalized guard
//!
//! [`FileRewriter`] ties the three together for one file.

pub mod guard;
pub mod scanner;
pub mod splicer;

use std::fmt;

pub use guard::derive_guard;
pub use scanner::{GuardMismatch, check_declared_name, find_declared_name};
pub use splicer::{SpliceError, splice_header, splice_source};

use crate::license::LicenseBlock;

/// Preprocessor tokens used as boundary markers and for the new guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveTokens {
  pub guard_open: String,
  pub guard_define: String,
  pub guard_close: String,
  pub include: String,
}

impl Default for DirectiveTokens {
  fn default() -> Self {
    Self {
      guard_open: "#ifndef".to_string(),
      guard_define: "#define".to_string(),
      guard_close: "#endif".to_string(),
      include: "#include".to_string(),
    }
  }
}

/// Naming conventions and tokens consumed by the rewriter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOptions {
  /// Keyword that introduces a type declaration
  pub class_keyword: String,
  /// Prefix that turns a declared name into its expected file name
  pub filename_prefix: String,
  /// Appended to the file stem to form the guard token
  pub guard_suffix: String,
  pub directives: DirectiveTokens,
}

impl Default for RewriteOptions {
  fn default() -> Self {
    Self {
      class_keyword: "class".to_string(),
      filename_prefix: "BM_".to_string(),
      guard_suffix: "H".to_string(),
      directives: DirectiveTokens::default(),
    }
  }
}

/// Which splicing strategy a file gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
  Header,
  Source,
}

impl fmt::Display for FileKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      FileKind::Header => write!(f, "header"),
      FileKind::Source => write!(f, "source"),
    }
  }
}

/// Result of rewriting one file's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
  /// The complete new file content, newline terminated
  pub content: String,
  /// Guard token used for a header, `None` for sources
  pub guard: Option<String>,
  /// Name of the detected type declaration, if any
  pub declared_name: Option<String>,
  /// Set when the declared name disagrees with the guard
  pub mismatch: Option<GuardMismatch>,
}

/// Rewrites file content against a shared license block and options.
pub struct FileRewriter<'a> {
  license: &'a LicenseBlock,
  options: &'a RewriteOptions,
}

impl<'a> FileRewriter<'a> {
  pub const fn new(license: &'a LicenseBlock, options: &'a RewriteOptions) -> Self {
    Self { license, options }
  }

  /// Rewrites `content` according to `kind`.
  ///
  /// `path` is only used to derive the guard and to label diagnostics.
  pub fn rewrite(&self, kind: FileKind, path: &str, content: &str) -> Result<Rewrite, SpliceError> {
    match kind {
      FileKind::Header => self.rewrite_header(path, content),
      FileKind::Source => self.rewrite_source(content),
    }
  }

  /// Runs the declaration check of a header without splicing it.
  ///
  /// Works on any content, including a header that [`Self::rewrite_header`]
  /// would reject, so the mismatch can be reported before the splice fails.
  pub fn check_header(&self, path: &str, content: &str) -> Option<GuardMismatch> {
    let lines: Vec<&str> = content.lines().collect();
    let guard = derive_guard(path, &self.options.guard_suffix);
    self.scan_declaration(&lines, &guard, path).1
  }

  /// Replaces the license block and normalizes the include guard of a header.
  ///
  /// A declaration whose name does not match the guard is reported through
  /// [`Rewrite::mismatch`]; the rewrite still happens.
  pub fn rewrite_header(&self, path: &str, content: &str) -> Result<Rewrite, SpliceError> {
    let lines: Vec<&str> = content.lines().collect();
    let guard = derive_guard(path, &self.options.guard_suffix);
    let (declared_name, mismatch) = self.scan_declaration(&lines, &guard, path);

    let output = splice_header(&lines, self.license, &guard, &self.options.directives)?;

    Ok(Rewrite {
      content: render_lines(&output),
      guard: Some(guard),
      declared_name,
      mismatch,
    })
  }

  /// Replaces everything above the first include directive with the license.
  pub fn rewrite_source(&self, content: &str) -> Result<Rewrite, SpliceError> {
    let lines: Vec<&str> = content.lines().collect();
    let output = splice_source(&lines, self.license, &self.options.directives)?;

    Ok(Rewrite {
      content: render_lines(&output),
      guard: None,
      declared_name: None,
      mismatch: None,
    })
  }

  fn scan_declaration(&self, lines: &[&str], guard: &str, path: &str) -> (Option<String>, Option<GuardMismatch>) {
    let declared_name = find_declared_name(lines, &self.options.class_keyword);
    let mismatch = declared_name.as_deref().and_then(|name| {
      check_declared_name(
        name,
        guard,
        &self.options.filename_prefix,
        &self.options.guard_suffix,
        path,
      )
    });
    (declared_name, mismatch)
  }
}

/// Joins lines with `\n`, terminating the last one as well.
pub fn render_lines(lines: &[String]) -> String {
  let mut content = lines.join("\n");
  content.push('\n');
  content
}
