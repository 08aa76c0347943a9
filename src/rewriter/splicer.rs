//! Splicing of the license block (and, for headers, the normalized guard) into
//! a file's lines.
//!
//! Both variants walk the lines in two phases. Everything before the boundary
//! marker is preamble and is dropped; the license block replaces it and the
//! body after the marker is copied through. A file without its marker is an
//! error so that its content is never silently discarded.

use super::DirectiveTokens;
use crate::license::LicenseBlock;

/// Structural problems that stop a single file from being rewritten.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpliceError {
  /// No line carries the guard-open directive.
  #[error("no '{token}' line found; refusing to discard the file's content")]
  MissingGuardOpen { token: String },

  /// The body has no guard-close directive to annotate.
  #[error("no '{token}' line found after the include guard")]
  MissingGuardClose { token: String },

  /// No line carries the include directive.
  #[error("no '{token}' line found; refusing to discard the file's content")]
  MissingInclude { token: String },
}

/// Rebuilds a header around a freshly named include guard.
///
/// The first line containing the guard-open token is the boundary. It is
/// replaced by the license block, a blank line and a new `#ifndef`/`#define`
/// pair for `guard`. In the body, the first `#define` of the old guard is
/// dropped (once), the last `#endif` line becomes `#endif // <guard>`, and
/// every other line is kept verbatim.
pub fn splice_header(
  lines: &[&str],
  license: &LicenseBlock,
  guard: &str,
  tokens: &DirectiveTokens,
) -> Result<Vec<String>, SpliceError> {
  let boundary = lines
    .iter()
    .position(|line| line.contains(tokens.guard_open.as_str()))
    .ok_or_else(|| SpliceError::MissingGuardOpen {
      token: tokens.guard_open.clone(),
    })?;
  let old_guard = directive_argument(lines[boundary], &tokens.guard_open);

  let mut output = Vec::with_capacity(license.line_count() + lines.len() + 2);
  push_license(&mut output, license);
  output.push(format!("{} {}", tokens.guard_open, guard));
  output.push(format!("{} {}", tokens.guard_define, guard));
  let body_start = output.len();

  let mut skip_define = true;
  for line in &lines[boundary + 1..] {
    if skip_define && defines_guard(line, &tokens.guard_define, old_guard) {
      skip_define = false;
      continue;
    }
    output.push((*line).to_string());
  }

  let close = output[body_start..]
    .iter()
    .rposition(|line| line.contains(tokens.guard_close.as_str()))
    .map(|offset| body_start + offset)
    .ok_or_else(|| SpliceError::MissingGuardClose {
      token: tokens.guard_close.clone(),
    })?;
  let annotated = annotate_close(&output[close], &tokens.guard_close, guard);
  output[close] = annotated;

  Ok(output)
}

/// Replaces everything before the first include directive with the license.
///
/// Unlike headers, the boundary line itself is kept and follows the license
/// block and its blank separator.
pub fn splice_source(
  lines: &[&str],
  license: &LicenseBlock,
  tokens: &DirectiveTokens,
) -> Result<Vec<String>, SpliceError> {
  let boundary = lines
    .iter()
    .position(|line| line.contains(tokens.include.as_str()))
    .ok_or_else(|| SpliceError::MissingInclude {
      token: tokens.include.clone(),
    })?;

  let mut output = Vec::with_capacity(license.line_count() + lines.len() - boundary + 1);
  push_license(&mut output, license);
  output.extend(lines[boundary..].iter().map(|line| (*line).to_string()));

  Ok(output)
}

fn push_license(output: &mut Vec<String>, license: &LicenseBlock) {
  output.extend(license.lines().map(str::to_string));
  output.push(String::new());
}

/// First whitespace-separated word following `token` on `line`.
fn directive_argument<'a>(line: &'a str, token: &str) -> Option<&'a str> {
  let pos = line.find(token)?;
  line[pos + token.len()..].split_whitespace().next()
}

fn defines_guard(line: &str, define_token: &str, old_guard: Option<&str>) -> bool {
  if !line.contains(define_token) {
    return false;
  }
  match old_guard {
    Some(old) => directive_argument(line, define_token) == Some(old),
    None => true,
  }
}

fn annotate_close(line: &str, close_token: &str, guard: &str) -> String {
  match line.find(close_token) {
    Some(pos) => format!("{}{} // {}", &line[..pos], close_token, guard),
    None => line.to_string(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn license() -> LicenseBlock {
    LicenseBlock::from_text("Copyright (c) 2025 Test")
  }

  fn with_license(rest: &[&str]) -> Vec<String> {
    let mut expected: Vec<String> = license().lines().map(str::to_string).collect();
    expected.push(String::new());
    expected.extend(rest.iter().map(|s| (*s).to_string()));
    expected
  }

  #[test]
  fn test_header_basic() {
    let lines = ["#ifndef BM_FOOH", "#define BM_FOOH", "", "class Foo {", "};", "#endif"];
    let output = splice_header(&lines, &license(), "BM_FooH", &DirectiveTokens::default()).expect("splice");
    assert_eq!(
      output,
      with_license(&["#ifndef BM_FooH", "#define BM_FooH", "", "class Foo {", "};", "#endif // BM_FooH"])
    );
  }

  #[test]
  fn test_header_preamble_is_dropped() {
    let lines = [
      "/*  Old license",
      "    more text */",
      "",
      "#ifndef OLD_GUARD",
      "#define OLD_GUARD",
      "int x;",
      "#endif",
    ];
    let output = splice_header(&lines, &license(), "FooH", &DirectiveTokens::default()).expect("splice");
    assert_eq!(output, with_license(&["#ifndef FooH", "#define FooH", "int x;", "#endif // FooH"]));
  }

  #[test]
  fn test_header_existing_close_comment_is_replaced() {
    let lines = ["#ifndef A", "#define A", "#endif // A (old)"];
    let output = splice_header(&lines, &license(), "BH", &DirectiveTokens::default()).expect("splice");
    assert_eq!(output.last().map(String::as_str), Some("#endif // BH"));
  }

  #[test]
  fn test_header_only_last_endif_is_annotated() {
    let lines = [
      "#ifndef A",
      "#define A",
      "#ifdef _WIN32",
      "#define EXPORT __declspec(dllexport)",
      "#endif",
      "",
      "#endif",
      "",
    ];
    let output = splice_header(&lines, &license(), "AH", &DirectiveTokens::default()).expect("splice");
    assert_eq!(
      output,
      with_license(&[
        "#ifndef AH",
        "#define AH",
        "#ifdef _WIN32",
        "#define EXPORT __declspec(dllexport)",
        "#endif",
        "",
        "#endif // AH",
        "",
      ])
    );
  }

  #[test]
  fn test_header_unrelated_define_is_kept() {
    // the old guard is never defined, so other macros survive
    let lines = ["#ifndef A", "#include <QString>", "#define MAX_ITEMS 10", "#endif"];
    let output = splice_header(&lines, &license(), "AH", &DirectiveTokens::default()).expect("splice");
    assert_eq!(
      output,
      with_license(&["#ifndef AH", "#define AH", "#include <QString>", "#define MAX_ITEMS 10", "#endif // AH"])
    );
  }

  #[test]
  fn test_header_only_first_guard_define_is_skipped() {
    let lines = ["#ifndef A", "#define A", "#define A", "#endif"];
    let output = splice_header(&lines, &license(), "AH", &DirectiveTokens::default()).expect("splice");
    assert_eq!(output, with_license(&["#ifndef AH", "#define AH", "#define A", "#endif // AH"]));
  }

  #[test]
  fn test_header_bare_ifndef_skips_first_define() {
    let lines = ["#ifndef", "#define SOMETHING", "#endif"];
    let output = splice_header(&lines, &license(), "AH", &DirectiveTokens::default()).expect("splice");
    assert_eq!(output, with_license(&["#ifndef AH", "#define AH", "#endif // AH"]));
  }

  #[test]
  fn test_header_indented_endif_keeps_indent() {
    let lines = ["#ifndef A", "#define A", "  #endif  /* A */"];
    let output = splice_header(&lines, &license(), "AH", &DirectiveTokens::default()).expect("splice");
    assert_eq!(output.last().map(String::as_str), Some("  #endif // AH"));
  }

  #[test]
  fn test_header_missing_ifndef() {
    let lines = ["/* doc only */", "namespace X {}", "#endif"];
    let err = splice_header(&lines, &license(), "AH", &DirectiveTokens::default()).expect_err("no boundary");
    assert_eq!(
      err,
      SpliceError::MissingGuardOpen {
        token: "#ifndef".to_string()
      }
    );
  }

  #[test]
  fn test_header_missing_endif() {
    let lines = ["#ifndef A", "#define A", "int x;"];
    let err = splice_header(&lines, &license(), "AH", &DirectiveTokens::default()).expect_err("no close");
    assert!(matches!(err, SpliceError::MissingGuardClose { .. }));
  }

  #[test]
  fn test_header_is_stable_when_repeated() {
    let lines = ["// junk", "#ifndef OLD", "#define OLD", "class Foo {", "};", "#endif"];
    let tokens = DirectiveTokens::default();
    let first = splice_header(&lines, &license(), "FooH", &tokens).expect("first splice");
    let first_refs: Vec<&str> = first.iter().map(String::as_str).collect();
    let second = splice_header(&first_refs, &license(), "FooH", &tokens).expect("second splice");
    assert_eq!(first, second);
  }

  #[test]
  fn test_source_basic() {
    let lines = ["// old comment", "#include \"Foo.h\"", "", "void f() {}"];
    let output = splice_source(&lines, &license(), &DirectiveTokens::default()).expect("splice");
    assert_eq!(output, with_license(&["#include \"Foo.h\"", "", "void f() {}"]));
  }

  #[test]
  fn test_source_include_on_first_line() {
    let lines = ["#include <cmath>", "int main() { return 0; }"];
    let output = splice_source(&lines, &license(), &DirectiveTokens::default()).expect("splice");
    assert_eq!(output, with_license(&["#include <cmath>", "int main() { return 0; }"]));
  }

  #[test]
  fn test_source_missing_include() {
    let lines = ["int main() {", "  return 0;", "}"];
    let err = splice_source(&lines, &license(), &DirectiveTokens::default()).expect_err("no include");
    assert_eq!(
      err,
      SpliceError::MissingInclude {
        token: "#include".to_string()
      }
    );
  }

  #[test]
  fn test_empty_input() {
    let tokens = DirectiveTokens::default();
    assert!(splice_header(&[], &license(), "AH", &tokens).is_err());
    assert!(splice_source(&[], &license(), &tokens).is_err());
  }

  #[test]
  fn test_custom_tokens() {
    let tokens = DirectiveTokens {
      guard_open: "%ifndef".to_string(),
      guard_define: "%define".to_string(),
      guard_close: "%endif".to_string(),
      include: "%include".to_string(),
    };
    let lines = ["%ifndef X", "%define X", "%endif"];
    let output = splice_header(&lines, &license(), "YH", &tokens).expect("splice");
    assert_eq!(output, with_license(&["%ifndef YH", "%define YH", "%endif // YH"]));
  }
}
