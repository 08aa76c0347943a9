//! # Report Module
//!
//! This module records what happened to each file during a run and writes
//! machine-readable reports (JSON, CSV) of those outcomes.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;

use crate::rewriter::FileKind;

/// Outcome of processing a single file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
  /// Path to the file
  #[serde(serialize_with = "serialize_path")]
  pub path: PathBuf,
  /// Header or source handling
  pub kind: FileKind,
  /// What happened to the file
  pub action: FileAction,
  /// Declaration/guard mismatch warning, if one was raised
  #[serde(skip_serializing_if = "Option::is_none")]
  pub warning: Option<String>,
  /// Why the file could not be rewritten
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

impl FileReport {
  /// Report for a file that could not be read, spliced or written.
  pub fn failed(path: &Path, kind: FileKind, error: String) -> Self {
    Self {
      path: path.to_path_buf(),
      kind,
      action: FileAction::Failed,
      warning: None,
      error: Some(error),
    }
  }
}

/// Possible actions taken on a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileAction {
  /// New content was written
  Rewritten,
  /// Content would change (dry run)
  NeedsRewrite,
  /// Content already canonical
  Unchanged,
  /// File left untouched because of an error
  Failed,
}

impl FileAction {
  pub const fn label(self) -> &'static str {
    match self {
      FileAction::Rewritten => "rewritten",
      FileAction::NeedsRewrite => "needs_rewrite",
      FileAction::Unchanged => "unchanged",
      FileAction::Failed => "failed",
    }
  }
}

fn serialize_path<S>(path: &Path, serializer: S) -> Result<S::Ok, S::Error>
where
  S: serde::Serializer,
{
  serializer.serialize_str(&path.to_string_lossy())
}

/// Summary of the processing results
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessingSummary {
  pub total_files: usize,
  pub rewritten: usize,
  pub needs_rewrite: usize,
  pub unchanged: usize,
  pub failed: usize,
  pub warnings: usize,
  pub processing_time: Duration,
}

impl ProcessingSummary {
  /// Tallies a set of file reports.
  pub fn from_reports(reports: &[FileReport], processing_time: Duration) -> Self {
    let mut summary = Self {
      total_files: reports.len(),
      processing_time,
      ..Self::default()
    };

    for report in reports {
      match report.action {
        FileAction::Rewritten => summary.rewritten += 1,
        FileAction::NeedsRewrite => summary.needs_rewrite += 1,
        FileAction::Unchanged => summary.unchanged += 1,
        FileAction::Failed => summary.failed += 1,
      }
      if report.warning.is_some() {
        summary.warnings += 1;
      }
    }

    summary
  }
}

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
  /// JSON format for machine readability
  Json,
  /// CSV format for spreadsheet compatibility
  Csv,
}

impl std::fmt::Display for ReportFormat {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ReportFormat::Json => write!(f, "JSON"),
      ReportFormat::Csv => write!(f, "CSV"),
    }
  }
}

/// Writes a report of a run to disk.
pub struct ReportGenerator<'a> {
  format: ReportFormat,
  output_path: &'a Path,
}

impl<'a> ReportGenerator<'a> {
  pub const fn new(format: ReportFormat, output_path: &'a Path) -> Self {
    Self { format, output_path }
  }

  /// Render the report and write it to the output path.
  pub fn generate(&self, files: &[FileReport], summary: &ProcessingSummary) -> Result<()> {
    let content = self.render(files, summary)?;

    fs::write(self.output_path, content)
      .with_context(|| format!("Failed to write {} report to {}", self.format, self.output_path.display()))
  }

  /// Render the report without writing it.
  pub fn render(&self, files: &[FileReport], summary: &ProcessingSummary) -> Result<String> {
    match self.format {
      ReportFormat::Json => Self::generate_json(files, summary),
      ReportFormat::Csv => Ok(Self::generate_csv(files, summary)),
    }
  }

  fn generate_json(files: &[FileReport], summary: &ProcessingSummary) -> Result<String> {
    use serde_json::json;

    let report = json!({
      "summary": {
        "total_files": summary.total_files,
        "rewritten": summary.rewritten,
        "needs_rewrite": summary.needs_rewrite,
        "unchanged": summary.unchanged,
        "failed": summary.failed,
        "warnings": summary.warnings,
        "processing_time_seconds": summary.processing_time.as_secs_f64(),
      },
      "files": files,
    });

    Ok(serde_json::to_string_pretty(&report)?)
  }

  fn generate_csv(files: &[FileReport], summary: &ProcessingSummary) -> String {
    let mut csv = String::new();

    csv.push_str("file_path,kind,action,notes\n");

    for file in files {
      let note = file.error.as_deref().or(file.warning.as_deref()).unwrap_or_default();
      csv.push_str(&format!(
        "{},{},{},{}\n",
        escape_csv(&file.path.to_string_lossy()),
        file.kind,
        file.action.label(),
        escape_csv(note)
      ));
    }

    csv.push_str("\n# Summary\n");
    csv.push_str(&format!("Total files processed,{}\n", summary.total_files));
    csv.push_str(&format!("Files rewritten,{}\n", summary.rewritten));
    csv.push_str(&format!("Files needing rewrite,{}\n", summary.needs_rewrite));
    csv.push_str(&format!("Files unchanged,{}\n", summary.unchanged));
    csv.push_str(&format!("Files failed,{}\n", summary.failed));
    csv.push_str(&format!("Warnings,{}\n", summary.warnings));
    csv.push_str(&format!(
      "Processing time (seconds),{:.2}\n",
      summary.processing_time.as_secs_f64()
    ));
    csv.push_str(&format!("Generated on,{}\n", Local::now().format("%Y-%m-%d %H:%M:%S")));

    csv
  }
}

/// Quote a CSV field when it contains a delimiter, quote or newline.
fn escape_csv(field: &str) -> String {
  if field.contains([',', '"', '\n']) {
    format!("\"{}\"", field.replace('"', "\"\""))
  } else {
    field.to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample_reports() -> Vec<FileReport> {
    vec![
      FileReport {
        path: PathBuf::from("src/BM_Block.h"),
        kind: FileKind::Header,
        action: FileAction::Rewritten,
        warning: None,
        error: None,
      },
      FileReport {
        path: PathBuf::from("src/BM_Item.h"),
        kind: FileKind::Header,
        action: FileAction::NeedsRewrite,
        warning: Some("mismatch of class name \"Thing\" (BM_Thing) and file name for file: src/BM_Item.h".to_string()),
        error: None,
      },
      FileReport {
        path: PathBuf::from("src/main.cpp"),
        kind: FileKind::Source,
        action: FileAction::Unchanged,
        warning: None,
        error: None,
      },
      FileReport::failed(
        Path::new("src/empty.cpp"),
        FileKind::Source,
        "no '#include' line found".to_string(),
      ),
    ]
  }

  #[test]
  fn test_summary_counts() {
    let summary = ProcessingSummary::from_reports(&sample_reports(), Duration::from_millis(1500));
    assert_eq!(summary.total_files, 4);
    assert_eq!(summary.rewritten, 1);
    assert_eq!(summary.needs_rewrite, 1);
    assert_eq!(summary.unchanged, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.warnings, 1);
  }

  #[test]
  fn test_json_report() {
    let reports = sample_reports();
    let summary = ProcessingSummary::from_reports(&reports, Duration::from_secs(2));
    let output = ReportGenerator::new(ReportFormat::Json, Path::new("unused.json"))
      .render(&reports, &summary)
      .expect("render json");

    let value: serde_json::Value = serde_json::from_str(&output).expect("valid JSON");
    assert_eq!(value["summary"]["total_files"], 4);
    assert_eq!(value["summary"]["failed"], 1);
    assert_eq!(value["files"][0]["path"], "src/BM_Block.h");
    assert_eq!(value["files"][0]["kind"], "header");
    assert_eq!(value["files"][0]["action"], "rewritten");
    assert!(value["files"][0].get("warning").is_none());
    assert_eq!(value["files"][1]["action"], "needs_rewrite");
    assert_eq!(value["files"][3]["error"], "no '#include' line found");
  }

  #[test]
  fn test_csv_report() {
    let reports = sample_reports();
    let summary = ProcessingSummary::from_reports(&reports, Duration::from_secs(1));
    let output = ReportGenerator::new(ReportFormat::Csv, Path::new("unused.csv"))
      .render(&reports, &summary)
      .expect("render csv");

    assert!(output.starts_with("file_path,kind,action,notes\n"));
    assert!(output.contains("src/BM_Block.h,header,rewritten,\n"));
    assert!(output.contains("src/empty.cpp,source,failed,no '#include' line found\n"));
    assert!(output.contains("Files failed,1\n"));
  }

  #[test]
  fn test_escape_csv() {
    assert_eq!(escape_csv("plain"), "plain");
    assert_eq!(escape_csv("a,b"), "\"a,b\"");
    assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
  }

  #[test]
  fn test_generate_writes_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("report.json");
    let reports = sample_reports();
    let summary = ProcessingSummary::from_reports(&reports, Duration::ZERO);

    ReportGenerator::new(ReportFormat::Json, &path)
      .generate(&reports, &summary)
      .expect("write report");
    assert!(fs::read_to_string(&path).expect("read report").contains("\"summary\""));
  }
}
