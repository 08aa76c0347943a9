//! # Run Command
//!
//! Rewrites (or, by default, only checks) the license block and include
//! guard of every collected header and source file.

use std::path::PathBuf;
use std::process;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use reheader::config::{CliOverrides, load_config};
use reheader::diff::DiffManager;
use reheader::info_log;
use reheader::license::LicenseBlock;
use reheader::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use reheader::output::{
  CategorizedReports, print_all_files_ok, print_blank_line, print_failed_files, print_hint, print_pending_files,
  print_rewritten_files, print_start_message, print_summary,
};
use reheader::processor::{FileCollector, Processor, ProcessorConfig};
use reheader::report::{ProcessingSummary, ReportFormat, ReportGenerator};
use tracing::debug;

/// Arguments for a rewrite run
#[derive(Args, Debug, Default)]
pub struct RunArgs {
  /// Files, directories or glob patterns to process
  #[arg(required = true)]
  pub paths: Vec<String>,

  /// License text placed at the top of every file
  #[arg(long, short = 'f', value_name = "FILE", default_value = "LICENSE")]
  pub license_file: PathBuf,

  /// Path to config file (default: .reheader.toml in the current directory)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Modify mode: write the rewritten files back to disk
  #[arg(
    long,
    help = "Modify mode: write the rewritten files back to disk

[default: dry run]"
  )]
  pub modify: bool,

  /// Show diff of changes
  #[arg(long)]
  pub show_diff: bool,

  /// Save diff of changes to a file
  #[arg(long, short = 'o', value_name = "FILE")]
  pub save_diff: Option<PathBuf>,

  /// Descend into subdirectories of directory arguments
  #[arg(long, short = 'r')]
  pub recursive: bool,

  /// Keyword that introduces the primary declaration of a header
  #[arg(long, value_name = "WORD")]
  pub class_keyword: Option<String>,

  /// Prefix expected in front of the declared name in file names
  #[arg(long, value_name = "PREFIX")]
  pub filename_prefix: Option<String>,

  /// Suffix appended to the file stem to form the include guard
  #[arg(long, value_name = "SUFFIX")]
  pub guard_suffix: Option<String>,

  /// Extensions treated as headers (repeatable, case-insensitive)
  #[arg(long, value_name = "EXT")]
  pub header_ext: Vec<String>,

  /// Extensions treated as sources (repeatable, case-insensitive)
  #[arg(long, value_name = "EXT")]
  pub source_ext: Vec<String>,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,

  /// Write a JSON report of the run to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Write a CSV report of the run to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_csv: Option<PathBuf>,
}

impl RunArgs {
  /// Naming and extension flags that take precedence over the config file.
  pub fn overrides(&self) -> CliOverrides {
    CliOverrides {
      class_keyword: self.class_keyword.clone(),
      filename_prefix: self.filename_prefix.clone(),
      guard_suffix: self.guard_suffix.clone(),
      header_extensions: self.header_ext.clone(),
      source_extensions: self.source_ext.clone(),
    }
  }
}

/// Run the rewrite over all collected files.
///
/// Exits with status 1 when a dry run finds files to rewrite, or when any
/// file could not be processed.
pub fn run(args: RunArgs) -> Result<()> {
  init_tracing(args.quiet, args.verbose);

  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let current_dir = std::env::current_dir().context("Failed to determine current directory")?;

  let mut config = load_config(args.config.as_deref(), &current_dir, args.no_config)?;
  config.merge_cli_overrides(args.overrides());
  if let Err(e) = config.validate() {
    eprintln!("ERROR: {e}");
    process::exit(1);
  }

  let license = LicenseBlock::load(&args.license_file)?;
  debug!("License block has {} lines", license.line_count());

  let check_only = !args.modify;
  let diff_manager = DiffManager::new(args.show_diff, args.save_diff.clone());
  diff_manager.init()?;

  let collector = FileCollector::new(&config.extensions, args.recursive);
  let files = collector.collect(&args.paths)?;

  print_start_message(files.len(), args.modify);

  if files.is_empty() {
    print_blank_line();
    print_all_files_ok();
    return Ok(());
  }

  let processor = Processor::new(ProcessorConfig {
    check_only,
    diff_manager: Some(diff_manager),
    ..ProcessorConfig::new(license, config.rewrite_options())
  });

  let start_time = Instant::now();
  let file_reports = processor.process(&files);
  let summary = ProcessingSummary::from_reports(&file_reports, start_time.elapsed());
  let categorized = CategorizedReports::from_reports(&file_reports);

  print_blank_line();
  let root = Some(current_dir.as_path());
  if !categorized.rewritten.is_empty() {
    print_rewritten_files(&categorized.rewritten, root);
  }
  if !categorized.pending.is_empty() {
    print_pending_files(&categorized.pending, root);
  }
  if !categorized.failed.is_empty() {
    print_failed_files(&categorized.failed, root);
  }
  if categorized.rewritten.is_empty() && categorized.pending.is_empty() && categorized.failed.is_empty() {
    print_all_files_ok();
  }

  print_blank_line();
  print_summary(&summary, check_only);

  if check_only && !categorized.pending.is_empty() {
    print_hint("Run with --modify to rewrite these files.");
  }

  let reports = [
    (ReportFormat::Json, args.report_json.as_ref()),
    (ReportFormat::Csv, args.report_csv.as_ref()),
  ];
  for (format, output_path) in reports {
    let Some(output_path) = output_path else {
      continue;
    };
    let report_generator = ReportGenerator::new(format, output_path);
    if let Err(e) = report_generator.generate(&file_reports, &summary) {
      eprintln!("Error generating {format} report: {e:#}");
    } else {
      info_log!("Generated {} report at {}", format, output_path.display());
    }
  }

  let has_failures = !categorized.failed.is_empty();
  let has_pending = !categorized.pending.is_empty();
  if has_failures || (check_only && has_pending) {
    process::exit(1);
  }

  Ok(())
}
