//! # Logging Module
//!
//! This module provides logging utilities for reheader, including:
//! - Verbose logging that can be enabled/disabled
//! - Standard info logging with color support
//! - Installation of the `tracing` subscriber used for diagnostics
//!
//! Verbose logs go to stderr and info logs go to stdout, so the list of files
//! printed in quiet mode stays easy to pipe.
//!
//! ## Example
//!
//! ```rust
//! use reheader::logging::{ColorMode, set_verbose};
//! use reheader::{info_log, verbose_log};
//!
//! set_verbose();
//! ColorMode::Never.apply();
//!
//! verbose_log!("Scanning directory: {}", "src");
//! info_log!("Rewrote: {}", "src/BM_Block.h");
//! ```

mod modes;

pub use modes::{ColorMode, init_tracing, is_quiet, is_verbose, set_quiet, set_verbose};
use owo_colors::{OwoColorize, Stream};

/// Logs a message to stderr if verbose mode is enabled.
///
/// Uses the same format string syntax as the standard [`eprintln!`] macro.
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Logs a message to stdout unless quiet mode is enabled.
///
/// Uses the same format string syntax as the standard [`println!`] macro.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            $crate::logging::print_info_log(&format!($($arg)*));
        }
    };
}

/// Prints an info message in yellow when the terminal supports it.
pub fn print_info_log(message: &str) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.yellow()));
}
