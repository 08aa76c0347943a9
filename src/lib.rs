//! # reheader
//!
//! Replaces the leading license block of C/C++ header and source files with a
//! canonical license text, and normalizes each header's include guard to a
//! name derived from its file name.
//!
//! For a header `BM_Block.h` the result looks like:
//!
//! ```text
//! /*	BSD 3-Clause License
//! 	...
//! */
//!
//! #ifndef BM_BlockH
//! #define BM_BlockH
//! ...
//! #endif // BM_BlockH
//! ```
//!
//! Source files only get the license block, placed above their first
//! `#include`. Everything above the boundary line (`#ifndef` for headers,
//! `#include` for sources) is discarded; a file without that line is reported
//! and left untouched.
//!
//! ## Usage as a Library
//!
//! ```rust
//! use reheader::license::LicenseBlock;
//! use reheader::rewriter::{FileRewriter, RewriteOptions};
//!
//! let license = LicenseBlock::from_text("Copyright (c) 2025 Example\n");
//! let options = RewriteOptions::default();
//! let rewriter = FileRewriter::new(&license, &options);
//!
//! let rewrite = rewriter
//!   .rewrite_header("src/BM_Foo.h", "#ifndef X\n#define X\nclass Foo {\n};\n#endif\n")
//!   .expect("header has an include guard");
//! assert!(rewrite.content.contains("#ifndef BM_FooH\n#define BM_FooH\n"));
//! assert!(rewrite.mismatch.is_none());
//! ```
//!
//! ## Modules
//!
//! * [`rewriter`] - Guard derivation, declaration scanning and splicing
//! * [`processor`] - Batch processing with file discovery and atomic writes
//! * [`license`] - Building the license comment block
//! * [`config`] - Configuration file and command-line overrides
//! * [`logging`] - Output modes and tracing setup

pub mod config;
pub mod diff;
pub mod license;
pub mod logging;
pub mod output;
pub mod processor;
pub mod report;
pub mod rewriter;
