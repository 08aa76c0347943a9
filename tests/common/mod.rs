#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tempfile::TempDir;

pub const LICENSE_TEXT: &str = "BSD 3-Clause License\n\nCopyright (c) 2019, Test\n";

/// The comment block `LICENSE_TEXT` turns into, followed by its blank
/// separator line.
pub const LICENSE_PREFIX: &str = "/*\tBSD 3-Clause License\n\n\tCopyright (c) 2019, Test\n*/\n\n";

pub const LEGACY_HEADER: &str = "/* old license\n   spanning lines */\n\n#ifndef BM_FOO_H\n#define BM_FOO_H\n\nclass Foo {\n};\n\n#endif // BM_FOO_H\n";

pub const LEGACY_SOURCE: &str = "// old license\n\n#include \"BM_Foo.h\"\n\nint x = 0;\n";

/// What `LEGACY_HEADER` becomes when saved as `BM_Foo.h`.
pub fn canonical_header() -> String {
  format!("{LICENSE_PREFIX}#ifndef BM_FooH\n#define BM_FooH\n\nclass Foo {{\n}};\n\n#endif // BM_FooH\n")
}

/// What `LEGACY_SOURCE` becomes.
pub fn canonical_source() -> String {
  format!("{LICENSE_PREFIX}#include \"BM_Foo.h\"\n\nint x = 0;\n")
}

/// A temporary directory holding a `LICENSE` file.
pub fn setup_workspace() -> Result<TempDir> {
  let temp_dir = tempfile::tempdir()?;
  fs::write(temp_dir.path().join("LICENSE"), LICENSE_TEXT)?;
  Ok(temp_dir)
}

/// Writes `content` to `name` inside `dir`, creating parent directories.
pub fn write_file(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
  let path = dir.join(name);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(&path, content)?;
  Ok(path)
}
