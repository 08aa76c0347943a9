//! Include-guard name derivation.

/// Derives the canonical include-guard token for a header path.
///
/// Backslashes are normalized to `/`, everything up to the last `/` is
/// dropped, the extension (from the last `.` of the file name) is stripped and
/// `suffix` is appended. `src\BM_Block.h` with suffix `H` yields `BM_BlockH`.
///
/// There is no error path: a path without an extension keeps its whole file
/// name, and an empty path yields just the suffix.
pub fn derive_guard(path: &str, suffix: &str) -> String {
  let normalized = path.replace('\\', "/");
  let file_name = match normalized.rfind('/') {
    Some(pos) => &normalized[pos + 1..],
    None => normalized.as_str(),
  };

  let stem = match file_name.rfind('.') {
    Some(pos) if pos > 0 => &file_name[..pos],
    _ => file_name,
  };

  format!("{stem}{suffix}")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_plain_file_name() {
    assert_eq!(derive_guard("BM_Block.h", "H"), "BM_BlockH");
  }

  #[test]
  fn test_strips_directories() {
    assert_eq!(derive_guard("../src/BM_Socket.h", "H"), "BM_SocketH");
    assert_eq!(derive_guard("/abs/deeply/nested/dir/BM_Socket.h", "H"), "BM_SocketH");
  }

  #[test]
  fn test_windows_separators() {
    assert_eq!(derive_guard("..\\src\\BM_Network.h", "H"), "BM_NetworkH");
    assert_eq!(derive_guard("C:\\work/mixed\\BM_Network.h", "H"), "BM_NetworkH");
  }

  #[test]
  fn test_same_name_at_any_depth() {
    let expected = derive_guard("BM_Globals.h", "H");
    for path in ["a/BM_Globals.h", "a/b/c/BM_Globals.h", "a\\b\\BM_Globals.h"] {
      assert_eq!(derive_guard(path, "H"), expected, "path: {path}");
    }
  }

  #[test]
  fn test_longer_extension() {
    assert_eq!(derive_guard("include/Widget.hpp", "H"), "WidgetH");
  }

  #[test]
  fn test_only_last_extension_is_stripped() {
    assert_eq!(derive_guard("BlockMod-mainpage.in.h", "H"), "BlockMod-mainpage.inH");
  }

  #[test]
  fn test_custom_suffix() {
    assert_eq!(derive_guard("src/Foo.h", "_H"), "Foo_H");
  }

  #[test]
  fn test_malformed_paths_do_not_panic() {
    assert_eq!(derive_guard("", "H"), "H");
    assert_eq!(derive_guard("src/", "H"), "H");
    assert_eq!(derive_guard("Makefile", "H"), "MakefileH");
    assert_eq!(derive_guard(".hidden", "H"), ".hiddenH");
  }
}
