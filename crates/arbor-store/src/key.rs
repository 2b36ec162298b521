//! Key normalization.

use std::path::{Path, PathBuf};

/// Normalize a relative path into a store key.
///
/// Both `/` and the platform separator split segments; empty segments are
/// dropped, so redundant, leading, and trailing separators disappear. The
/// result always starts with a single `/`.
pub fn normalize_key(path: &str) -> String {
    let mut key = String::with_capacity(path.len() + 1);
    for segment in path
        .split(|c: char| c == '/' || std::path::is_separator(c))
        .filter(|s| !s.is_empty())
    {
        key.push('/');
        key.push_str(segment);
    }
    if key.is_empty() {
        key.push('/');
    }
    key
}

/// Resolve a normalized key to a filesystem path under `root`.
pub(crate) fn key_to_path(root: &Path, key: &str) -> PathBuf {
    key.split('/')
        .filter(|s| !s.is_empty())
        .fold(root.to_path_buf(), |path, segment| path.join(segment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_redundant_separators() {
        assert_eq!(normalize_key("a//c.txt"), "/a/c.txt");
        assert_eq!(normalize_key("a///b//c"), "/a/b/c");
    }

    #[test]
    fn strips_leading_and_trailing_separators() {
        assert_eq!(normalize_key("/a/b.txt/"), "/a/b.txt");
        assert_eq!(normalize_key("x.bin"), "/x.bin");
    }

    #[test]
    fn empty_path_is_root() {
        assert_eq!(normalize_key(""), "/");
        assert_eq!(normalize_key("//"), "/");
    }

    #[cfg(windows)]
    #[test]
    fn platform_separators_become_slashes() {
        assert_eq!(normalize_key(r"sub\y.bin"), "/sub/y.bin");
    }

    #[test]
    fn key_resolves_under_root() {
        let root = Path::new("/data");
        assert_eq!(key_to_path(root, "/sub/y.bin"), root.join("sub").join("y.bin"));
    }
}
