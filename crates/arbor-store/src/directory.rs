//! Directory-backed blob store.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::{StoreError, StoreResult};
use crate::key::{key_to_path, normalize_key};
use crate::traits::BlobStore;

/// Read-only blob store over a local directory tree.
///
/// The directory is scanned once by [`DirectoryReader::open`]. Within each
/// directory, files are visited before subdirectories and both are sorted by
/// name, so the key order is deterministic for a given tree. Later changes to
/// the directory are not picked up; a file removed after the scan surfaces as
/// an I/O error on read.
pub struct DirectoryReader {
    root: PathBuf,
    keys: Vec<String>,
}

impl DirectoryReader {
    /// Scan `root` recursively and collect a key for every regular file.
    pub fn open(root: impl AsRef<Path>) -> StoreResult<Self> {
        let given = root.as_ref();
        let root = std::fs::canonicalize(given)
            .map_err(|_| StoreError::NotFound(given.to_path_buf()))?;
        if !root.is_dir() {
            return Err(StoreError::NotFound(given.to_path_buf()));
        }

        let mut keys = Vec::new();
        for entry in WalkDir::new(&root).min_depth(1).sort_by(files_first) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&root) else {
                continue;
            };
            match relative.to_str() {
                Some(relative) => keys.push(normalize_key(relative)),
                None => warn!("skipping non UTF-8 path {:?}", entry.path()),
            }
        }

        debug!(root = %root.display(), keys = keys.len(), "scanned directory store");
        Ok(Self { root, keys })
    }

    /// The canonical store root.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

impl BlobStore for DirectoryReader {
    fn keys(&self) -> &[String] {
        &self.keys
    }

    fn read(&self, index: usize) -> StoreResult<Vec<u8>> {
        let key = self.keys.get(index).ok_or(StoreError::IndexOutOfRange {
            index,
            len: self.keys.len(),
        })?;
        Ok(std::fs::read(key_to_path(&self.root, key))?)
    }
}

impl std::fmt::Debug for DirectoryReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryReader")
            .field("root", &self.root)
            .field("key_count", &self.keys.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(root: &Path, rel: &str, content: &[u8]) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn scenario_files_and_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "x.bin", &[1, 2, 3, 4]);
        write(dir.path(), "sub/y.bin", &[5, 6]);

        let store = DirectoryReader::open(dir.path()).unwrap();
        assert_eq!(store.keys(), &["/x.bin", "/sub/y.bin"]);
        assert_eq!(store.read(0).unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(store.read(1).unwrap(), vec![5, 6]);
    }

    #[test]
    fn keys_are_normalized() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a/b.txt", b"b");
        write(dir.path(), "a//c.txt", b"c");

        let store = DirectoryReader::open(dir.path()).unwrap();
        assert_eq!(store.keys(), &["/a/b.txt", "/a/c.txt"]);
        for key in store.keys() {
            assert!(key.starts_with('/'));
            assert!(!key.contains("//"));
            assert!(!key.ends_with('/'));
        }
    }

    #[test]
    fn directories_are_not_keys() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("empty/nested")).unwrap();
        write(dir.path(), "deep/er/z.bin", b"z");

        let store = DirectoryReader::open(dir.path()).unwrap();
        assert_eq!(store.keys(), &["/deep/er/z.bin"]);
    }

    #[test]
    fn read_by_key() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "sub/y.bin", b"yy");

        let store = DirectoryReader::open(dir.path()).unwrap();
        assert_eq!(store.read_key("sub//y.bin").unwrap(), b"yy");
        assert!(matches!(
            store.read_key("/missing"),
            Err(StoreError::UnknownKey(_))
        ));
    }

    #[test]
    fn index_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "only.bin", b"1");

        let store = DirectoryReader::open(dir.path()).unwrap();
        assert!(matches!(
            store.read(1),
            Err(StoreError::IndexOutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn missing_root_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = DirectoryReader::open(dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn file_root_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "plain.bin", b"p");
        let err = DirectoryReader::open(dir.path().join("plain.bin")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn file_removed_after_scan_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "gone.bin", b"g");

        let store = DirectoryReader::open(dir.path()).unwrap();
        fs::remove_file(dir.path().join("gone.bin")).unwrap();
        assert!(matches!(store.read(0), Err(StoreError::Io(_))));
    }

    #[test]
    fn reads_are_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "v.bin", b"old");

        let store = DirectoryReader::open(dir.path()).unwrap();
        assert_eq!(store.read(0).unwrap(), b"old");
        write(dir.path(), "v.bin", b"new");
        assert_eq!(store.read(0).unwrap(), b"new");
    }

    #[test]
    fn empty_directory_has_no_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirectoryReader::open(dir.path()).unwrap();
        assert!(store.is_empty());
    }
}
