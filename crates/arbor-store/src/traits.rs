use crate::error::{StoreError, StoreResult};
use crate::key::normalize_key;

/// Read-only, index-addressed blob store.
///
/// All implementations must satisfy these invariants:
/// - `keys()` is fixed for the lifetime of the store and in a stable order.
/// - Every key is normalized (see [`normalize_key`]) and maps to exactly one blob.
/// - `read(i)` returns the full content of the blob at `keys()[i]`.
pub trait BlobStore: Send + Sync {
    /// The full ordered key list.
    fn keys(&self) -> &[String];

    /// Read the blob at a zero-based position in [`BlobStore::keys`].
    ///
    /// Returns `Err(StoreError::IndexOutOfRange)` if `index >= len()`.
    fn read(&self, index: usize) -> StoreResult<Vec<u8>>;

    /// Number of blobs in the store.
    fn len(&self) -> usize {
        self.keys().len()
    }

    /// Returns `true` if the store holds no blobs.
    fn is_empty(&self) -> bool {
        self.keys().is_empty()
    }

    /// The key at `index`, if any.
    fn key(&self, index: usize) -> Option<&str> {
        self.keys().get(index).map(String::as_str)
    }

    /// Position of `key` in the key list. The key is normalized first.
    fn position(&self, key: &str) -> Option<usize> {
        let key = normalize_key(key);
        self.keys().iter().position(|k| *k == key)
    }

    /// Read a blob by key rather than by index.
    fn read_key(&self, key: &str) -> StoreResult<Vec<u8>> {
        let index = self
            .position(key)
            .ok_or_else(|| StoreError::UnknownKey(key.to_string()))?;
        self.read(index)
    }
}
