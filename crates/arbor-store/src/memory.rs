use crate::error::{StoreError, StoreResult};
use crate::key::normalize_key;
use crate::traits::BlobStore;

/// In-memory, `Vec`-backed blob store.
///
/// Intended for tests and embedding. Keys are normalized on insert and keep
/// insertion order; inserting an existing key replaces its blob in place.
#[derive(Clone, Debug, Default)]
pub struct InMemoryBlobStore {
    keys: Vec<String>,
    blobs: Vec<Vec<u8>>,
}

impl InMemoryBlobStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from `(key, blob)` pairs.
    pub fn from_entries<K, B>(entries: impl IntoIterator<Item = (K, B)>) -> Self
    where
        K: AsRef<str>,
        B: Into<Vec<u8>>,
    {
        let mut store = Self::new();
        for (key, blob) in entries {
            store.insert(key.as_ref(), blob);
        }
        store
    }

    /// Add or replace a blob. Returns its index.
    pub fn insert(&mut self, key: &str, blob: impl Into<Vec<u8>>) -> usize {
        let key = normalize_key(key);
        let blob = blob.into();
        match self.keys.iter().position(|k| *k == key) {
            Some(index) => {
                self.blobs[index] = blob;
                index
            }
            None => {
                self.keys.push(key);
                self.blobs.push(blob);
                self.keys.len() - 1
            }
        }
    }

    /// Total bytes across all blobs.
    pub fn total_bytes(&self) -> u64 {
        self.blobs.iter().map(|b| b.len() as u64).sum()
    }
}

impl BlobStore for InMemoryBlobStore {
    fn keys(&self) -> &[String] {
        &self.keys
    }

    fn read(&self, index: usize) -> StoreResult<Vec<u8>> {
        self.blobs
            .get(index)
            .cloned()
            .ok_or(StoreError::IndexOutOfRange {
                index,
                len: self.blobs.len(),
            })
    }
}
