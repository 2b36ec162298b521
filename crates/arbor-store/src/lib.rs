//! Keyed blob stores for Arbor.
//!
//! A blob store enumerates immutable byte blobs addressed by normalized,
//! slash-separated keys (`/a/b.bin`). The key list is fixed when the store
//! is opened and defines index-based access.
//!
//! # Storage Backends
//!
//! All backends implement the [`BlobStore`] trait:
//!
//! - [`DirectoryReader`] -- a local directory tree, scanned once on open
//! - [`InMemoryBlobStore`] -- `Vec`-backed store for tests and embedding
//!
//! # Design Rules
//!
//! 1. Keys start with `/`, use `/` as separator, and never contain `//` or a trailing `/`.
//! 2. The key list never changes after construction.
//! 3. Blob contents are never cached; every read goes to the backend.
//! 4. All I/O errors are propagated, never silently ignored.

pub mod directory;
pub mod error;
pub mod key;
pub mod memory;
pub mod traits;

pub use directory::DirectoryReader;
pub use error::{StoreError, StoreResult};
pub use key::normalize_key;
pub use memory::InMemoryBlobStore;
pub use traits::BlobStore;
