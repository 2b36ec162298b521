//! Nested record codec for Arbor.
//!
//! Converts structure-of-arrays [`Record`]s into storage tree [`Group`]s and
//! overlays stored groups back onto existing records.
//!
//! # Layout
//!
//! Each field is stored under its 1-based declaration position (`"1"`,
//! `"2"`, ...). The field's own name travels in the child's `"name"`
//! attribute ([`NAME_ATTR`]), so the storage slot and the logical identity
//! are independent. Columns with a zero-sized element type are not stored.
//!
//! # Key Types
//!
//! - [`Record`] / [`Field`] -- the in-memory structure-of-arrays
//! - [`FieldName`] -- integer or symbolic field identity
//! - [`store`] / [`load_into`] -- the two directions of the codec
//! - [`layout_of`] -- a zero-filled record matching a stored group
//!
//! [`Group`]: arbor_tree::Group

pub mod error;
pub mod layout;
pub mod load;
pub mod name;
pub mod record;
pub mod store;

pub use error::{CodecError, CodecResult};
pub use layout::layout_of;
pub use load::load_into;
pub use name::{FieldName, NAME_ATTR};
pub use record::{Field, Record};
pub use store::store;
