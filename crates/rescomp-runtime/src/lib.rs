//! Runtime navigation for rescomp resource trees.
//!
//! A [`ResourceTree`] is the immutable, index-linked form of an embedded
//! resource tree: the same layout the code generator emits as C data. This
//! crate walks it: path lookup, metadata queries, pre-order iteration,
//! counting, zero-copy streams, and a caller-owned [`MountTable`] that
//! routes path prefixes to independently generated trees.
//!
//! # Features
//!
//! - `stream` (default): [`File::open`] returns a [`FileStream`] over the
//!   embedded bytes. Without it, opening always returns `None`.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod mount;
mod navigate;
mod stream;
mod tree;

pub use mount::{Mount, MountTable};
pub use navigate::{File, Folder};
pub use stream::FileStream;
pub use tree::{FileRecord, FolderRecord, MetadataEntry, ResourceTree, get_metadata};
