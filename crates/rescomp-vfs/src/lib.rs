//! Virtual filesystem builder for embedded resources.
//!
//! Builds the in-memory folder/file tree that a manifest describes:
//! idempotent folder materialization, duplicate-checked file insertion,
//! ordered metadata lists and lazy loading of file contents.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod mime;
pub mod types;
pub mod vfs;

pub use types::{FileId, FolderId, Metadata, MetadataEntry, VfsFile, VfsFolder};
pub use vfs::Vfs;
