//! Core types for the virtual filesystem.
//!
//! Folders and files live in arenas owned by [`Vfs`](crate::Vfs) and refer
//! to each other through [`FolderId`] / [`FileId`] handles, so the
//! parent back-references never own anything.
//!
//! # Examples
//!
//! ```
//! use rescomp_vfs::Metadata;
//!
//! let mut metadata = Metadata::new();
//! metadata.push("lang", "en");
//! metadata.push("lang", "de");
//!
//! // First match wins
//! assert_eq!(metadata.get("lang"), Some("en"));
//! assert_eq!(metadata.len(), 2);
//! ```

use std::path::{Path, PathBuf};

/// Handle to a folder stored in a [`Vfs`](crate::Vfs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FolderId(pub(crate) usize);

impl FolderId {
    /// The root folder of every tree.
    pub const ROOT: Self = Self(0);

    /// Returns the arena index of this folder.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }

    /// Returns `true` for the root folder.
    #[must_use]
    pub const fn is_root(self) -> bool {
        self.0 == 0
    }
}

/// Handle to a file stored in a [`Vfs`](crate::Vfs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub(crate) usize);

impl FileId {
    /// Returns the arena index of this file.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A single metadata key/value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataEntry {
    /// Metadata key
    pub key: String,
    /// Metadata value
    pub value: String,
}

/// Ordered, append-only metadata list.
///
/// Keys are not required to be unique. Lookup returns the first entry with
/// a matching key, so an earlier entry shadows later ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: Vec<MetadataEntry>,
}

impl Metadata {
    /// Creates an empty metadata list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an entry, preserving insertion order.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push(MetadataEntry {
            key: key.into(),
            value: value.into(),
        });
    }

    /// Returns the value of the first entry with the given key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.value.as_str())
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &MetadataEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Metadata {
    type Item = &'a MetadataEntry;
    type IntoIter = std::slice::Iter<'a, MetadataEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A file in the virtual filesystem.
///
/// `path` always equals the parent folder's path joined with `name`
/// (or just `name` when the parent is the root).
#[derive(Debug, Clone)]
pub struct VfsFile {
    pub(crate) name: String,
    pub(crate) path: String,
    pub(crate) source_path: Option<PathBuf>,
    pub(crate) mime: String,
    pub(crate) data: Option<Vec<u8>>,
    pub(crate) metadata: Metadata,
    pub(crate) parent: FolderId,
}

impl VfsFile {
    /// Returns the leaf name of the file.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the full virtual path (no leading slash).
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the real filesystem path the contents are loaded from.
    #[must_use]
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Returns the MIME type.
    #[must_use]
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Overrides the auto-detected MIME type.
    pub fn set_mime(&mut self, mime: impl Into<String>) {
        self.mime = mime.into();
    }

    /// Returns the loaded contents, or `None` before loading.
    #[must_use]
    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    /// Returns `true` once the contents have been loaded.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.data.is_some()
    }

    /// Returns the size of the loaded contents in bytes (0 before loading).
    #[must_use]
    pub fn size(&self) -> usize {
        self.data.as_ref().map_or(0, Vec::len)
    }

    /// Returns the metadata list.
    #[must_use]
    pub const fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Returns the metadata list for appending.
    pub const fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    /// Returns the containing folder.
    #[must_use]
    pub const fn parent(&self) -> FolderId {
        self.parent
    }
}

/// A folder in the virtual filesystem.
#[derive(Debug, Clone)]
pub struct VfsFolder {
    pub(crate) name: String,
    pub(crate) path: String,
    pub(crate) parent: Option<FolderId>,
    pub(crate) children: Vec<FolderId>,
    pub(crate) files: Vec<FileId>,
    pub(crate) metadata: Metadata,
}

impl VfsFolder {
    pub(crate) fn new(name: String, path: String, parent: Option<FolderId>) -> Self {
        Self {
            name,
            path,
            parent,
            children: Vec::new(),
            files: Vec::new(),
            metadata: Metadata::new(),
        }
    }

    /// Returns the leaf name (empty for the root).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the full virtual path (empty for the root).
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the parent folder, `None` for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<FolderId> {
        self.parent
    }

    /// Returns the child folders in first-seen order.
    #[must_use]
    pub fn children(&self) -> &[FolderId] {
        &self.children
    }

    /// Returns the files in insertion order.
    #[must_use]
    pub fn files(&self) -> &[FileId] {
        &self.files
    }

    /// Returns the number of direct child folders.
    #[must_use]
    pub fn folder_count(&self) -> usize {
        self.children.len()
    }

    /// Returns the number of files directly in this folder.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Returns the metadata list.
    #[must_use]
    pub const fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Returns the metadata list for appending.
    pub const fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

/// Joins a parent virtual path and a leaf name.
pub(crate) fn child_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}
