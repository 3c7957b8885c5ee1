//! Immutable, index-linked resource tree.
//!
//! The tree mirrors the layout of the generated C data: folders live in one
//! array, files in another, and relations are indices instead of pointers.
//! A folder's children occupy the contiguous index range
//! `children_start..children_start + child_count`, and its files the range
//! `files_start..files_start + file_count`.

use crate::navigate::Folder;
use rescomp_core::{Error, Result};
use std::ops::Range;

/// A metadata key/value pair attached to a file or folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataEntry {
    /// Metadata key
    pub key: String,
    /// Metadata value
    pub value: String,
}

impl MetadataEntry {
    /// Creates an entry.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Returns the value of the first entry whose key equals `key`.
///
/// # Examples
///
/// ```
/// use rescomp_runtime::{MetadataEntry, get_metadata};
///
/// let entries = [MetadataEntry::new("lang", "en"), MetadataEntry::new("lang", "fr")];
/// assert_eq!(get_metadata(&entries, "lang"), Some("en"));
/// assert_eq!(get_metadata(&entries, "size"), None);
/// ```
#[must_use]
pub fn get_metadata<'a>(entries: &'a [MetadataEntry], key: &str) -> Option<&'a str> {
    entries
        .iter()
        .find(|entry| entry.key == key)
        .map(|entry| entry.value.as_str())
}

/// One embedded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Leaf name
    pub name: String,
    /// Full virtual path
    pub path: String,
    /// MIME type
    pub mime: String,
    /// Embedded contents
    pub data: Vec<u8>,
    /// Index of the containing folder
    pub parent: usize,
    /// Metadata in original order
    pub metadata: Vec<MetadataEntry>,
}

/// One folder with index ranges into the tree's folder and file arrays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderRecord {
    /// Leaf name (empty for the root)
    pub name: String,
    /// Full virtual path (empty for the root)
    pub path: String,
    /// Index of the parent folder, `None` for the root
    pub parent: Option<usize>,
    /// Index of the first child folder
    pub children_start: usize,
    /// Number of child folders
    pub child_count: usize,
    /// Index of the first file
    pub files_start: usize,
    /// Number of files
    pub file_count: usize,
    /// Metadata in original order
    pub metadata: Vec<MetadataEntry>,
}

impl FolderRecord {
    fn child_range(&self) -> Range<usize> {
        self.children_start..self.children_start.saturating_add(self.child_count)
    }

    fn file_range(&self) -> Range<usize> {
        self.files_start..self.files_start.saturating_add(self.file_count)
    }
}

/// A validated, read-only resource tree. Folder 0 is the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceTree {
    folders: Vec<FolderRecord>,
    files: Vec<FileRecord>,
}

impl ResourceTree {
    /// Builds a tree from its folder and file arrays.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the arrays break the layout
    /// contract: no root at index 0, a range out of bounds, a child or
    /// file whose parent index does not point back at its folder, or a
    /// folder or file outside its parent's range.
    ///
    /// Every folder must come after its parent and before its children,
    /// so parent chains end at the root and recursive walks terminate.
    pub fn new(folders: Vec<FolderRecord>, files: Vec<FileRecord>) -> Result<Self> {
        let invalid = |message: String| Err(Error::InvalidArgument(message));

        match folders.first() {
            None => return invalid("resource tree has no root folder".to_string()),
            Some(root) if root.parent.is_some() => {
                return invalid("folder 0 must be the root".to_string());
            }
            Some(_) => {}
        }

        for (index, folder) in folders.iter().enumerate() {
            if index > 0 {
                match folder.parent {
                    None => return invalid(format!("folder {index} has no parent")),
                    Some(parent) if parent >= index => {
                        return invalid(format!("folder {index} precedes its parent {parent}"));
                    }
                    Some(parent) if !folders[parent].child_range().contains(&index) => {
                        return invalid(format!(
                            "folder {index} is outside the children of folder {parent}"
                        ));
                    }
                    Some(_) => {}
                }
            }
            if folder.child_count > 0 && folder.children_start <= index {
                return invalid(format!("children of folder {index} precede it"));
            }

            let children = folder.child_range();
            if children.end > folders.len() {
                return invalid(format!("children of folder {index} out of bounds"));
            }
            if let Some(child) = children.clone().find(|&c| folders[c].parent != Some(index)) {
                return invalid(format!("folder {child} is not a child of folder {index}"));
            }

            let owned = folder.file_range();
            if owned.end > files.len() {
                return invalid(format!("files of folder {index} out of bounds"));
            }
            if let Some(file) = owned.clone().find(|&f| files[f].parent != index) {
                return invalid(format!("file {file} is not in folder {index}"));
            }
        }

        for (index, file) in files.iter().enumerate() {
            let owned = folders
                .get(file.parent)
                .is_some_and(|folder| folder.file_range().contains(&index));
            if !owned {
                return invalid(format!("file {index} is outside the files of its folder"));
            }
        }

        Ok(Self { folders, files })
    }

    /// Returns a handle to the root folder.
    #[must_use]
    pub fn root(&self) -> Folder<'_> {
        Folder::new(self, 0)
    }

    /// Returns every folder record, root first.
    #[must_use]
    pub fn folders(&self) -> &[FolderRecord] {
        &self.folders
    }

    /// Returns every file record.
    #[must_use]
    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }
}
