//! Virtual filesystem tree construction.
//!
//! [`Vfs`] owns every folder and file of one resource tree. Folders are
//! materialized idempotently from `/`-separated virtual paths, files are
//! inserted with duplicate detection, and file contents are loaded lazily
//! from their real source paths.
//!
//! # Examples
//!
//! ```
//! use rescomp_vfs::{FolderId, Vfs};
//!
//! let mut vfs = Vfs::new();
//! let images = vfs.ensure_folder("assets/images");
//! vfs.add_file_from_bytes(images, "icon.png", vec![0x89, 0x50]).unwrap();
//!
//! assert_eq!(vfs.ensure_folder("assets/images"), images);
//! let file = vfs.find_file("assets/images/icon.png").unwrap();
//! assert_eq!(vfs.file(file).mime(), "image/png");
//! assert_eq!(vfs.folder(FolderId::ROOT).folder_count(), 1);
//! ```

use crate::mime;
use crate::types::{FileId, FolderId, VfsFile, VfsFolder, child_path};
use rescomp_core::{Error, Result};
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;

/// An in-memory virtual filesystem tree.
///
/// Exactly one root exists (empty name and path, no parent). Sibling
/// folders have unique names, as do sibling files.
#[derive(Debug, Clone)]
pub struct Vfs {
    folders: Vec<VfsFolder>,
    files: Vec<VfsFile>,
}

impl Vfs {
    /// Creates a tree containing only the root folder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            folders: vec![VfsFolder::new(String::new(), String::new(), None)],
            files: Vec::new(),
        }
    }

    /// Returns the root folder handle.
    #[must_use]
    pub const fn root(&self) -> FolderId {
        FolderId::ROOT
    }

    /// Returns the folder for a handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle does not belong to this tree.
    #[must_use]
    pub fn folder(&self, id: FolderId) -> &VfsFolder {
        &self.folders[id.0]
    }

    /// Returns the folder for a handle, mutably.
    ///
    /// # Panics
    ///
    /// Panics if the handle does not belong to this tree.
    pub fn folder_mut(&mut self, id: FolderId) -> &mut VfsFolder {
        &mut self.folders[id.0]
    }

    /// Returns the file for a handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle does not belong to this tree.
    #[must_use]
    pub fn file(&self, id: FileId) -> &VfsFile {
        &self.files[id.0]
    }

    /// Returns the file for a handle, mutably.
    ///
    /// # Panics
    ///
    /// Panics if the handle does not belong to this tree.
    pub fn file_mut(&mut self, id: FileId) -> &mut VfsFile {
        &mut self.files[id.0]
    }

    /// Returns the total number of folders, including the root.
    #[must_use]
    pub fn folder_len(&self) -> usize {
        self.folders.len()
    }

    /// Returns the total number of files.
    #[must_use]
    pub fn file_len(&self) -> usize {
        self.files.len()
    }

    fn child_folder(&self, parent: FolderId, name: &str) -> Option<FolderId> {
        self.folders[parent.0]
            .children
            .iter()
            .copied()
            .find(|&child| self.folders[child.0].name == name)
    }

    fn child_file(&self, parent: FolderId, name: &str) -> Option<FileId> {
        self.folders[parent.0]
            .files
            .iter()
            .copied()
            .find(|&file| self.files[file.0].name == name)
    }

    /// Returns the child folder `name` of `parent`, creating it if needed.
    ///
    /// New folders are appended after their existing siblings.
    pub fn add_folder(&mut self, parent: FolderId, name: &str) -> FolderId {
        if let Some(existing) = self.child_folder(parent, name) {
            return existing;
        }

        let path = child_path(&self.folders[parent.0].path, name);
        let id = FolderId(self.folders.len());
        self.folders
            .push(VfsFolder::new(name.to_string(), path, Some(parent)));
        self.folders[parent.0].children.push(id);
        id
    }

    /// Walks `path` from the root, creating every missing component.
    ///
    /// Empty segments are skipped, so `""` and `"/"` both return the root.
    /// Calling this twice with the same path returns the same folder.
    pub fn ensure_folder(&mut self, path: &str) -> FolderId {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .fold(FolderId::ROOT, |current, segment| {
                self.add_folder(current, segment)
            })
    }

    /// Adds a file whose contents will be loaded from `source_path`.
    ///
    /// The MIME type is detected from the name's extension and may be
    /// overridden afterwards with [`VfsFile::set_mime`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Duplicate`] if `parent` already has a file named
    /// `name`. The existing file is left untouched.
    pub fn add_file(
        &mut self,
        parent: FolderId,
        name: &str,
        source_path: impl AsRef<Path>,
    ) -> Result<FileId> {
        let id = self.insert_file(parent, name)?;
        self.files[id.0].source_path = Some(source_path.as_ref().to_path_buf());
        Ok(id)
    }

    /// Adds a file with in-memory contents and no source path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Duplicate`] if `parent` already has a file named
    /// `name`.
    pub fn add_file_from_bytes(
        &mut self,
        parent: FolderId,
        name: &str,
        data: impl Into<Vec<u8>>,
    ) -> Result<FileId> {
        let id = self.insert_file(parent, name)?;
        self.files[id.0].data = Some(data.into());
        Ok(id)
    }

    fn insert_file(&mut self, parent: FolderId, name: &str) -> Result<FileId> {
        let path = child_path(&self.folders[parent.0].path, name);
        if self.child_file(parent, name).is_some() {
            return Err(Error::Duplicate { path });
        }

        debug!(path = %path, "adding file");
        let id = FileId(self.files.len());
        self.files.push(VfsFile {
            name: name.to_string(),
            path,
            source_path: None,
            mime: mime::from_path(name).to_string(),
            data: None,
            metadata: crate::Metadata::new(),
            parent,
        });
        self.folders[parent.0].files.push(id);
        Ok(id)
    }

    /// Looks up a folder by virtual path.
    ///
    /// `""` resolves to the root; empty segments are ignored.
    #[must_use]
    pub fn find_folder(&self, path: &str) -> Option<FolderId> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(FolderId::ROOT, |current, segment| {
                self.child_folder(current, segment)
            })
    }

    /// Looks up a file by virtual path.
    ///
    /// A path naming a folder yields `None`, even when a sibling file has
    /// the same name.
    #[must_use]
    pub fn find_file(&self, path: &str) -> Option<FileId> {
        if self.find_folder(path).is_some() {
            return None;
        }
        match path.rsplit_once('/') {
            None => self.child_file(FolderId::ROOT, path),
            Some((folder, name)) => {
                let folder = self.find_folder(folder)?;
                self.child_file(folder, name)
            }
        }
    }

    /// Returns every file in pre-order: a folder's own files first, then
    /// each child subtree in order.
    #[must_use]
    pub fn files_preorder(&self) -> Vec<FileId> {
        let mut out = Vec::with_capacity(self.files.len());
        self.collect_files(FolderId::ROOT, &mut out);
        out
    }

    fn collect_files(&self, folder: FolderId, out: &mut Vec<FileId>) {
        let folder = &self.folders[folder.0];
        out.extend_from_slice(&folder.files);
        for &child in &folder.children {
            self.collect_files(child, out);
        }
    }

    /// Loads the contents of one file from its source path.
    ///
    /// Does nothing if the contents are already loaded.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if the file has neither data nor a source path
    /// - [`Error::OutOfMemory`] if the buffer cannot be reserved
    /// - [`Error::Io`] if the read fails or returns fewer bytes than expected
    pub fn load_file_data(&mut self, id: FileId) -> Result<()> {
        let file = &mut self.files[id.0];
        if file.data.is_some() {
            return Ok(());
        }

        let Some(source) = file.source_path.as_deref() else {
            return Err(Error::InvalidArgument(format!(
                "file '{}' has no source path",
                file.path
            )));
        };

        let data = read_source(source)?;
        debug!(path = %file.path, source = %source.display(), size = data.len(), "loaded file data");
        file.data = Some(data);
        Ok(())
    }

    /// Loads the contents of every file in the tree.
    ///
    /// The first failure aborts the pass; files loaded before it keep
    /// their data but the tree must be treated as unusable.
    ///
    /// # Errors
    ///
    /// Returns the first error from [`Vfs::load_file_data`].
    pub fn load_all_data(&mut self) -> Result<()> {
        for id in self.files_preorder() {
            self.load_file_data(id)?;
        }
        Ok(())
    }
}

impl Default for Vfs {
    fn default() -> Self {
        Self::new()
    }
}

fn read_source(path: &Path) -> Result<Vec<u8>> {
    let mut handle = fs::File::open(path).map_err(|e| Error::io(path, e))?;
    let expected = handle.metadata().map_err(|e| Error::io(path, e))?.len();

    let out_of_memory = || Error::OutOfMemory {
        path: path.to_path_buf(),
        requested: expected,
    };
    let capacity = usize::try_from(expected).map_err(|_| out_of_memory())?;
    let mut data = Vec::new();
    data.try_reserve_exact(capacity).map_err(|_| out_of_memory())?;

    handle
        .read_to_end(&mut data)
        .map_err(|e| Error::io(path, e))?;

    if u64::try_from(data.len()).ok() != Some(expected) {
        return Err(Error::io(
            path,
            io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("expected {expected} bytes, read {}", data.len()),
            ),
        ));
    }
    Ok(data)
}
