//! Indexing pass: assigns every folder and file its position in the
//! emitted arrays.
//!
//! Folders are numbered so that each folder's children form one
//! contiguous block. The root is index 0. When a folder is visited in
//! pre-order, the next free indices are reserved for all of its children
//! at once, then each child is visited in turn. Files are numbered by a
//! running counter in the same pre-order walk, so a folder's own files are
//! contiguous too.
//!
//! ```text
//! root            -> 0, children 1..3
//! ├── a           -> 1, children 3..4
//! │   └── a/x     -> 3
//! └── b           -> 2, children 4..5
//!     └── b/y     -> 4
//! ```

use rescomp_core::{Error, Result};
use rescomp_runtime::{FileRecord, FolderRecord, MetadataEntry, ResourceTree};
use rescomp_vfs::{FileId, FolderId, Metadata, Vfs, mime};

/// Layout of a single folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FolderSlot {
    /// The folder in the source tree
    pub id: FolderId,
    /// Layout index of the parent, `None` for the root
    pub parent: Option<usize>,
    /// Position of this folder inside its parent's child block
    pub position: usize,
    /// Layout index of the first child
    pub children_start: usize,
    /// Number of children
    pub child_count: usize,
    /// Layout index of the first file
    pub files_start: usize,
    /// Number of files
    pub file_count: usize,
}

/// Result of the indexing pass over a [`Vfs`].
#[derive(Debug, Clone)]
pub struct Layout {
    folders: Vec<FolderSlot>,
    files: Vec<FileId>,
    folder_index: Vec<usize>,
    file_index: Vec<usize>,
}

struct Indexer<'v> {
    vfs: &'v Vfs,
    slots: Vec<Option<FolderSlot>>,
    files: Vec<FileId>,
    next_folder: usize,
}

impl Indexer<'_> {
    fn visit(&mut self, id: FolderId, index: usize, parent: Option<usize>, position: usize) {
        let folder = self.vfs.folder(id);

        let children_start = self.next_folder;
        self.next_folder += folder.folder_count();
        let files_start = self.files.len();
        self.files.extend_from_slice(folder.files());

        self.slots[index] = Some(FolderSlot {
            id,
            parent,
            position,
            children_start,
            child_count: folder.folder_count(),
            files_start,
            file_count: folder.file_count(),
        });

        for (i, &child) in folder.children().iter().enumerate() {
            self.visit(child, children_start + i, Some(index), i);
        }
    }
}

impl Layout {
    /// Runs the indexing pass.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if a folder of the tree is not
    /// reachable from the root.
    pub fn compute(vfs: &Vfs) -> Result<Self> {
        let mut indexer = Indexer {
            vfs,
            slots: vec![None; vfs.folder_len()],
            files: Vec::with_capacity(vfs.file_len()),
            next_folder: 1,
        };
        indexer.visit(FolderId::ROOT, 0, None, 0);

        let folders: Vec<FolderSlot> = indexer
            .slots
            .into_iter()
            .collect::<Option<_>>()
            .ok_or_else(|| Error::InvalidArgument("folder not reachable from root".into()))?;

        let mut folder_index = vec![0; vfs.folder_len()];
        for (index, slot) in folders.iter().enumerate() {
            folder_index[slot.id.index()] = index;
        }
        let mut file_index = vec![0; vfs.file_len()];
        for (index, file) in indexer.files.iter().enumerate() {
            file_index[file.index()] = index;
        }

        tracing::debug!(
            folders = folders.len(),
            files = indexer.files.len(),
            "computed layout"
        );

        Ok(Self {
            folders,
            files: indexer.files,
            folder_index,
            file_index,
        })
    }

    /// Returns the folder slots in layout order (root first).
    #[must_use]
    pub fn folders(&self) -> &[FolderSlot] {
        &self.folders
    }

    /// Returns the files in layout order (pre-order).
    #[must_use]
    pub fn files(&self) -> &[FileId] {
        &self.files
    }

    /// Returns the layout index of a folder.
    #[must_use]
    pub fn folder_index(&self, id: FolderId) -> usize {
        self.folder_index[id.index()]
    }

    /// Returns the layout index of a file.
    #[must_use]
    pub fn file_index(&self, id: FileId) -> usize {
        self.file_index[id.index()]
    }

    /// Lowers the tree into an immutable [`ResourceTree`] with exactly
    /// the structure that is emitted as C data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if a file's data has not been
    /// loaded.
    pub fn to_resource_tree(&self, vfs: &Vfs) -> Result<ResourceTree> {
        let folders = self
            .folders
            .iter()
            .map(|slot| {
                let folder = vfs.folder(slot.id);
                FolderRecord {
                    name: folder.name().to_string(),
                    path: folder.path().to_string(),
                    parent: slot.parent,
                    children_start: slot.children_start,
                    child_count: slot.child_count,
                    files_start: slot.files_start,
                    file_count: slot.file_count,
                    metadata: lower_metadata(folder.metadata()),
                }
            })
            .collect();

        let files = self
            .files
            .iter()
            .map(|&id| {
                let file = vfs.file(id);
                Ok(FileRecord {
                    name: file.name().to_string(),
                    path: file.path().to_string(),
                    mime: effective_mime(file.mime()).to_string(),
                    data: loaded_data(vfs, id)?.to_vec(),
                    parent: self.folder_index(file.parent()),
                    metadata: lower_metadata(file.metadata()),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        ResourceTree::new(folders, files)
    }
}

/// Returns the contents of a file that must already be loaded.
pub(crate) fn loaded_data(vfs: &Vfs, id: FileId) -> Result<&[u8]> {
    let file = vfs.file(id);
    file.data().ok_or_else(|| {
        Error::InvalidArgument(format!("data of '{}' has not been loaded", file.path()))
    })
}

/// MIME type written for a file, falling back to octet-stream.
pub(crate) fn effective_mime(mime: &str) -> &str {
    if mime.is_empty() { mime::OCTET_STREAM } else { mime }
}

fn lower_metadata(metadata: &Metadata) -> Vec<MetadataEntry> {
    metadata
        .iter()
        .map(|entry| MetadataEntry::new(entry.key.as_str(), entry.value.as_str()))
        .collect()
}
