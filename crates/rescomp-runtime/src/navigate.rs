//! Read-only navigation over a [`ResourceTree`].
//!
//! [`Folder`] and [`File`] are cheap copyable handles borrowing the tree.
//! Lookups return `None` instead of failing; nothing here mutates.
//!
//! # Examples
//!
//! ```
//! use rescomp_runtime::{FileRecord, FolderRecord, ResourceTree};
//!
//! let root = FolderRecord {
//!     name: String::new(),
//!     path: String::new(),
//!     parent: None,
//!     children_start: 1,
//!     child_count: 0,
//!     files_start: 0,
//!     file_count: 1,
//!     metadata: Vec::new(),
//! };
//! let hello = FileRecord {
//!     name: "hello.txt".into(),
//!     path: "hello.txt".into(),
//!     mime: "text/plain".into(),
//!     data: b"hi".to_vec(),
//!     parent: 0,
//!     metadata: Vec::new(),
//! };
//!
//! let tree = ResourceTree::new(vec![root], vec![hello]).unwrap();
//! let file = tree.root().find_file("hello.txt").unwrap();
//! assert_eq!(file.size(), 2);
//! assert_eq!(file.data(), b"hi");
//! ```

use crate::tree::{FileRecord, FolderRecord, MetadataEntry, ResourceTree, get_metadata};

/// Handle to a folder of a [`ResourceTree`].
#[derive(Debug, Clone, Copy)]
pub struct Folder<'a> {
    tree: &'a ResourceTree,
    index: usize,
}

impl<'a> Folder<'a> {
    pub(crate) const fn new(tree: &'a ResourceTree, index: usize) -> Self {
        Self { tree, index }
    }

    fn record(&self) -> &'a FolderRecord {
        &self.tree.folders()[self.index]
    }

    /// Returns the index of this folder in the tree.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the leaf name (empty for the root).
    #[must_use]
    pub fn name(&self) -> &'a str {
        &self.record().name
    }

    /// Returns the full virtual path (empty for the root).
    #[must_use]
    pub fn path(&self) -> &'a str {
        &self.record().path
    }

    /// Returns `true` for the root folder.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.record().parent.is_none()
    }

    /// Returns the parent folder, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.record().parent.map(|index| Self::new(self.tree, index))
    }

    /// Returns the metadata entries in original order.
    #[must_use]
    pub fn metadata(&self) -> &'a [MetadataEntry] {
        &self.record().metadata
    }

    /// Looks up a metadata value, first match wins.
    #[must_use]
    pub fn get_metadata(&self, key: &str) -> Option<&'a str> {
        get_metadata(self.metadata(), key)
    }

    /// Returns the number of direct child folders.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.record().child_count
    }

    /// Returns the number of files directly in this folder.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.record().file_count
    }

    /// Iterates over the direct child folders.
    pub fn children(&self) -> impl Iterator<Item = Folder<'a>> + use<'a> {
        let record = self.record();
        let tree = self.tree;
        (record.children_start..record.children_start + record.child_count)
            .map(move |index| Folder::new(tree, index))
    }

    /// Iterates over the files directly in this folder.
    pub fn files(&self) -> impl Iterator<Item = File<'a>> + use<'a> {
        let record = self.record();
        let tree = self.tree;
        (record.files_start..record.files_start + record.file_count)
            .map(move |index| File::new(tree, index))
    }

    fn child(&self, name: &str) -> Option<Self> {
        self.children().find(|child| child.name() == name)
    }

    /// Resolves a folder path relative to this folder.
    ///
    /// An empty path returns this folder. Empty segments (leading,
    /// trailing or doubled `/`) are skipped.
    #[must_use]
    pub fn find_folder(&self, path: &str) -> Option<Self> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(*self, |current, segment| current.child(segment))
    }

    /// Resolves a file path relative to this folder.
    ///
    /// A path naming a folder yields `None`, even when the same folder
    /// also holds a file of that name.
    #[must_use]
    pub fn find_file(&self, path: &str) -> Option<File<'a>> {
        if self.find_folder(path).is_some() {
            return None;
        }
        let (folder, name) = match path.rsplit_once('/') {
            None => (*self, path),
            Some((folder, name)) => (self.find_folder(folder)?, name),
        };
        folder.files().find(|file| file.name() == name)
    }

    /// Calls `visit` for each file directly in this folder.
    pub fn foreach_file<F>(&self, mut visit: F)
    where
        F: FnMut(File<'a>),
    {
        self.files().for_each(&mut visit);
    }

    /// Calls `visit` for every file in this subtree in pre-order: the
    /// folder's own files first, then each child subtree in order.
    pub fn foreach_file_recursive<F>(&self, mut visit: F)
    where
        F: FnMut(File<'a>),
    {
        self.walk_files(&mut visit);
    }

    fn walk_files<F>(&self, visit: &mut F)
    where
        F: FnMut(File<'a>),
    {
        self.files().for_each(&mut *visit);
        for child in self.children() {
            child.walk_files(visit);
        }
    }

    /// Counts the files in this subtree.
    #[must_use]
    pub fn count_files(&self) -> usize {
        self.file_count()
            + self
                .children()
                .map(|child| child.count_files())
                .sum::<usize>()
    }

    /// Counts the folders below this one, excluding itself.
    #[must_use]
    pub fn count_folders(&self) -> usize {
        self.child_count()
            + self
                .children()
                .map(|child| child.count_folders())
                .sum::<usize>()
    }
}

/// Handle to a file of a [`ResourceTree`].
#[derive(Debug, Clone, Copy)]
pub struct File<'a> {
    tree: &'a ResourceTree,
    index: usize,
}

impl<'a> File<'a> {
    pub(crate) const fn new(tree: &'a ResourceTree, index: usize) -> Self {
        Self { tree, index }
    }

    fn record(&self) -> &'a FileRecord {
        &self.tree.files()[self.index]
    }

    /// Returns the index of this file in the tree.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the leaf name.
    #[must_use]
    pub fn name(&self) -> &'a str {
        &self.record().name
    }

    /// Returns the full virtual path.
    #[must_use]
    pub fn path(&self) -> &'a str {
        &self.record().path
    }

    /// Returns the MIME type.
    #[must_use]
    pub fn mime(&self) -> &'a str {
        &self.record().mime
    }

    /// Returns the embedded contents.
    #[must_use]
    pub fn data(&self) -> &'a [u8] {
        &self.record().data
    }

    /// Returns the size of the contents in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.record().data.len()
    }

    /// Returns the metadata entries in original order.
    #[must_use]
    pub fn metadata(&self) -> &'a [MetadataEntry] {
        &self.record().metadata
    }

    /// Looks up a metadata value, first match wins.
    #[must_use]
    pub fn get_metadata(&self, key: &str) -> Option<&'a str> {
        get_metadata(self.metadata(), key)
    }

    /// Returns the containing folder.
    #[must_use]
    pub fn parent(&self) -> Folder<'a> {
        Folder::new(self.tree, self.record().parent)
    }

    /// Returns the root of the tree this file belongs to, found by walking
    /// parent links upward.
    #[must_use]
    pub fn root(&self) -> Folder<'a> {
        let mut folder = self.parent();
        while let Some(parent) = folder.parent() {
            folder = parent;
        }
        folder
    }
}

impl PartialEq for Folder<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.index == other.index
    }
}

impl Eq for Folder<'_> {}

impl PartialEq for File<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.index == other.index
    }
}

impl Eq for File<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder(
        name: &str,
        path: &str,
        parent: Option<usize>,
        children: (usize, usize),
        files: (usize, usize),
    ) -> FolderRecord {
        FolderRecord {
            name: name.to_string(),
            path: path.to_string(),
            parent,
            children_start: children.0,
            child_count: children.1,
            files_start: files.0,
            file_count: files.1,
            metadata: Vec::new(),
        }
    }

    fn file(path: &str, parent: usize, data: &[u8]) -> FileRecord {
        FileRecord {
            name: path.rsplit('/').next().unwrap_or(path).to_string(),
            path: path.to_string(),
            mime: "text/plain".to_string(),
            data: data.to_vec(),
            parent,
            metadata: vec![MetadataEntry::new("k", "1"), MetadataEntry::new("k", "2")],
        }
    }

    /// root
    /// ├── top.txt
    /// ├── a/
    /// │   ├── b/
    /// │   │   └── c.txt
    /// │   └── a.txt
    /// └── z/
    ///     └── z.txt
    fn sample() -> ResourceTree {
        let folders = vec![
            folder("", "", None, (1, 2), (0, 1)),
            folder("a", "a", Some(0), (3, 1), (1, 1)),
            folder("z", "z", Some(0), (4, 0), (3, 1)),
            folder("b", "a/b", Some(1), (4, 0), (2, 1)),
        ];
        let files = vec![
            file("top.txt", 0, b"top"),
            file("a/a.txt", 1, b"a"),
            file("a/b/c.txt", 3, b"ccc"),
            file("z/z.txt", 2, b""),
        ];
        ResourceTree::new(folders, files).unwrap()
    }

    #[test]
    fn test_find_folder() {
        let tree = sample();
        let root = tree.root();
        assert_eq!(root.find_folder(""), Some(root));
        assert_eq!(root.find_folder("a/b").unwrap().path(), "a/b");
        assert_eq!(root.find_folder("/a//b/").unwrap().path(), "a/b");
        assert!(root.find_folder("a/c").is_none());
    }

    #[test]
    fn test_find_file() {
        let tree = sample();
        let root = tree.root();
        assert_eq!(root.find_file("top.txt").unwrap().data(), b"top");
        assert_eq!(root.find_file("a/b/c.txt").unwrap().size(), 3);
        assert!(root.find_file("a/b").is_none());
        assert!(root.find_file("a").is_none());
        assert!(root.find_file("missing.txt").is_none());
    }

    #[test]
    fn test_find_file_shadowed_by_folder() {
        // a/ holds both a folder `x` and a file `x`
        let folders = vec![
            folder("", "", None, (1, 1), (0, 0)),
            folder("a", "a", Some(0), (2, 1), (0, 1)),
            folder("x", "a/x", Some(1), (3, 0), (1, 1)),
        ];
        let files = vec![file("a/x", 1, b"file"), file("a/x/y.txt", 2, b"y")];
        let tree = ResourceTree::new(folders, files).unwrap();
        let root = tree.root();

        assert!(root.find_file("a/x").is_none());
        assert!(root.find_folder("a").unwrap().find_file("x").is_none());
        assert_eq!(root.find_file("a/x/y.txt").unwrap().data(), b"y");
        assert_eq!(root.find_folder("a").unwrap().file_count(), 1);
    }

    #[test]
    fn test_find_file_relative_to_subfolder() {
        let tree = sample();
        let a = tree.root().find_folder("a").unwrap();
        assert_eq!(a.find_file("b/c.txt").unwrap().path(), "a/b/c.txt");
        assert_eq!(a.find_file("a.txt").unwrap().path(), "a/a.txt");
    }

    #[test]
    fn test_foreach_file_direct_only() {
        let tree = sample();
        let mut seen = Vec::new();
        tree.root().foreach_file(|file| seen.push(file.path()));
        assert_eq!(seen, ["top.txt"]);
    }

    #[test]
    fn test_foreach_file_recursive_preorder() {
        let tree = sample();
        let mut seen = Vec::new();
        tree.root().foreach_file_recursive(|file| seen.push(file.path()));
        assert_eq!(seen, ["top.txt", "a/a.txt", "a/b/c.txt", "z/z.txt"]);
    }

    #[test]
    fn test_counts() {
        let tree = sample();
        let root = tree.root();
        assert_eq!(root.count_files(), 4);
        assert_eq!(root.count_folders(), 3);
        assert_eq!(root.find_folder("a").unwrap().count_folders(), 1);
    }

    #[test]
    fn test_metadata_first_match() {
        let tree = sample();
        let file = tree.root().find_file("top.txt").unwrap();
        assert_eq!(file.get_metadata("k"), Some("1"));
        assert_eq!(file.metadata().len(), 2);
        assert_eq!(file.get_metadata("absent"), None);
    }

    #[test]
    fn test_parent_and_root() {
        let tree = sample();
        let file = tree.root().find_file("a/b/c.txt").unwrap();
        assert_eq!(file.parent().path(), "a/b");
        assert!(file.root().is_root());
        assert_eq!(file.root(), tree.root());
        assert!(tree.root().parent().is_none());
    }
}
