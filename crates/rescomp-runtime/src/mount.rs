//! Prefix routing across independently generated trees.
//!
//! A [`MountTable`] is an ordered list of `(prefix, root)` pairs owned by
//! the caller. Lookups scan from the most recent mount; the first prefix
//! that `path` starts with wins, even if the file is then missing from
//! that mount. Mounting a prefix twice keeps both entries, and unmounting
//! removes only the most recent one.
//!
//! # Examples
//!
//! ```
//! use rescomp_runtime::{FolderRecord, MountTable, ResourceTree};
//!
//! let root = FolderRecord {
//!     name: String::new(),
//!     path: String::new(),
//!     parent: None,
//!     children_start: 1,
//!     child_count: 0,
//!     files_start: 0,
//!     file_count: 0,
//!     metadata: Vec::new(),
//! };
//! let tree = ResourceTree::new(vec![root], Vec::new()).unwrap();
//!
//! let mut mounts = MountTable::new();
//! mounts.mount("/assets/", tree.root());
//! assert!(mounts.resolve("/assets/missing.png").is_none());
//! assert!(mounts.unmount("/assets/").is_ok());
//! assert!(mounts.is_empty());
//! ```

use crate::navigate::{File, Folder};
use crate::stream::FileStream;
use rescomp_core::{Error, Result};
use tracing::debug;

/// One mounted tree.
#[derive(Debug, Clone)]
pub struct Mount<'a> {
    prefix: String,
    root: Folder<'a>,
}

impl<'a> Mount<'a> {
    /// Returns the path prefix this tree is mounted at.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the mounted root folder.
    #[must_use]
    pub const fn root(&self) -> Folder<'a> {
        self.root
    }
}

/// Caller-owned mount registry.
#[derive(Debug, Clone, Default)]
pub struct MountTable<'a> {
    // Oldest first; lookups iterate in reverse.
    mounts: Vec<Mount<'a>>,
}

impl<'a> MountTable<'a> {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self { mounts: Vec::new() }
    }

    /// Mounts `root` at `prefix`, shadowing earlier mounts of the same prefix.
    pub fn mount(&mut self, prefix: impl Into<String>, root: Folder<'a>) {
        let prefix = prefix.into();
        debug!(prefix = %prefix, "mounting resource tree");
        self.mounts.push(Mount { prefix, root });
    }

    /// Removes the most recent mount whose prefix equals `prefix` exactly.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no mount has that prefix.
    pub fn unmount(&mut self, prefix: &str) -> Result<()> {
        let position = self
            .mounts
            .iter()
            .rposition(|mount| mount.prefix == prefix)
            .ok_or_else(|| Error::NotFound {
                resource: format!("mount '{prefix}'"),
            })?;
        self.mounts.remove(position);
        debug!(prefix, "unmounted resource tree");
        Ok(())
    }

    /// Resolves `path` through the first mount whose prefix it starts
    /// with, stripping the prefix before the lookup.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<File<'a>> {
        self.iter()
            .find_map(|mount| path.strip_prefix(mount.prefix.as_str()).map(|rest| (mount, rest)))
            .and_then(|(mount, rest)| mount.root.find_file(rest))
    }

    /// Resolves `path` and opens the file as a stream.
    #[must_use]
    pub fn resolve_open(&self, path: &str) -> Option<FileStream<'a>> {
        self.resolve(path)?.open()
    }

    /// Iterates over the mounts, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &Mount<'a>> {
        self.mounts.iter().rev()
    }

    /// Returns the number of mounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mounts.len()
    }

    /// Returns `true` if nothing is mounted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mounts.is_empty()
    }
}
