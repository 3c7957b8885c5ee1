//! Zero-copy byte streams over embedded files.
//!
//! With the `stream` feature (on by default) files open as a
//! [`Cursor`] borrowing the embedded buffer. Without it every open
//! reports unavailability by returning `None`.

use crate::navigate::{File, Folder};
use std::io::Cursor;

/// A readable, seekable view of a file's embedded bytes.
pub type FileStream<'a> = Cursor<&'a [u8]>;

impl<'a> File<'a> {
    /// Opens the file's contents as a stream without copying.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rescomp_runtime::{FileRecord, FolderRecord, ResourceTree};
    /// use std::io::Read;
    /// # let root = FolderRecord { name: String::new(), path: String::new(), parent: None,
    /// #     children_start: 1, child_count: 0, files_start: 0, file_count: 1, metadata: Vec::new() };
    /// # let file = FileRecord { name: "a.txt".into(), path: "a.txt".into(), mime: "text/plain".into(),
    /// #     data: b"abc".to_vec(), parent: 0, metadata: Vec::new() };
    /// # let tree = ResourceTree::new(vec![root], vec![file]).unwrap();
    ///
    /// let mut stream = tree.root().find_file("a.txt").unwrap().open().unwrap();
    /// let mut text = String::new();
    /// stream.read_to_string(&mut text).unwrap();
    /// assert_eq!(text, "abc");
    /// ```
    #[cfg(feature = "stream")]
    #[must_use]
    pub fn open(&self) -> Option<FileStream<'a>> {
        Some(Cursor::new(self.data()))
    }

    /// Streams are unavailable in this build.
    #[cfg(not(feature = "stream"))]
    #[must_use]
    pub const fn open(&self) -> Option<FileStream<'a>> {
        None
    }
}

impl<'a> Folder<'a> {
    /// Finds a file relative to this folder and opens it.
    ///
    /// Returns `None` if the file does not exist or streams are
    /// unavailable.
    #[must_use]
    pub fn open_path(&self, path: &str) -> Option<FileStream<'a>> {
        self.find_file(path)?.open()
    }
}

#[cfg(all(test, feature = "stream"))]
mod tests {
    use crate::tree::{FileRecord, FolderRecord, ResourceTree};
    use std::io::{Read, Seek, SeekFrom};

    fn tree() -> ResourceTree {
        let root = FolderRecord {
            name: String::new(),
            path: String::new(),
            parent: None,
            children_start: 1,
            child_count: 0,
            files_start: 0,
            file_count: 1,
            metadata: Vec::new(),
        };
        let file = FileRecord {
            name: "data.bin".to_string(),
            path: "data.bin".to_string(),
            mime: "application/octet-stream".to_string(),
            data: vec![1, 2, 3, 4, 5],
            parent: 0,
            metadata: Vec::new(),
        };
        ResourceTree::new(vec![root], vec![file]).unwrap()
    }

    #[test]
    fn test_stream_borrows_embedded_bytes() {
        let tree = tree();
        let file = tree.root().find_file("data.bin").unwrap();
        let stream = file.open().unwrap();
        assert!(std::ptr::eq(stream.get_ref().as_ptr(), file.data().as_ptr()));
    }

    #[test]
    fn test_stream_seek_and_read() {
        let tree = tree();
        let mut stream = tree.root().open_path("data.bin").unwrap();
        stream.seek(SeekFrom::Start(3)).unwrap();
        let mut rest = Vec::new();
        stream.read_to_end(&mut rest).unwrap();
        assert_eq!(rest, [4, 5]);
    }

    #[test]
    fn test_open_missing_path() {
        let tree = tree();
        assert!(tree.root().open_path("nope.bin").is_none());
    }
}
