//! Output types of the code generator.
//!
//! # Examples
//!
//! ```
//! use rescomp_codegen::{GeneratedCode, GeneratedFile};
//!
//! let mut code = GeneratedCode::new();
//! code.add_file(GeneratedFile {
//!     path: "res.h".into(),
//!     content: "#pragma once\n".to_string(),
//! });
//!
//! assert_eq!(code.file_count(), 1);
//! ```

use rescomp_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Result of code generation containing all generated files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratedCode {
    /// Generated files, in the order they are written
    pub files: Vec<GeneratedFile>,
}

impl GeneratedCode {
    /// Creates a new empty generated code container.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Adds a generated file to the collection.
    pub fn add_file(&mut self, file: GeneratedFile) {
        self.files.push(file);
    }

    /// Returns the number of generated files.
    #[inline]
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Returns an iterator over the generated files.
    #[inline]
    pub fn files(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.files.iter()
    }

    /// Returns the file generated for `path`, if any.
    #[must_use]
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&GeneratedFile> {
        self.files.iter().find(|file| file.path == path.as_ref())
    }

    /// Writes every file to disk in order.
    ///
    /// A failure stops the pass; files already written stay on disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] naming the file that could not be written.
    pub fn write_all(&self) -> Result<()> {
        for file in &self.files {
            fs::write(&file.path, &file.content).map_err(|e| Error::io(&file.path, e))?;
            tracing::debug!(path = %file.path.display(), bytes = file.content.len(), "wrote file");
        }
        Ok(())
    }
}

/// A single generated file with path and content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// Path the file is written to
    pub path: PathBuf,
    /// File content
    pub content: String,
}

impl GeneratedFile {
    /// Returns the file path.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the file content.
    #[inline]
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_by_path() {
        let mut code = GeneratedCode::new();
        code.add_file(GeneratedFile {
            path: "a.h".into(),
            content: "h".to_string(),
        });
        assert_eq!(code.get("a.h").unwrap().content(), "h");
        assert!(code.get("b.h").is_none());
    }

    #[test]
    fn test_write_all_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let mut code = GeneratedCode::new();
        code.add_file(GeneratedFile {
            path: temp_dir.path().join("res.h"),
            content: "header".to_string(),
        });
        code.add_file(GeneratedFile {
            path: temp_dir.path().join("missing/res.c"),
            content: "source".to_string(),
        });

        let err = code.write_all().unwrap_err();
        assert!(err.is_io_error());
        // The header was written before the failure and is left behind.
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("res.h")).unwrap(),
            "header"
        );
    }
}
