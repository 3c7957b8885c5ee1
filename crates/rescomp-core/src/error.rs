//! Error types for the rescomp resource compiler.
//!
//! Every failure in the compiler is terminal for the operation that raised
//! it: there is no retry policy anywhere in this offline tool. The one
//! deliberate exception (duplicate files found by glob expansion) is handled
//! by the manifest interpreter and never surfaces as an `Error`.
//!
//! # Examples
//!
//! ```
//! use rescomp_core::{Error, Result};
//!
//! fn require_field(value: Option<&str>) -> Result<&str> {
//!     value.ok_or_else(|| Error::InvalidArgument("missing 'path' field".to_string()))
//! }
//!
//! let err = require_field(None).unwrap_err();
//! assert!(err.is_invalid_argument());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for rescomp.
///
/// All crates in the workspace use this type, so a failure raised deep in
/// the VFS builder reaches the CLI unchanged.
#[derive(Error, Debug)]
pub enum Error {
    /// A buffer for file contents could not be allocated.
    #[error("Out of memory while reserving {requested} bytes for {path}")]
    OutOfMemory {
        /// File whose contents were being loaded
        path: PathBuf,
        /// Number of bytes that could not be reserved
        requested: u64,
    },

    /// Reading or writing a real file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path of the file being read or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The manifest could not be parsed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parse failure
        message: String,
        /// Underlying JSON error, if any
        #[source]
        source: Option<serde_json::Error>,
    },

    /// A manifest entry or function argument is invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A virtual path or resource does not exist.
    #[error("Not found: {resource}")]
    NotFound {
        /// Identifier of the missing resource
        resource: String,
    },

    /// An entry with the same name already exists.
    #[error("Duplicate entry: {path}")]
    Duplicate {
        /// Virtual path (or symbol) that collided
        path: String,
    },

    /// A code generation template failed to register or render.
    #[error("Template error: {message}")]
    Template {
        /// Description of the template failure
        message: String,
    },
}

impl Error {
    /// Creates an I/O error for the given path.
    ///
    /// # Examples
    ///
    /// ```
    /// use rescomp_core::Error;
    /// use std::io;
    ///
    /// let err = Error::io("assets/logo.png", io::Error::from(io::ErrorKind::NotFound));
    /// assert!(err.is_io_error());
    /// assert!(err.to_string().contains("assets/logo.png"));
    /// ```
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if this is an out-of-memory error.
    #[must_use]
    pub const fn is_out_of_memory(&self) -> bool {
        matches!(self, Self::OutOfMemory { .. })
    }

    /// Returns `true` if this is an I/O error.
    #[must_use]
    pub const fn is_io_error(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Returns `true` if this is a parse error.
    ///
    /// # Examples
    ///
    /// ```
    /// use rescomp_core::Error;
    ///
    /// let err = Error::Parse {
    ///     message: "manifest root must be an object".to_string(),
    ///     source: None,
    /// };
    /// assert!(err.is_parse_error());
    /// ```
    #[must_use]
    pub const fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Returns `true` if this is an invalid argument error.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Returns `true` if this is a not-found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if this is a duplicate entry error.
    ///
    /// # Examples
    ///
    /// ```
    /// use rescomp_core::Error;
    ///
    /// let err = Error::Duplicate {
    ///     path: "images/icon.png".to_string(),
    /// };
    /// assert!(err.is_duplicate());
    /// ```
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }

    /// Returns `true` if this is a template error.
    #[must_use]
    pub const fn is_template_error(&self) -> bool {
        matches!(self, Self::Template { .. })
    }
}

/// Result type alias for rescomp operations.
///
/// # Examples
///
/// ```
/// use rescomp_core::{Error, Result};
///
/// fn non_empty(name: &str) -> Result<&str> {
///     if name.is_empty() {
///         return Err(Error::InvalidArgument("name cannot be empty".to_string()));
///     }
///     Ok(name)
/// }
///
/// assert!(non_empty("assets").is_ok());
/// assert!(non_empty("").is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error_detection() {
        let err = Error::io("missing.txt", io::Error::from(io::ErrorKind::NotFound));
        assert!(err.is_io_error());
        assert!(!err.is_parse_error());
    }

    #[test]
    fn test_io_error_keeps_source() {
        use std::error::Error as _;

        let err = Error::io("missing.txt", io::Error::from(io::ErrorKind::NotFound));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_duplicate_error_detection() {
        let err = Error::Duplicate {
            path: "a/b.txt".to_string(),
        };
        assert!(err.is_duplicate());
        assert!(!err.is_invalid_argument());
    }

    #[test]
    fn test_out_of_memory_detection() {
        let err = Error::OutOfMemory {
            path: PathBuf::from("huge.bin"),
            requested: u64::MAX,
        };
        assert!(err.is_out_of_memory());
        assert!(!err.is_io_error());
    }

    #[test]
    fn test_not_found_detection() {
        let err = Error::NotFound {
            resource: "folder 'images'".to_string(),
        };
        assert!(err.is_not_found());
        assert!(!err.is_template_error());
    }

    #[test]
    fn test_error_display() {
        let err = Error::InvalidArgument("unknown entry type 'link'".to_string());
        let display = format!("{err}");
        assert!(display.contains("Invalid argument"));
        assert!(display.contains("link"));
    }

    #[test]
    fn test_template_error_display() {
        let err = Error::Template {
            message: "missing variable".to_string(),
        };
        assert!(err.is_template_error());
        assert_eq!(err.to_string(), "Template error: missing variable");
    }
}
