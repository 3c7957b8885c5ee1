//! Glob expansion against a real directory tree.
//!
//! Patterns support `*` (any run of characters except `/`), `?` (one
//! character except `/`) and `**` (any run of characters including `/`;
//! a `/` right after `**` is optional). Patterns are matched against the
//! `/`-joined path of each regular file relative to the base directory.
//!
//! # Examples
//!
//! ```
//! use rescomp_manifest::glob;
//!
//! assert!(glob::matches("**/*.json", "api/config.json"));
//! assert!(glob::matches("**/*.json", "config.json"));
//! assert!(!glob::matches("*.json", "api/config.json"));
//! assert!(glob::matches("img/icon?.png", "img/icon1.png"));
//! ```

use crate::path::strip_current_dir;
use rescomp_core::{Error, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Returns `true` if `candidate` matches `pattern`.
#[must_use]
pub fn matches(pattern: &str, candidate: &str) -> bool {
    match_bytes(pattern.as_bytes(), candidate.as_bytes())
}

fn match_bytes(mut pattern: &[u8], mut candidate: &[u8]) -> bool {
    while let (Some(&p), Some(&c)) = (pattern.first(), candidate.first()) {
        match p {
            b'*' if pattern.get(1) == Some(&b'*') => {
                let mut rest = &pattern[2..];
                if rest.first() == Some(&b'/') {
                    rest = &rest[1..];
                }
                return (0..=candidate.len()).any(|i| match_bytes(rest, &candidate[i..]));
            }
            b'*' => {
                pattern = &pattern[1..];
                while let Some(&c) = candidate.first() {
                    if c == b'/' {
                        break;
                    }
                    if match_bytes(pattern, candidate) {
                        return true;
                    }
                    candidate = &candidate[1..];
                }
            }
            b'?' => {
                if c == b'/' {
                    return false;
                }
                pattern = &pattern[1..];
                candidate = &candidate[1..];
            }
            _ => {
                if p != c {
                    return false;
                }
                pattern = &pattern[1..];
                candidate = &candidate[1..];
            }
        }
    }

    while pattern.first() == Some(&b'*') {
        pattern = &pattern[1..];
    }
    pattern.is_empty() && candidate.is_empty()
}

/// Walks `base_dir` and calls `on_match` with the real path of every
/// regular file whose relative path matches `pattern`.
///
/// Directories are always descended into and visited in file-name order.
/// An empty `base_dir` walks the current directory. The first error
/// returned by `on_match` stops the walk and is propagated.
///
/// # Errors
///
/// Returns [`Error::Io`] if a directory cannot be read, or any error
/// produced by `on_match`.
pub fn for_each_match<F>(pattern: &str, base_dir: &Path, mut on_match: F) -> Result<()>
where
    F: FnMut(&Path) -> Result<()>,
{
    let pattern = strip_current_dir(pattern);
    let root = if base_dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        base_dir
    };

    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            Error::io(path, e.into())
        })?;
        if entry.file_type().is_dir() {
            continue;
        }

        let Some(relative) = relative_slash_path(root, entry.path()) else {
            continue;
        };
        if matches(pattern, &relative) {
            let source: PathBuf = base_dir.join(&relative);
            tracing::debug!(pattern, path = %source.display(), "glob match");
            on_match(&source)?;
        }
    }
    Ok(())
}

fn relative_slash_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect();
    Some(parts.join("/"))
}
