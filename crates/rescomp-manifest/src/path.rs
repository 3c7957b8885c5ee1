//! Helpers for `/`-separated virtual paths and manifest-relative sources.

use std::path::{Path, PathBuf};

/// Strips any number of leading `./` segments.
pub fn strip_current_dir(mut path: &str) -> &str {
    while let Some(rest) = path.strip_prefix("./") {
        path = rest;
    }
    path
}

/// Joins two virtual paths with a single `/`.
///
/// An empty side yields the other side unchanged; leading `./` segments of
/// the right side are dropped.
pub fn join(base: &str, rest: &str) -> String {
    if base.is_empty() {
        return rest.to_string();
    }
    let rest = strip_current_dir(rest);
    if rest.is_empty() {
        return base.to_string();
    }
    if base.ends_with('/') {
        format!("{base}{rest}")
    } else {
        format!("{base}/{rest}")
    }
}

/// Returns everything before the last `/` (empty when there is none).
pub fn dirname(path: &str) -> &str {
    match path.rfind('/') {
        None => "",
        Some(0) => "/",
        Some(pos) => &path[..pos],
    }
}

/// Returns everything after the last `/`.
pub fn basename(path: &str) -> &str {
    path.rsplit_once('/').map_or(path, |(_, name)| name)
}

/// Composes the virtual path of an entry nested under `parent`.
///
/// An entry with no path of its own lands in `parent`; under the root the
/// entry path is used as-is; otherwise the two are joined.
pub fn nest(parent: &str, entry: &str) -> String {
    if entry.is_empty() {
        parent.to_string()
    } else if parent.is_empty() {
        entry.to_string()
    } else {
        join(parent, entry)
    }
}

/// Resolves a manifest `source` against the manifest's directory.
pub fn resolve_source(base_dir: &Path, source: &str) -> PathBuf {
    base_dir.join(strip_current_dir(source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join() {
        assert_eq!(join("", "a.txt"), "a.txt");
        assert_eq!(join("assets", ""), "assets");
        assert_eq!(join("assets", "a.txt"), "assets/a.txt");
        assert_eq!(join("assets/", "a.txt"), "assets/a.txt");
        assert_eq!(join("assets", "././a.txt"), "assets/a.txt");
    }

    #[test]
    fn test_dirname() {
        assert_eq!(dirname("hello.txt"), "");
        assert_eq!(dirname("a/b/c.txt"), "a/b");
        assert_eq!(dirname("/root.txt"), "/");
    }

    #[test]
    fn test_basename() {
        assert_eq!(basename("hello.txt"), "hello.txt");
        assert_eq!(basename("a/b/c.txt"), "c.txt");
        assert_eq!(basename("trailing/"), "");
    }

    #[test]
    fn test_nest_three_cases() {
        assert_eq!(nest("web/static", ""), "web/static");
        assert_eq!(nest("", "css"), "css");
        assert_eq!(nest("web", "css/themes"), "web/css/themes");
    }

    #[test]
    fn test_resolve_source() {
        assert_eq!(
            resolve_source(Path::new("res"), "./img/a.png"),
            PathBuf::from("res/img/a.png")
        );
        assert_eq!(
            resolve_source(Path::new(""), "hello.txt"),
            PathBuf::from("hello.txt")
        );
    }
}
