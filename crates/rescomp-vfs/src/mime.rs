//! MIME type detection from file extensions.
//!
//! # Examples
//!
//! ```
//! use rescomp_vfs::mime;
//!
//! assert_eq!(mime::from_path("images/icon.PNG"), "image/png");
//! assert_eq!(mime::from_path("Makefile"), mime::OCTET_STREAM);
//! ```

/// Fallback MIME type for unknown extensions.
pub const OCTET_STREAM: &str = "application/octet-stream";

static MIME_TYPES: &[(&str, &str)] = &[
    ("txt", "text/plain"),
    ("text", "text/plain"),
    ("html", "text/html"),
    ("htm", "text/html"),
    ("css", "text/css"),
    ("csv", "text/csv"),
    ("js", "application/javascript"),
    ("mjs", "application/javascript"),
    ("json", "application/json"),
    ("xml", "application/xml"),
    ("xhtml", "application/xhtml+xml"),
    ("pdf", "application/pdf"),
    ("zip", "application/zip"),
    ("gz", "application/gzip"),
    ("tar", "application/x-tar"),
    ("rar", "application/vnd.rar"),
    ("7z", "application/x-7z-compressed"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("webp", "image/webp"),
    ("svg", "image/svg+xml"),
    ("ico", "image/x-icon"),
    ("tiff", "image/tiff"),
    ("tif", "image/tiff"),
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
    ("ttf", "font/ttf"),
    ("otf", "font/otf"),
    ("eot", "application/vnd.ms-fontobject"),
    ("wav", "audio/wav"),
    ("mp3", "audio/mpeg"),
    ("ogg", "audio/ogg"),
    ("oga", "audio/ogg"),
    ("flac", "audio/flac"),
    ("aac", "audio/aac"),
    ("m4a", "audio/mp4"),
    ("mp4", "video/mp4"),
    ("webm", "video/webm"),
    ("avi", "video/x-msvideo"),
    ("mkv", "video/x-matroska"),
    ("mov", "video/quicktime"),
    ("ogv", "video/ogg"),
    ("glsl", "text/plain"),
    ("vert", "text/plain"),
    ("frag", "text/plain"),
    ("hlsl", "text/plain"),
    ("c", "text/x-c"),
    ("h", "text/x-c"),
    ("cpp", "text/x-c++"),
    ("hpp", "text/x-c++"),
    ("cc", "text/x-c++"),
    ("hh", "text/x-c++"),
    ("py", "text/x-python"),
    ("rb", "text/x-ruby"),
    ("rs", "text/x-rust"),
    ("go", "text/x-go"),
    ("java", "text/x-java"),
    ("sh", "application/x-sh"),
    ("bash", "application/x-sh"),
    ("zsh", "application/x-sh"),
    ("md", "text/markdown"),
    ("markdown", "text/markdown"),
    ("yaml", "text/yaml"),
    ("yml", "text/yaml"),
    ("toml", "application/toml"),
    ("ini", "text/plain"),
    ("cfg", "text/plain"),
    ("conf", "text/plain"),
    ("sql", "application/sql"),
    ("wasm", "application/wasm"),
];

/// Returns the MIME type for an extension (with or without leading dot).
///
/// Matching is case-insensitive.
#[must_use]
pub fn from_extension(extension: &str) -> &'static str {
    let extension = extension.strip_prefix('.').unwrap_or(extension);
    MIME_TYPES
        .iter()
        .find(|(ext, _)| ext.eq_ignore_ascii_case(extension))
        .map_or(OCTET_STREAM, |(_, mime)| *mime)
}

/// Returns the MIME type for a file name or path based on its extension.
///
/// Names without a dot, or whose only dot is the first character
/// (`.gitignore`), map to [`OCTET_STREAM`].
#[must_use]
pub fn from_path(path: &str) -> &'static str {
    match path.rfind('.') {
        Some(0) | None => OCTET_STREAM,
        Some(dot) => from_extension(&path[dot + 1..]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions() {
        assert_eq!(from_path("hello.txt"), "text/plain");
        assert_eq!(from_path("api/config.json"), "application/json");
        assert_eq!(from_path("shader.frag"), "text/plain");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(from_extension("JPEG"), "image/jpeg");
        assert_eq!(from_extension(".Png"), "image/png");
    }

    #[test]
    fn test_unknown_and_missing_extension() {
        assert_eq!(from_path("archive.xyz"), OCTET_STREAM);
        assert_eq!(from_path("README"), OCTET_STREAM);
        assert_eq!(from_path(".hidden"), OCTET_STREAM);
    }

    #[test]
    fn test_last_extension_wins() {
        assert_eq!(from_path("bundle.tar.gz"), "application/gzip");
    }
}
