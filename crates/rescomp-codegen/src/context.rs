//! Template contexts for the generated header and source.
//!
//! Every string here is already valid C: literals are quoted and escaped,
//! pointer fields hold either an expression or `NULL`. Templates only
//! arrange them.

use serde::Serialize;

/// Context for `resources/header`.
#[derive(Debug, Clone, Serialize)]
pub struct HeaderContext {
    /// File name of the header
    pub header_name: String,
    /// Generator version
    pub version: &'static str,
    /// Include guard macro
    pub guard: String,
    /// Include path of the shared types header
    pub types_include: &'static str,
    /// Symbol of the root folder object
    pub root_symbol: String,
    /// Folder alias symbols, layout order
    pub folder_symbols: Vec<String>,
    /// File alias symbols, pre-order
    pub file_symbols: Vec<String>,
}

/// Context for `resources/source`.
#[derive(Debug, Clone, Serialize)]
pub struct SourceContext {
    /// File name of the source
    pub source_name: String,
    /// File name of the header to include
    pub header_name: String,
    /// Generator version
    pub version: &'static str,
    /// One blob per file, pre-order
    pub blobs: Vec<BlobContext>,
    /// Forward declarations of every child block
    pub forward_decls: Vec<BlockDeclContext>,
    /// Metadata arrays, files first then folders
    pub metadata: Vec<MetadataArrayContext>,
    /// One file array per folder that owns files
    pub file_arrays: Vec<FileArrayContext>,
    /// Child blocks, children before parents
    pub folder_blocks: Vec<FolderBlockContext>,
    /// The root folder record, emitted last
    pub root: FolderContext,
    /// Symbol of the root folder object
    pub root_symbol: String,
}

/// A file's content blob.
#[derive(Debug, Clone, Serialize)]
pub struct BlobContext {
    /// Array symbol
    pub symbol: String,
    /// Source path of the file, for the comment above the array
    pub path: String,
    /// Hex lines; a single `0x00` placeholder for empty files
    pub lines: Vec<String>,
}

/// Forward declaration of a child block array.
#[derive(Debug, Clone, Serialize)]
pub struct BlockDeclContext {
    /// Array symbol
    pub symbol: String,
    /// Number of folders in the block
    pub count: usize,
}

/// One metadata array.
#[derive(Debug, Clone, Serialize)]
pub struct MetadataArrayContext {
    /// Array symbol
    pub symbol: String,
    /// Entries in original order
    pub entries: Vec<MetadataEntryContext>,
}

/// One metadata pair as C literals.
#[derive(Debug, Clone, Serialize)]
pub struct MetadataEntryContext {
    /// Quoted key
    pub key: String,
    /// Quoted value
    pub value: String,
}

/// The file array of one folder plus per-file aliases.
#[derive(Debug, Clone, Serialize)]
pub struct FileArrayContext {
    /// Array symbol
    pub symbol: String,
    /// Virtual path of the owning folder
    pub folder_path: String,
    /// Records in insertion order
    pub files: Vec<FileContext>,
    /// Alias pointers into the array
    pub aliases: Vec<AliasContext>,
}

/// One `rescomp_file_t` initializer.
#[derive(Debug, Clone, Serialize)]
pub struct FileContext {
    /// Quoted name
    pub name: String,
    /// Quoted path
    pub path: String,
    /// Quoted MIME type
    pub mime: String,
    /// Blob symbol
    pub data: String,
    /// Size in bytes
    pub size: usize,
    /// Address of the owning folder
    pub parent: String,
    /// Metadata array symbol or `NULL`
    pub metadata: String,
    /// Number of metadata entries
    pub metadata_count: usize,
}

/// A named pointer into an array.
#[derive(Debug, Clone, Serialize)]
pub struct AliasContext {
    /// Alias symbol
    pub symbol: String,
    /// Array the alias points into
    pub array: String,
    /// Slot in that array
    pub index: usize,
}

/// The contiguous child block of one folder plus per-folder aliases.
#[derive(Debug, Clone, Serialize)]
pub struct FolderBlockContext {
    /// Array symbol
    pub symbol: String,
    /// Virtual path of the parent folder
    pub parent_path: String,
    /// Number of folders in the block
    pub count: usize,
    /// Records in child order
    pub folders: Vec<FolderContext>,
    /// Alias pointers into the block
    pub aliases: Vec<AliasContext>,
}

/// One `rescomp_folder_t` initializer.
#[derive(Debug, Clone, Serialize)]
pub struct FolderContext {
    /// Quoted name
    pub name: String,
    /// Quoted path
    pub path: String,
    /// Address of the parent or `NULL`
    pub parent: String,
    /// Child block symbol or `NULL`
    pub children: String,
    /// Number of children
    pub child_count: usize,
    /// File array symbol or `NULL`
    pub files: String,
    /// Number of files
    pub file_count: usize,
    /// Metadata array symbol or `NULL`
    pub metadata: String,
    /// Number of metadata entries
    pub metadata_count: usize,
}
