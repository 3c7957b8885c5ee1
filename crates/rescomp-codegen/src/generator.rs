//! C header and source generation.
//!
//! The generator runs the [`Layout`] indexing pass and then fills the
//! template contexts in emission order:
//!
//! 1. one byte blob per file, pre-order
//! 2. forward declarations of every child block
//! 3. metadata arrays, files first then folders
//! 4. one file array per folder that owns files, plus a named alias per file
//! 5. child blocks, children before parents, plus a named alias per folder
//! 6. the root folder object
//!
//! Each folder's children live in one array so that `children` plus
//! `child_count` addresses exactly those folders. A non-root folder is
//! therefore addressed as `&{name}_children_{parent}[position]`.
//!
//! # Examples
//!
//! ```
//! use rescomp_codegen::{CodeGenerator, GenerateOptions};
//! use rescomp_vfs::{FolderId, Vfs};
//!
//! let mut vfs = Vfs::new();
//! vfs.add_file_from_bytes(FolderId::ROOT, "hello.txt", b"hi".to_vec()).unwrap();
//!
//! let generator = CodeGenerator::new().unwrap();
//! let options = GenerateOptions::new("demo", "out/demo.c", "out/demo.h");
//! let code = generator.generate(&vfs, &options).unwrap();
//!
//! let header = code.get("out/demo.h").unwrap().content();
//! assert!(header.contains("extern const rescomp_file_t * const demo_file_hello_txt;"));
//! let source = code.get("out/demo.c").unwrap().content();
//! assert!(source.contains("#include \"demo.h\""));
//! assert!(source.contains("0x68, 0x69"));
//! ```

use crate::context::{
    AliasContext, BlobContext, BlockDeclContext, FileArrayContext, FileContext,
    FolderBlockContext, FolderContext, HeaderContext, MetadataArrayContext, MetadataEntryContext,
    SourceContext,
};
use crate::layout::{Layout, effective_mime, loaded_data};
use crate::symbols::{
    c_string, file_symbol, folder_symbol, hex_lines, include_guard, is_valid_base_name,
};
use crate::template_engine::{HEADER_TEMPLATE, SOURCE_TEMPLATE, TemplateEngine};
use crate::types::{GeneratedCode, GeneratedFile};
use rescomp_core::{Error, Result};
use rescomp_runtime::ResourceTree;
use rescomp_vfs::{Metadata, Vfs};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Include path of the shared record types header.
pub const TYPES_INCLUDE: &str = "rescomp/types.h";

/// Contents of `rescomp/types.h`, to install next to generated code.
pub const TYPES_HEADER: &str = include_str!("../include/rescomp/types.h");

/// Include path of the header-only C navigation helpers.
pub const RUNTIME_INCLUDE: &str = "rescomp/runtime.h";

/// Contents of `rescomp/runtime.h`: lookups, visitors and counts over the
/// generated records, for C consumers of the output. Install it next to
/// [`TYPES_HEADER`].
pub const RUNTIME_HEADER: &str = include_str!("../include/rescomp/runtime.h");

const NULL: &str = "NULL";

/// Where and under which name to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Base name prefixing every generated symbol
    pub name: String,
    /// Path of the generated C source
    pub source_path: PathBuf,
    /// Path of the generated C header
    pub header_path: PathBuf,
}

impl GenerateOptions {
    /// Creates options for the given base name and output paths.
    pub fn new(
        name: impl Into<String>,
        source_path: impl Into<PathBuf>,
        header_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            source_path: source_path.into(),
            header_path: header_path.into(),
        }
    }
}

/// Generator for C resource files.
#[derive(Debug)]
pub struct CodeGenerator<'a> {
    engine: TemplateEngine<'a>,
}

impl CodeGenerator<'_> {
    /// Creates a new generator.
    ///
    /// # Errors
    ///
    /// Returns error if template registration fails.
    pub fn new() -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::new()?,
        })
    }

    /// Generates the header and source for a loaded tree.
    ///
    /// The returned code holds the header first, then the source.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `options.name` is not a C identifier
    ///   or a file's data has not been loaded
    /// - [`Error::Duplicate`] if two paths mangle to the same symbol
    /// - [`Error::Template`] if rendering fails
    pub fn generate(&self, vfs: &Vfs, options: &GenerateOptions) -> Result<GeneratedCode> {
        if !is_valid_base_name(&options.name) {
            return Err(Error::InvalidArgument(format!(
                "'{}' is not a valid C identifier",
                options.name
            )));
        }

        tracing::info!(
            name = %options.name,
            files = vfs.file_len(),
            folders = vfs.folder_len(),
            "generating resources"
        );

        let layout = Layout::compute(vfs)?;
        let emitter = Emitter {
            vfs,
            layout: &layout,
            name: &options.name,
        };
        emitter.check_symbols()?;

        let header_name = file_name(&options.header_path);
        let header = emitter.header_context(header_name.clone());
        let source = emitter.source_context(file_name(&options.source_path), header_name)?;

        let mut code = GeneratedCode::new();
        code.add_file(GeneratedFile {
            path: options.header_path.clone(),
            content: self.engine.render(HEADER_TEMPLATE, &header)?,
        });
        code.add_file(GeneratedFile {
            path: options.source_path.clone(),
            content: self.engine.render(SOURCE_TEMPLATE, &source)?,
        });

        tracing::info!(
            header = %options.header_path.display(),
            source = %options.source_path.display(),
            "generated resources"
        );
        Ok(code)
    }
}

/// Lowers a loaded tree into the [`ResourceTree`] matching the emitted data.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if a file's data has not been loaded.
pub fn lower(vfs: &Vfs) -> Result<ResourceTree> {
    Layout::compute(vfs)?.to_resource_tree(vfs)
}

struct Emitter<'g> {
    vfs: &'g Vfs,
    layout: &'g Layout,
    name: &'g str,
}

impl Emitter<'_> {
    fn folder_path(&self, index: usize) -> &str {
        self.vfs.folder(self.layout.folders()[index].id).path()
    }

    fn children_symbol(&self, index: usize) -> String {
        format!("{}_children_{index}", self.name)
    }

    fn files_symbol(&self, index: usize) -> String {
        format!("{}_files_{index}", self.name)
    }

    fn blob_symbol(&self, file_index: usize) -> String {
        format!("{}_data_{file_index}", self.name)
    }

    /// C expression for the address of a folder record.
    fn address(&self, index: usize) -> String {
        let slot = &self.layout.folders()[index];
        match slot.parent {
            None => format!("&{}_root", self.name),
            Some(parent) => format!("&{}[{}]", self.children_symbol(parent), slot.position),
        }
    }

    fn check_symbols(&self) -> Result<()> {
        let mut seen = HashSet::new();
        let folders = self.layout.folders()[1..]
            .iter()
            .map(|slot| folder_symbol(self.name, self.vfs.folder(slot.id).path()));
        let files = self
            .layout
            .files()
            .iter()
            .map(|&id| file_symbol(self.name, self.vfs.file(id).path()));

        for symbol in folders.chain(files) {
            if !seen.insert(symbol.clone()) {
                return Err(Error::Duplicate { path: symbol });
            }
        }
        Ok(())
    }

    fn header_context(&self, header_name: String) -> HeaderContext {
        HeaderContext {
            header_name,
            version: env!("CARGO_PKG_VERSION"),
            guard: include_guard(self.name),
            types_include: TYPES_INCLUDE,
            root_symbol: folder_symbol(self.name, ""),
            folder_symbols: self.layout.folders()[1..]
                .iter()
                .map(|slot| folder_symbol(self.name, self.vfs.folder(slot.id).path()))
                .collect(),
            file_symbols: self
                .layout
                .files()
                .iter()
                .map(|&id| file_symbol(self.name, self.vfs.file(id).path()))
                .collect(),
        }
    }

    fn source_context(&self, source_name: String, header_name: String) -> Result<SourceContext> {
        let blobs = self.blobs()?;

        let forward_decls = self
            .layout
            .folders()
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.child_count > 0)
            .map(|(index, slot)| BlockDeclContext {
                symbol: self.children_symbol(index),
                count: slot.child_count,
            })
            .collect();

        let mut metadata = Vec::new();
        let file_meta: Vec<Option<String>> = self
            .layout
            .files()
            .iter()
            .map(|&id| self.metadata_array(self.vfs.file(id).metadata(), &mut metadata))
            .collect();
        let folder_meta: Vec<Option<String>> = self
            .layout
            .folders()
            .iter()
            .map(|slot| self.metadata_array(self.vfs.folder(slot.id).metadata(), &mut metadata))
            .collect();

        let file_arrays = self.file_arrays(&file_meta);

        let mut folder_blocks = Vec::new();
        self.folder_blocks(0, &folder_meta, &mut folder_blocks);

        Ok(SourceContext {
            source_name,
            header_name,
            version: env!("CARGO_PKG_VERSION"),
            blobs,
            forward_decls,
            metadata,
            file_arrays,
            folder_blocks,
            root: self.folder_context(0, &folder_meta),
            root_symbol: folder_symbol(self.name, ""),
        })
    }

    fn blobs(&self) -> Result<Vec<BlobContext>> {
        self.layout
            .files()
            .iter()
            .enumerate()
            .map(|(index, &id)| {
                let data = loaded_data(self.vfs, id)?;
                // Zero-length arrays are not valid C.
                let lines = if data.is_empty() {
                    vec!["0x00".to_string()]
                } else {
                    hex_lines(data)
                };
                Ok(BlobContext {
                    symbol: self.blob_symbol(index),
                    path: comment_text(self.vfs.file(id).path()),
                    lines,
                })
            })
            .collect()
    }

    fn metadata_array(
        &self,
        metadata: &Metadata,
        arrays: &mut Vec<MetadataArrayContext>,
    ) -> Option<String> {
        if metadata.is_empty() {
            return None;
        }
        let symbol = format!("{}_meta_{}", self.name, arrays.len());
        arrays.push(MetadataArrayContext {
            symbol: symbol.clone(),
            entries: metadata
                .iter()
                .map(|entry| MetadataEntryContext {
                    key: c_string(&entry.key),
                    value: c_string(&entry.value),
                })
                .collect(),
        });
        Some(symbol)
    }

    fn file_arrays(&self, file_meta: &[Option<String>]) -> Vec<FileArrayContext> {
        self.layout
            .folders()
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.file_count > 0)
            .map(|(index, slot)| {
                let array = self.files_symbol(index);
                let range = slot.files_start..slot.files_start + slot.file_count;
                let files = range
                    .clone()
                    .map(|file_index| {
                        let file = self.vfs.file(self.layout.files()[file_index]);
                        FileContext {
                            name: c_string(file.name()),
                            path: c_string(file.path()),
                            mime: c_string(effective_mime(file.mime())),
                            data: self.blob_symbol(file_index),
                            size: file.size(),
                            parent: self.address(index),
                            metadata: file_meta[file_index]
                                .clone()
                                .unwrap_or_else(|| NULL.to_string()),
                            metadata_count: file.metadata().len(),
                        }
                    })
                    .collect();
                let aliases = range
                    .enumerate()
                    .map(|(position, file_index)| AliasContext {
                        symbol: file_symbol(
                            self.name,
                            self.vfs.file(self.layout.files()[file_index]).path(),
                        ),
                        array: array.clone(),
                        index: position,
                    })
                    .collect();

                FileArrayContext {
                    symbol: array,
                    folder_path: comment_text(self.folder_path(index)),
                    files,
                    aliases,
                }
            })
            .collect()
    }

    /// Collects child blocks below `index` in post-order.
    fn folder_blocks(
        &self,
        index: usize,
        folder_meta: &[Option<String>],
        out: &mut Vec<FolderBlockContext>,
    ) {
        let slot = self.layout.folders()[index];
        let children = slot.children_start..slot.children_start + slot.child_count;
        for child in children.clone() {
            self.folder_blocks(child, folder_meta, out);
        }
        if slot.child_count == 0 {
            return;
        }

        let array = self.children_symbol(index);
        out.push(FolderBlockContext {
            symbol: array.clone(),
            parent_path: comment_text(self.folder_path(index)),
            count: slot.child_count,
            folders: children
                .clone()
                .map(|child| self.folder_context(child, folder_meta))
                .collect(),
            aliases: children
                .enumerate()
                .map(|(position, child)| AliasContext {
                    symbol: folder_symbol(self.name, self.folder_path(child)),
                    array: array.clone(),
                    index: position,
                })
                .collect(),
        });
    }

    fn folder_context(&self, index: usize, folder_meta: &[Option<String>]) -> FolderContext {
        let slot = self.layout.folders()[index];
        let folder = self.vfs.folder(slot.id);
        FolderContext {
            name: c_string(folder.name()),
            path: c_string(folder.path()),
            parent: slot
                .parent
                .map_or_else(|| NULL.to_string(), |parent| self.address(parent)),
            children: if slot.child_count > 0 {
                self.children_symbol(index)
            } else {
                NULL.to_string()
            },
            child_count: slot.child_count,
            files: if slot.file_count > 0 {
                self.files_symbol(index)
            } else {
                NULL.to_string()
            },
            file_count: slot.file_count,
            metadata: folder_meta[index]
                .clone()
                .unwrap_or_else(|| NULL.to_string()),
            metadata_count: folder.metadata().len(),
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

/// Text safe to place inside a `/* */` comment.
fn comment_text(text: &str) -> String {
    text.replace("*/", "* /")
}
