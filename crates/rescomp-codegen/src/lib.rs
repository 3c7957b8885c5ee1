//! C code generation for rescomp resource trees.
//!
//! Lowers a loaded [`rescomp_vfs::Vfs`] into a statically laid out,
//! self-referential graph of C records and renders it as a header/source
//! pair through Handlebars templates. The same layout can be lowered into
//! a [`rescomp_runtime::ResourceTree`] to navigate exactly what is emitted.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod context;
pub mod generator;
pub mod layout;
pub mod symbols;
pub mod template_engine;
pub mod types;

pub use generator::{
    CodeGenerator, GenerateOptions, RUNTIME_HEADER, RUNTIME_INCLUDE, TYPES_HEADER, TYPES_INCLUDE,
    lower,
};
pub use layout::{FolderSlot, Layout};
pub use types::{GeneratedCode, GeneratedFile};
