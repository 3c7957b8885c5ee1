//! Manifest interpreter for rescomp.
//!
//! Turns a JSON manifest of `file`, `folder` and `glob` entries into a
//! [`rescomp_vfs::Vfs`] tree, optionally loading every file's bytes, and
//! extracts the source dependencies of a manifest for build systems.
//!
//! # Examples
//!
//! ```no_run
//! use rescomp_manifest::Manifest;
//!
//! let manifest = Manifest::load("resources/manifest.json", "assets")?;
//! println!("{} files", manifest.vfs().file_len());
//! # Ok::<(), rescomp_core::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod glob;
mod manifest;
pub mod path;

pub use manifest::Manifest;
