//! Dependency extraction.
//!
//! `-d` prints every source file a manifest references, and `-M` writes the
//! same list as a Makefile rule so build systems can rerun the compiler
//! when any embedded file changes.

use anyhow::{Context, Result};
use rescomp_core::cli::ExitCode;
use rescomp_manifest::Manifest;
use std::fs;
use std::path::Path;
use tracing::info;

/// Runs dependency mode.
///
/// Interprets the manifest without reading any file data and prints one
/// source path per line, in tree order.
///
/// # Errors
///
/// Returns an error if the manifest cannot be interpreted.
pub fn run(config: &Path) -> Result<ExitCode> {
    let manifest = Manifest::load_deps(config)
        .with_context(|| format!("failed to load config '{}'", config.display()))?;

    print!("{}", manifest.dependency_list());
    Ok(ExitCode::SUCCESS)
}

/// Writes the Makefile dependency rule for `output` and `header`.
///
/// # Errors
///
/// Returns an error if the depfile cannot be written.
pub fn write_depfile(
    manifest: &Manifest,
    depfile: &Path,
    output: &Path,
    header: &Path,
) -> Result<()> {
    fs::write(depfile, manifest.depfile_rule(output, header))
        .with_context(|| format!("cannot open depfile '{}'", depfile.display()))?;

    info!(
        depfile = %depfile.display(),
        dependencies = manifest.dependencies().len(),
        "wrote depfile"
    );
    Ok(())
}
