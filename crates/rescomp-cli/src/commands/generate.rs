//! Generate command implementation.
//!
//! This command:
//! 1. Loads the manifest and every referenced file
//! 2. Generates the C header and source
//! 3. Writes both files, then the optional depfile

use super::deps::write_depfile;
use crate::cli::GenerateArgs;
use anyhow::{Context, Result};
use rescomp_codegen::{CodeGenerator, GenerateOptions};
use rescomp_core::cli::ExitCode;
use rescomp_manifest::Manifest;
use tracing::info;

/// Runs the generate command.
///
/// Partially written output is left in place when a later step fails.
///
/// # Errors
///
/// Returns an error if the manifest cannot be loaded, generation fails,
/// or any output file cannot be written.
pub fn run(args: &GenerateArgs) -> Result<ExitCode> {
    info!("Loading config: {}", args.config.display());
    let manifest = Manifest::load(&args.config, &args.name)
        .with_context(|| format!("failed to load config '{}'", args.config.display()))?;

    let generator = CodeGenerator::new().context("failed to initialize code generator")?;
    let options = GenerateOptions::new(&args.name, &args.output, &args.header);
    let code = generator
        .generate(manifest.vfs(), &options)
        .context("failed to generate code")?;
    code.write_all().context("failed to write generated code")?;

    if let Some(depfile) = &args.depfile {
        write_depfile(&manifest, depfile, &args.output, &args.header)?;
    }

    println!(
        "Generated {} and {}",
        args.output.display(),
        args.header.display()
    );
    Ok(ExitCode::SUCCESS)
}
