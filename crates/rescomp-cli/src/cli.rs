//! CLI argument definitions and parsing.
//!
//! Every flag is optional at the clap level: which ones are required
//! depends on the mode, so [`Cli::into_mode`] validates them and reports
//! all missing flags at once.

use anyhow::{Result, bail};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Usage summary shown after a validation failure.
pub const USAGE: &str = "\
Usage: rescomp -n <name> -c <config> -o <output.c> -H <output.h>
       rescomp -d -c <config>";

/// rescomp - compile a resource manifest into C source and header files.
///
/// Reads a JSON manifest describing files, folders and glob patterns and
/// embeds every referenced file as static data in a generated C source,
/// with a matching header declaring one symbol per folder and file.
#[derive(Parser, Debug)]
#[command(name = "rescomp")]
#[command(version = concat!("version ", env!("CARGO_PKG_VERSION")), about, long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Base name for generated symbols
    #[arg(short = 'n', long = "name", value_name = "NAME")]
    pub name: Option<String>,

    /// Input configuration file (JSON)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output C source file
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output C header file
    #[arg(short = 'H', long = "header", value_name = "FILE")]
    pub header: Option<PathBuf>,

    /// Print source file dependencies (one per line) and exit
    #[arg(short = 'd', long = "deps")]
    pub deps: bool,

    /// Also write a Makefile-format dependency file
    #[arg(short = 'M', long = "depfile", value_name = "FILE")]
    pub depfile: Option<PathBuf>,

    /// Show version information
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    pub version: Option<bool>,

    /// Enable verbose logging (debug level)
    #[arg(long)]
    pub verbose: bool,
}

/// What a validated command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Print the manifest's source dependencies.
    Deps {
        /// Manifest path
        config: PathBuf,
    },
    /// Generate the C source and header.
    Generate(GenerateArgs),
}

/// Arguments of the generation mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateArgs {
    /// Base name for generated symbols
    pub name: String,
    /// Manifest path
    pub config: PathBuf,
    /// Generated source path
    pub output: PathBuf,
    /// Generated header path
    pub header: PathBuf,
    /// Optional Makefile dependency file
    pub depfile: Option<PathBuf>,
}

impl Cli {
    /// Checks the flags required by the selected mode.
    ///
    /// Dependency mode only needs `-c`; generation needs `-n`, `-c`, `-o`
    /// and `-H`.
    ///
    /// # Errors
    ///
    /// Returns an error naming every missing flag.
    pub fn into_mode(self) -> Result<Mode> {
        let mut missing = Vec::new();
        if self.config.is_none() {
            missing.push("-c/--config");
        }

        if self.deps {
            return match self.config {
                Some(config) => Ok(Mode::Deps { config }),
                None => bail!("{}", missing_message(&missing)),
            };
        }

        if self.name.is_none() {
            missing.push("-n/--name");
        }
        if self.output.is_none() {
            missing.push("-o/--output");
        }
        if self.header.is_none() {
            missing.push("-H/--header");
        }

        match (self.name, self.config, self.output, self.header) {
            (Some(name), Some(config), Some(output), Some(header)) => {
                Ok(Mode::Generate(GenerateArgs {
                    name,
                    config,
                    output,
                    header,
                    depfile: self.depfile,
                }))
            }
            _ => bail!("{}", missing_message(&missing)),
        }
    }
}

fn missing_message(missing: &[&str]) -> String {
    let flags = missing
        .iter()
        .map(|flag| format!("{flag} is required"))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{flags}\n\n{USAGE}")
}
