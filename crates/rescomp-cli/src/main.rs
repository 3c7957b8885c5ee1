//! rescomp - build-time resource compiler.
//!
//! Compiles a JSON manifest into a C source file embedding every referenced
//! file and a header declaring one symbol per folder and file.
//!
//! # Examples
//!
//! ```bash
//! # Generate resources
//! rescomp -n assets -c assets.json -o assets.c -H assets.h
//!
//! # Also write a Makefile dependency file
//! rescomp -n assets -c assets.json -o assets.c -H assets.h -M assets.d
//!
//! # List the files the manifest embeds
//! rescomp -d -c assets.json
//! ```

use clap::Parser;
use colored::Colorize;
use rescomp_cli::{Cli, runner};
use rescomp_core::cli::ExitCode;

fn main() -> std::process::ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and succeed.
            let code = if e.use_stderr() {
                ExitCode::ERROR
            } else {
                ExitCode::SUCCESS
            };
            let _ = e.print();
            return code.into();
        }
    };

    if let Err(e) = runner::init_logging(cli.verbose) {
        eprintln!("{} {e:#}", "Error:".red().bold());
        return ExitCode::ERROR.into();
    }

    let result = cli.into_mode().and_then(|mode| runner::execute(&mode));
    match result {
        Ok(code) => code.into(),
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".red().bold());
            ExitCode::ERROR.into()
        }
    }
}
