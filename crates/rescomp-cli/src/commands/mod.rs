//! Mode implementations for the rescomp CLI.
//!
//! Each module runs one mode of the compiler and reports success through
//! an [`ExitCode`](rescomp_core::cli::ExitCode); failures propagate as
//! `anyhow` errors with context.

pub mod deps;
pub mod generate;
