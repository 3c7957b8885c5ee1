//! rescomp CLI library.
//!
//! Argument parsing, logging setup and the two modes of the compiler,
//! exposed as a library so they can be tested without spawning the binary.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod cli;
pub mod commands;
pub mod runner;

pub use cli::{Cli, GenerateArgs, Mode};
