//! Core types and errors for the rescomp resource compiler.
//!
//! This crate provides the foundational types shared by every other crate
//! in the workspace:
//! - The error taxonomy (`Error`, `Result`)
//! - CLI exit codes

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod cli;
mod error;

pub use error::{Error, Result};
