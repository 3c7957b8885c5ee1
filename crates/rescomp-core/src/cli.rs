//! CLI-specific types.
//!
//! # Examples
//!
//! ```
//! use rescomp_core::cli::ExitCode;
//!
//! let code = ExitCode::SUCCESS;
//! assert_eq!(code.as_i32(), 0);
//! ```

use std::fmt;

/// CLI exit code with semantic meaning.
///
/// The compiler only distinguishes success from failure: every error
/// (missing flag, manifest failure, generation failure, depfile failure)
/// exits with 1.
///
/// # Examples
///
/// ```
/// use rescomp_core::cli::ExitCode;
///
/// assert!(ExitCode::SUCCESS.is_success());
/// assert!(!ExitCode::ERROR.is_success());
/// assert_eq!(ExitCode::from_i32(1), ExitCode::ERROR);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Successful execution (exit code 0).
    pub const SUCCESS: Self = Self(0);

    /// Any failure (exit code 1).
    pub const ERROR: Self = Self(1);

    /// Creates an exit code from an integer value.
    #[must_use]
    pub const fn from_i32(code: i32) -> Self {
        Self(code)
    }

    /// Returns the exit code as an integer.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }

    /// Checks if the exit code represents success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.0 == 0
    }
}

impl Default for ExitCode {
    fn default() -> Self {
        Self::SUCCESS
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        // Exit codes used by the compiler always fit in a byte.
        Self::from(u8::try_from(code.0).unwrap_or(1))
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
