//! Structured error handling and exit codes.

use serde::Serialize;

/// Exit codes for the dupmatch application.
///
/// - 0: Success (matching completed, with or without duplicates)
/// - 1: General error (unexpected failure)
/// - 2: Match failed (an argument is not a directory, or snapshots differ)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: Matching completed.
    Success = 0,
    /// General error: An unexpected error occurred.
    GeneralError = 1,
    /// Match failed: Matching could not be performed.
    MatchFailed = 2,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "DM000",
            Self::GeneralError => "DM001",
            Self::MatchFailed => "DM002",
        }
    }

    /// Exit code for a match outcome.
    #[must_use]
    pub fn from_success(success: bool) -> Self {
        if success {
            Self::Success
        } else {
            Self::MatchFailed
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "DM001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: err.to_string(),
        }
    }
}
