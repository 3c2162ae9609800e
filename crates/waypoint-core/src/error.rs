//! Error types for the wizard library.
//!
//! Navigation mistakes are not errors: the state machine rejects them and
//! reports a [`crate::machine::Rejection`]. The variants below cover the
//! things that can genuinely fail: building a malformed step table and
//! reading or writing drafts.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::StepId;

/// Comprehensive error type for all wizard operations.
#[derive(Error, Debug)]
pub enum WizardError {
    /// Step table failed construction-time validation
    #[error("Invalid step table '{table}': {reason}")]
    InvalidStepTable { table: String, reason: String },
    /// A step id that does not exist in the bound table
    #[error("Step with ID {id} not found")]
    StepNotFound { id: StepId },
    /// Unknown flow name
    #[error("Unknown flow '{name}'")]
    UnknownFlow { name: String },
    /// Draft written by a different record schema
    #[error("Draft for '{flow}' has schema version {found}, expected {expected}")]
    DraftVersion {
        flow: String,
        found: u32,
        expected: u32,
    },
    /// Draft belongs to another flow
    #[error("Draft belongs to flow '{found}', expected '{expected}'")]
    DraftFlowMismatch { found: String, expected: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
}

/// Builder for step table validation errors.
pub struct InvalidStepTableBuilder {
    table: String,
}

impl InvalidStepTableBuilder {
    /// Create a new builder for the named table.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> WizardError {
        WizardError::InvalidStepTable {
            table: self.table,
            reason: reason.into(),
        }
    }
}

impl WizardError {
    /// Creates a builder for step table validation errors.
    pub fn invalid_table(table: impl Into<String>) -> InvalidStepTableBuilder {
        InvalidStepTableBuilder::new(table)
    }

    /// Wraps an I/O error with the path it occurred at.
    pub fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }
}

/// Extension trait for attaching a path to I/O results.
pub trait IoResultExt<T> {
    /// Map I/O errors to [`WizardError::FileSystem`] at `path`.
    fn at_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::result::Result<T, std::io::Error> {
    fn at_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| WizardError::file_system(path, e))
    }
}

/// Result type alias for wizard operations
pub type Result<T> = std::result::Result<T, WizardError>;
