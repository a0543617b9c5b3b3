//! Error types for the promptbatch CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.
//!
//! Per-row batch failures are deliberately *not* represented here: a row that
//! fails validation is data (`ExecutionResult { success: false, .. }`), never
//! an error that aborts the batch. Only structural problems (bad CSV shape,
//! missing templates, broken declarations) surface as `PromptError`.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for promptbatch operations.
///
/// Each variant maps to a specific exit code so scripts can distinguish
/// structural CSV problems from lookup failures and row-level batch failures.
#[derive(Error, Debug)]
pub enum PromptError {
    /// User provided invalid arguments or the library is in an invalid state.
    #[error("{0}")]
    UserError(String),

    /// A template's declared variables violate an invariant
    /// (duplicate names, empty names) or the template file cannot be parsed.
    #[error("Invalid template: {0}")]
    TemplateError(String),

    /// CSV input is structurally unusable: zero rows or an empty header.
    #[error("Invalid CSV: {0}")]
    CsvError(String),

    /// A referenced template or collection does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Batch execution completed, but some rows failed validation.
    ///
    /// Raised by the CLI after the full summary has been printed; the batch
    /// itself always runs to completion.
    #[error("{failed} of {total} rows failed")]
    BatchFailures {
        /// Number of rows that produced a failure result.
        failed: usize,
        /// Total number of rows executed.
        total: usize,
    },
}

impl PromptError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            PromptError::UserError(_) => exit_codes::USER_ERROR,
            PromptError::TemplateError(_) => exit_codes::USER_ERROR,
            PromptError::CsvError(_) => exit_codes::CSV_FAILURE,
            PromptError::NotFound(_) => exit_codes::NOT_FOUND,
            PromptError::BatchFailures { .. } => exit_codes::BATCH_FAILURE,
        }
    }
}

/// Result type alias for promptbatch operations.
pub type Result<T> = std::result::Result<T, PromptError>;
