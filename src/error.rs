//! Error types for the result-sheet engine

use thiserror::Error;

/// Result type alias for the result-sheet engine
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the result-sheet engine
#[derive(Error, Debug)]
pub enum Error {
    /// Result-sheet file not found
    #[error("result sheet not found: {path}")]
    SheetNotFound { path: String },

    /// PDF could not be read at all (corrupt, encrypted, not a PDF)
    #[error("unreadable document: {reason}")]
    UnreadableDocument { reason: String },

    /// Document parsed but no grade-bearing lines matched.
    /// Carries the per-line warnings so a layout mismatch can be diagnosed.
    #[error("no grade records found in document ({} line warnings)", .warnings.len())]
    NoRecordsFound { warnings: Vec<String> },

    /// Input exceeds the configured size cap
    #[error("result sheet too large: {size} bytes (max: {max_size} bytes)")]
    SheetTooLarge { size: usize, max_size: usize },

    /// Attempted resubmission of a module already locked at C-or-better
    #[error("grade for {module_code} is locked at {grade} and cannot be changed")]
    GradeLocked { module_code: String, grade: String },

    /// Grade token not present in the vocabulary where a valid grade is required
    #[error("invalid grade token: {token}")]
    InvalidGradeToken { token: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Return a sanitized error message safe to surface to end users.
    /// Internal details (paths, library errors) are omitted.
    /// Full details should be logged via tracing before calling this.
    pub fn user_message(&self) -> String {
        match self {
            Error::SheetNotFound { .. } => "Result sheet not found".to_string(),
            Error::UnreadableDocument { .. } => "Could not read the uploaded file".to_string(),
            Error::NoRecordsFound { .. } => {
                "No grade records were recognized in the document".to_string()
            }
            Error::SheetTooLarge { max_size, .. } => {
                format!("File exceeds maximum size of {} bytes", max_size)
            }
            Error::GradeLocked { module_code, .. } => {
                format!("The grade for {} is final and cannot be changed", module_code)
            }
            Error::InvalidGradeToken { token } => format!("Invalid grade: {}", token),
            Error::Io(_) => "I/O error".to_string(),
            Error::Serialization(_) => "Serialization error".to_string(),
        }
    }
}
