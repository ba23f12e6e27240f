//! Error taxonomy for gradebook operations.
//!
//! Every variant is reported to the user as a message; none of them are
//! meant to abort an interactive session.

use thiserror::Error;

use crate::schema::Table;

pub type Result<T, E = GradebookError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum GradebookError {
    /// A required form field was empty.
    #[error("Please fill all fields (missing {field}).")]
    Validation { field: &'static str },

    /// The key column value is already present in the table.
    #[error("{} already exists.", .table.key_label())]
    DuplicateKey { table: Table, key: String },

    /// Marks input did not parse as a finite number.
    #[error("Marks must be a number.")]
    InvalidMarks { value: String },

    /// No grade rows matched the lookup key.
    #[error("No grades found for this student.")]
    NotFound { student_id: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl GradebookError {
    /// Returns `true` for errors caused by user input rather than storage.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, GradebookError::Io(_) | GradebookError::Csv(_))
    }
}
