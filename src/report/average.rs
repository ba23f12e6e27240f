use tracing::debug;

use crate::error::{GradebookError, Result};
use crate::report::types::Gpa;
use crate::report::utility::mean;
use crate::store::RecordStore;

/// Averages the marks of every grade row belonging to `student_id`.
///
/// # Errors
///
/// [`GradebookError::NotFound`] when the student has no grade rows.
#[tracing::instrument(skip(store))]
pub fn average_marks(store: &RecordStore, student_id: &str) -> Result<Gpa> {
    let marks: Vec<f64> = store
        .grades_for(student_id)?
        .iter()
        .map(|g| g.marks)
        .collect();

    if marks.is_empty() {
        return Err(GradebookError::NotFound {
            student_id: student_id.to_string(),
        });
    }

    let average = mean(&marks);
    debug!(grade_count = marks.len(), average, "Average computed");

    Ok(Gpa {
        student_id: student_id.to_string(),
        average,
        grade_count: marks.len(),
    })
}
