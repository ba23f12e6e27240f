use std::collections::HashMap;
use tracing::debug;

use crate::error::{GradebookError, Result};
use crate::report::types::SubjectMark;
use crate::schema::Subject;
use crate::store::RecordStore;

/// Left-joins the grade rows of `student_id` with the subjects table.
///
/// Rows come back in grade-file order. A grade whose subject code is unknown
/// keeps its marks and gets no subject name.
///
/// # Errors
///
/// [`GradebookError::NotFound`] when the student has no grade rows.
#[tracing::instrument(skip(store))]
pub fn subject_marks(store: &RecordStore, student_id: &str) -> Result<Vec<SubjectMark>> {
    let grades = store.grades_for(student_id)?;
    if grades.is_empty() {
        return Err(GradebookError::NotFound {
            student_id: student_id.to_string(),
        });
    }

    // First occurrence wins if a hand-edited file repeats a code.
    let mut names: HashMap<String, String> = HashMap::new();
    for subject in store.load::<Subject>()? {
        names.entry(subject.code).or_insert(subject.name);
    }

    let rows: Vec<SubjectMark> = grades
        .into_iter()
        .map(|g| SubjectMark {
            subject_name: names.get(&g.subject_code).cloned(),
            subject_code: g.subject_code,
            marks: g.marks,
        })
        .collect();

    let unmatched = rows.iter().filter(|r| r.subject_name.is_none()).count();
    debug!(rows = rows.len(), unmatched, "Subject marks joined");

    Ok(rows)
}
