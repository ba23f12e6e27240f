//! Form input parsing.
//!
//! Raw text fields are turned into typed rows here, before the store is
//! touched. Field order matters: the first empty field is the one reported.

use crate::error::{GradebookError, Result};
use crate::schema::{Grade, Student, Subject};

/// Raw fields of the "Add Student" form.
#[derive(Debug, Default, Clone)]
pub struct StudentForm {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Raw fields of the "Add Subject" form.
#[derive(Debug, Default, Clone)]
pub struct SubjectForm {
    pub code: String,
    pub name: String,
}

/// Raw fields of the "Add Grade" form. Marks are still text here.
#[derive(Debug, Default, Clone)]
pub struct GradeForm {
    pub student_id: String,
    pub subject_code: String,
    pub marks: String,
}

impl StudentForm {
    pub fn parse(&self) -> Result<Student> {
        Ok(Student {
            id: required("student_id", &self.id)?,
            name: required("name", &self.name)?,
            email: required("email", &self.email)?,
        })
    }
}

impl SubjectForm {
    pub fn parse(&self) -> Result<Subject> {
        Ok(Subject {
            code: required("subject_code", &self.code)?,
            name: required("subject_name", &self.name)?,
        })
    }
}

impl GradeForm {
    pub fn parse(&self) -> Result<Grade> {
        let student_id = required("student_id", &self.student_id)?;
        let subject_code = required("subject_code", &self.subject_code)?;
        let marks = required("marks", &self.marks)?;

        Ok(Grade {
            student_id,
            subject_code,
            marks: parse_marks(&marks)?,
        })
    }
}

/// Trims `value` and rejects it if nothing is left.
pub fn required(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GradebookError::Validation { field });
    }
    Ok(trimmed.to_string())
}

/// Parses a marks value. NaN and infinities are rejected along with text.
pub fn parse_marks(value: &str) -> Result<f64> {
    match value.trim().parse::<f64>() {
        Ok(marks) if marks.is_finite() => Ok(marks),
        _ => Err(GradebookError::InvalidMarks {
            value: value.to_string(),
        }),
    }
}
