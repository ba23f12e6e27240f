//! User-facing gradebook operations.
//!
//! Each method takes raw form input, validates it, and runs it against the
//! injected [`RecordStore`]. Errors come back to the caller to be shown to
//! the user.

use tracing::{info, warn};

use crate::error::Result;
use crate::input::{GradeForm, StudentForm, SubjectForm, required};
use crate::report::{self, Gpa, SubjectMark};
use crate::schema::{Grade, Student, Subject};
use crate::store::RecordStore;

pub struct Gradebook {
    store: RecordStore,
}

impl Gradebook {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn add_student(&self, form: &StudentForm) -> Result<Student> {
        let student = form.parse()?;
        self.store.append(student.clone())?;
        info!(student_id = %student.id, "Student added");
        Ok(student)
    }

    pub fn add_subject(&self, form: &SubjectForm) -> Result<Subject> {
        let subject = form.parse()?;
        self.store.append(subject.clone())?;
        info!(subject_code = %subject.code, "Subject added");
        Ok(subject)
    }

    /// Appends a grade. Unknown student ids or subject codes are logged but
    /// not rejected, and an unreadable students or subjects table does not
    /// block the insert.
    pub fn add_grade(&self, form: &GradeForm) -> Result<Grade> {
        let grade = form.parse()?;

        match self.store.find::<Student>(&grade.student_id) {
            Ok(Some(_)) => {}
            Ok(None) => warn!(student_id = %grade.student_id, "Grade references unknown student"),
            Err(e) => warn!(error = %e, "Could not check student for grade"),
        }
        match self.store.find::<Subject>(&grade.subject_code) {
            Ok(Some(_)) => {}
            Ok(None) => warn!(subject_code = %grade.subject_code, "Grade references unknown subject"),
            Err(e) => warn!(error = %e, "Could not check subject for grade"),
        }

        self.store.append(grade.clone())?;
        info!(
            student_id = %grade.student_id,
            subject_code = %grade.subject_code,
            marks = grade.marks,
            "Grade added"
        );
        Ok(grade)
    }

    pub fn average_marks(&self, student_id: &str) -> Result<Gpa> {
        let student_id = required("student_id", student_id)?;
        report::average_marks(&self.store, &student_id)
    }

    pub fn subject_marks(&self, student_id: &str) -> Result<Vec<SubjectMark>> {
        let student_id = required("student_id", student_id)?;
        report::subject_marks(&self.store, &student_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GradebookError;

    fn gradebook() -> (tempfile::TempDir, Gradebook) {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::open(dir.path()).unwrap();
        (dir, Gradebook::new(store))
    }

    fn grade_form(student_id: &str, code: &str, marks: &str) -> GradeForm {
        GradeForm {
            student_id: student_id.into(),
            subject_code: code.into(),
            marks: marks.into(),
        }
    }

    #[test]
    fn test_invalid_marks_append_nothing() {
        let (_dir, book) = gradebook();

        let err = book.add_grade(&grade_form("s1", "MATH", "abc")).unwrap_err();
        assert!(matches!(err, GradebookError::InvalidMarks { .. }));
        assert!(book.store().load::<Grade>().unwrap().is_empty());
    }

    #[test]
    fn test_orphan_grade_is_accepted() {
        let (_dir, book) = gradebook();

        book.add_grade(&grade_form("ghost", "NONE", "61")).unwrap();
        assert_eq!(book.store().grades_for("ghost").unwrap().len(), 1);
    }

    #[test]
    fn test_malformed_reference_tables_do_not_block_grade() {
        let (_dir, book) = gradebook();
        let store = book.store();
        std::fs::write(
            store.path(crate::schema::Table::Students),
            "student_id,name,email\ns1,Ada\n",
        )
        .unwrap();
        std::fs::write(
            store.path(crate::schema::Table::Subjects),
            "subject_code,subject_name\nMATH,Maths,extra\n",
        )
        .unwrap();
        assert!(store.load::<Student>().is_err());

        book.add_grade(&grade_form("s1", "MATH", "72")).unwrap();
        assert_eq!(store.grades_for("s1").unwrap().len(), 1);
    }

    #[test]
    fn test_add_student_twice() {
        let (_dir, book) = gradebook();
        let form = StudentForm {
            id: "s1".into(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
        };

        book.add_student(&form).unwrap();
        let err = book.add_student(&form).unwrap_err();
        assert_eq!(err.to_string(), "Student ID already exists.");
    }

    #[test]
    fn test_blank_lookup_id_rejected() {
        let (_dir, book) = gradebook();
        assert!(matches!(
            book.average_marks("  ").unwrap_err(),
            GradebookError::Validation { field: "student_id" }
        ));
    }

    #[test]
    fn test_gpa_after_adding_grades() {
        let (_dir, book) = gradebook();
        for marks in ["80", "90", "70"] {
            book.add_grade(&grade_form("s1", "MATH", marks)).unwrap();
        }

        assert_eq!(book.average_marks("s1").unwrap().average, 80.0);
    }
}
