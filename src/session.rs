//! Interactive menu session.
//!
//! One menu entry per form. Every failure is printed and the menu comes back;
//! only end of input or `q` ends the session.

use std::io::{BufRead, Write};
use tracing::{debug, error};

use crate::chart;
use crate::error::{GradebookError, Result};
use crate::gradebook::Gradebook;
use crate::input::{GradeForm, StudentForm, SubjectForm};
use crate::output;
use crate::schema::{Grade, Student, Subject};

const MENU: &str = "\
Gradebook Management System
  1) Add Student
  2) Add Subject
  3) Add Grade
  4) Calculate GPA
  5) View Chart
  6) List Students
  7) List Subjects
  8) List Grades
  q) Quit";

pub struct Session<'a, R, W> {
    book: &'a Gradebook,
    input: R,
    out: W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(book: &'a Gradebook, input: R, out: W) -> Self {
        Self { book, input, out }
    }

    /// Runs the menu loop until `q` or end of input.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.out, "{MENU}")?;
            let Some(choice) = self.prompt("> ")? else {
                break;
            };
            debug!(choice = %choice, "Menu choice");

            let outcome = match choice.as_str() {
                "1" => self.add_student(),
                "2" => self.add_subject(),
                "3" => self.add_grade(),
                "4" => self.calculate_gpa(),
                "5" => self.show_chart(),
                "6" => self.list_students(),
                "7" => self.list_subjects(),
                "8" => self.list_grades(),
                "q" | "Q" | "quit" => break,
                other => {
                    writeln!(self.out, "Unknown choice: {other}")?;
                    Ok(())
                }
            };

            match outcome {
                Ok(()) => {}
                Err(Interrupted) => break,
                Err(Failed(e)) if e.is_user_error() => writeln!(self.out, "Error: {e}")?,
                Err(Failed(e)) => {
                    error!(error = %e, "Operation failed");
                    writeln!(self.out, "Error: {e}")?;
                }
            }
        }
        Ok(())
    }

    fn add_student(&mut self) -> Step {
        let form = StudentForm {
            id: self.field("Student ID: ")?,
            name: self.field("Name: ")?,
            email: self.field("Email: ")?,
        };
        self.book.add_student(&form)?;
        writeln!(self.out, "Student added successfully.").map_err(GradebookError::from)?;
        Ok(())
    }

    fn add_subject(&mut self) -> Step {
        let form = SubjectForm {
            code: self.field("Subject Code: ")?,
            name: self.field("Subject Name: ")?,
        };
        self.book.add_subject(&form)?;
        writeln!(self.out, "Subject added successfully.").map_err(GradebookError::from)?;
        Ok(())
    }

    fn add_grade(&mut self) -> Step {
        let form = GradeForm {
            student_id: self.field("Student ID: ")?,
            subject_code: self.field("Subject Code: ")?,
            marks: self.field("Marks: ")?,
        };
        self.book.add_grade(&form)?;
        writeln!(self.out, "Grade added successfully.").map_err(GradebookError::from)?;
        Ok(())
    }

    fn calculate_gpa(&mut self) -> Step {
        let student_id = self.field("Enter Student ID: ")?;
        let gpa = self.book.average_marks(&student_id)?;
        output::write_gpa(&mut self.out, &gpa, false)?;
        Ok(())
    }

    fn show_chart(&mut self) -> Step {
        let student_id = self.field("Enter Student ID: ")?;
        let rows = self.book.subject_marks(&student_id)?;
        output::write_chart(
            &mut self.out,
            student_id.trim(),
            &rows,
            chart::DEFAULT_WIDTH,
            false,
        )?;
        Ok(())
    }

    fn list_students(&mut self) -> Step {
        let rows = self.book.store().load::<Student>()?;
        output::write_students(&mut self.out, &rows)?;
        Ok(())
    }

    fn list_subjects(&mut self) -> Step {
        let rows = self.book.store().load::<Subject>()?;
        output::write_subjects(&mut self.out, &rows)?;
        Ok(())
    }

    fn list_grades(&mut self) -> Step {
        let rows = self.book.store().load::<Grade>()?;
        output::write_grades(&mut self.out, &rows)?;
        Ok(())
    }

    /// Reads one form field; end of input interrupts the session.
    fn field(&mut self, label: &str) -> std::result::Result<String, StepError> {
        self.prompt(label)?.ok_or(Interrupted)
    }

    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.out, "{label}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

type Step = std::result::Result<(), StepError>;

enum StepError {
    /// Input ended in the middle of a form.
    Interrupted,
    Failed(GradebookError),
}

use StepError::{Failed, Interrupted};

impl From<GradebookError> for StepError {
    fn from(e: GradebookError) -> Self {
        Failed(e)
    }
}
