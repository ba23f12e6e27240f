//! Output formatting for reports and table listings.
//!
//! Supports plain text for people and pretty JSON for scripts.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use tracing::debug;

use crate::chart;
use crate::error::Result;
use crate::report::{Gpa, SubjectMark};
use crate::schema::{Grade, Student, Subject};

/// Envelope for JSON report output.
#[derive(Debug, Serialize)]
pub struct Report<T: Serialize> {
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub body: T,
}

#[derive(Debug, Serialize)]
pub struct ChartBody<'a> {
    pub student_id: &'a str,
    pub subjects: &'a [SubjectMark],
}

impl<T: Serialize> Report<T> {
    pub fn new(body: T) -> Self {
        Self {
            generated_at: Utc::now(),
            body,
        }
    }
}

/// Writes `value` as pretty-printed JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
    writeln!(out, "{json}")?;
    Ok(())
}

pub fn write_gpa<W: Write>(out: &mut W, gpa: &Gpa, json: bool) -> Result<()> {
    debug!(student_id = %gpa.student_id, json, "Writing GPA");
    if json {
        return write_json(out, &Report::new(gpa));
    }
    writeln!(out, "{gpa}")?;
    Ok(())
}

pub fn write_chart<W: Write>(
    out: &mut W,
    student_id: &str,
    rows: &[SubjectMark],
    width: usize,
    json: bool,
) -> Result<()> {
    debug!(student_id, rows = rows.len(), json, "Writing chart");
    if json {
        let body = ChartBody {
            student_id,
            subjects: rows,
        };
        return write_json(out, &Report::new(body));
    }
    write!(out, "{}", chart::render(student_id, rows, width))?;
    Ok(())
}

/// Writes the students table as aligned columns.
pub fn write_students<W: Write>(out: &mut W, rows: &[Student]) -> Result<()> {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|s| vec![s.id.clone(), s.name.clone(), s.email.clone()])
        .collect();
    write_columns(out, &["student_id", "name", "email"], &cells)
}

pub fn write_subjects<W: Write>(out: &mut W, rows: &[Subject]) -> Result<()> {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|s| vec![s.code.clone(), s.name.clone()])
        .collect();
    write_columns(out, &["subject_code", "subject_name"], &cells)
}

pub fn write_grades<W: Write>(out: &mut W, rows: &[Grade]) -> Result<()> {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|g| {
            vec![
                g.student_id.clone(),
                g.subject_code.clone(),
                format!("{:.2}", g.marks),
            ]
        })
        .collect();
    write_columns(out, &["student_id", "subject_code", "marks"], &cells)
}

fn write_columns<W: Write>(out: &mut W, headers: &[&str], rows: &[Vec<String>]) -> Result<()> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    write_line(out, &header, &widths)?;
    for row in rows {
        write_line(out, row, &widths)?;
    }
    Ok(())
}

fn write_line<W: Write>(out: &mut W, cells: &[String], widths: &[usize]) -> Result<()> {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    writeln!(out, "{}", line.join("  ").trim_end())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<F: FnOnce(&mut Vec<u8>) -> Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_gpa_text() {
        let gpa = Gpa {
            student_id: "s1".into(),
            average: 80.0,
            grade_count: 3,
        };
        let text = render(|out| write_gpa(out, &gpa, false));
        assert_eq!(text, "GPA (Average Marks): 80.00\n");
    }

    #[test]
    fn test_write_gpa_json_has_timestamp() {
        let gpa = Gpa {
            student_id: "s1".into(),
            average: 80.0,
            grade_count: 3,
        };
        let text = render(|out| write_gpa(out, &gpa, true));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["student_id"], "s1");
        assert_eq!(value["grade_count"], 3);
        assert!(value["generated_at"].is_string());
    }

    #[test]
    fn test_write_chart_json_keeps_null_name() {
        let rows = vec![SubjectMark {
            subject_code: "X99".into(),
            subject_name: None,
            marks: 40.0,
        }];
        let text = render(|out| write_chart(out, "s1", &rows, 10, true));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert!(value["subjects"][0]["subject_name"].is_null());
        assert_eq!(value["subjects"][0]["marks"], 40.0);
    }

    #[test]
    fn test_write_students_aligned() {
        let rows = vec![Student {
            id: "s1".into(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
        }];
        let text = render(|out| write_students(out, &rows));
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "student_id  name  email");
        assert_eq!(lines[1], "s1          Ada   ada@example.com");
    }
}
