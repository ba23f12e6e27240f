//! Text bar chart of a student's marks per subject.

use std::fmt::Write;

use crate::report::SubjectMark;

/// Default number of columns used by the longest bar.
pub const DEFAULT_WIDTH: usize = 40;

/// Widths above this are clamped.
pub const MAX_WIDTH: usize = 200;

const BAR: char = '#';

/// Renders one horizontal bar per row, scaled so the highest mark fills
/// `width` columns (at most [`MAX_WIDTH`]). Rows with non-positive marks get
/// an empty bar.
pub fn render(student_id: &str, rows: &[SubjectMark], width: usize) -> String {
    let width = width.min(MAX_WIDTH);
    let mut out = String::new();
    let _ = writeln!(out, "Performance of {student_id}");

    let labels: Vec<String> = rows.iter().map(SubjectMark::label).collect();
    let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let max = rows.iter().map(|r| r.marks).fold(0.0_f64, f64::max);

    for (row, label) in rows.iter().zip(&labels) {
        let bar = BAR.to_string().repeat(bar_len(row.marks, max, width));
        let _ = writeln!(
            out,
            "{label:<label_width$} | {bar:<width$} {marks:.2}",
            marks = row.marks
        );
    }

    out
}

fn bar_len(marks: f64, max: f64, width: usize) -> usize {
    if marks <= 0.0 || max <= 0.0 {
        return 0;
    }
    ((marks / max) * width as f64).round() as usize
}
