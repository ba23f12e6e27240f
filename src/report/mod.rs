//! Per-student reports over the grade table.
//!
//! [`average_marks`] computes the simple average-marks "GPA" and
//! [`subject_marks`] joins a student's grades with subject names for charting.

pub mod average;
pub mod join;
pub mod types;
pub mod utility;

pub use average::average_marks;
pub use join::subject_marks;
pub use types::{Gpa, SubjectMark};
