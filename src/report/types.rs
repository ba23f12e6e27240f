//! Result types returned by the report functions.

use serde::Serialize;
use std::fmt;

use crate::report::utility::round2;

/// Average marks of one student over all of their grade rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gpa {
    pub student_id: String,
    #[serde(serialize_with = "serialize_rounded")]
    pub average: f64,
    pub grade_count: usize,
}

impl fmt::Display for Gpa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GPA (Average Marks): {:.2}", self.average)
    }
}

/// One grade row joined with its subject.
///
/// `subject_name` is `None` when the grade references a subject code that is
/// not in the subjects table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectMark {
    pub subject_code: String,
    pub subject_name: Option<String>,
    pub marks: f64,
}

impl SubjectMark {
    /// Name to show for this row; unknown subjects fall back to `[CODE]`.
    pub fn label(&self) -> String {
        match &self.subject_name {
            Some(name) => name.clone(),
            None => format!("[{}]", self.subject_code),
        }
    }
}

fn serialize_rounded<S: serde::Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round2(*value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpa_display_two_decimals() {
        let gpa = Gpa {
            student_id: "s1".into(),
            average: 250.0 / 3.0,
            grade_count: 3,
        };
        assert_eq!(gpa.to_string(), "GPA (Average Marks): 83.33");
    }

    #[test]
    fn test_gpa_json_is_rounded() {
        let gpa = Gpa {
            student_id: "s1".into(),
            average: 200.0 / 3.0,
            grade_count: 3,
        };
        let json = serde_json::to_value(&gpa).unwrap();
        assert_eq!(json["average"], 66.67);
    }

    #[test]
    fn test_label_falls_back_to_code() {
        let known = SubjectMark {
            subject_code: "MATH".into(),
            subject_name: Some("Mathematics".into()),
            marks: 90.0,
        };
        let unknown = SubjectMark {
            subject_code: "X99".into(),
            subject_name: None,
            marks: 40.0,
        };

        assert_eq!(known.label(), "Mathematics");
        assert_eq!(unknown.label(), "[X99]");
    }
}
