//! Row types for the three gradebook tables and their fixed on-disk schema.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three persisted tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Students,
    Subjects,
    Grades,
}

impl Table {
    pub const ALL: [Table; 3] = [Table::Students, Table::Subjects, Table::Grades];

    pub fn file_name(self) -> &'static str {
        match self {
            Table::Students => "students.csv",
            Table::Subjects => "subjects.csv",
            Table::Grades => "grades.csv",
        }
    }

    /// Column headers, in the order they are written.
    pub fn headers(self) -> &'static [&'static str] {
        match self {
            Table::Students => &["student_id", "name", "email"],
            Table::Subjects => &["subject_code", "subject_name"],
            Table::Grades => &["student_id", "subject_code", "marks"],
        }
    }

    /// Human label of the key column, used in duplicate-key messages.
    pub fn key_label(self) -> &'static str {
        match self {
            Table::Students => "Student ID",
            Table::Subjects => "Subject code",
            Table::Grades => "Grade",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Table::Students => "students",
            Table::Subjects => "subjects",
            Table::Grades => "grades",
        };
        f.write_str(name)
    }
}

/// A row that lives in one of the gradebook tables.
pub trait Record: Serialize + DeserializeOwned + Clone {
    const TABLE: Table;

    /// Value of the unique key column, or `None` for unkeyed tables.
    fn key(&self) -> Option<&str> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    #[serde(rename = "student_id")]
    pub id: String,
    pub name: String,
    pub email: String,
}

impl Record for Student {
    const TABLE: Table = Table::Students;

    fn key(&self) -> Option<&str> {
        Some(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(rename = "subject_code")]
    pub code: String,
    #[serde(rename = "subject_name")]
    pub name: String,
}

impl Record for Subject {
    const TABLE: Table = Table::Subjects;

    fn key(&self) -> Option<&str> {
        Some(&self.code)
    }
}

/// One mark for one student in one subject. Several per student are allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub student_id: String,
    pub subject_code: String,
    pub marks: f64,
}

impl Record for Grade {
    const TABLE: Table = Table::Grades;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys() {
        let student = Student {
            id: "s1".into(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
        };
        let grade = Grade {
            student_id: "s1".into(),
            subject_code: "MATH".into(),
            marks: 90.0,
        };

        assert_eq!(student.key(), Some("s1"));
        assert_eq!(grade.key(), None);
    }

    #[test]
    fn test_headers_match_serialized_columns() {
        let mut writer = csv::Writer::from_writer(vec![]);
        writer
            .serialize(Subject {
                code: "MATH".into(),
                name: "Mathematics".into(),
            })
            .unwrap();
        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();

        let header = out.lines().next().unwrap();
        assert_eq!(header, Table::Subjects.headers().join(","));
    }
}
