//! Student and course records
//!
//! Read-only views of what the backend returns when a student ID is
//! validated. The PHP backend emits IDs as JSON strings or numbers
//! depending on the column type, so both are accepted.

use serde::{Deserialize, Deserializer, Serialize};

/// A course a student is enrolled in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Backend course identifier
    #[serde(deserialize_with = "string_or_number")]
    pub course_id: String,

    /// Display name
    pub course_name: String,
}

/// A student resolved by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Backend student identifier
    #[serde(deserialize_with = "string_or_number")]
    pub student_id: String,

    /// Display name
    pub student_name: String,

    /// Enrolled courses
    #[serde(default)]
    pub courses: Vec<Course>,
}

impl StudentRecord {
    /// The course to select without asking, if the student has exactly one
    #[must_use]
    pub fn sole_course(&self) -> Option<&Course> {
        match self.courses.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    /// Find an enrolled course by ID
    #[must_use]
    pub fn course(&self, course_id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.course_id == course_id)
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Int(n) => n.to_string(),
        Id::Float(n) => n.to_string(),
    })
}
