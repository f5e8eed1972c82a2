use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

pub const OTHER_TERM: &str = "Other";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub term: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Student {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    pub course_id: i64,
    pub students: Vec<Student>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentRecord {
    pub course_id: i64,
    pub avatar_url: Option<String>,
}

pub type CourseNames = HashMap<i64, String>;

pub fn course_names(courses: &[Course]) -> CourseNames {
    courses
        .iter()
        .map(|course| (course.id, course.name.clone()))
        .collect()
}

#[derive(Debug, Deserialize)]
pub struct Profile {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct CourseEntry {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub term: Option<TermEntry>,
}

#[derive(Debug, Deserialize)]
pub struct TermEntry {
    #[serde(default)]
    pub name: Option<String>,
}

impl CourseEntry {
    pub fn term_name(&self) -> &str {
        self.term
            .as_ref()
            .and_then(|term| term.name.as_deref())
            .unwrap_or(OTHER_TERM)
    }

    /// Courses without a real term are dropped.
    pub fn into_course(self) -> Option<Course> {
        let term = self.term_name().to_string();
        if term == OTHER_TERM {
            return None;
        }

        Some(Course {
            id: self.id,
            name: self.name.unwrap_or_default(),
            term,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_term_resolves_to_other_and_is_dropped() {
        let entry: CourseEntry =
            serde_json::from_str(r#"{"id": 5, "name": "Orientation", "term": null}"#).unwrap();
        assert_eq!(entry.term_name(), "Other");
        assert!(entry.into_course().is_none());
    }

    #[test]
    fn literal_other_term_is_dropped() {
        let entry: CourseEntry =
            serde_json::from_str(r#"{"id": 6, "name": "Sandbox", "term": {"name": "Other"}}"#)
                .unwrap();
        assert!(entry.into_course().is_none());
    }

    #[test]
    fn termed_course_is_kept() {
        let entry: CourseEntry = serde_json::from_str(
            r#"{"id": 101, "name": "CSE 2221", "term": {"name": "Autumn 2024"}, "workflow_state": "available"}"#,
        )
        .unwrap();
        let course = entry.into_course().unwrap();
        assert_eq!(course.id, 101);
        assert_eq!(course.name, "CSE 2221");
        assert_eq!(course.term, "Autumn 2024");
    }

    #[test]
    fn null_student_name_does_not_spoil_the_page() {
        let page: Vec<Student> = serde_json::from_str(
            r#"[{"id":1,"name":"Alice","avatar_url":null},{"id":2,"name":null,"avatar_url":null}]"#,
        )
        .unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].name, "Alice");
        assert_eq!(page[1].name, "");
    }

    #[test]
    fn student_without_avatar_deserializes() {
        let student: Student = serde_json::from_str(r#"{"id": 2, "name": "Bob"}"#).unwrap();
        assert_eq!(student.avatar_url, None);
    }
}
