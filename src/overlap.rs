use std::collections::HashMap;

use crate::models::{EnrollmentRecord, Roster};

/// Enrollment records grouped by student name, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlapMap {
    entries: Vec<(String, Vec<EnrollmentRecord>)>,
    index: HashMap<String, usize>,
}

impl OverlapMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_or_append(&mut self, name: &str, record: EnrollmentRecord) {
        match self.index.get(name) {
            Some(&position) => self.entries[position].1.push(record),
            None => {
                self.index.insert(name.to_string(), self.entries.len());
                self.entries.push((name.to_string(), vec![record]));
            }
        }
    }

    pub fn retain_overlapping(&mut self) {
        self.entries.retain(|(_, records)| records.len() > 1);
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(position, (name, _))| (name.clone(), position))
            .collect();
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&[EnrollmentRecord]> {
        self.index
            .get(name)
            .map(|&position| self.entries[position].1.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[EnrollmentRecord])> {
        self.entries
            .iter()
            .map(|(name, records)| (name.as_str(), records.as_slice()))
    }
}

/// Grouped by display name, so two people sharing a name are reported as one.
pub fn find_overlap(rosters: &[Roster], excluded_id: Option<i64>) -> OverlapMap {
    let mut overlap = OverlapMap::new();

    for roster in rosters {
        for student in &roster.students {
            if excluded_id == Some(student.id) {
                continue;
            }

            overlap.insert_or_append(
                &student.name,
                EnrollmentRecord {
                    course_id: roster.course_id,
                    avatar_url: student.avatar_url.clone(),
                },
            );
        }
    }

    overlap.retain_overlapping();
    overlap
}
