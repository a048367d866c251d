//! Subject model.
//!
//! A subject is a course taught to every section in its scope, either as
//! single-period lectures (`Theory`) or as paired-period laboratory
//! sessions (`Lab`).
//!
//! # Scope
//! A subject applies to a section when year and semester match and its
//! section letter is empty (common to all sections) or equal to the
//! section's letter.

use serde::{Deserialize, Serialize};

use super::Section;

/// Session type shared by subjects and rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionKind {
    /// Single-period lecture.
    Theory,
    /// Two-period laboratory session.
    Lab,
}

/// A subject to be scheduled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    /// Unique subject identifier.
    pub id: String,
    /// Catalogue code (e.g., "PC701IT"). Filler subjects are found by code.
    #[serde(default)]
    pub code: String,
    /// Full name.
    #[serde(default)]
    pub name: String,
    /// Short display name.
    #[serde(default)]
    pub abbreviation: String,
    /// Lecture or lab.
    #[serde(rename = "type")]
    pub kind: SessionKind,
    /// Academic year in scope.
    pub year: u32,
    /// Semester in scope.
    pub semester: u32,
    /// Section letter in scope; empty = common to all sections.
    #[serde(default)]
    pub section: String,
    /// Periods required per week.
    pub periods_per_week: u32,
    /// The faculty member who teaches this subject.
    pub assigned_faculty_id: String,
}

impl Subject {
    /// Creates a subject with an empty (common) section scope.
    pub fn new(
        id: impl Into<String>,
        kind: SessionKind,
        year: u32,
        semester: u32,
        periods_per_week: u32,
        assigned_faculty_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            code: String::new(),
            name: String::new(),
            abbreviation: String::new(),
            kind,
            year,
            semester,
            section: String::new(),
            periods_per_week,
            assigned_faculty_id: assigned_faculty_id.into(),
        }
    }

    /// Creates a lecture subject.
    pub fn theory(
        id: impl Into<String>,
        year: u32,
        semester: u32,
        periods_per_week: u32,
        faculty_id: impl Into<String>,
    ) -> Self {
        Self::new(id, SessionKind::Theory, year, semester, periods_per_week, faculty_id)
    }

    /// Creates a lab subject.
    pub fn lab(
        id: impl Into<String>,
        year: u32,
        semester: u32,
        periods_per_week: u32,
        faculty_id: impl Into<String>,
    ) -> Self {
        Self::new(id, SessionKind::Lab, year, semester, periods_per_week, faculty_id)
    }

    /// Sets the catalogue code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Sets the full name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the abbreviation.
    pub fn with_abbreviation(mut self, abbreviation: impl Into<String>) -> Self {
        self.abbreviation = abbreviation.into();
        self
    }

    /// Restricts the subject to one section letter.
    pub fn for_section(mut self, letter: impl Into<String>) -> Self {
        self.section = letter.into();
        self
    }

    /// Whether this subject is taught to `section`.
    pub fn applies_to(&self, section: &Section) -> bool {
        self.year == section.year
            && self.semester == section.semester
            && (self.section.is_empty() || self.section == section.name)
    }

    /// Whether this is a lab subject.
    #[inline]
    pub fn is_lab(&self) -> bool {
        self.kind == SessionKind::Lab
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_common_and_lettered() {
        let sec_a = Section::new("s2", 3, 5, "A");
        let sec_b = Section::new("s3", 3, 5, "B");

        let common = Subject::theory("t1", 3, 5, 3, "f1");
        assert!(common.applies_to(&sec_a));
        assert!(common.applies_to(&sec_b));

        let only_a = Subject::theory("t2", 3, 5, 3, "f1").for_section("A");
        assert!(only_a.applies_to(&sec_a));
        assert!(!only_a.applies_to(&sec_b));
    }

    #[test]
    fn test_scope_year_and_semester() {
        let sec = Section::new("s1", 4, 7, "A");
        assert!(!Subject::theory("t", 4, 8, 3, "f1").applies_to(&sec));
        assert!(!Subject::theory("t", 3, 7, 3, "f1").applies_to(&sec));
    }

    #[test]
    fn test_subject_wire_format() {
        let s: Subject = serde_json::from_str(
            r#"{"id":"l1","code":"PC751IT","type":"Lab","year":4,"semester":7,
                "section":"","periodsPerWeek":3,"assignedFacultyId":"f5"}"#,
        )
        .unwrap();
        assert!(s.is_lab());
        assert_eq!(s.periods_per_week, 3);
        assert_eq!(s.assigned_faculty_id, "f5");
    }
}
