//! Section model.
//!
//! A section is one class cohort (year, semester, letter) with its own
//! default classroom. Lab batches are subdivisions of a section.

use serde::{Deserialize, Serialize};

/// An academic section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Unique section identifier.
    pub id: String,
    /// Academic year (1 = first year).
    pub year: u32,
    /// Semester.
    pub semester: u32,
    /// Section letter (e.g., "A").
    pub name: String,
    /// Class teacher (informational).
    #[serde(default)]
    pub class_teacher_id: String,
    /// Lecture room used for theory sessions.
    #[serde(default)]
    pub default_room_id: String,
}

impl Section {
    /// Creates a section.
    pub fn new(id: impl Into<String>, year: u32, semester: u32, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            year,
            semester,
            name: name.into(),
            class_teacher_id: String::new(),
            default_room_id: String::new(),
        }
    }

    /// Sets the default lecture room.
    pub fn with_default_room(mut self, room_id: impl Into<String>) -> Self {
        self.default_room_id = room_id.into();
        self
    }

    /// Sets the class teacher.
    pub fn with_class_teacher(mut self, faculty_id: impl Into<String>) -> Self {
        self.class_teacher_id = faculty_id.into();
        self
    }
}
