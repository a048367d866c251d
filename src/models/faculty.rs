//! Faculty model.
//!
//! A faculty member teaches the subjects assigned to them and carries a
//! weekly teaching-load cap: the maximum number of periods they may be
//! given across the whole week.

use serde::{Deserialize, Serialize};

/// A teaching staff member.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faculty {
    /// Unique faculty identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Job title (e.g., "Asst. Professor").
    #[serde(default)]
    pub designation: String,
    /// Owning department.
    #[serde(default)]
    pub department: String,
    /// Weekly teaching-load cap in periods.
    pub weekly_load: u32,
}

impl Faculty {
    /// Creates a faculty member with the given load cap.
    pub fn new(id: impl Into<String>, weekly_load: u32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            designation: String::new(),
            department: String::new(),
            weekly_load,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the designation.
    pub fn with_designation(mut self, designation: impl Into<String>) -> Self {
        self.designation = designation.into();
        self
    }

    /// Sets the department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }
}
