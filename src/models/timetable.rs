//! Timetable (solution) model.
//!
//! A timetable is the set of entries produced by one generation run.
//! Each entry says: this subject occupies this room with this faculty,
//! for this section (and batch, if a lab), at this day and period.
//!
//! Entries are appended once and never mutated in place; edits are the
//! caller's business on the returned collection.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{Day, Period};

/// Entry identifier, unique within one run.
pub type EntryId = u64;

/// One placed period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableEntry {
    /// Run-unique identifier.
    pub id: EntryId,
    /// Teaching day.
    pub day: Day,
    /// Period index.
    pub period: Period,
    /// Placed subject.
    pub subject_id: String,
    /// Teaching faculty.
    pub faculty_id: String,
    /// Room used.
    pub room_id: String,
    /// Section attending.
    pub section_id: String,
    /// Parallel lab stream label; `None` for whole-section sessions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch: Option<char>,
}

/// A timetable constraint violation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related entity ID (faculty, room, section, or subject).
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of timetable violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationType {
    /// A faculty member is in two places in the same slot.
    FacultyClash,
    /// A room hosts two sessions in the same slot.
    RoomClash,
    /// A section attends two sessions in the same slot outside a lab block.
    SectionClash,
    /// A theory subject exceeds its per-day cap for a section.
    DailyCapExceeded,
    /// A lab batch has a lone period instead of a pair.
    UnpairedLabPeriod,
    /// A faculty member exceeds their weekly load cap.
    LoadCapExceeded,
    /// A section has more than one lab block on a day.
    MultipleLabBlocks,
}

impl Violation {
    /// Creates a violation.
    pub fn new(
        violation_type: ViolationType,
        entity_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violation_type,
            entity_id: entity_id.into(),
            message: message.into(),
        }
    }
}

/// The ordered output of a generation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timetable {
    /// Placed entries.
    pub entries: Vec<TimetableEntry>,
}

impl Timetable {
    /// Creates an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn push(&mut self, entry: TimetableEntry) {
        self.entries.push(entry);
    }

    /// Sorts by day (canonical weekday order), then period.
    ///
    /// The sort is stable, so entries sharing a slot keep placement order.
    pub fn sort_canonical(&mut self) {
        self.entries.sort_by_key(|e| (e.day, e.period));
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries were placed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries for a section.
    pub fn for_section(&self, section_id: &str) -> Vec<&TimetableEntry> {
        self.entries
            .iter()
            .filter(|e| e.section_id == section_id)
            .collect()
    }

    /// All entries taught by a faculty member.
    pub fn for_faculty(&self, faculty_id: &str) -> Vec<&TimetableEntry> {
        self.entries
            .iter()
            .filter(|e| e.faculty_id == faculty_id)
            .collect()
    }

    /// All entries hosted in a room.
    pub fn for_room(&self, room_id: &str) -> Vec<&TimetableEntry> {
        self.entries.iter().filter(|e| e.room_id == room_id).collect()
    }

    /// All entries of a subject.
    pub fn for_subject(&self, subject_id: &str) -> Vec<&TimetableEntry> {
        self.entries
            .iter()
            .filter(|e| e.subject_id == subject_id)
            .collect()
    }

    /// All entries on one day.
    pub fn for_day(&self, day: Day) -> Vec<&TimetableEntry> {
        self.entries.iter().filter(|e| e.day == day).collect()
    }

    /// Entries a section attends in one slot (several for lab batches).
    pub fn at(&self, section_id: &str, day: Day, period: Period) -> Vec<&TimetableEntry> {
        self.entries
            .iter()
            .filter(|e| e.section_id == section_id && e.day == day && e.period == period)
            .collect()
    }

    /// Number of periods assigned to each faculty member.
    pub fn faculty_loads(&self) -> HashMap<String, u32> {
        let mut loads: HashMap<String, u32> = HashMap::new();
        for e in &self.entries {
            *loads.entry(e.faculty_id.clone()).or_insert(0) += 1;
        }
        loads
    }
}
