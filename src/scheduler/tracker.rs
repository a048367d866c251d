//! Availability tracker.
//!
//! Holds the mutable occupancy state of one generation run and answers
//! slot-legality queries. A tracker is created empty at the start of a
//! run, owned exclusively by it, and dropped at the end.
//!
//! # State
//! - faculty / room / section busy sets keyed by (id, day, period)
//! - cumulative faculty load, checked against each weekly cap
//! - per (subject, section, day) placement counts for the theory cap
//! - per (section, day) lab-block usage
//! - per section weekly library count
//! - the entry id counter
//!
//! All queries are hash lookups.

use std::collections::{HashMap, HashSet};

use crate::config::EngineConfig;
use crate::models::{Day, EntryId, Faculty, Period, TimetableEntry};

type SlotKey = (String, Day, Period);

fn slot(id: &str, day: Day, period: Period) -> SlotKey {
    (id.to_string(), day, period)
}

/// Occupancy state for one run.
#[derive(Debug, Clone)]
pub struct AvailabilityTracker {
    lunch_period: Period,
    theory_daily_cap: u32,
    library_subject_id: Option<String>,
    faculty_caps: HashMap<String, u32>,
    faculty_busy: HashSet<SlotKey>,
    room_busy: HashSet<SlotKey>,
    section_busy: HashSet<SlotKey>,
    faculty_load: HashMap<String, u32>,
    subject_day_count: HashMap<(String, String, Day), u32>,
    lab_day_usage: HashMap<(String, Day), HashSet<String>>,
    library_count: HashMap<String, u32>,
    next_id: EntryId,
}

impl AvailabilityTracker {
    /// Creates an empty tracker for the given faculty caps.
    pub fn new(config: &EngineConfig, faculty: &[Faculty]) -> Self {
        Self {
            lunch_period: config.calendar.lunch_period,
            theory_daily_cap: config.theory_daily_cap,
            library_subject_id: None,
            faculty_caps: faculty
                .iter()
                .map(|f| (f.id.clone(), f.weekly_load))
                .collect(),
            faculty_busy: HashSet::new(),
            room_busy: HashSet::new(),
            section_busy: HashSet::new(),
            faculty_load: faculty.iter().map(|f| (f.id.clone(), 0)).collect(),
            subject_day_count: HashMap::new(),
            lab_day_usage: HashMap::new(),
            library_count: HashMap::new(),
            next_id: 1,
        }
    }

    /// Marks which subject counts toward the weekly library quota.
    pub fn with_library_subject(mut self, subject_id: impl Into<String>) -> Self {
        self.library_subject_id = Some(subject_id.into());
        self
    }

    /// Whether faculty, room, and section are all free at (day, period).
    ///
    /// Also false for the lunch period, for empty faculty or room ids,
    /// and for faculty already at their weekly load cap.
    pub fn is_slot_free(
        &self,
        faculty_id: &str,
        room_id: &str,
        section_id: &str,
        day: Day,
        period: Period,
    ) -> bool {
        if period == self.lunch_period {
            return false;
        }
        if faculty_id.is_empty() || room_id.is_empty() {
            return false;
        }
        if self.faculty_busy.contains(&slot(faculty_id, day, period))
            || self.room_busy.contains(&slot(room_id, day, period))
            || self.section_busy.contains(&slot(section_id, day, period))
        {
            return false;
        }
        self.remaining_load(faculty_id) > 0
    }

    /// Whether the section is already attending something at (day, period).
    pub fn is_section_busy(&self, section_id: &str, day: Day, period: Period) -> bool {
        self.section_busy.contains(&slot(section_id, day, period))
    }

    /// Whether another theory period of `subject_id` fits on `day`.
    pub fn can_place_theory(&self, subject_id: &str, section_id: &str, day: Day) -> bool {
        self.subject_day_count(subject_id, section_id, day) < self.theory_daily_cap
    }

    /// Placements of a subject for a section on one day.
    pub fn subject_day_count(&self, subject_id: &str, section_id: &str, day: Day) -> u32 {
        self.subject_day_count
            .get(&(subject_id.to_string(), section_id.to_string(), day))
            .copied()
            .unwrap_or(0)
    }

    /// Marks faculty, room, and section busy and adds one period of load.
    ///
    /// Call exactly once per placed period.
    pub fn occupy(
        &mut self,
        faculty_id: &str,
        room_id: &str,
        section_id: &str,
        day: Day,
        period: Period,
    ) {
        self.faculty_busy.insert(slot(faculty_id, day, period));
        self.room_busy.insert(slot(room_id, day, period));
        self.section_busy.insert(slot(section_id, day, period));
        *self.faculty_load.entry(faculty_id.to_string()).or_insert(0) += 1;
    }

    /// Counts one placement of a subject for a section on a day.
    pub fn record(&mut self, subject_id: &str, section_id: &str, day: Day) {
        *self
            .subject_day_count
            .entry((subject_id.to_string(), section_id.to_string(), day))
            .or_insert(0) += 1;

        if self.library_subject_id.as_deref() == Some(subject_id) {
            *self.library_count.entry(section_id.to_string()).or_insert(0) += 1;
        }
    }

    /// Occupies the slot, records the placement, and issues the entry.
    #[allow(clippy::too_many_arguments)]
    pub fn place(
        &mut self,
        day: Day,
        period: Period,
        subject_id: &str,
        faculty_id: &str,
        room_id: &str,
        section_id: &str,
        batch: Option<char>,
    ) -> TimetableEntry {
        self.occupy(faculty_id, room_id, section_id, day, period);
        self.record(subject_id, section_id, day);

        let id = self.next_id;
        self.next_id += 1;
        TimetableEntry {
            id,
            day,
            period,
            subject_id: subject_id.to_string(),
            faculty_id: faculty_id.to_string(),
            room_id: room_id.to_string(),
            section_id: section_id.to_string(),
            batch,
        }
    }

    /// Periods assigned to a faculty member so far.
    pub fn faculty_load(&self, faculty_id: &str) -> u32 {
        self.faculty_load.get(faculty_id).copied().unwrap_or(0)
    }

    /// Periods a faculty member may still take. Unknown faculty are uncapped.
    pub fn remaining_load(&self, faculty_id: &str) -> u32 {
        match self.faculty_caps.get(faculty_id) {
            Some(&cap) => cap.saturating_sub(self.faculty_load(faculty_id)),
            None => u32::MAX,
        }
    }

    /// Whether the section already ran a lab block on `day`.
    pub fn lab_block_used(&self, section_id: &str, day: Day) -> bool {
        self.lab_day_usage
            .get(&(section_id.to_string(), day))
            .is_some_and(|used| !used.is_empty())
    }

    /// Records a lab block for the section on `day`, covering every lab
    /// subject of the section.
    pub fn mark_lab_block<'a, I>(&mut self, section_id: &str, day: Day, lab_subject_ids: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let used = self
            .lab_day_usage
            .entry((section_id.to_string(), day))
            .or_default();
        used.extend(lab_subject_ids.into_iter().map(str::to_string));
    }

    /// Library periods placed for a section this week.
    pub fn library_count(&self, section_id: &str) -> u32 {
        self.library_count.get(section_id).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> AvailabilityTracker {
        let faculty = vec![Faculty::new("f1", 3), Faculty::new("lib", 100)];
        AvailabilityTracker::new(&EngineConfig::default(), &faculty).with_library_subject("LIB")
    }

    #[test]
    fn test_fresh_slot_is_free() {
        let t = tracker();
        assert!(t.is_slot_free("f1", "r1", "s1", Day::Mon, 1));
    }

    #[test]
    fn test_lunch_and_empty_ids_never_free() {
        let t = tracker();
        assert!(!t.is_slot_free("f1", "r1", "s1", Day::Mon, 5));
        assert!(!t.is_slot_free("", "r1", "s1", Day::Mon, 1));
        assert!(!t.is_slot_free("f1", "", "s1", Day::Mon, 1));
    }

    #[test]
    fn test_occupy_blocks_each_resource() {
        let mut t = tracker();
        t.occupy("f1", "r1", "s1", Day::Tue, 2);

        assert!(!t.is_slot_free("f1", "r2", "s2", Day::Tue, 2));
        assert!(!t.is_slot_free("f2", "r1", "s2", Day::Tue, 2));
        assert!(!t.is_slot_free("f2", "r2", "s1", Day::Tue, 2));
        assert!(t.is_slot_free("f2", "r2", "s2", Day::Tue, 2));
        assert!(t.is_slot_free("f1", "r1", "s1", Day::Tue, 3));
        assert!(t.is_section_busy("s1", Day::Tue, 2));
        assert_eq!(t.faculty_load("f1"), 1);
    }

    #[test]
    fn test_load_cap() {
        let mut t = tracker();
        for p in 1..=3 {
            t.occupy("f1", "r1", "s1", Day::Wed, p);
        }
        assert_eq!(t.remaining_load("f1"), 0);
        assert!(!t.is_slot_free("f1", "r1", "s1", Day::Thu, 1));
        assert_eq!(t.remaining_load("unknown"), u32::MAX);
    }

    #[test]
    fn test_theory_daily_cap() {
        let mut t = tracker();
        assert!(t.can_place_theory("DS", "s1", Day::Mon));
        t.record("DS", "s1", Day::Mon);
        assert!(t.can_place_theory("DS", "s1", Day::Mon));
        t.record("DS", "s1", Day::Mon);
        assert!(!t.can_place_theory("DS", "s1", Day::Mon));
        assert!(t.can_place_theory("DS", "s1", Day::Tue));
        assert!(t.can_place_theory("DS", "s2", Day::Mon));
    }

    #[test]
    fn test_library_quota_counts_only_library() {
        let mut t = tracker();
        t.record("DS", "s1", Day::Mon);
        t.record("LIB", "s1", Day::Mon);
        t.record("LIB", "s1", Day::Tue);
        assert_eq!(t.library_count("s1"), 2);
        assert_eq!(t.library_count("s2"), 0);
    }

    #[test]
    fn test_place_issues_increasing_ids() {
        let mut t = tracker();
        let a = t.place(Day::Mon, 1, "DS", "f1", "r1", "s1", None);
        let b = t.place(Day::Mon, 2, "LAB1", "f2", "r5", "s1", Some('A'));
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(b.batch, Some('A'));
        assert_eq!(t.subject_day_count("DS", "s1", Day::Mon), 1);
        assert!(!t.is_slot_free("f1", "r9", "s9", Day::Mon, 1));
    }

    #[test]
    fn test_lab_block_usage() {
        let mut t = tracker();
        assert!(!t.lab_block_used("s1", Day::Fri));
        t.mark_lab_block("s1", Day::Fri, ["L1", "L2"]);
        assert!(t.lab_block_used("s1", Day::Fri));
        assert!(!t.lab_block_used("s1", Day::Sat));
        assert!(!t.lab_block_used("s2", Day::Fri));
    }
}
