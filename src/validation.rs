//! Input validation and timetable auditing.
//!
//! The engine itself trusts its input: a dangling reference only makes
//! the affected periods unplaceable. These checks let callers catch such
//! problems up front and verify a generated (or hand-edited) timetable
//! afterwards.
//!
//! `validate_input` detects:
//! - Duplicate IDs per entity type
//! - Subjects assigned to unknown faculty
//! - Sections whose default room is set but does not exist
//! - Lab subjects with an odd weekly period count (the last period is
//!   never scheduled)
//!
//! `audit_timetable` checks the output invariants:
//! - no faculty, room, or section double-booking (parallel lab batches excepted)
//! - theory daily cap per (subject, section, day), fillers excepted
//! - lab periods always in contiguous pairs per (subject, section, batch, day)
//! - faculty weekly load caps
//! - at most one lab block per section per day
//!
//! # Reference
//! de Werra (1985), "An Introduction to Timetabling", EJOR 19(2)

use std::collections::{HashMap, HashSet};

use crate::config::EngineConfig;
use crate::models::{Day, Period, Timetable, TimetableEntry, Violation, ViolationType};
use crate::scheduler::TimetableInput;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities of the same type share an ID.
    DuplicateId,
    /// A subject's assigned faculty doesn't exist.
    UnknownFaculty,
    /// A section's default room doesn't exist.
    UnknownRoom,
    /// A lab subject needs an odd number of periods per week.
    OddLabPeriods,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

fn check_unique<'a>(
    label: &str,
    ids: impl Iterator<Item = &'a str>,
    errors: &mut Vec<ValidationError>,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {label} ID: {id}"),
            ));
        }
    }
    seen
}

/// Validates the input of a generation run.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(input: &TimetableInput) -> ValidationResult {
    let mut errors = Vec::new();

    let faculty_ids = check_unique("faculty", input.faculty.iter().map(|f| f.id.as_str()), &mut errors);
    check_unique("subject", input.subjects.iter().map(|s| s.id.as_str()), &mut errors);
    let room_ids = check_unique("room", input.rooms.iter().map(|r| r.id.as_str()), &mut errors);
    check_unique("section", input.sections.iter().map(|s| s.id.as_str()), &mut errors);

    for subject in &input.subjects {
        if !faculty_ids.contains(subject.assigned_faculty_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownFaculty,
                format!(
                    "Subject '{}' is assigned to unknown faculty '{}'",
                    subject.id, subject.assigned_faculty_id
                ),
            ));
        }
        if subject.is_lab() && subject.periods_per_week % 2 != 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::OddLabPeriods,
                format!(
                    "Lab subject '{}' needs {} periods per week; the odd period is never scheduled",
                    subject.id, subject.periods_per_week
                ),
            ));
        }
    }

    for section in &input.sections {
        // An empty default room falls back to a shared lecture room.
        if !section.default_room_id.is_empty()
            && !room_ids.contains(section.default_room_id.as_str())
        {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownRoom,
                format!(
                    "Section '{}' has unknown default room '{}'",
                    section.id, section.default_room_id
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

type SlotGroups<'a> = HashMap<(&'a str, Day, Period), Vec<&'a TimetableEntry>>;

fn group_by_slot<'a, F>(timetable: &'a Timetable, key: F) -> SlotGroups<'a>
where
    F: Fn(&'a TimetableEntry) -> &'a str,
{
    let mut groups: SlotGroups<'a> = HashMap::new();
    for e in &timetable.entries {
        groups.entry((key(e), e.day, e.period)).or_default().push(e);
    }
    groups
}

/// Whether entries sharing a section slot form a valid parallel lab block.
fn is_parallel_lab(entries: &[&TimetableEntry]) -> bool {
    let mut batches = HashSet::new();
    let mut rooms = HashSet::new();
    let mut faculty = HashSet::new();
    entries.iter().all(|e| match e.batch {
        Some(b) => {
            batches.insert(b) && rooms.insert(e.room_id.as_str()) && faculty.insert(e.faculty_id.as_str())
        }
        None => false,
    })
}

/// Checks a timetable against the generation invariants.
///
/// Returns every violation found; an empty list means the timetable is
/// consistent.
pub fn audit_timetable(
    timetable: &Timetable,
    input: &TimetableInput,
    config: &EngineConfig,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    for ((faculty, day, period), group) in group_by_slot(timetable, |e| e.faculty_id.as_str()) {
        if group.len() > 1 {
            violations.push(Violation::new(
                ViolationType::FacultyClash,
                faculty,
                format!("{} sessions at {day} P{period}", group.len()),
            ));
        }
    }

    for ((room, day, period), group) in group_by_slot(timetable, |e| e.room_id.as_str()) {
        if group.len() > 1 {
            violations.push(Violation::new(
                ViolationType::RoomClash,
                room,
                format!("{} sessions at {day} P{period}", group.len()),
            ));
        }
    }

    for ((section, day, period), group) in group_by_slot(timetable, |e| e.section_id.as_str()) {
        if group.len() > 1 && !is_parallel_lab(&group) {
            violations.push(Violation::new(
                ViolationType::SectionClash,
                section,
                format!("{} overlapping sessions at {day} P{period}", group.len()),
            ));
        }
    }

    let lab_ids: HashSet<&str> = input
        .subjects
        .iter()
        .filter(|s| s.is_lab())
        .map(|s| s.id.as_str())
        .collect();
    let filler_ids: HashSet<&str> = input
        .subjects
        .iter()
        .filter(|s| config.fillers.is_filler_code(&s.code))
        .map(|s| s.id.as_str())
        .collect();
    let is_lab_entry = |e: &TimetableEntry| e.batch.is_some() || lab_ids.contains(e.subject_id.as_str());

    let mut theory_daily: HashMap<(&str, &str, Day), u32> = HashMap::new();
    let mut lab_groups: HashMap<(&str, &str, Option<char>, Day), Vec<Period>> = HashMap::new();
    let mut lab_periods: HashMap<(&str, Day), HashSet<Period>> = HashMap::new();

    for e in &timetable.entries {
        if is_lab_entry(e) {
            lab_groups
                .entry((e.subject_id.as_str(), e.section_id.as_str(), e.batch, e.day))
                .or_default()
                .push(e.period);
            lab_periods
                .entry((e.section_id.as_str(), e.day))
                .or_default()
                .insert(e.period);
        } else if !filler_ids.contains(e.subject_id.as_str()) {
            *theory_daily
                .entry((e.subject_id.as_str(), e.section_id.as_str(), e.day))
                .or_insert(0) += 1;
        }
    }

    for ((subject, section, day), count) in theory_daily {
        if count > config.theory_daily_cap {
            violations.push(Violation::new(
                ViolationType::DailyCapExceeded,
                subject,
                format!("{count} periods for section {section} on {day}"),
            ));
        }
    }

    for ((subject, section, batch, day), mut periods) in lab_groups {
        periods.sort_unstable();
        let paired = periods.len() % 2 == 0 && periods.chunks(2).all(|p| p[1] == p[0] + 1);
        if !paired {
            violations.push(Violation::new(
                ViolationType::UnpairedLabPeriod,
                subject,
                format!(
                    "section {section} batch {} on {day} has periods {periods:?}",
                    batch.unwrap_or('-')
                ),
            ));
        }
    }

    for ((section, day), periods) in lab_periods {
        if periods.len() > 2 {
            violations.push(Violation::new(
                ViolationType::MultipleLabBlocks,
                section,
                format!("{} lab periods on {day}", periods.len()),
            ));
        }
    }

    let loads = timetable.faculty_loads();
    for faculty in &input.faculty {
        let load = loads.get(&faculty.id).copied().unwrap_or(0);
        if load > faculty.weekly_load {
            violations.push(Violation::new(
                ViolationType::LoadCapExceeded,
                faculty.id.as_str(),
                format!("{load} periods against a cap of {}", faculty.weekly_load),
            ));
        }
    }

    violations
}
