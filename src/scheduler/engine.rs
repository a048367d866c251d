//! Generation orchestrator.
//!
//! # Algorithm
//!
//! 1. Reset: a fresh [`AvailabilityTracker`] and an empty timetable.
//! 2. Order sections by academic year, senior-most first (stable).
//! 3. Phase 1: lab blocks for every section.
//! 4. Phase 2: theory first-fit for every section.
//! 5. Phase 3: gap filling over all sections (input order).
//! 6. Sort the timetable by day, then period.
//!
//! Each run recomputes from empty state. Nothing is validated: missing
//! references only make the affected periods unplaceable.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::day_order::{DayOrder, ShuffledDays};
use super::events::ScheduleEvent;
use super::filler::GapFiller;
use super::lab::LabScheduler;
use super::theory::TheoryScheduler;
use super::tracker::AvailabilityTracker;
use crate::config::EngineConfig;
use crate::models::{Faculty, Room, Section, Subject, Timetable};

/// Input snapshot for one generation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimetableInput {
    /// Teaching staff.
    pub faculty: Vec<Faculty>,
    /// Subjects, lab and theory, including fillers.
    pub subjects: Vec<Subject>,
    /// Lecture rooms, labs, and filler rooms.
    pub rooms: Vec<Room>,
    /// Sections to timetable.
    pub sections: Vec<Section>,
}

impl TimetableInput {
    /// Creates an input snapshot.
    pub fn new(
        faculty: Vec<Faculty>,
        subjects: Vec<Subject>,
        rooms: Vec<Room>,
        sections: Vec<Section>,
    ) -> Self {
        Self {
            faculty,
            subjects,
            rooms,
            sections,
        }
    }

    /// Adds a faculty member.
    pub fn with_faculty(mut self, faculty: Faculty) -> Self {
        self.faculty.push(faculty);
        self
    }

    /// Adds a subject.
    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subjects.push(subject);
        self
    }

    /// Adds a room.
    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    /// Adds a section.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Looks up a subject by code.
    pub fn subject_by_code(&self, code: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.code == code)
    }

    /// Looks up a room by name.
    pub fn room_by_name(&self, name: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.name == name)
    }
}

/// Mutable state threaded through the phases of one run.
#[derive(Debug, Clone)]
pub struct RunState {
    /// Occupancy and counters.
    pub tracker: AvailabilityTracker,
    /// Entries placed so far, in placement order.
    pub timetable: Timetable,
    /// Diagnostics raised so far.
    pub events: Vec<ScheduleEvent>,
}

impl RunState {
    /// Creates empty state for a run over `input`.
    pub fn new(config: &EngineConfig, input: &TimetableInput) -> Self {
        let mut tracker = AvailabilityTracker::new(config, &input.faculty);
        if let Some(library) = input.subject_by_code(&config.fillers.library_code) {
            tracker = tracker.with_library_subject(library.id.clone());
        }
        Self {
            tracker,
            timetable: Timetable::new(),
            events: Vec::new(),
        }
    }
}

/// Result of one generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationReport {
    /// Entries sorted by day, then period.
    pub timetable: Timetable,
    /// Lab periods that could not be placed.
    pub lab_unscheduled: u32,
    /// Theory periods that could not be placed.
    pub theory_unscheduled: u32,
    /// Empty slots filled with library or sports.
    pub filled_gaps: u32,
    /// Diagnostics, in the order they were raised.
    pub events: Vec<ScheduleEvent>,
}

impl GenerationReport {
    /// Total required periods left unplaced.
    pub fn unscheduled(&self) -> u32 {
        self.lab_unscheduled + self.theory_unscheduled
    }

    /// Whether every required period was placed.
    pub fn is_complete(&self) -> bool {
        self.unscheduled() == 0
    }
}

/// Timetable generation engine.
///
/// # Example
///
/// ```
/// use u_timetable::config::EngineConfig;
/// use u_timetable::models::{Faculty, Room, Section, Subject};
/// use u_timetable::scheduler::{TimetableEngine, TimetableInput};
///
/// let input = TimetableInput::default()
///     .with_faculty(Faculty::new("f1", 24))
///     .with_subject(Subject::theory("DS", 2, 3, 3, "f1"))
///     .with_room(Room::theory("r1"))
///     .with_section(Section::new("s1", 2, 3, "A").with_default_room("r1"));
///
/// let engine = TimetableEngine::new(EngineConfig::default().with_seed(1));
/// let report = engine.generate(&input);
/// assert_eq!(report.timetable.for_subject("DS").len(), 3);
/// assert_eq!(report.unscheduled(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimetableEngine {
    config: EngineConfig,
}

impl TimetableEngine {
    /// Creates an engine.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Generates a timetable, shuffling lab days with the configured seed
    /// (or OS entropy when no seed is set).
    pub fn generate(&self, input: &TimetableInput) -> GenerationReport {
        let rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.generate_with(input, &mut ShuffledDays::new(rng))
    }

    /// Generates a timetable with an injected lab day ordering.
    pub fn generate_with<D>(&self, input: &TimetableInput, day_order: &mut D) -> GenerationReport
    where
        D: DayOrder + ?Sized,
    {
        let mut run = RunState::new(&self.config, input);

        let mut sections: Vec<&Section> = input.sections.iter().collect();
        sections.sort_by(|a, b| b.year.cmp(&a.year));

        info!(sections = sections.len(), "phase 1: lab scheduling");
        let labs = LabScheduler::new(&self.config, &input.subjects, &input.rooms);
        let mut lab_unscheduled = 0;
        for section in &sections {
            lab_unscheduled += labs.schedule_section(section, &mut run, day_order);
        }

        info!(sections = sections.len(), "phase 2: theory scheduling");
        let theory = TheoryScheduler::new(&self.config, &input.subjects, &input.rooms);
        let mut theory_unscheduled = 0;
        for section in &sections {
            theory_unscheduled += theory.schedule_section(section, &mut run);
        }

        info!("phase 3: gap filling");
        let filler = GapFiller::new(&self.config, &input.subjects, &input.rooms);
        let filled_gaps = filler.fill(&input.sections, &mut run);

        let RunState {
            mut timetable,
            events,
            ..
        } = run;
        timetable.sort_canonical();

        info!(
            entries = timetable.len(),
            lab_unscheduled,
            theory_unscheduled,
            filled_gaps,
            "generation complete"
        );

        GenerationReport {
            timetable,
            lab_unscheduled,
            theory_unscheduled,
            filled_gaps,
            events,
        }
    }
}
