//! Theory scheduler: deterministic first-fit.
//!
//! # Algorithm
//!
//! 1. Build a queue with each theory subject repeated `periods_per_week`
//!    times, in input order. Filler subjects are excluded.
//! 2. Scan the section's working days in canonical order and, within a
//!    day, the candidate periods (pre-lunch, then post-lunch).
//! 3. At each slot, place the first queued subject that is under its
//!    daily cap and whose faculty, the classroom, and the section are
//!    all free.
//! 4. Whatever is left in the queue after one pass is unscheduled.
//!
//! One forward pass, no randomness, no retries.
//!
//! # Complexity
//! O(D * P * Q) where Q = total queued periods.
//!
//! # Reference
//! Johnson (1974), "Fast Algorithms for Bin Packing", JCSS 8(3) (First Fit)

use tracing::warn;

use super::engine::RunState;
use super::events::ScheduleEvent;
use crate::config::EngineConfig;
use crate::models::{Room, Section, SessionKind, Subject};

/// Places lecture periods for one section at a time.
#[derive(Debug, Clone)]
pub struct TheoryScheduler<'a> {
    config: &'a EngineConfig,
    subjects: &'a [Subject],
    rooms: &'a [Room],
}

impl<'a> TheoryScheduler<'a> {
    /// Creates a scheduler over the run's subjects and rooms.
    pub fn new(config: &'a EngineConfig, subjects: &'a [Subject], rooms: &'a [Room]) -> Self {
        Self {
            config,
            subjects,
            rooms,
        }
    }

    /// Non-filler theory subjects taught to `section`, in input order.
    pub fn theory_subjects(&self, section: &Section) -> Vec<&'a Subject> {
        self.subjects
            .iter()
            .filter(|s| {
                !s.is_lab() && s.applies_to(section) && !self.config.fillers.is_filler_code(&s.code)
            })
            .collect()
    }

    /// Lecture room for `section`: its default room, else the first
    /// non-filler theory room.
    pub fn classroom(&self, section: &Section) -> Option<&'a Room> {
        self.rooms
            .iter()
            .find(|r| !section.default_room_id.is_empty() && r.id == section.default_room_id)
            .or_else(|| {
                self.rooms.iter().find(|r| {
                    r.kind == SessionKind::Theory && !self.config.fillers.is_filler_room(&r.name)
                })
            })
    }

    /// Schedules all theory periods of `section`.
    ///
    /// Returns the number of periods left unplaced.
    pub fn schedule_section(&self, section: &Section, run: &mut RunState) -> u32 {
        let subjects = self.theory_subjects(section);
        let required: u32 = subjects.iter().map(|s| s.periods_per_week).sum();
        if required == 0 {
            return 0;
        }

        let Some(room) = self.classroom(section) else {
            warn!(section = %section.id, periods = required, "no lecture room for section");
            run.events.push(ScheduleEvent::NoClassroom {
                section_id: section.id.clone(),
                periods: required,
            });
            return required;
        };

        let mut queue: Vec<&Subject> = subjects
            .iter()
            .flat_map(|s| std::iter::repeat(*s).take(s.periods_per_week as usize))
            .collect();

        let calendar = &self.config.calendar;
        let periods = calendar.candidate_periods();

        'days: for day in calendar.working_days(section.year) {
            for &period in &periods {
                if queue.is_empty() {
                    break 'days;
                }
                let tracker = &run.tracker;
                let pick = queue.iter().position(|s| {
                    tracker.can_place_theory(&s.id, &section.id, day)
                        && tracker.is_slot_free(&s.assigned_faculty_id, &room.id, &section.id, day, period)
                });
                if let Some(idx) = pick {
                    let subject = queue.remove(idx);
                    let entry = run.tracker.place(
                        day,
                        period,
                        &subject.id,
                        &subject.assigned_faculty_id,
                        &room.id,
                        &section.id,
                        None,
                    );
                    run.timetable.push(entry);
                }
            }
        }

        for subject in &subjects {
            let left = queue.iter().filter(|s| s.id == subject.id).count() as u32;
            if left > 0 {
                warn!(section = %section.id, subject = %subject.id, periods = left, "theory periods unscheduled");
                run.events.push(ScheduleEvent::TheoryUnplaced {
                    section_id: section.id.clone(),
                    subject_id: subject.id.clone(),
                    periods: left,
                });
            }
        }

        queue.len() as u32
    }
}
