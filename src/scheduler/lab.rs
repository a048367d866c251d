//! Lab scheduler: rotated parallel lab blocks.
//!
//! # Algorithm
//!
//! A section with `N` lab subjects is split into `N` batches. A lab block
//! is one contiguous period pair on one day during which every batch runs
//! a different lab subject in its own lab room with its own faculty.
//!
//! 1. If there are fewer lab rooms than lab subjects, skip the section
//!    and report every lab period unscheduled (no partial blocks).
//! 2. The section needs `R = max(floor(periods_per_week / 2))` rotations.
//! 3. For rotation `r`, try days in the injected order (skipping days
//!    that already hold a block for the section), then each preferred
//!    pair in priority order.
//! 4. Batch `b` performs subject `(b + r) mod N`, so each rotation
//!    shifts every batch on to the next subject. Each batch needs a room
//!    and a faculty member not used by another batch of the block, both
//!    free for the whole pair.
//! 5. On success, place two entries per batch (labelled `A`, `B`, ...)
//!    and mark the day as used for the section.
//! 6. Count the shortfall per subject. A subject needing fewer than `2R`
//!    periods still joins every block, so no batch sits idle; its extra
//!    sessions never offset another subject's missing ones.
//!
//! Odd trailing periods are never placed alone.
//!
//! # Complexity
//! O(R * D * P * N * L) where D = days, P = preferred pairs, L = lab rooms.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::day_order::DayOrder;
use super::engine::RunState;
use super::events::ScheduleEvent;
use super::tracker::AvailabilityTracker;
use crate::config::EngineConfig;
use crate::models::{Day, Period, Room, Section, SessionKind, Subject};

/// Batch label for a zero-based batch index (`0 → 'A'`).
pub fn batch_label(index: usize) -> char {
    char::from_u32('A' as u32 + index as u32).unwrap_or('?')
}

/// Places lab blocks for one section at a time.
#[derive(Debug, Clone)]
pub struct LabScheduler<'a> {
    config: &'a EngineConfig,
    subjects: &'a [Subject],
    lab_rooms: Vec<&'a Room>,
}

impl<'a> LabScheduler<'a> {
    /// Creates a scheduler over the run's subjects and rooms.
    pub fn new(config: &'a EngineConfig, subjects: &'a [Subject], rooms: &'a [Room]) -> Self {
        Self {
            config,
            subjects,
            lab_rooms: rooms.iter().filter(|r| r.kind == SessionKind::Lab).collect(),
        }
    }

    /// Lab subjects taught to `section`, in input order.
    pub fn lab_subjects(&self, section: &Section) -> Vec<&'a Subject> {
        self.subjects
            .iter()
            .filter(|s| s.is_lab() && s.applies_to(section))
            .collect()
    }

    /// Schedules every lab rotation of `section`.
    ///
    /// Returns the number of required lab periods left unplaced.
    pub fn schedule_section<D>(&self, section: &Section, run: &mut RunState, day_order: &mut D) -> u32
    where
        D: DayOrder + ?Sized,
    {
        let labs = self.lab_subjects(section);
        if labs.is_empty() {
            return 0;
        }
        let required: u32 = labs.iter().map(|s| s.periods_per_week).sum();

        if labs.len() > self.lab_rooms.len() {
            warn!(
                section = %section.id,
                lab_subjects = labs.len(),
                lab_rooms = self.lab_rooms.len(),
                "insufficient lab rooms, skipping section labs"
            );
            run.events.push(ScheduleEvent::InsufficientLabRooms {
                section_id: section.id.clone(),
                lab_subjects: labs.len(),
                lab_rooms: self.lab_rooms.len(),
                periods: required,
            });
            return required;
        }

        let rotations = labs
            .iter()
            .map(|s| s.periods_per_week / 2)
            .max()
            .unwrap_or(0);
        let working_days = self.config.calendar.working_days(section.year);
        let mut placed: HashMap<&str, u32> = HashMap::new();

        for rotation in 0..rotations {
            match self.place_rotation(section, &labs, rotation, &working_days, run, day_order) {
                Some(subjects) => {
                    for lab in subjects {
                        *placed.entry(lab.id.as_str()).or_insert(0) += 2;
                    }
                }
                None => {
                    warn!(section = %section.id, rotation = rotation + 1, "lab rotation not placed");
                    run.events.push(ScheduleEvent::LabRotationUnplaced {
                        section_id: section.id.clone(),
                        rotation,
                    });
                }
            }
        }

        // Extra sessions of a short subject never offset another's shortfall.
        let mut unscheduled = 0;
        for lab in &labs {
            let got = placed.get(lab.id.as_str()).copied().unwrap_or(0);
            let left = lab.periods_per_week.saturating_sub(got);
            if left > 0 {
                warn!(section = %section.id, subject = %lab.id, periods = left, "lab periods unscheduled");
                run.events.push(ScheduleEvent::LabUnplaced {
                    section_id: section.id.clone(),
                    subject_id: lab.id.clone(),
                    periods: left,
                });
                unscheduled += left;
            }
        }
        unscheduled
    }

    /// Finds a day and pair for one rotation and commits it.
    ///
    /// Returns the subjects that got a session, or `None` if nothing fit.
    fn place_rotation<D>(
        &self,
        section: &Section,
        labs: &[&'a Subject],
        rotation: u32,
        working_days: &[Day],
        run: &mut RunState,
        day_order: &mut D,
    ) -> Option<Vec<&'a Subject>>
    where
        D: DayOrder + ?Sized,
    {
        for day in day_order.next_day_order(working_days) {
            if run.tracker.lab_block_used(&section.id, day) {
                continue;
            }
            for &[p1, p2] in &self.config.lab_blocks {
                let Some(plan) = self.plan_block(section, labs, rotation, day, p1, p2, &run.tracker)
                else {
                    continue;
                };

                for (batch, (lab, room)) in plan.iter().enumerate() {
                    let label = Some(batch_label(batch));
                    for period in [p1, p2] {
                        let entry = run.tracker.place(
                            day,
                            period,
                            &lab.id,
                            &lab.assigned_faculty_id,
                            &room.id,
                            &section.id,
                            label,
                        );
                        run.timetable.push(entry);
                    }
                }
                run.tracker
                    .mark_lab_block(&section.id, day, labs.iter().map(|s| s.id.as_str()));

                debug!(
                    section = %section.id,
                    %day,
                    periods = ?[p1, p2],
                    batches = plan.len(),
                    "lab block placed"
                );
                return Some(plan.into_iter().map(|(lab, _)| lab).collect());
            }
        }
        None
    }

    /// Assigns a distinct room and faculty to every batch for (day, pair).
    #[allow(clippy::too_many_arguments)]
    fn plan_block(
        &self,
        section: &Section,
        labs: &[&'a Subject],
        rotation: u32,
        day: Day,
        p1: Period,
        p2: Period,
        tracker: &AvailabilityTracker,
    ) -> Option<Vec<(&'a Subject, &'a Room)>> {
        let n = labs.len();
        let mut plan: Vec<(&'a Subject, &'a Room)> = Vec::with_capacity(n);

        for batch in 0..n {
            let lab = labs[(batch + rotation as usize) % n];
            let faculty = lab.assigned_faculty_id.as_str();

            if plan.iter().any(|(s, _)| s.assigned_faculty_id == faculty) {
                return None;
            }
            if tracker.remaining_load(faculty) < 2 {
                return None;
            }

            let room = self.lab_rooms.iter().copied().find(|room| {
                !plan.iter().any(|(_, r)| r.id == room.id)
                    && tracker.is_slot_free(faculty, &room.id, &section.id, day, p1)
                    && tracker.is_slot_free(faculty, &room.id, &section.id, day, p2)
            })?;
            plan.push((lab, room));
        }

        Some(plan)
    }
}
