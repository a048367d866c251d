//! Gap filler: compacts each section's week with filler activities.
//!
//! After labs and theory, every empty non-lunch slot on a section's
//! working days gets a library period while the section's weekly library
//! quota lasts and the library is free, otherwise a sports period.
//! A slot neither filler can take stays empty; that is not an error.

use tracing::{info, warn};

use super::engine::RunState;
use super::events::{FillerKind, ScheduleEvent};
use crate::config::EngineConfig;
use crate::models::{Day, Period, Room, Section, Subject};

/// A resolved filler activity: its subject and its room.
#[derive(Debug, Clone, Copy)]
struct Filler<'a> {
    subject: &'a Subject,
    room: &'a Room,
}

/// Fills empty slots with library and sports periods.
#[derive(Debug, Clone)]
pub struct GapFiller<'a> {
    config: &'a EngineConfig,
    subjects: &'a [Subject],
    rooms: &'a [Room],
}

impl<'a> GapFiller<'a> {
    /// Creates a gap filler over the run's subjects and rooms.
    pub fn new(config: &'a EngineConfig, subjects: &'a [Subject], rooms: &'a [Room]) -> Self {
        Self {
            config,
            subjects,
            rooms,
        }
    }

    fn resolve(
        &self,
        kind: FillerKind,
        code: &str,
        room_name: &str,
        events: &mut Vec<ScheduleEvent>,
    ) -> Option<Filler<'a>> {
        let subject = self.subjects.iter().find(|s| s.code == code);
        let room = self.rooms.iter().find(|r| r.name == room_name);
        match (subject, room) {
            (Some(subject), Some(room)) => Some(Filler { subject, room }),
            (subject, _) => {
                let reason = if subject.is_none() {
                    format!("no subject with code {code}")
                } else {
                    format!("no room named {room_name}")
                };
                warn!(filler = ?kind, %reason, "filler disabled");
                events.push(ScheduleEvent::FillerUnavailable {
                    filler: kind,
                    reason,
                });
                None
            }
        }
    }

    /// Fills gaps for every section, in the given order.
    ///
    /// Returns the number of slots filled.
    pub fn fill(&self, sections: &[Section], run: &mut RunState) -> u32 {
        let fillers = &self.config.fillers;
        let library = self.resolve(
            FillerKind::Library,
            &fillers.library_code,
            &fillers.library_room,
            &mut run.events,
        );
        let sports = self.resolve(
            FillerKind::Sports,
            &fillers.sports_code,
            &fillers.sports_room,
            &mut run.events,
        );
        if library.is_none() && sports.is_none() {
            return 0;
        }

        let calendar = &self.config.calendar;
        let periods = calendar.candidate_periods();
        let mut filled = 0;

        for section in sections {
            for day in calendar.working_days(section.year) {
                for &period in &periods {
                    if run.tracker.is_section_busy(&section.id, day, period) {
                        continue;
                    }
                    if let Some(filler) = self.pick(library, sports, section, day, period, run) {
                        let entry = run.tracker.place(
                            day,
                            period,
                            &filler.subject.id,
                            &filler.subject.assigned_faculty_id,
                            &filler.room.id,
                            &section.id,
                            None,
                        );
                        run.timetable.push(entry);
                        filled += 1;
                    }
                }
            }
        }

        info!(filled, "gaps filled");
        filled
    }

    fn pick(
        &self,
        library: Option<Filler<'a>>,
        sports: Option<Filler<'a>>,
        section: &Section,
        day: Day,
        period: Period,
        run: &RunState,
    ) -> Option<Filler<'a>> {
        let free = |f: &Filler<'a>| {
            run.tracker.is_slot_free(
                &f.subject.assigned_faculty_id,
                &f.room.id,
                &section.id,
                day,
                period,
            )
        };
        let under_quota = run.tracker.library_count(&section.id) < self.config.library_weekly_cap;

        library
            .filter(|f| under_quota && free(f))
            .or_else(|| sports.filter(|f| free(f)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Faculty;
    use crate::scheduler::TimetableInput;

    fn input() -> TimetableInput {
        TimetableInput::default()
            .with_faculty(Faculty::new("lib", 100))
            .with_faculty(Faculty::new("pd", 100))
            .with_subject(Subject::theory("common_lib", 0, 0, 0, "lib").with_code("LIB"))
            .with_subject(Subject::theory("common_sports", 0, 0, 0, "pd").with_code("SPORTS"))
            .with_room(Room::theory("r8").with_name("LIBRARY"))
            .with_room(Room::theory("r9").with_name("GROUND"))
            .with_section(Section::new("s1", 2, 3, "A"))
    }

    /// Occupies every slot of `section` except the listed ones.
    fn fill_all_but(run: &mut RunState, section: &str, free: &[(Day, Period)]) {
        let config = EngineConfig::default();
        for day in config.calendar.working_days(2) {
            for period in config.calendar.candidate_periods() {
                if !free.contains(&(day, period)) {
                    let faculty = format!("busy-{day}-{period}");
                    run.tracker.occupy(&faculty, &faculty, section, day, period);
                }
            }
        }
    }

    #[test]
    fn test_library_fills_gaps_within_quota() {
        let input = input();
        let config = EngineConfig::default();
        let mut run = RunState::new(&config, &input);
        fill_all_but(&mut run, "s1", &[(Day::Mon, 2), (Day::Mon, 4)]);

        let filled = GapFiller::new(&config, &input.subjects, &input.rooms)
            .fill(&input.sections, &mut run);

        assert_eq!(filled, 2);
        assert_eq!(run.tracker.library_count("s1"), 2);
        let placed: Vec<(Day, Period, &str)> = run
            .timetable
            .entries
            .iter()
            .map(|e| (e.day, e.period, e.subject_id.as_str()))
            .collect();
        assert_eq!(
            placed,
            vec![(Day::Mon, 2, "common_lib"), (Day::Mon, 4, "common_lib")]
        );
    }

    #[test]
    fn test_sports_after_quota() {
        let input = input();
        let config = EngineConfig::default();
        let mut run = RunState::new(&config, &input);
        fill_all_but(
            &mut run,
            "s1",
            &[(Day::Tue, 1), (Day::Tue, 2), (Day::Tue, 3), (Day::Tue, 4), (Day::Tue, 6), (Day::Tue, 7)],
        );

        let filled = GapFiller::new(&config, &input.subjects, &input.rooms)
            .fill(&input.sections, &mut run);

        assert_eq!(filled, 6);
        assert_eq!(run.tracker.library_count("s1"), 4);
        assert_eq!(run.timetable.for_subject("common_lib").len(), 4);
        let sports: Vec<Period> = run
            .timetable
            .for_subject("common_sports")
            .iter()
            .map(|e| e.period)
            .collect();
        assert_eq!(sports, vec![6, 7]);
    }

    #[test]
    fn test_busy_library_falls_back_to_sports() {
        let input = input();
        let config = EngineConfig::default();
        let mut run = RunState::new(&config, &input);
        fill_all_but(&mut run, "s1", &[(Day::Wed, 1)]);
        run.tracker.occupy("lib", "r8", "s2", Day::Wed, 1);

        GapFiller::new(&config, &input.subjects, &input.rooms).fill(&input.sections, &mut run);

        assert_eq!(run.timetable.entries[0].subject_id, "common_sports");
    }

    #[test]
    fn test_slot_left_empty_when_both_busy() {
        let input = input();
        let config = EngineConfig::default();
        let mut run = RunState::new(&config, &input);
        fill_all_but(&mut run, "s1", &[(Day::Wed, 1)]);
        run.tracker.occupy("lib", "r8", "s2", Day::Wed, 1);
        run.tracker.occupy("pd", "r9", "s3", Day::Wed, 1);

        let filled = GapFiller::new(&config, &input.subjects, &input.rooms)
            .fill(&input.sections, &mut run);

        assert_eq!(filled, 0);
        assert!(run.events.is_empty());
    }

    #[test]
    fn test_missing_fillers_reported() {
        let mut input = input();
        input.rooms.retain(|r| r.name != "GROUND");
        let config = EngineConfig::default();
        let mut run = RunState::new(&config, &input);

        GapFiller::new(&config, &input.subjects, &input.rooms).fill(&input.sections, &mut run);

        assert_eq!(
            run.events,
            vec![ScheduleEvent::FillerUnavailable {
                filler: FillerKind::Sports,
                reason: "no room named GROUND".into(),
            }]
        );
        // Library still fills up to its quota.
        assert_eq!(run.timetable.len(), 4);
    }
}
