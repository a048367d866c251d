//! End-to-end generation scenarios over the public API.

use std::collections::HashSet;
use std::sync::Once;

use u_timetable::config::EngineConfig;
use u_timetable::models::{Day, Faculty, Period, Room, Section, Subject, WeekCalendar};
use u_timetable::scheduler::{
    CanonicalDays, GapFiller, LabScheduler, RunState, ScheduleEvent, TheoryScheduler,
    TimetableEngine, TimetableInput, TimetableKpi,
};
use u_timetable::validation::{audit_timetable, validate_input};

static TRACING_INIT: Once = Once::new();

/// Routes engine logs to the test output. Filter with `RUST_LOG`.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

fn college() -> TimetableInput {
    serde_json::from_str(include_str!("fixtures/college.json")).expect("fixture parses")
}

fn with_fillers(input: TimetableInput) -> TimetableInput {
    input
        .with_faculty(Faculty::new("lib", 100))
        .with_faculty(Faculty::new("pd", 100))
        .with_subject(Subject::theory("common_lib", 0, 0, 0, "lib").with_code("LIB"))
        .with_subject(Subject::theory("common_sports", 0, 0, 0, "pd").with_code("SPORTS"))
        .with_room(Room::theory("r8").with_name("LIBRARY"))
        .with_room(Room::theory("r9").with_name("GROUND"))
}

#[test]
fn test_theory_spreads_over_two_days() {
    let config = EngineConfig::default().with_calendar(WeekCalendar::default().with_days(vec![
        Day::Mon,
        Day::Tue,
        Day::Wed,
        Day::Thu,
        Day::Fri,
    ]));
    let input = TimetableInput::default()
        .with_faculty(Faculty::new("f1", 24))
        .with_subject(Subject::theory("DS", 2, 3, 3, "f1"))
        .with_room(Room::theory("r1"))
        .with_section(Section::new("s1", 2, 3, "A").with_default_room("r1"));

    let report = TimetableEngine::new(config).generate_with(&input, &mut CanonicalDays);

    let ds = report.timetable.for_subject("DS");
    assert_eq!(ds.len(), 3);
    let days: HashSet<Day> = ds.iter().map(|e| e.day).collect();
    assert!(days.len() <= 2);
    assert_eq!(report.theory_unscheduled, 0);
    assert!(report.timetable.entries.iter().all(|e| e.period != 5));
}

#[test]
fn test_labs_skipped_without_enough_rooms() {
    init_tracing();
    let input = TimetableInput::default()
        .with_faculty(Faculty::new("f1", 24))
        .with_faculty(Faculty::new("f2", 24))
        .with_subject(Subject::lab("L1", 3, 5, 2, "f1"))
        .with_subject(Subject::lab("L2", 3, 5, 2, "f2"))
        .with_room(Room::lab("r5"))
        .with_section(Section::new("s1", 3, 5, "A"));

    let report = TimetableEngine::default().generate_with(&input, &mut CanonicalDays);

    assert!(report.timetable.is_empty());
    assert_eq!(report.lab_unscheduled, 4);
    assert!(report.events.contains(&ScheduleEvent::InsufficientLabRooms {
        section_id: "s1".into(),
        lab_subjects: 2,
        lab_rooms: 1,
        periods: 4,
    }));
}

#[test]
fn test_parallel_batches_share_one_block() {
    let input = TimetableInput::default()
        .with_faculty(Faculty::new("f1", 24))
        .with_faculty(Faculty::new("f2", 24))
        .with_subject(Subject::lab("L1", 3, 5, 2, "f1"))
        .with_subject(Subject::lab("L2", 3, 5, 2, "f2"))
        .with_room(Room::lab("r5"))
        .with_room(Room::lab("r6"))
        .with_section(Section::new("s1", 3, 5, "A"));
    let config = EngineConfig::default();
    let mut run = RunState::new(&config, &input);

    let unscheduled = LabScheduler::new(&config, &input.subjects, &input.rooms).schedule_section(
        &input.sections[0],
        &mut run,
        &mut CanonicalDays,
    );

    assert_eq!(unscheduled, 0);
    let entries = &run.timetable.entries;
    assert_eq!(entries.len(), 4);

    let day = entries[0].day;
    assert!(entries.iter().all(|e| e.day == day));
    let periods: HashSet<Period> = entries.iter().map(|e| e.period).collect();
    assert_eq!(periods, HashSet::from([1, 2]));
    let batches: HashSet<char> = entries.iter().filter_map(|e| e.batch).collect();
    assert_eq!(batches, HashSet::from(['A', 'B']));
    let rooms: HashSet<&str> = entries.iter().map(|e| e.room_id.as_str()).collect();
    assert_eq!(rooms.len(), 2);
    assert!(run.tracker.lab_block_used("s1", day));
}

#[test]
fn test_library_takes_the_last_gaps() {
    let input = with_fillers(TimetableInput::default())
        .with_section(Section::new("s1", 2, 3, "A"));
    let config = EngineConfig::default();
    let mut run = RunState::new(&config, &input);

    for day in config.calendar.working_days(2) {
        for period in config.calendar.candidate_periods() {
            if (day, period) != (Day::Mon, 2) && (day, period) != (Day::Mon, 4) {
                run.tracker.occupy("busy", &format!("room-{day}-{period}"), "s1", day, period);
            }
        }
    }

    let filled = GapFiller::new(&config, &input.subjects, &input.rooms)
        .fill(&input.sections, &mut run);

    assert_eq!(filled, 2);
    assert_eq!(run.tracker.library_count("s1"), 2);
    let slots: Vec<(Day, Period)> = run
        .timetable
        .for_subject("common_lib")
        .iter()
        .map(|e| (e.day, e.period))
        .collect();
    assert_eq!(slots, vec![(Day::Mon, 2), (Day::Mon, 4)]);
}

#[test]
fn test_exhausted_faculty_places_nothing() {
    let input = TimetableInput::default()
        .with_faculty(Faculty::new("f1", 20))
        .with_subject(Subject::theory("DS", 3, 5, 3, "f1"))
        .with_subject(Subject::lab("DS_LAB", 3, 5, 2, "f1"))
        .with_room(Room::theory("r1"))
        .with_room(Room::lab("r5"))
        .with_section(Section::new("s1", 3, 5, "A").with_default_room("r1"));
    let config = EngineConfig::default();
    let mut run = RunState::new(&config, &input);

    // Twenty periods already taught to another section.
    let mut carried = 0;
    'fill: for day in config.calendar.working_days(3) {
        for period in config.calendar.candidate_periods() {
            if carried == 20 {
                break 'fill;
            }
            run.tracker.occupy("f1", "r2", "s9", day, period);
            carried += 1;
        }
    }
    assert_eq!(run.tracker.remaining_load("f1"), 0);

    let section = &input.sections[0];
    let lab_left = LabScheduler::new(&config, &input.subjects, &input.rooms).schedule_section(
        section,
        &mut run,
        &mut CanonicalDays,
    );
    let theory_left =
        TheoryScheduler::new(&config, &input.subjects, &input.rooms).schedule_section(section, &mut run);

    assert!(run.timetable.is_empty());
    assert_eq!(lab_left, 2);
    assert_eq!(theory_left, 3);
    assert_eq!(run.tracker.faculty_load("f1"), 20);
}

#[test]
fn test_college_week_is_consistent() {
    init_tracing();
    let input = college();
    assert!(validate_input(&input).is_ok());

    let config = EngineConfig::default().with_seed(2024);
    let report = TimetableEngine::new(config.clone()).generate(&input);

    assert!(report.is_complete(), "unplaced: {:?}", report.events);
    assert!(report.events.is_empty());
    assert!(audit_timetable(&report.timetable, &input, &config).is_empty());

    // Final-year sections never meet on their holidays.
    assert!(report
        .timetable
        .for_section("s1")
        .iter()
        .all(|e| e.day != Day::Fri && e.day != Day::Sat));

    // Three-lab sections run three batches side by side.
    let s2_batches: HashSet<char> = report
        .timetable
        .for_section("s2")
        .iter()
        .filter_map(|e| e.batch)
        .collect();
    assert_eq!(s2_batches, HashSet::from(['A', 'B', 'C']));

    for section in ["s1", "s2", "s3"] {
        let library = report
            .timetable
            .for_section(section)
            .into_iter()
            .filter(|e| e.subject_id == "common_lib")
            .count();
        assert!(library <= 4, "{section} has {library} library periods");
    }

    let kpi = TimetableKpi::calculate(&report.timetable, &input, &config);
    assert!(kpi.meets_thresholds(0.25));
    assert!(kpi.section_fill_rate["s1"] > 0.5);
    assert_eq!(kpi.total_entries, report.timetable.len());
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let input = college();
    let engine = TimetableEngine::new(EngineConfig::default().with_seed(7));

    let first = engine.generate(&input);
    let second = engine.generate(&input);

    assert_eq!(first.timetable, second.timetable);
    assert_eq!(first.filled_gaps, second.filled_gaps);
}

#[test]
fn test_report_serializes_camel_case() {
    let engine = TimetableEngine::new(EngineConfig::default().with_seed(1));
    let report = engine.generate(&college());

    let json = serde_json::to_value(&report).expect("report serializes");
    assert!(json.get("labUnscheduled").is_some());
    let first = &json["timetable"]["entries"][0];
    assert!(first.get("subjectId").is_some());
    assert!(first.get("day").and_then(|d| d.as_str()).is_some());
}
