//! Timetabling domain models.
//!
//! Provides the input entities (faculty, subjects, rooms, sections), the
//! weekly day/period grid, and the output timetable.
//!
//! # Domain Mappings
//!
//! | Type | Scheduling role | Example |
//! |------|-----------------|---------|
//! | Subject | Weekly demand | "Big Data Analytics, 3 periods" |
//! | Faculty / Room / Section | Slot-exclusive resource | "IT LAB 1" |
//! | WeekCalendar | Availability grid | MON–SAT, periods 1–7 |
//! | TimetableEntry | Assignment | "MON P2, BDA, N 305" |

mod calendar;
mod faculty;
mod room;
mod section;
mod subject;
mod timetable;

pub use calendar::{Day, Period, WeekCalendar};
pub use faculty::Faculty;
pub use room::Room;
pub use section::Section;
pub use subject::{SessionKind, Subject};
pub use timetable::{EntryId, Timetable, TimetableEntry, Violation, ViolationType};
