//! Academic timetable generation for the U-Engine ecosystem.
//!
//! Assigns weekly lecture and laboratory sessions of academic sections to
//! day/period slots, subject to faculty, room, and section availability.
//! Placement is best-effort and non-backtracking: whatever cannot be
//! placed is reported as a count, never as an error.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Faculty`, `Subject`, `Room`, `Section`,
//!   `WeekCalendar`, `TimetableEntry`, `Timetable`
//! - **`scheduler`**: `TimetableEngine` and its phases (labs, theory,
//!   gap filling), the `AvailabilityTracker`, and `TimetableKpi`
//! - **`validation`**: Input integrity checks and output invariant audit
//! - **`config`**: `EngineConfig`, loadable from TOML
//!
//! # Architecture
//!
//! Single-threaded and synchronous. Each run owns a fresh tracker; the
//! only randomness is the lab day order, which is injected through the
//! `DayOrder` trait and seedable for reproducible runs.
//!
//! # Reference
//! Carter & Laporte (1998), "Recent Developments in Practical Course Timetabling", PATAT II, LNCS 1408

pub mod config;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;
