//! Timetable generation engine and KPI evaluation.
//!
//! # Phases
//!
//! `TimetableEngine` runs three best-effort phases over one shared
//! [`AvailabilityTracker`]:
//!
//! 1. **Labs** (`LabScheduler`): rotated parallel lab blocks per section.
//! 2. **Theory** (`TheoryScheduler`): deterministic first-fit per section.
//! 3. **Gaps** (`GapFiller`): library/sports fillers in empty slots.
//!
//! Nothing backtracks. Periods that cannot be placed are counted and
//! reported as [`ScheduleEvent`]s; generation never fails.
//!
//! # KPI
//!
//! `TimetableKpi` summarizes faculty load and section fill rates.
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling", Artificial Intelligence Review 13(2)
//! - Burke & Petrovic (2002), "Recent Research Directions in Automated Timetabling", EJOR 140(2)

mod day_order;
mod engine;
mod events;
mod filler;
mod kpi;
mod lab;
mod theory;
mod tracker;

pub use day_order::{CanonicalDays, DayOrder, ShuffledDays};
pub use engine::{GenerationReport, RunState, TimetableEngine, TimetableInput};
pub use events::{FillerKind, ScheduleEvent};
pub use filler::GapFiller;
pub use kpi::TimetableKpi;
pub use lab::{batch_label, LabScheduler};
pub use theory::TheoryScheduler;
pub use tracker::AvailabilityTracker;
