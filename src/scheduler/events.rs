//! Structured diagnostics returned with a generation report.
//!
//! Every condition that leaves periods unplaced (or disables a phase) is
//! recorded here so callers can render it however they like.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which filler activity an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FillerKind {
    Library,
    Sports,
}

/// A notable condition raised during generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ScheduleEvent {
    /// Fewer lab rooms than parallel lab subjects; the section's labs were skipped.
    InsufficientLabRooms {
        section_id: String,
        lab_subjects: usize,
        lab_rooms: usize,
        periods: u32,
    },
    /// No day/pair combination could host this lab rotation.
    LabRotationUnplaced { section_id: String, rotation: u32 },
    /// Lab periods of one subject left unplaced after every rotation.
    LabUnplaced {
        section_id: String,
        subject_id: String,
        periods: u32,
    },
    /// The section has no usable lecture room.
    NoClassroom { section_id: String, periods: u32 },
    /// Theory periods left in the queue after the scan.
    TheoryUnplaced {
        section_id: String,
        subject_id: String,
        periods: u32,
    },
    /// A filler subject or room could not be found; that filler is disabled.
    FillerUnavailable { filler: FillerKind, reason: String },
}

impl fmt::Display for ScheduleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientLabRooms {
                section_id,
                lab_subjects,
                lab_rooms,
                periods,
            } => write!(
                f,
                "section {section_id}: {lab_subjects} lab batches but only {lab_rooms} lab rooms, {periods} periods skipped"
            ),
            Self::LabRotationUnplaced {
                section_id,
                rotation,
            } => write!(f, "section {section_id}: lab rotation {} not placed", rotation + 1),
            Self::LabUnplaced {
                section_id,
                subject_id,
                periods,
            } => write!(
                f,
                "section {section_id}: lab {subject_id} has {periods} periods unscheduled"
            ),
            Self::NoClassroom {
                section_id,
                periods,
            } => write!(
                f,
                "section {section_id}: no lecture room, {periods} theory periods skipped"
            ),
            Self::TheoryUnplaced {
                section_id,
                subject_id,
                periods,
            } => write!(
                f,
                "section {section_id}: {subject_id} has {periods} periods unscheduled"
            ),
            Self::FillerUnavailable { filler, reason } => {
                write!(f, "{filler:?} filler disabled: {reason}")
            }
        }
    }
}
