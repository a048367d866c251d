//! Timetable quality metrics (KPIs).
//!
//! Computes summary indicators from a generated timetable and its input.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total entries | Placed periods, lab batches counted separately |
//! | Filler entries | Library + sports periods |
//! | Faculty load | Periods per faculty member |
//! | Faculty utilization | load / weekly cap |
//! | Section fill rate | occupied slots / working slots |
//! | Avg fill rate | Mean section fill rate |
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 1.2

use std::collections::{HashMap, HashSet};

use super::TimetableInput;
use crate::config::EngineConfig;
use crate::models::{Day, Period, Timetable};

/// Timetable performance indicators.
#[derive(Debug, Clone)]
pub struct TimetableKpi {
    /// Number of entries.
    pub total_entries: usize,
    /// Entries whose subject is a filler.
    pub filler_entries: usize,
    /// Periods per faculty member.
    pub faculty_load: HashMap<String, u32>,
    /// Load relative to weekly cap (0.0..=1.0), for faculty with a non-zero cap.
    pub faculty_utilization: HashMap<String, f64>,
    /// Occupied share of each section's working slots.
    pub section_fill_rate: HashMap<String, f64>,
    /// Mean of `section_fill_rate`.
    pub avg_fill_rate: f64,
}

impl TimetableKpi {
    /// Computes KPIs from a timetable and its input.
    pub fn calculate(timetable: &Timetable, input: &TimetableInput, config: &EngineConfig) -> Self {
        let filler_ids: HashSet<&str> = input
            .subjects
            .iter()
            .filter(|s| config.fillers.is_filler_code(&s.code))
            .map(|s| s.id.as_str())
            .collect();
        let filler_entries = timetable
            .entries
            .iter()
            .filter(|e| filler_ids.contains(e.subject_id.as_str()))
            .count();

        let faculty_load = timetable.faculty_loads();
        let faculty_utilization = input
            .faculty
            .iter()
            .filter(|f| f.weekly_load > 0)
            .map(|f| {
                let load = faculty_load.get(&f.id).copied().unwrap_or(0);
                (f.id.clone(), load as f64 / f.weekly_load as f64)
            })
            .collect();

        let mut occupied: HashMap<&str, HashSet<(Day, Period)>> = HashMap::new();
        for e in &timetable.entries {
            occupied
                .entry(e.section_id.as_str())
                .or_default()
                .insert((e.day, e.period));
        }

        let section_fill_rate: HashMap<String, f64> = input
            .sections
            .iter()
            .map(|s| {
                let slots = config.calendar.weekly_slots(s.year);
                let used = occupied.get(s.id.as_str()).map_or(0, HashSet::len);
                let rate = if slots == 0 {
                    0.0
                } else {
                    used as f64 / slots as f64
                };
                (s.id.clone(), rate)
            })
            .collect();

        let avg_fill_rate = if section_fill_rate.is_empty() {
            0.0
        } else {
            section_fill_rate.values().sum::<f64>() / section_fill_rate.len() as f64
        };

        Self {
            total_entries: timetable.len(),
            filler_entries,
            faculty_load,
            faculty_utilization,
            section_fill_rate,
            avg_fill_rate,
        }
    }

    /// Whether every section reaches `min_fill_rate` and no faculty is over cap.
    pub fn meets_thresholds(&self, min_fill_rate: f64) -> bool {
        self.section_fill_rate.values().all(|&r| r >= min_fill_rate)
            && self.faculty_utilization.values().all(|&u| u <= 1.0)
    }
}
