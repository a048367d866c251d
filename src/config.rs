//! Engine configuration.
//!
//! Every knob has a default matching a six-day, seven-period week with a
//! fifth-period lunch, so `EngineConfig::default()` is ready to use.
//! Configs can also be read from TOML:
//!
//! ```toml
//! theory_daily_cap = 2
//! library_weekly_cap = 4
//! lab_blocks = [[1, 2], [3, 4], [6, 7]]
//! seed = 42
//!
//! [calendar]
//! senior_year = 4
//! senior_holidays = ["FRI", "SAT"]
//!
//! [fillers]
//! library_code = "LIB"
//! library_room = "LIBRARY"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};
use crate::models::{Period, WeekCalendar};

/// Identities of the filler activities used by the gap filler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillerConfig {
    /// Subject code of the library filler.
    pub library_code: String,
    /// Room name of the library.
    pub library_room: String,
    /// Subject code of the sports filler.
    pub sports_code: String,
    /// Room name of the sports ground.
    pub sports_room: String,
}

impl Default for FillerConfig {
    fn default() -> Self {
        Self {
            library_code: "LIB".into(),
            library_room: "LIBRARY".into(),
            sports_code: "SPORTS".into(),
            sports_room: "GROUND".into(),
        }
    }
}

impl FillerConfig {
    /// Whether `code` names one of the filler subjects.
    pub fn is_filler_code(&self, code: &str) -> bool {
        code == self.library_code || code == self.sports_code
    }

    /// Whether `name` names one of the filler rooms.
    pub fn is_filler_room(&self, name: &str) -> bool {
        name == self.library_room || name == self.sports_room
    }
}

/// Timetable engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Day/period grid and holiday policy.
    pub calendar: WeekCalendar,
    /// Contiguous period pairs tried for lab blocks, in priority order.
    pub lab_blocks: Vec<[Period; 2]>,
    /// Max periods of one theory subject per section per day.
    pub theory_daily_cap: u32,
    /// Max library periods per section per week.
    pub library_weekly_cap: u32,
    /// Filler subject and room identities.
    pub fillers: FillerConfig,
    /// Seed for the lab day shuffle. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            calendar: WeekCalendar::default(),
            lab_blocks: vec![[1, 2], [3, 4], [6, 7]],
            theory_daily_cap: 2,
            library_weekly_cap: 4,
            fillers: FillerConfig::default(),
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a TOML file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Sets the calendar.
    pub fn with_calendar(mut self, calendar: WeekCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Sets the lab block priority list.
    pub fn with_lab_blocks(mut self, blocks: Vec<[Period; 2]>) -> Self {
        self.lab_blocks = blocks;
        self
    }

    /// Sets the theory daily cap.
    pub fn with_theory_daily_cap(mut self, cap: u32) -> Self {
        self.theory_daily_cap = cap;
        self
    }

    /// Sets the library weekly cap.
    pub fn with_library_weekly_cap(mut self, cap: u32) -> Self {
        self.library_weekly_cap = cap;
        self
    }

    /// Sets the filler identities.
    pub fn with_fillers(mut self, fillers: FillerConfig) -> Self {
        self.fillers = fillers;
        self
    }

    /// Fixes the random seed for reproducible lab placement.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks semantic consistency.
    pub fn validate(&self) -> ConfigResult<()> {
        let cal = &self.calendar;
        if cal.days.is_empty() {
            return Err(ConfigError::Invalid("no teaching days configured".into()));
        }
        if cal
            .pre_lunch_periods
            .iter()
            .chain(cal.post_lunch_periods.iter())
            .any(|&p| p == cal.lunch_period)
        {
            return Err(ConfigError::Invalid(format!(
                "lunch period {} listed as a candidate period",
                cal.lunch_period
            )));
        }
        if self.theory_daily_cap == 0 {
            return Err(ConfigError::Invalid("theory_daily_cap must be at least 1".into()));
        }

        let candidates = cal.candidate_periods();
        for &[p1, p2] in &self.lab_blocks {
            if p1.checked_add(1) != Some(p2) {
                return Err(ConfigError::Invalid(format!(
                    "lab block [{p1}, {p2}] is not a contiguous pair"
                )));
            }
            if !candidates.contains(&p1) || !candidates.contains(&p2) {
                return Err(ConfigError::Invalid(format!(
                    "lab block [{p1}, {p2}] uses a non-assignable period"
                )));
            }
        }
        Ok(())
    }
}
