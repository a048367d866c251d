//! Weekly calendar model.
//!
//! Defines the day/period grid a timetable is laid out on, the lunch
//! break, and the working-day policy for each academic year.
//!
//! # Grid
//! A week is an ordered list of [`Day`]s. Each day is divided into
//! numbered periods; one period is reserved for lunch and is never
//! assignable. Candidate periods are scanned pre-lunch first, then
//! post-lunch.
//!
//! # Holidays
//! Sections of the senior-most year observe a fixed set of holiday days.
//! The rule is evaluated per section, never globally.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Period index within a day (1-based).
pub type Period = u8;

/// A teaching day.
///
/// Variant order is the canonical weekday order used for sorting output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    #[serde(rename = "MON")]
    Mon,
    #[serde(rename = "TUE")]
    Tue,
    #[serde(rename = "WED")]
    Wed,
    #[serde(rename = "THU")]
    Thu,
    #[serde(rename = "FRI")]
    Fri,
    #[serde(rename = "SAT")]
    Sat,
}

impl Day {
    /// The full Monday–Saturday week in canonical order.
    pub const ALL: [Day; 6] = [Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri, Day::Sat];

    /// Three-letter upper-case code (`"MON"`, ...).
    pub fn code(self) -> &'static str {
        match self {
            Day::Mon => "MON",
            Day::Tue => "TUE",
            Day::Wed => "WED",
            Day::Thu => "THU",
            Day::Fri => "FRI",
            Day::Sat => "SAT",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Day/period grid plus the per-year working-day policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeekCalendar {
    /// Teaching days in canonical order.
    pub days: Vec<Day>,
    /// Assignable periods before lunch, in scan order.
    pub pre_lunch_periods: Vec<Period>,
    /// The reserved lunch period.
    pub lunch_period: Period,
    /// Assignable periods after lunch, in scan order.
    pub post_lunch_periods: Vec<Period>,
    /// Academic year that observes `senior_holidays`.
    pub senior_year: u32,
    /// Days removed from the week for `senior_year` sections.
    pub senior_holidays: Vec<Day>,
}

impl Default for WeekCalendar {
    fn default() -> Self {
        Self {
            days: Day::ALL.to_vec(),
            pre_lunch_periods: vec![1, 2, 3, 4],
            lunch_period: 5,
            post_lunch_periods: vec![6, 7],
            senior_year: 4,
            senior_holidays: vec![Day::Fri, Day::Sat],
        }
    }
}

impl WeekCalendar {
    /// Creates the default six-day, seven-period calendar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the teaching days.
    pub fn with_days(mut self, days: Vec<Day>) -> Self {
        self.days = days;
        self
    }

    /// Sets the senior-year holiday policy.
    pub fn with_senior_holidays(mut self, senior_year: u32, holidays: Vec<Day>) -> Self {
        self.senior_year = senior_year;
        self.senior_holidays = holidays;
        self
    }

    /// Whether `day` is a holiday for sections of `year`.
    pub fn is_holiday(&self, year: u32, day: Day) -> bool {
        year == self.senior_year && self.senior_holidays.contains(&day)
    }

    /// Working days for a section of the given academic year.
    pub fn working_days(&self, year: u32) -> Vec<Day> {
        self.days
            .iter()
            .copied()
            .filter(|&d| !self.is_holiday(year, d))
            .collect()
    }

    /// Assignable periods in scan order (pre-lunch, then post-lunch).
    ///
    /// The lunch period is never included, even if misconfigured into
    /// one of the candidate lists.
    pub fn candidate_periods(&self) -> Vec<Period> {
        self.pre_lunch_periods
            .iter()
            .chain(self.post_lunch_periods.iter())
            .copied()
            .filter(|&p| p != self.lunch_period)
            .collect()
    }

    /// Whether `period` is the lunch break.
    #[inline]
    pub fn is_lunch(&self, period: Period) -> bool {
        period == self.lunch_period
    }

    /// Number of assignable slots per week for a section of `year`.
    pub fn weekly_slots(&self, year: u32) -> usize {
        self.working_days(year).len() * self.candidate_periods().len()
    }
}
