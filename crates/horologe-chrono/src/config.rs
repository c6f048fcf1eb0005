//! Chronology configuration

use horologe_core::{TimeError, TimeResult};

/// Week numbering configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WeekConfig {
    /// Days of the new year the first week must contain (1..=7)
    pub min_days_in_first_week: u8,
}

impl Default for WeekConfig {
    fn default() -> Self {
        // ISO-8601 weeks
        WeekConfig { min_days_in_first_week: 4 }
    }
}

impl WeekConfig {
    /// Week 1 is the week containing January 1st.
    pub fn us() -> Self {
        WeekConfig { min_days_in_first_week: 1 }
    }

    pub fn validate(&self) -> TimeResult<()> {
        if !(1..=7).contains(&self.min_days_in_first_week) {
            return Err(TimeError::illegal_argument(format!(
                "Invalid min days in first week: {}",
                self.min_days_in_first_week
            )));
        }
        Ok(())
    }
}

/// Gregorian/Julian cutover configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CutoverConfig {
    /// First instant governed by Gregorian rules
    pub cutover_millis: i64,
    /// Week numbering of both calendars
    pub week: WeekConfig,
}

impl Default for CutoverConfig {
    fn default() -> Self {
        // 1582-10-15T00:00:00Z, the papal cutover
        CutoverConfig {
            cutover_millis: -12_219_292_800_000,
            week: WeekConfig::default(),
        }
    }
}

impl CutoverConfig {
    /// Great Britain and its colonies, 1752-09-14T00:00:00Z.
    pub fn british() -> Self {
        CutoverConfig {
            cutover_millis: -6_857_222_400_000,
            week: WeekConfig::default(),
        }
    }

    pub fn at(cutover_millis: i64) -> Self {
        CutoverConfig { cutover_millis, ..Self::default() }
    }
}
