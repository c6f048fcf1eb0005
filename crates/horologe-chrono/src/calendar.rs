//! Closed-form calendar arithmetic
//!
//! All calendars here are proleptic and work on an internal year that
//! includes year zero. Conversions go through the epoch day (days since
//! 1970-01-01): the first day of a year is a closed formula, the year of a
//! day is estimated from the mean year length and corrected by at most a
//! step or two, and months come from a cumulative-day table.

use horologe_core::checked::{clamp_day_millis, safe_add, safe_multiply, verify_value_bounds};
use horologe_core::constants::{MILLIS_PER_DAY, MILLIS_PER_WEEK};
use horologe_core::TimeResult;

const DAYS_BEFORE_MONTH: [i32; 13] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334, 365];
const DAYS_IN_MONTH: [i32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Millis into a year at which Feb 29 starts.
const FEB_29: i64 = (31 + 29 - 1) * MILLIS_PER_DAY;
/// Millis into a weekyear at which week 53 starts.
const WEEK_53: i64 = (53 - 1) * MILLIS_PER_WEEK;

/// Leap and month rules of a calendar family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarRules {
    /// Divisible by 4, except centuries not divisible by 400
    Gregorian,
    /// Divisible by 4
    Julian,
    /// Year mod 4 == 3; twelve 30-day months plus a short thirteenth
    Coptic,
}

impl CalendarRules {
    pub fn min_year(self) -> i32 {
        match self {
            CalendarRules::Gregorian => -292_275_054,
            CalendarRules::Julian => -292_269_054,
            CalendarRules::Coptic => -292_269_337,
        }
    }

    pub fn max_year(self) -> i32 {
        match self {
            CalendarRules::Gregorian => 292_278_993,
            CalendarRules::Julian => 292_272_992,
            CalendarRules::Coptic => 292_272_708,
        }
    }

    /// Days from the first day of internal year 0 to 1970-01-01.
    fn epoch_offset(self) -> i64 {
        match self {
            CalendarRules::Gregorian => 719_528,
            CalendarRules::Julian => 719_530,
            CalendarRules::Coptic => 615_923,
        }
    }
}

fn gj_month_length(month: i32) -> i32 {
    usize::try_from(month - 1)
        .ok()
        .and_then(|i| DAYS_IN_MONTH.get(i).copied())
        .unwrap_or(31)
}

fn ceil_div(a: i64, b: i64) -> i64 {
    -((-a).div_euclid(b))
}

/// Epoch day of an instant.
#[inline]
pub fn day_of(instant: i64) -> i64 {
    instant.div_euclid(MILLIS_PER_DAY)
}

#[inline]
pub fn millis_of_day(instant: i64) -> i64 {
    instant.rem_euclid(MILLIS_PER_DAY)
}

/// Calendar arithmetic shared by the fields of one chronology.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Calendar {
    rules: CalendarRules,
    min_days_in_first_week: i32,
}

impl Calendar {
    pub fn new(rules: CalendarRules, min_days_in_first_week: i32) -> Self {
        Calendar { rules, min_days_in_first_week }
    }

    pub fn rules(&self) -> CalendarRules {
        self.rules
    }

    pub fn min_days_in_first_week(&self) -> i32 {
        self.min_days_in_first_week
    }

    pub fn min_year(&self) -> i32 {
        self.rules.min_year()
    }

    pub fn max_year(&self) -> i32 {
        self.rules.max_year()
    }

    pub fn max_month(&self) -> i32 {
        match self.rules {
            CalendarRules::Coptic => 13,
            _ => 12,
        }
    }

    /// Julian and Coptic year fields skip zero; their values below zero are
    /// one less than the internal year.
    pub fn internal_year(&self, year: i32) -> i32 {
        match self.rules {
            CalendarRules::Gregorian => year,
            _ if year < 0 => year + 1,
            _ => year,
        }
    }

    pub fn is_leap_year(&self, year: i64) -> bool {
        match self.rules {
            CalendarRules::Gregorian => year & 3 == 0 && (year % 100 != 0 || year % 400 == 0),
            CalendarRules::Julian => year & 3 == 0,
            CalendarRules::Coptic => year & 3 == 3,
        }
    }

    /// Epoch day of the first day of `year`.
    pub fn year_start_day(&self, year: i64) -> i64 {
        let base = 365 * year - self.rules.epoch_offset();
        match self.rules {
            CalendarRules::Gregorian => base + ceil_div(year, 4) - ceil_div(year, 100) + ceil_div(year, 400),
            CalendarRules::Julian => base + ceil_div(year, 4),
            CalendarRules::Coptic => base + year.div_euclid(4),
        }
    }

    pub fn year_of_day(&self, day: i64) -> i64 {
        let (numer, denom) = match self.rules {
            CalendarRules::Gregorian => (400, 146_097),
            _ => (4, 1_461),
        };
        let mut year = ((day + self.rules.epoch_offset()) * numer).div_euclid(denom);
        while self.year_start_day(year) > day {
            year -= 1;
        }
        while self.year_start_day(year + 1) <= day {
            year += 1;
        }
        year
    }

    pub fn days_in_year(&self, year: i32) -> i32 {
        if self.is_leap_year(year as i64) {
            366
        } else {
            365
        }
    }

    pub fn days_in_month(&self, year: i32, month: i32) -> i32 {
        let leap = self.is_leap_year(year as i64);
        match self.rules {
            CalendarRules::Coptic if month == 13 => {
                if leap {
                    6
                } else {
                    5
                }
            }
            CalendarRules::Coptic => 30,
            _ if month == 2 && leap => 29,
            _ => gj_month_length(month),
        }
    }

    /// Largest day count `month` has in any year.
    pub fn max_days_in_month(&self, month: i32) -> i32 {
        match self.rules {
            CalendarRules::Coptic if month == 13 => 6,
            CalendarRules::Coptic => 30,
            _ if month == 2 => 29,
            _ => gj_month_length(month),
        }
    }

    pub fn max_days_in_any_month(&self) -> i32 {
        match self.rules {
            CalendarRules::Coptic => 30,
            _ => 31,
        }
    }

    fn days_before_month(&self, year: i64, month: i32) -> i64 {
        match self.rules {
            CalendarRules::Coptic => (month as i64 - 1) * 30,
            _ => {
                let leap_day = if month > 2 && self.is_leap_year(year) { 1 } else { 0 };
                let index = (month - 1).clamp(0, 12) as usize;
                (DAYS_BEFORE_MONTH[index] + leap_day) as i64
            }
        }
    }

    /// Month containing the one-based `day_of_year`.
    fn month_of_day_of_year(&self, year: i64, day_of_year: i64) -> i32 {
        match self.rules {
            CalendarRules::Coptic => ((day_of_year - 1) / 30 + 1).min(13) as i32,
            _ => {
                let mut month = 12;
                while month > 1 && self.days_before_month(year, month) >= day_of_year {
                    month -= 1;
                }
                month
            }
        }
    }

    pub fn year(&self, instant: i64) -> i32 {
        self.year_of_day(day_of(instant)) as i32
    }

    pub fn day_of_year(&self, instant: i64) -> i32 {
        let day = day_of(instant);
        (day - self.year_start_day(self.year_of_day(day)) + 1) as i32
    }

    pub fn month(&self, instant: i64) -> i32 {
        let day = day_of(instant);
        let year = self.year_of_day(day);
        self.month_of_day_of_year(year, day - self.year_start_day(year) + 1)
    }

    pub fn day_of_month(&self, instant: i64) -> i32 {
        let day = day_of(instant);
        let year = self.year_of_day(day);
        let day_of_year = day - self.year_start_day(year) + 1;
        let month = self.month_of_day_of_year(year, day_of_year);
        (day_of_year - self.days_before_month(year, month)) as i32
    }

    fn ymd_day(&self, year: i32, month: i32, day: i32) -> i64 {
        self.year_start_day(year as i64) + self.days_before_month(year as i64, month) + day as i64 - 1
    }

    pub fn year_millis(&self, year: i32) -> i64 {
        clamp_day_millis(self.year_start_day(year as i64), 0)
    }

    pub fn year_month_millis(&self, year: i32, month: i32) -> i64 {
        clamp_day_millis(self.ymd_day(year, month, 1), 0)
    }

    pub fn ymd_millis(&self, year: i32, month: i32, day: i32) -> i64 {
        clamp_day_millis(self.ymd_day(year, month, day), 0)
    }

    /// Instant of a validated date and millis-of-day.
    pub fn date_time_millis(&self, year: i32, month: i32, day: i32, millis_of_day: i32) -> TimeResult<i64> {
        verify_value_bounds("year", year as i64, self.min_year() as i64, self.max_year() as i64)?;
        verify_value_bounds("monthOfYear", month as i64, 1, self.max_month() as i64)?;
        verify_value_bounds("dayOfMonth", day as i64, 1, self.days_in_month(year, month) as i64)?;
        verify_value_bounds("millisOfDay", millis_of_day as i64, 0, MILLIS_PER_DAY - 1)?;
        let midnight = safe_multiply(self.ymd_day(year, month, day), MILLIS_PER_DAY)?;
        safe_add(midnight, millis_of_day as i64)
    }

    pub fn day_of_week(&self, instant: i64) -> i32 {
        ((day_of(instant) + 3).rem_euclid(7) + 1) as i32
    }

    fn first_week_start_day(&self, year: i64) -> i64 {
        let jan1 = self.year_start_day(year);
        let dow = (jan1 + 3).rem_euclid(7) + 1;
        if dow > (8 - self.min_days_in_first_week) as i64 {
            jan1 + (8 - dow)
        } else {
            jan1 - (dow - 1)
        }
    }

    pub fn weeks_in_year(&self, weekyear: i32) -> i32 {
        let year = weekyear as i64;
        ((self.first_week_start_day(year + 1) - self.first_week_start_day(year)) / 7) as i32
    }

    /// (weekyear, week) of an epoch day.
    fn week_date(&self, day: i64) -> (i64, i32) {
        let year = self.year_of_day(day);
        let start = self.first_week_start_day(year);
        if day < start {
            return (year - 1, self.weeks_in_year((year - 1) as i32));
        }
        if day >= self.first_week_start_day(year + 1) {
            return (year + 1, 1);
        }
        (year, ((day - start) / 7 + 1) as i32)
    }

    pub fn weekyear(&self, instant: i64) -> i32 {
        self.week_date(day_of(instant)).0 as i32
    }

    pub fn week_of_weekyear(&self, instant: i64) -> i32 {
        self.week_date(day_of(instant)).1
    }

    /// Start of the Monday-based week containing `instant`.
    pub fn week_floor(&self, instant: i64) -> i64 {
        clamp_day_millis((day_of(instant) + 3).div_euclid(7) * 7 - 3, 0)
    }

    pub fn weekyear_floor(&self, instant: i64) -> i64 {
        let monday = (day_of(instant) + 3).div_euclid(7) * 7 - 3;
        let (_, week) = self.week_date(monday);
        clamp_day_millis(monday - (week as i64 - 1) * 7, 0)
    }

    /// Move to `year`, keeping the day of year (Feb 29 aware) and time.
    /// `year` must already be within bounds.
    pub fn set_year(&self, instant: i64, year: i32) -> i64 {
        let this_year = self.year(instant) as i64;
        let target = year as i64;
        let mut day_of_year = self.day_of_year(instant) as i64;
        match self.rules {
            CalendarRules::Coptic => {
                if day_of_year > 365 && !self.is_leap_year(target) {
                    day_of_year -= 1;
                }
            }
            _ => {
                if day_of_year > 31 + 28 {
                    if self.is_leap_year(this_year) {
                        if !self.is_leap_year(target) {
                            day_of_year -= 1;
                        }
                    } else if self.is_leap_year(target) {
                        day_of_year += 1;
                    }
                }
            }
        }
        clamp_day_millis(self.year_start_day(target) + day_of_year - 1, millis_of_day(instant))
    }

    pub fn add_years(&self, instant: i64, years: i64) -> TimeResult<i64> {
        if years == 0 {
            return Ok(instant);
        }
        let target = safe_add(self.year(instant) as i64, years)?;
        verify_value_bounds("year", target, self.min_year() as i64, self.max_year() as i64)?;
        Ok(self.set_year(instant, target as i32))
    }

    /// Whole years from `subtrahend` to `minuend`, truncated toward zero.
    pub fn year_difference(&self, minuend: i64, subtrahend: i64) -> i64 {
        if minuend < subtrahend {
            return -self.year_difference(subtrahend, minuend);
        }
        let minuend_year = self.year(minuend);
        let subtrahend_year = self.year(subtrahend);
        let mut minuend_rem = minuend - self.year_millis(minuend_year);
        let mut subtrahend_rem = subtrahend - self.year_millis(subtrahend_year);
        if self.rules != CalendarRules::Coptic && subtrahend_rem >= FEB_29 {
            if self.is_leap_year(subtrahend_year as i64) {
                if !self.is_leap_year(minuend_year as i64) {
                    subtrahend_rem -= MILLIS_PER_DAY;
                }
            } else if minuend_rem >= FEB_29 && self.is_leap_year(minuend_year as i64) {
                minuend_rem -= MILLIS_PER_DAY;
            }
        }
        let mut difference = minuend_year as i64 - subtrahend_year as i64;
        if minuend_rem < subtrahend_rem {
            difference -= 1;
        }
        difference
    }

    /// Move to `month` of the same year, clamping the day of month.
    /// `month` must already be within bounds.
    pub fn set_month(&self, instant: i64, month: i32) -> i64 {
        let year = self.year(instant);
        let day = self.day_of_month(instant).min(self.days_in_month(year, month));
        clamp_day_millis(self.ymd_day(year, month, day), millis_of_day(instant))
    }

    pub fn add_months(&self, instant: i64, months: i64) -> TimeResult<i64> {
        if months == 0 {
            return Ok(instant);
        }
        let year = self.year(instant);
        let month = self.month(instant);
        let max = self.max_month() as i64;
        let total = safe_add(month as i64 - 1, months)?;
        let new_year = year as i64 + total.div_euclid(max);
        let new_month = (total.rem_euclid(max) + 1) as i32;
        if new_year < self.min_year() as i64 || new_year > self.max_year() as i64 {
            return Err(horologe_core::TimeError::overflow("Magnitude of add amount is too large"));
        }
        let new_year = new_year as i32;
        let day = self.day_of_month(instant).min(self.days_in_month(new_year, new_month));
        Ok(clamp_day_millis(self.ymd_day(new_year, new_month, day), millis_of_day(instant)))
    }

    pub fn month_difference(&self, minuend: i64, subtrahend: i64) -> i64 {
        if minuend < subtrahend {
            return -self.month_difference(subtrahend, minuend);
        }
        let minuend_year = self.year(minuend);
        let minuend_month = self.month(minuend);
        let subtrahend_year = self.year(subtrahend);
        let subtrahend_month = self.month(subtrahend);
        let mut difference = (minuend_year as i64 - subtrahend_year as i64) * self.max_month() as i64
            + minuend_month as i64
            - subtrahend_month as i64;

        // Adding months clamps to the last day of the month, so a subtrahend
        // day past the minuend's last day counts as that last day.
        let mut subtrahend = subtrahend;
        let minuend_dom = self.day_of_month(minuend);
        if minuend_dom == self.days_in_month(minuend_year, minuend_month) {
            let subtrahend_dom = self.day_of_month(subtrahend);
            if subtrahend_dom > minuend_dom {
                subtrahend -= (subtrahend_dom - minuend_dom) as i64 * MILLIS_PER_DAY;
            }
        }

        let minuend_rem = minuend - self.year_month_millis(minuend_year, minuend_month);
        let subtrahend_rem = subtrahend - self.year_month_millis(subtrahend_year, subtrahend_month);
        if minuend_rem < subtrahend_rem {
            difference -= 1;
        }
        difference
    }

    /// Move to `weekyear`, keeping week number (capped) and day of week.
    pub fn set_weekyear(&self, instant: i64, weekyear: i32) -> i64 {
        let this_weekyear = self.weekyear(instant);
        if this_weekyear == weekyear {
            return instant;
        }
        let day_of_week = self.day_of_week(instant);
        let max_out_weeks = self.weeks_in_year(this_weekyear).min(self.weeks_in_year(weekyear));
        let set_to_week = self.week_of_weekyear(instant).min(max_out_weeks);

        let mut work = self.set_year(instant, weekyear);
        let work_weekyear = self.weekyear(work);
        if work_weekyear < weekyear {
            work = work.saturating_add(MILLIS_PER_WEEK);
        } else if work_weekyear > weekyear {
            work = work.saturating_sub(MILLIS_PER_WEEK);
        }
        let current_week = self.week_of_weekyear(work);
        work = work.saturating_add((set_to_week - current_week) as i64 * MILLIS_PER_WEEK);
        work.saturating_add((day_of_week - self.day_of_week(work)) as i64 * MILLIS_PER_DAY)
    }

    pub fn add_weekyears(&self, instant: i64, years: i64) -> TimeResult<i64> {
        if years == 0 {
            return Ok(instant);
        }
        let target = safe_add(self.weekyear(instant) as i64, years)?;
        verify_value_bounds("weekyear", target, self.min_year() as i64, self.max_year() as i64)?;
        Ok(self.set_weekyear(instant, target as i32))
    }

    pub fn weekyear_difference(&self, minuend: i64, subtrahend: i64) -> i64 {
        if minuend < subtrahend {
            return -self.weekyear_difference(subtrahend, minuend);
        }
        let minuend_weekyear = self.weekyear(minuend);
        let subtrahend_weekyear = self.weekyear(subtrahend);
        let minuend_rem = minuend - self.weekyear_floor(minuend);
        let mut subtrahend_rem = subtrahend - self.weekyear_floor(subtrahend);
        if subtrahend_rem >= WEEK_53 && self.weeks_in_year(minuend_weekyear) <= 52 {
            subtrahend_rem -= MILLIS_PER_WEEK;
        }
        let mut difference = minuend_weekyear as i64 - subtrahend_weekyear as i64;
        if minuend_rem < subtrahend_rem {
            difference -= 1;
        }
        difference
    }

    pub fn average_millis_per_year(&self) -> i64 {
        match self.rules {
            CalendarRules::Gregorian => 31_556_952_000,
            _ => 31_557_600_000,
        }
    }

    pub fn average_millis_per_month(&self) -> i64 {
        match self.rules {
            CalendarRules::Gregorian => 2_629_746_000,
            CalendarRules::Julian => 2_629_800_000,
            CalendarRules::Coptic => 2_592_000_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn gregorian() -> Calendar {
        Calendar::new(CalendarRules::Gregorian, 4)
    }

    #[test]
    fn test_year_start_days() {
        let cal = gregorian();
        assert_eq!(cal.year_start_day(1970), 0);
        assert_eq!(cal.year_start_day(2005), 12_784);
        assert_eq!(cal.year_start_day(1969), -365);
        assert_eq!(cal.year_start_day(2001) - cal.year_start_day(2000), 366);
        assert_eq!(cal.year_start_day(1901) - cal.year_start_day(1900), 365);

        let julian = Calendar::new(CalendarRules::Julian, 4);
        assert_eq!(julian.year_start_day(1970), 13);
        assert!(julian.is_leap_year(1900));

        let coptic = Calendar::new(CalendarRules::Coptic, 4);
        assert_eq!(coptic.year_start_day(1687), 253);
        assert!(coptic.is_leap_year(1687));
    }

    #[test]
    fn test_decompose_dates() {
        let cal = gregorian();
        let instant = cal.date_time_millis(2004, 6, 9, 0).unwrap();
        assert_eq!(cal.year(instant), 2004);
        assert_eq!(cal.month(instant), 6);
        assert_eq!(cal.day_of_month(instant), 9);
        assert_eq!(cal.day_of_year(instant), 161);
        assert_eq!(cal.day_of_week(instant), 3);
        assert_eq!(cal.day_of_week(0), 4);
    }

    #[test]
    fn test_max_instant_decomposes() {
        let cal = gregorian();
        assert_eq!(cal.year(i64::MAX), 292_278_994);
        assert_eq!(cal.month(i64::MAX), 8);
        assert_eq!(cal.day_of_month(i64::MAX), 17);
        assert_eq!(cal.year(i64::MIN), -292_275_055);
    }

    #[test]
    fn test_week_dates() {
        let cal = gregorian();
        assert_eq!(cal.weeks_in_year(2004), 53);
        assert_eq!(cal.weeks_in_year(2005), 52);
        let new_year = cal.date_time_millis(2005, 1, 1, 0).unwrap();
        assert_eq!(cal.weekyear(new_year), 2004);
        assert_eq!(cal.week_of_weekyear(new_year), 53);
        let monday = cal.date_time_millis(2004, 12, 27, 0).unwrap();
        assert_eq!(cal.week_floor(new_year + 5), monday);
        assert_eq!(cal.weekyear_floor(new_year), cal.date_time_millis(2003, 12, 29, 0).unwrap());
    }

    #[test]
    fn test_set_year_keeps_day_across_leap() {
        let cal = gregorian();
        let march1 = cal.date_time_millis(2003, 3, 1, 1_000).unwrap();
        let moved = cal.set_year(march1, 2004);
        assert_eq!((cal.month(moved), cal.day_of_month(moved)), (3, 1));
        let feb29 = cal.date_time_millis(2004, 2, 29, 0).unwrap();
        let moved = cal.set_year(feb29, 2005);
        assert_eq!((cal.month(moved), cal.day_of_month(moved)), (2, 28));
    }

    #[test]
    fn test_month_add_clamps() {
        let cal = gregorian();
        let jan31 = cal.date_time_millis(1972, 1, 31, 0).unwrap();
        let result = cal.add_months(jan31, 1).unwrap();
        assert_eq!((cal.year(result), cal.month(result), cal.day_of_month(result)), (1972, 2, 29));
        let back = cal.add_months(jan31, -13).unwrap();
        assert_eq!((cal.year(back), cal.month(back)), (1970, 12));
        assert!(cal.add_months(jan31, i64::MAX / 2).unwrap_err().is_overflow());
    }

    #[test]
    fn test_month_difference_last_day() {
        let cal = gregorian();
        let jan31 = cal.date_time_millis(2003, 1, 31, 0).unwrap();
        let feb28 = cal.date_time_millis(2003, 2, 28, 0).unwrap();
        assert_eq!(cal.month_difference(feb28, jan31), 1);
        assert_eq!(cal.month_difference(jan31, feb28), -1);
    }

    #[test]
    fn test_year_difference_feb29() {
        let cal = gregorian();
        let feb29 = cal.date_time_millis(2004, 2, 29, 0).unwrap();
        let feb28 = cal.date_time_millis(2005, 2, 28, 0).unwrap();
        assert_eq!(cal.year_difference(feb28, feb29), 1);
    }

    #[test]
    fn test_date_validation() {
        let cal = gregorian();
        assert!(cal.date_time_millis(2003, 2, 29, 0).unwrap_err().is_illegal_field_value());
        assert!(cal.date_time_millis(2003, 13, 1, 0).is_err());
        let coptic = Calendar::new(CalendarRules::Coptic, 4);
        assert!(coptic.date_time_millis(1687, 13, 6, 0).is_ok());
        assert!(coptic.date_time_millis(1688, 13, 6, 0).is_err());
    }

    proptest! {
        #[test]
        fn prop_day_round_trip(day in -106_000_000_000i64..106_000_000_000i64) {
            for rules in [CalendarRules::Gregorian, CalendarRules::Julian, CalendarRules::Coptic] {
                let cal = Calendar::new(rules, 4);
                let instant = day * MILLIS_PER_DAY;
                let rebuilt = cal.ymd_millis(cal.year(instant), cal.month(instant), cal.day_of_month(instant));
                prop_assert_eq!(rebuilt, instant);
            }
        }

        #[test]
        fn prop_weekyear_set_round_trip(day in -1_000_000i64..1_000_000i64, target in 1900i32..2100) {
            let cal = gregorian();
            let instant = day * MILLIS_PER_DAY;
            let moved = cal.set_weekyear(instant, target);
            prop_assert_eq!(cal.weekyear(moved), target);
            prop_assert_eq!(cal.day_of_week(moved), cal.day_of_week(instant));
        }
    }
}
