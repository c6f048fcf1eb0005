//! Calendar-backed fields and duration units
//!
//! These fields read and write instants through a shared [`Calendar`], so a
//! chronology's year, month, day and week fields agree on leap rules and
//! first-week settings without referring to each other.

use std::sync::Arc;

use horologe_core::checked::{safe_negate, verify_value_bounds};
use horologe_core::constants::{MILLIS_PER_DAY, MILLIS_PER_WEEK};
use horologe_core::{DateTimeFieldType, DurationFieldType, TimeResult};

use crate::calendar::Calendar;
use crate::duration::DurationField;
use crate::field::{carry_partial, shift, verify_bounds, DateTimeField};
use crate::locale::{LocaleText, TextKind};
use crate::partial::{is_contiguous, ReadablePartial};
use crate::precise::floor_to;

/// Imprecise calendar units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarUnit {
    Years,
    Months,
    Weekyears,
}

/// Years, months or weekyears measured on a calendar.
#[derive(Debug)]
pub struct CalendarDurationField {
    cal: Arc<Calendar>,
    unit: CalendarUnit,
}

impl CalendarDurationField {
    pub fn new(cal: Arc<Calendar>, unit: CalendarUnit) -> Arc<dyn DurationField> {
        Arc::new(CalendarDurationField { cal, unit })
    }
}

impl DurationField for CalendarDurationField {
    fn duration_type(&self) -> DurationFieldType {
        match self.unit {
            CalendarUnit::Years => DurationFieldType::YEARS,
            CalendarUnit::Months => DurationFieldType::MONTHS,
            CalendarUnit::Weekyears => DurationFieldType::WEEKYEARS,
        }
    }

    fn is_precise(&self) -> bool {
        false
    }

    fn unit_millis(&self) -> i64 {
        match self.unit {
            CalendarUnit::Months => self.cal.average_millis_per_month(),
            _ => self.cal.average_millis_per_year(),
        }
    }

    fn add(&self, instant: i64, value: i64) -> TimeResult<i64> {
        match self.unit {
            CalendarUnit::Years => self.cal.add_years(instant, value),
            CalendarUnit::Months => self.cal.add_months(instant, value),
            CalendarUnit::Weekyears => self.cal.add_weekyears(instant, value),
        }
    }

    fn difference_i64(&self, minuend: i64, subtrahend: i64) -> TimeResult<i64> {
        Ok(match self.unit {
            CalendarUnit::Years => self.cal.year_difference(minuend, subtrahend),
            CalendarUnit::Months => self.cal.month_difference(minuend, subtrahend),
            CalendarUnit::Weekyears => self.cal.weekyear_difference(minuend, subtrahend),
        })
    }
}

/// The proleptic year, including zero and negative years.
#[derive(Debug)]
pub struct YearField {
    cal: Arc<Calendar>,
    years: Arc<dyn DurationField>,
    days: Arc<dyn DurationField>,
}

impl YearField {
    pub fn new(cal: Arc<Calendar>, years: Arc<dyn DurationField>, days: Arc<dyn DurationField>) -> Arc<dyn DateTimeField> {
        Arc::new(YearField { cal, years, days })
    }
}

impl DateTimeField for YearField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::YEAR
    }

    fn get(&self, instant: i64) -> TimeResult<i32> {
        Ok(self.cal.year(instant))
    }

    fn set(&self, instant: i64, value: i32) -> TimeResult<i64> {
        verify_bounds(self, value, self.cal.min_year(), self.cal.max_year())?;
        Ok(self.cal.set_year(instant, value))
    }

    fn duration_field(&self) -> Arc<dyn DurationField> {
        self.years.clone()
    }

    fn range_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        None
    }

    fn leap_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        Some(self.days.clone())
    }

    fn is_leap(&self, instant: i64) -> TimeResult<bool> {
        Ok(self.cal.is_leap_year(self.cal.year(instant) as i64))
    }

    fn leap_amount(&self, instant: i64) -> TimeResult<i32> {
        Ok(self.is_leap(instant)? as i32)
    }

    fn minimum_value(&self) -> i32 {
        self.cal.min_year()
    }

    fn maximum_value(&self) -> i32 {
        self.cal.max_year()
    }

    fn round_floor(&self, instant: i64) -> TimeResult<i64> {
        Ok(self.cal.year_millis(self.cal.year(instant)))
    }
}

/// Month of year; twelve months, or thirteen for Coptic.
#[derive(Debug)]
pub struct MonthOfYearField {
    cal: Arc<Calendar>,
    months: Arc<dyn DurationField>,
    years: Arc<dyn DurationField>,
    days: Arc<dyn DurationField>,
    text: TextKind,
}

impl MonthOfYearField {
    pub fn new(
        cal: Arc<Calendar>,
        months: Arc<dyn DurationField>,
        years: Arc<dyn DurationField>,
        days: Arc<dyn DurationField>,
        text: TextKind,
    ) -> Arc<dyn DateTimeField> {
        Arc::new(MonthOfYearField { cal, months, years, days, text })
    }

    fn leap_month(&self) -> i32 {
        if self.cal.max_month() == 13 {
            13
        } else {
            2
        }
    }
}

impl DateTimeField for MonthOfYearField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::MONTH_OF_YEAR
    }

    fn get(&self, instant: i64) -> TimeResult<i32> {
        Ok(self.cal.month(instant))
    }

    fn value_as_text(&self, value: i32, locale: &dyn LocaleText) -> String {
        self.text.text(value, locale, false)
    }

    fn value_as_short_text(&self, value: i32, locale: &dyn LocaleText) -> String {
        self.text.text(value, locale, true)
    }

    fn text_to_value(&self, text: &str, locale: &dyn LocaleText) -> TimeResult<i32> {
        self.text.parse("monthOfYear", text, locale)
    }

    fn maximum_text_length(&self, locale: &dyn LocaleText) -> usize {
        self.text.max_length(locale, false).unwrap_or(2)
    }

    fn maximum_short_text_length(&self, locale: &dyn LocaleText) -> usize {
        self.text.max_length(locale, true).unwrap_or(2)
    }

    fn set(&self, instant: i64, value: i32) -> TimeResult<i64> {
        verify_bounds(self, value, 1, self.cal.max_month())?;
        Ok(self.cal.set_month(instant, value))
    }

    fn duration_field(&self) -> Arc<dyn DurationField> {
        self.months.clone()
    }

    fn range_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        Some(self.years.clone())
    }

    fn leap_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        Some(self.days.clone())
    }

    fn is_leap(&self, instant: i64) -> TimeResult<bool> {
        let year = self.cal.year(instant);
        Ok(self.cal.month(instant) == self.leap_month() && self.cal.is_leap_year(year as i64))
    }

    fn leap_amount(&self, instant: i64) -> TimeResult<i32> {
        Ok(self.is_leap(instant)? as i32)
    }

    fn minimum_value(&self) -> i32 {
        1
    }

    fn maximum_value(&self) -> i32 {
        self.cal.max_month()
    }

    fn round_floor(&self, instant: i64) -> TimeResult<i64> {
        let year = self.cal.year(instant);
        Ok(self.cal.year_month_millis(year, self.cal.month(instant)))
    }

    /// A leading monthOfYear wraps on its own (month-day partials have no
    /// year to carry into); contiguous partials add through an instant so
    /// the day of month clamps.
    fn add_partial(
        &self,
        partial: &dyn ReadablePartial,
        index: usize,
        values: Vec<i32>,
        amount: i32,
    ) -> TimeResult<Vec<i32>> {
        if amount == 0 {
            return Ok(values);
        }
        let max = self.cal.max_month();
        if index == 0 && partial.size() > 0 && partial.field_type(0) == DateTimeFieldType::MONTH_OF_YEAR {
            let month = (values[0] - 1 + amount % max + max) % max + 1;
            return self.set_partial(partial, 0, values, month);
        }
        if is_contiguous(partial) {
            let chronology = partial.chronology();
            let mut instant = 0;
            for (i, value) in values.iter().enumerate() {
                instant = partial.field(i).set(instant, *value)?;
            }
            let instant = self.add(instant, amount)?;
            return chronology.get_values(partial, instant);
        }
        carry_partial(self, partial, index, values, amount, false)
    }
}

/// Day-granular fields that share precise day or week units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayKind {
    DayOfMonth,
    DayOfYear,
    DayOfWeek,
    WeekOfWeekyear,
}

#[derive(Debug)]
pub struct DayField {
    cal: Arc<Calendar>,
    kind: DayKind,
    unit: Arc<dyn DurationField>,
    range: Arc<dyn DurationField>,
}

impl DayField {
    /// `unit` is days (weeks for weekOfWeekyear); `range` is the unit the
    /// value cycles within.
    pub fn new(
        cal: Arc<Calendar>,
        kind: DayKind,
        unit: Arc<dyn DurationField>,
        range: Arc<dyn DurationField>,
    ) -> Arc<dyn DateTimeField> {
        Arc::new(DayField { cal, kind, unit, range })
    }

    fn unit_millis(&self) -> i64 {
        match self.kind {
            DayKind::WeekOfWeekyear => MILLIS_PER_WEEK,
            _ => MILLIS_PER_DAY,
        }
    }
}

impl DateTimeField for DayField {
    fn field_type(&self) -> DateTimeFieldType {
        match self.kind {
            DayKind::DayOfMonth => DateTimeFieldType::DAY_OF_MONTH,
            DayKind::DayOfYear => DateTimeFieldType::DAY_OF_YEAR,
            DayKind::DayOfWeek => DateTimeFieldType::DAY_OF_WEEK,
            DayKind::WeekOfWeekyear => DateTimeFieldType::WEEK_OF_WEEKYEAR,
        }
    }

    fn get(&self, instant: i64) -> TimeResult<i32> {
        Ok(match self.kind {
            DayKind::DayOfMonth => self.cal.day_of_month(instant),
            DayKind::DayOfYear => self.cal.day_of_year(instant),
            DayKind::DayOfWeek => self.cal.day_of_week(instant),
            DayKind::WeekOfWeekyear => self.cal.week_of_weekyear(instant),
        })
    }

    fn value_as_text(&self, value: i32, locale: &dyn LocaleText) -> String {
        match self.kind {
            DayKind::DayOfWeek => TextKind::DayOfWeek.text(value, locale, false),
            _ => value.to_string(),
        }
    }

    fn value_as_short_text(&self, value: i32, locale: &dyn LocaleText) -> String {
        match self.kind {
            DayKind::DayOfWeek => TextKind::DayOfWeek.text(value, locale, true),
            _ => value.to_string(),
        }
    }

    fn text_to_value(&self, text: &str, locale: &dyn LocaleText) -> TimeResult<i32> {
        let kind = match self.kind {
            DayKind::DayOfWeek => TextKind::DayOfWeek,
            _ => TextKind::Numeric,
        };
        kind.parse(&self.name(), text, locale)
    }

    fn maximum_text_length(&self, locale: &dyn LocaleText) -> usize {
        match self.kind {
            DayKind::DayOfWeek => locale.day_of_week_max_text_length(),
            _ => self.maximum_value().to_string().len(),
        }
    }

    fn maximum_short_text_length(&self, locale: &dyn LocaleText) -> usize {
        match self.kind {
            DayKind::DayOfWeek => locale.day_of_week_max_short_text_length(),
            _ => self.maximum_value().to_string().len(),
        }
    }

    fn set(&self, instant: i64, value: i32) -> TimeResult<i64> {
        verify_bounds(self, value, 1, self.maximum_value_at(instant)?)?;
        let current = self.get(instant)?;
        shift(instant, (value - current) as i64, self.unit_millis())
    }

    fn duration_field(&self) -> Arc<dyn DurationField> {
        self.unit.clone()
    }

    fn range_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        Some(self.range.clone())
    }

    fn minimum_value(&self) -> i32 {
        1
    }

    fn maximum_value(&self) -> i32 {
        match self.kind {
            DayKind::DayOfMonth => self.cal.max_days_in_any_month(),
            DayKind::DayOfYear => 366,
            DayKind::DayOfWeek => 7,
            DayKind::WeekOfWeekyear => 53,
        }
    }

    fn maximum_value_at(&self, instant: i64) -> TimeResult<i32> {
        Ok(match self.kind {
            DayKind::DayOfMonth => self.cal.days_in_month(self.cal.year(instant), self.cal.month(instant)),
            DayKind::DayOfYear => self.cal.days_in_year(self.cal.year(instant)),
            DayKind::DayOfWeek => 7,
            DayKind::WeekOfWeekyear => self.cal.weeks_in_year(self.cal.weekyear(instant)),
        })
    }

    fn maximum_value_for(&self, partial: &dyn ReadablePartial, values: &[i32]) -> i32 {
        let year = |ty: &DateTimeFieldType| partial.lookup(ty, values).map(|y| self.cal.internal_year(y));
        match self.kind {
            DayKind::DayOfMonth => match partial.lookup(&DateTimeFieldType::MONTH_OF_YEAR, values) {
                Some(month) if (1..=self.cal.max_month()).contains(&month) => {
                    match year(&DateTimeFieldType::YEAR) {
                        Some(year) => self.cal.days_in_month(year, month),
                        None => self.cal.max_days_in_month(month),
                    }
                }
                _ => self.maximum_value(),
            },
            DayKind::DayOfYear => year(&DateTimeFieldType::YEAR).map_or(366, |y| self.cal.days_in_year(y)),
            DayKind::DayOfWeek => 7,
            DayKind::WeekOfWeekyear => year(&DateTimeFieldType::WEEKYEAR).map_or(53, |y| self.cal.weeks_in_year(y)),
        }
    }

    fn round_floor(&self, instant: i64) -> TimeResult<i64> {
        Ok(match self.kind {
            DayKind::WeekOfWeekyear => self.cal.week_floor(instant),
            _ => floor_to(instant, MILLIS_PER_DAY),
        })
    }
}

/// The year that owns the ISO-style week of an instant.
#[derive(Debug)]
pub struct WeekyearField {
    cal: Arc<Calendar>,
    weekyears: Arc<dyn DurationField>,
    weeks: Arc<dyn DurationField>,
}

impl WeekyearField {
    pub fn new(
        cal: Arc<Calendar>,
        weekyears: Arc<dyn DurationField>,
        weeks: Arc<dyn DurationField>,
    ) -> Arc<dyn DateTimeField> {
        Arc::new(WeekyearField { cal, weekyears, weeks })
    }
}

impl DateTimeField for WeekyearField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::WEEKYEAR
    }

    fn get(&self, instant: i64) -> TimeResult<i32> {
        Ok(self.cal.weekyear(instant))
    }

    fn add_wrap_field(&self, instant: i64, amount: i32) -> TimeResult<i64> {
        self.add(instant, amount)
    }

    fn set(&self, instant: i64, value: i32) -> TimeResult<i64> {
        verify_bounds(self, value, self.cal.min_year(), self.cal.max_year())?;
        Ok(self.cal.set_weekyear(instant, value))
    }

    fn duration_field(&self) -> Arc<dyn DurationField> {
        self.weekyears.clone()
    }

    fn range_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        None
    }

    fn leap_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        Some(self.weeks.clone())
    }

    fn is_leap(&self, instant: i64) -> TimeResult<bool> {
        Ok(self.cal.weeks_in_year(self.cal.weekyear(instant)) > 52)
    }

    fn leap_amount(&self, instant: i64) -> TimeResult<i32> {
        Ok(self.cal.weeks_in_year(self.cal.weekyear(instant)) - 52)
    }

    fn minimum_value(&self) -> i32 {
        self.cal.min_year()
    }

    fn maximum_value(&self) -> i32 {
        self.cal.max_year()
    }

    fn round_floor(&self, instant: i64) -> TimeResult<i64> {
        Ok(self.cal.weekyear_floor(instant))
    }
}

/// BC/AD on the internal year: zero and below is BC.
#[derive(Debug)]
pub struct EraField {
    cal: Arc<Calendar>,
    eras: Arc<dyn DurationField>,
}

impl EraField {
    pub fn new(cal: Arc<Calendar>, eras: Arc<dyn DurationField>) -> Arc<dyn DateTimeField> {
        Arc::new(EraField { cal, eras })
    }

    fn start_of_ad(&self) -> i64 {
        self.cal.year_millis(1)
    }
}

impl DateTimeField for EraField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::ERA
    }

    fn get(&self, instant: i64) -> TimeResult<i32> {
        Ok(if self.cal.year(instant) <= 0 { 0 } else { 1 })
    }

    fn value_as_text(&self, value: i32, locale: &dyn LocaleText) -> String {
        TextKind::Era.text(value, locale, false)
    }

    fn text_to_value(&self, text: &str, locale: &dyn LocaleText) -> TimeResult<i32> {
        TextKind::Era.parse("era", text, locale)
    }

    fn maximum_text_length(&self, locale: &dyn LocaleText) -> usize {
        locale.era_max_text_length()
    }

    /// Flipping the era keeps the year of era: 2004 AD becomes 2004 BC.
    fn set(&self, instant: i64, value: i32) -> TimeResult<i64> {
        verify_bounds(self, value, 0, 1)?;
        if self.get(instant)? == value {
            return Ok(instant);
        }
        let target = 1 - self.cal.year(instant) as i64;
        verify_value_bounds("year", target, self.cal.min_year() as i64, self.cal.max_year() as i64)?;
        Ok(self.cal.set_year(instant, target as i32))
    }

    fn duration_field(&self) -> Arc<dyn DurationField> {
        self.eras.clone()
    }

    fn range_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        None
    }

    fn minimum_value(&self) -> i32 {
        0
    }

    fn maximum_value(&self) -> i32 {
        1
    }

    fn round_floor(&self, instant: i64) -> TimeResult<i64> {
        Ok(if self.get(instant)? == 1 { self.start_of_ad() } else { i64::MIN })
    }

    fn round_ceiling(&self, instant: i64) -> TimeResult<i64> {
        Ok(if self.get(instant)? == 0 { self.start_of_ad() } else { i64::MAX })
    }

    fn round_half_floor(&self, instant: i64) -> TimeResult<i64> {
        self.round_floor(instant)
    }

    fn round_half_ceiling(&self, instant: i64) -> TimeResult<i64> {
        self.round_floor(instant)
    }

    fn round_half_even(&self, instant: i64) -> TimeResult<i64> {
        self.round_floor(instant)
    }
}

/// An era field with one value, for calendars that count from a single
/// epoch (Coptic AM, Buddhist BE).
#[derive(Debug)]
pub struct SingleEraField {
    name: &'static str,
    eras: Arc<dyn DurationField>,
}

impl SingleEraField {
    pub fn new(name: &'static str, eras: Arc<dyn DurationField>) -> Arc<dyn DateTimeField> {
        Arc::new(SingleEraField { name, eras })
    }
}

impl DateTimeField for SingleEraField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::ERA
    }

    fn get(&self, _instant: i64) -> TimeResult<i32> {
        Ok(1)
    }

    fn value_as_text(&self, value: i32, locale: &dyn LocaleText) -> String {
        TextKind::Fixed(self.name).text(value, locale, false)
    }

    fn text_to_value(&self, text: &str, locale: &dyn LocaleText) -> TimeResult<i32> {
        TextKind::Fixed(self.name).parse("era", text, locale)
    }

    fn maximum_text_length(&self, _locale: &dyn LocaleText) -> usize {
        self.name.len()
    }

    fn add_wrap_field(&self, instant: i64, _amount: i32) -> TimeResult<i64> {
        Ok(instant)
    }

    fn set(&self, instant: i64, value: i32) -> TimeResult<i64> {
        verify_bounds(self, value, 1, 1)?;
        Ok(instant)
    }

    fn duration_field(&self) -> Arc<dyn DurationField> {
        self.eras.clone()
    }

    fn range_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        None
    }

    fn minimum_value(&self) -> i32 {
        1
    }

    fn maximum_value(&self) -> i32 {
        1
    }

    fn round_floor(&self, _instant: i64) -> TimeResult<i64> {
        Ok(i64::MIN)
    }

    fn round_ceiling(&self, _instant: i64) -> TimeResult<i64> {
        Ok(i64::MAX)
    }

    fn round_half_floor(&self, _instant: i64) -> TimeResult<i64> {
        Ok(i64::MIN)
    }

    fn round_half_ceiling(&self, _instant: i64) -> TimeResult<i64> {
        Ok(i64::MIN)
    }

    fn round_half_even(&self, _instant: i64) -> TimeResult<i64> {
        Ok(i64::MIN)
    }
}

/// Year of era over an internal year: 0 is 1 BC, -1 is 2 BC.
#[derive(Debug)]
pub struct YearOfEraField {
    year: Arc<dyn DateTimeField>,
    eras: Arc<dyn DurationField>,
}

impl YearOfEraField {
    pub fn new(year: Arc<dyn DateTimeField>, eras: Arc<dyn DurationField>) -> Arc<dyn DateTimeField> {
        Arc::new(YearOfEraField { year, eras })
    }
}

impl DateTimeField for YearOfEraField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::YEAR_OF_ERA
    }

    fn get(&self, instant: i64) -> TimeResult<i32> {
        let year = self.year.get(instant)?;
        Ok(if year <= 0 { 1 - year } else { year })
    }

    fn add(&self, instant: i64, value: i32) -> TimeResult<i64> {
        self.year.add(instant, value)
    }

    fn add_i64(&self, instant: i64, value: i64) -> TimeResult<i64> {
        self.year.add_i64(instant, value)
    }

    fn difference_i64(&self, minuend: i64, subtrahend: i64) -> TimeResult<i64> {
        self.year.difference_i64(minuend, subtrahend)
    }

    fn set(&self, instant: i64, value: i32) -> TimeResult<i64> {
        verify_bounds(self, value, 1, self.maximum_value())?;
        if self.year.get(instant)? <= 0 {
            self.year.set(instant, 1 - value)
        } else {
            self.year.set(instant, value)
        }
    }

    fn duration_field(&self) -> Arc<dyn DurationField> {
        self.year.duration_field()
    }

    fn range_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        Some(self.eras.clone())
    }

    fn minimum_value(&self) -> i32 {
        1
    }

    fn maximum_value(&self) -> i32 {
        self.year.maximum_value()
    }

    fn round_floor(&self, instant: i64) -> TimeResult<i64> {
        self.year.round_floor(instant)
    }

    fn round_ceiling(&self, instant: i64) -> TimeResult<i64> {
        self.year.round_ceiling(instant)
    }
}

/// ISO year of era: the magnitude of the proleptic year, zero included.
#[derive(Debug)]
pub struct IsoYearOfEraField {
    year: Arc<dyn DateTimeField>,
    eras: Arc<dyn DurationField>,
}

impl IsoYearOfEraField {
    pub fn new(year: Arc<dyn DateTimeField>, eras: Arc<dyn DurationField>) -> Arc<dyn DateTimeField> {
        Arc::new(IsoYearOfEraField { year, eras })
    }
}

impl DateTimeField for IsoYearOfEraField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::YEAR_OF_ERA
    }

    fn get(&self, instant: i64) -> TimeResult<i32> {
        Ok(self.year.get(instant)?.abs())
    }

    fn add(&self, instant: i64, value: i32) -> TimeResult<i64> {
        self.year.add(instant, value)
    }

    fn add_i64(&self, instant: i64, value: i64) -> TimeResult<i64> {
        self.year.add_i64(instant, value)
    }

    fn difference_i64(&self, minuend: i64, subtrahend: i64) -> TimeResult<i64> {
        self.year.difference_i64(minuend, subtrahend)
    }

    fn set(&self, instant: i64, value: i32) -> TimeResult<i64> {
        verify_bounds(self, value, 0, self.maximum_value())?;
        if self.year.get(instant)? < 0 {
            self.year.set(instant, safe_negate(value)?)
        } else {
            self.year.set(instant, value)
        }
    }

    fn duration_field(&self) -> Arc<dyn DurationField> {
        self.year.duration_field()
    }

    fn range_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        Some(self.eras.clone())
    }

    fn minimum_value(&self) -> i32 {
        0
    }

    fn maximum_value(&self) -> i32 {
        self.year.maximum_value()
    }

    fn round_floor(&self, instant: i64) -> TimeResult<i64> {
        self.year.round_floor(instant)
    }

    fn round_ceiling(&self, instant: i64) -> TimeResult<i64> {
        self.year.round_ceiling(instant)
    }
}
