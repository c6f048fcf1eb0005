//! The Gregorian/Julian hybrid
//!
//! Instants before the cutover read as Julian dates and instants from the
//! cutover on read as Gregorian dates. Each field delegates to one side or
//! the other by instant. Writes and additions that cross the cutover are
//! moved across the gap by converting the date (or the week date) from one
//! calendar to the other, so that values stay continuous: 1582-10-04 is
//! followed by 1582-10-15, and dates in between do not exist.

use std::sync::Arc;

use horologe_core::checked::safe_to_int;
use horologe_core::{
    DateTimeFieldType, DurationFieldType, IllegalFieldValue, StandardDuration as D, StandardField as F, TimeError,
    TimeResult,
};

use crate::calendar::{Calendar, CalendarRules};
use crate::chronology::{Chronology, ChronologyImpl, ChronologyKey, FieldTable, FieldTableBuilder};
use crate::config::CutoverConfig;
use crate::duration::DurationField;
use crate::field::{carry_partial, DateTimeField};
use crate::locale::LocaleText;
use crate::partial::{is_contiguous, ReadablePartial};

/// Reject cutovers before 0001-01-01 (Gregorian).
pub(crate) fn validate_cutover(cutover: i64) -> TimeResult<()> {
    if Calendar::new(CalendarRules::Gregorian, 4).year(cutover) <= 0 {
        return Err(TimeError::illegal_argument("Cutover too early. Must be on or after 0001-01-01."));
    }
    Ok(())
}

/// The two calendars and the cutover instant shared by every field.
#[derive(Debug)]
struct Sides {
    julian: Chronology,
    gregorian: Chronology,
    cutover: i64,
    /// Length of the skipped date range, in millis.
    gap: i64,
}

impl Sides {
    fn convert_by_year(instant: i64, from: &Chronology, to: &Chronology) -> TimeResult<i64> {
        to.date_time_millis(
            from.year().get(instant)?,
            from.month_of_year().get(instant)?,
            from.day_of_month().get(instant)?,
            from.millis_of_day().get(instant)?,
        )
    }

    fn convert_by_weekyear(instant: i64, from: &Chronology, to: &Chronology) -> TimeResult<i64> {
        let moved = to.weekyear().set(0, from.weekyear().get(instant)?)?;
        let moved = to.week_of_weekyear().set(moved, from.week_of_weekyear().get(instant)?)?;
        let moved = to.day_of_week().set(moved, from.day_of_week().get(instant)?)?;
        to.millis_of_day().set(moved, from.millis_of_day().get(instant)?)
    }

    fn julian_to_gregorian(&self, instant: i64, by_weekyear: bool) -> TimeResult<i64> {
        if by_weekyear {
            Self::convert_by_weekyear(instant, &self.julian, &self.gregorian)
        } else {
            Self::convert_by_year(instant, &self.julian, &self.gregorian)
        }
    }

    fn gregorian_to_julian(&self, instant: i64, by_weekyear: bool) -> TimeResult<i64> {
        if by_weekyear {
            Self::convert_by_weekyear(instant, &self.gregorian, &self.julian)
        } else {
            Self::convert_by_year(instant, &self.gregorian, &self.julian)
        }
    }
}

#[derive(Debug)]
pub(crate) struct CutoverChronology {
    key: ChronologyKey,
    sides: Arc<Sides>,
    fields: FieldTable,
}

impl ChronologyImpl for CutoverChronology {
    fn key(&self) -> &ChronologyKey {
        &self.key
    }

    fn fields(&self) -> &FieldTable {
        &self.fields
    }

    /// Tries the date as Gregorian first, then as Julian. A Julian-only leap
    /// day (Feb 29 of 1500) is retried before failing.
    fn date_time_millis(&self, year: i32, month: i32, day: i32, millis_of_day: i32) -> TimeResult<i64> {
        let sides = &self.sides;
        let instant = match sides.gregorian.date_time_millis(year, month, day, millis_of_day) {
            Ok(instant) => instant,
            Err(err) => {
                if month != 2 || day != 29 {
                    return Err(err);
                }
                let feb28 = sides.gregorian.date_time_millis(year, month, 28, millis_of_day)?;
                if feb28 >= sides.cutover {
                    return Err(err);
                }
                feb28
            }
        };
        if instant >= sides.cutover {
            return Ok(instant);
        }
        let julian = sides.julian.date_time_millis(year, month, day, millis_of_day)?;
        if julian >= sides.cutover {
            return Err(TimeError::illegal_argument("Specified date does not exist"));
        }
        Ok(julian)
    }
}

/// Assemble the hybrid from the Julian and Gregorian tables.
pub(crate) fn build(key: ChronologyKey, config: CutoverConfig) -> Chronology {
    let week = config.week;
    let julian = Chronology::julian_validated(week);
    let gregorian = Chronology::gregorian_validated(week);
    let cutover = config.cutover_millis;
    let gap = match Sides::convert_by_year(cutover, &julian, &gregorian) {
        Ok(converted) => cutover - converted,
        Err(_) => 0,
    };
    tracing::debug!(cutover, gap, "assembling cutover chronology");
    let sides = Arc::new(Sides { julian: julian.clone(), gregorian: gregorian.clone(), cutover, gap });

    let mut b = FieldTableBuilder::from_table(gregorian.fields());
    let precise = |f: F, at: i64, range: Option<Arc<dyn DurationField>>, by_weekyear: bool| {
        CutoverField::precise(
            sides.clone(),
            julian.fields().field(f).clone(),
            gregorian.fields().field(f).clone(),
            at,
            range,
            by_weekyear,
        )
    };

    // Time of day only differs when the cutover is not at midnight.
    if gregorian.millis_of_day().get(cutover).map_or(true, |ms| ms != 0) {
        for f in [
            F::MillisOfSecond,
            F::MillisOfDay,
            F::SecondOfMinute,
            F::SecondOfDay,
            F::MinuteOfHour,
            F::MinuteOfDay,
            F::HourOfDay,
            F::HourOfHalfday,
            F::ClockhourOfDay,
            F::ClockhourOfHalfday,
            F::HalfdayOfDay,
        ] {
            b.set_field(f, precise(f, cutover, None, false));
        }
    }

    b.set_field(F::Era, precise(F::Era, cutover, None, false));

    // The cutover year and weekyear are shorter; extend the switch to the
    // start of the next one so their numbering stays unbroken.
    let year_end = gregorian.year().round_ceiling(cutover).unwrap_or(cutover);
    b.set_field(F::DayOfYear, precise(F::DayOfYear, year_end, None, false));
    let weekyear_end = gregorian.weekyear().round_ceiling(cutover).unwrap_or(cutover);
    b.set_field(F::WeekOfWeekyear, precise(F::WeekOfWeekyear, weekyear_end, None, true));

    let imprecise = |f: F, duration: Option<Arc<dyn DurationField>>, range: Option<Arc<dyn DurationField>>, by_weekyear: bool| {
        CutoverField::imprecise(
            sides.clone(),
            julian.fields().field(f).clone(),
            gregorian.fields().field(f).clone(),
            duration,
            range,
            by_weekyear,
        )
    };

    let year = imprecise(F::Year, None, None, false);
    let years = year.duration_field();
    let year_of_era = imprecise(F::YearOfEra, Some(years.clone()), None, false);
    let century_of_era = imprecise(F::CenturyOfEra, None, None, false);
    let centuries = century_of_era.duration_field();
    let year_of_century = imprecise(F::YearOfCentury, Some(years.clone()), Some(centuries.clone()), false);
    let month_of_year = imprecise(F::MonthOfYear, None, Some(years.clone()), false);
    let months = month_of_year.duration_field();
    let weekyear = imprecise(F::Weekyear, None, None, true);
    let weekyears = weekyear.duration_field();
    let weekyear_of_century = imprecise(F::WeekyearOfCentury, Some(weekyears.clone()), Some(centuries.clone()), false);
    let day_of_month = precise(F::DayOfMonth, cutover, Some(months.clone()), false);

    b.set_field(F::Year, year)
        .set_field(F::YearOfEra, year_of_era)
        .set_field(F::CenturyOfEra, century_of_era)
        .set_field(F::YearOfCentury, year_of_century)
        .set_field(F::MonthOfYear, month_of_year)
        .set_field(F::Weekyear, weekyear)
        .set_field(F::WeekyearOfCentury, weekyear_of_century)
        .set_field(F::DayOfMonth, day_of_month)
        .set_duration(D::Years, years)
        .set_duration(D::Centuries, centuries)
        .set_duration(D::Months, months)
        .set_duration(D::Weekyears, weekyears);

    Chronology::from_impl(CutoverChronology { key, sides, fields: b.finish() })
}

/// One field's pair of calendar fields and the instant it switches at.
#[derive(Debug)]
struct Pair {
    sides: Arc<Sides>,
    julian: Arc<dyn DateTimeField>,
    gregorian: Arc<dyn DateTimeField>,
    cutover: i64,
    by_weekyear: bool,
}

impl Pair {
    fn to_gregorian(&self, instant: i64) -> TimeResult<i64> {
        self.sides.julian_to_gregorian(instant, self.by_weekyear)
    }

    fn to_julian(&self, instant: i64) -> TimeResult<i64> {
        self.sides.gregorian_to_julian(instant, self.by_weekyear)
    }

    /// Addition for units longer than the gap: the result is moved across
    /// the cutover when the addition crossed it entirely.
    fn add(&self, instant: i64, value: i64) -> TimeResult<i64> {
        if instant >= self.cutover {
            let mut result = self.gregorian.add_i64(instant, value)?;
            if result < self.cutover && result + self.sides.gap < self.cutover {
                // Julian has no year zero; step over it before converting.
                let gregorian = &self.sides.gregorian;
                let (field, amount) = if self.by_weekyear {
                    (gregorian.weekyear(), gregorian.weekyear().get(result)?)
                } else {
                    (gregorian.year(), gregorian.year().get(result)?)
                };
                if amount <= 0 {
                    result = field.add(result, -1)?;
                }
                result = self.to_julian(result)?;
            }
            Ok(result)
        } else {
            let result = self.julian.add_i64(instant, value)?;
            if result >= self.cutover && result - self.sides.gap >= self.cutover {
                return self.to_gregorian(result);
            }
            Ok(result)
        }
    }

    fn difference(&self, minuend: i64, subtrahend: i64) -> TimeResult<i64> {
        match (minuend >= self.cutover, subtrahend >= self.cutover) {
            (true, true) => self.gregorian.difference_i64(minuend, subtrahend),
            (true, false) => self.julian.difference_i64(self.to_julian(minuend)?, subtrahend),
            (false, false) => self.julian.difference_i64(minuend, subtrahend),
            (false, true) => self.gregorian.difference_i64(self.to_gregorian(minuend)?, subtrahend),
        }
    }
}

/// Unit of an imprecise cutover field, adding through the field itself.
#[derive(Debug)]
struct LinkedDurationField {
    pair: Arc<Pair>,
    wrapped: Arc<dyn DurationField>,
}

impl DurationField for LinkedDurationField {
    fn duration_type(&self) -> DurationFieldType {
        self.wrapped.duration_type()
    }

    fn is_precise(&self) -> bool {
        false
    }

    fn unit_millis(&self) -> i64 {
        self.wrapped.unit_millis()
    }

    fn add(&self, instant: i64, value: i64) -> TimeResult<i64> {
        self.pair.add(instant, value)
    }

    fn difference_i64(&self, minuend: i64, subtrahend: i64) -> TimeResult<i64> {
        self.pair.difference(minuend, subtrahend)
    }
}

/// A field that reads from the Julian field before its cutover and the
/// Gregorian field from it on.
#[derive(Debug)]
pub struct CutoverField {
    pair: Arc<Pair>,
    /// Units longer than the gap (months, years) add across it
    imprecise: bool,
    duration: Arc<dyn DurationField>,
    range: Option<Arc<dyn DurationField>>,
}

impl CutoverField {
    fn precise(
        sides: Arc<Sides>,
        julian: Arc<dyn DateTimeField>,
        gregorian: Arc<dyn DateTimeField>,
        cutover: i64,
        range: Option<Arc<dyn DurationField>>,
        by_weekyear: bool,
    ) -> Arc<dyn DateTimeField> {
        let duration = gregorian.duration_field();
        let range = range
            .or_else(|| gregorian.range_duration_field())
            .or_else(|| julian.range_duration_field());
        let pair = Arc::new(Pair { sides, julian, gregorian, cutover, by_weekyear });
        Arc::new(CutoverField { pair, imprecise: false, duration, range })
    }

    fn imprecise(
        sides: Arc<Sides>,
        julian: Arc<dyn DateTimeField>,
        gregorian: Arc<dyn DateTimeField>,
        duration: Option<Arc<dyn DurationField>>,
        range: Option<Arc<dyn DurationField>>,
        by_weekyear: bool,
    ) -> Arc<dyn DateTimeField> {
        let cutover = sides.cutover;
        let range = range
            .or_else(|| gregorian.range_duration_field())
            .or_else(|| julian.range_duration_field());
        let wrapped = gregorian.duration_field();
        let pair = Arc::new(Pair { sides, julian, gregorian, cutover, by_weekyear });
        let duration = duration.unwrap_or_else(|| Arc::new(LinkedDurationField { pair: pair.clone(), wrapped }));
        Arc::new(CutoverField { pair, imprecise: true, duration, range })
    }

    fn side(&self, instant: i64) -> &Arc<dyn DateTimeField> {
        if instant >= self.pair.cutover {
            &self.pair.gregorian
        } else {
            &self.pair.julian
        }
    }

    fn wrong_value(&self, value: i32) -> TimeError {
        IllegalFieldValue::new(self.name(), value as i64, None, None).into()
    }
}

impl DateTimeField for CutoverField {
    fn field_type(&self) -> DateTimeFieldType {
        self.pair.gregorian.field_type()
    }

    fn get(&self, instant: i64) -> TimeResult<i32> {
        self.side(instant).get(instant)
    }

    fn as_text(&self, instant: i64, locale: &dyn LocaleText) -> TimeResult<String> {
        self.side(instant).as_text(instant, locale)
    }

    fn as_short_text(&self, instant: i64, locale: &dyn LocaleText) -> TimeResult<String> {
        self.side(instant).as_short_text(instant, locale)
    }

    fn value_as_text(&self, value: i32, locale: &dyn LocaleText) -> String {
        self.pair.gregorian.value_as_text(value, locale)
    }

    fn value_as_short_text(&self, value: i32, locale: &dyn LocaleText) -> String {
        self.pair.gregorian.value_as_short_text(value, locale)
    }

    fn text_to_value(&self, text: &str, locale: &dyn LocaleText) -> TimeResult<i32> {
        self.pair.gregorian.text_to_value(text, locale)
    }

    fn maximum_text_length(&self, locale: &dyn LocaleText) -> usize {
        self.pair
            .julian
            .maximum_text_length(locale)
            .max(self.pair.gregorian.maximum_text_length(locale))
    }

    fn maximum_short_text_length(&self, locale: &dyn LocaleText) -> usize {
        self.pair
            .julian
            .maximum_short_text_length(locale)
            .max(self.pair.gregorian.maximum_short_text_length(locale))
    }

    fn add(&self, instant: i64, value: i32) -> TimeResult<i64> {
        self.add_i64(instant, value as i64)
    }

    fn add_i64(&self, instant: i64, value: i64) -> TimeResult<i64> {
        if self.imprecise {
            self.pair.add(instant, value)
        } else {
            self.pair.gregorian.add_i64(instant, value)
        }
    }

    fn difference(&self, minuend: i64, subtrahend: i64) -> TimeResult<i32> {
        safe_to_int(self.difference_i64(minuend, subtrahend)?)
    }

    fn difference_i64(&self, minuend: i64, subtrahend: i64) -> TimeResult<i64> {
        if self.imprecise {
            self.pair.difference(minuend, subtrahend)
        } else {
            self.pair.gregorian.difference_i64(minuend, subtrahend)
        }
    }

    /// Fails for values that fall in the skipped range.
    fn set(&self, instant: i64, value: i32) -> TimeResult<i64> {
        let pair = &self.pair;
        let gap = pair.sides.gap;
        if instant >= pair.cutover {
            let mut result = pair.gregorian.set(instant, value)?;
            if result < pair.cutover {
                if result + gap < pair.cutover {
                    result = pair.to_julian(result)?;
                }
                if self.get(result)? != value {
                    return Err(self.wrong_value(value));
                }
            }
            Ok(result)
        } else {
            let mut result = pair.julian.set(instant, value)?;
            if result >= pair.cutover {
                if result - gap >= pair.cutover {
                    result = pair.to_gregorian(result)?;
                }
                if self.get(result)? != value {
                    return Err(self.wrong_value(value));
                }
            }
            Ok(result)
        }
    }

    fn duration_field(&self) -> Arc<dyn DurationField> {
        self.duration.clone()
    }

    fn range_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        self.range.clone()
    }

    fn leap_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        self.pair.gregorian.leap_duration_field()
    }

    fn is_leap(&self, instant: i64) -> TimeResult<bool> {
        self.side(instant).is_leap(instant)
    }

    fn leap_amount(&self, instant: i64) -> TimeResult<i32> {
        self.side(instant).leap_amount(instant)
    }

    fn minimum_value(&self) -> i32 {
        self.pair.julian.minimum_value()
    }

    fn maximum_value(&self) -> i32 {
        self.pair.gregorian.maximum_value()
    }

    /// Near the cutover the range of a precise field shrinks; the bound is
    /// found by trying it.
    fn minimum_value_at(&self, instant: i64) -> TimeResult<i32> {
        let pair = &self.pair;
        if instant < pair.cutover {
            return pair.julian.minimum_value_at(instant);
        }
        let min = pair.gregorian.minimum_value_at(instant)?;
        if self.imprecise {
            return Ok(min);
        }
        if pair.gregorian.set(instant, min)? < pair.cutover {
            return pair.gregorian.get(pair.cutover);
        }
        Ok(min)
    }

    fn maximum_value_at(&self, instant: i64) -> TimeResult<i32> {
        let pair = &self.pair;
        if instant >= pair.cutover {
            return pair.gregorian.maximum_value_at(instant);
        }
        let max = pair.julian.maximum_value_at(instant)?;
        if self.imprecise {
            return Ok(max);
        }
        if pair.julian.set(instant, max)? >= pair.cutover {
            return pair.julian.get(pair.julian.add(pair.cutover, -1)?);
        }
        Ok(max)
    }

    fn minimum_value_for(&self, partial: &dyn ReadablePartial, values: &[i32]) -> i32 {
        self.pair.julian.minimum_value_for(partial, values)
    }

    /// Evaluated at an instant built from the partial's settable values.
    fn maximum_value_for(&self, partial: &dyn ReadablePartial, values: &[i32]) -> i32 {
        let chronology = partial.chronology();
        let mut instant = 0;
        for (i, &value) in values.iter().enumerate().take(partial.size()) {
            let field = chronology.field(&partial.field_type(i));
            let fits = field.maximum_value_at(instant).map_or(false, |max| value <= max);
            if fits {
                if let Ok(next) = field.set(instant, value) {
                    instant = next;
                }
            }
        }
        self.maximum_value_at(instant).unwrap_or_else(|_| self.maximum_value())
    }

    fn round_floor(&self, instant: i64) -> TimeResult<i64> {
        let pair = &self.pair;
        if instant >= pair.cutover {
            let floor = pair.gregorian.round_floor(instant)?;
            if floor < pair.cutover && floor + pair.sides.gap < pair.cutover {
                return pair.to_julian(floor);
            }
            Ok(floor)
        } else {
            pair.julian.round_floor(instant)
        }
    }

    fn round_ceiling(&self, instant: i64) -> TimeResult<i64> {
        let pair = &self.pair;
        if instant >= pair.cutover {
            pair.gregorian.round_ceiling(instant)
        } else {
            let ceiling = pair.julian.round_ceiling(instant)?;
            if ceiling >= pair.cutover && ceiling - pair.sides.gap >= pair.cutover {
                return pair.to_gregorian(ceiling);
            }
            Ok(ceiling)
        }
    }

    /// Contiguous partials add through an instant, since a partial such as
    /// 1500-02-29 is valid Julian but not Gregorian.
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
        if is_contiguous(partial) {
            let chronology = partial.chronology();
            let mut instant = 0;
            for (i, &value) in values.iter().enumerate() {
                instant = chronology.field(&partial.field_type(i)).set(instant, value)?;
            }
            let instant = self.add(instant, amount)?;
            return chronology.get_values(partial, instant);
        }
        carry_partial(self, partial, index, values, amount, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WeekConfig;
    use horologe_core::constants::MILLIS_PER_DAY;

    fn gj() -> Chronology {
        Chronology::gj(CutoverConfig::default()).unwrap()
    }

    const CUTOVER: i64 = -12_219_292_800_000;

    #[test]
    fn test_cutover_dates() {
        let chrono = gj();
        assert_eq!(chrono.date_time_millis(1582, 10, 15, 0).unwrap(), CUTOVER);
        assert_eq!(chrono.date_time_millis(1582, 10, 4, 0).unwrap(), CUTOVER - MILLIS_PER_DAY);
        let err = chrono.date_time_millis(1582, 10, 10, 0).unwrap_err();
        assert!(err.is_illegal_argument());
        assert_eq!(chrono.day_of_month().get(CUTOVER - 1).unwrap(), 4);
        assert_eq!(chrono.day_of_month().get(CUTOVER).unwrap(), 15);
    }

    #[test]
    fn test_set_day_in_gap_fails() {
        let chrono = gj();
        for day in 5..=14 {
            let err = chrono.day_of_month().set(CUTOVER, day).unwrap_err();
            assert!(err.is_illegal_field_value(), "day {}", day);
            let err = chrono.day_of_month().set(CUTOVER - 3 * MILLIS_PER_DAY, day).unwrap_err();
            assert!(err.is_illegal_field_value(), "day {}", day);
        }
        let fourth = chrono.day_of_month().set(CUTOVER, 4).unwrap();
        assert_eq!(fourth, CUTOVER - MILLIS_PER_DAY);
        let fifteenth = chrono.day_of_month().set(CUTOVER - 3 * MILLIS_PER_DAY, 15).unwrap();
        assert_eq!(fifteenth, CUTOVER);
    }

    #[test]
    fn test_julian_leap_day_before_cutover() {
        let chrono = gj();
        let t = chrono.date_time_millis(1500, 2, 29, 0).unwrap();
        assert_eq!(chrono.day_of_month().get(t).unwrap(), 29);
        assert_eq!(chrono.month_of_year().get(t).unwrap(), 2);
        assert!(chrono.date_time_millis(1700, 2, 29, 0).is_err());
    }

    #[test]
    fn test_days_add_across_cutover() {
        let chrono = gj();
        let next = chrono.days().add(CUTOVER - MILLIS_PER_DAY, 1).unwrap();
        assert_eq!(next, CUTOVER);
        assert_eq!(chrono.day_of_month().get(next).unwrap(), 15);
    }

    #[test]
    fn test_years_add_across_cutover() {
        let chrono = gj();
        let start = chrono.date_time_millis(1582, 6, 1, 0).unwrap();
        let later = chrono.years().add(start, 1).unwrap();
        assert_eq!(chrono.year().get(later).unwrap(), 1583);
        assert_eq!(chrono.month_of_year().get(later).unwrap(), 6);
        assert_eq!(chrono.day_of_month().get(later).unwrap(), 1);
        assert_eq!(chrono.years().difference_i64(later, start).unwrap(), 1);
        let back = chrono.years().add(later, -1).unwrap();
        assert_eq!(back, start);
    }

    #[test]
    fn test_max_day_in_cutover_month() {
        let chrono = gj();
        assert_eq!(chrono.day_of_month().maximum_value_at(CUTOVER - MILLIS_PER_DAY).unwrap(), 4);
        assert_eq!(chrono.day_of_month().minimum_value_at(CUTOVER).unwrap(), 15);
        assert_eq!(chrono.day_of_month().maximum_value_at(CUTOVER).unwrap(), 31);
    }

    #[test]
    fn test_cutover_too_early() {
        let err = Chronology::gj(CutoverConfig::at(-62_135_596_800_001)).unwrap_err();
        assert!(err.is_illegal_argument());
        assert!(Chronology::gj(CutoverConfig::at(-62_135_596_800_000)).is_ok());
    }

    #[test]
    fn test_british_cutover() {
        let chrono = Chronology::gj(CutoverConfig::british()).unwrap();
        let last_julian = chrono.date_time_millis(1752, 9, 2, 0).unwrap();
        let first_gregorian = chrono.date_time_millis(1752, 9, 14, 0).unwrap();
        assert_eq!(first_gregorian - last_julian, MILLIS_PER_DAY);
        assert!(chrono.date_time_millis(1752, 9, 3, 0).is_err());
        assert_eq!(chrono.to_string(), "GJChronology[UTC,cutover=1752-09-14T00:00:00.000]");
    }

    #[test]
    fn test_year_zero_skipped_by_add() {
        let chrono = gj();
        let t = chrono.date_time_millis(1, 3, 1, 0).unwrap();
        let back = chrono.years().add(t, -1).unwrap();
        assert_eq!(chrono.year().get(back).unwrap(), -1);
        let week = Chronology::gj(CutoverConfig { week: WeekConfig::us(), ..CutoverConfig::default() }).unwrap();
        assert_ne!(week, chrono);
    }
}
