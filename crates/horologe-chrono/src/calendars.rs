//! Assembly of the ISO, Gregorian, Julian, Coptic and Buddhist chronologies

use std::sync::Arc;

use horologe_core::checked::verify_value_bounds;
use horologe_core::constants::{
    MILLIS_PER_DAY, MILLIS_PER_HALFDAY, MILLIS_PER_HOUR, MILLIS_PER_MINUTE, MILLIS_PER_SECOND, MILLIS_PER_WEEK,
};
use horologe_core::{
    DateTimeFieldType, DurationFieldType, IllegalFieldValue, StandardDuration as D, StandardField as F, TimeResult,
};

use crate::basic::{
    CalendarDurationField, CalendarUnit, DayField, DayKind, EraField, IsoYearOfEraField, MonthOfYearField,
    SingleEraField, WeekyearField, YearField, YearOfEraField,
};
use crate::calendar::{Calendar, CalendarRules};
use crate::chronology::{Chronology, ChronologyImpl, ChronologyKey, FieldTable, FieldTableBuilder};
use crate::config::{CutoverConfig, WeekConfig};
use crate::decorators::{
    DelegatedField, DividedField, OffsetField, RemainderField, SkipField, SkipUndoField, ZeroIsMaxField,
};
use crate::duration::{DurationField, PreciseDurationField, UnsupportedDurationField};
use crate::field::DateTimeField;
use crate::locale::TextKind;
use crate::precise::PreciseField;

/// Offset from the Gregorian year to the Buddhist Era year.
pub const BUDDHIST_OFFSET: i32 = 543;

/// A calendar driven directly by [`Calendar`] arithmetic.
#[derive(Debug)]
pub(crate) struct BasicChronology {
    key: ChronologyKey,
    cal: Arc<Calendar>,
    fields: FieldTable,
}

impl BasicChronology {
    fn external_to_internal_year(&self, year: i32) -> TimeResult<i32> {
        if self.cal.rules() != CalendarRules::Gregorian && year == 0 {
            return Err(IllegalFieldValue::new("year", 0, None, None).into());
        }
        Ok(self.cal.internal_year(year))
    }
}

impl ChronologyImpl for BasicChronology {
    fn key(&self) -> &ChronologyKey {
        &self.key
    }

    fn fields(&self) -> &FieldTable {
        &self.fields
    }

    fn date_time_millis(&self, year: i32, month: i32, day: i32, millis_of_day: i32) -> TimeResult<i64> {
        let year = self.external_to_internal_year(year)?;
        self.cal.date_time_millis(year, month, day, millis_of_day)
    }

    fn date_time_millis_hms(
        &self,
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        millis: i32,
    ) -> TimeResult<i64> {
        verify_value_bounds("hourOfDay", hour as i64, 0, 23)?;
        verify_value_bounds("minuteOfHour", minute as i64, 0, 59)?;
        verify_value_bounds("secondOfMinute", second as i64, 0, 59)?;
        verify_value_bounds("millisOfSecond", millis as i64, 0, 999)?;
        let millis_of_day = hour as i64 * MILLIS_PER_HOUR
            + minute as i64 * MILLIS_PER_MINUTE
            + second as i64 * MILLIS_PER_SECOND
            + millis as i64;
        self.date_time_millis(year, month, day, millis_of_day as i32)
    }
}

/// A chronology made purely of fields, with no arithmetic of its own.
#[derive(Debug)]
pub(crate) struct AssembledChronology {
    key: ChronologyKey,
    fields: FieldTable,
}

impl ChronologyImpl for AssembledChronology {
    fn key(&self) -> &ChronologyKey {
        &self.key
    }

    fn fields(&self) -> &FieldTable {
        &self.fields
    }
}

/// Handles on the calendar fields other assemblies decorate further.
struct BasicFields {
    year: Arc<dyn DateTimeField>,
    weekyear: Arc<dyn DateTimeField>,
    eras: Arc<dyn DurationField>,
}

/// Every field of a calendar driven by `cal`, with one-based centuries.
fn basic_table(cal: &Arc<Calendar>, month_text: TextKind) -> (FieldTableBuilder, BasicFields) {
    let mut b = FieldTableBuilder::default();

    let millis = PreciseDurationField::new(DurationFieldType::MILLIS, 1);
    let seconds = PreciseDurationField::new(DurationFieldType::SECONDS, MILLIS_PER_SECOND);
    let minutes = PreciseDurationField::new(DurationFieldType::MINUTES, MILLIS_PER_MINUTE);
    let hours = PreciseDurationField::new(DurationFieldType::HOURS, MILLIS_PER_HOUR);
    let halfdays = PreciseDurationField::new(DurationFieldType::HALFDAYS, MILLIS_PER_HALFDAY);
    let days = PreciseDurationField::new(DurationFieldType::DAYS, MILLIS_PER_DAY);
    let weeks = PreciseDurationField::new(DurationFieldType::WEEKS, MILLIS_PER_WEEK);
    let eras = UnsupportedDurationField::new(DurationFieldType::ERAS);

    b.set_field(
        F::MillisOfSecond,
        PreciseField::new(DateTimeFieldType::MILLIS_OF_SECOND, millis.clone(), seconds.clone()),
    )
    .set_field(
        F::MillisOfDay,
        PreciseField::new(DateTimeFieldType::MILLIS_OF_DAY, millis.clone(), days.clone()),
    )
    .set_field(
        F::SecondOfMinute,
        PreciseField::new(DateTimeFieldType::SECOND_OF_MINUTE, seconds.clone(), minutes.clone()),
    )
    .set_field(
        F::SecondOfDay,
        PreciseField::new(DateTimeFieldType::SECOND_OF_DAY, seconds.clone(), days.clone()),
    )
    .set_field(
        F::MinuteOfHour,
        PreciseField::new(DateTimeFieldType::MINUTE_OF_HOUR, minutes.clone(), hours.clone()),
    )
    .set_field(
        F::MinuteOfDay,
        PreciseField::new(DateTimeFieldType::MINUTE_OF_DAY, minutes.clone(), days.clone()),
    );

    let hour_of_day = PreciseField::new(DateTimeFieldType::HOUR_OF_DAY, hours.clone(), days.clone());
    let hour_of_halfday = PreciseField::new(DateTimeFieldType::HOUR_OF_HALFDAY, hours.clone(), halfdays.clone());
    b.set_field(
        F::ClockhourOfDay,
        ZeroIsMaxField::new(hour_of_day.clone(), DateTimeFieldType::CLOCKHOUR_OF_DAY),
    )
    .set_field(
        F::ClockhourOfHalfday,
        ZeroIsMaxField::new(hour_of_halfday.clone(), DateTimeFieldType::CLOCKHOUR_OF_HALFDAY),
    )
    .set_field(F::HourOfDay, hour_of_day)
    .set_field(F::HourOfHalfday, hour_of_halfday)
    .set_field(
        F::HalfdayOfDay,
        PreciseField::with_text(DateTimeFieldType::HALFDAY_OF_DAY, halfdays.clone(), days.clone(), TextKind::Halfday),
    );

    let years = CalendarDurationField::new(cal.clone(), CalendarUnit::Years);
    let months = CalendarDurationField::new(cal.clone(), CalendarUnit::Months);
    let weekyears = CalendarDurationField::new(cal.clone(), CalendarUnit::Weekyears);

    let year = YearField::new(cal.clone(), years.clone(), days.clone());
    let year_of_era = YearOfEraField::new(year.clone(), eras.clone());
    let shifted = OffsetField::new(year_of_era.clone(), DateTimeFieldType::YEAR_OF_ERA, 99);
    let century_of_era = DividedField::new(shifted.clone(), None, DateTimeFieldType::CENTURY_OF_ERA, 100);
    let centuries = century_of_era.duration_field();
    let year_of_century = OffsetField::new(
        RemainderField::new(shifted, centuries.clone(), DateTimeFieldType::YEAR_OF_CENTURY, 100),
        DateTimeFieldType::YEAR_OF_CENTURY,
        1,
    );

    let weekyear = WeekyearField::new(cal.clone(), weekyears.clone(), weeks.clone());
    let weekyear_of_century = OffsetField::new(
        RemainderField::new(weekyear.clone(), centuries.clone(), DateTimeFieldType::WEEKYEAR_OF_CENTURY, 100),
        DateTimeFieldType::WEEKYEAR_OF_CENTURY,
        1,
    );

    b.set_field(F::Era, EraField::new(cal.clone(), eras.clone()))
        .set_field(F::Year, year.clone())
        .set_field(F::YearOfEra, year_of_era)
        .set_field(F::CenturyOfEra, century_of_era)
        .set_field(F::YearOfCentury, year_of_century)
        .set_field(F::Weekyear, weekyear.clone())
        .set_field(F::WeekyearOfCentury, weekyear_of_century)
        .set_field(
            F::MonthOfYear,
            MonthOfYearField::new(cal.clone(), months.clone(), years.clone(), days.clone(), month_text),
        )
        .set_field(
            F::DayOfMonth,
            DayField::new(cal.clone(), DayKind::DayOfMonth, days.clone(), months.clone()),
        )
        .set_field(
            F::DayOfYear,
            DayField::new(cal.clone(), DayKind::DayOfYear, days.clone(), years.clone()),
        )
        .set_field(
            F::DayOfWeek,
            DayField::new(cal.clone(), DayKind::DayOfWeek, days.clone(), weeks.clone()),
        )
        .set_field(
            F::WeekOfWeekyear,
            DayField::new(cal.clone(), DayKind::WeekOfWeekyear, weeks.clone(), weekyears.clone()),
        );

    b.set_duration(D::Eras, eras.clone())
        .set_duration(D::Centuries, centuries)
        .set_duration(D::Weekyears, weekyears)
        .set_duration(D::Years, years)
        .set_duration(D::Months, months)
        .set_duration(D::Weeks, weeks)
        .set_duration(D::Days, days)
        .set_duration(D::Halfdays, halfdays)
        .set_duration(D::Hours, hours)
        .set_duration(D::Minutes, minutes)
        .set_duration(D::Seconds, seconds)
        .set_duration(D::Millis, millis);

    (b, BasicFields { year, weekyear, eras })
}

fn finish_basic(key: ChronologyKey, cal: Arc<Calendar>, builder: FieldTableBuilder) -> Chronology {
    Chronology::from_impl(BasicChronology { key, cal, fields: builder.finish() })
}

/// Gregorian rules with zero-based centuries and years of century.
pub(crate) fn iso(key: ChronologyKey) -> Chronology {
    let cal = Arc::new(Calendar::new(CalendarRules::Gregorian, 4));
    let (mut b, basic) = basic_table(&cal, TextKind::Month);
    let magnitude = IsoYearOfEraField::new(basic.year.clone(), basic.eras.clone());
    let century_of_era = DividedField::new(magnitude.clone(), None, DateTimeFieldType::CENTURY_OF_ERA, 100);
    let centuries = century_of_era.duration_field();
    b.set_field(
        F::YearOfCentury,
        RemainderField::new(magnitude, centuries.clone(), DateTimeFieldType::YEAR_OF_CENTURY, 100),
    )
    .set_field(
        F::WeekyearOfCentury,
        RemainderField::new(basic.weekyear, centuries.clone(), DateTimeFieldType::WEEKYEAR_OF_CENTURY, 100),
    )
    .set_field(F::CenturyOfEra, century_of_era)
    .set_duration(D::Centuries, centuries);
    finish_basic(key, cal, b)
}

pub(crate) fn gregorian(key: ChronologyKey, week: WeekConfig) -> Chronology {
    let cal = Arc::new(Calendar::new(CalendarRules::Gregorian, week.min_days_in_first_week as i32));
    let (b, _) = basic_table(&cal, TextKind::Month);
    finish_basic(key, cal, b)
}

pub(crate) fn julian(key: ChronologyKey, week: WeekConfig) -> Chronology {
    let cal = Arc::new(Calendar::new(CalendarRules::Julian, week.min_days_in_first_week as i32));
    let (mut b, basic) = basic_table(&cal, TextKind::Month);
    b.set_field(F::Year, SkipField::new(basic.year, 0))
        .set_field(F::Weekyear, SkipField::new(basic.weekyear, 0));
    finish_basic(key, cal, b)
}

pub(crate) fn coptic(key: ChronologyKey, week: WeekConfig) -> Chronology {
    let cal = Arc::new(Calendar::new(CalendarRules::Coptic, week.min_days_in_first_week as i32));
    let (mut b, basic) = basic_table(&cal, TextKind::Numeric);
    b.set_field(F::Year, SkipField::new(basic.year, 0))
        .set_field(F::Weekyear, SkipField::new(basic.weekyear, 0))
        .set_field(F::Era, SingleEraField::new("AM", basic.eras));
    finish_basic(key, cal, b)
}

/// The default cutover calendar with years counted from 543 BC.
pub(crate) fn buddhist(key: ChronologyKey) -> Chronology {
    let gj = Chronology::gj_validated(CutoverConfig::default());
    let mut b = FieldTableBuilder::from_table(gj.fields());
    let eras = UnsupportedDurationField::new(DurationFieldType::ERAS);

    let year = OffsetField::new(SkipUndoField::new(gj.year(), 0), DateTimeFieldType::YEAR, BUDDHIST_OFFSET);
    let year_of_era = DelegatedField::new(year.clone(), Some(eras.clone()), DateTimeFieldType::YEAR_OF_ERA);
    let weekyear =
        OffsetField::new(SkipUndoField::new(gj.weekyear(), 0), DateTimeFieldType::WEEKYEAR, BUDDHIST_OFFSET);

    let shifted = OffsetField::new(year_of_era.clone(), DateTimeFieldType::YEAR_OF_ERA, 99);
    let century_of_era = DividedField::new(shifted.clone(), Some(eras.clone()), DateTimeFieldType::CENTURY_OF_ERA, 100);
    let centuries = century_of_era.duration_field();
    let year_of_century = OffsetField::new(
        RemainderField::new(shifted, centuries.clone(), DateTimeFieldType::YEAR_OF_CENTURY, 100),
        DateTimeFieldType::YEAR_OF_CENTURY,
        1,
    );
    let weekyear_of_century = OffsetField::new(
        RemainderField::new(weekyear.clone(), centuries.clone(), DateTimeFieldType::WEEKYEAR_OF_CENTURY, 100),
        DateTimeFieldType::WEEKYEAR_OF_CENTURY,
        1,
    );

    b.set_field(F::Year, year)
        .set_field(F::YearOfEra, year_of_era)
        .set_field(F::Weekyear, weekyear)
        .set_field(F::CenturyOfEra, century_of_era)
        .set_field(F::YearOfCentury, year_of_century)
        .set_field(F::WeekyearOfCentury, weekyear_of_century)
        .set_field(F::Era, SingleEraField::new("BE", eras.clone()))
        .set_duration(D::Eras, eras)
        .set_duration(D::Centuries, centuries);
    Chronology::from_impl(AssembledChronology { key, fields: b.finish() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::EnglishText;

    fn iso() -> Chronology {
        Chronology::iso()
    }

    #[test]
    fn test_iso_date_time_millis() {
        let chrono = iso();
        assert_eq!(chrono.date_time_millis(1970, 1, 1, 0).unwrap(), 0);
        let t = chrono.date_time_millis_hms(2004, 6, 9, 12, 30, 15, 250).unwrap();
        assert_eq!(chrono.year().get(t).unwrap(), 2004);
        assert_eq!(chrono.month_of_year().get(t).unwrap(), 6);
        assert_eq!(chrono.day_of_month().get(t).unwrap(), 9);
        assert_eq!(chrono.hour_of_day().get(t).unwrap(), 12);
        assert_eq!(chrono.millis_of_second().get(t).unwrap(), 250);
        let err = chrono.date_time_millis_hms(2004, 6, 9, 24, 0, 0, 0).unwrap_err();
        assert!(err.is_illegal_field_value());
        assert!(err.to_string().contains("hourOfDay"));
        assert!(chrono.date_time_millis(2003, 2, 29, 0).unwrap_err().is_illegal_field_value());
    }

    #[test]
    fn test_iso_centuries_are_zero_based() {
        let chrono = iso();
        let t2000 = chrono.date_time_millis(2000, 3, 1, 0).unwrap();
        let t2004 = chrono.date_time_millis(2004, 3, 1, 0).unwrap();
        assert_eq!(chrono.century_of_era().get(t2000).unwrap(), 20);
        assert_eq!(chrono.year_of_century().get(t2000).unwrap(), 0);
        assert_eq!(chrono.year_of_century().get(t2004).unwrap(), 4);
        assert_eq!(chrono.year_of_century().maximum_value(), 99);
    }

    #[test]
    fn test_gregorian_centuries_are_one_based() {
        let chrono = Chronology::gregorian(WeekConfig::default()).unwrap();
        let t2000 = chrono.date_time_millis(2000, 3, 1, 0).unwrap();
        let t2004 = chrono.date_time_millis(2004, 3, 1, 0).unwrap();
        assert_eq!(chrono.century_of_era().get(t2000).unwrap(), 20);
        assert_eq!(chrono.year_of_century().get(t2000).unwrap(), 100);
        assert_eq!(chrono.century_of_era().get(t2004).unwrap(), 21);
        assert_eq!(chrono.year_of_century().get(t2004).unwrap(), 4);
        let moved = chrono.century_of_era().set(t2004, 19).unwrap();
        assert_eq!(chrono.year().get(moved).unwrap(), 1804);
    }

    #[test]
    fn test_era_and_year_of_era() {
        let chrono = iso();
        let t = chrono.date_time_millis(-2003, 1, 1, 0).unwrap();
        assert_eq!(chrono.era().get(t).unwrap(), 0);
        assert_eq!(chrono.year_of_era().get(t).unwrap(), 2004);
        assert_eq!(chrono.era().as_text(t, &EnglishText).unwrap(), "BC");
        let flipped = chrono.era().set(t, 1).unwrap();
        assert_eq!(chrono.year().get(flipped).unwrap(), 2004);
        // century fields work on the magnitude and keep the sign of the year
        assert_eq!(chrono.century_of_era().get(t).unwrap(), 20);
        assert_eq!(chrono.year_of_century().get(t).unwrap(), 3);
        let moved = chrono.year_of_century().set(t, 50).unwrap();
        assert_eq!(chrono.year().get(moved).unwrap(), -2050);
    }

    #[test]
    fn test_clock_hours() {
        let chrono = iso();
        let midnight = chrono.date_time_millis(2004, 6, 9, 0).unwrap();
        assert_eq!(chrono.clockhour_of_day().get(midnight).unwrap(), 24);
        assert_eq!(chrono.clockhour_of_halfday().get(midnight).unwrap(), 12);
        let one = chrono.clockhour_of_day().set(midnight, 1).unwrap();
        assert_eq!(chrono.hour_of_day().get(one).unwrap(), 1);
    }

    #[test]
    fn test_julian_has_no_year_zero() {
        let chrono = Chronology::julian(WeekConfig::default()).unwrap();
        let err = chrono.date_time_millis(0, 1, 1, 0).unwrap_err();
        assert!(err.is_illegal_field_value());
        let t = chrono.date_time_millis(-1, 1, 1, 0).unwrap();
        assert_eq!(chrono.year().get(t).unwrap(), -1);
        assert_eq!(chrono.year_of_era().get(t).unwrap(), 1);
        assert_eq!(chrono.era().get(t).unwrap(), 0);
        let next = chrono.year().add(t, 1).unwrap();
        assert_eq!(chrono.year().get(next).unwrap(), 1);
        assert!(chrono.year().set(t, 0).unwrap_err().is_illegal_field_value());
    }

    #[test]
    fn test_julian_leap_years() {
        let chrono = Chronology::julian(WeekConfig::default()).unwrap();
        assert!(chrono.date_time_millis(1900, 2, 29, 0).is_ok());
        let gregorian = Chronology::gregorian(WeekConfig::default()).unwrap();
        assert!(gregorian.date_time_millis(1900, 2, 29, 0).is_err());
    }

    #[test]
    fn test_coptic_calendar() {
        let chrono = Chronology::coptic(WeekConfig::default()).unwrap();
        assert_eq!(chrono.month_of_year().maximum_value(), 13);
        let t = chrono.date_time_millis(1720, 13, 5, 0).unwrap();
        assert_eq!(chrono.day_of_month().maximum_value_at(t).unwrap(), 5);
        assert_eq!(chrono.era().get(t).unwrap(), 1);
        assert_eq!(chrono.era().as_text(t, &EnglishText).unwrap(), "AM");
        assert!(chrono.date_time_millis(0, 1, 1, 0).is_err());
        // 1 Thout 1686 is 1969-09-11 in the Gregorian calendar
        let thout = chrono.date_time_millis(1686, 1, 1, 0).unwrap();
        assert_eq!(thout, -112 * MILLIS_PER_DAY);
    }

    #[test]
    fn test_buddhist_year_offset() {
        let chrono = Chronology::buddhist();
        let iso = Chronology::iso();
        let t = iso.date_time_millis(2004, 6, 9, 0).unwrap();
        assert_eq!(chrono.year().get(t).unwrap(), 2547);
        assert_eq!(chrono.year_of_era().get(t).unwrap(), 2547);
        assert_eq!(chrono.era().get(t).unwrap(), 1);
        assert_eq!(chrono.era().as_text(t, &EnglishText).unwrap(), "BE");
        assert_eq!(chrono.month_of_year().get(t).unwrap(), 6);
        assert_eq!(chrono.date_time_millis(2547, 6, 9, 0).unwrap(), t);
        assert_eq!(chrono.century_of_era().get(t).unwrap(), 26);
        assert_eq!(chrono.year_of_century().get(t).unwrap(), 47);
        assert!(!chrono.eras().is_supported());
    }
}
