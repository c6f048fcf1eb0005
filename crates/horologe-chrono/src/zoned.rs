//! A UTC chronology viewed through a time zone
//!
//! Fields read the local time of an instant. Writes convert back to UTC and
//! verify the written value survived the conversion; a value that lands in
//! a daylight-saving gap is rejected. Small units (under twelve hours) add
//! on the UTC time line, so adding an hour across a transition moves one
//! real hour; larger units add on the local time line.

use std::sync::Arc;

use horologe_core::checked::{safe_add, safe_subtract, safe_to_int};
use horologe_core::constants::MILLIS_PER_HOUR;
use horologe_core::{
    DateTimeFieldType, DurationFieldType, IllegalFieldValue, StandardDuration, StandardField, TimeError, TimeResult,
};
use horologe_zone::Zone;

use crate::chronology::{Chronology, ChronologyImpl, ChronologyKey, FieldTable, FieldTableBuilder};
use crate::duration::DurationField;
use crate::field::DateTimeField;
use crate::locale::LocaleText;
use crate::partial::ReadablePartial;

fn uses_time_arithmetic(duration: &dyn DurationField) -> bool {
    duration.unit_millis() < MILLIS_PER_HOUR * 12
}

fn offset_to_add(zone: &Zone, instant: i64) -> TimeResult<i64> {
    let offset = zone.offset(instant) as i64;
    instant
        .checked_add(offset)
        .map(|_| offset)
        .ok_or_else(|| TimeError::overflow("Adding time zone offset caused overflow"))
}

fn offset_from_local_to_subtract(zone: &Zone, local: i64) -> TimeResult<i64> {
    let offset = zone.offset_from_local(local) as i64;
    local
        .checked_sub(offset)
        .map(|_| offset)
        .ok_or_else(|| TimeError::overflow("Subtracting time zone offset caused overflow"))
}

#[derive(Debug)]
pub(crate) struct ZonedChronology {
    key: ChronologyKey,
    base: Chronology,
    zone: Zone,
    fields: FieldTable,
}

impl ZonedChronology {
    fn local_to_utc(&self, local: i64) -> TimeResult<i64> {
        if local == i64::MAX || local == i64::MIN {
            return Ok(local);
        }
        self.zone.convert_local_to_utc(local, true)
    }
}

impl ChronologyImpl for ZonedChronology {
    fn key(&self) -> &ChronologyKey {
        &self.key
    }

    fn fields(&self) -> &FieldTable {
        &self.fields
    }

    fn zone(&self) -> Zone {
        self.zone.clone()
    }

    fn base(&self) -> Option<&Chronology> {
        Some(&self.base)
    }

    fn date_time_millis(&self, year: i32, month: i32, day: i32, millis_of_day: i32) -> TimeResult<i64> {
        self.local_to_utc(self.base.date_time_millis(year, month, day, millis_of_day)?)
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
        self.local_to_utc(self.base.date_time_millis_hms(year, month, day, hour, minute, second, millis)?)
    }
}

/// Wrap every supported field and unit of the UTC `base` for `zone`.
pub(crate) fn build(key: ChronologyKey, base: Chronology, zone: Zone) -> Chronology {
    let mut builder = FieldTableBuilder::default();
    let table = base.fields();
    for &d in StandardDuration::all() {
        builder.set_duration(d, convert_duration(table.duration(d), &zone));
    }
    for &f in StandardField::all() {
        builder.set_field(f, convert_field(table.field(f), &zone));
    }
    tracing::debug!(base = %base, zone = zone.id(), "assembling zoned chronology");
    Chronology::from_impl(ZonedChronology { key, base, zone, fields: builder.finish() })
}

fn convert_duration(duration: &Arc<dyn DurationField>, zone: &Zone) -> Arc<dyn DurationField> {
    if !duration.is_supported() {
        return duration.clone();
    }
    Arc::new(ZonedDurationField {
        time_field: uses_time_arithmetic(duration.as_ref()),
        wrapped: duration.clone(),
        zone: zone.clone(),
    })
}

fn convert_field(field: &Arc<dyn DateTimeField>, zone: &Zone) -> Arc<dyn DateTimeField> {
    if !field.is_supported() {
        return field.clone();
    }
    let duration = convert_duration(&field.duration_field(), zone);
    let range = field.range_duration_field().map(|r| convert_duration(&r, zone));
    let leap = field.leap_duration_field().map(|l| convert_duration(&l, zone));
    Arc::new(ZonedField {
        time_field: uses_time_arithmetic(field.duration_field().as_ref()),
        wrapped: field.clone(),
        zone: zone.clone(),
        duration,
        range,
        leap,
    })
}

#[derive(Debug)]
pub struct ZonedDurationField {
    wrapped: Arc<dyn DurationField>,
    zone: Zone,
    time_field: bool,
}

impl DurationField for ZonedDurationField {
    fn duration_type(&self) -> DurationFieldType {
        self.wrapped.duration_type()
    }

    fn is_precise(&self) -> bool {
        if self.time_field {
            self.wrapped.is_precise()
        } else {
            self.wrapped.is_precise() && self.zone.is_fixed()
        }
    }

    fn unit_millis(&self) -> i64 {
        self.wrapped.unit_millis()
    }

    fn add(&self, instant: i64, value: i64) -> TimeResult<i64> {
        let offset = offset_to_add(&self.zone, instant)?;
        let local = self.wrapped.add(instant + offset, value)?;
        let back = if self.time_field {
            offset
        } else {
            offset_from_local_to_subtract(&self.zone, local)?
        };
        safe_subtract(local, back)
    }

    fn difference_i64(&self, minuend: i64, subtrahend: i64) -> TimeResult<i64> {
        let offset = offset_to_add(&self.zone, subtrahend)?;
        let minuend_offset = if self.time_field {
            offset
        } else {
            offset_to_add(&self.zone, minuend)?
        };
        self.wrapped
            .difference_i64(safe_add(minuend, minuend_offset)?, subtrahend + offset)
    }
}

#[derive(Debug)]
pub struct ZonedField {
    wrapped: Arc<dyn DateTimeField>,
    zone: Zone,
    duration: Arc<dyn DurationField>,
    range: Option<Arc<dyn DurationField>>,
    leap: Option<Arc<dyn DurationField>>,
    time_field: bool,
}

impl ZonedField {
    fn local(&self, instant: i64) -> i64 {
        self.zone.convert_utc_to_local_saturating(instant)
    }

    /// Apply `op` to the local time of `instant`: on the UTC line for time
    /// fields, otherwise converting back with `instant` as the offset hint.
    fn on_local(&self, instant: i64, op: impl FnOnce(i64) -> TimeResult<i64>) -> TimeResult<i64> {
        if self.time_field {
            let offset = offset_to_add(&self.zone, instant)?;
            safe_subtract(op(instant + offset)?, offset)
        } else {
            let local = self.zone.convert_utc_to_local(instant)?;
            let local = op(local)?;
            self.zone.convert_local_to_utc_hinted(local, false, instant)
        }
    }
}

impl DateTimeField for ZonedField {
    fn field_type(&self) -> DateTimeFieldType {
        self.wrapped.field_type()
    }

    fn is_lenient(&self) -> bool {
        self.wrapped.is_lenient()
    }

    fn get(&self, instant: i64) -> TimeResult<i32> {
        self.wrapped.get(self.local(instant))
    }

    fn as_text(&self, instant: i64, locale: &dyn LocaleText) -> TimeResult<String> {
        self.wrapped.as_text(self.local(instant), locale)
    }

    fn as_short_text(&self, instant: i64, locale: &dyn LocaleText) -> TimeResult<String> {
        self.wrapped.as_short_text(self.local(instant), locale)
    }

    fn value_as_text(&self, value: i32, locale: &dyn LocaleText) -> String {
        self.wrapped.value_as_text(value, locale)
    }

    fn value_as_short_text(&self, value: i32, locale: &dyn LocaleText) -> String {
        self.wrapped.value_as_short_text(value, locale)
    }

    fn add(&self, instant: i64, value: i32) -> TimeResult<i64> {
        self.on_local(instant, |local| self.wrapped.add(local, value))
    }

    fn add_i64(&self, instant: i64, value: i64) -> TimeResult<i64> {
        self.on_local(instant, |local| self.wrapped.add_i64(local, value))
    }

    fn add_wrap_field(&self, instant: i64, amount: i32) -> TimeResult<i64> {
        self.on_local(instant, |local| self.wrapped.add_wrap_field(local, amount))
    }

    fn difference(&self, minuend: i64, subtrahend: i64) -> TimeResult<i32> {
        safe_to_int(self.difference_i64(minuend, subtrahend)?)
    }

    fn difference_i64(&self, minuend: i64, subtrahend: i64) -> TimeResult<i64> {
        let offset = offset_to_add(&self.zone, subtrahend)?;
        let minuend_offset = if self.time_field {
            offset
        } else {
            offset_to_add(&self.zone, minuend)?
        };
        self.wrapped
            .difference_i64(safe_add(minuend, minuend_offset)?, subtrahend + offset)
    }

    /// Fails when the local result does not exist in the zone.
    fn set(&self, instant: i64, value: i32) -> TimeResult<i64> {
        let local = self.zone.convert_utc_to_local(instant)?;
        let local = self.wrapped.set(local, value)?;
        let result = self.zone.convert_local_to_utc_hinted(local, false, instant)?;
        if self.get(result)? != value {
            tracing::trace!(field = %self.field_type(), value, zone = self.zone.id(), "value fell in a gap");
            let explain = self.zone.gap_message(local);
            return Err(IllegalFieldValue::new(self.name(), value as i64, None, None)
                .with_explain(explain)
                .in_transition_gap()
                .into());
        }
        Ok(result)
    }

    fn set_text(&self, instant: i64, text: &str, locale: &dyn LocaleText) -> TimeResult<i64> {
        self.set(instant, self.wrapped.text_to_value(text, locale)?)
    }

    fn text_to_value(&self, text: &str, locale: &dyn LocaleText) -> TimeResult<i32> {
        self.wrapped.text_to_value(text, locale)
    }

    fn maximum_text_length(&self, locale: &dyn LocaleText) -> usize {
        self.wrapped.maximum_text_length(locale)
    }

    fn maximum_short_text_length(&self, locale: &dyn LocaleText) -> usize {
        self.wrapped.maximum_short_text_length(locale)
    }

    fn duration_field(&self) -> Arc<dyn DurationField> {
        self.duration.clone()
    }

    fn range_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        self.range.clone()
    }

    fn leap_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        self.leap.clone()
    }

    fn is_leap(&self, instant: i64) -> TimeResult<bool> {
        self.wrapped.is_leap(self.local(instant))
    }

    fn leap_amount(&self, instant: i64) -> TimeResult<i32> {
        self.wrapped.leap_amount(self.local(instant))
    }

    fn minimum_value(&self) -> i32 {
        self.wrapped.minimum_value()
    }

    fn maximum_value(&self) -> i32 {
        self.wrapped.maximum_value()
    }

    fn minimum_value_at(&self, instant: i64) -> TimeResult<i32> {
        self.wrapped.minimum_value_at(self.local(instant))
    }

    fn maximum_value_at(&self, instant: i64) -> TimeResult<i32> {
        self.wrapped.maximum_value_at(self.local(instant))
    }

    fn minimum_value_for(&self, partial: &dyn ReadablePartial, values: &[i32]) -> i32 {
        self.wrapped.minimum_value_for(partial, values)
    }

    fn maximum_value_for(&self, partial: &dyn ReadablePartial, values: &[i32]) -> i32 {
        self.wrapped.maximum_value_for(partial, values)
    }

    fn skipped_value(&self) -> Option<i32> {
        self.wrapped.skipped_value()
    }

    fn round_floor(&self, instant: i64) -> TimeResult<i64> {
        self.on_local(instant, |local| self.wrapped.round_floor(local))
    }

    fn round_ceiling(&self, instant: i64) -> TimeResult<i64> {
        self.on_local(instant, |local| self.wrapped.round_ceiling(local))
    }

    fn remainder(&self, instant: i64) -> TimeResult<i64> {
        self.wrapped.remainder(self.local(instant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horologe_core::constants::MILLIS_PER_DAY;
    use horologe_zone::PrecalculatedZone;

    use crate::locale::EnglishText;

    const SPRING_2011: i64 = 1_301_187_600_000;
    const AUTUMN_2011: i64 = 1_319_936_400_000;

    fn paris() -> Zone {
        Zone::new(
            PrecalculatedZone::alternating(
                "Europe/Paris",
                MILLIS_PER_HOUR as i32,
                MILLIS_PER_HOUR as i32,
                &[SPRING_2011, AUTUMN_2011],
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_fields_read_local_time() {
        let chrono = Chronology::iso().with_zone(&paris());
        assert_eq!(chrono.hour_of_day().get(SPRING_2011 - 1).unwrap(), 1);
        assert_eq!(chrono.hour_of_day().get(SPRING_2011).unwrap(), 3);
        assert_eq!(chrono.hour_of_day().get(AUTUMN_2011 - 1).unwrap(), 2);
        assert_eq!(chrono.hour_of_day().get(AUTUMN_2011).unwrap(), 2);
    }

    #[test]
    fn test_set_into_gap_fails() {
        let chrono = Chronology::iso().with_zone(&paris());
        let err = chrono.hour_of_day().set(SPRING_2011 - MILLIS_PER_HOUR / 2, 2).unwrap_err();
        assert!(err.is_illegal_field_value());
        assert!(err.is_illegal_instant());
        assert!(err.to_string().contains("Europe/Paris"));
    }

    #[test]
    fn test_hours_add_on_utc_line() {
        let chrono = Chronology::iso().with_zone(&paris());
        let before = SPRING_2011 - MILLIS_PER_HOUR;
        assert_eq!(chrono.hours().add(before, 1).unwrap(), SPRING_2011);
        assert_eq!(chrono.hour_of_day().add(before, 1).unwrap(), SPRING_2011);
    }

    #[test]
    fn test_days_add_on_local_line() {
        let chrono = Chronology::iso().with_zone(&paris());
        let noon = SPRING_2011 - 13 * MILLIS_PER_HOUR;
        let next = chrono.days().add(noon, 1).unwrap();
        assert_eq!(next - noon, MILLIS_PER_DAY - MILLIS_PER_HOUR);
        assert_eq!(chrono.hour_of_day().get(next).unwrap(), chrono.hour_of_day().get(noon).unwrap());
        assert_eq!(chrono.days().difference_i64(next, noon).unwrap(), 1);
        assert!(!chrono.days().is_precise());
    }

    #[test]
    fn test_date_time_millis_in_gap() {
        let chrono = Chronology::iso().with_zone(&paris());
        let err = chrono.date_time_millis_hms(2011, 3, 27, 2, 30, 0, 0).unwrap_err();
        assert!(err.is_illegal_argument());
        assert!(err.to_string().contains("'gap'"));
        let ok = chrono.date_time_millis_hms(2011, 3, 27, 3, 0, 0, 0).unwrap();
        assert_eq!(ok, SPRING_2011);
    }

    #[test]
    fn test_overlap_resolves_earlier() {
        let chrono = Chronology::iso().with_zone(&paris());
        let t = chrono.date_time_millis_hms(2011, 10, 30, 2, 30, 0, 0).unwrap();
        assert_eq!(t, AUTUMN_2011 - MILLIS_PER_HOUR / 2);
    }

    #[test]
    fn test_set_text_into_gap_fails() {
        let chrono = Chronology::iso().with_zone(&paris());
        let half_past_one = SPRING_2011 - MILLIS_PER_HOUR / 2;
        let err = chrono.hour_of_day().set_text(half_past_one, "2", &EnglishText).unwrap_err();
        assert!(err.is_illegal_field_value());
        assert!(err.is_illegal_instant());
        let three = chrono.hour_of_day().set_text(half_past_one, "3", &EnglishText).unwrap();
        assert_eq!(three, SPRING_2011 + MILLIS_PER_HOUR / 2);
    }

    #[test]
    fn test_day_set_into_gap_moves_past_it() {
        // 2011-03-26T02:30 local; the same wall time on the 27th does not exist
        let chrono = Chronology::iso().with_zone(&paris());
        let eve = SPRING_2011 - MILLIS_PER_DAY + MILLIS_PER_HOUR / 2;
        assert_eq!(chrono.hour_of_day().get(eve).unwrap(), 2);
        let moved = chrono.day_of_month().set(eve, 27).unwrap();
        assert_eq!(moved, SPRING_2011 + MILLIS_PER_HOUR / 2);
        assert_eq!(chrono.day_of_month().get(moved).unwrap(), 27);
        assert_eq!(chrono.hour_of_day().get(moved).unwrap(), 3);
    }
}
