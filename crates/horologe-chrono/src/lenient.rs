//! Lenient and strict views of a chronology
//!
//! Both wrap every field of a base chronology and change only `set`. A
//! lenient field accepts any value and carries the excess into larger
//! fields: month 13 of 2004 is January 2005. A strict field checks the
//! value against its bounds at the instant before writing, even where the
//! base field would have accepted it.

use std::sync::Arc;

use horologe_core::checked::safe_subtract;
use horologe_core::{DateTimeFieldType, StandardField, TimeResult};
use horologe_zone::Zone;

use crate::chronology::{Chronology, ChronologyImpl, ChronologyKey, FieldTable, FieldTableBuilder};
use crate::duration::DurationField;
use crate::field::{verify_bounds, DateTimeField};
use crate::locale::LocaleText;
use crate::partial::ReadablePartial;

#[derive(Debug)]
enum Policy {
    /// Carry out-of-range values; `utc` is the same field of the base in UTC.
    Lenient { zone: Zone, utc: Arc<dyn DateTimeField> },
    Strict,
}

#[derive(Debug)]
struct PolicyField {
    wrapped: Arc<dyn DateTimeField>,
    policy: Policy,
}

impl DateTimeField for PolicyField {
    fn field_type(&self) -> DateTimeFieldType {
        self.wrapped.field_type()
    }

    fn is_supported(&self) -> bool {
        self.wrapped.is_supported()
    }

    fn is_lenient(&self) -> bool {
        matches!(self.policy, Policy::Lenient { .. })
    }

    fn get(&self, instant: i64) -> TimeResult<i32> {
        self.wrapped.get(instant)
    }

    fn as_text(&self, instant: i64, locale: &dyn LocaleText) -> TimeResult<String> {
        self.wrapped.as_text(instant, locale)
    }

    fn as_short_text(&self, instant: i64, locale: &dyn LocaleText) -> TimeResult<String> {
        self.wrapped.as_short_text(instant, locale)
    }

    fn value_as_text(&self, value: i32, locale: &dyn LocaleText) -> String {
        self.wrapped.value_as_text(value, locale)
    }

    fn value_as_short_text(&self, value: i32, locale: &dyn LocaleText) -> String {
        self.wrapped.value_as_short_text(value, locale)
    }

    fn add(&self, instant: i64, value: i32) -> TimeResult<i64> {
        self.wrapped.add(instant, value)
    }

    fn add_i64(&self, instant: i64, value: i64) -> TimeResult<i64> {
        self.wrapped.add_i64(instant, value)
    }

    fn add_wrap_field(&self, instant: i64, amount: i32) -> TimeResult<i64> {
        self.wrapped.add_wrap_field(instant, amount)
    }

    fn difference_i64(&self, minuend: i64, subtrahend: i64) -> TimeResult<i64> {
        self.wrapped.difference_i64(minuend, subtrahend)
    }

    fn set(&self, instant: i64, value: i32) -> TimeResult<i64> {
        match &self.policy {
            Policy::Lenient { zone, utc } => {
                let local = zone.convert_utc_to_local(instant)?;
                let diff = safe_subtract(value as i64, self.wrapped.get(instant)? as i64)?;
                let local = utc.add_i64(local, diff)?;
                zone.convert_local_to_utc_hinted(local, false, instant)
            }
            Policy::Strict => {
                let min = self.wrapped.minimum_value_at(instant)?;
                let max = self.wrapped.maximum_value_at(instant)?;
                verify_bounds(self, value, min, max)?;
                self.wrapped.set(instant, value)
            }
        }
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
        self.wrapped.duration_field()
    }

    fn range_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        self.wrapped.range_duration_field()
    }

    fn leap_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        self.wrapped.leap_duration_field()
    }

    fn is_leap(&self, instant: i64) -> TimeResult<bool> {
        self.wrapped.is_leap(instant)
    }

    fn leap_amount(&self, instant: i64) -> TimeResult<i32> {
        self.wrapped.leap_amount(instant)
    }

    fn minimum_value(&self) -> i32 {
        self.wrapped.minimum_value()
    }

    fn maximum_value(&self) -> i32 {
        self.wrapped.maximum_value()
    }

    fn minimum_value_at(&self, instant: i64) -> TimeResult<i32> {
        self.wrapped.minimum_value_at(instant)
    }

    fn maximum_value_at(&self, instant: i64) -> TimeResult<i32> {
        self.wrapped.maximum_value_at(instant)
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
        self.wrapped.round_floor(instant)
    }

    fn round_ceiling(&self, instant: i64) -> TimeResult<i64> {
        self.wrapped.round_ceiling(instant)
    }

    fn round_half_floor(&self, instant: i64) -> TimeResult<i64> {
        self.wrapped.round_half_floor(instant)
    }

    fn round_half_ceiling(&self, instant: i64) -> TimeResult<i64> {
        self.wrapped.round_half_ceiling(instant)
    }

    fn round_half_even(&self, instant: i64) -> TimeResult<i64> {
        self.wrapped.round_half_even(instant)
    }

    fn remainder(&self, instant: i64) -> TimeResult<i64> {
        self.wrapped.remainder(instant)
    }
}

#[derive(Debug)]
struct PolicyChronology {
    key: ChronologyKey,
    base: Chronology,
    fields: FieldTable,
}

impl ChronologyImpl for PolicyChronology {
    fn key(&self) -> &ChronologyKey {
        &self.key
    }

    fn fields(&self) -> &FieldTable {
        &self.fields
    }

    fn zone(&self) -> Zone {
        self.base.zone()
    }

    fn base(&self) -> Option<&Chronology> {
        Some(&self.base)
    }
}

fn build(key: ChronologyKey, base: Chronology, lenient: bool) -> Chronology {
    let zone = base.zone();
    let utc = base.with_utc();
    let mut b = FieldTableBuilder::from_table(base.fields());
    for &f in StandardField::all() {
        let wrapped = base.fields().field(f).clone();
        if !wrapped.is_supported() {
            continue;
        }
        let policy = if lenient {
            Policy::Lenient { zone: zone.clone(), utc: utc.fields().field(f).clone() }
        } else {
            Policy::Strict
        };
        b.set_field(f, Arc::new(PolicyField { wrapped, policy }));
    }
    tracing::debug!(base = %base, lenient, "wrapping chronology fields");
    Chronology::from_impl(PolicyChronology { key, base, fields: b.finish() })
}

pub(crate) fn build_lenient(key: ChronologyKey, base: Chronology) -> Chronology {
    build(key, base, true)
}

pub(crate) fn build_strict(key: ChronologyKey, base: Chronology) -> Chronology {
    build(key, base, false)
}
