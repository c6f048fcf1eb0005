//! Fields built by wrapping another field
//!
//! Century and clock-hour fields, the "no year zero" convention and the
//! Buddhist year offset are all expressed as decorators over a small set
//! of calendar fields.

use std::sync::Arc;

use horologe_core::checked::{safe_add_i32, safe_multiply, safe_multiply_i32, wrapped_value};
use horologe_core::{DateTimeFieldType, IllegalFieldValue, TimeError, TimeResult};

use crate::duration::{DurationField, ScaledDurationField};
use crate::field::{verify_bounds, DateTimeField};
use crate::locale::LocaleText;
use crate::partial::ReadablePartial;

/// Adds a constant to the wrapped value (yearOfCentury is remainder + 1).
#[derive(Debug)]
pub struct OffsetField {
    wrapped: Arc<dyn DateTimeField>,
    ty: DateTimeFieldType,
    offset: i32,
    min: i32,
    max: i32,
}

impl OffsetField {
    pub fn new(wrapped: Arc<dyn DateTimeField>, ty: DateTimeFieldType, offset: i32) -> Arc<dyn DateTimeField> {
        let min = wrapped.minimum_value().saturating_add(offset);
        let max = wrapped.maximum_value().saturating_add(offset);
        Arc::new(OffsetField { wrapped, ty, offset, min, max })
    }
}

impl DateTimeField for OffsetField {
    fn field_type(&self) -> DateTimeFieldType {
        self.ty.clone()
    }

    fn get(&self, instant: i64) -> TimeResult<i32> {
        safe_add_i32(self.wrapped.get(instant)?, self.offset)
    }

    fn add(&self, instant: i64, value: i32) -> TimeResult<i64> {
        let result = self.wrapped.add(instant, value)?;
        verify_bounds(self, self.get(result)?, self.min, self.max)?;
        Ok(result)
    }

    fn add_i64(&self, instant: i64, value: i64) -> TimeResult<i64> {
        let result = self.wrapped.add_i64(instant, value)?;
        verify_bounds(self, self.get(result)?, self.min, self.max)?;
        Ok(result)
    }

    fn add_wrap_field(&self, instant: i64, amount: i32) -> TimeResult<i64> {
        let wrapped = wrapped_value(self.get(instant)?, amount, self.min, self.max)?;
        self.set(instant, wrapped)
    }

    fn difference_i64(&self, minuend: i64, subtrahend: i64) -> TimeResult<i64> {
        self.wrapped.difference_i64(minuend, subtrahend)
    }

    fn set(&self, instant: i64, value: i32) -> TimeResult<i64> {
        verify_bounds(self, value, self.min, self.max)?;
        self.wrapped.set(instant, value - self.offset)
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
        self.min
    }

    fn maximum_value(&self) -> i32 {
        self.max
    }

    fn round_floor(&self, instant: i64) -> TimeResult<i64> {
        self.wrapped.round_floor(instant)
    }

    fn round_ceiling(&self, instant: i64) -> TimeResult<i64> {
        self.wrapped.round_ceiling(instant)
    }

    fn remainder(&self, instant: i64) -> TimeResult<i64> {
        self.wrapped.remainder(instant)
    }
}

/// The wrapped value divided by a constant, floored (centuryOfEra).
#[derive(Debug)]
pub struct DividedField {
    wrapped: Arc<dyn DateTimeField>,
    ty: DateTimeFieldType,
    divisor: i32,
    min: i32,
    max: i32,
    duration: Arc<dyn DurationField>,
    range: Option<Arc<dyn DurationField>>,
}

impl DividedField {
    /// `range` defaults to the wrapped field's range unit. `divisor` must be
    /// at least 2.
    pub fn new(
        wrapped: Arc<dyn DateTimeField>,
        range: Option<Arc<dyn DurationField>>,
        ty: DateTimeFieldType,
        divisor: i32,
    ) -> Arc<dyn DateTimeField> {
        debug_assert!(divisor >= 2, "divisor must be at least 2");
        let duration = ScaledDurationField::new(wrapped.duration_field(), ty.duration_type(), divisor as i64);
        let range = range.or_else(|| wrapped.range_duration_field());
        let min = wrapped.minimum_value().div_euclid(divisor);
        let max = wrapped.maximum_value().div_euclid(divisor);
        Arc::new(DividedField { wrapped, ty, divisor, min, max, duration, range })
    }
}

impl DateTimeField for DividedField {
    fn field_type(&self) -> DateTimeFieldType {
        self.ty.clone()
    }

    fn get(&self, instant: i64) -> TimeResult<i32> {
        Ok(self.wrapped.get(instant)?.div_euclid(self.divisor))
    }

    fn add(&self, instant: i64, value: i32) -> TimeResult<i64> {
        self.wrapped.add(instant, safe_multiply_i32(value, self.divisor)?)
    }

    fn add_i64(&self, instant: i64, value: i64) -> TimeResult<i64> {
        self.wrapped.add_i64(instant, safe_multiply(value, self.divisor as i64)?)
    }

    fn add_wrap_field(&self, instant: i64, amount: i32) -> TimeResult<i64> {
        let wrapped = wrapped_value(self.get(instant)?, amount, self.min, self.max)?;
        self.set(instant, wrapped)
    }

    fn difference_i64(&self, minuend: i64, subtrahend: i64) -> TimeResult<i64> {
        Ok(self.wrapped.difference_i64(minuend, subtrahend)? / self.divisor as i64)
    }

    fn set(&self, instant: i64, value: i32) -> TimeResult<i64> {
        verify_bounds(self, value, self.min, self.max)?;
        let remainder = self.wrapped.get(instant)?.rem_euclid(self.divisor);
        let target = safe_add_i32(safe_multiply_i32(value, self.divisor)?, remainder)?;
        self.wrapped.set(instant, target)
    }

    fn duration_field(&self) -> Arc<dyn DurationField> {
        self.duration.clone()
    }

    fn range_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        self.range.clone()
    }

    fn minimum_value(&self) -> i32 {
        self.min
    }

    fn maximum_value(&self) -> i32 {
        self.max
    }

    fn round_floor(&self, instant: i64) -> TimeResult<i64> {
        let start = self.wrapped.set(instant, safe_multiply_i32(self.get(instant)?, self.divisor)?)?;
        self.wrapped.round_floor(start)
    }
}

/// The wrapped value modulo a constant (yearOfCentury before its offset).
#[derive(Debug)]
pub struct RemainderField {
    wrapped: Arc<dyn DateTimeField>,
    ty: DateTimeFieldType,
    divisor: i32,
    range: Arc<dyn DurationField>,
}

impl RemainderField {
    pub fn new(
        wrapped: Arc<dyn DateTimeField>,
        range: Arc<dyn DurationField>,
        ty: DateTimeFieldType,
        divisor: i32,
    ) -> Arc<dyn DateTimeField> {
        debug_assert!(divisor >= 2, "divisor must be at least 2");
        Arc::new(RemainderField { wrapped, ty, divisor, range })
    }
}

impl DateTimeField for RemainderField {
    fn field_type(&self) -> DateTimeFieldType {
        self.ty.clone()
    }

    fn get(&self, instant: i64) -> TimeResult<i32> {
        Ok(self.wrapped.get(instant)?.rem_euclid(self.divisor))
    }

    fn add(&self, instant: i64, value: i32) -> TimeResult<i64> {
        self.wrapped.add(instant, value)
    }

    fn add_i64(&self, instant: i64, value: i64) -> TimeResult<i64> {
        self.wrapped.add_i64(instant, value)
    }

    fn add_wrap_field(&self, instant: i64, amount: i32) -> TimeResult<i64> {
        let wrapped = wrapped_value(self.get(instant)?, amount, 0, self.divisor - 1)?;
        self.set(instant, wrapped)
    }

    fn difference_i64(&self, minuend: i64, subtrahend: i64) -> TimeResult<i64> {
        self.wrapped.difference_i64(minuend, subtrahend)
    }

    fn set(&self, instant: i64, value: i32) -> TimeResult<i64> {
        verify_bounds(self, value, 0, self.divisor - 1)?;
        let divided = self.wrapped.get(instant)?.div_euclid(self.divisor);
        let target = safe_add_i32(safe_multiply_i32(divided, self.divisor)?, value)?;
        self.wrapped.set(instant, target)
    }

    fn duration_field(&self) -> Arc<dyn DurationField> {
        self.wrapped.duration_field()
    }

    fn range_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        Some(self.range.clone())
    }

    fn minimum_value(&self) -> i32 {
        0
    }

    fn maximum_value(&self) -> i32 {
        self.divisor - 1
    }

    fn round_floor(&self, instant: i64) -> TimeResult<i64> {
        self.wrapped.round_floor(instant)
    }

    fn round_ceiling(&self, instant: i64) -> TimeResult<i64> {
        self.wrapped.round_ceiling(instant)
    }

    fn remainder(&self, instant: i64) -> TimeResult<i64> {
        self.wrapped.remainder(instant)
    }
}

/// Reports the wrapped zero as the wrapped maximum plus one (clock hours
/// run 1..=24 over hourOfDay's 0..=23).
#[derive(Debug)]
pub struct ZeroIsMaxField {
    wrapped: Arc<dyn DateTimeField>,
    ty: DateTimeFieldType,
}

impl ZeroIsMaxField {
    /// The wrapped field must have a minimum of zero.
    pub fn new(wrapped: Arc<dyn DateTimeField>, ty: DateTimeFieldType) -> Arc<dyn DateTimeField> {
        debug_assert_eq!(wrapped.minimum_value(), 0, "wrapped minimum must be zero");
        Arc::new(ZeroIsMaxField { wrapped, ty })
    }
}

impl DateTimeField for ZeroIsMaxField {
    fn field_type(&self) -> DateTimeFieldType {
        self.ty.clone()
    }

    fn get(&self, instant: i64) -> TimeResult<i32> {
        match self.wrapped.get(instant)? {
            0 => Ok(self.maximum_value()),
            value => Ok(value),
        }
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
        let max = self.maximum_value();
        verify_bounds(self, value, 1, max)?;
        self.wrapped.set(instant, if value == max { 0 } else { value })
    }

    fn duration_field(&self) -> Arc<dyn DurationField> {
        self.wrapped.duration_field()
    }

    fn range_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        self.wrapped.range_duration_field()
    }

    fn minimum_value(&self) -> i32 {
        1
    }

    fn maximum_value(&self) -> i32 {
        self.wrapped.maximum_value() + 1
    }

    fn maximum_value_at(&self, instant: i64) -> TimeResult<i32> {
        Ok(self.wrapped.maximum_value_at(instant)? + 1)
    }

    fn maximum_value_for(&self, partial: &dyn ReadablePartial, values: &[i32]) -> i32 {
        self.wrapped.maximum_value_for(partial, values) + 1
    }

    fn round_floor(&self, instant: i64) -> TimeResult<i64> {
        self.wrapped.round_floor(instant)
    }

    fn round_ceiling(&self, instant: i64) -> TimeResult<i64> {
        self.wrapped.round_ceiling(instant)
    }

    fn remainder(&self, instant: i64) -> TimeResult<i64> {
        self.wrapped.remainder(instant)
    }
}

/// Removes one value from the wrapped range; values at or below it shift
/// down by one. Used for calendars without a year zero.
#[derive(Debug)]
pub struct SkipField {
    wrapped: Arc<dyn DateTimeField>,
    skip: i32,
    min: i32,
}

impl SkipField {
    pub fn new(wrapped: Arc<dyn DateTimeField>, skip: i32) -> Arc<dyn DateTimeField> {
        let wrapped_min = wrapped.minimum_value();
        let min = if wrapped_min < skip {
            wrapped_min - 1
        } else if wrapped_min == skip {
            skip + 1
        } else {
            wrapped_min
        };
        Arc::new(SkipField { wrapped, skip, min })
    }
}

impl DateTimeField for SkipField {
    fn field_type(&self) -> DateTimeFieldType {
        self.wrapped.field_type()
    }

    fn get(&self, instant: i64) -> TimeResult<i32> {
        let value = self.wrapped.get(instant)?;
        Ok(if value <= self.skip { value - 1 } else { value })
    }

    fn value_as_text(&self, value: i32, locale: &dyn LocaleText) -> String {
        self.wrapped.value_as_text(value, locale)
    }

    fn text_to_value(&self, text: &str, locale: &dyn LocaleText) -> TimeResult<i32> {
        self.wrapped.text_to_value(text, locale)
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
        verify_bounds(self, value, self.min, self.maximum_value())?;
        let mut value = value;
        if value <= self.skip {
            if value == self.skip {
                return Err(IllegalFieldValue::new(self.name(), value as i64, None, None).into());
            }
            value += 1;
        }
        self.wrapped.set(instant, value)
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
        self.min
    }

    fn maximum_value(&self) -> i32 {
        self.wrapped.maximum_value()
    }

    fn skipped_value(&self) -> Option<i32> {
        Some(self.skip)
    }

    fn round_floor(&self, instant: i64) -> TimeResult<i64> {
        self.wrapped.round_floor(instant)
    }

    fn round_ceiling(&self, instant: i64) -> TimeResult<i64> {
        self.wrapped.round_ceiling(instant)
    }

    fn remainder(&self, instant: i64) -> TimeResult<i64> {
        self.wrapped.remainder(instant)
    }
}

/// Restores the value a [`SkipField`] removed, so the result counts
/// continuously through it.
#[derive(Debug)]
pub struct SkipUndoField {
    wrapped: Arc<dyn DateTimeField>,
    skip: i32,
    min: i32,
}

impl SkipUndoField {
    pub fn new(wrapped: Arc<dyn DateTimeField>, skip: i32) -> Arc<dyn DateTimeField> {
        let wrapped_min = wrapped.minimum_value();
        let min = if wrapped_min == skip { skip - 1 } else { wrapped_min };
        Arc::new(SkipUndoField { wrapped, skip, min })
    }
}

impl DateTimeField for SkipUndoField {
    fn field_type(&self) -> DateTimeFieldType {
        self.wrapped.field_type()
    }

    fn get(&self, instant: i64) -> TimeResult<i32> {
        let value = self.wrapped.get(instant)?;
        Ok(if value < self.skip { value + 1 } else { value })
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
        verify_bounds(self, value, self.min, self.maximum_value())?;
        let value = if value <= self.skip { value - 1 } else { value };
        self.wrapped.set(instant, value)
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
        self.min
    }

    fn maximum_value(&self) -> i32 {
        self.wrapped.maximum_value()
    }

    fn round_floor(&self, instant: i64) -> TimeResult<i64> {
        self.wrapped.round_floor(instant)
    }

    fn round_ceiling(&self, instant: i64) -> TimeResult<i64> {
        self.wrapped.round_ceiling(instant)
    }

    fn remainder(&self, instant: i64) -> TimeResult<i64> {
        self.wrapped.remainder(instant)
    }
}

/// Another field under a different type, optionally with another range.
#[derive(Debug)]
pub struct DelegatedField {
    wrapped: Arc<dyn DateTimeField>,
    ty: DateTimeFieldType,
    range: Option<Arc<dyn DurationField>>,
}

impl DelegatedField {
    pub fn new(
        wrapped: Arc<dyn DateTimeField>,
        range: Option<Arc<dyn DurationField>>,
        ty: DateTimeFieldType,
    ) -> Arc<dyn DateTimeField> {
        Arc::new(DelegatedField { wrapped, ty, range })
    }
}

impl DateTimeField for DelegatedField {
    fn field_type(&self) -> DateTimeFieldType {
        self.ty.clone()
    }

    fn get(&self, instant: i64) -> TimeResult<i32> {
        self.wrapped.get(instant)
    }

    fn value_as_text(&self, value: i32, locale: &dyn LocaleText) -> String {
        self.wrapped.value_as_text(value, locale)
    }

    fn value_as_short_text(&self, value: i32, locale: &dyn LocaleText) -> String {
        self.wrapped.value_as_short_text(value, locale)
    }

    fn text_to_value(&self, text: &str, locale: &dyn LocaleText) -> TimeResult<i32> {
        self.wrapped.text_to_value(text, locale)
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
        self.wrapped.set(instant, value)
    }

    fn duration_field(&self) -> Arc<dyn DurationField> {
        self.wrapped.duration_field()
    }

    fn range_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        self.range.clone().or_else(|| self.wrapped.range_duration_field())
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

    fn round_floor(&self, instant: i64) -> TimeResult<i64> {
        self.wrapped.round_floor(instant)
    }

    fn round_ceiling(&self, instant: i64) -> TimeResult<i64> {
        self.wrapped.round_ceiling(instant)
    }

    fn remainder(&self, instant: i64) -> TimeResult<i64> {
        self.wrapped.remainder(instant)
    }
}

/// A field the chronology does not support. Every value operation fails;
/// bounds report zero.
#[derive(Debug)]
pub struct UnsupportedField {
    ty: DateTimeFieldType,
    duration: Arc<dyn DurationField>,
}

impl UnsupportedField {
    pub fn new(ty: DateTimeFieldType, duration: Arc<dyn DurationField>) -> Arc<dyn DateTimeField> {
        Arc::new(UnsupportedField { ty, duration })
    }

    fn unsupported(&self) -> TimeError {
        TimeError::illegal_argument(format!("Field '{}' is not supported", self.ty))
    }
}

impl DateTimeField for UnsupportedField {
    fn field_type(&self) -> DateTimeFieldType {
        self.ty.clone()
    }

    fn is_supported(&self) -> bool {
        false
    }

    fn get(&self, _instant: i64) -> TimeResult<i32> {
        Err(self.unsupported())
    }

    fn add(&self, _instant: i64, _value: i32) -> TimeResult<i64> {
        Err(self.unsupported())
    }

    fn add_i64(&self, _instant: i64, _value: i64) -> TimeResult<i64> {
        Err(self.unsupported())
    }

    fn add_wrap_field(&self, _instant: i64, _amount: i32) -> TimeResult<i64> {
        Err(self.unsupported())
    }

    fn difference_i64(&self, _minuend: i64, _subtrahend: i64) -> TimeResult<i64> {
        Err(self.unsupported())
    }

    fn set(&self, _instant: i64, _value: i32) -> TimeResult<i64> {
        Err(self.unsupported())
    }

    fn text_to_value(&self, _text: &str, _locale: &dyn LocaleText) -> TimeResult<i32> {
        Err(self.unsupported())
    }

    fn duration_field(&self) -> Arc<dyn DurationField> {
        self.duration.clone()
    }

    fn range_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        None
    }

    fn is_leap(&self, _instant: i64) -> TimeResult<bool> {
        Err(self.unsupported())
    }

    fn minimum_value(&self) -> i32 {
        0
    }

    fn maximum_value(&self) -> i32 {
        0
    }

    fn minimum_value_at(&self, _instant: i64) -> TimeResult<i32> {
        Err(self.unsupported())
    }

    fn maximum_value_at(&self, _instant: i64) -> TimeResult<i32> {
        Err(self.unsupported())
    }

    fn round_floor(&self, _instant: i64) -> TimeResult<i64> {
        Err(self.unsupported())
    }

    fn round_ceiling(&self, _instant: i64) -> TimeResult<i64> {
        Err(self.unsupported())
    }

    fn remainder(&self, _instant: i64) -> TimeResult<i64> {
        Err(self.unsupported())
    }

    fn add_partial(
        &self,
        _partial: &dyn ReadablePartial,
        _index: usize,
        _values: Vec<i32>,
        _amount: i32,
    ) -> TimeResult<Vec<i32>> {
        Err(self.unsupported())
    }

    fn set_partial(
        &self,
        _partial: &dyn ReadablePartial,
        _index: usize,
        _values: Vec<i32>,
        _value: i32,
    ) -> TimeResult<Vec<i32>> {
        Err(self.unsupported())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horologe_core::DurationFieldType;

    use crate::chronology::Chronology;

    fn ymd(y: i32, m: i32, d: i32) -> i64 {
        Chronology::iso().date_time_millis(y, m, d, 0).unwrap()
    }

    #[test]
    fn test_skip_removes_zero() {
        let year = SkipField::new(Chronology::iso().year(), 0);
        assert_eq!(year.get(ymd(1, 6, 1)).unwrap(), 1);
        assert_eq!(year.get(ymd(0, 6, 1)).unwrap(), -1);
        assert_eq!(year.set(ymd(2000, 6, 1), -1).unwrap(), ymd(0, 6, 1));
        assert!(year.set(ymd(2000, 6, 1), 0).unwrap_err().is_illegal_field_value());
        assert_eq!(year.minimum_value(), Chronology::iso().year().minimum_value() - 1);
    }

    #[test]
    fn test_skip_undo_restores_zero() {
        let skipped = SkipField::new(Chronology::iso().year(), 0);
        let undone = SkipUndoField::new(skipped, 0);
        assert_eq!(undone.get(ymd(0, 6, 1)).unwrap(), 0);
        assert_eq!(undone.get(ymd(-1, 6, 1)).unwrap(), -1);
        assert_eq!(undone.set(ymd(2000, 6, 1), 0).unwrap(), ymd(0, 6, 1));
    }

    #[test]
    fn test_zero_is_max() {
        let clock = ZeroIsMaxField::new(Chronology::iso().hour_of_day(), DateTimeFieldType::CLOCKHOUR_OF_DAY);
        let midnight = ymd(2004, 6, 9);
        assert_eq!(clock.get(midnight).unwrap(), 24);
        assert_eq!(clock.get(midnight + 3_600_000).unwrap(), 1);
        assert_eq!(clock.set(midnight + 3_600_000, 24).unwrap(), midnight);
        assert!(clock.set(midnight, 0).is_err());
        assert_eq!((clock.minimum_value(), clock.maximum_value()), (1, 24));
    }

    #[test]
    fn test_offset_shifts_bounds() {
        let shifted = OffsetField::new(
            Chronology::iso().month_of_year(),
            DateTimeFieldType::custom("shiftedMonth", DurationFieldType::MONTHS, Some(DurationFieldType::YEARS)),
            10,
        );
        assert_eq!(shifted.get(ymd(2004, 6, 9)).unwrap(), 16);
        assert_eq!(shifted.set(ymd(2004, 6, 9), 13).unwrap(), ymd(2004, 3, 9));
        assert_eq!((shifted.minimum_value(), shifted.maximum_value()), (11, 22));
        assert!(shifted.set(ymd(2004, 6, 9), 10).is_err());
        assert_eq!(shifted.add_wrap_field(ymd(2004, 12, 9), 1).unwrap(), ymd(2004, 1, 9));
    }

    #[test]
    fn test_divided_and_remainder() {
        let year = Chronology::iso().year();
        let century = DividedField::new(year.clone(), None, DateTimeFieldType::CENTURY_OF_ERA, 100);
        let of_century =
            RemainderField::new(year, century.duration_field(), DateTimeFieldType::YEAR_OF_CENTURY, 100);
        let t = ymd(2004, 6, 9);
        assert_eq!(century.get(t).unwrap(), 20);
        assert_eq!(of_century.get(t).unwrap(), 4);
        assert_eq!(century.set(t, 19).unwrap(), ymd(1904, 6, 9));
        assert_eq!(of_century.set(t, 99).unwrap(), ymd(2099, 6, 9));
        assert_eq!(century.add(t, 1).unwrap(), ymd(2104, 6, 9));
        assert_eq!(of_century.add_wrap_field(ymd(2099, 6, 9), 1).unwrap(), ymd(2000, 6, 9));
        assert_eq!(century.duration_field().duration_type(), DurationFieldType::CENTURIES);
        assert!(of_century.set(t, 100).is_err());
    }

    #[test]
    fn test_delegated_retypes() {
        let era_year = DelegatedField::new(Chronology::iso().year(), None, DateTimeFieldType::YEAR_OF_ERA);
        assert_eq!(era_year.field_type(), DateTimeFieldType::YEAR_OF_ERA);
        assert_eq!(era_year.get(ymd(2004, 6, 9)).unwrap(), 2004);
    }

    #[test]
    fn test_unsupported_reports_zero_bounds() {
        let field = UnsupportedField::new(DateTimeFieldType::ERA, Chronology::iso().eras());
        assert!(!field.is_supported());
        assert_eq!((field.minimum_value(), field.maximum_value()), (0, 0));
        assert!(field.set(0, 1).unwrap_err().is_illegal_argument());
    }
}
