//! The date-time field contract
//!
//! Every calendar quantity (year, dayOfMonth, hourOfDay, ...) is exposed as
//! an `Arc<dyn DateTimeField>` owned by a chronology. Fields never mutate
//! anything: each operation takes an instant (or partial values) and returns
//! a new one.
//!
//! Most methods have defaults expressed through `get`, `set`, `round_floor`
//! and the duration field, so concrete fields only override what their
//! calendar rules change.

use std::fmt;
use std::sync::Arc;

use horologe_core::checked::{safe_add, safe_subtract, safe_to_int, wrapped_value};
use horologe_core::{DateTimeFieldType, IllegalFieldValue, TimeError, TimeResult};

use crate::duration::DurationField;
use crate::locale::LocaleText;
use crate::partial::ReadablePartial;

/// A calendar quantity bound to one chronology.
pub trait DateTimeField: Send + Sync + fmt::Debug {
    fn field_type(&self) -> DateTimeFieldType;

    fn name(&self) -> String {
        self.field_type().name().to_string()
    }

    fn is_supported(&self) -> bool {
        true
    }

    /// True when `set` carries out-of-range values instead of failing.
    fn is_lenient(&self) -> bool {
        false
    }

    fn get(&self, instant: i64) -> TimeResult<i32>;

    fn as_text(&self, instant: i64, locale: &dyn LocaleText) -> TimeResult<String> {
        Ok(self.value_as_text(self.get(instant)?, locale))
    }

    fn as_short_text(&self, instant: i64, locale: &dyn LocaleText) -> TimeResult<String> {
        Ok(self.value_as_short_text(self.get(instant)?, locale))
    }

    fn value_as_text(&self, value: i32, _locale: &dyn LocaleText) -> String {
        value.to_string()
    }

    fn value_as_short_text(&self, value: i32, locale: &dyn LocaleText) -> String {
        self.value_as_text(value, locale)
    }

    fn add(&self, instant: i64, value: i32) -> TimeResult<i64> {
        self.duration_field().add(instant, value as i64)
    }

    fn add_i64(&self, instant: i64, value: i64) -> TimeResult<i64> {
        self.duration_field().add(instant, value)
    }

    /// Add within this field only, wrapping at its bounds. Larger fields are
    /// left untouched.
    fn add_wrap_field(&self, instant: i64, amount: i32) -> TimeResult<i64> {
        let current = self.get(instant)?;
        let wrapped = wrapped_value(
            current,
            amount,
            self.minimum_value_at(instant)?,
            self.maximum_value_at(instant)?,
        )?;
        self.set(instant, wrapped)
    }

    fn difference(&self, minuend: i64, subtrahend: i64) -> TimeResult<i32> {
        safe_to_int(self.difference_i64(minuend, subtrahend)?)
    }

    fn difference_i64(&self, minuend: i64, subtrahend: i64) -> TimeResult<i64> {
        self.duration_field().difference_i64(minuend, subtrahend)
    }

    fn set(&self, instant: i64, value: i32) -> TimeResult<i64>;

    fn set_text(&self, instant: i64, text: &str, locale: &dyn LocaleText) -> TimeResult<i64> {
        let value = self.text_to_value(text, locale)?;
        self.set(instant, value)
    }

    /// Resolve a locale name or a decimal number to a field value.
    fn text_to_value(&self, text: &str, _locale: &dyn LocaleText) -> TimeResult<i32> {
        text.trim()
            .parse::<i32>()
            .map_err(|_| IllegalFieldValue::text(self.name(), text).into())
    }

    fn maximum_text_length(&self, _locale: &dyn LocaleText) -> usize {
        let max = self.maximum_value();
        let min = self.minimum_value();
        max.to_string().len().max(if min < 0 { min.to_string().len() } else { 0 })
    }

    fn maximum_short_text_length(&self, locale: &dyn LocaleText) -> usize {
        self.maximum_text_length(locale)
    }

    fn duration_field(&self) -> Arc<dyn DurationField>;

    fn range_duration_field(&self) -> Option<Arc<dyn DurationField>>;

    fn leap_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        None
    }

    fn is_leap(&self, _instant: i64) -> TimeResult<bool> {
        Ok(false)
    }

    fn leap_amount(&self, _instant: i64) -> TimeResult<i32> {
        Ok(0)
    }

    /// Smallest value across all contexts.
    fn minimum_value(&self) -> i32;

    /// Largest value across all contexts.
    fn maximum_value(&self) -> i32;

    fn minimum_value_at(&self, _instant: i64) -> TimeResult<i32> {
        Ok(self.minimum_value())
    }

    fn maximum_value_at(&self, _instant: i64) -> TimeResult<i32> {
        Ok(self.maximum_value())
    }

    /// Smallest value given the other fields of a partial.
    fn minimum_value_for(&self, _partial: &dyn ReadablePartial, _values: &[i32]) -> i32 {
        self.minimum_value()
    }

    /// Largest value given the other fields of a partial.
    fn maximum_value_for(&self, _partial: &dyn ReadablePartial, _values: &[i32]) -> i32 {
        self.maximum_value()
    }

    /// A value inside the bounds that the field never takes (year zero in
    /// calendars without one).
    fn skipped_value(&self) -> Option<i32> {
        None
    }

    fn round_floor(&self, instant: i64) -> TimeResult<i64>;

    fn round_ceiling(&self, instant: i64) -> TimeResult<i64> {
        let floor = self.round_floor(instant)?;
        if floor == instant {
            return Ok(instant);
        }
        self.add(floor, 1)
    }

    fn round_half_floor(&self, instant: i64) -> TimeResult<i64> {
        let floor = self.round_floor(instant)?;
        let ceiling = self.round_ceiling(instant)?;
        if below_floor(instant, floor) <= above_ceiling(instant, ceiling) {
            Ok(floor)
        } else {
            Ok(ceiling)
        }
    }

    fn round_half_ceiling(&self, instant: i64) -> TimeResult<i64> {
        let floor = self.round_floor(instant)?;
        let ceiling = self.round_ceiling(instant)?;
        if above_ceiling(instant, ceiling) <= below_floor(instant, floor) {
            Ok(ceiling)
        } else {
            Ok(floor)
        }
    }

    fn round_half_even(&self, instant: i64) -> TimeResult<i64> {
        let floor = self.round_floor(instant)?;
        let ceiling = self.round_ceiling(instant)?;
        let below = below_floor(instant, floor);
        let above = above_ceiling(instant, ceiling);
        if below < above {
            Ok(floor)
        } else if above < below {
            Ok(ceiling)
        } else if self.get(ceiling)? & 1 == 0 {
            Ok(ceiling)
        } else {
            Ok(floor)
        }
    }

    /// Millis from the floor to `instant`.
    fn remainder(&self, instant: i64) -> TimeResult<i64> {
        safe_subtract(instant, self.round_floor(instant)?)
    }

    /// Add to one value of a partial, carrying one unit at a time into the
    /// next larger field.
    fn add_partial(
        &self,
        partial: &dyn ReadablePartial,
        index: usize,
        values: Vec<i32>,
        amount: i32,
    ) -> TimeResult<Vec<i32>> {
        carry_partial(self, partial, index, values, amount, false)
    }

    /// Like [`add_partial`](Self::add_partial) but the largest field wraps
    /// instead of failing.
    fn add_wrap_partial(
        &self,
        partial: &dyn ReadablePartial,
        index: usize,
        values: Vec<i32>,
        amount: i32,
    ) -> TimeResult<Vec<i32>> {
        carry_partial(self, partial, index, values, amount, true)
    }

    /// Wrap one value of a partial within its own bounds.
    fn add_wrap_field_partial(
        &self,
        partial: &dyn ReadablePartial,
        index: usize,
        values: Vec<i32>,
        amount: i32,
    ) -> TimeResult<Vec<i32>> {
        let min = self.minimum_value_for(partial, &values);
        let max = self.maximum_value_for(partial, &values);
        let mut wrapped = wrapped_value(values[index], amount, min, max)?;
        if amount != 0 && self.skipped_value() == Some(wrapped) {
            wrapped = wrapped_value(wrapped, amount.signum(), min, max)?;
        }
        self.set_partial(partial, index, values, wrapped)
    }

    /// Set one value of a partial, clamping the smaller fields into their
    /// new bounds.
    fn set_partial(
        &self,
        partial: &dyn ReadablePartial,
        index: usize,
        mut values: Vec<i32>,
        value: i32,
    ) -> TimeResult<Vec<i32>> {
        let min = self.minimum_value_for(partial, &values);
        let max = self.maximum_value_for(partial, &values);
        if value < min || value > max {
            return Err(IllegalFieldValue::new(self.name(), value as i64, Some(min as i64), Some(max as i64)).into());
        }
        if self.skipped_value() == Some(value) {
            return Err(IllegalFieldValue::new(self.name(), value as i64, None, None).into());
        }
        values[index] = value;
        for i in index + 1..partial.size() {
            let field = partial.field(i);
            let max = field.maximum_value_for(partial, &values);
            if values[i] > max {
                values[i] = max;
            }
            let min = field.minimum_value_for(partial, &values);
            if values[i] < min {
                values[i] = min;
            }
        }
        Ok(values)
    }

    fn set_text_partial(
        &self,
        partial: &dyn ReadablePartial,
        index: usize,
        values: Vec<i32>,
        text: &str,
        locale: &dyn LocaleText,
    ) -> TimeResult<Vec<i32>> {
        let value = self.text_to_value(text, locale)?;
        self.set_partial(partial, index, values, value)
    }
}

fn below_floor(instant: i64, floor: i64) -> i128 {
    instant as i128 - floor as i128
}

fn above_ceiling(instant: i64, ceiling: i64) -> i128 {
    ceiling as i128 - instant as i128
}

/// Shared carry loop behind `add_partial` and `add_wrap_partial`.
pub(crate) fn carry_partial<F: DateTimeField + ?Sized>(
    field: &F,
    partial: &dyn ReadablePartial,
    index: usize,
    mut values: Vec<i32>,
    mut amount: i32,
    wrap_top: bool,
) -> TimeResult<Vec<i32>> {
    if amount == 0 {
        return Ok(values);
    }
    let skip = field.skipped_value();
    // Whether the skipped value lies in `low..=high`.
    let skipped_in = |low: i32, high: i32| skip.map_or(0, |s| i32::from(low <= s && s <= high));
    let mut next: Option<Arc<dyn DateTimeField>> = None;
    while amount > 0 {
        let max = field.maximum_value_for(partial, &values);
        let current = values[index];
        let proposed = current as i64 + amount as i64;
        let proposed = proposed + skip.map_or(0, |s| i64::from(current < s && proposed >= s as i64));
        if proposed <= max as i64 {
            values[index] = proposed as i32;
            break;
        }
        if next.is_none() {
            if index == 0 {
                if !wrap_top {
                    return Err(TimeError::illegal_argument("Maximum value exceeded for add"));
                }
                amount -= (max + 1) - current - skipped_in(current.saturating_add(1), max);
                values[index] = field.minimum_value_for(partial, &values);
                continue;
            }
            next = Some(next_larger(field, partial, index)?);
        }
        amount -= (max + 1) - current - skipped_in(current.saturating_add(1), max);
        if let Some(larger) = &next {
            values = if wrap_top {
                larger.add_wrap_partial(partial, index - 1, values, 1)?
            } else {
                larger.add_partial(partial, index - 1, values, 1)?
            };
        }
        values[index] = field.minimum_value_for(partial, &values);
    }
    while amount < 0 {
        let min = field.minimum_value_for(partial, &values);
        let current = values[index];
        let proposed = current as i64 + amount as i64;
        let proposed = proposed - skip.map_or(0, |s| i64::from(current > s && proposed <= s as i64));
        if proposed >= min as i64 {
            values[index] = proposed as i32;
            break;
        }
        if next.is_none() {
            if index == 0 {
                if !wrap_top {
                    return Err(TimeError::illegal_argument("Maximum value exceeded for add"));
                }
                amount -= (min - 1) - current + skipped_in(min, current.saturating_sub(1));
                values[index] = field.maximum_value_for(partial, &values);
                continue;
            }
            next = Some(next_larger(field, partial, index)?);
        }
        amount -= (min - 1) - current + skipped_in(min, current.saturating_sub(1));
        if let Some(larger) = &next {
            values = if wrap_top {
                larger.add_wrap_partial(partial, index - 1, values, -1)?
            } else {
                larger.add_partial(partial, index - 1, values, -1)?
            };
        }
        values[index] = field.maximum_value_for(partial, &values);
    }
    let value = values[index];
    field.set_partial(partial, index, values, value)
}

fn next_larger<F: DateTimeField + ?Sized>(
    field: &F,
    partial: &dyn ReadablePartial,
    index: usize,
) -> TimeResult<Arc<dyn DateTimeField>> {
    let larger = partial.field(index - 1);
    let range = field.range_duration_field().map(|d| d.duration_type());
    if range != Some(larger.duration_field().duration_type()) {
        return Err(TimeError::illegal_argument("Fields invalid for add"));
    }
    Ok(larger)
}

/// Fail with IllegalFieldValue unless `min <= value <= max`.
pub(crate) fn verify_bounds(field: &dyn DateTimeField, value: i32, min: i32, max: i32) -> TimeResult<()> {
    if value < min || value > max {
        return Err(IllegalFieldValue::new(field.name(), value as i64, Some(min as i64), Some(max as i64)).into());
    }
    Ok(())
}

/// `instant + delta * unit`, checked.
pub(crate) fn shift(instant: i64, delta: i64, unit: i64) -> TimeResult<i64> {
    safe_add(instant, horologe_core::checked::safe_multiply(delta, unit)?)
}
