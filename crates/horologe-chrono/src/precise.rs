//! Fixed-length time fields (hourOfDay, minuteOfHour, millisOfDay, ...)

use std::sync::Arc;

use horologe_core::checked::wrapped_value;
use horologe_core::{DateTimeFieldType, TimeResult};

use crate::duration::DurationField;
use crate::field::{shift, verify_bounds, DateTimeField};
use crate::locale::{LocaleText, TextKind};

/// Floor `instant` to a multiple of `unit`, clamping at `i64::MIN`.
pub(crate) fn floor_to(instant: i64, unit: i64) -> i64 {
    let floor = instant.div_euclid(unit) as i128 * unit as i128;
    floor.max(i64::MIN as i128) as i64
}

/// A field whose unit and range are both precise, so its value is plain
/// division and remainder of the instant.
#[derive(Debug)]
pub struct PreciseField {
    ty: DateTimeFieldType,
    unit: Arc<dyn DurationField>,
    range: Arc<dyn DurationField>,
    unit_millis: i64,
    range_units: i64,
    text: TextKind,
}

impl PreciseField {
    /// `unit` and `range` must be precise, and `range` at least two units.
    pub fn new(
        ty: DateTimeFieldType,
        unit: Arc<dyn DurationField>,
        range: Arc<dyn DurationField>,
    ) -> Arc<dyn DateTimeField> {
        Self::with_text(ty, unit, range, TextKind::Numeric)
    }

    pub fn with_text(
        ty: DateTimeFieldType,
        unit: Arc<dyn DurationField>,
        range: Arc<dyn DurationField>,
        text: TextKind,
    ) -> Arc<dyn DateTimeField> {
        debug_assert!(unit.is_precise() && range.is_precise(), "{} needs precise units", ty);
        let unit_millis = unit.unit_millis().max(1);
        let range_units = range.unit_millis() / unit_millis;
        debug_assert!(range_units >= 2, "{} range must be at least 2 units", ty);
        Arc::new(PreciseField { ty, unit, range, unit_millis, range_units, text })
    }
}

impl DateTimeField for PreciseField {
    fn field_type(&self) -> DateTimeFieldType {
        self.ty.clone()
    }

    fn get(&self, instant: i64) -> TimeResult<i32> {
        Ok(instant.div_euclid(self.unit_millis).rem_euclid(self.range_units) as i32)
    }

    fn value_as_text(&self, value: i32, locale: &dyn LocaleText) -> String {
        self.text.text(value, locale, false)
    }

    fn value_as_short_text(&self, value: i32, locale: &dyn LocaleText) -> String {
        self.text.text(value, locale, true)
    }

    fn text_to_value(&self, text: &str, locale: &dyn LocaleText) -> TimeResult<i32> {
        self.text.parse(self.ty.name(), text, locale)
    }

    fn maximum_text_length(&self, locale: &dyn LocaleText) -> usize {
        self.text
            .max_length(locale, false)
            .unwrap_or_else(|| self.maximum_value().to_string().len())
    }

    fn add_wrap_field(&self, instant: i64, amount: i32) -> TimeResult<i64> {
        let current = self.get(instant)?;
        let wrapped = wrapped_value(current, amount, 0, self.maximum_value())?;
        shift(instant, (wrapped - current) as i64, self.unit_millis)
    }

    fn set(&self, instant: i64, value: i32) -> TimeResult<i64> {
        verify_bounds(self, value, 0, self.maximum_value())?;
        let current = self.get(instant)?;
        shift(instant, (value - current) as i64, self.unit_millis)
    }

    fn duration_field(&self) -> Arc<dyn DurationField> {
        self.unit.clone()
    }

    fn range_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        Some(self.range.clone())
    }

    fn minimum_value(&self) -> i32 {
        0
    }

    fn maximum_value(&self) -> i32 {
        (self.range_units - 1) as i32
    }

    fn round_floor(&self, instant: i64) -> TimeResult<i64> {
        Ok(floor_to(instant, self.unit_millis))
    }

    fn remainder(&self, instant: i64) -> TimeResult<i64> {
        Ok(instant.rem_euclid(self.unit_millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duration::PreciseDurationField;
    use crate::locale::EnglishText;
    use horologe_core::constants::{MILLIS_PER_DAY, MILLIS_PER_HALFDAY, MILLIS_PER_HOUR};
    use horologe_core::DurationFieldType;

    fn hour_of_day() -> Arc<dyn DateTimeField> {
        PreciseField::new(
            DateTimeFieldType::HOUR_OF_DAY,
            PreciseDurationField::new(DurationFieldType::HOURS, MILLIS_PER_HOUR),
            PreciseDurationField::new(DurationFieldType::DAYS, MILLIS_PER_DAY),
        )
    }

    #[test]
    fn test_get_before_epoch() {
        let field = hour_of_day();
        assert_eq!(field.get(-1).unwrap(), 23);
        assert_eq!(field.get(5 * MILLIS_PER_HOUR + 7).unwrap(), 5);
        assert_eq!(field.maximum_value(), 23);
    }

    #[test]
    fn test_set_and_wrap() {
        let field = hour_of_day();
        let instant = 22 * MILLIS_PER_HOUR + 5;
        assert_eq!(field.set(instant, 3).unwrap(), 3 * MILLIS_PER_HOUR + 5);
        assert!(field.set(instant, 24).unwrap_err().is_illegal_field_value());
        assert_eq!(field.add_wrap_field(instant, 3).unwrap(), MILLIS_PER_HOUR + 5);
        assert_eq!(field.add(instant, 3).unwrap(), 25 * MILLIS_PER_HOUR + 5);
    }

    #[test]
    fn test_rounding() {
        let field = hour_of_day();
        let instant = 5 * MILLIS_PER_HOUR + MILLIS_PER_HOUR / 2;
        assert_eq!(field.round_floor(instant).unwrap(), 5 * MILLIS_PER_HOUR);
        assert_eq!(field.round_ceiling(instant).unwrap(), 6 * MILLIS_PER_HOUR);
        assert_eq!(field.round_half_floor(instant).unwrap(), 5 * MILLIS_PER_HOUR);
        assert_eq!(field.round_half_ceiling(instant).unwrap(), 6 * MILLIS_PER_HOUR);
        assert_eq!(field.round_half_even(instant).unwrap(), 6 * MILLIS_PER_HOUR);
        assert_eq!(field.round_floor(i64::MIN).unwrap(), i64::MIN);
    }

    #[test]
    fn test_halfday_text() {
        let field = PreciseField::with_text(
            DateTimeFieldType::HALFDAY_OF_DAY,
            PreciseDurationField::new(DurationFieldType::HALFDAYS, MILLIS_PER_HALFDAY),
            PreciseDurationField::new(DurationFieldType::DAYS, MILLIS_PER_DAY),
            TextKind::Halfday,
        );
        assert_eq!(field.as_text(MILLIS_PER_HALFDAY + 1, &EnglishText).unwrap(), "PM");
        assert_eq!(field.set_text(0, "pm", &EnglishText).unwrap(), MILLIS_PER_HALFDAY);
    }
}
