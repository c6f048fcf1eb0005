//! Duration fields
//!
//! A duration field knows how to add a number of its units to an instant and
//! how many whole units separate two instants. Precise fields have a fixed
//! unit length; imprecise ones (months, years) depend on calendar position.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use horologe_core::checked::{safe_add, safe_divide, safe_multiply, safe_subtract, safe_to_int};
use horologe_core::{DurationFieldType, TimeError, TimeResult};

/// A unit of elapsed time bound to a calendar system.
pub trait DurationField: Send + Sync + fmt::Debug {
    fn duration_type(&self) -> DurationFieldType;

    fn is_supported(&self) -> bool {
        true
    }

    /// True when every unit has the same length.
    fn is_precise(&self) -> bool;

    /// Unit length in millis, the average for imprecise fields.
    fn unit_millis(&self) -> i64;

    fn add(&self, instant: i64, value: i64) -> TimeResult<i64>;

    /// Whole units from `subtrahend` to `minuend`, truncated toward zero.
    fn difference_i64(&self, minuend: i64, subtrahend: i64) -> TimeResult<i64>;

    fn difference(&self, minuend: i64, subtrahend: i64) -> TimeResult<i32> {
        safe_to_int(self.difference_i64(minuend, subtrahend)?)
    }

    /// Whole units in `duration` millis measured from `instant`.
    fn value_i64(&self, duration: i64, instant: i64) -> TimeResult<i64> {
        self.difference_i64(safe_add(instant, duration)?, instant)
    }

    fn value(&self, duration: i64, instant: i64) -> TimeResult<i32> {
        safe_to_int(self.value_i64(duration, instant)?)
    }

    /// Millis spanned by `value` units measured from `instant`.
    fn millis(&self, value: i64, instant: i64) -> TimeResult<i64> {
        safe_subtract(self.add(instant, value)?, instant)
    }

    /// Length of the single unit starting at `instant`.
    fn length_at(&self, instant: i64) -> TimeResult<i64> {
        self.millis(1, instant)
    }
}

/// Order duration fields by unit length. Unsupported fields sort above all
/// supported ones and equal to each other.
pub fn compare_duration_fields(a: &dyn DurationField, b: &dyn DurationField) -> Ordering {
    match (a.is_supported(), b.is_supported()) {
        (false, false) => Ordering::Equal,
        (false, true) => Ordering::Greater,
        (true, false) => Ordering::Less,
        (true, true) => a.unit_millis().cmp(&b.unit_millis()),
    }
}

/// Fixed-length unit.
#[derive(Debug, Clone)]
pub struct PreciseDurationField {
    ty: DurationFieldType,
    unit: i64,
}

impl PreciseDurationField {
    pub fn new(ty: DurationFieldType, unit: i64) -> Arc<dyn DurationField> {
        Arc::new(PreciseDurationField { ty, unit })
    }
}

impl DurationField for PreciseDurationField {
    fn duration_type(&self) -> DurationFieldType {
        self.ty.clone()
    }

    fn is_precise(&self) -> bool {
        true
    }

    fn unit_millis(&self) -> i64 {
        self.unit
    }

    fn add(&self, instant: i64, value: i64) -> TimeResult<i64> {
        safe_add(instant, safe_multiply(value, self.unit)?)
    }

    fn difference_i64(&self, minuend: i64, subtrahend: i64) -> TimeResult<i64> {
        safe_divide(safe_subtract(minuend, subtrahend)?, self.unit)
    }

    fn value_i64(&self, duration: i64, _instant: i64) -> TimeResult<i64> {
        Ok(duration / self.unit)
    }

    fn millis(&self, value: i64, _instant: i64) -> TimeResult<i64> {
        safe_multiply(value, self.unit)
    }

    fn length_at(&self, _instant: i64) -> TimeResult<i64> {
        Ok(self.unit)
    }
}

/// A wrapped unit multiplied by a constant (centuries over years).
#[derive(Debug, Clone)]
pub struct ScaledDurationField {
    wrapped: Arc<dyn DurationField>,
    ty: DurationFieldType,
    scalar: i64,
}

impl ScaledDurationField {
    pub fn new(wrapped: Arc<dyn DurationField>, ty: DurationFieldType, scalar: i64) -> Arc<dyn DurationField> {
        Arc::new(ScaledDurationField { wrapped, ty, scalar })
    }
}

impl DurationField for ScaledDurationField {
    fn duration_type(&self) -> DurationFieldType {
        self.ty.clone()
    }

    fn is_supported(&self) -> bool {
        self.wrapped.is_supported()
    }

    fn is_precise(&self) -> bool {
        self.wrapped.is_precise()
    }

    fn unit_millis(&self) -> i64 {
        self.wrapped.unit_millis().saturating_mul(self.scalar)
    }

    fn add(&self, instant: i64, value: i64) -> TimeResult<i64> {
        self.wrapped.add(instant, safe_multiply(value, self.scalar)?)
    }

    fn difference_i64(&self, minuend: i64, subtrahend: i64) -> TimeResult<i64> {
        Ok(self.wrapped.difference_i64(minuend, subtrahend)? / self.scalar)
    }

    fn value_i64(&self, duration: i64, instant: i64) -> TimeResult<i64> {
        Ok(self.wrapped.value_i64(duration, instant)? / self.scalar)
    }

    fn millis(&self, value: i64, instant: i64) -> TimeResult<i64> {
        self.wrapped.millis(safe_multiply(value, self.scalar)?, instant)
    }
}

/// A unit the calendar system does not have (eras, custom units).
#[derive(Debug, Clone)]
pub struct UnsupportedDurationField {
    ty: DurationFieldType,
}

impl UnsupportedDurationField {
    pub fn new(ty: DurationFieldType) -> Arc<dyn DurationField> {
        Arc::new(UnsupportedDurationField { ty })
    }

    fn unsupported(&self) -> TimeError {
        TimeError::illegal_argument(format!("{} field is unsupported", self.ty))
    }
}

impl DurationField for UnsupportedDurationField {
    fn duration_type(&self) -> DurationFieldType {
        self.ty.clone()
    }

    fn is_supported(&self) -> bool {
        false
    }

    fn is_precise(&self) -> bool {
        true
    }

    fn unit_millis(&self) -> i64 {
        0
    }

    fn add(&self, _instant: i64, _value: i64) -> TimeResult<i64> {
        Err(self.unsupported())
    }

    fn difference_i64(&self, _minuend: i64, _subtrahend: i64) -> TimeResult<i64> {
        Err(self.unsupported())
    }

    fn value_i64(&self, _duration: i64, _instant: i64) -> TimeResult<i64> {
        Err(self.unsupported())
    }

    fn millis(&self, _value: i64, _instant: i64) -> TimeResult<i64> {
        Err(self.unsupported())
    }
}
