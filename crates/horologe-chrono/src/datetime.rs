//! Instant snapshots and field properties
//!
//! [`DateTime`] pairs an instant with the chronology that interprets it.
//! [`Property`] binds one field to a snapshot and answers value, text,
//! bounds and copy-on-write questions about it. Nothing here mutates; every
//! operation returns a new snapshot.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use horologe_core::checked::{safe_add, safe_subtract};
use horologe_core::constants::MILLIS_PER_DAY;
use horologe_core::{current_time_millis, DateTimeFieldType, DurationFieldType, TimeError, TimeResult};
use horologe_zone::Zone;

use crate::chronology::Chronology;
use crate::duration::DurationField;
use crate::field::DateTimeField;
use crate::locale::LocaleText;

/// An instant read through a chronology.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DateTime {
    millis: i64,
    chronology: Chronology,
}

macro_rules! value_getters {
    ($($name:ident => $field:ident),* $(,)?) => {
        $(
            pub fn $name(&self) -> TimeResult<i32> {
                self.chronology.$field().get(self.millis)
            }
        )*
    };
}

impl DateTime {
    pub fn new(millis: i64, chronology: Chronology) -> Self {
        DateTime { millis, chronology }
    }

    /// The current instant from the process-wide clock.
    pub fn now(chronology: Chronology) -> Self {
        Self::new(current_time_millis(), chronology)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn from_fields(
        chronology: Chronology,
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        millis: i32,
    ) -> TimeResult<Self> {
        let instant = chronology.date_time_millis_hms(year, month, day, hour, minute, second, millis)?;
        Ok(Self::new(instant, chronology))
    }

    pub fn millis(&self) -> i64 {
        self.millis
    }

    pub fn chronology(&self) -> &Chronology {
        &self.chronology
    }

    pub fn zone(&self) -> Zone {
        self.chronology.zone()
    }

    fn supported_field(&self, ty: &DateTimeFieldType) -> TimeResult<Arc<dyn DateTimeField>> {
        let field = self.chronology.field(ty);
        if !field.is_supported() {
            return Err(TimeError::illegal_argument(format!("Field '{}' is not supported", ty)));
        }
        Ok(field)
    }

    pub fn get(&self, ty: &DateTimeFieldType) -> TimeResult<i32> {
        self.supported_field(ty)?.get(self.millis)
    }

    pub fn is_supported(&self, ty: &DateTimeFieldType) -> bool {
        self.chronology.field(ty).is_supported()
    }

    pub fn property(&self, ty: &DateTimeFieldType) -> TimeResult<Property> {
        Ok(Property { date_time: self.clone(), field: self.supported_field(ty)? })
    }

    pub fn with_millis(&self, millis: i64) -> Self {
        Self::new(millis, self.chronology.clone())
    }

    pub fn with_chronology(&self, chronology: Chronology) -> Self {
        Self::new(self.millis, chronology)
    }

    pub fn with_field(&self, ty: &DateTimeFieldType, value: i32) -> TimeResult<Self> {
        let millis = self.supported_field(ty)?.set(self.millis, value)?;
        Ok(self.with_millis(millis))
    }

    pub fn with_field_added(&self, ty: &DurationFieldType, amount: i32) -> TimeResult<Self> {
        if amount == 0 {
            return Ok(self.clone());
        }
        let millis = self.chronology.duration(ty).add(self.millis, amount as i64)?;
        Ok(self.with_millis(millis))
    }

    /// Same instant, viewed in `zone`.
    pub fn with_zone(&self, zone: &Zone) -> Self {
        self.with_chronology(self.chronology.with_zone(zone))
    }

    /// Same local fields, moved to `zone`. The instant changes by the
    /// difference between the two offsets.
    pub fn with_zone_retain_fields(&self, zone: &Zone) -> TimeResult<Self> {
        let current = self.zone();
        if current == *zone {
            return Ok(self.clone());
        }
        let local = safe_add(self.millis, current.offset(self.millis) as i64)?;
        let millis = safe_subtract(local, zone.offset_from_local(local) as i64)?;
        Ok(Self::new(millis, self.chronology.with_zone(zone)))
    }

    /// Inside an overlap, the earlier of the two instants with this local
    /// time; otherwise unchanged.
    pub fn with_earlier_offset_at_overlap(&self) -> Self {
        self.with_millis(self.zone().adjust_offset(self.millis, false))
    }

    pub fn with_later_offset_at_overlap(&self) -> Self {
        self.with_millis(self.zone().adjust_offset(self.millis, true))
    }

    value_getters! {
        era => era,
        year_of_era => year_of_era,
        century_of_era => century_of_era,
        year_of_century => year_of_century,
        year => year,
        day_of_year => day_of_year,
        month_of_year => month_of_year,
        day_of_month => day_of_month,
        weekyear => weekyear,
        week_of_weekyear => week_of_weekyear,
        day_of_week => day_of_week,
        hour_of_day => hour_of_day,
        minute_of_hour => minute_of_hour,
        second_of_minute => second_of_minute,
        millis_of_second => millis_of_second,
        millis_of_day => millis_of_day,
    }
}

impl fmt::Debug for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DateTime({}, {})", self.millis, self.chronology)
    }
}

/// One field of one [`DateTime`].
#[derive(Clone)]
pub struct Property {
    date_time: DateTime,
    field: Arc<dyn DateTimeField>,
}

impl Property {
    pub fn date_time(&self) -> &DateTime {
        &self.date_time
    }

    pub fn field(&self) -> &Arc<dyn DateTimeField> {
        &self.field
    }

    pub fn field_type(&self) -> DateTimeFieldType {
        self.field.field_type()
    }

    pub fn name(&self) -> String {
        self.field.name()
    }

    fn millis(&self) -> i64 {
        self.date_time.millis
    }

    fn copy(&self, millis: i64) -> DateTime {
        self.date_time.with_millis(millis)
    }

    pub fn get(&self) -> TimeResult<i32> {
        self.field.get(self.millis())
    }

    pub fn as_string(&self) -> TimeResult<String> {
        Ok(self.get()?.to_string())
    }

    pub fn as_text(&self, locale: &dyn LocaleText) -> TimeResult<String> {
        self.field.as_text(self.millis(), locale)
    }

    pub fn as_short_text(&self, locale: &dyn LocaleText) -> TimeResult<String> {
        self.field.as_short_text(self.millis(), locale)
    }

    pub fn maximum_text_length(&self, locale: &dyn LocaleText) -> usize {
        self.field.maximum_text_length(locale)
    }

    pub fn duration_field(&self) -> Arc<dyn DurationField> {
        self.field.duration_field()
    }

    pub fn range_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        self.field.range_duration_field()
    }

    pub fn leap_duration_field(&self) -> Option<Arc<dyn DurationField>> {
        self.field.leap_duration_field()
    }

    pub fn is_leap(&self) -> TimeResult<bool> {
        self.field.is_leap(self.millis())
    }

    pub fn leap_amount(&self) -> TimeResult<i32> {
        self.field.leap_amount(self.millis())
    }

    pub fn minimum_value_overall(&self) -> i32 {
        self.field.minimum_value()
    }

    pub fn maximum_value_overall(&self) -> i32 {
        self.field.maximum_value()
    }

    /// Smallest value at this instant.
    pub fn minimum_value(&self) -> TimeResult<i32> {
        self.field.minimum_value_at(self.millis())
    }

    /// Largest value at this instant.
    pub fn maximum_value(&self) -> TimeResult<i32> {
        self.field.maximum_value_at(self.millis())
    }

    pub fn remainder(&self) -> TimeResult<i64> {
        self.field.remainder(self.millis())
    }

    /// Whole units of this field between `other` and this snapshot.
    pub fn difference(&self, other: &DateTime) -> TimeResult<i32> {
        self.field.difference(self.millis(), other.millis)
    }

    pub fn difference_i64(&self, other: &DateTime) -> TimeResult<i64> {
        self.field.difference_i64(self.millis(), other.millis)
    }

    /// Compare this value with the same field of `other`, read in its own
    /// chronology.
    pub fn compare(&self, other: &DateTime) -> TimeResult<Ordering> {
        let theirs = other.get(&self.field_type())?;
        Ok(self.get()?.cmp(&theirs))
    }

    pub fn add_to_copy(&self, amount: i32) -> TimeResult<DateTime> {
        Ok(self.copy(self.field.add(self.millis(), amount)?))
    }

    pub fn add_to_copy_i64(&self, amount: i64) -> TimeResult<DateTime> {
        Ok(self.copy(self.field.add_i64(self.millis(), amount)?))
    }

    /// Add, wrapping within this field's range without touching larger
    /// fields.
    pub fn add_wrap_field_to_copy(&self, amount: i32) -> TimeResult<DateTime> {
        Ok(self.copy(self.field.add_wrap_field(self.millis(), amount)?))
    }

    pub fn set_copy(&self, value: i32) -> TimeResult<DateTime> {
        Ok(self.copy(self.field.set(self.millis(), value)?))
    }

    pub fn set_copy_text(&self, text: &str, locale: &dyn LocaleText) -> TimeResult<DateTime> {
        Ok(self.copy(self.field.set_text(self.millis(), text, locale)?))
    }

    /// Set to the largest value at this instant. When that value falls in a
    /// zone gap, returns the last instant before the next transition.
    pub fn with_maximum_value(&self) -> TimeResult<DateTime> {
        match self.set_copy(self.maximum_value()?) {
            Err(err) if err.is_illegal_instant() => {
                let zone = self.date_time.zone();
                let before_next = zone.previous_transition(safe_add(self.millis(), MILLIS_PER_DAY)?);
                Ok(self.copy(before_next))
            }
            other => other,
        }
    }

    /// Set to the smallest value at this instant. When that value falls in a
    /// zone gap, returns the first instant after the previous transition.
    pub fn with_minimum_value(&self) -> TimeResult<DateTime> {
        match self.set_copy(self.minimum_value()?) {
            Err(err) if err.is_illegal_instant() => {
                let zone = self.date_time.zone();
                let after_previous = zone.next_transition(safe_subtract(self.millis(), MILLIS_PER_DAY)?);
                Ok(self.copy(after_previous))
            }
            other => other,
        }
    }

    pub fn round_floor_copy(&self) -> TimeResult<DateTime> {
        Ok(self.copy(self.field.round_floor(self.millis())?))
    }

    pub fn round_ceiling_copy(&self) -> TimeResult<DateTime> {
        Ok(self.copy(self.field.round_ceiling(self.millis())?))
    }

    pub fn round_half_floor_copy(&self) -> TimeResult<DateTime> {
        Ok(self.copy(self.field.round_half_floor(self.millis())?))
    }

    pub fn round_half_ceiling_copy(&self) -> TimeResult<DateTime> {
        Ok(self.copy(self.field.round_half_ceiling(self.millis())?))
    }

    pub fn round_half_even_copy(&self) -> TimeResult<DateTime> {
        Ok(self.copy(self.field.round_half_even(self.millis())?))
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Property[{}]", self.field.name())
    }
}
