//! Partial dates
//!
//! A [`Partial`] is an ordered list of field types, largest unit first, with
//! one value per type. The chronology is always UTC; zones only matter when
//! the partial is resolved against a full [`DateTime`].

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use horologe_chrono::{compare_duration_fields, is_contiguous, Chronology, DateTime, DateTimeField, ReadablePartial};
use horologe_core::{DateTimeFieldType, DurationFieldType, TimeError, TimeResult};
use tracing::trace;

use crate::property::PartialProperty;

/// An incomplete date or time: some fields, no instant.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Partial {
    chronology: Chronology,
    types: Vec<DateTimeFieldType>,
    values: Vec<i32>,
}

fn order_error(larger: &DateTimeFieldType, smaller: &DateTimeFieldType) -> TimeError {
    TimeError::illegal_argument(format!(
        "Types array must be in order largest-smallest: {} < {}",
        larger, smaller
    ))
}

fn duplicate_error(first: &DateTimeFieldType, second: &DateTimeFieldType) -> TimeError {
    TimeError::illegal_argument(format!(
        "Types array must not contain duplicate: {} and {}",
        first, second
    ))
}

/// Check that each type has a smaller unit (or, for equal units, a smaller
/// range) than the one before it.
fn check_order(chronology: &Chronology, types: &[DateTimeFieldType]) -> TimeResult<()> {
    for pair in types.windows(2) {
        let (last, next) = (&pair[0], &pair[1]);
        let last_unit = chronology.duration(&last.duration_type());
        let next_unit = chronology.duration(&next.duration_type());
        if !next_unit.is_supported() {
            if last_unit.is_supported() {
                return Err(order_error(last, next));
            }
            return Err(TimeError::illegal_argument(format!(
                "Types array must not contain duplicate unsupported: {} and {}",
                last, next
            )));
        }
        match compare_duration_fields(last_unit.as_ref(), next_unit.as_ref()) {
            Ordering::Less => return Err(order_error(last, next)),
            Ordering::Greater => {}
            Ordering::Equal if last_unit.duration_type() == next_unit.duration_type() => {
                match (last.range_duration_type(), next.range_duration_type()) {
                    (None, None) => return Err(duplicate_error(last, next)),
                    (None, Some(_)) => {}
                    (Some(_), None) => return Err(order_error(last, next)),
                    (Some(last_range), Some(next_range)) => {
                        let last_range = chronology.duration(&last_range);
                        let next_range = chronology.duration(&next_range);
                        match compare_duration_fields(last_range.as_ref(), next_range.as_ref()) {
                            Ordering::Less => return Err(order_error(last, next)),
                            Ordering::Equal => return Err(duplicate_error(last, next)),
                            Ordering::Greater => {}
                        }
                    }
                }
            }
            Ordering::Equal => {
                if last_unit.is_supported() && last_unit.duration_type() != DurationFieldType::YEARS {
                    return Err(order_error(last, next));
                }
                return Err(duplicate_error(last, next));
            }
        }
    }
    Ok(())
}

/// Where a new type goes so that the list stays largest first.
fn insertion_index(chronology: &Chronology, types: &[DateTimeFieldType], ty: &DateTimeFieldType) -> usize {
    let unit = chronology.duration(&ty.duration_type());
    if !unit.is_supported() {
        return 0;
    }
    for (i, existing) in types.iter().enumerate() {
        let existing_unit = chronology.duration(&existing.duration_type());
        if !existing_unit.is_supported() {
            continue;
        }
        match compare_duration_fields(unit.as_ref(), existing_unit.as_ref()) {
            Ordering::Greater => return i,
            Ordering::Less => {}
            Ordering::Equal => {
                let Some(range) = ty.range_duration_type() else {
                    return i;
                };
                let Some(existing_range) = existing.range_duration_type() else {
                    continue;
                };
                let range = chronology.duration(&range);
                let existing_range = chronology.duration(&existing_range);
                if compare_duration_fields(range.as_ref(), existing_range.as_ref()) == Ordering::Greater {
                    return i;
                }
            }
        }
    }
    types.len()
}

impl Partial {
    /// An empty ISO partial.
    pub fn new() -> Self {
        Self::empty(&Chronology::iso())
    }

    /// An empty partial in `chronology`, reduced to UTC.
    pub fn empty(chronology: &Chronology) -> Self {
        Partial { chronology: chronology.with_utc(), types: Vec::new(), values: Vec::new() }
    }

    /// A single-field ISO partial.
    pub fn of(ty: DateTimeFieldType, value: i32) -> TimeResult<Self> {
        Self::from_fields(vec![ty], vec![value], None)
    }

    /// Build and validate a partial. `chronology` defaults to ISO and is
    /// always reduced to UTC.
    pub fn from_fields(
        types: Vec<DateTimeFieldType>,
        values: Vec<i32>,
        chronology: Option<&Chronology>,
    ) -> TimeResult<Self> {
        let chronology = chronology.map_or_else(Chronology::iso, Chronology::with_utc);
        if types.len() != values.len() {
            return Err(TimeError::illegal_argument("Values array must be the same length as the types array"));
        }
        check_order(&chronology, &types)?;
        let partial = Partial { chronology, types, values };
        partial.chronology.validate(&partial, &partial.values)?;
        Ok(partial)
    }

    /// Same types with new values that a field operation already checked.
    pub(crate) fn with_values(&self, values: Vec<i32>) -> Self {
        Partial { chronology: self.chronology.clone(), types: self.types.clone(), values }
    }

    pub fn chronology(&self) -> &Chronology {
        &self.chronology
    }

    pub fn size(&self) -> usize {
        self.types.len()
    }

    pub fn types(&self) -> &[DateTimeFieldType] {
        &self.types
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }

    fn require(&self, ty: &DateTimeFieldType) -> TimeResult<usize> {
        self.index_of(ty)
            .ok_or_else(|| TimeError::illegal_argument(format!("Field '{}' is not supported", ty)))
    }

    pub fn get(&self, ty: &DateTimeFieldType) -> TimeResult<i32> {
        Ok(self.values[self.require(ty)?])
    }

    pub fn fields(&self) -> Vec<Arc<dyn DateTimeField>> {
        (0..self.size()).map(|i| self.field(i)).collect()
    }

    /// Set `ty` to `value`. A new type is inserted at its ordered position
    /// and the result validated; an existing type is set with the smaller
    /// fields clamped into their new bounds.
    pub fn with(&self, ty: DateTimeFieldType, value: i32) -> TimeResult<Self> {
        match self.index_of(&ty) {
            Some(index) => {
                if self.values[index] == value {
                    return Ok(self.clone());
                }
                let values = self.field(index).set_partial(self, index, self.values.clone(), value)?;
                Ok(self.with_values(values))
            }
            None => {
                let at = insertion_index(&self.chronology, &self.types, &ty);
                trace!(field = %ty, at, "inserting partial field");
                let mut types = self.types.clone();
                let mut values = self.values.clone();
                types.insert(at, ty);
                values.insert(at, value);
                Self::from_fields(types, values, Some(&self.chronology))
            }
        }
    }

    /// Drop `ty`; unchanged when it is not present.
    pub fn without(&self, ty: &DateTimeFieldType) -> TimeResult<Self> {
        let Some(index) = self.index_of(ty) else {
            return Ok(self.clone());
        };
        let mut types = self.types.clone();
        let mut values = self.values.clone();
        types.remove(index);
        values.remove(index);
        let partial = Partial { chronology: self.chronology.clone(), types, values };
        partial.chronology.validate(&partial, &partial.values)?;
        Ok(partial)
    }

    fn unit_index(&self, ty: &DurationFieldType) -> TimeResult<usize> {
        self.types
            .iter()
            .position(|t| t.duration_type() == *ty)
            .ok_or_else(|| TimeError::illegal_argument(format!("Field '{}' is not supported", ty)))
    }

    /// Add to the field measured in `ty`, carrying into larger fields.
    pub fn with_field_added(&self, ty: &DurationFieldType, amount: i32) -> TimeResult<Self> {
        let index = self.unit_index(ty)?;
        if amount == 0 {
            return Ok(self.clone());
        }
        let values = self.field(index).add_partial(self, index, self.values.clone(), amount)?;
        Ok(self.with_values(values))
    }

    /// Like [`with_field_added`](Self::with_field_added), but the largest
    /// field wraps instead of failing.
    pub fn with_field_add_wrapped(&self, ty: &DurationFieldType, amount: i32) -> TimeResult<Self> {
        let index = self.unit_index(ty)?;
        if amount == 0 {
            return Ok(self.clone());
        }
        let values = self.field(index).add_wrap_partial(self, index, self.values.clone(), amount)?;
        Ok(self.with_values(values))
    }

    /// The same types and values under another chronology, revalidated.
    pub fn with_chronology_retain_fields(&self, chronology: &Chronology) -> TimeResult<Self> {
        let chronology = chronology.with_utc();
        if chronology == self.chronology {
            return Ok(self.clone());
        }
        let partial = Partial { chronology, types: self.types.clone(), values: self.values.clone() };
        partial.chronology.validate(&partial, &partial.values)?;
        Ok(partial)
    }

    pub fn property(&self, ty: &DateTimeFieldType) -> TimeResult<PartialProperty> {
        Ok(PartialProperty::new(self.clone(), self.require(ty)?))
    }

    pub fn is_contiguous(&self) -> bool {
        is_contiguous(self)
    }

    /// True when every field of this partial reads the same value at `date_time`.
    pub fn is_match(&self, date_time: &DateTime) -> TimeResult<bool> {
        for (ty, &value) in self.types.iter().zip(&self.values) {
            if date_time.chronology().field(ty).get(date_time.millis())? != value {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// True when `other` carries every field of this partial with the same value.
    pub fn is_match_partial(&self, other: &dyn ReadablePartial) -> bool {
        self.types.iter().zip(&self.values).all(|(ty, &value)| {
            other.index_of(ty).map_or(false, |i| other.value(i) == value)
        })
    }

    /// Fill in this partial's fields over `base`, keeping its chronology.
    pub fn to_date_time(&self, base: &DateTime) -> TimeResult<DateTime> {
        let millis = base.chronology().set_partial_fields(self, base.millis())?;
        Ok(base.with_millis(millis))
    }

    /// Compare values field by field; both partials must have the same types.
    pub fn compare(&self, other: &Partial) -> TimeResult<Ordering> {
        if self.types != other.types {
            return Err(TimeError::illegal_argument("Partial objects must have matching field types"));
        }
        Ok(self.values.cmp(&other.values))
    }

    pub fn is_before(&self, other: &Partial) -> TimeResult<bool> {
        Ok(self.compare(other)? == Ordering::Less)
    }

    pub fn is_after(&self, other: &Partial) -> TimeResult<bool> {
        Ok(self.compare(other)? == Ordering::Greater)
    }
}

impl Default for Partial {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadablePartial for Partial {
    fn size(&self) -> usize {
        self.types.len()
    }

    fn field_type(&self, index: usize) -> DateTimeFieldType {
        self.types[index].clone()
    }

    fn value(&self, index: usize) -> i32 {
        self.values[index]
    }

    fn chronology(&self) -> &Chronology {
        &self.chronology
    }
}

impl fmt::Display for Partial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, (ty, value)) in self.types.iter().zip(&self.values).enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", ty, value)?;
        }
        f.write_str("]")
    }
}

impl fmt::Debug for Partial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Partial{} {}", self, self.chronology)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: i32, d: i32) -> Partial {
        Partial::from_fields(
            vec![DateTimeFieldType::YEAR, DateTimeFieldType::MONTH_OF_YEAR, DateTimeFieldType::DAY_OF_MONTH],
            vec![y, m, d],
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_order_and_duplicates() {
        let err = Partial::from_fields(
            vec![DateTimeFieldType::DAY_OF_MONTH, DateTimeFieldType::YEAR],
            vec![1, 2004],
            None,
        )
        .unwrap_err();
        assert!(err.is_illegal_argument());
        assert!(err.to_string().contains("largest-smallest"));

        let err = Partial::from_fields(vec![DateTimeFieldType::YEAR, DateTimeFieldType::YEAR], vec![1, 2], None)
            .unwrap_err();
        assert!(err.to_string().contains("duplicate"));

        // dayOfYear and dayOfMonth share a unit; a smaller range must come second
        let err = Partial::from_fields(
            vec![DateTimeFieldType::DAY_OF_MONTH, DateTimeFieldType::DAY_OF_YEAR],
            vec![1, 1],
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("largest-smallest"));

        // weekyear after year is a duplicate; year after weekyear is out of order
        let err = Partial::from_fields(vec![DateTimeFieldType::YEAR, DateTimeFieldType::WEEKYEAR], vec![1, 1], None)
            .unwrap_err();
        assert!(err.to_string().contains("duplicate"));
        let err = Partial::from_fields(vec![DateTimeFieldType::WEEKYEAR, DateTimeFieldType::YEAR], vec![1, 1], None)
            .unwrap_err();
        assert!(err.to_string().contains("largest-smallest"));

        // clockhourOfDay and hourOfDay share unit and range
        for types in [
            vec![DateTimeFieldType::CLOCKHOUR_OF_DAY, DateTimeFieldType::HOUR_OF_DAY],
            vec![DateTimeFieldType::HOUR_OF_DAY, DateTimeFieldType::CLOCKHOUR_OF_DAY],
        ] {
            let err = Partial::from_fields(types, vec![5, 5], None).unwrap_err();
            assert!(err.is_illegal_argument());
            assert!(err.to_string().contains("duplicate"));
        }

        let err = Partial::from_fields(vec![DateTimeFieldType::YEAR], vec![1, 2], None).unwrap_err();
        assert!(err.is_illegal_argument());
    }

    #[test]
    fn test_values_validated_in_context() {
        assert!(Partial::from_fields(
            vec![DateTimeFieldType::YEAR, DateTimeFieldType::MONTH_OF_YEAR, DateTimeFieldType::DAY_OF_MONTH],
            vec![2003, 2, 29],
            None
        )
        .unwrap_err()
        .is_illegal_field_value());
        assert_eq!(ymd(2004, 2, 29).get(&DateTimeFieldType::DAY_OF_MONTH).unwrap(), 29);
        let month_day = Partial::from_fields(
            vec![DateTimeFieldType::MONTH_OF_YEAR, DateTimeFieldType::DAY_OF_MONTH],
            vec![2, 29],
            None,
        );
        assert!(month_day.is_ok());
        assert!(Partial::of(DateTimeFieldType::MONTH_OF_YEAR, 13).unwrap_err().is_illegal_field_value());
    }

    #[test]
    fn test_with_inserts_in_order() {
        let p = Partial::of(DateTimeFieldType::DAY_OF_MONTH, 9).unwrap();
        let p = p.with(DateTimeFieldType::YEAR, 2004).unwrap();
        let p = p.with(DateTimeFieldType::MONTH_OF_YEAR, 6).unwrap();
        assert_eq!(p, ymd(2004, 6, 9));
        let p = p.with(DateTimeFieldType::HOUR_OF_DAY, 12).unwrap();
        assert_eq!(p.types().last(), Some(&DateTimeFieldType::HOUR_OF_DAY));
        assert_eq!(p.to_string(), "[year=2004, monthOfYear=6, dayOfMonth=9, hourOfDay=12]");
    }

    #[test]
    fn test_with_existing_clamps_smaller_fields() {
        let p = ymd(2004, 1, 31).with(DateTimeFieldType::MONTH_OF_YEAR, 2).unwrap();
        assert_eq!(p, ymd(2004, 2, 29));
        let same = p.with(DateTimeFieldType::MONTH_OF_YEAR, 2).unwrap();
        assert_eq!(same, p);
        assert!(p.with(DateTimeFieldType::MONTH_OF_YEAR, 13).is_err());
    }

    #[test]
    fn test_without() {
        let p = ymd(2004, 6, 9).without(&DateTimeFieldType::MONTH_OF_YEAR).unwrap();
        assert_eq!(p.types(), &[DateTimeFieldType::YEAR, DateTimeFieldType::DAY_OF_MONTH]);
        assert!(!p.is_contiguous());
        assert_eq!(p.without(&DateTimeFieldType::HOUR_OF_DAY).unwrap(), p);
    }

    #[test]
    fn test_add_carries() {
        let p = ymd(2004, 12, 31).with_field_added(&DurationFieldType::DAYS, 1).unwrap();
        assert_eq!(p, ymd(2005, 1, 1));
        let p = ymd(2004, 1, 31).with_field_added(&DurationFieldType::MONTHS, 1).unwrap();
        assert_eq!(p, ymd(2004, 2, 29));
        assert!(ymd(2004, 6, 9).with_field_added(&DurationFieldType::HOURS, 1).unwrap_err().is_illegal_argument());
    }

    #[test]
    fn test_top_field_overflow_and_wrap() {
        let time = Partial::from_fields(
            vec![DateTimeFieldType::HOUR_OF_DAY, DateTimeFieldType::MINUTE_OF_HOUR],
            vec![23, 59],
            None,
        )
        .unwrap();
        let err = time.with_field_added(&DurationFieldType::MINUTES, 1).unwrap_err();
        assert!(err.to_string().contains("Maximum value exceeded for add"));
        let wrapped = time.with_field_add_wrapped(&DurationFieldType::MINUTES, 1).unwrap();
        assert_eq!(wrapped.values(), &[0, 0]);
    }

    #[test]
    fn test_lone_month_wraps() {
        let month_day = Partial::from_fields(
            vec![DateTimeFieldType::MONTH_OF_YEAR, DateTimeFieldType::DAY_OF_MONTH],
            vec![12, 31],
            None,
        )
        .unwrap();
        let next = month_day.with_field_added(&DurationFieldType::MONTHS, 2).unwrap();
        assert_eq!(next.values(), &[2, 29]);
    }

    #[test]
    fn test_compare_requires_same_types() {
        let a = ymd(2004, 6, 9);
        let b = ymd(2004, 7, 1);
        assert_eq!(a.compare(&b).unwrap(), Ordering::Less);
        assert!(b.is_after(&a).unwrap());
        let other = Partial::of(DateTimeFieldType::YEAR, 2004).unwrap();
        assert!(a.compare(&other).unwrap_err().is_illegal_argument());
    }

    #[test]
    fn test_chronology_is_utc_and_retained() {
        let julian = Chronology::julian(horologe_chrono::WeekConfig::default()).unwrap();
        assert!(ymd(1900, 2, 28).with(DateTimeFieldType::DAY_OF_MONTH, 29).is_err());
        let moved = ymd(1900, 2, 28).with_chronology_retain_fields(&julian).unwrap();
        assert_eq!(moved.chronology(), &julian);
        assert!(moved.with(DateTimeFieldType::DAY_OF_MONTH, 29).is_ok());

        let zone = horologe_zone::Zone::fixed(3_600_000).unwrap();
        let zoned = Partial::empty(&Chronology::iso_in(&zone));
        assert_eq!(zoned.chronology(), &Chronology::iso());
    }

    #[test]
    fn test_match_and_resolve() {
        let p = Partial::from_fields(
            vec![DateTimeFieldType::MONTH_OF_YEAR, DateTimeFieldType::DAY_OF_MONTH],
            vec![6, 9],
            None,
        )
        .unwrap();
        let base = DateTime::from_fields(Chronology::iso(), 2010, 1, 1, 12, 0, 0, 0).unwrap();
        let resolved = p.to_date_time(&base).unwrap();
        assert_eq!(resolved, DateTime::from_fields(Chronology::iso(), 2010, 6, 9, 12, 0, 0, 0).unwrap());
        assert!(p.is_match(&resolved).unwrap());
        assert!(!p.is_match(&base).unwrap());
        assert!(p.is_match_partial(&ymd(2010, 6, 9)));
        assert!(!ymd(2010, 6, 9).is_match_partial(&p));
    }
}
