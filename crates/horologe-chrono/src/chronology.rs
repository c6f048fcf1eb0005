//! The chronology handle, its field table and the instance cache
//!
//! A [`Chronology`] is a cheap, cloneable handle to one calendar system in
//! one zone. Every chronology exposes the same twenty-three fields and
//! twelve duration units; those a calendar cannot represent are filled with
//! unsupported placeholders when the table is finished.
//!
//! Instances are cached by [`ChronologyKey`], so asking for the same
//! calendar, zone and configuration twice returns the same handle.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use horologe_core::{
    DateTimeFieldType, DurationFieldType, IllegalFieldValue, StandardDuration, StandardField, TimeError, TimeResult,
};
use horologe_zone::{format_local, Zone};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use tracing::debug;

use crate::config::{CutoverConfig, WeekConfig};
use crate::decorators::UnsupportedField;
use crate::duration::{DurationField, UnsupportedDurationField};
use crate::field::DateTimeField;
use crate::partial::ReadablePartial;
use crate::{calendars, cutover, lenient, zoned};

const DEFAULT_MIN_DAYS: u8 = 4;

/// Identity of a chronology: calendar, configuration, zone and wrappers.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChronologyKey {
    Iso,
    Gregorian { min_days: u8 },
    Julian { min_days: u8 },
    Coptic { min_days: u8 },
    Buddhist,
    GregorianJulian { cutover: i64, min_days: u8 },
    Zoned { base: Box<ChronologyKey>, zone: String },
    Lenient(Box<ChronologyKey>),
    Strict(Box<ChronologyKey>),
}

impl ChronologyKey {
    fn fmt_in(&self, f: &mut fmt::Formatter<'_>, zone: &str) -> fmt::Result {
        match self {
            ChronologyKey::Iso => write!(f, "ISOChronology[{}]", zone),
            ChronologyKey::Gregorian { min_days } => write_basic(f, "GregorianChronology", zone, *min_days),
            ChronologyKey::Julian { min_days } => write_basic(f, "JulianChronology", zone, *min_days),
            ChronologyKey::Coptic { min_days } => write_basic(f, "CopticChronology", zone, *min_days),
            ChronologyKey::Buddhist => write!(f, "BuddhistChronology[{}]", zone),
            ChronologyKey::GregorianJulian { cutover, min_days } => {
                write!(f, "GJChronology[{}", zone)?;
                if *cutover != CutoverConfig::default().cutover_millis {
                    write!(f, ",cutover={}", format_local(*cutover))?;
                }
                if *min_days != DEFAULT_MIN_DAYS {
                    write!(f, ",mdfw={}", min_days)?;
                }
                f.write_str("]")
            }
            ChronologyKey::Zoned { base, zone } => base.fmt_in(f, zone),
            ChronologyKey::Lenient(base) => {
                f.write_str("LenientChronology[")?;
                base.fmt_in(f, zone)?;
                f.write_str("]")
            }
            ChronologyKey::Strict(base) => {
                f.write_str("StrictChronology[")?;
                base.fmt_in(f, zone)?;
                f.write_str("]")
            }
        }
    }
}

fn write_basic(f: &mut fmt::Formatter<'_>, name: &str, zone: &str, min_days: u8) -> fmt::Result {
    write!(f, "{}[{}", name, zone)?;
    if min_days != DEFAULT_MIN_DAYS {
        write!(f, ",mdfw={}", min_days)?;
    }
    f.write_str("]")
}

impl fmt::Display for ChronologyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_in(f, "UTC")
    }
}

/// The complete set of fields and units of one chronology.
pub struct FieldTable {
    fields: Vec<Arc<dyn DateTimeField>>,
    durations: Vec<Arc<dyn DurationField>>,
}

impl FieldTable {
    pub fn field(&self, field: StandardField) -> &Arc<dyn DateTimeField> {
        &self.fields[field as usize - 1]
    }

    pub fn duration(&self, duration: StandardDuration) -> &Arc<dyn DurationField> {
        &self.durations[duration as usize - 1]
    }
}

impl fmt::Debug for FieldTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let supported: Vec<&str> = StandardField::all()
            .iter()
            .filter(|s| self.field(**s).is_supported())
            .map(|s| s.name())
            .collect();
        f.debug_struct("FieldTable").field("supported", &supported).finish()
    }
}

/// Collects fields while a chronology is assembled.
#[derive(Default)]
pub struct FieldTableBuilder {
    fields: [Option<Arc<dyn DateTimeField>>; 23],
    durations: [Option<Arc<dyn DurationField>>; 12],
}

impl FieldTableBuilder {
    /// Start from every field and unit of an existing table.
    pub fn from_table(table: &FieldTable) -> Self {
        let mut builder = FieldTableBuilder::default();
        for (slot, field) in builder.fields.iter_mut().zip(&table.fields) {
            *slot = Some(field.clone());
        }
        for (slot, duration) in builder.durations.iter_mut().zip(&table.durations) {
            *slot = Some(duration.clone());
        }
        builder
    }

    pub fn field(&self, field: StandardField) -> Option<Arc<dyn DateTimeField>> {
        self.fields[field as usize - 1].clone()
    }

    pub fn set_field(&mut self, field: StandardField, value: Arc<dyn DateTimeField>) -> &mut Self {
        self.fields[field as usize - 1] = Some(value);
        self
    }

    pub fn set_duration(&mut self, duration: StandardDuration, value: Arc<dyn DurationField>) -> &mut Self {
        self.durations[duration as usize - 1] = Some(value);
        self
    }

    /// Fill every empty slot with an unsupported placeholder.
    pub fn finish(self) -> FieldTable {
        let durations: Vec<Arc<dyn DurationField>> = StandardDuration::all()
            .iter()
            .zip(self.durations)
            .map(|(d, slot)| slot.unwrap_or_else(|| UnsupportedDurationField::new(DurationFieldType::Standard(*d))))
            .collect();
        let fields = StandardField::all()
            .iter()
            .zip(self.fields)
            .map(|(f, slot)| {
                slot.unwrap_or_else(|| {
                    let unit = durations[f.duration() as usize - 1].clone();
                    UnsupportedField::new(DateTimeFieldType::Standard(*f), unit)
                })
            })
            .collect();
        FieldTable { fields, durations }
    }
}

/// What every concrete chronology provides behind a [`Chronology`] handle.
pub trait ChronologyImpl: Send + Sync + fmt::Debug {
    fn key(&self) -> &ChronologyKey;

    fn fields(&self) -> &FieldTable;

    fn zone(&self) -> Zone {
        Zone::utc()
    }

    /// The chronology this one wraps, for zoned, lenient and strict.
    fn base(&self) -> Option<&Chronology> {
        None
    }

    /// Instant of a local date and millis of day, set field by field.
    fn date_time_millis(&self, year: i32, month: i32, day: i32, millis_of_day: i32) -> TimeResult<i64> {
        let fields = self.fields();
        let instant = fields.field(StandardField::Year).set(0, year)?;
        let instant = fields.field(StandardField::MonthOfYear).set(instant, month)?;
        let instant = fields.field(StandardField::DayOfMonth).set(instant, day)?;
        fields.field(StandardField::MillisOfDay).set(instant, millis_of_day)
    }

    #[allow(clippy::too_many_arguments)]
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
        let fields = self.fields();
        let instant = self.date_time_millis(year, month, day, 0)?;
        let instant = fields.field(StandardField::HourOfDay).set(instant, hour)?;
        let instant = fields.field(StandardField::MinuteOfHour).set(instant, minute)?;
        let instant = fields.field(StandardField::SecondOfMinute).set(instant, second)?;
        fields.field(StandardField::MillisOfSecond).set(instant, millis)
    }
}

static CACHE: Lazy<RwLock<HashMap<ChronologyKey, Chronology>>> = Lazy::new(|| RwLock::new(HashMap::new()));

/// Look up `key`, building and publishing it on a miss. The lock is not held
/// while building, so builders may request other chronologies.
fn cached(key: ChronologyKey, build: impl FnOnce(ChronologyKey) -> Chronology) -> Chronology {
    if let Some(found) = CACHE.read().get(&key) {
        return found.clone();
    }
    let built = build(key.clone());
    let mut cache = CACHE.write();
    cache
        .entry(key)
        .or_insert_with(|| {
            debug!(chronology = %built, "caching chronology");
            built
        })
        .clone()
}

macro_rules! field_accessors {
    ($($name:ident => $variant:ident),* $(,)?) => {
        $(
            pub fn $name(&self) -> Arc<dyn DateTimeField> {
                self.0.fields().field(StandardField::$variant).clone()
            }
        )*
    };
}

macro_rules! duration_accessors {
    ($($name:ident => $variant:ident),* $(,)?) => {
        $(
            pub fn $name(&self) -> Arc<dyn DurationField> {
                self.0.fields().duration(StandardDuration::$variant).clone()
            }
        )*
    };
}

/// Shared handle to a calendar system in a zone.
///
/// Equality and hashing follow the [`ChronologyKey`].
#[derive(Clone)]
pub struct Chronology(Arc<dyn ChronologyImpl>);

impl Chronology {
    pub fn from_impl(inner: impl ChronologyImpl + 'static) -> Self {
        Chronology(Arc::new(inner))
    }

    /// ISO-8601 calendar in UTC.
    pub fn iso() -> Chronology {
        cached(ChronologyKey::Iso, calendars::iso)
    }

    pub fn iso_in(zone: &Zone) -> Chronology {
        Self::iso().with_zone(zone)
    }

    /// Proleptic Gregorian calendar in UTC.
    pub fn gregorian(week: WeekConfig) -> TimeResult<Chronology> {
        week.validate()?;
        Ok(Self::gregorian_validated(week))
    }

    pub(crate) fn gregorian_validated(week: WeekConfig) -> Chronology {
        let key = ChronologyKey::Gregorian { min_days: week.min_days_in_first_week };
        cached(key, |key| calendars::gregorian(key, week))
    }

    /// Proleptic Julian calendar in UTC. There is no year zero.
    pub fn julian(week: WeekConfig) -> TimeResult<Chronology> {
        week.validate()?;
        Ok(Self::julian_validated(week))
    }

    pub(crate) fn julian_validated(week: WeekConfig) -> Chronology {
        let key = ChronologyKey::Julian { min_days: week.min_days_in_first_week };
        cached(key, |key| calendars::julian(key, week))
    }

    /// Coptic calendar in UTC: thirteen months, a single era AM.
    pub fn coptic(week: WeekConfig) -> TimeResult<Chronology> {
        week.validate()?;
        let key = ChronologyKey::Coptic { min_days: week.min_days_in_first_week };
        Ok(cached(key, |key| calendars::coptic(key, week)))
    }

    /// Thai Buddhist calendar in UTC, over the default Gregorian/Julian cutover.
    pub fn buddhist() -> Chronology {
        cached(ChronologyKey::Buddhist, calendars::buddhist)
    }

    pub fn buddhist_in(zone: &Zone) -> Chronology {
        Self::buddhist().with_zone(zone)
    }

    /// Julian before the cutover, Gregorian from it on.
    pub fn gj(config: CutoverConfig) -> TimeResult<Chronology> {
        config.week.validate()?;
        cutover::validate_cutover(config.cutover_millis)?;
        Ok(Self::gj_validated(config))
    }

    pub fn gj_in(zone: &Zone, config: CutoverConfig) -> TimeResult<Chronology> {
        Ok(Self::gj(config)?.with_zone(zone))
    }

    pub(crate) fn gj_validated(config: CutoverConfig) -> Chronology {
        let key = ChronologyKey::GregorianJulian {
            cutover: config.cutover_millis,
            min_days: config.week.min_days_in_first_week,
        };
        cached(key, |key| cutover::build(key, config))
    }

    /// `base` with every field setter carrying out-of-range values.
    pub fn lenient(base: &Chronology) -> Chronology {
        let key = ChronologyKey::Lenient(Box::new(base.key().clone()));
        cached(key, |key| lenient::build_lenient(key, base.clone()))
    }

    /// `base` with every field setter checking the value's bounds first.
    pub fn strict(base: &Chronology) -> Chronology {
        let key = ChronologyKey::Strict(Box::new(base.key().clone()));
        cached(key, |key| lenient::build_strict(key, base.clone()))
    }

    /// Same calendar rules, viewed in `zone`.
    pub fn with_zone(&self, zone: &Zone) -> Chronology {
        if self.zone() == *zone {
            return self.clone();
        }
        let base = self.0.base().cloned();
        match (self.key(), base) {
            (ChronologyKey::Zoned { .. }, Some(base)) => base.with_zone(zone),
            (ChronologyKey::Lenient(_), Some(base)) => Chronology::lenient(&base.with_zone(zone)),
            (ChronologyKey::Strict(_), Some(base)) => Chronology::strict(&base.with_zone(zone)),
            _ if zone.is_utc() => self.clone(),
            _ => {
                let key = ChronologyKey::Zoned {
                    base: Box::new(self.key().clone()),
                    zone: zone.id().to_string(),
                };
                cached(key, |key| zoned::build(key, self.clone(), zone.clone()))
            }
        }
    }

    pub fn with_utc(&self) -> Chronology {
        self.with_zone(&Zone::utc())
    }

    pub fn key(&self) -> &ChronologyKey {
        self.0.key()
    }

    pub fn zone(&self) -> Zone {
        self.0.zone()
    }

    pub fn base(&self) -> Option<&Chronology> {
        self.0.base()
    }

    pub fn fields(&self) -> &FieldTable {
        self.0.fields()
    }

    /// Field for `ty`; custom types are always unsupported.
    pub fn field(&self, ty: &DateTimeFieldType) -> Arc<dyn DateTimeField> {
        match ty.standard() {
            Some(standard) => self.fields().field(standard).clone(),
            None => UnsupportedField::new(ty.clone(), self.duration(&ty.duration_type())),
        }
    }

    pub fn duration(&self, ty: &DurationFieldType) -> Arc<dyn DurationField> {
        match ty.standard() {
            Some(standard) => self.fields().duration(standard).clone(),
            None => UnsupportedDurationField::new(ty.clone()),
        }
    }

    field_accessors! {
        era => Era,
        year_of_era => YearOfEra,
        century_of_era => CenturyOfEra,
        year_of_century => YearOfCentury,
        year => Year,
        day_of_year => DayOfYear,
        month_of_year => MonthOfYear,
        day_of_month => DayOfMonth,
        weekyear_of_century => WeekyearOfCentury,
        weekyear => Weekyear,
        week_of_weekyear => WeekOfWeekyear,
        day_of_week => DayOfWeek,
        halfday_of_day => HalfdayOfDay,
        hour_of_halfday => HourOfHalfday,
        clockhour_of_halfday => ClockhourOfHalfday,
        clockhour_of_day => ClockhourOfDay,
        hour_of_day => HourOfDay,
        minute_of_day => MinuteOfDay,
        minute_of_hour => MinuteOfHour,
        second_of_day => SecondOfDay,
        second_of_minute => SecondOfMinute,
        millis_of_day => MillisOfDay,
        millis_of_second => MillisOfSecond,
    }

    duration_accessors! {
        eras => Eras,
        centuries => Centuries,
        weekyears => Weekyears,
        years => Years,
        months => Months,
        weeks => Weeks,
        days => Days,
        halfdays => Halfdays,
        hours => Hours,
        minutes => Minutes,
        seconds => Seconds,
        millis => Millis,
    }

    /// Instant of a date at `millis_of_day`, in this chronology's zone.
    pub fn date_time_millis(&self, year: i32, month: i32, day: i32, millis_of_day: i32) -> TimeResult<i64> {
        self.0.date_time_millis(year, month, day, millis_of_day)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn date_time_millis_hms(
        &self,
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        millis: i32,
    ) -> TimeResult<i64> {
        self.0.date_time_millis_hms(year, month, day, hour, minute, second, millis)
    }

    /// Check each value against its field's overall bounds, then against the
    /// bounds implied by the other values.
    pub fn validate(&self, partial: &dyn ReadablePartial, values: &[i32]) -> TimeResult<()> {
        if values.len() != partial.size() {
            return Err(TimeError::illegal_argument("Values array must be the same length as the types array"));
        }
        let fields: Vec<Arc<dyn DateTimeField>> = (0..partial.size()).map(|i| partial.field(i)).collect();
        for (field, &value) in fields.iter().zip(values) {
            if !field.is_supported() {
                return Err(TimeError::illegal_argument(format!("Field '{}' is not supported", field.name())));
            }
            if value < field.minimum_value() {
                return Err(IllegalFieldValue::new(field.name(), value as i64, Some(field.minimum_value() as i64), None).into());
            }
            if value > field.maximum_value() {
                return Err(IllegalFieldValue::new(field.name(), value as i64, None, Some(field.maximum_value() as i64)).into());
            }
        }
        for (field, &value) in fields.iter().zip(values) {
            let min = field.minimum_value_for(partial, values);
            if value < min {
                return Err(IllegalFieldValue::new(field.name(), value as i64, Some(min as i64), None).into());
            }
            let max = field.maximum_value_for(partial, values);
            if value > max {
                return Err(IllegalFieldValue::new(field.name(), value as i64, None, Some(max as i64)).into());
            }
            if field.skipped_value() == Some(value) {
                return Err(IllegalFieldValue::new(field.name(), value as i64, None, None).into());
            }
        }
        Ok(())
    }

    /// Values of the partial's field types at `instant`.
    pub fn get_values(&self, partial: &dyn ReadablePartial, instant: i64) -> TimeResult<Vec<i32>> {
        (0..partial.size())
            .map(|i| self.field(&partial.field_type(i)).get(instant))
            .collect()
    }

    /// Set each of the partial's values onto `instant`, in order.
    pub fn set_partial_fields(&self, partial: &dyn ReadablePartial, instant: i64) -> TimeResult<i64> {
        (0..partial.size()).try_fold(instant, |instant, i| {
            self.field(&partial.field_type(i)).set(instant, partial.value(i))
        })
    }
}

impl PartialEq for Chronology {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.key() == other.key()
    }
}

impl Eq for Chronology {}

impl Hash for Chronology {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Chronology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.key(), f)
    }
}

impl fmt::Debug for Chronology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Chronology({})", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_returns_same_handle() {
        let a = Chronology::iso();
        let b = Chronology::iso();
        assert!(Arc::ptr_eq(&a.0, &b.0));
        let g1 = Chronology::gregorian(WeekConfig::us()).unwrap();
        let g2 = Chronology::gregorian(WeekConfig::us()).unwrap();
        assert!(Arc::ptr_eq(&g1.0, &g2.0));
        assert_ne!(g1, Chronology::gregorian(WeekConfig::default()).unwrap());
    }

    #[test]
    fn test_display() {
        assert_eq!(Chronology::iso().to_string(), "ISOChronology[UTC]");
        assert_eq!(
            Chronology::gregorian(WeekConfig::us()).unwrap().to_string(),
            "GregorianChronology[UTC,mdfw=1]"
        );
        assert_eq!(Chronology::lenient(&Chronology::iso()).to_string(), "LenientChronology[ISOChronology[UTC]]");
        let plus_two = Zone::fixed(2 * 3_600_000).unwrap();
        assert_eq!(Chronology::iso_in(&plus_two).to_string(), "ISOChronology[+02:00]");
        assert_eq!(Chronology::gj(CutoverConfig::default()).unwrap().to_string(), "GJChronology[UTC]");
    }

    #[test]
    fn test_invalid_week_config() {
        let err = Chronology::julian(WeekConfig { min_days_in_first_week: 9 }).unwrap_err();
        assert!(err.is_illegal_argument());
    }

    #[test]
    fn test_with_zone_round_trip() {
        let zone = Zone::fixed(-5 * 3_600_000).unwrap();
        let zoned = Chronology::iso().with_zone(&zone);
        assert_eq!(zoned.zone(), zone);
        assert_eq!(zoned.with_utc(), Chronology::iso());
        assert_eq!(zoned.with_zone(&zone), zoned);
        let lenient = Chronology::lenient(&Chronology::iso()).with_zone(&zone);
        assert_eq!(lenient.zone(), zone);
        assert_eq!(lenient.base().map(|b| b.zone()), Some(zone));
    }

    #[test]
    fn test_custom_type_is_unsupported() {
        let ty = DateTimeFieldType::custom("fortnightOfYear", DurationFieldType::custom("fortnights"), Some(DurationFieldType::YEARS));
        let field = Chronology::iso().field(&ty);
        assert!(!field.is_supported());
        assert!(field.get(0).unwrap_err().is_illegal_argument());
    }

    #[test]
    fn test_unsupported_slots_filled() {
        let table = FieldTableBuilder::default().finish();
        assert!(!table.field(StandardField::Year).is_supported());
        assert!(!table.duration(StandardDuration::Days).is_supported());
    }

    #[test]
    fn test_concurrent_first_access_keeps_one_instance() {
        // A configuration no other test builds, so the threads race on a miss.
        let config = CutoverConfig { week: WeekConfig { min_days_in_first_week: 2 }, ..CutoverConfig::british() };
        let handles: Vec<Chronology> = std::thread::scope(|scope| {
            let workers: Vec<_> = (0..8).map(|_| scope.spawn(|| Chronology::gj(config).unwrap())).collect();
            workers.into_iter().map(|w| w.join().unwrap()).collect()
        });
        for handle in &handles {
            assert!(Arc::ptr_eq(&handles[0].0, &handle.0));
        }
        assert!(Arc::ptr_eq(&handles[0].0, &Chronology::gj(config).unwrap().0));
    }
}
