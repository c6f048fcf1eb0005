//! Date-time field identifiers
//!
//! Each field type names one calendar quantity, carries the unit it is
//! measured in and, optionally, the unit that bounds it (dayOfMonth is
//! measured in days and ranges over a month).

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::duration_type::{DurationFieldType, StandardDuration};

/// The twenty-three standard field types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum StandardField {
    Era = 1,
    YearOfEra = 2,
    CenturyOfEra = 3,
    YearOfCentury = 4,
    Year = 5,
    DayOfYear = 6,
    MonthOfYear = 7,
    DayOfMonth = 8,
    WeekyearOfCentury = 9,
    Weekyear = 10,
    WeekOfWeekyear = 11,
    DayOfWeek = 12,
    HalfdayOfDay = 13,
    HourOfHalfday = 14,
    ClockhourOfHalfday = 15,
    ClockhourOfDay = 16,
    HourOfDay = 17,
    MinuteOfDay = 18,
    MinuteOfHour = 19,
    SecondOfDay = 20,
    SecondOfMinute = 21,
    MillisOfDay = 22,
    MillisOfSecond = 23,
}

impl StandardField {
    pub fn name(&self) -> &'static str {
        use StandardField::*;
        match self {
            Era => "era",
            YearOfEra => "yearOfEra",
            CenturyOfEra => "centuryOfEra",
            YearOfCentury => "yearOfCentury",
            Year => "year",
            DayOfYear => "dayOfYear",
            MonthOfYear => "monthOfYear",
            DayOfMonth => "dayOfMonth",
            WeekyearOfCentury => "weekyearOfCentury",
            Weekyear => "weekyear",
            WeekOfWeekyear => "weekOfWeekyear",
            DayOfWeek => "dayOfWeek",
            HalfdayOfDay => "halfdayOfDay",
            HourOfHalfday => "hourOfHalfday",
            ClockhourOfHalfday => "clockhourOfHalfday",
            ClockhourOfDay => "clockhourOfDay",
            HourOfDay => "hourOfDay",
            MinuteOfDay => "minuteOfDay",
            MinuteOfHour => "minuteOfHour",
            SecondOfDay => "secondOfDay",
            SecondOfMinute => "secondOfMinute",
            MillisOfDay => "millisOfDay",
            MillisOfSecond => "millisOfSecond",
        }
    }

    /// Unit the field is measured in.
    pub fn duration(&self) -> StandardDuration {
        use StandardDuration as D;
        use StandardField::*;
        match self {
            Era => D::Eras,
            YearOfEra | YearOfCentury | Year => D::Years,
            CenturyOfEra => D::Centuries,
            DayOfYear | DayOfMonth | DayOfWeek => D::Days,
            MonthOfYear => D::Months,
            WeekyearOfCentury | Weekyear => D::Weekyears,
            WeekOfWeekyear => D::Weeks,
            HalfdayOfDay => D::Halfdays,
            HourOfHalfday | ClockhourOfHalfday | ClockhourOfDay | HourOfDay => D::Hours,
            MinuteOfDay | MinuteOfHour => D::Minutes,
            SecondOfDay | SecondOfMinute => D::Seconds,
            MillisOfDay | MillisOfSecond => D::Millis,
        }
    }

    /// Unit bounding the field, `None` for unbounded fields (era, year, weekyear).
    pub fn range(&self) -> Option<StandardDuration> {
        use StandardDuration as D;
        use StandardField::*;
        match self {
            Era | Year | Weekyear => None,
            YearOfEra | CenturyOfEra => Some(D::Eras),
            YearOfCentury | WeekyearOfCentury => Some(D::Centuries),
            DayOfYear | MonthOfYear => Some(D::Years),
            DayOfMonth => Some(D::Months),
            WeekOfWeekyear => Some(D::Weekyears),
            DayOfWeek => Some(D::Weeks),
            HalfdayOfDay | ClockhourOfDay | HourOfDay | MinuteOfDay | SecondOfDay | MillisOfDay => {
                Some(D::Days)
            }
            HourOfHalfday | ClockhourOfHalfday => Some(D::Halfdays),
            MinuteOfHour => Some(D::Hours),
            SecondOfMinute => Some(D::Minutes),
            MillisOfSecond => Some(D::Seconds),
        }
    }

    pub fn all() -> &'static [StandardField] {
        use StandardField::*;
        &[
            Era,
            YearOfEra,
            CenturyOfEra,
            YearOfCentury,
            Year,
            DayOfYear,
            MonthOfYear,
            DayOfMonth,
            WeekyearOfCentury,
            Weekyear,
            WeekOfWeekyear,
            DayOfWeek,
            HalfdayOfDay,
            HourOfHalfday,
            ClockhourOfHalfday,
            ClockhourOfDay,
            HourOfDay,
            MinuteOfDay,
            MinuteOfHour,
            SecondOfDay,
            SecondOfMinute,
            MillisOfDay,
            MillisOfSecond,
        ]
    }
}

static REGISTRY: Lazy<HashMap<&'static str, StandardField>> = Lazy::new(|| {
    StandardField::all()
        .iter()
        .map(|f| (f.name(), *f))
        .collect()
});

/// A field type outside the standard set. No built-in chronology supports it.
#[derive(Debug)]
pub struct CustomFieldType {
    name: String,
    duration: DurationFieldType,
    range: Option<DurationFieldType>,
}

/// Identifier of a calendar quantity.
#[derive(Clone, Debug)]
pub enum DateTimeFieldType {
    Standard(StandardField),
    Custom(Arc<CustomFieldType>),
}

macro_rules! standard_field_consts {
    ($($name:ident => $variant:ident),* $(,)?) => {
        impl DateTimeFieldType {
            $(pub const $name: DateTimeFieldType = DateTimeFieldType::Standard(StandardField::$variant);)*
        }
    };
}

standard_field_consts! {
    ERA => Era,
    YEAR_OF_ERA => YearOfEra,
    CENTURY_OF_ERA => CenturyOfEra,
    YEAR_OF_CENTURY => YearOfCentury,
    YEAR => Year,
    DAY_OF_YEAR => DayOfYear,
    MONTH_OF_YEAR => MonthOfYear,
    DAY_OF_MONTH => DayOfMonth,
    WEEKYEAR_OF_CENTURY => WeekyearOfCentury,
    WEEKYEAR => Weekyear,
    WEEK_OF_WEEKYEAR => WeekOfWeekyear,
    DAY_OF_WEEK => DayOfWeek,
    HALFDAY_OF_DAY => HalfdayOfDay,
    HOUR_OF_HALFDAY => HourOfHalfday,
    CLOCKHOUR_OF_HALFDAY => ClockhourOfHalfday,
    CLOCKHOUR_OF_DAY => ClockhourOfDay,
    HOUR_OF_DAY => HourOfDay,
    MINUTE_OF_DAY => MinuteOfDay,
    MINUTE_OF_HOUR => MinuteOfHour,
    SECOND_OF_DAY => SecondOfDay,
    SECOND_OF_MINUTE => SecondOfMinute,
    MILLIS_OF_DAY => MillisOfDay,
    MILLIS_OF_SECOND => MillisOfSecond,
}

impl DateTimeFieldType {
    /// Create a custom field type. It is never equal to a standard type.
    pub fn custom(
        name: impl Into<String>,
        duration: DurationFieldType,
        range: Option<DurationFieldType>,
    ) -> Self {
        DateTimeFieldType::Custom(Arc::new(CustomFieldType {
            name: name.into(),
            duration,
            range,
        }))
    }

    /// Look up a standard field type by name.
    pub fn from_name(name: &str) -> Option<Self> {
        REGISTRY.get(name).map(|f| DateTimeFieldType::Standard(*f))
    }

    pub fn name(&self) -> &str {
        match self {
            DateTimeFieldType::Standard(f) => f.name(),
            DateTimeFieldType::Custom(c) => &c.name,
        }
    }

    pub fn duration_type(&self) -> DurationFieldType {
        match self {
            DateTimeFieldType::Standard(f) => DurationFieldType::Standard(f.duration()),
            DateTimeFieldType::Custom(c) => c.duration.clone(),
        }
    }

    pub fn range_duration_type(&self) -> Option<DurationFieldType> {
        match self {
            DateTimeFieldType::Standard(f) => f.range().map(DurationFieldType::Standard),
            DateTimeFieldType::Custom(c) => c.range.clone(),
        }
    }

    pub fn standard(&self) -> Option<StandardField> {
        match self {
            DateTimeFieldType::Standard(f) => Some(*f),
            DateTimeFieldType::Custom(_) => None,
        }
    }

    pub fn is_standard(&self) -> bool {
        self.standard().is_some()
    }
}

impl PartialEq for DateTimeFieldType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (DateTimeFieldType::Standard(a), DateTimeFieldType::Standard(b)) => a == b,
            (DateTimeFieldType::Custom(a), DateTimeFieldType::Custom(b)) => a.name == b.name,
            _ => false,
        }
    }
}

impl Eq for DateTimeFieldType {}

impl Hash for DateTimeFieldType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.is_standard().hash(state);
        self.name().hash(state);
    }
}

impl fmt::Display for DateTimeFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<StandardField> for DateTimeFieldType {
    fn from(value: StandardField) -> Self {
        DateTimeFieldType::Standard(value)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum FieldRepr {
    Named(String),
    Custom {
        name: String,
        duration: DurationFieldType,
        #[serde(default)]
        range: Option<DurationFieldType>,
    },
}

impl Serialize for DateTimeFieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DateTimeFieldType::Standard(f) => FieldRepr::Named(f.name().to_string()),
            DateTimeFieldType::Custom(c) => FieldRepr::Custom {
                name: c.name.clone(),
                duration: c.duration.clone(),
                range: c.range.clone(),
            },
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DateTimeFieldType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match FieldRepr::deserialize(deserializer)? {
            FieldRepr::Named(name) => DateTimeFieldType::from_name(&name)
                .ok_or_else(|| serde::de::Error::custom(format!("unknown date-time field type: {}", name))),
            FieldRepr::Custom { name, duration, range } => {
                Ok(DateTimeFieldType::custom(name, duration, range))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_standard_name_resolves() {
        for f in StandardField::all() {
            let ty = DateTimeFieldType::from_name(f.name()).unwrap();
            assert_eq!(ty.standard(), Some(*f));
        }
        assert_eq!(StandardField::all().len(), 23);
    }

    #[test]
    fn test_units() {
        assert_eq!(DateTimeFieldType::DAY_OF_MONTH.duration_type(), DurationFieldType::DAYS);
        assert_eq!(DateTimeFieldType::DAY_OF_MONTH.range_duration_type(), Some(DurationFieldType::MONTHS));
        assert_eq!(DateTimeFieldType::YEAR.range_duration_type(), None);
        assert_eq!(
            DateTimeFieldType::CLOCKHOUR_OF_DAY.range_duration_type(),
            DateTimeFieldType::HOUR_OF_DAY.range_duration_type()
        );
    }

    #[test]
    fn test_serde_returns_standard_variant() {
        for f in StandardField::all() {
            let ty = DateTimeFieldType::Standard(*f);
            let json = serde_json::to_string(&ty).unwrap();
            let back: DateTimeFieldType = serde_json::from_str(&json).unwrap();
            assert_eq!(back.standard(), Some(*f));
        }
    }

    #[test]
    fn test_serde_custom_is_name_equal_only() {
        let custom = DateTimeFieldType::custom("sol", DurationFieldType::custom("sols"), None);
        let json = serde_json::to_string(&custom).unwrap();
        let back: DateTimeFieldType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, custom);
        assert!(!back.is_standard());

        // a custom type named like a standard one stays distinct
        let imposter: DateTimeFieldType =
            serde_json::from_str(r#"{"name":"year","duration":"years"}"#).unwrap();
        assert_ne!(imposter, DateTimeFieldType::YEAR);

        assert!(serde_json::from_str::<DateTimeFieldType>("\"fortnightOfYear\"").is_err());
    }
}
