//! Duration unit identifiers
//!
//! Standard units are enum variants, so a deserialized standard name is the
//! canonical value. Custom units are distinct instances equal only by name.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The twelve standard duration units, largest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum StandardDuration {
    Eras = 1,
    Centuries = 2,
    Weekyears = 3,
    Years = 4,
    Months = 5,
    Weeks = 6,
    Days = 7,
    Halfdays = 8,
    Hours = 9,
    Minutes = 10,
    Seconds = 11,
    Millis = 12,
}

impl StandardDuration {
    pub fn name(&self) -> &'static str {
        match self {
            StandardDuration::Eras => "eras",
            StandardDuration::Centuries => "centuries",
            StandardDuration::Weekyears => "weekyears",
            StandardDuration::Years => "years",
            StandardDuration::Months => "months",
            StandardDuration::Weeks => "weeks",
            StandardDuration::Days => "days",
            StandardDuration::Halfdays => "halfdays",
            StandardDuration::Hours => "hours",
            StandardDuration::Minutes => "minutes",
            StandardDuration::Seconds => "seconds",
            StandardDuration::Millis => "millis",
        }
    }

    pub fn all() -> &'static [StandardDuration] {
        &[
            StandardDuration::Eras,
            StandardDuration::Centuries,
            StandardDuration::Weekyears,
            StandardDuration::Years,
            StandardDuration::Months,
            StandardDuration::Weeks,
            StandardDuration::Days,
            StandardDuration::Halfdays,
            StandardDuration::Hours,
            StandardDuration::Minutes,
            StandardDuration::Seconds,
            StandardDuration::Millis,
        ]
    }
}

static REGISTRY: Lazy<HashMap<&'static str, StandardDuration>> = Lazy::new(|| {
    StandardDuration::all()
        .iter()
        .map(|d| (d.name(), *d))
        .collect()
});

/// A unit that is not one of the standard twelve.
#[derive(Debug)]
pub struct CustomDurationType {
    name: String,
}

/// Identifier of a duration unit.
#[derive(Clone, Debug)]
pub enum DurationFieldType {
    Standard(StandardDuration),
    Custom(Arc<CustomDurationType>),
}

impl DurationFieldType {
    pub const ERAS: DurationFieldType = DurationFieldType::Standard(StandardDuration::Eras);
    pub const CENTURIES: DurationFieldType = DurationFieldType::Standard(StandardDuration::Centuries);
    pub const WEEKYEARS: DurationFieldType = DurationFieldType::Standard(StandardDuration::Weekyears);
    pub const YEARS: DurationFieldType = DurationFieldType::Standard(StandardDuration::Years);
    pub const MONTHS: DurationFieldType = DurationFieldType::Standard(StandardDuration::Months);
    pub const WEEKS: DurationFieldType = DurationFieldType::Standard(StandardDuration::Weeks);
    pub const DAYS: DurationFieldType = DurationFieldType::Standard(StandardDuration::Days);
    pub const HALFDAYS: DurationFieldType = DurationFieldType::Standard(StandardDuration::Halfdays);
    pub const HOURS: DurationFieldType = DurationFieldType::Standard(StandardDuration::Hours);
    pub const MINUTES: DurationFieldType = DurationFieldType::Standard(StandardDuration::Minutes);
    pub const SECONDS: DurationFieldType = DurationFieldType::Standard(StandardDuration::Seconds);
    pub const MILLIS: DurationFieldType = DurationFieldType::Standard(StandardDuration::Millis);

    /// Create a custom unit. It is never equal to a standard unit.
    pub fn custom(name: impl Into<String>) -> Self {
        DurationFieldType::Custom(Arc::new(CustomDurationType { name: name.into() }))
    }

    /// Look up a standard unit by name.
    pub fn from_name(name: &str) -> Option<Self> {
        REGISTRY.get(name).map(|d| DurationFieldType::Standard(*d))
    }

    pub fn name(&self) -> &str {
        match self {
            DurationFieldType::Standard(d) => d.name(),
            DurationFieldType::Custom(c) => &c.name,
        }
    }

    pub fn standard(&self) -> Option<StandardDuration> {
        match self {
            DurationFieldType::Standard(d) => Some(*d),
            DurationFieldType::Custom(_) => None,
        }
    }

    pub fn is_standard(&self) -> bool {
        self.standard().is_some()
    }
}

impl PartialEq for DurationFieldType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (DurationFieldType::Standard(a), DurationFieldType::Standard(b)) => a == b,
            (DurationFieldType::Custom(a), DurationFieldType::Custom(b)) => a.name == b.name,
            _ => false,
        }
    }
}

impl Eq for DurationFieldType {}

impl Hash for DurationFieldType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.is_standard().hash(state);
        self.name().hash(state);
    }
}

impl fmt::Display for DurationFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum DurationRepr {
    Named(String),
    Custom { name: String },
}

impl Serialize for DurationFieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DurationFieldType::Standard(d) => DurationRepr::Named(d.name().to_string()),
            DurationFieldType::Custom(c) => DurationRepr::Custom { name: c.name.clone() },
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DurationFieldType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match DurationRepr::deserialize(deserializer)? {
            DurationRepr::Named(name) => DurationFieldType::from_name(&name)
                .ok_or_else(|| serde::de::Error::custom(format!("unknown duration field type: {}", name))),
            DurationRepr::Custom { name } => Ok(DurationFieldType::custom(name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup() {
        for d in StandardDuration::all() {
            assert_eq!(DurationFieldType::from_name(d.name()), Some(DurationFieldType::Standard(*d)));
        }
        assert_eq!(DurationFieldType::from_name("fortnights"), None);
    }

    #[test]
    fn test_custom_is_distinct_from_standard() {
        let custom = DurationFieldType::custom("days");
        assert_ne!(custom, DurationFieldType::DAYS);
        assert_eq!(custom, DurationFieldType::custom("days"));
        assert!(!custom.is_standard());
    }

    #[test]
    fn test_serde_identity() {
        let json = serde_json::to_string(&DurationFieldType::MONTHS).unwrap();
        assert_eq!(json, "\"months\"");
        let back: DurationFieldType = serde_json::from_str(&json).unwrap();
        assert_eq!(back.standard(), Some(StandardDuration::Months));

        let custom = DurationFieldType::custom("sols");
        let json = serde_json::to_string(&custom).unwrap();
        let back: DurationFieldType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, custom);
        assert!(!back.is_standard());

        assert!(serde_json::from_str::<DurationFieldType>("\"sols\"").is_err());
    }
}
