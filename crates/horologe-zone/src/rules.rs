//! Zone rule providers

use std::fmt;

use horologe_core::constants::{MILLIS_PER_DAY, MILLIS_PER_HOUR, MILLIS_PER_MINUTE, MILLIS_PER_SECOND};
use horologe_core::{TimeError, TimeResult};

/// Offset rules of one time zone.
///
/// Offsets are in milliseconds and are added to a UTC instant to obtain local
/// time. Transition queries return the queried instant itself when the zone
/// has no further transition in that direction.
pub trait ZoneRules: Send + Sync + fmt::Debug {
    /// Stable identifier, e.g. `UTC`, `+05:30` or `Europe/Paris`.
    fn id(&self) -> &str;

    /// Offset in force at `instant`.
    fn offset(&self, instant: i64) -> i32;

    /// Offset excluding daylight saving at `instant`.
    fn standard_offset(&self, instant: i64) -> i32 {
        self.offset(instant)
    }

    fn is_fixed(&self) -> bool;

    /// First transition strictly after `instant`.
    fn next_transition(&self, instant: i64) -> i64;

    /// The millisecond before the latest transition at or before `instant`.
    fn previous_transition(&self, instant: i64) -> i64;
}

const MAX_OFFSET: i32 = (MILLIS_PER_DAY - 1) as i32;

fn check_offset(offset: i32) -> TimeResult<()> {
    if !(-MAX_OFFSET..=MAX_OFFSET).contains(&offset) {
        return Err(TimeError::illegal_argument(format!("Offset is too large: {}", offset)));
    }
    Ok(())
}

/// Format an offset as `+HH:MM`, adding seconds and millis only when non-zero.
pub fn format_offset(offset: i32) -> String {
    let sign = if offset < 0 { '-' } else { '+' };
    let abs = (offset as i64).abs();
    let hours = abs / MILLIS_PER_HOUR;
    let minutes = abs % MILLIS_PER_HOUR / MILLIS_PER_MINUTE;
    let seconds = abs % MILLIS_PER_MINUTE / MILLIS_PER_SECOND;
    let millis = abs % MILLIS_PER_SECOND;
    let mut out = format!("{}{:02}:{:02}", sign, hours, minutes);
    if seconds != 0 || millis != 0 {
        out.push_str(&format!(":{:02}", seconds));
        if millis != 0 {
            out.push_str(&format!(".{:03}", millis));
        }
    }
    out
}

/// Parse `+HH:MM[:SS[.mmm]]` into an offset.
pub fn parse_offset(text: &str) -> Option<i32> {
    let (sign, rest) = match text.as_bytes().first()? {
        b'+' => (1i64, &text[1..]),
        b'-' => (-1i64, &text[1..]),
        _ => return None,
    };
    let (hms, millis) = match rest.split_once('.') {
        Some((hms, ms)) if ms.len() == 3 => (hms, ms.parse::<i64>().ok()?),
        Some(_) => return None,
        None => (rest, 0),
    };
    let mut parts = hms.split(':');
    let hours: i64 = parts.next()?.parse().ok()?;
    let minutes: i64 = parts.next().map_or(Some(0), |m| m.parse().ok())?;
    let seconds: i64 = parts.next().map_or(Some(0), |s| s.parse().ok())?;
    if parts.next().is_some() || hours > 23 || minutes > 59 || seconds > 59 {
        return None;
    }
    let total = hours * MILLIS_PER_HOUR + minutes * MILLIS_PER_MINUTE + seconds * MILLIS_PER_SECOND + millis;
    Some((sign * total) as i32)
}

/// A zone whose offset never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedOffsetZone {
    id: String,
    offset: i32,
}

impl FixedOffsetZone {
    pub fn new(offset: i32) -> TimeResult<Self> {
        check_offset(offset)?;
        let id = if offset == 0 { "UTC".to_string() } else { format_offset(offset) };
        Ok(FixedOffsetZone { id, offset })
    }

    pub fn utc() -> Self {
        FixedOffsetZone { id: "UTC".to_string(), offset: 0 }
    }
}

impl ZoneRules for FixedOffsetZone {
    fn id(&self) -> &str {
        &self.id
    }

    fn offset(&self, _instant: i64) -> i32 {
        self.offset
    }

    fn is_fixed(&self) -> bool {
        true
    }

    fn next_transition(&self, instant: i64) -> i64 {
        instant
    }

    fn previous_transition(&self, instant: i64) -> i64 {
        instant
    }
}

/// One offset change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// First instant governed by the new offset
    pub instant: i64,
    pub offset: i32,
    pub standard_offset: i32,
}

impl Transition {
    pub fn new(instant: i64, offset: i32, standard_offset: i32) -> Self {
        Transition { instant, offset, standard_offset }
    }
}

/// A zone described by an explicit, ascending transition table.
#[derive(Debug, Clone)]
pub struct PrecalculatedZone {
    id: String,
    initial_offset: i32,
    initial_standard: i32,
    transitions: Vec<Transition>,
}

impl PrecalculatedZone {
    /// Build a zone whose offset before the first transition is `initial_offset`.
    pub fn new(id: impl Into<String>, initial_offset: i32, transitions: Vec<Transition>) -> TimeResult<Self> {
        let id = id.into();
        check_offset(initial_offset)?;
        for t in &transitions {
            check_offset(t.offset)?;
            check_offset(t.standard_offset)?;
        }
        if transitions.windows(2).any(|w| w[0].instant >= w[1].instant) {
            return Err(TimeError::illegal_argument(format!(
                "Transitions of zone {} are not strictly ascending",
                id
            )));
        }
        Ok(PrecalculatedZone {
            id,
            initial_offset,
            initial_standard: initial_offset,
            transitions,
        })
    }

    /// Build a zone alternating between `standard` and `standard + saving`,
    /// starting in standard time. `changes` lists the instants of each switch.
    pub fn alternating(
        id: impl Into<String>,
        standard: i32,
        saving: i32,
        changes: &[i64],
    ) -> TimeResult<Self> {
        let transitions = changes
            .iter()
            .enumerate()
            .map(|(i, &at)| {
                let offset = if i % 2 == 0 { standard + saving } else { standard };
                Transition::new(at, offset, standard)
            })
            .collect();
        Self::new(id, standard, transitions)
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    fn in_force(&self, instant: i64) -> Option<&Transition> {
        let idx = self.transitions.partition_point(|t| t.instant <= instant);
        idx.checked_sub(1).map(|i| &self.transitions[i])
    }
}

impl ZoneRules for PrecalculatedZone {
    fn id(&self) -> &str {
        &self.id
    }

    fn offset(&self, instant: i64) -> i32 {
        self.in_force(instant).map_or(self.initial_offset, |t| t.offset)
    }

    fn standard_offset(&self, instant: i64) -> i32 {
        self.in_force(instant).map_or(self.initial_standard, |t| t.standard_offset)
    }

    fn is_fixed(&self) -> bool {
        self.transitions.is_empty()
    }

    fn next_transition(&self, instant: i64) -> i64 {
        let idx = self.transitions.partition_point(|t| t.instant <= instant);
        self.transitions.get(idx).map_or(instant, |t| t.instant)
    }

    fn previous_transition(&self, instant: i64) -> i64 {
        match self.in_force(instant) {
            Some(t) => t.instant.saturating_sub(1),
            None => instant,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPRING_2011: i64 = 1_301_187_600_000;
    const AUTUMN_2011: i64 = 1_319_936_400_000;

    fn paris() -> PrecalculatedZone {
        PrecalculatedZone::alternating("Europe/Paris", 3_600_000, 3_600_000, &[SPRING_2011, AUTUMN_2011]).unwrap()
    }

    #[test]
    fn test_fixed_offset_ids() {
        assert_eq!(FixedOffsetZone::new(0).unwrap().id(), "UTC");
        assert_eq!(FixedOffsetZone::new(19_800_000).unwrap().id(), "+05:30");
        assert_eq!(FixedOffsetZone::new(-3_600_000).unwrap().id(), "-01:00");
        assert_eq!(FixedOffsetZone::new(3_661_001).unwrap().id(), "+01:01:01.001");
        assert!(FixedOffsetZone::new(MILLIS_PER_DAY as i32).is_err());
    }

    #[test]
    fn test_parse_offset() {
        assert_eq!(parse_offset("+05:30"), Some(19_800_000));
        assert_eq!(parse_offset("-01:00"), Some(-3_600_000));
        assert_eq!(parse_offset("+01:01:01.001"), Some(3_661_001));
        assert_eq!(parse_offset("05:30"), None);
        assert_eq!(parse_offset("+24:00"), None);
    }

    #[test]
    fn test_precalculated_offsets() {
        let zone = paris();
        assert_eq!(zone.offset(SPRING_2011 - 1), 3_600_000);
        assert_eq!(zone.offset(SPRING_2011), 7_200_000);
        assert_eq!(zone.standard_offset(SPRING_2011), 3_600_000);
        assert_eq!(zone.offset(AUTUMN_2011), 3_600_000);
        assert!(!zone.is_fixed());
    }

    #[test]
    fn test_transition_queries() {
        let zone = paris();
        assert_eq!(zone.next_transition(0), SPRING_2011);
        assert_eq!(zone.next_transition(SPRING_2011), AUTUMN_2011);
        assert_eq!(zone.next_transition(AUTUMN_2011), AUTUMN_2011);
        assert_eq!(zone.previous_transition(AUTUMN_2011 + 5), AUTUMN_2011 - 1);
        assert_eq!(zone.previous_transition(0), 0);
    }

    #[test]
    fn test_rejects_unordered_transitions() {
        let result = PrecalculatedZone::alternating("Bad/Zone", 0, 3_600_000, &[10, 10]);
        assert!(result.unwrap_err().is_illegal_argument());
    }
}
