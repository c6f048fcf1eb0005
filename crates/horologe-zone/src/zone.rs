//! Zone handle and UTC/local conversions

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use horologe_core::constants::MILLIS_PER_HOUR;
use horologe_core::{TimeError, TimeResult};
use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::rules::{parse_offset, FixedOffsetZone, ZoneRules};

static UTC: Lazy<Zone> = Lazy::new(|| Zone::new(FixedOffsetZone::utc()));

static REGISTRY: Lazy<RwLock<HashMap<String, Zone>>> = Lazy::new(|| RwLock::new(HashMap::new()));

/// Shared handle to a set of zone rules.
///
/// Two zones are equal when their ids are equal.
#[derive(Clone)]
pub struct Zone(Arc<dyn ZoneRules>);

impl Zone {
    pub fn new(rules: impl ZoneRules + 'static) -> Self {
        Zone(Arc::new(rules))
    }

    pub fn from_rules(rules: Arc<dyn ZoneRules>) -> Self {
        Zone(rules)
    }

    pub fn utc() -> Self {
        UTC.clone()
    }

    pub fn fixed(offset_millis: i32) -> TimeResult<Self> {
        if offset_millis == 0 {
            return Ok(Self::utc());
        }
        Ok(Zone::new(FixedOffsetZone::new(offset_millis)?))
    }

    /// Make a zone resolvable through [`Zone::for_id`].
    pub fn register(zone: Zone) {
        tracing::debug!(zone = zone.id(), "registering zone");
        REGISTRY.write().insert(zone.id().to_string(), zone);
    }

    /// Resolve `UTC`, a `+HH:MM` offset or a registered id.
    pub fn for_id(id: &str) -> TimeResult<Self> {
        if id == "UTC" {
            return Ok(Self::utc());
        }
        if let Some(offset) = parse_offset(id) {
            return Self::fixed(offset);
        }
        REGISTRY
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| TimeError::illegal_argument(format!("The datetime zone id '{}' is not recognised", id)))
    }

    pub fn id(&self) -> &str {
        self.0.id()
    }

    pub fn rules(&self) -> &Arc<dyn ZoneRules> {
        &self.0
    }

    pub fn offset(&self, instant: i64) -> i32 {
        self.0.offset(instant)
    }

    pub fn standard_offset(&self, instant: i64) -> i32 {
        self.0.standard_offset(instant)
    }

    pub fn is_fixed(&self) -> bool {
        self.0.is_fixed()
    }

    pub fn is_utc(&self) -> bool {
        self.id() == "UTC"
    }

    pub fn is_standard_offset(&self, instant: i64) -> bool {
        self.offset(instant) == self.standard_offset(instant)
    }

    pub fn next_transition(&self, instant: i64) -> i64 {
        self.0.next_transition(instant)
    }

    pub fn previous_transition(&self, instant: i64) -> i64 {
        self.0.previous_transition(instant)
    }

    /// UTC instant to local millis.
    pub fn convert_utc_to_local(&self, instant: i64) -> TimeResult<i64> {
        let offset = self.offset(instant) as i64;
        instant
            .checked_add(offset)
            .ok_or_else(|| TimeError::overflow("Adding time zone offset caused overflow"))
    }

    /// UTC instant to local millis, clamping at the representable range.
    pub fn convert_utc_to_local_saturating(&self, instant: i64) -> i64 {
        instant.saturating_add(self.offset(instant) as i64)
    }

    /// Offset to subtract from a local time to get the UTC instant.
    ///
    /// In an overlap this is the earlier (pre-transition) offset. In a gap it
    /// is the offset after the transition, so the result is pushed forward.
    pub fn offset_from_local(&self, local: i64) -> i32 {
        let offset_local = self.offset(local);
        let adjusted = local.saturating_sub(offset_local as i64);
        let offset_adjusted = self.offset(adjusted);
        if offset_local != offset_adjusted {
            if offset_local < offset_adjusted {
                let next_local = self.next_after_or_max(adjusted);
                let next_adjusted = self.next_after_or_max(local.saturating_sub(offset_adjusted as i64));
                if next_local != next_adjusted {
                    return offset_local;
                }
            }
        } else if offset_local >= 0 {
            let prev = self.previous_transition(adjusted);
            if prev < adjusted {
                let offset_prev = self.offset(prev);
                let diff = offset_prev as i64 - offset_local as i64;
                if adjusted - prev <= diff {
                    tracing::trace!(zone = self.id(), local, "overlap resolved to earlier offset");
                    return offset_prev;
                }
            }
        }
        offset_adjusted
    }

    /// Local millis to a UTC instant.
    ///
    /// Overlapping local times resolve to the earlier instant. With `strict`,
    /// a local time inside a gap fails with IllegalArgument; otherwise it is
    /// pushed forward by the gap length.
    pub fn convert_local_to_utc(&self, local: i64, strict: bool) -> TimeResult<i64> {
        let offset = self.offset_from_local(local);
        let instant = local
            .checked_sub(offset as i64)
            .ok_or_else(|| TimeError::overflow("Subtracting time zone offset caused overflow"))?;
        if strict && self.offset(instant) != offset {
            return Err(self.gap_error(local));
        }
        Ok(instant)
    }

    /// Local millis to a UTC instant, preferring the offset of `original`
    /// when it is still valid for `local`.
    pub fn convert_local_to_utc_hinted(&self, local: i64, strict: bool, original: i64) -> TimeResult<i64> {
        let offset_original = self.offset(original);
        if let Some(instant) = local.checked_sub(offset_original as i64) {
            if self.offset(instant) == offset_original {
                return Ok(instant);
            }
        }
        self.convert_local_to_utc(local, strict)
    }

    /// Within an overlap, pick the earlier or later of the two instants that
    /// share the local time of `instant`. Outside an overlap returns `instant`.
    pub fn adjust_offset(&self, instant: i64, later: bool) -> i64 {
        let before = instant.saturating_sub(3 * MILLIS_PER_HOUR);
        let after = instant.saturating_add(3 * MILLIS_PER_HOUR);
        let offset_before = self.offset(before) as i64;
        let offset_after = self.offset(after) as i64;
        if offset_before <= offset_after {
            return instant;
        }
        let diff = offset_before - offset_after;
        let transition = self.next_transition(before);
        let overlap_start = transition - diff;
        let overlap_end = transition + diff;
        if instant < overlap_start || instant >= overlap_end {
            return instant;
        }
        if instant - overlap_start >= diff {
            if later {
                instant
            } else {
                instant - diff
            }
        } else if later {
            instant + diff
        } else {
            instant
        }
    }

    fn next_after_or_max(&self, instant: i64) -> i64 {
        let next = self.next_transition(instant);
        if next == instant {
            i64::MAX
        } else {
            next
        }
    }

    /// Description of a local time that falls in a gap of this zone.
    pub fn gap_message(&self, local: i64) -> String {
        format!(
            "Illegal instant due to time zone offset transition (daylight savings time 'gap'): {} ({})",
            format_local(local),
            self.id()
        )
    }

    pub(crate) fn gap_error(&self, local: i64) -> TimeError {
        TimeError::illegal_argument(self.gap_message(local))
    }
}

/// Render local millis as `yyyy-MM-ddTHH:mm:ss.SSS` on the proleptic Gregorian calendar.
pub fn format_local(local: i64) -> String {
    let days = local.div_euclid(86_400_000);
    let ms = local.rem_euclid(86_400_000);
    let (y, m, d) = civil_from_days(days);
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}",
        y,
        m,
        d,
        ms / 3_600_000,
        ms / 60_000 % 60,
        ms / 1_000 % 60,
        ms % 1_000
    )
}

fn civil_from_days(days: i64) -> (i64, i64, i64) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = yoe + era * 400 + i64::from(m <= 2);
    (y, m, d)
}

impl PartialEq for Zone {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Zone {}

impl Hash for Zone {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Debug for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Zone").field(&self.id()).finish()
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::PrecalculatedZone;
    use proptest::prelude::*;

    const SPRING_2011: i64 = 1_301_187_600_000;
    const AUTUMN_2011: i64 = 1_319_936_400_000;
    const HOUR: i64 = 3_600_000;

    fn paris() -> Zone {
        Zone::new(
            PrecalculatedZone::alternating("Europe/Paris", HOUR as i32, HOUR as i32, &[SPRING_2011, AUTUMN_2011])
                .unwrap(),
        )
    }

    #[test]
    fn test_fixed_round_trip() {
        let zone = Zone::fixed(-5 * HOUR as i32).unwrap();
        let local = zone.convert_utc_to_local(1_000).unwrap();
        assert_eq!(local, 1_000 - 5 * HOUR);
        assert_eq!(zone.convert_local_to_utc(local, true).unwrap(), 1_000);
    }

    #[test]
    fn test_gap_strict_fails_lenient_shifts() {
        let zone = paris();
        // 02:30 local on the spring-forward day does not exist
        let local = SPRING_2011 + HOUR + HOUR / 2;
        let err = zone.convert_local_to_utc(local, true).unwrap_err();
        assert!(err.is_illegal_argument());
        assert!(err.to_string().contains("2011-03-27T02:30:00.000"));
        let shifted = zone.convert_local_to_utc(local, false).unwrap();
        assert_eq!(zone.convert_utc_to_local(shifted).unwrap(), local + HOUR);
    }

    #[test]
    fn test_overlap_resolves_to_earlier_instant() {
        let zone = paris();
        // 02:30 local on the fall-back day happens twice
        let local = AUTUMN_2011 + HOUR + HOUR / 2;
        let utc = zone.convert_local_to_utc(local, true).unwrap();
        assert_eq!(utc, AUTUMN_2011 - HOUR / 2);
        assert_eq!(zone.offset_from_local(local), 2 * HOUR as i32);
    }

    #[test]
    fn test_hint_keeps_later_offset_in_overlap() {
        let zone = paris();
        let later = AUTUMN_2011 + HOUR / 2;
        let local = zone.convert_utc_to_local(later).unwrap();
        assert_eq!(zone.convert_local_to_utc_hinted(local, false, later).unwrap(), later);
    }

    #[test]
    fn test_adjust_offset() {
        let zone = paris();
        let earlier = AUTUMN_2011 - HOUR / 2;
        let later = AUTUMN_2011 + HOUR / 2;
        assert_eq!(zone.adjust_offset(earlier, true), later);
        assert_eq!(zone.adjust_offset(later, false), earlier);
        assert_eq!(zone.adjust_offset(0, true), 0);
    }

    #[test]
    fn test_for_id() {
        assert!(Zone::for_id("UTC").unwrap().is_utc());
        assert_eq!(Zone::for_id("+02:00").unwrap().offset(0), 2 * HOUR as i32);
        assert!(Zone::for_id("Nowhere/Special").is_err());
        Zone::register(paris());
        assert_eq!(Zone::for_id("Europe/Paris").unwrap(), paris());
    }

    #[test]
    fn test_local_overflow() {
        let zone = Zone::fixed(HOUR as i32).unwrap();
        assert!(zone.convert_utc_to_local(i64::MAX).unwrap_err().is_overflow());
        assert_eq!(zone.convert_utc_to_local_saturating(i64::MAX), i64::MAX);
    }

    #[test]
    fn test_format_local() {
        assert_eq!(format_local(0), "1970-01-01T00:00:00.000");
        assert_eq!(format_local(-1), "1969-12-31T23:59:59.999");
        assert_eq!(format_local(951_782_400_000), "2000-02-29T00:00:00.000");
    }

    proptest! {
        #[test]
        fn fixed_zone_round_trips(offset in -86_399_999i32..86_399_999, instant in -1_000_000_000_000_000i64..1_000_000_000_000_000) {
            let zone = Zone::fixed(offset).unwrap();
            let local = zone.convert_utc_to_local(instant).unwrap();
            prop_assert_eq!(zone.convert_local_to_utc(local, true).unwrap(), instant);
        }

        #[test]
        fn non_gap_local_times_round_trip(instant in 1_290_000_000_000i64..1_330_000_000_000) {
            let zone = paris();
            let local = zone.convert_utc_to_local(instant).unwrap();
            let back = zone.convert_local_to_utc(local, true).unwrap();
            prop_assert_eq!(zone.convert_utc_to_local(back).unwrap(), local);
        }
    }
}
