//! Shared fixtures for the horologe benchmarks

use horologe_chrono::{Chronology, CutoverConfig};
use horologe_core::constants::MILLIS_PER_HOUR;
use horologe_core::TimeResult;
use horologe_zone::{PrecalculatedZone, Zone};

/// 2011-03-27T01:00Z and 2011-10-30T01:00Z.
pub const SPRING_2011: i64 = 1_301_187_600_000;
pub const AUTUMN_2011: i64 = 1_319_936_400_000;

/// 2004-06-09T12:30:00Z.
pub const SAMPLE_INSTANT: i64 = 1_086_784_200_000;

/// A one-year Central European zone with a single DST period.
pub fn paris() -> TimeResult<Zone> {
    let rules = PrecalculatedZone::alternating(
        "Europe/Paris",
        MILLIS_PER_HOUR as i32,
        MILLIS_PER_HOUR as i32,
        &[SPRING_2011, AUTUMN_2011],
    )?;
    Ok(Zone::new(rules))
}

/// Every calendar system, by display name.
pub fn all_chronologies() -> TimeResult<Vec<(String, Chronology)>> {
    let chronologies = vec![
        Chronology::iso(),
        Chronology::buddhist(),
        Chronology::gj(CutoverConfig::default())?,
        Chronology::iso_in(&paris()?),
        Chronology::lenient(&Chronology::iso()),
    ];
    Ok(chronologies.into_iter().map(|c| (c.to_string(), c)).collect())
}
