//! End-to-end behavior across calendars and wrappers

use horologe_chrono::{
    is_contiguous, Chronology, CutoverConfig, DateTime, DateTimeField, FieldSet, WeekConfig, BUDDHIST_OFFSET,
};
use horologe_core::constants::MILLIS_PER_HOUR;
use horologe_core::{DateTimeFieldType, DurationFieldType};
use horologe_zone::{PrecalculatedZone, Zone};

fn iso(y: i32, m: i32, d: i32) -> DateTime {
    DateTime::from_fields(Chronology::iso(), y, m, d, 0, 0, 0, 0).unwrap()
}

fn ymd(dt: &DateTime) -> (i32, i32, i32) {
    (dt.year().unwrap(), dt.month_of_year().unwrap(), dt.day_of_month().unwrap())
}

#[test]
fn test_day_of_month_with_maximum() {
    let dt = iso(2004, 6, 9);
    let max = dt.property(&DateTimeFieldType::DAY_OF_MONTH).unwrap().with_maximum_value().unwrap();
    assert_eq!(ymd(&max), (2004, 6, 30));
}

#[test]
fn test_month_add_clamps_to_leap_day() {
    let dt = iso(1972, 1, 31);
    let next = dt.property(&DateTimeFieldType::MONTH_OF_YEAR).unwrap().add_to_copy(1).unwrap();
    assert_eq!(ymd(&next), (1972, 2, 29));
}

#[test]
fn test_cutover_gap_days_rejected() {
    let gj = Chronology::gj(CutoverConfig::default()).unwrap();
    for start_day in [1, 20] {
        let dt = DateTime::from_fields(gj.clone(), 1582, 10, start_day, 0, 0, 0, 0).unwrap();
        for day in 5..=14 {
            let err = dt.with_field(&DateTimeFieldType::DAY_OF_MONTH, day).unwrap_err();
            assert!(err.is_illegal_field_value(), "day {} from {}", day, start_day);
        }
        assert_eq!(dt.with_field(&DateTimeFieldType::DAY_OF_MONTH, 4).unwrap().day_of_month().unwrap(), 4);
        assert_eq!(dt.with_field(&DateTimeFieldType::DAY_OF_MONTH, 15).unwrap().day_of_month().unwrap(), 15);
    }
}

#[test]
fn test_maximum_instant() {
    let max = DateTime::new(i64::MAX, Chronology::iso());
    assert_eq!(ymd(&max), (292_278_994, 8, 17));
    let err = max.with_field_added(&DurationFieldType::MILLIS, 1).unwrap_err();
    assert!(err.is_overflow());
    let err = max.property(&DateTimeFieldType::MILLIS_OF_SECOND).unwrap().add_to_copy(1).unwrap_err();
    assert!(err.is_overflow());
}

#[test]
fn test_contiguity() {
    let iso = Chronology::iso();
    let gapped = [DateTimeFieldType::YEAR, DateTimeFieldType::DAY_OF_MONTH];
    assert!(!is_contiguous(&FieldSet { chronology: &iso, types: &gapped, values: &[2004, 9] }));
    let full = [DateTimeFieldType::YEAR, DateTimeFieldType::MONTH_OF_YEAR, DateTimeFieldType::DAY_OF_MONTH];
    assert!(is_contiguous(&FieldSet { chronology: &iso, types: &full, values: &[2004, 6, 9] }));
}

#[test]
fn test_lenient_and_strict_month_13() {
    let base = iso(2004, 6, 9);
    let lenient = base.with_chronology(Chronology::lenient(&Chronology::iso()));
    let carried = lenient.with_field(&DateTimeFieldType::MONTH_OF_YEAR, 13).unwrap();
    assert_eq!(ymd(&carried), (2005, 1, 9));
    let strict = base.with_chronology(Chronology::strict(&Chronology::iso()));
    let err = strict.with_field(&DateTimeFieldType::MONTH_OF_YEAR, 13).unwrap_err();
    assert!(err.is_illegal_field_value());
    assert_ne!(Chronology::lenient(&Chronology::iso()), Chronology::strict(&Chronology::iso()));
}

#[test]
fn test_no_year_zero_in_julian_and_coptic() {
    let julian = Chronology::julian(WeekConfig::default()).unwrap();
    let coptic = Chronology::coptic(WeekConfig::default()).unwrap();
    for chrono in [julian, coptic] {
        assert!(chrono.year().set(0, 0).unwrap_err().is_illegal_field_value());
        assert!(chrono.date_time_millis(0, 1, 1, 0).is_err());
        let before_one = chrono.date_time_millis(-1, 1, 1, 0).unwrap();
        assert_eq!(chrono.year().get(before_one).unwrap(), -1);
    }
    assert!(Chronology::iso().date_time_millis(0, 1, 1, 0).is_ok());
}

#[test]
fn test_buddhist_offsets_gregorian_year() {
    let buddhist = Chronology::buddhist();
    for year in [1600, 1970, 2004, 2038] {
        let instant = Chronology::iso().date_time_millis(year, 3, 1, 0).unwrap();
        assert_eq!(buddhist.year().get(instant).unwrap(), year + BUDDHIST_OFFSET);
        assert_eq!(buddhist.era().as_text(instant, &horologe_chrono::EnglishText).unwrap(), "BE");
    }
}

#[test]
fn test_day_of_month_bounds_match_month_lengths() {
    let calendars = [
        (Chronology::iso(), 12),
        (Chronology::julian(WeekConfig::default()).unwrap(), 12),
        (Chronology::coptic(WeekConfig::default()).unwrap(), 13),
    ];
    for (chrono, months) in calendars {
        for year in [-5, 1, 3, 1900, 2000, 2003, 2004] {
            for month in 1..=months {
                let first = chrono.date_time_millis(year, month, 1, 0).unwrap();
                let max = chrono.day_of_month().maximum_value_at(first).unwrap();
                assert!(chrono.date_time_millis(year, month, max, 0).is_ok());
                assert!(chrono.date_time_millis(year, month, max + 1, 0).is_err(), "{} {}-{}", chrono, year, month);
            }
        }
    }
}

#[test]
fn test_dst_gap_and_overlap() {
    const SPRING_2011: i64 = 1_301_187_600_000;
    const AUTUMN_2011: i64 = 1_319_936_400_000;
    let paris = Zone::new(
        PrecalculatedZone::alternating(
            "Europe/Paris",
            MILLIS_PER_HOUR as i32,
            MILLIS_PER_HOUR as i32,
            &[SPRING_2011, AUTUMN_2011],
        )
        .unwrap(),
    );
    let chrono = Chronology::iso_in(&paris);
    let before_gap = DateTime::new(SPRING_2011 - MILLIS_PER_HOUR / 2, chrono.clone());
    let err = before_gap.with_field(&DateTimeFieldType::HOUR_OF_DAY, 2).unwrap_err();
    assert!(err.is_illegal_field_value());
    assert!(err.is_illegal_instant());
    let hour = before_gap.property(&DateTimeFieldType::HOUR_OF_DAY).unwrap();
    let err = hour.set_copy_text("2", &horologe_chrono::EnglishText).unwrap_err();
    assert!(err.is_illegal_instant());

    let overlap = DateTime::from_fields(chrono, 2011, 10, 30, 2, 30, 0, 0).unwrap();
    assert_eq!(overlap.millis(), AUTUMN_2011 - MILLIS_PER_HOUR / 2);
    assert_eq!(overlap.with_later_offset_at_overlap().millis(), AUTUMN_2011 + MILLIS_PER_HOUR / 2);
}

#[test]
fn test_zoned_wrappers_compose() {
    let zone = Zone::fixed(-3 * MILLIS_PER_HOUR as i32).unwrap();
    let gj = Chronology::gj_in(&zone, CutoverConfig::british()).unwrap();
    let dt = DateTime::from_fields(gj.clone(), 1752, 9, 14, 9, 0, 0, 0).unwrap();
    assert_eq!(dt.hour_of_day().unwrap(), 9);
    let before = dt.with_field_added(&DurationFieldType::DAYS, -1).unwrap();
    assert_eq!(ymd(&before), (1752, 9, 2));
    let lenient = Chronology::lenient(&gj);
    assert_eq!(lenient.zone(), zone);
    assert_eq!(lenient.with_utc().zone(), Zone::utc());
}
