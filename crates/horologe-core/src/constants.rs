//! Calendar and time constants

pub const MILLIS_PER_SECOND: i64 = 1_000;
pub const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
pub const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
pub const MILLIS_PER_HALFDAY: i64 = 12 * MILLIS_PER_HOUR;
pub const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;
pub const MILLIS_PER_WEEK: i64 = 7 * MILLIS_PER_DAY;

pub const SECONDS_PER_DAY: i64 = 86_400;
pub const MINUTES_PER_DAY: i64 = 1_440;
pub const HOURS_PER_DAY: i64 = 24;

/// Era value before Christ / before the common era
pub const BCE: i32 = 0;
/// Era value anno Domini / common era
pub const CE: i32 = 1;
/// Single era of the Buddhist calendar
pub const BE: i32 = 1;
/// Single era of the Coptic calendar (anno Martyrum)
pub const AM: i32 = 1;

pub const AM_HALFDAY: i32 = 0;
pub const PM_HALFDAY: i32 = 1;

pub const MONDAY: i32 = 1;
pub const TUESDAY: i32 = 2;
pub const WEDNESDAY: i32 = 3;
pub const THURSDAY: i32 = 4;
pub const FRIDAY: i32 = 5;
pub const SATURDAY: i32 = 6;
pub const SUNDAY: i32 = 7;

pub const JANUARY: i32 = 1;
pub const FEBRUARY: i32 = 2;
pub const OCTOBER: i32 = 10;
pub const DECEMBER: i32 = 12;
