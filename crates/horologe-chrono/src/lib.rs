//! Horologe Chrono - Calendar systems and the field calculus
//!
//! This crate turns instants into calendar fields and back:
//! - Duration fields and date-time fields with checked arithmetic
//! - Field decorators (offset, divided, remainder, zero-is-max, skip)
//! - ISO, Gregorian, Julian, Coptic, Buddhist and the Gregorian/Julian hybrid
//! - Zoned, lenient and strict wrappers with a process-wide chronology cache
//! - `DateTime` snapshots and field properties

pub mod basic;
pub mod calendar;
mod calendars;
pub mod chronology;
pub mod config;
mod cutover;
pub mod datetime;
pub mod decorators;
pub mod duration;
pub mod field;
mod lenient;
pub mod locale;
pub mod partial;
pub mod precise;
mod zoned;

pub use calendars::BUDDHIST_OFFSET;
pub use chronology::*;
pub use config::*;
pub use cutover::CutoverField;
pub use datetime::*;
pub use duration::*;
pub use field::DateTimeField;
pub use locale::*;
pub use partial::*;
pub use zoned::{ZonedDurationField, ZonedField};
