//! Horologe Core - Shared primitives for calendar arithmetic
//!
//! This crate defines the types every other horologe crate builds on:
//! - Error types (IllegalFieldValue, IllegalArgument, ArithmeticOverflow)
//! - Overflow-checked arithmetic helpers
//! - Field and duration type identifiers with their name registry
//! - Calendar constants and the swappable current-instant clock

pub mod checked;
pub mod clock;
pub mod constants;
pub mod duration_type;
pub mod error;
pub mod field_type;

pub use clock::{current_time_millis, set_clock, Clock, ClockGuard, FixedClock, OffsetClock, SystemClock};
pub use duration_type::*;
pub use error::*;
pub use field_type::*;
