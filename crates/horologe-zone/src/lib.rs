//! Horologe Zone - Time zone offset rules and conversions
//!
//! This crate provides the zone side of zoned chronologies:
//! - The `ZoneRules` contract (offset at an instant, transition queries)
//! - Fixed-offset and precalculated-transition providers
//! - The `Zone` handle with UTC/local conversions and gap/overlap resolution

pub mod rules;
pub mod zone;

pub use rules::*;
pub use zone::*;
