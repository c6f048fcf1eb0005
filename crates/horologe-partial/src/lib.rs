//! Horologe Partial - Incomplete dates built from field values
//!
//! This crate composes partial dates (a year and month, a month and day, a
//! time of day) out of field types and values:
//! - Ordering and duplicate checks on the field types
//! - Value validation against each field's bounds in context
//! - Copy-on-write `with` / `without` / add operations
//! - A per-field property accessor

pub mod partial;
pub mod property;

pub use partial::*;
pub use property::*;
