//! Read access to partial field sets
//!
//! Fields use this to resolve context-dependent bounds (the maximum
//! dayOfMonth depends on a co-present monthOfYear and year).

use std::sync::Arc;

use horologe_core::DateTimeFieldType;

use crate::chronology::Chronology;
use crate::field::DateTimeField;

/// An ordered list of field types with values, bound to a UTC chronology.
pub trait ReadablePartial {
    fn size(&self) -> usize;

    fn field_type(&self, index: usize) -> DateTimeFieldType;

    fn value(&self, index: usize) -> i32;

    fn chronology(&self) -> &Chronology;

    fn field(&self, index: usize) -> Arc<dyn DateTimeField> {
        self.chronology().field(&self.field_type(index))
    }

    fn index_of(&self, ty: &DateTimeFieldType) -> Option<usize> {
        (0..self.size()).find(|&i| self.field_type(i) == *ty)
    }

    fn is_supported(&self, ty: &DateTimeFieldType) -> bool {
        self.index_of(ty).is_some()
    }

    /// Value of `ty` taken from `values` when the partial carries it.
    fn lookup(&self, ty: &DateTimeFieldType, values: &[i32]) -> Option<i32> {
        self.index_of(ty).and_then(|i| values.get(i).copied())
    }
}

/// True when each field's range unit is the previous field's duration unit,
/// so the fields describe one unbroken span (year, month, day).
pub fn is_contiguous(partial: &dyn ReadablePartial) -> bool {
    let mut last: Option<horologe_core::DurationFieldType> = None;
    for i in 0..partial.size() {
        let field = partial.field(i);
        if i > 0 {
            let range = field.range_duration_field().map(|d| d.duration_type());
            if range.is_none() || range != last {
                return false;
            }
        }
        last = Some(field.duration_field().duration_type());
    }
    true
}

/// A borrowed type list with a chronology, used to evaluate bounds for
/// values that have not been assembled into a partial yet.
#[derive(Debug, Clone, Copy)]
pub struct FieldSet<'a> {
    pub chronology: &'a Chronology,
    pub types: &'a [DateTimeFieldType],
    pub values: &'a [i32],
}

impl ReadablePartial for FieldSet<'_> {
    fn size(&self) -> usize {
        self.types.len()
    }

    fn field_type(&self, index: usize) -> DateTimeFieldType {
        self.types[index].clone()
    }

    fn value(&self, index: usize) -> i32 {
        self.values[index]
    }

    fn chronology(&self) -> &Chronology {
        self.chronology
    }
}
