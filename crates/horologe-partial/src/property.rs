//! Field access on a partial

use std::sync::Arc;

use horologe_chrono::{DateTimeField, LocaleText, ReadablePartial};
use horologe_core::{DateTimeFieldType, TimeResult};

use crate::partial::Partial;

/// One field of one [`Partial`]. Copy operations return a new partial.
#[derive(Clone, Debug)]
pub struct PartialProperty {
    partial: Partial,
    index: usize,
}

impl PartialProperty {
    pub(crate) fn new(partial: Partial, index: usize) -> Self {
        PartialProperty { partial, index }
    }

    pub fn partial(&self) -> &Partial {
        &self.partial
    }

    pub fn field(&self) -> Arc<dyn DateTimeField> {
        self.partial.field(self.index)
    }

    pub fn field_type(&self) -> DateTimeFieldType {
        self.partial.field_type(self.index)
    }

    pub fn get(&self) -> i32 {
        self.partial.value(self.index)
    }

    pub fn as_text(&self, locale: &dyn LocaleText) -> String {
        self.field().value_as_text(self.get(), locale)
    }

    pub fn as_short_text(&self, locale: &dyn LocaleText) -> String {
        self.field().value_as_short_text(self.get(), locale)
    }

    /// Smallest value given the other fields of the partial.
    pub fn minimum_value(&self) -> i32 {
        self.field().minimum_value_for(&self.partial, self.partial.values())
    }

    /// Largest value given the other fields of the partial.
    pub fn maximum_value(&self) -> i32 {
        self.field().maximum_value_for(&self.partial, self.partial.values())
    }

    pub fn minimum_value_overall(&self) -> i32 {
        self.field().minimum_value()
    }

    pub fn maximum_value_overall(&self) -> i32 {
        self.field().maximum_value()
    }

    fn rebuild(&self, values: Vec<i32>) -> Partial {
        self.partial.with_values(values)
    }

    /// Add, carrying into larger fields of the partial.
    pub fn add_to_copy(&self, amount: i32) -> TimeResult<Partial> {
        let values = self.field().add_partial(&self.partial, self.index, self.partial.values().to_vec(), amount)?;
        Ok(self.rebuild(values))
    }

    /// Add, wrapping within this field without touching the others.
    pub fn add_wrap_field_to_copy(&self, amount: i32) -> TimeResult<Partial> {
        let values =
            self.field().add_wrap_field_partial(&self.partial, self.index, self.partial.values().to_vec(), amount)?;
        Ok(self.rebuild(values))
    }

    pub fn set_copy(&self, value: i32) -> TimeResult<Partial> {
        let values = self.field().set_partial(&self.partial, self.index, self.partial.values().to_vec(), value)?;
        Ok(self.rebuild(values))
    }

    pub fn set_copy_text(&self, text: &str, locale: &dyn LocaleText) -> TimeResult<Partial> {
        let values =
            self.field().set_text_partial(&self.partial, self.index, self.partial.values().to_vec(), text, locale)?;
        Ok(self.rebuild(values))
    }

    pub fn with_maximum_value(&self) -> TimeResult<Partial> {
        self.set_copy(self.maximum_value())
    }

    pub fn with_minimum_value(&self) -> TimeResult<Partial> {
        self.set_copy(self.minimum_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horologe_chrono::EnglishText;

    fn year_month(y: i32, m: i32) -> Partial {
        Partial::from_fields(vec![DateTimeFieldType::YEAR, DateTimeFieldType::MONTH_OF_YEAR], vec![y, m], None).unwrap()
    }

    #[test]
    fn test_bounds_in_context() {
        let p = year_month(2004, 2).with(DateTimeFieldType::DAY_OF_MONTH, 10).unwrap();
        let day = p.property(&DateTimeFieldType::DAY_OF_MONTH).unwrap();
        assert_eq!(day.maximum_value(), 29);
        assert_eq!(day.maximum_value_overall(), 31);
        assert_eq!(day.with_maximum_value().unwrap().values(), &[2004, 2, 29]);
        assert_eq!(day.with_minimum_value().unwrap().values(), &[2004, 2, 1]);
    }

    #[test]
    fn test_text() {
        let month = year_month(2004, 6).property(&DateTimeFieldType::MONTH_OF_YEAR).unwrap();
        assert_eq!(month.get(), 6);
        assert_eq!(month.as_text(&EnglishText), "June");
        assert_eq!(month.as_short_text(&EnglishText), "Jun");
        let march = month.set_copy_text("March", &EnglishText).unwrap();
        assert_eq!(march, year_month(2004, 3));
    }

    #[test]
    fn test_add_and_wrap() {
        let month = year_month(2004, 11).property(&DateTimeFieldType::MONTH_OF_YEAR).unwrap();
        assert_eq!(month.add_to_copy(3).unwrap(), year_month(2005, 2));
        assert_eq!(month.add_wrap_field_to_copy(3).unwrap(), year_month(2004, 2));
        assert!(month.set_copy(0).unwrap_err().is_illegal_field_value());
    }
}
