//! Error types for horologe

use std::fmt;

use thiserror::Error;

/// Offending value carried by an [`IllegalFieldValue`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Number(i64),
    Text(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(t) => write!(f, "\"{}\"", t),
        }
    }
}

/// A requested field value outside its legal domain.
///
/// Bounds are `None` when they depend on context that was not resolved
/// (for example the maximum day of an unknown month).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IllegalFieldValue {
    pub field: String,
    pub value: FieldValue,
    pub lower: Option<i64>,
    pub upper: Option<i64>,
    pub explain: Option<String>,
    /// Set when the value falls in a time zone offset transition gap
    pub illegal_instant: bool,
}

impl IllegalFieldValue {
    pub fn new(field: impl Into<String>, value: i64, lower: Option<i64>, upper: Option<i64>) -> Self {
        IllegalFieldValue {
            field: field.into(),
            value: FieldValue::Number(value),
            lower,
            upper,
            explain: None,
            illegal_instant: false,
        }
    }

    pub fn text(field: impl Into<String>, text: impl Into<String>) -> Self {
        IllegalFieldValue {
            field: field.into(),
            value: FieldValue::Text(text.into()),
            lower: None,
            upper: None,
            explain: None,
            illegal_instant: false,
        }
    }

    pub fn with_explain(mut self, explain: impl Into<String>) -> Self {
        self.explain = Some(explain.into());
        self
    }

    pub fn in_transition_gap(mut self) -> Self {
        self.illegal_instant = true;
        self
    }
}

impl fmt::Display for IllegalFieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value {} for {} ", self.value, self.field)?;
        match (self.lower, self.upper) {
            (None, None) => write!(f, "is not supported")?,
            (None, Some(upper)) => write!(f, "must not be larger than {}", upper)?,
            (Some(lower), None) => write!(f, "must not be smaller than {}", lower)?,
            (Some(lower), Some(upper)) => write!(f, "must be in the range [{},{}]", lower, upper)?,
        }
        if let Some(explain) = &self.explain {
            write!(f, ": {}", explain)?;
        }
        Ok(())
    }
}

impl std::error::Error for IllegalFieldValue {}

/// Core horologe errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    #[error("{0}")]
    IllegalFieldValue(Box<IllegalFieldValue>),

    #[error("{0}")]
    IllegalArgument(String),

    #[error("{0}")]
    ArithmeticOverflow(String),
}

impl TimeError {
    pub fn illegal_argument(msg: impl Into<String>) -> Self {
        TimeError::IllegalArgument(msg.into())
    }

    pub fn overflow(msg: impl Into<String>) -> Self {
        TimeError::ArithmeticOverflow(msg.into())
    }

    pub fn is_illegal_field_value(&self) -> bool {
        matches!(self, TimeError::IllegalFieldValue(_))
    }

    pub fn is_illegal_argument(&self) -> bool {
        matches!(self, TimeError::IllegalArgument(_))
    }

    pub fn is_overflow(&self) -> bool {
        matches!(self, TimeError::ArithmeticOverflow(_))
    }

    /// True for failures caused by a local time inside a zone transition gap.
    pub fn is_illegal_instant(&self) -> bool {
        match self {
            TimeError::IllegalFieldValue(v) => v.illegal_instant,
            _ => false,
        }
    }
}

impl From<IllegalFieldValue> for TimeError {
    fn from(value: IllegalFieldValue) -> Self {
        TimeError::IllegalFieldValue(Box::new(value))
    }
}

/// Result type for horologe operations
pub type TimeResult<T> = Result<T, TimeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_message() {
        let err = IllegalFieldValue::new("monthOfYear", 13, Some(1), Some(12));
        assert_eq!(err.to_string(), "Value 13 for monthOfYear must be in the range [1,12]");
    }

    #[test]
    fn test_partial_bound_messages() {
        let upper_only = IllegalFieldValue::new("dayOfMonth", 31, None, Some(30));
        assert_eq!(upper_only.to_string(), "Value 31 for dayOfMonth must not be larger than 30");

        let unsupported = IllegalFieldValue::text("monthOfYear", "Smarch");
        assert_eq!(unsupported.to_string(), "Value \"Smarch\" for monthOfYear is not supported");
    }

    #[test]
    fn test_explain_and_gap_flag() {
        let err: TimeError = IllegalFieldValue::new("hourOfDay", 2, None, None)
            .with_explain("Illegal instant due to time zone offset transition")
            .in_transition_gap()
            .into();
        assert!(err.is_illegal_field_value());
        assert!(err.is_illegal_instant());
        assert!(err.to_string().ends_with("offset transition"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<TimeError>();
    }
}
