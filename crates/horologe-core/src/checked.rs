//! Overflow-checked arithmetic on instants and field values
//!
//! Every add/set on a field routes through these helpers so a result is
//! either exact or an error. None of them wrap.

use crate::error::{IllegalFieldValue, TimeError, TimeResult};

/// Negate, failing for `i32::MIN`.
#[inline]
pub fn safe_negate(value: i32) -> TimeResult<i32> {
    value
        .checked_neg()
        .ok_or_else(|| TimeError::overflow("i32::MIN cannot be negated"))
}

#[inline]
pub fn safe_add_i32(a: i32, b: i32) -> TimeResult<i32> {
    a.checked_add(b)
        .ok_or_else(|| TimeError::overflow(format!("The calculation caused an overflow: {} + {}", a, b)))
}

#[inline]
pub fn safe_add(a: i64, b: i64) -> TimeResult<i64> {
    a.checked_add(b)
        .ok_or_else(|| TimeError::overflow(format!("The calculation caused an overflow: {} + {}", a, b)))
}

#[inline]
pub fn safe_subtract(a: i64, b: i64) -> TimeResult<i64> {
    a.checked_sub(b)
        .ok_or_else(|| TimeError::overflow(format!("The calculation caused an overflow: {} - {}", a, b)))
}

#[inline]
pub fn safe_multiply(a: i64, b: i64) -> TimeResult<i64> {
    a.checked_mul(b)
        .ok_or_else(|| TimeError::overflow(format!("Multiplication overflows an i64: {} * {}", a, b)))
}

#[inline]
pub fn safe_multiply_i32(a: i32, b: i32) -> TimeResult<i32> {
    a.checked_mul(b)
        .ok_or_else(|| TimeError::overflow(format!("Multiplication overflows an i32: {} * {}", a, b)))
}

/// Divide, failing for `i64::MIN / -1` and division by zero.
#[inline]
pub fn safe_divide(dividend: i64, divisor: i64) -> TimeResult<i64> {
    if divisor == 0 {
        return Err(TimeError::overflow("Division by zero"));
    }
    dividend
        .checked_div(divisor)
        .ok_or_else(|| TimeError::overflow(format!("Division overflows an i64: {} / {}", dividend, divisor)))
}

/// Narrow to `i32`, failing when out of range.
#[inline]
pub fn safe_to_int(value: i64) -> TimeResult<i32> {
    i32::try_from(value)
        .map_err(|_| TimeError::overflow(format!("Value cannot fit in an i32: {}", value)))
}

/// Fail with an IllegalFieldValue unless `lower <= value <= upper`.
pub fn verify_value_bounds(field: &str, value: i64, lower: i64, upper: i64) -> TimeResult<()> {
    if value < lower || value > upper {
        return Err(IllegalFieldValue::new(field, value, Some(lower), Some(upper)).into());
    }
    Ok(())
}

/// Wrap `current + amount` into `[min, max]`.
pub fn wrapped_value(current: i32, amount: i32, min: i32, max: i32) -> TimeResult<i32> {
    wrap(current as i64 + amount as i64, min, max)
}

/// Wrap `value` into `[min, max]`.
pub fn wrap(value: i64, min: i32, max: i32) -> TimeResult<i32> {
    if min >= max {
        return Err(TimeError::illegal_argument("MIN > MAX"));
    }
    let range = max as i64 - min as i64 + 1;
    Ok(((value - min as i64).rem_euclid(range) + min as i64) as i32)
}

/// Saturating conversion of epoch day + millis-of-day to an instant.
///
/// Derived instants at the representable boundary clamp instead of
/// wrapping.
#[inline]
pub fn clamp_day_millis(day: i64, millis_of_day: i64) -> i64 {
    let wide = day as i128 * crate::constants::MILLIS_PER_DAY as i128 + millis_of_day as i128;
    wide.clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_add_overflow_fails() {
        assert!(safe_add(i64::MAX, 1).unwrap_err().is_overflow());
        assert!(safe_subtract(i64::MIN, 1).unwrap_err().is_overflow());
        assert_eq!(safe_add(-5, 7).unwrap(), 2);
    }

    #[test]
    fn test_multiply_and_divide() {
        assert!(safe_multiply(i64::MAX / 2, 3).is_err());
        assert_eq!(safe_multiply(-4, 5).unwrap(), -20);
        assert!(safe_divide(i64::MIN, -1).is_err());
        assert!(safe_divide(1, 0).is_err());
        assert_eq!(safe_divide(-9, 2).unwrap(), -4);
    }

    #[test]
    fn test_negate_and_narrow() {
        assert!(safe_negate(i32::MIN).is_err());
        assert_eq!(safe_negate(7).unwrap(), -7);
        assert!(safe_to_int(i32::MAX as i64 + 1).is_err());
        assert_eq!(safe_to_int(-12).unwrap(), -12);
    }

    #[test]
    fn test_wrapped_value() {
        assert_eq!(wrapped_value(12, 1, 1, 12).unwrap(), 1);
        assert_eq!(wrapped_value(1, -1, 1, 12).unwrap(), 12);
        assert_eq!(wrapped_value(5, -25, 1, 12).unwrap(), 4);
        assert_eq!(wrapped_value(0, 60, 0, 59).unwrap(), 0);
        assert!(wrapped_value(1, 1, 5, 5).is_err());
    }

    #[test]
    fn test_verify_bounds() {
        assert!(verify_value_bounds("monthOfYear", 12, 1, 12).is_ok());
        let err = verify_value_bounds("monthOfYear", 13, 1, 12).unwrap_err();
        assert!(err.is_illegal_field_value());
    }

    #[test]
    fn test_clamp_day_millis() {
        assert_eq!(clamp_day_millis(0, 5), 5);
        assert_eq!(clamp_day_millis(-1, 0), -86_400_000);
        assert_eq!(clamp_day_millis(i64::MAX / 1000, 0), i64::MAX);
        assert_eq!(clamp_day_millis(i64::MIN / 1000, 0), i64::MIN);
    }

    proptest! {
        #[test]
        fn wrapped_value_stays_in_range(current in 1i32..=12, amount in -10_000i32..10_000) {
            let v = wrapped_value(current, amount, 1, 12).unwrap();
            prop_assert!((1..=12).contains(&v));
            prop_assert_eq!((v - current - amount).rem_euclid(12), 0);
        }

        #[test]
        fn safe_add_matches_checked(a in any::<i64>(), b in any::<i64>()) {
            prop_assert_eq!(safe_add(a, b).ok(), a.checked_add(b));
        }
    }
}
