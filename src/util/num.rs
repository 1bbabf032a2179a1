use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds `MAX_SAFE_U64_INT` in absolute
/// value.
///
/// ## Example
/// ```
/// use qline::util::num::{MAX_SAFE_U64_INT, i64_to_f64_checked};
///
/// let result = i64_to_f64_checked(42, "too big!");
/// assert_eq!(result.unwrap(), 42.0);
///
/// let big = MAX_SAFE_U64_INT as i64 + 1;
/// assert!(i64_to_f64_checked(big, "too big!").is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_f64_checked<E>(value: i64, error: E) -> Result<f64, E> {
    if value.unsigned_abs() > MAX_SAFE_U64_INT {
        return Err(error);
    }
    Ok(value as f64)
}

/// Converts an already integral `f64` (the output of `floor`, `ceil` or
/// `round`) to `i64`.
///
/// ## Errors
/// - `RuntimeError::TypeError` for NaN and infinities.
/// - `RuntimeError::LiteralTooLarge` if the value is outside the `i64` range.
///
/// ## Example
/// ```
/// use qline::{error::RuntimeError, util::num::integral_f64_to_i64};
///
/// assert_eq!(integral_f64_to_i64(1000.0, 1).unwrap(), 1000);
/// assert!(matches!(integral_f64_to_i64(1e20, 5),
///                  Err(RuntimeError::LiteralTooLarge { line: 5 })));
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn integral_f64_to_i64(value: f64, line: usize) -> EvalResult<i64> {
    if !value.is_finite() {
        return Err(RuntimeError::TypeError { details: format!("Cannot convert non-finite value {value} to an integer"),
                                             line });
    }
    if value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return Err(RuntimeError::LiteralTooLarge { line });
    }
    Ok(value as i64)
}
