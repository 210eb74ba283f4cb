use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Largest integer magnitude exactly representable as an `f64` (`2^53 - 1`).
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
/// use dicelang::util::num::{MAX_SAFE_U64_INT, i64_to_f64_checked};
///
/// assert_eq!(i64_to_f64_checked(42, "too big!").unwrap(), 42.0);
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

/// Converts a script-level index into a position inside a list of length
/// `len`.
///
/// With `inclusive_end` set, `len` itself is accepted (insertion points and
/// slice bounds); otherwise the index must address an existing element.
///
/// ## Errors
/// Returns `IndexOutOfRange` for negative indices and indices past the end.
///
/// ## Example
/// ```
/// use dicelang::util::num::list_position;
///
/// assert_eq!(list_position(2, 3, false, 1).unwrap(), 2);
/// assert!(list_position(3, 3, false, 1).is_err());
/// assert_eq!(list_position(3, 3, true, 1).unwrap(), 3);
/// assert!(list_position(-1, 3, true, 1).is_err());
/// ```
pub fn list_position(index: i64, len: usize, inclusive_end: bool, line: usize) -> EvalResult<usize> {
    let out_of_range = RuntimeError::IndexOutOfRange { index, len, line };

    let position = usize::try_from(index).map_err(|_| out_of_range.clone())?;
    let valid = if inclusive_end { position <= len } else { position < len };

    if valid { Ok(position) } else { Err(out_of_range) }
}

/// Converts a `usize` count into an `i64`.
///
/// ## Errors
/// Returns `Overflow` if the count does not fit.
pub fn usize_to_i64_checked(value: usize, line: usize) -> EvalResult<i64> {
    i64::try_from(value).map_err(|_| RuntimeError::Overflow { line })
}

/// Truncates an `f64` toward zero, returning `None` when the result is not a
/// finite value inside the `i64` range.
///
/// ## Example
/// ```
/// use dicelang::util::num::f64_to_i64_truncated;
///
/// assert_eq!(f64_to_i64_truncated(3.9), Some(3));
/// assert_eq!(f64_to_i64_truncated(-3.9), Some(-3));
/// assert_eq!(f64_to_i64_truncated(f64::NAN), None);
/// assert_eq!(f64_to_i64_truncated(1e300), None);
/// ```
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
#[must_use]
pub fn f64_to_i64_truncated(value: f64) -> Option<i64> {
    let truncated = value.trunc();

    // i64::MAX as f64 rounds up to 2^63, which is already out of range.
    if !truncated.is_finite() || truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
        return None;
    }

    Some(truncated as i64)
}
