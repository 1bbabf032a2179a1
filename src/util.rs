/// Numeric conversion helpers.
///
/// Safe conversions between `i64` and `f64` that fail instead of silently
/// rounding or truncating.
pub mod num;
