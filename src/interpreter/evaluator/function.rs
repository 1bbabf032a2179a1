/// Built-in numeric function implementations.
///
/// Contains the trigonometric, exponential and rounding functions.
pub mod builtin;
/// The `conj` (complex conjugate) function implementation.
pub mod conj;
/// The `print` function implementation.
///
/// Outputs a value to the standard output.
pub mod print;
/// The `sqrt` (square root) function implementation.
///
/// Computes the square root for real, integer, or complex values.
pub mod sqrt;

/// The builtin table and function call dispatch.
pub mod core;
