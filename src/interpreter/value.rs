/// The value module defines the runtime data types for evaluation.
///
/// Values are what the execution engine produces when it evaluates an
/// assembled expression: integers, reals, complex numbers and strings. The
/// module also provides the promotion rules used by mixed arithmetic.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Provides safe promotion between numeric types (e.g., integer to real).
pub mod core;
/// Complex number support.
///
/// Defines the `ComplexNumber` type used both for complex values in
/// expressions and for the amplitudes of the quantum register.
pub mod complex;
