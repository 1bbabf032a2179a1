/// Dispatch of binary operations.
pub mod core;
/// Arithmetic on scalar operands.
pub mod scalar;
