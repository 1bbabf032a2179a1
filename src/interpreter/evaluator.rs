/// Binary operator evaluation logic.
///
/// Handles the four arithmetic operators for integers, reals, complex
/// numbers and strings.
pub mod binary;

/// Unary operator evaluation logic.
pub mod unary;

/// Core evaluation logic and context management.
///
/// Contains the evaluation context, its variable bindings and the
/// [`Executor`](crate::interpreter::executor::Executor) implementation.
pub mod core;

/// Utility functions for evaluation.
pub mod utils;

/// Function evaluation.
///
/// Handles built-in function calls, argument checking, and return value
/// computation.
pub mod function;
