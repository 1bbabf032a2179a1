use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Checks that exactly `expected` arguments were supplied.
///
/// # Errors
/// Returns `RuntimeError::ArgumentCountMismatch` otherwise.
pub const fn check_arity<T>(args: &[T], expected: usize, line: usize) -> EvalResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(RuntimeError::ArgumentCountMismatch { line })
    }
}
