use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, utils::check_arity},
        value::{complex::ComplexNumber, core::Value},
    },
};

/// Computes the square root of a numeric value.
///
/// - Nonnegative integers and reals return a real square root.
/// - Negative integers and reals return a purely imaginary complex result.
/// - Complex values use their principal complex square root.
///
/// # Example
/// ```
/// use qline::interpreter::{
///     evaluator::function::sqrt::sqrt,
///     value::{complex::ComplexNumber, core::Value},
/// };
///
/// assert_eq!(sqrt(&[Value::Integer(9)], 1).unwrap(), Value::Real(3.0));
/// assert_eq!(sqrt(&[Value::Real(-4.0)], 1).unwrap(),
///            Value::Complex(ComplexNumber::new(0.0, 2.0)));
/// ```
pub fn sqrt(args: &[Value], line: usize) -> EvalResult<Value> {
    check_arity(args, 1, line)?;

    match &args[0] {
        Value::Complex(c) => Ok(c.sqrt().checked_as_real()),
        Value::Str(_) => Err(RuntimeError::ExpectedNumber { line }),
        value => {
            let x = value.as_real(line)?;
            if x >= 0.0 {
                Ok(Value::Real(x.sqrt()))
            } else {
                Ok(Value::Complex(ComplexNumber::new(0.0, (-x).sqrt())))
            }
        },
    }
}
