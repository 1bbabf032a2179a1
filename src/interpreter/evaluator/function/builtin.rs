use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, utils::check_arity},
        value::{complex::ComplexNumber, core::Value},
    },
    util::num::integral_f64_to_i64,
};

/// Applies a unary builtin function to a numeric value.
///
/// The generated functions accept exactly one argument.
/// - Integers are converted to real numbers before applying the real function.
/// - Reals use the corresponding real builtin.
/// - Complex values use the complex variant.
///
/// Non-numeric arguments produce an `ExpectedNumber` error.
///
/// # Example
/// ```
/// use qline::interpreter::{evaluator::function::builtin::sin, value::core::Value};
///
/// let x = Value::Real(std::f64::consts::PI / 2.0);
/// let r = sin(&[x], 1).unwrap();
///
/// assert_eq!(r, Value::Real(1.0));
/// ```
macro_rules! real_complex_builtin {
    ($fname:ident, $real_fn:ident, $complex_fn:ident) => {
        pub fn $fname(args: &[Value], line: usize) -> EvalResult<Value> {
            check_arity(args, 1, line)?;

            match args[0] {
                Value::Integer(_) => Ok(Value::Real(args[0].as_real(line)?.$real_fn())),
                Value::Real(r) => Ok(Value::Real(r.$real_fn())),
                Value::Complex(c) => Ok(Value::Complex(ComplexNumber::$complex_fn(c))),
                Value::Str(_) => Err(RuntimeError::ExpectedNumber { line }),
            }
        }
    };
}

real_complex_builtin!(sin, sin, sin);
real_complex_builtin!(cos, cos, cos);
real_complex_builtin!(exp, exp, exp);

/// Natural logarithm.
///
/// Negative reals have a complex logarithm, so they are evaluated on the
/// complex plane. The logarithm of zero is `-inf`.
pub fn ln(args: &[Value], line: usize) -> EvalResult<Value> {
    check_arity(args, 1, line)?;

    match &args[0] {
        Value::Complex(c) => Ok(Value::Complex(c.ln())),
        Value::Str(_) => Err(RuntimeError::ExpectedNumber { line }),
        value => {
            let x = value.as_real(line)?;
            if x < 0.0 {
                Ok(ComplexNumber::from(x).ln().checked_as_real())
            } else {
                Ok(Value::Real(x.ln()))
            }
        },
    }
}

/// Applies a rounding operation (`floor`, `ceil`, or `round`) to a numeric
/// value and returns an integer.
///
/// Integers are returned as-is.
///
/// # Example
/// ```
/// use qline::interpreter::{evaluator::function::builtin::unary_round, value::core::Value};
///
/// let r = unary_round(f64::floor, &[Value::Real(3.8)], 1).unwrap();
/// assert_eq!(r, Value::Integer(3));
/// ```
pub fn unary_round(op: fn(f64) -> f64, args: &[Value], line: usize) -> EvalResult<Value> {
    check_arity(args, 1, line)?;

    match args[0] {
        Value::Integer(i) => Ok(Value::Integer(i)),
        Value::Real(r) => Ok(Value::Integer(integral_f64_to_i64(op(r), line)?)),
        _ => Err(RuntimeError::ExpectedNumber { line }),
    }
}
