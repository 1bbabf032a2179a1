use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::{complex::ZERO, core::Value},
    },
};

impl Context {
    /// Evaluates a scalar arithmetic operation.
    ///
    /// The function handles integer, real and complex operands. Mixed types
    /// are promoted as needed. Division by zero is checked explicitly for all
    /// numeric categories.
    ///
    /// Integer arithmetic is checked and reports `Overflow` instead of
    /// wrapping. Dividing two integers gives an integer when the division is
    /// exact and a real otherwise.
    ///
    /// # Example
    /// ```
    /// use qline::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let div = |a: i64, b: i64| {
    ///     Context::eval_scalar_op(BinaryOperator::Div, &a.into(), &b.into(), 1).unwrap()
    /// };
    ///
    /// assert_eq!(div(6, 3), Value::Integer(2));
    /// assert_eq!(div(7, 2), Value::Real(3.5));
    /// ```
    pub fn eval_scalar_op(op: BinaryOperator,
                          left: &Value,
                          right: &Value,
                          line: usize)
                          -> EvalResult<Value> {
        use BinaryOperator::{Add, Div, Mul, Sub};
        use Value::{Complex, Integer, Real};

        match (left, right) {
            (Complex(_), _) | (_, Complex(_)) => {
                let (left, right) = left.clone().promote_to_complex(right.clone(), line)?;
                let left = left.as_complex(line)?;
                let right = right.as_complex(line)?;

                Ok(Complex(match op {
                               Add => left + right,
                               Sub => left - right,
                               Mul => left * right,
                               Div => {
                                   if right == ZERO {
                                       return Err(RuntimeError::DivisionByZero { line });
                                   }
                                   left / right
                               },
                           }))
            },
            (Real(_), _) | (_, Real(_)) => {
                let (left, right) = left.clone().promote_to_real(right.clone(), line)?;
                let left = left.as_real(line)?;
                let right = right.as_real(line)?;

                Ok(Real(match op {
                            Add => left + right,
                            Sub => left - right,
                            Mul => left * right,
                            Div => {
                                if right == 0.0 {
                                    return Err(RuntimeError::DivisionByZero { line });
                                }
                                left / right
                            },
                        }))
            },
            (Integer(a), Integer(b)) => {
                let result = match op {
                    Add => a.checked_add(*b),
                    Sub => a.checked_sub(*b),
                    Mul => a.checked_mul(*b),
                    Div => {
                        if *b == 0 {
                            return Err(RuntimeError::DivisionByZero { line });
                        }
                        let rem = a.checked_rem(*b).ok_or(RuntimeError::Overflow { line })?;
                        if rem != 0 {
                            return Ok(Real(left.as_real(line)? / right.as_real(line)?));
                        }
                        a.checked_div(*b)
                    },
                };
                result.map(Integer).ok_or(RuntimeError::Overflow { line })
            },
            _ => {
                Err(RuntimeError::TypeError { details: format!("Invalid scalar operands: {left} {op} {right}"),
                                              line })
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::value::complex::ComplexNumber;

    fn apply(op: BinaryOperator, left: Value, right: Value) -> EvalResult<Value> {
        Context::eval_scalar_op(op, &left, &right, 1)
    }

    #[test]
    fn integer_overflow_is_reported() {
        assert_eq!(apply(BinaryOperator::Add, i64::MAX.into(), 1.into()).unwrap_err(),
                   RuntimeError::Overflow { line: 1 });
        assert_eq!(apply(BinaryOperator::Mul, i64::MIN.into(), (-1).into()).unwrap_err(),
                   RuntimeError::Overflow { line: 1 });
        assert_eq!(apply(BinaryOperator::Div, i64::MIN.into(), (-1).into()).unwrap_err(),
                   RuntimeError::Overflow { line: 1 });
    }

    #[test]
    fn division_by_zero_is_reported_for_every_kind() {
        for (left, right) in [(Value::Integer(1), Value::Integer(0)),
                              (Value::Real(1.0), Value::Integer(0)),
                              (Value::Complex(ComplexNumber::new(1.0, 1.0)), Value::Real(0.0))]
        {
            assert_eq!(apply(BinaryOperator::Div, left, right).unwrap_err(),
                       RuntimeError::DivisionByZero { line: 1 });
        }
    }

    #[test]
    fn mixed_operands_are_promoted() {
        assert_eq!(apply(BinaryOperator::Sub, 3.into(), 0.5.into()).unwrap(), Value::Real(2.5));
        assert_eq!(apply(BinaryOperator::Mul,
                         2.into(),
                         Value::Complex(ComplexNumber::new(0.0, 1.0))).unwrap(),
                   Value::Complex(ComplexNumber::new(0.0, 2.0)));
    }
}
