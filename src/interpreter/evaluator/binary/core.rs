use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a binary operation between two values.
    ///
    /// Two strings can only be added, which concatenates them. Every other
    /// combination is numeric and goes to [`Context::eval_scalar_op`].
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Example
    /// ```
    /// use qline::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let result = Context::eval_binary(BinaryOperator::Add, &3.into(), &4.into(), 1);
    /// assert_eq!(result.unwrap(), Value::Integer(7));
    ///
    /// let joined = Context::eval_binary(BinaryOperator::Add, &"ab".into(), &"cd".into(), 1);
    /// assert_eq!(joined.unwrap(), Value::from("abcd"));
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
        match (left, right) {
            (Value::Str(a), Value::Str(b)) if op == BinaryOperator::Add => {
                Ok(Value::Str(format!("{a}{b}")))
            },
            (Value::Str(_), _) | (_, Value::Str(_)) => {
                Err(RuntimeError::TypeError { details: format!("Cannot use {op} on {} and {}",
                                                               left.type_name(),
                                                               right.type_name()),
                                              line })
            },
            _ => Self::eval_scalar_op(op, left, right, line),
        }
    }
}
