use crate::interpreter::{
    evaluator::{core::EvalResult, utils::check_arity},
    value::core::Value,
};

/// Prints a value to standard output and returns it unchanged.
///
/// Strings are printed without their quotes.
///
/// # Example
/// ```
/// use qline::interpreter::{evaluator::function::print::print, value::core::Value};
///
/// let result = print(&[Value::Integer(42)], 1).unwrap();
///
/// assert_eq!(result, Value::Integer(42));
/// ```
pub fn print(args: &[Value], line: usize) -> EvalResult<Value> {
    check_arity(args, 1, line)?;

    println!("{}", args[0]);
    Ok(args[0].clone())
}
