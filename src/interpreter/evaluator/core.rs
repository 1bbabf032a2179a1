use std::collections::HashMap;

use tracing::debug;

use crate::{
    ast::{Assignment, Expr},
    error::{ExecutionError, RuntimeError},
    interpreter::{
        executor::{Binding, CallSite, Executor},
        parser::{
            core::{expect_end, parse_expression, tokenize},
            statement::parse_assignment,
        },
        quantum::{Circuit, Gate, QuantumOps},
        value::{complex::I, core::Value},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state: the variables bound by
/// assignments and the quantum register that gate calls act on.
///
/// ## Usage
///
/// `Context` is created once per interpreter and reused for every line, so
/// a variable assigned on one line can be read on the next.
pub struct Context {
    /// Variables bound by assignments, such as `x = 1 + 2`.
    variables: HashMap<String, Value>,
    /// The register gate calls are applied to.
    quantum:   Box<dyn QuantumOps>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Creates a new evaluation context with no variables and an empty
    /// [`Circuit`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_quantum(Box::new(Circuit::new()))
    }

    /// Creates a new evaluation context that applies gates to `quantum`.
    #[must_use]
    pub fn with_quantum(quantum: Box<dyn QuantumOps>) -> Self {
        Self { variables: HashMap::new(),
               quantum }
    }

    /// The register gate calls are applied to.
    #[must_use]
    pub fn quantum(&self) -> &dyn QuantumOps {
        self.quantum.as_ref()
    }

    /// Looks up a variable bound by an earlier assignment.
    #[must_use]
    pub fn get_variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The evaluator
    /// dispatches based on expression variant: literals, variables, unary and
    /// binary operations and function calls.
    ///
    /// # Example
    /// ```
    /// use qline::{
    ///     ast::{Expr, LiteralValue},
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let context = Context::new();
    /// let expr = Expr::Literal { value: LiteralValue::Integer(10),
    ///                            line:  1, };
    ///
    /// assert_eq!(context.eval(&expr).unwrap(), Value::Integer(10));
    /// ```
    pub fn eval(&self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(value.into()),
            Expr::Variable { name, line } => self.eval_variable(name, *line),
            Expr::UnaryOp { op, expr, line } => {
                let value = self.eval(expr)?;
                Self::eval_unary(*op, &value, *line)
            },
            Expr::BinaryOp { left, op, right, line } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Self::eval_binary(*op, &left, &right, *line)
            },
            Expr::FunctionCall { name,
                                 arguments,
                                 line, } => {
                let arg_vals = arguments.iter()
                                        .map(|argument| self.eval(argument))
                                        .collect::<EvalResult<Vec<_>>>()?;
                Self::eval_function(name, &arg_vals, *line)
            },
        }
    }

    /// Variables shadow the constants `pi` and `i`.
    fn eval_variable(&self, name: &str, line: usize) -> EvalResult<Value> {
        if let Some(value) = self.variables.get(name) {
            return Ok(value.clone());
        }
        match name {
            "pi" => Ok(Value::Real(std::f64::consts::PI)),
            "i" => Ok(Value::Complex(I)),
            _ => Err(RuntimeError::UnknownVariable { name: name.to_string(),
                                                     line }),
        }
    }
}

impl Executor for Context {
    fn execute(&mut self, source: &str, line: usize) -> Result<Binding, ExecutionError> {
        let tokens = tokenize(source, line)?;
        let Assignment { name, value, .. } = parse_assignment(&mut tokens.iter().peekable())?;

        let value = self.eval(&value)?;
        debug!(%name, %value, "bound variable");
        self.variables.insert(name.clone(), value.clone());
        Ok(Binding { name, value })
    }

    fn evaluate(&mut self, source: &str, line: usize) -> Result<Value, ExecutionError> {
        let tokens = tokenize(source, line)?;
        let mut iter = tokens.iter().peekable();
        let expr = parse_expression(&mut iter)?;
        expect_end(&mut iter)?;

        Ok(self.eval(&expr)?)
    }

    fn call(&mut self, site: &CallSite) -> Result<Option<Value>, ExecutionError> {
        if let Some(gate) = Gate::from_name(&site.name) {
            self.quantum.apply(gate, &site.arguments, site.line)?;
            return Ok(None);
        }

        self.evaluate(&site.source, site.line).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;

    #[test]
    fn assignments_persist_across_calls() {
        let mut context = Context::new();
        let binding = context.execute("x = 1 + 2", 1).unwrap();
        assert_eq!(binding,
                   Binding { name:  "x".to_string(),
                             value: Value::Integer(3), });

        assert_eq!(context.evaluate("x * 2", 2).unwrap(), Value::Integer(6));
        assert_eq!(context.get_variable("x"), Some(&Value::Integer(3)));
    }

    #[test]
    fn execute_requires_an_assignment() {
        let mut context = Context::new();
        assert_eq!(context.execute("1 + 1 = 2", 4).unwrap_err(),
                   ExecutionError::Parse(ParseError::InvalidAssignmentTarget { line: 4 }));
        assert_eq!(context.execute("1 + 1", 4).unwrap_err(),
                   ExecutionError::Parse(ParseError::ExpectedAssignment { line: 4 }));
    }

    #[test]
    fn evaluate_rejects_assignments() {
        let mut context = Context::new();
        assert!(matches!(context.evaluate("x = 1", 1),
                         Err(ExecutionError::Parse(ParseError::UnexpectedTrailingTokens { .. }))));
    }

    #[test]
    fn unknown_variables_are_runtime_errors() {
        let mut context = Context::new();
        assert_eq!(context.evaluate("y + 1", 2).unwrap_err(),
                   ExecutionError::Runtime(RuntimeError::UnknownVariable { name: "y".to_string(),
                                                                           line: 2, }));
    }

    #[test]
    fn constants_can_be_shadowed() {
        let mut context = Context::new();
        assert_eq!(context.evaluate("i * i", 1).unwrap(), Value::Complex(I * I));
        context.execute("i = 4", 2).unwrap();
        assert_eq!(context.evaluate("i * i", 3).unwrap(), Value::Integer(16));
    }

    #[test]
    fn gate_calls_go_to_the_register() {
        let mut context = Context::new();
        let site = CallSite { name:      "had".to_string(),
                              arguments: vec!["1".to_string()],
                              source:    "had(1)".to_string(),
                              line:      1, };

        assert_eq!(context.call(&site).unwrap(), None);
        assert_eq!(context.quantum().instructions().len(), 1);
        assert!((context.quantum().probability_of_one("1").unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn other_calls_are_evaluated() {
        let mut context = Context::new();
        let site = CallSite { name:      "sqrt".to_string(),
                              arguments: vec!["16".to_string()],
                              source:    "sqrt(16)".to_string(),
                              line:      1, };
        assert_eq!(context.call(&site).unwrap(), Some(Value::Real(4.0)));

        let site = CallSite { name:      "nope".to_string(),
                              arguments: vec![],
                              source:    "nope()".to_string(),
                              line:      5, };
        assert_eq!(context.call(&site).unwrap_err(),
                   ExecutionError::Runtime(RuntimeError::UnknownFunction { name: "nope".to_string(),
                                                                           line: 5, }));
    }
}
