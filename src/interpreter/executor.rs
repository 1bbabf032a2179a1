use crate::{error::ExecutionError, interpreter::value::core::Value};

/// A name bound to a value by an executed assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// The assigned name.
    pub name:  String,
    /// The value it now refers to.
    pub value: Value,
}

/// A call found on a line, with its arguments resolved back to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    /// The called name, such as `H` or `sqrt`.
    pub name:      String,
    /// The argument texts, trimmed, in order.
    pub arguments: Vec<String>,
    /// The call rebuilt as `name(arg1,arg2,...)`.
    pub source:    String,
    /// The line the call was found on.
    pub line:      usize,
}

/// The engine that runs what the front end assembles from a line.
///
/// The interpreter hands it three kinds of work: assignments, pure
/// expressions and single calls. Implementations own whatever state these
/// act on, such as variable bindings or a quantum register.
pub trait Executor {
    /// Executes an assignment such as `x = 1 + 2` and returns the new
    /// binding.
    ///
    /// # Errors
    /// Returns [`ExecutionError`] if the source is not a valid assignment or
    /// its right side fails to evaluate.
    fn execute(&mut self, source: &str, line: usize) -> Result<Binding, ExecutionError>;

    /// Evaluates a pure expression such as `3 * 4`.
    ///
    /// # Errors
    /// Returns [`ExecutionError`] if the source does not parse or fails to
    /// evaluate.
    fn evaluate(&mut self, source: &str, line: usize) -> Result<Value, ExecutionError>;

    /// Executes one call. Calls that only have an effect, such as gates,
    /// return `None`.
    ///
    /// # Errors
    /// Returns [`ExecutionError`] if the call is unknown or fails.
    fn call(&mut self, site: &CallSite) -> Result<Option<Value>, ExecutionError>;
}
