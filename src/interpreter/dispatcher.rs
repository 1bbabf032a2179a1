use tracing::debug;

use crate::{
    error::InterpretError,
    interpreter::{
        executor::{CallSite, Executor},
        normalizer::{Call, NormalizedItem, handle::HandleTable},
        tree::ExpressionTree,
        value::core::Value,
    },
};

/// What a normalized line asks the interpreter to do.
///
/// The choice is made once per line by [`Command::classify`]: a line with at
/// least one call runs its calls and nothing else, any other line is an
/// expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A line without calls, in item order.
    Expression(Vec<NormalizedItem>),
    /// The calls of a line, in order.
    Calls(Vec<Call>),
}

impl Command {
    /// Classifies a normalized line. An empty line is no command at all.
    ///
    /// # Example
    /// ```
    /// use qline::interpreter::{
    ///     dispatcher::Command,
    ///     lexer::Token,
    ///     normalizer::normalize,
    /// };
    ///
    /// let normalized = normalize(&[Token::new("OBJECT", "H(q)")]).unwrap();
    /// assert!(matches!(Command::classify(normalized.items), Some(Command::Calls(_))));
    ///
    /// assert_eq!(Command::classify(Vec::new()), None);
    /// ```
    #[must_use]
    pub fn classify(items: Vec<NormalizedItem>) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        if !items.iter().any(|item| matches!(item, NormalizedItem::Call(_))) {
            return Some(Self::Expression(items));
        }

        let total = items.len();
        let calls: Vec<Call> = items.into_iter()
                                    .filter_map(|item| match item {
                                        NormalizedItem::Call(call) => Some(call),
                                        _ => None,
                                    })
                                    .collect();
        if calls.len() < total {
            debug!(ignored = total - calls.len(), "line has calls, other items are ignored");
        }
        Some(Self::Calls(calls))
    }
}

/// A call that has been run, with what it returned.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutedCall {
    /// The call as it was executed, `name(arg1,arg2,...)`.
    pub source: String,
    /// The returned value. Gate calls return nothing.
    pub value:  Option<Value>,
}

/// The result of interpreting one line.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The line had nothing to run.
    Nothing,
    /// An expression was evaluated.
    Value(Value),
    /// An assignment was executed.
    Assigned {
        /// The bound name.
        name:  String,
        /// The value bound to it.
        value: Value,
    },
    /// The calls of the line were executed, in order.
    Executed(Vec<ExecutedCall>),
}

/// Runs a classified line against `executor`.
///
/// An expression line is built into an [`ExpressionTree`] and resolved into
/// a single string. If that string contains `=` it is executed as an
/// assignment, otherwise it is evaluated. A call line executes every call in
/// order and stops at the first failure.
///
/// # Errors
/// - [`InterpretError::DetachedItem`] or [`InterpretError::UnresolvedHandle`]
///   if the expression cannot be assembled.
/// - [`InterpretError::Execution`] if the executor rejects the assembled
///   string or a call.
pub fn dispatch(command: Command,
                handles: &HandleTable,
                executor: &mut dyn Executor,
                line: usize)
                -> Result<Outcome, InterpretError> {
    match command {
        Command::Expression(items) => {
            let expression = ExpressionTree::build(items).resolve(handles)?;

            if expression.contains('=') {
                let binding = executor.execute(&expression, line)?;
                Ok(Outcome::Assigned { name:  binding.name,
                                       value: binding.value, })
            } else {
                Ok(Outcome::Value(executor.evaluate(&expression, line)?))
            }
        },
        Command::Calls(calls) => {
            let mut executed = Vec::with_capacity(calls.len());
            for call in calls {
                let arguments = call.resolved_arguments(handles)?;
                let site = CallSite { source: format!("{}({})", call.name, arguments.join(",")),
                                      name: call.name,
                                      arguments,
                                      line };
                debug!(call = %site.source, "executing call");

                let value = executor.call(&site)?;
                executed.push(ExecutedCall { source: site.source,
                                             value });
            }
            Ok(Outcome::Executed(executed))
        },
    }
}
