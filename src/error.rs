/// Lexing errors.
///
/// Covers both failures to build a [`Lexer`](crate::interpreter::lexer::Lexer)
/// from a rule table and failures to match input while scanning a line.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while the execution engine parses
/// an assembled expression or call string, such as unexpected tokens,
/// invalid assignment targets or trailing input.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation and
/// execution. Runtime errors include things like division by zero, type
/// mismatches, unknown names or invalid gate applications.
pub mod runtime_error;
/// Line interpretation errors.
///
/// The top level error surfaced by
/// [`Interpreter::interpret`](crate::interpreter::session::Interpreter::interpret).
/// Every failure of the pipeline maps to exactly one variant so callers can
/// branch on the kind of failure without inspecting messages.
pub mod interpret_error;

pub use interpret_error::{ExecutionError, InterpretError};
pub use lex_error::{LexError, LexerConfigError};
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
