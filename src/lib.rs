//! # qline
//!
//! qline is a line interpreter for a small quantum-circuit command notation.
//! Each line is scanned by a rule-driven lexer, its literals are replaced by
//! opaque handles, and the line is either evaluated as an expression,
//! executed as an assignment, or run as a sequence of gate calls against a
//! state-vector register.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    error::InterpretError,
    interpreter::{
        dispatcher::Outcome,
        lexer::LexerOptions,
        session::Interpreter,
    },
};

/// Defines the structure of parsed code.
///
/// The AST is produced by the parser from an assembled expression string and
/// consumed by the evaluator.
pub mod ast;
/// Error types for every stage of interpretation.
///
/// # Responsibilities
/// - Defines one error enum per stage: lexing, parsing, evaluation and line
///   interpretation.
/// - Attaches line numbers and detailed messages for context.
pub mod error;
/// Interprets lines of the command notation.
///
/// This module ties together the rule lexer, the normalizer, the expression
/// tree, the dispatcher and the execution engine.
///
/// # Responsibilities
/// - Coordinates all core components.
/// - Provides [`Interpreter`] as the entry point for one line at a time.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// # Responsibilities
/// - Safely convert between `i64` and `f64` without silent data loss.
pub mod util;

/// Interprets every line of `source` in one session.
///
/// Blank lines are skipped. With `auto_print`, the value of every evaluated
/// expression and call is printed.
///
/// # Errors
/// Returns the first error any line runs into. Lines after it are not
/// interpreted.
///
/// # Examples
/// ```
/// use qline::run_script;
///
/// let source = "x = 2 + 2\nH(a)\nCNOT(a, b)\nx * 3";
/// assert!(run_script(source, false).is_ok());
///
/// // 'y' is not defined
/// assert!(run_script("y + 1", false).is_err());
/// ```
pub fn run_script(source: &str, auto_print: bool) -> Result<(), InterpretError> {
    run_script_with(source, LexerOptions::default(), auto_print)
}

/// Like [`run_script`], with custom lexer options.
///
/// # Errors
/// Returns the first error any line runs into.
pub fn run_script_with(source: &str,
                       options: LexerOptions,
                       auto_print: bool)
                       -> Result<(), InterpretError> {
    let mut interpreter = Interpreter::with_options(options)?;

    for line in source.lines() {
        if line.trim().is_empty() {
            interpreter.skip_line();
            continue;
        }

        let outcome = interpreter.interpret(line)?;
        if auto_print {
            print_outcome(&outcome);
        }
    }

    Ok(())
}

fn print_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Value(value) => println!("{value}"),
        Outcome::Executed(calls) => {
            for value in calls.iter().filter_map(|call| call.value.as_ref()) {
                println!("{value}");
            }
        },
        Outcome::Nothing | Outcome::Assigned { .. } => {},
    }
}
