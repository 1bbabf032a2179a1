/// Tokens of the execution engine's grammar.
///
/// A `logos` token enum for assembled expression and call strings. It is
/// unrelated to the rule-driven command lexer, which only splits a raw line.
pub mod token;

/// Core parsing entry points.
///
/// Contains the result alias, the expression entry point and tokenization of
/// a whole assembled string.
pub mod core;

/// Unary and primary expression parsing.
///
/// Handles negation, literals, names, calls and parenthesized groups.
pub mod unary;

/// Binary operator parsing.
///
/// Implements the additive and multiplicative precedence levels, both left
/// associative.
pub mod binary;

/// Utility functions for the parser.
pub mod utils;

/// Assignment parsing.
///
/// An assembled string containing `=` must be a single `name = expression`.
pub mod statement;
