use std::iter::Peekable;

use crate::{
    ast::{Expr, LiteralValue, UnaryOperator},
    error::ParseError,
    interpreter::parser::{
        core::{ParseResult, parse_expression},
        token::Token,
        utils::parse_comma_separated,
    },
};

/// Parses a unary expression.
///
/// Supports the prefix operator `-` (numeric negation). Negation is right
/// associative, so `--x` is parsed as `-(-x)`.
///
/// Grammar:
/// ```text
///     unary := "-" unary
///            | primary
/// ```
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Minus, line)) = tokens.peek() {
        tokens.next();
        let expr = parse_unary(tokens)?;
        Ok(Expr::UnaryOp { op:   UnaryOperator::Negate,
                           expr: Box::new(expr),
                           line: *line, })
    } else {
        parse_primary(tokens)
    }
}

/// Parses a primary expression.
///
/// Grammar:
/// ```text
///     primary := number | string
///              | IDENT
///              | IDENT "(" args ")"
///              | "(" expression ")"
/// ```
///
/// # Errors
/// - [`ParseError::UnexpectedEndOfInput`] if the line ends here.
/// - [`ParseError::UnexpectedToken`] for anything that cannot start an
///   expression.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Integer(n), line)) => Ok(Expr::Literal { value: LiteralValue::Integer(*n),
                                                              line:  *line, }),
        Some((Token::Real(r), line)) => Ok(Expr::Literal { value: LiteralValue::Real(*r),
                                                           line:  *line, }),
        Some((Token::Str(s), line)) => Ok(Expr::Literal { value: LiteralValue::Str(s.clone()),
                                                          line:  *line, }),
        Some((Token::Identifier(name), line)) => {
            parse_identifier_or_function(tokens, name.clone(), *line)
        },
        Some((Token::LParen, line)) => parse_grouping(tokens, *line),
        Some((Token::NewLine, line)) => Err(ParseError::UnexpectedEndOfInput { line: *line }),
        Some((tok, line)) => Err(ParseError::UnexpectedToken { token: tok.to_string(),
                                                               line:  *line, }),
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses the rest of a parenthesized expression after `(`.
///
/// # Returns
/// The inner expression as-is (no wrapper node).
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let expr = parse_expression(tokens)?;
    match tokens.next() {
        Some((Token::RParen, _)) => Ok(expr),
        _ => Err(ParseError::ExpectedClosingParen { line }),
    }
}

/// Parses a name that has already been consumed, either as a variable or,
/// when followed by `(`, as a function call.
fn parse_identifier_or_function<'a, I>(tokens: &mut Peekable<I>,
                                       name: String,
                                       line: usize)
                                       -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::LParen, _)) => {
            tokens.next();
            let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
            Ok(Expr::FunctionCall { name,
                                    arguments,
                                    line })
        },
        _ => Ok(Expr::Variable { name, line }),
    }
}
