use std::iter::Peekable;

use logos::Logos;
use tracing::trace;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::parser::{
        binary::parse_additive,
        token::{LexerExtras, Token},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, addition, and recursively descends through the
/// precedence hierarchy.
///
/// Grammar: `expression := additive`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_additive(tokens)
}

/// Tokenizes an assembled string that starts on `line`.
///
/// The returned stream always ends with a [`Token::NewLine`] marker, so
/// parsers can report the line of an unexpected end of input.
///
/// # Errors
/// - [`ParseError::LiteralTooLarge`] for an integer outside the `i64` range.
/// - [`ParseError::UnexpectedToken`] with the offending slice for input no
///   token accepts.
///
/// # Example
/// ```
/// use qline::interpreter::parser::{core::tokenize, token::Token};
///
/// let tokens = tokenize(r"6 \ 3", 1).unwrap();
/// let kinds: Vec<_> = tokens.into_iter().map(|(token, _)| token).collect();
///
/// assert_eq!(kinds,
///            [Token::Integer(6), Token::Backslash, Token::Integer(3), Token::NewLine]);
/// ```
pub fn tokenize(source: &str, line: usize) -> ParseResult<Vec<(Token, usize)>> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line });

    while let Some(token) = lexer.next() {
        if let Ok(tok) = token {
            tokens.push((tok, lexer.extras.line));
        } else {
            let slice = lexer.slice();
            let line = lexer.extras.line;
            if slice.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ParseError::LiteralTooLarge { literal: slice.to_string(),
                                                         line });
            }
            return Err(ParseError::UnexpectedToken { token: slice.to_string(),
                                                     line });
        }
    }
    tokens.push((Token::NewLine, lexer.extras.line));

    trace!(count = tokens.len(), source, "tokenized assembled string");

    Ok(tokens)
}

/// Requires the token stream to be exhausted, apart from line ends.
///
/// # Errors
/// Returns [`ParseError::UnexpectedTrailingTokens`] for the first token that
/// is left over.
pub fn expect_end<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    for (token, line) in tokens {
        if *token != Token::NewLine {
            return Err(ParseError::UnexpectedTrailingTokens { token: token.to_string(),
                                                              line:  *line, });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::BinaryOperator;

    fn parse(source: &str) -> ParseResult<Expr> {
        let tokens = tokenize(source, 1)?;
        let mut iter = tokens.iter().peekable();
        let expr = parse_expression(&mut iter)?;
        expect_end(&mut iter)?;
        Ok(expr)
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let Expr::BinaryOp { op, right, .. } = parse("1 + 2 * 3").unwrap() else { panic!() };
        assert_eq!(op, BinaryOperator::Add);
        assert!(matches!(*right, Expr::BinaryOp { op: BinaryOperator::Mul, .. }));
    }

    #[test]
    fn both_slashes_divide() {
        for source in [r"6 \ 3", "6 / 3"] {
            assert!(matches!(parse(source).unwrap(),
                             Expr::BinaryOp { op: BinaryOperator::Div, .. }));
        }
    }

    #[test]
    fn incomplete_input_reports_its_line() {
        assert_eq!(parse("1 +").unwrap_err(), ParseError::UnexpectedEndOfInput { line: 1 });
        assert_eq!(parse("(1 + 2").unwrap_err(), ParseError::ExpectedClosingParen { line: 1 });
        assert_eq!(parse("sqrt(4").unwrap_err(), ParseError::UnexpectedEndOfInput { line: 1 });
        assert_eq!(parse("3 4").unwrap_err(),
                   ParseError::UnexpectedTrailingTokens { token: "4".to_string(),
                                                          line:  1, });
    }

    #[test]
    fn assignments_are_not_expressions() {
        assert_eq!(parse("x = 1").unwrap_err(),
                   ParseError::UnexpectedTrailingTokens { token: "=".to_string(),
                                                          line:  1, });
    }

    #[test]
    fn unknown_characters_are_unexpected_tokens() {
        assert_eq!(parse("2 ^ 3").unwrap_err(),
                   ParseError::UnexpectedToken { token: "^".to_string(),
                                                 line:  1, });
    }

    #[test]
    fn oversized_integers_are_named_as_such() {
        assert_eq!(tokenize("1 + 99999999999999999999", 3).unwrap_err(),
                   ParseError::LiteralTooLarge { literal: "99999999999999999999".to_string(),
                                                 line:    3, });
        assert!(tokenize("9223372036854775807", 1).is_ok());
    }

    #[test]
    fn calls_take_comma_separated_expressions() {
        let Expr::FunctionCall { name, arguments, .. } = parse("f(1, x + 2, g())").unwrap() else {
            panic!()
        };
        assert_eq!(name, "f");
        assert_eq!(arguments.len(), 3);
        assert!(matches!(&arguments[2], Expr::FunctionCall { arguments, .. } if arguments.is_empty()));
    }
}
