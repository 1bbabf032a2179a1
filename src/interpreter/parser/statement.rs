use std::iter::Peekable;

use crate::{
    ast::Assignment,
    error::ParseError,
    interpreter::parser::{
        core::{ParseResult, expect_end, parse_expression},
        token::Token,
    },
};

/// Parses an assignment of the form `name = expression` and requires the
/// input to end after it.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, line)` pairs.
///
/// # Errors
/// - [`ParseError::InvalidAssignmentTarget`] if there is an `=` but the left
///   side is not a single name, as in `1 + 1 = 2`.
/// - [`ParseError::ExpectedAssignment`] if there is no `=` at all.
/// - [`ParseError::UnexpectedTrailingTokens`] for a chained `a = b = c`.
///
/// # Example
/// ```
/// use qline::interpreter::parser::{core::tokenize, statement::parse_assignment};
///
/// let tokens = tokenize("x = 1 + 2", 1).unwrap();
/// let assignment = parse_assignment(&mut tokens.iter().peekable()).unwrap();
///
/// assert_eq!(assignment.name, "x");
/// ```
pub fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Assignment>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = tokens.peek().map_or(0, |(_, l)| *l);
    let mut lookahead = tokens.clone();

    match (lookahead.next(), lookahead.next()) {
        (Some((Token::Identifier(name), line)), Some((Token::Equals, _))) => {
            tokens.next();
            tokens.next();
            let value = parse_expression(tokens)?;
            expect_end(tokens)?;

            Ok(Assignment { name: name.clone(),
                            value,
                            line: *line })
        },
        _ if tokens.clone().any(|(token, _)| *token == Token::Equals) => {
            Err(ParseError::InvalidAssignmentTarget { line })
        },
        _ => Err(ParseError::ExpectedAssignment { line }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::{Expr, LiteralValue},
        interpreter::parser::core::tokenize,
    };

    fn parse(source: &str, line: usize) -> ParseResult<Assignment> {
        let tokens = tokenize(source, line)?;
        parse_assignment(&mut tokens.iter().peekable())
    }

    #[test]
    fn assignment_needs_a_single_name_on_the_left() {
        assert_eq!(parse("1 + 1 = 2", 1).unwrap_err(),
                   ParseError::InvalidAssignmentTarget { line: 1 });
        assert_eq!(parse("x = 1 = 2", 1).unwrap_err(),
                   ParseError::UnexpectedTrailingTokens { token: "=".to_string(),
                                                          line:  1, });
    }

    #[test]
    fn strings_can_be_assigned() {
        assert_eq!(parse(r#"greeting = "hi""#, 1).unwrap(),
                   Assignment { name:  "greeting".to_string(),
                                value: Expr::Literal { value: LiteralValue::Str("hi".to_string()),
                                                       line:  1, },
                                line:  1, });
    }

    #[test]
    fn plain_expressions_are_rejected() {
        assert_eq!(parse("3 * 4", 9).unwrap_err(), ParseError::ExpectedAssignment { line: 9 });
    }

    #[test]
    fn the_right_side_must_be_complete() {
        assert_eq!(parse("x = 1 +", 2).unwrap_err(),
                   ParseError::UnexpectedEndOfInput { line: 2 });
    }
}
