use tracing::warn;

use crate::interpreter::lexer::scanner::Scanner;

/// Post-processes the text matched by a rule.
///
/// The callback receives the scanner (already advanced past the match) and
/// the matched text, and returns the value to store in the token.
pub type Callback = fn(&Scanner<'_, '_>, &str) -> Option<String>;

/// An annotation marker, such as `step:` at the start of a line or `:note:`.
pub const SUPPLIMENT: &str = "SUPPLIMENT";
/// A name directly followed by a parenthesized argument list, e.g. `H(q)`.
pub const OBJECT: &str = "OBJECT";
/// A plain name.
pub const IDENTIFIER: &str = "IDENTIFIER";
/// One of `+ - \ * =`.
pub const OPERATOR: &str = "OPERATOR";
/// An integer or decimal numeral.
pub const DIGIT: &str = "DIGIT";
/// A double-quoted string.
pub const LITERAL: &str = "LITERAL";
/// A statement separator, `;`.
pub const END_STMNT: &str = "END_STMNT";

/// A named lexical rule.
#[derive(Debug, Clone)]
pub struct Rule {
    name:     String,
    pattern:  String,
    callback: Option<Callback>,
}

impl Rule {
    /// Creates a rule without a callback.
    #[must_use]
    pub fn new(name: &str, pattern: &str) -> Self {
        Self { name:     name.to_string(),
               pattern:  pattern.to_string(),
               callback: None, }
    }

    /// Attaches a callback that transforms every value the rule matches.
    #[must_use]
    pub fn with_callback(mut self, callback: Callback) -> Self {
        self.callback = Some(callback);
        self
    }

    /// The rule name, which becomes the kind of its tokens.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The regular expression of the rule.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The callback of the rule, if any.
    #[must_use]
    pub const fn callback(&self) -> Option<Callback> {
        self.callback
    }
}

/// The rule table of the command notation, in match priority order.
///
/// Call arguments may nest one level of parentheses, as in `f(g(1),2)`.
#[must_use]
pub fn command_rules() -> Vec<Rule> {
    vec![Rule::new(SUPPLIMENT, r"^[a-zA-Z]+:|:[a-zA-Z]+:"),
         Rule::new(OBJECT, r"[a-zA-Z_]\w*\((?:[^()\n]|\([^()\n]*\))*\)"),
         Rule::new(IDENTIFIER, r"[a-zA-Z_]\w*"),
         Rule::new(OPERATOR, r"\+|-|\\|\*|="),
         Rule::new(DIGIT, r"[0-9]+(?:\.[0-9]+)?"),
         Rule::new(LITERAL, r#""[^"\n]*""#),
         Rule::new(END_STMNT, ";").with_callback(end_statement),]
}

/// Statement separators are recognized but multi-statement lines are not
/// supported; the separator is reported and carries no value.
fn end_statement(scanner: &Scanner<'_, '_>, lexeme: &str) -> Option<String> {
    warn!(position = scanner.position(),
          "statement separator '{lexeme}' is not supported and will be ignored");
    None
}
