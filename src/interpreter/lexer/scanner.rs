use tracing::trace;

use crate::{
    error::LexError,
    interpreter::lexer::{Lexer, Token},
};

/// Scans a single input with the rules of a [`Lexer`].
///
/// The scanner only tracks a cursor. It yields one token per step and is
/// exhausted once the cursor reaches the end of the input. After a
/// [`LexError`] it yields nothing further.
#[derive(Debug)]
pub struct Scanner<'l, 'i> {
    lexer:    &'l Lexer,
    input:    &'i str,
    position: usize,
    failed:   bool,
}

impl<'l, 'i> Scanner<'l, 'i> {
    pub(crate) const fn new(lexer: &'l Lexer, input: &'i str) -> Self {
        Self { lexer,
               input,
               position: 0,
               failed: false }
    }

    /// Returns true once the cursor has reached the end of the input.
    ///
    /// # Example
    /// ```
    /// use qline::interpreter::lexer::{Lexer, LexerOptions, rule::command_rules};
    ///
    /// let lexer = Lexer::new(command_rules(), LexerOptions::default()).unwrap();
    /// let mut scanner = lexer.scan("x");
    ///
    /// assert!(!scanner.done_scanning());
    /// scanner.next();
    /// assert!(scanner.done_scanning());
    /// assert!(scanner.next().is_none());
    /// ```
    #[must_use]
    pub const fn done_scanning(&self) -> bool {
        self.position >= self.input.len()
    }

    /// The byte offset of the cursor.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// The input being scanned.
    #[must_use]
    pub const fn input(&self) -> &'i str {
        self.input
    }

    /// Reads the next token.
    ///
    /// Leading whitespace is consumed first when the lexer omits whitespace.
    /// Returns `None` when the input is exhausted.
    pub fn scan_next(&mut self) -> Option<Result<Token, LexError>> {
        if self.failed || self.done_scanning() {
            return None;
        }

        if self.lexer.options().omit_whitespace
           && let Some(found) = self.lexer.whitespace().find_at(self.input, self.position)
           && found.start() == self.position
        {
            self.position = found.end();
            if self.done_scanning() {
                return None;
            }
        }

        // The leftmost match may start further on; only a match at the
        // cursor counts, and an empty one would never advance it.
        let matched = self.lexer
                          .pattern()
                          .captures_at(self.input, self.position)
                          .filter(|caps| {
                              caps.get(0)
                                  .is_some_and(|m| m.start() == self.position && !m.is_empty())
                          });

        let Some(captures) = matched else {
            self.failed = true;
            return Some(Err(self.unknown_token()));
        };

        let Some((kind, lexeme)) =
            self.lexer
                .rule_names()
                .iter()
                .find_map(|name| captures.name(name).map(|m| (name.clone(), m)))
        else {
            self.failed = true;
            return Some(Err(self.unknown_token()));
        };

        self.position = lexeme.end();
        let lexeme = lexeme.as_str();

        let value = match self.lexer.callback(&kind) {
            Some(callback) => callback(self, lexeme),
            None => Some(lexeme.to_string()),
        };

        trace!(kind = %kind, lexeme, "scanned token");

        Some(Ok(Token { kind,
                        lexeme: lexeme.to_string(),
                        value }))
    }

    fn unknown_token(&self) -> LexError {
        let token = self.input[self.position..].chars().next().unwrap_or_default();
        let line = self.input[..self.position].matches('\n').count() + 1;
        LexError::UnknownToken { token, line }
    }
}

impl Iterator for Scanner<'_, '_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.scan_next()
    }
}

#[cfg(test)]
mod tests {
    use crate::interpreter::lexer::{Lexer, LexerOptions, rule::command_rules};

    #[test]
    fn scanner_is_exhausted_exactly_at_the_end() {
        let lexer = Lexer::new(command_rules(), LexerOptions::default()).unwrap();
        let mut scanner = lexer.scan("3*4");

        assert_eq!(scanner.position(), 0);
        assert_eq!(scanner.next().unwrap().unwrap().lexeme, "3");
        assert_eq!(scanner.position(), 1);
        scanner.next();
        assert!(!scanner.done_scanning());
        scanner.next();
        assert!(scanner.done_scanning());
        assert!(scanner.next().is_none());
        assert!(scanner.next().is_none());
    }

    #[test]
    fn scanner_stops_after_an_error() {
        let lexer = Lexer::new(command_rules(), LexerOptions::default()).unwrap();
        let mut scanner = lexer.scan("x ? y");

        assert!(scanner.next().unwrap().is_ok());
        assert!(scanner.next().unwrap().is_err());
        assert!(scanner.next().is_none());
        assert!(!scanner.done_scanning());
    }

    #[test]
    fn every_scan_starts_fresh() {
        let lexer = Lexer::new(command_rules(), LexerOptions::default()).unwrap();
        let first = lexer.scan("a + b").count();
        let second = lexer.scan("a + b").count();
        assert_eq!(first, 3);
        assert_eq!(first, second);
        assert_eq!(lexer.scan("a + b").input(), "a + b");
    }

    #[test]
    fn error_line_counts_newlines_before_the_failure() {
        let lexer = Lexer::new(command_rules(), LexerOptions::default()).unwrap();
        let error = lexer.tokenize("a\nb\n\n#").unwrap_err();
        assert_eq!(error.line(), 4);
    }
}
