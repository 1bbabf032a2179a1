use thiserror::Error;

/// Raised while scanning when no rule matches at the cursor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// No rule of the lexer matched the input at the current position.
    #[error("Error on line {line}: Found unknown token '{token}'.")]
    UnknownToken {
        /// The offending character.
        token: char,
        /// The 1-based line number of the offending character.
        line:  usize,
    },
}

impl LexError {
    /// Returns the 1-based line number the error was found on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnknownToken { line, .. } => *line,
        }
    }
}

/// Raised when a lexer cannot be built from the supplied rule table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexerConfigError {
    /// The rule table contained no rules.
    #[error("A lexer needs at least one rule.")]
    EmptyRuleSet,
    /// A rule name is not usable as a token kind.
    #[error("Rule name '{name}' must start with a letter or underscore and contain only word characters.")]
    InvalidRuleName {
        /// The rejected name.
        name: String,
    },
    /// Two rules share the same name.
    #[error("Rule '{name}' is defined more than once.")]
    DuplicateRule {
        /// The duplicated name.
        name: String,
    },
    /// The pattern of a rule does not compile.
    #[error("Rule '{name}' has an invalid pattern: {details}")]
    InvalidPattern {
        /// The name of the rule.
        name:    String,
        /// The compiler's description of the problem.
        details: String,
    },
}
