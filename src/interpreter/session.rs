use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::{
    error::{InterpretError, LexError, LexerConfigError},
    interpreter::{
        achievement::{AchievementEngine, ChallengeBook},
        dispatcher::{Command, Outcome, dispatch},
        evaluator::core::Context,
        executor::Executor,
        lexer::{Lexer, LexerOptions, rule::command_rules},
        normalizer::normalize,
        value::core::Value,
    },
};

/// Interprets the command notation one line at a time.
///
/// The interpreter owns everything that outlives a line: the lexer, the
/// executor and its bindings, the achievement engine and the line counter.
/// Everything a line creates, its tokens, handles and tree, is dropped when
/// [`Interpreter::interpret`] returns.
///
/// # Example
/// ```
/// use qline::interpreter::{dispatcher::Outcome, session::Interpreter, value::core::Value};
///
/// let mut interpreter = Interpreter::new().unwrap();
///
/// assert_eq!(interpreter.interpret("3*4").unwrap(), Outcome::Value(Value::Integer(12)));
/// assert!(matches!(interpreter.interpret("had(1)").unwrap(), Outcome::Executed(_)));
/// ```
pub struct Interpreter {
    lexer:        Lexer,
    executor:     Box<dyn Executor>,
    achievements: Box<dyn AchievementEngine>,
    user_vars:    HashMap<String, Value>,
    line:         usize,
}

impl Interpreter {
    /// Creates an interpreter with the command rules, a fresh [`Context`] and
    /// the default [`ChallengeBook`].
    ///
    /// # Errors
    /// Returns a [`LexerConfigError`] if the command rules do not compile.
    pub fn new() -> Result<Self, LexerConfigError> {
        Self::with_options(LexerOptions::default())
    }

    /// Like [`Interpreter::new`], with custom lexer options.
    ///
    /// # Errors
    /// Returns a [`LexerConfigError`] if the command rules do not compile.
    pub fn with_options(options: LexerOptions) -> Result<Self, LexerConfigError> {
        let lexer = Lexer::new(command_rules(), options)?;
        Ok(Self::with_parts(lexer, Box::new(Context::new()), Box::new(ChallengeBook::new())))
    }

    /// Assembles an interpreter from its collaborators.
    #[must_use]
    pub fn with_parts(lexer: Lexer,
                      executor: Box<dyn Executor>,
                      achievements: Box<dyn AchievementEngine>)
                      -> Self {
        Self { lexer,
               executor,
               achievements,
               user_vars: HashMap::new(),
               line: 0 }
    }

    /// Variables meant to persist across lines. Nothing writes to them yet;
    /// assignments bind in the executor instead.
    #[must_use]
    pub const fn user_vars(&self) -> &HashMap<String, Value> {
        &self.user_vars
    }

    /// The number of lines interpreted so far, including failed ones.
    #[must_use]
    pub const fn lines_interpreted(&self) -> usize {
        self.line
    }

    /// Counts a line that is not interpreted, such as a blank line of a
    /// script, so later errors keep their line numbers.
    pub const fn skip_line(&mut self) {
        self.line += 1;
    }

    /// Interprets one line.
    ///
    /// The line is scanned, handed to the achievement engine as the
    /// concatenation of its lexemes, normalized, classified and dispatched.
    ///
    /// # Errors
    /// Returns the first [`InterpretError`] any stage runs into. Lexer errors
    /// carry the number of this line within the session.
    #[instrument(skip(self))]
    pub fn interpret(&mut self, line: &str) -> Result<Outcome, InterpretError> {
        self.line += 1;
        let number = self.line;

        let tokens = self.lexer
                         .tokenize(line)
                         .map_err(|LexError::UnknownToken { token, line: at }| {
                             LexError::UnknownToken { token,
                                                      line: number + at - 1 }
                         })?;

        let raw: String = tokens.iter().map(|token| token.lexeme.as_str()).collect();
        self.achievements.check_and_award(&raw);

        let normalized = normalize(&tokens)?;
        let Some(command) = Command::classify(normalized.items) else {
            debug!("nothing to run");
            return Ok(Outcome::Nothing);
        };

        dispatch(command, &normalized.handles, self.executor.as_mut(), number)
    }
}
