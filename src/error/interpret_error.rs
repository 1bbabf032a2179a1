use thiserror::Error;

use crate::{
    error::{LexError, LexerConfigError, ParseError, RuntimeError},
    interpreter::normalizer::handle::Handle,
};

/// A failure of the execution engine while running an assembled string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// The assembled string is not valid syntax.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The assembled string failed while being evaluated.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Every way interpreting a single line can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpretError {
    /// The interpreter's lexer could not be built.
    #[error(transparent)]
    Configuration(#[from] LexerConfigError),
    /// The line contains a character no lexer rule accepts.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// A call token could not be split into a name and an argument list.
    #[error("Malformed call '{lexeme}': {reason}.")]
    MalformedCall {
        /// The lexeme of the offending call token.
        lexeme: String,
        /// What is wrong with it.
        reason: &'static str,
    },
    /// A token reached the normalizer that it has no translation for.
    #[error("Token of kind '{kind}' cannot be interpreted.")]
    UnsupportedToken {
        /// The kind of the token.
        kind: String,
    },
    /// A handle was looked up that its table never issued. This is a defect
    /// in the interpreter, not in the input.
    #[error("Internal error: {handle} has no recorded value.")]
    UnresolvedHandle {
        /// The handle that failed to resolve.
        handle: Handle,
    },
    /// An item of the line is not connected to the expression chain.
    #[error("Item {index} of the line is not connected to any operator.")]
    DetachedItem {
        /// The position of the item in the normalized line.
        index: usize,
    },
    /// The execution engine rejected the assembled string.
    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

impl From<ParseError> for InterpretError {
    fn from(error: ParseError) -> Self {
        Self::Execution(error.into())
    }
}

impl From<RuntimeError> for InterpretError {
    fn from(error: RuntimeError) -> Self {
        Self::Execution(error.into())
    }
}
