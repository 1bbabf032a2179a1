use tracing::debug;

use crate::{
    error::InterpretError,
    interpreter::{
        lexer::{
            Token,
            rule::{DIGIT, END_STMNT, IDENTIFIER, LITERAL, OBJECT, OPERATOR, SUPPLIMENT},
        },
        normalizer::handle::{Handle, HandleTable},
    },
};

/// Opaque value handles and the per-line table that resolves them.
pub mod handle;

/// A call found on a line: the function name and one handle per argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// The name of the called function.
    pub name:      String,
    /// Handles standing in for the argument texts, in order.
    pub arguments: Vec<Handle>,
}

impl Call {
    /// Rebuilds the call as `name(arg1,arg2,...)` with every argument handle
    /// replaced by its recorded text.
    ///
    /// # Errors
    /// Returns [`InterpretError::UnresolvedHandle`] if an argument handle is
    /// not in `handles`.
    pub fn source(&self, handles: &HandleTable) -> Result<String, InterpretError> {
        let arguments = self.resolved_arguments(handles)?;
        Ok(format!("{}({})", self.name, arguments.join(",")))
    }

    /// The argument texts behind the handles, in order.
    ///
    /// # Errors
    /// Returns [`InterpretError::UnresolvedHandle`] if an argument handle is
    /// not in `handles`.
    pub fn resolved_arguments(&self, handles: &HandleTable) -> Result<Vec<String>, InterpretError> {
        self.arguments
            .iter()
            .map(|handle| handles.resolve(*handle).map(str::to_string))
            .collect()
    }
}

/// A token after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedItem {
    /// An operator, kept verbatim.
    Operator(String),
    /// A name, kept verbatim.
    Identifier(String),
    /// A literal or number, replaced by a handle.
    ValueHandle(Handle),
    /// A call, with its arguments replaced by handles.
    Call(Call),
}

impl NormalizedItem {
    /// Returns true for [`NormalizedItem::Operator`].
    #[must_use]
    pub const fn is_operator(&self) -> bool {
        matches!(self, Self::Operator(_))
    }
}

/// The normalized form of one line.
///
/// Owns the handle table of the line; dropping it invalidates every handle
/// in `items`.
#[derive(Debug)]
pub struct Normalized {
    /// The normalized items, in line order.
    pub items:   Vec<NormalizedItem>,
    /// The values behind every handle in `items`.
    pub handles: HandleTable,
}

/// Normalizes the tokens of one line.
///
/// Annotation and separator tokens are dropped. Call tokens become
/// [`NormalizedItem::Call`] with one fresh handle per argument. Literals and
/// numbers become [`NormalizedItem::ValueHandle`]. Names and operators pass
/// through.
///
/// # Errors
/// - [`InterpretError::MalformedCall`] if a call token cannot be split into a
///   name and a well-formed argument list.
/// - [`InterpretError::UnsupportedToken`] for token kinds outside the command
///   rule table, or literals without a value.
///
/// # Example
/// ```
/// use qline::interpreter::{
///     lexer::Token,
///     normalizer::{NormalizedItem, normalize},
/// };
///
/// let tokens = [Token::new("OBJECT", "had(1)")];
/// let normalized = normalize(&tokens).unwrap();
///
/// let NormalizedItem::Call(call) = &normalized.items[0] else { panic!() };
/// assert_eq!(call.name, "had");
/// assert_eq!(normalized.handles.get(call.arguments[0]), Some("1"));
/// ```
pub fn normalize(tokens: &[Token]) -> Result<Normalized, InterpretError> {
    let mut handles = HandleTable::new();
    let mut items = Vec::with_capacity(tokens.len());

    for token in tokens {
        match token.kind.as_str() {
            SUPPLIMENT | END_STMNT => {},
            OBJECT => {
                let lexeme = token_value(token)?;
                let (name, arguments) = split_call(lexeme)?;
                let arguments = arguments.into_iter()
                                         .map(|argument| handles.allocate(argument))
                                         .collect();
                items.push(NormalizedItem::Call(Call { name: name.to_string(),
                                                       arguments }));
            },
            LITERAL | DIGIT => {
                let handle = handles.allocate(token_value(token)?);
                items.push(NormalizedItem::ValueHandle(handle));
            },
            IDENTIFIER => items.push(NormalizedItem::Identifier(token_value(token)?.to_string())),
            OPERATOR => items.push(NormalizedItem::Operator(token_value(token)?.to_string())),
            kind => return Err(InterpretError::UnsupportedToken { kind: kind.to_string() }),
        }
    }

    debug!(items = items.len(), handles = handles.len(), "normalized line");

    Ok(Normalized { items, handles })
}

fn token_value(token: &Token) -> Result<&str, InterpretError> {
    token.value
         .as_deref()
         .ok_or_else(|| InterpretError::UnsupportedToken { kind: token.kind.clone() })
}

/// Splits `name(a, b)` into its name and trimmed top-level arguments.
///
/// Commas inside nested parentheses belong to their argument.
fn split_call(lexeme: &str) -> Result<(&str, Vec<&str>), InterpretError> {
    let malformed = |reason| InterpretError::MalformedCall { lexeme: lexeme.to_string(),
                                                             reason };

    let open = lexeme.find('(').ok_or_else(|| malformed("missing '('"))?;
    let name = lexeme[..open].trim();
    if name.is_empty() {
        return Err(malformed("missing function name"));
    }
    let inner = lexeme[open + 1..].strip_suffix(')')
                                  .ok_or_else(|| malformed("missing closing ')'"))?;

    if inner.trim().is_empty() {
        return Ok((name, Vec::new()));
    }

    let mut arguments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in inner.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.checked_sub(1)
                             .ok_or_else(|| malformed("unbalanced parentheses"))?;
            },
            ',' if depth == 0 => {
                arguments.push(inner[start..i].trim());
                start = i + 1;
            },
            _ => {},
        }
    }
    if depth != 0 {
        return Err(malformed("unbalanced parentheses"));
    }
    arguments.push(inner[start..].trim());

    if arguments.iter().any(|argument| argument.is_empty()) {
        return Err(malformed("empty argument"));
    }

    Ok((name, arguments))
}
