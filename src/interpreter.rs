/// Challenges completed by typing matching lines.
///
/// The interpreter hands every scanned line to an [`AchievementEngine`]
/// before running it. The bundled [`ChallengeBook`] matches the line against
/// a small table of patterns and awards each challenge once.
///
/// [`AchievementEngine`]: achievement::AchievementEngine
/// [`ChallengeBook`]: achievement::ChallengeBook
pub mod achievement;
/// Routes a normalized line to the executor.
///
/// # Responsibilities
/// - Classifies a line once as either an expression or a list of calls.
/// - Assembles expressions through the expression tree and decides between
///   assignment and evaluation.
/// - Resolves call arguments and runs the calls in order.
pub mod dispatcher;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the AST of an assembled expression, performs the
/// arithmetic, looks up variables and builtins and produces a value.
/// [`Context`](evaluator::core::Context) is the bundled
/// [`Executor`](executor::Executor).
///
/// # Responsibilities
/// - Evaluates AST nodes with ordinary arithmetic precedence.
/// - Keeps the variables bound by assignments.
/// - Sends gate calls to the quantum register.
/// - Reports runtime errors such as division by zero or unknown names.
pub mod evaluator;
/// The contract between the interpreter front end and the engine that runs
/// assembled strings.
pub mod executor;
/// The rule-driven lexer for the command notation.
///
/// A [`Lexer`](lexer::Lexer) is built once from an ordered rule table and
/// scans any number of lines. Each scan yields `(kind, value)` tokens or stops
/// at the first character no rule accepts.
pub mod lexer;
/// Replaces literals and call arguments with opaque handles.
///
/// # Responsibilities
/// - Drops annotation and separator tokens.
/// - Splits call tokens into a name and argument handles.
/// - Records the original text of every handle in a per-line table.
pub mod normalizer;
/// The parser module builds the abstract syntax tree (AST) from the strings
/// the front end assembles.
///
/// The parser tokenizes its input with `logos` and builds expressions and
/// assignments by recursive descent.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, assignments).
/// - Validates the grammar, reporting errors with line numbers.
pub mod parser;
/// The state-vector register that gate calls act on.
pub mod quantum;
/// Line-by-line interpretation.
///
/// [`Interpreter`](session::Interpreter) ties the stages together: lexing,
/// achievements, normalization, classification and dispatch.
pub mod session;
/// The chained expression tree over a normalized line.
pub mod tree;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the value types used during evaluation: integers,
/// real numbers, complex numbers and strings. It also provides methods for
/// type conversion and promotion.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Provides safe promotion between numeric types (e.g., integer to real).
pub mod value;
