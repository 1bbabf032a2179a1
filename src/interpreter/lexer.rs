use std::collections::{HashMap, HashSet};

use regex::{Regex, RegexBuilder};

use crate::{
    error::{LexError, LexerConfigError},
    interpreter::lexer::{
        rule::{Callback, Rule},
        scanner::Scanner,
    },
};

/// Rule definitions and the default command rule table.
///
/// A rule is a named pattern with an optional callback that post-processes
/// the matched text. The order of a rule table is significant: the first
/// rule that matches at the cursor wins.
pub mod rule;
/// The per-line scanner.
///
/// A [`Scanner`] walks one input with the compiled rule set of a
/// [`Lexer`], producing one token per step.
pub mod scanner;

/// Options fixed when a [`Lexer`] is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerOptions {
    /// Whether rule patterns match letters case-sensitively.
    pub case_sensitive:  bool,
    /// Whether whitespace between tokens is skipped instead of rejected.
    pub omit_whitespace: bool,
}

impl Default for LexerOptions {
    fn default() -> Self {
        Self { case_sensitive:  true,
               omit_whitespace: true, }
    }
}

/// A lexical token produced by a [`Scanner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The name of the rule that matched.
    pub kind:   String,
    /// The exact text the rule matched.
    pub lexeme: String,
    /// The token value: the lexeme, or what the rule's callback made of it.
    pub value:  Option<String>,
}

impl Token {
    /// Creates a token whose value is its lexeme.
    ///
    /// # Example
    /// ```
    /// use qline::interpreter::lexer::Token;
    ///
    /// let token = Token::new("DIGIT", "42");
    /// assert_eq!(token.value.as_deref(), Some("42"));
    /// ```
    #[must_use]
    pub fn new(kind: &str, lexeme: &str) -> Self {
        Self { kind:   kind.to_string(),
               lexeme: lexeme.to_string(),
               value:  Some(lexeme.to_string()), }
    }
}

/// A rule-driven lexical scanner.
///
/// All rules are compiled once into a single alternation pattern with one
/// named group per rule. The lexer holds no per-input state, so one lexer can
/// scan any number of lines; each call to [`Lexer::scan`] returns a fresh
/// [`Scanner`].
#[derive(Debug)]
pub struct Lexer {
    pattern:    Regex,
    whitespace: Regex,
    names:      Vec<String>,
    callbacks:  HashMap<String, Callback>,
    options:    LexerOptions,
}

impl Lexer {
    /// Compiles a rule table into a lexer.
    ///
    /// # Errors
    /// Returns a [`LexerConfigError`] if the table is empty, a rule name is
    /// not a valid token kind, a name is repeated, or a pattern does not
    /// compile.
    ///
    /// # Example
    /// ```
    /// use qline::interpreter::lexer::{Lexer, LexerOptions, rule::Rule};
    ///
    /// let rules = vec![Rule::new("NUMBER", "[0-9]+"), Rule::new("PLUS", r"\+")];
    /// let lexer = Lexer::new(rules, LexerOptions::default()).unwrap();
    ///
    /// let kinds: Vec<_> = lexer.tokenize("1 + 2")
    ///                          .unwrap()
    ///                          .into_iter()
    ///                          .map(|t| t.kind)
    ///                          .collect();
    /// assert_eq!(kinds, ["NUMBER", "PLUS", "NUMBER"]);
    /// ```
    pub fn new(rules: Vec<Rule>, options: LexerOptions) -> Result<Self, LexerConfigError> {
        if rules.is_empty() {
            return Err(LexerConfigError::EmptyRuleSet);
        }

        let mut seen = HashSet::new();
        let mut parts = Vec::with_capacity(rules.len());
        let mut names = Vec::with_capacity(rules.len());
        let mut callbacks = HashMap::new();

        for rule in rules {
            if !is_valid_kind(rule.name()) {
                return Err(LexerConfigError::InvalidRuleName { name: rule.name().to_string() });
            }
            if !seen.insert(rule.name().to_string()) {
                return Err(LexerConfigError::DuplicateRule { name: rule.name().to_string() });
            }
            // Compiled on its own first so a bad pattern is blamed on its rule.
            compile(rule.pattern(), options).map_err(|e| {
                                                LexerConfigError::InvalidPattern {
                    name:    rule.name().to_string(),
                    details: e.to_string(),
                }
                                            })?;

            parts.push(format!("(?P<{}>{})", rule.name(), rule.pattern()));
            if let Some(callback) = rule.callback() {
                callbacks.insert(rule.name().to_string(), callback);
            }
            names.push(rule.name().to_string());
        }

        let combined = parts.join("|");
        let pattern = compile(&combined, options).map_err(|e| {
                          LexerConfigError::InvalidPattern { name:    names.join("|"),
                                                             details: e.to_string(), }
                      })?;
        let whitespace = compile(r"\s*", options).map_err(|e| {
                             LexerConfigError::InvalidPattern { name:    "whitespace".to_string(),
                                                                details: e.to_string(), }
                         })?;

        Ok(Self { pattern,
                  whitespace,
                  names,
                  callbacks,
                  options })
    }

    /// Returns a scanner positioned at the start of `input`.
    #[must_use]
    pub const fn scan<'l, 'i>(&'l self, input: &'i str) -> Scanner<'l, 'i> {
        Scanner::new(self, input)
    }

    /// Scans the whole of `input` and collects its tokens.
    ///
    /// # Errors
    /// Returns the first [`LexError`] the scanner runs into.
    pub fn tokenize(&self, input: &str) -> Result<Vec<Token>, LexError> {
        self.scan(input).collect()
    }

    /// The options the lexer was built with.
    #[must_use]
    pub const fn options(&self) -> LexerOptions {
        self.options
    }

    /// The rule names in declaration order.
    #[must_use]
    pub fn rule_names(&self) -> &[String] {
        &self.names
    }

    pub(crate) const fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub(crate) const fn whitespace(&self) -> &Regex {
        &self.whitespace
    }

    pub(crate) fn callback(&self, name: &str) -> Option<Callback> {
        self.callbacks.get(name).copied()
    }
}

fn compile(pattern: &str, options: LexerOptions) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).multi_line(true)
                              .case_insensitive(!options.case_sensitive)
                              .build()
}

/// A rule name doubles as a capture group name, so it has to be one.
fn is_valid_kind(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next()
         .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::rule::{
        DIGIT, END_STMNT, IDENTIFIER, LITERAL, OBJECT, OPERATOR, SUPPLIMENT, command_rules,
    };

    fn command_lexer() -> Lexer {
        Lexer::new(command_rules(), LexerOptions::default()).unwrap()
    }

    fn kinds_and_values(input: &str) -> Vec<(String, Option<String>)> {
        command_lexer().tokenize(input)
                       .unwrap()
                       .into_iter()
                       .map(|t| (t.kind, t.value))
                       .collect()
    }

    fn pair(kind: &str, value: &str) -> (String, Option<String>) {
        (kind.to_string(), Some(value.to_string()))
    }

    #[test]
    fn scans_an_equation_into_digits_and_operators() {
        assert_eq!(kinds_and_values("1+1=2"),
                   vec![pair(DIGIT, "1"),
                        pair(OPERATOR, "+"),
                        pair(DIGIT, "1"),
                        pair(OPERATOR, "="),
                        pair(DIGIT, "2"),]);
    }

    #[test]
    fn call_syntax_is_a_single_object_token() {
        assert_eq!(kinds_and_values("had(1)"), vec![pair(OBJECT, "had(1)")]);
        assert_eq!(kinds_and_values("CNOT(a, b)"), vec![pair(OBJECT, "CNOT(a, b)")]);
        assert_eq!(kinds_and_values("f(g(1),2)"), vec![pair(OBJECT, "f(g(1),2)")]);
    }

    #[test]
    fn calls_next_to_each_other_stay_separate() {
        assert_eq!(kinds_and_values("H(q) X(p)"),
                   vec![pair(OBJECT, "H(q)"), pair(OBJECT, "X(p)")]);
        assert_eq!(kinds_and_values("f(a)+g(b)"),
                   vec![pair(OBJECT, "f(a)"), pair(OPERATOR, "+"), pair(OBJECT, "g(b)")]);
    }

    #[test]
    fn annotations_are_recognized() {
        assert_eq!(kinds_and_values("step: x = 1"),
                   vec![pair(SUPPLIMENT, "step:"),
                        pair(IDENTIFIER, "x"),
                        pair(OPERATOR, "="),
                        pair(DIGIT, "1"),]);
        assert_eq!(kinds_and_values("x :note: y"),
                   vec![pair(IDENTIFIER, "x"), pair(SUPPLIMENT, ":note:"), pair(IDENTIFIER, "y")]);
    }

    #[test]
    fn leading_annotation_only_matches_at_line_start() {
        let error = command_lexer().tokenize("x y:").unwrap_err();
        assert_eq!(error, LexError::UnknownToken { token: ':', line: 1 });
    }

    #[test]
    fn literals_decimals_and_backslash() {
        assert_eq!(kinds_and_values(r#""hi" \ 2.5"#),
                   vec![pair(LITERAL, "\"hi\""), pair(OPERATOR, "\\"), pair(DIGIT, "2.5")]);
    }

    #[test]
    fn statement_separator_callback_drops_the_value() {
        let tokens = command_lexer().tokenize("1;2").unwrap();
        assert_eq!(tokens[1].kind, END_STMNT);
        assert_eq!(tokens[1].lexeme, ";");
        assert_eq!(tokens[1].value, None);
    }

    #[test]
    fn unknown_character_reports_the_character_and_line() {
        let error = command_lexer().tokenize("1 + 2\nx ? 3").unwrap_err();
        assert_eq!(error, LexError::UnknownToken { token: '?', line: 2 });
        assert_eq!(error.line(), 2);
    }

    #[test]
    fn trailing_whitespace_is_not_an_error() {
        assert_eq!(kinds_and_values("x   "), vec![pair(IDENTIFIER, "x")]);
        assert!(kinds_and_values("   ").is_empty());
    }

    #[test]
    fn whitespace_is_rejected_when_not_omitted() {
        let options = LexerOptions { omit_whitespace: false,
                                     ..LexerOptions::default() };
        let lexer = Lexer::new(command_rules(), options).unwrap();
        let error = lexer.tokenize("x = 1").unwrap_err();
        assert_eq!(error, LexError::UnknownToken { token: ' ', line: 1 });
    }

    #[test]
    fn case_insensitive_rules_match_either_case() {
        let rules = vec![Rule::new("GATE", "had"), Rule::new("OTHER", "[a-z]+")];
        let sensitive = Lexer::new(rules.clone(), LexerOptions::default()).unwrap();
        let insensitive = Lexer::new(rules,
                                     LexerOptions { case_sensitive: false,
                                                    ..LexerOptions::default() }).unwrap();

        assert!(sensitive.tokenize("HAD").is_err());
        assert_eq!(insensitive.tokenize("HAD").unwrap()[0].kind, "GATE");
    }

    #[test]
    fn first_declared_rule_wins() {
        let rules = vec![Rule::new("KEYWORD", "let"), Rule::new("NAME", "[a-z]+")];
        let lexer = Lexer::new(rules, LexerOptions::default()).unwrap();
        assert_eq!(lexer.tokenize("let").unwrap()[0].kind, "KEYWORD");
    }

    #[test]
    fn rejects_bad_rule_tables() {
        let options = LexerOptions::default();
        assert_eq!(Lexer::new(Vec::new(), options).unwrap_err(),
                   LexerConfigError::EmptyRuleSet);
        assert!(matches!(Lexer::new(vec![Rule::new("1BAD", "x")], options),
                         Err(LexerConfigError::InvalidRuleName { .. })));
        assert!(matches!(Lexer::new(vec![Rule::new("A", "x"), Rule::new("A", "y")], options),
                         Err(LexerConfigError::DuplicateRule { .. })));
        assert!(matches!(Lexer::new(vec![Rule::new("A", "(")], options),
                         Err(LexerConfigError::InvalidPattern { name, .. }) if name == "A"));
    }

    #[test]
    fn any_arrangement_of_rule_samples_tokenizes() {
        let samples = [(OBJECT, "f(g(1),2)"),
                       (IDENTIFIER, "x_1"),
                       (OPERATOR, "+"),
                       (OPERATOR, "-"),
                       (OPERATOR, "\\"),
                       (OPERATOR, "*"),
                       (OPERATOR, "="),
                       (DIGIT, "42"),
                       (DIGIT, "3.5"),
                       (LITERAL, "\"a word\""),
                       (SUPPLIMENT, ":tag:"),
                       (END_STMNT, ";")];
        let gaps = [" ", "\t", "   ", " \t "];
        let lexer = command_lexer();

        for shift in 0..samples.len() {
            let mut arranged = samples.to_vec();
            arranged.rotate_left(shift);
            if shift % 2 == 1 {
                arranged.reverse();
            }

            let mut line = String::from("step:");
            for (i, (_, sample)) in arranged.iter().enumerate() {
                line.push_str(gaps[(i + shift) % gaps.len()]);
                line.push_str(sample);
            }

            let tokens = lexer.tokenize(&line)
                              .unwrap_or_else(|e| panic!("'{line}' failed: {e}"));
            let kinds: Vec<_> = tokens.iter().map(|t| t.kind.as_str()).collect();
            let expected: Vec<_> = std::iter::once(SUPPLIMENT).chain(arranged.iter().map(|(kind, _)| *kind))
                                                              .collect();
            assert_eq!(kinds, expected, "{line}");
        }
    }

    #[test]
    fn a_lexer_can_scan_many_lines() {
        let lexer = command_lexer();
        assert_eq!(lexer.tokenize("x").unwrap().len(), 1);
        assert_eq!(lexer.tokenize("x + y").unwrap().len(), 3);
        assert_eq!(lexer.rule_names().len(), 7);
    }
}
