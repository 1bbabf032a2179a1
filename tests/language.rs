use std::fs::{self};

use qline::{
    error::{ExecutionError, InterpretError, LexError, ParseError, RuntimeError},
    interpreter::{
        dispatcher::{ExecutedCall, Outcome},
        evaluator::core::Context,
        executor::Executor,
        session::Interpreter,
        value::{complex::ComplexNumber, core::Value},
    },
    run_script,
};
use walkdir::WalkDir;

#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, code) in extract_dsl_blocks(&content).into_iter().enumerate() {
            count += 1;
            if let Err(e) = run_script(&code, false) {
                panic!("Example {} in {:?} failed:\n{}\nError: {:?}", i + 1, path, code, e);
            }
        }
    }

    assert!(count > 0, "No examples found in book/src");
}

fn extract_dsl_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```qline") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

fn assert_success(src: &str) {
    if let Err(e) = run_script(src, false) {
        panic!("Script failed: {e}");
    }
}

fn assert_failure(src: &str) {
    assert!(run_script(src, false).is_err(),
            "Script succeeded but was expected to fail");
}

/// Interprets every line and returns the outcome of the last one.
fn last_outcome(src: &str) -> Outcome {
    let mut interpreter = Interpreter::new().unwrap();
    let mut outcome = Outcome::Nothing;
    for line in src.lines() {
        outcome = interpreter.interpret(line)
                             .unwrap_or_else(|e| panic!("Line '{line}' failed: {e}"));
    }
    outcome
}

fn last_value(src: &str) -> Value {
    match last_outcome(src) {
        Outcome::Value(value) => value,
        other => panic!("expected a value, found {other:?}"),
    }
}

fn first_error(src: &str) -> InterpretError {
    let mut interpreter = Interpreter::new().unwrap();
    for line in src.lines() {
        if let Err(e) = interpreter.interpret(line) {
            return e;
        }
    }
    panic!("Script succeeded but was expected to fail")
}

#[test]
fn assignment_and_basic_arithmetic() {
    assert_eq!(last_value("x = 1 + 2\nx"), Value::Integer(3));
    assert_eq!(last_value("x = 7 * 9\nx"), Value::Integer(63));
    assert_eq!(last_value("x = 8 - 5\nx"), Value::Integer(3));
    assert_eq!(last_value("x = 10 \\ 2\nx"), Value::Integer(5));
    assert_eq!(last_value("7 \\ 2"), Value::Real(3.5));
}

#[test]
fn assignment_outcome_names_the_binding() {
    assert_eq!(last_outcome("total = 2 * 21"),
               Outcome::Assigned { name:  "total".to_string(),
                                   value: Value::Integer(42), });
}

#[test]
fn evaluator_precedence_is_arithmetic() {
    assert_eq!(last_value("2 + 3 * 4"), Value::Integer(14));
    assert_eq!(last_value("10 - 4 - 3"), Value::Integer(3));
    assert_eq!(last_value("-2 * 3"), Value::Integer(-6));
}

#[test]
fn decimals_strings_and_complex_numbers() {
    assert_eq!(last_value("1.5 + 1"), Value::Real(2.5));
    assert_eq!(last_value("greeting = \"hello\"\ngreeting + \"world\""),
               Value::from("helloworld"));
    assert_eq!(last_value("i * i"), Value::Complex(ComplexNumber::new(-1.0, 0.0)));
}

#[test]
fn builtins_can_be_called_on_their_own() {
    assert_eq!(last_outcome("sqrt(16)"),
               Outcome::Executed(vec![ExecutedCall { source: "sqrt(16)".to_string(),
                                                     value:  Some(Value::Real(4.0)), }]));
    assert_eq!(last_outcome("x = 2\nabs(x)"),
               Outcome::Executed(vec![ExecutedCall { source: "abs(x)".to_string(),
                                                     value:  Some(Value::Integer(2)), }]));
}

#[test]
fn circuits_run_line_by_line() {
    assert_success("H(a)\nCNOT(a, b)\nZ(b)\nSWAP(a, b)");
    assert_success("step: hadamard(q) :prepare:\nentangle(q, r)\ntoffoli(q, r, s)");
    assert_success("H(a) X(b) CZ(a, b)");
}

#[test]
fn gate_misuse_fails() {
    assert_eq!(first_error("CNOT(a, a)"),
               InterpretError::Execution(ExecutionError::Runtime(RuntimeError::RepeatedQubit { name: "a".to_string(),
                                                                                                line: 1, })));
    assert_eq!(first_error("H(a)\nH(a, b)"),
               InterpretError::Execution(ExecutionError::Runtime(RuntimeError::ArgumentCountMismatch { line: 2 })));
}

#[test]
fn a_line_with_calls_runs_only_its_calls() {
    assert_eq!(last_outcome("x = H(a) + 1"),
               Outcome::Executed(vec![ExecutedCall { source: "H(a)".to_string(),
                                                     value:  None, }]));
    assert_failure("x = H(a) + 1
x");
}

#[test]
fn gates_are_not_values_inside_expressions() {
    let mut context = Context::new();
    assert!(matches!(context.evaluate("H(1) + 1", 1),
                     Err(ExecutionError::Runtime(RuntimeError::TypeError { line: 1, .. }))));
}

#[test]
fn the_register_is_bounded() {
    let mut script: String = (0..12).map(|n| format!("H(q{n})\n")).collect();
    assert_success(&script);

    script.push_str("H(q12)\n");
    assert_eq!(first_error(&script),
               InterpretError::Execution(ExecutionError::Runtime(RuntimeError::TooManyQubits { max:  12,
                                                                                                line: 13, })));
}

#[test]
fn front_end_errors_are_distinguishable() {
    assert_eq!(first_error("x = 1\ny ? 2"),
               InterpretError::Lex(LexError::UnknownToken { token: '?', line: 2 }));
    assert!(matches!(first_error("f(1,,2)"), InterpretError::MalformedCall { .. }));
    assert!(matches!(first_error("x y + 1"), InterpretError::DetachedItem { index: 0 }));
    assert_eq!(first_error("1+1=2"),
               InterpretError::Execution(ExecutionError::Parse(ParseError::InvalidAssignmentTarget { line: 1 })));
}

#[test]
fn runtime_errors() {
    assert_failure("y + 1");
    assert_failure("1 \\ 0");
    assert_failure("nothing(1)");
    assert_failure("\"a\" * 2");
    assert_failure("9223372036854775807 + 1");
}

#[test]
fn a_script_stops_at_the_first_failure() {
    assert_failure("x = 1\nx \\ 0\nx = 2");
    assert_success("\n\nx = 1\n\n  \nx + 1\n");
}

#[test]
fn variables_are_scoped_to_one_interpreter() {
    assert_success("x = 1");
    assert_failure("x");
}
