use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            function::{builtin, conj, print, sqrt},
        },
        quantum::Gate,
        value::core::Value,
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives a slice of evaluated argument values and the line number.
type BuiltinFn = fn(&[Value], usize) -> EvalResult<Value>;

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - the number of arguments,
/// - a function pointer implementing the builtin.
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: usize,
            func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// The names of all builtin functions.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "sqrt"  => { arity: 1, func: sqrt::sqrt },
    "conj"  => { arity: 1, func: conj::conj },
    "abs"   => { arity: 1, func: |args, line| args[0].abs(line) },
    "sin"   => { arity: 1, func: builtin::sin },
    "cos"   => { arity: 1, func: builtin::cos },
    "exp"   => { arity: 1, func: builtin::exp },
    "ln"    => { arity: 1, func: builtin::ln },
    "floor" => { arity: 1, func: |args, line| builtin::unary_round(f64::floor, args, line) },
    "ceil"  => { arity: 1, func: |args, line| builtin::unary_round(f64::ceil, args, line) },
    "round" => { arity: 1, func: |args, line| builtin::unary_round(f64::round, args, line) },
    "print" => { arity: 1, func: print::print },
}

impl Context {
    /// Evaluates a function call.
    ///
    /// The evaluator checks whether the name matches a builtin. If so, it
    /// verifies arity and executes the builtin. Gate names are rejected here
    /// because a gate acts on qubit names, not on values.
    ///
    /// # Errors
    /// - `ArgumentCountMismatch` for a wrong number of arguments.
    /// - `TypeError` for a gate used inside an expression.
    /// - `UnknownFunction` for any other name.
    pub(crate) fn eval_function(name: &str, arg_vals: &[Value], line: usize) -> EvalResult<Value> {
        if let Some(builtin) = BUILTIN_TABLE.iter().find(|b| b.name == name) {
            if arg_vals.len() != builtin.arity {
                return Err(RuntimeError::ArgumentCountMismatch { line });
            }
            return (builtin.func)(arg_vals, line);
        }

        if let Some(gate) = Gate::from_name(name) {
            return Err(RuntimeError::TypeError { details: format!("gate {gate} can only be called on its own"),
                                                 line });
        }

        Err(RuntimeError::UnknownFunction { name: name.to_string(),
                                            line })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_names_are_unique_and_not_gates() {
        for (i, name) in BUILTIN_FUNCTIONS.iter().enumerate() {
            assert!(!BUILTIN_FUNCTIONS[..i].contains(name), "{name}");
            assert_eq!(Gate::from_name(name), None, "{name}");
        }
    }

    #[test]
    fn arity_is_checked_before_the_call() {
        assert_eq!(Context::eval_function("abs", &[], 2).unwrap_err(),
                   RuntimeError::ArgumentCountMismatch { line: 2 });
        assert_eq!(Context::eval_function("abs", &[Value::Integer(-3)], 2).unwrap(),
                   Value::Integer(3));
    }

    #[test]
    fn gates_and_unknown_names_are_rejected() {
        assert!(matches!(Context::eval_function("H", &[Value::Integer(1)], 1),
                         Err(RuntimeError::TypeError { .. })));
        assert_eq!(Context::eval_function("frobnicate", &[], 1).unwrap_err(),
                   RuntimeError::UnknownFunction { name: "frobnicate".to_string(),
                                                   line: 1, });
    }
}
