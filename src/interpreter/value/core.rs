use crate::{
    ast::LiteralValue,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::complex::ComplexNumber},
    util::num::i64_to_f64_checked,
};

/// Represents a runtime value in the interpreter.
///
/// This enum models all the possible types that can appear in expressions,
/// assignments and function returns.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A integer value (64 bit integer).
    Integer(i64),
    /// A numeric value (double precision floating-point).
    Real(f64),
    /// A complex number (with real and imaginary parts).
    Complex(ComplexNumber),
    /// A string, without its surrounding quotes.
    Str(String),
}

impl From<ComplexNumber> for Value {
    fn from(c: ComplexNumber) -> Self {
        Self::Complex(c)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl Value {
    /// Converts the value to an `f64`, or returns an error if not numeric.
    ///
    /// Accepts `Value::Real` and `Value::Integer`.
    /// For integers, conversion fails if the value is too large to be
    /// represented as `f64` exactly.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(f64)`: If value is real or a safe integer.
    /// - `Err(RuntimeError::ExpectedNumber | LiteralTooLarge)`: If not numeric
    ///   or not representable.
    ///
    /// # Example
    /// ```
    /// use qline::interpreter::value::core::Value;
    ///
    /// let x = Value::Integer(10);
    /// let real = x.as_real(42).unwrap();
    ///
    /// assert_eq!(real, 10.0);
    /// assert!(Value::from("ten").as_real(42).is_err());
    /// ```
    pub fn as_real(&self, line: usize) -> EvalResult<f64> {
        match self {
            Self::Real(r) => Ok(*r),
            Self::Integer(n) => Ok(i64_to_f64_checked(*n, RuntimeError::LiteralTooLarge { line })?),
            _ => Err(RuntimeError::ExpectedNumber { line }),
        }
    }

    /// Converts the value to `ComplexNumber`, or returns an error if not
    /// numeric.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(ComplexNumber)`: The converted complex value.
    /// - `Err(RuntimeError)`: If not numeric or out of range.
    pub fn as_complex(&self, line: usize) -> EvalResult<ComplexNumber> {
        match self {
            Self::Complex(c) => Ok(*c),
            _ => Ok(ComplexNumber::from(self.as_real(line)?)),
        }
    }

    /// Promotes an integer to a real value for mixed math, or returns values
    /// as-is if already matching.
    ///
    /// # Parameters
    /// - `other`: The value to promote with.
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok((Self, Self))`: Promoted values.
    /// - `Err(RuntimeError)`: If conversion fails.
    pub fn promote_to_real(self, other: Self, line: usize) -> EvalResult<(Self, Self)> {
        use Value::{Integer, Real};

        match (&self, &other) {
            (Real(_), Integer(_)) => Ok((self, Real(other.as_real(line)?))),
            (Integer(_), Real(_)) => Ok((Real(self.as_real(line)?), other)),
            _ => Ok((self, other)),
        }
    }

    /// Promotes both sides to complex if either side is complex.
    ///
    /// # Parameters
    /// - `other`: The value to promote with.
    /// - `line`: Source code line number for error reporting.
    pub fn promote_to_complex(self, other: Self, line: usize) -> EvalResult<(Self, Self)> {
        use Value::Complex;

        match (&self, &other) {
            (Complex(_), Complex(_)) => Ok((self, other)),
            (Complex(_), _) => {
                let right = Complex(other.as_complex(line)?);
                Ok((self, right))
            },
            (_, Complex(_)) => {
                let left = Complex(self.as_complex(line)?);
                Ok((left, other))
            },
            _ => Ok((self, other)),
        }
    }

    /// Returns the absolute value of a numeric value.
    ///
    /// Complex values yield their magnitude as a real.
    pub fn abs(&self, line: usize) -> EvalResult<Self> {
        match self {
            Self::Complex(c) => Ok(c.abs().into()),
            Self::Integer(i) => i.checked_abs()
                                 .map(Self::Integer)
                                 .ok_or(RuntimeError::Overflow { line }),
            _ => Ok(Self::Real(self.as_real(line)?.abs())),
        }
    }

    /// Returns a short name of the variant, used in type errors.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Real(_) => "real",
            Self::Complex(_) => "complex",
            Self::Str(_) => "string",
        }
    }

    /// Returns `true` if the value is [`Integer`].
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Self::Integer(..))
    }

    /// Returns `true` if the value is [`Str`].
    #[must_use]
    pub const fn is_str(&self) -> bool {
        matches!(self, Self::Str(..))
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Real(r) => write!(f, "{r}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Complex(c) => write!(f, "{c}"),
            Self::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<&LiteralValue> for Value {
    fn from(lit: &LiteralValue) -> Self {
        match lit {
            LiteralValue::Real(n) => (*n).into(),
            LiteralValue::Integer(i) => (*i).into(),
            LiteralValue::Str(s) => Self::Str(s.clone()),
        }
    }
}
