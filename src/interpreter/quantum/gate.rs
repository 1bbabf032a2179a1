use std::{
    f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4},
    fmt,
};

use crate::interpreter::value::complex::{ComplexNumber, I, ONE, ZERO};

/// A gate that can be called by name on a line, such as `H(q)` or
/// `CNOT(a,b)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gate {
    /// Hadamard.
    H,
    /// Pauli-X, the quantum NOT.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z, the phase flip.
    Z,
    /// Phase (S) gate.
    P,
    /// T gate, a quarter phase.
    T,
    /// Controlled NOT. The first qubit is the control.
    Cnot,
    /// Controlled Z.
    Cz,
    /// Exchanges two qubits.
    Swap,
    /// Controlled controlled NOT. The first two qubits are the controls.
    Toffoli,
    /// `H` on the first qubit followed by `CNOT` from the first to the
    /// second, which prepares a Bell pair from `|00>`.
    Entangle,
}

const ALIASES: &[(&str, Gate)] = &[("h", Gate::H),
                                   ("had", Gate::H),
                                   ("hadamard", Gate::H),
                                   ("x", Gate::X),
                                   ("not", Gate::X),
                                   ("pauli_x", Gate::X),
                                   ("y", Gate::Y),
                                   ("pauli_y", Gate::Y),
                                   ("z", Gate::Z),
                                   ("pauli_z", Gate::Z),
                                   ("p", Gate::P),
                                   ("s", Gate::P),
                                   ("phase", Gate::P),
                                   ("t", Gate::T),
                                   ("cnot", Gate::Cnot),
                                   ("cx", Gate::Cnot),
                                   ("cz", Gate::Cz),
                                   ("swap", Gate::Swap),
                                   ("toffoli", Gate::Toffoli),
                                   ("ccx", Gate::Toffoli),
                                   ("ccnot", Gate::Toffoli),
                                   ("e", Gate::Entangle),
                                   ("entangle", Gate::Entangle)];

impl Gate {
    /// Looks a gate up by any of its names, ignoring case.
    ///
    /// # Example
    /// ```
    /// use qline::interpreter::quantum::Gate;
    ///
    /// assert_eq!(Gate::from_name("had"), Some(Gate::H));
    /// assert_eq!(Gate::from_name("CX"), Some(Gate::Cnot));
    /// assert_eq!(Gate::from_name("sqrt"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        ALIASES.iter()
               .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
               .map(|(_, gate)| *gate)
    }

    /// The number of qubits the gate acts on.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::H | Self::X | Self::Y | Self::Z | Self::P | Self::T => 1,
            Self::Cnot | Self::Cz | Self::Swap | Self::Entangle => 2,
            Self::Toffoli => 3,
        }
    }

    /// The canonical name, as shown in instructions.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::H => "H",
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
            Self::P => "P",
            Self::T => "T",
            Self::Cnot => "CNOT",
            Self::Cz => "CZ",
            Self::Swap => "SWAP",
            Self::Toffoli => "TOFFOLI",
            Self::Entangle => "ENTANGLE",
        }
    }

    /// The unitary of the gate as a row-major `2^n x 2^n` matrix, where the
    /// first qubit is the most significant bit of the row index.
    ///
    /// Composite gates have no single matrix and return `None`.
    #[must_use]
    pub fn matrix(self) -> Option<Vec<ComplexNumber>> {
        let h = ComplexNumber::from(FRAC_1_SQRT_2);

        let matrix = match self {
            Self::H => vec![h, h, h, -h],
            Self::X => vec![ZERO, ONE, ONE, ZERO],
            Self::Y => vec![ZERO, -I, I, ZERO],
            Self::Z => vec![ONE, ZERO, ZERO, -ONE],
            Self::P => vec![ONE, ZERO, ZERO, I],
            Self::T => vec![ONE, ZERO, ZERO, ComplexNumber::from_polar(1.0, FRAC_PI_4)],
            Self::Cnot => permutation(&[0, 1, 3, 2]),
            Self::Swap => permutation(&[0, 2, 1, 3]),
            Self::Toffoli => permutation(&[0, 1, 2, 3, 4, 5, 7, 6]),
            Self::Cz => {
                let mut matrix = permutation(&[0, 1, 2, 3]);
                matrix[15] = -ONE;
                matrix
            },
            Self::Entangle => return None,
        };
        Some(matrix)
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Builds the permutation matrix that sends basis state `i` to `targets[i]`.
fn permutation(targets: &[usize]) -> Vec<ComplexNumber> {
    let dim = targets.len();
    let mut matrix = vec![ZERO; dim * dim];
    for (column, &row) in targets.iter().enumerate() {
        matrix[row * dim + column] = ONE;
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_matrix_is_square_in_its_arity() {
        for (_, gate) in ALIASES {
            if let Some(matrix) = gate.matrix() {
                let dim = 1 << gate.arity();
                assert_eq!(matrix.len(), dim * dim, "{gate}");
            }
        }
    }

    #[test]
    fn every_matrix_is_unitary() {
        for (_, gate) in ALIASES {
            let Some(m) = gate.matrix() else { continue };
            let dim = 1 << gate.arity();
            for row in 0..dim {
                for col in 0..dim {
                    let mut dot = ZERO;
                    for k in 0..dim {
                        dot += m[row * dim + k] * m[col * dim + k].conj();
                    }
                    let expected = if row == col { ONE } else { ZERO };
                    assert!((dot - expected).abs() < 1e-12, "{gate} at ({row}, {col})");
                }
            }
        }
    }

    #[test]
    fn names_are_case_insensitive() {
        for name in ["H", "h", "HADAMARD", "Hadamard"] {
            assert_eq!(Gate::from_name(name), Some(Gate::H));
        }
        assert_eq!(Gate::from_name("Entangle"), Some(Gate::Entangle));
        assert_eq!(Gate::Entangle.matrix(), None);
    }
}
