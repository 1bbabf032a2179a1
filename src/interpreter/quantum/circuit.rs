use std::fmt;

use tracing::{debug, trace};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        quantum::{Gate, QuantumOps},
        value::complex::{ComplexNumber, ONE, ZERO},
    },
};

/// The largest register a [`Circuit`] will allocate.
pub const MAX_QUBITS: usize = 12;

/// One applied gate, as recorded by a [`Circuit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// The applied gate.
    pub gate:   Gate,
    /// The qubit names it was applied to, in order.
    pub qubits: Vec<String>,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.gate, self.qubits.join(","))
    }
}

/// A register of named qubits simulated as a full state vector.
///
/// Qubits are allocated in `|0>` the first time a gate names them. Qubit
/// `k` in allocation order is bit `k` of a basis state index.
#[derive(Debug, Clone)]
pub struct Circuit {
    names:        Vec<String>,
    amplitudes:   Vec<ComplexNumber>,
    instructions: Vec<Instruction>,
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}

impl Circuit {
    /// Creates an empty register.
    #[must_use]
    pub fn new() -> Self {
        Self { names:        Vec::new(),
               amplitudes:   vec![ONE],
               instructions: Vec::new(), }
    }

    /// The qubit names, in allocation order.
    #[must_use]
    pub fn qubits(&self) -> &[String] {
        &self.names
    }

    /// The amplitudes of all `2^n` basis states.
    #[must_use]
    pub fn amplitudes(&self) -> &[ComplexNumber] {
        &self.amplitudes
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Resolves qubit names to bit positions, allocating the ones not seen
    /// before. Nothing is allocated if the register would overflow.
    fn allocate(&mut self, qubits: &[String], line: usize) -> EvalResult<Vec<usize>> {
        let fresh = qubits.iter()
                          .filter(|name| self.index_of(name).is_none())
                          .count();
        if self.names.len() + fresh > MAX_QUBITS {
            return Err(RuntimeError::TooManyQubits { max: MAX_QUBITS,
                                                     line });
        }

        let mut targets = Vec::with_capacity(qubits.len());
        for name in qubits {
            let index = match self.index_of(name) {
                Some(index) => index,
                None => {
                    trace!(qubit = %name, "allocating qubit");
                    self.names.push(name.clone());
                    let len = self.amplitudes.len();
                    self.amplitudes.resize(len * 2, ZERO);
                    self.names.len() - 1
                },
            };
            targets.push(index);
        }
        Ok(targets)
    }

    fn apply_gate(&mut self, gate: Gate, targets: &[usize]) {
        if let Some(matrix) = gate.matrix() {
            self.apply_matrix(&matrix, targets);
        }
    }

    /// Multiplies the state by `matrix` acting on the qubits at `targets`.
    fn apply_matrix(&mut self, matrix: &[ComplexNumber], targets: &[usize]) {
        let k = targets.len();
        let dim = 1usize << k;
        let mask = targets.iter().fold(0usize, |mask, &t| mask | (1 << t));

        let mut indices = vec![0usize; dim];
        let mut old = vec![ZERO; dim];

        for base in 0..self.amplitudes.len() {
            if base & mask != 0 {
                continue;
            }
            for (sub, index) in indices.iter_mut().enumerate() {
                *index = targets.iter()
                                .enumerate()
                                .filter(|&(j, _)| (sub >> (k - 1 - j)) & 1 == 1)
                                .fold(base, |index, (_, &t)| index | (1 << t));
            }
            for (amplitude, &index) in old.iter_mut().zip(&indices) {
                *amplitude = self.amplitudes[index];
            }
            for (row, &index) in indices.iter().enumerate() {
                let mut sum = ZERO;
                for (col, amplitude) in old.iter().enumerate() {
                    sum += matrix[row * dim + col] * *amplitude;
                }
                self.amplitudes[index] = sum;
            }
        }
    }
}

impl QuantumOps for Circuit {
    /// Applies a gate to the register.
    ///
    /// # Example
    /// ```
    /// use qline::interpreter::quantum::{Circuit, Gate, QuantumOps};
    ///
    /// let mut circuit = Circuit::new();
    /// circuit.apply(Gate::X, &["q".to_string()], 1).unwrap();
    ///
    /// assert_eq!(circuit.probability_of_one("q"), Some(1.0));
    /// assert_eq!(circuit.instructions()[0].to_string(), "X(q)");
    /// ```
    fn apply(&mut self, gate: Gate, qubits: &[String], line: usize) -> EvalResult<()> {
        if qubits.len() != gate.arity() {
            return Err(RuntimeError::ArgumentCountMismatch { line });
        }
        if let Some((_, name)) = qubits.iter()
                                       .enumerate()
                                       .find(|&(i, name)| qubits[..i].contains(name))
        {
            return Err(RuntimeError::RepeatedQubit { name: name.clone(),
                                                     line });
        }

        let targets = self.allocate(qubits, line)?;

        match gate {
            Gate::Entangle => {
                self.apply_gate(Gate::H, &targets[..1]);
                self.apply_gate(Gate::Cnot, &targets);
            },
            _ => self.apply_gate(gate, &targets),
        }

        let instruction = Instruction { gate,
                                        qubits: qubits.to_vec() };
        debug!(%instruction, qubits = self.names.len(), "applied gate");
        self.instructions.push(instruction);

        Ok(())
    }

    fn probability_of_one(&self, qubit: &str) -> Option<f64> {
        let bit = 1usize << self.index_of(qubit)?;
        Some(self.amplitudes
                 .iter()
                 .enumerate()
                 .filter(|(index, _)| index & bit != 0)
                 .map(|(_, amplitude)| amplitude.norm_sqr())
                 .sum())
    }

    fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn hadamard_gives_an_even_superposition() {
        let mut circuit = Circuit::new();
        circuit.apply(Gate::H, &names(&["q"]), 1).unwrap();
        assert!(close(circuit.probability_of_one("q").unwrap(), 0.5));

        circuit.apply(Gate::H, &names(&["q"]), 2).unwrap();
        assert!(close(circuit.probability_of_one("q").unwrap(), 0.0));
    }

    #[test]
    fn cnot_flips_the_target_only_when_the_control_is_set() {
        let mut circuit = Circuit::new();
        circuit.apply(Gate::Cnot, &names(&["a", "b"]), 1).unwrap();
        assert_eq!(circuit.probability_of_one("b"), Some(0.0));

        circuit.apply(Gate::X, &names(&["a"]), 2).unwrap();
        circuit.apply(Gate::Cnot, &names(&["a", "b"]), 3).unwrap();
        assert_eq!(circuit.probability_of_one("b"), Some(1.0));

        circuit.apply(Gate::Cnot, &names(&["b", "a"]), 4).unwrap();
        assert_eq!(circuit.probability_of_one("a"), Some(0.0));
    }

    #[test]
    fn entangle_prepares_a_bell_pair() {
        let mut circuit = Circuit::new();
        circuit.apply(Gate::Entangle, &names(&["a", "b"]), 1).unwrap();

        assert!(close(circuit.probability_of_one("a").unwrap(), 0.5));
        assert!(close(circuit.probability_of_one("b").unwrap(), 0.5));

        let weights: Vec<f64> = circuit.amplitudes().iter().map(ComplexNumber::norm_sqr).collect();
        assert!(close(weights[0b00], 0.5));
        assert!(close(weights[0b11], 0.5));
        assert!(close(weights[0b01] + weights[0b10], 0.0));
    }

    #[test]
    fn toffoli_needs_both_controls() {
        let mut circuit = Circuit::new();
        circuit.apply(Gate::X, &names(&["c1"]), 1).unwrap();
        circuit.apply(Gate::Toffoli, &names(&["c1", "c2", "t"]), 2).unwrap();
        assert_eq!(circuit.probability_of_one("t"), Some(0.0));

        circuit.apply(Gate::X, &names(&["c2"]), 3).unwrap();
        circuit.apply(Gate::Toffoli, &names(&["c1", "c2", "t"]), 4).unwrap();
        assert_eq!(circuit.probability_of_one("t"), Some(1.0));
    }

    #[test]
    fn swap_exchanges_states() {
        let mut circuit = Circuit::new();
        circuit.apply(Gate::X, &names(&["a"]), 1).unwrap();
        circuit.apply(Gate::Swap, &names(&["a", "b"]), 2).unwrap();
        assert_eq!(circuit.probability_of_one("a"), Some(0.0));
        assert_eq!(circuit.probability_of_one("b"), Some(1.0));
    }

    #[test]
    fn invalid_applications_leave_the_register_untouched() {
        let mut circuit = Circuit::new();
        assert_eq!(circuit.apply(Gate::Cnot, &names(&["a", "a"]), 3).unwrap_err(),
                   RuntimeError::RepeatedQubit { name: "a".to_string(),
                                                 line: 3, });
        assert_eq!(circuit.apply(Gate::H, &names(&["a", "b"]), 4).unwrap_err(),
                   RuntimeError::ArgumentCountMismatch { line: 4 });
        assert!(circuit.qubits().is_empty());
        assert!(circuit.instructions().is_empty());
    }

    #[test]
    fn register_size_is_bounded() {
        let mut circuit = Circuit::new();
        for i in 0..MAX_QUBITS {
            circuit.apply(Gate::X, &[i.to_string()], 1).unwrap();
        }
        assert_eq!(circuit.amplitudes().len(), 1 << MAX_QUBITS);
        assert_eq!(circuit.apply(Gate::X, &names(&["one more"]), 2).unwrap_err(),
                   RuntimeError::TooManyQubits { max: MAX_QUBITS,
                                                 line: 2, });
        assert_eq!(circuit.qubits().len(), MAX_QUBITS);
    }

    #[test]
    fn unknown_qubits_have_no_probability() {
        assert_eq!(Circuit::new().probability_of_one("ghost"), None);
    }
}
