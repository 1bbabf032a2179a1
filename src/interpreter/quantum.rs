use crate::interpreter::evaluator::core::EvalResult;

/// Gate names, arities and unitary matrices.
pub mod gate;
/// A named-qubit state-vector register.
pub mod circuit;

pub use circuit::{Circuit, Instruction, MAX_QUBITS};
pub use gate::Gate;

/// The quantum-state collaborator that gate calls are executed against.
///
/// Qubits are addressed by the raw argument text of the call, so `H(q)`
/// and `H(1)` act on qubits named `q` and `1`.
pub trait QuantumOps {
    /// Applies `gate` to the named qubits, in order.
    ///
    /// # Errors
    /// - `RuntimeError::ArgumentCountMismatch` if the number of qubits does
    ///   not match the gate's arity.
    /// - `RuntimeError::RepeatedQubit` if a qubit is named twice.
    /// - `RuntimeError::TooManyQubits` if the register is full.
    fn apply(&mut self, gate: Gate, qubits: &[String], line: usize) -> EvalResult<()>;

    /// The probability of measuring `qubit` as `1`, or `None` for a qubit
    /// that was never mentioned.
    fn probability_of_one(&self, qubit: &str) -> Option<f64>;

    /// Every gate applied so far, in order.
    fn instructions(&self) -> &[Instruction];
}
