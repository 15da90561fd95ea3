//! Statevector evolution.
//!
//! Qubit `q` is bit `q` of the basis index (qubit 0 is least significant), so
//! amplitude `i` belongs to the basis state whose bitstring is `i` in binary.

use std::f64::consts::FRAC_1_SQRT_2;

use num_complex::Complex64;
use qsim_ir::{Circuit, Gate, GateKind, QubitId};
use tracing::{debug, instrument};

use crate::error::{SimError, SimResult};

/// A pure state over `num_qubits` qubits.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Prepare the circuit's initial basis state and apply its gates in order.
    ///
    /// The caller is responsible for checking the qubit count against a
    /// capacity ceiling first; this allocates 2^n amplitudes unconditionally.
    #[instrument(skip(circuit), fields(num_qubits = circuit.num_qubits(), gates = circuit.depth()))]
    pub fn evolve(circuit: &Circuit) -> Self {
        let mut sv = Self::new(circuit.num_qubits());

        for (qubit, state) in circuit.initial_states().iter().enumerate() {
            if state.is_one() {
                sv.apply_x(qubit);
            }
        }

        for gate in circuit.gates() {
            let qubits: Vec<usize> = gate.qubits.iter().map(|q| q.index()).collect();
            sv.apply_kind(gate.kind, &qubits);
        }

        debug!("evolution finished");
        sv
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Amplitudes in basis-index order.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Squared magnitude of each amplitude.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Sum of squared magnitudes; 1 for a normalized state.
    pub fn norm_sqr_sum(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Bitstring of a basis index, most-significant qubit first.
    pub fn bitstring(&self, index: usize) -> String {
        format!("{:0width$b}", index, width = self.num_qubits)
    }

    /// Apply a gate after checking its operands against this state.
    pub fn apply(&mut self, gate: &Gate) -> SimResult<()> {
        self.apply_gate(gate.kind, &gate.qubits)
    }

    /// Apply `kind` to the given qubits after checking arity and range.
    pub fn apply_gate(&mut self, kind: GateKind, qubits: &[QubitId]) -> SimResult<()> {
        let indices: Vec<usize> = qubits.iter().map(|q| q.index()).collect();
        let distinct = indices.len() < 2 || indices[0] != indices[1];
        if indices.len() != kind.num_qubits() as usize
            || !distinct
            || indices.iter().any(|&q| q >= self.num_qubits)
        {
            return Err(SimError::InvalidOperands {
                gate: kind.name(),
                qubits: qubits.iter().map(|q| q.0).collect(),
                num_qubits: self.num_qubits,
            });
        }
        self.apply_kind(kind, &indices);
        Ok(())
    }

    /// Dispatch on the closed gate set. Operands are already validated.
    fn apply_kind(&mut self, kind: GateKind, qubits: &[usize]) {
        match kind {
            GateKind::H => self.apply_h(qubits[0]),
            GateKind::X => self.apply_x(qubits[0]),
            GateKind::Y => self.apply_y(qubits[0]),
            GateKind::Z => self.apply_z(qubits[0]),
            GateKind::S => self.apply_phase(qubits[0], Complex64::new(0.0, 1.0)),
            GateKind::T => {
                self.apply_phase(qubits[0], Complex64::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2))
            }
            GateKind::CX => self.apply_cx(qubits[0], qubits[1]),
            GateKind::CZ => self.apply_cz(qubits[0], qubits[1]),
            GateKind::Swap => self.apply_swap(qubits[0], qubits[1]),
            // Counts come from the sampler, not from collapsing the state.
            GateKind::Measure => {}
        }
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                self.amplitudes.swap(i, i | mask);
            }
        }
    }

    fn apply_y(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let i_val = Complex64::new(0.0, 1.0);
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                self.amplitudes[i] = -i_val * self.amplitudes[j];
                self.amplitudes[j] = i_val * a;
            }
        }
    }

    fn apply_z(&mut self, qubit: usize) {
        self.apply_phase(qubit, Complex64::new(-1.0, 0.0));
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = FRAC_1_SQRT_2 * (a + b);
                self.amplitudes[j] = FRAC_1_SQRT_2 * (a - b);
            }
        }
    }

    /// diag(1, phase) on `qubit`.
    fn apply_phase(&mut self, qubit: usize, phase: Complex64) {
        let mask = 1 << qubit;
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask != 0 {
                *amp *= phase;
            }
        }
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    fn apply_cx(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                self.amplitudes.swap(i, i | tgt_mask);
            }
        }
    }

    fn apply_cz(&mut self, q1: usize, q2: usize) {
        let both = (1 << q1) | (1 << q2);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & both == both {
                *amp = -*amp;
            }
        }
    }

    fn apply_swap(&mut self, q1: usize, q2: usize) {
        let mask1 = 1 << q1;
        let mask2 = 1 << q2;
        for i in 0..self.amplitudes.len() {
            if (i & mask1 != 0) && (i & mask2 == 0) {
                let j = (i & !mask1) | mask2;
                self.amplitudes.swap(i, j);
            }
        }
    }
}
