//! Validated circuit model.

use serde::Serialize;

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, GateKind};
use crate::input::CircuitInput;
use crate::qubit::{BasisState, MAX_QUBITS, QubitId};

/// A validated quantum circuit.
///
/// Every gate has the right arity, every qubit index is in range, and gates
/// are stored in execution order (ascending `position`, ties in input order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Circuit {
    /// Number of qubits.
    num_qubits: u32,
    /// Initial basis state of each qubit.
    initial_states: Vec<BasisState>,
    /// Gates in execution order.
    gates: Vec<Gate>,
}

impl Circuit {
    /// Create an empty circuit with all qubits in |0⟩.
    pub fn with_size(num_qubits: u32) -> IrResult<Self> {
        let num_qubits = check_num_qubits(i64::from(num_qubits))?;
        Ok(Self {
            num_qubits,
            initial_states: vec![BasisState::Zero; num_qubits as usize],
            gates: Vec::new(),
        })
    }

    /// Validate wire input and build a circuit.
    ///
    /// Nothing is partially accepted: the first violation found (qubit count,
    /// then initial states, then gates in input order) is returned.
    pub fn from_input(input: &CircuitInput) -> IrResult<Self> {
        let num_qubits = check_num_qubits(input.num_qubits)?;

        let initial_states = match &input.initial_states {
            None => vec![BasisState::Zero; num_qubits as usize],
            Some(states) => parse_initial_states(states, num_qubits as usize)?,
        };

        let mut gates = Vec::with_capacity(input.gates.len());
        for (index, raw) in input.gates.iter().enumerate() {
            let kind = GateKind::from_name(&raw.name).ok_or_else(|| IrError::UnknownGate {
                name: raw.name.clone(),
                index,
            })?;
            let qubits = check_operands(kind, &raw.qubits, index, num_qubits)?;
            gates.push(Gate {
                kind,
                qubits,
                position: raw.position,
            });
        }

        // `sort_by_key` is stable, so equal positions keep their input order.
        gates.sort_by_key(|g| g.position);

        Ok(Self {
            num_qubits,
            initial_states,
            gates,
        })
    }

    /// Replace the initial basis states.
    pub fn with_initial_states(mut self, states: Vec<BasisState>) -> IrResult<Self> {
        if states.len() != self.num_qubits as usize {
            return Err(IrError::InitialStateLength {
                expected: self.num_qubits as usize,
                got: states.len(),
            });
        }
        self.initial_states = states;
        Ok(self)
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Initial basis state of each qubit.
    #[inline]
    pub fn initial_states(&self) -> &[BasisState] {
        &self.initial_states
    }

    /// Gates in execution order.
    #[inline]
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Circuit depth as reported to clients: the number of gates.
    #[inline]
    pub fn depth(&self) -> usize {
        self.gates.len()
    }

    /// Whether any gate acting on more than one qubit touches `qubit`.
    pub fn is_entangling_on(&self, qubit: QubitId) -> bool {
        self.gates
            .iter()
            .any(|g| g.is_multi_qubit() && g.acts_on(qubit))
    }

    /// Append a gate after every existing gate.
    pub fn push(&mut self, kind: GateKind, qubits: &[QubitId]) -> IrResult<&mut Self> {
        let raw: Vec<i64> = qubits.iter().map(|q| i64::from(q.0)).collect();
        let index = self.gates.len();
        let qubits = check_operands(kind, &raw, index, self.num_qubits)?;
        let position = self.gates.last().map_or(0, |g| g.position + 1);
        self.gates.push(Gate {
            kind,
            qubits,
            position,
        });
        Ok(self)
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(GateKind::H, &[qubit])
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(GateKind::X, &[qubit])
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(GateKind::Y, &[qubit])
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(GateKind::Z, &[qubit])
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(GateKind::S, &[qubit])
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(GateKind::T, &[qubit])
    }

    /// Measure a qubit.
    pub fn measure(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(GateKind::Measure, &[qubit])
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(GateKind::CX, &[control, target])
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.push(GateKind::CZ, &[q1, q2])
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.push(GateKind::Swap, &[q1, q2])
    }

    // =========================================================================
    // Common circuits
    // =========================================================================

    /// Bell pair (|00⟩ + |11⟩)/√2.
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::with_size(2)?;
        circuit.h(QubitId(0))?.cx(QubitId(0), QubitId(1))?;
        Ok(circuit)
    }

    /// n-qubit GHZ state (|0…0⟩ + |1…1⟩)/√2.
    pub fn ghz(n: u32) -> IrResult<Self> {
        let mut circuit = Self::with_size(n)?;
        circuit.h(QubitId(0))?;
        for i in 1..n {
            circuit.cx(QubitId(0), QubitId(i))?;
        }
        Ok(circuit)
    }
}

fn check_num_qubits(num_qubits: i64) -> IrResult<u32> {
    if num_qubits < 1 {
        return Err(IrError::NoQubits(num_qubits));
    }
    if num_qubits > i64::from(MAX_QUBITS) {
        return Err(IrError::TooManyQubits {
            num_qubits,
            limit: MAX_QUBITS,
        });
    }
    Ok(num_qubits as u32)
}

fn parse_initial_states(states: &[String], num_qubits: usize) -> IrResult<Vec<BasisState>> {
    if states.len() != num_qubits {
        return Err(IrError::InitialStateLength {
            expected: num_qubits,
            got: states.len(),
        });
    }
    states
        .iter()
        .enumerate()
        .map(|(qubit, value)| {
            BasisState::parse(value).ok_or_else(|| IrError::InvalidInitialState {
                qubit,
                value: value.clone(),
            })
        })
        .collect()
}

fn check_operands(
    kind: GateKind,
    raw: &[i64],
    index: usize,
    num_qubits: u32,
) -> IrResult<Vec<QubitId>> {
    let gate_name = kind.name();
    if raw.len() != kind.num_qubits() as usize {
        return Err(IrError::QubitCountMismatch {
            gate_name: gate_name.to_string(),
            index,
            expected: kind.num_qubits(),
            got: raw.len(),
        });
    }

    let mut qubits = Vec::with_capacity(raw.len());
    for &q in raw {
        if q < 0 || q >= i64::from(num_qubits) {
            return Err(IrError::QubitOutOfRange {
                gate_name: gate_name.to_string(),
                index,
                qubit: q,
                num_qubits,
            });
        }
        let id = QubitId(q as u32);
        if qubits.contains(&id) {
            return Err(IrError::DuplicateQubit {
                gate_name: gate_name.to_string(),
                index,
                qubit: id.0,
            });
        }
        qubits.push(id);
    }
    Ok(qubits)
}
