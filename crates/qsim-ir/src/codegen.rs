//! Qiskit client-code generation.
//!
//! Produces a standalone Python script that rebuilds the circuit with Qiskit,
//! prints its statevector probabilities and samples it on the Aer QASM
//! simulator, so users can reproduce a result outside qsim.

use std::fmt::Write;

use crate::circuit::Circuit;
use crate::gate::{Gate, GateKind};

/// Shots used by the sampling section of the generated script.
const SCRIPT_SHOTS: u32 = 1024;

/// Generate a Qiskit Python script for a circuit.
pub fn qiskit_script(circuit: &Circuit) -> String {
    let n = circuit.num_qubits();
    let mut code = String::new();

    code.push_str("from qiskit import QuantumCircuit, transpile\n");
    code.push_str("from qiskit_aer import Aer\n");
    code.push_str("from qiskit.visualization import plot_histogram, plot_bloch_multivector\n");
    code.push_str("import numpy as np\n\n");

    let _ = writeln!(code, "# Create a quantum circuit with {n} qubits");
    let _ = writeln!(code, "qc = QuantumCircuit({n}, {n})\n");

    for (qubit, state) in circuit.initial_states().iter().enumerate() {
        if state.is_one() {
            let _ = writeln!(code, "qc.x({qubit})  # Initialize qubit {qubit} to |1⟩");
        }
    }

    code.push_str("\n# Add gates to the circuit\n");
    for gate in circuit.gates() {
        let _ = writeln!(code, "{}  # {}", gate_call(gate), gate.kind.description());
    }

    code.push_str("\n# Draw the circuit\n");
    code.push_str("print(qc.draw())\n\n");

    code.push_str("# Simulate the circuit\n");
    code.push_str("simulator = Aer.get_backend('statevector_simulator')\n");
    code.push_str("job = simulator.run(transpile(qc, simulator))\n");
    code.push_str("result = job.result()\n");
    code.push_str("statevector = result.get_statevector()\n\n");

    code.push_str("# Print the state vector\n");
    code.push_str("print('\\nState vector:')\n");
    code.push_str("print(statevector)\n\n");

    code.push_str("# Calculate probabilities\n");
    code.push_str("probabilities = {}\n");
    code.push_str("for i, amplitude in enumerate(statevector):\n");
    code.push_str("    if abs(amplitude) > 1e-6:  # Ignore very small amplitudes\n");
    let _ = writeln!(
        code,
        "        state = format(i, '0{n}b')  # Convert to binary"
    );
    code.push_str("        probability = abs(amplitude)**2\n");
    code.push_str("        probabilities[state] = probability\n");
    code.push_str("        print(f'|{state}⟩: {probability:.4f}')\n\n");

    code.push_str("# Run on QASM simulator for measurement results\n");
    code.push_str("qasm_simulator = Aer.get_backend('qasm_simulator')\n");
    let _ = writeln!(
        code,
        "job = qasm_simulator.run(transpile(qc, qasm_simulator), shots={SCRIPT_SHOTS})"
    );
    code.push_str("result = job.result()\n");
    code.push_str("counts = result.get_counts(qc)\n");
    code.push_str("print('\\nCounts:', counts)\n");
    code.push_str("plot_histogram(counts)\n");

    code
}

fn gate_call(gate: &Gate) -> String {
    let q = &gate.qubits;
    match gate.kind {
        GateKind::Measure => format!("qc.measure({}, {})", q[0].0, q[0].0),
        kind if kind.num_qubits() == 2 => format!("qc.{}({}, {})", kind.name(), q[0].0, q[1].0),
        kind => format!("qc.{}({})", kind.name(), q[0].0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qubit::{BasisState, QubitId};

    #[test]
    fn test_script_contains_gates_in_order() {
        let mut circuit = Circuit::bell().unwrap();
        circuit.measure(QubitId(1)).unwrap();
        let code = qiskit_script(&circuit);

        assert!(code.contains("qc = QuantumCircuit(2, 2)"));
        let h = code.find("qc.h(0)  # Hadamard gate").unwrap();
        let cx = code.find("qc.cx(0, 1)  # CNOT gate").unwrap();
        let m = code.find("qc.measure(1, 1)  # Measure qubit").unwrap();
        assert!(h < cx && cx < m);
        assert!(code.contains("format(i, '02b')"));
    }

    #[test]
    fn test_script_initializes_one_states() {
        let circuit = Circuit::with_size(2)
            .unwrap()
            .with_initial_states(vec![BasisState::One, BasisState::Zero])
            .unwrap();
        let code = qiskit_script(&circuit);
        assert!(code.contains("qc.x(0)  # Initialize qubit 0 to |1⟩"));
        assert!(!code.contains("qc.x(1)  # Initialize"));
    }
}
