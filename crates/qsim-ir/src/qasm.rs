//! OpenQASM 3 emitter.
//!
//! Used as the submission format for hardware providers and by `qsim qasm`.

use std::fmt::Write;

use crate::circuit::Circuit;
use crate::gate::{Gate, GateKind};

/// Emit a circuit as OpenQASM 3 source.
///
/// Initial |1⟩ states become leading `x` gates. Each `measure` writes the
/// classical bit with the same index as the measured qubit.
pub fn emit(circuit: &Circuit) -> String {
    let mut emitter = Emitter::new();
    emitter.emit_circuit(circuit);
    emitter.output
}

struct Emitter {
    output: String,
}

impl Emitter {
    fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    fn emit_circuit(&mut self, circuit: &Circuit) {
        self.writeln("OPENQASM 3.0;");
        self.writeln("include \"stdgates.inc\";");
        self.writeln("");

        let n = circuit.num_qubits();
        self.writeln(&format!("qubit[{n}] q;"));
        self.writeln(&format!("bit[{n}] c;"));
        self.writeln("");

        for (qubit, state) in circuit.initial_states().iter().enumerate() {
            if state.is_one() {
                self.writeln(&format!("x q[{qubit}];"));
            }
        }

        for gate in circuit.gates() {
            self.emit_gate(gate);
        }
    }

    fn emit_gate(&mut self, gate: &Gate) {
        match gate.kind {
            GateKind::Measure => {
                let q = gate.qubits[0].0;
                self.writeln(&format!("c[{q}] = measure q[{q}];"));
            }
            kind => {
                let mut line = String::from(kind.name());
                for (i, q) in gate.qubits.iter().enumerate() {
                    let sep = if i == 0 { " " } else { ", " };
                    let _ = write!(line, "{sep}q[{}]", q.0);
                }
                line.push(';');
                self.writeln(&line);
            }
        }
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}
