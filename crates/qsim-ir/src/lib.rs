//! qsim Circuit Model
//!
//! This crate holds the validated, ordered representation of a circuit that the
//! qsim engine simulates, together with the fixed catalog of supported gates.
//!
//! # Overview
//!
//! Circuits arrive over the wire as a [`CircuitInput`] (qubit count, optional
//! initial basis state per qubit, and an unordered list of gates tagged with a
//! `position`). [`Circuit::from_input`] validates every field before anything is
//! simulated and produces a [`Circuit`] whose gates are sorted by position, ties
//! broken by input order.
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qsim_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size(2).unwrap();
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 2);
//! ```
//!
//! # Example: Validating Wire Input
//!
//! ```rust
//! use qsim_ir::{Circuit, CircuitInput, IrError};
//!
//! let input: CircuitInput = serde_json::from_str(
//!     r#"{"numQubits": 1, "gates": [{"name": "bogus", "qubits": [0], "position": 0}]}"#,
//! ).unwrap();
//!
//! let err = Circuit::from_input(&input).unwrap_err();
//! assert!(matches!(err, IrError::UnknownGate { .. }));
//! assert_eq!(err.gate_name(), Some("bogus"));
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `h` | 1 | Hadamard gate |
//! | `x`, `y`, `z` | 1 | Pauli gates |
//! | `s`, `t` | 1 | Phase gates (π/2, π/4) |
//! | `cx` | 2 | Controlled-NOT (control, target) |
//! | `cz` | 2 | Controlled-Z |
//! | `swap` | 2 | SWAP gate |
//! | `measure` | 1 | Computational-basis measurement |

pub mod circuit;
pub mod codegen;
pub mod error;
pub mod gate;
pub mod input;
pub mod qasm;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{Gate, GateKind};
pub use input::{CircuitInput, GateInput};
pub use qubit::{BasisState, MAX_QUBITS, QubitId};
