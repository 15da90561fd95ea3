//! Validation of wire-format circuits.

use proptest::prelude::*;
use qsim_ir::{BasisState, Circuit, CircuitInput, GateInput, GateKind, IrError};

fn parse(json: &str) -> CircuitInput {
    serde_json::from_str(json).expect("valid JSON")
}

// ---------------------------------------------------------------------------
// Rejections
// ---------------------------------------------------------------------------

#[test]
fn unknown_gate_names_the_gate() {
    let input = parse(r#"{"numQubits": 1, "gates": [{"name": "bogus", "qubits": [0], "position": 0}]}"#);
    let err = Circuit::from_input(&input).unwrap_err();
    assert_eq!(
        err,
        IrError::UnknownGate {
            name: "bogus".into(),
            index: 0
        }
    );
    assert!(err.to_string().contains("bogus"));
}

#[test]
fn arity_mismatch_is_an_error() {
    let input = parse(r#"{"numQubits": 2, "gates": [{"name": "cx", "qubits": [0], "position": 0}]}"#);
    let err = Circuit::from_input(&input).unwrap_err();
    assert!(matches!(
        err,
        IrError::QubitCountMismatch {
            expected: 2,
            got: 1,
            ..
        }
    ));
    assert_eq!(err.gate_name(), Some("cx"));

    let input = parse(r#"{"numQubits": 2, "gates": [{"name": "h", "qubits": [0, 1], "position": 0}]}"#);
    assert!(matches!(
        Circuit::from_input(&input),
        Err(IrError::QubitCountMismatch { expected: 1, got: 2, .. })
    ));
}

#[test]
fn out_of_range_and_negative_qubits_rejected() {
    let input = parse(r#"{"numQubits": 2, "gates": [{"name": "x", "qubits": [2], "position": 0}]}"#);
    assert!(matches!(
        Circuit::from_input(&input),
        Err(IrError::QubitOutOfRange { qubit: 2, num_qubits: 2, .. })
    ));

    let input = parse(r#"{"numQubits": 2, "gates": [{"name": "x", "qubits": [-1], "position": 0}]}"#);
    assert!(matches!(
        Circuit::from_input(&input),
        Err(IrError::QubitOutOfRange { qubit: -1, .. })
    ));
}

#[test]
fn error_points_at_first_bad_gate() {
    let input = parse(
        r#"{"numQubits": 2, "gates": [
            {"name": "h", "qubits": [0], "position": 0},
            {"name": "swap", "qubits": [0, 5], "position": 1},
            {"name": "nope", "qubits": [0], "position": 2}
        ]}"#,
    );
    let err = Circuit::from_input(&input).unwrap_err();
    assert_eq!(err.gate_index(), Some(1));
    assert_eq!(err.gate_name(), Some("swap"));
}

#[test]
fn initial_states_are_checked() {
    let input = parse(r#"{"numQubits": 2, "initialStates": ["0"]}"#);
    assert!(matches!(
        Circuit::from_input(&input),
        Err(IrError::InitialStateLength { expected: 2, got: 1 })
    ));

    let input = parse(r#"{"numQubits": 2, "initialStates": ["0", "+"]}"#);
    assert!(matches!(
        Circuit::from_input(&input),
        Err(IrError::InvalidInitialState { qubit: 1, .. })
    ));
}

// ---------------------------------------------------------------------------
// Acceptance
// ---------------------------------------------------------------------------

#[test]
fn initial_states_default_to_zero() {
    let circuit = Circuit::from_input(&parse(r#"{"numQubits": 3}"#)).unwrap();
    assert_eq!(circuit.initial_states(), &[BasisState::Zero; 3]);
}

#[test]
fn gates_sorted_by_position() {
    let input = parse(
        r#"{"numQubits": 2, "initialStates": ["1", "0"], "gates": [
            {"name": "cx", "qubits": [0, 1], "position": 1},
            {"name": "h", "qubits": [0], "position": 0},
            {"name": "measure", "qubits": [1], "position": 2}
        ]}"#,
    );
    let circuit = Circuit::from_input(&input).unwrap();
    let kinds: Vec<_> = circuit.gates().iter().map(|g| g.kind).collect();
    assert_eq!(kinds, vec![GateKind::H, GateKind::CX, GateKind::Measure]);
    assert_eq!(circuit.depth(), 3);
    assert_eq!(circuit.initial_states()[0], BasisState::One);
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn arb_gate(num_qubits: i64) -> impl Strategy<Value = GateInput> {
    let names = prop::sample::select(GateKind::ALL.to_vec());
    (names, 0..num_qubits, 0..num_qubits, -5i64..5).prop_map(move |(kind, a, b, position)| {
        let qubits = if kind.num_qubits() == 1 {
            vec![a]
        } else {
            let b = if a == b { (a + 1) % num_qubits } else { b };
            vec![a, b]
        };
        GateInput::new(kind.name(), qubits, position)
    })
}

fn arb_input() -> impl Strategy<Value = CircuitInput> {
    (2i64..6).prop_flat_map(|n| {
        prop::collection::vec(arb_gate(n), 0..20).prop_map(move |gates| CircuitInput {
            num_qubits: n,
            initial_states: None,
            gates,
        })
    })
}

proptest! {
    #[test]
    fn valid_inputs_always_accepted_and_sorted(input in arb_input()) {
        let circuit = Circuit::from_input(&input).unwrap();
        prop_assert_eq!(circuit.depth(), input.gates.len());
        let positions: Vec<_> = circuit.gates().iter().map(|g| g.position).collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        prop_assert_eq!(positions, sorted);
    }
}
