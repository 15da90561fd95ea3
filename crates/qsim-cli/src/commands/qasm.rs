//! OpenQASM 3 emission command.

use anyhow::Result;

use qsim_ir::qasm;

use super::common::{load_circuit, write_output};

/// Execute the qasm command.
pub fn execute(input: &str, output: Option<&str>) -> Result<()> {
    let circuit = load_circuit(input)?;
    write_output(&qasm::emit(&circuit), output)
}
