//! Qiskit script generation command.

use anyhow::Result;

use qsim_ir::codegen;

use super::common::{load_circuit, write_output};

/// Execute the code command.
pub fn execute(input: &str, output: Option<&str>) -> Result<()> {
    let circuit = load_circuit(input)?;
    write_output(&codegen::qiskit_script(&circuit), output)
}
