//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use serde::Deserialize;

use qsim_adapter_ibm::{IbmProvider, config_from_env};
use qsim_ir::{Circuit, CircuitInput};

/// A circuit file: either a bare circuit or a full run request.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RequestFile {
    Request {
        circuit: CircuitInput,
        #[serde(default)]
        options: FileOptions,
    },
    Circuit(CircuitInput),
}

/// Options carried in a request file. Command-line flags take precedence.
#[derive(Debug, Default, Deserialize)]
pub struct FileOptions {
    pub backend: Option<String>,
    pub shots: Option<u64>,
    pub optimization_level: Option<u8>,
}

impl RequestFile {
    /// Split into the circuit and its options.
    pub fn into_parts(self) -> (CircuitInput, FileOptions) {
        match self {
            RequestFile::Request { circuit, options } => (circuit, options),
            RequestFile::Circuit(circuit) => (circuit, FileOptions::default()),
        }
    }
}

/// Load a request from a JSON or YAML file.
pub fn load_request(path: &str) -> Result<RequestFile> {
    let path_obj = Path::new(path);
    if !path_obj.exists() {
        anyhow::bail!("File not found: {path}");
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;
    let ext = path_obj.extension().and_then(|e| e.to_str()).unwrap_or("");

    match ext.to_lowercase().as_str() {
        "yaml" | "yml" => {
            serde_yaml_ng::from_str(&source).map_err(|e| anyhow::anyhow!("Parse error: {e}"))
        }
        _ => serde_json::from_str(&source).map_err(|e| anyhow::anyhow!("Parse error: {e}")),
    }
}

/// Load and validate a circuit, discarding any options in the file.
pub fn load_circuit(path: &str) -> Result<Circuit> {
    let (input, _) = load_request(path)?.into_parts();
    Ok(Circuit::from_input(&input)?)
}

/// Write `content` to `output`, or to stdout when no file is given.
pub fn write_output(content: &str, output: Option<&str>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("Failed to write {path}"))?;
            println!("{} Wrote {}", style("✓").green().bold(), style(path).green());
        }
        None => print!("{content}"),
    }
    Ok(())
}

/// Build the IBM provider from the environment, if credentials are set.
pub fn provider_from_env() -> Result<Option<IbmProvider>> {
    match config_from_env() {
        Some(config) => Ok(Some(IbmProvider::new(&config)?)),
        None => Ok(None),
    }
}

/// Print a histogram of outcome counts, most frequent first.
pub fn print_counts<'a>(counts: impl IntoIterator<Item = (&'a String, &'a u64)>) {
    let mut sorted: Vec<_> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    let total: u64 = sorted.iter().map(|(_, c)| **c).sum();

    for (bitstring, count) in sorted.iter().take(16) {
        let prob = **count as f64 / total.max(1) as f64 * 100.0;
        let bar: String = "█".repeat((prob / 2.0).round() as usize);
        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(bitstring).cyan(),
            count,
            prob,
            style(bar).green()
        );
    }

    if sorted.len() > 16 {
        println!("  ... and {} more outcomes", sorted.len() - 16);
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_full_request_json() {
        let file = write_temp(
            ".json",
            r#"{"circuit": {"numQubits": 2, "gates": [{"name": "h", "qubits": [0], "position": 0}]},
                "options": {"shots": 10, "backend": "qasm_simulator"}}"#,
        );
        let (circuit, options) = load_request(file.path().to_str().unwrap())
            .unwrap()
            .into_parts();
        assert_eq!(circuit.num_qubits, 2);
        assert_eq!(options.shots, Some(10));
        assert_eq!(options.backend.as_deref(), Some("qasm_simulator"));
        assert_eq!(options.optimization_level, None);
    }

    #[test]
    fn test_load_bare_circuit_yaml() {
        let file = write_temp(
            ".yaml",
            "numQubits: 2\ngates:\n  - name: h\n    qubits: [0]\n    position: 0\n  - name: cx\n    qubits: [0, 1]\n    position: 1\n",
        );
        let circuit = load_circuit(file.path().to_str().unwrap()).unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.depth(), 2);
    }

    #[test]
    fn test_invalid_circuit_is_rejected() {
        let file = write_temp(
            ".json",
            r#"{"numQubits": 1, "gates": [{"name": "rx", "qubits": [0], "position": 0}]}"#,
        );
        let err = load_circuit(file.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("rx"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_request("/nonexistent/circuit.json").unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }
}
