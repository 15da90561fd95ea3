//! Backends command implementation.

use anyhow::Result;
use console::style;

use qsim_adapter_sim::{LOCAL_BACKENDS, SimulatorConfig};
use qsim_hal::HardwareProvider;

use super::common::provider_from_env;

/// Execute the backends command.
pub async fn execute() -> Result<()> {
    println!("{} Available backends:\n", style("qsim").cyan().bold());

    let config = SimulatorConfig::default();
    for (name, description) in LOCAL_BACKENDS {
        println!("  {} {} (local)", style("●").green(), style(name).bold());
        println!("    {description}");
        println!("    Qubits: {}", config.max_qubits());
    }
    println!();

    match provider_from_env() {
        Ok(Some(provider)) => match provider.list_backends().await {
            Ok(backends) => {
                for backend in backends {
                    let active = backend.status.as_deref() == Some("active");
                    println!(
                        "  {} {} ({})",
                        if active {
                            style("●").green()
                        } else {
                            style("○").yellow()
                        },
                        style(&backend.name).bold(),
                        provider.name()
                    );
                    println!("    Qubits: {}", backend.num_qubits);
                    if let Some(status) = &backend.status {
                        println!("    Status: {status}");
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to list provider backends");
                println!("  {} ibm (unreachable: {e})", style("○").red());
            }
        },
        Ok(None) => {
            println!("  {} {} (not configured)", style("○").dim(), style("ibm").dim());
            println!("    Set IBM_QUANTUM_TOKEN environment variable to enable");
        }
        Err(e) => {
            println!("  {} ibm ({e})", style("○").red());
        }
    }

    Ok(())
}
