//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - quantum circuit simulation",
        style("qsim").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qsim-ir           Circuit model and gate library");
    println!("  qsim-adapter-sim  Statevector, density-matrix and entropy engine");
    println!("  qsim-hal          Hardware-provider interface");
    println!("  qsim-adapter-ibm  IBM Quantum provider");
    println!("  qsim-server       HTTP service");
    println!();
    println!("License: {}", style("Apache-2.0").dim());
}
