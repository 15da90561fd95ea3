//! Run command implementation.

use std::time::Duration;

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use qsim_adapter_sim::{SimulationPipeline, SimulationReport, SimulatorConfig, is_local_backend};
use qsim_hal::{DEFAULT_SHOTS, HardwareProvider, MAX_OPTIMIZATION_LEVEL, SubmitOptions};
use qsim_ir::Circuit;

use super::common::{load_request, print_counts, provider_from_env};

/// Arguments of the run command.
pub struct RunArgs<'a> {
    pub input: &'a str,
    pub shots: Option<u64>,
    pub backend: Option<&'a str>,
    pub optimization_level: Option<u8>,
    pub seed: Option<u64>,
    pub wait: bool,
}

/// Execute the run command.
pub async fn execute(args: RunArgs<'_>) -> Result<()> {
    let (input, file_options) = load_request(args.input)?.into_parts();
    let circuit = Circuit::from_input(&input)?;

    let backend = args
        .backend
        .map(str::to_string)
        .or(file_options.backend)
        .unwrap_or_else(|| "simulator".to_string());
    let shots = args
        .shots
        .or(file_options.shots)
        .unwrap_or(u64::from(DEFAULT_SHOTS));
    let optimization_level = args
        .optimization_level
        .or(file_options.optimization_level)
        .unwrap_or(1);
    if shots == 0 {
        anyhow::bail!("shots must be at least 1");
    }
    if optimization_level > MAX_OPTIMIZATION_LEVEL {
        anyhow::bail!(
            "optimization level must be between 0 and {MAX_OPTIMIZATION_LEVEL}, got {optimization_level}"
        );
    }

    println!(
        "{} Running {} on {} ({} shots)",
        style("→").cyan().bold(),
        style(args.input).green(),
        style(&backend).yellow(),
        shots
    );
    println!(
        "  Loaded: {} qubits, depth {}",
        circuit.num_qubits(),
        circuit.depth()
    );

    if is_local_backend(&backend) {
        let config = SimulatorConfig {
            seed: args.seed,
            ..SimulatorConfig::default()
        };
        let report = SimulationPipeline::new(config).run(&circuit, shots)?;
        print_report(&report);
        return Ok(());
    }

    let Some(provider) = provider_from_env()? else {
        anyhow::bail!(
            "Backend {backend} not available. Set IBM_QUANTUM_TOKEN to use hardware backends."
        );
    };
    if !provider.has_backend(&backend).await? {
        anyhow::bail!("Backend {backend} not available");
    }

    let options = SubmitOptions::default()
        .with_shots(u32::try_from(shots)?)
        .with_optimization_level(optimization_level);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message("Submitting job...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let job_id = provider.submit(&backend, &circuit, &options).await?;
    if !args.wait {
        spinner.finish_and_clear();
        println!(
            "{} Submitted job {}",
            style("✓").green().bold(),
            style(&job_id).cyan()
        );
        println!("  Poll with: qsim status {job_id}");
        return Ok(());
    }

    spinner.set_message(format!("Running job {job_id}..."));
    let result = provider.wait(&job_id).await?;
    spinner.finish_and_clear();

    println!(
        "\n{} Results ({} shots):",
        style("✓").green().bold(),
        result.shots
    );
    print_counts(result.counts.iter());
    Ok(())
}

fn print_report(report: &SimulationReport) {
    let sv = &report.statevector;
    println!("\n{} Statevector:", style("✓").green().bold());
    for (index, amplitude) in sv.amplitudes().iter().enumerate() {
        if amplitude.norm_sqr() > 1e-12 {
            println!(
                "  |{}⟩  {:>+.4} {:>+.4}i  (p = {:.4})",
                style(sv.bitstring(index)).cyan(),
                amplitude.re,
                amplitude.im,
                amplitude.norm_sqr()
            );
        }
    }

    println!("\n{} Counts ({} shots):", style("✓").green().bold(), report.counts.total());
    print_counts(report.counts.iter());

    println!("\n{} Entanglement entropy:", style("✓").green().bold());
    for (qubit, entropy) in report.entanglement_entropies.iter().enumerate() {
        println!("  q[{qubit}]: {entropy:.4}");
    }

    for anomaly in &report.warnings {
        println!("  {} {anomaly}", style("!").yellow().bold());
    }

    println!(
        "\n  Simulation time: {} ms",
        style(report.elapsed.as_millis()).yellow()
    );
}
