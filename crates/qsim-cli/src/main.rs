//! qsim command-line interface.
//!
//! Runs circuit files through the local simulation engine, submits them to
//! IBM Quantum hardware, and renders them as OpenQASM 3 or Qiskit scripts.
//!
//! Circuit files are JSON or YAML, either a bare circuit or a full request:
//!
//! ```text
//! circuit:
//!   numQubits: 2
//!   gates:
//!     - { name: h,  qubits: [0],    position: 0 }
//!     - { name: cx, qubits: [0, 1], position: 1 }
//! options:
//!   shots: 1000
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{backends, code, qasm, run, status, version};

/// qsim - quantum circuit simulation
#[derive(Parser)]
#[command(name = "qsim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a circuit or submit it to hardware
    Run {
        /// Input file (JSON or YAML)
        #[arg(short, long)]
        input: String,

        /// Number of shots [default: 1024]
        #[arg(short, long)]
        shots: Option<u64>,

        /// Backend to use [default: simulator]
        #[arg(short, long)]
        backend: Option<String>,

        /// Optimization level for hardware (0-3) [default: 1]
        #[arg(long)]
        optimization_level: Option<u8>,

        /// Seed for reproducible sampling
        #[arg(long)]
        seed: Option<u64>,

        /// Wait for a hardware job to finish
        #[arg(short, long)]
        wait: bool,
    },

    /// Query a hardware job
    Status {
        /// Job ID
        job_id: String,
    },

    /// Generate a Qiskit script for a circuit
    Code {
        /// Input file (JSON or YAML)
        #[arg(short, long)]
        input: String,

        /// Output file
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Emit a circuit as OpenQASM 3
    Qasm {
        /// Input file (JSON or YAML)
        #[arg(short, long)]
        input: String,

        /// Output file
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List available backends
    Backends,

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Run {
            input,
            shots,
            backend,
            optimization_level,
            seed,
            wait,
        } => {
            run::execute(run::RunArgs {
                input: &input,
                shots,
                backend: backend.as_deref(),
                optimization_level,
                seed,
                wait,
            })
            .await
        }

        Commands::Status { job_id } => status::execute(&job_id).await,

        Commands::Code { input, output } => code::execute(&input, output.as_deref()),

        Commands::Qasm { input, output } => qasm::execute(&input, output.as_deref()),

        Commands::Backends => backends::execute().await,

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
