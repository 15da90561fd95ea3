//! Status command implementation.

use anyhow::Result;
use console::style;

use qsim_hal::{HardwareProvider, JobId, JobStatus};

use super::common::{print_counts, provider_from_env};

/// Execute the status command.
pub async fn execute(job_id: &str) -> Result<()> {
    let Some(provider) = provider_from_env()? else {
        anyhow::bail!("Hardware provider not available. Set IBM_QUANTUM_TOKEN.");
    };

    let job_id = JobId::new(job_id);
    let status = provider.status(&job_id).await?;
    let marker = match &status {
        JobStatus::Completed => style("●").green(),
        JobStatus::Failed(_) | JobStatus::Cancelled => style("●").red(),
        JobStatus::Queued | JobStatus::Running => style("●").yellow(),
    };
    println!("{} Job {}: {}", marker, style(&job_id).cyan(), status.name());

    if status == JobStatus::Completed {
        let result = provider.result(&job_id).await?;
        print_counts(result.counts.iter());
    } else {
        println!("  {}", status.message());
    }
    Ok(())
}
