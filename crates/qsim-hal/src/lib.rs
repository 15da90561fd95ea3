//! qsim Hardware-Provider Interface
//!
//! The simulation engine never talks to quantum hardware. Everything that does
//! (listing remote backends, submitting a circuit, polling a job) goes through
//! the [`HardwareProvider`] trait defined here, implemented by adapter crates
//! such as `qsim-adapter-ibm`.
//!
//! Providers are built from an explicit [`ProviderConfig`] at process start and
//! injected into whichever component needs them; nothing in this crate reads
//! credentials from the environment.
//!
//! # Example: Submitting and Waiting
//!
//! ```ignore
//! use qsim_hal::{HardwareProvider, SubmitOptions};
//! use qsim_ir::Circuit;
//!
//! async fn run(provider: &dyn HardwareProvider) -> qsim_hal::HalResult<()> {
//!     let circuit = Circuit::bell().unwrap();
//!     let job_id = provider
//!         .submit("ibm_torino", &circuit, &SubmitOptions::default())
//!         .await?;
//!     let result = provider.wait(&job_id).await?;
//!     println!("{:?}", result.counts.most_frequent());
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod error;
pub mod job;
pub mod provider;
pub mod result;

pub use backend::{BackendInfo, BackendKind};
pub use error::{HalError, HalResult};
pub use job::{JobId, JobStatus};
pub use provider::{
    DEFAULT_SHOTS, HardwareProvider, MAX_OPTIMIZATION_LEVEL, ProviderConfig, SubmitOptions,
};
pub use result::{Counts, ExecutionResult};
