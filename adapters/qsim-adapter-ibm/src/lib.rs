//! IBM Quantum provider for qsim.
//!
//! Implements [`qsim_hal::HardwareProvider`] against the IBM Quantum runtime
//! REST API. Circuits are sent as OpenQASM 3 to the Sampler primitive.
//!
//! # Example
//!
//! ```ignore
//! use qsim_adapter_ibm::{IbmProvider, config_from_env};
//! use qsim_hal::HardwareProvider;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! if let Some(config) = config_from_env() {
//!     let provider = IbmProvider::new(&config)?;
//!     for backend in provider.list_backends().await? {
//!         println!("{} ({} qubits)", backend.name, backend.num_qubits);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
mod error;
mod provider;

pub use api::{DEFAULT_ENDPOINT, IbmClient};
pub use error::{IbmError, IbmResult};
pub use provider::{ENDPOINT_ENV, INSTANCE_ENV, IbmProvider, TOKEN_ENV, config_from_env};
