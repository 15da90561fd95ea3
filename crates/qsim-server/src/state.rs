//! Application state for the HTTP service.

use std::net::SocketAddr;
use std::sync::Arc;

use qsim_adapter_sim::{SimulationPipeline, SimulatorConfig};
use qsim_hal::HardwareProvider;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the server to.
    pub bind_address: SocketAddr,
    /// Engine ceilings and sampling seed.
    pub simulator: SimulatorConfig,
    /// Shots used when a request doesn't specify any.
    pub default_shots: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: ([127, 0, 0, 1], 5000).into(),
            simulator: SimulatorConfig::default(),
            default_shots: 1024,
        }
    }
}

/// Shared application state.
pub struct AppState {
    /// Server configuration.
    pub config: ServerConfig,
    /// Local simulation engine.
    pub pipeline: SimulationPipeline,
    /// Remote hardware, when credentials were supplied at startup.
    pub provider: Option<Arc<dyn HardwareProvider>>,
}

impl AppState {
    /// Create application state with custom configuration.
    pub fn with_config(config: ServerConfig) -> Self {
        Self {
            pipeline: SimulationPipeline::new(config.simulator.clone()),
            config,
            provider: None,
        }
    }

    /// Attach a hardware provider.
    pub fn with_provider(mut self, provider: Arc<dyn HardwareProvider>) -> Self {
        self.provider = Some(provider);
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_config(ServerConfig::default())
    }
}
