//! qsim HTTP service binary entry point.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use qsim_adapter_ibm::{IbmProvider, config_from_env};
use qsim_server::{AppState, ServerConfig, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qsim_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = ServerConfig::default();
    if let Ok(bind) = std::env::var("QSIM_BIND") {
        config.bind_address = bind
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid QSIM_BIND address '{bind}': {e}"))?;
    }
    if let Ok(port) = std::env::var("PORT") {
        let port: u16 = port
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid PORT '{port}': {e}"))?;
        config.bind_address.set_port(port);
    }
    let bind_addr = config.bind_address;

    let mut state = AppState::with_config(config);
    match config_from_env() {
        Some(provider_config) => match IbmProvider::new(&provider_config) {
            Ok(provider) => {
                tracing::info!("registered IBM Quantum provider");
                state = state.with_provider(Arc::new(provider));
            }
            Err(e) => tracing::warn!(error = %e, "IBM Quantum provider unavailable"),
        },
        None => tracing::info!("no hardware credentials, serving local simulators only"),
    }

    let app = create_router(Arc::new(state));

    tracing::info!("Starting qsim server at http://{}", bind_addr);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
