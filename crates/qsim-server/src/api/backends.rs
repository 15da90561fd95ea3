//! Backend listing endpoint.

use std::sync::Arc;

use axum::{Json, extract::State};
use qsim_adapter_sim::LOCAL_BACKENDS;
use qsim_hal::BackendInfo;

use crate::state::AppState;

/// GET /api/backends
///
/// Local simulators first, then whatever the hardware provider reports. A
/// provider outage leaves the local entries intact.
pub async fn list_backends(State(state): State<Arc<AppState>>) -> Json<Vec<BackendInfo>> {
    let width = u32::try_from(state.pipeline.config().max_qubits()).unwrap_or(u32::MAX);
    let mut backends: Vec<BackendInfo> = LOCAL_BACKENDS
        .iter()
        .map(|(name, description)| BackendInfo::simulator(*name, *description, width))
        .collect();

    if let Some(provider) = &state.provider {
        match provider.list_backends().await {
            Ok(remote) => backends.extend(remote),
            Err(e) => {
                tracing::warn!(provider = provider.name(), error = %e, "skipping provider backends");
            }
        }
    }

    Json(backends)
}
