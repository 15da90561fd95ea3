//! Circuit execution and code generation endpoints.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use qsim_adapter_sim::is_local_backend;
use qsim_hal::{MAX_OPTIMIZATION_LEVEL, SubmitOptions};
use qsim_ir::{Circuit, codegen};

use crate::dto::{
    CodeRequest, CodeResponse, RunOptions, RunRequest, SimulationResponse, SubmittedResponse,
};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/circuits/run
///
/// Local backends run the simulation pipeline on a blocking thread; any other
/// backend is submitted to the hardware provider if it knows the name.
pub async fn run(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RunRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    let circuit = Circuit::from_input(&request.circuit)?;
    let options = &request.options;
    let shots = resolve_shots(options, &state)?;
    let optimization_level = resolve_optimization_level(options)?;

    if is_local_backend(&options.backend) {
        tracing::debug!(
            backend = %options.backend,
            num_qubits = circuit.num_qubits(),
            shots,
            "running local simulation"
        );
        let worker = Arc::clone(&state);
        let report =
            tokio::task::spawn_blocking(move || worker.pipeline.run(&circuit, shots)).await??;
        return Ok(Json(SimulationResponse::from(report)).into_response());
    }

    let not_available =
        || ApiError::BadRequest(format!("Backend {} not available", options.backend));
    let provider = state.provider.as_ref().ok_or_else(not_available)?;
    if !provider.has_backend(&options.backend).await? {
        return Err(not_available());
    }

    let submit = SubmitOptions::default()
        .with_shots(u32::try_from(shots).map_err(|_| {
            ApiError::BadRequest(format!("shots {shots} too large for hardware"))
        })?)
        .with_optimization_level(optimization_level);
    let job_id = provider.submit(&options.backend, &circuit, &submit).await?;
    tracing::info!(job_id = %job_id, backend = %options.backend, "submitted hardware job");

    Ok(Json(SubmittedResponse::new(job_id, options.backend.clone())).into_response())
}

/// POST /api/circuits/code
pub async fn code(
    payload: Result<Json<CodeRequest>, JsonRejection>,
) -> Result<Json<CodeResponse>, ApiError> {
    let Json(request) = payload?;
    let circuit = Circuit::from_input(&request.circuit)?;
    Ok(Json(CodeResponse {
        code: codegen::qiskit_script(&circuit),
    }))
}

fn resolve_shots(options: &RunOptions, state: &AppState) -> Result<u64, ApiError> {
    let max = state.pipeline.config().max_shots;
    let Some(shots) = options.shots else {
        return Ok(state.config.default_shots);
    };
    match u64::try_from(shots) {
        Ok(s) if (1..=max).contains(&s) => Ok(s),
        _ => Err(ApiError::BadRequest(format!(
            "shots must be between 1 and {max}, got {shots}"
        ))),
    }
}

fn resolve_optimization_level(options: &RunOptions) -> Result<u8, ApiError> {
    match u8::try_from(options.optimization_level) {
        Ok(level) if level <= MAX_OPTIMIZATION_LEVEL => Ok(level),
        _ => Err(ApiError::BadRequest(format!(
            "optimization_level must be between 0 and {MAX_OPTIMIZATION_LEVEL}, got {}",
            options.optimization_level
        ))),
    }
}
