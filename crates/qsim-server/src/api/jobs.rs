//! Hardware job polling.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use qsim_hal::{JobId, JobStatus};

use crate::dto::JobResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/jobs/{id}
pub async fn get_job(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<JobResponse>, ApiError> {
    let provider = state
        .provider
        .as_ref()
        .ok_or_else(|| ApiError::BadRequest("Hardware provider not available".into()))?;

    let job_id = JobId::new(id);
    let status = provider.status(&job_id).await?;
    if status == JobStatus::Completed {
        let result = provider.result(&job_id).await?;
        return Ok(Json(JobResponse::completed(&job_id, result.counts)));
    }
    Ok(Json(JobResponse::pending(&job_id, &status)))
}
