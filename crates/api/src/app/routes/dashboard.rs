use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::Path,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use stratboard_auth::Principal;
use stratboard_core::{DepartmentId, PillarId};

use crate::app::{errors::ApiError, services::AppServices};

/// GET /dashboard - payload shaped by the caller's role
pub async fn dashboard(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
) -> Result<Response, ApiError> {
    let payload = services.dashboards().build(&principal, Utc::now()).await?;
    Ok(Json(payload).into_response())
}

/// GET /pillars/:id/progress
pub async fn pillar_progress(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id: PillarId = id.parse()?;
    let progress = services.dashboards().pillar_progress(id).await?;
    Ok(Json(progress).into_response())
}

/// GET /departments/:id/progress
pub async fn department_progress(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id: DepartmentId = id.parse()?;
    let progress = services.dashboards().department_progress(id).await?;
    Ok(Json(progress).into_response())
}
