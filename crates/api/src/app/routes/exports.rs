//! Export downloads: single sheets as CSV, the strategy report as JSON.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::Query,
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;

use stratboard_core::{DepartmentId, PillarId};
use stratboard_export::{KpiExportQuery, Sheet};
use stratboard_strategy::KpiStatus;

use crate::app::{errors::ApiError, services::AppServices};

/// Raw query string; ids are parsed here so malformed ones get a JSON 400.
#[derive(Debug, Default, Deserialize)]
pub struct KpiExportParams {
    pub pillar_id: Option<String>,
    pub department_id: Option<String>,
    pub status: Option<String>,
}

impl KpiExportParams {
    fn parse(&self) -> Result<KpiExportQuery, ApiError> {
        Ok(KpiExportQuery {
            pillar_id: self.pillar_id.as_deref().map(str::parse::<PillarId>).transpose()?,
            department_id: self
                .department_id
                .as_deref()
                .map(str::parse::<DepartmentId>)
                .transpose()?,
            status: self.status.as_deref().map(str::parse::<KpiStatus>).transpose()?,
        })
    }
}

fn csv_download(filename: &str, sheet: &Sheet) -> Result<Response, ApiError> {
    let body = sheet.to_csv()?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{filename}\"")),
        ],
        body,
    )
        .into_response())
}

/// GET /exports/kpis.csv?pillar_id&department_id&status
pub async fn kpis(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<KpiExportParams>,
) -> Result<Response, ApiError> {
    let sheet = services.exporter().kpis(params.parse()?).await?;
    csv_download("kpis.csv", &sheet)
}

/// GET /exports/milestones.csv
pub async fn milestones(Extension(services): Extension<Arc<AppServices>>) -> Result<Response, ApiError> {
    let sheet = services.exporter().milestones(Utc::now()).await?;
    csv_download("milestones.csv", &sheet)
}

/// GET /exports/alerts.csv
pub async fn alerts(Extension(services): Extension<Arc<AppServices>>) -> Result<Response, ApiError> {
    let sheet = services.exporter().alerts().await?;
    csv_download("alerts.csv", &sheet)
}

/// GET /exports/predictions.csv
pub async fn predictions(Extension(services): Extension<Arc<AppServices>>) -> Result<Response, ApiError> {
    let sheet = services.exporter().predictions().await?;
    csv_download("predictions.csv", &sheet)
}

/// GET /exports/reports.csv
pub async fn progress_reports(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Response, ApiError> {
    let sheet = services.exporter().progress_reports().await?;
    csv_download("progress_reports.csv", &sheet)
}

/// GET /exports/strategy-report - every sheet of the workbook
pub async fn strategy_report(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Response, ApiError> {
    let workbook = services.exporter().strategy_report(Utc::now()).await?;
    Ok(Json(workbook).into_response())
}
