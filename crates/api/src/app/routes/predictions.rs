use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;

use stratboard_core::{DomainError, EntityKind, KpiId};
use stratboard_infra::ReportFilter;
use stratboard_strategy::PredictionType;

use crate::app::{errors::ApiError, services::AppServices};

#[derive(Debug, Deserialize)]
pub struct RunPredictionRequest {
    #[serde(default = "default_prediction_type")]
    pub prediction_type: PredictionType,
}

fn default_prediction_type() -> PredictionType {
    PredictionType::ProgressForecast
}

/// POST /predictions/kpis/:id
///
/// Responds 201 with the stored prediction. An unreachable or misbehaving
/// inference service still yields 201; the prediction then has
/// `status = failed` and an `error_message`. Without a JSON body the
/// prediction type defaults to `progress_forecast`.
pub async fn run(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Option<Json<RunPredictionRequest>>,
) -> Result<Response, ApiError> {
    let id: KpiId = id.parse()?;
    let prediction_type = body.map_or_else(default_prediction_type, |Json(b)| b.prediction_type);
    let store = services.store();

    let kpi = store
        .kpi(id)
        .await?
        .ok_or_else(|| DomainError::not_found(EntityKind::Kpi, id))?;
    let history = store
        .progress_reports(&ReportFilter {
            kpi_id: Some(id),
            ..ReportFilter::default()
        })
        .await?;

    let prediction = services
        .predictions()
        .run(&kpi, &history, prediction_type, Utc::now())
        .await?;

    Ok((StatusCode::CREATED, Json(prediction)).into_response())
}
