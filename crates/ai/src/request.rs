use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stratboard_core::KpiId;
use stratboard_strategy::{Kpi, KpiStatus, PredictionType, ProgressReport};

/// One observed progress value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub at: DateTime<Utc>,
    pub progress: f64,
}

/// Body POSTed to the inference service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceRequest {
    pub kpi_id: KpiId,
    pub kpi_code: String,
    pub kpi_name: String,
    pub prediction_type: PredictionType,
    pub status: KpiStatus,
    pub priority: u8,
    pub current_progress: f64,
    pub target_value: Option<f64>,
    pub current_value: Option<f64>,
    /// Oldest first.
    pub history: Vec<HistoryPoint>,
}

impl InferenceRequest {
    /// Build a request from a KPI and the reports submitted against it.
    ///
    /// Reports for other KPIs are ignored; history is sorted oldest first.
    pub fn from_kpi(kpi: &Kpi, reports: &[ProgressReport], prediction_type: PredictionType) -> Self {
        let mut history: Vec<HistoryPoint> = reports
            .iter()
            .filter(|r| r.kpi_id == kpi.id)
            .map(|r| HistoryPoint {
                at: r.created_at,
                progress: r.progress_percentage,
            })
            .collect();
        history.sort_by_key(|p| p.at);

        Self {
            kpi_id: kpi.id,
            kpi_code: kpi.code.clone(),
            kpi_name: kpi.name.clone(),
            prediction_type,
            status: kpi.status,
            priority: kpi.priority,
            current_progress: kpi.progress_percentage,
            target_value: kpi.target_value,
            current_value: kpi.current_value,
            history,
        }
    }
}
