use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use stratboard_core::{KpiId, PredictionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionType {
    ProgressForecast,
    RiskAssessment,
}

impl PredictionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionType::ProgressForecast => "progress_forecast",
            PredictionType::RiskAssessment => "risk_assessment",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PredictionType::ProgressForecast => "Progress Forecast",
            PredictionType::RiskAssessment => "Risk Assessment",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionStatus {
    Pending,
    Completed,
    Failed,
}

impl PredictionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionStatus::Pending => "pending",
            PredictionStatus::Completed => "completed",
            PredictionStatus::Failed => "failed",
        }
    }
}

/// Stored result of an external inference call.
///
/// `result` is the service's JSON body, kept opaque until export time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub id: PredictionId,
    pub kpi_id: KpiId,
    pub prediction_type: PredictionType,
    pub confidence_score: Option<f64>,
    pub status: PredictionStatus,
    pub result: JsonValue,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Prediction {
    pub fn completed(
        kpi_id: KpiId,
        prediction_type: PredictionType,
        confidence_score: f64,
        result: JsonValue,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: PredictionId::new(),
            kpi_id,
            prediction_type,
            confidence_score: Some(confidence_score),
            status: PredictionStatus::Completed,
            result,
            error_message: None,
            created_at,
        }
    }

    pub fn failed(
        kpi_id: KpiId,
        prediction_type: PredictionType,
        error_message: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: PredictionId::new(),
            kpi_id,
            prediction_type,
            confidence_score: None,
            status: PredictionStatus::Failed,
            result: JsonValue::Null,
            error_message: Some(error_message.into()),
            created_at,
        }
    }

    pub fn risk_level(&self) -> Option<&str> {
        self.result.get("risk_level").and_then(|v| v.as_str())
    }

    pub fn predicted_progress(&self) -> Option<f64> {
        self.result.get("predicted_progress").and_then(|v| v.as_f64())
    }

    pub fn recommendation(&self) -> Option<&str> {
        self.result.get("recommendation").and_then(|v| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn result_fields_are_read_lazily() {
        let p = Prediction::completed(
            KpiId::new(),
            PredictionType::RiskAssessment,
            0.82,
            json!({"risk_level": "high", "predicted_progress": 41.5, "recommendation": "Add staff"}),
            Utc::now(),
        );
        assert_eq!(p.risk_level(), Some("high"));
        assert_eq!(p.predicted_progress(), Some(41.5));
        assert_eq!(p.recommendation(), Some("Add staff"));
    }

    #[test]
    fn failed_prediction_has_no_result_fields() {
        let p = Prediction::failed(
            KpiId::new(),
            PredictionType::ProgressForecast,
            "inference service unavailable",
            Utc::now(),
        );
        assert_eq!(p.status, PredictionStatus::Failed);
        assert_eq!(p.risk_level(), None);
        assert_eq!(p.confidence_score, None);
    }
}
