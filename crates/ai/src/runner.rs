use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use stratboard_strategy::{Kpi, Prediction, PredictionType, ProgressReport};

use crate::client::InferenceClient;
use crate::request::InferenceRequest;
use crate::result::parse_prediction;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("failed to persist prediction: {0}")]
pub struct SinkError(pub String);

/// Destination for prediction records (usually the strategy store).
#[async_trait]
pub trait PredictionSink: Send + Sync {
    async fn record(&self, prediction: &Prediction) -> Result<(), SinkError>;
}

#[async_trait]
impl<T> PredictionSink for Arc<T>
where
    T: PredictionSink + ?Sized,
{
    async fn record(&self, prediction: &Prediction) -> Result<(), SinkError> {
        (**self).record(prediction).await
    }
}

/// Calls the inference service for one KPI and stores the outcome.
///
/// Service and payload failures never propagate: they are stored as a
/// prediction with `status = failed`. Only a failing sink is reported.
pub struct PredictionRunner<C, S> {
    client: C,
    sink: S,
}

impl<C, S> PredictionRunner<C, S>
where
    C: InferenceClient,
    S: PredictionSink,
{
    pub fn new(client: C, sink: S) -> Self {
        Self { client, sink }
    }

    pub async fn run(
        &self,
        kpi: &Kpi,
        history: &[ProgressReport],
        prediction_type: PredictionType,
        now: DateTime<Utc>,
    ) -> Result<Prediction, SinkError> {
        let request = InferenceRequest::from_kpi(kpi, history, prediction_type);

        let outcome = self.client.predict(&request).await.and_then(parse_prediction);

        let prediction = match outcome {
            Ok(parsed) => {
                tracing::info!(kpi = %kpi.code, confidence = parsed.confidence, "prediction completed");
                Prediction::completed(kpi.id, prediction_type, parsed.confidence, parsed.result, now)
            }
            Err(e) => {
                tracing::warn!(kpi = %kpi.code, error = %e, "prediction failed");
                Prediction::failed(kpi.id, prediction_type, e.to_string(), now)
            }
        };

        self.sink.record(&prediction).await?;
        Ok(prediction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value as JsonValue, json};
    use stratboard_core::PillarId;
    use stratboard_strategy::PredictionStatus;
    use tokio::sync::Mutex;

    use crate::result::AiError;

    struct FixedClient(Result<JsonValue, AiError>);

    #[async_trait]
    impl InferenceClient for FixedClient {
        async fn predict(&self, _request: &InferenceRequest) -> Result<JsonValue, AiError> {
            self.0.clone()
        }
    }

    #[derive(Default)]
    struct VecSink(Mutex<Vec<Prediction>>);

    #[async_trait]
    impl PredictionSink for VecSink {
        async fn record(&self, prediction: &Prediction) -> Result<(), SinkError> {
            self.0.lock().await.push(prediction.clone());
            Ok(())
        }
    }

    struct BrokenSink;

    #[async_trait]
    impl PredictionSink for BrokenSink {
        async fn record(&self, _prediction: &Prediction) -> Result<(), SinkError> {
            Err(SinkError("disk full".to_string()))
        }
    }

    fn kpi() -> Kpi {
        Kpi::new("K9", "Research income", PillarId::new()).with_progress(55.0)
    }

    #[tokio::test]
    async fn successful_answer_is_stored_as_completed() {
        let client = FixedClient(Ok(json!({"confidence": 0.9, "risk_level": "low"})));
        let sink = Arc::new(VecSink::default());
        let runner = PredictionRunner::new(client, sink.clone());

        let p = runner
            .run(&kpi(), &[], PredictionType::RiskAssessment, Utc::now())
            .await
            .unwrap();

        assert_eq!(p.status, PredictionStatus::Completed);
        assert_eq!(p.confidence_score, Some(0.9));
        assert_eq!(p.risk_level(), Some("low"));
        assert_eq!(sink.0.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn unavailable_service_is_stored_as_failed() {
        let client = FixedClient(Err(AiError::ServiceUnavailable("connection refused".into())));
        let sink = Arc::new(VecSink::default());
        let runner = PredictionRunner::new(client, sink.clone());

        let p = runner
            .run(&kpi(), &[], PredictionType::ProgressForecast, Utc::now())
            .await
            .unwrap();

        assert_eq!(p.status, PredictionStatus::Failed);
        assert!(p.error_message.unwrap().contains("connection refused"));
        assert_eq!(sink.0.lock().await[0].status, PredictionStatus::Failed);
    }

    #[tokio::test]
    async fn malformed_answer_is_stored_as_failed() {
        let client = FixedClient(Ok(json!({"risk_level": "high"})));
        let sink = Arc::new(VecSink::default());
        let runner = PredictionRunner::new(client, sink.clone());

        let p = runner
            .run(&kpi(), &[], PredictionType::RiskAssessment, Utc::now())
            .await
            .unwrap();

        assert_eq!(p.status, PredictionStatus::Failed);
        assert!(p.error_message.unwrap().starts_with("malformed inference payload"));
    }

    #[tokio::test]
    async fn sink_failure_is_reported() {
        let client = FixedClient(Ok(json!({"confidence": 0.5})));
        let runner = PredictionRunner::new(client, BrokenSink);

        let err = runner
            .run(&kpi(), &[], PredictionType::RiskAssessment, Utc::now())
            .await
            .unwrap_err();
        assert_eq!(err, SinkError("disk full".to_string()));
    }
}
