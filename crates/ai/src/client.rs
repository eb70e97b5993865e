use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::request::InferenceRequest;
use crate::result::AiError;

/// Transport to the prediction service.
///
/// Implementations return the raw JSON answer; validation happens in
/// [`crate::parse_prediction`].
#[async_trait]
pub trait InferenceClient: Send + Sync {
    async fn predict(&self, request: &InferenceRequest) -> Result<JsonValue, AiError>;
}

#[async_trait]
impl<T> InferenceClient for Arc<T>
where
    T: InferenceClient + ?Sized,
{
    async fn predict(&self, request: &InferenceRequest) -> Result<JsonValue, AiError> {
        (**self).predict(request).await
    }
}

/// JSON-over-HTTP client (`POST <endpoint>`).
#[derive(Debug, Clone)]
pub struct HttpInferenceClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpInferenceClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AiError::InvalidInput(format!("cannot build http client: {e}")))?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl InferenceClient for HttpInferenceClient {
    async fn predict(&self, request: &InferenceRequest) -> Result<JsonValue, AiError> {
        let res = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| AiError::ServiceUnavailable(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            return Err(AiError::ServiceUnavailable(format!(
                "service answered {status}"
            )));
        }

        res.json::<JsonValue>()
            .await
            .map_err(|e| AiError::MalformedPayload(e.to_string()))
    }
}
