use serde_json::Value as JsonValue;
use thiserror::Error;

/// Failures at the inference boundary.
///
/// None of these escape [`crate::PredictionRunner`]; they become the
/// `error_message` of a failed prediction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AiError {
    #[error("inference service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("malformed inference payload: {0}")]
    MalformedPayload(String),

    #[error("invalid inference input: {0}")]
    InvalidInput(String),
}

/// Validated view of an inference answer.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPrediction {
    /// Confidence in \[0, 1\].
    pub confidence: f64,
    /// The full answer object, stored as the prediction's result blob.
    pub result: JsonValue,
}

/// Validate the JSON body returned by the inference service.
///
/// Requirements:
/// - top level is an object
/// - `confidence` is a number in \[0, 1\]
/// - `risk_level` and `recommendation`, when present, are strings
/// - `predicted_progress`, when present, is a number
pub fn parse_prediction(body: JsonValue) -> Result<ParsedPrediction, AiError> {
    let obj = body
        .as_object()
        .ok_or_else(|| AiError::MalformedPayload("expected a JSON object".to_string()))?;

    let confidence = obj
        .get("confidence")
        .and_then(|v| v.as_f64())
        .ok_or_else(|| AiError::MalformedPayload("missing numeric 'confidence'".to_string()))?;

    if !(confidence.is_finite() && (0.0..=1.0).contains(&confidence)) {
        return Err(AiError::MalformedPayload(format!(
            "confidence {confidence} outside [0, 1]"
        )));
    }

    for key in ["risk_level", "recommendation"] {
        if let Some(v) = obj.get(key) {
            if !v.is_string() && !v.is_null() {
                return Err(AiError::MalformedPayload(format!("'{key}' must be a string")));
            }
        }
    }

    if let Some(v) = obj.get("predicted_progress") {
        if !v.is_number() && !v.is_null() {
            return Err(AiError::MalformedPayload(
                "'predicted_progress' must be a number".to_string(),
            ));
        }
    }

    Ok(ParsedPrediction {
        confidence,
        result: body,
    })
}
