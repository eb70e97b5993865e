//! `stratboard-ai`
//!
//! **Responsibility:** boundary to the external KPI prediction service.
//!
//! The inference model is an opaque HTTP collaborator. This crate:
//! - builds the request from a KPI and its progress history,
//! - validates the JSON answer,
//! - turns every service failure into a stored `failed` prediction.
//!
//! Nothing here is called by the dashboard aggregator.

pub mod client;
pub mod request;
pub mod result;
pub mod runner;

pub use client::{HttpInferenceClient, InferenceClient};
pub use request::{HistoryPoint, InferenceRequest};
pub use result::{AiError, ParsedPrediction, parse_prediction};
pub use runner::{PredictionRunner, PredictionSink, SinkError};
