//! JSON error responses.
//!
//! Every failure leaves the API as `{"error": <code>, "message": <text>}`.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use stratboard_ai::SinkError;
use stratboard_auth::AccessError;
use stratboard_core::DomainError;
use stratboard_dashboard::DashboardError;
use stratboard_export::ExportError;
use stratboard_infra::StoreError;

/// Where unauthenticated callers are sent.
pub const LOGIN_PATH: &str = "/login";

#[derive(Debug)]
pub enum ApiError {
    Access(AccessError),
    Domain(DomainError),
    Store(StoreError),
    Internal(String),
}

impl From<AccessError> for ApiError {
    fn from(e: AccessError) -> Self {
        Self::Access(e)
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self::Domain(e)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Domain(e) => Self::Domain(e),
            other => Self::Store(other),
        }
    }
}

impl From<DashboardError> for ApiError {
    fn from(e: DashboardError) -> Self {
        match e {
            DashboardError::Store(e) => e.into(),
            DashboardError::Domain(e) => Self::Domain(e),
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(e: ExportError) -> Self {
        match e {
            ExportError::Domain(e) => Self::Domain(e),
            ExportError::Store(e) => e.into(),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<SinkError> for ApiError {
    fn from(e: SinkError) -> Self {
        Self::Internal(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Access(AccessError::Unauthenticated) => unauthenticated(),
            ApiError::Access(e @ AccessError::Forbidden) => {
                json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string())
            }
            ApiError::Domain(e @ DomainError::NotFound { .. }) => {
                json_error(StatusCode::NOT_FOUND, "not_found", e.to_string())
            }
            ApiError::Domain(e @ DomainError::InvalidId(_)) => {
                json_error(StatusCode::BAD_REQUEST, "invalid_id", e.to_string())
            }
            ApiError::Domain(e @ DomainError::Validation(_)) => {
                json_error(StatusCode::UNPROCESSABLE_ENTITY, "validation_error", e.to_string())
            }
            ApiError::Store(e) => {
                tracing::error!(error = %e, "store failure");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", e.to_string())
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal failure");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg)
            }
        }
    }
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// 401 with a login redirect hint for the presentation layer.
fn unauthenticated() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::LOCATION, LOGIN_PATH)],
        axum::Json(json!({
            "error": "unauthenticated",
            "message": AccessError::Unauthenticated.to_string(),
            "login": LOGIN_PATH,
        })),
    )
        .into_response()
}
