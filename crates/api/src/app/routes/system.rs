use axum::{Extension, Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

use stratboard_auth::{Principal, role_registry};

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(Extension(principal): Extension<Principal>) -> impl IntoResponse {
    let definition = principal.role.definition();
    Json(json!({
        "user_id": principal.id.to_string(),
        "role": principal.role.as_str(),
        "role_name": definition.display_name,
        "department_id": principal.department_id.map(|d| d.to_string()),
        "permissions": definition.permissions,
    }))
}

/// Role Registry listing.
pub async fn roles() -> impl IntoResponse {
    Json(json!({ "roles": role_registry() }))
}
