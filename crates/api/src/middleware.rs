use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use stratboard_auth::{AccessError, JwtValidator, Principal, Role, check_access};

use crate::app::errors::ApiError;
use crate::context::AuthContext;

#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<dyn JwtValidator>,
}

/// Roles a route group admits, handed to [`require_roles`] as layer state.
#[derive(Debug, Clone, Copy)]
pub struct RequiredRoles(pub &'static [Role]);

/// Resolve the principal from the bearer token, if any.
///
/// Never rejects: a missing or invalid token yields an anonymous context and
/// the route guards answer 401.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Response {
    let context = match extract_bearer(req.headers()) {
        Some(token) => match state.jwt.validate(token, Utc::now()) {
            Ok(claims) => AuthContext::authenticated(Principal::from_claims(&claims)),
            Err(e) => {
                tracing::debug!(error = %e, "rejected bearer token");
                AuthContext::anonymous()
            }
        },
        None => AuthContext::anonymous(),
    };

    if let Some(principal) = context.principal() {
        req.extensions_mut().insert(*principal);
    }
    req.extensions_mut().insert(context);

    next.run(req).await
}

/// Admit any authenticated principal.
pub async fn require_authenticated(req: Request, next: Next) -> Result<Response, ApiError> {
    if principal_of(&req).is_none() {
        return Err(AccessError::Unauthenticated.into());
    }
    Ok(next.run(req).await)
}

/// Admit principals according to the route's declared roles.
pub async fn require_roles(
    State(RequiredRoles(required)): State<RequiredRoles>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    check_access(principal_of(&req), required)?;
    Ok(next.run(req).await)
}

fn principal_of(req: &Request) -> Option<&Principal> {
    req.extensions()
        .get::<AuthContext>()
        .and_then(AuthContext::principal)
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let token = header.to_str().ok()?.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token) }
}
