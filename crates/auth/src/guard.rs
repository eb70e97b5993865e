//! Access guard: per-route role admission.
//!
//! Decision table, evaluated once per request:
//! 1. no principal -> `Unauthenticated`
//! 2. `admin` and the route declares no roles or lists `admin` -> admitted
//! 3. role is in the declared set -> admitted
//! 4. otherwise -> `Forbidden`
//!
//! An `admin` is not admitted to a route whose non-empty list omits `admin`.

use std::collections::HashSet;

use thiserror::Error;

use crate::{Principal, Role};

/// Fixed message carried by every `Forbidden` rejection.
pub const FORBIDDEN_MESSAGE: &str = "You do not have permission to access this resource.";

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    /// No authenticated principal; callers should send the user to login.
    #[error("authentication required")]
    Unauthenticated,

    #[error("{}", FORBIDDEN_MESSAGE)]
    Forbidden,
}

/// Decide whether `principal` may enter a route requiring `required` roles.
///
/// - No IO
/// - No panics
/// - `required` is treated as a set (order and duplicates are irrelevant)
pub fn check_access(principal: Option<&Principal>, required: &[Role]) -> Result<(), AccessError> {
    let Some(principal) = principal else {
        return Err(AccessError::Unauthenticated);
    };

    let required: HashSet<Role> = required.iter().copied().collect();

    if principal.role == Role::Admin && (required.is_empty() || required.contains(&Role::Admin)) {
        return Ok(());
    }

    if required.contains(&principal.role) {
        Ok(())
    } else {
        tracing::debug!(
            principal_id = %principal.id,
            role = %principal.role,
            required = ?required,
            "access denied"
        );
        Err(AccessError::Forbidden)
    }
}
