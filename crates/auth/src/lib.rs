//! `stratboard-auth`: authentication claims, the role registry and the access guard.
//!
//! This crate is intentionally decoupled from HTTP and storage.

pub mod claims;
pub mod guard;
pub mod jwt;
pub mod permissions;
pub mod principal;
pub mod roles;

pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use guard::{AccessError, FORBIDDEN_MESSAGE, check_access};
pub use jwt::{Hs256JwtValidator, JwtError, JwtValidator};
pub use permissions::Permission;
pub use principal::Principal;
pub use roles::{Role, RoleDefinition, role_definition, role_registry};
