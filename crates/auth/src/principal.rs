use serde::{Deserialize, Serialize};

use stratboard_core::{DepartmentId, UserId};

use crate::{JwtClaims, Role};

/// The authenticated user making a request.
///
/// Construction is decoupled from transport: the API derives it from verified
/// JWT claims, tests build it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: UserId,
    pub role: Role,
    pub department_id: Option<DepartmentId>,
}

impl Principal {
    pub fn new(id: UserId, role: Role) -> Self {
        Self {
            id,
            role,
            department_id: None,
        }
    }

    pub fn in_department(mut self, department_id: DepartmentId) -> Self {
        self.department_id = Some(department_id);
        self
    }

    pub fn from_claims(claims: &JwtClaims) -> Self {
        Self {
            id: claims.sub,
            role: claims.role,
            department_id: claims.department_id,
        }
    }
}
