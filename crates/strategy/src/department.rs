use serde::{Deserialize, Serialize};

use stratboard_core::{DepartmentId, UserId};

/// Organizational unit owning KPIs and users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    pub code: String,
    pub head_id: Option<UserId>,
}

impl Department {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: DepartmentId::new(),
            name: name.into(),
            code: code.into(),
            head_id: None,
        }
    }

    pub fn with_head(mut self, head_id: UserId) -> Self {
        self.head_id = Some(head_id);
        self
    }
}
