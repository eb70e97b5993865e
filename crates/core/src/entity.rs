//! Record kinds, used in not-found errors and alert subjects.

use serde::{Deserialize, Serialize};

/// Closed set of record kinds known to the dashboard.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Kpi,
    Pillar,
    Department,
    Milestone,
    Alert,
    Prediction,
    ProgressReport,
    User,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Kpi => "kpi",
            EntityKind::Pillar => "pillar",
            EntityKind::Department => "department",
            EntityKind::Milestone => "milestone",
            EntityKind::Alert => "alert",
            EntityKind::Prediction => "prediction",
            EntityKind::ProgressReport => "progress_report",
            EntityKind::User => "user",
        }
    }
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
