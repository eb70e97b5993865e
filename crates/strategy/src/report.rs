use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stratboard_core::{KpiId, ReportId, UserId};

/// A progress update submitted by a user against a KPI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub id: ReportId,
    pub kpi_id: KpiId,
    pub submitted_by: UserId,
    pub progress_percentage: f64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ProgressReport {
    pub fn new(
        kpi_id: KpiId,
        submitted_by: UserId,
        progress_percentage: f64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ReportId::new(),
            kpi_id,
            submitted_by,
            progress_percentage,
            notes: None,
            created_at,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
