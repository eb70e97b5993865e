use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stratboard_core::{DepartmentId, DomainError, DomainResult, KpiId, PillarId, UserId};

// ─────────────────────────────────────────────────────────────────────────────
// Status
// ─────────────────────────────────────────────────────────────────────────────

/// Reported KPI status.
///
/// The status is entered by KPI owners; nothing in this workspace derives it
/// from `progress_percentage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiStatus {
    Completed,
    OnTrack,
    AtRisk,
    Behind,
}

impl KpiStatus {
    pub const ALL: [KpiStatus; 4] = [
        KpiStatus::Completed,
        KpiStatus::OnTrack,
        KpiStatus::AtRisk,
        KpiStatus::Behind,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KpiStatus::Completed => "completed",
            KpiStatus::OnTrack => "on_track",
            KpiStatus::AtRisk => "at_risk",
            KpiStatus::Behind => "behind",
        }
    }

    /// Human-readable label used in exports.
    pub fn label(&self) -> &'static str {
        match self {
            KpiStatus::Completed => "Completed",
            KpiStatus::OnTrack => "On Track",
            KpiStatus::AtRisk => "At Risk",
            KpiStatus::Behind => "Behind",
        }
    }
}

impl core::fmt::Display for KpiStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KpiStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KpiStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown kpi status '{s}'")))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// KPI
// ─────────────────────────────────────────────────────────────────────────────

/// A tracked Key Performance Indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    pub id: KpiId,
    pub code: String,
    pub name: String,
    pub pillar_id: PillarId,
    pub department_id: Option<DepartmentId>,
    pub owner_id: Option<UserId>,
    pub status: KpiStatus,
    /// 1 is the highest priority.
    pub priority: u8,
    /// Always within `[0, 100]`.
    pub progress_percentage: f64,
    pub target_value: Option<f64>,
    pub current_value: Option<f64>,
    pub unit: Option<String>,
    pub is_active: bool,
    /// When the KPI reached `completed`; drives the monthly completion series.
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Kpi {
    /// Create an active, on-track KPI with zero progress and priority 1.
    pub fn new(code: impl Into<String>, name: impl Into<String>, pillar_id: PillarId) -> Self {
        Self {
            id: KpiId::new(),
            code: code.into(),
            name: name.into(),
            pillar_id,
            department_id: None,
            owner_id: None,
            status: KpiStatus::OnTrack,
            priority: 1,
            progress_percentage: 0.0,
            target_value: None,
            current_value: None,
            unit: None,
            is_active: true,
            completed_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_department(mut self, department_id: DepartmentId) -> Self {
        self.department_id = Some(department_id);
        self
    }

    pub fn with_owner(mut self, owner_id: UserId) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    pub fn with_status(mut self, status: KpiStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_progress(mut self, progress_percentage: f64) -> Self {
        self.progress_percentage = progress_percentage;
        self
    }

    pub fn with_target(mut self, target: f64, current: Option<f64>, unit: Option<&str>) -> Self {
        self.target_value = Some(target);
        self.current_value = current;
        self.unit = unit.map(str::to_string);
        self
    }

    pub fn completed_at(mut self, at: DateTime<Utc>) -> Self {
        self.status = KpiStatus::Completed;
        self.completed_at = Some(at);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn is_completed(&self) -> bool {
        self.status == KpiStatus::Completed
    }

    /// Check record-level invariants before the record enters a store.
    pub fn validate(&self) -> DomainResult<()> {
        if !(0.0..=100.0).contains(&self.progress_percentage) {
            return Err(DomainError::validation(format!(
                "kpi {} progress_percentage {} outside [0, 100]",
                self.code, self.progress_percentage
            )));
        }
        if self.priority == 0 {
            return Err(DomainError::validation(format!(
                "kpi {} priority must be >= 1",
                self.code
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_from_wire_names() {
        assert_eq!("at_risk".parse::<KpiStatus>().unwrap(), KpiStatus::AtRisk);
        assert!("done".parse::<KpiStatus>().is_err());
    }

    #[test]
    fn progress_outside_bounds_is_rejected() {
        let kpi = Kpi::new("K1", "Enrolment", PillarId::new()).with_progress(100.5);
        assert!(matches!(kpi.validate(), Err(DomainError::Validation(_))));

        let kpi = Kpi::new("K1", "Enrolment", PillarId::new()).with_progress(100.0);
        assert!(kpi.validate().is_ok());
    }

    #[test]
    fn priority_zero_is_rejected() {
        let kpi = Kpi::new("K2", "Retention", PillarId::new()).with_priority(0);
        assert!(kpi.validate().is_err());
    }

    #[test]
    fn completed_at_marks_status() {
        let kpi = Kpi::new("K3", "Research output", PillarId::new()).completed_at(Utc::now());
        assert!(kpi.is_completed());
        assert!(kpi.completed_at.is_some());
    }
}
