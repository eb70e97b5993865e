//! Row filters shared by every store implementation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stratboard_core::{DepartmentId, KpiId, PillarId, UserId};
use stratboard_strategy::{Alert, Kpi, KpiStatus, Milestone, Prediction, ProgressReport, User};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiFilter {
    pub pillar_id: Option<PillarId>,
    pub department_id: Option<DepartmentId>,
    pub status: Option<KpiStatus>,
    pub priority: Option<u8>,
    /// Only `is_active` KPIs.
    pub active_only: bool,
}

impl KpiFilter {
    pub fn active() -> Self {
        Self {
            active_only: true,
            ..Self::default()
        }
    }

    pub fn matches(&self, kpi: &Kpi) -> bool {
        self.pillar_id.is_none_or(|id| kpi.pillar_id == id)
            && self.department_id.is_none_or(|id| kpi.department_id == Some(id))
            && self.status.is_none_or(|s| kpi.status == s)
            && self.priority.is_none_or(|p| kpi.priority == p)
            && (!self.active_only || kpi.is_active)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneFilter {
    /// Restrict to milestones under these KPIs (`Some(vec![])` matches nothing).
    pub kpi_ids: Option<Vec<KpiId>>,
    pub assigned_to: Option<UserId>,
    /// Exclude `completed` milestones.
    pub incomplete_only: bool,
    /// Inclusive lower bound on `due_date`.
    pub due_from: Option<NaiveDate>,
    /// Inclusive upper bound on `due_date`.
    pub due_to: Option<NaiveDate>,
}

impl MilestoneFilter {
    pub fn matches(&self, m: &Milestone) -> bool {
        self.kpi_ids.as_ref().is_none_or(|ids| ids.contains(&m.kpi_id))
            && self.assigned_to.is_none_or(|u| m.assigned_to == Some(u))
            && (!self.incomplete_only || !m.is_completed())
            && self.due_from.is_none_or(|d| m.due_date >= d)
            && self.due_to.is_none_or(|d| m.due_date <= d)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertFilter {
    pub unread_only: bool,
}

impl AlertFilter {
    pub fn unread() -> Self {
        Self { unread_only: true }
    }

    pub fn matches(&self, alert: &Alert) -> bool {
        !self.unread_only || !alert.is_read
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFilter {
    pub submitted_by: Option<UserId>,
    pub kpi_id: Option<KpiId>,
}

impl ReportFilter {
    pub fn matches(&self, r: &ProgressReport) -> bool {
        self.submitted_by.is_none_or(|u| r.submitted_by == u)
            && self.kpi_id.is_none_or(|k| r.kpi_id == k)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionFilter {
    pub kpi_id: Option<KpiId>,
}

impl PredictionFilter {
    pub fn matches(&self, p: &Prediction) -> bool {
        self.kpi_id.is_none_or(|k| p.kpi_id == k)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFilter {
    pub department_id: Option<DepartmentId>,
}

impl UserFilter {
    pub fn matches(&self, u: &User) -> bool {
        self.department_id.is_none_or(|d| u.department_id == Some(d))
    }
}
