//! View models returned by the aggregator.
//!
//! Top-level sections are camelCase (`pillarProgress`, `recentAlerts`);
//! counters inside `stats` and `riskSnapshot` keep snake_case keys.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use stratboard_core::{DepartmentId, KpiId, MilestoneId, PillarId, UserId};
use stratboard_strategy::{Alert, Kpi, MilestoneStatus, ProgressReport};

/// Payload of `GET /dashboard`, tagged by `view`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum DashboardPayload {
    Admin(AdminDashboard),
    StrategyTeam(StrategyDashboard),
    DepartmentUser(DepartmentDashboard),
    DataAnalyst(AnalystDashboard),
    Default(DefaultDashboard),
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared sections
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PillarProgress {
    pub id: PillarId,
    pub name: String,
    pub code: String,
    pub color: String,
    pub weight: f64,
    pub total_kpis: usize,
    pub completed_kpis: usize,
    pub progress: f64,
}

/// Name, progress and color only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PillarProgressLight {
    pub name: String,
    pub progress: f64,
    pub color: String,
}

impl From<&PillarProgress> for PillarProgressLight {
    fn from(p: &PillarProgress) -> Self {
        Self {
            name: p.name.clone(),
            progress: p.progress,
            color: p.color.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentProgress {
    pub id: DepartmentId,
    pub name: String,
    pub code: String,
    pub total_kpis: usize,
    pub completed_kpis: usize,
    pub progress: f64,
    pub user_count: usize,
}

/// One calendar month of the completion series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyPoint {
    /// e.g. `"Mar 2026"`.
    pub month: String,
    /// KPIs completed during the month.
    pub completed: usize,
    /// KPIs completed up to the end of the month.
    pub cumulative: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MilestoneSummary {
    pub id: MilestoneId,
    pub kpi_id: KpiId,
    pub kpi_name: Option<String>,
    pub title: String,
    pub due_date: NaiveDate,
    pub status: MilestoneStatus,
    pub assigned_to: Option<UserId>,
    pub is_overdue: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Admin
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminStats {
    pub total_kpis: usize,
    pub completed_kpis: usize,
    pub on_track_kpis: usize,
    pub at_risk_kpis: usize,
    pub behind_kpis: usize,
    pub overall_progress: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    pub stats: AdminStats,
    pub pillar_progress: Vec<PillarProgress>,
    pub recent_alerts: Vec<Alert>,
    pub upcoming_milestones: Vec<MilestoneSummary>,
    pub department_progress: Vec<DepartmentProgress>,
    pub monthly_progress: Vec<MonthlyPoint>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Strategy team
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyStats {
    pub total_kpis: usize,
    pub completed_kpis: usize,
    pub overall_progress: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskSnapshot {
    pub overdue_milestones: usize,
    pub at_risk_kpis: usize,
    pub behind_kpis: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyDashboard {
    pub stats: StrategyStats,
    pub priority_milestones: Vec<MilestoneSummary>,
    pub risk_snapshot: RiskSnapshot,
    pub pillar_progress: Vec<PillarProgressLight>,
    pub monthly_progress: Vec<MonthlyPoint>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Department user
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentSummary {
    pub id: DepartmentId,
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentUserStats {
    pub my_kpis: usize,
    pub open_milestones: usize,
    pub overdue_milestones: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentDashboard {
    /// `None` when the principal has no department.
    pub department: Option<DepartmentSummary>,
    pub department_kpis: Vec<Kpi>,
    pub my_milestones: Vec<MilestoneSummary>,
    pub recent_reports: Vec<ProgressReport>,
    pub stats: DepartmentUserStats,
}

// ─────────────────────────────────────────────────────────────────────────────
// Data analyst
// ─────────────────────────────────────────────────────────────────────────────

/// Analytics placeholders.
///
/// Trend, performance and data-quality analytics are not implemented yet;
/// every section is returned empty.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalystDashboard {
    pub trends: Vec<JsonValue>,
    pub performance: Map<String, JsonValue>,
    pub data_quality: Map<String, JsonValue>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Fallback
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicStats {
    pub total_kpis: usize,
    pub completed_kpis: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultDashboard {
    pub stats: BasicStats,
    pub recent_alerts: Vec<Alert>,
}
