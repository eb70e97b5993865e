//! Role-keyed dashboard assembly.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use tracing::debug;

use stratboard_auth::{Principal, Role};
use stratboard_core::{DepartmentId, DomainError, EntityKind, PillarId};
use stratboard_infra::{
    AlertFilter, KpiFilter, MilestoneFilter, ReportFilter, StoreError, StrategyStore, UserFilter,
};

use crate::payload::{
    AdminDashboard, AdminStats, AnalystDashboard, BasicStats, DashboardPayload, DefaultDashboard,
    DepartmentDashboard, DepartmentProgress, DepartmentSummary, DepartmentUserStats,
    PillarProgress, PillarProgressLight, RiskSnapshot, StrategyDashboard, StrategyStats,
};
use crate::progress::{self, StatusCounts, MONTHLY_WINDOW};
use crate::select;

const ADMIN_ALERT_LIMIT: usize = 10;
const ADMIN_MILESTONE_LIMIT: usize = 10;
const ADMIN_MILESTONE_HORIZON_DAYS: i64 = 14;
const PRIORITY_MILESTONE_HORIZON_DAYS: i64 = 30;
const RECENT_REPORT_LIMIT: usize = 10;
const DEFAULT_ALERT_LIMIT: usize = 5;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// The five dashboard layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardView {
    Admin,
    StrategyTeam,
    DepartmentUser,
    DataAnalyst,
    Default,
}

impl DashboardView {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => Self::Admin,
            Role::StrategyTeam => Self::StrategyTeam,
            Role::DepartmentUser => Self::DepartmentUser,
            Role::DataAnalyst => Self::DataAnalyst,
            Role::Hod | Role::Staff => Self::Default,
        }
    }
}

/// Reads the store and shapes a payload for one principal.
///
/// Queries run one after another; nothing is cached between calls.
pub struct DashboardAggregator<S> {
    store: S,
}

impl<S> DashboardAggregator<S>
where
    S: StrategyStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn build(
        &self,
        principal: &Principal,
        now: DateTime<Utc>,
    ) -> Result<DashboardPayload, DashboardError> {
        let view = DashboardView::for_role(principal.role);
        debug!(user_id = %principal.id, role = principal.role.as_str(), ?view, "building dashboard");

        Ok(match view {
            DashboardView::Admin => DashboardPayload::Admin(self.admin(now).await?),
            DashboardView::StrategyTeam => DashboardPayload::StrategyTeam(self.strategy(now).await?),
            DashboardView::DepartmentUser => {
                DashboardPayload::DepartmentUser(self.department_user(principal, now).await?)
            }
            DashboardView::DataAnalyst => DashboardPayload::DataAnalyst(AnalystDashboard::default()),
            DashboardView::Default => DashboardPayload::Default(self.fallback().await?),
        })
    }

    pub async fn pillar_progress(&self, id: PillarId) -> Result<PillarProgress, DashboardError> {
        let pillar = self
            .store
            .pillar(id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Pillar, id))?;
        let kpis = self
            .store
            .kpis(&KpiFilter {
                pillar_id: Some(id),
                ..KpiFilter::active()
            })
            .await?;
        Ok(progress::pillar_progress(&pillar, &kpis))
    }

    pub async fn department_progress(
        &self,
        id: DepartmentId,
    ) -> Result<DepartmentProgress, DashboardError> {
        let department = self
            .store
            .department(id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Department, id))?;
        let kpis = self
            .store
            .kpis(&KpiFilter {
                department_id: Some(id),
                ..KpiFilter::active()
            })
            .await?;
        let users = self
            .store
            .users(&UserFilter {
                department_id: Some(id),
            })
            .await?;
        Ok(progress::department_progress(&department, &kpis, &users))
    }

    async fn admin(&self, now: DateTime<Utc>) -> Result<AdminDashboard, DashboardError> {
        let today = now.date_naive();
        let kpis = self.store.kpis(&KpiFilter::active()).await?;
        let counts = StatusCounts::of(&kpis);

        let pillars = self.store.pillars().await?;
        let departments = self.store.departments().await?;
        let users = self.store.users(&UserFilter::default()).await?;
        let alerts = self.store.alerts(&AlertFilter::unread()).await?;
        let upcoming = self
            .store
            .milestones(&MilestoneFilter {
                incomplete_only: true,
                due_from: Some(today),
                due_to: Some(today + Duration::days(ADMIN_MILESTONE_HORIZON_DAYS)),
                ..MilestoneFilter::default()
            })
            .await?;
        let upcoming = select::soonest_first(upcoming, Some(ADMIN_MILESTONE_LIMIT));

        Ok(AdminDashboard {
            stats: AdminStats {
                total_kpis: counts.total,
                completed_kpis: counts.completed,
                on_track_kpis: counts.on_track,
                at_risk_kpis: counts.at_risk,
                behind_kpis: counts.behind,
                overall_progress: counts.progress(),
            },
            pillar_progress: progress::pillars_progress(&pillars, &kpis),
            recent_alerts: select::recent_alerts(alerts, ADMIN_ALERT_LIMIT),
            upcoming_milestones: select::summarize_milestones(upcoming, &kpis, now),
            department_progress: progress::departments_progress(&departments, &kpis, &users),
            monthly_progress: progress::monthly_series(&kpis, now, MONTHLY_WINDOW),
        })
    }

    async fn strategy(&self, now: DateTime<Utc>) -> Result<StrategyDashboard, DashboardError> {
        let today = now.date_naive();
        let kpis = self.store.kpis(&KpiFilter::active()).await?;
        let counts = StatusCounts::of(&kpis);

        let priority_ids = self
            .store
            .kpis(&KpiFilter {
                priority: Some(1),
                ..KpiFilter::active()
            })
            .await?
            .iter()
            .map(|k| k.id)
            .collect();
        let priority = self
            .store
            .milestones(&MilestoneFilter {
                kpi_ids: Some(priority_ids),
                due_from: Some(today),
                due_to: Some(today + Duration::days(PRIORITY_MILESTONE_HORIZON_DAYS)),
                ..MilestoneFilter::default()
            })
            .await?;
        let priority = select::soonest_first(priority, None);

        let overdue_milestones = self
            .store
            .milestones(&MilestoneFilter {
                incomplete_only: true,
                ..MilestoneFilter::default()
            })
            .await?
            .iter()
            .filter(|m| m.is_overdue(now))
            .count();

        let pillars = self.store.pillars().await?;
        let pillar_progress = progress::pillars_progress(&pillars, &kpis)
            .iter()
            .map(PillarProgressLight::from)
            .collect();

        Ok(StrategyDashboard {
            stats: StrategyStats {
                total_kpis: counts.total,
                completed_kpis: counts.completed,
                overall_progress: counts.progress(),
            },
            priority_milestones: select::summarize_milestones(priority, &kpis, now),
            risk_snapshot: RiskSnapshot {
                overdue_milestones,
                at_risk_kpis: counts.at_risk,
                behind_kpis: counts.behind,
            },
            pillar_progress,
            monthly_progress: progress::monthly_series(&kpis, now, MONTHLY_WINDOW),
        })
    }

    async fn department_user(
        &self,
        principal: &Principal,
        now: DateTime<Utc>,
    ) -> Result<DepartmentDashboard, DashboardError> {
        let (department, department_kpis) = match principal.department_id {
            Some(id) => {
                let department = self.store.department(id).await?.map(|d| DepartmentSummary {
                    id: d.id,
                    name: d.name,
                    code: d.code,
                });
                let kpis = self
                    .store
                    .kpis(&KpiFilter {
                        department_id: Some(id),
                        ..KpiFilter::active()
                    })
                    .await?;
                (department, kpis)
            }
            None => (None, Vec::new()),
        };

        let mine = self
            .store
            .milestones(&MilestoneFilter {
                assigned_to: Some(principal.id),
                incomplete_only: true,
                ..MilestoneFilter::default()
            })
            .await?;
        let mine = select::soonest_first(mine, None);
        let overdue_milestones = mine.iter().filter(|m| m.is_overdue(now)).count();

        let reports = self
            .store
            .progress_reports(&ReportFilter {
                submitted_by: Some(principal.id),
                ..ReportFilter::default()
            })
            .await?;

        // Milestones may sit under KPIs of other departments; resolve names
        // against every KPI.
        let all_kpis = self.store.kpis(&KpiFilter::default()).await?;

        Ok(DepartmentDashboard {
            stats: DepartmentUserStats {
                my_kpis: department_kpis.len(),
                open_milestones: mine.len(),
                overdue_milestones,
            },
            department,
            my_milestones: select::summarize_milestones(mine, &all_kpis, now),
            recent_reports: select::recent_reports(reports, RECENT_REPORT_LIMIT),
            department_kpis,
        })
    }

    async fn fallback(&self) -> Result<DefaultDashboard, DashboardError> {
        let counts = StatusCounts::of(&self.store.kpis(&KpiFilter::active()).await?);
        let alerts = self.store.alerts(&AlertFilter::unread()).await?;

        Ok(DefaultDashboard {
            stats: BasicStats {
                total_kpis: counts.total,
                completed_kpis: counts.completed,
            },
            recent_alerts: select::recent_alerts(alerts, DEFAULT_ALERT_LIMIT),
        })
    }
}
