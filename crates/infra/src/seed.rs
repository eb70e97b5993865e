//! Demo data for the in-memory store (dev mode only).

use chrono::{DateTime, Duration, Utc};

use stratboard_auth::Role;
use stratboard_core::DomainResult;
use stratboard_strategy::{
    Alert, AlertSeverity, AlertSubject, Department, Kpi, KpiStatus, Milestone, MilestoneStatus,
    Pillar, ProgressReport, User,
};

use crate::store::InMemoryStrategyStore;

/// Populate `store` with a small strategic plan anchored at `now`.
pub fn seed_demo_plan(store: &InMemoryStrategyStore, now: DateTime<Utc>) -> DomainResult<()> {
    let teaching = Pillar::new("Teaching Excellence", "P1", 1).with_color("#2563eb").with_weight(0.4);
    let research = Pillar::new("Research & Innovation", "P2", 2).with_color("#16a34a").with_weight(0.35);
    let community = Pillar::new("Community Engagement", "P3", 3).with_color("#ea580c").with_weight(0.25);

    let academics = Department::new("Academic Affairs", "ACA");
    let finance = Department::new("Finance", "FIN");

    let admin = User::new("Amina Admin", "admin@example.org", Role::Admin);
    let planner = User::new("Sam Strategy", "strategy@example.org", Role::StrategyTeam);
    let analyst = User::new("Dana Data", "analyst@example.org", Role::DataAnalyst);
    let lecturer = User::new("Lee Lecturer", "lee@example.org", Role::DepartmentUser).in_department(academics.id);
    let accountant = User::new("Ari Accounts", "ari@example.org", Role::DepartmentUser).in_department(finance.id);
    let hod = User::new("Harper Head", "hod@example.org", Role::Hod).in_department(academics.id);

    let kpis = vec![
        Kpi::new("T-01", "Graduate employability rate", teaching.id)
            .with_department(academics.id)
            .with_owner(lecturer.id)
            .with_target(85.0, Some(85.0), Some("%"))
            .with_progress(100.0)
            .completed_at(now - Duration::days(70)),
        Kpi::new("T-02", "Student satisfaction score", teaching.id)
            .with_department(academics.id)
            .with_owner(lecturer.id)
            .with_status(KpiStatus::AtRisk)
            .with_progress(45.0)
            .with_target(4.5, Some(3.9), Some("pts")),
        Kpi::new("R-01", "Externally funded projects", research.id)
            .with_department(academics.id)
            .with_priority(2)
            .with_progress(60.0),
        Kpi::new("R-02", "Peer-reviewed publications", research.id)
            .with_status(KpiStatus::Behind)
            .with_progress(20.0),
        Kpi::new("C-01", "Community partnership agreements", community.id)
            .with_department(finance.id)
            .with_owner(accountant.id)
            .with_progress(100.0)
            .completed_at(now - Duration::days(20)),
    ];

    let today = now.date_naive();
    let milestones = vec![
        Milestone::new(kpis[1].id, "Run satisfaction survey", today + Duration::days(5))
            .assigned_to(lecturer.id)
            .with_status(MilestoneStatus::InProgress),
        Milestone::new(kpis[1].id, "Publish survey findings", today - Duration::days(3))
            .assigned_to(lecturer.id),
        Milestone::new(kpis[2].id, "Submit grant proposals", today + Duration::days(12)),
        Milestone::new(kpis[4].id, "Sign MoU with city council", today - Duration::days(25))
            .assigned_to(accountant.id)
            .with_status(MilestoneStatus::Completed),
    ];

    let alerts = vec![
        Alert::new(
            "Satisfaction KPI at risk",
            AlertSeverity::Warning,
            AlertSubject::Kpi(kpis[1].id),
            now - Duration::hours(6),
        )
        .with_message("Score dropped below 4.0"),
        Alert::new(
            "Milestone overdue",
            AlertSeverity::Critical,
            AlertSubject::Milestone(milestones[1].id),
            now - Duration::hours(1),
        ),
        Alert::new(
            "Research pillar review",
            AlertSeverity::Info,
            AlertSubject::Pillar(research.id),
            now - Duration::days(2),
        )
        .acknowledged(admin.id, now - Duration::days(1)),
    ];

    let reports = vec![
        ProgressReport::new(kpis[1].id, lecturer.id, 40.0, now - Duration::days(30)),
        ProgressReport::new(kpis[1].id, lecturer.id, 45.0, now - Duration::days(2))
            .with_notes("Survey launched in two faculties"),
    ];

    for pillar in [teaching, research, community] {
        store.insert_pillar(pillar);
    }
    for department in [academics, finance] {
        store.insert_department(department);
    }
    for user in [admin, planner, analyst, lecturer, accountant, hod] {
        store.insert_user(user);
    }
    for kpi in kpis {
        store.insert_kpi(kpi)?;
    }
    for milestone in milestones {
        store.insert_milestone(milestone);
    }
    for alert in alerts {
        store.insert_alert(alert);
    }
    for report in reports {
        store.insert_report(report);
    }

    tracing::info!("seeded demo strategic plan");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{AlertFilter, KpiFilter, StrategyStore, UserFilter};

    #[tokio::test]
    async fn demo_plan_is_consistent() {
        let store = InMemoryStrategyStore::new();
        seed_demo_plan(&store, Utc::now()).unwrap();

        assert_eq!(store.pillars().await.unwrap().len(), 3);
        assert_eq!(store.kpis(&KpiFilter::active()).await.unwrap().len(), 5);
        assert_eq!(store.alerts(&AlertFilter::unread()).await.unwrap().len(), 2);
        assert_eq!(store.users(&UserFilter::default()).await.unwrap().len(), 6);
    }
}
