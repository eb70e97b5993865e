use std::sync::RwLock;

use async_trait::async_trait;

use stratboard_ai::{PredictionSink, SinkError};
use stratboard_core::{DepartmentId, DomainResult, KpiId, PillarId};
use stratboard_strategy::{
    Alert, Department, Kpi, Milestone, Pillar, Prediction, ProgressReport, User,
};

use super::{
    AlertFilter, KpiFilter, MilestoneFilter, PredictionFilter, ReportFilter, StoreResult,
    StrategyStore, UserFilter,
};

#[derive(Debug, Default)]
struct Tables {
    kpis: Vec<Kpi>,
    pillars: Vec<Pillar>,
    departments: Vec<Department>,
    milestones: Vec<Milestone>,
    alerts: Vec<Alert>,
    reports: Vec<ProgressReport>,
    predictions: Vec<Prediction>,
    users: Vec<User>,
}

/// In-memory strategy store for tests/dev.
///
/// Rows keep insertion order, which is the "store order" callers rely on for
/// tie-breaking.
#[derive(Debug, Default)]
pub struct InMemoryStrategyStore {
    inner: RwLock<Tables>,
}

impl InMemoryStrategyStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> T {
        match self.inner.read() {
            Ok(tables) => f(&tables),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    fn write(&self, f: impl FnOnce(&mut Tables)) {
        match self.inner.write() {
            Ok(mut tables) => f(&mut tables),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }

    pub fn insert_kpi(&self, kpi: Kpi) -> DomainResult<()> {
        kpi.validate()?;
        self.write(|t| t.kpis.push(kpi));
        Ok(())
    }

    pub fn insert_pillar(&self, pillar: Pillar) {
        self.write(|t| t.pillars.push(pillar));
    }

    pub fn insert_department(&self, department: Department) {
        self.write(|t| t.departments.push(department));
    }

    pub fn insert_milestone(&self, milestone: Milestone) {
        self.write(|t| t.milestones.push(milestone));
    }

    pub fn insert_alert(&self, alert: Alert) {
        self.write(|t| t.alerts.push(alert));
    }

    pub fn insert_report(&self, report: ProgressReport) {
        self.write(|t| t.reports.push(report));
    }

    pub fn insert_user(&self, user: User) {
        self.write(|t| t.users.push(user));
    }
}

fn select<T: Clone>(rows: &[T], keep: impl Fn(&T) -> bool) -> Vec<T> {
    rows.iter().filter(|r| keep(r)).cloned().collect()
}

#[async_trait]
impl PredictionSink for InMemoryStrategyStore {
    async fn record(&self, prediction: &Prediction) -> Result<(), SinkError> {
        let prediction = prediction.clone();
        self.write(|t| t.predictions.push(prediction));
        Ok(())
    }
}

#[async_trait]
impl StrategyStore for InMemoryStrategyStore {
    async fn kpis(&self, filter: &KpiFilter) -> StoreResult<Vec<Kpi>> {
        Ok(self.read(|t| select(&t.kpis, |k| filter.matches(k))))
    }

    async fn kpi(&self, id: KpiId) -> StoreResult<Option<Kpi>> {
        Ok(self.read(|t| t.kpis.iter().find(|k| k.id == id).cloned()))
    }

    async fn pillars(&self) -> StoreResult<Vec<Pillar>> {
        let mut pillars = self.read(|t| t.pillars.clone());
        pillars.sort_by_key(|p| p.order_index);
        Ok(pillars)
    }

    async fn pillar(&self, id: PillarId) -> StoreResult<Option<Pillar>> {
        Ok(self.read(|t| t.pillars.iter().find(|p| p.id == id).cloned()))
    }

    async fn departments(&self) -> StoreResult<Vec<Department>> {
        Ok(self.read(|t| t.departments.clone()))
    }

    async fn department(&self, id: DepartmentId) -> StoreResult<Option<Department>> {
        Ok(self.read(|t| t.departments.iter().find(|d| d.id == id).cloned()))
    }

    async fn milestones(&self, filter: &MilestoneFilter) -> StoreResult<Vec<Milestone>> {
        Ok(self.read(|t| select(&t.milestones, |m| filter.matches(m))))
    }

    async fn alerts(&self, filter: &AlertFilter) -> StoreResult<Vec<Alert>> {
        Ok(self.read(|t| select(&t.alerts, |a| filter.matches(a))))
    }

    async fn progress_reports(&self, filter: &ReportFilter) -> StoreResult<Vec<ProgressReport>> {
        Ok(self.read(|t| select(&t.reports, |r| filter.matches(r))))
    }

    async fn predictions(&self, filter: &PredictionFilter) -> StoreResult<Vec<Prediction>> {
        Ok(self.read(|t| select(&t.predictions, |p| filter.matches(p))))
    }

    async fn users(&self, filter: &UserFilter) -> StoreResult<Vec<User>> {
        Ok(self.read(|t| select(&t.users, |u| filter.matches(u))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use stratboard_core::DomainError;
    use stratboard_strategy::{KpiStatus, PredictionType};

    #[tokio::test]
    async fn pillars_come_back_by_order_index_with_stable_ties() {
        let store = InMemoryStrategyStore::new();
        store.insert_pillar(Pillar::new("Research", "P3", 3));
        store.insert_pillar(Pillar::new("Teaching", "P1", 1));
        store.insert_pillar(Pillar::new("Community", "P1b", 1));

        let names: Vec<String> = store.pillars().await.unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Teaching", "Community", "Research"]);
    }

    #[tokio::test]
    async fn invalid_kpi_is_rejected_on_insert() {
        let store = InMemoryStrategyStore::new();
        let err = store
            .insert_kpi(Kpi::new("K1", "Bad", PillarId::new()).with_progress(-1.0))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(store.kpis(&KpiFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn kpi_filter_is_applied_in_insertion_order() {
        let store = InMemoryStrategyStore::new();
        let pillar = PillarId::new();
        store.insert_kpi(Kpi::new("A", "A", pillar).with_status(KpiStatus::AtRisk)).unwrap();
        store.insert_kpi(Kpi::new("B", "B", pillar)).unwrap();
        store.insert_kpi(Kpi::new("C", "C", pillar).with_status(KpiStatus::AtRisk)).unwrap();

        let at_risk = store
            .kpis(&KpiFilter { status: Some(KpiStatus::AtRisk), ..Default::default() })
            .await
            .unwrap();
        let codes: Vec<&str> = at_risk.iter().map(|k| k.code.as_str()).collect();
        assert_eq!(codes, vec!["A", "C"]);
    }

    #[tokio::test]
    async fn priority_filter_keeps_active_top_priority_only() {
        let store = InMemoryStrategyStore::new();
        let pillar = PillarId::new();
        store.insert_kpi(Kpi::new("P1", "Top", pillar)).unwrap();
        store.insert_kpi(Kpi::new("P2", "Second", pillar).with_priority(2)).unwrap();
        store.insert_kpi(Kpi::new("P3", "Dormant", pillar).inactive()).unwrap();

        let top = store
            .kpis(&KpiFilter { priority: Some(1), ..KpiFilter::active() })
            .await
            .unwrap();
        let codes: Vec<&str> = top.iter().map(|k| k.code.as_str()).collect();
        assert_eq!(codes, vec!["P1"]);
    }

    #[tokio::test]
    async fn recorded_predictions_are_queryable() {
        let store = InMemoryStrategyStore::new();
        let kpi = KpiId::new();
        let p = Prediction::failed(kpi, PredictionType::RiskAssessment, "timeout", Utc::now());
        store.record(&p).await.unwrap();

        let found = store
            .predictions(&PredictionFilter { kpi_id: Some(kpi) })
            .await
            .unwrap();
        assert_eq!(found, vec![p]);
    }
}
