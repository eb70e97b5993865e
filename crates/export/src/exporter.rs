//! Store-backed export operations used by the HTTP layer.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use stratboard_core::{DepartmentId, DomainError, EntityKind, PillarId};
use stratboard_infra::{
    AlertFilter, KpiFilter, MilestoneFilter, PredictionFilter, ReportFilter, StrategyStore,
};
use stratboard_strategy::KpiStatus;

use crate::error::ExportResult;
use crate::formatters::{
    AlertFormatter, DepartmentFormatter, Formatter, KpiFormatter, MilestoneFormatter,
    PillarFormatter, PredictionFormatter, ReportFormatter,
};
use crate::lookup::Lookup;
use crate::sheet::{Sheet, Workbook};

pub const STRATEGY_REPORT: &str = "Strategy Report";

/// Optional scoping for the KPI export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct KpiExportQuery {
    pub pillar_id: Option<PillarId>,
    pub department_id: Option<DepartmentId>,
    pub status: Option<KpiStatus>,
}

pub struct Exporter<S> {
    store: S,
}

impl<S> Exporter<S>
where
    S: StrategyStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// KPIs (active and inactive) in store order.
    ///
    /// A pillar or department in the query that does not exist is reported as
    /// `NotFound` instead of producing an empty sheet.
    pub async fn kpis(&self, query: KpiExportQuery) -> ExportResult<Sheet> {
        if let Some(id) = query.pillar_id {
            if self.store.pillar(id).await?.is_none() {
                return Err(DomainError::not_found(EntityKind::Pillar, id).into());
            }
        }
        if let Some(id) = query.department_id {
            if self.store.department(id).await?.is_none() {
                return Err(DomainError::not_found(EntityKind::Department, id).into());
            }
        }

        let kpis = self
            .store
            .kpis(&KpiFilter {
                pillar_id: query.pillar_id,
                department_id: query.department_id,
                status: query.status,
                ..KpiFilter::default()
            })
            .await?;
        debug!(rows = kpis.len(), ?query, "exporting kpis");

        let lookup = Lookup::load(&self.store).await?;
        KpiFormatter::new(&lookup).format(&kpis)
    }

    pub async fn pillars(&self) -> ExportResult<Sheet> {
        let lookup = Lookup::load(&self.store).await?;
        PillarFormatter::new(&lookup).format(&self.store.pillars().await?)
    }

    pub async fn departments(&self) -> ExportResult<Sheet> {
        let lookup = Lookup::load(&self.store).await?;
        DepartmentFormatter::new(&lookup).format(&self.store.departments().await?)
    }

    pub async fn milestones(&self, now: DateTime<Utc>) -> ExportResult<Sheet> {
        let lookup = Lookup::load(&self.store).await?;
        let milestones = self.store.milestones(&MilestoneFilter::default()).await?;
        MilestoneFormatter::new(&lookup, now).format(&milestones)
    }

    pub async fn alerts(&self) -> ExportResult<Sheet> {
        let lookup = Lookup::load(&self.store).await?;
        AlertFormatter::new(&lookup).format(&self.store.alerts(&AlertFilter::default()).await?)
    }

    pub async fn predictions(&self) -> ExportResult<Sheet> {
        let lookup = Lookup::load(&self.store).await?;
        let predictions = self.store.predictions(&PredictionFilter::default()).await?;
        PredictionFormatter::new(&lookup).format(&predictions)
    }

    pub async fn progress_reports(&self) -> ExportResult<Sheet> {
        let lookup = Lookup::load(&self.store).await?;
        let reports = self.store.progress_reports(&ReportFilter::default()).await?;
        ReportFormatter::new(&lookup).format(&reports)
    }

    /// Pillars, KPIs, Milestones, Departments and Predictions as one workbook.
    pub async fn strategy_report(&self, now: DateTime<Utc>) -> ExportResult<Workbook> {
        let lookup = Lookup::load(&self.store).await?;

        let pillars = self.store.pillars().await?;
        let kpis = self.store.kpis(&KpiFilter::default()).await?;
        let milestones = self.store.milestones(&MilestoneFilter::default()).await?;
        let departments = self.store.departments().await?;
        let predictions = self.store.predictions(&PredictionFilter::default()).await?;

        Ok(Workbook::new(STRATEGY_REPORT)
            .with_sheet(PillarFormatter::new(&lookup).format(&pillars)?)
            .with_sheet(KpiFormatter::new(&lookup).format(&kpis)?)
            .with_sheet(MilestoneFormatter::new(&lookup, now).format(&milestones)?)
            .with_sheet(DepartmentFormatter::new(&lookup).format(&departments)?)
            .with_sheet(PredictionFormatter::new(&lookup).format(&predictions)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::TimeZone;
    use stratboard_infra::InMemoryStrategyStore;
    use stratboard_infra::seed::seed_demo_plan;

    use crate::error::ExportError;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
    }

    async fn seeded() -> Exporter<Arc<InMemoryStrategyStore>> {
        let store = Arc::new(InMemoryStrategyStore::new());
        seed_demo_plan(&store, now()).unwrap();
        Exporter::new(store)
    }

    #[tokio::test]
    async fn unknown_pillar_filter_is_not_found() {
        let exporter = seeded().await;
        let err = exporter
            .kpis(KpiExportQuery { pillar_id: Some(PillarId::new()), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ExportError::Domain(DomainError::NotFound { kind: EntityKind::Pillar, .. })
        ));
    }

    #[tokio::test]
    async fn unknown_department_filter_is_not_found() {
        let exporter = seeded().await;
        let err = exporter
            .kpis(KpiExportQuery { department_id: Some(DepartmentId::new()), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ExportError::Domain(DomainError::NotFound { kind: EntityKind::Department, .. })
        ));
    }

    #[tokio::test]
    async fn kpi_export_narrows_by_status() {
        let exporter = seeded().await;
        let sheet = exporter
            .kpis(KpiExportQuery { status: Some(KpiStatus::AtRisk), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(sheet.rows().len(), 1);
        assert_eq!(sheet.rows()[0][0], "T-02");
    }

    #[tokio::test]
    async fn kpi_export_covers_every_kpi() {
        let exporter = seeded().await;
        let sheet = exporter.kpis(KpiExportQuery::default()).await.unwrap();
        assert_eq!(sheet.name(), "KPIs");
        assert_eq!(sheet.rows().len(), 5);
        assert_eq!(sheet.rows()[0][0], "T-01");
    }

    #[tokio::test]
    async fn strategy_report_has_fixed_sheets() {
        let exporter = seeded().await;
        let book = exporter.strategy_report(now()).await.unwrap();

        assert_eq!(book.name, STRATEGY_REPORT);
        let names: Vec<&str> = book.sheets.iter().map(Sheet::name).collect();
        assert_eq!(names, vec!["Pillars", "KPIs", "Milestones", "Departments", "Predictions"]);
        assert_eq!(book.sheets[0].rows().len(), 3);
    }

    #[tokio::test]
    async fn alert_export_includes_read_alerts() {
        let exporter = seeded().await;
        let sheet = exporter.alerts().await.unwrap();
        assert_eq!(sheet.rows().len(), 3);
    }
}
