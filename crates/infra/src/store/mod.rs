//! Read interface over the strategy records.
//!
//! Filters select rows; ordering beyond "store order" and limits are applied
//! by callers. Store order is insertion order for the in-memory store and the
//! `seq` column for Postgres.

pub mod filter;
pub mod in_memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use stratboard_ai::PredictionSink;
use stratboard_core::{DepartmentId, DomainError, KpiId, PillarId};
use stratboard_strategy::{
    Alert, Department, Kpi, Milestone, Pillar, Prediction, ProgressReport, User,
};

pub use filter::{AlertFilter, KpiFilter, MilestoneFilter, PredictionFilter, ReportFilter, UserFilter};
pub use in_memory::InMemoryStrategyStore;
pub use postgres::PostgresStrategyStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("invalid stored value in column '{column}': {message}")]
    Decode {
        column: &'static str,
        message: String,
    },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl StoreError {
    pub(crate) fn decode(column: &'static str, message: impl Into<String>) -> Self {
        Self::Decode {
            column,
            message: message.into(),
        }
    }
}

/// Query interface consumed by the dashboard aggregator and the exporters.
///
/// Prediction writes come in through the [`PredictionSink`] supertrait.
#[async_trait]
pub trait StrategyStore: PredictionSink {
    async fn kpis(&self, filter: &KpiFilter) -> StoreResult<Vec<Kpi>>;
    async fn kpi(&self, id: KpiId) -> StoreResult<Option<Kpi>>;

    /// Pillars ordered by `order_index` (store order on ties).
    async fn pillars(&self) -> StoreResult<Vec<Pillar>>;
    async fn pillar(&self, id: PillarId) -> StoreResult<Option<Pillar>>;

    async fn departments(&self) -> StoreResult<Vec<Department>>;
    async fn department(&self, id: DepartmentId) -> StoreResult<Option<Department>>;

    async fn milestones(&self, filter: &MilestoneFilter) -> StoreResult<Vec<Milestone>>;
    async fn alerts(&self, filter: &AlertFilter) -> StoreResult<Vec<Alert>>;
    async fn progress_reports(&self, filter: &ReportFilter) -> StoreResult<Vec<ProgressReport>>;
    async fn predictions(&self, filter: &PredictionFilter) -> StoreResult<Vec<Prediction>>;
    async fn users(&self, filter: &UserFilter) -> StoreResult<Vec<User>>;
}

#[async_trait]
impl<T> StrategyStore for Arc<T>
where
    T: StrategyStore + ?Sized,
{
    async fn kpis(&self, filter: &KpiFilter) -> StoreResult<Vec<Kpi>> {
        (**self).kpis(filter).await
    }

    async fn kpi(&self, id: KpiId) -> StoreResult<Option<Kpi>> {
        (**self).kpi(id).await
    }

    async fn pillars(&self) -> StoreResult<Vec<Pillar>> {
        (**self).pillars().await
    }

    async fn pillar(&self, id: PillarId) -> StoreResult<Option<Pillar>> {
        (**self).pillar(id).await
    }

    async fn departments(&self) -> StoreResult<Vec<Department>> {
        (**self).departments().await
    }

    async fn department(&self, id: DepartmentId) -> StoreResult<Option<Department>> {
        (**self).department(id).await
    }

    async fn milestones(&self, filter: &MilestoneFilter) -> StoreResult<Vec<Milestone>> {
        (**self).milestones(filter).await
    }

    async fn alerts(&self, filter: &AlertFilter) -> StoreResult<Vec<Alert>> {
        (**self).alerts(filter).await
    }

    async fn progress_reports(&self, filter: &ReportFilter) -> StoreResult<Vec<ProgressReport>> {
        (**self).progress_reports(filter).await
    }

    async fn predictions(&self, filter: &PredictionFilter) -> StoreResult<Vec<Prediction>> {
        (**self).predictions(filter).await
    }

    async fn users(&self, filter: &UserFilter) -> StoreResult<Vec<User>> {
        (**self).users(filter).await
    }
}
