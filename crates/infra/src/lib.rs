//! Infrastructure layer: the strategy store (in-memory and Postgres) and demo data.

pub mod seed;
pub mod store;

pub use store::{
    AlertFilter, InMemoryStrategyStore, KpiFilter, MilestoneFilter, PostgresStrategyStore,
    PredictionFilter, ReportFilter, StoreError, StoreResult, StrategyStore, UserFilter,
};
