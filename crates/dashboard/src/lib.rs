//! `stratboard-dashboard`: role-shaped dashboard payloads.
//!
//! A principal's role selects one of five fixed views; each view reads the
//! strategy store and shapes the result for the presentation layer. Nothing
//! here writes to the store.

pub mod aggregator;
pub mod payload;
pub mod progress;
pub mod select;

pub use aggregator::{DashboardAggregator, DashboardError, DashboardView};
pub use payload::{
    AdminDashboard, AdminStats, AnalystDashboard, BasicStats, DashboardPayload,
    DefaultDashboard, DepartmentDashboard, DepartmentProgress, DepartmentSummary,
    DepartmentUserStats, MilestoneSummary, MonthlyPoint, PillarProgress, PillarProgressLight,
    RiskSnapshot, StrategyDashboard, StrategyStats,
};
