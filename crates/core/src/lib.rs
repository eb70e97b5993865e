//! `stratboard-core`: shared building blocks for the strategy dashboard.
//!
//! This crate contains identifiers, the domain error model and a few pure
//! helpers (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod progress;

pub use entity::EntityKind;
pub use error::{DomainError, DomainResult};
pub use id::{AlertId, DepartmentId, KpiId, MilestoneId, PillarId, PredictionId, ReportId, UserId};
pub use progress::{completion_ratio, round2};
