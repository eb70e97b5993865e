//! `stratboard-strategy`: records of the strategic plan.
//!
//! These types are read models: the dashboard and export layers only read
//! them. Writes belong to collaborators (forms, uploads, the prediction runner).

pub mod alert;
pub mod department;
pub mod kpi;
pub mod milestone;
pub mod pillar;
pub mod prediction;
pub mod report;
pub mod user;

pub use alert::{Alert, AlertSeverity, AlertSubject};
pub use department::Department;
pub use kpi::{Kpi, KpiStatus};
pub use milestone::{Milestone, MilestoneStatus};
pub use pillar::Pillar;
pub use prediction::{Prediction, PredictionStatus, PredictionType};
pub use report::ProgressReport;
pub use user::User;
