use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stratboard_core::{
    AlertId, DepartmentId, EntityKind, KpiId, MilestoneId, PillarId, UserId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Info => "info",
            AlertSeverity::Warning => "warning",
            AlertSeverity::Critical => "critical",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AlertSeverity::Info => "Info",
            AlertSeverity::Warning => "Warning",
            AlertSeverity::Critical => "Critical",
        }
    }
}

/// The record an alert is attached to.
///
/// Serialized as `{"kind": "...", "id": "..."}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum AlertSubject {
    Kpi(KpiId),
    Milestone(MilestoneId),
    Pillar(PillarId),
    Department(DepartmentId),
}

impl AlertSubject {
    pub fn kind(&self) -> EntityKind {
        match self {
            AlertSubject::Kpi(_) => EntityKind::Kpi,
            AlertSubject::Milestone(_) => EntityKind::Milestone,
            AlertSubject::Pillar(_) => EntityKind::Pillar,
            AlertSubject::Department(_) => EntityKind::Department,
        }
    }

    pub fn raw_id(&self) -> uuid::Uuid {
        match self {
            AlertSubject::Kpi(id) => *id.as_uuid(),
            AlertSubject::Milestone(id) => *id.as_uuid(),
            AlertSubject::Pillar(id) => *id.as_uuid(),
            AlertSubject::Department(id) => *id.as_uuid(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: AlertId,
    pub title: String,
    pub message: String,
    pub severity: AlertSeverity,
    pub subject: AlertSubject,
    pub triggered_at: DateTime<Utc>,
    pub is_read: bool,
    pub acknowledged_by: Option<UserId>,
    pub acknowledged_at: Option<DateTime<Utc>>,
}

impl Alert {
    pub fn new(
        title: impl Into<String>,
        severity: AlertSeverity,
        subject: AlertSubject,
        triggered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AlertId::new(),
            title: title.into(),
            message: String::new(),
            severity,
            subject,
            triggered_at,
            is_read: false,
            acknowledged_by: None,
            acknowledged_at: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn acknowledged(mut self, by: UserId, at: DateTime<Utc>) -> Self {
        self.is_read = true;
        self.acknowledged_by = Some(by);
        self.acknowledged_at = Some(at);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_serializes_as_kind_and_id() {
        let kpi_id = KpiId::new();
        let json = serde_json::to_value(AlertSubject::Kpi(kpi_id)).unwrap();
        assert_eq!(json["kind"], "kpi");
        assert_eq!(json["id"], kpi_id.to_string());
    }

    #[test]
    fn acknowledging_marks_read() {
        let alert = Alert::new(
            "KPI behind schedule",
            AlertSeverity::Warning,
            AlertSubject::Pillar(PillarId::new()),
            Utc::now(),
        )
        .acknowledged(UserId::new(), Utc::now());
        assert!(alert.is_read);
        assert!(alert.acknowledged_by.is_some());
    }
}
