use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use stratboard_core::{KpiId, MilestoneId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneStatus {
    Pending,
    InProgress,
    Completed,
    Delayed,
}

impl MilestoneStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MilestoneStatus::Pending => "pending",
            MilestoneStatus::InProgress => "in_progress",
            MilestoneStatus::Completed => "completed",
            MilestoneStatus::Delayed => "delayed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MilestoneStatus::Pending => "Pending",
            MilestoneStatus::InProgress => "In Progress",
            MilestoneStatus::Completed => "Completed",
            MilestoneStatus::Delayed => "Delayed",
        }
    }
}

/// A dated deliverable under a KPI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: MilestoneId,
    pub kpi_id: KpiId,
    pub title: String,
    pub due_date: NaiveDate,
    pub status: MilestoneStatus,
    pub assigned_to: Option<UserId>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Milestone {
    pub fn new(kpi_id: KpiId, title: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            id: MilestoneId::new(),
            kpi_id,
            title: title.into(),
            due_date,
            status: MilestoneStatus::Pending,
            assigned_to: None,
            completed_at: None,
        }
    }

    pub fn assigned_to(mut self, user_id: UserId) -> Self {
        self.assigned_to = Some(user_id);
        self
    }

    pub fn with_status(mut self, status: MilestoneStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_completed(&self) -> bool {
        self.status == MilestoneStatus::Completed
    }

    /// Start of the due day in UTC.
    pub fn due_at(&self) -> DateTime<Utc> {
        self.due_date.and_time(NaiveTime::MIN).and_utc()
    }

    /// Derived on read, never stored: past due and not completed.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_at() < now && !self.is_completed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 15, 10, 0, 0).unwrap()
    }

    fn milestone(due: NaiveDate, status: MilestoneStatus) -> Milestone {
        Milestone::new(KpiId::new(), "Board approval", due).with_status(status)
    }

    #[test]
    fn past_due_and_open_is_overdue() {
        let due = (now() - Duration::days(3)).date_naive();
        assert!(milestone(due, MilestoneStatus::InProgress).is_overdue(now()));
        assert!(milestone(due, MilestoneStatus::Delayed).is_overdue(now()));
    }

    #[test]
    fn completed_is_never_overdue() {
        let due = (now() - Duration::days(400)).date_naive();
        assert!(!milestone(due, MilestoneStatus::Completed).is_overdue(now()));
    }

    #[test]
    fn future_due_is_not_overdue() {
        let due = (now() + Duration::days(1)).date_naive();
        assert!(!milestone(due, MilestoneStatus::Pending).is_overdue(now()));
    }

    #[test]
    fn due_today_counts_once_the_day_has_started() {
        let due = now().date_naive();
        assert!(milestone(due, MilestoneStatus::Pending).is_overdue(now()));
        assert!(!milestone(due, MilestoneStatus::Pending).is_overdue(due.and_time(NaiveTime::MIN).and_utc()));
    }
}
