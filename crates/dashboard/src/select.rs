//! Ordering and truncation of dashboard lists.
//!
//! All sorts are stable: rows with equal keys keep the store's order.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use stratboard_core::KpiId;
use stratboard_strategy::{Alert, Kpi, Milestone, ProgressReport};

use crate::payload::MilestoneSummary;

/// Most recently triggered first, at most `limit`.
pub fn recent_alerts(mut alerts: Vec<Alert>, limit: usize) -> Vec<Alert> {
    alerts.sort_by(|a, b| b.triggered_at.cmp(&a.triggered_at));
    alerts.truncate(limit);
    alerts
}

/// Newest first, at most `limit`.
pub fn recent_reports(mut reports: Vec<ProgressReport>, limit: usize) -> Vec<ProgressReport> {
    reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    reports.truncate(limit);
    reports
}

/// Soonest due first, optionally truncated.
pub fn soonest_first(mut milestones: Vec<Milestone>, limit: Option<usize>) -> Vec<Milestone> {
    milestones.sort_by_key(|m| m.due_date);
    if let Some(limit) = limit {
        milestones.truncate(limit);
    }
    milestones
}

/// Attach KPI names and the derived overdue flag.
pub fn summarize_milestones(
    milestones: Vec<Milestone>,
    kpis: &[Kpi],
    now: DateTime<Utc>,
) -> Vec<MilestoneSummary> {
    let names: HashMap<KpiId, &str> = kpis.iter().map(|k| (k.id, k.name.as_str())).collect();

    milestones
        .into_iter()
        .map(|m| MilestoneSummary {
            is_overdue: m.is_overdue(now),
            kpi_name: names.get(&m.kpi_id).map(|n| n.to_string()),
            id: m.id,
            kpi_id: m.kpi_id,
            title: m.title,
            due_date: m.due_date,
            status: m.status,
            assigned_to: m.assigned_to,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, TimeZone};
    use stratboard_core::PillarId;
    use stratboard_strategy::{AlertSeverity, AlertSubject};

    #[test]
    fn alerts_newest_first_with_stable_ties() {
        let t = Utc.with_ymd_and_hms(2026, 4, 1, 9, 0, 0).unwrap();
        let subject = AlertSubject::Pillar(PillarId::new());
        let alerts = vec![
            Alert::new("old", AlertSeverity::Info, subject, t - Duration::days(1)),
            Alert::new("tie-a", AlertSeverity::Info, subject, t),
            Alert::new("tie-b", AlertSeverity::Info, subject, t),
        ];

        let titles: Vec<String> = recent_alerts(alerts, 10).into_iter().map(|a| a.title).collect();
        assert_eq!(titles, vec!["tie-a", "tie-b", "old"]);
    }

    #[test]
    fn milestones_soonest_first_and_truncated() {
        let kpi = KpiId::new();
        let d = |day| NaiveDate::from_ymd_opt(2026, 6, day).unwrap();
        let ms = vec![
            Milestone::new(kpi, "c", d(20)),
            Milestone::new(kpi, "a", d(2)),
            Milestone::new(kpi, "b", d(9)),
        ];

        let titles: Vec<String> = soonest_first(ms, Some(2)).into_iter().map(|m| m.title).collect();
        assert_eq!(titles, vec!["a", "b"]);
    }

    #[test]
    fn summaries_carry_kpi_name_and_overdue_flag() {
        let now = Utc.with_ymd_and_hms(2026, 6, 10, 12, 0, 0).unwrap();
        let kpi = Kpi::new("K1", "Retention", PillarId::new());
        let late = Milestone::new(kpi.id, "late", NaiveDate::from_ymd_opt(2026, 6, 1).unwrap());
        let orphan = Milestone::new(KpiId::new(), "orphan", NaiveDate::from_ymd_opt(2026, 7, 1).unwrap());

        let out = summarize_milestones(vec![late, orphan], &[kpi], now);
        assert_eq!(out[0].kpi_name.as_deref(), Some("Retention"));
        assert!(out[0].is_overdue);
        assert_eq!(out[1].kpi_name, None);
        assert!(!out[1].is_overdue);
    }
}
