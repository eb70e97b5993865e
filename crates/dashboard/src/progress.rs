//! Pure progress computations over already-loaded records.
//!
//! Only active KPIs count towards any ratio or counter.

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};

use stratboard_core::completion_ratio;
use stratboard_strategy::{Department, Kpi, KpiStatus, Pillar, User};

use crate::payload::{DepartmentProgress, MonthlyPoint, PillarProgress};

/// Length of the completion series on the admin and strategy dashboards.
pub const MONTHLY_WINDOW: u32 = 12;

/// KPI counters by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub total: usize,
    pub completed: usize,
    pub on_track: usize,
    pub at_risk: usize,
    pub behind: usize,
}

impl StatusCounts {
    pub fn of<'a>(kpis: impl IntoIterator<Item = &'a Kpi>) -> Self {
        let mut counts = Self::default();
        for kpi in kpis.into_iter().filter(|k| k.is_active) {
            counts.total += 1;
            match kpi.status {
                KpiStatus::Completed => counts.completed += 1,
                KpiStatus::OnTrack => counts.on_track += 1,
                KpiStatus::AtRisk => counts.at_risk += 1,
                KpiStatus::Behind => counts.behind += 1,
            }
        }
        counts
    }

    pub fn progress(&self) -> f64 {
        completion_ratio(self.completed, self.total)
    }
}

pub fn pillar_progress(pillar: &Pillar, kpis: &[Kpi]) -> PillarProgress {
    let counts = StatusCounts::of(kpis.iter().filter(|k| k.pillar_id == pillar.id));
    PillarProgress {
        id: pillar.id,
        name: pillar.name.clone(),
        code: pillar.code.clone(),
        color: pillar.color.clone(),
        weight: pillar.weight,
        total_kpis: counts.total,
        completed_kpis: counts.completed,
        progress: counts.progress(),
    }
}

/// One entry per pillar, in the given order.
pub fn pillars_progress(pillars: &[Pillar], kpis: &[Kpi]) -> Vec<PillarProgress> {
    pillars.iter().map(|p| pillar_progress(p, kpis)).collect()
}

pub fn department_progress(department: &Department, kpis: &[Kpi], users: &[User]) -> DepartmentProgress {
    let counts = StatusCounts::of(kpis.iter().filter(|k| k.department_id == Some(department.id)));
    DepartmentProgress {
        id: department.id,
        name: department.name.clone(),
        code: department.code.clone(),
        total_kpis: counts.total,
        completed_kpis: counts.completed,
        progress: counts.progress(),
        user_count: users
            .iter()
            .filter(|u| u.department_id == Some(department.id))
            .count(),
    }
}

pub fn departments_progress(
    departments: &[Department],
    kpis: &[Kpi],
    users: &[User],
) -> Vec<DepartmentProgress> {
    departments
        .iter()
        .map(|d| department_progress(d, kpis, users))
        .collect()
}

/// Completions per calendar month, oldest first, ending with the month of `now`.
///
/// `cumulative` also counts completions that happened before the window. A
/// completed KPI without `completed_at` is dated by `created_at`, and dates
/// after `now` count in the current month, so the last `cumulative` always
/// equals the completed count in the stats.
pub fn monthly_series(kpis: &[Kpi], now: DateTime<Utc>, months: u32) -> Vec<MonthlyPoint> {
    let today = now.date_naive();
    let current = first_of_month(today);
    let completions: Vec<NaiveDate> = kpis
        .iter()
        .filter(|k| k.is_active && k.is_completed())
        .map(|k| k.completed_at.unwrap_or(k.created_at).date_naive().min(today))
        .collect();

    (0..months)
        .rev()
        .filter_map(|back| {
            let start = current.checked_sub_months(Months::new(back))?;
            let end = start.checked_add_months(Months::new(1))?;
            Some(MonthlyPoint {
                month: start.format("%b %Y").to_string(),
                completed: completions.iter().filter(|d| **d >= start && **d < end).count(),
                cumulative: completions.iter().filter(|d| **d < end).count(),
            })
        })
        .collect()
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;
    use stratboard_auth::Role;
    use stratboard_core::PillarId;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 15, 10, 0, 0).unwrap()
    }

    #[test]
    fn pillar_with_no_active_kpis_is_zero() {
        let pillar = Pillar::new("Growth", "GRW", 1);
        let kpis = vec![Kpi::new("K1", "Dormant", pillar.id).completed_at(now()).inactive()];

        let p = pillar_progress(&pillar, &kpis);
        assert_eq!(p.total_kpis, 0);
        assert_eq!(p.progress, 0.0);
    }

    #[test]
    fn pillar_counts_only_its_own_active_kpis() {
        let pillar = Pillar::new("Growth", "GRW", 1);
        let other = PillarId::new();
        let kpis = vec![
            Kpi::new("K1", "A", pillar.id).completed_at(now()),
            Kpi::new("K2", "B", pillar.id).completed_at(now()),
            Kpi::new("K3", "C", pillar.id).with_status(KpiStatus::AtRisk),
            Kpi::new("K4", "D", other).completed_at(now()),
        ];

        let p = pillar_progress(&pillar, &kpis);
        assert_eq!((p.total_kpis, p.completed_kpis), (3, 2));
        assert_eq!(p.progress, 66.67);
    }

    #[test]
    fn department_counts_users_and_kpis() {
        let dept = Department::new("Finance", "FIN");
        let pillar = PillarId::new();
        let kpis = vec![
            Kpi::new("K1", "A", pillar).with_department(dept.id).completed_at(now()),
            Kpi::new("K2", "B", pillar).with_department(dept.id),
            Kpi::new("K3", "C", pillar),
        ];
        let users = vec![
            User::new("Ana", "ana@example.org", Role::Staff).in_department(dept.id),
            User::new("Ben", "ben@example.org", Role::Hod).in_department(dept.id),
            User::new("Cy", "cy@example.org", Role::Admin),
        ];

        let d = department_progress(&dept, &kpis, &users);
        assert_eq!(d.total_kpis, 2);
        assert_eq!(d.progress, 50.0);
        assert_eq!(d.user_count, 2);
    }

    #[test]
    fn status_counts_skip_inactive() {
        let pillar = PillarId::new();
        let kpis = vec![
            Kpi::new("K1", "A", pillar).with_status(KpiStatus::OnTrack),
            Kpi::new("K2", "B", pillar).with_status(KpiStatus::Behind),
            Kpi::new("K3", "C", pillar).with_status(KpiStatus::Behind).inactive(),
        ];

        let c = StatusCounts::of(&kpis);
        assert_eq!(c, StatusCounts { total: 2, completed: 0, on_track: 1, at_risk: 0, behind: 1 });
    }

    #[test]
    fn monthly_series_places_completions_and_accumulates() {
        let pillar = PillarId::new();
        let kpis = vec![
            // Before the window: only in cumulative.
            Kpi::new("K0", "Old", pillar).completed_at(Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap()),
            Kpi::new("K1", "Jan", pillar).completed_at(Utc.with_ymd_and_hms(2026, 1, 31, 23, 0, 0).unwrap()),
            Kpi::new("K2", "Mar", pillar).completed_at(Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap()),
        ];

        let series = monthly_series(&kpis, now(), MONTHLY_WINDOW);
        assert_eq!(series.len(), 12);
        assert_eq!(series[0].month, "Apr 2025");
        assert_eq!(series[0].cumulative, 1);

        let last = series.last().unwrap();
        assert_eq!(last.month, "Mar 2026");
        assert_eq!((last.completed, last.cumulative), (1, 3));

        let jan = series.iter().find(|p| p.month == "Jan 2026").unwrap();
        assert_eq!((jan.completed, jan.cumulative), (1, 2));
    }

    #[test]
    fn monthly_series_dates_undated_completions_by_creation() {
        let pillar = PillarId::new();
        let mut undated = Kpi::new("K1", "Undated", pillar).with_status(KpiStatus::Completed);
        undated.created_at = Utc.with_ymd_and_hms(2026, 2, 10, 0, 0, 0).unwrap();
        // Created after `now`: lands in the current month.
        let late = Kpi::new("K2", "Late", pillar).with_status(KpiStatus::Completed);
        let kpis = vec![undated, late, Kpi::new("K3", "Dated", pillar).completed_at(now())];

        let series = monthly_series(&kpis, now(), MONTHLY_WINDOW);
        let feb = series.iter().find(|p| p.month == "Feb 2026").unwrap();
        assert_eq!(feb.completed, 1);

        let last = series.last().unwrap();
        assert_eq!((last.completed, last.cumulative), (2, 3));
        assert_eq!(last.cumulative, StatusCounts::of(&kpis).completed);
    }

    proptest! {
        #[test]
        fn ratios_stay_in_bounds(flags in proptest::collection::vec(any::<(bool, bool)>(), 0..40)) {
            let pillar = Pillar::new("P", "P", 1);
            let kpis: Vec<Kpi> = flags
                .iter()
                .enumerate()
                .map(|(i, (done, active))| {
                    let mut k = Kpi::new(format!("K{i}"), "k", pillar.id);
                    if *done { k = k.completed_at(now()); }
                    if !*active { k = k.inactive(); }
                    k
                })
                .collect();

            let p = pillar_progress(&pillar, &kpis);
            prop_assert!((0.0..=100.0).contains(&p.progress));
            if p.total_kpis == 0 {
                prop_assert_eq!(p.progress, 0.0);
            }
        }

        #[test]
        fn monthly_series_is_monotone(offsets in proptest::collection::vec(0i64..900, 0..30)) {
            let pillar = PillarId::new();
            let kpis: Vec<Kpi> = offsets
                .iter()
                .map(|d| Kpi::new("K", "k", pillar).completed_at(now() - Duration::days(*d)))
                .collect();

            let series = monthly_series(&kpis, now(), MONTHLY_WINDOW);
            prop_assert_eq!(series.len(), 12);
            for pair in series.windows(2) {
                prop_assert!(pair[1].cumulative >= pair[0].cumulative);
                prop_assert_eq!(pair[1].cumulative - pair[0].cumulative, pair[1].completed);
            }
            prop_assert_eq!(series[11].cumulative, kpis.len());
        }
    }
}
