//! Name resolution for foreign keys shown in exports.

use std::collections::HashMap;

use uuid::Uuid;

use stratboard_core::{DepartmentId, EntityKind, KpiId, PillarId, UserId};
use stratboard_infra::{KpiFilter, MilestoneFilter, StoreResult, StrategyStore, UserFilter};
use stratboard_strategy::{AlertSubject, Department, Kpi, Milestone, Pillar, User};

/// Active / completed-active KPI counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KpiTally {
    pub total: usize,
    pub completed: usize,
}

/// Display names keyed by entity kind and raw id.
///
/// Alert subjects resolve through the same table, so a subject of any kind
/// maps to a label without a per-kind query.
#[derive(Debug, Clone, Default)]
pub struct Lookup {
    names: HashMap<EntityKind, HashMap<Uuid, String>>,
    by_pillar: HashMap<PillarId, KpiTally>,
    by_department: HashMap<DepartmentId, KpiTally>,
}

impl Lookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load<S: StrategyStore + ?Sized>(store: &S) -> StoreResult<Self> {
        let mut lookup = Self::new();
        lookup.add_pillars(&store.pillars().await?);
        lookup.add_departments(&store.departments().await?);
        lookup.add_kpis(&store.kpis(&KpiFilter::default()).await?);
        lookup.add_milestones(&store.milestones(&MilestoneFilter::default()).await?);
        lookup.add_users(&store.users(&UserFilter::default()).await?);
        Ok(lookup)
    }

    fn insert(&mut self, kind: EntityKind, id: Uuid, name: &str) {
        self.names.entry(kind).or_default().insert(id, name.to_string());
    }

    pub fn add_pillars(&mut self, pillars: &[Pillar]) {
        for p in pillars {
            self.insert(EntityKind::Pillar, *p.id.as_uuid(), &p.name);
        }
    }

    pub fn add_departments(&mut self, departments: &[Department]) {
        for d in departments {
            self.insert(EntityKind::Department, *d.id.as_uuid(), &d.name);
        }
    }

    /// Registers names and tallies active KPIs per pillar and department.
    pub fn add_kpis(&mut self, kpis: &[Kpi]) {
        for k in kpis {
            self.insert(EntityKind::Kpi, *k.id.as_uuid(), &k.name);
            if !k.is_active {
                continue;
            }
            let done = usize::from(k.is_completed());
            let tally = self.by_pillar.entry(k.pillar_id).or_default();
            tally.total += 1;
            tally.completed += done;
            if let Some(dept) = k.department_id {
                let tally = self.by_department.entry(dept).or_default();
                tally.total += 1;
                tally.completed += done;
            }
        }
    }

    pub fn add_milestones(&mut self, milestones: &[Milestone]) {
        for m in milestones {
            self.insert(EntityKind::Milestone, *m.id.as_uuid(), &m.title);
        }
    }

    pub fn add_users(&mut self, users: &[User]) {
        for u in users {
            self.insert(EntityKind::User, *u.id.as_uuid(), &u.name);
        }
    }

    pub fn name(&self, kind: EntityKind, id: Uuid) -> Option<&str> {
        self.names.get(&kind)?.get(&id).map(String::as_str)
    }

    pub fn pillar(&self, id: PillarId) -> Option<&str> {
        self.name(EntityKind::Pillar, *id.as_uuid())
    }

    pub fn department(&self, id: DepartmentId) -> Option<&str> {
        self.name(EntityKind::Department, *id.as_uuid())
    }

    pub fn kpi(&self, id: KpiId) -> Option<&str> {
        self.name(EntityKind::Kpi, *id.as_uuid())
    }

    pub fn user(&self, id: UserId) -> Option<&str> {
        self.name(EntityKind::User, *id.as_uuid())
    }

    pub fn subject(&self, subject: &AlertSubject) -> Option<&str> {
        self.name(subject.kind(), subject.raw_id())
    }

    pub fn pillar_tally(&self, id: PillarId) -> KpiTally {
        self.by_pillar.get(&id).copied().unwrap_or_default()
    }

    pub fn department_tally(&self, id: DepartmentId) -> KpiTally {
        self.by_department.get(&id).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    #[test]
    fn subjects_resolve_by_kind() {
        let pillar = Pillar::new("Growth", "GRW", 1);
        let kpi = Kpi::new("K1", "Enrolment", pillar.id);
        let milestone = Milestone::new(kpi.id, "Open campus", NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());

        let mut lookup = Lookup::new();
        lookup.add_pillars(std::slice::from_ref(&pillar));
        lookup.add_kpis(std::slice::from_ref(&kpi));
        lookup.add_milestones(std::slice::from_ref(&milestone));

        assert_eq!(lookup.subject(&AlertSubject::Kpi(kpi.id)), Some("Enrolment"));
        assert_eq!(lookup.subject(&AlertSubject::Pillar(pillar.id)), Some("Growth"));
        assert_eq!(lookup.subject(&AlertSubject::Milestone(milestone.id)), Some("Open campus"));
        assert_eq!(lookup.subject(&AlertSubject::Department(DepartmentId::new())), None);
    }

    #[test]
    fn tallies_count_active_kpis_only() {
        let pillar = PillarId::new();
        let dept = DepartmentId::new();
        let at = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
        let kpis = vec![
            Kpi::new("K1", "A", pillar).with_department(dept).completed_at(at),
            Kpi::new("K2", "B", pillar),
            Kpi::new("K3", "C", pillar).with_department(dept).inactive(),
        ];

        let mut lookup = Lookup::new();
        lookup.add_kpis(&kpis);

        assert_eq!(lookup.pillar_tally(pillar), KpiTally { total: 2, completed: 1 });
        assert_eq!(lookup.department_tally(dept), KpiTally { total: 1, completed: 1 });
        assert_eq!(lookup.pillar_tally(PillarId::new()), KpiTally::default());
    }
}
