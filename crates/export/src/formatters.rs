//! One formatter per exported record kind.
//!
//! Headings are fixed and ordered; `row` returns exactly one cell per heading.
//! Missing values are written as the placeholder listed next to each field.

use chrono::{DateTime, NaiveDate, Utc};

use stratboard_core::{EntityKind, completion_ratio};
use stratboard_strategy::{
    Alert, Department, Kpi, Milestone, Pillar, Prediction, ProgressReport,
};

use crate::error::ExportResult;
use crate::lookup::Lookup;
use crate::sheet::Sheet;

pub const NOT_AVAILABLE: &str = "N/A";
pub const UNKNOWN: &str = "Unknown";
pub const NOT_SET: &str = "Not set";
pub const UNASSIGNED: &str = "Unassigned";

pub trait Formatter {
    type Record;

    fn sheet_name(&self) -> &'static str;
    fn headings(&self) -> &'static [&'static str];
    fn row(&self, record: &Self::Record) -> Vec<String>;

    /// Input order is kept; no sorting happens here.
    fn format(&self, records: &[Self::Record]) -> ExportResult<Sheet> {
        let mut sheet = Sheet::new(self.sheet_name(), self.headings().iter().copied());
        for record in records {
            sheet.push_row(self.row(record))?;
        }
        Ok(sheet)
    }
}

fn or(value: Option<&str>, placeholder: &str) -> String {
    value.unwrap_or(placeholder).to_string()
}

fn text_or(value: &str, placeholder: &str) -> String {
    if value.trim().is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

fn number(value: f64) -> String {
    format!("{value:.2}")
}

fn number_or(value: Option<f64>, placeholder: &str) -> String {
    value.map_or_else(|| placeholder.to_string(), number)
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

fn timestamp_or(at: Option<DateTime<Utc>>, placeholder: &str) -> String {
    at.map_or_else(|| placeholder.to_string(), timestamp)
}

fn date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

fn yes_no(flag: bool) -> String {
    if flag { "Yes" } else { "No" }.to_string()
}

fn subject_label(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Kpi => "KPI",
        EntityKind::Milestone => "Milestone",
        EntityKind::Pillar => "Pillar",
        EntityKind::Department => "Department",
        EntityKind::Alert => "Alert",
        EntityKind::Prediction => "Prediction",
        EntityKind::ProgressReport => "Progress Report",
        EntityKind::User => "User",
    }
}

/// Pillar `Unknown`, department `N/A`, owner `Unassigned`, target and current
/// `Not set`, unit and completion date `N/A`.
pub struct KpiFormatter<'a> {
    lookup: &'a Lookup,
}

impl<'a> KpiFormatter<'a> {
    pub fn new(lookup: &'a Lookup) -> Self {
        Self { lookup }
    }
}

impl Formatter for KpiFormatter<'_> {
    type Record = Kpi;

    fn sheet_name(&self) -> &'static str {
        "KPIs"
    }

    fn headings(&self) -> &'static [&'static str] {
        &[
            "Code",
            "Name",
            "Pillar",
            "Department",
            "Owner",
            "Status",
            "Priority",
            "Progress (%)",
            "Target",
            "Current",
            "Unit",
            "Active",
            "Completed At",
        ]
    }

    fn row(&self, kpi: &Kpi) -> Vec<String> {
        vec![
            kpi.code.clone(),
            kpi.name.clone(),
            or(self.lookup.pillar(kpi.pillar_id), UNKNOWN),
            or(kpi.department_id.and_then(|d| self.lookup.department(d)), NOT_AVAILABLE),
            or(kpi.owner_id.and_then(|u| self.lookup.user(u)), UNASSIGNED),
            kpi.status.label().to_string(),
            kpi.priority.to_string(),
            number(kpi.progress_percentage),
            number_or(kpi.target_value, NOT_SET),
            number_or(kpi.current_value, NOT_SET),
            or(kpi.unit.as_deref(), NOT_AVAILABLE),
            yes_no(kpi.is_active),
            timestamp_or(kpi.completed_at, NOT_AVAILABLE),
        ]
    }
}

/// Description `N/A`. Progress counts active KPIs only.
pub struct PillarFormatter<'a> {
    lookup: &'a Lookup,
}

impl<'a> PillarFormatter<'a> {
    pub fn new(lookup: &'a Lookup) -> Self {
        Self { lookup }
    }
}

impl Formatter for PillarFormatter<'_> {
    type Record = Pillar;

    fn sheet_name(&self) -> &'static str {
        "Pillars"
    }

    fn headings(&self) -> &'static [&'static str] {
        &[
            "Order",
            "Code",
            "Name",
            "Weight",
            "Color",
            "Description",
            "Total KPIs",
            "Completed KPIs",
            "Progress (%)",
        ]
    }

    fn row(&self, pillar: &Pillar) -> Vec<String> {
        let tally = self.lookup.pillar_tally(pillar.id);
        vec![
            pillar.order_index.to_string(),
            pillar.code.clone(),
            pillar.name.clone(),
            number(pillar.weight),
            pillar.color.clone(),
            or(pillar.description.as_deref(), NOT_AVAILABLE),
            tally.total.to_string(),
            tally.completed.to_string(),
            number(completion_ratio(tally.completed, tally.total)),
        ]
    }
}

/// Head `Not set`.
pub struct DepartmentFormatter<'a> {
    lookup: &'a Lookup,
}

impl<'a> DepartmentFormatter<'a> {
    pub fn new(lookup: &'a Lookup) -> Self {
        Self { lookup }
    }
}

impl Formatter for DepartmentFormatter<'_> {
    type Record = Department;

    fn sheet_name(&self) -> &'static str {
        "Departments"
    }

    fn headings(&self) -> &'static [&'static str] {
        &["Code", "Name", "Head", "Total KPIs", "Completed KPIs", "Progress (%)"]
    }

    fn row(&self, department: &Department) -> Vec<String> {
        let tally = self.lookup.department_tally(department.id);
        vec![
            department.code.clone(),
            department.name.clone(),
            or(department.head_id.and_then(|u| self.lookup.user(u)), NOT_SET),
            tally.total.to_string(),
            tally.completed.to_string(),
            number(completion_ratio(tally.completed, tally.total)),
        ]
    }
}

/// KPI `Unknown`, assignee `Unassigned`, completion date `N/A`. The overdue
/// column is evaluated at `now`.
pub struct MilestoneFormatter<'a> {
    lookup: &'a Lookup,
    now: DateTime<Utc>,
}

impl<'a> MilestoneFormatter<'a> {
    pub fn new(lookup: &'a Lookup, now: DateTime<Utc>) -> Self {
        Self { lookup, now }
    }
}

impl Formatter for MilestoneFormatter<'_> {
    type Record = Milestone;

    fn sheet_name(&self) -> &'static str {
        "Milestones"
    }

    fn headings(&self) -> &'static [&'static str] {
        &["KPI", "Title", "Due Date", "Status", "Assigned To", "Overdue", "Completed At"]
    }

    fn row(&self, m: &Milestone) -> Vec<String> {
        vec![
            or(self.lookup.kpi(m.kpi_id), UNKNOWN),
            m.title.clone(),
            date(m.due_date),
            m.status.label().to_string(),
            or(m.assigned_to.and_then(|u| self.lookup.user(u)), UNASSIGNED),
            yes_no(m.is_overdue(self.now)),
            timestamp_or(m.completed_at, NOT_AVAILABLE),
        ]
    }
}

/// Empty message `N/A`, unresolvable subject `Unknown`, acknowledgement
/// fields `N/A`.
pub struct AlertFormatter<'a> {
    lookup: &'a Lookup,
}

impl<'a> AlertFormatter<'a> {
    pub fn new(lookup: &'a Lookup) -> Self {
        Self { lookup }
    }
}

impl Formatter for AlertFormatter<'_> {
    type Record = Alert;

    fn sheet_name(&self) -> &'static str {
        "Alerts"
    }

    fn headings(&self) -> &'static [&'static str] {
        &[
            "Title",
            "Message",
            "Severity",
            "Related To",
            "Related Record",
            "Triggered At",
            "Read",
            "Acknowledged By",
            "Acknowledged At",
        ]
    }

    fn row(&self, alert: &Alert) -> Vec<String> {
        vec![
            alert.title.clone(),
            text_or(&alert.message, NOT_AVAILABLE),
            alert.severity.label().to_string(),
            subject_label(alert.subject.kind()).to_string(),
            or(self.lookup.subject(&alert.subject), UNKNOWN),
            timestamp(alert.triggered_at),
            yes_no(alert.is_read),
            or(alert.acknowledged_by.and_then(|u| self.lookup.user(u)), NOT_AVAILABLE),
            timestamp_or(alert.acknowledged_at, NOT_AVAILABLE),
        ]
    }
}

/// KPI `Unknown`; confidence and result-blob fields `N/A`; error `N/A`.
pub struct PredictionFormatter<'a> {
    lookup: &'a Lookup,
}

impl<'a> PredictionFormatter<'a> {
    pub fn new(lookup: &'a Lookup) -> Self {
        Self { lookup }
    }
}

impl Formatter for PredictionFormatter<'_> {
    type Record = Prediction;

    fn sheet_name(&self) -> &'static str {
        "Predictions"
    }

    fn headings(&self) -> &'static [&'static str] {
        &[
            "KPI",
            "Type",
            "Status",
            "Confidence (%)",
            "Risk Level",
            "Predicted Progress (%)",
            "Recommendation",
            "Error",
            "Created At",
        ]
    }

    fn row(&self, p: &Prediction) -> Vec<String> {
        vec![
            or(self.lookup.kpi(p.kpi_id), UNKNOWN),
            p.prediction_type.label().to_string(),
            p.status.as_str().to_string(),
            number_or(p.confidence_score.map(|c| c * 100.0), NOT_AVAILABLE),
            or(p.risk_level(), NOT_AVAILABLE),
            number_or(p.predicted_progress(), NOT_AVAILABLE),
            or(p.recommendation(), NOT_AVAILABLE),
            or(p.error_message.as_deref(), NOT_AVAILABLE),
            timestamp(p.created_at),
        ]
    }
}

/// KPI and submitter `Unknown`, notes `N/A`.
pub struct ReportFormatter<'a> {
    lookup: &'a Lookup,
}

impl<'a> ReportFormatter<'a> {
    pub fn new(lookup: &'a Lookup) -> Self {
        Self { lookup }
    }
}

impl Formatter for ReportFormatter<'_> {
    type Record = ProgressReport;

    fn sheet_name(&self) -> &'static str {
        "Progress Reports"
    }

    fn headings(&self) -> &'static [&'static str] {
        &["KPI", "Submitted By", "Progress (%)", "Notes", "Submitted At"]
    }

    fn row(&self, r: &ProgressReport) -> Vec<String> {
        vec![
            or(self.lookup.kpi(r.kpi_id), UNKNOWN),
            or(self.lookup.user(r.submitted_by), UNKNOWN),
            number(r.progress_percentage),
            or(r.notes.as_deref().filter(|n| !n.trim().is_empty()), NOT_AVAILABLE),
            timestamp(r.created_at),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;
    use serde_json::json;
    use stratboard_auth::Role;
    use stratboard_core::{KpiId, PillarId, UserId};
    use stratboard_strategy::{AlertSeverity, AlertSubject, KpiStatus, PredictionType, User};

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 2, 8, 15, 0).unwrap()
    }

    #[test]
    fn kpi_row_uses_placeholders_for_missing_fields() {
        let kpi = Kpi::new("K1", "Enrolment", PillarId::new()).with_status(KpiStatus::OnTrack);
        let lookup = Lookup::new();

        let row = KpiFormatter::new(&lookup).row(&kpi);
        assert_eq!(
            row,
            vec![
                "K1", "Enrolment", "Unknown", "N/A", "Unassigned", "On Track", "1", "0.00",
                "Not set", "Not set", "N/A", "Yes", "N/A",
            ]
        );
    }

    #[test]
    fn kpi_row_resolves_names() {
        let pillar = Pillar::new("Growth", "GRW", 1);
        let owner = User::new("Lee", "lee@example.org", Role::Staff);
        let kpi = Kpi::new("K1", "Enrolment", pillar.id)
            .with_owner(owner.id)
            .with_target(500.0, Some(420.0), Some("students"))
            .with_progress(84.0);

        let mut lookup = Lookup::new();
        lookup.add_pillars(&[pillar]);
        lookup.add_users(&[owner]);

        let row = KpiFormatter::new(&lookup).row(&kpi);
        assert_eq!(row[2], "Growth");
        assert_eq!(row[4], "Lee");
        assert_eq!(&row[7..11], &["84.00", "500.00", "420.00", "students"]);
    }

    #[test]
    fn pillar_row_reports_progress_from_tally() {
        let pillar = Pillar::new("Growth", "GRW", 2);
        let kpis = vec![
            Kpi::new("K1", "A", pillar.id).completed_at(at()),
            Kpi::new("K2", "B", pillar.id).completed_at(at()),
            Kpi::new("K3", "C", pillar.id),
        ];
        let mut lookup = Lookup::new();
        lookup.add_kpis(&kpis);

        let row = PillarFormatter::new(&lookup).row(&pillar);
        assert_eq!(&row[5..], &["N/A", "3", "2", "66.67"]);
    }

    #[test]
    fn department_head_defaults_to_not_set() {
        let lookup = Lookup::new();
        let row = DepartmentFormatter::new(&lookup).row(&Department::new("Finance", "FIN"));
        assert_eq!(row, vec!["FIN", "Finance", "Not set", "0", "0", "0.00"]);
    }

    #[test]
    fn milestone_row_marks_overdue() {
        let lookup = Lookup::new();
        let m = Milestone::new(KpiId::new(), "Survey", at().date_naive() - Duration::days(1));

        let row = MilestoneFormatter::new(&lookup, at()).row(&m);
        assert_eq!(row, vec!["Unknown", "Survey", "2026-04-01", "Pending", "Unassigned", "Yes", "N/A"]);
    }

    #[test]
    fn alert_row_resolves_subject_by_kind() {
        let pillar = Pillar::new("Growth", "GRW", 1);
        let reader = User::new("Ana", "ana@example.org", Role::Admin);
        let mut lookup = Lookup::new();
        lookup.add_pillars(std::slice::from_ref(&pillar));
        lookup.add_users(std::slice::from_ref(&reader));

        let alert = Alert::new("Slipping", AlertSeverity::Critical, AlertSubject::Pillar(pillar.id), at())
            .acknowledged(reader.id, at());
        let row = AlertFormatter::new(&lookup).row(&alert);
        assert_eq!(
            row,
            vec![
                "Slipping", "N/A", "Critical", "Pillar", "Growth", "2026-04-02 08:15", "Yes", "Ana",
                "2026-04-02 08:15",
            ]
        );
    }

    #[test]
    fn prediction_rows_read_the_result_blob() {
        let lookup = Lookup::new();
        let kpi = KpiId::new();
        let ok = Prediction::completed(
            kpi,
            PredictionType::RiskAssessment,
            0.82,
            json!({"risk_level": "high", "predicted_progress": 41.5, "recommendation": "Add staff"}),
            at(),
        );
        let failed = Prediction::failed(kpi, PredictionType::ProgressForecast, "inference service unavailable", at());

        let f = PredictionFormatter::new(&lookup);
        assert_eq!(&f.row(&ok)[2..8], &["completed", "82.00", "high", "41.50", "Add staff", "N/A"]);
        assert_eq!(&f.row(&failed)[2..8], &["failed", "N/A", "N/A", "N/A", "N/A", "inference service unavailable"]);
    }

    #[test]
    fn report_row_blank_notes_are_not_available() {
        let lookup = Lookup::new();
        let report = ProgressReport::new(KpiId::new(), UserId::new(), 55.0, at()).with_notes("  ");
        let row = ReportFormatter::new(&lookup).row(&report);
        assert_eq!(row, vec!["Unknown", "Unknown", "55.00", "N/A", "2026-04-02 08:15"]);
    }

    #[test]
    fn format_keeps_input_order() {
        let lookup = Lookup::new();
        let pillar = PillarId::new();
        let kpis = vec![
            Kpi::new("Z", "z", pillar),
            Kpi::new("A", "a", pillar),
            Kpi::new("M", "m", pillar),
        ];

        let sheet = KpiFormatter::new(&lookup).format(&kpis).unwrap();
        let codes: Vec<&str> = sheet.rows().iter().map(|r| r[0].as_str()).collect();
        assert_eq!(codes, vec!["Z", "A", "M"]);
    }

    proptest! {
        #[test]
        fn n_records_give_n_rows_of_heading_width(
            shapes in proptest::collection::vec((0.0f64..=100.0, any::<bool>(), any::<bool>()), 0..25)
        ) {
            let lookup = Lookup::new();
            let pillar = PillarId::new();
            let kpis: Vec<Kpi> = shapes
                .iter()
                .enumerate()
                .map(|(i, (progress, done, with_unit))| {
                    let mut k = Kpi::new(format!("K{i}"), "k, with comma", pillar).with_progress(*progress);
                    if *done { k = k.completed_at(at()); }
                    if *with_unit { k = k.with_target(10.0, None, Some("%")); }
                    k
                })
                .collect();

            let sheet = KpiFormatter::new(&lookup).format(&kpis).unwrap();
            prop_assert_eq!(sheet.rows().len(), kpis.len());
            prop_assert!(sheet.rows().iter().all(|r| r.len() == sheet.width()));

            let csv = sheet.to_csv().unwrap();
            let mut reader = csv::ReaderBuilder::new().has_headers(false).from_reader(csv.as_slice());
            let records: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>().unwrap();
            prop_assert_eq!(records.len(), kpis.len() + 1);
            prop_assert!(records.iter().all(|r| r.len() == sheet.width()));
        }

        #[test]
        fn alert_rows_match_heading_width(hours in proptest::collection::vec(0i64..1000, 0..25)) {
            let lookup = Lookup::new();
            let alerts: Vec<Alert> = hours
                .iter()
                .map(|h| Alert::new("a", AlertSeverity::Info, AlertSubject::Kpi(KpiId::new()), at() - Duration::hours(*h)))
                .collect();

            let sheet = AlertFormatter::new(&lookup).format(&alerts).unwrap();
            prop_assert_eq!(sheet.rows().len(), alerts.len());
            prop_assert!(sheet.rows().iter().all(|r| r.len() == sheet.headings().len()));
        }
    }
}
