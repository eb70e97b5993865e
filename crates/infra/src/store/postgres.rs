//! Postgres-backed strategy store.
//!
//! Queries are built at runtime (`sqlx::query` / `QueryBuilder`), so the crate
//! builds without a live database. Every table carries a `seq BIGSERIAL`
//! column; `ORDER BY seq` is the store order that callers use to break ties.
//!
//! Enum-valued columns are stored as their snake_case wire names.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::{Postgres, QueryBuilder, Row};
use tracing::instrument;
use uuid::Uuid;

use stratboard_ai::{PredictionSink, SinkError};
use stratboard_core::{DepartmentId, KpiId, PillarId};
use stratboard_strategy::{
    Alert, AlertSubject, Department, Kpi, Milestone, Pillar, Prediction, ProgressReport, User,
};

use super::{
    AlertFilter, KpiFilter, MilestoneFilter, PredictionFilter, ReportFilter, StoreError,
    StoreResult, StrategyStore, UserFilter,
};

/// Schema migrations for [`PostgresStrategyStore`].
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Postgres-backed strategy store.
///
/// Uses the SQLx connection pool, which is `Send + Sync`; the store itself
/// holds no other state.
#[derive(Clone)]
pub struct PostgresStrategyStore {
    pool: Arc<PgPool>,
}

impl PostgresStrategyStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Connect and bring the schema up to date.
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = PgPool::connect(database_url).await?;
        MIGRATOR
            .run(&pool)
            .await
            .map_err(|e| StoreError::Database(e.into()))?;
        Ok(Self::new(pool))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Row decoding
// ─────────────────────────────────────────────────────────────────────────────

fn wire_enum<T: DeserializeOwned>(row: &PgRow, column: &'static str) -> StoreResult<T> {
    let raw: String = row.try_get(column)?;
    serde_json::from_value(serde_json::Value::String(raw.clone()))
        .map_err(|_| StoreError::decode(column, format!("unknown value '{raw}'")))
}

fn kpi_from_row(row: &PgRow) -> StoreResult<Kpi> {
    let priority: i16 = row.try_get("priority")?;
    Ok(Kpi {
        id: KpiId::from_uuid(row.try_get("id")?),
        code: row.try_get("code")?,
        name: row.try_get("name")?,
        pillar_id: PillarId::from_uuid(row.try_get("pillar_id")?),
        department_id: row
            .try_get::<Option<Uuid>, _>("department_id")?
            .map(DepartmentId::from_uuid),
        owner_id: row
            .try_get::<Option<Uuid>, _>("owner_id")?
            .map(Into::into),
        status: wire_enum(row, "status")?,
        priority: u8::try_from(priority)
            .map_err(|_| StoreError::decode("priority", format!("{priority} out of range")))?,
        progress_percentage: row.try_get("progress_percentage")?,
        target_value: row.try_get("target_value")?,
        current_value: row.try_get("current_value")?,
        unit: row.try_get("unit")?,
        is_active: row.try_get("is_active")?,
        completed_at: row.try_get("completed_at")?,
        created_at: row.try_get("created_at")?,
    })
}

fn pillar_from_row(row: &PgRow) -> StoreResult<Pillar> {
    Ok(Pillar {
        id: PillarId::from_uuid(row.try_get("id")?),
        name: row.try_get("name")?,
        code: row.try_get("code")?,
        color: row.try_get("color")?,
        weight: row.try_get("weight")?,
        order_index: row.try_get("order_index")?,
        description: row.try_get("description")?,
    })
}

fn department_from_row(row: &PgRow) -> StoreResult<Department> {
    Ok(Department {
        id: DepartmentId::from_uuid(row.try_get("id")?),
        name: row.try_get("name")?,
        code: row.try_get("code")?,
        head_id: row.try_get::<Option<Uuid>, _>("head_id")?.map(Into::into),
    })
}

fn milestone_from_row(row: &PgRow) -> StoreResult<Milestone> {
    Ok(Milestone {
        id: row.try_get::<Uuid, _>("id")?.into(),
        kpi_id: KpiId::from_uuid(row.try_get("kpi_id")?),
        title: row.try_get("title")?,
        due_date: row.try_get("due_date")?,
        status: wire_enum(row, "status")?,
        assigned_to: row.try_get::<Option<Uuid>, _>("assigned_to")?.map(Into::into),
        completed_at: row.try_get("completed_at")?,
    })
}

fn alert_from_row(row: &PgRow) -> StoreResult<Alert> {
    let kind: String = row.try_get("subject_kind")?;
    let subject_id: Uuid = row.try_get("subject_id")?;
    let subject = match kind.as_str() {
        "kpi" => AlertSubject::Kpi(subject_id.into()),
        "milestone" => AlertSubject::Milestone(subject_id.into()),
        "pillar" => AlertSubject::Pillar(subject_id.into()),
        "department" => AlertSubject::Department(subject_id.into()),
        other => {
            return Err(StoreError::decode(
                "subject_kind",
                format!("unknown alertable kind '{other}'"),
            ));
        }
    };

    Ok(Alert {
        id: row.try_get::<Uuid, _>("id")?.into(),
        title: row.try_get("title")?,
        message: row.try_get("message")?,
        severity: wire_enum(row, "severity")?,
        subject,
        triggered_at: row.try_get("triggered_at")?,
        is_read: row.try_get("is_read")?,
        acknowledged_by: row.try_get::<Option<Uuid>, _>("acknowledged_by")?.map(Into::into),
        acknowledged_at: row.try_get("acknowledged_at")?,
    })
}

fn report_from_row(row: &PgRow) -> StoreResult<ProgressReport> {
    Ok(ProgressReport {
        id: row.try_get::<Uuid, _>("id")?.into(),
        kpi_id: KpiId::from_uuid(row.try_get("kpi_id")?),
        submitted_by: row.try_get::<Uuid, _>("submitted_by")?.into(),
        progress_percentage: row.try_get("progress_percentage")?,
        notes: row.try_get("notes")?,
        created_at: row.try_get("created_at")?,
    })
}

fn prediction_from_row(row: &PgRow) -> StoreResult<Prediction> {
    Ok(Prediction {
        id: row.try_get::<Uuid, _>("id")?.into(),
        kpi_id: KpiId::from_uuid(row.try_get("kpi_id")?),
        prediction_type: wire_enum(row, "prediction_type")?,
        confidence_score: row.try_get("confidence_score")?,
        status: wire_enum(row, "status")?,
        result: row.try_get("result")?,
        error_message: row.try_get("error_message")?,
        created_at: row.try_get("created_at")?,
    })
}

fn user_from_row(row: &PgRow) -> StoreResult<User> {
    Ok(User {
        id: row.try_get::<Uuid, _>("id")?.into(),
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        role: wire_enum(row, "role")?,
        department_id: row
            .try_get::<Option<Uuid>, _>("department_id")?
            .map(DepartmentId::from_uuid),
    })
}

fn decode_all<T>(rows: Vec<PgRow>, f: fn(&PgRow) -> StoreResult<T>) -> StoreResult<Vec<T>> {
    rows.iter().map(f).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Query building
// ─────────────────────────────────────────────────────────────────────────────

/// Appends ` WHERE` before the first condition and ` AND` before the rest.
struct Conditions<'q, 'a> {
    qb: &'a mut QueryBuilder<'q, Postgres>,
    any: bool,
}

impl<'q, 'a> Conditions<'q, 'a> {
    fn new(qb: &'a mut QueryBuilder<'q, Postgres>) -> Self {
        Self { qb, any: false }
    }

    fn next(&mut self) -> &mut QueryBuilder<'q, Postgres> {
        self.qb.push(if self.any { " AND " } else { " WHERE " });
        self.any = true;
        &mut *self.qb
    }
}

#[async_trait]
impl PredictionSink for PostgresStrategyStore {
    #[instrument(skip(self, prediction), fields(kpi_id = %prediction.kpi_id))]
    async fn record(&self, prediction: &Prediction) -> Result<(), SinkError> {
        sqlx::query(
            r#"
            INSERT INTO predictions (
                id, kpi_id, prediction_type, confidence_score, status, result, error_message, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(prediction.id.as_uuid())
        .bind(prediction.kpi_id.as_uuid())
        .bind(prediction.prediction_type.as_str())
        .bind(prediction.confidence_score)
        .bind(prediction.status.as_str())
        .bind(&prediction.result)
        .bind(&prediction.error_message)
        .bind(prediction.created_at)
        .execute(&*self.pool)
        .await
        .map_err(|e| SinkError(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl StrategyStore for PostgresStrategyStore {
    #[instrument(skip(self))]
    async fn kpis(&self, filter: &KpiFilter) -> StoreResult<Vec<Kpi>> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM kpis");
        {
            let mut c = Conditions::new(&mut qb);
            if let Some(id) = filter.pillar_id {
                c.next().push("pillar_id = ").push_bind(*id.as_uuid());
            }
            if let Some(id) = filter.department_id {
                c.next().push("department_id = ").push_bind(*id.as_uuid());
            }
            if let Some(status) = filter.status {
                c.next().push("status = ").push_bind(status.as_str());
            }
            if let Some(priority) = filter.priority {
                c.next().push("priority = ").push_bind(i16::from(priority));
            }
            if filter.active_only {
                c.next().push("is_active");
            }
        }
        qb.push(" ORDER BY seq");

        let rows = qb.build().fetch_all(&*self.pool).await?;
        decode_all(rows, kpi_from_row)
    }

    #[instrument(skip(self))]
    async fn kpi(&self, id: KpiId) -> StoreResult<Option<Kpi>> {
        let row = sqlx::query("SELECT * FROM kpis WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&*self.pool)
            .await?;
        row.as_ref().map(kpi_from_row).transpose()
    }

    #[instrument(skip(self))]
    async fn pillars(&self) -> StoreResult<Vec<Pillar>> {
        let rows = sqlx::query("SELECT * FROM pillars ORDER BY order_index, seq")
            .fetch_all(&*self.pool)
            .await?;
        decode_all(rows, pillar_from_row)
    }

    #[instrument(skip(self))]
    async fn pillar(&self, id: PillarId) -> StoreResult<Option<Pillar>> {
        let row = sqlx::query("SELECT * FROM pillars WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&*self.pool)
            .await?;
        row.as_ref().map(pillar_from_row).transpose()
    }

    #[instrument(skip(self))]
    async fn departments(&self) -> StoreResult<Vec<Department>> {
        let rows = sqlx::query("SELECT * FROM departments ORDER BY seq")
            .fetch_all(&*self.pool)
            .await?;
        decode_all(rows, department_from_row)
    }

    #[instrument(skip(self))]
    async fn department(&self, id: DepartmentId) -> StoreResult<Option<Department>> {
        let row = sqlx::query("SELECT * FROM departments WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&*self.pool)
            .await?;
        row.as_ref().map(department_from_row).transpose()
    }

    #[instrument(skip(self))]
    async fn milestones(&self, filter: &MilestoneFilter) -> StoreResult<Vec<Milestone>> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM milestones");
        {
            let mut c = Conditions::new(&mut qb);
            if let Some(ids) = &filter.kpi_ids {
                let ids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
                c.next().push("kpi_id = ANY(").push_bind(ids).push(")");
            }
            if let Some(user) = filter.assigned_to {
                c.next().push("assigned_to = ").push_bind(*user.as_uuid());
            }
            if filter.incomplete_only {
                c.next().push("status <> 'completed'");
            }
            if let Some(from) = filter.due_from {
                c.next().push("due_date >= ").push_bind(from);
            }
            if let Some(to) = filter.due_to {
                c.next().push("due_date <= ").push_bind(to);
            }
        }
        qb.push(" ORDER BY seq");

        let rows = qb.build().fetch_all(&*self.pool).await?;
        decode_all(rows, milestone_from_row)
    }

    #[instrument(skip(self))]
    async fn alerts(&self, filter: &AlertFilter) -> StoreResult<Vec<Alert>> {
        let sql = if filter.unread_only {
            "SELECT * FROM alerts WHERE NOT is_read ORDER BY seq"
        } else {
            "SELECT * FROM alerts ORDER BY seq"
        };
        let rows = sqlx::query(sql).fetch_all(&*self.pool).await?;
        decode_all(rows, alert_from_row)
    }

    #[instrument(skip(self))]
    async fn progress_reports(&self, filter: &ReportFilter) -> StoreResult<Vec<ProgressReport>> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM progress_reports");
        {
            let mut c = Conditions::new(&mut qb);
            if let Some(user) = filter.submitted_by {
                c.next().push("submitted_by = ").push_bind(*user.as_uuid());
            }
            if let Some(kpi) = filter.kpi_id {
                c.next().push("kpi_id = ").push_bind(*kpi.as_uuid());
            }
        }
        qb.push(" ORDER BY seq");

        let rows = qb.build().fetch_all(&*self.pool).await?;
        decode_all(rows, report_from_row)
    }

    #[instrument(skip(self))]
    async fn predictions(&self, filter: &PredictionFilter) -> StoreResult<Vec<Prediction>> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM predictions");
        if let Some(kpi) = filter.kpi_id {
            qb.push(" WHERE kpi_id = ").push_bind(*kpi.as_uuid());
        }
        qb.push(" ORDER BY seq");

        let rows = qb.build().fetch_all(&*self.pool).await?;
        decode_all(rows, prediction_from_row)
    }

    #[instrument(skip(self))]
    async fn users(&self, filter: &UserFilter) -> StoreResult<Vec<User>> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM users");
        if let Some(dept) = filter.department_id {
            qb.push(" WHERE department_id = ").push_bind(*dept.as_uuid());
        }
        qb.push(" ORDER BY seq");

        let rows = qb.build().fetch_all(&*self.pool).await?;
        decode_all(rows, user_from_row)
    }
}
