//! Route table.
//!
//! `/whoami`, `/roles` and `/dashboard` only need an authenticated principal;
//! every other protected route declares the roles it admits.

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};

use stratboard_auth::Role;

use crate::middleware::{RequiredRoles, require_authenticated, require_roles};

pub mod dashboard;
pub mod exports;
pub mod predictions;
pub mod system;

const PLANNERS: &[Role] = &[Role::Admin, Role::StrategyTeam];
const DEPARTMENT_REVIEWERS: &[Role] = &[Role::Admin, Role::StrategyTeam, Role::Hod];
const KPI_EXPORTERS: &[Role] = &[Role::Admin, Role::StrategyTeam, Role::DataAnalyst];
const ADMINS: &[Role] = &[Role::Admin];
const PREDICTION_READERS: &[Role] = &[Role::Admin, Role::DataAnalyst];
const REPORT_READERS: &[Role] = &[Role::Admin, Role::Hod];

fn guarded(router: Router, roles: &'static [Role]) -> Router {
    router.route_layer(from_fn_with_state(RequiredRoles(roles), require_roles))
}

/// Router for every endpoint behind the auth middleware.
pub fn router() -> Router {
    let authenticated = Router::new()
        .route("/whoami", get(system::whoami))
        .route("/roles", get(system::roles))
        .route("/dashboard", get(dashboard::dashboard))
        .route_layer(from_fn(require_authenticated));

    let planners = Router::new()
        .route("/pillars/:id/progress", get(dashboard::pillar_progress))
        .route("/exports/milestones.csv", get(exports::milestones))
        .route("/exports/strategy-report", get(exports::strategy_report))
        .route("/predictions/kpis/:id", post(predictions::run));

    Router::new()
        .merge(authenticated)
        .merge(guarded(planners, PLANNERS))
        .merge(guarded(
            Router::new().route("/departments/:id/progress", get(dashboard::department_progress)),
            DEPARTMENT_REVIEWERS,
        ))
        .merge(guarded(
            Router::new().route("/exports/kpis.csv", get(exports::kpis)),
            KPI_EXPORTERS,
        ))
        .merge(guarded(
            Router::new().route("/exports/alerts.csv", get(exports::alerts)),
            ADMINS,
        ))
        .merge(guarded(
            Router::new().route("/exports/predictions.csv", get(exports::predictions)),
            PREDICTION_READERS,
        ))
        .merge(guarded(
            Router::new().route("/exports/reports.csv", get(exports::progress_reports)),
            REPORT_READERS,
        ))
}
