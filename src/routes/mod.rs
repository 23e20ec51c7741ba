pub mod auth;
pub mod dashboard;
pub mod directory;
pub mod issues;
pub mod plans;
pub mod projects;
pub mod reports;

use crate::{
    AppState, cache,
    db::models::api::{ApiResponse, ResponseMeta},
    error::AppError,
    middleware::{PartialRefresh, auth::auth_middleware, extract_request_id},
    services::workflow_service::TransitionOutcome,
    workflow::ActionKind,
};
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::from_fn_with_state,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use diesel::PgConnection;
use serde::Serialize;

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/health", get(health));

    let protected_routes = Router::new()
        .route("/auth/logout", post(auth::logout))
        .route("/auth/profile", get(auth::get_profile))
        .route("/dashboard", get(dashboard::get_dashboard))
        .route("/departments", get(directory::get_departments))
        .route("/auditors", get(directory::get_auditors))
        .route(
            "/projects",
            get(projects::get_projects).post(projects::create_project),
        )
        .route("/projects/:project_id", get(projects::get_project))
        .route(
            "/projects/:project_id/assignments",
            post(projects::assign_auditor),
        )
        .route("/projects/:project_id/plans", post(plans::submit_plan))
        .route("/projects/:project_id/issues", post(issues::submit_issue))
        .route("/projects/:project_id/reports", post(reports::submit_report))
        .route("/plans", get(plans::get_plans))
        .route("/plans/:plan_id", get(plans::get_plan))
        .route("/plans/:plan_id/review", post(plans::review_plan))
        .route("/issues", get(issues::get_issues))
        .route("/issues/:issue_id", get(issues::get_issue))
        .route("/issues/:issue_id/review", post(issues::review_issue))
        .route("/reports", get(reports::get_reports))
        .route("/reports/:report_id", get(reports::get_report))
        .route("/reports/:report_id/review", post(reports::review_report))
        .route(
            "/reports/:report_id/send-to-department",
            post(reports::send_to_department),
        )
        .route(
            "/reports/:report_id/department-review",
            post(reports::department_review),
        )
        .route(
            "/reports/:report_id/auditor-final-review",
            post(reports::auditor_final_review),
        )
        .route(
            "/reports/:report_id/final-manager-review",
            post(reports::final_manager_review),
        )
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}

/// Runs `f` on a pooled connection.
pub(crate) fn with_conn<T>(
    state: &AppState,
    f: impl FnOnce(&mut PgConnection) -> Result<T, AppError>,
) -> Result<T, AppError> {
    let mut conn = state.db.get()?;
    f(&mut conn)
}

/// Renders a read-only result as the JSON envelope.
pub(crate) fn respond<T: Serialize>(result: Result<T, AppError>, message: &str) -> Response {
    match result {
        Ok(data) => (StatusCode::OK, Json(ApiResponse::success(data, message))).into_response(),
        Err(err) => err.into_response(),
    }
}

/// Renders a list with its count and the request id in `meta`.
pub(crate) fn respond_list<T: Serialize>(
    headers: &HeaderMap,
    result: Result<Vec<T>, AppError>,
    message: &str,
) -> Response {
    match result {
        Ok(items) => {
            let meta = ResponseMeta {
                request_id: extract_request_id(headers),
                total_count: Some(items.len() as i64),
            };
            let response = ApiResponse::success_with_meta(items, message, meta);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

/// Renders a workflow transition. Submissions answer 201, the rest 200.
pub(crate) fn respond_transition(
    partial: PartialRefresh,
    action: ActionKind,
    result: Result<TransitionOutcome, AppError>,
) -> Response {
    let status = match action {
        ActionKind::SubmitPlan | ActionKind::SubmitIssue | ActionKind::SubmitReport => {
            StatusCode::CREATED
        }
        _ => StatusCode::OK,
    };
    partial.respond(status, action.acknowledgement(), result)
}

#[derive(Serialize)]
struct HealthStatus {
    database: bool,
    redis: bool,
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let database = state.db.get().is_ok();
    let redis = match cache::redis_health_check(&state.redis).await {
        Ok(ok) => ok,
        Err(e) => {
            tracing::warn!("Health check could not reach Redis: {}", e);
            false
        }
    };

    let status = HealthStatus { database, redis };
    if database && redis {
        (StatusCode::OK, Json(ApiResponse::success(status, "OK"))).into_response()
    } else {
        let mut response = ApiResponse::success(status, "Degraded");
        response.success = false;
        response.code = 503;
        (StatusCode::SERVICE_UNAVAILABLE, Json(response)).into_response()
    }
}
