use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};

use crate::{
    AppState,
    db::models::{AssignAuditorRequest, CreateProjectRequest},
    middleware::{PartialRefresh, auth::AuthUserInfo},
    routes::{respond, with_conn},
    services::{ProjectsService, RequestContext},
    validation::ValidatedJson,
};

pub async fn get_projects(State(state): State<AppState>, auth_info: AuthUserInfo) -> Response {
    let ctx = RequestContext::from(&auth_info);
    let result = with_conn(&state, |conn| ProjectsService::list(conn, &ctx));
    respond(result, "Projects retrieved successfully")
}

pub async fn create_project(
    State(state): State<AppState>,
    partial: PartialRefresh,
    auth_info: AuthUserInfo,
    ValidatedJson(payload): ValidatedJson<CreateProjectRequest>,
) -> Response {
    let ctx = RequestContext::from(&auth_info);
    let result = with_conn(&state, |conn| ProjectsService::create(conn, &ctx, &payload));
    partial.respond(StatusCode::CREATED, "Project created successfully!", result)
}

pub async fn get_project(
    State(state): State<AppState>,
    Path(project_id): Path<i32>,
    auth_info: AuthUserInfo,
) -> Response {
    let ctx = RequestContext::from(&auth_info);
    let result = with_conn(&state, |conn| {
        ProjectsService::detail(conn, &ctx, &state.attachments, project_id)
    });
    respond(result, "Project retrieved successfully")
}

pub async fn assign_auditor(
    State(state): State<AppState>,
    Path(project_id): Path<i32>,
    partial: PartialRefresh,
    auth_info: AuthUserInfo,
    ValidatedJson(payload): ValidatedJson<AssignAuditorRequest>,
) -> Response {
    let ctx = RequestContext::from(&auth_info);
    let result = with_conn(&state, |conn| {
        ProjectsService::assign_auditor(conn, &ctx, project_id, payload.auditor_id)
    });
    partial.respond(StatusCode::CREATED, "Auditor assigned successfully!", result)
}
