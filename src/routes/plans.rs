use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Response,
};

use crate::{
    AppState,
    db::models::{ReviewRequest, SubmitRecordRequest},
    middleware::{PartialRefresh, auth::AuthUserInfo},
    routes::{respond, respond_list, respond_transition, with_conn},
    services::{RecordsService, RequestContext, WorkflowService},
    utils::AttachmentKind,
    validation::ValidatedJson,
    workflow::{ActionKind, WorkflowCommand},
};

pub async fn get_plans(
    State(state): State<AppState>,
    headers: HeaderMap,
    auth_info: AuthUserInfo,
) -> Response {
    let ctx = RequestContext::from(&auth_info);
    let result = with_conn(&state, |conn| {
        RecordsService::list_plans(conn, &ctx, &state.attachments)
    });
    respond_list(&headers, result, "Plans retrieved successfully")
}

pub async fn get_plan(
    State(state): State<AppState>,
    Path(plan_id): Path<i32>,
    _auth_info: AuthUserInfo,
) -> Response {
    let result = with_conn(&state, |conn| {
        RecordsService::plan_detail(conn, &state.attachments, plan_id)
    });
    respond(result, "Plan retrieved successfully")
}

pub async fn submit_plan(
    State(state): State<AppState>,
    Path(project_id): Path<i32>,
    partial: PartialRefresh,
    auth_info: AuthUserInfo,
    ValidatedJson(payload): ValidatedJson<SubmitRecordRequest>,
) -> Response {
    let ctx = RequestContext::from(&auth_info);
    let result = state
        .attachments
        .reference(AttachmentKind::Plan, payload.attachment.as_deref())
        .and_then(|attachment| {
            with_conn(&state, |conn| {
                WorkflowService::execute(
                    conn,
                    &ctx,
                    project_id,
                    WorkflowCommand::SubmitPlan {
                        description: payload.description,
                        attachment,
                    },
                )
            })
        });
    respond_transition(partial, ActionKind::SubmitPlan, result)
}

pub async fn review_plan(
    State(state): State<AppState>,
    Path(plan_id): Path<i32>,
    partial: PartialRefresh,
    auth_info: AuthUserInfo,
    ValidatedJson(payload): ValidatedJson<ReviewRequest>,
) -> Response {
    let ctx = RequestContext::from(&auth_info);
    let result = state
        .attachments
        .reference(AttachmentKind::Plan, payload.attachment.as_deref())
        .and_then(|attachment| {
            with_conn(&state, |conn| {
                WorkflowService::execute_on_record(
                    conn,
                    &ctx,
                    WorkflowCommand::ReviewPlan {
                        plan_id,
                        decision: payload.action,
                        manager_notes: payload.manager_notes,
                        attachment,
                    },
                )
            })
        });
    respond_transition(partial, ActionKind::ReviewPlan, result)
}
