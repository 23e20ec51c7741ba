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

pub async fn get_issues(
    State(state): State<AppState>,
    headers: HeaderMap,
    auth_info: AuthUserInfo,
) -> Response {
    let ctx = RequestContext::from(&auth_info);
    let result = with_conn(&state, |conn| {
        RecordsService::list_issues(conn, &ctx, &state.attachments)
    });
    respond_list(&headers, result, "Issues retrieved successfully")
}

pub async fn get_issue(
    State(state): State<AppState>,
    Path(issue_id): Path<i32>,
    _auth_info: AuthUserInfo,
) -> Response {
    let result = with_conn(&state, |conn| {
        RecordsService::issue_detail(conn, &state.attachments, issue_id)
    });
    respond(result, "Issue retrieved successfully")
}

pub async fn submit_issue(
    State(state): State<AppState>,
    Path(project_id): Path<i32>,
    partial: PartialRefresh,
    auth_info: AuthUserInfo,
    ValidatedJson(payload): ValidatedJson<SubmitRecordRequest>,
) -> Response {
    let ctx = RequestContext::from(&auth_info);
    let result = state
        .attachments
        .reference(AttachmentKind::Issue, payload.attachment.as_deref())
        .and_then(|attachment| {
            with_conn(&state, |conn| {
                WorkflowService::execute(
                    conn,
                    &ctx,
                    project_id,
                    WorkflowCommand::SubmitIssue {
                        description: payload.description,
                        attachment,
                    },
                )
            })
        });
    respond_transition(partial, ActionKind::SubmitIssue, result)
}

pub async fn review_issue(
    State(state): State<AppState>,
    Path(issue_id): Path<i32>,
    partial: PartialRefresh,
    auth_info: AuthUserInfo,
    ValidatedJson(payload): ValidatedJson<ReviewRequest>,
) -> Response {
    let ctx = RequestContext::from(&auth_info);
    let result = state
        .attachments
        .reference(AttachmentKind::Issue, payload.attachment.as_deref())
        .and_then(|attachment| {
            with_conn(&state, |conn| {
                WorkflowService::execute_on_record(
                    conn,
                    &ctx,
                    WorkflowCommand::ReviewIssue {
                        issue_id,
                        decision: payload.action,
                        manager_notes: payload.manager_notes,
                        attachment,
                    },
                )
            })
        });
    respond_transition(partial, ActionKind::ReviewIssue, result)
}
