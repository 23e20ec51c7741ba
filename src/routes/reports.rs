use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Response,
};

use crate::{
    AppState,
    db::models::{
        AuditorFinalReviewRequest, DepartmentReplyRequest, FinalManagerReviewRequest,
        ReviewRequest, SubmitRecordRequest,
    },
    error::AppError,
    middleware::{PartialRefresh, auth::AuthUserInfo},
    routes::{respond, respond_list, respond_transition, with_conn},
    services::{
        RecordsService, RequestContext, WorkflowService, workflow_service::TransitionOutcome,
    },
    utils::AttachmentKind,
    validation::ValidatedJson,
    workflow::{ActionKind, WorkflowCommand},
};

pub async fn get_reports(
    State(state): State<AppState>,
    headers: HeaderMap,
    auth_info: AuthUserInfo,
) -> Response {
    let ctx = RequestContext::from(&auth_info);
    let result = with_conn(&state, |conn| {
        RecordsService::list_reports(conn, &ctx, &state.attachments)
    });
    respond_list(&headers, result, "Reports retrieved successfully")
}

pub async fn get_report(
    State(state): State<AppState>,
    Path(report_id): Path<i32>,
    _auth_info: AuthUserInfo,
) -> Response {
    let result = with_conn(&state, |conn| {
        RecordsService::report_detail(conn, &state.attachments, report_id)
    });
    respond(result, "Report retrieved successfully")
}

pub async fn submit_report(
    State(state): State<AppState>,
    Path(project_id): Path<i32>,
    partial: PartialRefresh,
    auth_info: AuthUserInfo,
    ValidatedJson(payload): ValidatedJson<SubmitRecordRequest>,
) -> Response {
    let ctx = RequestContext::from(&auth_info);
    let result = state
        .attachments
        .reference(AttachmentKind::Report, payload.attachment.as_deref())
        .and_then(|attachment| {
            with_conn(&state, |conn| {
                WorkflowService::execute(
                    conn,
                    &ctx,
                    project_id,
                    WorkflowCommand::SubmitReport {
                        description: payload.description,
                        attachment,
                    },
                )
            })
        });
    respond_transition(partial, ActionKind::SubmitReport, result)
}

fn run_on_report(
    state: &AppState,
    auth_info: &AuthUserInfo,
    command: WorkflowCommand,
) -> Result<TransitionOutcome, AppError> {
    let ctx = RequestContext::from(auth_info);
    with_conn(state, |conn| {
        WorkflowService::execute_on_record(conn, &ctx, command)
    })
}

pub async fn review_report(
    State(state): State<AppState>,
    Path(report_id): Path<i32>,
    partial: PartialRefresh,
    auth_info: AuthUserInfo,
    ValidatedJson(payload): ValidatedJson<ReviewRequest>,
) -> Response {
    let result = state
        .attachments
        .reference(AttachmentKind::Report, payload.attachment.as_deref())
        .and_then(|attachment| {
            run_on_report(
                &state,
                &auth_info,
                WorkflowCommand::ReviewReport {
                    report_id,
                    decision: payload.action,
                    manager_notes: payload.manager_notes,
                    attachment,
                },
            )
        });
    respond_transition(partial, ActionKind::ReviewReport, result)
}

pub async fn send_to_department(
    State(state): State<AppState>,
    Path(report_id): Path<i32>,
    partial: PartialRefresh,
    auth_info: AuthUserInfo,
) -> Response {
    let result = run_on_report(
        &state,
        &auth_info,
        WorkflowCommand::SendToDepartment { report_id },
    );
    respond_transition(partial, ActionKind::SendToDepartment, result)
}

pub async fn department_review(
    State(state): State<AppState>,
    Path(report_id): Path<i32>,
    partial: PartialRefresh,
    auth_info: AuthUserInfo,
    ValidatedJson(payload): ValidatedJson<DepartmentReplyRequest>,
) -> Response {
    let result = state
        .attachments
        .reference(AttachmentKind::Report, payload.attachment.as_deref())
        .and_then(|attachment| {
            run_on_report(
                &state,
                &auth_info,
                WorkflowCommand::DepartmentReply {
                    report_id,
                    department_notes: payload.department_notes,
                    attachment,
                },
            )
        });
    respond_transition(partial, ActionKind::DepartmentReply, result)
}

pub async fn auditor_final_review(
    State(state): State<AppState>,
    Path(report_id): Path<i32>,
    partial: PartialRefresh,
    auth_info: AuthUserInfo,
    ValidatedJson(payload): ValidatedJson<AuditorFinalReviewRequest>,
) -> Response {
    let result = run_on_report(
        &state,
        &auth_info,
        WorkflowCommand::AuditorFinalReview {
            report_id,
            decision: payload.action,
            auditor_notes: payload.auditor_notes,
        },
    );
    respond_transition(partial, ActionKind::AuditorFinalReview, result)
}

pub async fn final_manager_review(
    State(state): State<AppState>,
    Path(report_id): Path<i32>,
    partial: PartialRefresh,
    auth_info: AuthUserInfo,
    ValidatedJson(payload): ValidatedJson<FinalManagerReviewRequest>,
) -> Response {
    let result = state
        .attachments
        .reference(AttachmentKind::FinalReport, payload.attachment.as_deref())
        .and_then(|attachment| {
            run_on_report(
                &state,
                &auth_info,
                WorkflowCommand::FinalManagerReview {
                    report_id,
                    decision: payload.action,
                    final_notes: payload.final_notes,
                    attachment,
                },
            )
        });
    respond_transition(partial, ActionKind::FinalManagerReview, result)
}
