use chrono::Utc;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde::Serialize;

use crate::{
    db::enums::ProjectStatus,
    db::models::{AuditIssue, AuditPlan, AuditReport, FinalReport, api::error_codes},
    db::repositories::{
        AssignmentsRepo, DepartmentsRepo, FinalReportsRepo, IssuesRepo, PlansRepo, ProjectsRepo,
        ReportsRepo,
    },
    error::AppError,
    services::context::RequestContext,
    workflow::{self, ActionKind, Effect, ProjectSnapshot, Transition, WorkflowCommand},
};

/// The plan, issue or report a transition created or changed.
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "record", rename_all = "snake_case")]
pub enum WorkflowRecord {
    Plan(AuditPlan),
    Issue(AuditIssue),
    Report(AuditReport),
}

#[derive(Debug, Serialize)]
pub struct TransitionOutcome {
    pub project_id: i32,
    pub action: ActionKind,
    pub from_status: ProjectStatus,
    pub to_status: ProjectStatus,
    #[serde(flatten)]
    pub record: WorkflowRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_report: Option<FinalReport>,
}

pub struct WorkflowService;

impl WorkflowService {
    /// Loads everything the engine needs for one project. With `lock`, the
    /// project row is held until the surrounding transaction ends.
    pub fn load_snapshot(
        conn: &mut PgConnection,
        project_id: i32,
        lock: bool,
    ) -> Result<ProjectSnapshot, AppError> {
        let project = if lock {
            ProjectsRepo::find_by_id_for_update(conn, project_id)?
        } else {
            ProjectsRepo::find_by_id(conn, project_id)?
        }
        .ok_or_else(|| AppError::not_found(format!("Project {}", project_id)))?;

        let department = DepartmentsRepo::find_by_id(conn, project.department_id)?
            .ok_or_else(|| AppError::internal("Project department is missing"))?;
        let assigned_auditor_ids = AssignmentsRepo::list_for_project(conn, project_id)?
            .into_iter()
            .map(|assignment| assignment.auditor_id)
            .collect();

        Ok(ProjectSnapshot {
            department,
            assigned_auditor_ids,
            plans: PlansRepo::list_for_project(conn, project_id)?,
            issues: IssuesRepo::list_for_project(conn, project_id)?,
            reports: ReportsRepo::list_for_project(conn, project_id)?,
            final_report: FinalReportsRepo::find_for_project(conn, project_id)?,
            project,
        })
    }

    /// Runs a command addressed to a project: lock, decide, persist, all in
    /// one transaction.
    pub fn execute(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        project_id: i32,
        command: WorkflowCommand,
    ) -> Result<TransitionOutcome, AppError> {
        Self::ensure_role(ctx, command.kind())?;

        conn.transaction::<_, AppError, _>(|conn| {
            let snapshot = Self::load_snapshot(conn, project_id, true)?;
            let transition = workflow::apply(&snapshot, &ctx.actor, command, Utc::now())?;
            let outcome = Self::persist(conn, transition)?;

            tracing::info!(
                project_id = outcome.project_id,
                user_id = ctx.user_id(),
                action = %outcome.action,
                from = %outcome.from_status,
                to = %outcome.to_status,
                "Workflow transition applied"
            );
            Ok(outcome)
        })
    }

    /// Runs a command addressed to an existing plan, issue or report.
    pub fn execute_on_record(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        command: WorkflowCommand,
    ) -> Result<TransitionOutcome, AppError> {
        Self::ensure_role(ctx, command.kind())?;

        let project_id = match &command {
            WorkflowCommand::ReviewPlan { plan_id, .. } => PlansRepo::find_by_id(conn, *plan_id)?
                .map(|plan| plan.project_id)
                .ok_or_else(|| AppError::not_found(format!("Plan {}", plan_id)))?,
            WorkflowCommand::ReviewIssue { issue_id, .. } => {
                IssuesRepo::find_by_id(conn, *issue_id)?
                    .map(|issue| issue.project_id)
                    .ok_or_else(|| AppError::not_found(format!("Issue {}", issue_id)))?
            }
            _ => {
                let report_id = command
                    .target_id()
                    .ok_or_else(|| AppError::internal("Command has no target record"))?;
                ReportsRepo::find_by_id(conn, report_id)?
                    .map(|report| report.project_id)
                    .ok_or_else(|| AppError::not_found(format!("Report {}", report_id)))?
            }
        };

        Self::execute(conn, ctx, project_id, command)
    }

    /// Role check ahead of any lookup so that callers without the role
    /// never learn whether a record exists.
    fn ensure_role(ctx: &RequestContext, action: ActionKind) -> Result<(), AppError> {
        workflow::require_role(&ctx.actor, action).map_err(AppError::from)
    }

    fn persist(
        conn: &mut PgConnection,
        transition: Transition,
    ) -> Result<TransitionOutcome, AppError> {
        let mut record = None;
        let mut final_report = None;

        for effect in &transition.effects {
            match effect {
                Effect::InsertPlan(new_plan) => {
                    record = Some(WorkflowRecord::Plan(PlansRepo::insert(conn, new_plan)?));
                }
                Effect::UpdatePlan { plan_id, changes } => {
                    record = Some(WorkflowRecord::Plan(PlansRepo::update(conn, *plan_id, changes)?));
                }
                Effect::InsertIssue(new_issue) => {
                    record = Some(WorkflowRecord::Issue(IssuesRepo::insert(conn, new_issue)?));
                }
                Effect::UpdateIssue { issue_id, changes } => {
                    record = Some(WorkflowRecord::Issue(IssuesRepo::update(
                        conn, *issue_id, changes,
                    )?));
                }
                Effect::InsertReport(new_report) => {
                    record = Some(WorkflowRecord::Report(ReportsRepo::insert(conn, new_report)?));
                }
                Effect::UpdateReport { report_id, changes } => {
                    record = Some(WorkflowRecord::Report(ReportsRepo::update(
                        conn, *report_id, changes,
                    )?));
                }
                Effect::InsertFinalReport(new_final_report) => {
                    let inserted = FinalReportsRepo::insert(conn, new_final_report).map_err(
                        |err| match err {
                            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                                AppError::conflict_with_code(
                                    "Project already has a final report",
                                    None,
                                    error_codes::PROJECT_ALREADY_FINALIZED,
                                )
                            }
                            other => AppError::Database(other),
                        },
                    )?;
                    final_report = Some(inserted);
                }
            }
        }

        if transition.changes_project_status() {
            ProjectsRepo::update_status(conn, transition.project_id, transition.to)?;
        }

        let record = record.ok_or_else(|| AppError::internal("Transition changed no record"))?;
        Ok(TransitionOutcome {
            project_id: transition.project_id,
            action: transition.action,
            from_status: transition.from,
            to_status: transition.to,
            record,
            final_report,
        })
    }
}
