use diesel::prelude::*;

use crate::{
    db::enums::Role,
    db::models::{AuditIssue, AuditPlan, AuditReport, HasAttachment, RecordDetail, RecordSummary},
    db::repositories::{
        AssignmentsRepo, DepartmentsRepo, IssuesRepo, PlansRepo, ProjectsRepo, ReportsRepo,
    },
    error::AppError,
    services::context::RequestContext,
    utils::AttachmentStore,
};

pub struct RecordsService;

impl RecordsService {
    /// Plans visible to the caller: every plan for managers, assigned
    /// projects' plans for auditors, nothing for anyone else.
    pub fn list_plans(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        attachments: &AttachmentStore,
    ) -> Result<Vec<RecordSummary<AuditPlan>>, AppError> {
        let plans = match ctx.actor.primary_role() {
            Some(Role::AuditManager) => PlansRepo::list_all(conn)?,
            Some(Role::Auditor) => {
                let ids = AssignmentsRepo::project_ids_for_auditor(conn, ctx.user_id())?;
                PlansRepo::list_for_projects(conn, &ids)?
            }
            _ => Vec::new(),
        };
        Ok(attachments.summarize_all(plans))
    }

    pub fn list_issues(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        attachments: &AttachmentStore,
    ) -> Result<Vec<RecordSummary<AuditIssue>>, AppError> {
        let issues = match ctx.actor.primary_role() {
            Some(Role::AuditManager) => IssuesRepo::list_all(conn)?,
            Some(Role::Auditor) => {
                let ids = AssignmentsRepo::project_ids_for_auditor(conn, ctx.user_id())?;
                IssuesRepo::list_for_projects(conn, &ids)?
            }
            _ => Vec::new(),
        };
        Ok(attachments.summarize_all(issues))
    }

    /// Reports are also visible to the manager of the reported department.
    pub fn list_reports(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        attachments: &AttachmentStore,
    ) -> Result<Vec<RecordSummary<AuditReport>>, AppError> {
        let reports = match ctx.actor.primary_role() {
            Some(Role::AuditManager) => ReportsRepo::list_all(conn)?,
            Some(Role::Auditor) => {
                let ids = AssignmentsRepo::project_ids_for_auditor(conn, ctx.user_id())?;
                ReportsRepo::list_for_projects(conn, &ids)?
            }
            Some(Role::DepartmentManager) => {
                match DepartmentsRepo::find_managed_by(conn, ctx.user_id())? {
                    Some(department) => {
                        let ids: Vec<i32> = ProjectsRepo::list_for_department(conn, department.id)?
                            .into_iter()
                            .map(|project| project.id)
                            .collect();
                        ReportsRepo::list_for_projects(conn, &ids)?
                    }
                    None => Vec::new(),
                }
            }
            None => Vec::new(),
        };
        Ok(attachments.summarize_all(reports))
    }

    pub fn plan_detail(
        conn: &mut PgConnection,
        attachments: &AttachmentStore,
        plan_id: i32,
    ) -> Result<RecordDetail<AuditPlan>, AppError> {
        let plan = PlansRepo::find_by_id(conn, plan_id)?
            .ok_or_else(|| AppError::not_found(format!("Plan {}", plan_id)))?;
        let project_id = plan.project_id;
        Self::detail(conn, attachments, plan, project_id)
    }

    pub fn issue_detail(
        conn: &mut PgConnection,
        attachments: &AttachmentStore,
        issue_id: i32,
    ) -> Result<RecordDetail<AuditIssue>, AppError> {
        let issue = IssuesRepo::find_by_id(conn, issue_id)?
            .ok_or_else(|| AppError::not_found(format!("Issue {}", issue_id)))?;
        let project_id = issue.project_id;
        Self::detail(conn, attachments, issue, project_id)
    }

    pub fn report_detail(
        conn: &mut PgConnection,
        attachments: &AttachmentStore,
        report_id: i32,
    ) -> Result<RecordDetail<AuditReport>, AppError> {
        let report = ReportsRepo::find_by_id(conn, report_id)?
            .ok_or_else(|| AppError::not_found(format!("Report {}", report_id)))?;
        let project_id = report.project_id;
        Self::detail(conn, attachments, report, project_id)
    }

    fn detail<T: HasAttachment>(
        conn: &mut PgConnection,
        attachments: &AttachmentStore,
        record: T,
        project_id: i32,
    ) -> Result<RecordDetail<T>, AppError> {
        let project = ProjectsRepo::find_by_id(conn, project_id)?
            .ok_or_else(|| AppError::internal("Record belongs to a missing project"))?;
        let attachment_url = attachments.url_for(record.attachment());
        Ok(RecordDetail {
            record,
            project,
            attachment_url,
        })
    }
}
