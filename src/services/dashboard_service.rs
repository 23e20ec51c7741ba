use diesel::prelude::*;
use serde::Serialize;

use crate::{
    db::enums::{IssueStatus, PlanStatus, ReportStatus, Role},
    db::models::{AuditAssignment, AuditIssue, AuditPlan, AuditProject, AuditReport, Department},
    db::repositories::{
        AssignmentsRepo, DepartmentsRepo, IssuesRepo, PlansRepo, ProjectsRepo, ReportsRepo,
    },
    error::AppError,
    services::context::RequestContext,
};

/// Role-specific landing view.
#[derive(Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Dashboard {
    AuditManager {
        projects: Vec<AuditProject>,
        pending_plans: Vec<AuditPlan>,
        pending_issues: Vec<AuditIssue>,
        pending_reports: Vec<AuditReport>,
        reports_awaiting_dispatch: Vec<AuditReport>,
        reports_awaiting_final_review: Vec<AuditReport>,
    },
    Auditor {
        assignments: Vec<AuditAssignment>,
        projects: Vec<AuditProject>,
    },
    DepartmentManager {
        department: Option<Department>,
        pending_reports: Vec<AuditReport>,
    },
    Unassigned,
}

pub struct DashboardService;

impl DashboardService {
    pub fn for_user(conn: &mut PgConnection, ctx: &RequestContext) -> Result<Dashboard, AppError> {
        let dashboard = match ctx.actor.primary_role() {
            Some(Role::AuditManager) => Dashboard::AuditManager {
                projects: ProjectsRepo::list_all(conn)?,
                pending_plans: PlansRepo::list_by_status(conn, PlanStatus::Submitted)?,
                pending_issues: IssuesRepo::list_by_status(conn, IssueStatus::Submitted)?,
                pending_reports: ReportsRepo::list_by_status(conn, ReportStatus::Submitted)?,
                reports_awaiting_dispatch: ReportsRepo::list_by_status(
                    conn,
                    ReportStatus::ApprovedByManager,
                )?,
                reports_awaiting_final_review: ReportsRepo::list_by_status(
                    conn,
                    ReportStatus::AuditorApproved,
                )?,
            },
            Some(Role::Auditor) => {
                let assignments = AssignmentsRepo::list_for_auditor(conn, ctx.user_id())?;
                let ids: Vec<i32> = assignments.iter().map(|a| a.project_id).collect();
                Dashboard::Auditor {
                    projects: ProjectsRepo::list_by_ids(conn, &ids)?,
                    assignments,
                }
            }
            Some(Role::DepartmentManager) => {
                let department = DepartmentsRepo::find_managed_by(conn, ctx.user_id())?;
                let pending_reports = match &department {
                    Some(department) => ReportsRepo::list_for_department_by_status(
                        conn,
                        department.id,
                        ReportStatus::SentToDepartment,
                    )?,
                    None => Vec::new(),
                };
                Dashboard::DepartmentManager {
                    department,
                    pending_reports,
                }
            }
            None => Dashboard::Unassigned,
        };
        Ok(dashboard)
    }
}
