use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::{
    db::enums::{ProjectStatus, Role},
    db::models::{
        AuditAssignment, AuditProject, CreateProjectRequest, NewAuditAssignment, NewAuditProject,
        ProjectDetail, ProjectListResponse, UserBasicInfo, api::error_codes,
    },
    db::repositories::{AssignmentsRepo, AuthRepo, DepartmentsRepo, ProjectsRepo},
    error::AppError,
    services::{context::RequestContext, workflow_service::WorkflowService},
    utils::AttachmentStore,
    validation::project::validate_create_project,
    workflow,
};

pub struct ProjectsService;

impl ProjectsService {
    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: &CreateProjectRequest,
    ) -> Result<AuditProject, AppError> {
        Self::ensure_manager(ctx, "create projects")?;
        validate_create_project(&req.title, &req.auditor_ids)?;

        DepartmentsRepo::find_by_id(conn, req.department_id)?
            .ok_or_else(|| AppError::not_found(format!("Department {}", req.department_id)))?;
        for auditor_id in &req.auditor_ids {
            Self::ensure_auditor(conn, *auditor_id)?;
        }

        conn.transaction::<_, AppError, _>(|conn| {
            let project = ProjectsRepo::insert(
                conn,
                &NewAuditProject {
                    title: req.title.trim().to_string(),
                    description: req.description.clone(),
                    department_id: req.department_id,
                    created_by: Some(ctx.user_id()),
                    status: ProjectStatus::Created,
                    manager_notes: req.manager_notes.clone(),
                },
            )?;

            for auditor_id in &req.auditor_ids {
                AssignmentsRepo::insert(
                    conn,
                    &NewAuditAssignment {
                        project_id: project.id,
                        auditor_id: *auditor_id,
                        assigned_by: Some(ctx.user_id()),
                    },
                )?;
            }

            tracing::info!(
                project_id = project.id,
                department_id = project.department_id,
                auditors = req.auditor_ids.len(),
                "Audit project created"
            );
            Ok(project)
        })
    }

    pub fn assign_auditor(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        project_id: i32,
        auditor_id: i32,
    ) -> Result<AuditAssignment, AppError> {
        Self::ensure_manager(ctx, "assign auditors")?;

        ProjectsRepo::find_by_id(conn, project_id)?
            .ok_or_else(|| AppError::not_found(format!("Project {}", project_id)))?;
        Self::ensure_auditor(conn, auditor_id)?;

        let already_assigned = || {
            AppError::conflict_with_code(
                "Auditor is already assigned to this project",
                Some("auditor_id".to_string()),
                error_codes::PROJECT_AUDITOR_ALREADY_ASSIGNED,
            )
        };
        if AssignmentsRepo::exists(conn, project_id, auditor_id)? {
            return Err(already_assigned());
        }

        AssignmentsRepo::insert(
            conn,
            &NewAuditAssignment {
                project_id,
                auditor_id,
                assigned_by: Some(ctx.user_id()),
            },
        )
        .map_err(|err| match err {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => already_assigned(),
            other => AppError::Database(other),
        })
    }

    /// Projects visible to the caller, newest first.
    pub fn list(
        conn: &mut PgConnection,
        ctx: &RequestContext,
    ) -> Result<ProjectListResponse, AppError> {
        let projects = match ctx.actor.primary_role() {
            Some(Role::AuditManager) => ProjectsRepo::list_all(conn)?,
            Some(Role::Auditor) => {
                let ids = AssignmentsRepo::project_ids_for_auditor(conn, ctx.user_id())?;
                ProjectsRepo::list_by_ids(conn, &ids)?
            }
            Some(Role::DepartmentManager) => {
                match DepartmentsRepo::find_managed_by(conn, ctx.user_id())? {
                    Some(department) => ProjectsRepo::list_for_department(conn, department.id)?,
                    None => Vec::new(),
                }
            }
            None => Vec::new(),
        };

        Ok(ProjectListResponse {
            total_count: projects.len() as i64,
            projects,
        })
    }

    pub fn detail(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        attachments: &AttachmentStore,
        project_id: i32,
    ) -> Result<ProjectDetail, AppError> {
        let snapshot = WorkflowService::load_snapshot(conn, project_id, false)?;
        let allowed_actions = workflow::allowed_actions(&snapshot, &ctx.actor);
        let is_assigned_auditor = snapshot.is_assigned(ctx.user_id());

        let assignments = AssignmentsRepo::list_for_project(conn, project_id)?;
        let auditors = AuthRepo::find_by_ids(conn, &snapshot.assigned_auditor_ids)?
            .into_iter()
            .map(UserBasicInfo::from)
            .collect();

        Ok(ProjectDetail {
            status_label: snapshot.project.status.label(),
            project: snapshot.project,
            department: snapshot.department,
            auditors,
            assignments,
            plans: attachments.summarize_all(snapshot.plans),
            issues: attachments.summarize_all(snapshot.issues),
            reports: attachments.summarize_all(snapshot.reports),
            final_report: snapshot
                .final_report
                .map(|final_report| attachments.summarize(final_report)),
            is_assigned_auditor,
            allowed_actions,
        })
    }

    fn ensure_manager(ctx: &RequestContext, what: &str) -> Result<(), AppError> {
        if ctx.actor.is_audit_manager() {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "Only {} can {}.",
                Role::AuditManager.group_name(),
                what
            )))
        }
    }

    fn ensure_auditor(conn: &mut PgConnection, user_id: i32) -> Result<(), AppError> {
        if AuthRepo::user_has_role(conn, user_id, Role::Auditor)? {
            Ok(())
        } else {
            Err(AppError::validation(format!(
                "User {} is not an auditor",
                user_id
            )))
        }
    }
}
