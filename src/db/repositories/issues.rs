use diesel::prelude::*;

use crate::db::enums::IssueStatus;
use crate::db::models::issue::{AuditIssue, NewAuditIssue, UpdateAuditIssue};

pub struct IssuesRepo;

impl IssuesRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_issue: &NewAuditIssue,
    ) -> Result<AuditIssue, diesel::result::Error> {
        diesel::insert_into(crate::schema::audit_issues::table)
            .values(new_issue)
            .returning(AuditIssue::as_returning())
            .get_result(conn)
    }

    pub fn update(
        conn: &mut PgConnection,
        issue_id: i32,
        changes: &UpdateAuditIssue,
    ) -> Result<AuditIssue, diesel::result::Error> {
        use crate::schema::audit_issues::dsl::*;
        diesel::update(audit_issues.filter(id.eq(issue_id)))
            .set(changes)
            .returning(AuditIssue::as_returning())
            .get_result(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        issue_id: i32,
    ) -> Result<Option<AuditIssue>, diesel::result::Error> {
        use crate::schema::audit_issues::dsl::*;
        audit_issues
            .filter(id.eq(issue_id))
            .select(AuditIssue::as_select())
            .first(conn)
            .optional()
    }

    pub fn list_for_project(
        conn: &mut PgConnection,
        target_project_id: i32,
    ) -> Result<Vec<AuditIssue>, diesel::result::Error> {
        use crate::schema::audit_issues::dsl::*;
        audit_issues
            .filter(project_id.eq(target_project_id))
            .order(id.asc())
            .select(AuditIssue::as_select())
            .load(conn)
    }

    pub fn list_all(conn: &mut PgConnection) -> Result<Vec<AuditIssue>, diesel::result::Error> {
        use crate::schema::audit_issues::dsl::*;
        audit_issues
            .order(created_at.desc())
            .select(AuditIssue::as_select())
            .load(conn)
    }

    pub fn list_for_projects(
        conn: &mut PgConnection,
        project_ids: &[i32],
    ) -> Result<Vec<AuditIssue>, diesel::result::Error> {
        use crate::schema::audit_issues::dsl::*;
        audit_issues
            .filter(project_id.eq_any(project_ids))
            .order(created_at.desc())
            .select(AuditIssue::as_select())
            .load(conn)
    }

    pub fn list_by_status(
        conn: &mut PgConnection,
        target_status: IssueStatus,
    ) -> Result<Vec<AuditIssue>, diesel::result::Error> {
        use crate::schema::audit_issues::dsl::*;
        audit_issues
            .filter(status.eq(target_status))
            .order(created_at.desc())
            .select(AuditIssue::as_select())
            .load(conn)
    }
}
