use diesel::prelude::*;

use crate::db::enums::ReportStatus;
use crate::db::models::report::{AuditReport, NewAuditReport, UpdateAuditReport};

pub struct ReportsRepo;

impl ReportsRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_report: &NewAuditReport,
    ) -> Result<AuditReport, diesel::result::Error> {
        diesel::insert_into(crate::schema::audit_reports::table)
            .values(new_report)
            .returning(AuditReport::as_returning())
            .get_result(conn)
    }

    pub fn update(
        conn: &mut PgConnection,
        report_id: i32,
        changes: &UpdateAuditReport,
    ) -> Result<AuditReport, diesel::result::Error> {
        use crate::schema::audit_reports::dsl::*;
        diesel::update(audit_reports.filter(id.eq(report_id)))
            .set(changes)
            .returning(AuditReport::as_returning())
            .get_result(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        report_id: i32,
    ) -> Result<Option<AuditReport>, diesel::result::Error> {
        use crate::schema::audit_reports::dsl::*;
        audit_reports
            .filter(id.eq(report_id))
            .select(AuditReport::as_select())
            .first(conn)
            .optional()
    }

    pub fn list_for_project(
        conn: &mut PgConnection,
        target_project_id: i32,
    ) -> Result<Vec<AuditReport>, diesel::result::Error> {
        use crate::schema::audit_reports::dsl::*;
        audit_reports
            .filter(project_id.eq(target_project_id))
            .order(id.asc())
            .select(AuditReport::as_select())
            .load(conn)
    }

    pub fn list_all(conn: &mut PgConnection) -> Result<Vec<AuditReport>, diesel::result::Error> {
        use crate::schema::audit_reports::dsl::*;
        audit_reports
            .order(created_at.desc())
            .select(AuditReport::as_select())
            .load(conn)
    }

    pub fn list_for_projects(
        conn: &mut PgConnection,
        project_ids: &[i32],
    ) -> Result<Vec<AuditReport>, diesel::result::Error> {
        use crate::schema::audit_reports::dsl::*;
        audit_reports
            .filter(project_id.eq_any(project_ids))
            .order(created_at.desc())
            .select(AuditReport::as_select())
            .load(conn)
    }

    pub fn list_by_status(
        conn: &mut PgConnection,
        target_status: ReportStatus,
    ) -> Result<Vec<AuditReport>, diesel::result::Error> {
        use crate::schema::audit_reports::dsl::*;
        audit_reports
            .filter(status.eq(target_status))
            .order(created_at.desc())
            .select(AuditReport::as_select())
            .load(conn)
    }

    /// Reports of one department's projects in `target_status`.
    pub fn list_for_department_by_status(
        conn: &mut PgConnection,
        target_department_id: i32,
        target_status: ReportStatus,
    ) -> Result<Vec<AuditReport>, diesel::result::Error> {
        use crate::schema::{audit_projects, audit_reports};
        audit_reports::table
            .inner_join(audit_projects::table)
            .filter(audit_projects::department_id.eq(target_department_id))
            .filter(audit_reports::status.eq(target_status))
            .order(audit_reports::created_at.desc())
            .select(AuditReport::as_select())
            .load(conn)
    }
}
