use diesel::prelude::*;

use crate::db::models::assignment::{AuditAssignment, NewAuditAssignment};

pub struct AssignmentsRepo;

impl AssignmentsRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_assignment: &NewAuditAssignment,
    ) -> Result<AuditAssignment, diesel::result::Error> {
        diesel::insert_into(crate::schema::audit_assignments::table)
            .values(new_assignment)
            .returning(AuditAssignment::as_returning())
            .get_result(conn)
    }

    pub fn exists(
        conn: &mut PgConnection,
        target_project_id: i32,
        target_auditor_id: i32,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::audit_assignments::dsl::*;
        diesel::select(diesel::dsl::exists(
            audit_assignments
                .filter(project_id.eq(target_project_id))
                .filter(auditor_id.eq(target_auditor_id)),
        ))
        .get_result(conn)
    }

    pub fn list_for_project(
        conn: &mut PgConnection,
        target_project_id: i32,
    ) -> Result<Vec<AuditAssignment>, diesel::result::Error> {
        use crate::schema::audit_assignments::dsl::*;
        audit_assignments
            .filter(project_id.eq(target_project_id))
            .order(id.asc())
            .select(AuditAssignment::as_select())
            .load(conn)
    }

    pub fn list_for_auditor(
        conn: &mut PgConnection,
        target_auditor_id: i32,
    ) -> Result<Vec<AuditAssignment>, diesel::result::Error> {
        use crate::schema::audit_assignments::dsl::*;
        audit_assignments
            .filter(auditor_id.eq(target_auditor_id))
            .order(assigned_at.desc())
            .select(AuditAssignment::as_select())
            .load(conn)
    }

    pub fn project_ids_for_auditor(
        conn: &mut PgConnection,
        target_auditor_id: i32,
    ) -> Result<Vec<i32>, diesel::result::Error> {
        use crate::schema::audit_assignments::dsl::*;
        audit_assignments
            .filter(auditor_id.eq(target_auditor_id))
            .select(project_id)
            .load(conn)
    }
}
