use diesel::prelude::*;

use crate::db::enums::ProjectStatus;
use crate::db::models::project::{AuditProject, NewAuditProject};

pub struct ProjectsRepo;

impl ProjectsRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_project: &NewAuditProject,
    ) -> Result<AuditProject, diesel::result::Error> {
        diesel::insert_into(crate::schema::audit_projects::table)
            .values(new_project)
            .returning(AuditProject::as_returning())
            .get_result(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        project_id: i32,
    ) -> Result<Option<AuditProject>, diesel::result::Error> {
        use crate::schema::audit_projects::dsl::*;
        audit_projects
            .filter(id.eq(project_id))
            .select(AuditProject::as_select())
            .first(conn)
            .optional()
    }

    /// Loads the project row with `FOR UPDATE` so concurrent transitions on
    /// the same project serialize.
    pub fn find_by_id_for_update(
        conn: &mut PgConnection,
        project_id: i32,
    ) -> Result<Option<AuditProject>, diesel::result::Error> {
        use crate::schema::audit_projects::dsl::*;
        audit_projects
            .filter(id.eq(project_id))
            .select(AuditProject::as_select())
            .for_update()
            .first(conn)
            .optional()
    }

    pub fn list_all(conn: &mut PgConnection) -> Result<Vec<AuditProject>, diesel::result::Error> {
        use crate::schema::audit_projects::dsl::*;
        audit_projects
            .order(created_at.desc())
            .select(AuditProject::as_select())
            .load(conn)
    }

    pub fn list_by_ids(
        conn: &mut PgConnection,
        project_ids: &[i32],
    ) -> Result<Vec<AuditProject>, diesel::result::Error> {
        use crate::schema::audit_projects::dsl::*;
        audit_projects
            .filter(id.eq_any(project_ids))
            .order(created_at.desc())
            .select(AuditProject::as_select())
            .load(conn)
    }

    pub fn list_for_department(
        conn: &mut PgConnection,
        target_department_id: i32,
    ) -> Result<Vec<AuditProject>, diesel::result::Error> {
        use crate::schema::audit_projects::dsl::*;
        audit_projects
            .filter(department_id.eq(target_department_id))
            .order(created_at.desc())
            .select(AuditProject::as_select())
            .load(conn)
    }

    pub fn update_status(
        conn: &mut PgConnection,
        project_id: i32,
        new_status: ProjectStatus,
    ) -> Result<AuditProject, diesel::result::Error> {
        use crate::schema::audit_projects::dsl::*;
        diesel::update(audit_projects.filter(id.eq(project_id)))
            .set(status.eq(new_status))
            .returning(AuditProject::as_returning())
            .get_result(conn)
    }
}
