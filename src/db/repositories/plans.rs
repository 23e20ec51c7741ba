use diesel::prelude::*;

use crate::db::enums::PlanStatus;
use crate::db::models::plan::{AuditPlan, NewAuditPlan, UpdateAuditPlan};

pub struct PlansRepo;

impl PlansRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_plan: &NewAuditPlan,
    ) -> Result<AuditPlan, diesel::result::Error> {
        diesel::insert_into(crate::schema::audit_plans::table)
            .values(new_plan)
            .returning(AuditPlan::as_returning())
            .get_result(conn)
    }

    pub fn update(
        conn: &mut PgConnection,
        plan_id: i32,
        changes: &UpdateAuditPlan,
    ) -> Result<AuditPlan, diesel::result::Error> {
        use crate::schema::audit_plans::dsl::*;
        diesel::update(audit_plans.filter(id.eq(plan_id)))
            .set(changes)
            .returning(AuditPlan::as_returning())
            .get_result(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        plan_id: i32,
    ) -> Result<Option<AuditPlan>, diesel::result::Error> {
        use crate::schema::audit_plans::dsl::*;
        audit_plans
            .filter(id.eq(plan_id))
            .select(AuditPlan::as_select())
            .first(conn)
            .optional()
    }

    pub fn list_for_project(
        conn: &mut PgConnection,
        target_project_id: i32,
    ) -> Result<Vec<AuditPlan>, diesel::result::Error> {
        use crate::schema::audit_plans::dsl::*;
        audit_plans
            .filter(project_id.eq(target_project_id))
            .order(id.asc())
            .select(AuditPlan::as_select())
            .load(conn)
    }

    pub fn list_all(conn: &mut PgConnection) -> Result<Vec<AuditPlan>, diesel::result::Error> {
        use crate::schema::audit_plans::dsl::*;
        audit_plans
            .order(created_at.desc())
            .select(AuditPlan::as_select())
            .load(conn)
    }

    pub fn list_for_projects(
        conn: &mut PgConnection,
        project_ids: &[i32],
    ) -> Result<Vec<AuditPlan>, diesel::result::Error> {
        use crate::schema::audit_plans::dsl::*;
        audit_plans
            .filter(project_id.eq_any(project_ids))
            .order(created_at.desc())
            .select(AuditPlan::as_select())
            .load(conn)
    }

    pub fn list_by_status(
        conn: &mut PgConnection,
        target_status: PlanStatus,
    ) -> Result<Vec<AuditPlan>, diesel::result::Error> {
        use crate::schema::audit_plans::dsl::*;
        audit_plans
            .filter(status.eq(target_status))
            .order(created_at.desc())
            .select(AuditPlan::as_select())
            .load(conn)
    }
}
