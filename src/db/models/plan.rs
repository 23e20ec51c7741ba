use crate::db::enums::PlanStatus;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::audit_plans)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AuditPlan {
    pub id: i32,
    pub project_id: i32,
    pub created_by: Option<i32>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub status: PlanStatus,
    pub description: String,
    pub attachment: Option<String>,
    pub manager_notes: String,
    pub manager_reviewed_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Insertable, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::audit_plans)]
pub struct NewAuditPlan {
    pub project_id: i32,
    pub created_by: Option<i32>,
    pub status: PlanStatus,
    pub description: String,
    pub attachment: Option<String>,
}

/// Manager review changes; `None` fields are left untouched.
#[derive(AsChangeset, Default, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::audit_plans)]
pub struct UpdateAuditPlan {
    pub status: Option<PlanStatus>,
    pub manager_notes: Option<String>,
    pub attachment: Option<String>,
    pub manager_reviewed_at: Option<chrono::DateTime<chrono::Utc>>,
}
