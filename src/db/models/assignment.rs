use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::audit_assignments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AuditAssignment {
    pub id: i32,
    pub project_id: i32,
    pub auditor_id: i32,
    pub assigned_by: Option<i32>,
    pub assigned_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::audit_assignments)]
pub struct NewAuditAssignment {
    pub project_id: i32,
    pub auditor_id: i32,
    pub assigned_by: Option<i32>,
}
