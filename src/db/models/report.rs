use crate::db::enums::ReportStatus;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Audit report. Each note field is written by a different role at a
/// different stage and never cleared by later stages.
#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::audit_reports)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AuditReport {
    pub id: i32,
    pub project_id: i32,
    pub created_by: Option<i32>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub status: ReportStatus,
    pub description: String,
    pub attachment: Option<String>,
    pub manager_notes: String,
    pub department_notes: String,
    pub auditor_final_notes: String,
    pub final_manager_notes: String,
}

#[derive(Insertable, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::audit_reports)]
pub struct NewAuditReport {
    pub project_id: i32,
    pub created_by: Option<i32>,
    pub status: ReportStatus,
    pub description: String,
    pub attachment: Option<String>,
}

#[derive(AsChangeset, Default, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::audit_reports)]
pub struct UpdateAuditReport {
    pub status: Option<ReportStatus>,
    pub attachment: Option<String>,
    pub manager_notes: Option<String>,
    pub department_notes: Option<String>,
    pub auditor_final_notes: Option<String>,
    pub final_manager_notes: Option<String>,
}
