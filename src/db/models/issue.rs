use crate::db::enums::IssueStatus;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

// Issue models
#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::audit_issues)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AuditIssue {
    pub id: i32,
    pub project_id: i32,
    pub created_by: Option<i32>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub status: IssueStatus,
    pub description: String,
    pub attachment: Option<String>,
    pub manager_notes: String,
    pub manager_reviewed_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Insertable, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::audit_issues)]
pub struct NewAuditIssue {
    pub project_id: i32,
    pub created_by: Option<i32>,
    pub status: IssueStatus,
    pub description: String,
    pub attachment: Option<String>,
}

#[derive(AsChangeset, Default, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::audit_issues)]
pub struct UpdateAuditIssue {
    pub status: Option<IssueStatus>,
    pub manager_notes: Option<String>,
    pub attachment: Option<String>,
    pub manager_reviewed_at: Option<chrono::DateTime<chrono::Utc>>,
}
