use crate::db::enums::ProjectStatus;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{
    assignment::AuditAssignment, auth::UserBasicInfo, department::Department,
    final_report::FinalReport, issue::AuditIssue, plan::AuditPlan, record::RecordSummary,
    report::AuditReport,
};
use crate::workflow::AvailableAction;

// Project models
#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::audit_projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AuditProject {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub department_id: i32,
    pub created_by: Option<i32>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub status: ProjectStatus,
    pub manager_notes: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::audit_projects)]
pub struct NewAuditProject {
    pub title: String,
    pub description: String,
    pub department_id: i32,
    pub created_by: Option<i32>,
    pub status: ProjectStatus,
    pub manager_notes: String,
}

// Project API DTOs
#[derive(Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 255, message = "Project title must be between 1 and 255 characters"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 10000, message = "Project description is too long (max 10000 characters)"))]
    pub description: String,
    pub department_id: i32,
    #[serde(default)]
    pub auditor_ids: Vec<i32>,
    #[serde(default)]
    #[validate(length(max = 10000, message = "Manager notes are too long (max 10000 characters)"))]
    pub manager_notes: String,
}

#[derive(Deserialize, Validate)]
pub struct AssignAuditorRequest {
    pub auditor_id: i32,
}

#[derive(Serialize)]
pub struct ProjectDetail {
    pub project: AuditProject,
    pub status_label: &'static str,
    pub department: Department,
    pub auditors: Vec<UserBasicInfo>,
    pub assignments: Vec<AuditAssignment>,
    pub plans: Vec<RecordSummary<AuditPlan>>,
    pub issues: Vec<RecordSummary<AuditIssue>>,
    pub reports: Vec<RecordSummary<AuditReport>>,
    pub final_report: Option<RecordSummary<FinalReport>>,
    pub is_assigned_auditor: bool,
    pub allowed_actions: Vec<AvailableAction>,
}

#[derive(Serialize)]
pub struct ProjectListResponse {
    pub projects: Vec<AuditProject>,
    pub total_count: i64,
}
