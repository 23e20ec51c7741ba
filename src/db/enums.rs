use diesel::backend::Backend;
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::{AsExpression, FromSqlRow};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Implements the `Text` column mapping for an enum that already has
/// `as_str()` and `FromStr`.
macro_rules! text_column {
    ($ty:ident, $what:literal) => {
        impl ToSql<Text, Pg> for $ty {
            fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
                out.write_all(self.as_str().as_bytes())?;
                Ok(IsNull::No)
            }
        }

        impl FromSql<Text, Pg> for $ty {
            fn from_sql(bytes: <Pg as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
                let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
                s.parse::<$ty>()
                    .map_err(|_| format!("Unrecognized {}: {}", $what, s).into())
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// Lifecycle of an audit project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Created,
    PlanPending,
    AuditInProgress,
    ReportPendingManager,
    ReportPendingDepartment,
    FinalReview,
    Finalized,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 7] = [
        ProjectStatus::Created,
        ProjectStatus::PlanPending,
        ProjectStatus::AuditInProgress,
        ProjectStatus::ReportPendingManager,
        ProjectStatus::ReportPendingDepartment,
        ProjectStatus::FinalReview,
        ProjectStatus::Finalized,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Created => "created",
            ProjectStatus::PlanPending => "plan_pending",
            ProjectStatus::AuditInProgress => "audit_in_progress",
            ProjectStatus::ReportPendingManager => "report_pending_manager",
            ProjectStatus::ReportPendingDepartment => "report_pending_department",
            ProjectStatus::FinalReview => "final_review",
            ProjectStatus::Finalized => "finalized",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Created => "Created",
            ProjectStatus::PlanPending => "Plan Pending",
            ProjectStatus::AuditInProgress => "Audit In Progress",
            ProjectStatus::ReportPendingManager => "Report Pending Manager",
            ProjectStatus::ReportPendingDepartment => "Report Pending Department",
            ProjectStatus::FinalReview => "Final Review",
            ProjectStatus::Finalized => "Finalized",
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown project status '{}'", s))
    }
}

text_column!(ProjectStatus, "project status");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    Draft,
    Submitted,
    Approved,
    Rejected,
}

impl PlanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Draft => "draft",
            PlanStatus::Submitted => "submitted",
            PlanStatus::Approved => "approved",
            PlanStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for PlanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PlanStatus::Draft),
            "submitted" => Ok(PlanStatus::Submitted),
            "approved" => Ok(PlanStatus::Approved),
            "rejected" => Ok(PlanStatus::Rejected),
            _ => Err(format!("unknown plan status '{}'", s)),
        }
    }
}

text_column!(PlanStatus, "plan status");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    Submitted,
    Approved,
    Rejected,
}

impl IssueStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::Submitted => "submitted",
            IssueStatus::Approved => "approved",
            IssueStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for IssueStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submitted" => Ok(IssueStatus::Submitted),
            "approved" => Ok(IssueStatus::Approved),
            "rejected" => Ok(IssueStatus::Rejected),
            _ => Err(format!("unknown issue status '{}'", s)),
        }
    }
}

text_column!(IssueStatus, "issue status");

/// Report status. `FinalManagerReview` is a legal stored value but no
/// transition currently produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Submitted,
    ApprovedByManager,
    SentToDepartment,
    DeptReplied,
    AuditorApproved,
    FinalManagerReview,
    FinalApproved,
    Rejected,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Submitted => "submitted",
            ReportStatus::ApprovedByManager => "approved_by_manager",
            ReportStatus::SentToDepartment => "sent_to_department",
            ReportStatus::DeptReplied => "dept_replied",
            ReportStatus::AuditorApproved => "auditor_approved",
            ReportStatus::FinalManagerReview => "final_manager_review",
            ReportStatus::FinalApproved => "final_approved",
            ReportStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submitted" => Ok(ReportStatus::Submitted),
            "approved_by_manager" => Ok(ReportStatus::ApprovedByManager),
            "sent_to_department" => Ok(ReportStatus::SentToDepartment),
            "dept_replied" => Ok(ReportStatus::DeptReplied),
            "auditor_approved" => Ok(ReportStatus::AuditorApproved),
            "final_manager_review" => Ok(ReportStatus::FinalManagerReview),
            "final_approved" => Ok(ReportStatus::FinalApproved),
            "rejected" => Ok(ReportStatus::Rejected),
            _ => Err(format!("unknown report status '{}'", s)),
        }
    }
}

text_column!(ReportStatus, "report status");

/// Role group membership stored in `user_roles`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    AuditManager,
    Auditor,
    DepartmentManager,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::AuditManager => "audit_manager",
            Role::Auditor => "auditor",
            Role::DepartmentManager => "department_manager",
        }
    }

    pub fn group_name(&self) -> &'static str {
        match self {
            Role::AuditManager => "Audit Managers",
            Role::Auditor => "Auditors",
            Role::DepartmentManager => "Department Managers",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "audit_manager" => Ok(Role::AuditManager),
            "auditor" => Ok(Role::Auditor),
            "department_manager" => Ok(Role::DepartmentManager),
            _ => Err(format!("unknown role '{}'", s)),
        }
    }
}

text_column!(Role, "role");
