use serde::{Deserialize, Serialize};
use std::fmt;

use crate::db::enums::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approve,
    Reject,
}

/// A requested workflow action. Attachments are already-resolved storage
/// references, see `utils::attachments`.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowCommand {
    SubmitPlan {
        description: String,
        attachment: Option<String>,
    },
    ReviewPlan {
        plan_id: i32,
        decision: Decision,
        manager_notes: String,
        attachment: Option<String>,
    },
    SubmitIssue {
        description: String,
        attachment: Option<String>,
    },
    ReviewIssue {
        issue_id: i32,
        decision: Decision,
        manager_notes: String,
        attachment: Option<String>,
    },
    SubmitReport {
        description: String,
        attachment: Option<String>,
    },
    ReviewReport {
        report_id: i32,
        decision: Decision,
        manager_notes: String,
        attachment: Option<String>,
    },
    SendToDepartment {
        report_id: i32,
    },
    DepartmentReply {
        report_id: i32,
        department_notes: String,
        attachment: Option<String>,
    },
    AuditorFinalReview {
        report_id: i32,
        decision: Decision,
        auditor_notes: String,
    },
    FinalManagerReview {
        report_id: i32,
        decision: Decision,
        final_notes: String,
        attachment: Option<String>,
    },
}

impl WorkflowCommand {
    pub fn kind(&self) -> ActionKind {
        match self {
            WorkflowCommand::SubmitPlan { .. } => ActionKind::SubmitPlan,
            WorkflowCommand::ReviewPlan { .. } => ActionKind::ReviewPlan,
            WorkflowCommand::SubmitIssue { .. } => ActionKind::SubmitIssue,
            WorkflowCommand::ReviewIssue { .. } => ActionKind::ReviewIssue,
            WorkflowCommand::SubmitReport { .. } => ActionKind::SubmitReport,
            WorkflowCommand::ReviewReport { .. } => ActionKind::ReviewReport,
            WorkflowCommand::SendToDepartment { .. } => ActionKind::SendToDepartment,
            WorkflowCommand::DepartmentReply { .. } => ActionKind::DepartmentReply,
            WorkflowCommand::AuditorFinalReview { .. } => ActionKind::AuditorFinalReview,
            WorkflowCommand::FinalManagerReview { .. } => ActionKind::FinalManagerReview,
        }
    }

    /// Id of the plan, issue or report the command acts on, if any.
    pub fn target_id(&self) -> Option<i32> {
        match self {
            WorkflowCommand::SubmitPlan { .. }
            | WorkflowCommand::SubmitIssue { .. }
            | WorkflowCommand::SubmitReport { .. } => None,
            WorkflowCommand::ReviewPlan { plan_id, .. } => Some(*plan_id),
            WorkflowCommand::ReviewIssue { issue_id, .. } => Some(*issue_id),
            WorkflowCommand::ReviewReport { report_id, .. }
            | WorkflowCommand::SendToDepartment { report_id }
            | WorkflowCommand::DepartmentReply { report_id, .. }
            | WorkflowCommand::AuditorFinalReview { report_id, .. }
            | WorkflowCommand::FinalManagerReview { report_id, .. } => Some(*report_id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    SubmitPlan,
    ReviewPlan,
    SubmitIssue,
    ReviewIssue,
    SubmitReport,
    ReviewReport,
    SendToDepartment,
    DepartmentReply,
    AuditorFinalReview,
    FinalManagerReview,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::SubmitPlan => "submit_plan",
            ActionKind::ReviewPlan => "review_plan",
            ActionKind::SubmitIssue => "submit_issue",
            ActionKind::ReviewIssue => "review_issue",
            ActionKind::SubmitReport => "submit_report",
            ActionKind::ReviewReport => "review_report",
            ActionKind::SendToDepartment => "send_to_department",
            ActionKind::DepartmentReply => "department_reply",
            ActionKind::AuditorFinalReview => "auditor_final_review",
            ActionKind::FinalManagerReview => "final_manager_review",
        }
    }

    pub fn required_role(&self) -> Role {
        match self {
            ActionKind::SubmitPlan
            | ActionKind::SubmitIssue
            | ActionKind::SubmitReport
            | ActionKind::AuditorFinalReview => Role::Auditor,
            ActionKind::ReviewPlan
            | ActionKind::ReviewIssue
            | ActionKind::ReviewReport
            | ActionKind::SendToDepartment
            | ActionKind::FinalManagerReview => Role::AuditManager,
            ActionKind::DepartmentReply => Role::DepartmentManager,
        }
    }

    /// Short text returned to partial-refresh clients.
    pub fn acknowledgement(&self) -> &'static str {
        match self {
            ActionKind::SubmitPlan => "Plan submitted successfully!",
            ActionKind::ReviewPlan => "Plan reviewed successfully!",
            ActionKind::SubmitIssue => "Issue submitted successfully!",
            ActionKind::ReviewIssue => "Issue reviewed successfully!",
            ActionKind::SubmitReport => "Report submitted successfully!",
            ActionKind::ReviewReport => "Report reviewed successfully!",
            ActionKind::SendToDepartment => "Report sent to department successfully!",
            ActionKind::DepartmentReply => "Department response submitted successfully!",
            ActionKind::AuditorFinalReview => "Final review submitted successfully!",
            ActionKind::FinalManagerReview => "Final review completed successfully!",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
