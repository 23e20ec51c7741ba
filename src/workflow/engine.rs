use chrono::{DateTime, Utc};
use serde::Serialize;

use super::actor::Actor;
use super::command::{ActionKind, Decision, WorkflowCommand};
use super::final_report::compose_final_report;
use crate::db::enums::{IssueStatus, PlanStatus, ProjectStatus, ReportStatus};
use crate::db::models::{
    AuditIssue, AuditPlan, AuditProject, AuditReport, Department, FinalReport, NewAuditIssue,
    NewAuditPlan, NewAuditReport, NewFinalReport, UpdateAuditIssue, UpdateAuditPlan,
    UpdateAuditReport,
};

/// Everything the engine needs to decide on a command for one project.
/// Child records are ordered by id.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSnapshot {
    pub project: AuditProject,
    pub department: Department,
    pub assigned_auditor_ids: Vec<i32>,
    pub plans: Vec<AuditPlan>,
    pub issues: Vec<AuditIssue>,
    pub reports: Vec<AuditReport>,
    pub final_report: Option<FinalReport>,
}

impl ProjectSnapshot {
    pub fn is_assigned(&self, user_id: i32) -> bool {
        self.assigned_auditor_ids.contains(&user_id)
    }

    pub fn has_approved_issue(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.status == IssueStatus::Approved)
    }

    fn plan(&self, id: i32) -> Result<&AuditPlan, WorkflowError> {
        self.plans
            .iter()
            .find(|plan| plan.id == id)
            .ok_or(WorkflowError::NotFound {
                resource: "Plan",
                id,
            })
    }

    fn issue(&self, id: i32) -> Result<&AuditIssue, WorkflowError> {
        self.issues
            .iter()
            .find(|issue| issue.id == id)
            .ok_or(WorkflowError::NotFound {
                resource: "Issue",
                id,
            })
    }

    fn report(&self, id: i32) -> Result<&AuditReport, WorkflowError> {
        self.reports
            .iter()
            .find(|report| report.id == id)
            .ok_or(WorkflowError::NotFound {
                resource: "Report",
                id,
            })
    }
}

/// A single write produced by a transition, applied in order inside the
/// caller's transaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    InsertPlan(NewAuditPlan),
    UpdatePlan {
        plan_id: i32,
        changes: UpdateAuditPlan,
    },
    InsertIssue(NewAuditIssue),
    UpdateIssue {
        issue_id: i32,
        changes: UpdateAuditIssue,
    },
    InsertReport(NewAuditReport),
    UpdateReport {
        report_id: i32,
        changes: UpdateAuditReport,
    },
    InsertFinalReport(NewFinalReport),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub action: ActionKind,
    pub project_id: i32,
    pub from: ProjectStatus,
    pub to: ProjectStatus,
    /// Existing record the command acted on; `None` for submissions.
    pub target_id: Option<i32>,
    pub effects: Vec<Effect>,
}

impl Transition {
    pub fn changes_project_status(&self) -> bool {
        self.from != self.to
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    #[error("{0}")]
    Denied(String),

    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i32 },

    #[error("{0}")]
    Precondition(String),
}

/// An action the actor may take right now, with the record it targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AvailableAction {
    pub action: ActionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_id: Option<i32>,
}

/// Fails unless `actor` holds the role `action` needs.
pub fn require_role(actor: &Actor, action: ActionKind) -> Result<(), WorkflowError> {
    let role = action.required_role();
    if actor.has_role(role) {
        Ok(())
    } else {
        Err(WorkflowError::Denied(format!(
            "Only {} can {}.",
            role.group_name(),
            action.as_str().replace('_', " ")
        )))
    }
}

fn require_assigned(snapshot: &ProjectSnapshot, actor: &Actor) -> Result<(), WorkflowError> {
    if snapshot.is_assigned(actor.user_id) {
        Ok(())
    } else {
        Err(WorkflowError::Denied(
            "You are not assigned to this project.".to_string(),
        ))
    }
}

fn require_project_status(
    current: ProjectStatus,
    expected: ProjectStatus,
) -> Result<(), WorkflowError> {
    if current == expected {
        Ok(())
    } else {
        Err(WorkflowError::Precondition(format!(
            "Project is {} but must be {}.",
            current.label(),
            expected.label()
        )))
    }
}

fn require_report_status(
    report: &AuditReport,
    expected: ReportStatus,
) -> Result<(), WorkflowError> {
    if report.status == expected {
        Ok(())
    } else {
        Err(WorkflowError::Precondition(format!(
            "Report {} is {} but must be {}.",
            report.id, report.status, expected
        )))
    }
}

/// Decides `command` for `actor` against `snapshot`.
///
/// Checks run in a fixed order: required role, referenced record, project
/// assignment or department link, then statuses. A rejected command yields
/// no effects.
pub fn apply(
    snapshot: &ProjectSnapshot,
    actor: &Actor,
    command: WorkflowCommand,
    now: DateTime<Utc>,
) -> Result<Transition, WorkflowError> {
    let action = command.kind();
    require_role(actor, action)?;

    let project = &snapshot.project;
    let from = project.status;
    let transition = |to: ProjectStatus, target_id: Option<i32>, effects: Vec<Effect>| Transition {
        action,
        project_id: project.id,
        from,
        to,
        target_id,
        effects,
    };

    match command {
        WorkflowCommand::SubmitPlan {
            description,
            attachment,
        } => {
            require_assigned(snapshot, actor)?;
            require_project_status(from, ProjectStatus::Created)?;
            Ok(transition(
                ProjectStatus::PlanPending,
                None,
                vec![Effect::InsertPlan(NewAuditPlan {
                    project_id: project.id,
                    created_by: Some(actor.user_id),
                    status: PlanStatus::Submitted,
                    description,
                    attachment,
                })],
            ))
        }

        WorkflowCommand::ReviewPlan {
            plan_id,
            decision,
            manager_notes,
            attachment,
        } => {
            let plan = snapshot.plan(plan_id)?;
            if plan.status != PlanStatus::Submitted {
                return Err(WorkflowError::Precondition(format!(
                    "Plan {} is {} and cannot be reviewed.",
                    plan.id, plan.status
                )));
            }
            require_project_status(from, ProjectStatus::PlanPending)?;
            let (status, to) = match decision {
                Decision::Approve => (PlanStatus::Approved, ProjectStatus::AuditInProgress),
                Decision::Reject => (PlanStatus::Rejected, ProjectStatus::Created),
            };
            Ok(transition(
                to,
                Some(plan_id),
                vec![Effect::UpdatePlan {
                    plan_id,
                    changes: UpdateAuditPlan {
                        status: Some(status),
                        manager_notes: Some(manager_notes),
                        attachment,
                        manager_reviewed_at: Some(now),
                    },
                }],
            ))
        }

        WorkflowCommand::SubmitIssue {
            description,
            attachment,
        } => {
            require_assigned(snapshot, actor)?;
            if from != ProjectStatus::AuditInProgress {
                return Err(WorkflowError::Precondition(
                    "Project must be in audit progress to create issues.".to_string(),
                ));
            }
            Ok(transition(
                from,
                None,
                vec![Effect::InsertIssue(NewAuditIssue {
                    project_id: project.id,
                    created_by: Some(actor.user_id),
                    status: IssueStatus::Submitted,
                    description,
                    attachment,
                })],
            ))
        }

        WorkflowCommand::ReviewIssue {
            issue_id,
            decision,
            manager_notes,
            attachment,
        } => {
            let issue = snapshot.issue(issue_id)?;
            if issue.status != IssueStatus::Submitted {
                return Err(WorkflowError::Precondition(format!(
                    "Issue {} is {} and cannot be reviewed.",
                    issue.id, issue.status
                )));
            }
            let status = match decision {
                Decision::Approve => IssueStatus::Approved,
                Decision::Reject => IssueStatus::Rejected,
            };
            Ok(transition(
                from,
                Some(issue_id),
                vec![Effect::UpdateIssue {
                    issue_id,
                    changes: UpdateAuditIssue {
                        status: Some(status),
                        manager_notes: Some(manager_notes),
                        attachment,
                        manager_reviewed_at: Some(now),
                    },
                }],
            ))
        }

        WorkflowCommand::SubmitReport {
            description,
            attachment,
        } => {
            require_assigned(snapshot, actor)?;
            require_project_status(from, ProjectStatus::AuditInProgress)?;
            if !snapshot.has_approved_issue() {
                return Err(WorkflowError::Precondition(
                    "You must have approved issues before creating a report.".to_string(),
                ));
            }
            if let Some(pending) = snapshot
                .reports
                .iter()
                .find(|report| report.status == ReportStatus::Submitted)
            {
                return Err(WorkflowError::Precondition(format!(
                    "Report {} is still awaiting manager review.",
                    pending.id
                )));
            }
            Ok(transition(
                from,
                None,
                vec![Effect::InsertReport(NewAuditReport {
                    project_id: project.id,
                    created_by: Some(actor.user_id),
                    status: ReportStatus::Submitted,
                    description,
                    attachment,
                })],
            ))
        }

        WorkflowCommand::ReviewReport {
            report_id,
            decision,
            manager_notes,
            attachment,
        } => {
            let report = snapshot.report(report_id)?;
            require_report_status(report, ReportStatus::Submitted)?;
            require_project_status(from, ProjectStatus::AuditInProgress)?;
            let (status, to) = match decision {
                Decision::Approve => (
                    ReportStatus::ApprovedByManager,
                    ProjectStatus::ReportPendingManager,
                ),
                Decision::Reject => (ReportStatus::Rejected, ProjectStatus::AuditInProgress),
            };
            Ok(transition(
                to,
                Some(report_id),
                vec![Effect::UpdateReport {
                    report_id,
                    changes: UpdateAuditReport {
                        status: Some(status),
                        manager_notes: Some(manager_notes),
                        attachment,
                        ..Default::default()
                    },
                }],
            ))
        }

        WorkflowCommand::SendToDepartment { report_id } => {
            let report = snapshot.report(report_id)?;
            require_report_status(report, ReportStatus::ApprovedByManager)?;
            require_project_status(from, ProjectStatus::ReportPendingManager)?;
            Ok(transition(
                ProjectStatus::ReportPendingDepartment,
                Some(report_id),
                vec![Effect::UpdateReport {
                    report_id,
                    changes: UpdateAuditReport {
                        status: Some(ReportStatus::SentToDepartment),
                        ..Default::default()
                    },
                }],
            ))
        }

        WorkflowCommand::DepartmentReply {
            report_id,
            department_notes,
            attachment,
        } => {
            let report = snapshot.report(report_id)?;
            if !snapshot.department.is_managed_by(actor.user_id) {
                return Err(WorkflowError::Denied(
                    "You are not authorized to review this report.".to_string(),
                ));
            }
            require_report_status(report, ReportStatus::SentToDepartment)?;
            require_project_status(from, ProjectStatus::ReportPendingDepartment)?;
            Ok(transition(
                from,
                Some(report_id),
                vec![Effect::UpdateReport {
                    report_id,
                    changes: UpdateAuditReport {
                        status: Some(ReportStatus::DeptReplied),
                        department_notes: Some(department_notes),
                        attachment,
                        ..Default::default()
                    },
                }],
            ))
        }

        WorkflowCommand::AuditorFinalReview {
            report_id,
            decision,
            auditor_notes,
        } => {
            let report = snapshot.report(report_id)?;
            require_assigned(snapshot, actor)?;
            require_report_status(report, ReportStatus::DeptReplied)?;
            require_project_status(from, ProjectStatus::ReportPendingDepartment)?;
            let (status, to) = match decision {
                Decision::Approve => (ReportStatus::AuditorApproved, ProjectStatus::FinalReview),
                Decision::Reject => (
                    ReportStatus::SentToDepartment,
                    ProjectStatus::ReportPendingDepartment,
                ),
            };
            Ok(transition(
                to,
                Some(report_id),
                vec![Effect::UpdateReport {
                    report_id,
                    changes: UpdateAuditReport {
                        status: Some(status),
                        auditor_final_notes: Some(auditor_notes),
                        ..Default::default()
                    },
                }],
            ))
        }

        WorkflowCommand::FinalManagerReview {
            report_id,
            decision,
            final_notes,
            attachment,
        } => {
            let report = snapshot.report(report_id)?;
            require_report_status(report, ReportStatus::AuditorApproved)?;
            require_project_status(from, ProjectStatus::FinalReview)?;
            match decision {
                Decision::Approve => {
                    if snapshot.final_report.is_some() {
                        return Err(WorkflowError::Precondition(
                            "Project already has a final report.".to_string(),
                        ));
                    }
                    let content = compose_final_report(snapshot, report, &final_notes);
                    Ok(transition(
                        ProjectStatus::Finalized,
                        Some(report_id),
                        vec![
                            Effect::UpdateReport {
                                report_id,
                                changes: UpdateAuditReport {
                                    status: Some(ReportStatus::FinalApproved),
                                    final_manager_notes: Some(final_notes),
                                    ..Default::default()
                                },
                            },
                            Effect::InsertFinalReport(NewFinalReport {
                                project_id: project.id,
                                content,
                                attachment,
                            }),
                        ],
                    ))
                }
                Decision::Reject => Ok(transition(
                    ProjectStatus::FinalReview,
                    Some(report_id),
                    vec![Effect::UpdateReport {
                        report_id,
                        changes: UpdateAuditReport {
                            status: Some(ReportStatus::AuditorApproved),
                            final_manager_notes: Some(final_notes),
                            ..Default::default()
                        },
                    }],
                )),
            }
        }
    }
}

/// Every command `actor` could issue against `snapshot` right now.
pub fn allowed_actions(snapshot: &ProjectSnapshot, actor: &Actor) -> Vec<AvailableAction> {
    let mut candidates = vec![
        WorkflowCommand::SubmitPlan {
            description: String::new(),
            attachment: None,
        },
        WorkflowCommand::SubmitIssue {
            description: String::new(),
            attachment: None,
        },
        WorkflowCommand::SubmitReport {
            description: String::new(),
            attachment: None,
        },
    ];
    candidates.extend(snapshot.plans.iter().map(|plan| WorkflowCommand::ReviewPlan {
        plan_id: plan.id,
        decision: Decision::Approve,
        manager_notes: String::new(),
        attachment: None,
    }));
    candidates.extend(snapshot.issues.iter().map(|issue| WorkflowCommand::ReviewIssue {
        issue_id: issue.id,
        decision: Decision::Approve,
        manager_notes: String::new(),
        attachment: None,
    }));
    for report in &snapshot.reports {
        let report_id = report.id;
        candidates.extend([
            WorkflowCommand::ReviewReport {
                report_id,
                decision: Decision::Approve,
                manager_notes: String::new(),
                attachment: None,
            },
            WorkflowCommand::SendToDepartment { report_id },
            WorkflowCommand::DepartmentReply {
                report_id,
                department_notes: String::new(),
                attachment: None,
            },
            WorkflowCommand::AuditorFinalReview {
                report_id,
                decision: Decision::Approve,
                auditor_notes: String::new(),
            },
            WorkflowCommand::FinalManagerReview {
                report_id,
                decision: Decision::Approve,
                final_notes: String::new(),
                attachment: None,
            },
        ]);
    }

    let now = Utc::now();
    candidates
        .into_iter()
        .filter_map(|command| {
            let available = AvailableAction {
                action: command.kind(),
                target_id: command.target_id(),
            };
            apply(snapshot, actor, command, now).ok().map(|_| available)
        })
        .collect()
}
