// Replays whole projects through the workflow engine against an in-memory
// store that applies each transition's effects the way the database would.

use audit_tracker::db::enums::{IssueStatus, PlanStatus, ProjectStatus, ReportStatus, Role};
use audit_tracker::db::models::{
    AuditIssue, AuditPlan, AuditProject, AuditReport, Department, FinalReport,
};
use audit_tracker::workflow::{
    Actor, Decision, Effect, ProjectSnapshot, WorkflowCommand, WorkflowError, apply,
};
use chrono::Utc;

const MANAGER: i32 = 1;
const AUDITOR: i32 = 2;
const STRANGER: i32 = 3;
const DEPT_MANAGER: i32 = 4;

struct Store {
    snapshot: ProjectSnapshot,
    next_id: i32,
}

impl Store {
    fn new() -> Self {
        let now = Utc::now();
        Self {
            snapshot: ProjectSnapshot {
                project: AuditProject {
                    id: 1,
                    title: "Branch cash handling".to_string(),
                    description: "Quarterly cash audit".to_string(),
                    department_id: 7,
                    created_by: Some(MANAGER),
                    created_at: now,
                    status: ProjectStatus::Created,
                    manager_notes: String::new(),
                },
                department: Department {
                    id: 7,
                    name: "Retail Banking".to_string(),
                    manager_id: Some(DEPT_MANAGER),
                    created_at: now,
                },
                assigned_auditor_ids: vec![AUDITOR],
                plans: Vec::new(),
                issues: Vec::new(),
                reports: Vec::new(),
                final_report: None,
            },
            next_id: 100,
        }
    }

    fn id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn run(&mut self, actor: &Actor, command: WorkflowCommand) -> Result<(), WorkflowError> {
        let now = Utc::now();
        let transition = apply(&self.snapshot, actor, command, now)?;

        for effect in transition.effects {
            match effect {
                Effect::InsertPlan(new) => {
                    let id = self.id();
                    self.snapshot.plans.push(AuditPlan {
                        id,
                        project_id: new.project_id,
                        created_by: new.created_by,
                        created_at: now,
                        status: new.status,
                        description: new.description,
                        attachment: new.attachment,
                        manager_notes: String::new(),
                        manager_reviewed_at: None,
                    });
                }
                Effect::UpdatePlan { plan_id, changes } => {
                    let plan = self.snapshot.plans.iter_mut().find(|p| p.id == plan_id).unwrap();
                    if let Some(status) = changes.status {
                        plan.status = status;
                    }
                    if let Some(notes) = changes.manager_notes {
                        plan.manager_notes = notes;
                    }
                    if changes.attachment.is_some() {
                        plan.attachment = changes.attachment;
                    }
                    if changes.manager_reviewed_at.is_some() {
                        plan.manager_reviewed_at = changes.manager_reviewed_at;
                    }
                }
                Effect::InsertIssue(new) => {
                    let id = self.id();
                    self.snapshot.issues.push(AuditIssue {
                        id,
                        project_id: new.project_id,
                        created_by: new.created_by,
                        created_at: now,
                        status: new.status,
                        description: new.description,
                        attachment: new.attachment,
                        manager_notes: String::new(),
                        manager_reviewed_at: None,
                    });
                }
                Effect::UpdateIssue { issue_id, changes } => {
                    let issue = self.snapshot.issues.iter_mut().find(|i| i.id == issue_id).unwrap();
                    if let Some(status) = changes.status {
                        issue.status = status;
                    }
                    if let Some(notes) = changes.manager_notes {
                        issue.manager_notes = notes;
                    }
                    if changes.attachment.is_some() {
                        issue.attachment = changes.attachment;
                    }
                    if changes.manager_reviewed_at.is_some() {
                        issue.manager_reviewed_at = changes.manager_reviewed_at;
                    }
                }
                Effect::InsertReport(new) => {
                    let id = self.id();
                    self.snapshot.reports.push(AuditReport {
                        id,
                        project_id: new.project_id,
                        created_by: new.created_by,
                        created_at: now,
                        status: new.status,
                        description: new.description,
                        attachment: new.attachment,
                        manager_notes: String::new(),
                        department_notes: String::new(),
                        auditor_final_notes: String::new(),
                        final_manager_notes: String::new(),
                    });
                }
                Effect::UpdateReport { report_id, changes } => {
                    let report = self
                        .snapshot
                        .reports
                        .iter_mut()
                        .find(|r| r.id == report_id)
                        .unwrap();
                    if let Some(status) = changes.status {
                        report.status = status;
                    }
                    if changes.attachment.is_some() {
                        report.attachment = changes.attachment;
                    }
                    if let Some(notes) = changes.manager_notes {
                        report.manager_notes = notes;
                    }
                    if let Some(notes) = changes.department_notes {
                        report.department_notes = notes;
                    }
                    if let Some(notes) = changes.auditor_final_notes {
                        report.auditor_final_notes = notes;
                    }
                    if let Some(notes) = changes.final_manager_notes {
                        report.final_manager_notes = notes;
                    }
                }
                Effect::InsertFinalReport(new) => {
                    assert!(self.snapshot.final_report.is_none(), "second final report");
                    let id = self.id();
                    self.snapshot.final_report = Some(FinalReport {
                        id,
                        project_id: new.project_id,
                        created_at: now,
                        content: new.content,
                        attachment: new.attachment,
                    });
                }
            }
        }

        self.snapshot.project.status = transition.to;
        Ok(())
    }

    fn status(&self) -> ProjectStatus {
        self.snapshot.project.status
    }

    fn last_plan(&self) -> &AuditPlan {
        self.snapshot.plans.last().unwrap()
    }

    fn last_issue(&self) -> &AuditIssue {
        self.snapshot.issues.last().unwrap()
    }

    fn last_report(&self) -> &AuditReport {
        self.snapshot.reports.last().unwrap()
    }
}

fn manager() -> Actor {
    Actor::new(MANAGER, [Role::AuditManager])
}

fn auditor() -> Actor {
    Actor::new(AUDITOR, [Role::Auditor])
}

fn dept_manager() -> Actor {
    Actor::new(DEPT_MANAGER, [Role::DepartmentManager])
}

fn submit_plan(description: &str) -> WorkflowCommand {
    WorkflowCommand::SubmitPlan {
        description: description.to_string(),
        attachment: None,
    }
}

fn submit_issue(description: &str) -> WorkflowCommand {
    WorkflowCommand::SubmitIssue {
        description: description.to_string(),
        attachment: None,
    }
}

fn submit_report(description: &str) -> WorkflowCommand {
    WorkflowCommand::SubmitReport {
        description: description.to_string(),
        attachment: None,
    }
}

fn final_approval(report_id: i32) -> WorkflowCommand {
    WorkflowCommand::FinalManagerReview {
        report_id,
        decision: Decision::Approve,
        final_notes: "Signed off".to_string(),
        attachment: Some("audit/final_reports/signed.pdf".to_string()),
    }
}

/// Drives a fresh project up to `final_review` and returns the report id.
fn ready_for_final_review(store: &mut Store) -> i32 {
    store.run(&auditor(), submit_plan("Count the vault twice")).unwrap();
    let plan_id = store.last_plan().id;
    store
        .run(
            &manager(),
            WorkflowCommand::ReviewPlan {
                plan_id,
                decision: Decision::Approve,
                manager_notes: "Go ahead".to_string(),
                attachment: None,
            },
        )
        .unwrap();

    store.run(&auditor(), submit_issue("Vault log unsigned on 3 days")).unwrap();
    let issue_id = store.last_issue().id;
    store
        .run(
            &manager(),
            WorkflowCommand::ReviewIssue {
                issue_id,
                decision: Decision::Approve,
                manager_notes: String::new(),
                attachment: None,
            },
        )
        .unwrap();

    store.run(&auditor(), submit_report("Controls mostly effective")).unwrap();
    let report_id = store.last_report().id;
    store
        .run(
            &manager(),
            WorkflowCommand::ReviewReport {
                report_id,
                decision: Decision::Approve,
                manager_notes: "Fine".to_string(),
                attachment: None,
            },
        )
        .unwrap();
    store
        .run(&manager(), WorkflowCommand::SendToDepartment { report_id })
        .unwrap();
    store
        .run(
            &dept_manager(),
            WorkflowCommand::DepartmentReply {
                report_id,
                department_notes: "Logs will be signed daily".to_string(),
                attachment: None,
            },
        )
        .unwrap();
    store
        .run(
            &auditor(),
            WorkflowCommand::AuditorFinalReview {
                report_id,
                decision: Decision::Approve,
                auditor_notes: "Response accepted".to_string(),
            },
        )
        .unwrap();
    report_id
}

#[test]
fn full_audit_reaches_finalized_with_one_final_report() {
    let mut store = Store::new();

    store.run(&auditor(), submit_plan("Count the vault twice")).unwrap();
    assert_eq!(store.status(), ProjectStatus::PlanPending);
    assert_eq!(store.last_plan().status, PlanStatus::Submitted);

    let plan_id = store.last_plan().id;
    store
        .run(
            &manager(),
            WorkflowCommand::ReviewPlan {
                plan_id,
                decision: Decision::Approve,
                manager_notes: "Go ahead".to_string(),
                attachment: None,
            },
        )
        .unwrap();
    assert_eq!(store.status(), ProjectStatus::AuditInProgress);
    assert_eq!(store.last_plan().status, PlanStatus::Approved);
    assert!(store.last_plan().manager_reviewed_at.is_some());

    store.run(&auditor(), submit_issue("Vault log unsigned on 3 days")).unwrap();
    assert_eq!(store.last_issue().status, IssueStatus::Submitted);
    let issue_id = store.last_issue().id;
    store
        .run(
            &manager(),
            WorkflowCommand::ReviewIssue {
                issue_id,
                decision: Decision::Approve,
                manager_notes: String::new(),
                attachment: None,
            },
        )
        .unwrap();
    assert_eq!(store.last_issue().status, IssueStatus::Approved);
    assert_eq!(store.status(), ProjectStatus::AuditInProgress);

    store.run(&auditor(), submit_report("Controls mostly effective")).unwrap();
    assert_eq!(store.last_report().status, ReportStatus::Submitted);
    let report_id = store.last_report().id;

    store
        .run(
            &manager(),
            WorkflowCommand::ReviewReport {
                report_id,
                decision: Decision::Approve,
                manager_notes: "Fine".to_string(),
                attachment: None,
            },
        )
        .unwrap();
    assert_eq!(store.last_report().status, ReportStatus::ApprovedByManager);
    assert_eq!(store.status(), ProjectStatus::ReportPendingManager);

    store
        .run(&manager(), WorkflowCommand::SendToDepartment { report_id })
        .unwrap();
    assert_eq!(store.last_report().status, ReportStatus::SentToDepartment);
    assert_eq!(store.status(), ProjectStatus::ReportPendingDepartment);

    store
        .run(
            &dept_manager(),
            WorkflowCommand::DepartmentReply {
                report_id,
                department_notes: "Logs will be signed daily".to_string(),
                attachment: None,
            },
        )
        .unwrap();
    assert_eq!(store.last_report().status, ReportStatus::DeptReplied);
    assert_eq!(store.last_report().department_notes, "Logs will be signed daily");

    store
        .run(
            &auditor(),
            WorkflowCommand::AuditorFinalReview {
                report_id,
                decision: Decision::Approve,
                auditor_notes: "Response accepted".to_string(),
            },
        )
        .unwrap();
    assert_eq!(store.last_report().status, ReportStatus::AuditorApproved);
    assert_eq!(store.status(), ProjectStatus::FinalReview);

    store.run(&manager(), final_approval(report_id)).unwrap();
    assert_eq!(store.last_report().status, ReportStatus::FinalApproved);
    assert_eq!(store.status(), ProjectStatus::Finalized);

    let final_report = store.snapshot.final_report.as_ref().unwrap();
    assert_eq!(final_report.project_id, 1);
    assert_eq!(
        final_report.attachment.as_deref(),
        Some("audit/final_reports/signed.pdf")
    );
    for expected in [
        "Branch cash handling",
        "Retail Banking",
        "Count the vault twice",
        "Vault log unsigned on 3 days",
    ] {
        assert!(
            final_report.content.contains(expected),
            "final report is missing {expected:?}"
        );
    }
}

#[test]
fn second_final_approval_is_rejected() {
    let mut store = Store::new();
    let report_id = ready_for_final_review(&mut store);
    store.run(&manager(), final_approval(report_id)).unwrap();

    let err = store.run(&manager(), final_approval(report_id)).unwrap_err();
    assert!(matches!(err, WorkflowError::Precondition(_)));
    assert_eq!(store.status(), ProjectStatus::Finalized);
}

#[test]
fn final_rejection_keeps_statuses_and_records_notes() {
    let mut store = Store::new();
    let report_id = ready_for_final_review(&mut store);

    store
        .run(
            &manager(),
            WorkflowCommand::FinalManagerReview {
                report_id,
                decision: Decision::Reject,
                final_notes: "Cite the policy".to_string(),
                attachment: None,
            },
        )
        .unwrap();

    assert_eq!(store.status(), ProjectStatus::FinalReview);
    assert_eq!(store.last_report().status, ReportStatus::AuditorApproved);
    assert_eq!(store.last_report().final_manager_notes, "Cite the policy");
    assert!(store.snapshot.final_report.is_none());

    store.run(&manager(), final_approval(report_id)).unwrap();
    assert_eq!(store.status(), ProjectStatus::Finalized);
}

#[test]
fn report_needs_an_approved_issue() {
    let mut store = Store::new();
    store.run(&auditor(), submit_plan("Count the vault twice")).unwrap();
    let plan_id = store.last_plan().id;
    store
        .run(
            &manager(),
            WorkflowCommand::ReviewPlan {
                plan_id,
                decision: Decision::Approve,
                manager_notes: String::new(),
                attachment: None,
            },
        )
        .unwrap();
    store.run(&auditor(), submit_issue("Pending finding")).unwrap();

    let err = store.run(&auditor(), submit_report("Too early")).unwrap_err();
    assert_eq!(
        err,
        WorkflowError::Precondition(
            "You must have approved issues before creating a report.".to_string()
        )
    );
    assert!(store.snapshot.reports.is_empty());
}

/// Runs `command` as an auditor outside the project and checks it is refused
/// without touching the store.
fn assert_stranger_refused(store: &mut Store, command: WorkflowCommand) {
    let stranger = Actor::new(STRANGER, [Role::Auditor]);
    let before = store.snapshot.clone();

    let err = store.run(&stranger, command.clone()).unwrap_err();
    assert_eq!(
        err,
        WorkflowError::Denied("You are not assigned to this project.".to_string()),
        "{command:?}"
    );
    assert_eq!(store.snapshot, before, "{command:?}");
}

#[test]
fn unassigned_auditor_never_changes_anything() {
    let mut store = Store::new();
    assert_stranger_refused(&mut store, submit_plan("Sneaky plan"));
    assert!(store.snapshot.plans.is_empty());
    assert_eq!(store.status(), ProjectStatus::Created);

    store.run(&auditor(), submit_plan("Count the vault twice")).unwrap();
    let plan_id = store.last_plan().id;
    store
        .run(
            &manager(),
            WorkflowCommand::ReviewPlan {
                plan_id,
                decision: Decision::Approve,
                manager_notes: String::new(),
                attachment: None,
            },
        )
        .unwrap();
    store.run(&auditor(), submit_issue("Vault log unsigned")).unwrap();
    let issue_id = store.last_issue().id;
    store
        .run(
            &manager(),
            WorkflowCommand::ReviewIssue {
                issue_id,
                decision: Decision::Approve,
                manager_notes: String::new(),
                attachment: None,
            },
        )
        .unwrap();

    // audit_in_progress with an approved issue: both submissions would succeed
    // for the assigned auditor
    assert_eq!(store.status(), ProjectStatus::AuditInProgress);
    assert_stranger_refused(&mut store, submit_issue("Sneaky issue"));
    assert_stranger_refused(&mut store, submit_report("Sneaky report"));

    store.run(&auditor(), submit_report("Controls mostly effective")).unwrap();
    let report_id = store.last_report().id;
    store
        .run(
            &manager(),
            WorkflowCommand::ReviewReport {
                report_id,
                decision: Decision::Approve,
                manager_notes: String::new(),
                attachment: None,
            },
        )
        .unwrap();
    store
        .run(&manager(), WorkflowCommand::SendToDepartment { report_id })
        .unwrap();
    store
        .run(
            &dept_manager(),
            WorkflowCommand::DepartmentReply {
                report_id,
                department_notes: String::new(),
                attachment: None,
            },
        )
        .unwrap();
    assert_eq!(store.last_report().status, ReportStatus::DeptReplied);

    for decision in [Decision::Approve, Decision::Reject] {
        assert_stranger_refused(
            &mut store,
            WorkflowCommand::AuditorFinalReview {
                report_id,
                decision,
                auditor_notes: "Not mine to judge".to_string(),
            },
        );
    }
    assert_eq!(store.status(), ProjectStatus::ReportPendingDepartment);
}

#[test]
fn rejected_plan_can_be_resubmitted() {
    let mut store = Store::new();
    store.run(&auditor(), submit_plan("First draft")).unwrap();
    let plan_id = store.last_plan().id;
    store
        .run(
            &manager(),
            WorkflowCommand::ReviewPlan {
                plan_id,
                decision: Decision::Reject,
                manager_notes: "Too vague".to_string(),
                attachment: None,
            },
        )
        .unwrap();
    assert_eq!(store.status(), ProjectStatus::Created);
    assert_eq!(store.last_plan().status, PlanStatus::Rejected);

    store.run(&auditor(), submit_plan("Second draft")).unwrap();
    assert_eq!(store.status(), ProjectStatus::PlanPending);
    assert_eq!(store.snapshot.plans.len(), 2);
}
