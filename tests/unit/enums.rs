use audit_tracker::db::enums::{IssueStatus, PlanStatus, ProjectStatus, ReportStatus, Role};

#[test]
fn project_status_text_round_trips() {
    for status in ProjectStatus::ALL {
        assert_eq!(status.as_str().parse::<ProjectStatus>(), Ok(status));
    }
    assert!("archived".parse::<ProjectStatus>().is_err());
}

#[test]
fn stored_status_names_match_database_values() {
    assert_eq!(ProjectStatus::ReportPendingDepartment.as_str(), "report_pending_department");
    assert_eq!(ProjectStatus::AuditInProgress.label(), "Audit In Progress");
    assert_eq!(PlanStatus::Submitted.as_str(), "submitted");
    assert_eq!(IssueStatus::Approved.as_str(), "approved");
    assert_eq!(ReportStatus::DeptReplied.as_str(), "dept_replied");
    assert_eq!("final_approved".parse::<ReportStatus>(), Ok(ReportStatus::FinalApproved));
}

#[test]
fn roles_serialize_as_snake_case() {
    assert_eq!(
        serde_json::to_string(&Role::DepartmentManager).unwrap(),
        "\"department_manager\""
    );
    assert_eq!("audit_manager".parse::<Role>(), Ok(Role::AuditManager));
    assert_eq!(Role::Auditor.group_name(), "Auditors");
}
