use audit_tracker::db::models::{
    DepartmentReplyRequest, LoginRequest, ReviewRequest, SubmitRecordRequest,
};
use audit_tracker::workflow::Decision;
use validator::Validate;

#[test]
fn submissions_need_a_description() {
    let ok: SubmitRecordRequest = serde_json::from_value(serde_json::json!({
        "description": "Walk the cash office",
        "attachment": "scope.pdf"
    }))
    .unwrap();
    assert!(ok.validate().is_ok());

    let blank: SubmitRecordRequest =
        serde_json::from_value(serde_json::json!({ "description": "   " })).unwrap();
    let errors = blank.validate().unwrap_err();
    assert!(errors.field_errors().contains_key("description"));
}

#[test]
fn attachments_must_be_plain_file_names() {
    let request: SubmitRecordRequest = serde_json::from_value(serde_json::json!({
        "description": "Walk the cash office",
        "attachment": "../../etc/passwd"
    }))
    .unwrap();
    let errors = request.validate().unwrap_err();
    assert!(errors.field_errors().contains_key("attachment"));
}

#[test]
fn review_action_is_approve_or_reject() {
    let review: ReviewRequest =
        serde_json::from_value(serde_json::json!({ "action": "reject" })).unwrap();
    assert_eq!(review.action, Decision::Reject);
    assert_eq!(review.manager_notes, "");
    assert!(review.validate().is_ok());

    let unknown = serde_json::from_value::<ReviewRequest>(serde_json::json!({ "action": "maybe" }));
    assert!(unknown.is_err());
}

#[test]
fn login_requires_both_fields() {
    let request = LoginRequest {
        username: String::new(),
        password: "secret".to_string(),
    };
    assert!(request.validate().is_err());
}

#[test]
fn department_reply_notes_are_optional() {
    let missing: DepartmentReplyRequest =
        serde_json::from_value(serde_json::json!({})).unwrap();
    assert_eq!(missing.department_notes, "");
    assert!(missing.attachment.is_none());
    assert!(missing.validate().is_ok());

    let empty: DepartmentReplyRequest =
        serde_json::from_value(serde_json::json!({ "department_notes": "" })).unwrap();
    assert!(empty.validate().is_ok());

    let too_long: DepartmentReplyRequest = serde_json::from_value(serde_json::json!({
        "department_notes": "x".repeat(10001)
    }))
    .unwrap();
    let errors = too_long.validate().unwrap_err();
    assert!(errors.field_errors().contains_key("department_notes"));
}
