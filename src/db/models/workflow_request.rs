use serde::Deserialize;
use validator::Validate;

use crate::validation::record::{not_blank, plain_file_name};
use crate::workflow::Decision;

/// Body for submitting a plan, issue or report.
#[derive(Deserialize, Validate)]
pub struct SubmitRecordRequest {
    #[validate(
        custom(function = "not_blank"),
        length(max = 10000, message = "Description is too long (max 10000 characters)")
    )]
    pub description: String,
    #[validate(custom(function = "plain_file_name"))]
    pub attachment: Option<String>,
}

/// Manager review of a plan, issue or report.
#[derive(Deserialize, Validate)]
pub struct ReviewRequest {
    pub action: Decision,
    #[serde(default)]
    #[validate(length(max = 10000, message = "Manager notes are too long (max 10000 characters)"))]
    pub manager_notes: String,
    #[validate(custom(function = "plain_file_name"))]
    pub attachment: Option<String>,
}

#[derive(Deserialize, Validate)]
pub struct DepartmentReplyRequest {
    #[serde(default)]
    #[validate(length(max = 10000, message = "Department notes are too long (max 10000 characters)"))]
    pub department_notes: String,
    #[validate(custom(function = "plain_file_name"))]
    pub attachment: Option<String>,
}

#[derive(Deserialize, Validate)]
pub struct AuditorFinalReviewRequest {
    pub action: Decision,
    #[serde(default)]
    #[validate(length(max = 10000, message = "Auditor notes are too long (max 10000 characters)"))]
    pub auditor_notes: String,
}

#[derive(Deserialize, Validate)]
pub struct FinalManagerReviewRequest {
    pub action: Decision,
    #[serde(default)]
    #[validate(length(max = 10000, message = "Final notes are too long (max 10000 characters)"))]
    pub final_notes: String,
    #[validate(custom(function = "plain_file_name"))]
    pub attachment: Option<String>,
}
