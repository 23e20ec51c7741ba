use serde::Serialize;

use super::{
    final_report::FinalReport, issue::AuditIssue, plan::AuditPlan, project::AuditProject,
    report::AuditReport,
};

/// Records that may carry a stored attachment reference.
pub trait HasAttachment {
    fn attachment(&self) -> Option<&str>;
}

macro_rules! has_attachment {
    ($($ty:ty),*) => {
        $(impl HasAttachment for $ty {
            fn attachment(&self) -> Option<&str> {
                self.attachment.as_deref()
            }
        })*
    };
}

has_attachment!(AuditPlan, AuditIssue, AuditReport, FinalReport);

/// List entry: the record plus its resolved attachment URL.
#[derive(Serialize)]
pub struct RecordSummary<T> {
    #[serde(flatten)]
    pub record: T,
    pub attachment_url: Option<String>,
}

/// A plan, issue or report together with its project and resolved attachment URL.
#[derive(Serialize)]
pub struct RecordDetail<T> {
    #[serde(flatten)]
    pub record: T,
    pub project: AuditProject,
    pub attachment_url: Option<String>,
}
