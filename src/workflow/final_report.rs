use super::engine::ProjectSnapshot;
use crate::db::enums::IssueStatus;
use crate::db::models::AuditReport;

const INDENT: &str = "            ";

/// Builds the stored body of a project's final report.
///
/// The layout is fixed: a leading newline, each line indented by twelve
/// spaces and a trailing indented blank line. The plan is the first one by
/// id; only approved issues are listed.
pub fn compose_final_report(
    snapshot: &ProjectSnapshot,
    report: &AuditReport,
    final_notes: &str,
) -> String {
    let project = &snapshot.project;
    let plan = snapshot
        .plans
        .iter()
        .min_by_key(|plan| plan.id)
        .map(|plan| plan.description.as_str())
        .unwrap_or("No plan");
    let issues = snapshot
        .issues
        .iter()
        .filter(|issue| issue.status == IssueStatus::Approved)
        .map(|issue| format!("- {}", issue.description))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "\n{i}Final Audit Report for {title}\n\
         {i}\n\
         {i}Project Description: {description}\n\
         {i}Department: {department}\n\
         {i}\n\
         {i}Audit Plan: {plan}\n\
         {i}\n\
         {i}Issues Found:\n\
         {i}{issues}\n\
         {i}\n\
         {i}Department Response: {response}\n\
         {i}\n\
         {i}Final Manager Notes: {final_notes}\n\
         {i}",
        i = INDENT,
        title = project.title,
        description = project.description,
        department = snapshot.department.name,
        plan = plan,
        issues = issues,
        response = report.department_notes,
        final_notes = final_notes,
    )
}
