use std::collections::HashSet;

use crate::error::AppError;

pub fn validate_create_project(title: &str, auditor_ids: &[i32]) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::validation("Project title is required"));
    }

    let mut seen = HashSet::new();
    if let Some(duplicate) = auditor_ids.iter().find(|id| !seen.insert(**id)) {
        return Err(AppError::validation(format!(
            "Auditor {} is listed more than once",
            duplicate
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_required() {
        assert!(validate_create_project("Payroll", &[1, 2]).is_ok());
        assert!(validate_create_project("  ", &[]).is_err());
    }

    #[test]
    fn auditors_are_unique() {
        let err = validate_create_project("Payroll", &[4, 5, 4]).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Auditor 4 is listed more than once");
    }
}
