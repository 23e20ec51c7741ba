use std::borrow::Cow;

use validator::ValidationError;

/// Rejects empty and whitespace-only text.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some(Cow::Borrowed("This field is required"));
        return Err(error);
    }
    Ok(())
}

/// Attachment names are plain file names.
pub fn plain_file_name(value: &str) -> Result<(), ValidationError> {
    if value.contains('/') || value.contains('\\') || value.contains("..") {
        let mut error = ValidationError::new("invalid_file_name");
        error.message = Some(Cow::Borrowed(
            "Attachment must be a file name without path separators",
        ));
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_rejected() {
        assert!(not_blank("Review vendor contracts").is_ok());
        assert_eq!(not_blank(" \n\t").unwrap_err().code, "required");
    }

    #[test]
    fn file_names_cannot_traverse() {
        assert!(plain_file_name("scope-v2.pdf").is_ok());
        for name in ["../etc/passwd", "dir/file.pdf", "dir\\file.pdf"] {
            assert_eq!(plain_file_name(name).unwrap_err().code, "invalid_file_name");
        }
    }
}
