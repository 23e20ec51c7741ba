use crate::config::AttachmentsConfig;
use crate::db::models::{HasAttachment, RecordSummary};
use crate::error::{AppError, AppResult};

/// Which record an attachment belongs to; decides its storage prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Plan,
    Issue,
    Report,
    FinalReport,
}

impl AttachmentKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            AttachmentKind::Plan => "audit/plans/",
            AttachmentKind::Issue => "audit/issues/",
            AttachmentKind::Report => "audit/reports/",
            AttachmentKind::FinalReport => "audit/final_reports/",
        }
    }
}

/// Turns client file names into stored references and stored references
/// into public URLs.
#[derive(Clone, Debug)]
pub struct AttachmentStore {
    base_url: String,
    base_url_with_slash: String,
}

impl AttachmentStore {
    pub fn new(config: &AttachmentsConfig) -> Self {
        let base_url = config.base_url.clone();
        let base_url_with_slash = if base_url.ends_with('/') {
            base_url.clone()
        } else {
            format!("{}/", base_url)
        };

        Self {
            base_url,
            base_url_with_slash,
        }
    }

    /// Normalises an optional client-supplied name into a storage
    /// reference. Blank names count as no attachment.
    pub fn reference(&self, kind: AttachmentKind, name: Option<&str>) -> AppResult<Option<String>> {
        let Some(name) = name.map(str::trim).filter(|name| !name.is_empty()) else {
            return Ok(None);
        };

        if name.contains('/') || name.contains('\\') || name.contains("..") {
            return Err(AppError::validation(format!(
                "Invalid attachment name: {}",
                name
            )));
        }
        if name.len() > 255 - kind.prefix().len() {
            return Err(AppError::validation("Attachment name is too long"));
        }

        Ok(Some(format!("{}{}", kind.prefix(), name)))
    }

    /// Full URL for a stored reference. Absolute links outside our base are
    /// returned as they are.
    pub fn url(&self, reference: &str) -> String {
        if self.is_external_url(reference) {
            return reference.to_string();
        }
        format!(
            "{}{}",
            self.base_url_with_slash,
            reference.trim_start_matches('/')
        )
    }

    pub fn url_for(&self, reference: Option<&str>) -> Option<String> {
        reference.map(|reference| self.url(reference))
    }

    pub fn summarize<T: HasAttachment>(&self, record: T) -> RecordSummary<T> {
        let attachment_url = self.url_for(record.attachment());
        RecordSummary {
            record,
            attachment_url,
        }
    }

    pub fn summarize_all<T: HasAttachment>(&self, records: Vec<T>) -> Vec<RecordSummary<T>> {
        records
            .into_iter()
            .map(|record| self.summarize(record))
            .collect()
    }

    fn is_external_url(&self, url: &str) -> bool {
        (url.starts_with("http://") || url.starts_with("https://"))
            && !url.starts_with(&self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> AttachmentStore {
        AttachmentStore::new(&AttachmentsConfig {
            base_url: "http://localhost:8000/media".to_string(),
        })
    }

    #[test]
    fn references_are_prefixed_by_record_kind() {
        let store = store();
        assert_eq!(
            store.reference(AttachmentKind::Plan, Some("scope.pdf")).unwrap(),
            Some("audit/plans/scope.pdf".to_string())
        );
        assert_eq!(
            store
                .reference(AttachmentKind::FinalReport, Some(" final.docx "))
                .unwrap(),
            Some("audit/final_reports/final.docx".to_string())
        );
        assert_eq!(store.reference(AttachmentKind::Issue, Some("  ")).unwrap(), None);
        assert_eq!(store.reference(AttachmentKind::Report, None).unwrap(), None);
    }

    #[test]
    fn path_like_names_are_rejected() {
        let store = store();
        for name in ["../secrets", "a/b.pdf", "a\\b.pdf", "..hidden"] {
            assert!(matches!(
                store.reference(AttachmentKind::Issue, Some(name)),
                Err(AppError::Validation { .. })
            ));
        }
    }

    #[test]
    fn urls_are_built_under_base() {
        let store = store();
        assert_eq!(
            store.url("audit/plans/scope.pdf"),
            "http://localhost:8000/media/audit/plans/scope.pdf"
        );
        assert_eq!(
            store.url("/audit/issues/x.png"),
            "http://localhost:8000/media/audit/issues/x.png"
        );
        assert_eq!(
            store.url("https://files.example.com/x.pdf"),
            "https://files.example.com/x.pdf"
        );
        assert_eq!(store.url_for(None), None);
    }
}
