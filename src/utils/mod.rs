pub mod attachments;

pub use attachments::{AttachmentKind, AttachmentStore};
