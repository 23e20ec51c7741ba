// Sub-modules organized by functional domain
pub mod api;
pub mod assignment;
pub mod auth;
pub mod department;
pub mod final_report;
pub mod issue;
pub mod plan;
pub mod project;
pub mod record;
pub mod report;
pub mod workflow_request;

// API response structures
pub use api::*;

// Authentication and user models
pub use auth::*;

// Audit entities
pub use assignment::*;
pub use department::*;
pub use final_report::*;
pub use issue::*;
pub use plan::*;
pub use project::*;
pub use record::*;
pub use report::*;
pub use workflow_request::*;
