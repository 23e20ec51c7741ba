pub mod accounts_service;
pub mod context;
pub mod dashboard_service;
pub mod directory_service;
pub mod projects_service;
pub mod records_service;
pub mod workflow_service;

pub use accounts_service::AccountsService;
pub use dashboard_service::DashboardService;
pub use directory_service::DirectoryService;
pub use projects_service::ProjectsService;
pub use records_service::RecordsService;
pub use workflow_service::WorkflowService;
pub use context::RequestContext;
