pub mod assignments;
pub mod auth;
pub mod departments;
pub mod final_reports;
pub mod issues;
pub mod plans;
pub mod projects;
pub mod reports;

pub use assignments::AssignmentsRepo;
pub use auth::AuthRepo;
pub use departments::DepartmentsRepo;
pub use final_reports::FinalReportsRepo;
pub use issues::IssuesRepo;
pub use plans::PlansRepo;
pub use projects::ProjectsRepo;
pub use reports::ReportsRepo;
