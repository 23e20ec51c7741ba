//! Audit workflow state machine.
//!
//! Every mutating action on a project goes through [`apply`], which checks
//! the actor's role, the referenced record, assignment or department links
//! and the current statuses, then returns the project status change and the
//! record effects to persist. Nothing here touches the database.

pub mod actor;
pub mod command;
pub mod engine;
pub mod final_report;

pub use actor::Actor;
pub use command::{ActionKind, Decision, WorkflowCommand};
pub use engine::{
    AvailableAction, Effect, ProjectSnapshot, Transition, WorkflowError, allowed_actions, apply,
    require_role,
};
pub use final_report::compose_final_report;
